//! Steady rotor loads, their sensitivities, and the solver contract that produces them.
//!
//! The blade-element solver itself lives outside this workspace. It is represented by the
//! [`AeroSolver`] trait; [`TabulatedSolver`] answers from solver output exported to CSV.

pub mod tabulated;

use rotor_core::OperatingSchedule;
use thiserror::Error;

pub use tabulated::TabulatedSolver;

/// Load quantity produced by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Load {
    Thrust,
    Torque,
    Power,
}

/// Operating variable the loads are differentiated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Hub-height wind speed, per m/s.
    WindSpeed,
    /// Rotor speed, per rpm.
    RotorSpeed,
    /// Blade pitch, per degree.
    Pitch,
}

impl Load {
    pub const ALL: [Load; 3] = [Load::Thrust, Load::Torque, Load::Power];

    pub fn label(self) -> &'static str {
        match self {
            Load::Thrust => "thrust",
            Load::Torque => "torque",
            Load::Power => "power",
        }
    }
}

impl Input {
    pub const ALL: [Input; 3] = [Input::WindSpeed, Input::RotorSpeed, Input::Pitch];

    pub fn label(self) -> &'static str {
        match self {
            Input::WindSpeed => "wind_speed",
            Input::RotorSpeed => "rotor_speed",
            Input::Pitch => "pitch",
        }
    }
}

/// Partials of one load quantity, co-indexed with the operating schedule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sensitivities {
    pub wind_speed: Vec<f64>,
    pub rotor_speed: Vec<f64>,
    pub pitch: Vec<f64>,
}

impl Sensitivities {
    pub fn get(&self, input: Input) -> &[f64] {
        match input {
            Input::WindSpeed => &self.wind_speed,
            Input::RotorSpeed => &self.rotor_speed,
            Input::Pitch => &self.pitch,
        }
    }
}

/// Thrust, torque and power sensitivities in solver units (per m/s, per rpm, per degree).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadDerivatives {
    pub thrust: Sensitivities,
    pub torque: Sensitivities,
    pub power: Sensitivities,
}

impl LoadDerivatives {
    pub fn get(&self, load: Load, input: Input) -> &[f64] {
        match load {
            Load::Thrust => self.thrust.get(input),
            Load::Torque => self.torque.get(input),
            Load::Power => self.power.get(input),
        }
    }

    /// Ensure every table has `expected` finite entries.
    pub fn validate(&self, expected: usize) -> Result<(), SolverError> {
        for load in Load::ALL {
            for input in Input::ALL {
                let quantity = format!("d{}/d{}", load.label(), input.label());
                check_table(&quantity, self.get(load, input), expected)?;
            }
        }
        Ok(())
    }
}

/// Steady loads per operating point, hub quantities in the non-rotating hub frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RotorLoads {
    pub power_w: Vec<f64>,
    pub power_coefficient: Vec<f64>,
    pub thrust_n: Vec<f64>,
    pub torque_nm: Vec<f64>,
    pub hub_force_n: Vec<[f64; 3]>,
    pub hub_moment_nm: Vec<[f64; 3]>,
}

impl RotorLoads {
    pub fn validate(&self, expected: usize) -> Result<(), SolverError> {
        check_table("power", &self.power_w, expected)?;
        check_table("power_coefficient", &self.power_coefficient, expected)?;
        check_table("thrust", &self.thrust_n, expected)?;
        check_table("torque", &self.torque_nm, expected)?;
        for (quantity, table) in [
            ("hub_force", &self.hub_force_n),
            ("hub_moment", &self.hub_moment_nm),
        ] {
            if table.len() != expected {
                return Err(SolverError::MalformedTable {
                    quantity: quantity.to_string(),
                    expected,
                    found: table.len(),
                });
            }
            if let Some(index) = table.iter().position(|v| v.iter().any(|c| !c.is_finite())) {
                return Err(SolverError::NonFinite {
                    quantity: quantity.to_string(),
                    index,
                });
            }
        }
        Ok(())
    }
}

/// Everything the solver returns for a schedule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolverOutput {
    pub loads: RotorLoads,
    pub derivatives: LoadDerivatives,
}

impl SolverOutput {
    pub fn validate(&self, expected: usize) -> Result<(), SolverError> {
        self.loads.validate(expected)?;
        self.derivatives.validate(expected)
    }
}

/// Errors surfaced by a solver or by malformed solver output.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to read solver table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse solver table: {0}")]
    Csv(#[from] csv::Error),
    #[error("solver table is empty")]
    EmptyTable,
    #[error(
        "no solver result for operating point {index} (U = {wind_speed_m_s} m/s, Omega = {rotor_speed_rpm} rpm, pitch = {pitch_deg} deg)"
    )]
    MissingOperatingPoint {
        index: usize,
        wind_speed_m_s: f64,
        rotor_speed_rpm: f64,
        pitch_deg: f64,
    },
    #[error("solver table `{quantity}` has {found} entries, expected {expected}")]
    MalformedTable {
        quantity: String,
        expected: usize,
        found: usize,
    },
    #[error("solver table `{quantity}` has a non-finite value at index {index}")]
    NonFinite { quantity: String, index: usize },
    #[error("solver did not converge: {0}")]
    NotConverged(String),
}

/// Contract of the external aerodynamics solver.
pub trait AeroSolver {
    /// Evaluate steady loads and their derivatives at every point of `schedule`.
    fn evaluate(&self, schedule: &OperatingSchedule) -> Result<SolverOutput, SolverError>;
}

fn check_table(quantity: &str, table: &[f64], expected: usize) -> Result<(), SolverError> {
    if table.len() != expected {
        return Err(SolverError::MalformedTable {
            quantity: quantity.to_string(),
            expected,
            found: table.len(),
        });
    }
    if let Some(index) = table.iter().position(|v| !v.is_finite()) {
        return Err(SolverError::NonFinite {
            quantity: quantity.to_string(),
            index,
        });
    }
    Ok(())
}
