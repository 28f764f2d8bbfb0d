//! Rotor aerodynamic linearization for floating-platform models.
//!
//! Two entry points:
//! - [`steady_contribution`]: rigid-body surge damping and wind excitation with no control.
//! - [`aero_servo_response`]: frequency-dependent added mass and damping of a pitch-controlled
//!   rotor, from closed-form drivetrain transfer functions.
//!
//! Both borrow already-loaded tables and return freshly allocated results. The operating wind
//! speed is always an explicit argument.

pub mod derivatives;
pub mod servo;
pub mod steady;
pub mod sweep;
pub mod turbine;

use rotor_control::{ControlError, ScheduledGains};
use rotor_core::OperatingSchedule;
use rotor_solver::{Input, Load, LoadDerivatives, SolverError};
use thiserror::Error;

pub use derivatives::OperatingDerivatives;
pub use servo::{
    AeroServoResponse, CharacteristicEquation, FrequencyResponse, MIN_FREQUENCY_RAD_S,
    aero_servo_response, evaluate_response,
};
pub use steady::{SteadyContribution, steady_contribution};
pub use sweep::{SweepPoint, default_frequency_grid, period_to_frequency, wind_speed_sweep};
pub use turbine::{Turbine, TurbineError};

/// Errors raised by the linearization routines.
#[derive(Debug, Error)]
pub enum LinearizationError {
    #[error("frequency at index {index} is {value} rad/s; frequencies must be finite and positive")]
    SingularFrequency { index: usize, value: f64 },
    #[error("frequency scan is empty")]
    EmptyFrequencies,
    #[error("frequencies must increase: index {index} holds {value} rad/s")]
    UnorderedFrequencies { index: usize, value: f64 },
    #[error("`{quantity}` has {found} entries but the operating schedule has {expected}")]
    ScheduleMismatch {
        quantity: String,
        expected: usize,
        found: usize,
    },
    #[error("expected {nw} excitation amplitudes, got {found}")]
    AmplitudeLength { nw: usize, found: usize },
    #[error("hub force/moment outputs missing: {found} entries for {expected} operating points")]
    MissingHubLoads { expected: usize, found: usize },
    #[error("`{name}` must be finite and positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("wind speed must be finite, got {0}")]
    InvalidWindSpeed(f64),
    #[error("gain lookup failed: {0}")]
    Control(#[from] ControlError),
    #[error("solver failed: {0}")]
    Solver(#[from] SolverError),
}

/// Read-only view of everything the aero-servo linearization needs for one turbine.
#[derive(Debug, Clone, Copy)]
pub struct AeroServoModel<'a> {
    schedule: &'a OperatingSchedule,
    derivatives: &'a LoadDerivatives,
    gains: &'a ScheduledGains,
    drivetrain_inertia: f64,
    hub_height: f64,
}

impl<'a> AeroServoModel<'a> {
    /// Check that all tables are co-indexed with the schedule before any interpolation.
    pub fn new(
        schedule: &'a OperatingSchedule,
        derivatives: &'a LoadDerivatives,
        gains: &'a ScheduledGains,
        drivetrain_inertia: f64,
        hub_height: f64,
    ) -> Result<Self, LinearizationError> {
        let expected = schedule.len();
        for load in [Load::Thrust, Load::Torque] {
            for input in Input::ALL {
                let found = derivatives.get(load, input).len();
                if found != expected {
                    return Err(LinearizationError::ScheduleMismatch {
                        quantity: format!("d{}/d{}", load.label(), input.label()),
                        expected,
                        found,
                    });
                }
            }
        }
        if gains.len() != expected {
            return Err(LinearizationError::ScheduleMismatch {
                quantity: "controller gains".to_string(),
                expected,
                found: gains.len(),
            });
        }
        check_positive("drivetrain_inertia", drivetrain_inertia)?;
        check_positive("hub_height", hub_height)?;

        Ok(Self {
            schedule,
            derivatives,
            gains,
            drivetrain_inertia,
            hub_height,
        })
    }

    pub fn schedule(&self) -> &'a OperatingSchedule {
        self.schedule
    }

    pub fn derivatives(&self) -> &'a LoadDerivatives {
        self.derivatives
    }

    pub fn gains(&self) -> &'a ScheduledGains {
        self.gains
    }

    pub fn drivetrain_inertia(&self) -> f64 {
        self.drivetrain_inertia
    }

    pub fn hub_height(&self) -> f64 {
        self.hub_height
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), LinearizationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LinearizationError::InvalidParameter { name, value })
    }
}

pub(crate) fn check_wind_speed(wind_speed: f64) -> Result<(), LinearizationError> {
    if wind_speed.is_finite() {
        Ok(())
    } else {
        Err(LinearizationError::InvalidWindSpeed(wind_speed))
    }
}
