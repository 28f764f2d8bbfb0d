//! Runtime turbine record assembled from configuration data.

use std::path::PathBuf;

use rotor_config::{ConfigError, TurbineConfig};
use rotor_control::{ControlError, ScheduledGains};
use rotor_core::{OperatingSchedule, ScheduleError};
use rotor_solver::LoadDerivatives;
use thiserror::Error;

use crate::{AeroServoModel, LinearizationError};

/// Errors surfaced when selecting or converting turbines.
#[derive(Debug, Error)]
pub enum TurbineError {
    #[error("turbine '{0}' not found in catalog")]
    NotFound(String),
    #[error("turbine catalog is empty")]
    EmptyCatalog,
    #[error("invalid turbine configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid operating schedule: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("invalid controller gains: {0}")]
    Control(#[from] ControlError),
}

/// Turbine data used by the linearization: schedule, drivetrain, hub height and gains.
#[derive(Debug, Clone)]
pub struct Turbine {
    pub name: String,
    pub schedule: OperatingSchedule,
    pub drivetrain_inertia_kg_m2: f64,
    pub hub_height_m: f64,
    pub gains: ScheduledGains,
    pub derivative_table: Option<PathBuf>,
    pub geometry: Option<PathBuf>,
}

impl Turbine {
    /// Convert a `TurbineConfig` into the runtime representation.
    pub fn from_config(config: &TurbineConfig) -> Result<Self, TurbineError> {
        config.validate()?;
        let ops = &config.operating_schedule;
        let schedule = OperatingSchedule::new(
            ops.wind_speed_m_s.clone(),
            ops.rotor_speed_rpm.clone(),
            ops.pitch_deg.clone(),
        )?;
        let gains = ScheduledGains::from_config(&config.control, &schedule)?;

        Ok(Self {
            name: config.name.clone(),
            schedule,
            drivetrain_inertia_kg_m2: config.drivetrain_inertia_kg_m2,
            hub_height_m: config.hub_height_m,
            gains,
            derivative_table: config.derivative_table.clone(),
            geometry: config.geometry.clone(),
        })
    }

    /// Borrow this turbine together with solver derivatives for linearization.
    pub fn model<'a>(
        &'a self,
        derivatives: &'a LoadDerivatives,
    ) -> Result<AeroServoModel<'a>, LinearizationError> {
        AeroServoModel::new(
            &self.schedule,
            derivatives,
            &self.gains,
            self.drivetrain_inertia_kg_m2,
            self.hub_height_m,
        )
    }
}

/// Select a turbine from the catalog by optional name, defaulting to the first entry.
pub fn select(configs: &[TurbineConfig], requested: Option<&str>) -> Result<Turbine, TurbineError> {
    if configs.is_empty() {
        return Err(TurbineError::EmptyCatalog);
    }

    let chosen = match requested {
        Some(name) => rotor_config::find_turbine(configs, name)
            .ok_or_else(|| TurbineError::NotFound(name.to_string()))?,
        None => &configs[0],
    };

    Turbine::from_config(chosen)
}
