//! Configuration models and loaders for turbine linearization cases.
//!
//! A turbine is described purely by data: its operating schedule, drivetrain inertia, hub
//! height and pitch-controller gains. Adding a turbine means adding a record, not code.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Turbine record parsed from the turbine catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct TurbineConfig {
    pub name: String,
    pub hub_height_m: f64,
    pub drivetrain_inertia_kg_m2: f64,
    pub operating_schedule: OperatingScheduleConfig,
    #[serde(default)]
    pub control: ControlConfig,
    /// Tabulated solver output (loads and derivatives) for this turbine's schedule.
    #[serde(default)]
    pub derivative_table: Option<PathBuf>,
    /// windIO-style geometry description used to build solver inputs.
    #[serde(default)]
    pub geometry: Option<PathBuf>,
}

/// Steady operating points, co-indexed and sorted by wind speed.
#[derive(Debug, Deserialize, Clone)]
pub struct OperatingScheduleConfig {
    pub wind_speed_m_s: Vec<f64>,
    pub rotor_speed_rpm: Vec<f64>,
    pub pitch_deg: Vec<f64>,
}

/// Pitch-controller description in the controller tool's sign convention.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(tag = "type")]
pub enum ControlConfig {
    #[serde(rename = "disabled")]
    #[default]
    Disabled,
    #[serde(rename = "fixed")]
    Fixed {
        kp: f64,
        ki: f64,
        #[serde(default)]
        k_float: f64,
    },
    #[serde(rename = "scheduled")]
    Scheduled {
        pitch_angles_rad: Vec<f64>,
        kp: Vec<f64>,
        ki: Vec<f64>,
        #[serde(default)]
        k_float: f64,
    },
}

impl ControlConfig {
    /// Platform-pitch feedback gain, zero when control is disabled.
    pub fn k_float(&self) -> f64 {
        match self {
            ControlConfig::Disabled => 0.0,
            ControlConfig::Fixed { k_float, .. } | ControlConfig::Scheduled { k_float, .. } => {
                *k_float
            }
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("turbine `{turbine}`: {reason}")]
    Invalid { turbine: String, reason: String },
}

impl TurbineConfig {
    /// Check the scalar parameters and table shapes that do not depend on other crates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid {
            turbine: self.name.clone(),
            reason,
        };

        if !(self.hub_height_m.is_finite() && self.hub_height_m > 0.0) {
            return Err(invalid(format!(
                "hub height must be positive, got {} m",
                self.hub_height_m
            )));
        }
        if !(self.drivetrain_inertia_kg_m2.is_finite() && self.drivetrain_inertia_kg_m2 > 0.0) {
            return Err(invalid(format!(
                "drivetrain inertia must be positive, got {} kg m^2",
                self.drivetrain_inertia_kg_m2
            )));
        }

        let schedule = &self.operating_schedule;
        let n = schedule.wind_speed_m_s.len();
        if schedule.rotor_speed_rpm.len() != n || schedule.pitch_deg.len() != n {
            return Err(invalid(format!(
                "operating schedule lengths differ (wind {}, rotor speed {}, pitch {})",
                n,
                schedule.rotor_speed_rpm.len(),
                schedule.pitch_deg.len()
            )));
        }

        if let ControlConfig::Scheduled {
            pitch_angles_rad,
            kp,
            ki,
            ..
        } = &self.control
        {
            if pitch_angles_rad.len() != kp.len() || pitch_angles_rad.len() != ki.len() {
                return Err(invalid(format!(
                    "gain schedule lengths differ (angles {}, kp {}, ki {})",
                    pitch_angles_rad.len(),
                    kp.len(),
                    ki.len()
                )));
            }
        }

        Ok(())
    }
}

/// Load and validate turbine configurations from a YAML list, a TOML file, or a directory.
pub fn load_turbines<P: AsRef<Path>>(path: P) -> Result<Vec<TurbineConfig>, ConfigError> {
    let turbines: Vec<TurbineConfig> = load_records(path)?;
    for turbine in &turbines {
        turbine.validate()?;
    }
    Ok(turbines)
}

/// Find a turbine by name, ignoring case.
pub fn find_turbine<'a>(turbines: &'a [TurbineConfig], name: &str) -> Option<&'a TurbineConfig> {
    let upper = name.to_uppercase();
    turbines.iter().find(|t| t.name.to_uppercase() == upper)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if has_extension(path, &["toml"]) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_extension(path, &["toml", "yaml", "yml"]))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = if has_extension(&path, &["toml"]) {
            toml::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        records.push(record);
    }
    Ok(records)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext))
        .unwrap_or(false)
}
