//! Pitch-controller gains for the aero-servo linearization.
//!
//! Gains arrive in the controller-tuning tool's sign convention. Everything returned by
//! [`ScheduledGains::at`] is negated to match the convention of the transfer functions in
//! `rotor_linearize`.

use rotor_config::ControlConfig;
use rotor_core::OperatingSchedule;
use rotor_core::interp::{self, Bounds};
use rotor_core::units::rad_to_deg;
use thiserror::Error;

/// Controller description in the tuning tool's sign convention.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlLaw {
    /// No pitch control action.
    Disabled,
    /// Constant gains at every wind speed.
    Fixed { kp: f64, ki: f64 },
    /// Gains scheduled against blade pitch.
    Scheduled {
        pitch_rad: Vec<f64>,
        kp: Vec<f64>,
        ki: Vec<f64>,
    },
}

/// Errors raised while building a gain schedule.
#[derive(Debug, Error, PartialEq)]
pub enum ControlError {
    #[error("gain table lengths differ or are empty (angles {angles}, kp {kp}, ki {ki})")]
    TableLength { angles: usize, kp: usize, ki: usize },
    #[error("gain schedule pitch angles are not monotonic near index {index}")]
    NonMonotonic { index: usize },
    #[error("gain `{field}` has a non-finite value at index {index}")]
    NonFinite { field: &'static str, index: usize },
    #[error("scheduled gains have {found} entries but the operating schedule has {expected}")]
    ScheduleMismatch { expected: usize, found: usize },
}

/// Gains to use at a single wind speed, already sign-flipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainPoint {
    pub kp: f64,
    pub ki: f64,
    pub k_float: f64,
    /// The wind speed lay outside the schedule and edge gains were used.
    pub clamped: bool,
}

impl GainPoint {
    /// Uncontrolled rotor: no pitch action and no platform feedback.
    pub fn open_loop() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            k_float: 0.0,
            clamped: false,
        }
    }
}

/// Controller gains evaluated at each operating point of a schedule.
///
/// `kp` and `ki` keep the tuning tool's sign and are co-indexed with the schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledGains {
    kp: Vec<f64>,
    ki: Vec<f64>,
    k_float: f64,
}

impl ScheduledGains {
    pub fn new(
        law: &ControlLaw,
        k_float: f64,
        schedule: &OperatingSchedule,
    ) -> Result<Self, ControlError> {
        let n = schedule.len();
        let (kp, ki) = match law {
            ControlLaw::Disabled => (vec![0.0; n], vec![0.0; n]),
            ControlLaw::Fixed { kp, ki } => (vec![*kp; n], vec![*ki; n]),
            ControlLaw::Scheduled { pitch_rad, kp, ki } => {
                let table = GainTable::new(pitch_rad, kp, ki)?;
                table.at_pitch(schedule.pitch_deg())
            }
        };
        Ok(Self { kp, ki, k_float })
    }

    /// Build from already-evaluated per-point gains (tuning-tool sign).
    pub fn from_parts(
        kp: Vec<f64>,
        ki: Vec<f64>,
        k_float: f64,
        schedule: &OperatingSchedule,
    ) -> Result<Self, ControlError> {
        for found in [kp.len(), ki.len()] {
            if found != schedule.len() {
                return Err(ControlError::ScheduleMismatch {
                    expected: schedule.len(),
                    found,
                });
            }
        }
        Ok(Self { kp, ki, k_float })
    }

    pub fn from_config(
        config: &ControlConfig,
        schedule: &OperatingSchedule,
    ) -> Result<Self, ControlError> {
        let law = match config {
            ControlConfig::Disabled => ControlLaw::Disabled,
            ControlConfig::Fixed { kp, ki, .. } => ControlLaw::Fixed { kp: *kp, ki: *ki },
            ControlConfig::Scheduled {
                pitch_angles_rad,
                kp,
                ki,
                ..
            } => ControlLaw::Scheduled {
                pitch_rad: pitch_angles_rad.clone(),
                kp: kp.clone(),
                ki: ki.clone(),
            },
        };
        Self::new(&law, config.k_float(), schedule)
    }

    pub fn len(&self) -> usize {
        self.kp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kp.is_empty()
    }

    /// Proportional gains per operating point, tuning-tool sign.
    pub fn kp(&self) -> &[f64] {
        &self.kp
    }

    /// Integral gains per operating point, tuning-tool sign.
    pub fn ki(&self) -> &[f64] {
        &self.ki
    }

    pub fn k_float(&self) -> f64 {
        self.k_float
    }

    /// Sign-flipped gains interpolated at `wind_speed`, clamped to the schedule edges.
    pub fn at(
        &self,
        wind_speed: f64,
        schedule: &OperatingSchedule,
    ) -> Result<GainPoint, ControlError> {
        if self.len() != schedule.len() {
            return Err(ControlError::ScheduleMismatch {
                expected: schedule.len(),
                found: self.len(),
            });
        }
        let kp = schedule.interp_at(wind_speed, &self.kp);
        let ki = schedule.interp_at(wind_speed, &self.ki);
        let clamped = kp.out_of_range();
        if clamped {
            let (lo, hi) = schedule.wind_speed_range();
            tracing::warn!(
                wind_speed,
                lo,
                hi,
                "wind speed outside gain schedule, holding edge gains"
            );
        }
        Ok(GainPoint {
            kp: -kp.value,
            ki: -ki.value,
            k_float: self.k_float,
            clamped,
        })
    }
}

/// Piecewise-linear gain curve against pitch, abscissa in degrees and increasing.
#[derive(Debug, Clone)]
struct GainTable {
    pitch_deg: Vec<f64>,
    kp: Vec<f64>,
    ki: Vec<f64>,
}

impl GainTable {
    fn new(pitch_rad: &[f64], kp: &[f64], ki: &[f64]) -> Result<Self, ControlError> {
        if pitch_rad.is_empty() || pitch_rad.len() != kp.len() || pitch_rad.len() != ki.len() {
            return Err(ControlError::TableLength {
                angles: pitch_rad.len(),
                kp: kp.len(),
                ki: ki.len(),
            });
        }
        for (field, values) in [("pitch_angles_rad", pitch_rad), ("kp", kp), ("ki", ki)] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(ControlError::NonFinite { field, index });
            }
        }

        let mut pitch_deg: Vec<f64> = pitch_rad.iter().map(|&p| rad_to_deg(p)).collect();
        let mut kp = kp.to_vec();
        let mut ki = ki.to_vec();

        if !interp::is_strictly_increasing(&pitch_deg) {
            let decreasing = pitch_deg.windows(2).all(|w| w[0] > w[1]);
            if !decreasing {
                let index = pitch_deg
                    .windows(2)
                    .position(|w| w[1] <= w[0])
                    .map(|i| i + 1)
                    .unwrap_or(0);
                return Err(ControlError::NonMonotonic { index });
            }
            pitch_deg.reverse();
            kp.reverse();
            ki.reverse();
        }

        Ok(Self { pitch_deg, kp, ki })
    }

    /// Gains at each scheduled pitch; zero outside the tabulated pitch range.
    fn at_pitch(&self, pitch_deg: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let (lo, hi) = (self.pitch_deg[0], self.pitch_deg[self.pitch_deg.len() - 1]);
        let untested = pitch_deg.iter().filter(|&&p| p < lo || p > hi).count();
        if untested > 0 {
            tracing::warn!(
                untested,
                lo,
                hi,
                "scheduled pitch outside gain table, no control action at those points"
            );
        }
        (
            interp::interp_many(pitch_deg, &self.pitch_deg, &self.kp, Bounds::Fill(0.0)),
            interp::interp_many(pitch_deg, &self.pitch_deg, &self.ki, Bounds::Fill(0.0)),
        )
    }
}
