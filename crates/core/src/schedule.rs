//! Operating schedule shared by the solver, controller and linearization crates.

use thiserror::Error;

use crate::interp::{self, Bounds, Sample};

/// One steady aerodynamic operating condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    pub wind_speed_m_s: f64,
    pub rotor_speed_rpm: f64,
    pub pitch_deg: f64,
}

/// Errors raised when an operating schedule is malformed.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("operating schedule is empty")]
    Empty,
    #[error("schedule field `{field}` has {found} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("schedule field `{field}` has a non-finite value at index {index}")]
    NonFinite { field: &'static str, index: usize },
    #[error(
        "wind speeds must increase strictly: index {index} holds {value} m/s after {previous} m/s"
    )]
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },
}

/// Operating points sorted by increasing wind speed, stored as co-indexed arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingSchedule {
    wind_speed_m_s: Vec<f64>,
    rotor_speed_rpm: Vec<f64>,
    pitch_deg: Vec<f64>,
}

impl OperatingSchedule {
    pub fn new(
        wind_speed_m_s: Vec<f64>,
        rotor_speed_rpm: Vec<f64>,
        pitch_deg: Vec<f64>,
    ) -> Result<Self, ScheduleError> {
        let n = wind_speed_m_s.len();
        if n == 0 {
            return Err(ScheduleError::Empty);
        }
        for (field, values) in [
            ("rotor_speed_rpm", &rotor_speed_rpm),
            ("pitch_deg", &pitch_deg),
        ] {
            if values.len() != n {
                return Err(ScheduleError::LengthMismatch {
                    field,
                    expected: n,
                    found: values.len(),
                });
            }
        }
        for (field, values) in [
            ("wind_speed_m_s", &wind_speed_m_s),
            ("rotor_speed_rpm", &rotor_speed_rpm),
            ("pitch_deg", &pitch_deg),
        ] {
            if let Some(index) = values.iter().position(|v| !v.is_finite()) {
                return Err(ScheduleError::NonFinite { field, index });
            }
        }
        if let Some(index) = wind_speed_m_s.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ScheduleError::NotIncreasing {
                index: index + 1,
                previous: wind_speed_m_s[index],
                value: wind_speed_m_s[index + 1],
            });
        }

        Ok(Self {
            wind_speed_m_s,
            rotor_speed_rpm,
            pitch_deg,
        })
    }

    /// Build a schedule from individual operating points.
    pub fn from_points(points: &[OperatingPoint]) -> Result<Self, ScheduleError> {
        Self::new(
            points.iter().map(|p| p.wind_speed_m_s).collect(),
            points.iter().map(|p| p.rotor_speed_rpm).collect(),
            points.iter().map(|p| p.pitch_deg).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.wind_speed_m_s.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wind_speed_m_s.is_empty()
    }

    pub fn wind_speed(&self) -> &[f64] {
        &self.wind_speed_m_s
    }

    pub fn rotor_speed_rpm(&self) -> &[f64] {
        &self.rotor_speed_rpm
    }

    pub fn pitch_deg(&self) -> &[f64] {
        &self.pitch_deg
    }

    pub fn point(&self, index: usize) -> Option<OperatingPoint> {
        Some(OperatingPoint {
            wind_speed_m_s: *self.wind_speed_m_s.get(index)?,
            rotor_speed_rpm: self.rotor_speed_rpm[index],
            pitch_deg: self.pitch_deg[index],
        })
    }

    pub fn points(&self) -> impl Iterator<Item = OperatingPoint> + '_ {
        (0..self.len()).filter_map(|i| self.point(i))
    }

    /// Smallest and largest scheduled wind speed.
    pub fn wind_speed_range(&self) -> (f64, f64) {
        (
            self.wind_speed_m_s[0],
            self.wind_speed_m_s[self.wind_speed_m_s.len() - 1],
        )
    }

    /// True when `wind_speed` lies inside the scheduled range (edges included).
    pub fn contains(&self, wind_speed: f64) -> bool {
        let (lo, hi) = self.wind_speed_range();
        (lo..=hi).contains(&wind_speed)
    }

    /// Interpolate a co-indexed table against wind speed, clamping outside the schedule.
    ///
    /// # Panics
    /// Panics if `table` is not co-indexed with the schedule.
    pub fn interp_at(&self, wind_speed: f64, table: &[f64]) -> Sample {
        interp::interp_checked(wind_speed, &self.wind_speed_m_s, table, Bounds::Clamp)
    }
}
