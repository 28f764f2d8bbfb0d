//! Aero-servo coefficients probed at one frequency across a range of wind speeds.

use std::f64::consts::PI;

use num_complex::Complex64;
use rotor_core::interp::{self, Bounds};

use crate::{AeroServoModel, LinearizationError, aero_servo_response};

/// First angular frequency of the default scan (rad/s).
pub const DEFAULT_FREQUENCY_START: f64 = 0.05;
/// Exclusive upper end of the default scan (rad/s).
pub const DEFAULT_FREQUENCY_STOP: f64 = 3.0;
pub const DEFAULT_FREQUENCY_STEP: f64 = 0.05;

/// Evenly spaced positive frequencies `0.05, 0.10, … 2.95` rad/s.
pub fn default_frequency_grid() -> Vec<f64> {
    interp::arange(
        DEFAULT_FREQUENCY_START,
        DEFAULT_FREQUENCY_STOP,
        DEFAULT_FREQUENCY_STEP,
    )
}

/// Angular frequency of a period in seconds.
pub fn period_to_frequency(period_s: f64) -> f64 {
    2.0 * PI / period_s
}

/// Coefficients at one wind speed of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    pub wind_speed: f64,
    pub a: f64,
    pub b: f64,
    pub roots: Vec<Complex64>,
    pub clamped: bool,
}

/// Evaluate the response over `frequencies` at every wind speed and interpolate a and b at
/// `probe_frequency`.
///
/// `frequencies` must increase; a probe outside the scan holds the edge value.
pub fn wind_speed_sweep(
    model: &AeroServoModel<'_>,
    wind_speeds: &[f64],
    frequencies: &[f64],
    probe_frequency: f64,
) -> Result<Vec<SweepPoint>, LinearizationError> {
    if let Some(index) = frequencies.windows(2).position(|w| w[1] <= w[0]) {
        return Err(LinearizationError::UnorderedFrequencies {
            index: index + 1,
            value: frequencies[index + 1],
        });
    }
    if frequencies.is_empty() {
        return Err(LinearizationError::EmptyFrequencies);
    }
    let (lo, hi) = (frequencies[0], frequencies[frequencies.len() - 1]);
    if !(lo..=hi).contains(&probe_frequency) {
        tracing::warn!(
            probe_frequency,
            lo,
            hi,
            "probe frequency outside scan, holding edge coefficients"
        );
    }

    wind_speeds
        .iter()
        .map(|&wind_speed| {
            let response = aero_servo_response(model, wind_speed, frequencies)?;
            Ok(SweepPoint {
                wind_speed,
                a: interp::interp(probe_frequency, frequencies, response.a(), Bounds::Clamp),
                b: interp::interp(probe_frequency, frequencies, response.b(), Bounds::Clamp),
                roots: response.response.characteristic.roots,
                clamped: response.clamped,
            })
        })
        .collect()
}
