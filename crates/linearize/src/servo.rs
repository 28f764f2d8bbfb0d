//! Frequency-domain aero-servo linearization.
//!
//! The drivetrain is a single rotational inertia driven by aerodynamic torque, with a PI pitch
//! controller closing the loop on rotor speed. For a wind-speed disturbance at frequency ω the
//! closed loop gives the control transfer function
//!
//! ```text
//! D(ω) = I ω² + (dQ/dΩ + Kp dQ/dθ) iω + Ki dQ/dθ
//! C(ω) = iω (dQ/dU − k_float dQ/dθ / H) / D(ω)
//! T(ω) = iω (dT/dU − k_float dT/dθ / H) − [(dT/dΩ + Kp dT/dθ) iω + Ki dT/dθ] C(ω)
//! ```
//!
//! and the rotor thrust response splits into `a(ω) = −Re T / ω²` and `b(ω) = Im T / ω`.

use num_complex::Complex64;
use rotor_control::GainPoint;

use crate::derivatives::OperatingDerivatives;
use crate::{AeroServoModel, LinearizationError, check_positive, check_wind_speed};

/// Frequencies at or below this value are treated as singular.
pub const MIN_FREQUENCY_RAD_S: f64 = 1.0e-6;

/// Closed-loop drivetrain characteristic polynomial `c0 s² + c1 s + c2` and its roots.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicEquation {
    pub coefficients: [f64; 3],
    pub roots: Vec<Complex64>,
}

impl CharacteristicEquation {
    /// Coefficients `[-I, dQ/dΩ + Kp dQ/dθ, Ki dQ/dθ]`.
    pub fn new(inertia: f64, dq_domega: f64, dq_dpitch: f64, kp: f64, ki: f64) -> Self {
        Self::from_coefficients([-inertia, dq_domega + kp * dq_dpitch, ki * dq_dpitch])
    }

    pub fn from_coefficients(coefficients: [f64; 3]) -> Self {
        Self {
            coefficients,
            roots: quadratic_roots(coefficients),
        }
    }

    /// Polynomial value at `s`.
    pub fn evaluate(&self, s: Complex64) -> Complex64 {
        let [c0, c1, c2] = self.coefficients;
        (s * c0 + c1) * s + c2
    }

    /// Largest real part among the roots.
    pub fn max_real_part(&self) -> Option<f64> {
        self.roots.iter().map(|r| r.re).reduce(f64::max)
    }
}

/// Roots of `c0 s² + c1 s + c2`, dropping leading zero coefficients.
fn quadratic_roots([a, b, c]: [f64; 3]) -> Vec<Complex64> {
    if a == 0.0 {
        if b == 0.0 {
            return Vec::new();
        }
        return vec![Complex64::new(-c / b, 0.0)];
    }

    let disc = b * b - 4.0 * a * c;
    if disc >= 0.0 {
        let q = -0.5 * (b + b.signum() * disc.sqrt());
        let r1 = q / a;
        let r2 = if q == 0.0 { 0.0 } else { c / q };
        vec![Complex64::new(r1, 0.0), Complex64::new(r2, 0.0)]
    } else {
        let re = -b / (2.0 * a);
        let im = (-disc).sqrt() / (2.0 * a.abs());
        vec![Complex64::new(re, im), Complex64::new(re, -im)]
    }
}

/// Closed-form response over a frequency sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    /// Angular frequencies in input order (rad/s).
    pub frequencies: Vec<f64>,
    /// a(ω) = −Re T(ω) / ω², an added-mass-like term.
    pub a: Vec<f64>,
    /// b(ω) = Im T(ω) / ω, the aerodynamic damping term.
    pub b: Vec<f64>,
    /// Control transfer function C(ω).
    pub control_tf: Vec<Complex64>,
    /// Complex thrust response T(ω).
    pub load_response: Vec<Complex64>,
    /// Diagnostic only: the roots never alter `a` or `b`.
    pub characteristic: CharacteristicEquation,
}

/// Aero-servo response at one operating wind speed.
#[derive(Debug, Clone, PartialEq)]
pub struct AeroServoResponse {
    pub wind_speed: f64,
    pub derivatives: OperatingDerivatives,
    pub gains: GainPoint,
    /// The wind speed lay outside the schedule and edge values were used.
    pub clamped: bool,
    pub response: FrequencyResponse,
}

impl AeroServoResponse {
    pub fn a(&self) -> &[f64] {
        &self.response.a
    }

    pub fn b(&self) -> &[f64] {
        &self.response.b
    }
}

/// Evaluate the closed-form transfer functions for explicit derivatives and gains.
pub fn evaluate_response(
    derivatives: &OperatingDerivatives,
    gains: &GainPoint,
    inertia: f64,
    hub_height: f64,
    frequencies: &[f64],
) -> Result<FrequencyResponse, LinearizationError> {
    check_frequencies(frequencies)?;
    check_positive("drivetrain_inertia", inertia)?;
    check_positive("hub_height", hub_height)?;

    let d = derivatives;
    let GainPoint { kp, ki, k_float, .. } = *gains;

    let characteristic = CharacteristicEquation::new(inertia, d.dq_domega, d.dq_dpitch, kp, ki);
    tracing::debug!(
        coefficients = ?characteristic.coefficients,
        roots = ?characteristic.roots,
        "drivetrain characteristic equation"
    );

    let torque_damping = d.dq_domega + kp * d.dq_dpitch;
    let torque_stiffness = ki * d.dq_dpitch;
    let torque_forcing = d.dq_du - k_float * d.dq_dpitch / hub_height;
    let thrust_damping = d.dt_domega + kp * d.dt_dpitch;
    let thrust_stiffness = ki * d.dt_dpitch;
    let thrust_forcing = d.dt_du - k_float * d.dt_dpitch / hub_height;

    let n = frequencies.len();
    let mut response = FrequencyResponse {
        frequencies: frequencies.to_vec(),
        a: Vec::with_capacity(n),
        b: Vec::with_capacity(n),
        control_tf: Vec::with_capacity(n),
        load_response: Vec::with_capacity(n),
        characteristic,
    };

    for &omega in frequencies {
        let iw = Complex64::new(0.0, omega);
        let denominator = inertia * omega * omega + iw * torque_damping + torque_stiffness;
        let control = iw * torque_forcing / denominator;
        let thrust =
            iw * thrust_forcing - (iw * thrust_damping + thrust_stiffness) * control;

        response.a.push(-thrust.re / (omega * omega));
        response.b.push(thrust.im / omega);
        response.control_tf.push(control);
        response.load_response.push(thrust);
    }

    Ok(response)
}

/// Aero-servo added mass and damping at `wind_speed` over `frequencies`.
///
/// Derivatives and gains are interpolated at `wind_speed`; outside the schedule they hold their
/// edge values and a warning is logged.
pub fn aero_servo_response(
    model: &AeroServoModel<'_>,
    wind_speed: f64,
    frequencies: &[f64],
) -> Result<AeroServoResponse, LinearizationError> {
    check_wind_speed(wind_speed)?;
    check_frequencies(frequencies)?;

    let schedule = model.schedule();
    let (derivatives, clamped) =
        OperatingDerivatives::at(schedule, model.derivatives(), wind_speed);
    if clamped {
        let (lo, hi) = schedule.wind_speed_range();
        tracing::warn!(
            wind_speed,
            lo,
            hi,
            "wind speed outside operating schedule, holding edge derivatives"
        );
    }
    let gains = model.gains().at(wind_speed, schedule)?;

    let response = evaluate_response(
        &derivatives,
        &gains,
        model.drivetrain_inertia(),
        model.hub_height(),
        frequencies,
    )?;

    Ok(AeroServoResponse {
        wind_speed,
        derivatives,
        gains,
        clamped,
        response,
    })
}

fn check_frequencies(frequencies: &[f64]) -> Result<(), LinearizationError> {
    match frequencies
        .iter()
        .position(|&w| !w.is_finite() || w <= MIN_FREQUENCY_RAD_S)
    {
        Some(index) => Err(LinearizationError::SingularFrequency {
            index,
            value: frequencies[index],
        }),
        None => Ok(()),
    }
}
