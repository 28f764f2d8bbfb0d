//! Rigid-body aerodynamic coefficients without control action.

use rotor_core::OperatingSchedule;
use rotor_core::dof::{self, Dof, Matrix6, Spectrum, Vector6};
use rotor_solver::{LoadDerivatives, RotorLoads};

use crate::{LinearizationError, check_wind_speed};

/// Added mass, damping, stiffness, steady load and wind excitation in the hub frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyContribution {
    pub added_mass: Matrix6,
    pub damping: Matrix6,
    pub stiffness: Matrix6,
    pub steady_load: Vector6,
    /// Excitation per DOF and frequency bin, shape 6 × nw.
    pub excitation: Spectrum,
    /// Thrust sensitivity to wind speed used for the coefficients (N per m/s).
    pub dt_du: f64,
    /// The wind speed lay outside the schedule and edge values were used.
    pub clamped: bool,
}

/// Steady aerodynamic contribution at `wind_speed`.
///
/// Only surge is populated: surge damping is dT/dU and the surge excitation in bin `k` is
/// `amplitudes[k] * dT/dU`. Rotational and cross-coupling terms are left at zero.
pub fn steady_contribution(
    schedule: &OperatingSchedule,
    derivatives: &LoadDerivatives,
    loads: &RotorLoads,
    wind_speed: f64,
    nw: usize,
    amplitudes: &[f64],
) -> Result<SteadyContribution, LinearizationError> {
    check_wind_speed(wind_speed)?;
    if amplitudes.len() != nw {
        return Err(LinearizationError::AmplitudeLength {
            nw,
            found: amplitudes.len(),
        });
    }
    let expected = schedule.len();
    if derivatives.thrust.wind_speed.len() != expected {
        return Err(LinearizationError::ScheduleMismatch {
            quantity: "dthrust/dwind_speed".to_string(),
            expected,
            found: derivatives.thrust.wind_speed.len(),
        });
    }
    for found in [loads.hub_force_n.len(), loads.hub_moment_nm.len()] {
        if found != expected {
            return Err(LinearizationError::MissingHubLoads { expected, found });
        }
    }

    let sample = schedule.interp_at(wind_speed, &derivatives.thrust.wind_speed);
    let dt_du = sample.value;
    if sample.out_of_range() {
        let (lo, hi) = schedule.wind_speed_range();
        tracing::warn!(
            wind_speed,
            lo,
            hi,
            "wind speed outside operating schedule, holding edge derivatives"
        );
    }

    let surge = Dof::Surge.index();
    let mut damping = dof::zeros6x6();
    damping[surge][surge] += dt_du;

    let mut excitation = dof::zero_spectrum(nw);
    for (bin, amplitude) in excitation[surge].iter_mut().zip(amplitudes) {
        *bin = amplitude * dt_du;
    }

    let mut steady_load = [0.0; 6];
    for axis in 0..3 {
        let force: Vec<f64> = loads.hub_force_n.iter().map(|f| f[axis]).collect();
        let moment: Vec<f64> = loads.hub_moment_nm.iter().map(|m| m[axis]).collect();
        steady_load[axis] = schedule.interp_at(wind_speed, &force).value;
        steady_load[axis + 3] = schedule.interp_at(wind_speed, &moment).value;
    }

    Ok(SteadyContribution {
        added_mass: dof::zeros6x6(),
        damping,
        stiffness: dof::zeros6x6(),
        steady_load,
        excitation,
        dt_du,
        clamped: sample.out_of_range(),
    })
}
