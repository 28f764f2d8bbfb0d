//! Load derivatives interpolated to a single operating wind speed.

use rotor_core::OperatingSchedule;
use rotor_core::constants::{RAD2DEG, RPM2RADPS};
use rotor_solver::LoadDerivatives;

/// Thrust and torque sensitivities at one wind speed, in SI units with angles in radians.
///
/// Rotor-speed derivatives are per rad/s and pitch derivatives per rad.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OperatingDerivatives {
    pub dt_du: f64,
    pub dt_domega: f64,
    pub dt_dpitch: f64,
    pub dq_du: f64,
    pub dq_domega: f64,
    pub dq_dpitch: f64,
}

impl OperatingDerivatives {
    /// Interpolate the six thrust/torque tables at `wind_speed`, clamping to the schedule edges.
    ///
    /// Returns the derivatives and whether the wind speed lay outside the schedule.
    ///
    /// # Panics
    /// Panics if the tables are not co-indexed with `schedule`; `AeroServoModel::new` checks this.
    pub fn at(
        schedule: &OperatingSchedule,
        derivatives: &LoadDerivatives,
        wind_speed: f64,
    ) -> (Self, bool) {
        let dt_du = schedule.interp_at(wind_speed, &derivatives.thrust.wind_speed);
        let dt_domega = schedule.interp_at(wind_speed, &derivatives.thrust.rotor_speed);
        let dt_dpitch = schedule.interp_at(wind_speed, &derivatives.thrust.pitch);
        let dq_du = schedule.interp_at(wind_speed, &derivatives.torque.wind_speed);
        let dq_domega = schedule.interp_at(wind_speed, &derivatives.torque.rotor_speed);
        let dq_dpitch = schedule.interp_at(wind_speed, &derivatives.torque.pitch);

        (
            Self {
                dt_du: dt_du.value,
                dt_domega: dt_domega.value / RPM2RADPS,
                dt_dpitch: dt_dpitch.value * RAD2DEG,
                dq_du: dq_du.value,
                dq_domega: dq_domega.value / RPM2RADPS,
                dq_dpitch: dq_dpitch.value * RAD2DEG,
            },
            dt_du.out_of_range(),
        )
    }
}
