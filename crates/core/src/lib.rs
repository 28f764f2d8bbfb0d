//! Core units, constants, and shared primitives for the rotor_aero workspace.

pub mod interp;
pub mod schedule;

pub use schedule::{OperatingPoint, OperatingSchedule, ScheduleError};

/// Physical and conversion constants expressed in SI units (unless stated otherwise).
pub mod constants {
    use std::f64::consts::PI;

    /// Degrees per radian.
    pub const RAD2DEG: f64 = 180.0 / PI;
    /// Radians per second in one revolution per minute.
    pub const RPM2RADPS: f64 = PI / 30.0;
    /// Rigid-body degrees of freedom of the floating platform.
    pub const DOF_COUNT: usize = 6;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{RAD2DEG, RPM2RADPS};

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v * RAD2DEG
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v / RAD2DEG
    }

    /// Convert revolutions per minute to radians per second.
    #[inline]
    pub fn rpm_to_rad_s(v: f64) -> f64 {
        v * RPM2RADPS
    }

    /// Convert radians per second to revolutions per minute.
    #[inline]
    pub fn rad_s_to_rpm(v: f64) -> f64 {
        v / RPM2RADPS
    }
}

/// Six degree-of-freedom containers used for platform coefficients.
pub mod dof {
    use super::constants::DOF_COUNT;

    /// 6×6 coefficient matrix (added mass, damping, stiffness).
    pub type Matrix6 = [[f64; DOF_COUNT]; DOF_COUNT];
    /// Force/moment vector ordered surge, sway, heave, roll, pitch, yaw.
    pub type Vector6 = [f64; DOF_COUNT];
    /// Per-DOF excitation spectrum, one row per DOF and one column per frequency bin.
    pub type Spectrum = [Vec<f64>; DOF_COUNT];

    /// Platform degree of freedom in the non-rotating hub frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Dof {
        Surge,
        Sway,
        Heave,
        Roll,
        Pitch,
        Yaw,
    }

    impl Dof {
        pub const ALL: [Dof; DOF_COUNT] = [
            Dof::Surge,
            Dof::Sway,
            Dof::Heave,
            Dof::Roll,
            Dof::Pitch,
            Dof::Yaw,
        ];

        /// Row/column index of the DOF in 6×6 matrices.
        #[inline]
        pub fn index(self) -> usize {
            self as usize
        }

        pub fn label(self) -> &'static str {
            match self {
                Dof::Surge => "surge",
                Dof::Sway => "sway",
                Dof::Heave => "heave",
                Dof::Roll => "roll",
                Dof::Pitch => "pitch",
                Dof::Yaw => "yaw",
            }
        }
    }

    #[inline]
    pub fn zeros6x6() -> Matrix6 {
        [[0.0; DOF_COUNT]; DOF_COUNT]
    }

    /// Zero spectrum with `nw` frequency bins per DOF.
    pub fn zero_spectrum(nw: usize) -> Spectrum {
        std::array::from_fn(|_| vec![0.0; nw])
    }
}
