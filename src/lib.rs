//! Rotor aero-servo linearization toolkit.
//!
//! The workspace crates are re-exported here so the binaries and integration tests share one
//! entry point; [`case`] wires a turbine record to its solver table.

pub use rotor_config as config;
pub use rotor_control as control;
pub use rotor_core as core;
pub use rotor_export as export;
pub use rotor_geometry as geometry;
pub use rotor_linearize as linearize;
pub use rotor_solver as solver;

pub mod case;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
