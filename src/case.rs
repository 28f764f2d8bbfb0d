//! Loading a turbine together with the solver output evaluated on its schedule.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use rotor_config::load_turbines;
use rotor_linearize::turbine::{Turbine, select};
use rotor_linearize::{AeroServoModel, LinearizationError};
use rotor_solver::{AeroSolver, SolverOutput, TabulatedSolver};
use tracing::info;

pub const DEFAULT_CATALOG: &str = "configs/turbines";

/// A turbine and the loads/derivatives tabulated at each of its operating points.
#[derive(Debug, Clone)]
pub struct Case {
    pub turbine: Turbine,
    pub output: SolverOutput,
    pub derivative_table: PathBuf,
}

impl Case {
    /// Select `turbine` from the catalog at `catalog` and evaluate its derivative table.
    ///
    /// `derivatives` overrides the table path recorded in the turbine configuration.
    pub fn load(
        catalog: &Path,
        turbine: Option<&str>,
        derivatives: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let configs = load_turbines(catalog)
            .with_context(|| format!("loading turbine catalog {}", catalog.display()))?;
        let turbine = select(&configs, turbine)?;

        let derivative_table = derivatives
            .map(Path::to_path_buf)
            .or_else(|| turbine.derivative_table.clone())
            .ok_or_else(|| {
                anyhow!(
                    "turbine '{}' has no derivative_table; pass --derivatives",
                    turbine.name
                )
            })?;

        let solver = TabulatedSolver::from_csv(&derivative_table)
            .with_context(|| format!("reading {}", derivative_table.display()))?;
        let output = solver.evaluate(&turbine.schedule)?;
        info!(
            turbine = %turbine.name,
            points = turbine.schedule.len(),
            table = %derivative_table.display(),
            "solver output loaded"
        );

        Ok(Self {
            turbine,
            output,
            derivative_table,
        })
    }

    pub fn model(&self) -> Result<AeroServoModel<'_>, LinearizationError> {
        self.turbine.model(&self.output.derivatives)
    }
}
