use std::io::Write;
use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;
use rotor_aero::case::{Case, DEFAULT_CATALOG};
use rotor_aero::core::interp::linspace;
use rotor_aero::export::{self, sweep};
use rotor_aero::linearize::{default_frequency_grid, period_to_frequency, wind_speed_sweep};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sweep wind speed and report aero-servo added mass and damping at a probe period.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Aero-servo added mass/damping versus wind speed (CSV + JSON sidecar)"
)]
struct Cli {
    /// Turbine catalog: a TOML file, a YAML list, or a directory of records
    #[arg(long, default_value = DEFAULT_CATALOG)]
    config: PathBuf,

    /// Turbine name (case-insensitive); defaults to the first catalog entry
    #[arg(long)]
    turbine: Option<String>,

    /// Solver output CSV, overriding the turbine's derivative_table
    #[arg(long)]
    derivatives: Option<PathBuf>,

    /// Lowest wind speed in m/s
    #[arg(long, default_value_t = 4.0)]
    u_min: f64,

    /// Highest wind speed in m/s
    #[arg(long, default_value_t = 24.0)]
    u_max: f64,

    /// Number of wind speeds
    #[arg(long, default_value_t = 50)]
    points: usize,

    /// Period at which added mass and damping are reported, in seconds
    #[arg(long, default_value_t = 30.0)]
    period: f64,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "artifacts/aero_sweep.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.points == 0 {
        bail!("--points must be at least 1");
    }
    if !(cli.period.is_finite() && cli.period > 0.0) {
        bail!("--period must be positive, got {}", cli.period);
    }

    let case = Case::load(&cli.config, cli.turbine.as_deref(), cli.derivatives.as_deref())?;
    let model = case.model()?;

    let wind_speeds = linspace(cli.u_min, cli.u_max, cli.points);
    let frequencies = default_frequency_grid();
    let probe = period_to_frequency(cli.period);
    let points = wind_speed_sweep(&model, &wind_speeds, &frequencies, probe)?;

    let records: Vec<sweep::Record> = points
        .iter()
        .map(|p| sweep::Record {
            wind_speed_m_s: p.wind_speed,
            added_mass_kg: p.a,
            added_damping_ns_m: p.b,
            max_root_real: p
                .roots
                .iter()
                .map(|r| r.re)
                .fold(f64::NEG_INFINITY, f64::max),
            clamped: p.clamped,
        })
        .collect();

    let mut writer = export::writer_for_path(&cli.output)?;
    sweep::write_header(writer.as_mut())?;
    for record in &records {
        record.write_to(writer.as_mut())?;
    }
    writer.flush()?;
    drop(writer);

    if cli.output.as_os_str() != "-" {
        let generated = chrono::Utc::now().to_rfc3339();
        let meta = sweep::Metadata {
            turbine: &case.turbine.name,
            probe_period_s: cli.period,
            k_float: case.turbine.gains.k_float(),
            frequency_count: frequencies.len(),
            generated_utc: &generated,
        };
        let sidecar = sweep::write_sidecar(&cli.output, &meta, &records)?;
        info!(
            csv = %cli.output.display(),
            sidecar = %sidecar.display(),
            points = records.len(),
            "sweep written"
        );
    }

    Ok(())
}
