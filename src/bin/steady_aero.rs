use std::path::PathBuf;

use clap::Parser;
use rotor_aero::case::{Case, DEFAULT_CATALOG};
use rotor_aero::core::dof::Dof;
use rotor_aero::linearize::steady_contribution;
use tracing_subscriber::EnvFilter;

/// Steady rotor contribution (no control) at one wind speed.
#[derive(Parser, Debug)]
#[command(author, version, about = "Steady rotor damping, load and surge excitation")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CATALOG)]
    config: PathBuf,

    #[arg(long)]
    turbine: Option<String>,

    #[arg(long)]
    derivatives: Option<PathBuf>,

    /// Operating wind speed in m/s
    #[arg(long)]
    wind_speed: f64,

    /// Wind-speed amplitude per frequency bin, comma separated (m/s)
    #[arg(long, value_delimiter = ',')]
    amplitudes: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let case = Case::load(&cli.config, cli.turbine.as_deref(), cli.derivatives.as_deref())?;
    let steady = steady_contribution(
        &case.turbine.schedule,
        &case.output.derivatives,
        &case.output.loads,
        cli.wind_speed,
        cli.amplitudes.len(),
        &cli.amplitudes,
    )?;

    println!(
        "Turbine : {} at U = {:.2} m/s{}",
        case.turbine.name,
        cli.wind_speed,
        if steady.clamped { " (outside schedule)" } else { "" }
    );
    println!("dT/dU   : {:.6e} N/(m/s)", steady.dt_du);
    println!("Damping :");
    for (dof, row) in Dof::ALL.iter().zip(steady.damping.iter()) {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>13.5e}")).collect();
        println!("  {:<6}{}", dof.label(), cells.join(""));
    }
    println!("Steady load :");
    for dof in Dof::ALL {
        println!("  {:<6}{:>13.5e}", dof.label(), steady.steady_load[dof.index()]);
    }
    if !cli.amplitudes.is_empty() {
        let surge = &steady.excitation[Dof::Surge.index()];
        let cells: Vec<String> = surge.iter().map(|v| format!("{v:.5e}")).collect();
        println!("Surge excitation : [{}]", cells.join(", "));
    }
    Ok(())
}
