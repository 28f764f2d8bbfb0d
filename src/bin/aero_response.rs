use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use rotor_aero::case::{Case, DEFAULT_CATALOG};
use rotor_aero::export::{self, response};
use rotor_aero::linearize::{aero_servo_response, default_frequency_grid};
use tracing_subscriber::EnvFilter;

/// Frequency-dependent aero-servo coefficients at a single wind speed.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Aero-servo added mass/damping and control transfer function at one wind speed"
)]
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

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "-")]
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
    let case = Case::load(&cli.config, cli.turbine.as_deref(), cli.derivatives.as_deref())?;
    let model = case.model()?;
    let result = aero_servo_response(&model, cli.wind_speed, &default_frequency_grid())?;

    let gains = &result.gains;
    eprintln!(
        "Turbine        : {} at U = {:.2} m/s{}",
        case.turbine.name,
        result.wind_speed,
        if result.clamped { " (outside schedule)" } else { "" }
    );
    eprintln!(
        "Gains          : kp = {:.6}, ki = {:.6}, k_float = {:.3}",
        gains.kp, gains.ki, gains.k_float
    );
    let characteristic = &result.response.characteristic;
    eprintln!(
        "Characteristic : [{:.6e}, {:.6e}, {:.6e}]",
        characteristic.coefficients[0],
        characteristic.coefficients[1],
        characteristic.coefficients[2]
    );
    for root in &characteristic.roots {
        eprintln!("Root           : {:.6e} {:+.6e}i", root.re, root.im);
    }

    let mut writer = export::writer_for_path(&cli.output)?;
    response::write_header(writer.as_mut())?;
    let r = &result.response;
    for (i, &omega) in r.frequencies.iter().enumerate() {
        response::Record {
            omega_rad_s: omega,
            added_mass_kg: r.a[i],
            added_damping_ns_m: r.b[i],
            control_tf_abs: r.control_tf[i].norm(),
            control_tf_arg_rad: r.control_tf[i].arg(),
        }
        .write_to(writer.as_mut())?;
    }
    writer.flush()?;
    Ok(())
}
