use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use rotor_aero::case::DEFAULT_CATALOG;
use rotor_aero::config::{find_turbine, load_turbines};
use rotor_aero::geometry::{DiscretizationOptions, load_geometry};
use tracing_subscriber::EnvFilter;

/// Build BEM solver inputs from a windIO turbine description.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Blade stations and resampled airfoil polars from a windIO description"
)]
struct Cli {
    /// windIO YAML file; defaults to the geometry recorded for --turbine
    #[arg(long)]
    geometry: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_CATALOG)]
    config: PathBuf,

    #[arg(long)]
    turbine: Option<String>,

    /// Blade stations including root and tip
    #[arg(long, default_value_t = 30)]
    n_span: usize,

    /// Angles of attack in the polar grid
    #[arg(long, default_value_t = 200)]
    n_aoa: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = match cli.geometry {
        Some(path) => path,
        None => {
            let configs = load_turbines(&cli.config)?;
            let config = match cli.turbine.as_deref() {
                Some(name) => find_turbine(&configs, name)
                    .ok_or_else(|| anyhow!("turbine '{}' not found in catalog", name))?,
                None => configs
                    .first()
                    .ok_or_else(|| anyhow!("turbine catalog is empty"))?,
            };
            config
                .geometry
                .clone()
                .ok_or_else(|| anyhow!("turbine '{}' has no geometry; pass --geometry", config.name))?
        }
    };

    let options = DiscretizationOptions {
        n_span: cli.n_span,
        n_aoa: cli.n_aoa,
        ..DiscretizationOptions::default()
    };
    let rotor = load_geometry(&path, options)?;

    println!("Description : {}", path.display());
    if let Some(name) = &rotor.name {
        println!("Turbine     : {name}");
    }
    println!(
        "Rotor       : B = {}, Rhub = {:.3} m, Rtip = {:.3} m, hub height = {:.2} m",
        rotor.n_blades, rotor.hub_radius, rotor.tip_radius, rotor.hub_height
    );
    println!(
        "Angles      : precone = {:.3} deg, tilt = {:.3} deg",
        rotor.precone_deg, rotor.tilt_deg
    );
    println!(
        "Polars      : {} angles of attack x {} Reynolds numbers",
        rotor.aoa_deg.len(),
        rotor.reynolds.len()
    );
    println!(
        "{:>4} {:>10} {:>9} {:>10} {:>10} {:>10} {:>8}",
        "i", "r_m", "chord_m", "twist_deg", "precurve", "presweep", "t/c"
    );
    for i in 0..rotor.station_count() {
        println!(
            "{:>4} {:>10.3} {:>9.4} {:>10.4} {:>10.4} {:>10.4} {:>8.4}",
            i,
            rotor.radius[i],
            rotor.chord[i],
            rotor.twist_deg[i],
            rotor.precurve[i],
            rotor.presweep[i],
            rotor.relative_thickness[i]
        );
    }
    Ok(())
}
