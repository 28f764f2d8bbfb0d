//! Blade stations and airfoil tables for a BEM rotor solver, built from a windIO-style
//! turbine description.

pub mod description;
pub mod pchip;
pub mod polars;

use std::path::Path;

use rotor_core::interp::{Bounds, interp_many, linspace};
use rotor_core::units::rad_to_deg;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub use description::{TurbineDescription, load_description};
pub use pchip::Pchip;
pub use polars::{PolarTable, aoa_grid, reynolds_union};

use description::GridAndValues;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("failed to read turbine description: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse turbine description: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("{what}: expected {expected} entries, found {found}")]
    Shape {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{what} must be strictly increasing (violated at index {index})")]
    NotIncreasing { what: &'static str, index: usize },
    #[error("blade references airfoil '{0}' which is not defined")]
    UnknownAirfoil(String),
    #[error("airfoil '{0}' has no polars")]
    NoPolars(String),
    #[error("hub height is zero and no tower is defined to derive it")]
    MissingHubHeight,
    #[error("invalid discretization setting `{name}` = {value}")]
    InvalidSetting { name: &'static str, value: usize },
}

/// Discretization and BEM option flags.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct DiscretizationOptions {
    /// Stations along the span including root and tip.
    pub n_span: usize,
    pub n_aoa: usize,
    /// Azimuthal positions averaged by the solver.
    pub n_sector: usize,
    pub tip_loss: bool,
    pub hub_loss: bool,
    pub wake_rotation: bool,
    pub use_cd: bool,
}

impl Default for DiscretizationOptions {
    fn default() -> Self {
        Self {
            n_span: 30,
            n_aoa: 200,
            n_sector: 4,
            tip_loss: true,
            hub_loss: true,
            wake_rotation: true,
            use_cd: true,
        }
    }
}

impl DiscretizationOptions {
    fn validate(&self) -> Result<(), GeometryError> {
        if self.n_span < 3 {
            return Err(GeometryError::InvalidSetting {
                name: "n_span",
                value: self.n_span,
            });
        }
        if self.n_aoa < 2 {
            return Err(GeometryError::InvalidSetting {
                name: "n_aoa",
                value: self.n_aoa,
            });
        }
        if self.n_sector == 0 {
            return Err(GeometryError::InvalidSetting {
                name: "n_sector",
                value: self.n_sector,
            });
        }
        Ok(())
    }
}

/// Everything a BEM solver needs for one rotor. Station arrays exclude root and tip.
#[derive(Debug, Clone)]
pub struct RotorGeometry {
    pub name: Option<String>,
    pub n_blades: usize,
    pub hub_radius: f64,
    pub tip_radius: f64,
    pub hub_height: f64,
    pub precone_deg: f64,
    pub tilt_deg: f64,
    pub radius: Vec<f64>,
    pub chord: Vec<f64>,
    pub twist_deg: Vec<f64>,
    pub precurve: Vec<f64>,
    pub precurve_tip: f64,
    pub presweep: Vec<f64>,
    pub presweep_tip: f64,
    pub relative_thickness: Vec<f64>,
    pub aoa_deg: Vec<f64>,
    pub reynolds: Vec<f64>,
    /// One table per station.
    pub polars: Vec<PolarTable>,
    pub air_density: f64,
    pub air_viscosity: f64,
    pub shear_exp: f64,
    pub options: DiscretizationOptions,
}

impl RotorGeometry {
    pub fn station_count(&self) -> usize {
        self.radius.len()
    }
}

/// Load a description from disk and build the rotor geometry.
pub fn load_geometry<P: AsRef<Path>>(
    path: P,
    options: DiscretizationOptions,
) -> Result<RotorGeometry, GeometryError> {
    let description = load_description(path)?;
    build_geometry(&description, options)
}

pub fn build_geometry(
    description: &TurbineDescription,
    options: DiscretizationOptions,
) -> Result<RotorGeometry, GeometryError> {
    options.validate()?;
    let components = &description.components;
    let blade = &components.blade.outer_shape_bem;
    let hub_radius = 0.5 * components.hub.diameter;

    let grid = linspace(0.0, 1.0, options.n_span);
    let stations = &grid[1..grid.len() - 1];

    let axis = &blade.reference_axis;
    let x = sample(&grid, &axis.x, "blade reference axis x")?;
    let y = sample(&grid, &axis.y, "blade reference axis y")?;
    let mut z = sample(&grid, &axis.z, "blade reference axis z")?;
    let rotor_diameter = description.assembly.rotor_diameter;
    if rotor_diameter != 0.0 {
        let length = arc_length(&x, &y, &z).last().copied().unwrap_or(0.0);
        let scale = rotor_diameter / ((length + hub_radius) * 2.0);
        z.iter_mut().for_each(|v| *v *= scale);
    }
    let last = grid.len() - 1;
    let radius = z[1..last].iter().map(|v| v + hub_radius).collect();
    let tip_radius = z[last] + hub_radius;

    let chord = sample(stations, &blade.chord, "chord")?;
    let twist_deg = sample(stations, &blade.twist, "twist")?
        .into_iter()
        .map(rad_to_deg)
        .collect();

    let aoa = aoa_grid(options.n_aoa);
    let reynolds = reynolds_union(&description.airfoils);
    let (relative_thickness, polars) = spanwise_polars(description, stations, &aoa, &reynolds)?;

    let geometry = RotorGeometry {
        name: description.name.clone(),
        n_blades: description.assembly.number_of_blades,
        hub_radius,
        tip_radius,
        hub_height: hub_height(description)?,
        precone_deg: rad_to_deg(components.hub.cone_angle),
        tilt_deg: rad_to_deg(components.nacelle.drivetrain.uptilt),
        radius,
        chord,
        twist_deg,
        precurve: x[1..last].to_vec(),
        precurve_tip: x[last],
        presweep: y[1..last].to_vec(),
        presweep_tip: y[last],
        relative_thickness,
        aoa_deg: aoa.into_iter().map(rad_to_deg).collect(),
        reynolds,
        polars,
        air_density: description.environment.air_density,
        air_viscosity: description.environment.air_dyn_viscosity,
        shear_exp: description.environment.shear_exp,
        options,
    };
    debug!(
        stations = geometry.station_count(),
        tip_radius = geometry.tip_radius,
        n_re = geometry.reynolds.len(),
        "rotor geometry prepared"
    );
    Ok(geometry)
}

/// Assembly hub height, or tower top plus tower-top-to-hub distance when it is zero.
pub fn hub_height(description: &TurbineDescription) -> Result<f64, GeometryError> {
    if description.assembly.hub_height != 0.0 {
        return Ok(description.assembly.hub_height);
    }
    let tower_top = description
        .components
        .tower
        .as_ref()
        .and_then(|t| t.outer_shape_bem.reference_axis.z.values.last().copied())
        .ok_or(GeometryError::MissingHubHeight)?;
    Ok(tower_top + description.components.nacelle.drivetrain.distance_tt_hub)
}

/// Cumulative length along a polyline, starting at zero.
pub fn arc_length(x: &[f64], y: &[f64], z: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(x.len());
    let mut total = 0.0;
    for i in 0..x.len().min(y.len()).min(z.len()) {
        if i > 0 {
            let (dx, dy, dz) = (x[i] - x[i - 1], y[i] - y[i - 1], z[i] - z[i - 1]);
            total += (dx * dx + dy * dy + dz * dz).sqrt();
        }
        out.push(total);
    }
    out
}

fn spanwise_polars(
    description: &TurbineDescription,
    stations: &[f64],
    aoa: &[f64],
    reynolds: &[f64],
) -> Result<(Vec<f64>, Vec<PolarTable>), GeometryError> {
    let position = &description.components.blade.outer_shape_bem.airfoil_position;
    if position.grid.len() != position.labels.len() || position.grid.is_empty() {
        return Err(GeometryError::Shape {
            what: "airfoil positions",
            expected: position.labels.len(),
            found: position.grid.len(),
        });
    }

    let mut tables = Vec::with_capacity(description.airfoils.len());
    for airfoil in &description.airfoils {
        tables.push(polars::resample_airfoil(airfoil, aoa, reynolds)?);
    }

    let mut used = Vec::with_capacity(position.labels.len());
    for label in &position.labels {
        let index = description
            .airfoils
            .iter()
            .position(|af| &af.name == label)
            .ok_or_else(|| GeometryError::UnknownAirfoil(label.clone()))?;
        used.push((description.airfoils[index].relative_thickness, &tables[index]));
    }

    let used_thickness: Vec<f64> = used.iter().map(|(t, _)| *t).collect();
    let thickness = Pchip::new(&position.grid, &used_thickness)?.eval_many(stations);

    // First occurrence of each distinct thickness, in increasing order.
    let mut anchors: Vec<(f64, &PolarTable)> = Vec::new();
    for &(t, table) in &used {
        if !anchors.iter().any(|(seen, _)| *seen == t) {
            anchors.push((t, table));
        }
    }
    anchors.sort_by(|a, b| a.0.total_cmp(&b.0));

    let polars = polars::blend_by_thickness(&anchors, &thickness)?;
    Ok((thickness, polars))
}

fn sample(x: &[f64], source: &GridAndValues, what: &'static str) -> Result<Vec<f64>, GeometryError> {
    check_grid(what, source)?;
    Ok(interp_many(x, &source.grid, &source.values, Bounds::Clamp))
}

pub(crate) fn check_grid(what: &'static str, source: &GridAndValues) -> Result<(), GeometryError> {
    if source.grid.is_empty() || source.grid.len() != source.values.len() {
        return Err(GeometryError::Shape {
            what,
            expected: source.grid.len(),
            found: source.values.len(),
        });
    }
    Ok(())
}
