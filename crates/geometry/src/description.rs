//! Subset of the windIO turbine ontology needed to build rotor aerodynamic inputs.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::GeometryError;

/// Read a turbine description from a YAML file.
pub fn load_description<P: AsRef<Path>>(path: P) -> Result<TurbineDescription, GeometryError> {
    let reader = File::open(path)?;
    Ok(serde_yaml::from_reader(reader)?)
}

#[derive(Debug, Deserialize, Clone)]
pub struct TurbineDescription {
    #[serde(default)]
    pub name: Option<String>,
    pub assembly: Assembly,
    pub components: Components,
    pub airfoils: Vec<Airfoil>,
    pub environment: Environment,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Assembly {
    pub number_of_blades: usize,
    #[serde(default)]
    pub rotor_diameter: f64,
    #[serde(default)]
    pub hub_height: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Components {
    pub blade: Blade,
    pub hub: Hub,
    pub nacelle: Nacelle,
    #[serde(default)]
    pub tower: Option<Tower>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Blade {
    pub outer_shape_bem: BladeOuterShape,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BladeOuterShape {
    pub airfoil_position: AirfoilPosition,
    pub chord: GridAndValues,
    pub twist: GridAndValues,
    pub reference_axis: ReferenceAxis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AirfoilPosition {
    pub grid: Vec<f64>,
    pub labels: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Hub {
    pub diameter: f64,
    /// Precone angle (rad).
    pub cone_angle: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Nacelle {
    pub drivetrain: Drivetrain,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Drivetrain {
    /// Shaft uptilt (rad).
    pub uptilt: f64,
    #[serde(default)]
    pub distance_tt_hub: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Tower {
    pub outer_shape_bem: TowerOuterShape,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TowerOuterShape {
    pub reference_axis: ReferenceAxis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReferenceAxis {
    pub x: GridAndValues,
    pub y: GridAndValues,
    pub z: GridAndValues,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GridAndValues {
    pub grid: Vec<f64>,
    pub values: Vec<f64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Airfoil {
    pub name: String,
    pub relative_thickness: f64,
    pub polars: Vec<Polar>,
}

/// Lift, drag and moment coefficients tabulated against angle of attack (rad).
#[derive(Debug, Deserialize, Clone)]
pub struct Polar {
    pub re: f64,
    pub c_l: GridAndValues,
    pub c_d: GridAndValues,
    pub c_m: GridAndValues,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Environment {
    pub air_density: f64,
    pub air_dyn_viscosity: f64,
    #[serde(default)]
    pub shear_exp: f64,
}
