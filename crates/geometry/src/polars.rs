//! Airfoil polar tables resampled onto a common angle-of-attack / Reynolds grid.

use std::f64::consts::PI;

use rotor_core::interp::{Bounds, interp, interp_many, linspace};
use tracing::warn;

use crate::description::{Airfoil, GridAndValues, Polar};
use crate::pchip::Pchip;
use crate::{GeometryError, check_grid};

/// Coefficient mismatch between −π and +π above which the table is made periodic.
pub const PERIODIC_TOLERANCE: f64 = 1.0e-5;

/// Angle-of-attack grid on [−π, π] (rad).
///
/// When `n` is a multiple of 4, a quarter of the points cover [−π, −π/6], half cover
/// [−π/6, π/6] and a quarter cover [π/6, π]; the shared breakpoints are merged so the
/// grid still has `n` entries. Otherwise the grid is uniform.
pub fn aoa_grid(n: usize) -> Vec<f64> {
    if n >= 4 && n % 4 == 0 {
        let quarter = n / 4;
        let mut grid = linspace(-PI, -PI / 6.0, quarter + 1);
        grid.extend(linspace(-PI / 6.0, PI / 6.0, n / 2));
        grid.extend(linspace(PI / 6.0, PI, quarter + 1));
        grid.sort_by(f64::total_cmp);
        grid.dedup();
        grid
    } else {
        warn!(
            n_aoa = n,
            "angle-of-attack count is not a multiple of 4; using a uniform grid"
        );
        linspace(-PI, PI, n)
    }
}

/// Sorted union of every Reynolds number appearing in the airfoil polars.
pub fn reynolds_union(airfoils: &[Airfoil]) -> Vec<f64> {
    let mut all: Vec<f64> = airfoils
        .iter()
        .flat_map(|af| af.polars.iter().map(|p| p.re))
        .collect();
    all.sort_by(f64::total_cmp);
    all.dedup();
    all
}

/// Lift, drag and moment coefficients indexed `[aoa][re]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarTable {
    pub cl: Vec<Vec<f64>>,
    pub cd: Vec<Vec<f64>>,
    pub cm: Vec<Vec<f64>>,
}

impl PolarTable {
    fn zeros(n_aoa: usize, n_re: usize) -> Self {
        let grid = vec![vec![0.0; n_re]; n_aoa];
        Self {
            cl: grid.clone(),
            cd: grid.clone(),
            cm: grid,
        }
    }

    pub fn n_aoa(&self) -> usize {
        self.cl.len()
    }

    pub fn n_re(&self) -> usize {
        self.cl.first().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Copy)]
enum Coefficient {
    Lift,
    Drag,
    Moment,
}

impl Coefficient {
    const ALL: [Coefficient; 3] = [Coefficient::Lift, Coefficient::Drag, Coefficient::Moment];

    fn label(self) -> &'static str {
        match self {
            Coefficient::Lift => "lift",
            Coefficient::Drag => "drag",
            Coefficient::Moment => "moment",
        }
    }

    fn source(self, polar: &Polar) -> &GridAndValues {
        match self {
            Coefficient::Lift => &polar.c_l,
            Coefficient::Drag => &polar.c_d,
            Coefficient::Moment => &polar.c_m,
        }
    }

    fn column(self, table: &PolarTable) -> &Vec<Vec<f64>> {
        match self {
            Coefficient::Lift => &table.cl,
            Coefficient::Drag => &table.cd,
            Coefficient::Moment => &table.cm,
        }
    }

    fn column_mut(self, table: &mut PolarTable) -> &mut Vec<Vec<f64>> {
        match self {
            Coefficient::Lift => &mut table.cl,
            Coefficient::Drag => &mut table.cd,
            Coefficient::Moment => &mut table.cm,
        }
    }
}

/// Resample one airfoil's polars onto `aoa` × `reynolds`.
///
/// Reynolds numbers missing from this airfoil are filled by linear interpolation across the
/// ones it does provide, holding the edge values outside that range.
pub fn resample_airfoil(
    airfoil: &Airfoil,
    aoa: &[f64],
    reynolds: &[f64],
) -> Result<PolarTable, GeometryError> {
    if airfoil.polars.is_empty() {
        return Err(GeometryError::NoPolars(airfoil.name.clone()));
    }

    let mut polars: Vec<&Polar> = airfoil.polars.iter().collect();
    polars.sort_by(|a, b| a.re.total_cmp(&b.re));
    let own_re: Vec<f64> = polars.iter().map(|p| p.re).collect();

    // Per provided polar: coefficient -> values along aoa.
    let mut sampled: Vec<[Vec<f64>; 3]> = Vec::with_capacity(polars.len());
    for polar in &polars {
        let mut curves: [Vec<f64>; 3] = Default::default();
        for coefficient in Coefficient::ALL {
            let source = coefficient.source(polar);
            check_grid("polar coefficient", source)?;
            let mut values = interp_many(aoa, &source.grid, &source.values, Bounds::Clamp);
            make_periodic(&mut values, airfoil, polar.re, coefficient);
            curves[coefficient as usize] = values;
        }
        sampled.push(curves);
    }

    let mut table = PolarTable::zeros(aoa.len(), reynolds.len());
    for coefficient in Coefficient::ALL {
        let column = coefficient.column_mut(&mut table);
        for (l, row) in column.iter_mut().enumerate() {
            let along_re: Vec<f64> = sampled
                .iter()
                .map(|curves| curves[coefficient as usize][l])
                .collect();
            for (cell, &re) in row.iter_mut().zip(reynolds) {
                *cell = interp(re, &own_re, &along_re, Bounds::Clamp);
            }
        }
    }
    Ok(table)
}

fn make_periodic(values: &mut [f64], airfoil: &Airfoil, re: f64, coefficient: Coefficient) {
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return;
    };
    if (first - last).abs() > PERIODIC_TOLERANCE {
        warn!(
            airfoil = %airfoil.name,
            re,
            coefficient = coefficient.label(),
            at_minus_pi = first,
            at_plus_pi = last,
            "coefficient differs between -pi and +pi; using the +pi value at both ends"
        );
        values[0] = last;
    }
}

/// Blend airfoil tables along the span by PCHIP over relative thickness.
///
/// `anchors` pairs each distinct relative thickness (strictly increasing) with its table.
pub fn blend_by_thickness(
    anchors: &[(f64, &PolarTable)],
    thickness: &[f64],
) -> Result<Vec<PolarTable>, GeometryError> {
    let Some((_, first)) = anchors.first() else {
        return Err(GeometryError::Shape {
            what: "airfoil anchors",
            expected: 1,
            found: 0,
        });
    };
    let (n_aoa, n_re) = (first.n_aoa(), first.n_re());
    let xs: Vec<f64> = anchors.iter().map(|(t, _)| *t).collect();

    let mut out = vec![PolarTable::zeros(n_aoa, n_re); thickness.len()];
    let mut ys = vec![0.0; anchors.len()];
    for coefficient in Coefficient::ALL {
        for l in 0..n_aoa {
            for k in 0..n_re {
                for (y, (_, table)) in ys.iter_mut().zip(anchors) {
                    *y = coefficient.column(table)[l][k];
                }
                let spline = Pchip::new(&xs, &ys)?;
                for (station, &t) in out.iter_mut().zip(thickness) {
                    coefficient.column_mut(station)[l][k] = spline.eval(t);
                }
            }
        }
    }
    Ok(out)
}
