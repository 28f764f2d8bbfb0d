//! Solver backed by a CSV export of blade-element results.

use std::io::Read;
use std::path::Path;

use rotor_core::{OperatingPoint, OperatingSchedule};
use serde::Deserialize;

use crate::{AeroSolver, LoadDerivatives, RotorLoads, SolverError, SolverOutput};

/// Absolute tolerance, scaled by magnitude, used to match schedule points to table rows.
pub const MATCH_TOLERANCE: f64 = 1.0e-6;

/// One exported solver result.
#[derive(Debug, Clone, Deserialize)]
pub struct TableRow {
    pub wind_speed_m_s: f64,
    pub rotor_speed_rpm: f64,
    pub pitch_deg: f64,
    pub power_w: f64,
    pub power_coefficient: f64,
    pub thrust_n: f64,
    pub torque_nm: f64,
    pub hub_fy_n: f64,
    pub hub_fz_n: f64,
    pub hub_my_nm: f64,
    pub hub_mz_nm: f64,
    pub dt_du: f64,
    pub dt_domega: f64,
    pub dt_dpitch: f64,
    pub dq_du: f64,
    pub dq_domega: f64,
    pub dq_dpitch: f64,
    pub dp_du: f64,
    pub dp_domega: f64,
    pub dp_dpitch: f64,
}

impl TableRow {
    fn matches(&self, point: &OperatingPoint) -> bool {
        close(self.wind_speed_m_s, point.wind_speed_m_s)
            && close(self.rotor_speed_rpm, point.rotor_speed_rpm)
            && close(self.pitch_deg, point.pitch_deg)
    }
}

/// Solver answering from precomputed rows.
#[derive(Debug, Clone)]
pub struct TabulatedSolver {
    rows: Vec<TableRow>,
}

impl TabulatedSolver {
    pub fn new(rows: Vec<TableRow>) -> Result<Self, SolverError> {
        if rows.is_empty() {
            return Err(SolverError::EmptyTable);
        }
        Ok(Self { rows })
    }

    /// Load a table from a CSV file with a header row. Lines starting with `#` are ignored.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, SolverError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SolverError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let rows = csv_reader
            .deserialize()
            .collect::<Result<Vec<TableRow>, csv::Error>>()?;
        tracing::debug!(rows = rows.len(), "loaded tabulated solver output");
        Self::new(rows)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Schedule made of every tabulated operating point, sorted by wind speed.
    pub fn operating_schedule(&self) -> Result<OperatingSchedule, rotor_core::ScheduleError> {
        let mut points: Vec<OperatingPoint> = self
            .rows
            .iter()
            .map(|row| OperatingPoint {
                wind_speed_m_s: row.wind_speed_m_s,
                rotor_speed_rpm: row.rotor_speed_rpm,
                pitch_deg: row.pitch_deg,
            })
            .collect();
        points.sort_by(|a, b| a.wind_speed_m_s.total_cmp(&b.wind_speed_m_s));
        OperatingSchedule::from_points(&points)
    }
}

impl AeroSolver for TabulatedSolver {
    fn evaluate(&self, schedule: &OperatingSchedule) -> Result<SolverOutput, SolverError> {
        let mut output = SolverOutput::default();
        for (index, point) in schedule.points().enumerate() {
            let row = self.rows.iter().find(|row| row.matches(&point)).ok_or(
                SolverError::MissingOperatingPoint {
                    index,
                    wind_speed_m_s: point.wind_speed_m_s,
                    rotor_speed_rpm: point.rotor_speed_rpm,
                    pitch_deg: point.pitch_deg,
                },
            )?;
            push_row(&mut output.loads, &mut output.derivatives, row);
        }
        output.validate(schedule.len())?;
        Ok(output)
    }
}

fn push_row(loads: &mut RotorLoads, derivatives: &mut LoadDerivatives, row: &TableRow) {
    loads.power_w.push(row.power_w);
    loads.power_coefficient.push(row.power_coefficient);
    loads.thrust_n.push(row.thrust_n);
    loads.torque_nm.push(row.torque_nm);
    loads
        .hub_force_n
        .push([row.thrust_n, row.hub_fy_n, row.hub_fz_n]);
    loads
        .hub_moment_nm
        .push([row.torque_nm, row.hub_my_nm, row.hub_mz_nm]);

    derivatives.thrust.wind_speed.push(row.dt_du);
    derivatives.thrust.rotor_speed.push(row.dt_domega);
    derivatives.thrust.pitch.push(row.dt_dpitch);
    derivatives.torque.wind_speed.push(row.dq_du);
    derivatives.torque.rotor_speed.push(row.dq_domega);
    derivatives.torque.pitch.push(row.dq_dpitch);
    derivatives.power.wind_speed.push(row.dp_du);
    derivatives.power.rotor_speed.push(row.dp_domega);
    derivatives.power.pitch.push(row.dp_dpitch);
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= MATCH_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}
