//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}

/// Frequency-domain response table for a single wind speed.
pub mod response {
    use std::io::{self, Write};

    pub const HEADER: &str = "omega_rad_s,period_s,added_mass_kg,added_damping_ns_m,control_tf_abs,control_tf_arg_rad";

    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{HEADER}")
    }

    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub omega_rad_s: f64,
        pub added_mass_kg: f64,
        pub added_damping_ns_m: f64,
        pub control_tf_abs: f64,
        pub control_tf_arg_rad: f64,
    }

    impl Record {
        pub fn period_s(&self) -> f64 {
            2.0 * std::f64::consts::PI / self.omega_rad_s
        }

        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.6},{:.6},{:.6e},{:.6e},{:.6e},{:.6}",
                self.omega_rad_s,
                self.period_s(),
                self.added_mass_kg,
                self.added_damping_ns_m,
                self.control_tf_abs,
                self.control_tf_arg_rad,
            )
        }
    }
}

/// Added mass and damping at a probe frequency across wind speeds.
pub mod sweep {
    use std::fs::{self, File};
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    pub const HEADER: &str =
        "wind_speed_m_s,added_mass_kg,added_damping_ns_m,max_root_real,clamped";

    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{HEADER}")
    }

    #[derive(Debug, Clone, Copy, Serialize)]
    pub struct Record {
        pub wind_speed_m_s: f64,
        pub added_mass_kg: f64,
        pub added_damping_ns_m: f64,
        /// Largest real part among the drivetrain characteristic roots.
        pub max_root_real: f64,
        pub clamped: bool,
    }

    impl Record {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.4},{:.6e},{:.6e},{:.6e},{}",
                self.wind_speed_m_s,
                self.added_mass_kg,
                self.added_damping_ns_m,
                self.max_root_real,
                self.clamped,
            )
        }
    }

    #[derive(Debug, Clone)]
    pub struct Metadata<'a> {
        pub turbine: &'a str,
        pub probe_period_s: f64,
        pub k_float: f64,
        pub frequency_count: usize,
        pub generated_utc: &'a str,
    }

    #[derive(Serialize)]
    struct Sidecar<'a> {
        turbine: &'a str,
        probe_period_s: f64,
        probe_frequency_rad_s: f64,
        k_float: f64,
        frequency_count: usize,
        generated_utc: &'a str,
        unstable_points: usize,
        clamped_points: usize,
        records: &'a [Record],
    }

    /// Path of the JSON sidecar written next to `output` (`<stem>_meta.json`).
    pub fn sidecar_path(output: &Path) -> PathBuf {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sweep");
        parent.join(format!("{stem}_meta.json"))
    }

    /// Write the JSON sidecar summarising a sweep; returns the path written.
    pub fn write_sidecar(
        output: &Path,
        meta: &Metadata<'_>,
        records: &[Record],
    ) -> io::Result<PathBuf> {
        let path = sidecar_path(output);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let sidecar = Sidecar {
            turbine: meta.turbine,
            probe_period_s: meta.probe_period_s,
            probe_frequency_rad_s: 2.0 * std::f64::consts::PI / meta.probe_period_s,
            k_float: meta.k_float,
            frequency_count: meta.frequency_count,
            generated_utc: meta.generated_utc,
            unstable_points: records.iter().filter(|r| r.max_root_real > 0.0).count(),
            clamped_points: records.iter().filter(|r| r.clamped).count(),
            records,
        };
        to_writer_pretty(File::create(&path)?, &sidecar)?;
        Ok(path)
    }
}
