use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail};
use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Plot aero-servo added mass and damping versus wind speed from a sweep CSV"
)]
struct Cli {
    #[arg(long)]
    input: PathBuf,
    #[arg(long, default_value = "artifacts/aero_sweep.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 900)]
    height: u32,
}

#[derive(Debug, Clone, Copy)]
struct Row {
    wind_speed: f64,
    added_mass: f64,
    added_damping: f64,
    clamped: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let rows = read_rows(&cli.input)?;
    if rows.is_empty() {
        bail!("no finite rows in {}", cli.input.display());
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 22.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let (u_min, u_max) = padded_range(rows.iter().map(|r| r.wind_speed));
    let panels = root.split_evenly((2, 1));
    let series: [(&str, &str, fn(&Row) -> f64, RGBColor); 2] = [
        (
            "Aero-servo added mass",
            "a (kg)",
            |r| r.added_mass,
            RGBColor(30, 90, 200),
        ),
        (
            "Aero-servo added damping",
            "b (N s/m)",
            |r| r.added_damping,
            RGBColor(200, 60, 30),
        ),
    ];

    for (area, (caption, y_desc, value, color)) in panels.iter().zip(series) {
        let (y_min, y_max) = padded_range(rows.iter().map(value));
        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .caption(caption, caption_font.clone())
            .x_label_area_size(50)
            .y_label_area_size(110)
            .build_cartesian_2d(u_min..u_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Wind speed (m/s)")
            .y_desc(y_desc)
            .label_style(label_font.clone())
            .axis_desc_style(label_font.clone())
            .y_label_formatter(&|v| format!("{v:.3e}"))
            .draw()?;

        chart.draw_series(LineSeries::new(
            rows.iter().map(|r| (r.wind_speed, value(r))),
            ShapeStyle::from(&color).stroke_width(2),
        ))?;
        chart.draw_series(
            rows.iter()
                .filter(|r| r.clamped)
                .map(|r| Circle::new((r.wind_speed, value(r)), 4, BLACK.mix(0.6).filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_rows(path: &Path) -> anyhow::Result<Vec<Row>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("CSV missing '{}' column", name))
    };
    let wind_idx = column("wind_speed_m_s")?;
    let mass_idx = column("added_mass_kg")?;
    let damping_idx = column("added_damping_ns_m")?;
    let clamped_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("clamped"));

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let parse = |idx: usize| r.get(idx).unwrap_or("").trim().parse().unwrap_or(f64::NAN);
        let row = Row {
            wind_speed: parse(wind_idx),
            added_mass: parse(mass_idx),
            added_damping: parse(damping_idx),
            clamped: clamped_idx
                .and_then(|idx| r.get(idx))
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
        };
        if row.wind_speed.is_finite() && row.added_mass.is_finite() && row.added_damping.is_finite()
        {
            rows.push(row);
        }
    }
    rows.sort_by(|a, b| a.wind_speed.total_cmp(&b.wind_speed));
    Ok(rows)
}

/// Data range widened by 5% on each side; a flat series gets a unit band.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = hi - lo;
    if span.abs() < f64::EPSILON * lo.abs().max(1.0) {
        let pad = lo.abs().max(1.0) * 0.05;
        (lo - pad, hi + pad)
    } else {
        (lo - 0.05 * span, hi + 0.05 * span)
    }
}
