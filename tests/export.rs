use std::fs;
use std::path::Path;

use rotor_aero::export::{response, sweep, writer_for_path};

#[test]
fn response_csv_has_header_and_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested/response.csv");
    {
        let mut writer = writer_for_path(&path).expect("writer");
        response::write_header(writer.as_mut()).expect("header");
        for omega in [0.1, 0.2] {
            response::Record {
                omega_rad_s: omega,
                added_mass_kg: 1.0e6,
                added_damping_ns_m: 2.0e5,
                control_tf_abs: 1.0e-3,
                control_tf_arg_rad: -0.5,
            }
            .write_to(writer.as_mut())
            .expect("row");
        }
    }

    let contents = fs::read_to_string(&path).expect("read back");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], response::HEADER);
    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields.len(), 6);
    let period: f64 = fields[1].parse().expect("period");
    assert!((period - 2.0 * std::f64::consts::PI / 0.1).abs() < 1e-5);
}

#[test]
fn sweep_csv_and_sidecar() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sweep.csv");
    let records = vec![
        sweep::Record {
            wind_speed_m_s: 10.0,
            added_mass_kg: 1.0e5,
            added_damping_ns_m: 3.0e5,
            max_root_real: -0.05,
            clamped: false,
        },
        sweep::Record {
            wind_speed_m_s: 26.0,
            added_mass_kg: 2.0e5,
            added_damping_ns_m: 1.0e5,
            max_root_real: 0.01,
            clamped: true,
        },
    ];
    {
        let mut writer = writer_for_path(&path).expect("writer");
        sweep::write_header(writer.as_mut()).expect("header");
        for record in &records {
            record.write_to(writer.as_mut()).expect("row");
        }
    }
    let contents = fs::read_to_string(&path).expect("read back");
    assert!(contents.starts_with(sweep::HEADER));
    assert!(contents.lines().nth(2).expect("second row").ends_with(",true"));

    let meta = sweep::Metadata {
        turbine: "IEA-15-240-RWT",
        probe_period_s: 30.0,
        k_float: 9.0,
        frequency_count: 59,
        generated_utc: "2026-01-01T00:00:00Z",
    };
    let sidecar = sweep::write_sidecar(&path, &meta, &records).expect("sidecar");
    assert_eq!(sidecar, dir.path().join("sweep_meta.json"));
    assert_eq!(
        sweep::sidecar_path(Path::new("out/run.csv")),
        Path::new("out/run_meta.json")
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&sidecar).expect("sidecar text")).expect("json");
    assert_eq!(json["turbine"], "IEA-15-240-RWT");
    assert_eq!(json["unstable_points"], 1);
    assert_eq!(json["clamped_points"], 1);
    assert_eq!(json["records"].as_array().map(Vec::len), Some(2));
    let probe = json["probe_frequency_rad_s"].as_f64().expect("probe");
    assert!((probe - 2.0 * std::f64::consts::PI / 30.0).abs() < 1e-12);
}
