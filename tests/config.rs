use std::fs;

use rotor_aero::config::{ConfigError, ControlConfig, find_turbine, load_turbines};
use rotor_aero::linearize::turbine::{Turbine, select};

#[test]
fn shipped_catalog_loads_from_directory() {
    let turbines = load_turbines("configs/turbines").expect("turbine catalog");
    assert_eq!(turbines.len(), 2);
    assert_eq!(turbines[0].name, "IEA-10-198-RWT");

    let iea15 = find_turbine(&turbines, "iea-15-240-rwt").expect("IEA-15 present");
    assert_eq!(iea15.hub_height_m, 150.0);
    assert_eq!(iea15.operating_schedule.wind_speed_m_s.len(), 20);
    assert_eq!(iea15.control.k_float(), 9.0);
    assert!(matches!(iea15.control, ControlConfig::Scheduled { .. }));

    let turbine = Turbine::from_config(iea15).expect("runtime turbine");
    assert_eq!(turbine.schedule.len(), 20);
    assert_eq!(turbine.gains.len(), 20);
}

#[test]
fn yaml_list_and_single_toml_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let yaml = dir.path().join("turbines.yaml");
    fs::write(
        &yaml,
        r#"
- name: Alpha
  hub_height_m: 90.0
  drivetrain_inertia_kg_m2: 4.0e7
  operating_schedule:
    wind_speed_m_s: [8.0, 12.0]
    rotor_speed_rpm: [10.0, 12.0]
    pitch_deg: [0.0, 4.0]
- name: Beta
  hub_height_m: 110.0
  drivetrain_inertia_kg_m2: 6.0e7
  operating_schedule:
    wind_speed_m_s: [12.0]
    rotor_speed_rpm: [11.0]
    pitch_deg: [3.0]
  control:
    type: fixed
    kp: 0.2
    ki: 0.02
"#,
    )
    .expect("write yaml");
    let turbines = load_turbines(&yaml).expect("yaml catalog");
    assert_eq!(turbines.len(), 2);
    assert!(matches!(turbines[0].control, ControlConfig::Disabled));
    assert_eq!(turbines[1].control.k_float(), 0.0);

    let chosen = select(&turbines, Some("beta")).expect("select beta");
    assert_eq!(chosen.name, "Beta");
    let default = select(&turbines, None).expect("default turbine");
    assert_eq!(default.name, "Alpha");
    assert!(select(&turbines, Some("gamma")).is_err());

    let toml = dir.path().join("single.toml");
    fs::write(
        &toml,
        r#"
name = "Solo"
hub_height_m = 100.0
drivetrain_inertia_kg_m2 = 5.0e7

[operating_schedule]
wind_speed_m_s = [10.0]
rotor_speed_rpm = [9.0]
pitch_deg = [2.0]
"#,
    )
    .expect("write toml");
    let turbines = load_turbines(&toml).expect("toml record");
    assert_eq!(turbines.len(), 1);
    assert_eq!(turbines[0].name, "Solo");
    assert!(turbines[0].derivative_table.is_none());
}

#[test]
fn invalid_records_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(
        &path,
        r#"
name = "Broken"
hub_height_m = 0.0
drivetrain_inertia_kg_m2 = 5.0e7

[operating_schedule]
wind_speed_m_s = [10.0]
rotor_speed_rpm = [9.0]
pitch_deg = [2.0]
"#,
    )
    .expect("write toml");
    assert!(matches!(
        load_turbines(&path),
        Err(ConfigError::Invalid { turbine, .. }) if turbine == "Broken"
    ));

    fs::write(
        &path,
        r#"
name = "Uneven"
hub_height_m = 100.0
drivetrain_inertia_kg_m2 = 5.0e7

[operating_schedule]
wind_speed_m_s = [10.0, 12.0]
rotor_speed_rpm = [9.0, 9.0]
pitch_deg = [2.0, 3.0]

[control]
type = "scheduled"
pitch_angles_rad = [0.0, 0.1]
kp = [-1.0]
ki = [-0.1, -0.08]
"#,
    )
    .expect("write toml");
    assert!(matches!(load_turbines(&path), Err(ConfigError::Invalid { .. })));

    fs::write(&path, "name = ").expect("write toml");
    assert!(matches!(load_turbines(&path), Err(ConfigError::Toml(_))));

    assert!(matches!(
        load_turbines(dir.path().join("missing.yaml")),
        Err(ConfigError::Io(_))
    ));
}
