use approx::assert_relative_eq;
use rotor_aero::core::OperatingSchedule;
use rotor_aero::solver::{AeroSolver, Input, Load, SolverError, TabulatedSolver};

const TABLE: &str = "\
# loads and sensitivities
wind_speed_m_s,rotor_speed_rpm,pitch_deg,power_w,power_coefficient,thrust_n,torque_nm,hub_fy_n,hub_fz_n,hub_my_nm,hub_mz_nm,dt_du,dt_domega,dt_dpitch,dq_du,dq_domega,dq_dpitch,dp_du,dp_domega,dp_dpitch
18.0, 7.5, 10.0, 1.5e7, 0.2, 1.2e6, 1.9e7, 3.0e3, -4.0e4, 7.0e5, 3.0e4, 700.0, 1.2e4, -3.0e4, 5.0e6, -1.4e6, -2.1e6, 3.9e6, 1.0e6, -1.6e6
10.0, 7.0, 0.0, 1.0e7, 0.45, 1.0e6, 1.4e7, 1.0e3, -2.0e4, 5.0e5, 1.0e4, 500.0, 1.0e4, -2.0e4, 3.0e6, -1.0e6, -1.5e6, 2.2e6, 0.8e6, -1.1e6
14.0, 7.5, 5.0, 1.5e7, 0.3, 1.4e6, 1.9e7, 2.0e3, -3.0e4, 6.0e5, 2.0e4, 600.0, 1.1e4, -2.5e4, 4.0e6, -1.2e6, -1.8e6, 3.1e6, 0.9e6, -1.4e6
";

fn schedule() -> OperatingSchedule {
    OperatingSchedule::new(vec![10.0, 14.0, 18.0], vec![7.0, 7.5, 7.5], vec![0.0, 5.0, 10.0])
        .expect("schedule")
}

#[test]
fn tabulated_solver_answers_in_schedule_order() {
    let solver = TabulatedSolver::from_reader(TABLE.as_bytes()).expect("table");
    assert_eq!(solver.rows().len(), 3);

    let output = solver.evaluate(&schedule()).expect("evaluate");
    assert_eq!(output.derivatives.get(Load::Thrust, Input::WindSpeed), &[500.0, 600.0, 700.0]);
    assert_eq!(output.derivatives.get(Load::Torque, Input::Pitch), &[-1.5e6, -1.8e6, -2.1e6]);
    assert_eq!(output.loads.hub_force_n[1], [1.4e6, 2.0e3, -3.0e4]);
    assert_eq!(output.loads.hub_moment_nm[2], [1.9e7, 7.0e5, 3.0e4]);
    assert_relative_eq!(output.loads.power_coefficient[0], 0.45);
}

#[test]
fn table_rows_form_a_sorted_schedule() {
    let solver = TabulatedSolver::from_reader(TABLE.as_bytes()).expect("table");
    let schedule = solver.operating_schedule().expect("schedule");
    assert_eq!(schedule.wind_speed(), &[10.0, 14.0, 18.0]);
    assert_eq!(schedule.pitch_deg(), &[0.0, 5.0, 10.0]);
}

#[test]
fn missing_operating_point_is_an_error() {
    let solver = TabulatedSolver::from_reader(TABLE.as_bytes()).expect("table");
    let schedule =
        OperatingSchedule::new(vec![10.0, 12.0], vec![7.0, 7.2], vec![0.0, 2.0]).expect("schedule");
    match solver.evaluate(&schedule) {
        Err(SolverError::MissingOperatingPoint {
            index,
            wind_speed_m_s,
            ..
        }) => {
            assert_eq!(index, 1);
            assert_eq!(wind_speed_m_s, 12.0);
        }
        other => panic!("expected missing operating point, got {other:?}"),
    }
}

#[test]
fn empty_or_malformed_tables_fail() {
    let header_only = TABLE.lines().take(2).collect::<Vec<_>>().join("\n");
    assert!(matches!(
        TabulatedSolver::from_reader(header_only.as_bytes()),
        Err(SolverError::EmptyTable)
    ));

    let truncated = "wind_speed_m_s,rotor_speed_rpm\n10.0,7.0\n";
    assert!(matches!(
        TabulatedSolver::from_reader(truncated.as_bytes()),
        Err(SolverError::Csv(_))
    ));

    assert!(matches!(
        TabulatedSolver::from_csv("data/derivatives/does-not-exist.csv"),
        Err(SolverError::Io(_))
    ));
}

#[test]
fn shipped_tables_cover_their_turbines() {
    let turbines =
        rotor_aero::config::load_turbines("configs/turbines").expect("turbine catalog");
    for config in &turbines {
        let turbine =
            rotor_aero::linearize::Turbine::from_config(config).expect("runtime turbine");
        let path = turbine.derivative_table.as_ref().expect("derivative table");
        let solver = TabulatedSolver::from_csv(path).expect("solver table");
        let output = solver.evaluate(&turbine.schedule).expect("evaluate");
        assert_eq!(output.loads.thrust_n.len(), turbine.schedule.len());
    }
}
