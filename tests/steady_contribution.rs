use approx::assert_relative_eq;
use rotor_aero::core::OperatingSchedule;
use rotor_aero::core::dof::Dof;
use rotor_aero::linearize::{LinearizationError, steady_contribution};
use rotor_aero::solver::{LoadDerivatives, RotorLoads, Sensitivities};

fn schedule() -> OperatingSchedule {
    OperatingSchedule::new(vec![10.0, 14.0, 18.0], vec![7.0, 7.5, 7.5], vec![0.0, 5.0, 10.0])
        .expect("schedule")
}

fn derivatives() -> LoadDerivatives {
    LoadDerivatives {
        thrust: Sensitivities {
            wind_speed: vec![500.0, 600.0, 700.0],
            rotor_speed: vec![1.0e4, 1.1e4, 1.2e4],
            pitch: vec![-2.0e4, -2.5e4, -3.0e4],
        },
        ..LoadDerivatives::default()
    }
}

fn loads() -> RotorLoads {
    RotorLoads {
        hub_force_n: vec![
            [1.0e6, 1.0e3, -2.0e4],
            [1.4e6, 2.0e3, -3.0e4],
            [1.2e6, 3.0e3, -4.0e4],
        ],
        hub_moment_nm: vec![
            [1.0e7, 5.0e5, 1.0e4],
            [1.9e7, 6.0e5, 2.0e4],
            [1.9e7, 7.0e5, 3.0e4],
        ],
        ..RotorLoads::default()
    }
}

#[test]
fn no_frequency_bins_gives_only_surge_damping() {
    let steady =
        steady_contribution(&schedule(), &derivatives(), &loads(), 14.0, 0, &[]).expect("steady");

    for row in &steady.excitation {
        assert!(row.is_empty());
    }
    assert_eq!(steady.excitation.len(), 6);
    for (i, row) in steady.damping.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            if i == 0 && j == 0 {
                assert_eq!(*value, 600.0);
            } else {
                assert_eq!(*value, 0.0);
            }
        }
    }
    assert!(steady.added_mass.iter().flatten().all(|v| *v == 0.0));
    assert!(steady.stiffness.iter().flatten().all(|v| *v == 0.0));
    assert!(!steady.clamped);
}

#[test]
fn excitation_scales_with_amplitude() {
    let steady = steady_contribution(&schedule(), &derivatives(), &loads(), 14.0, 2, &[1.0, 2.0])
        .expect("steady");
    assert_eq!(steady.dt_du, 600.0);
    assert_eq!(steady.excitation[Dof::Surge.index()], vec![600.0, 1200.0]);
    for dof in &Dof::ALL[1..] {
        assert_eq!(steady.excitation[dof.index()], vec![0.0, 0.0]);
    }
}

#[test]
fn steady_load_is_interpolated_at_wind_speed() {
    let steady =
        steady_contribution(&schedule(), &derivatives(), &loads(), 16.0, 0, &[]).expect("steady");
    assert_relative_eq!(steady.dt_du, 650.0);
    assert_relative_eq!(steady.steady_load[0], 1.3e6);
    assert_relative_eq!(steady.steady_load[1], 2.5e3);
    assert_relative_eq!(steady.steady_load[2], -3.5e4);
    assert_relative_eq!(steady.steady_load[3], 1.9e7);
    assert_relative_eq!(steady.steady_load[4], 6.5e5);
    assert_relative_eq!(steady.steady_load[5], 2.5e4);
}

#[test]
fn wind_speed_outside_schedule_holds_edge_values() {
    let below =
        steady_contribution(&schedule(), &derivatives(), &loads(), 4.0, 0, &[]).expect("steady");
    assert_eq!(below.dt_du, 500.0);
    assert!(below.clamped);

    let above =
        steady_contribution(&schedule(), &derivatives(), &loads(), 25.0, 0, &[]).expect("steady");
    assert_eq!(above.dt_du, 700.0);
    assert_eq!(above.steady_load[0], 1.2e6);
    assert!(above.clamped);
}

#[test]
fn precondition_failures_are_reported() {
    assert!(matches!(
        steady_contribution(&schedule(), &derivatives(), &loads(), 14.0, 2, &[1.0]),
        Err(LinearizationError::AmplitudeLength { nw: 2, found: 1 })
    ));

    let mut short = loads();
    short.hub_moment_nm.pop();
    assert!(matches!(
        steady_contribution(&schedule(), &derivatives(), &short, 14.0, 0, &[]),
        Err(LinearizationError::MissingHubLoads {
            expected: 3,
            found: 2
        })
    ));

    let mut mismatched = derivatives();
    mismatched.thrust.wind_speed.truncate(2);
    assert!(matches!(
        steady_contribution(&schedule(), &mismatched, &loads(), 14.0, 0, &[]),
        Err(LinearizationError::ScheduleMismatch {
            expected: 3,
            found: 2,
            ..
        })
    ));

    assert!(matches!(
        steady_contribution(&schedule(), &derivatives(), &loads(), f64::NAN, 0, &[]),
        Err(LinearizationError::InvalidWindSpeed(_))
    ));
}
