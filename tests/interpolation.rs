use approx::assert_relative_eq;
use rotor_aero::core::interp::{Bounds, Position, arange, interp, interp_checked, linspace};
use rotor_aero::core::{OperatingSchedule, ScheduleError};
use rotor_aero::geometry::Pchip;

#[test]
fn interp_reproduces_nodes_and_clamps_edges() {
    let xp = [10.0, 14.0, 18.0];
    let fp = [500.0, 600.0, 700.0];

    for (x, f) in xp.iter().zip(fp) {
        assert_eq!(interp(*x, &xp, &fp, Bounds::Clamp), f);
    }
    assert_relative_eq!(interp(12.0, &xp, &fp, Bounds::Clamp), 550.0);
    assert_eq!(interp(2.0, &xp, &fp, Bounds::Clamp), 500.0);
    assert_eq!(interp(40.0, &xp, &fp, Bounds::Clamp), 700.0);
    assert_eq!(interp(2.0, &xp, &fp, Bounds::Fill(0.0)), 0.0);
    assert_eq!(interp(40.0, &xp, &fp, Bounds::Fill(-1.0)), -1.0);
}

#[test]
fn interp_checked_reports_position() {
    let xp = [0.0, 1.0];
    let fp = [0.0, 2.0];
    assert_eq!(interp_checked(-0.5, &xp, &fp, Bounds::Clamp).position, Position::Below);
    assert_eq!(interp_checked(0.5, &xp, &fp, Bounds::Clamp).position, Position::Inside);
    assert_eq!(interp_checked(1.0, &xp, &fp, Bounds::Clamp).position, Position::Inside);
    let above = interp_checked(1.5, &xp, &fp, Bounds::Clamp);
    assert_eq!(above.position, Position::Above);
    assert!(above.out_of_range());
    assert_eq!(above.value, 2.0);
}

#[test]
fn single_node_table_is_constant() {
    let xp = [14.0];
    let fp = [3.5];
    assert_eq!(interp(3.0, &xp, &fp, Bounds::Clamp), 3.5);
    assert_eq!(interp(14.0, &xp, &fp, Bounds::Clamp), 3.5);
    assert_eq!(interp(30.0, &xp, &fp, Bounds::Clamp), 3.5);
}

#[test]
fn grid_helpers_hit_endpoints() {
    let grid = linspace(4.0, 24.0, 50);
    assert_eq!(grid.len(), 50);
    assert_eq!(grid[0], 4.0);
    assert_eq!(grid[49], 24.0);

    let steps = arange(0.05, 3.0, 0.05);
    assert_eq!(steps[0], 0.05);
    assert!(steps.len() >= 59);
    assert!(*steps.last().unwrap() < 3.0 + 1e-9);
}

#[test]
fn schedule_rejects_bad_input() {
    assert_eq!(
        OperatingSchedule::new(vec![], vec![], vec![]),
        Err(ScheduleError::Empty)
    );
    assert_eq!(
        OperatingSchedule::new(vec![10.0, 14.0], vec![7.0], vec![0.0, 5.0]),
        Err(ScheduleError::LengthMismatch {
            field: "rotor_speed_rpm",
            expected: 2,
            found: 1
        })
    );
    assert!(matches!(
        OperatingSchedule::new(vec![10.0, 10.0], vec![7.0, 7.0], vec![0.0, 0.0]),
        Err(ScheduleError::NotIncreasing { index: 1, .. })
    ));
    assert!(matches!(
        OperatingSchedule::new(vec![10.0, f64::NAN], vec![7.0, 7.0], vec![0.0, 0.0]),
        Err(ScheduleError::NonFinite {
            field: "wind_speed_m_s",
            index: 1
        })
    ));
}

#[test]
fn schedule_interpolates_and_reports_range() {
    let schedule =
        OperatingSchedule::new(vec![10.0, 14.0, 18.0], vec![7.0, 7.5, 7.5], vec![0.0, 5.0, 10.0])
            .expect("schedule");
    assert_eq!(schedule.wind_speed_range(), (10.0, 18.0));
    assert!(schedule.contains(14.0));
    assert!(!schedule.contains(25.0));

    let inside = schedule.interp_at(16.0, schedule.pitch_deg());
    assert_relative_eq!(inside.value, 7.5);
    assert!(!inside.out_of_range());

    let outside = schedule.interp_at(25.0, schedule.pitch_deg());
    assert_eq!(outside.value, 10.0);
    assert!(outside.out_of_range());
}

#[test]
fn pchip_interpolates_nodes_and_preserves_monotonicity() {
    let x = [0.0, 0.2, 0.5, 0.7, 1.0];
    let y = [1.0, 0.60, 0.36, 0.30, 0.21];
    let spline = Pchip::new(&x, &y).expect("pchip");

    for (xi, yi) in x.iter().zip(y) {
        assert_relative_eq!(spline.eval(*xi), yi, epsilon = 1e-12);
    }

    let samples: Vec<f64> = (0..=200).map(|i| spline.eval(i as f64 / 200.0)).collect();
    assert!(samples.windows(2).all(|w| w[1] <= w[0] + 1e-12));
    assert!(samples.iter().all(|v| *v <= 1.0 + 1e-12 && *v >= 0.21 - 1e-12));
}

#[test]
fn pchip_keeps_flat_segments_flat() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [0.0, 1.0, 1.0, 2.0];
    let spline = Pchip::new(&x, &y).expect("pchip");
    for i in 0..=10 {
        assert_relative_eq!(spline.eval(1.0 + i as f64 / 10.0), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn pchip_rejects_unsorted_abscissa() {
    assert!(Pchip::new(&[0.0, 0.5, 0.5], &[1.0, 2.0, 3.0]).is_err());
    assert!(Pchip::new(&[0.0, 1.0], &[1.0]).is_err());
}

#[test]
fn unit_conversions_invert_each_other() {
    use rotor_aero::core::units::{deg_to_rad, rad_s_to_rpm, rad_to_deg, rpm_to_rad_s};

    assert_relative_eq!(rad_to_deg(std::f64::consts::PI), 180.0, max_relative = 1e-12);
    assert_relative_eq!(rpm_to_rad_s(30.0), std::f64::consts::PI, max_relative = 1e-12);
    for v in [0.0, 0.25, 7.55, -3.0] {
        assert_relative_eq!(deg_to_rad(rad_to_deg(v)), v, epsilon = 1e-12);
        assert_relative_eq!(rad_s_to_rpm(rpm_to_rad_s(v)), v, epsilon = 1e-12);
    }
}
