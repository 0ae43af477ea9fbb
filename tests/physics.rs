use approx::assert_relative_eq;
use projectile_engine::{
    analytical, arc_length, bounding_parabola, compare_with_drag_free, hit_target, max_range, optimum_angle,
    simulate_bounces, stationary_points, time_stepped, BounceParams, DragParams, Extent, LaunchParams,
    RangeTimeParams, TargetParams,
};

#[test]
fn test_range_at_45_degrees_from_ground() {
    for &u in &[5.0, 12.0, 30.0] {
        let params = LaunchParams::new(45.0, 9.81, u, 0.0);
        assert_relative_eq!(params.range().unwrap(), u * u / 9.81, epsilon = 1e-9);
    }
}

#[test]
fn test_complementary_angles_share_range_from_ground() {
    let low = LaunchParams::new(25.0, 9.81, 15.0, 0.0);
    let high = LaunchParams::new(65.0, 9.81, 15.0, 0.0);
    assert_relative_eq!(low.range().unwrap(), high.range().unwrap(), epsilon = 1e-9);
    assert!(arc_length(&high).unwrap() > arc_length(&low).unwrap());
}

#[test]
fn test_stepped_samples_lie_on_analytical_curve() {
    let params = LaunchParams::new(50.0, 9.81, 18.0, 3.0);
    let stepped = time_stepped(&params, 0.1).unwrap();
    let exact = analytical(&params, 100).unwrap();

    assert_relative_eq!(stepped.flight_time, exact.flight_time, epsilon = 1e-12);
    for (&x, &y) in stepped.x.iter().zip(&stepped.y) {
        assert_relative_eq!(params.height_at_x(x).unwrap(), y, epsilon = 1e-9);
    }
}

#[test]
fn test_optimum_angle_never_loses() {
    let (g, u, h) = (9.81, 14.0, 6.0);
    let comparison = max_range(&LaunchParams::new(35.0, g, u, h), 50).unwrap();
    let best = optimum_angle(g, u, h).unwrap().to_degrees();
    assert!(best < 45.0);
    for angle in (0..=90).step_by(5) {
        let range = LaunchParams::new(angle as f64, g, u, h).range().unwrap();
        assert!(range <= comparison.optimum.range + 1e-9);
    }
}

#[test]
fn test_target_trajectories_stay_under_bounding_parabola() {
    let params = TargetParams { target_x: 12.0, target_y: 4.0, speed: 15.0, height: 1.0, ..Default::default() };
    let solution = hit_target(&params, Extent::ToGround, 200).unwrap();
    let envelope = bounding_parabola(&params, 200).unwrap();

    let bound = |x: f64| 15.0 * 15.0 / (2.0 * 9.81) - 9.81 / (2.0 * 15.0 * 15.0) * x * x + 1.0;
    for trajectory in [solution.low_ball.unwrap(), solution.high_ball.unwrap()] {
        for (&x, &y) in trajectory.x.iter().zip(&trajectory.y) {
            assert!(y <= bound(x) + 1e-9);
        }
    }
    assert!(envelope.x.last().copied().unwrap() > params.target_x);
}

#[test]
fn test_range_time_extrema_appear_above_critical_angle_only() {
    let params = RangeTimeParams::default();
    assert!(stationary_points(&params, 70.0).unwrap().is_empty());
    assert_eq!(stationary_points(&params, 71.0).unwrap().len(), 2);
}

#[test]
fn test_bounce_heights_shrink() {
    let params = BounceParams { bounces: 5, ..Default::default() };
    let result = simulate_bounces(&params).unwrap();

    let mut peaks = Vec::new();
    let mut start = 0;
    for bounce in &result.bounces {
        let end = result.t.iter().position(|&t| t >= bounce.time).unwrap();
        let peak = result.y[start..=end].iter().cloned().fold(f64::MIN, f64::max);
        peaks.push(peak);
        start = end;
    }
    for pair in peaks.windows(2) {
        assert!(pair[1] < pair[0]);
    }
}

#[test]
fn test_heavier_projectile_feels_less_drag() {
    let light = compare_with_drag_free(&DragParams::default(), 100).unwrap();
    let heavy = compare_with_drag_free(&DragParams { mass: 1.0, ..Default::default() }, 100).unwrap();
    assert!(heavy.air_resistance_factor < light.air_resistance_factor);
    assert!(heavy.drag_range() > light.drag_range());
    assert!(heavy.drag_range() < heavy.drag_free_range());
}
