//! Drag-free trajectory sampled at a fixed time increment.

use crate::error::Result;
use crate::launch::LaunchParams;
use crate::sampling::arange;

/// Samples of a drag-free flight taken every `dt` seconds.
#[derive(Debug, Clone)]
pub struct TimeSteppedTrajectory {
    pub times: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub flight_time: f64,
}

/// Evaluate the exact position at `t = 0, dt, 2dt, ...` up to (but not including) landing.
pub fn time_stepped(params: &LaunchParams, dt: f64) -> Result<TimeSteppedTrajectory> {
    let flight_time = params.flight_time()?;
    let times = arange(0.0, flight_time, dt)?;

    let (x, y) = times
        .iter()
        .map(|&t| {
            let p = params.position_at(t);
            (p.x, p.y)
        })
        .unzip();

    Ok(TimeSteppedTrajectory { times, x, y, flight_time })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_and_spacing() {
        let params = LaunchParams::default();
        let traj = time_stepped(&params, 0.05).unwrap();
        // T ≈ 3.018 s -> t = 0.00 .. 3.00
        assert_eq!(traj.times.len(), 61);
        assert!((traj.times[1] - 0.05).abs() < 1e-12);
        assert!(traj.times.last().copied().unwrap() < traj.flight_time);
    }

    #[test]
    fn test_starts_at_launch_height() {
        let params = LaunchParams::new(30.0, 9.81, 10.0, 5.0);
        let traj = time_stepped(&params, 0.1).unwrap();
        assert_eq!(traj.x[0], 0.0);
        assert_eq!(traj.y[0], 5.0);
        assert!(traj.y.iter().all(|&y| y >= -1e-9));
    }

    #[test]
    fn test_horizontal_uses_cosine() {
        // x advances with u cosθ; at 60° that is half the launch speed
        let params = LaunchParams::new(60.0, 9.81, 10.0, 0.0);
        let traj = time_stepped(&params, 0.1).unwrap();
        assert!((traj.x[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_step() {
        let params = LaunchParams::default();
        assert!(time_stepped(&params, 0.0).is_err());
    }

    #[test]
    fn test_tiny_step_hits_step_limit() {
        // T ≈ 3.018 s at 2e-7 s would be ~15 million samples
        let params = LaunchParams::default();
        let err = time_stepped(&params, 2e-7).unwrap_err();
        assert!(matches!(err, crate::error::ProjectileError::StepLimit { .. }));
    }
}
