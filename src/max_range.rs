//! Launch angle that maximizes horizontal range for a given speed and height.
//!
//! From the right-angled velocity triangle at maximum range:
//!
//! ```text
//! θ* = asin(1 / sqrt(2 + 2gh/u²))
//! R* = (u/g) sqrt(u² + 2gh)
//! ```

use crate::analytical::{analytical, AnalyticalTrajectory};
use crate::error::{ensure_finite, ensure_positive, ProjectileError, Result};
use crate::launch::LaunchParams;

/// The range-maximizing trajectory for a launch speed and height.
#[derive(Debug, Clone)]
pub struct MaxRangeSolution {
    pub angle_rad: f64,
    pub range: f64,
    pub flight_time: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl MaxRangeSolution {
    pub fn angle_deg(&self) -> f64 {
        self.angle_rad.to_degrees()
    }

    /// Launch parameters reproducing this trajectory.
    pub fn launch(&self, gravity: f64, speed: f64, height: f64) -> LaunchParams {
        LaunchParams::new(self.angle_deg(), gravity, speed, height)
    }
}

/// Input trajectory next to the range-maximizing one.
#[derive(Debug, Clone)]
pub struct RangeComparison {
    pub input: AnalyticalTrajectory,
    pub optimum: MaxRangeSolution,
}

/// Optimum launch angle `θ*` for speed `u` from height `h`.
pub fn optimum_angle(gravity: f64, speed: f64, height: f64) -> Result<f64> {
    ensure_positive("gravity", gravity)?;
    ensure_positive("launch speed", speed)?;
    ensure_finite("launch height", height)?;

    let energy = speed * speed + 2.0 * gravity * height;
    if energy <= 0.0 {
        // Launched too far below the ground to ever reach it
        return Err(ProjectileError::NoGroundImpact { discriminant: energy });
    }
    Ok((1.0 / (2.0 + 2.0 * gravity * height / (speed * speed)).sqrt()).asin())
}

/// Build the range-maximizing trajectory.
pub fn optimum_launch(gravity: f64, speed: f64, height: f64, samples: usize) -> Result<MaxRangeSolution> {
    let angle_rad = optimum_angle(gravity, speed, height)?;
    let range = speed / gravity * (speed * speed + 2.0 * gravity * height).sqrt();

    let launch = LaunchParams::new(angle_rad.to_degrees(), gravity, speed, height);
    let trajectory = analytical(&launch, samples)?;

    Ok(MaxRangeSolution {
        angle_rad,
        range,
        flight_time: trajectory.flight_time,
        x: trajectory.x,
        y: trajectory.y,
    })
}

/// Compare the input trajectory with the range-maximizing one at the same speed and height.
pub fn max_range(params: &LaunchParams, samples: usize) -> Result<RangeComparison> {
    let input = analytical(params, samples)?;
    let optimum = optimum_launch(params.gravity, params.speed, params.height, samples)?;
    Ok(RangeComparison { input, optimum })
}
