//! Trajectories launched from `(0, h)` that pass through a fixed point `(X, Y)`.
//!
//! For a launch speed `u`, the trajectories through the target satisfy a
//! quadratic in `tanθ`:
//!
//! ```text
//! a tan²θ + b tanθ + c = 0,   a = gX²/(2u²),  b = -X,  c = Y - h + a
//! ```
//!
//! Real roots exist only above the minimum speed `u_min`, where the two roots
//! (the "low ball" and "high ball") merge into the minimum-speed trajectory.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_GRAVITY_MPS2, NUMERICAL_TOLERANCE};
use crate::error::{ensure_finite, ensure_positive, Result};
use crate::launch::{ground_distance, trajectory_height};
use crate::max_range::{optimum_launch, MaxRangeSolution};
use crate::sampling::linspace;

/// Inputs for the target pages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetParams {
    /// Target x coordinate (m)
    pub target_x: f64,
    /// Target y coordinate (m)
    pub target_y: f64,
    pub gravity: f64,
    /// Launch speed (m/s)
    pub speed: f64,
    /// Launch height (m)
    pub height: f64,
}

impl Default for TargetParams {
    fn default() -> Self {
        Self {
            target_x: 20.0,
            target_y: 10.0,
            gravity: DEFAULT_GRAVITY_MPS2,
            speed: 20.0,
            height: 0.0,
        }
    }
}

impl TargetParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("target x", self.target_x)?;
        ensure_finite("target y", self.target_y)?;
        ensure_positive("gravity", self.gravity)?;
        ensure_positive("launch speed", self.speed)?;
        ensure_finite("launch height", self.height)?;
        Ok(())
    }
}

/// How far each trajectory is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// From launch to the target's x coordinate
    ToTarget,
    /// From launch until the projectile lands
    ToGround,
}

/// A sampled trajectory defined by its launch slope and speed.
#[derive(Debug, Clone)]
pub struct SlopeTrajectory {
    pub tan_theta: f64,
    pub speed: f64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl SlopeTrajectory {
    fn sample(h: f64, tan_theta: f64, g: f64, speed: f64, x_end: f64, samples: usize) -> Self {
        let x = linspace(0.0, x_end, samples);
        let y = x
            .iter()
            .map(|&xi| trajectory_height(h, tan_theta, g, speed, xi))
            .collect();
        Self { tan_theta, speed, x, y }
    }

    pub fn angle_rad(&self) -> f64 {
        self.tan_theta.atan()
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_rad().to_degrees()
    }
}

/// Everything the target pages report.
#[derive(Debug, Clone)]
pub struct TargetSolution {
    pub min_speed: f64,
    pub min_speed_trajectory: SlopeTrajectory,
    /// Flatter of the two trajectories through the target, if `u` is high enough
    pub low_ball: Option<SlopeTrajectory>,
    pub high_ball: Option<SlopeTrajectory>,
}

impl TargetSolution {
    pub fn is_reachable(&self) -> bool {
        self.low_ball.is_some() && self.high_ball.is_some()
    }
}

/// Minimum launch speed to reach `(X, Y)` and the slope `tanθ` that achieves it.
pub fn minimum_speed(params: &TargetParams) -> Result<(f64, f64)> {
    params.validate()?;
    let dy = params.target_y - params.height;
    let reach = (params.target_x.powi(2) + dy * dy).sqrt();
    let min_speed = params.gravity.sqrt() * (dy + reach).sqrt();
    let min_tan_theta = (dy + reach) / params.target_x;
    Ok((min_speed, min_tan_theta))
}

/// Launch slopes `(low, high)` through the target at `params.speed`, if any.
pub fn launch_slopes(params: &TargetParams) -> Result<Option<(f64, f64)>> {
    params.validate()?;
    let x = params.target_x;
    let u = params.speed;
    let a = params.gravity / 2.0 / (u * u) * x * x;
    let b = -x;
    let c = params.target_y - params.height + a;

    let discriminant = b * b - 4.0 * a * c;
    // Exactly at u_min the roots coincide; let rounding land on that side
    if discriminant < -NUMERICAL_TOLERANCE * b * b {
        return Ok(None);
    }
    let root = discriminant.max(0.0).sqrt();
    Ok(Some(((-b - root) / 2.0 / a, (-b + root) / 2.0 / a)))
}

/// Solve for the minimum-speed, low-ball and high-ball trajectories.
pub fn hit_target(params: &TargetParams, extent: Extent, samples: usize) -> Result<TargetSolution> {
    let (min_speed, min_tan_theta) = minimum_speed(params)?;
    let h = params.height;
    let g = params.gravity;

    let end_x = |tan_theta: f64, speed: f64| -> Result<f64> {
        match extent {
            Extent::ToTarget => Ok(params.target_x),
            Extent::ToGround => Ok(ground_distance(h, tan_theta, g, speed)?.max(params.target_x)),
        }
    };

    let min_speed_trajectory = SlopeTrajectory::sample(
        h,
        min_tan_theta,
        g,
        min_speed,
        end_x(min_tan_theta, min_speed)?,
        samples,
    );

    let (low_ball, high_ball) = match launch_slopes(params)? {
        Some((low, high)) => {
            debug!(low_deg = low.atan().to_degrees(), high_deg = high.atan().to_degrees(), "target reachable");
            let u = params.speed;
            (
                Some(SlopeTrajectory::sample(h, low, g, u, end_x(low, u)?, samples)),
                Some(SlopeTrajectory::sample(h, high, g, u, end_x(high, u)?, samples)),
            )
        }
        None => {
            warn!(speed = params.speed, min_speed, "launch speed is not sufficient to reach target");
            (None, None)
        }
    };

    Ok(TargetSolution { min_speed, min_speed_trajectory, low_ball, high_ball })
}

/// The envelope of every trajectory launched at speed `u` from height `h`.
#[derive(Debug, Clone)]
pub struct BoundingParabola {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub max_range: MaxRangeSolution,
}

/// `y = u²/(2g) - g x²/(2u²) + h`, drawn out to the maximum range.
pub fn bounding_height(g: f64, u: f64, h: f64, x: f64) -> f64 {
    u * u / (2.0 * g) - g / (2.0 * u * u) * x * x + h
}

pub fn bounding_parabola(params: &TargetParams, samples: usize) -> Result<BoundingParabola> {
    params.validate()?;
    let max_range = optimum_launch(params.gravity, params.speed, params.height, samples)?;

    let x = linspace(0.0, max_range.range, samples);
    let y = x
        .iter()
        .map(|&xi| bounding_height(params.gravity, params.speed, params.height, xi))
        .collect();

    Ok(BoundingParabola { x, y, max_range })
}
