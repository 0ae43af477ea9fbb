//! Straight-line distance from the launch point as a function of time.
//!
//! ```text
//! r(t)² = u²t² - g u sinθ t³ + g² t⁴ / 4
//! ```
//!
//! `d(r²)/dt = t (2u² - 3gu sinθ t + g²t²)` has two positive roots once
//! `sin²θ > 8/9`, i.e. above roughly 70.53°: the range first peaks, dips, then
//! grows again. At exactly `sinθ = 2√2/3` both roots merge into one stationary
//! point at `t = √2 u / g`.

use serde::{Deserialize, Serialize};

use crate::analytical::analytical;
use crate::constants::{DEFAULT_GRAVITY_MPS2, NUMERICAL_TOLERANCE, RANGE_TIME_CRITICAL_SIN_SQ};
use crate::error::{ensure_finite, ensure_positive, Result};
use crate::launch::LaunchParams;
use crate::sampling::linspace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeTimeParams {
    pub speed: f64,
    pub gravity: f64,
    pub height: f64,
}

impl Default for RangeTimeParams {
    fn default() -> Self {
        Self {
            speed: 10.0,
            gravity: DEFAULT_GRAVITY_MPS2,
            height: 2.0,
        }
    }
}

impl RangeTimeParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("launch speed", self.speed)?;
        ensure_positive("gravity", self.gravity)?;
        ensure_finite("launch height", self.height)?;
        Ok(())
    }

    fn launch(&self, angle_deg: f64) -> LaunchParams {
        LaunchParams::new(angle_deg, self.gravity, self.speed, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationaryKind {
    Maximum,
    Minimum,
    Saddle,
}

/// A point where `dr/dt = 0`, located on both the r-t and x-y charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationaryPoint {
    pub kind: StationaryKind,
    pub angle_deg: f64,
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub r: f64,
    /// False when the projectile would already have landed by `t`
    pub before_landing: bool,
}

/// One launch angle's r-t and x-y curves.
#[derive(Debug, Clone)]
pub struct RangeTimeCurve {
    pub angle_deg: f64,
    pub t: Vec<f64>,
    pub r: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct RangeTimeFamily {
    pub curves: Vec<RangeTimeCurve>,
    pub stationary: Vec<StationaryPoint>,
    pub saddle: StationaryPoint,
}

/// Distance from the launch point at time `t`.
pub fn range_at(speed: f64, gravity: f64, sin_theta: f64, t: f64) -> f64 {
    let r_sq = speed * speed * t * t - gravity * t.powi(3) * speed * sin_theta + gravity * gravity * t.powi(4) / 4.0;
    // r² is a sum of squares; clamp the rounding error near t = 0
    r_sq.max(0.0).sqrt()
}

/// Launch angle (degrees) above which r(t) stops being monotonic.
pub fn critical_angle_deg() -> f64 {
    RANGE_TIME_CRITICAL_SIN_SQ.sqrt().asin().to_degrees()
}

fn stationary_point(params: &RangeTimeParams, kind: StationaryKind, angle_deg: f64, t: f64) -> Result<StationaryPoint> {
    let launch = params.launch(angle_deg);
    let position = launch.position_at(t);
    let sin_theta = launch.angle_rad().sin();
    Ok(StationaryPoint {
        kind,
        angle_deg,
        t,
        x: position.x,
        y: position.y,
        r: range_at(params.speed, params.gravity, sin_theta, t),
        before_landing: t <= launch.flight_time()?,
    })
}

/// Local maximum and minimum of r(t) for one launch angle, if it has them.
pub fn stationary_points(params: &RangeTimeParams, angle_deg: f64) -> Result<Vec<StationaryPoint>> {
    params.validate()?;
    params.launch(angle_deg).validate()?;

    let sin_theta = angle_deg.to_radians().sin();
    let excess = sin_theta * sin_theta - RANGE_TIME_CRITICAL_SIN_SQ;
    if excess <= NUMERICAL_TOLERANCE {
        return Ok(Vec::new());
    }

    let scale = 3.0 * params.speed / 2.0 / params.gravity;
    let t_max = scale * (sin_theta - excess.sqrt());
    let t_min = scale * (sin_theta + excess.sqrt());

    Ok(vec![
        stationary_point(params, StationaryKind::Maximum, angle_deg, t_max)?,
        stationary_point(params, StationaryKind::Minimum, angle_deg, t_min)?,
    ])
}

/// The single stationary point at the critical launch angle.
pub fn saddle_point(params: &RangeTimeParams) -> Result<StationaryPoint> {
    params.validate()?;
    let t = std::f64::consts::SQRT_2 * params.speed / params.gravity;
    stationary_point(params, StationaryKind::Saddle, critical_angle_deg(), t)
}

/// r-t and x-y curves for every angle in `angles_deg`, with their stationary points.
pub fn range_time_family(params: &RangeTimeParams, angles_deg: &[f64], samples: usize) -> Result<RangeTimeFamily> {
    params.validate()?;

    let mut curves = Vec::with_capacity(angles_deg.len());
    let mut stationary = Vec::new();

    for &angle_deg in angles_deg {
        let launch = params.launch(angle_deg);
        let flight_time = launch.flight_time()?;
        let sin_theta = launch.angle_rad().sin();

        let t = linspace(0.0, flight_time, samples);
        let r = t
            .iter()
            .map(|&ti| range_at(params.speed, params.gravity, sin_theta, ti))
            .collect();
        let xy = analytical(&launch, samples)?;

        curves.push(RangeTimeCurve { angle_deg, t, r, x: xy.x, y: xy.y });
        stationary.extend(stationary_points(params, angle_deg)?);
    }

    Ok(RangeTimeFamily {
        curves,
        stationary,
        saddle: saddle_point(params)?,
    })
}
