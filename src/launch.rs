//! Drag-free kinematics of a projectile launched from `(0, h)`.
//!
//! Every other model in the crate is built from these closed-form expressions:
//!
//! ```text
//! x(t) = u cosθ t
//! y(t) = h + u sinθ t - g t² / 2
//! y(x) = h + x tanθ - g x² / (2 u² cos²θ)
//! ```

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRAVITY_MPS2, NUMERICAL_TOLERANCE};
use crate::error::{ensure_finite, ensure_positive, ProjectileError, Result};

/// Scalar inputs shared by every drag-free page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchParams {
    /// Launch angle above the horizontal (degrees)
    pub angle_deg: f64,
    /// Strength of gravity (m/s²)
    pub gravity: f64,
    /// Launch speed (m/s)
    pub speed: f64,
    /// Launch height (m)
    pub height: f64,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            gravity: DEFAULT_GRAVITY_MPS2,
            speed: 20.0,
            height: 2.0,
        }
    }
}

impl LaunchParams {
    pub fn new(angle_deg: f64, gravity: f64, speed: f64, height: f64) -> Self {
        Self { angle_deg, gravity, speed, height }
    }

    /// Check the inputs are physically meaningful for a drag-free launch.
    pub fn validate(&self) -> Result<()> {
        ensure_finite("launch angle", self.angle_deg)?;
        if !(0.0..=90.0).contains(&self.angle_deg) {
            return Err(ProjectileError::invalid(
                "launch angle",
                self.angle_deg,
                "must be between 0 and 90 degrees",
            ));
        }
        ensure_positive("gravity", self.gravity)?;
        ensure_positive("launch speed", self.speed)?;
        ensure_finite("launch height", self.height)?;
        Ok(())
    }

    pub fn angle_rad(&self) -> f64 {
        self.angle_deg.to_radians()
    }

    /// Launch straight up; `cos(90°)` is not exactly zero in floating point.
    pub fn is_vertical(&self) -> bool {
        (90.0 - self.angle_deg).abs() < NUMERICAL_TOLERANCE
    }

    /// Initial velocity components `(ux, uy)`.
    pub fn components(&self) -> (f64, f64) {
        if self.is_vertical() {
            return (0.0, self.speed);
        }
        let rad = self.angle_rad();
        (self.speed * rad.cos(), self.speed * rad.sin())
    }

    pub fn initial_velocity(&self) -> Vector2<f64> {
        let (ux, uy) = self.components();
        Vector2::new(ux, uy)
    }

    /// Time until the projectile returns to `y = 0`.
    pub fn flight_time(&self) -> Result<f64> {
        self.validate()?;
        let (_, uy) = self.components();
        let discriminant = uy * uy + 2.0 * self.gravity * self.height;
        if discriminant < 0.0 {
            return Err(ProjectileError::NoGroundImpact { discriminant });
        }
        Ok((uy + discriminant.sqrt()) / self.gravity)
    }

    /// Horizontal distance travelled before landing.
    pub fn range(&self) -> Result<f64> {
        let (ux, _) = self.components();
        Ok(ux * self.flight_time()?)
    }

    /// Highest point of the trajectory.
    pub fn apogee(&self) -> Result<(f64, f64)> {
        self.validate()?;
        let (ux, uy) = self.components();
        let g = self.gravity;
        Ok((ux * uy / g, self.height + uy * uy / 2.0 / g))
    }

    /// Time at which the apogee is reached.
    pub fn apogee_time(&self) -> Result<f64> {
        self.validate()?;
        let (_, uy) = self.components();
        Ok(uy / self.gravity)
    }

    pub fn position_at(&self, t: f64) -> Vector2<f64> {
        let (ux, uy) = self.components();
        Vector2::new(ux * t, self.height + uy * t - self.gravity / 2.0 * t * t)
    }

    pub fn velocity_at(&self, t: f64) -> Vector2<f64> {
        let (ux, uy) = self.components();
        Vector2::new(ux, uy - self.gravity * t)
    }

    /// Height of the trajectory as a function of horizontal distance.
    pub fn height_at_x(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if self.is_vertical() {
            return Err(ProjectileError::invalid(
                "launch angle",
                self.angle_deg,
                "a vertical launch has no y(x) form",
            ));
        }
        let (ux, uy) = self.components();
        Ok(trajectory_height(self.height, uy / ux, self.gravity, self.speed, x))
    }
}

/// `y(x)` for a parabola written in terms of `tanθ`.
///
/// Several models only know `tanθ` (the target solutions come out of a
/// quadratic in `tanθ`), so this form avoids an `atan`/`tan` round trip.
pub fn trajectory_height(h: f64, tan_theta: f64, g: f64, u: f64, x: f64) -> f64 {
    h + x * tan_theta - x * x * g * (1.0 + tan_theta * tan_theta) / 2.0 / (u * u)
}

/// Horizontal distance at which the `tanθ` parabola returns to `y = 0`.
pub fn ground_distance(h: f64, tan_theta: f64, g: f64, u: f64) -> Result<f64> {
    let a = g * (1.0 + tan_theta * tan_theta) / 2.0 / (u * u);
    let discriminant = tan_theta * tan_theta + 4.0 * a * h;
    if discriminant < 0.0 {
        return Err(ProjectileError::NoGroundImpact { discriminant });
    }
    Ok((tan_theta + discriminant.sqrt()) / 2.0 / a)
}
