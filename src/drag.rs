//! Projectile motion with air resistance proportional to `v²`.
//!
//! Drag always opposes the velocity vector, so per unit mass
//!
//! ```text
//! ax = -k vx |v|
//! ay = -g - k vy |v|,     k = Cd ρ A / (2m)
//! ```
//!
//! There is no closed form in 2D. The path is integrated with a Verlet step
//! that holds the acceleration constant over `dt`, and is compared with the
//! drag-free parabola for the same launch.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::{DEFAULT_GRAVITY_MPS2, MAX_INTEGRATION_STEPS};
use crate::error::{ensure_non_negative, ensure_positive, ProjectileError, Result};
use crate::launch::LaunchParams;
use crate::sampling::{argmax, linspace, zero_crossing_fraction};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragParams {
    pub angle_deg: f64,
    pub speed: f64,
    pub height: f64,
    pub gravity: f64,
    /// Dimensionless drag coefficient `Cd`
    pub drag_coefficient: f64,
    /// Cross-sectional area (m²)
    pub area: f64,
    /// Air density (kg/m³)
    pub air_density: f64,
    /// Mass (kg)
    pub mass: f64,
    /// Integration time step (s)
    pub dt: f64,
}

impl Default for DragParams {
    fn default() -> Self {
        Self {
            angle_deg: 30.0,
            speed: 20.0,
            height: 2.0,
            gravity: DEFAULT_GRAVITY_MPS2,
            drag_coefficient: 1.0,
            area: 0.007854,
            air_density: 1.0,
            mass: 0.1,
            dt: 0.01,
        }
    }
}

impl DragParams {
    pub fn launch(&self) -> LaunchParams {
        LaunchParams::new(self.angle_deg, self.gravity, self.speed, self.height)
    }

    /// Air resistance factor `k = Cd ρ A / (2m)` (1/m).
    pub fn air_resistance_factor(&self) -> f64 {
        self.drag_coefficient * self.air_density * self.area / (2.0 * self.mass)
    }

    pub fn validate(&self) -> Result<()> {
        self.launch().validate()?;
        ensure_non_negative("launch height", self.height)?;
        ensure_non_negative("drag coefficient", self.drag_coefficient)?;
        ensure_non_negative("cross-sectional area", self.area)?;
        ensure_non_negative("air density", self.air_density)?;
        ensure_positive("mass", self.mass)?;
        ensure_positive("time step", self.dt)?;
        Ok(())
    }
}

/// Time series of position and velocity.
#[derive(Debug, Clone, Default)]
pub struct MotionHistory {
    pub t: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub v: Vec<f64>,
}

impl MotionHistory {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            t: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            vx: Vec::with_capacity(capacity),
            vy: Vec::with_capacity(capacity),
            v: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, t: f64, position: Vector2<f64>, velocity: Vector2<f64>) {
        self.t.push(t);
        self.x.push(position.x);
        self.y.push(position.y);
        self.vx.push(velocity.x);
        self.vy.push(velocity.y);
        self.v.push(velocity.norm());
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Highest recorded point.
    pub fn apogee(&self) -> Option<(f64, f64)> {
        argmax(&self.y).map(|i| (self.x[i], self.y[i]))
    }

    pub fn flight_time(&self) -> f64 {
        self.t.last().copied().unwrap_or(0.0)
    }

    pub fn range(&self) -> f64 {
        self.x.last().copied().unwrap_or(0.0)
    }
}

/// Drag-included trajectory next to the drag-free one.
#[derive(Debug, Clone)]
pub struct DragComparison {
    pub drag: MotionHistory,
    pub drag_free: MotionHistory,
    pub drag_apogee: (f64, f64),
    pub drag_free_apogee: (f64, f64),
    pub air_resistance_factor: f64,
}

impl DragComparison {
    pub fn drag_range(&self) -> f64 {
        self.drag.range()
    }

    pub fn drag_free_range(&self) -> f64 {
        self.drag_free.range()
    }

    pub fn drag_flight_time(&self) -> f64 {
        self.drag.flight_time()
    }

    pub fn drag_free_flight_time(&self) -> f64 {
        self.drag_free.flight_time()
    }
}

fn acceleration(velocity: &Vector2<f64>, gravity: f64, k: f64) -> Vector2<f64> {
    Vector2::new(0.0, -gravity) - velocity * (k * velocity.norm())
}

/// Integrate the drag-included path until it returns to the ground.
///
/// The launch point is always recorded. The final sample is the landing point,
/// linearly interpolated to `y = 0` inside the step that crossed it.
pub fn integrate_with_drag(params: &DragParams) -> Result<MotionHistory> {
    integrate_with_drag_with_limit(params, MAX_INTEGRATION_STEPS)
}

pub(crate) fn integrate_with_drag_with_limit(params: &DragParams, max_steps: usize) -> Result<MotionHistory> {
    params.validate()?;

    let g = params.gravity;
    let dt = params.dt;
    let k = params.air_resistance_factor();

    let mut position = Vector2::new(0.0, params.height);
    let mut velocity = params.launch().initial_velocity();

    let mut history = MotionHistory::with_capacity(1024);
    history.push(0.0, position, velocity);

    let mut steps = 0usize;
    loop {
        steps += 1;
        if steps > max_steps {
            return Err(ProjectileError::StepLimit { steps: max_steps });
        }

        let a = acceleration(&velocity, g, k);
        let next_position = position + velocity * dt + a * (dt * dt / 2.0);
        let next_velocity = velocity + a * dt;
        let previous_time = (steps - 1) as f64 * dt;

        if next_position.y <= 0.0 {
            let fraction = zero_crossing_fraction(position.y, next_position.y).unwrap_or(1.0);
            if fraction > 0.0 {
                let landing = position.lerp(&next_position, fraction);
                let landing_velocity = velocity.lerp(&next_velocity, fraction);
                history.push(previous_time + fraction * dt, Vector2::new(landing.x, 0.0), landing_velocity);
            }
            break;
        }

        position = next_position;
        velocity = next_velocity;
        history.push(steps as f64 * dt, position, velocity);
    }

    trace!(steps, k, "drag integration finished");
    debug!(
        range = history.range(),
        flight_time = history.flight_time(),
        "drag trajectory landed"
    );

    Ok(history)
}

/// Sample the drag-free parabola for the same launch at `samples` evenly spaced times.
pub fn drag_free_history(launch: &LaunchParams, samples: usize) -> Result<MotionHistory> {
    let flight_time = launch.flight_time()?;
    let mut history = MotionHistory::with_capacity(samples);
    for t in linspace(0.0, flight_time, samples) {
        history.push(t, launch.position_at(t), launch.velocity_at(t));
    }
    Ok(history)
}

pub fn compare_with_drag_free(params: &DragParams, samples: usize) -> Result<DragComparison> {
    let drag = integrate_with_drag(params)?;
    let launch = params.launch();
    let drag_free = drag_free_history(&launch, samples)?;

    let drag_apogee = drag.apogee().unwrap_or((0.0, params.height));
    let drag_free_apogee = launch.apogee()?;

    Ok(DragComparison {
        drag,
        drag_free,
        drag_apogee,
        drag_free_apogee,
        air_resistance_factor: params.air_resistance_factor(),
    })
}
