//! Bouncing projectile integrated with a fixed time step.
//!
//! Acceleration is constant between steps, so the Verlet position update
//! `y += vy dt - g dt² / 2` is exact in flight. When a step ends below the
//! ground the projectile is put back on it and its vertical velocity is
//! reflected and scaled by the coefficient of restitution `C`. Horizontal
//! velocity is never changed.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constants::{DEFAULT_GRAVITY_MPS2, MAX_INTEGRATION_STEPS};
use crate::error::{ensure_non_negative, ensure_positive, ProjectileError, Result};
use crate::launch::LaunchParams;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceParams {
    pub angle_deg: f64,
    pub gravity: f64,
    pub speed: f64,
    pub height: f64,
    /// Integration time step (s)
    pub dt: f64,
    /// Coefficient of restitution, vertical separation speed over approach speed
    pub restitution: f64,
    /// Number of bounces after which the simulation stops
    pub bounces: u32,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            gravity: DEFAULT_GRAVITY_MPS2,
            speed: 6.0,
            height: 2.0,
            dt: 0.02,
            restitution: 0.7,
            bounces: 6,
        }
    }
}

impl BounceParams {
    pub fn launch(&self) -> LaunchParams {
        LaunchParams::new(self.angle_deg, self.gravity, self.speed, self.height)
    }

    pub fn validate(&self) -> Result<()> {
        self.launch().validate()?;
        ensure_positive("time step", self.dt)?;
        ensure_non_negative("coefficient of restitution", self.restitution)?;
        if self.restitution > 1.0 {
            return Err(ProjectileError::invalid(
                "coefficient of restitution",
                self.restitution,
                "must not exceed 1",
            ));
        }
        if self.bounces == 0 {
            return Err(ProjectileError::invalid(
                "number of bounces",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Where and when the projectile touched the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceEvent {
    pub time: f64,
    pub x: f64,
    /// Vertical speed just after the bounce
    pub rebound_speed: f64,
}

#[derive(Debug, Clone)]
pub struct BounceTrajectory {
    pub t: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub bounces: Vec<BounceEvent>,
    pub total_time: f64,
}

/// Bounce until `params.bounces` ground contacts have happened.
///
/// A launch below the ground counts its first step as a bounce.
pub fn simulate_bounces(params: &BounceParams) -> Result<BounceTrajectory> {
    simulate_bounces_with_limit(params, MAX_INTEGRATION_STEPS)
}

pub(crate) fn simulate_bounces_with_limit(params: &BounceParams, max_steps: usize) -> Result<BounceTrajectory> {
    params.validate()?;

    let g = params.gravity;
    let dt = params.dt;
    let c = params.restitution;

    let mut position = Vector2::new(0.0, params.height);
    let mut velocity = params.launch().initial_velocity();
    let acceleration = Vector2::new(0.0, -g);
    let mut time = 0.0;

    let mut t = vec![time];
    let mut x = vec![position.x];
    let mut y = vec![position.y];
    let mut bounces = Vec::with_capacity(params.bounces as usize);

    let mut steps = 0usize;
    while bounces.len() < params.bounces as usize {
        steps += 1;
        if steps > max_steps {
            return Err(ProjectileError::StepLimit { steps: max_steps });
        }

        position += velocity * dt + acceleration * (dt * dt / 2.0);
        velocity += acceleration * dt;
        time = steps as f64 * dt;

        if position.y < 0.0 {
            position.y = 0.0;
            velocity.y = -velocity.y * c;
            debug!(bounce = bounces.len() + 1, time, x = position.x, rebound = velocity.y, "bounce");
            bounces.push(BounceEvent { time, x: position.x, rebound_speed: velocity.y });
        }

        t.push(time);
        x.push(position.x);
        y.push(position.y);
    }

    trace!(steps, total_time = time, "bounce simulation finished");

    Ok(BounceTrajectory { t, x, y, bounces, total_time: time })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stops_after_requested_bounces() {
        let result = simulate_bounces(&BounceParams::default()).unwrap();
        assert_eq!(result.bounces.len(), 6);
        assert_eq!(result.total_time, *result.t.last().unwrap());
        assert_eq!(result.bounces.last().unwrap().time, result.total_time);
        assert_eq!(*result.y.last().unwrap(), 0.0);
    }

    #[test]
    fn test_first_flight_matches_closed_form() {
        let params = BounceParams::default();
        let launch = params.launch();
        let result = simulate_bounces(&params).unwrap();

        let first_bounce = result.bounces[0].time;
        let exact = launch.flight_time().unwrap();
        assert!(first_bounce >= exact && first_bounce - exact <= params.dt + 1e-12);

        // Verlet is exact under constant acceleration
        for i in 0..result.t.len() {
            if result.t[i] >= first_bounce {
                break;
            }
            let p = launch.position_at(result.t[i]);
            assert!((result.x[i] - p.x).abs() < 1e-9);
            assert!((result.y[i] - p.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_horizontal_velocity_constant() {
        let params = BounceParams::default();
        let (ux, _) = params.launch().components();
        let result = simulate_bounces(&params).unwrap();
        for (t, x) in result.t.iter().zip(&result.x) {
            assert!((x - ux * t).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rebound_speed_decays() {
        let result = simulate_bounces(&BounceParams { bounces: 4, ..Default::default() }).unwrap();
        for pair in result.bounces.windows(2) {
            assert!(pair[1].rebound_speed < pair[0].rebound_speed);
        }
        assert!(result.y.iter().all(|&y| y >= 0.0));
    }

    #[test]
    fn test_perfectly_inelastic_still_terminates() {
        let params = BounceParams { restitution: 0.0, bounces: 3, ..Default::default() };
        let result = simulate_bounces(&params).unwrap();
        assert_eq!(result.bounces.len(), 3);
        assert!(result.bounces.iter().all(|b| b.rebound_speed == 0.0));
    }

    #[test]
    fn test_launch_below_ground_bounces_immediately() {
        let params = BounceParams { height: -1.0, bounces: 3, ..Default::default() };
        let result = simulate_bounces(&params).unwrap();
        assert_eq!(result.bounces.len(), 3);
        assert_eq!(result.bounces[0].time, params.dt);
        assert!(result.y[1..].iter().all(|&y| y >= 0.0));
    }

    #[test]
    fn test_step_limit() {
        // The first bounce alone takes ~60 steps of 0.02 s
        let err = simulate_bounces_with_limit(&BounceParams::default(), 10).unwrap_err();
        assert!(matches!(err, ProjectileError::StepLimit { steps: 10 }));
        assert!(simulate_bounces_with_limit(&BounceParams { bounces: 1, ..Default::default() }, 1_000).is_ok());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(simulate_bounces(&BounceParams { dt: 0.0, ..Default::default() }).is_err());
        assert!(simulate_bounces(&BounceParams { restitution: 1.5, ..Default::default() }).is_err());
        assert!(simulate_bounces(&BounceParams { bounces: 0, ..Default::default() }).is_err());
        assert!(simulate_bounces(&BounceParams { speed: 0.0, ..Default::default() }).is_err());
    }
}
