//! Range, flight time and path length across a grid of launch angles.
//!
//! Each angle is independent, so the grid is evaluated on the rayon pool. The
//! best grid angles give a brute-force check of the closed-form optimum.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arc_length::arc_length;
use crate::constants::DEFAULT_GRAVITY_MPS2;
use crate::error::{ensure_finite, ensure_positive, ProjectileError, Result};
use crate::launch::LaunchParams;
use crate::sampling::{argmax, linspace};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepParams {
    pub gravity: f64,
    pub speed: f64,
    pub height: f64,
    pub start_deg: f64,
    pub end_deg: f64,
    /// Number of angles in the grid, both ends included
    pub steps: usize,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY_MPS2,
            speed: 10.0,
            height: 2.0,
            start_deg: 0.0,
            end_deg: 90.0,
            steps: 901,
        }
    }
}

impl SweepParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("gravity", self.gravity)?;
        ensure_positive("launch speed", self.speed)?;
        ensure_finite("launch height", self.height)?;
        LaunchParams::new(self.start_deg, self.gravity, self.speed, self.height).validate()?;
        LaunchParams::new(self.end_deg, self.gravity, self.speed, self.height).validate()?;
        if self.end_deg < self.start_deg {
            return Err(ProjectileError::invalid("end angle", self.end_deg, "must not be below the start angle"));
        }
        if self.steps < 2 {
            return Err(ProjectileError::invalid("sweep steps", self.steps as f64, "must be at least 2"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub angle_deg: f64,
    pub range: f64,
    pub flight_time: f64,
    pub arc_length: f64,
    pub apogee_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AngleSweep {
    pub rows: Vec<SweepRow>,
    pub best_range: SweepRow,
    pub best_arc_length: SweepRow,
}

fn evaluate(params: &SweepParams, angle_deg: f64) -> Result<SweepRow> {
    let launch = LaunchParams::new(angle_deg, params.gravity, params.speed, params.height);
    Ok(SweepRow {
        angle_deg,
        range: launch.range()?,
        flight_time: launch.flight_time()?,
        arc_length: arc_length(&launch)?,
        apogee_height: launch.apogee()?.1,
    })
}

pub fn sweep_angles(params: &SweepParams) -> Result<AngleSweep> {
    params.validate()?;

    let angles = linspace(params.start_deg, params.end_deg, params.steps);
    let rows: Vec<SweepRow> = angles
        .into_par_iter()
        .map(|angle| evaluate(params, angle))
        .collect::<Result<_>>()?;

    let ranges: Vec<f64> = rows.iter().map(|r| r.range).collect();
    let lengths: Vec<f64> = rows.iter().map(|r| r.arc_length).collect();
    // steps >= 2, so neither is empty
    let best_range = rows[argmax(&ranges).unwrap_or(0)];
    let best_arc_length = rows[argmax(&lengths).unwrap_or(0)];

    debug!(
        angles = rows.len(),
        best_range_angle = best_range.angle_deg,
        best_arc_length_angle = best_arc_length.angle_deg,
        "angle sweep finished"
    );

    Ok(AngleSweep { rows, best_range, best_arc_length })
}
