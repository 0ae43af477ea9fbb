//! Default inputs for every page, loadable from JSON.
//!
//! A presets file only needs the values it changes:
//!
//! ```json
//! { "task4": { "speed": 12.0 }, "task9": { "mass": 0.25 } }
//! ```
//!
//! Missing pages and missing fields keep that page's own defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bounce::BounceParams;
use crate::constants::{DEFAULT_GRAVITY_MPS2, GRAPH_SAMPLES};
use crate::drag::DragParams;
use crate::error::{ProjectileError, Result};
use crate::launch::LaunchParams;
use crate::range_time::RangeTimeParams;
use crate::sweep::SweepParams;
use crate::target::TargetParams;

/// Launch parameters plus the fixed time increment of the stepped model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedStepParams {
    pub angle_deg: f64,
    pub gravity: f64,
    pub speed: f64,
    pub height: f64,
    pub dt: f64,
}

impl Default for FixedStepParams {
    fn default() -> Self {
        Self {
            angle_deg: 45.0,
            gravity: DEFAULT_GRAVITY_MPS2,
            speed: 20.0,
            height: 2.0,
            dt: 0.05,
        }
    }
}

impl FixedStepParams {
    pub fn launch(&self) -> LaunchParams {
        LaunchParams::new(self.angle_deg, self.gravity, self.speed, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    pub task1: FixedStepParams,
    pub task2: LaunchParams,
    pub task3: TargetParams,
    pub task4: LaunchParams,
    pub task5: TargetParams,
    pub task6: LaunchParams,
    pub task7: RangeTimeParams,
    pub task8: BounceParams,
    pub task9: DragParams,
    pub sweep: SweepParams,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            task1: FixedStepParams::default(),
            task2: LaunchParams::default(),
            task3: TargetParams::default(),
            task4: LaunchParams::new(60.0, DEFAULT_GRAVITY_MPS2, 10.0, 2.0),
            task5: TargetParams {
                target_x: 15.0,
                target_y: 15.0,
                ..TargetParams::default()
            },
            task6: LaunchParams::new(60.0, DEFAULT_GRAVITY_MPS2, 10.0, 2.0),
            task7: RangeTimeParams::default(),
            task8: BounceParams::default(),
            task9: DragParams::default(),
            sweep: SweepParams::default(),
        }
    }
}

impl Presets {
    /// Overlay a partial JSON document on the defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Presets::default())?;
        merge(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Rendering options shared by every page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Samples per analytical curve
    pub graph_samples: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { graph_samples: GRAPH_SAMPLES }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.graph_samples == 0 {
            return Err(ProjectileError::invalid("graph samples", 0.0, "must be at least 1"));
        }
        Ok(())
    }
}
