//! # Projectile Engine
//!
//! Closed-form and numerically integrated models of projectile motion, each
//! turned into plot-ready charts and headline values.

// Re-export the main types and functions
pub use analytical::{analytical, AnalyticalTrajectory};
pub use arc_length::{arc_length, compare_arc_lengths, max_arc_length_angle, ArcLengthComparison};
pub use bounce::{simulate_bounces, BounceEvent, BounceParams, BounceTrajectory};
pub use chart::{Chart, LineDash, Series, SeriesKind};
pub use drag::{compare_with_drag_free, integrate_with_drag, DragComparison, DragParams, MotionHistory};
pub use error::{ProjectileError, Result};
pub use launch::LaunchParams;
pub use max_range::{max_range, optimum_angle, optimum_launch, MaxRangeSolution, RangeComparison};
pub use pages::{render, render_all, CalculatedValue, Report, Task};
pub use presets::{FixedStepParams, Presets, ReportConfig};
pub use range_time::{range_time_family, saddle_point, stationary_points, RangeTimeParams, StationaryKind};
pub use sweep::{sweep_angles, AngleSweep, SweepParams, SweepRow};
pub use target::{bounding_parabola, hit_target, minimum_speed, Extent, TargetParams, TargetSolution};
pub use time_stepped::{time_stepped, TimeSteppedTrajectory};

// Module declarations
pub mod constants;
mod error;
pub mod launch;
pub mod sampling;
pub mod chart;
pub mod root_finding;
pub mod time_stepped;
pub mod analytical;
pub mod target;
pub mod max_range;
pub mod arc_length;
pub mod range_time;
pub mod bounce;
pub mod drag;
pub mod sweep;
pub mod presets;
pub mod pages;

#[cfg(feature = "wasm")]
pub mod wasm;
