/// Physical and numerical constants used by the projectile models

/// Default strength of gravity in m/s² (not standard gravity, 9.80665)
pub const DEFAULT_GRAVITY_MPS2: f64 = 9.81;

/// Number of samples used for every analytically generated curve
pub const GRAPH_SAMPLES: usize = 100;

/// Launch angles (degrees) plotted on the range-versus-time page
///
/// 70.5° sits just below the critical angle, so the family shows curves on
/// both sides of the transition to a local maximum/minimum pair.
pub const RANGE_TIME_ANGLES_DEG: [f64; 6] = [30.0, 45.0, 60.0, 70.5, 78.0, 85.0];

/// sin²θ above which r(t) develops a local maximum and minimum
pub const RANGE_TIME_CRITICAL_SIN_SQ: f64 = 8.0 / 9.0;

/// Upper bound on integrator steps before a run is abandoned
pub const MAX_INTEGRATION_STEPS: usize = 10_000_000;

// Numerical stability constants
/// General numerical tolerance for floating point comparisons
pub const NUMERICAL_TOLERANCE: f64 = 1e-9;

/// Tolerance for root finding algorithms
pub const ROOT_FINDING_TOLERANCE: f64 = 1e-10;

/// Iteration cap for root finding algorithms
pub const ROOT_FINDING_MAX_ITER: usize = 100;
