//! Exact distance travelled along a drag-free trajectory.
//!
//! With `z = tanθ - g x (1 + tan²θ) / u²` the slope of the path at `x`, the arc
//! length from launch to `x` is
//!
//! ```text
//! L = u² / (g (1 + tan²θ)) [F(z₁) - F(z₂)],   F(z) = ½ asinh(z) + ½ z √(1 + z²)
//! ```
//!
//! where `z₁` is the launch slope and `z₂` the slope at `x`.

use tracing::debug;

use crate::analytical::AnalyticalTrajectory;
use crate::constants::{ROOT_FINDING_MAX_ITER, ROOT_FINDING_TOLERANCE};
use crate::error::Result;
use crate::launch::LaunchParams;
use crate::max_range::{max_range, MaxRangeSolution};
use crate::root_finding::{brent_root_find, central_difference};

fn antiderivative(z: f64) -> f64 {
    0.5 * z.asinh() + 0.5 * z * (1.0 + z * z).sqrt()
}

/// Path length from launch until the projectile lands.
pub fn arc_length(params: &LaunchParams) -> Result<f64> {
    let flight_time = params.flight_time()?;
    let (_, uy) = params.components();
    let g = params.gravity;

    if params.is_vertical() {
        // Up to the apogee and back down past the launch point
        return Ok(uy * uy / g + params.height);
    }

    let u = params.speed;
    let tan_theta = params.angle_rad().tan();
    let sec_sq = 1.0 + tan_theta * tan_theta;
    let range = params.components().0 * flight_time;

    let z1 = tan_theta;
    let z2 = tan_theta - g * range * sec_sq / (u * u);
    Ok(u * u / g / sec_sq * (antiderivative(z1) - antiderivative(z2)))
}

/// Arc lengths of the input trajectory and of the range-maximizing one.
#[derive(Debug, Clone)]
pub struct ArcLengthComparison {
    pub input: AnalyticalTrajectory,
    pub input_length: f64,
    pub optimum: MaxRangeSolution,
    pub optimum_length: f64,
}

pub fn compare_arc_lengths(params: &LaunchParams, samples: usize) -> Result<ArcLengthComparison> {
    let comparison = max_range(params, samples)?;
    let input_length = arc_length(params)?;
    let optimum_launch = comparison.optimum.launch(params.gravity, params.speed, params.height);
    let optimum_length = arc_length(&optimum_launch)?;

    Ok(ArcLengthComparison {
        input: comparison.input,
        input_length,
        optimum: comparison.optimum,
        optimum_length,
    })
}

/// Launch angle (degrees) and arc length of the longest path for a speed and height.
///
/// The maximum is located by bracketing a sign change of `dL/dθ` on a 1° grid
/// and refining it with Brent's method. If `L` is monotone the better end of
/// `[0°, 90°]` is returned.
pub fn max_arc_length_angle(gravity: f64, speed: f64, height: f64) -> Result<(f64, f64)> {
    let length_at = |angle_deg: f64| -> f64 {
        arc_length(&LaunchParams::new(angle_deg.clamp(0.0, 90.0), gravity, speed, height)).unwrap_or(f64::NAN)
    };
    // Surface invalid inputs before searching
    LaunchParams::new(45.0, gravity, speed, height).flight_time()?;

    let slope = |angle_deg: f64| central_difference(length_at, angle_deg);

    let mut previous = (0.5, slope(0.5));
    for step in 1..90 {
        let angle = step as f64 + 0.5;
        let current = (angle, slope(angle));
        if previous.1 > 0.0 && current.1 <= 0.0 {
            let result = brent_root_find(slope, previous.0, current.0, ROOT_FINDING_TOLERANCE, ROOT_FINDING_MAX_ITER)?;
            debug!(angle = result.root, iterations = result.iterations_used, "arc length maximum");
            return Ok((result.root, length_at(result.root)));
        }
        previous = current;
    }

    let (flat, steep) = (length_at(0.0), length_at(90.0));
    Ok(if flat >= steep { (0.0, flat) } else { (90.0, steep) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Trapezoid-rule arc length of the sampled trajectory.
    fn numeric_length(params: &LaunchParams, samples: usize) -> f64 {
        let t_end = params.flight_time().unwrap();
        (0..samples)
            .map(|i| {
                let t0 = t_end * i as f64 / samples as f64;
                let t1 = t_end * (i + 1) as f64 / samples as f64;
                (params.position_at(t1) - params.position_at(t0)).norm()
            })
            .sum()
    }

    #[test]
    fn test_matches_numeric_integration() {
        for params in [
            LaunchParams::new(60.0, 9.81, 10.0, 2.0),
            LaunchParams::new(30.0, 9.81, 20.0, 0.0),
            LaunchParams::new(10.0, 3.7, 8.0, 12.0),
        ] {
            assert_relative_eq!(arc_length(&params).unwrap(), numeric_length(&params, 20_000), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_ground_level_closed_form() {
        // h = 0: L = u²/g (sinθ + cos²θ ln((1 + sinθ)/cosθ))
        let params = LaunchParams::new(40.0, 9.81, 15.0, 0.0);
        let rad = params.angle_rad();
        let expected = 225.0 / 9.81 * (rad.sin() + rad.cos().powi(2) * ((1.0 + rad.sin()) / rad.cos()).ln());
        assert_relative_eq!(arc_length(&params).unwrap(), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_vertical_and_horizontal_limits() {
        let up = LaunchParams::new(90.0, 9.81, 9.81, 1.0);
        assert_relative_eq!(arc_length(&up).unwrap(), 9.81 + 1.0, epsilon = 1e-12);

        let flat = LaunchParams::new(0.0, 9.81, 10.0, 0.0);
        assert_eq!(arc_length(&flat).unwrap(), 0.0);
    }

    #[test]
    fn test_default_page() {
        let params = LaunchParams::new(60.0, 9.81, 10.0, 2.0);
        let comparison = compare_arc_lengths(&params, 100).unwrap();
        assert!(comparison.input_length > comparison.input.range);
        assert!(comparison.optimum_length > comparison.optimum.range);
    }

    #[test]
    fn test_longest_path_from_ground() {
        // Known result: θ ≈ 56.46° when launched from the ground
        let (angle, length) = max_arc_length_angle(9.81, 10.0, 0.0).unwrap();
        assert!((angle - 56.46).abs() < 0.02, "angle = {angle}");
        assert!(length > arc_length(&LaunchParams::new(45.0, 9.81, 10.0, 0.0)).unwrap());
        assert!(length > arc_length(&LaunchParams::new(65.0, 9.81, 10.0, 0.0)).unwrap());
    }
}
