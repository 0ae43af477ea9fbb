//! Exact trajectory `y(x)` evaluated on an evenly spaced `x` grid.

use crate::error::Result;
use crate::launch::LaunchParams;
use crate::sampling::linspace;

#[derive(Debug, Clone)]
pub struct AnalyticalTrajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub apogee: (f64, f64),
    pub range: f64,
    pub flight_time: f64,
}

/// Sample `y(x)` at `samples` points between launch and the landing point.
pub fn analytical(params: &LaunchParams, samples: usize) -> Result<AnalyticalTrajectory> {
    let flight_time = params.flight_time()?;
    let range = params.range()?;
    let apogee = params.apogee()?;

    let (x, y) = if params.is_vertical() {
        // Straight up and back down the y axis
        vertical_path(params, flight_time, samples)
    } else {
        let x = linspace(0.0, range, samples);
        let y = x
            .iter()
            .map(|&xi| params.height_at_x(xi))
            .collect::<Result<Vec<f64>>>()?;
        (x, y)
    };

    Ok(AnalyticalTrajectory { x, y, apogee, range, flight_time })
}

fn vertical_path(params: &LaunchParams, flight_time: f64, samples: usize) -> (Vec<f64>, Vec<f64>) {
    linspace(0.0, flight_time, samples)
        .into_iter()
        .map(|t| {
            let p = params.position_at(t);
            (p.x, p.y)
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAPH_SAMPLES;

    #[test]
    fn test_default_page_values() {
        let result = analytical(&LaunchParams::default(), GRAPH_SAMPLES).unwrap();
        assert_eq!(result.x.len(), GRAPH_SAMPLES);
        assert!((result.range - 42.685).abs() < 1e-3);
        assert!((result.flight_time - 3.018).abs() < 1e-3);
        assert!((result.apogee.0 - 20.387).abs() < 1e-3);
        assert!((result.apogee.1 - 12.194).abs() < 1e-3);
    }

    #[test]
    fn test_endpoints() {
        let params = LaunchParams::new(30.0, 9.81, 15.0, 3.0);
        let result = analytical(&params, 50).unwrap();
        assert_eq!(result.x[0], 0.0);
        assert_eq!(result.y[0], 3.0);
        assert_eq!(*result.x.last().unwrap(), result.range);
        assert!(result.y.last().unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_apogee_is_highest_sample() {
        let params = LaunchParams::new(50.0, 9.81, 12.0, 1.0);
        let result = analytical(&params, 1000).unwrap();
        let max_y = result.y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!(max_y <= result.apogee.1 + 1e-12);
        assert!(result.apogee.1 - max_y < 1e-3);
    }

    #[test]
    fn test_vertical_launch_stays_on_axis() {
        let params = LaunchParams::new(90.0, 9.81, 10.0, 0.0);
        let result = analytical(&params, 20).unwrap();
        assert!(result.x.iter().all(|&x| x == 0.0));
        assert_eq!(result.range, 0.0);
    }
}
