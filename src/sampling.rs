//! Sample-array helpers used to turn models into plottable curves.

use crate::constants::MAX_INTEGRATION_STEPS;
use crate::error::{ensure_finite, ensure_positive, ProjectileError, Result};

/// `n` evenly spaced samples from `start` to `end`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last sample so the curve ends exactly on the landing point
            values[n - 1] = end;
            values
        }
    }
}

/// Samples `start, start + step, ...` strictly below `end`.
///
/// Fails with [`ProjectileError::StepLimit`] rather than allocate more than
/// [`MAX_INTEGRATION_STEPS`] samples.
pub fn arange(start: f64, end: f64, step: f64) -> Result<Vec<f64>> {
    ensure_finite("start", start)?;
    ensure_finite("end", end)?;
    ensure_positive("time step", step)?;

    if end <= start {
        return Ok(Vec::new());
    }

    let span = ((end - start) / step).ceil();
    if !span.is_finite() || span > MAX_INTEGRATION_STEPS as f64 {
        return Err(ProjectileError::StepLimit { steps: MAX_INTEGRATION_STEPS });
    }

    // Multiply rather than accumulate so rounding error does not drift
    let count = span as usize;
    Ok((0..count)
        .map(|i| start + step * i as f64)
        .take_while(|&v| v < end)
        .collect())
}

/// Fraction of the way from `a` to `b` at which a linear segment crosses zero.
///
/// Returns `None` when both ends are on the same side.
pub fn zero_crossing_fraction(a: f64, b: f64) -> Option<f64> {
    if a == b || (a.signum() == b.signum() && a != 0.0 && b != 0.0) {
        return None;
    }
    Some(a / (a - b))
}

/// Index of the largest value, first one wins on ties.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
