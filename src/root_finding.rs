use crate::error::{ProjectileError, Result};

/// Result of a bracketed root solve
#[derive(Debug, Clone, Copy)]
pub struct RootResult {
    pub root: f64,
    pub iterations_used: usize,
    pub final_error: f64,
    pub converged: bool,
}

/// Brent's method for root finding on a bracketing interval `[a, b]`
pub fn brent_root_find<F>(
    f: F,
    mut a: f64,
    mut b: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<RootResult>
where
    F: Fn(f64) -> f64,
{
    let mut fa = f(a);
    let mut fb = f(b);
    let mut iterations = 0;

    if fa * fb > 0.0 {
        return Err(ProjectileError::RootNotBracketed { a, fa, b, fb });
    }

    // Ensure |f(a)| >= |f(b)|
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    while iterations < max_iterations {
        iterations += 1;

        if fb.abs() < tolerance {
            return Ok(RootResult {
                root: b,
                iterations_used: iterations,
                final_error: fb.abs(),
                converged: true,
            });
        }

        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tolerance_scaled = 2.0 * f64::EPSILON * b.abs() + 0.5 * tolerance;
        let m = 0.5 * (c - b);

        if m.abs() <= tolerance_scaled {
            return Ok(RootResult {
                root: b,
                iterations_used: iterations,
                final_error: fb.abs(),
                converged: true,
            });
        }

        if e.abs() >= tolerance_scaled && fa.abs() > fb.abs() {
            let s = fb / fa;
            let mut p;
            let mut q;

            if (a - c).abs() < f64::EPSILON {
                // Secant step
                p = 2.0 * m * s;
                q = 1.0 - s;
            } else {
                // Inverse quadratic interpolation
                let qa = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * m * qa * (qa - r) - (b - a) * (r - 1.0));
                q = (qa - 1.0) * (r - 1.0) * (s - 1.0);
            }

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            let previous_e = e;
            e = d;

            if 2.0 * p < 3.0 * m * q - (tolerance_scaled * q).abs() && p < (0.5 * previous_e * q).abs() {
                d = p / q;
            } else {
                d = m;
                e = m;
            }
        } else {
            // Bisection
            d = m;
            e = m;
        }

        a = b;
        fa = fb;

        if d.abs() > tolerance_scaled {
            b += d;
        } else if m > 0.0 {
            b += tolerance_scaled;
        } else {
            b -= tolerance_scaled;
        }

        fb = f(b);

        if (fc * fb) > 0.0 {
            c = a;
            fc = fa;
            e = b - a;
            d = e;
        }
    }

    Ok(RootResult {
        root: b,
        iterations_used: iterations,
        final_error: fb.abs(),
        converged: fb.abs() < tolerance * 10.0,
    })
}

/// Central difference derivative with a step scaled to `x`
pub fn central_difference<F>(f: F, x: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let step = 1e-6 * x.abs().max(1.0);
    (f(x + step) - f(x - step)) / (2.0 * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brent_root_find_quadratic() {
        // x^2 - 4 = 0, root at x = 2
        let f = |x: f64| x * x - 4.0;
        let result = brent_root_find(f, 1.0, 3.0, 1e-10, 100).unwrap();

        assert!(result.converged);
        assert!((result.root - 2.0).abs() < 1e-8);
        assert!(result.iterations_used > 0);
    }

    #[test]
    fn test_brent_root_find_linear() {
        let f = |x: f64| 2.0 * x - 6.0;
        let result = brent_root_find(f, 0.0, 5.0, 1e-10, 100).unwrap();

        assert!(result.converged);
        assert!((result.root - 3.0).abs() < 1e-8);
    }

    #[test]
    fn test_brent_root_find_transcendental() {
        // cos(x) = x near 0.739085
        let f = |x: f64| x.cos() - x;
        let result = brent_root_find(f, 0.0, 1.0, 1e-12, 100).unwrap();
        assert!((result.root - 0.739_085_133_215_160_6).abs() < 1e-9);
    }

    #[test]
    fn test_brent_root_find_no_bracket() {
        let f = |x: f64| x * x + 1.0;
        let result = brent_root_find(f, 1.0, 3.0, 1e-6, 100);

        assert!(matches!(result, Err(ProjectileError::RootNotBracketed { .. })));
    }

    #[test]
    fn test_central_difference() {
        let d = central_difference(|x| x.powi(3), 2.0);
        assert!((d - 12.0).abs() < 1e-5);
    }
}
