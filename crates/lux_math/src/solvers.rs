//! Closed-form polynomial root solvers.
//!
//! Coefficients are ordered from the constant term up, so `c[0] + c[1]x +
//! c[2]x² + ...`. Each solver writes real roots into the caller's buffer and
//! returns how many it found. The quadratic and cubic report a repeated root
//! once, and so does the quartic for a root at the shift point; a quartic that
//! splits into two quadratics sharing a root may list it twice. None of them
//! fail: a case with no real solution simply yields zero roots.
//!
//! Everything runs in `f64`; the torus quartic is too ill-conditioned for
//! `f32` coefficients.

use std::f64::consts::PI;

/// Magnitudes below this are treated as exactly zero.
pub const NEAR_ZERO: f64 = 1.0e-12;

#[inline]
fn is_zero(x: f64) -> bool {
    x > -NEAR_ZERO && x < NEAR_ZERO
}

/// Real cube root that keeps the sign of `x`.
#[inline]
pub fn cbrt(x: f64) -> f64 {
    if x > 0.0 {
        x.powf(1.0 / 3.0)
    } else if x < 0.0 {
        -(-x).powf(1.0 / 3.0)
    } else {
        0.0
    }
}

/// Solve `c[2]x² + c[1]x + c[0] = 0`.
pub fn solve_quadratic(c: &[f64; 3], s: &mut [f64; 2]) -> usize {
    if c[2] == 0.0 {
        return 0;
    }

    // normal form: x^2 + px + q = 0, using p/2
    let p = c[1] / (2.0 * c[2]);
    let q = c[0] / c[2];
    let d = p * p - q;

    if is_zero(d) {
        s[0] = -p;
        1
    } else if d < 0.0 {
        0
    } else {
        let sqrt_d = d.sqrt();
        s[0] = sqrt_d - p;
        s[1] = -sqrt_d - p;
        2
    }
}

/// Solve `c[3]x³ + c[2]x² + c[1]x + c[0] = 0` with Cardano's formula.
pub fn solve_cubic(c: &[f64; 4], s: &mut [f64; 3]) -> usize {
    if c[3] == 0.0 {
        return 0;
    }

    // normal form: x^3 + Ax^2 + Bx + C = 0
    let a = c[2] / c[3];
    let b = c[1] / c[3];
    let cc = c[0] / c[3];

    // substitute x = y - A/3 to eliminate the quadric term: y^3 + py + q = 0
    let sq_a = a * a;
    let p = 1.0 / 3.0 * (-1.0 / 3.0 * sq_a + b);
    let q = 1.0 / 2.0 * (2.0 / 27.0 * a * sq_a - 1.0 / 3.0 * a * b + cc);

    let cb_p = p * p * p;
    let d = q * q + cb_p;

    let num = if is_zero(d) {
        if is_zero(q) {
            // one triple solution
            s[0] = 0.0;
            1
        } else {
            // one single and one double solution
            let u = cbrt(-q);
            s[0] = 2.0 * u;
            s[1] = -u;
            2
        }
    } else if d < 0.0 {
        // casus irreducibilis: three real solutions
        let phi = 1.0 / 3.0 * (-q / (-cb_p).sqrt()).acos();
        let t = 2.0 * (-p).sqrt();

        s[0] = t * phi.cos();
        s[1] = -t * (phi + PI / 3.0).cos();
        s[2] = -t * (phi - PI / 3.0).cos();
        3
    } else {
        // one real solution
        let sqrt_d = d.sqrt();
        let u = cbrt(sqrt_d - q);
        let v = -cbrt(sqrt_d + q);

        s[0] = u + v;
        1
    };

    let sub = 1.0 / 3.0 * a;
    for root in s.iter_mut().take(num) {
        *root -= sub;
    }

    num
}

/// Solve `c[4]x⁴ + c[3]x³ + c[2]x² + c[1]x + c[0] = 0` via the resolvent cubic.
pub fn solve_quartic(c: &[f64; 5], s: &mut [f64; 4]) -> usize {
    if c[4] == 0.0 {
        return 0;
    }

    // normal form: x^4 + Ax^3 + Bx^2 + Cx + D = 0
    let a = c[3] / c[4];
    let b = c[2] / c[4];
    let cc = c[1] / c[4];
    let d = c[0] / c[4];

    // substitute x = y - A/4 to eliminate the cubic term:
    // y^4 + py^2 + qy + r = 0
    let sq_a = a * a;
    let p = -3.0 / 8.0 * sq_a + b;
    let q = 1.0 / 8.0 * sq_a * a - 1.0 / 2.0 * a * b + cc;
    let r = -3.0 / 256.0 * sq_a * sq_a + 1.0 / 16.0 * sq_a * b - 1.0 / 4.0 * a * cc + d;

    let mut num;
    if is_zero(r) {
        // no absolute term: y(y^3 + py + q) = 0
        let mut cubic_roots = [0.0; 3];
        num = solve_cubic(&[q, p, 0.0, 1.0], &mut cubic_roots);
        s[..num].copy_from_slice(&cubic_roots[..num]);
        if !cubic_roots[..num].iter().any(|&root| is_zero(root)) {
            s[num] = 0.0;
            num += 1;
        }
    } else {
        // solve the resolvent cubic and take the first (largest) root
        let mut cubic_roots = [0.0; 3];
        solve_cubic(
            &[1.0 / 2.0 * r * p - 1.0 / 8.0 * q * q, -r, -1.0 / 2.0 * p, 1.0],
            &mut cubic_roots,
        );
        let z = cubic_roots[0];

        // build two quadric equations
        let mut u = z * z - r;
        let mut v = 2.0 * z - p;

        if is_zero(u) {
            u = 0.0;
        } else if u > 0.0 {
            u = u.sqrt();
        } else {
            return 0;
        }

        if is_zero(v) {
            v = 0.0;
        } else if v > 0.0 {
            v = v.sqrt();
        } else {
            return 0;
        }

        let mut first = [0.0; 2];
        let mut second = [0.0; 2];
        let n1 = solve_quadratic(&[z - u, if q < 0.0 { -v } else { v }, 1.0], &mut first);
        let n2 = solve_quadratic(&[z + u, if q < 0.0 { v } else { -v }, 1.0], &mut second);

        s[..n1].copy_from_slice(&first[..n1]);
        s[n1..n1 + n2].copy_from_slice(&second[..n2]);
        num = n1 + n2;
    }

    let sub = 1.0 / 4.0 * a;
    for root in s.iter_mut().take(num) {
        *root -= sub;
    }

    num
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    /// Sort the reported roots and compare them with the expected set.
    fn assert_roots(found: &[f64], expected: &[f64]) {
        let mut found = found.to_vec();
        found.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(found.len(), expected.len(), "roots: {found:?}");
        for (f, e) in found.iter().zip(expected) {
            assert!((f - e).abs() < TOLERANCE, "expected {e}, got {f} in {found:?}");
        }
    }

    #[test]
    fn test_cbrt_keeps_sign() {
        assert!((cbrt(27.0) - 3.0).abs() < TOLERANCE);
        assert!((cbrt(-8.0) + 2.0).abs() < TOLERANCE);
        assert_eq!(cbrt(0.0), 0.0);
    }

    #[test]
    fn test_quadratic_two_roots() {
        // (x - 1)(x - 2)
        let mut s = [0.0; 2];
        let n = solve_quadratic(&[2.0, -3.0, 1.0], &mut s);
        assert_roots(&s[..n], &[1.0, 2.0]);
    }

    #[test]
    fn test_quadratic_double_and_no_root() {
        let mut s = [0.0; 2];
        // (x - 1)^2
        let n = solve_quadratic(&[1.0, -2.0, 1.0], &mut s);
        assert_roots(&s[..n], &[1.0]);

        // x^2 + 1
        assert_eq!(solve_quadratic(&[1.0, 0.0, 1.0], &mut s), 0);
    }

    #[test]
    fn test_cubic_three_real_roots() {
        // (x - 1)(x - 2)(x - 3)
        let mut s = [0.0; 3];
        let n = solve_cubic(&[-6.0, 11.0, -6.0, 1.0], &mut s);
        assert_roots(&s[..n], &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_cubic_triple_root() {
        // (x - 1)^3
        let mut s = [0.0; 3];
        let n = solve_cubic(&[-1.0, 3.0, -3.0, 1.0], &mut s);
        assert_roots(&s[..n], &[1.0]);
    }

    #[test]
    fn test_cubic_double_and_single_root() {
        // (x - 1)^2 (x - 2)
        let mut s = [0.0; 3];
        let n = solve_cubic(&[-2.0, 5.0, -4.0, 1.0], &mut s);
        assert_roots(&s[..n], &[1.0, 2.0]);
    }

    #[test]
    fn test_cubic_one_real_root() {
        // x^3 - 1 = (x - 1)(x^2 + x + 1)
        let mut s = [0.0; 3];
        let n = solve_cubic(&[-1.0, 0.0, 0.0, 1.0], &mut s);
        assert_roots(&s[..n], &[1.0]);
    }

    #[test]
    fn test_quartic_four_roots() {
        // (x - 1)(x - 2)(x - 3)(x - 4)
        let mut s = [0.0; 4];
        let n = solve_quartic(&[24.0, -50.0, 35.0, -10.0, 1.0], &mut s);
        assert_roots(&s[..n], &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_quartic_symmetric_roots() {
        // (x^2 - 1)(x^2 - 4)
        let mut s = [0.0; 4];
        let n = solve_quartic(&[4.0, 0.0, -5.0, 0.0, 1.0], &mut s);
        assert_roots(&s[..n], &[-2.0, -1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_quartic_without_absolute_term() {
        // x (x + 2)(x - 1)^2 = x^4 - 3x^2 + 2x
        let mut s = [0.0; 4];
        let n = solve_quartic(&[0.0, 2.0, -3.0, 0.0, 1.0], &mut s);
        assert_roots(&s[..n], &[-2.0, 0.0, 1.0]);
    }

    #[test]
    fn test_quartic_quadruple_root_reported_once() {
        // x^4
        let mut s = [0.0; 4];
        let n = solve_quartic(&[0.0, 0.0, 0.0, 0.0, 1.0], &mut s);
        assert_roots(&s[..n], &[0.0]);

        // (x - 1)^4 shifts to y^4 = 0
        let n = solve_quartic(&[1.0, -4.0, 6.0, -4.0, 1.0], &mut s);
        assert_roots(&s[..n], &[1.0]);
    }

    #[test]
    fn test_quartic_cubic_factor_through_zero() {
        // x^2 (x^2 - 4) = x^4 - 4x^2
        let mut s = [0.0; 4];
        let n = solve_quartic(&[0.0, 0.0, -4.0, 0.0, 1.0], &mut s);
        assert_roots(&s[..n], &[-2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_quartic_no_real_roots() {
        // x^4 + 1
        let mut s = [0.0; 4];
        assert_eq!(solve_quartic(&[1.0, 0.0, 0.0, 0.0, 1.0], &mut s), 0);
    }

    #[test]
    fn test_degenerate_leading_coefficient() {
        let mut s = [0.0; 4];
        assert_eq!(solve_quartic(&[1.0, 1.0, 1.0, 1.0, 0.0], &mut s), 0);
    }
}
