//! Synthetic division by a monic quadratic `x^2 - u*x - v`.

use std::fmt::Display;

use itertools::Itertools;

use crate::{Poly, RealScalar};

/// The monic quadratic `x^2 - u*x - v`.
///
/// Note the signs: `x^2 + b*x + c` is `u = -b, v = -c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticFactor<T> {
    pub u: T,
    pub v: T,
}

impl<T: RealScalar> QuadraticFactor<T> {
    pub const fn new(u: T, v: T) -> Self {
        Self { u, v }
    }

    /// The factor `x^2 + b*x + c`
    pub fn from_monic(b: T, c: T) -> Self {
        Self::new(-b, -c)
    }

    pub fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite()
    }

    /// `u^2 + 4v`, negative when the roots form a complex conjugate pair
    pub fn discriminant(&self) -> T {
        self.u * self.u + T::from_const(4.0) * self.v
    }

    /// Coefficients of the factor as a polynomial, `[1, -u, -v]`
    #[must_use]
    pub fn to_poly(&self) -> Poly<T> {
        Poly::new(&[T::one(), -self.u, -self.v])
    }
}

impl<T: RealScalar> Default for QuadraticFactor<T> {
    /// `u = v = 1`, the customary starting guess
    fn default() -> Self {
        Self::new(T::one(), T::one())
    }
}

impl<T: RealScalar> Display for QuadraticFactor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x^2 - {}*x - {}", self.u, self.v)
    }
}

/// Divide `coeffs` (highest degree first) by `x^2 - u*x - v`.
///
/// Returns the raw sequence `b` of the same length as `coeffs`, computed as
/// `b[i] = coeffs[i] + u*b[i-1] + v*b[i-2]` with `b[-1] = b[-2] = 0`. The
/// first `len - 2` entries are the quotient, the last two encode the
/// remainder, which is `b[n-1]*(x - u) + b[n]`.
///
/// ```
/// use bairstow::{synthetic_division, QuadraticFactor};
///
/// // x^3 - 1 = (x + 1)(x^2 - x + 1) - 2
/// let b = synthetic_division(&[1.0, 0.0, 0.0, -1.0], QuadraticFactor::new(1.0, -1.0));
/// assert_eq!(b, vec![1.0, 1.0, 0.0, -2.0]);
/// ```
pub fn synthetic_division<T: RealScalar>(coeffs: &[T], factor: QuadraticFactor<T>) -> Vec<T> {
    let QuadraticFactor { u, v } = factor;
    // b[i-1] and b[i-2]
    let (mut b1, mut b2) = (T::zero(), T::zero());
    coeffs
        .iter()
        .map(|&a| {
            let b = a + u * b1 + v * b2;
            b2 = b1;
            b1 = b;
            b
        })
        .collect_vec()
}

impl<T: RealScalar> Poly<T> {
    /// Divide by a monic quadratic factor, returning the quotient and the
    /// remainder `[r1, r0]` such that
    /// `self(x) == quotient(x) * factor(x) + r1*x + r0`.
    ///
    /// Polynomials with fewer than 3 coefficients have an empty quotient and
    /// are their own remainder.
    #[must_use]
    pub fn div_quadratic(&self, factor: QuadraticFactor<T>) -> (Self, [T; 2]) {
        let n = self.len();
        if n < 3 {
            let mut rem = [T::zero(); 2];
            rem[2 - n..].copy_from_slice(self.as_slice());
            return (Self::new(&[]), rem);
        }
        let b = synthetic_division(self.as_slice(), factor);
        // b[n-1]*(x - u) + b[n]
        let r1 = b[n - 2];
        let r0 = b[n - 1] - factor.u * r1;
        (Self::new(&b[..n - 2]), [r1, r0])
    }
}

#[cfg(test)]
mod test {
    use super::{synthetic_division, QuadraticFactor};
    use crate::Poly64;

    #[test]
    fn raw_sequence() {
        // x^2 divided by x^2 - x, remainder x
        let b = synthetic_division(&[1.0, 0.0, 0.0], QuadraticFactor::new(1.0, 0.0));
        assert_eq!(b, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn exact_factor() {
        // (x^2 + 1)(x - 2) = x^3 - 2x^2 + x - 2
        let p: Poly64 = poly![1.0, -2.0, 1.0, -2.0];
        let (q, r) = p.div_quadratic(QuadraticFactor::from_monic(0.0, 1.0));
        assert_eq!(q, poly![1.0, -2.0]);
        assert_eq!(r, [0.0, 0.0]);
        let (_, r) = p.div_quadratic(QuadraticFactor::default());
        assert_ne!(r, [0.0, 0.0]);
    }

    #[test]
    fn identity_at_sample_points() {
        let p: Poly64 = poly![2.0, -3.0, 0.5, 4.0, -1.0, 7.0];
        for factor in [
            QuadraticFactor::new(1.0, 1.0),
            QuadraticFactor::new(-0.5, 2.0),
            QuadraticFactor::new(3.0, -4.0),
        ] {
            let (q, [r1, r0]) = p.div_quadratic(factor);
            assert_eq!(q.len(), p.len() - 2);
            let f = factor.to_poly();
            for x in [-2.0, -0.3, 0.0, 1.0, 2.5] {
                let lhs = p.eval(x);
                let rhs = q.eval(x) * f.eval(x) + r1 * x + r0;
                assert!((lhs - rhs).abs() < 1E-9, "{factor} @ {x}: {lhs} != {rhs}");
            }
        }
    }

    #[test]
    fn short_polynomials() {
        let (q, r) = Poly64::new(&[3.0, 4.0]).div_quadratic(QuadraticFactor::default());
        assert!(q.is_empty());
        assert_eq!(r, [3.0, 4.0]);
    }

    #[test]
    fn discriminant() {
        assert_eq!(QuadraticFactor::new(2.0, 1.0).discriminant(), 8.0);
        assert_eq!(QuadraticFactor::from_monic(0.0, 1.0).discriminant(), -4.0);
    }
}
