use crate::{synthetic_division, Error, Poly, QuadraticFactor, RealScalar};

use super::{DEFAULT_EPSILON, DEFAULT_MAX_ITER};

/// How a single Bairstow iteration ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    /// Both remainder terms are within epsilon
    Converged,

    /// Reached `max_iter`, the last iterate is returned
    MaxIter,

    /// The Jacobian determinant vanished or an update was not finite, the
    /// last finite iterate is returned
    Degenerate,
}

/// Result of refining one quadratic factor.
#[derive(Clone, Debug, PartialEq)]
pub struct Refinement<T: RealScalar> {
    /// The refined `x^2 - u*x - v`
    pub factor: QuadraticFactor<T>,

    /// The dividend divided by `factor`, with the remainder dropped
    pub quotient: Poly<T>,

    /// The last two terms of the raw synthetic division, which is what
    /// convergence is measured on
    pub remainder: [T; 2],

    /// Number of updates applied to the initial guess
    pub iterations: usize,

    pub status: Convergence,
}

impl<T: RealScalar> Refinement<T> {
    pub fn converged(&self) -> bool {
        self.status == Convergence::Converged
    }
}

/// Refine `guess` into a quadratic factor of `poly` with Bairstow's method.
///
/// Each step divides `poly` by the current factor, divides the quotient once
/// more to get the partial derivatives of the remainder, and solves the
/// resulting 2x2 Newton system in closed form. Iteration stops when both
/// remainder terms are at most `epsilon` (default `1E-12`), or after
/// `max_iter` (default 50) updates.
///
/// Not converging is not an error: the best known factor is returned with
/// [`Convergence::MaxIter`]. If the Newton system becomes singular, or an
/// update overflows, the last finite factor is returned with
/// [`Convergence::Degenerate`].
///
/// ```
/// use bairstow::{poly, roots::bairstow, Poly64, QuadraticFactor};
///
/// // (x^2 + 1)(x - 2)
/// let p: Poly64 = poly![1.0, -2.0, 1.0, -2.0];
/// let r = bairstow(&p, QuadraticFactor::default(), None, None).unwrap();
/// assert!(r.converged());
/// assert!((r.factor.u - 0.0).abs() < 1E-9 && (r.factor.v + 1.0).abs() < 1E-9);
/// assert_eq!(r.quotient.len(), 2);
/// ```
///
/// # Errors
/// - the polynomial is malformed, see [`Poly::validate`]
/// - [`Error::DegreeTooLow`] if `poly` is not at least a cubic
pub fn bairstow<T: RealScalar>(
    poly: &Poly<T>,
    guess: QuadraticFactor<T>,
    epsilon: Option<T>,
    max_iter: Option<usize>,
) -> crate::Result<Refinement<T>> {
    poly.validate()?;
    if poly.degree() < 3 {
        return Err(Error::DegreeTooLow {
            degree: poly.degree(),
        });
    }
    let epsilon = epsilon.unwrap_or_else(|| T::from_const(DEFAULT_EPSILON));
    let max_iter = max_iter.unwrap_or(DEFAULT_MAX_ITER);

    let a = poly.as_slice();
    let n = poly.degree();
    let mut factor = guess;
    let mut b = synthetic_division(a, factor);
    let mut iterations = 0;

    let status = if factor.is_finite() && all_finite(&b) {
        loop {
            if b[n].abs() <= epsilon && b[n - 1].abs() <= epsilon {
                break Convergence::Converged;
            }
            if iterations >= max_iter {
                break Convergence::MaxIter;
            }

            // dividing the quotient again gives the partial derivatives of
            // the remainder with respect to u and v
            let c = synthetic_division(&b[..n], factor);
            let denom = c[n - 2] * c[n - 2] - c[n - 1] * c[n - 3];
            if denom.is_zero() || !denom.is_finite() {
                log::trace!("singular jacobian {{factor: {factor}, denom: {denom}}}");
                break Convergence::Degenerate;
            }
            let du = (b[n] * c[n - 3] - b[n - 1] * c[n - 2]) / denom;
            let dv = (b[n - 1] * c[n - 1] - b[n] * c[n - 2]) / denom;

            let next = QuadraticFactor::new(factor.u + du, factor.v + dv);
            let b_next = synthetic_division(a, next);
            if !next.is_finite() || !all_finite(&b_next) {
                log::trace!("non-finite update {{factor: {factor}, du: {du}, dv: {dv}}}");
                break Convergence::Degenerate;
            }

            factor = next;
            b = b_next;
            iterations += 1;
            log::trace!(
                "{{iteration: {iterations}, u: {}, v: {}, remainder: [{}, {}]}}",
                factor.u,
                factor.v,
                b[n - 1],
                b[n]
            );
        }
    } else {
        Convergence::Degenerate
    };

    Ok(Refinement {
        factor,
        quotient: Poly::new(&b[..n - 1]),
        remainder: [b[n - 1], b[n]],
        iterations,
        status,
    })
}

/// Only the number of iterations [`bairstow`] takes from `guess`.
///
/// Useful for mapping how the starting guess affects convergence, e.g. by
/// sweeping a grid of `(u, v)` values.
///
/// # Errors
/// Same as [`bairstow`].
pub fn bairstow_iterations<T: RealScalar>(
    poly: &Poly<T>,
    guess: QuadraticFactor<T>,
    epsilon: Option<T>,
    max_iter: Option<usize>,
) -> crate::Result<usize> {
    bairstow(poly, guess, epsilon, max_iter).map(|r| r.iterations)
}

fn all_finite<T: RealScalar>(v: &[T]) -> bool {
    v.iter().all(|x| x.is_finite())
}

#[cfg(test)]
mod test {
    use super::{bairstow, bairstow_iterations, Convergence};
    use crate::{Error, Poly64, QuadraticFactor};

    #[test]
    fn exact_guess_needs_no_iterations() {
        // (x^2 - x - 1)(x + 3)
        let p: Poly64 = poly![1.0, 2.0, -4.0, -3.0];
        let r = bairstow(&p, QuadraticFactor::new(1.0, 1.0), None, None).unwrap();
        assert_eq!(r.status, Convergence::Converged);
        assert_eq!(r.iterations, 0);
        assert_eq!(r.quotient, poly![1.0, 3.0]);
        assert_eq!(r.remainder, [0.0, 0.0]);
    }

    #[test]
    fn cubic_unity() {
        let p: Poly64 = poly![1.0, 0.0, 0.0, -1.0];
        let r = bairstow(&p, QuadraticFactor::default(), None, None).unwrap();
        assert!(r.converged(), "{r:?}");
        assert!(r.iterations > 0);
        // the only real quadratic factor is x^2 + x + 1
        assert!((r.factor.u + 1.0).abs() < 1E-9, "{}", r.factor);
        assert!((r.factor.v + 1.0).abs() < 1E-9, "{}", r.factor);
        assert!((r.quotient.as_slice()[1] + 1.0).abs() < 1E-9);
    }

    #[test]
    fn remainder_within_epsilon() {
        let p: Poly64 = poly![1.0, -8.0, -72.0, 382.0, 727.0, -2310.0];
        let r = bairstow(&p, QuadraticFactor::default(), Some(1E-10), None).unwrap();
        assert!(r.converged());
        assert!(r.remainder[0].abs() <= 1E-10);
        assert!(r.remainder[1].abs() <= 1E-10);
        assert_eq!(r.quotient.len(), p.len() - 2);
    }

    #[test]
    fn max_iter_keeps_last_iterate() {
        let p: Poly64 = poly![1.0, 0.0, 0.0, 0.0, 15.0, 0.0, 0.0, 0.0, -16.0];
        let r = bairstow(&p, QuadraticFactor::default(), None, Some(1)).unwrap();
        assert_eq!(r.status, Convergence::MaxIter);
        assert_eq!(r.iterations, 1);
        assert!(r.factor.is_finite());
        assert_eq!(r.quotient.len(), p.len() - 2);
    }

    #[test]
    fn degenerate_jacobian() {
        // at u = v = 0 the derivative terms of x^3 + 1 vanish
        let p: Poly64 = poly![1.0, 0.0, 0.0, 1.0];
        let r = bairstow(&p, QuadraticFactor::new(0.0, 0.0), None, None).unwrap();
        assert_eq!(r.status, Convergence::Degenerate);
        assert_eq!(r.iterations, 0);
        assert_eq!(r.factor, QuadraticFactor::new(0.0, 0.0));
    }

    #[test]
    fn non_finite_guess() {
        let p: Poly64 = poly![1.0, 0.0, 0.0, 1.0];
        let r = bairstow(&p, QuadraticFactor::new(f64::NAN, 1.0), None, None).unwrap();
        assert_eq!(r.status, Convergence::Degenerate);
    }

    #[test]
    fn rejects_low_degree() {
        let p: Poly64 = poly![1.0, 0.0, 1.0];
        assert_eq!(
            bairstow(&p, QuadraticFactor::default(), None, None),
            Err(Error::DegreeTooLow { degree: 2 })
        );
        let p = Poly64::new(&[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(
            bairstow_iterations(&p, QuadraticFactor::default(), None, None),
            Err(Error::ZeroLeadingCoefficient)
        );
    }

    #[test]
    fn iteration_count_matches() {
        let p: Poly64 = poly![1.0, -1.0, 2.0, 5.0];
        let guess = QuadraticFactor::new(0.5, -2.0);
        let r = bairstow(&p, guess, None, None).unwrap();
        assert_eq!(bairstow_iterations(&p, guess, None, None), Ok(r.iterations));
    }
}
