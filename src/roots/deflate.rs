//! Finding all roots by peeling off one quadratic factor at a time.

use itertools::Itertools;
use num::Complex;

use crate::{Error, Poly, QuadraticFactor, RealScalar};

use super::{
    bairstow, linear, quadratic, Convergence, Refinement, Root, RootList, DEFAULT_EPSILON,
    DEFAULT_MAX_ITER, DEFAULT_RESIDUAL_TOLERANCE,
};

/// Finds all roots of a polynomial by repeated Bairstow deflation.
///
/// ```
/// use bairstow::{poly, BairstowFinder, QuadraticFactor};
///
/// let solution = BairstowFinder::from_poly(poly![2.0, -2.0, 4.0, 10.0])
///     .with_epsilon(1E-10)
///     .with_max_iter(100)
///     .with_initial_guess(QuadraticFactor::new(1.0, 1.0))
///     .solve()
///     .unwrap();
/// assert_eq!(solution.roots.len(), 3);
/// assert!(solution.converged());
/// assert!(solution.within_tolerance());
/// ```
#[derive(Clone, Debug)]
pub struct BairstowFinder<T: RealScalar> {
    poly: Poly<T>,
    epsilon: T,
    max_iter: usize,
    initial_guess: QuadraticFactor<T>,
    restart_guesses: Vec<QuadraticFactor<T>>,
    residual_tolerance: T,
}

impl<T: RealScalar> BairstowFinder<T> {
    pub fn from_poly(poly: Poly<T>) -> Self {
        Self {
            poly,
            epsilon: T::from_const(DEFAULT_EPSILON),
            max_iter: DEFAULT_MAX_ITER,
            initial_guess: QuadraticFactor::default(),
            restart_guesses: vec![],
            residual_tolerance: T::from_const(DEFAULT_RESIDUAL_TOLERANCE),
        }
    }

    /// Remainder terms below this count as zero
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Iteration cap for each deflation round
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Starting factor for every round, `x^2 - x - 1` by default
    #[must_use]
    pub fn with_initial_guess(mut self, guess: QuadraticFactor<T>) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Factors to restart a round from, in order, when it does not converge
    /// from the initial guess.
    ///
    /// The first restart that converges replaces the round's result. If none
    /// does, the result from the initial guess is kept. Without restart
    /// guesses (the default) a round is never retried.
    #[must_use]
    pub fn with_restart_guesses(mut self, guesses: &[QuadraticFactor<T>]) -> Self {
        self.restart_guesses = guesses.to_vec();
        self
    }

    /// Bound on `|p(r)|` used by [`Solution::within_tolerance`]
    #[must_use]
    pub fn with_residual_tolerance(mut self, tolerance: T) -> Self {
        self.residual_tolerance = tolerance;
        self
    }

    /// Find all roots.
    ///
    /// # Errors
    /// - the polynomial is malformed, see [`Poly::validate`]
    /// - [`Error::NormalizationOverflow`] if dividing by the leading
    ///   coefficient overflows
    ///
    /// Rounds that do not converge are reported in [`Solution::rounds`], not
    /// as errors.
    pub fn solve(&self) -> crate::Result<Solution<T>> {
        self.poly.validate()?;

        let normalized = self.poly.clone().monic();
        if let Some(index) = normalized.as_slice().iter().position(|c| !c.is_finite()) {
            return Err(Error::NormalizationOverflow { index });
        }
        log::debug!("{{normalized: {normalized}}}");

        let mut roots = RootList::new();
        let mut rounds = vec![];
        let mut remaining = normalized.clone();
        while remaining.len() > 3 {
            let round = self.deflate_once(remaining)?;
            roots.extend(round.roots);
            remaining = round.refinement.quotient.clone();
            rounds.push(round);
        }

        let tail = Tail::solve(remaining);
        roots.extend(tail.roots.iter().copied());
        debug_assert_eq!(roots.len(), self.poly.degree());
        log::debug!("{{roots: {roots}}}");

        let residuals = roots
            .iter()
            .map(|r| r.residual(&self.poly))
            .collect_vec();
        log::debug!(
            "{{residuals: [{}]}}",
            residuals.iter().map(|z| z.norm()).join(", ")
        );

        Ok(Solution {
            normalized,
            rounds,
            tail,
            roots,
            residuals,
            residual_tolerance: self.residual_tolerance,
        })
    }

    fn deflate_once(&self, dividend: Poly<T>) -> crate::Result<Round<T>> {
        let mut refinement = self.refine(&dividend, self.initial_guess)?;
        let mut attempts = 1;

        if !refinement.converged() {
            for &guess in &self.restart_guesses {
                attempts += 1;
                let retry = self.refine(&dividend, guess)?;
                if retry.converged() {
                    refinement = retry;
                    break;
                }
            }
        }

        if !refinement.converged() {
            log::warn!(
                "deflation round did not converge {{status: {:?}, iterations: {}, factor: {}, degree: {}}}",
                refinement.status,
                refinement.iterations,
                refinement.factor,
                dividend.degree()
            );
        }

        let roots = quadratic(refinement.factor);
        log::debug!(
            "{{u: {}, v: {}, iterations: {}, roots: [{}, {}]}}",
            refinement.factor.u,
            refinement.factor.v,
            refinement.iterations,
            roots[0],
            roots[1]
        );

        Ok(Round {
            dividend,
            refinement,
            roots,
            attempts,
        })
    }

    fn refine(
        &self,
        dividend: &Poly<T>,
        guess: QuadraticFactor<T>,
    ) -> crate::Result<Refinement<T>> {
        bairstow(dividend, guess, Some(self.epsilon), Some(self.max_iter))
    }
}

/// Find all roots of the polynomial with coefficients `coeffs` (highest
/// degree first) using the default settings.
///
/// # Errors
/// Same as [`BairstowFinder::solve`].
pub fn find_all_roots<T: RealScalar>(coeffs: &[T]) -> crate::Result<Solution<T>> {
    BairstowFinder::from_poly(Poly::new(coeffs)).solve()
}

/// One deflation round: a quadratic factor extracted from `dividend`.
#[derive(Clone, Debug, PartialEq)]
pub struct Round<T: RealScalar> {
    /// The polynomial this round started from
    pub dividend: Poly<T>,
    pub refinement: Refinement<T>,
    /// Roots of `refinement.factor`
    pub roots: [Root<T>; 2],
    /// How many starting guesses were tried
    pub attempts: usize,
}

/// The degree 1 or 2 polynomial left after deflation, solved directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Tail<T: RealScalar> {
    pub poly: Poly<T>,
    pub roots: Vec<Root<T>>,
}

impl<T: RealScalar> Tail<T> {
    fn solve(poly: Poly<T>) -> Self {
        let roots = match *poly.as_slice() {
            // x^2 + a1*x + a2 is u = -a1, v = -a2
            [_, a1, a2] => quadratic(QuadraticFactor::from_monic(a1, a2)).to_vec(),
            [a0, a1] => vec![linear(a0, a1)],
            _ => unreachable!("deflation stops at degree 1 or 2"),
        };
        log::debug!("{{tail: {poly}, roots: [{}]}}", roots.iter().join(", "));
        Self { poly, roots }
    }
}

/// Everything the solver found, round by round.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<T: RealScalar> {
    /// The input divided by its leading coefficient
    pub normalized: Poly<T>,
    pub rounds: Vec<Round<T>>,
    pub tail: Tail<T>,
    /// All roots, in the order they were extracted
    pub roots: RootList<T>,
    /// The original (not normalized) polynomial evaluated at each root
    pub residuals: Vec<Complex<T>>,
    residual_tolerance: T,
}

impl<T: RealScalar> Solution<T> {
    /// True if every deflation round converged
    pub fn converged(&self) -> bool {
        self.rounds.iter().all(|r| r.refinement.converged())
    }

    /// Rounds that did not converge, with their status
    pub fn failed_rounds(&self) -> impl Iterator<Item = (usize, Convergence)> + '_ {
        self.rounds
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.refinement.converged())
            .map(|(i, r)| (i, r.refinement.status))
    }

    pub fn total_iterations(&self) -> usize {
        self.rounds.iter().map(|r| r.refinement.iterations).sum()
    }

    /// Largest `|p(r)|` over all roots. NaN if any residual is NaN.
    pub fn max_residual(&self) -> T {
        self.residuals.iter().fold(T::zero(), |acc, z| {
            let norm = z.norm();
            if norm.is_nan() || acc.is_nan() {
                T::nan()
            } else {
                acc.max(norm)
            }
        })
    }

    pub fn residuals_within(&self, tolerance: T) -> bool {
        self.max_residual() <= tolerance
    }

    /// [`Solution::residuals_within`] the configured residual tolerance
    pub fn within_tolerance(&self) -> bool {
        self.residuals_within(self.residual_tolerance)
    }
}

#[cfg(test)]
mod test {
    use super::{find_all_roots, BairstowFinder};
    use crate::{
        roots::{Convergence, Root},
        Error, QuadraticFactor,
    };

    #[test]
    fn degree_1_skips_iteration() {
        let s = find_all_roots(&[1.0, -2.0]).unwrap();
        assert!(s.rounds.is_empty());
        assert_eq!(s.roots.as_slice(), &[Root::Real(2.0)]);
        assert_eq!(s.max_residual(), 0.0);
    }

    #[test]
    fn degree_2_skips_iteration() {
        let s = find_all_roots(&[2.0, 0.0, 2.0]).unwrap();
        assert!(s.rounds.is_empty());
        assert_eq!(s.normalized, poly![1.0, 0.0, 1.0]);
        assert_eq!(
            s.roots.as_slice(),
            &[
                Root::Complex(complex!(0.0, 1.0)),
                Root::Complex(complex!(0.0, -1.0))
            ]
        );
    }

    #[test]
    fn invalid_input() {
        assert_eq!(find_all_roots::<f64>(&[]), Err(Error::TooShort { len: 0 }));
        assert_eq!(find_all_roots(&[3.0]), Err(Error::TooShort { len: 1 }));
        assert_eq!(
            find_all_roots(&[0.0, 1.0, 1.0]),
            Err(Error::ZeroLeadingCoefficient)
        );
        assert_eq!(
            find_all_roots(&[1.0, f64::INFINITY]),
            Err(Error::NonFiniteCoefficient { index: 1 })
        );
    }

    #[test]
    fn normalization_overflow() {
        assert_eq!(
            find_all_roots(&[1E-300, 1E300, 1.0]),
            Err(Error::NormalizationOverflow { index: 1 })
        );
        assert_eq!(
            find_all_roots(&[1E-300, 1E300, 1.0, 1.0]),
            Err(Error::NormalizationOverflow { index: 1 })
        );
        // large but representable after dividing
        let s = find_all_roots(&[1E-10, 1E10, 1.0]).unwrap();
        assert!(s.roots.iter().all(Root::is_finite));
    }

    #[test]
    fn rounds_are_snapshots() {
        let s = find_all_roots(&[1.0, -8.0, -72.0, 382.0, 727.0, -2310.0]).unwrap();
        assert_eq!(s.rounds.len(), 2);
        assert_eq!(s.rounds[0].dividend, s.normalized);
        assert_eq!(s.rounds[1].dividend, s.rounds[0].refinement.quotient);
        assert_eq!(s.tail.poly, s.rounds[1].refinement.quotient);
        assert_eq!(s.tail.roots.len(), 1);
        assert!(s.converged());
        assert_eq!(s.failed_rounds().count(), 0);
        assert!(s.total_iterations() > 0);
    }

    #[test]
    fn non_convergence_is_not_fatal() {
        let p = poly![1.0, 20.4, 151.3, 490.0, 687.0, 719.0, 150.0, 109.0, 6.87];
        let s = BairstowFinder::from_poly(p).with_max_iter(2).solve().unwrap();
        assert_eq!(s.roots.len(), 8);
        assert!(!s.converged());
        assert_eq!(s.failed_rounds().next(), Some((0, Convergence::MaxIter)));
        assert!(s.rounds.iter().all(|r| r.attempts == 1));
    }

    #[test]
    fn restart_guesses() {
        // x^3 + 1 is degenerate at u = v = 0
        let p = poly![1.0, 0.0, 0.0, 1.0];
        let plain = BairstowFinder::from_poly(p.clone())
            .with_initial_guess(QuadraticFactor::new(0.0, 0.0))
            .solve()
            .unwrap();
        assert_eq!(plain.failed_rounds().next(), Some((0, Convergence::Degenerate)));
        assert!(plain.roots.iter().all(Root::is_finite));

        let restarted = BairstowFinder::from_poly(p)
            .with_initial_guess(QuadraticFactor::new(0.0, 0.0))
            .with_restart_guesses(&[QuadraticFactor::new(1.0, 1.0)])
            .solve()
            .unwrap();
        assert!(restarted.converged());
        assert_eq!(restarted.rounds[0].attempts, 2);
        assert!(restarted.within_tolerance());
    }

    #[test]
    fn residuals_use_original_scale() {
        let monic = find_all_roots(&[1.0, -6.0, 11.0, -6.0]).unwrap();
        let scaled = find_all_roots(&[4.0, -24.0, 44.0, -24.0]).unwrap();
        assert_eq!(monic.normalized, scaled.normalized);
        assert_eq!(monic.roots, scaled.roots);
        for (a, b) in monic.residuals.iter().zip(&scaled.residuals) {
            assert!((a * 4.0 - b).norm() < 1E-12);
        }
    }

    #[test]
    fn f32_support() {
        let s = BairstowFinder::from_poly(poly![1.0_f32, -6.0, 11.0, -6.0])
            .with_epsilon(1E-5)
            .solve()
            .unwrap();
        assert_eq!(s.roots.len(), 3);
        assert!(s.residuals_within(1E-3));
    }
}
