use std::{
    fmt::Display,
    ops::{Add, Mul},
};

use itertools::Itertools;
use num::{Complex, One, Zero};

use crate::{Error, RealScalar};

mod synthetic;
pub use synthetic::{synthetic_division, QuadraticFactor};

/// A real polynomial, stored as its coefficients from the highest degree down.
///
/// `Poly::new(&[a0, a1, ..., an])` is `a0*x^n + a1*x^(n-1) + ... + an`. No
/// trimming happens on construction: a zero leading coefficient is kept so
/// the solver can reject it explicitly.
#[derive(Clone, Debug, PartialEq)]
pub struct Poly<T: RealScalar>(pub(crate) Vec<T>);

impl<T: RealScalar> Poly<T> {
    #[must_use]
    pub fn new(coeffs: &[T]) -> Self {
        Self(coeffs.to_vec())
    }

    /// Same as [`Poly::new`], but validates the coefficients first.
    ///
    /// # Errors
    /// See [`Poly::validate`].
    pub fn try_new(coeffs: &[T]) -> crate::Result<Self> {
        let p = Self::new(coeffs);
        p.validate()?;
        Ok(p)
    }

    /// Build the real polynomial with the given roots.
    ///
    /// The complex roots must come in conjugate pairs, the imaginary part of
    /// the expanded product is discarded.
    ///
    /// ```
    /// use bairstow::{complex, poly, Poly64};
    ///
    /// let p = Poly64::from_roots(&[complex!(0.0, 1.0), complex!(0.0, -1.0)]);
    /// assert_eq!(p, poly![1.0, 0.0, 1.0]);
    /// ```
    #[must_use]
    pub fn from_roots(roots: &[Complex<T>]) -> Self {
        let mut coeffs = vec![Complex::<T>::one()];
        for r in roots {
            // multiply by (x - r), coefficients shift up by one degree
            let mut next = coeffs.clone();
            next.push(Complex::zero());
            for (i, c) in coeffs.iter().enumerate() {
                next[i + 1] = next[i + 1] - r * c;
            }
            coeffs = next;
        }
        Self(coeffs.into_iter().map(|c| c.re).collect_vec())
    }

    /// Number of coefficients, including a possibly zero leading one
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The degree, or 0 for an empty polynomial
    #[must_use]
    pub fn degree(&self) -> usize {
        self.len().saturating_sub(1)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.0.clone()
    }

    /// The coefficient of the highest degree term
    #[must_use]
    pub fn leading(&self) -> Option<T> {
        self.0.first().copied()
    }

    /// Check that this describes a polynomial the solver can work with.
    ///
    /// # Errors
    /// - [`Error::TooShort`] if there are fewer than 2 coefficients
    /// - [`Error::NonFiniteCoefficient`] if any coefficient is NaN or infinite
    /// - [`Error::ZeroLeadingCoefficient`] if the leading coefficient is zero
    pub fn validate(&self) -> crate::Result<()> {
        if self.len() < 2 {
            return Err(Error::TooShort { len: self.len() });
        }
        if let Some(index) = self.0.iter().position(|c| !c.is_finite()) {
            return Err(Error::NonFiniteCoefficient { index });
        }
        if self.0[0].is_zero() {
            return Err(Error::ZeroLeadingCoefficient);
        }
        Ok(())
    }

    /// Evaluate the polynomial at `x`, which may be real or complex.
    ///
    /// Uses [Horner's method](https://en.wikipedia.org/wiki/Horner%27s_method).
    ///
    /// ```
    /// use bairstow::{complex, poly, Poly64};
    ///
    /// // x^2 + 1
    /// let p: Poly64 = poly![1.0, 0.0, 1.0];
    /// assert_eq!(p.eval(2.0), 5.0);
    /// assert_eq!(p.eval(complex!(0.0, 1.0)), complex!(0.0));
    /// ```
    pub fn eval<X>(&self, x: X) -> X
    where
        X: Copy + Zero + Add<Output = X> + Mul<Output = X> + From<T>,
    {
        self.0
            .iter()
            .fold(X::zero(), |acc, &c| acc * x + X::from(c))
    }

    /// Make the polynomial monic in-place, by dividing every coefficient by
    /// the leading one.
    pub(crate) fn make_monic(&mut self) {
        debug_assert!(self.validate().is_ok());
        let lead = self.0[0];
        if lead.is_one() {
            // already monic
            return;
        }
        for c in &mut self.0 {
            *c = *c / lead;
        }
    }

    /// Moving version of `make_monic`
    #[must_use]
    pub(crate) fn monic(mut self) -> Self {
        self.make_monic();
        self
    }

    /// Multiply every coefficient by `factor`
    #[must_use]
    pub(crate) fn scaled(mut self, factor: T) -> Self {
        for c in &mut self.0 {
            *c = *c * factor;
        }
        self
    }
}

impl<T: RealScalar> From<Vec<T>> for Poly<T> {
    fn from(value: Vec<T>) -> Self {
        Self(value)
    }
}

impl<T: RealScalar> From<Poly<T>> for Vec<T> {
    fn from(val: Poly<T>) -> Self {
        val.0
    }
}

impl<T: RealScalar> Display for Poly<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.degree();
        for (i, c) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " + ")?;
            }
            match n - i {
                0 => write!(f, "{c}")?,
                d => write!(f, "{c}*x^{d}")?,
            }
        }
        Ok(())
    }
}
