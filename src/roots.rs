use std::{fmt::Display, ops::Index};

use num::Complex;

use crate::{util::complex::complex_fmt, Poly, QuadraticFactor, RealScalar};

mod bairstow;
pub use bairstow::{bairstow, bairstow_iterations, Convergence, Refinement};
mod deflate;
pub use deflate::{find_all_roots, BairstowFinder, Round, Solution, Tail};

pub const DEFAULT_EPSILON: f64 = 1E-12;
pub const DEFAULT_MAX_ITER: usize = 50;
pub const DEFAULT_RESIDUAL_TOLERANCE: f64 = 1E-4;

/// A root of a real polynomial, tagged as real or complex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Root<T> {
    Real(T),
    Complex(Complex<T>),
}

impl<T: RealScalar> Root<T> {
    #[must_use]
    pub fn to_complex(self) -> Complex<T> {
        match self {
            Self::Real(x) => Complex::new(x, T::zero()),
            Self::Complex(z) => z,
        }
    }

    pub const fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }

    pub fn re(&self) -> T {
        match self {
            Self::Real(x) => *x,
            Self::Complex(z) => z.re,
        }
    }

    pub fn im(&self) -> T {
        match self {
            Self::Real(_) => T::zero(),
            Self::Complex(z) => z.im,
        }
    }

    #[must_use]
    pub fn conj(self) -> Self {
        match self {
            Self::Real(_) => self,
            Self::Complex(z) => Self::Complex(z.conj()),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Real(x) => x.is_finite(),
            Self::Complex(z) => z.re.is_finite() && z.im.is_finite(),
        }
    }

    /// Evaluate `poly` at this root, i.e. the residual
    pub fn residual(&self, poly: &Poly<T>) -> Complex<T> {
        match self {
            Self::Real(x) => Complex::new(poly.eval(*x), T::zero()),
            Self::Complex(z) => poly.eval(*z),
        }
    }
}

impl<T: RealScalar> From<Root<T>> for Complex<T> {
    fn from(value: Root<T>) -> Self {
        value.to_complex()
    }
}

impl<T: RealScalar> Display for Root<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real(x) => write!(f, "{x}"),
            Self::Complex(z) => write!(f, "{}", complex_fmt(z)),
        }
    }
}

/// Roots in the order they were extracted.
///
/// Only the solver appends to it, callers get it by value.
#[derive(Clone, Debug, PartialEq)]
pub struct RootList<T>(Vec<Root<T>>);

impl<T: RealScalar> RootList<T> {
    pub(crate) const fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, root: Root<T>) {
        self.0.push(root);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Root<T>> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Root<T>] {
        &self.0
    }

    #[must_use]
    pub fn to_complex_vec(&self) -> Vec<Complex<T>> {
        self.0.iter().map(|r| r.to_complex()).collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Root<T>> {
        self.0
    }
}

impl<T: RealScalar> Extend<Root<T>> for RootList<T> {
    fn extend<I: IntoIterator<Item = Root<T>>>(&mut self, iter: I) {
        for root in iter {
            self.push(root);
        }
    }
}

impl<T> Index<usize> for RootList<T> {
    type Output = Root<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a, T: RealScalar> IntoIterator for &'a RootList<T> {
    type IntoIter = std::slice::Iter<'a, Root<T>>;
    type Item = &'a Root<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: RealScalar> Display for RootList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, r) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{r}")?;
        }
        write!(f, "]")
    }
}

/// Roots of `x^2 - u*x - v`, that is `(u +- sqrt(u^2 + 4v)) / 2`.
///
/// A negative discriminant gives a complex conjugate pair, with the positive
/// imaginary part first. A discriminant that is negative only by rounding
/// error (relative to the magnitude of its terms) counts as zero, giving a
/// real double root.
///
/// ```
/// use bairstow::{roots::quadratic, QuadraticFactor, Root};
///
/// // x^2 - 1
/// let [r1, r2] = quadratic(QuadraticFactor::new(0.0, 1.0));
/// assert_eq!((r1, r2), (Root::Real(1.0), Root::Real(-1.0)));
/// ```
pub fn quadratic<T: RealScalar>(factor: QuadraticFactor<T>) -> [Root<T>; 2] {
    let QuadraticFactor { u, v } = factor;
    let two = T::from_const(2.0);
    let four = T::from_const(4.0);
    let disc = factor.discriminant();
    let scale = u * u + four * v.abs();

    if disc >= T::zero() || -disc <= four * T::epsilon() * scale {
        let s = disc.max(T::zero()).sqrt();
        return [Root::Real((u + s) / two), Root::Real((u - s) / two)];
    }

    let re = u / two;
    let im = (-disc).sqrt() / two;
    [
        Root::Complex(Complex::new(re, im)),
        Root::Complex(Complex::new(re, -im)),
    ]
}

/// Root of `a0*x + a1`
pub fn linear<T: RealScalar>(a0: T, a1: T) -> Root<T> {
    Root::Real(-a1 / a0)
}

impl<T: RealScalar> Poly<T> {
    /// A convenient way of finding roots, with the default starting guess.
    ///
    /// Use [`BairstowFinder`] if you need more control, or want to inspect
    /// the individual deflation rounds.
    ///
    /// # Errors
    /// If the polynomial is malformed, see [`Poly::validate`]. Rounds that
    /// fail to converge do not cause an error, their roots are returned as is.
    pub fn roots(
        &self,
        epsilon: Option<T>,
        max_iter: Option<usize>,
    ) -> crate::Result<RootList<T>> {
        let mut finder = BairstowFinder::from_poly(self.clone());
        if let Some(epsilon) = epsilon {
            finder = finder.with_epsilon(epsilon);
        }
        if let Some(max_iter) = max_iter {
            finder = finder.with_max_iter(max_iter);
        }
        finder.solve().map(|s| s.roots)
    }
}
