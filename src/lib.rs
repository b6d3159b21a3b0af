#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
//! Find all roots of a real polynomial by repeatedly extracting real quadratic
//! factors with [Bairstow's method](https://en.wikipedia.org/wiki/Bairstow%27s_method).
//!
//! ```
//! use bairstow::{poly, Poly64, Root};
//!
//! // x^3 - 1
//! let p: Poly64 = poly![1.0, 0.0, 0.0, -1.0];
//! let roots = p.roots(None, None).unwrap();
//! assert_eq!(roots.len(), 3);
//! assert!(roots.iter().any(|r| matches!(r, Root::Real(x) if (x - 1.0).abs() < 1E-9)));
//! ```

pub use num;

/// Build a [`Poly`] from real coefficients, highest degree first.
///
/// ```
/// use bairstow::{poly, Poly64};
///
/// let p: Poly64 = poly![1.0, -2.0];
/// assert_eq!(p.degree(), 1);
/// ```
#[macro_export]
macro_rules! poly {
    ($($c:expr),+ $(,)?) => {
        $crate::Poly::new(&[$($c),+])
    };
}

/// Build a [`num::Complex`], with an optional imaginary part.
#[macro_export]
macro_rules! complex {
    ($re:expr) => {
        $crate::num::Complex::new($re, 0.0)
    };
    ($re:expr, $im:expr) => {
        $crate::num::Complex::new($re, $im)
    };
}

mod error;
pub use error::{Error, Result};

mod scalar;
pub use scalar::RealScalar;

mod poly;
pub use poly::{synthetic_division, Poly, QuadraticFactor};

pub mod roots;
pub use roots::{find_all_roots, BairstowFinder, Root, RootList, Solution};

mod util;

// re-exported for integration tests and benches, not part of the API
#[doc(hidden)]
pub use util::__testing;

pub type Poly32 = Poly<f32>;
pub type Poly64 = Poly<f64>;
