use std::fmt::{Debug, Display};

use num::{Float, FromPrimitive};

/// Real floating point scalars the solver can work with.
///
/// Blanket-implemented, so `f32` and `f64` both qualify.
pub trait RealScalar: Float + FromPrimitive + Debug + Display + 'static {
    /// Convert a small `f64` constant into `T`.
    ///
    /// # Panics
    /// Only if `T` cannot represent `x`, which does not happen for the
    /// primitive floats.
    #[must_use]
    fn from_const(x: f64) -> Self {
        Self::from_f64(x).expect("constant does not fit in scalar type")
    }
}

impl<T: Float + FromPrimitive + Debug + Display + 'static> RealScalar for T {}

#[cfg(test)]
mod test {
    use super::RealScalar;

    #[test]
    fn from_const() {
        assert_eq!(f64::from_const(0.5), 0.5);
        assert_eq!(f32::from_const(0.25), 0.25_f32);
    }
}
