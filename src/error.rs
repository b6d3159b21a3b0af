use thiserror::Error;

/// The top-level error type for this crate.
///
/// Only malformed input is an error. A round that does not converge, or that
/// runs into a degenerate Jacobian, is reported through
/// [`Convergence`](crate::roots::Convergence) instead, because the solver
/// still produces a (degraded) result for it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Use this for inputs that do not describe a polynomial of degree 1 or more
    #[error("expected at least 2 coefficients, got {len}")]
    TooShort { len: usize },

    #[error("leading coefficient must not be zero")]
    ZeroLeadingCoefficient,

    #[error("coefficient at index {index} is not finite")]
    NonFiniteCoefficient { index: usize },

    /// Every coefficient is finite, but dividing by a tiny leading coefficient
    /// is not.
    #[error("coefficient at index {index} overflows when divided by the leading coefficient")]
    NormalizationOverflow { index: usize },

    /// The iteration reads three entries below the remainder, so it needs at
    /// least a cubic.
    #[error("bairstow iteration requires degree 3 or higher, got degree {degree}")]
    DegreeTooLow { degree: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn display() {
        assert_eq!(
            Error::TooShort { len: 1 }.to_string(),
            "expected at least 2 coefficients, got 1"
        );
        assert_eq!(
            Error::NonFiniteCoefficient { index: 3 }.to_string(),
            "coefficient at index 3 is not finite"
        );
        assert_eq!(
            Error::NormalizationOverflow { index: 1 }.to_string(),
            "coefficient at index 1 overflows when divided by the leading coefficient"
        );
    }
}
