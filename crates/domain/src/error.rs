//! Error kinds shared by every stage of the APR pipeline.

/// Failure of any step of the APR computation.
///
/// Every variant is fatal to the invocation that produced it; the pipeline
/// never substitutes a default value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AprError {
    /// Price service unreachable, non-2xx or malformed.
    #[error("price service unavailable: {0}")]
    UpstreamUnavailable(String),
    /// A requested token is absent from the price response.
    #[error("no USD price for token {0}")]
    MissingPrice(String),
    /// RPC or explorer call failed or returned an undecodable shape.
    #[error("chain read failed: {0}")]
    ChainRead(String),
    /// A denominator was zero.
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
    /// Non-finite, negative or overflowing numeric input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No pool with this identifier is configured.
    #[error("unknown pool: {0}")]
    UnknownPool(String),
}

impl AprError {
    /// Short machine-readable name of the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::MissingPrice(_) => "missing_price",
            Self::ChainRead(_) => "chain_read_error",
            Self::DivisionByZero(_) => "division_by_zero",
            Self::InvalidInput(_) => "invalid_input",
            Self::UnknownPool(_) => "unknown_pool",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AprError::MissingPrice("0xabc".to_string());
        assert_eq!(err.to_string(), "no USD price for token 0xabc");
        assert_eq!(err.kind(), "missing_price");

        let err = AprError::DivisionByZero("lp total supply");
        assert_eq!(err.to_string(), "division by zero: lp total supply");
    }
}
