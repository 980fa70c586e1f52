//! # Register Error Type
//!
//! Unified error type for register operations.
//!
//! Core errors bubble up through `#[from]`; the variants added here are the
//! failures only the session layer can detect (catalog misses, state
//! machine misuse). Everything remains recoverable: the caller corrects its
//! input and retries, no error tears down the register.

use thiserror::Error;

use tally_core::CoreError;

/// Errors raised by the checkout session and catalog.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Product id is not in the catalog.
    ///
    /// Raised only when a price is needed and cannot be found, i.e. on
    /// add. Edits to ids absent from the cart are silent no-ops instead.
    #[error("Product not found in catalog: {0}")]
    ProductNotFound(String),

    /// Checkout was initiated on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart/discount mutation arrived while payment was in progress.
    ///
    /// The total is locked between `begin_checkout` and either `checkout`
    /// or `cancel_checkout`; cancel first to keep editing.
    #[error("Payment in progress, cancel checkout to modify the cart")]
    PaymentInProgress,

    /// `checkout` was called without `begin_checkout`.
    #[error("No checkout in progress")]
    NotAwaitingPayment,

    /// Business rule violation from the core engine.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for Results with RegisterError.
pub type RegisterResult<T> = Result<T, RegisterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Money;

    #[test]
    fn test_core_error_passes_through_transparently() {
        let core = CoreError::InsufficientPayment {
            required: Money::from_cents(1000),
            tendered: Money::from_cents(500),
        };
        let expected = core.to_string();
        let err: RegisterError = core.into();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            RegisterError::ProductNotFound("42".into()).to_string(),
            "Product not found in catalog: 42"
        );
        assert_eq!(RegisterError::EmptyCart.to_string(), "Cart is empty");
    }
}
