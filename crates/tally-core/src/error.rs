//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  tally-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                   │
//! │  └── ValidationError  - Input validation failures                  │
//! │                                                                     │
//! │  tally-register errors (separate crate)                            │
//! │  └── RegisterError    - Session/catalog failures, wraps CoreError  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → RegisterError → caller        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts, limits)
//! 3. Errors are enum variants, never String
//! 4. Every error here is recoverable: the caller re-prompts and retries

use thiserror::Error;

use crate::money::Money;
use crate::types::DiscountKind;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Discount value is out of range for its kind.
    ///
    /// ## When This Occurs
    /// - Percentage outside 0..=10000 bps
    /// - Fixed amount negative, or larger than the subtotal at apply time
    ///
    /// The value is rejected outright, never silently clamped. The form
    /// layer should have caught this; the engine checks defensively.
    #[error("Invalid {kind:?} discount value {value}: must be between 0 and {max}")]
    InvalidDiscountValue {
        kind: DiscountKind,
        value: i64,
        max: i64,
    },

    /// Cash tendered is less than the amount due.
    ///
    /// ## When This Occurs
    /// - Checkout with method cash and amount_received < total
    ///
    /// No state changes; the session stays awaiting payment so the cashier
    /// can collect more or switch methods.
    #[error("Insufficient payment: tendered {tendered}, required {required}")]
    InsufficientPayment { required: Money, tendered: Money },

    /// Cash tender submitted without an amount received.
    #[error("Invalid payment: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Cart has exceeded maximum allowed distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements and are raised
/// before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPayment {
            required: Money::from_cents(148_203),
            tendered: Money::from_cents(140_000),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient payment: tendered $1400.00, required $1482.03"
        );

        let err = CoreError::InvalidDiscountValue {
            kind: DiscountKind::Percentage,
            value: 15_000,
            max: 10_000,
        };
        assert!(err.to_string().contains("15000"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "query".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
