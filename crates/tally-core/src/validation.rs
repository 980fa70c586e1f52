//! # Validation Module
//!
//! Input validation for Tally POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Form / UI                                                 │
//! │  ├── Basic format checks (empty, range sliders)                     │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  └── Business rule validation before any state mutates              │
//! │                                                                     │
//! │  The form layer should never let an out-of-range discount through,  │
//! │  but the engine rejects it again rather than trusting the caller.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Discount, DiscountKind, PaymentMethod, Tender};
use crate::{MAX_ITEM_QUANTITY, MAX_PERCENTAGE_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Discount Validation
// =============================================================================

/// Validates a discount against the subtotal it would apply to.
///
/// ## Rules
/// - Percentage: value in [0, 10000] bps (0% to 100%)
/// - Fixed amount: value in [0, subtotal] at the moment of application
///
/// Out-of-range values are a hard rejection, never a silent clamp: the
/// caller must re-prompt with a corrected value. Note the fixed-amount
/// bound is checked against the subtotal *now*; if lines are removed later
/// the totals pipeline clamps at recomputation time instead.
pub fn validate_discount(discount: &Discount, subtotal: Money) -> CoreResult<()> {
    let max = match discount.kind {
        DiscountKind::Percentage => MAX_PERCENTAGE_BPS,
        DiscountKind::FixedAmount => subtotal.cents(),
    };

    if discount.value < 0 || discount.value > max {
        return Err(CoreError::InvalidDiscountValue {
            kind: discount.kind,
            value: discount.value,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Payment Validation
// =============================================================================

/// Validates a tender against the amount due.
///
/// ## Rules
/// - Cash must carry an amount received, and it must cover the total
/// - Non-cash methods settle the exact total externally, always valid
///
/// Failure changes no state; the session stays awaiting payment.
pub fn validate_tender(tender: &Tender, total: Money) -> CoreResult<()> {
    match tender.method {
        PaymentMethod::Cash => {
            let received = tender.amount_received.ok_or_else(|| {
                CoreError::InvalidPaymentAmount {
                    reason: "cash tender requires an amount received".to_string(),
                }
            })?;

            if received.is_negative() {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: "amount received cannot be negative".to_string(),
                });
            }

            if received < total {
                return Err(CoreError::InsufficientPayment {
                    required: total,
                    tendered: received,
                });
            }

            Ok(())
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value for cart entry.
///
/// ## Rules
/// - Must be positive (> 0); zero quantities go through removal instead
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// Zero is allowed (free items); negative is not.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a catalog search query.
///
/// Empty queries are fine (match everything); overly long ones are not.
/// Returns the trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
