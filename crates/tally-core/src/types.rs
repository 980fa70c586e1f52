//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐           │
//! │  │    Product    │  │   Discount    │  │  Transaction  │           │
//! │  │  ───────────  │  │  ───────────  │  │  ───────────  │           │
//! │  │  id           │  │  kind         │  │  id (UUID)    │           │
//! │  │  name         │  │  value        │  │  receipt no.  │           │
//! │  │  price_cents  │  │  reason       │  │  lines+totals │           │
//! │  └───────────────┘  └───────────────┘  └───────────────┘           │
//! │                                                                     │
//! │  ┌───────────────┐  ┌───────────────┐                              │
//! │  │    TaxRate    │  │ PaymentMethod │                              │
//! │  │  bps (u32)    │  │  Cash / Card  │                              │
//! │  │  1000 = 10%   │  │  Mobile/Split │                              │
//! │  └───────────────┘  └───────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = 10% (the default rate).
/// Integer bps keep the whole totals pipeline free of floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the external catalog.
///
/// Read-only to this engine: the cart captures a price snapshot at add time
/// and never writes back. `stock` is advisory display data; it does not
/// block a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: String,

    /// Display name shown to cashier and on the transaction snapshot.
    pub name: String,

    /// Barcode (EAN-13, UPC-A, etc.), used by catalog search.
    pub barcode: Option<String>,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Category label (display/filtering only).
    pub category: String,

    /// Unit price in cents. Never negative.
    pub price_cents: i64,

    /// Current stock level. Advisory only.
    pub stock: i64,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether the catalog currently shows stock on hand.
    #[inline]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Discount
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Value is in basis points of the subtotal (1000 = 10% off).
    Percentage,
    /// Value is a flat cent amount taken off the subtotal.
    FixedAmount,
}

/// A single whole-cart discount.
///
/// ## Invariants
/// - Percentage value is in [0, 10000] bps
/// - Fixed value is in [0, subtotal] at the moment it is applied
/// - Exactly one discount per cart; applying a new one replaces the old
///
/// Validation is the caller's entry gate (`validation::validate_discount`);
/// the type itself stores whatever it is given so a snapshot can carry the
/// value that was actually approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub kind: DiscountKind,

    /// Basis points for `Percentage`, cents for `FixedAmount`.
    pub value: i64,

    /// Optional free-text reason ("customer loyalty", "damaged item", ...).
    pub reason: Option<String>,
}

impl Discount {
    /// The zero discount: 0% off, no reason.
    ///
    /// This is the state the cart returns to on clear and after checkout.
    /// A discount must never survive an empty cart into the next sale.
    pub fn none() -> Self {
        Discount {
            kind: DiscountKind::Percentage,
            value: 0,
            reason: None,
        }
    }

    /// A percentage discount in basis points (1000 = 10%).
    pub fn percentage(bps: i64) -> Self {
        Discount {
            kind: DiscountKind::Percentage,
            value: bps,
            reason: None,
        }
    }

    /// A fixed-amount discount.
    pub fn fixed(amount: Money) -> Self {
        Discount {
            kind: DiscountKind::FixedAmount,
            value: amount.cents(),
            reason: None,
        }
    }

    /// Attaches a reason, builder style.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Whether this is the zero discount.
    pub fn is_none(&self) -> bool {
        self.value == 0
    }

    /// The raw amount this discount takes off a given subtotal, unclamped
    /// against the subtotal.
    ///
    /// Callers in the totals pipeline clamp the result to the subtotal;
    /// this method reports the face value of the discount. A percentage
    /// that bypassed validation is clamped into [0, 10000] bps here rather
    /// than cast blindly, so a hand-built out-of-range value can never
    /// wrap into a huge discount.
    pub fn amount_off(&self, subtotal: Money) -> Money {
        match self.kind {
            DiscountKind::Percentage => {
                let bps = self.value.clamp(0, crate::MAX_PERCENTAGE_BPS) as u32;
                subtotal.percentage_of(bps)
            }
            DiscountKind::FixedAmount => Money::from_cents(self.value),
        }
    }
}

impl Default for Discount {
    fn default() -> Self {
        Discount::none()
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash; requires an amount-received value to compute change.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Mobile wallet.
    Mobile,
    /// Split tender across methods (settled externally).
    Split,
}

/// The payment offered at checkout.
///
/// `amount_received` is required for cash (change is computed from it);
/// for other methods the external terminal settles the exact total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tender {
    pub method: PaymentMethod,
    pub amount_received: Option<Money>,
}

impl Tender {
    /// Cash tender with the amount the customer handed over.
    pub fn cash(amount_received: Money) -> Self {
        Tender {
            method: PaymentMethod::Cash,
            amount_received: Some(amount_received),
        }
    }

    /// Non-cash tender; the terminal charges the exact total.
    pub fn exact(method: PaymentMethod) -> Self {
        Tender {
            method,
            amount_received: None,
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A line item frozen into a completed transaction.
///
/// Snapshot pattern: the name and unit price here are the values captured
/// when the line entered the cart, not live catalog reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLine {
    pub product_id: String,
    pub name: String,
    pub barcode: Option<String>,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub line_total_cents: i64,
}

impl TransactionLine {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// A completed sale, emitted once per successful checkout.
///
/// ## Dual-Key Identity
/// - `id`: UUID v4, immutable, for downstream systems
/// - `receipt_number`: human-readable, printed for the customer
///
/// Immutable after construction; the receipt/payment sink consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub receipt_number: String,
    pub lines: Vec<TransactionLine>,
    pub discount: Discount,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub tax_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub amount_received_cents: i64,
    pub change_due_cents: i64,
    pub completed_at: DateTime<Utc>,
}

impl Transaction {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn change_due(&self) -> Money {
        Money::from_cents(self.change_due_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(rate.bps(), 1000);
        assert!((rate.percentage() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(8.25).bps(), 825);
        assert_eq!(TaxRate::from_percentage(10.0).bps(), 1000);
    }

    #[test]
    fn test_discount_none_is_zero_percentage() {
        let discount = Discount::none();
        assert_eq!(discount.kind, DiscountKind::Percentage);
        assert_eq!(discount.value, 0);
        assert!(discount.is_none());
        assert!(discount.reason.is_none());
    }

    #[test]
    fn test_discount_amount_off() {
        let subtotal = Money::from_cents(149_700);

        let pct = Discount::percentage(1000); // 10%
        assert_eq!(pct.amount_off(subtotal).cents(), 14_970);

        let fixed = Discount::fixed(Money::from_cents(5000));
        assert_eq!(fixed.amount_off(subtotal).cents(), 5000);

        // Fixed amounts report their face value even past the subtotal;
        // the totals pipeline is what clamps.
        let oversized = Discount::fixed(Money::from_cents(200_000));
        assert_eq!(oversized.amount_off(subtotal).cents(), 200_000);
    }

    #[test]
    fn test_unvalidated_percentage_clamped_not_wrapped() {
        let subtotal = Money::from_cents(149_700);

        // Hand-built values that skipped validate_discount
        let negative = Discount::percentage(-500);
        assert_eq!(negative.amount_off(subtotal).cents(), 0);

        let oversized = Discount::percentage(250_000);
        assert_eq!(oversized.amount_off(subtotal), subtotal); // capped at 100%
    }

    #[test]
    fn test_discount_with_reason() {
        let discount = Discount::percentage(500).with_reason("customer loyalty");
        assert_eq!(discount.reason.as_deref(), Some("customer loyalty"));
    }

    #[test]
    fn test_tender_constructors() {
        let cash = Tender::cash(Money::from_cents(2000));
        assert_eq!(cash.method, PaymentMethod::Cash);
        assert_eq!(cash.amount_received, Some(Money::from_cents(2000)));

        let card = Tender::exact(PaymentMethod::Card);
        assert!(card.amount_received.is_none());
    }
}
