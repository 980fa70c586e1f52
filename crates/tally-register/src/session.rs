//! # Checkout Session
//!
//! One `CheckoutSession` per register: owns the cart and discount for the
//! duration of a sale and drives the checkout state machine.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Checkout State Machine                            │
//! │                                                                     │
//! │  ┌──────────┐  add_item    ┌──────────┐  begin_checkout             │
//! │  │  Empty   │─────────────►│ Building │────────────────┐           │
//! │  │  cart    │              │          │◄───────────┐   │           │
//! │  └──────────┘              └──────────┘            │   ▼           │
//! │       ▲                     set_quantity     cancel│ ┌──────────┐  │
//! │       │                     remove_item            └─│ Awaiting │  │
//! │       │                     apply_discount           │ Payment  │  │
//! │       │                     clear                    └────┬─────┘  │
//! │       │                                                   │        │
//! │       └────────── Transaction emitted ◄───── checkout ────┘        │
//! │                   (cart + discount reset)                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Between `begin_checkout` and `checkout`/`cancel_checkout` the totals are
//! locked: every mutating operation fails with `PaymentInProgress`. One
//! session has exactly one writer; a multi-register deployment runs one
//! session per register.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use tally_core::validation::{validate_discount, validate_tender};
use tally_core::{
    Cart, Discount, Money, PaymentMethod, Tender, Totals, Transaction,
};

use crate::catalog::Catalog;
use crate::config::RegisterConfig;
use crate::error::{RegisterError, RegisterResult};

/// Where a session is in its lifecycle.
///
/// An empty cart in `Building` is the "Empty" state; a completed checkout
/// re-enters `Building` with a fresh cart immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Cart and discount are editable.
    Building,
    /// Checkout initiated, totals locked, edits rejected.
    AwaitingPayment,
}

/// The transaction calculator for one register.
#[derive(Debug)]
pub struct CheckoutSession {
    config: RegisterConfig,
    cart: Cart,
    discount: Discount,
    phase: SessionPhase,
    locked_totals: Option<Totals>,
}

impl CheckoutSession {
    /// Creates a session with an empty cart and no discount.
    pub fn new(config: RegisterConfig) -> Self {
        CheckoutSession {
            config,
            cart: Cart::new(),
            discount: Discount::none(),
            phase: SessionPhase::Building,
            locked_totals: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn discount(&self) -> &Discount {
        &self.discount
    }

    pub fn config(&self) -> &RegisterConfig {
        &self.config
    }

    /// The current derived figures.
    ///
    /// While payment is in progress this returns the locked totals; they
    /// cannot drift because mutations are rejected in that phase anyway.
    pub fn totals(&self) -> Totals {
        match self.locked_totals {
            Some(totals) => totals,
            None => self.cart.totals(&self.discount, self.config.tax_rate()),
        }
    }

    fn ensure_building(&self) -> RegisterResult<()> {
        match self.phase {
            SessionPhase::Building => Ok(()),
            SessionPhase::AwaitingPayment => Err(RegisterError::PaymentInProgress),
        }
    }

    /// Adds one unit of a catalog product to the cart.
    ///
    /// Re-adding a product increments its existing line. The price is
    /// frozen at this moment. Stock is advisory: an out-of-stock product
    /// is logged and added anyway.
    pub fn add_item(&mut self, catalog: &Catalog, product_id: &str) -> RegisterResult<()> {
        debug!(product_id = %product_id, "add_item");
        self.ensure_building()?;

        let product = catalog
            .get(product_id)
            .ok_or_else(|| RegisterError::ProductNotFound(product_id.to_string()))?;

        if !product.in_stock() {
            warn!(product_id = %product_id, "Product out of stock, adding anyway");
        }

        self.cart.add_item(product, 1)?;
        Ok(())
    }

    /// Sets a line's quantity to an exact value; ≤ 0 removes the line.
    ///
    /// An id absent from the cart is a silent no-op.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> RegisterResult<()> {
        debug!(product_id = %product_id, quantity = %quantity, "set_quantity");
        self.ensure_building()?;

        if !self.cart.set_quantity(product_id, quantity)? {
            debug!(product_id = %product_id, "set_quantity on id not in cart, no-op");
        }
        Ok(())
    }

    /// Removes a line. An id absent from the cart is a silent no-op.
    pub fn remove_item(&mut self, product_id: &str) -> RegisterResult<()> {
        debug!(product_id = %product_id, "remove_item");
        self.ensure_building()?;

        if !self.cart.remove_item(product_id) {
            debug!(product_id = %product_id, "remove_item on id not in cart, no-op");
        }
        Ok(())
    }

    /// Empties the cart AND resets the discount to zero.
    ///
    /// The coupling is an invariant: a discount must never survive an
    /// empty cart into the next sale.
    pub fn clear(&mut self) -> RegisterResult<()> {
        debug!("clear");
        self.ensure_building()?;

        self.cart.clear();
        self.discount = Discount::none();
        Ok(())
    }

    /// Replaces the cart discount after validating it against the current
    /// subtotal. No stacking: the previous discount is gone wholesale.
    pub fn apply_discount(&mut self, discount: Discount) -> RegisterResult<()> {
        self.ensure_building()?;
        validate_discount(&discount, self.cart.subtotal())?;

        info!(
            kind = ?discount.kind,
            value = discount.value,
            reason = discount.reason.as_deref().unwrap_or(""),
            "Discount applied"
        );
        self.discount = discount;
        Ok(())
    }

    /// Initiates checkout: locks the totals and enters `AwaitingPayment`.
    ///
    /// Returns the locked totals so the caller can display the amount due.
    pub fn begin_checkout(&mut self) -> RegisterResult<Totals> {
        self.ensure_building()?;

        if self.cart.is_empty() {
            return Err(RegisterError::EmptyCart);
        }

        let totals = self.cart.totals(&self.discount, self.config.tax_rate());
        self.locked_totals = Some(totals);
        self.phase = SessionPhase::AwaitingPayment;

        info!(total = %totals.total, "Checkout started");
        Ok(totals)
    }

    /// Abandons the checkout and returns to `Building`.
    ///
    /// Cart and discount are untouched; the cashier keeps editing.
    pub fn cancel_checkout(&mut self) -> RegisterResult<()> {
        match self.phase {
            SessionPhase::AwaitingPayment => {
                self.locked_totals = None;
                self.phase = SessionPhase::Building;
                info!("Checkout cancelled");
                Ok(())
            }
            SessionPhase::Building => Err(RegisterError::NotAwaitingPayment),
        }
    }

    /// Settles the sale with the given tender.
    ///
    /// ## Behavior
    /// - Cash under the total fails with `InsufficientPayment` and changes
    ///   nothing; the session stays in `AwaitingPayment`
    /// - On success the Transaction snapshot is emitted, the cart and
    ///   discount reset, and the session re-enters `Building`
    ///
    /// Change is only meaningful for cash; other methods settle exact.
    pub fn checkout(&mut self, tender: Tender) -> RegisterResult<Transaction> {
        let totals = match self.locked_totals {
            Some(totals) => totals,
            None => return Err(RegisterError::NotAwaitingPayment),
        };

        validate_tender(&tender, totals.total)?;

        let amount_received = match tender.method {
            PaymentMethod::Cash => tender.amount_received.unwrap_or(totals.total),
            _ => totals.total,
        };
        let change_due = amount_received.saturating_sub_zero(totals.total);

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            receipt_number: generate_receipt_number(),
            lines: self.cart.to_transaction_lines(),
            discount: self.discount.clone(),
            subtotal_cents: totals.subtotal.cents(),
            discount_cents: totals.discount_amount.cents(),
            tax_cents: totals.tax.cents(),
            total_cents: totals.total.cents(),
            payment_method: tender.method,
            amount_received_cents: amount_received.cents(),
            change_due_cents: change_due.cents(),
            completed_at: Utc::now(),
        };

        // Same reset as clear(): no discount survives into the next sale.
        self.cart.clear();
        self.discount = Discount::none();
        self.locked_totals = None;
        self.phase = SessionPhase::Building;

        info!(
            transaction_id = %transaction.id,
            receipt = %transaction.receipt_number,
            total = %Money::from_cents(transaction.total_cents),
            change = %Money::from_cents(transaction.change_due_cents),
            "Transaction completed"
        );

        Ok(transaction)
    }
}

/// Human-readable receipt number: date-time plus a low-entropy suffix to
/// disambiguate same-second sales on one register.
fn generate_receipt_number() -> String {
    let now = Utc::now();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let suffix: u16 = (nanos % 10000) as u16;
    format!("{}-{:04}", now.format("%y%m%d-%H%M%S"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_number_shape() {
        let receipt = generate_receipt_number();
        // yymmdd-HHMMSS-NNNN
        assert_eq!(receipt.len(), 18);
        assert_eq!(receipt.matches('-').count(), 2);
    }

    #[test]
    fn test_new_session_is_building_and_empty() {
        let session = CheckoutSession::new(RegisterConfig::default());
        assert_eq!(session.phase(), SessionPhase::Building);
        assert!(session.cart().is_empty());
        assert!(session.discount().is_none());
        assert_eq!(session.totals().total.cents(), 0);
    }
}
