//! # Cart
//!
//! The working set of product lines for one in-progress sale, plus the pure
//! totals derivation.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cart Operations                               │
//! │                                                                     │
//! │  Caller Action             Cart Method            State Change      │
//! │  ─────────────             ───────────            ────────────      │
//! │  Scan / click product ───► add_item() ──────────► merge or insert   │
//! │  Change quantity ────────► set_quantity() ──────► qty = n, 0 drops  │
//! │  Remove line ────────────► remove_item() ───────► line dropped      │
//! │  Cancel sale ────────────► clear() ─────────────► lines emptied     │
//! │  Display totals ─────────► totals() ────────────► (read only)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (re-adding merges quantities)
//! - No line has quantity ≤ 0 (an edit down to zero removes the line)
//! - Line order is insertion order, display-only; totals ignore it
//! - Unit prices are frozen at add time (quote semantics)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Discount, Product, TaxRate, TransactionLine};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product line in the cart.
///
/// ## Price Freezing
/// The name, barcode and unit price are copied from the catalog at the
/// moment the product is added. Later catalog edits do not reach into an
/// open cart: the captured price acts as a quote to the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product id in the external catalog.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Barcode at time of adding (frozen).
    pub barcode: Option<String>,

    /// Unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart. Always ≥ 1.
    pub quantity: i64,

    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line from a catalog product.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            unit_price_cents: product.price_cents,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The frozen unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Extended price for the line (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Freezes this line into a transaction snapshot.
    pub fn to_transaction_line(&self) -> TransactionLine {
        TransactionLine {
            product_id: self.product_id.clone(),
            name: self.name.clone(),
            barcode: self.barcode.clone(),
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
            line_total_cents: self.line_total().cents(),
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// The derived monetary figures for a cart + discount + tax rate.
///
/// ## Derivation Order
/// ```text
/// subtotal        = Σ line totals
/// discount_amount = min(discount face value, subtotal)
/// taxable_amount  = subtotal − discount_amount        (≥ 0 always)
/// tax             = taxable_amount × rate
/// total           = taxable_amount + tax
/// ```
///
/// The discount amount is re-clamped to the live subtotal on every
/// recomputation, so removing lines after a fixed discount was applied can
/// never drive the total negative, and the reported discount never exceeds
/// what is actually being sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: Money,
    pub discount_amount: Money,
    pub taxable_amount: Money,
    pub tax: Money,
    pub total: Money,
    pub line_count: usize,
    pub total_quantity: i64,
}

impl Totals {
    /// All-zero totals, what an empty cart derives to.
    pub fn zero() -> Self {
        Totals {
            subtotal: Money::zero(),
            discount_amount: Money::zero(),
            taxable_amount: Money::zero(),
            tax: Money::zero(),
            total: Money::zero(),
            line_count: 0,
            total_quantity: 0,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart: an insertion-ordered set of lines, unique by product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart, or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantities merge into the existing line
    /// - Otherwise: a new line is appended with the price frozen now
    ///
    /// Stock is not checked here; availability is advisory display data
    /// and never blocks a sale.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Sets the quantity of a line to an exact value (not incremental).
    ///
    /// ## Behavior
    /// - Quantity ≤ 0: removes the line entirely
    /// - Product not in cart: no-op, returns `false`
    ///
    /// Returns whether the cart changed. An absent id is tolerated rather
    /// than raised; UI races like a double-clicked delete are expected.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<bool> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a line by product id. Returns whether a line was removed;
    /// an absent id is a no-op.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    /// Empties the cart.
    ///
    /// The owning session couples this with resetting the discount; see
    /// `CheckoutSession::clear` in tally-register.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether a product id currently has a line.
    pub fn contains(&self, product_id: &str) -> bool {
        self.lines.iter().any(|l| l.product_id == product_id)
    }

    /// Sum of line extended prices, before discount or tax.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// The pure totals derivation for this cart under a discount and rate.
    ///
    /// Deterministic: same cart, discount and rate always produce the same
    /// figures, regardless of the order lines were added in.
    pub fn totals(&self, discount: &Discount, tax_rate: TaxRate) -> Totals {
        let subtotal = self.subtotal();
        let discount_amount = discount.amount_off(subtotal).min(subtotal);
        // Floored at zero even independently of the clamp above.
        let taxable_amount = subtotal.saturating_sub_zero(discount_amount);
        let tax = taxable_amount.calculate_tax(tax_rate);
        let total = taxable_amount + tax;

        Totals {
            subtotal,
            discount_amount,
            taxable_amount,
            tax,
            total,
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
        }
    }

    /// Freezes every line into a transaction snapshot.
    pub fn to_transaction_lines(&self) -> Vec<TransactionLine> {
        self.lines.iter().map(|l| l.to_transaction_line()).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            barcode: Some(format!("0000{}", id)),
            description: None,
            category: "Electronics".to_string(),
            price_cents,
            stock: 10,
        }
    }

    /// The cart from the reference scenario: one $999.00 item and two
    /// $249.00 items, subtotal $1497.00.
    fn scenario_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 99_900), 1).unwrap();
        cart.add_item(&product("5", 24_900), 2).unwrap();
        cart
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999), 2).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 1998);
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut cart = Cart::new();
        let p = product("1", 999);

        cart.add_item(&p, 1).unwrap();
        cart.add_item(&p, 1).unwrap();

        assert_eq!(cart.line_count(), 1); // one line, not two
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_subtotal_ignores_insertion_order() {
        let a = product("a", 99_900);
        let b = product("b", 24_900);

        let mut forward = Cart::new();
        forward.add_item(&a, 1).unwrap();
        forward.add_item(&b, 2).unwrap();

        let mut backward = Cart::new();
        backward.add_item(&b, 2).unwrap();
        backward.add_item(&a, 1).unwrap();

        assert_eq!(forward.subtotal(), backward.subtotal());
    }

    #[test]
    fn test_set_quantity_is_exact_not_incremental() {
        let mut cart = Cart::new();
        cart.add_item(&product("1", 999), 5).unwrap();

        assert!(cart.set_quantity("1", 2).unwrap());
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut a = Cart::new();
        a.add_item(&product("1", 999), 3).unwrap();
        let mut b = a.clone();

        a.set_quantity("1", 0).unwrap();
        b.remove_item("1");

        assert!(a.is_empty());
        assert!(b.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = scenario_cart();
        let before = cart.subtotal();

        assert!(!cart.set_quantity("ghost", 4).unwrap());
        assert_eq!(cart.subtotal(), before);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = scenario_cart();
        assert!(cart.remove_item("1"));
        assert!(!cart.remove_item("1")); // double-click delete
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::new();
        let p = product("1", 999);
        cart.add_item(&p, 998).unwrap();

        assert!(matches!(
            cart.add_item(&p, 2),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        // Failed add left the line untouched
        assert_eq!(cart.lines()[0].quantity, 998);
    }

    #[test]
    fn test_distinct_line_cap() {
        let mut cart = Cart::new();
        for i in 0..crate::MAX_CART_ITEMS {
            cart.add_item(&product(&format!("p{}", i), 100), 1).unwrap();
        }

        assert!(matches!(
            cart.add_item(&product("one-too-many", 100), 1),
            Err(CoreError::CartTooLarge { .. })
        ));
        // Failed add left the cart untouched
        assert_eq!(cart.line_count(), crate::MAX_CART_ITEMS);
        assert!(!cart.contains("one-too-many"));

        // Merging into an existing line is still fine at the cap
        cart.add_item(&product("p0", 100), 1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_frozen_price_survives_catalog_change() {
        let mut cart = Cart::new();
        let mut p = product("1", 999);
        cart.add_item(&p, 1).unwrap();

        p.price_cents = 1299; // catalog price change after the fact
        cart.add_item(&p, 1).unwrap();

        // The merged line keeps the price quoted at first add
        assert_eq!(cart.lines()[0].unit_price_cents, 999);
        assert_eq!(cart.subtotal().cents(), 1998);
    }

    #[test]
    fn test_empty_cart_totals_all_zero() {
        let cart = Cart::new();
        let totals = cart.totals(&Discount::none(), TaxRate::from_bps(1000));
        assert_eq!(totals, Totals::zero());
    }

    #[test]
    fn test_reference_scenario_percentage_discount() {
        // subtotal 1497.00, 10% discount, 10% tax
        let cart = scenario_cart();
        let totals = cart.totals(&Discount::percentage(1000), TaxRate::from_bps(1000));

        assert_eq!(totals.subtotal.cents(), 149_700);
        assert_eq!(totals.discount_amount.cents(), 14_970);
        assert_eq!(totals.taxable_amount.cents(), 134_730);
        assert_eq!(totals.tax.cents(), 13_473);
        assert_eq!(totals.total.cents(), 148_203); // $1482.03
    }

    #[test]
    fn test_totals_no_discount() {
        let cart = scenario_cart();
        let totals = cart.totals(&Discount::none(), TaxRate::from_bps(1000));

        assert_eq!(totals.subtotal.cents(), 149_700);
        assert_eq!(totals.discount_amount.cents(), 0);
        assert_eq!(totals.tax.cents(), 14_970);
        assert_eq!(totals.total.cents(), 164_670);
    }

    #[test]
    fn test_tax_and_total_consistency() {
        let cart = scenario_cart();
        let totals = cart.totals(&Discount::percentage(1000), TaxRate::from_bps(1000));

        assert_eq!(totals.total, totals.taxable_amount + totals.tax);
        assert_eq!(totals.tax, totals.total - totals.taxable_amount);
    }

    #[test]
    fn test_oversized_fixed_discount_clamps_taxable_to_zero() {
        // Fixed discount applied while the cart was larger, then lines
        // removed: the live recomputation clamps to the current subtotal.
        let mut cart = scenario_cart();
        let discount = Discount::fixed(Money::from_cents(100_000)); // $1000.00

        cart.remove_item("1"); // subtotal drops to $498.00
        let totals = cart.totals(&discount, TaxRate::from_bps(1000));

        assert_eq!(totals.subtotal.cents(), 49_800);
        assert_eq!(totals.discount_amount.cents(), 49_800); // re-clamped
        assert_eq!(totals.taxable_amount.cents(), 0);
        assert_eq!(totals.tax.cents(), 0);
        assert_eq!(totals.total.cents(), 0);
        assert!(!totals.taxable_amount.is_negative());
    }

    #[test]
    fn test_full_percentage_discount() {
        let cart = scenario_cart();
        let totals = cart.totals(&Discount::percentage(10_000), TaxRate::from_bps(1000));

        assert_eq!(totals.discount_amount, totals.subtotal);
        assert_eq!(totals.total.cents(), 0);
    }

    #[test]
    fn test_transaction_lines_snapshot() {
        let cart = scenario_cart();
        let lines = cart.to_transaction_lines();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].unit_price_cents, 99_900);
        assert_eq!(lines[1].quantity, 2);
        assert_eq!(lines[1].line_total_cents, 49_800);
    }
}
