//! # tally-core: Pure Business Logic for Tally POS
//!
//! The heart of the transaction engine: cart state, discount and tax math,
//! and the rules that keep derived monetary figures consistent under
//! quantity and discount edits. All of it is pure functions over owned
//! state with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Tally POS Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │            Host (UI, service, whatever drives a register)     │ │
//! │  └───────────────────────────────┬───────────────────────────────┘ │
//! │                                  │                                  │
//! │  ┌───────────────────────────────▼───────────────────────────────┐ │
//! │  │                    tally-register                             │ │
//! │  │    CheckoutSession, Catalog, RegisterConfig, logging          │ │
//! │  └───────────────────────────────┬───────────────────────────────┘ │
//! │                                  │                                  │
//! │  ┌───────────────────────────────▼───────────────────────────────┐ │
//! │  │               ★ tally-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌────────────┐         │ │
//! │  │   │  money  │ │  types  │ │  cart   │ │ validation │         │ │
//! │  │   │  Money  │ │ Product │ │  Cart   │ │   rules    │         │ │
//! │  │   │ TaxRate │ │Discount │ │ Totals  │ │   checks   │         │ │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └────────────┘         │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure derivation**: `Cart::totals` is a deterministic function of
//!    cart + discount + tax rate, safe to recompute after every edit
//! 2. **Integer money**: all monetary values are cents (i64), percentages
//!    and tax rates are basis points; no floating point anywhere
//! 3. **Explicit errors**: typed `thiserror` enums, never strings or panics
//! 4. **Frozen prices**: a cart line captures its unit price at add time
//!    and acts as a quote; catalog edits never reach an open cart
//!
//! ## Example
//!
//! ```rust
//! use tally_core::cart::Cart;
//! use tally_core::types::{Discount, Product, TaxRate};
//!
//! let phone = Product {
//!     id: "1".into(),
//!     name: "Phone".into(),
//!     barcode: None,
//!     description: None,
//!     category: "Electronics".into(),
//!     price_cents: 99_900,
//!     stock: 15,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&phone, 1).unwrap();
//!
//! let totals = cart.totals(&Discount::percentage(1000), TaxRate::from_bps(1000));
//! assert_eq!(totals.total.cents(), 98_901); // (999 - 10%) + 10% tax
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, Totals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// Prevents runaway carts and keeps transaction sizes reasonable. Could be
/// made configurable per store in a future version.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// Prevents accidental over-ordering (typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Upper bound for percentage values, in basis points (100%).
pub const MAX_PERCENTAGE_BPS: i64 = 10_000;
