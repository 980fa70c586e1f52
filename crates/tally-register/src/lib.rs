//! # tally-register: Checkout Sessions for Tally POS
//!
//! The orchestration layer on top of [`tally_core`]: one
//! [`CheckoutSession`] per register owns a cart and discount, looks
//! products up in a read-only [`Catalog`], and emits immutable
//! [`Transaction`](tally_core::Transaction) snapshots to the caller's
//! receipt/payment sink.
//!
//! ## What lives here vs. in tally-core
//!
//! - **here**: the state machine (Building ⇄ AwaitingPayment), catalog
//!   lookup, configuration, structured logging
//! - **core**: every monetary rule; this crate never does arithmetic
//!
//! ## Example
//!
//! ```rust
//! use tally_core::{Discount, Money, Product, Tender};
//! use tally_register::{Catalog, CheckoutSession, RegisterConfig};
//!
//! let catalog = Catalog::new(vec![Product {
//!     id: "1".into(),
//!     name: "Phone".into(),
//!     barcode: None,
//!     description: None,
//!     category: "Electronics".into(),
//!     price_cents: 99_900,
//!     stock: 15,
//! }]);
//!
//! let mut session = CheckoutSession::new(RegisterConfig::default());
//! session.add_item(&catalog, "1").unwrap();
//! session.apply_discount(Discount::percentage(1000)).unwrap();
//!
//! let due = session.begin_checkout().unwrap();
//! let tx = session.checkout(Tender::cash(due.total + Money::from_cents(100))).unwrap();
//! assert_eq!(tx.change_due_cents, 100);
//! assert!(session.cart().is_empty());
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;

pub use catalog::Catalog;
pub use config::RegisterConfig;
pub use error::{RegisterError, RegisterResult};
pub use session::{CheckoutSession, SessionPhase};
