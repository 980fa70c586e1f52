//! # Product Catalog
//!
//! Read-only, in-memory product lookup for the register.
//!
//! The catalog is an external collaborator to the transaction engine: the
//! session only ever reads from it (lookup by id when adding, substring
//! search for the product grid). Nothing here is mutated by a sale; stock
//! deduction is out of scope.

use tracing::debug;

use tally_core::validation::validate_search_query;
use tally_core::{Product, ValidationError};

/// An in-memory product catalog, unique by product id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from a product list.
    ///
    /// Later duplicates of an id are dropped; `get` must be unambiguous.
    pub fn new(products: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if unique.iter().any(|p| p.id == product.id) {
                debug!(product_id = %product.id, "Duplicate catalog id dropped");
                continue;
            }
            unique.push(product);
        }
        Catalog { products: unique }
    }

    /// Looks up a product by id.
    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Searches by case-insensitive substring on name or barcode.
    ///
    /// An empty query matches everything, mirroring an empty search box
    /// showing the full product grid.
    pub fn search(&self, query: &str) -> Result<Vec<&Product>, ValidationError> {
        let query = validate_search_query(query)?;
        let needle = query.to_lowercase();

        let hits: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.barcode
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&needle))
            })
            .collect();

        debug!(query = %query, hits = hits.len(), "Catalog search");
        Ok(hits)
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
