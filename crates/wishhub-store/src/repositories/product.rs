//! Product repository.

use wishhub_core::error::AppError;
use wishhub_core::result::AppResult;
use wishhub_core::types::{ProductId, WishlistId};
use wishhub_entity::product::Product;

use crate::collection::DocumentCollection;

/// Stores product documents.
#[derive(Debug, Default)]
pub struct ProductRepository {
    docs: DocumentCollection<ProductId, Product>,
}

impl ProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            docs: DocumentCollection::new(),
        }
    }

    /// Inserts a new product.
    pub fn insert(&self, product: Product) -> Product {
        self.docs.insert(product.id, product.clone());
        product
    }

    /// Finds a product by id.
    pub fn find_by_id(&self, id: ProductId) -> AppResult<Product> {
        self.docs
            .get(&id)
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    /// Applies a mutation to the product document under its entry lock.
    pub fn update<F>(&self, id: ProductId, mutate: F) -> AppResult<Product>
    where
        F: FnOnce(&mut Product),
    {
        self.docs
            .update(&id, mutate)
            .map_err(|_| AppError::not_found("Product not found"))
    }

    /// Removes a product. Idempotent.
    pub fn delete(&self, id: ProductId) {
        self.docs.remove(&id);
    }

    /// Removes every product belonging to `wishlist_id`. Idempotent;
    /// returns the number removed.
    pub fn delete_by_wishlist(&self, wishlist_id: WishlistId) -> usize {
        let doomed: Vec<ProductId> = self
            .docs
            .find(|p| p.wishlist_id == wishlist_id)
            .into_iter()
            .map(|p| p.id)
            .collect();
        let count = doomed.len();
        for id in doomed {
            self.docs.remove(&id);
        }
        count
    }

    /// Returns the products with the given ids, in the order given,
    /// skipping any that no longer exist.
    pub fn find_by_ids(&self, ids: &[ProductId]) -> Vec<Product> {
        ids.iter().filter_map(|id| self.docs.get(id)).collect()
    }

    /// Returns the total product count.
    pub fn count(&self) -> usize {
        self.docs.len()
    }
}
