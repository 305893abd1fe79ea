use async_trait::async_trait;
use thiserror::Error;

use stylist_core::domain::product::Product;
use stylist_core::query::ProductFilter;

pub mod memory;
pub mod product;

pub use memory::InMemoryProductRepository;
pub use product::SqlProductRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Read access to the product catalog.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Rows matching `filter`, best rated first with unrated rows last, at most `limit`.
    async fn search(
        &self,
        filter: &ProductFilter,
        limit: usize,
    ) -> Result<Vec<Product>, RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
