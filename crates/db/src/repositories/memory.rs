use tokio::sync::RwLock;

use stylist_core::domain::product::Product;
use stylist_core::query::{rank_products, ProductFilter};

use super::{ProductRepository, RepositoryError};

/// Catalog held in memory; evaluates filters with [`ProductFilter::matches`].
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products: RwLock::new(products) }
    }

    pub async fn insert(&self, product: Product) {
        self.products.write().await.push(product);
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn search(
        &self,
        filter: &ProductFilter,
        limit: usize,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = self.products.read().await;
        let matching =
            products.iter().filter(|product| filter.matches(product)).cloned().collect::<Vec<_>>();
        Ok(rank_products(matching, limit))
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.products.read().await.len() as u64)
    }
}
