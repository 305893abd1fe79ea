use std::sync::Arc;

use stylist_core::domain::product::Product;
use stylist_core::query::{MatchMode, ProductFilter, MAX_RESULTS};
use stylist_db::repositories::ProductRepository;
use tracing::{debug, error};

/// Catalog lookup that reports storage failures to the log and answers with
/// no rows instead of an error.
#[derive(Clone)]
pub struct CatalogSearch {
    repository: Arc<dyn ProductRepository>,
    match_mode: MatchMode,
}

impl CatalogSearch {
    pub fn new(repository: Arc<dyn ProductRepository>, match_mode: MatchMode) -> Self {
        Self { repository, match_mode }
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub async fn search(&self, query: &str) -> Vec<Product> {
        let filter = ProductFilter::from_query(query, self.match_mode);
        if filter.is_empty() {
            debug!(event_name = "search.products.no_terms");
            return Vec::new();
        }

        match self.repository.search(&filter, MAX_RESULTS).await {
            Ok(products) => {
                debug!(
                    event_name = "search.products.completed",
                    terms = ?filter.tokens(),
                    match_mode = ?self.match_mode,
                    found = products.len(),
                );
                products
            }
            Err(storage_error) => {
                error!(
                    event_name = "search.products.storage_failed",
                    terms = ?filter.tokens(),
                    error = %storage_error,
                    "catalog search failed; answering with no results"
                );
                Vec::new()
            }
        }
    }
}
