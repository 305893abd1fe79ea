use std::sync::Arc;

use serde::Serialize;
use stylist_core::config::AppConfig;
use stylist_core::domain::product::ProductSummary;
use stylist_db::repositories::ProductRepository;
use tracing::info;

use crate::advisory::AdvisoryResponder;
use crate::guardrails::{GuardrailDecision, TopicGuardrail};
use crate::llm::{DisabledTextGenerator, GenerationError, HostedTextGenerator, TextGenerator};
use crate::search::CatalogSearch;

/// What one interaction shows the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssistantReply {
    OutOfDomain { message: String },
    Products { products: Vec<ProductSummary> },
    Advice { message: String },
}

impl AssistantReply {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfDomain { .. } => "out_of_domain",
            Self::Products { .. } => "products",
            Self::Advice { .. } => "advice",
        }
    }
}

/// Gate, then catalog, then advice.
#[derive(Clone)]
pub struct ShopAssistant {
    guardrail: TopicGuardrail,
    search: CatalogSearch,
    advisory: AdvisoryResponder,
}

impl ShopAssistant {
    pub fn new(search: CatalogSearch, advisory: AdvisoryResponder) -> Self {
        Self { guardrail: TopicGuardrail, search, advisory }
    }

    /// Wires the hosted generator, or the disabled one when generation is off.
    pub fn from_config(
        config: &AppConfig,
        repository: Arc<dyn ProductRepository>,
    ) -> Result<Self, GenerationError> {
        let generator: Arc<dyn TextGenerator> = if config.generation.enabled {
            Arc::new(HostedTextGenerator::new(&config.generation)?)
        } else {
            Arc::new(DisabledTextGenerator)
        };

        Ok(Self::new(
            CatalogSearch::new(repository, config.search.match_mode),
            AdvisoryResponder::new(generator),
        ))
    }

    pub async fn handle_query(&self, query: &str) -> AssistantReply {
        if let GuardrailDecision::Deny { reason_code, user_message } =
            self.guardrail.evaluate(query)
        {
            info!(event_name = "assistant.query.rejected", reason_code);
            return AssistantReply::OutOfDomain { message: user_message };
        }

        let products = self.search.search(query).await;
        if !products.is_empty() {
            info!(event_name = "assistant.query.products", count = products.len());
            return AssistantReply::Products {
                products: products.iter().map(ProductSummary::from).collect(),
            };
        }

        info!(event_name = "assistant.query.advice");
        AssistantReply::Advice { message: self.advisory.respond(query).await }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use stylist_core::config::AppConfig;
    use stylist_core::domain::product::Product;
    use stylist_core::query::MatchMode;
    use stylist_db::repositories::InMemoryProductRepository;

    use super::{AssistantReply, ShopAssistant};
    use crate::advisory::AdvisoryResponder;
    use crate::llm::DisabledTextGenerator;
    use crate::search::CatalogSearch;

    fn assistant() -> ShopAssistant {
        let repository = InMemoryProductRepository::with_products(vec![Product {
            name: Some("Classic Denim Jacket".to_string()),
            description: Some("Structured trucker jacket".to_string()),
            price: Some(Decimal::new(8950, 2)),
            colour: Some("Blue".to_string()),
            brand: Some("Riverside".to_string()),
            avg_rating: Some(4.4),
        }]);
        ShopAssistant::new(
            CatalogSearch::new(Arc::new(repository), MatchMode::Any),
            AdvisoryResponder::new(Arc::new(DisabledTextGenerator)),
        )
    }

    #[tokio::test]
    async fn off_topic_query_gets_guidance() {
        let reply = assistant().handle_query("what time is it").await;

        assert_eq!(reply.kind(), "out_of_domain");
    }

    #[tokio::test]
    async fn catalog_hit_returns_summaries() {
        let reply = assistant().handle_query("blue jacket").await;

        match reply {
            AssistantReply::Products { products } => {
                assert_eq!(products.len(), 1);
                assert_eq!(products[0].price.as_deref(), Some("$89.50"));
                assert_eq!(products[0].rating.as_deref(), Some("4.4/5"));
            }
            other => panic!("expected products, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn catalog_miss_falls_through_to_advice() {
        let reply = assistant().handle_query("formal dress").await;

        match reply {
            AssistantReply::Advice { message } => {
                assert!(message.starts_with("For a formal dress"));
            }
            other => panic!("expected advice, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reply_serializes_with_kind_tag() {
        let reply = assistant().handle_query("purple hat").await;

        let value = serde_json::to_value(&reply).expect("serialize");

        assert_eq!(value["kind"], "advice");
        assert!(value["message"].as_str().unwrap_or_default().contains("'purple hat'"));
    }

    #[test]
    fn offline_config_builds_without_http_client() {
        let mut config = AppConfig::default();
        config.generation.enabled = false;

        let repository = Arc::new(InMemoryProductRepository::default());
        assert!(ShopAssistant::from_config(&config, repository).is_ok());
    }
}
