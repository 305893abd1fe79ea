//! Domain types, keyword tables and configuration for the fashion search assistant.

pub mod config;
pub mod domain;
pub mod fallback;
pub mod gate;
pub mod query;

pub use domain::product::{Product, ProductSummary};
pub use fallback::{fallback_response, FallbackAdvice, FallbackRule, FALLBACK_RULES};
pub use gate::{is_in_domain, FASHION_VOCABULARY, OUT_OF_DOMAIN_GUIDANCE};
pub use query::{tokenize, MatchMode, ProductFilter, SearchColumn, TokenClause, MAX_RESULTS};
