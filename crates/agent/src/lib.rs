//! Assistant runtime for the fashion product search widget.
//!
//! Every query runs the same short pipeline:
//! 1. **Topic gate** (`guardrails`) - reject queries with no fashion term
//! 2. **Catalog search** (`search`) - up to ten best-rated matching products
//! 3. **Advice** (`advisory`) - generated text when the catalog has nothing,
//!    canned advice when generation fails
//!
//! # Key Types
//!
//! - `ShopAssistant` - Runs the pipeline (see `runtime` module)
//! - `TextGenerator` - Pluggable text generation backend
//! - `AssistantReply` - What the user is shown
//!
//! No stage surfaces an error to the caller. Storage and generation failures
//! are logged and replaced by an empty result or canned advice.

pub mod advisory;
pub mod guardrails;
pub mod llm;
pub mod runtime;
pub mod search;

pub use advisory::{AdvisoryResponder, FallbackExt};
pub use guardrails::{GuardrailDecision, TopicGuardrail};
pub use llm::{DisabledTextGenerator, GenerationError, HostedTextGenerator, TextGenerator};
pub use runtime::{AssistantReply, ShopAssistant};
pub use search::CatalogSearch;
