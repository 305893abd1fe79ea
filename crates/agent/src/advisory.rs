use std::sync::Arc;

use stylist_core::fallback::fallback_response;
use tracing::{info, warn};

use crate::llm::{GeneratedText, GenerationError, TextGenerator};

pub fn advice_prompt(query: &str) -> String {
    format!(
        "You are a helpful fashion advisor. A customer is asking about: '{query}'\n\
         Please provide specific fashion advice and recommendations. Focus on:\n\
         1. Style suggestions\n\
         2. Color combinations\n\
         3. Occasion appropriateness\n\
         4. Practical tips\n\
         Keep the response friendly, specific, and fashion-focused."
    )
}

/// Collapses a generation attempt into user-facing text.
pub trait FallbackExt {
    fn or_fallback(self, query: &str) -> String;
}

impl FallbackExt for Result<GeneratedText, GenerationError> {
    fn or_fallback(self, query: &str) -> String {
        match self {
            Ok(text) => {
                info!(event_name = "advisory.generation.succeeded", chars = text.0.len());
                text.into_inner()
            }
            Err(GenerationError::Disabled) => fallback_response(query),
            Err(error) => {
                warn!(
                    event_name = "advisory.generation.failed",
                    error = %error,
                    "text generation failed; using canned advice"
                );
                fallback_response(query)
            }
        }
    }
}

/// Answers queries the catalog had nothing for. Never fails.
#[derive(Clone)]
pub struct AdvisoryResponder {
    generator: Arc<dyn TextGenerator>,
}

impl AdvisoryResponder {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One generation attempt, no retry.
    pub async fn respond(&self, query: &str) -> String {
        self.generator.generate(&advice_prompt(query)).await.or_fallback(query)
    }
}
