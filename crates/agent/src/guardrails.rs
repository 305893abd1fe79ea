use stylist_core::gate::{is_in_domain, matched_terms, OUT_OF_DOMAIN_GUIDANCE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardrailDecision {
    Allow { matched_terms: Vec<&'static str> },
    Deny { reason_code: &'static str, user_message: String },
}

impl GuardrailDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow { .. })
    }
}

/// Keeps the assistant on fashion topics.
#[derive(Clone, Copy, Debug, Default)]
pub struct TopicGuardrail;

impl TopicGuardrail {
    pub fn evaluate(&self, query: &str) -> GuardrailDecision {
        if is_in_domain(query) {
            GuardrailDecision::Allow { matched_terms: matched_terms(query) }
        } else {
            GuardrailDecision::Deny {
                reason_code: "out_of_domain",
                user_message: OUT_OF_DOMAIN_GUIDANCE.to_string(),
            }
        }
    }
}
