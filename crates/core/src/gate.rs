//! Fashion topic gate.
//!
//! A query is in-domain when at least one of its tokens equals a vocabulary
//! term. Matching is exact per token: no stemming, prefixes or synonyms.

use std::collections::HashSet;

use crate::query::tokenize;

/// Garments, colours, materials, style adjectives and accessories.
///
/// Multi-word entries never match a single token; they are kept so the table
/// stays a faithful record of the accepted vocabulary.
pub const FASHION_VOCABULARY: &[&str] = &[
    "clothing", "fashion", "wear", "dress", "shirt", "pants", "jeans", "skirt", "shoes",
    "boots", "sneakers", "jacket", "coat", "sweater", "top", "bottom", "outfit", "style",
    "accessory", "accessories", "bag", "scarf", "hat", "belt", "jewelry", "necklace",
    "bracelet", "ring", "earrings", "watch", "formal", "casual", "trendy", "vintage",
    "modern", "classic", "elegant", "comfortable", "fit", "size", "color", "pattern",
    "design", "brand", "wardrobe", "closet", "attire", "apparel", "clothes", "dressed",
    "dressing", "wearing", "white", "black", "blue", "red", "green", "yellow", "purple",
    "pink", "brown", "grey", "gray", "orange", "cotton", "leather", "silk", "wool", "denim",
    "linen", "polyester", "suit", "blazer", "blouse", "hoodie", "sweatshirt", "cardigan",
    "dress shirt", "t-shirt", "tee", "tank top", "shorts", "leggings", "socks", "underwear",
    "swimwear", "beachwear",
];

/// Shown to the user when a query is rejected by the gate.
pub const OUT_OF_DOMAIN_GUIDANCE: &str = "I'm a fashion-focused assistant! I can only help you with:\n\
- Fashion advice\n\
- Clothing recommendations\n\
- Style suggestions\n\
- Outfit ideas\n\n\
Please ask me something about fashion or clothing instead!";

pub fn is_in_domain(query: &str) -> bool {
    let tokens: HashSet<String> = tokenize(query).into_iter().collect();
    FASHION_VOCABULARY.iter().any(|term| tokens.contains(*term))
}

/// Vocabulary terms present in the query, in vocabulary order.
pub fn matched_terms(query: &str) -> Vec<&'static str> {
    let tokens: HashSet<String> = tokenize(query).into_iter().collect();
    FASHION_VOCABULARY.iter().copied().filter(|term| tokens.contains(*term)).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{is_in_domain, matched_terms, FASHION_VOCABULARY};

    #[test]
    fn vocabulary_has_no_duplicates() {
        let unique: HashSet<&str> = FASHION_VOCABULARY.iter().copied().collect();
        assert_eq!(unique.len(), FASHION_VOCABULARY.len());
    }

    #[test]
    fn accepts_queries_with_a_vocabulary_token() {
        assert!(is_in_domain("I love red shoes"));
        assert!(is_in_domain("Suggest a white top"));
        assert!(is_in_domain("Recommend BLUE jeans"));
    }

    #[test]
    fn rejects_queries_without_vocabulary_tokens() {
        assert!(!is_in_domain("what time is it"));
        assert!(!is_in_domain("the good one"));
    }

    #[test]
    fn rejects_empty_and_whitespace_queries() {
        assert!(!is_in_domain(""));
        assert!(!is_in_domain("   \t\n"));
    }

    #[test]
    fn requires_whole_token_equality() {
        assert!(!is_in_domain("dresses"));
        assert!(!is_in_domain("redder"));
        assert!(!is_in_domain("shoe"));
    }

    #[test]
    fn trims_surrounding_punctuation_from_tokens() {
        assert!(is_in_domain("any ideas for a dress,"));
        assert!(is_in_domain("(scarf)"));
        assert!(is_in_domain("need a t-shirt!"));
    }

    #[test]
    fn multi_word_terms_cannot_match_a_single_token() {
        assert!(!is_in_domain("tank"));
        assert_eq!(matched_terms("tank top"), vec!["top"]);
    }

    #[test]
    fn matched_terms_reports_each_hit_once() {
        assert_eq!(matched_terms("red red dress"), vec!["dress", "red"]);
    }
}
