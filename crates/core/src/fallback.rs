//! Canned style advice used when text generation is unavailable.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackAdvice {
    ByOccasion { casual: &'static str, formal: &'static str, general: &'static str },
    Fixed(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackRule {
    pub keyword: &'static str,
    pub advice: FallbackAdvice,
}

/// Scanned in order; the first keyword found as a substring of the query wins.
pub const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule {
        keyword: "top",
        advice: FallbackAdvice::ByOccasion {
            casual: "For a casual top, I recommend a well-fitted cotton t-shirt or a comfortable blouse. Consider these style tips:\n\
                     - Choose breathable fabrics for comfort\n\
                     - Solid colors are versatile and easy to mix\n\
                     - Look for details like interesting necklines\n\
                     - Pair with jeans or skirts for a complete look",
            formal: "For a formal top, consider a silk blouse or a structured shirt. Style tips:\n\
                     - Stick to classic colors like white, black, or navy\n\
                     - Look for quality materials that drape well\n\
                     - Choose appropriate necklines for the occasion\n\
                     - Consider the fit around shoulders and bust",
            general: "When choosing a top, consider these key factors:\n\
                      - Your body type and what styles flatter you\n\
                      - The occasion you're dressing for\n\
                      - The season and weather\n\
                      - Your existing wardrobe for mix-and-match options",
        },
    },
    FallbackRule {
        keyword: "dress",
        advice: FallbackAdvice::ByOccasion {
            casual: "For a casual dress, try an A-line or wrap style. Key recommendations:\n\
                     - Choose comfortable, breathable fabrics\n\
                     - Look for versatile lengths (knee-length is always safe)\n\
                     - Consider patterns that suit your style\n\
                     - Add pockets for practicality",
            formal: "For a formal dress, focus on elegant cuts and quality materials. Tips:\n\
                     - Choose appropriate length for the occasion\n\
                     - Consider the venue and dress code\n\
                     - Look for flattering silhouettes\n\
                     - Pay attention to the fit at waist and hips",
            general: "When selecting a dress, keep in mind:\n\
                      - Your body shape and what styles complement it\n\
                      - The event or occasion\n\
                      - The season and appropriate fabrics\n\
                      - Accessorizing options",
        },
    },
    FallbackRule {
        keyword: "jeans",
        advice: FallbackAdvice::Fixed(
            "For jeans, focus on fit and versatility. Consider:\n\
             - Your body type and preferred rise (high/mid/low)\n\
             - Stretch content for comfort\n\
             - Wash (dark washes are more versatile)\n\
             - Length and hem style",
        ),
    },
    FallbackRule {
        keyword: "shoes",
        advice: FallbackAdvice::Fixed(
            "When choosing shoes, balance style and comfort:\n\
             - Consider the occasion and outfit pairing\n\
             - Look for quality materials and construction\n\
             - Ensure proper fit and comfort\n\
             - Think about versatility in your wardrobe",
        ),
    },
    FallbackRule {
        keyword: "jacket",
        advice: FallbackAdvice::Fixed(
            "For jackets, consider these factors:\n\
             - The climate and season\n\
             - Your typical daily activities\n\
             - Versatility with your existing wardrobe\n\
             - Quality of construction and materials",
        ),
    },
    FallbackRule {
        keyword: "accessories",
        advice: FallbackAdvice::Fixed(
            "When selecting accessories:\n\
             - Choose pieces that complement your outfits\n\
             - Consider your personal style\n\
             - Think about versatility\n\
             - Focus on quality over quantity",
        ),
    },
];

impl FallbackAdvice {
    fn select(&self, lowered_query: &str) -> &'static str {
        match *self {
            Self::Fixed(text) => text,
            Self::ByOccasion { formal, .. } if lowered_query.contains("formal") => formal,
            Self::ByOccasion { casual, .. } if lowered_query.contains("casual") => casual,
            Self::ByOccasion { general, .. } => general,
        }
    }
}

/// The first rule whose keyword occurs in the lowercased query.
pub fn matching_rule(query: &str) -> Option<&'static FallbackRule> {
    let lowered = query.to_lowercase();
    FALLBACK_RULES.iter().find(|rule| lowered.contains(rule.keyword))
}

/// Deterministic advice for any query. Never empty.
pub fn fallback_response(query: &str) -> String {
    match matching_rule(query) {
        Some(rule) => rule.advice.select(&query.to_lowercase()).to_string(),
        None => general_advice(query),
    }
}

/// Five general tips that echo the query as typed.
pub fn general_advice(query: &str) -> String {
    format!(
        "Let me help you with your fashion query about '{query}'. Here are some general style tips:\n\
         1. Consider your body type and what styles make you feel confident\n\
         2. Think about the occasion and appropriate dress codes\n\
         3. Look for quality materials and good fit\n\
         4. Choose versatile pieces that can be mixed and matched\n\
         5. Pay attention to comfort as well as style"
    )
}

#[cfg(test)]
mod tests {
    use super::{fallback_response, general_advice, matching_rule, FallbackAdvice, FALLBACK_RULES};

    fn occasion_text(keyword: &str, occasion: &str) -> &'static str {
        let rule = FALLBACK_RULES.iter().find(|rule| rule.keyword == keyword).expect("rule");
        match rule.advice {
            FallbackAdvice::ByOccasion { casual, formal, general } => match occasion {
                "casual" => casual,
                "formal" => formal,
                _ => general,
            },
            FallbackAdvice::Fixed(text) => text,
        }
    }

    #[test]
    fn formal_dress_uses_formal_entry() {
        assert_eq!(
            fallback_response("Looking for a formal dress for a gala"),
            occasion_text("dress", "formal")
        );
    }

    #[test]
    fn casual_top_uses_casual_entry() {
        assert_eq!(fallback_response("casual top for weekends"), occasion_text("top", "casual"));
    }

    #[test]
    fn formal_takes_precedence_over_casual() {
        assert_eq!(fallback_response("casual or formal dress?"), occasion_text("dress", "formal"));
    }

    #[test]
    fn occasion_free_query_uses_general_entry() {
        assert_eq!(fallback_response("DRESS ideas"), occasion_text("dress", "general"));
    }

    #[test]
    fn jeans_returns_fixed_text_verbatim() {
        assert_eq!(fallback_response("need new jeans"), occasion_text("jeans", ""));
        assert!(fallback_response("need new jeans").starts_with("For jeans, focus on fit"));
    }

    #[test]
    fn fixed_entries_ignore_occasion_words() {
        assert_eq!(fallback_response("formal shoes"), occasion_text("shoes", "formal"));
    }

    #[test]
    fn table_order_decides_between_keywords() {
        assert_eq!(matching_rule("top and dress").map(|rule| rule.keyword), Some("top"));
        assert_eq!(matching_rule("jacket with jeans").map(|rule| rule.keyword), Some("jeans"));
    }

    #[test]
    fn keywords_match_as_substrings() {
        assert_eq!(matching_rule("a stylish laptop sleeve").map(|rule| rule.keyword), Some("top"));
    }

    #[test]
    fn unmatched_query_gets_general_advice_with_query_echoed() {
        let response = fallback_response("Purple Hat");

        assert_eq!(response, general_advice("Purple Hat"));
        assert!(response.contains("'Purple Hat'"));
        assert!(response.contains("5. Pay attention to comfort as well as style"));
    }

    #[test]
    fn empty_query_still_gets_advice() {
        let response = fallback_response("");
        assert!(!response.is_empty());
        assert!(response.contains("1. Consider your body type"));
    }

    #[test]
    fn every_entry_is_non_empty() {
        for rule in FALLBACK_RULES {
            for occasion in ["casual", "formal", "general"] {
                assert!(!occasion_text(rule.keyword, occasion).is_empty(), "{}", rule.keyword);
            }
        }
    }
}
