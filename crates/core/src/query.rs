//! Query tokenization and the product filter predicate.
//!
//! The filter is a plain value built from tokens. Storage backends render or
//! evaluate it; nothing here knows about SQL.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Upper bound on rows returned by a catalog search.
pub const MAX_RESULTS: usize = 10;

/// Lowercases the query and splits it on whitespace.
///
/// Leading and trailing punctuation is trimmed from each token so `"dress,"`
/// reads as `"dress"`; inner characters (`"t-shirt"`) are kept.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(|token| token.trim_matches(|ch: char| !ch.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchColumn {
    Name,
    Description,
    Colour,
    Brand,
}

impl SearchColumn {
    pub const ALL: [SearchColumn; 4] = [Self::Name, Self::Description, Self::Colour, Self::Brand];

    pub fn column_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Colour => "colour",
            Self::Brand => "brand",
        }
    }

    fn value(self, product: &Product) -> Option<&str> {
        match self {
            Self::Name => product.name.as_deref(),
            Self::Description => product.description.as_deref(),
            Self::Colour => product.colour.as_deref(),
            Self::Brand => product.brand.as_deref(),
        }
    }
}

/// How per-token clauses combine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// A row matches when any token matches any column.
    #[default]
    Any,
    /// A row matches only when every token matches some column.
    All,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            other => Err(format!("unsupported match mode `{other}` (expected any|all)")),
        }
    }
}

/// One token tested as a case-insensitive substring of any of `columns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenClause {
    pub token: String,
    pub columns: Vec<SearchColumn>,
}

impl TokenClause {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), columns: SearchColumn::ALL.to_vec() }
    }

    /// `LIKE` pattern for this token with wildcard characters escaped by `\`.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.token.len() + 2);
        pattern.push('%');
        for ch in self.token.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.columns.iter().any(|column| {
            column
                .value(product)
                .map(|value| value.to_lowercase().contains(&self.token))
                .unwrap_or(false)
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductFilter {
    pub mode: MatchMode,
    pub clauses: Vec<TokenClause>,
}

impl ProductFilter {
    pub fn from_tokens<I, S>(tokens: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { mode, clauses: tokens.into_iter().map(TokenClause::new).collect() }
    }

    pub fn from_query(query: &str, mode: MatchMode) -> Self {
        Self::from_tokens(tokenize(query), mode)
    }

    /// An empty filter matches nothing.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.clauses.iter().map(|clause| clause.token.as_str()).collect()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if self.is_empty() {
            return false;
        }
        match self.mode {
            MatchMode::Any => self.clauses.iter().any(|clause| clause.matches(product)),
            MatchMode::All => self.clauses.iter().all(|clause| clause.matches(product)),
        }
    }
}

/// Orders by `avg_rating` descending with unrated rows last.
pub fn compare_by_rating(left: &Product, right: &Product) -> Ordering {
    match (left.avg_rating, right.avg_rating) {
        (Some(left), Some(right)) => right.total_cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts by rating (stable, nulls last) and keeps at most `limit` rows.
pub fn rank_products(mut products: Vec<Product>, limit: usize) -> Vec<Product> {
    products.sort_by(compare_by_rating);
    products.truncate(limit);
    products
}
