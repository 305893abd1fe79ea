use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A catalog row. Every column may be missing in externally populated data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub colour: Option<String>,
    pub brand: Option<String>,
    pub avg_rating: Option<f64>,
}

/// Display projection of a [`Product`] shared by the web form, the JSON API and the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub name: String,
    pub brand: String,
    pub colour: String,
    pub description: String,
    pub price: Option<String>,
    pub rating: Option<String>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone().unwrap_or_default(),
            brand: product.brand.clone().unwrap_or_default(),
            colour: product.colour.clone().unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.map(format_price),
            rating: product.avg_rating.filter(|rating| rating.is_finite()).map(format_rating),
        }
    }
}

/// Half-cent values round away from zero.
pub fn format_price(price: Decimal) -> String {
    format!("${:.2}", price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}/5")
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Product, ProductSummary};

    #[test]
    fn summary_formats_price_and_rating() {
        let product = Product {
            name: Some("Linen Shirt".to_string()),
            description: Some("Breathable summer shirt".to_string()),
            price: Some(Decimal::new(2950, 2)),
            colour: Some("White".to_string()),
            brand: Some("Coastline".to_string()),
            avg_rating: Some(4.26),
        };

        let summary = ProductSummary::from(&product);

        assert_eq!(summary.name, "Linen Shirt");
        assert_eq!(summary.price.as_deref(), Some("$29.50"));
        assert_eq!(summary.rating.as_deref(), Some("4.3/5"));
    }

    #[test]
    fn summary_rounds_price_to_cents() {
        let product = Product { price: Some(Decimal::new(19_999, 3)), ..Product::default() };

        assert_eq!(ProductSummary::from(&product).price.as_deref(), Some("$20.00"));
    }

    #[test]
    fn summary_rounds_half_cents_away_from_zero() {
        for (price, expected) in
            [(Decimal::new(2665, 3), "$2.67"), (Decimal::new(2675, 3), "$2.68")]
        {
            let product = Product { price: Some(price), ..Product::default() };
            assert_eq!(ProductSummary::from(&product).price.as_deref(), Some(expected));
        }
    }

    #[test]
    fn summary_tolerates_missing_fields() {
        let summary = ProductSummary::from(&Product::default());

        assert_eq!(summary.name, "");
        assert_eq!(summary.brand, "");
        assert_eq!(summary.price, None);
        assert_eq!(summary.rating, None);
    }

    #[test]
    fn summary_serializes_without_rating_when_absent() {
        let product = Product {
            name: Some("Canvas Tote".to_string()),
            price: Some(Decimal::new(1200, 2)),
            ..Product::default()
        };

        let value = serde_json::to_value(ProductSummary::from(&product)).expect("serialize");

        assert_eq!(value["price"], "$12.00");
        assert!(value["rating"].is_null());
    }
}
