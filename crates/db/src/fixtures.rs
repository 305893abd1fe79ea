use crate::connection::DbPool;
use crate::repositories::RepositoryError;

struct CatalogRow {
    id: i64,
    name: &'static str,
    description: &'static str,
    price: f64,
    colour: &'static str,
    brand: &'static str,
    avg_rating: Option<f64>,
}

/// Demo catalog. Some rows are deliberately unrated.
const DEMO_ROWS: &[CatalogRow] = &[
    CatalogRow {
        id: 1,
        name: "Floral Midi Dress",
        description: "Flowing midi dress with a floral print",
        price: 59.99,
        colour: "Yellow",
        brand: "Bloom & Co",
        avg_rating: Some(4.6),
    },
    CatalogRow {
        id: 2,
        name: "Classic Denim Jacket",
        description: "Structured trucker jacket in rigid denim",
        price: 89.50,
        colour: "Blue",
        brand: "Riverside",
        avg_rating: Some(4.4),
    },
    CatalogRow {
        id: 3,
        name: "Slim Fit Jeans",
        description: "Mid-rise stretch denim with a tapered leg",
        price: 49.00,
        colour: "Indigo",
        brand: "Riverside",
        avg_rating: Some(4.1),
    },
    CatalogRow {
        id: 4,
        name: "Silk Evening Gown",
        description: "Floor-length silk gown for formal events",
        price: 189.00,
        colour: "Black",
        brand: "Maison Vela",
        avg_rating: Some(4.8),
    },
    CatalogRow {
        id: 5,
        name: "Cotton Crew Tee",
        description: "Everyday crew neck t-shirt in soft cotton",
        price: 15.00,
        colour: "White",
        brand: "Basics Lab",
        avg_rating: Some(3.9),
    },
    CatalogRow {
        id: 6,
        name: "Linen Button Shirt",
        description: "Breathable linen shirt for warm days",
        price: 42.00,
        colour: "Beige",
        brand: "Coastline",
        avg_rating: None,
    },
    CatalogRow {
        id: 7,
        name: "Leather Chelsea Boots",
        description: "Pull-on boots in polished leather",
        price: 129.00,
        colour: "Brown",
        brand: "Hartwell",
        avg_rating: Some(4.5),
    },
    CatalogRow {
        id: 8,
        name: "Canvas Sneakers",
        description: "Low-cut sneakers with a cushioned sole",
        price: 55.00,
        colour: "White",
        brand: "Stride",
        avg_rating: Some(4.0),
    },
    CatalogRow {
        id: 9,
        name: "Wool Overcoat",
        description: "Tailored single-breasted coat in a wool blend",
        price: 210.00,
        colour: "Grey",
        brand: "Hartwell",
        avg_rating: None,
    },
    CatalogRow {
        id: 10,
        name: "Cashmere Scarf",
        description: "Lightweight scarf in brushed cashmere",
        price: 65.00,
        colour: "Red",
        brand: "Maison Vela",
        avg_rating: Some(4.7),
    },
    CatalogRow {
        id: 11,
        name: "Pleated Midi Skirt",
        description: "Pleated skirt with an elastic waist",
        price: 38.00,
        colour: "Green",
        brand: "Bloom & Co",
        avg_rating: Some(3.6),
    },
    CatalogRow {
        id: 12,
        name: "Oversized Hoodie",
        description: "Fleece-lined hoodie with a kangaroo pocket",
        price: 45.00,
        colour: "Grey",
        brand: "Stride",
        avg_rating: Some(4.2),
    },
    CatalogRow {
        id: 13,
        name: "Satin Slip Dress",
        description: "Bias-cut slip dress in satin",
        price: 74.00,
        colour: "Blue",
        brand: "Maison Vela",
        avg_rating: None,
    },
    CatalogRow {
        id: 14,
        name: "Leather Belt",
        description: "Full-grain leather belt with a brass buckle",
        price: 35.00,
        colour: "Black",
        brand: "Hartwell",
        avg_rating: Some(4.3),
    },
    CatalogRow {
        id: 15,
        name: "Straw Sun Hat",
        description: "Wide-brim hat woven from natural straw",
        price: 28.00,
        colour: "Natural",
        brand: "Coastline",
        avg_rating: Some(3.8),
    },
    CatalogRow {
        id: 16,
        name: "Knit Cardigan",
        description: "Chunky knit cardigan with horn buttons",
        price: 68.00,
        colour: "Cream",
        brand: "Basics Lab",
        avg_rating: None,
    },
];

/// Deterministic demo catalog for local runs and smoke checks.
pub struct DemoCatalog;

impl DemoCatalog {
    pub fn product_count() -> usize {
        DEMO_ROWS.len()
    }

    /// Upserts the demo rows by id; running it twice leaves the same catalog.
    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        for row in DEMO_ROWS {
            sqlx::query(
                "INSERT INTO fashion_items (id, name, description, price, colour, brand, avg_rating)
                 VALUES (?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     description = excluded.description,
                     price = excluded.price,
                     colour = excluded.colour,
                     brand = excluded.brand,
                     avg_rating = excluded.avg_rating",
            )
            .bind(row.id)
            .bind(row.name)
            .bind(row.description)
            .bind(row.price)
            .bind(row.colour)
            .bind(row.brand)
            .bind(row.avg_rating)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(SeedResult { products_seeded: DEMO_ROWS.len() })
    }

    /// Checks every demo row is present with its seeded name.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut missing = Vec::new();

        for row in DEMO_ROWS {
            let present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM fashion_items WHERE id = ?1 AND name = ?2)",
            )
            .bind(row.id)
            .bind(row.name)
            .fetch_one(pool)
            .await?;
            if present != 1 {
                missing.push(row.name);
            }
        }

        Ok(VerificationResult { all_present: missing.is_empty(), missing })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedResult {
    pub products_seeded: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub all_present: bool,
    pub missing: Vec<&'static str>,
}
