use rust_decimal::Decimal;
use sqlx::{QueryBuilder, Row, Sqlite};

use stylist_core::domain::product::Product;
use stylist_core::query::{MatchMode, ProductFilter};

use super::{ProductRepository, RepositoryError};
use crate::DbPool;

const SELECT_PRODUCTS: &str = "SELECT name, description, CAST(price AS REAL) AS price, colour, \
                               brand, CAST(avg_rating AS REAL) AS avg_rating FROM fashion_items";

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rows fetched per round trip while filling a result page.
const CANDIDATE_PAGE: usize = 64;

/// Matches column values holding any character outside ASCII.
const NON_ASCII_GLOB: &str = "*[^\u{1}-\u{7f}]*";

/// Renders `filter` as a parameterized query for one page of candidate rows.
///
/// SQLite folds ASCII case only. Each column is a candidate when its lowercased
/// value `LIKE`s the escaped token or when it holds non-ASCII text; the caller
/// settles the latter with [`ProductFilter::matches`]. Token clauses are joined
/// by `OR` or `AND` per the match mode.
pub fn candidate_query(
    filter: &ProductFilter,
    page_size: usize,
    offset: usize,
) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::new(SELECT_PRODUCTS);
    builder.push(" WHERE ");

    if filter.is_empty() {
        builder.push("0");
    }

    let joiner = match filter.mode {
        MatchMode::Any => " OR ",
        MatchMode::All => " AND ",
    };
    for (clause_index, clause) in filter.clauses.iter().enumerate() {
        if clause_index > 0 {
            builder.push(joiner);
        }
        let pattern = clause.like_pattern();
        builder.push("(");
        for (column_index, column) in clause.columns.iter().enumerate() {
            if column_index > 0 {
                builder.push(" OR ");
            }
            let column = column.column_name();
            builder.push(format!("LOWER({column}) LIKE "));
            builder.push_bind(pattern.clone());
            builder.push(format!(" ESCAPE '\\' OR {column} GLOB "));
            builder.push_bind(NON_ASCII_GLOB);
        }
        builder.push(")");
    }

    builder.push(" ORDER BY avg_rating IS NULL, avg_rating DESC, rowid LIMIT ");
    builder.push_bind(i64::try_from(page_size).unwrap_or(i64::MAX));
    builder.push(" OFFSET ");
    builder.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));
    builder
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let name: Option<String> =
        row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let description: Option<String> =
        row.try_get("description").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let price: Option<f64> =
        row.try_get("price").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let colour: Option<String> =
        row.try_get("colour").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let brand: Option<String> =
        row.try_get("brand").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let avg_rating: Option<f64> =
        row.try_get("avg_rating").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    Ok(Product {
        name,
        description,
        price: price.and_then(Decimal::from_f64_retain),
        colour,
        brand,
        avg_rating,
    })
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn search(
        &self,
        filter: &ProductFilter,
        limit: usize,
    ) -> Result<Vec<Product>, RepositoryError> {
        if filter.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut found = Vec::with_capacity(limit);
        let mut offset = 0;
        loop {
            let mut builder = candidate_query(filter, CANDIDATE_PAGE, offset);
            let rows = builder.build().fetch_all(&self.pool).await?;

            for row in &rows {
                let product = row_to_product(row)?;
                if filter.matches(&product) {
                    found.push(product);
                    if found.len() == limit {
                        return Ok(found);
                    }
                }
            }

            if rows.len() < CANDIDATE_PAGE {
                return Ok(found);
            }
            offset += CANDIDATE_PAGE;
        }
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fashion_items")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use stylist_core::domain::product::ProductSummary;
    use stylist_core::query::{MatchMode, ProductFilter, MAX_RESULTS};

    use super::{candidate_query, SqlProductRepository, CANDIDATE_PAGE};
    use crate::repositories::{ProductRepository, RepositoryError};
    use crate::{connect_with_settings, migrations, DbPool};

    async fn setup() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    async fn insert(
        pool: &DbPool,
        name: &str,
        description: Option<&str>,
        colour: Option<&str>,
        brand: Option<&str>,
        rating: Option<f64>,
    ) {
        sqlx::query(
            "INSERT INTO fashion_items (name, description, price, colour, brand, avg_rating)
             VALUES (?, ?, 25.5, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(colour)
        .bind(brand)
        .bind(rating)
        .execute(pool)
        .await
        .expect("insert product");
    }

    fn names(products: &[stylist_core::Product]) -> Vec<String> {
        products.iter().map(|product| product.name.clone().unwrap_or_default()).collect()
    }

    #[test]
    fn query_binds_every_token_for_every_column() {
        let filter = ProductFilter::from_query("red formal", MatchMode::Any);
        let builder = candidate_query(&filter, 64, 0);
        let sql = builder.sql();

        assert_eq!(sql.matches("LIKE ?").count(), 8);
        assert_eq!(sql.matches("GLOB ?").count(), 8);
        assert_eq!(sql.matches(") OR (").count(), 1);
        assert!(sql.contains("LOWER(colour) LIKE ? ESCAPE '\\' OR colour GLOB ?"));
        assert!(sql.ends_with(
            "ORDER BY avg_rating IS NULL, avg_rating DESC, rowid LIMIT ? OFFSET ?"
        ));
    }

    #[test]
    fn all_mode_joins_clauses_with_and() {
        let filter = ProductFilter::from_query("red formal", MatchMode::All);
        let builder = candidate_query(&filter, 64, 0);

        assert_eq!(builder.sql().matches(") AND (").count(), 1);
    }

    #[tokio::test]
    async fn search_is_disjunctive_across_tokens() {
        let pool = setup().await;
        insert(&pool, "Denim Jacket", Some("Trucker jacket"), Some("Blue"), None, Some(4.0)).await;
        insert(&pool, "Summer Dress", Some("Light and airy"), Some("Yellow"), None, Some(4.5))
            .await;
        insert(&pool, "Leather Belt", Some("Full grain"), Some("Brown"), None, Some(5.0)).await;

        let repo = SqlProductRepository::new(pool.clone());
        let filter = ProductFilter::from_query("blue dress", MatchMode::Any);
        let found = repo.search(&filter, MAX_RESULTS).await.expect("search");

        assert_eq!(names(&found), vec!["Summer Dress", "Denim Jacket"]);
        pool.close().await;
    }

    #[tokio::test]
    async fn search_in_all_mode_requires_every_token() {
        let pool = setup().await;
        insert(&pool, "Denim Jacket", None, Some("Blue"), None, None).await;
        insert(&pool, "Slip Dress", None, Some("Blue"), None, None).await;

        let repo = SqlProductRepository::new(pool.clone());
        let filter = ProductFilter::from_query("blue dress", MatchMode::All);
        let found = repo.search(&filter, MAX_RESULTS).await.expect("search");

        assert_eq!(names(&found), vec!["Slip Dress"]);
        pool.close().await;
    }

    #[tokio::test]
    async fn search_matches_brand_and_description_case_insensitively() {
        let pool = setup().await;
        insert(&pool, "Tee", Some("Made from ORGANIC cotton"), None, None, None).await;
        insert(&pool, "Cap", None, None, Some("Organica"), None).await;
        insert(&pool, "Sock", None, None, None, None).await;

        let repo = SqlProductRepository::new(pool.clone());
        let filter = ProductFilter::from_query("Organic", MatchMode::Any);
        let found = repo.search(&filter, MAX_RESULTS).await.expect("search");

        assert_eq!(names(&found), vec!["Tee", "Cap"]);
        pool.close().await;
    }

    #[tokio::test]
    async fn search_orders_by_rating_with_nulls_last_and_caps_results() {
        let pool = setup().await;
        for index in 0..14 {
            let rating = if index % 3 == 0 { None } else { Some(f64::from(index) / 3.0) };
            insert(&pool, &format!("Red Item {index}"), None, Some("red"), None, rating).await;
        }

        let repo = SqlProductRepository::new(pool.clone());
        let filter = ProductFilter::from_query("red", MatchMode::Any);
        let found = repo.search(&filter, MAX_RESULTS).await.expect("search");

        assert_eq!(found.len(), MAX_RESULTS);
        let first_unrated = found.iter().position(|row| row.avg_rating.is_none());
        if let Some(position) = first_unrated {
            assert!(found[position..].iter().all(|row| row.avg_rating.is_none()));
        }
        let ratings: Vec<f64> = found.iter().filter_map(|row| row.avg_rating).collect();
        assert!(ratings.windows(2).all(|pair| pair[0] >= pair[1]));
        pool.close().await;
    }

    #[tokio::test]
    async fn wildcard_characters_match_literally() {
        let pool = setup().await;
        insert(&pool, "Promo 50%off Tee", None, None, None, None).await;
        insert(&pool, "Promo 50 and off Tee", None, None, None, None).await;
        insert(&pool, "Wool_Blend Scarf", None, None, None, None).await;
        insert(&pool, "WoolXBlend Scarf", None, None, None, None).await;

        let repo = SqlProductRepository::new(pool.clone());
        let percent = ProductFilter::from_query("50%off", MatchMode::Any);
        let underscore = ProductFilter::from_query("wool_blend", MatchMode::Any);

        let found = repo.search(&percent, MAX_RESULTS).await.expect("search percent");
        assert_eq!(names(&found), vec!["Promo 50%off Tee"]);
        let found = repo.search(&underscore, MAX_RESULTS).await.expect("search underscore");
        assert_eq!(names(&found), vec!["Wool_Blend Scarf"]);
        pool.close().await;
    }

    #[tokio::test]
    async fn search_folds_case_beyond_ascii() {
        let pool = setup().await;
        insert(&pool, "ÉTÉ Linen Dress", None, Some("Écru"), None, Some(4.2)).await;
        insert(&pool, "Été Sandal", None, None, Some("Crème"), None).await;
        insert(&pool, "Summer Tee", None, None, None, Some(4.9)).await;

        let repo = SqlProductRepository::new(pool.clone());
        let lower = repo
            .search(&ProductFilter::from_query("été", MatchMode::Any), MAX_RESULTS)
            .await
            .expect("search lower");
        let upper = repo
            .search(&ProductFilter::from_query("CRÈME ÉCRU", MatchMode::Any), MAX_RESULTS)
            .await
            .expect("search upper");

        assert_eq!(names(&lower), vec!["ÉTÉ Linen Dress", "Été Sandal"]);
        assert_eq!(names(&upper), vec!["ÉTÉ Linen Dress", "Été Sandal"]);
        pool.close().await;
    }

    #[tokio::test]
    async fn non_ascii_rows_that_miss_the_token_are_dropped() {
        let pool = setup().await;
        for index in 0..(CANDIDATE_PAGE + 5) {
            insert(&pool, &format!("Café Scarf {index}"), None, None, None, Some(5.0)).await;
        }
        insert(&pool, "Wool Coat", None, None, None, Some(1.0)).await;

        let repo = SqlProductRepository::new(pool.clone());
        let found = repo
            .search(&ProductFilter::from_query("coat", MatchMode::Any), MAX_RESULTS)
            .await
            .expect("search");

        assert_eq!(names(&found), vec!["Wool Coat"]);
        pool.close().await;
    }

    #[tokio::test]
    async fn real_prices_round_like_two_decimal_formatting() {
        let pool = setup().await;
        sqlx::query("INSERT INTO fashion_items (name, price) VALUES ('Hair Clip', 2.675)")
            .execute(&pool)
            .await
            .expect("insert row");

        let repo = SqlProductRepository::new(pool.clone());
        let found = repo
            .search(&ProductFilter::from_query("clip", MatchMode::Any), MAX_RESULTS)
            .await
            .expect("search");

        assert_eq!(ProductSummary::from(&found[0]).price.as_deref(), Some("$2.67"));
        pool.close().await;
    }

    #[tokio::test]
    async fn search_decodes_nullable_columns() {
        let pool = setup().await;
        sqlx::query("INSERT INTO fashion_items (name, colour) VALUES ('Plain Sock', 'white')")
            .execute(&pool)
            .await
            .expect("insert sparse row");
        sqlx::query(
            "INSERT INTO fashion_items (name, colour, price, avg_rating)
             VALUES ('White Tee', 'white', 19, 4)",
        )
        .execute(&pool)
        .await
        .expect("insert integer-typed row");

        let repo = SqlProductRepository::new(pool.clone());
        let filter = ProductFilter::from_query("white", MatchMode::Any);
        let found = repo.search(&filter, MAX_RESULTS).await.expect("search");

        assert_eq!(names(&found), vec!["White Tee", "Plain Sock"]);
        assert_eq!(found[0].price, Some(Decimal::new(19, 0)));
        assert_eq!(found[0].avg_rating, Some(4.0));
        assert_eq!(found[1].price, None);
        assert_eq!(found[1].description, None);
        pool.close().await;
    }

    #[tokio::test]
    async fn empty_filter_skips_the_database() {
        let pool = setup().await;
        pool.close().await;

        let repo = SqlProductRepository::new(pool);
        let found = repo
            .search(&ProductFilter::from_query("", MatchMode::Any), MAX_RESULTS)
            .await
            .expect("empty filter should not touch storage");

        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn closed_pool_reports_database_error() {
        let pool = setup().await;
        pool.close().await;

        let repo = SqlProductRepository::new(pool);
        let outcome =
            repo.search(&ProductFilter::from_query("red", MatchMode::Any), MAX_RESULTS).await;

        assert!(matches!(outcome, Err(RepositoryError::Database(_))));
    }

    #[tokio::test]
    async fn missing_table_reports_database_error() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");

        let repo = SqlProductRepository::new(pool.clone());
        let outcome =
            repo.search(&ProductFilter::from_query("red", MatchMode::Any), MAX_RESULTS).await;

        assert!(matches!(outcome, Err(RepositoryError::Database(_))));
        pool.close().await;
    }

    #[tokio::test]
    async fn count_reports_catalog_size() {
        let pool = setup().await;
        insert(&pool, "One", None, None, None, None).await;
        insert(&pool, "Two", None, None, None, None).await;

        let repo = SqlProductRepository::new(pool.clone());

        assert_eq!(repo.count().await.expect("count"), 2);
        pool.close().await;
    }
}
