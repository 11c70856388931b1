//! PostgreSQL product store

use std::time::Duration;

use async_trait::async_trait;
use catalog_common::{NewProduct, Product};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{ProductStore, StoreError, StoreResult};
use crate::config::DatabaseConfig;

const PRODUCT_COLUMNS: &str = "id, sku_code, name, description, price, hsn_code, created_at";

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a connection pool from configuration
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await?;

        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Database connection pool created"
        );

        Ok(Self::new(pool))
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRecord {
    id: Uuid,
    sku_code: String,
    name: String,
    description: String,
    price: f64,
    hsn_code: String,
    created_at: DateTime<Utc>,
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        Product {
            id: r.id,
            sku_code: r.sku_code,
            name: r.name,
            description: r.description,
            price: r.price,
            hsn_code: r.hsn_code,
            created_at: r.created_at,
        }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = error {
        return db_err.is_unique_violation();
    }
    false
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self))]
    async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let records = sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, sku_code"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_sku(&self, sku_code: &str) -> StoreResult<Option<Product>> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE sku_code = $1"
        ))
        .bind(sku_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Product::from))
    }

    #[instrument(skip(self, product), fields(sku = %product.sku_code))]
    async fn insert(&self, product: NewProduct) -> StoreResult<Product> {
        let record = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            INSERT INTO products (id, sku_code, name, description, price, hsn_code, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&product.sku_code)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.hsn_code)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateKey(product.sku_code.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(record.into())
    }

    #[instrument(skip(self, sku_codes), fields(count = sku_codes.len()))]
    async fn delete_by_skus(&self, sku_codes: &[String]) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM products WHERE sku_code = ANY($1)")
            .bind(sku_codes)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}
