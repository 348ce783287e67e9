//! Postgres persistence for classified price snapshots.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use classifier::ClassifiedRecord;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// A persisted product row, as served by the read API.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    pub keyword: String,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub total_price: i64,
    pub mall_name: String,
    pub calc_method: String,
    pub link: String,
    pub image_url: String,
    pub channel: String,
    pub market: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ProductStore {
    pool: PgPool,
}

impl ProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert one crawl batch, every row stamped with the same run timestamp.
    /// All-or-nothing: any failure rolls the whole batch back.
    pub async fn insert_batch(
        &self,
        records: &[ClassifiedRecord],
        run_at: DateTime<Utc>,
    ) -> Result<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin insert transaction")?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO products (
                    keyword, product_name, unit_price, quantity, total_price,
                    mall_name, calc_method, link, image_url, channel, market, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(&record.keyword)
            .bind(&record.product_name)
            .bind(record.unit_price as i64)
            .bind(record.quantity as i32)
            .bind(record.total_price as i64)
            .bind(&record.mall_name)
            .bind(record.calc_method.as_str())
            .bind(&record.link)
            .bind(&record.image_url)
            .bind(&record.channel)
            .bind(&record.market)
            .bind(run_at)
            .execute(&mut *tx)
            .await
            .context("Failed to insert product row")?;
        }

        tx.commit()
            .await
            .context("Failed to commit insert transaction")?;
        Ok(records.len() as u64)
    }

    /// Every row of the most recent snapshot, cheapest first, plus the
    /// snapshot timestamp.
    pub async fn latest_snapshot(&self) -> Result<(Option<DateTime<Utc>>, Vec<ProductRow>)> {
        let rows = sqlx::query(
            r#"
            SELECT keyword, product_name, unit_price, quantity, total_price,
                   mall_name, calc_method, link, image_url, channel, market, created_at
            FROM products
            WHERE created_at = (SELECT MAX(created_at) FROM products)
            ORDER BY unit_price ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load latest snapshot")?;

        let rows: Vec<ProductRow> = rows.into_iter().map(row_to_product).collect();
        let snapshot_time = rows.first().map(|r| r.created_at);
        Ok((snapshot_time, rows))
    }

    /// Cheapest rows across all snapshots.
    pub async fn lowest_priced(&self, limit: i64) -> Result<Vec<ProductRow>> {
        let rows = sqlx::query(
            r#"
            SELECT keyword, product_name, unit_price, quantity, total_price,
                   mall_name, calc_method, link, image_url, channel, market, created_at
            FROM products
            ORDER BY unit_price ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load lowest-priced products")?;

        Ok(rows.into_iter().map(row_to_product).collect())
    }
}

fn row_to_product(r: PgRow) -> ProductRow {
    ProductRow {
        keyword: r.get("keyword"),
        product_name: r.get("product_name"),
        unit_price: r.get("unit_price"),
        quantity: r.get("quantity"),
        total_price: r.get("total_price"),
        mall_name: r.get("mall_name"),
        calc_method: r.get("calc_method"),
        link: r.get("link"),
        image_url: r.get("image_url"),
        channel: r.get("channel"),
        market: r.get("market"),
        created_at: r.get("created_at"),
    }
}
