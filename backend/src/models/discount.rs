use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CreateDiscountRequest, DiscountResponse};

use crate::error::AppError;

/// A scheduled product discount window. These rows are bookkeeping only;
/// order lines carry their own discount percentage at placement time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Discount {
    pub id: i32,
    pub product_id: i32,
    pub discount_pct: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Discount {
    pub async fn create(pool: &PgPool, request: &CreateDiscountRequest) -> Result<Self, AppError> {
        let discount = sqlx::query_as::<_, Discount>(
            r#"
            INSERT INTO discounts (product_id, discount_pct, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, discount_pct, start_date, end_date, created_at
            "#,
        )
        .bind(request.product_id)
        .bind(request.discount_pct)
        .bind(request.start_date)
        .bind(request.end_date)
        .fetch_one(pool)
        .await?;

        Ok(discount)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let discount = sqlx::query_as::<_, Discount>(
            r#"
            SELECT id, product_id, discount_pct, start_date, end_date, created_at
            FROM discounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(discount)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let discounts = sqlx::query_as::<_, Discount>(
            r#"
            SELECT id, product_id, discount_pct, start_date, end_date, created_at
            FROM discounts
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(discounts)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM discounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> DiscountResponse {
        DiscountResponse {
            id: self.id,
            product_id: self.product_id,
            discount_pct: self.discount_pct,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
