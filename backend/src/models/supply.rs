use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CreateSupplyRequest, SupplyResponse};

use crate::error::AppError;

/// A received-stock event. Supply rows are append-only; corrections are
/// made by deleting the record and entering a new one.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Supply {
    pub id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub quantity: i32,
    pub supply_date: NaiveDate,
    pub supplier_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Supply {
    pub async fn create(pool: &PgPool, request: &CreateSupplyRequest) -> Result<Self, AppError> {
        let supply = sqlx::query_as::<_, Supply>(
            r#"
            INSERT INTO supply (product_id, store_id, quantity, supply_date, supplier_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, store_id, quantity, supply_date, supplier_name, created_at
            "#,
        )
        .bind(request.product_id)
        .bind(request.store_id)
        .bind(request.quantity)
        .bind(request.supply_date)
        .bind(&request.supplier_name)
        .fetch_one(pool)
        .await?;

        Ok(supply)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let supply = sqlx::query_as::<_, Supply>(
            r#"
            SELECT id, product_id, store_id, quantity, supply_date, supplier_name, created_at
            FROM supply
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(supply)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let supplies = sqlx::query_as::<_, Supply>(
            r#"
            SELECT id, product_id, store_id, quantity, supply_date, supplier_name, created_at
            FROM supply
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(supplies)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM supply WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> SupplyResponse {
        SupplyResponse {
            id: self.id,
            product_id: self.product_id,
            store_id: self.store_id,
            quantity: self.quantity,
            supply_date: self.supply_date,
            supplier_name: self.supplier_name.clone(),
        }
    }
}
