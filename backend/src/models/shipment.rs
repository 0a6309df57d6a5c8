use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CreateShipmentRequest, ShipmentResponse, UpdateShipmentRequest};

use crate::error::AppError;

/// Fulfilment record for an order. Each order carries at most one.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Shipment {
    pub id: i32,
    pub order_id: i32,
    pub shipped_date: Option<DateTime<Utc>>,
    pub estimated_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Shipment {
    pub async fn create(pool: &PgPool, request: &CreateShipmentRequest) -> Result<Self, AppError> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            INSERT INTO shipments (order_id, carrier, tracking_number, estimated_delivery)
            VALUES ($1, $2, $3, $4)
            RETURNING id, order_id, shipped_date, estimated_delivery, actual_delivery,
                      carrier, tracking_number, status, created_at
            "#,
        )
        .bind(request.order_id)
        .bind(&request.carrier)
        .bind(&request.tracking_number)
        .bind(request.estimated_delivery)
        .fetch_one(pool)
        .await?;

        Ok(shipment)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            SELECT id, order_id, shipped_date, estimated_delivery, actual_delivery,
                   carrier, tracking_number, status, created_at
            FROM shipments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(shipment)
    }

    pub async fn find_by_order_id(pool: &PgPool, order_id: i32) -> Result<Option<Self>, AppError> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            SELECT id, order_id, shipped_date, estimated_delivery, actual_delivery,
                   carrier, tracking_number, status, created_at
            FROM shipments
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(pool)
        .await?;

        Ok(shipment)
    }

    pub async fn exists_for_order(pool: &PgPool, order_id: i32) -> Result<bool, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM shipments WHERE order_id = $1")
                .bind(order_id)
                .fetch_one(pool)
                .await?;

        Ok(count > 0)
    }

    /// Apply a partial update; absent fields keep their stored values
    pub async fn update(
        pool: &PgPool,
        id: i32,
        request: &UpdateShipmentRequest,
    ) -> Result<Option<Self>, AppError> {
        let shipment = sqlx::query_as::<_, Shipment>(
            r#"
            UPDATE shipments
            SET status = COALESCE($2, status),
                shipped_date = COALESCE($3, shipped_date),
                actual_delivery = COALESCE($4, actual_delivery),
                carrier = COALESCE($5, carrier),
                tracking_number = COALESCE($6, tracking_number)
            WHERE id = $1
            RETURNING id, order_id, shipped_date, estimated_delivery, actual_delivery,
                      carrier, tracking_number, status, created_at
            "#,
        )
        .bind(id)
        .bind(&request.status)
        .bind(request.shipped_date)
        .bind(request.actual_delivery)
        .bind(&request.carrier)
        .bind(&request.tracking_number)
        .fetch_optional(pool)
        .await?;

        Ok(shipment)
    }

    pub fn to_response(&self) -> ShipmentResponse {
        ShipmentResponse {
            id: self.id,
            order_id: self.order_id,
            shipped_date: self.shipped_date,
            estimated_delivery: self.estimated_delivery,
            actual_delivery: self.actual_delivery,
            carrier: self.carrier.clone(),
            tracking_number: self.tracking_number.clone(),
            status: self.status.clone(),
        }
    }
}
