use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{OrderItemResponse, OrderResponse};
use acme_store_shared::types::OrderStatus;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Option<Decimal>,
    pub shipping_address: Option<String>,
    pub branch_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order line joined with its product name, as responses carry it.
/// `unit_price` is the price frozen at placement time, not the product's
/// current price.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItemRow {
    pub id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount_pct: Decimal,
}

impl Order {
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, order_date, status, total_amount, shipping_address,
                   branch_id, created_at, updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    /// List every order in the system
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, order_date, status, total_amount, shipping_address,
                   branch_id, created_at, updated_at
            FROM orders
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(orders)
    }

    /// List the orders placed by one customer
    pub async fn list_for_customer(pool: &PgPool, customer_id: i32) -> Result<Vec<Self>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, order_date, status, total_amount, shipping_address,
                   branch_id, created_at, updated_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY id
            "#,
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await?;

        Ok(orders)
    }

    /// Move an order to a new fulfilment status
    pub async fn update_status(
        pool: &PgPool,
        id: i32,
        status: OrderStatus,
    ) -> Result<Option<Self>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, customer_id, order_date, status, total_amount, shipping_address,
                      branch_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    pub async fn exists(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(count > 0)
    }

    /// Load the lines of one order
    pub async fn items_for_order(pool: &PgPool, order_id: i32) -> Result<Vec<OrderItemRow>, AppError> {
        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name,
                   oi.quantity, oi.unit_price, oi.discount_pct
            FROM order_items oi
            LEFT JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            "#,
        )
        .bind(order_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    /// Load the lines of many orders in one round trip
    pub async fn items_for_orders(
        pool: &PgPool,
        order_ids: &[i32],
    ) -> Result<Vec<OrderItemRow>, AppError> {
        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name,
                   oi.quantity, oi.unit_price, oi.discount_pct
            FROM order_items oi
            LEFT JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.id
            "#,
        )
        .bind(order_ids.to_vec())
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    pub fn to_response(&self, items: Vec<OrderItemRow>) -> OrderResponse {
        OrderResponse {
            id: self.id,
            customer_id: self.customer_id,
            order_date: self.order_date,
            status: self.status,
            total_amount: self.total_amount,
            shipping_address: self.shipping_address.clone(),
            branch_id: self.branch_id,
            items: items.iter().map(OrderItemRow::to_response).collect(),
        }
    }
}

impl OrderItemRow {
    pub fn to_response(&self) -> OrderItemResponse {
        OrderItemResponse {
            id: self.id,
            product_id: self.product_id,
            product_name: self.product_name.clone(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount_pct: self.discount_pct,
        }
    }
}
