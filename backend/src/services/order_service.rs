use rust_decimal::Decimal;
use sqlx::PgPool;

use acme_store_shared::dto::{CreateOrderRequest, OrderResponse};
use acme_store_shared::types::OrderStatus;

use crate::error::AppError;
use crate::models::Order;

/// Order placement. Runs inside a single transaction so a bad line
/// leaves nothing behind.
#[derive(Clone)]
pub struct OrderService {
    pool: PgPool,
}

impl OrderService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Place an order for a customer.
    ///
    /// Unit prices come from the product rows at placement time; whatever
    /// the client sent for pricing is not consulted. An unknown product id
    /// fails the whole order with a 404 and rolls back every line.
    pub async fn place_order(
        &self,
        customer_id: i32,
        request: &CreateOrderRequest,
    ) -> Result<OrderResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO orders (customer_id, status, total_amount, shipping_address, branch_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(customer_id)
        .bind(OrderStatus::Pending)
        .bind(Decimal::ZERO)
        .bind(&request.shipping_address)
        .bind(request.branch_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut total = Decimal::ZERO;

        for item in &request.items {
            let unit_price =
                sqlx::query_scalar::<_, Decimal>("SELECT price FROM products WHERE id = $1")
                    .bind(item.product_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| {
                        AppError::NotFound(format!("Product {} not found", item.product_id))
                    })?;

            total += line_total(unit_price, item.quantity, item.discount_pct);

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price, discount_pct)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(unit_price)
            .bind(item.discount_pct)
            .execute(&mut *tx)
            .await?;
        }

        let total = total.round_dp(2);

        sqlx::query("UPDATE orders SET total_amount = $2, updated_at = NOW() WHERE id = $1")
            .bind(order_id)
            .bind(total)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(order_id, customer_id, %total, "order placed");

        let order = Order::find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Order {order_id} missing after commit"))
            })?;
        let items = Order::items_for_order(&self.pool, order_id).await?;

        Ok(order.to_response(items))
    }
}

/// Price of one order line: unit price times quantity, less the line's
/// percentage discount. Rounding happens once on the order total, not
/// per line.
fn line_total(unit_price: Decimal, quantity: i32, discount_pct: Decimal) -> Decimal {
    let factor = (Decimal::ONE_HUNDRED - discount_pct) / Decimal::ONE_HUNDRED;
    unit_price * Decimal::from(quantity) * factor
}
