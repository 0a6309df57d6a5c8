use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::dto::{CreateOrderRequest, OrderResponse, UpdateOrderStatusRequest};

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::{AdminUser, CustomerUser};
use crate::models::{Order, OrderItemRow};
use crate::services::OrderService;

/// List every order in the system
pub async fn list_orders(
    db: web::Data<Database>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let orders = Order::list_all(db.pool()).await?;
    let responses = load_responses(&db, orders).await?;

    Ok(HttpResponse::Ok().json(responses))
}

/// Place an order for the authenticated customer
pub async fn place_order(
    order_service: web::Data<OrderService>,
    customer: CustomerUser,
    payload: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let order = order_service
        .place_order(customer.customer_id, &payload)
        .await?;

    Ok(HttpResponse::Created().json(order))
}

pub async fn get_order(
    db: web::Data<Database>,
    _admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order = Order::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    let items = Order::items_for_order(db.pool(), order.id).await?;

    Ok(HttpResponse::Ok().json(order.to_response(items)))
}

/// Move an order through its fulfilment lifecycle
pub async fn update_order_status(
    db: web::Data<Database>,
    _admin: AdminUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order = Order::update_status(db.pool(), path.into_inner(), payload.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    let items = Order::items_for_order(db.pool(), order.id).await?;

    tracing::info!(order_id = order.id, status = %order.status, "order status updated");

    Ok(HttpResponse::Ok().json(order.to_response(items)))
}

/// Order history of the authenticated customer
pub async fn list_my_orders(
    db: web::Data<Database>,
    customer: CustomerUser,
) -> Result<HttpResponse, AppError> {
    let orders = Order::list_for_customer(db.pool(), customer.customer_id).await?;
    let responses = load_responses(&db, orders).await?;

    Ok(HttpResponse::Ok().json(responses))
}

/// Fetch the lines for a batch of orders in one query and pair them up
async fn load_responses(
    db: &web::Data<Database>,
    orders: Vec<Order>,
) -> Result<Vec<OrderResponse>, AppError> {
    let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let items = Order::items_for_orders(db.pool(), &ids).await?;

    Ok(group_items(orders, items))
}

fn group_items(orders: Vec<Order>, items: Vec<OrderItemRow>) -> Vec<OrderResponse> {
    let mut by_order: HashMap<i32, Vec<OrderItemRow>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            order.to_response(items)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use acme_store_shared::types::OrderStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn order(id: i32) -> Order {
        Order {
            id,
            customer_id: 1,
            order_date: Utc::now(),
            status: OrderStatus::Pending,
            total_amount: Some(Decimal::ZERO),
            shipping_address: None,
            branch_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(id: i32, order_id: i32) -> OrderItemRow {
        OrderItemRow {
            id,
            order_id,
            product_id: 7,
            product_name: Some("Widget".to_string()),
            quantity: 1,
            unit_price: Decimal::ONE,
            discount_pct: Decimal::ZERO,
        }
    }

    #[test]
    fn test_items_land_on_their_own_order() {
        let responses = group_items(
            vec![order(1), order(2)],
            vec![item(10, 1), item(11, 2), item(12, 1)],
        );

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].items.len(), 2);
        assert_eq!(responses[1].items.len(), 1);
        assert_eq!(responses[1].items[0].id, 11);
    }

    #[test]
    fn test_orders_without_items_come_back_empty() {
        let responses = group_items(vec![order(5)], vec![]);

        assert_eq!(responses.len(), 1);
        assert!(responses[0].items.is_empty());
    }
}
