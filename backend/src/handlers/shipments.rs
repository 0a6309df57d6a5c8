use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::constants::ERROR_SHIPMENT_EXISTS;
use acme_store_shared::dto::{CreateShipmentRequest, UpdateShipmentRequest};

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::{AdminUser, CustomerUser};
use crate::models::{Order, Shipment};

/// Open a shipment for an order. Each order gets at most one.
pub async fn create_shipment(
    db: web::Data<Database>,
    _admin: AdminUser,
    payload: web::Json<CreateShipmentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if !Order::exists(db.pool(), payload.order_id).await? {
        return Err(AppError::NotFound("Order not found".to_string()));
    }
    if Shipment::exists_for_order(db.pool(), payload.order_id).await? {
        return Err(AppError::Conflict(ERROR_SHIPMENT_EXISTS.to_string()));
    }

    let shipment = Shipment::create(db.pool(), &payload).await?;

    tracing::info!(shipment_id = shipment.id, order_id = shipment.order_id, "shipment opened");

    Ok(HttpResponse::Created().json(shipment.to_response()))
}

/// Track the shipment of one of the caller's orders.
///
/// The path segment is the ORDER id. Orders belonging to other
/// customers report not-found rather than hinting that they exist.
pub async fn get_shipment_for_order(
    db: web::Data<Database>,
    customer: CustomerUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let owned = Order::find_by_id(db.pool(), order_id)
        .await?
        .map_or(false, |order| order.customer_id == customer.customer_id);
    if !owned {
        return Err(AppError::NotFound("Shipment not found".to_string()));
    }

    let shipment = Shipment::find_by_order_id(db.pool(), order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

    Ok(HttpResponse::Ok().json(shipment.to_response()))
}

/// Apply a partial update to a shipment. The path segment is the
/// SHIPMENT id.
pub async fn update_shipment(
    db: web::Data<Database>,
    _admin: AdminUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateShipmentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let shipment = Shipment::update(db.pool(), path.into_inner(), &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Shipment not found".to_string()))?;

    Ok(HttpResponse::Ok().json(shipment.to_response()))
}
