use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::dto::CreateSupplyRequest;

use crate::database::Database;
use crate::error::AppError;
use crate::models::Supply;

pub async fn list_supplies(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let supplies = Supply::list_all(db.pool()).await?;
    let responses: Vec<_> = supplies.iter().map(Supply::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// Record a delivery of product stock to a store
pub async fn create_supply(
    db: web::Data<Database>,
    payload: web::Json<CreateSupplyRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let supply = Supply::create(db.pool(), &payload).await?;

    Ok(HttpResponse::Created().json(supply.to_response()))
}

pub async fn get_supply(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let supply = Supply::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Supply record not found".to_string()))?;

    Ok(HttpResponse::Ok().json(supply.to_response()))
}

pub async fn delete_supply(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = Supply::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Supply record not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
