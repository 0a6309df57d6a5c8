use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::dto::CreateDiscountRequest;

use crate::database::Database;
use crate::error::AppError;
use crate::models::Discount;

pub async fn list_discounts(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let discounts = Discount::list_all(db.pool()).await?;
    let responses: Vec<_> = discounts.iter().map(Discount::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// Record a promotional discount window for a product
pub async fn create_discount(
    db: web::Data<Database>,
    payload: web::Json<CreateDiscountRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let discount = Discount::create(db.pool(), &payload).await?;

    Ok(HttpResponse::Created().json(discount.to_response()))
}

pub async fn get_discount(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let discount = Discount::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Discount not found".to_string()))?;

    Ok(HttpResponse::Ok().json(discount.to_response()))
}

pub async fn delete_discount(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = Discount::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Discount not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
