use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use acme_store_shared::dto::{CreateProductRequest, UpdateProductRequest};

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::models::{Product, ProductWithCategory};

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category_id: Option<i32>,
    pub search: Option<String>,
}

/// Browse the catalog, open to guests. Supports filtering by category
/// and a case-insensitive name search.
pub async fn list_products(
    db: web::Data<Database>,
    query: web::Query<ProductListQuery>,
) -> Result<HttpResponse, AppError> {
    let products =
        Product::list(db.pool(), query.category_id, query.search.as_deref()).await?;
    let responses: Vec<_> = products
        .iter()
        .map(ProductWithCategory::to_response)
        .collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn create_product(
    db: web::Data<Database>,
    _admin: AdminUser,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = Product::create(db.pool(), &payload).await?;

    Ok(HttpResponse::Created().json(product.to_response()))
}

pub async fn get_product(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let product = Product::find_with_category(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(HttpResponse::Ok().json(product.to_response()))
}

/// Apply a partial update to a product
pub async fn update_product(
    db: web::Data<Database>,
    _admin: AdminUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let product = Product::update(db.pool(), path.into_inner(), &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok(HttpResponse::Ok().json(product.to_response()))
}

pub async fn delete_product(
    db: web::Data<Database>,
    _admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = Product::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
