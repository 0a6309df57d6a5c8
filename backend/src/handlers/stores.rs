use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::dto::{CreateStoreRequest, UpdateStoreRequest};

use crate::database::Database;
use crate::error::AppError;
use crate::models::Store;

pub async fn list_stores(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let stores = Store::list_all(db.pool()).await?;
    let responses: Vec<_> = stores.iter().map(Store::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn create_store(
    db: web::Data<Database>,
    payload: web::Json<CreateStoreRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let store = Store::create(db.pool(), &payload).await?;

    Ok(HttpResponse::Created().json(store.to_response()))
}

pub async fn get_store(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let store = Store::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

    Ok(HttpResponse::Ok().json(store.to_response()))
}

pub async fn update_store(
    db: web::Data<Database>,
    path: web::Path<i32>,
    payload: web::Json<UpdateStoreRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let store = Store::update(db.pool(), path.into_inner(), &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".to_string()))?;

    Ok(HttpResponse::Ok().json(store.to_response()))
}

pub async fn delete_store(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = Store::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Store not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
