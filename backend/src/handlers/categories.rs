use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::dto::CreateCategoryRequest;

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::models::Category;

/// List product categories, open to guests
pub async fn list_categories(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let categories = Category::list_all(db.pool()).await?;
    let responses: Vec<_> = categories.iter().map(Category::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn create_category(
    db: web::Data<Database>,
    _admin: AdminUser,
    payload: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let category = Category::create(db.pool(), &payload).await?;

    Ok(HttpResponse::Created().json(category.to_response()))
}
