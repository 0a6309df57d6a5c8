use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::dto::LoginRequest;

use crate::error::AppError;
use crate::services::AuthService;

/// Log a staff account in and hand back an admin-realm token
pub async fn admin_login(
    auth_service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let token = auth_service.login_admin(&payload).await?;

    Ok(HttpResponse::Ok().json(token))
}

/// Log a customer in and hand back a customer-realm token
pub async fn customer_login(
    auth_service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let token = auth_service.login_customer(&payload).await?;

    Ok(HttpResponse::Ok().json(token))
}
