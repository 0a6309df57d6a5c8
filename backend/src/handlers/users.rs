use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::constants::{
    ERROR_EMAIL_ALREADY_EXISTS, ERROR_USERNAME_ALREADY_EXISTS, SUCCESS_PASSWORD_CHANGED,
};
use acme_store_shared::dto::{
    ChangePasswordRequest, CreateUserRequest, MessageResponse, UpdateUserRequest,
};

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::AdminUser;
use crate::models::User;
use crate::services::AuthService;
use crate::utils::crypto::hash_password;

/// List every staff account
pub async fn list_users(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let users = User::list_all(db.pool()).await?;
    let responses: Vec<_> = users.iter().map(User::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// Create a staff account
pub async fn create_user(
    db: web::Data<Database>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if User::username_exists(db.pool(), &payload.username).await? {
        return Err(AppError::Conflict(ERROR_USERNAME_ALREADY_EXISTS.to_string()));
    }
    if User::email_exists(db.pool(), &payload.email).await? {
        return Err(AppError::Conflict(ERROR_EMAIL_ALREADY_EXISTS.to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::create(db.pool(), &payload, &password_hash).await?;

    tracing::info!(user_id = user.id, username = %user.username, "staff account created");

    Ok(HttpResponse::Created().json(user.to_response()))
}

/// Profile of the authenticated staff account
pub async fn get_current_user(
    db: web::Data<Database>,
    admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let user = User::find_by_id(db.pool(), admin.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user.to_response()))
}

pub async fn change_password(
    auth_service: web::Data<AuthService>,
    admin: AdminUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    auth_service
        .change_user_password(admin.user_id, &payload)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: SUCCESS_PASSWORD_CHANGED.to_string(),
    }))
}

pub async fn get_user(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user = User::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// Update a staff account's email or role
pub async fn update_user(
    db: web::Data<Database>,
    path: web::Path<i32>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = User::update(db.pool(), path.into_inner(), &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(user.to_response()))
}

pub async fn delete_user(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = User::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
