use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use acme_store_shared::constants::{
    ERROR_EMAIL_ALREADY_EXISTS, ERROR_USERNAME_ALREADY_EXISTS, SUCCESS_PASSWORD_CHANGED,
};
use acme_store_shared::dto::{
    ChangePasswordRequest, MessageResponse, RegisterCustomerRequest, UpdateCustomerRequest,
};

use crate::database::Database;
use crate::error::AppError;
use crate::middleware::{AdminUser, CustomerUser};
use crate::models::Customer;
use crate::services::AuthService;
use crate::utils::crypto::hash_password;

#[derive(Debug, Deserialize)]
pub struct CustomerListQuery {
    pub search: Option<String>,
}

/// Open a customer account
pub async fn register(
    db: web::Data<Database>,
    payload: web::Json<RegisterCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if Customer::username_exists(db.pool(), &payload.username).await? {
        return Err(AppError::Conflict(ERROR_USERNAME_ALREADY_EXISTS.to_string()));
    }
    if Customer::email_exists(db.pool(), &payload.email).await? {
        return Err(AppError::Conflict(ERROR_EMAIL_ALREADY_EXISTS.to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let customer = Customer::create(db.pool(), &payload, &password_hash).await?;

    tracing::info!(customer_id = customer.id, "customer registered");

    Ok(HttpResponse::Created().json(customer.to_response()))
}

/// Profile of the authenticated customer
pub async fn get_profile(
    db: web::Data<Database>,
    customer: CustomerUser,
) -> Result<HttpResponse, AppError> {
    let customer = Customer::find_by_id(db.pool(), customer.customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(HttpResponse::Ok().json(customer.to_response()))
}

pub async fn update_profile(
    db: web::Data<Database>,
    customer: CustomerUser,
    payload: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let customer = Customer::update(db.pool(), customer.customer_id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(HttpResponse::Ok().json(customer.to_response()))
}

pub async fn change_password(
    auth_service: web::Data<AuthService>,
    customer: CustomerUser,
    payload: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    auth_service
        .change_customer_password(customer.customer_id, &payload)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: SUCCESS_PASSWORD_CHANGED.to_string(),
    }))
}

/// List customer accounts, optionally filtered by name or email
pub async fn list_customers(
    db: web::Data<Database>,
    _admin: AdminUser,
    query: web::Query<CustomerListQuery>,
) -> Result<HttpResponse, AppError> {
    let customers = Customer::list(db.pool(), query.search.as_deref()).await?;
    let responses: Vec<_> = customers.iter().map(Customer::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn get_customer(
    db: web::Data<Database>,
    _admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let customer = Customer::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(HttpResponse::Ok().json(customer.to_response()))
}

pub async fn update_customer(
    db: web::Data<Database>,
    _admin: AdminUser,
    path: web::Path<i32>,
    payload: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let customer = Customer::update(db.pool(), path.into_inner(), &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

    Ok(HttpResponse::Ok().json(customer.to_response()))
}

pub async fn delete_customer(
    db: web::Data<Database>,
    _admin: AdminUser,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = Customer::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Customer not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
