use actix_web::{web, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use acme_store_shared::constants::ERROR_EMAIL_ALREADY_EXISTS;
use acme_store_shared::dto::{CreateEmployeeRequest, UpdateEmployeeRequest};

use crate::database::Database;
use crate::error::AppError;
use crate::models::Employee;

#[derive(Debug, Deserialize)]
pub struct EmployeeListQuery {
    pub department_id: Option<i32>,
    pub manager_id: Option<i32>,
}

/// List employees, optionally narrowed to a department or a manager
pub async fn list_employees(
    db: web::Data<Database>,
    query: web::Query<EmployeeListQuery>,
) -> Result<HttpResponse, AppError> {
    let employees = Employee::list(db.pool(), query.department_id, query.manager_id).await?;
    let responses: Vec<_> = employees.iter().map(Employee::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn create_employee(
    db: web::Data<Database>,
    payload: web::Json<CreateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    if Employee::email_exists(db.pool(), &payload.email).await? {
        return Err(AppError::Conflict(ERROR_EMAIL_ALREADY_EXISTS.to_string()));
    }

    let employee = Employee::create(db.pool(), &payload).await?;

    Ok(HttpResponse::Created().json(employee.to_response()))
}

pub async fn get_employee(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let employee = Employee::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(employee.to_response()))
}

/// Apply a partial update to an employee record
pub async fn update_employee(
    db: web::Data<Database>,
    path: web::Path<i32>,
    payload: web::Json<UpdateEmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let employee = Employee::update(db.pool(), path.into_inner(), &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    Ok(HttpResponse::Ok().json(employee.to_response()))
}

pub async fn delete_employee(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = Employee::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
