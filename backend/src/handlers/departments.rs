use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::dto::{CreateDepartmentRequest, UpdateDepartmentRequest};

use crate::database::Database;
use crate::error::AppError;
use crate::models::Department;

pub async fn list_departments(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let departments = Department::list_all(db.pool()).await?;
    let responses: Vec<_> = departments.iter().map(Department::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn create_department(
    db: web::Data<Database>,
    payload: web::Json<CreateDepartmentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let department = Department::create(db.pool(), &payload).await?;

    Ok(HttpResponse::Created().json(department.to_response()))
}

pub async fn get_department(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let department = Department::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok(HttpResponse::Ok().json(department.to_response()))
}

pub async fn update_department(
    db: web::Data<Database>,
    path: web::Path<i32>,
    payload: web::Json<UpdateDepartmentRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let department = Department::update(db.pool(), path.into_inner(), &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Department not found".to_string()))?;

    Ok(HttpResponse::Ok().json(department.to_response()))
}

pub async fn delete_department(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = Department::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Department not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
