use actix_web::{web, HttpResponse};
use validator::Validate;

use acme_store_shared::dto::{CreateBranchRequest, UpdateBranchRequest};

use crate::database::Database;
use crate::error::AppError;
use crate::models::Branch;

pub async fn list_branches(db: web::Data<Database>) -> Result<HttpResponse, AppError> {
    let branches = Branch::list_all(db.pool()).await?;
    let responses: Vec<_> = branches.iter().map(Branch::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn create_branch(
    db: web::Data<Database>,
    payload: web::Json<CreateBranchRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let branch = Branch::create(db.pool(), &payload).await?;

    Ok(HttpResponse::Created().json(branch.to_response()))
}

pub async fn get_branch(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let branch = Branch::find_by_id(db.pool(), path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Branch not found".to_string()))?;

    Ok(HttpResponse::Ok().json(branch.to_response()))
}

pub async fn update_branch(
    db: web::Data<Database>,
    path: web::Path<i32>,
    payload: web::Json<UpdateBranchRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let branch = Branch::update(db.pool(), path.into_inner(), &payload)
        .await?
        .ok_or_else(|| AppError::NotFound("Branch not found".to_string()))?;

    Ok(HttpResponse::Ok().json(branch.to_response()))
}

pub async fn delete_branch(
    db: web::Data<Database>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let deleted = Branch::delete(db.pool(), path.into_inner()).await?;
    if !deleted {
        return Err(AppError::NotFound("Branch not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
