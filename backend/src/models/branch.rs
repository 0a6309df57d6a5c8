use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{BranchResponse, CreateBranchRequest, UpdateBranchRequest};

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Branch {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Branch {
    pub async fn create(pool: &PgPool, request: &CreateBranchRequest) -> Result<Self, AppError> {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branches (name, location, phone)
            VALUES ($1, $2, $3)
            RETURNING id, name, location, phone, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.location)
        .bind(&request.phone)
        .fetch_one(pool)
        .await?;

        Ok(branch)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let branch = sqlx::query_as::<_, Branch>(
            "SELECT id, name, location, phone, created_at FROM branches WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(branch)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let branches = sqlx::query_as::<_, Branch>(
            "SELECT id, name, location, phone, created_at FROM branches ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(branches)
    }

    /// Apply the supplied fields, leaving absent ones untouched
    pub async fn update(
        pool: &PgPool,
        id: i32,
        request: &UpdateBranchRequest,
    ) -> Result<Option<Self>, AppError> {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branches
            SET name = COALESCE($2, name),
                location = COALESCE($3, location),
                phone = COALESCE($4, phone)
            WHERE id = $1
            RETURNING id, name, location, phone, created_at
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.location)
        .bind(&request.phone)
        .fetch_optional(pool)
        .await?;

        Ok(branch)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> BranchResponse {
        BranchResponse {
            id: self.id,
            name: self.name.clone(),
            location: self.location.clone(),
            phone: self.phone.clone(),
        }
    }
}
