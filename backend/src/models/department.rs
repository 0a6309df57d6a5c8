use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CreateDepartmentRequest, DepartmentResponse, UpdateDepartmentRequest};

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Department {
    pub async fn create(
        pool: &PgPool,
        request: &CreateDepartmentRequest,
    ) -> Result<Self, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (name, location)
            VALUES ($1, $2)
            RETURNING id, name, location, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.location)
        .fetch_one(pool)
        .await?;

        Ok(department)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            "SELECT id, name, location, created_at FROM departments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(department)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let departments = sqlx::query_as::<_, Department>(
            "SELECT id, name, location, created_at FROM departments ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(departments)
    }

    /// Apply the supplied fields, leaving absent ones untouched
    pub async fn update(
        pool: &PgPool,
        id: i32,
        request: &UpdateDepartmentRequest,
    ) -> Result<Option<Self>, AppError> {
        let department = sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = COALESCE($2, name), location = COALESCE($3, location)
            WHERE id = $1
            RETURNING id, name, location, created_at
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.location)
        .fetch_optional(pool)
        .await?;

        Ok(department)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> DepartmentResponse {
        DepartmentResponse {
            id: self.id,
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }
}
