use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CreateStoreRequest, StoreResponse, UpdateStoreRequest};

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Store {
    pub id: i32,
    pub name: String,
    pub branch_id: Option<i32>,
    pub location: Option<String>,
    pub manager_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Store {
    pub async fn create(pool: &PgPool, request: &CreateStoreRequest) -> Result<Self, AppError> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            INSERT INTO stores (name, branch_id, location, manager_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, branch_id, location, manager_id, created_at
            "#,
        )
        .bind(&request.name)
        .bind(request.branch_id)
        .bind(&request.location)
        .bind(request.manager_id)
        .fetch_one(pool)
        .await?;

        Ok(store)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let store = sqlx::query_as::<_, Store>(
            "SELECT id, name, branch_id, location, manager_id, created_at FROM stores WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(store)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let stores = sqlx::query_as::<_, Store>(
            "SELECT id, name, branch_id, location, manager_id, created_at FROM stores ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(stores)
    }

    /// Apply the supplied fields, leaving absent ones untouched
    pub async fn update(
        pool: &PgPool,
        id: i32,
        request: &UpdateStoreRequest,
    ) -> Result<Option<Self>, AppError> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            UPDATE stores
            SET name = COALESCE($2, name),
                branch_id = COALESCE($3, branch_id),
                location = COALESCE($4, location),
                manager_id = COALESCE($5, manager_id)
            WHERE id = $1
            RETURNING id, name, branch_id, location, manager_id, created_at
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(request.branch_id)
        .bind(&request.location)
        .bind(request.manager_id)
        .fetch_optional(pool)
        .await?;

        Ok(store)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> StoreResponse {
        StoreResponse {
            id: self.id,
            name: self.name.clone(),
            branch_id: self.branch_id,
            location: self.location.clone(),
            manager_id: self.manager_id,
        }
    }
}
