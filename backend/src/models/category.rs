use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CategoryResponse, CreateCategoryRequest};

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    pub async fn create(pool: &PgPool, request: &CreateCategoryRequest) -> Result<Self, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    pub fn to_response(&self) -> CategoryResponse {
        CategoryResponse {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}
