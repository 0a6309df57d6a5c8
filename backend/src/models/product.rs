use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category_id: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product row joined with its category name, as the catalog endpoints
/// return it.
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
}

impl Product {
    pub async fn create(pool: &PgPool, request: &CreateProductRequest) -> Result<Self, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, stock_quantity, category_id, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, description, price, stock_quantity, category_id, image_url,
                      created_at, updated_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.stock_quantity)
        .bind(request.category_id)
        .bind(&request.image_url)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, stock_quantity, category_id, image_url,
                   created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Find one product joined with its category name
    pub async fn find_with_category(
        pool: &PgPool,
        id: i32,
    ) -> Result<Option<ProductWithCategory>, AppError> {
        let product = sqlx::query_as::<_, ProductWithCategory>(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.stock_quantity, p.category_id,
                   p.image_url, p.created_at, p.updated_at, c.name AS category_name
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// List the catalog, optionally narrowed by category and a name search
    pub async fn list(
        pool: &PgPool,
        category_id: Option<i32>,
        search: Option<&str>,
    ) -> Result<Vec<ProductWithCategory>, AppError> {
        let pattern = search.map(|term| format!("%{}%", term));

        let products = sqlx::query_as::<_, ProductWithCategory>(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.stock_quantity, p.category_id,
                   p.image_url, p.created_at, p.updated_at, c.name AS category_name
            FROM products p
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE ($1::INT IS NULL OR p.category_id = $1)
              AND ($2::TEXT IS NULL OR p.name ILIKE $2)
            ORDER BY p.id
            "#,
        )
        .bind(category_id)
        .bind(pattern)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Apply a partial update; absent fields keep their stored value
    pub async fn update(
        pool: &PgPool,
        id: i32,
        request: &UpdateProductRequest,
    ) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock_quantity = COALESCE($5, stock_quantity),
                category_id = COALESCE($6, category_id),
                image_url = COALESCE($7, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, price, stock_quantity, category_id, image_url,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.stock_quantity)
        .bind(request.category_id)
        .bind(&request.image_url)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Convert to response DTO; the category name is only resolved by the
    /// joined queries, so it is absent here.
    pub fn to_response(&self) -> ProductResponse {
        ProductResponse {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock_quantity: self.stock_quantity,
            category_id: self.category_id,
            category_name: None,
            image_url: self.image_url.clone(),
        }
    }
}

impl ProductWithCategory {
    pub fn to_response(&self) -> ProductResponse {
        ProductResponse {
            category_name: self.category_name.clone(),
            ..self.product.to_response()
        }
    }
}
