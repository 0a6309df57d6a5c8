use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CustomerResponse, RegisterCustomerRequest, UpdateCustomerRequest};

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Register a new customer account
    pub async fn create(
        pool: &PgPool,
        request: &RegisterCustomerRequest,
        password_hash: &str,
    ) -> Result<Self, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (username, password_hash, first_name, last_name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, password_hash, first_name, last_name, email, phone, address,
                      created_at, updated_at
            "#,
        )
        .bind(&request.username)
        .bind(password_hash)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .fetch_one(pool)
        .await?;

        Ok(customer)
    }

    /// Find customer by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, username, password_hash, first_name, last_name, email, phone, address,
                   created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(customer)
    }

    /// Find customer by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<Self>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, username, password_hash, first_name, last_name, email, phone, address,
                   created_at, updated_at
            FROM customers
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(customer)
    }

    /// List customers, optionally narrowed by a name or email search term
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Self>, AppError> {
        let customers = match search {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, Customer>(
                    r#"
                    SELECT id, username, password_hash, first_name, last_name, email, phone, address,
                           created_at, updated_at
                    FROM customers
                    WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1
                    ORDER BY id
                    "#,
                )
                .bind(pattern)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Customer>(
                    r#"
                    SELECT id, username, password_hash, first_name, last_name, email, phone, address,
                           created_at, updated_at
                    FROM customers
                    ORDER BY id
                    "#,
                )
                .fetch_all(pool)
                .await?
            }
        };

        Ok(customers)
    }

    /// Apply a partial update; absent fields keep their stored value
    pub async fn update(
        pool: &PgPool,
        id: i32,
        request: &UpdateCustomerRequest,
    ) -> Result<Option<Self>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, password_hash, first_name, last_name, email, phone, address,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .fetch_optional(pool)
        .await?;

        Ok(customer)
    }

    /// Replace the stored password hash
    pub async fn update_password(
        pool: &PgPool,
        id: i32,
        password_hash: &str,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE customers SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Delete a customer, reporting whether a row existed
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check if username exists
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers WHERE username = $1")
                .bind(username)
                .fetch_one(pool)
                .await?;

        Ok(count > 0)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers WHERE email = $1")
            .bind(email)
            .fetch_one(pool)
            .await?;

        Ok(count > 0)
    }

    /// Convert to response DTO (without the password hash)
    pub fn to_response(&self) -> CustomerResponse {
        CustomerResponse {
            id: self.id,
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            created_at: self.created_at,
        }
    }
}
