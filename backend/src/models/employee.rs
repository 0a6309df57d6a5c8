use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use acme_store_shared::dto::{CreateEmployeeRequest, EmployeeResponse, UpdateEmployeeRequest};

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub hire_date: NaiveDate,
    pub salary: Option<Decimal>,
    pub commission_pct: Option<Decimal>,
    pub job_title: Option<String>,
    pub department_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub branch_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub async fn create(pool: &PgPool, request: &CreateEmployeeRequest) -> Result<Self, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (first_name, last_name, email, phone, hire_date, salary,
                                   commission_pct, job_title, department_id, manager_id, branch_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, first_name, last_name, email, phone, hire_date, salary,
                      commission_pct, job_title, department_id, manager_id, branch_id,
                      created_at, updated_at
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.hire_date)
        .bind(request.salary)
        .bind(request.commission_pct)
        .bind(&request.job_title)
        .bind(request.department_id)
        .bind(request.manager_id)
        .bind(request.branch_id)
        .fetch_one(pool)
        .await?;

        Ok(employee)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, last_name, email, phone, hire_date, salary,
                   commission_pct, job_title, department_id, manager_id, branch_id,
                   created_at, updated_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(employee)
    }

    /// List employees, optionally narrowed to one department or manager
    pub async fn list(
        pool: &PgPool,
        department_id: Option<i32>,
        manager_id: Option<i32>,
    ) -> Result<Vec<Self>, AppError> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, first_name, last_name, email, phone, hire_date, salary,
                   commission_pct, job_title, department_id, manager_id, branch_id,
                   created_at, updated_at
            FROM employees
            WHERE ($1::INT IS NULL OR department_id = $1)
              AND ($2::INT IS NULL OR manager_id = $2)
            ORDER BY id
            "#,
        )
        .bind(department_id)
        .bind(manager_id)
        .fetch_all(pool)
        .await?;

        Ok(employees)
    }

    /// Apply a partial update; absent fields keep their stored value
    pub async fn update(
        pool: &PgPool,
        id: i32,
        request: &UpdateEmployeeRequest,
    ) -> Result<Option<Self>, AppError> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                salary = COALESCE($6, salary),
                commission_pct = COALESCE($7, commission_pct),
                job_title = COALESCE($8, job_title),
                department_id = COALESCE($9, department_id),
                manager_id = COALESCE($10, manager_id),
                branch_id = COALESCE($11, branch_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, hire_date, salary,
                      commission_pct, job_title, department_id, manager_id, branch_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.salary)
        .bind(request.commission_pct)
        .bind(&request.job_title)
        .bind(request.department_id)
        .bind(request.manager_id)
        .bind(request.branch_id)
        .fetch_optional(pool)
        .await?;

        Ok(employee)
    }

    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE email = $1")
            .bind(email)
            .fetch_one(pool)
            .await?;

        Ok(count > 0)
    }

    pub fn to_response(&self) -> EmployeeResponse {
        EmployeeResponse {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            hire_date: self.hire_date,
            salary: self.salary,
            commission_pct: self.commission_pct,
            job_title: self.job_title.clone(),
            department_id: self.department_id,
            manager_id: self.manager_id,
            branch_id: self.branch_id,
        }
    }
}
