use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::types::OrderStatus;

// Auth DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub role: String,
    pub user_id: i32,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,

    #[validate(length(min = 8))]
    pub new_password: String,
}

// Staff user DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[serde(default = "default_admin_role")]
    #[validate(length(min = 1, max = 20))]
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email, length(max = 100))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

// Customer DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterCustomerRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50))]
    pub last_name: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,

    #[validate(email, length(max = 100))]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Department DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 100))]
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 100))]
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DepartmentResponse {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
}

// Branch DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBranchRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateBranchRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BranchResponse {
    pub id: i32,
    pub name: String,
    pub location: Option<String>,
    pub phone: Option<String>,
}

// Employee DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50))]
    pub last_name: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub hire_date: NaiveDate,

    #[validate(custom = "validate_non_negative")]
    pub salary: Option<Decimal>,

    #[validate(custom = "validate_percentage")]
    pub commission_pct: Option<Decimal>,

    #[validate(length(max = 100))]
    pub job_title: Option<String>,

    pub department_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub branch_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,

    #[validate(email, length(max = 100))]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    #[validate(custom = "validate_non_negative")]
    pub salary: Option<Decimal>,

    #[validate(custom = "validate_percentage")]
    pub commission_pct: Option<Decimal>,

    #[validate(length(max = 100))]
    pub job_title: Option<String>,

    pub department_id: Option<i32>,
    pub manager_id: Option<i32>,
    pub branch_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeResponse {
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
}

// Category DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

// Product DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom = "validate_positive")]
    pub price: Decimal,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i32,

    pub category_id: Option<i32>,

    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(custom = "validate_positive")]
    pub price: Option<Decimal>,

    #[validate(range(min = 0))]
    pub stock_quantity: Option<i32>,

    pub category_id: Option<i32>,

    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub image_url: Option<String>,
}

// Discount DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_discount_window", skip_on_field_errors = true))]
pub struct CreateDiscountRequest {
    pub product_id: i32,

    #[validate(custom = "validate_percentage")]
    pub discount_pct: Decimal,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiscountResponse {
    pub id: i32,
    pub product_id: i32,
    pub discount_pct: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// Store DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateStoreRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub branch_id: Option<i32>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    pub manager_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateStoreRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub branch_id: Option<i32>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    pub manager_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreResponse {
    pub id: i32,
    pub name: String,
    pub branch_id: Option<i32>,
    pub location: Option<String>,
    pub manager_id: Option<i32>,
}

// Supply DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateSupplyRequest {
    pub product_id: i32,
    pub store_id: i32,

    #[validate(range(min = 1))]
    pub quantity: i32,

    pub supply_date: NaiveDate,

    #[validate(length(max = 100))]
    pub supplier_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SupplyResponse {
    pub id: i32,
    pub product_id: i32,
    pub store_id: i32,
    pub quantity: i32,
    pub supply_date: NaiveDate,
    pub supplier_name: Option<String>,
}

// Order DTOs
//
// Order lines carry no client price: the unit price is always frozen from
// the product row inside the placement transaction. Unknown JSON fields
// are skipped, so clients that still send one are unaffected.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    pub product_id: i32,

    #[validate(range(min = 1))]
    pub quantity: i32,

    #[serde(default)]
    #[validate(custom = "validate_percentage")]
    pub discount_pct: Decimal,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub shipping_address: Option<String>,
    pub branch_id: Option<i32>,

    #[validate]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub discount_pct: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Option<Decimal>,
    pub shipping_address: Option<String>,
    pub branch_id: Option<i32>,
    pub items: Vec<OrderItemResponse>,
}

// Shipment DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateShipmentRequest {
    pub order_id: i32,

    #[validate(length(max = 100))]
    pub carrier: Option<String>,

    #[validate(length(max = 100))]
    pub tracking_number: Option<String>,

    pub estimated_delivery: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateShipmentRequest {
    #[validate(length(min = 1, max = 30))]
    pub status: Option<String>,

    pub shipped_date: Option<DateTime<Utc>>,
    pub actual_delivery: Option<NaiveDate>,

    #[validate(length(max = 100))]
    pub carrier: Option<String>,

    #[validate(length(max = 100))]
    pub tracking_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShipmentResponse {
    pub id: i32,
    pub order_id: i32,
    pub status: String,
    pub shipped_date: Option<DateTime<Utc>>,
    pub estimated_delivery: Option<NaiveDate>,
    pub actual_delivery: Option<NaiveDate>,
    pub carrier: Option<String>,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn default_admin_role() -> String {
    "admin".to_string()
}

fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("must_be_positive"));
    }
    Ok(())
}

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("must_not_be_negative"));
    }
    Ok(())
}

fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::new("percentage_out_of_range"));
    }
    Ok(())
}

fn validate_discount_window(request: &CreateDiscountRequest) -> Result<(), ValidationError> {
    if request.start_date > request.end_date {
        return Err(ValidationError::new("discount_window_inverted"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_create_defaults_role_to_admin() {
        let request: CreateUserRequest = serde_json::from_value(json!({
            "username": "store_manager",
            "password": "s3cretpass",
            "email": "manager@acme.example"
        }))
        .unwrap();

        assert_eq!(request.role, "admin");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn patch_request_distinguishes_absent_fields() {
        let patch: UpdateEmployeeRequest =
            serde_json::from_value(json!({ "salary": 5000.0 })).unwrap();

        assert_eq!(patch.salary, Some(Decimal::from(5000)));
        assert!(patch.first_name.is_none());
        assert!(patch.last_name.is_none());
        assert!(patch.department_id.is_none());
        assert!(patch.manager_id.is_none());
    }

    #[test]
    fn order_line_ignores_client_unit_price() {
        let line: OrderItemRequest = serde_json::from_value(json!({
            "product_id": 7,
            "quantity": 2,
            "unit_price": 0.01,
            "discount_pct": 10.0
        }))
        .unwrap();

        assert_eq!(line.product_id, 7);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.discount_pct, Decimal::from(10));
    }

    #[test]
    fn order_line_discount_defaults_to_zero() {
        let line: OrderItemRequest =
            serde_json::from_value(json!({ "product_id": 1, "quantity": 1 })).unwrap();

        assert_eq!(line.discount_pct, Decimal::ZERO);
        assert!(line.validate().is_ok());
    }

    #[test]
    fn discount_out_of_range_is_rejected() {
        let line: OrderItemRequest = serde_json::from_value(json!({
            "product_id": 1,
            "quantity": 1,
            "discount_pct": 150.0
        }))
        .unwrap();

        assert!(line.validate().is_err());
    }

    #[test]
    fn inverted_discount_window_is_rejected() {
        let request: CreateDiscountRequest = serde_json::from_value(json!({
            "product_id": 1,
            "discount_pct": 20.0,
            "start_date": "2025-06-30",
            "end_date": "2025-06-01"
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let request: CreateProductRequest = serde_json::from_value(json!({
            "name": "Widget",
            "price": 0.0
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn invalid_email_is_rejected() {
        let request: RegisterCustomerRequest = serde_json::from_value(json!({
            "username": "jane_doe",
            "password": "longenough",
            "first_name": "Jane",
            "last_name": "Doe",
            "email": "not-an-email"
        }))
        .unwrap();

        assert!(request.validate().is_err());
    }

    #[test]
    fn unknown_order_status_fails_deserialization() {
        let result =
            serde_json::from_value::<UpdateOrderStatusRequest>(json!({ "status": "misplaced" }));

        assert!(result.is_err());
    }
}
