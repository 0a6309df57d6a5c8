//! End-to-end flows against a live Postgres.
//!
//! Run with `cargo test -- --ignored` after pointing TEST_DATABASE_URL
//! at a scratch database.

mod common;

use actix_web::test;
use serde_json::json;

use common::{
    admin_token, bearer, customer_token, jwt_service, seed_admin, seed_customer, seed_product,
    test_app, test_database, unique,
};

#[actix_web::test]
#[ignore = "requires a running Postgres with TEST_DATABASE_URL set"]
async fn test_customer_journey_places_and_tracks_an_order() {
    let database = test_database().await;
    let jwt = jwt_service();
    let app = test::init_service(test_app(&database, &jwt)).await;

    // Staff side: seed an admin and log in through the API.
    let admin_name = unique("admin");
    seed_admin(database.pool(), &admin_name, "admin-password-1").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/admin/login")
        .set_json(json!({ "username": admin_name, "password": "admin-password-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["role"], "admin");
    let admin_auth = bearer(body["access_token"].as_str().unwrap());

    // Build a small catalog.
    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(admin_auth.clone())
        .set_json(json!({ "name": "Gadgets" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let category: serde_json::Value = test::read_body_json(resp).await;

    let widget_name = unique("widget");
    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(admin_auth.clone())
        .set_json(json!({
            "name": widget_name,
            "price": 10.00,
            "stock_quantity": 50,
            "category_id": category["id"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let widget: serde_json::Value = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(admin_auth.clone())
        .set_json(json!({ "name": unique("gizmo"), "price": 5.00 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let gizmo: serde_json::Value = test::read_body_json(resp).await;

    // Guests can browse the catalog without a token.
    let req = test::TestRequest::get()
        .uri(&format!("/api/products?search={widget_name}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let listing: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
    assert_eq!(listing[0]["category_name"], "Gadgets");

    // Customer side: register and log in.
    let customer_name = unique("shopper");
    let req = test::TestRequest::post()
        .uri("/api/customers/register")
        .set_json(json!({
            "username": customer_name,
            "password": "shopper-password",
            "first_name": "Sam",
            "last_name": "Shopper",
            "email": format!("{customer_name}@example.com"),
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/auth/customer/login")
        .set_json(json!({ "username": customer_name, "password": "shopper-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["role"], "customer");
    let customer_auth = bearer(body["access_token"].as_str().unwrap());

    // Place the order. The client's unit_price is ignored; the stored
    // product prices drive the total: 2*10.00*0.9 + 5.00 = 23.00.
    let req = test::TestRequest::post()
        .uri("/api/orders")
        .insert_header(customer_auth.clone())
        .set_json(json!({
            "shipping_address": "1 Main St",
            "items": [
                { "product_id": widget["id"], "quantity": 2, "discount_pct": 10, "unit_price": 0.01 },
                { "product_id": gizmo["id"], "quantity": 1 },
            ],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let order: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(order["status"], "pending");
    assert_eq!(order["total_amount"], 23.0);
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    assert_eq!(order["items"][0]["unit_price"], 10.0);
    let order_id = order["id"].as_i64().unwrap();

    // The order shows up in the customer's history.
    let req = test::TestRequest::get()
        .uri("/api/customers/me/orders")
        .insert_header(customer_auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let history: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["id"].as_i64().unwrap(), order_id);

    // Fulfilment: status moves, a shipment opens, duplicates are refused.
    let req = test::TestRequest::patch()
        .uri(&format!("/api/orders/{order_id}/status"))
        .insert_header(admin_auth.clone())
        .set_json(json!({ "status": "processing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "processing");

    let req = test::TestRequest::post()
        .uri("/api/shipments")
        .insert_header(admin_auth.clone())
        .set_json(json!({ "order_id": order_id, "carrier": "UPS" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let shipment: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(shipment["status"], "pending");
    let shipment_id = shipment["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/shipments")
        .insert_header(admin_auth.clone())
        .set_json(json!({ "order_id": order_id, "carrier": "FedEx" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["message"], "Shipment already exists for this order");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/shipments/{shipment_id}"))
        .insert_header(admin_auth.clone())
        .set_json(json!({ "status": "delivered", "actual_delivery": "2026-09-01" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "delivered");
    assert_eq!(body["carrier"], "UPS");

    // The customer tracks by order id.
    let req = test::TestRequest::get()
        .uri(&format!("/api/shipments/{order_id}"))
        .insert_header(customer_auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["actual_delivery"], "2026-09-01");
}

#[actix_web::test]
#[ignore = "requires a running Postgres with TEST_DATABASE_URL set"]
async fn test_order_with_unknown_product_rolls_back() {
    let database = test_database().await;
    let jwt = jwt_service();
    let app = test::init_service(test_app(&database, &jwt)).await;

    let customer_id = seed_customer(database.pool(), &unique("shopper"), "a-password").await;
    let product_id = seed_product(database.pool(), &unique("widget"), "10.00").await;
    let token = customer_token(&jwt, customer_id);

    let req = test::TestRequest::post()
        .uri("/api/orders")
        .insert_header(bearer(&token))
        .set_json(json!({
            "items": [
                { "product_id": product_id, "quantity": 1 },
                { "product_id": 999_999_999, "quantity": 1 },
            ],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product 999999999 not found");

    // The valid first line must not survive the failed order.
    let req = test::TestRequest::get()
        .uri("/api/customers/me/orders")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let history: serde_json::Value = test::read_body_json(resp).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[actix_web::test]
#[ignore = "requires a running Postgres with TEST_DATABASE_URL set"]
async fn test_duplicate_registration_is_rejected() {
    let database = test_database().await;
    let jwt = jwt_service();
    let app = test::init_service(test_app(&database, &jwt)).await;

    let username = unique("shopper");
    let email = format!("{username}@example.com");
    let payload = json!({
        "username": username,
        "password": "shopper-password",
        "first_name": "Sam",
        "last_name": "Shopper",
        "email": email,
    });

    let req = test::TestRequest::post()
        .uri("/api/customers/register")
        .set_json(payload.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    // Same username again.
    let req = test::TestRequest::post()
        .uri("/api/customers/register")
        .set_json(payload.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "conflict");
    assert_eq!(body["message"], "Username already exists");

    // Fresh username, same email.
    let mut second = payload;
    second["username"] = json!(unique("shopper"));
    let req = test::TestRequest::post()
        .uri("/api/customers/register")
        .set_json(second)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email already exists");
}

#[actix_web::test]
#[ignore = "requires a running Postgres with TEST_DATABASE_URL set"]
async fn test_login_rejects_bad_credentials() {
    let database = test_database().await;
    let jwt = jwt_service();
    let app = test::init_service(test_app(&database, &jwt)).await;

    let username = unique("shopper");
    seed_customer(database.pool(), &username, "right-password").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/customer/login")
        .set_json(json!({ "username": username, "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "authentication_error");
    assert_eq!(body["message"], "Invalid credentials");

    // Unknown accounts get the same answer as wrong passwords.
    let req = test::TestRequest::post()
        .uri("/api/auth/customer/login")
        .set_json(json!({ "username": unique("ghost"), "password": "whatever" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_web::test]
#[ignore = "requires a running Postgres with TEST_DATABASE_URL set"]
async fn test_password_change_flow() {
    let database = test_database().await;
    let jwt = jwt_service();
    let app = test::init_service(test_app(&database, &jwt)).await;

    let username = unique("shopper");
    let customer_id = seed_customer(database.pool(), &username, "old-password").await;
    let auth = bearer(&customer_token(&jwt, customer_id));

    // The current password must match.
    let req = test::TestRequest::post()
        .uri("/api/customers/me/change-password")
        .insert_header(auth.clone())
        .set_json(json!({ "current_password": "guessed-wrong", "new_password": "new-password-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Current password is incorrect");

    let req = test::TestRequest::post()
        .uri("/api/customers/me/change-password")
        .insert_header(auth.clone())
        .set_json(json!({ "current_password": "old-password", "new_password": "new-password-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password changed successfully");

    // Old credential dies, new one works.
    let req = test::TestRequest::post()
        .uri("/api/auth/customer/login")
        .set_json(json!({ "username": username, "password": "old-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/auth/customer/login")
        .set_json(json!({ "username": username, "password": "new-password-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
#[ignore = "requires a running Postgres with TEST_DATABASE_URL set"]
async fn test_admin_crud_over_org_structure() {
    let database = test_database().await;
    let jwt = jwt_service();
    let app = test::init_service(test_app(&database, &jwt)).await;

    let admin_id = seed_admin(database.pool(), &unique("admin"), "admin-password-1").await;
    let auth = bearer(&admin_token(&jwt, admin_id));

    let req = test::TestRequest::post()
        .uri("/api/departments")
        .insert_header(auth.clone())
        .set_json(json!({ "name": "Sales", "location": "HQ" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let department: serde_json::Value = test::read_body_json(resp).await;
    let department_id = department["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .insert_header(auth.clone())
        .set_json(json!({
            "first_name": "Erin",
            "last_name": "Employee",
            "email": format!("{}@example.com", unique("erin")),
            "hire_date": "2024-05-01",
            "salary": 52000.00,
            "job_title": "Clerk",
            "department_id": department_id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let employee: serde_json::Value = test::read_body_json(resp).await;
    let employee_id = employee["id"].as_i64().unwrap();

    // Department filter finds the new hire.
    let req = test::TestRequest::get()
        .uri(&format!("/api/employees?department_id={department_id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let listing: serde_json::Value = test::read_body_json(resp).await;
    assert!(listing
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["id"].as_i64() == Some(employee_id)));

    // Partial update touches only the named field.
    let req = test::TestRequest::put()
        .uri(&format!("/api/employees/{employee_id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "job_title": "Senior Clerk" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["job_title"], "Senior Clerk");
    assert_eq!(body["salary"], 52000.0);
    assert_eq!(body["hire_date"], "2024-05-01");

    // Renaming the department leaves its location alone.
    let req = test::TestRequest::put()
        .uri(&format!("/api/departments/{department_id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "name": "Field Sales" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Field Sales");
    assert_eq!(body["location"], "HQ");

    // Delete, then the id is gone. The hire keeps their row, minus the
    // department link.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/departments/{department_id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/departments/{department_id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    let req = test::TestRequest::get()
        .uri(&format!("/api/employees/{employee_id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["department_id"], serde_json::Value::Null);
}

#[actix_web::test]
#[ignore = "requires a running Postgres with TEST_DATABASE_URL set"]
async fn test_product_catalog_management() {
    let database = test_database().await;
    let jwt = jwt_service();
    let app = test::init_service(test_app(&database, &jwt)).await;

    let admin_id = seed_admin(database.pool(), &unique("admin"), "admin-password-1").await;
    let auth = bearer(&admin_token(&jwt, admin_id));

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(auth.clone())
        .set_json(json!({ "name": unique("lamp"), "price": 20.00 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let product: serde_json::Value = test::read_body_json(resp).await;
    let product_id = product["id"].as_i64().unwrap();
    // Only the joined read paths resolve the category name.
    assert_eq!(product["category_name"], serde_json::Value::Null);

    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{product_id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "price": 12.50 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["price"], 12.5);
    assert_eq!(body["name"], product["name"]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{product_id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{product_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product not found");
}

#[actix_web::test]
#[ignore = "requires a running Postgres with TEST_DATABASE_URL set"]
async fn test_customer_profile_updates_are_partial() {
    let database = test_database().await;
    let jwt = jwt_service();
    let app = test::init_service(test_app(&database, &jwt)).await;

    let customer_id = seed_customer(database.pool(), &unique("shopper"), "a-password").await;
    let auth = bearer(&customer_token(&jwt, customer_id));

    let req = test::TestRequest::put()
        .uri("/api/customers/me/profile")
        .insert_header(auth.clone())
        .set_json(json!({ "phone": "555-0100" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["phone"], "555-0100");
    assert_eq!(body["first_name"], "Test");
    assert_eq!(body["last_name"], "Customer");
}
