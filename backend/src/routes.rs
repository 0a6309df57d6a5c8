use actix_web::dev::HttpServiceFactory;
use actix_web::web;

use crate::handlers;
use crate::middleware::{AuthMiddleware, OptionalAuthMiddleware};
use crate::utils::jwt::JwtService;

/// The complete `/api` routing tree.
///
/// Scopes whose routes all belong to one realm are wrapped in the strict
/// middleware and reject bad callers before any handler runs. Scopes
/// that mix admin, customer, and public routes get the optional
/// middleware; their handlers' extractors decide who qualifies.
///
/// Literal segments like `/me` are registered ahead of `/{id}` patterns
/// so they are matched first.
pub fn api_scope(jwt_service: &JwtService) -> impl HttpServiceFactory {
    web::scope("/api")
        .service(
            web::scope("/auth")
                .route("/admin/login", web::post().to(handlers::auth::admin_login))
                .route(
                    "/customer/login",
                    web::post().to(handlers::auth::customer_login),
                ),
        )
        .service(
            web::scope("/users")
                .wrap(AuthMiddleware::admin(jwt_service.clone()))
                .route("", web::get().to(handlers::users::list_users))
                .route("", web::post().to(handlers::users::create_user))
                .route("/me", web::get().to(handlers::users::get_current_user))
                .route(
                    "/me/change-password",
                    web::post().to(handlers::users::change_password),
                )
                .route("/{id}", web::get().to(handlers::users::get_user))
                .route("/{id}", web::put().to(handlers::users::update_user))
                .route("/{id}", web::delete().to(handlers::users::delete_user)),
        )
        .service(
            web::scope("/customers")
                .wrap(OptionalAuthMiddleware::new(jwt_service.clone()))
                .route("/register", web::post().to(handlers::customers::register))
                .route("/me/profile", web::get().to(handlers::customers::get_profile))
                .route(
                    "/me/profile",
                    web::put().to(handlers::customers::update_profile),
                )
                .route(
                    "/me/change-password",
                    web::post().to(handlers::customers::change_password),
                )
                .route("/me/orders", web::get().to(handlers::orders::list_my_orders))
                .route("", web::get().to(handlers::customers::list_customers))
                .route("/{id}", web::get().to(handlers::customers::get_customer))
                .route("/{id}", web::put().to(handlers::customers::update_customer))
                .route("/{id}", web::delete().to(handlers::customers::delete_customer)),
        )
        .service(
            web::scope("/departments")
                .wrap(AuthMiddleware::admin(jwt_service.clone()))
                .route("", web::get().to(handlers::departments::list_departments))
                .route("", web::post().to(handlers::departments::create_department))
                .route("/{id}", web::get().to(handlers::departments::get_department))
                .route("/{id}", web::put().to(handlers::departments::update_department))
                .route(
                    "/{id}",
                    web::delete().to(handlers::departments::delete_department),
                ),
        )
        .service(
            web::scope("/branches")
                .wrap(AuthMiddleware::admin(jwt_service.clone()))
                .route("", web::get().to(handlers::branches::list_branches))
                .route("", web::post().to(handlers::branches::create_branch))
                .route("/{id}", web::get().to(handlers::branches::get_branch))
                .route("/{id}", web::put().to(handlers::branches::update_branch))
                .route("/{id}", web::delete().to(handlers::branches::delete_branch)),
        )
        .service(
            web::scope("/employees")
                .wrap(AuthMiddleware::admin(jwt_service.clone()))
                .route("", web::get().to(handlers::employees::list_employees))
                .route("", web::post().to(handlers::employees::create_employee))
                .route("/{id}", web::get().to(handlers::employees::get_employee))
                .route("/{id}", web::put().to(handlers::employees::update_employee))
                .route("/{id}", web::delete().to(handlers::employees::delete_employee)),
        )
        .service(
            web::scope("/categories")
                .wrap(OptionalAuthMiddleware::new(jwt_service.clone()))
                .route("", web::get().to(handlers::categories::list_categories))
                .route("", web::post().to(handlers::categories::create_category)),
        )
        .service(
            web::scope("/products")
                .wrap(OptionalAuthMiddleware::new(jwt_service.clone()))
                .route("", web::get().to(handlers::products::list_products))
                .route("", web::post().to(handlers::products::create_product))
                .route("/{id}", web::get().to(handlers::products::get_product))
                .route("/{id}", web::put().to(handlers::products::update_product))
                .route("/{id}", web::delete().to(handlers::products::delete_product)),
        )
        .service(
            web::scope("/discounts")
                .wrap(AuthMiddleware::admin(jwt_service.clone()))
                .route("", web::get().to(handlers::discounts::list_discounts))
                .route("", web::post().to(handlers::discounts::create_discount))
                .route("/{id}", web::get().to(handlers::discounts::get_discount))
                .route("/{id}", web::delete().to(handlers::discounts::delete_discount)),
        )
        .service(
            web::scope("/stores")
                .wrap(AuthMiddleware::admin(jwt_service.clone()))
                .route("", web::get().to(handlers::stores::list_stores))
                .route("", web::post().to(handlers::stores::create_store))
                .route("/{id}", web::get().to(handlers::stores::get_store))
                .route("/{id}", web::put().to(handlers::stores::update_store))
                .route("/{id}", web::delete().to(handlers::stores::delete_store)),
        )
        .service(
            web::scope("/supply")
                .wrap(AuthMiddleware::admin(jwt_service.clone()))
                .route("", web::get().to(handlers::supplies::list_supplies))
                .route("", web::post().to(handlers::supplies::create_supply))
                .route("/{id}", web::get().to(handlers::supplies::get_supply))
                .route("/{id}", web::delete().to(handlers::supplies::delete_supply)),
        )
        .service(
            web::scope("/orders")
                .wrap(OptionalAuthMiddleware::new(jwt_service.clone()))
                .route("", web::get().to(handlers::orders::list_orders))
                .route("", web::post().to(handlers::orders::place_order))
                .route("/{id}", web::get().to(handlers::orders::get_order))
                .route(
                    "/{id}/status",
                    web::patch().to(handlers::orders::update_order_status),
                ),
        )
        .service(
            web::scope("/shipments")
                .wrap(OptionalAuthMiddleware::new(jwt_service.clone()))
                .route("", web::post().to(handlers::shipments::create_shipment))
                .route(
                    "/{id}",
                    web::get().to(handlers::shipments::get_shipment_for_order),
                )
                .route("/{id}", web::patch().to(handlers::shipments::update_shipment)),
        )
}
