use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use acme_store_shared::constants::{ERROR_INVALID_TOKEN, ERROR_NOT_AUTHENTICATED};
use acme_store_shared::types::Realm;

use crate::error::AppError;
use crate::utils::jwt::{Claims, JwtService};

/// The authenticated caller, tagged by realm.
///
/// Staff and customer ids come from separate tables and overlap freely,
/// so a bare id is never enough to know who is calling.
#[derive(Debug, Clone)]
pub enum Principal {
    Admin { user_id: i32, role: String },
    Customer { customer_id: i32 },
}

impl Principal {
    fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let id = claims.principal_id()?;

        Ok(match claims.realm {
            Realm::Admin => Principal::Admin {
                user_id: id,
                role: claims.role.clone(),
            },
            Realm::Customer => Principal::Customer { customer_id: id },
        })
    }

    fn realm(&self) -> Realm {
        match self {
            Principal::Admin { .. } => Realm::Admin,
            Principal::Customer { .. } => Realm::Customer,
        }
    }
}

/// Marker left in request extensions when a presented token failed
/// validation, so extractors can tell "no token" from "bad token".
#[derive(Debug, Clone, Copy)]
struct AuthRejection;

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn missing_token_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "missing_token",
        "message": ERROR_NOT_AUTHENTICATED,
    }))
}

fn invalid_token_response() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "invalid_token",
        "message": ERROR_INVALID_TOKEN,
    }))
}

/// Middleware enforcing a bearer token of one specific realm.
///
/// Wrap it around scopes whose every route belongs to the same realm.
/// Requests without a token, with an invalid or expired token, or with a
/// token from the other realm are rejected with 401 before any handler
/// runs. On success the decoded [`Principal`] is stored in the request
/// extensions for the handler's extractor.
pub struct AuthMiddleware {
    jwt_service: Rc<JwtService>,
    realm: Realm,
}

impl AuthMiddleware {
    pub fn admin(jwt_service: JwtService) -> Self {
        Self {
            jwt_service: Rc::new(jwt_service),
            realm: Realm::Admin,
        }
    }

    pub fn customer(jwt_service: JwtService) -> Self {
        Self {
            jwt_service: Rc::new(jwt_service),
            realm: Realm::Customer,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            realm: self.realm,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: Rc<JwtService>,
    realm: Realm,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Token checks are synchronous, so rejections short-circuit
        // without touching the inner service.
        let token = match bearer_token(&req) {
            Some(token) => token.to_owned(),
            None => {
                let response = req.into_response(missing_token_response());
                return Box::pin(ready(Ok(response.map_into_right_body())));
            }
        };

        let principal = match self
            .jwt_service
            .validate_token(&token)
            .and_then(|claims| Principal::from_claims(&claims))
        {
            Ok(principal) => principal,
            Err(_) => {
                let response = req.into_response(invalid_token_response());
                return Box::pin(ready(Ok(response.map_into_right_body())));
            }
        };

        if principal.realm() != self.realm {
            let response = req.into_response(invalid_token_response());
            return Box::pin(ready(Ok(response.map_into_right_body())));
        }

        req.extensions_mut().insert(principal);

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Middleware that decodes a bearer token when one is present but never
/// rejects the request itself.
///
/// Wrap it around scopes that mix admin and customer routes; the typed
/// extractors below decide per handler whether the caller qualifies.
pub struct OptionalAuthMiddleware {
    jwt_service: Rc<JwtService>,
}

impl OptionalAuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self {
            jwt_service: Rc::new(jwt_service),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OptionalAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = OptionalAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OptionalAuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
        }))
    }
}

pub struct OptionalAuthMiddlewareService<S> {
    service: S,
    jwt_service: Rc<JwtService>,
}

impl<S, B> Service<ServiceRequest> for OptionalAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token) = bearer_token(&req).map(str::to_owned) {
            match self
                .jwt_service
                .validate_token(&token)
                .and_then(|claims| Principal::from_claims(&claims))
            {
                Ok(principal) => {
                    req.extensions_mut().insert(principal);
                }
                Err(_) => {
                    req.extensions_mut().insert(AuthRejection);
                }
            }
        }

        self.service.call(req)
    }
}

/// A staff caller. Resolving this on a request whose token is missing,
/// invalid, or from the customer realm yields 401.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: i32,
    pub role: String,
}

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let extensions = req.extensions();

        let result = match extensions.get::<Principal>() {
            Some(Principal::Admin { user_id, role }) => Ok(AdminUser {
                user_id: *user_id,
                role: role.clone(),
            }),
            Some(Principal::Customer { .. }) => {
                Err(AppError::Authentication(ERROR_INVALID_TOKEN.to_string()))
            }
            None if extensions.get::<AuthRejection>().is_some() => {
                Err(AppError::Authentication(ERROR_INVALID_TOKEN.to_string()))
            }
            None => Err(AppError::Authentication(
                ERROR_NOT_AUTHENTICATED.to_string(),
            )),
        };

        ready(result)
    }
}

/// A customer caller. Same rejection rules as [`AdminUser`], with the
/// realms swapped.
#[derive(Debug, Clone)]
pub struct CustomerUser {
    pub customer_id: i32,
}

impl FromRequest for CustomerUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let extensions = req.extensions();

        let result = match extensions.get::<Principal>() {
            Some(Principal::Customer { customer_id }) => Ok(CustomerUser {
                customer_id: *customer_id,
            }),
            Some(Principal::Admin { .. }) => {
                Err(AppError::Authentication(ERROR_INVALID_TOKEN.to_string()))
            }
            None if extensions.get::<AuthRejection>().is_some() => {
                Err(AppError::Authentication(ERROR_INVALID_TOKEN.to_string()))
            }
            None => Err(AppError::Authentication(
                ERROR_NOT_AUTHENTICATED.to_string(),
            )),
        };

        ready(result)
    }
}
