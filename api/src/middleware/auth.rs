//! JWT authentication middleware.
//!
//! Wraps protected routes, pulls the access token from the request and
//! verifies it through the [`TokenService`]. Native clients send
//! `Authorization: Bearer <token>`; browser clients fall back to the
//! `access_token` cookie set at login. On success an [`AuthContext`] is
//! injected into the request extensions for handlers to extract.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use ta_core::domain::entities::token::Claims;
use ta_core::errors::{DomainError, TokenError};
use ta_core::services::TokenService;

use crate::error::ApiError;
use crate::routes::auth::ACCESS_TOKEN_COOKIE;

/// Authenticated caller identity injected into request extensions
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID taken from the token's subject claim
    pub user_id: Uuid,
}

impl AuthContext {
    fn from_claims(claims: &Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self { user_id })
    }
}

/// Middleware factory guarding a route with JWT verification
pub struct JwtAuth {
    tokens: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = Arc::clone(&self.tokens);

        Box::pin(async move {
            let token = extract_token(&req)
                .ok_or_else(|| ApiError::from(DomainError::Unauthorized))?;

            let claims = tokens.verify_access_token(&token).map_err(ApiError::from)?;
            let context = AuthContext::from_claims(&claims).map_err(ApiError::from)?;

            req.extensions_mut().insert(context);
            service.call(req).await
        })
    }
}

/// Pulls the access token from the Authorization header, falling back to
/// the auth cookie.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    req.cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(DomainError::Unauthorized).into());

        ready(result)
    }
}
