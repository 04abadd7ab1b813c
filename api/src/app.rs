//! Application factory.
//!
//! Builds the actix [`App`] with its middleware stack and route tree.
//! `main` and the integration tests share this factory, so the tree they
//! exercise is identical.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error, HttpResponse};
use tracing_actix_web::TracingLogger;

use ta_core::repositories::UserRepository;
use ta_core::services::otp::SmsSender;
use ta_shared::config::AppConfig;
use ta_shared::types::ErrorResponse;

use crate::middleware::{create_cors, JwtAuth};
use crate::routes::auth::{logout, refresh, send_code, session, verify_code, AppState};

/// Creates the application with all routes and middleware wired up.
pub fn create_app<U, S>(
    state: web::Data<AppState<U, S>>,
    config: web::Data<AppConfig>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SmsSender + 'static,
{
    let cors = create_cors(&config.environment);
    let tokens = Arc::clone(&state.tokens);

    App::new()
        .app_data(state)
        .app_data(config)
        .wrap(TracingLogger::default())
        .wrap(cors)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/send-code", web::post().to(send_code::send_code::<U, S>))
                    .route(
                        "/verify-code",
                        web::post().to(verify_code::verify_code::<U, S>),
                    )
                    .route("/refresh", web::post().to(refresh::refresh::<U, S>))
                    .route(
                        "/logout",
                        web::post()
                            .to(logout::logout::<U, S>)
                            .wrap(JwtAuth::new(Arc::clone(&tokens))),
                    )
                    .route(
                        "/session",
                        web::get()
                            .to(session::session::<U, S>)
                            .wrap(JwtAuth::new(Arc::clone(&tokens))),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "textauth-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
