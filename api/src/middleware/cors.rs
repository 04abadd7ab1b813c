//! CORS configuration.
//!
//! Development allows any origin so local web clients and emulators can
//! hit the API without ceremony. Production only admits origins listed in
//! `ALLOWED_ORIGINS`. Credentials support stays on in both modes because
//! the auth cookies ride on cross-origin requests.

use std::env;

use actix_cors::Cors;
use actix_web::http::{header, Method};
use tracing::info;

use ta_shared::config::Environment;

const DEFAULT_MAX_AGE: usize = 3600;

/// Builds the CORS middleware for the given environment.
pub fn create_cors(environment: &Environment) -> Cors {
    if environment.is_production() {
        production_cors()
    } else {
        development_cors()
    }
}

fn development_cors() -> Cors {
    info!("configuring permissive cors for development");

    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(DEFAULT_MAX_AGE)
        .supports_credentials()
}

fn production_cors() -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(DEFAULT_MAX_AGE)
        .supports_credentials();

    if let Ok(allowed_origins) = env::var("ALLOWED_ORIGINS") {
        for origin in allowed_origins.split(',').map(str::trim) {
            if !origin.is_empty() {
                info!(origin, "allowing cors origin");
                cors = cors.allowed_origin(origin);
            }
        }
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_cors_builds() {
        let _cors = create_cors(&Environment::Development);
    }

    #[test]
    fn test_production_cors_builds_with_origin_list() {
        env::set_var("ALLOWED_ORIGINS", "https://app.textauth.io, https://admin.textauth.io");
        let _cors = create_cors(&Environment::Production);
        env::remove_var("ALLOWED_ORIGINS");
    }
}
