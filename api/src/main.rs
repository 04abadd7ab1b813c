//! TextAuth API server binary.
//!
//! Wires configuration, the MySQL pool, the in-memory passcode store and
//! the chosen SMS provider into the actix application, then runs the
//! server. On shutdown the passcode sweeper is stopped and joined before
//! the database pool closes.

use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ta_api::app::create_app;
use ta_api::routes::auth::AppState;
use ta_core::services::otp::SmsSender;
use ta_core::services::{AuthService, OtpService, TokenService};
use ta_infra::cache::MemoryOtpStore;
use ta_infra::database::{DatabasePool, MySqlUserRepository};
use ta_infra::sms::{MockSmsSender, TwilioSmsSender};
use ta_shared::config::{AppConfig, SmsProvider};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env();
    info!(environment = %config.environment, "starting textauth api");

    if config.environment.is_production() && config.jwt.is_using_default_secret() {
        error!("JWT_SECRET must be set in production");
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "JWT_SECRET not configured",
        ));
    }

    let pool = DatabasePool::connect(&config.database).await.map_err(|err| {
        error!(error = %err, "failed to connect to database");
        io::Error::new(io::ErrorKind::ConnectionRefused, err.to_string())
    })?;
    let users = Arc::new(MySqlUserRepository::new(pool.pool().clone()));

    let store = Arc::new(MemoryOtpStore::new());
    store.start_sweeper(config.otp.sweep_interval());

    match config.sms.provider {
        SmsProvider::Twilio => {
            let sms = TwilioSmsSender::new(&config.sms).map_err(|err| {
                error!(error = %err, "invalid twilio configuration");
                io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
            })?;
            run(config, pool, users, store, Arc::new(sms)).await
        }
        SmsProvider::Mock => {
            warn!("sms provider is mock; verification codes are logged, not delivered");
            run(config, pool, users, store, Arc::new(MockSmsSender::new())).await
        }
    }
}

async fn run<S>(
    config: AppConfig,
    pool: DatabasePool,
    users: Arc<MySqlUserRepository>,
    store: Arc<MemoryOtpStore>,
    sms: Arc<S>,
) -> io::Result<()>
where
    S: SmsSender + 'static,
{
    let otp = Arc::new(
        OtpService::new(Arc::clone(&sms), Arc::clone(&store)).with_code_ttl(config.otp.ttl()),
    );
    let tokens = Arc::new(TokenService::new(config.jwt.clone()));
    let auth = Arc::new(AuthService::new(users, otp, Arc::clone(&tokens)));

    let state = web::Data::new(AppState { auth, tokens });
    let app_config = web::Data::new(config.clone());

    let bind_address = config.server.bind_address();
    info!(%bind_address, "binding http server");

    let mut server = HttpServer::new(move || create_app(state.clone(), app_config.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    info!("http server stopped; draining background tasks");
    store.shutdown().await;
    pool.close().await;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
