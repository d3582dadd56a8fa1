//! # Inkpost Web Server
//!
//! The main entry point for the actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod views;

use config::AppConfig;
use inkpost_core::services::NewUser;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Inkpost web server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;

    bootstrap_superuser(&state, &config).await;

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Provision the superuser named by ADMIN_EMAIL / ADMIN_PASSWORD.
/// Idempotent: an already-registered email is not an error.
async fn bootstrap_superuser(state: &AppState, config: &AppConfig) {
    let Some((email, password)) = config.admin.clone() else {
        return;
    };

    let new_user = NewUser {
        email,
        password,
        first_name: String::new(),
        last_name: String::new(),
    };

    match state.identity.create_superuser(new_user).await {
        Ok(user) => tracing::info!(user_id = %user.id, "bootstrap superuser created"),
        Err(inkpost_core::DomainError::Conflict { .. }) => {
            tracing::debug!("bootstrap superuser already present");
        }
        // Covers a malformed ADMIN_EMAIL or too-short ADMIN_PASSWORD.
        Err(e) => tracing::warn!("bootstrap superuser failed: {e}"),
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,web_server=debug,inkpost_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
