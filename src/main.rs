use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use std::collections::HashMap;
use std::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use terminal_admin_server::auth::handlers::{login, refresh};
use terminal_admin_server::terminal::handlers as terminal_handlers;
use terminal_admin_server::{health_check, AppError, AppState, Settings};

fn body_error(field: &str, detail: String) -> actix_web::Error {
    let mut fields = HashMap::new();
    fields.insert(field.to_string(), detail);
    AppError::Validation(fields).into()
}

#[actix_web::main]
async fn main() -> terminal_admin_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!(
        "Starting server at {}:{}",
        config.server.host, config.server.port
    );

    // Initialize application state
    let state = AppState::new(config.clone())?;
    let state = web::Data::new(state);

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    let workers = config.server.workers as usize;

    // Start HTTP server
    HttpServer::new(move || {
        let cors = if config.cors.allow_any_origin {
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(config.cors.max_age as usize)
        } else {
            Cors::default()
                .allowed_origin(&config.cors.allowed_origin)
                .allowed_methods(vec!["GET", "POST", "PUT"])
                .allowed_headers(vec!["Authorization", "Content-Type"])
                .supports_credentials()
                .max_age(config.cors.max_age as usize)
        };

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            // Body/query parse failures use the same envelope as field
            // validation failures.
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| body_error("body", err.to_string())),
            )
            .app_data(
                web::FormConfig::default()
                    .error_handler(|err, _req| body_error("body", err.to_string())),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _req| body_error("query", err.to_string())),
            )
            .app_data(
                web::PathConfig::default()
                    .error_handler(|err, _req| body_error("path", err.to_string())),
            )
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api/admin")
                    .route("/auth/login", web::post().to(login))
                    .route("/auth/refresh", web::post().to(refresh))
                    .route("/terminal", web::get().to(terminal_handlers::list))
                    .route("/terminal", web::post().to(terminal_handlers::create))
                    .route(
                        "/terminal/{terminal_id}",
                        web::get().to(terminal_handlers::find_by_id),
                    )
                    .route(
                        "/terminal/{terminal_id}",
                        web::put().to(terminal_handlers::update),
                    ),
            )
    })
    .listen(listener)?
    .workers(workers)
    .run()
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(())
}
