use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use cyclo_veda::middleware::cors::cors_middleware;
use cyclo_veda::middleware::request_trace::RequestTrace;
use cyclo_veda::middleware::structured_logger::StructuredLogger;
use cyclo_veda::repos::users::InMemoryUsers;
use cyclo_veda::routes;
use cyclo_veda::state::app_state::AppState;
use cyclo_veda::state::security_config::SecurityConfig;
use cyclo_veda::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    println!("🚀 Starting Cyclo Veda Backend on http://{}:{}", host, port);

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    // In-memory credential store seeded with development accounts.
    // Swapped for a real repository once persistence lands.
    let users = match InMemoryUsers::seeded() {
        Ok(users) => users,
        Err(e) => {
            eprintln!("❌ Failed to seed user store: {e}");
            std::process::exit(1);
        }
    };

    let app_state = AppState::new(Arc::new(users), security_config);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
