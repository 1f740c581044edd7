mod app_state;
mod database;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;

use app_state::AppState;
use database::init::init_db;
use repositories::chat_repository::PgChatRepository;
use routes::app_routes::create_router;
use services::chat_service::ChatService;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let pool = match init_db().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Error initializing the database: {}", e);
            return;
        }
    };

    let repo = Arc::new(PgChatRepository::new(pool));
    let state = AppState {
        chat_service: ChatService::new(repo),
    };

    let app = create_router(state);

    let port = env::var("HTTP_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Server running on http://{}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

// Waits for ctrl-c or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("Signal received, starting graceful shutdown");
}
