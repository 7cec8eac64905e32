use dotenvy::dotenv;
use pustaka::logging::init_tracing;
use pustaka::router::init_router;
use pustaka::state::init_app_state;
use pustaka_config::ServerConfig;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();
    let state = init_app_state().await;

    if server_config.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&state.db).await?;
    }

    let app = init_router(state);

    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Server listening");
    println!("🚀 Server running on http://{}", address);
    println!("📚 Swagger UI available at http://{}/swagger-ui", address);
    println!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
}
