use mailauth_api::{create_api_routes, middleware, AppState};
use mailauth_domain::config::ServerConfig;
use std::net::SocketAddr;
use tracing::info;

pub async fn start_web_server(state: AppState, config: &ServerConfig) -> anyhow::Result<()> {
    let web_addr: SocketAddr = format!("{}:{}", config.bind_address, config.web_port).parse()?;

    let app = middleware::apply(create_api_routes(state), &config.cors_allowed_origins);

    let listener = tokio::net::TcpListener::bind(&web_addr).await?;
    info!(address = %web_addr, "Web server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
