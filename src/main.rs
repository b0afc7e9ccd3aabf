mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let chat = match services::chat_proxy::ChatProxy::new(&config.chat) {
        Ok(chat) => chat,
        Err(e) => {
            tracing::error!(error = %e, "chat proxy init failed");
            std::process::exit(1);
        }
    };
    tracing::info!(upstream = %config.chat.url, "chat upstream configured");

    let state = state::AppState::new(services::directory::UserDirectory::seeded(), chat);

    let app = match routes::app(state, config.cors_allow_any) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "leptos setup failed");
            std::process::exit(1);
        }
    };

    let addr = config.socket_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, "askgrid listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
    }
}
