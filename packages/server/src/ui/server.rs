//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        health_check, messages_by_thread, require_auth, send_message, update_last_seen,
        upload_file, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// アップロードの上限サイズ（10 MiB）
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Real-time messaging server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(app_state: Arc<AppState>) -> Self {
        Self { app_state }
    }

    /// Build the application router
    ///
    /// Exposed separately from [`Server::run`] so tests can serve the same
    /// router on an ephemeral port.
    pub fn router(app_state: Arc<AppState>) -> Router {
        // Chat API routes require a verified bearer token
        let chat_api = Router::new()
            .route("/api/chat/send", post(send_message))
            .route(
                "/api/chat/upload",
                post(upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
            )
            .route("/api/chat/messages/{thread_id}", get(messages_by_thread))
            .route("/api/chat/last-seen", post(update_last_seen))
            .route_layer(middleware::from_fn_with_state(
                app_state.clone(),
                require_auth,
            ));

        Router::new()
            // WebSocket エンドポイント（認証はアップグレード前にハンドラ内で行う）
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .merge(chat_api)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the real-time messaging server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = Self::router(self.app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Real-time messaging server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
