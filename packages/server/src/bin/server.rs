//! Real-time messaging server for the michizure platform.
//!
//! Authenticated users connect over WebSocket for presence, thread rooms
//! and live signals; messages are sent over HTTP and delivered to thread
//! rooms over the socket.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=dev-secret cargo run --bin michizure-server
//! JWT_SECRET=dev-secret cargo run --bin michizure-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use michizure_server::{
    infrastructure::{
        auth::JwtKeys,
        broadcaster::WebSocketBroadcaster,
        storage::InMemoryFileStorage,
        store::{InMemoryChatStore, InMemoryPresenceStore},
    },
    ui::{Server, state::AppState},
    usecase::{
        ConnectUserUseCase, DisconnectUserUseCase, JoinThreadUseCase, LeaveThreadUseCase,
        PresenceNotifier, SendMessageUseCase, ThreadEventsUseCase,
    },
};
use michizure_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Real-time messaging server with presence and thread rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // The token secret is shared with the issuing service; refuse to start
    // without it rather than fall back to a guessable default.
    let jwt_secret = match std::env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            tracing::error!("JWT_SECRET environment variable is required");
            std::process::exit(1);
        }
    };

    // Initialize dependencies in order:
    // 1. Stores and broadcaster
    // 2. PresenceNotifier
    // 3. UseCases
    // 4. AppState
    // 5. Server

    // 1. Create stores and the broadcaster (in-memory implementations)
    let store = Arc::new(InMemoryChatStore::new());
    let presence = Arc::new(InMemoryPresenceStore::new());
    let file_storage = Arc::new(InMemoryFileStorage::new());
    let broadcaster = Arc::new(WebSocketBroadcaster::new());

    // 2. Create PresenceNotifier (shared by connect / disconnect)
    let notifier = Arc::new(PresenceNotifier::new(store.clone(), broadcaster.clone()));

    // 3. Create UseCases
    let connect_user_usecase = Arc::new(ConnectUserUseCase::new(
        presence.clone(),
        broadcaster.clone(),
        notifier.clone(),
    ));
    let disconnect_user_usecase = Arc::new(DisconnectUserUseCase::new(
        presence.clone(),
        broadcaster.clone(),
        notifier.clone(),
    ));
    let join_thread_usecase = Arc::new(JoinThreadUseCase::new(broadcaster.clone()));
    let leave_thread_usecase = Arc::new(LeaveThreadUseCase::new(broadcaster.clone()));
    let thread_events_usecase = Arc::new(ThreadEventsUseCase::new(broadcaster.clone()));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        store.clone(),
        broadcaster.clone(),
    ));

    // 4. Create AppState
    let app_state = Arc::new(AppState {
        connect_user_usecase,
        disconnect_user_usecase,
        join_thread_usecase,
        leave_thread_usecase,
        thread_events_usecase,
        send_message_usecase,
        store,
        file_storage,
        jwt: JwtKeys::new(jwt_secret.as_bytes()),
    });

    // 5. Create and run the server
    let server = Server::new(app_state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
