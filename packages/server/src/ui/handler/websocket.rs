//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ClientEvent, ConnectionId, PusherChannel, ServerEvent, UserId},
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

/// Picks the bearer token for the connection attempt.
///
/// The `Authorization: Bearer` header wins over the `token` query
/// parameter when both are present.
fn extract_token(headers: &HeaderMap, query: &ConnectQuery) -> Option<String> {
    let header_token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    header_token.or_else(|| query.token.clone())
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    // Authenticate before the upgrade; no event is processed for an
    // unauthenticated socket.
    let Some(token) = extract_token(&headers, &query) else {
        tracing::warn!("WebSocket connection attempt without a token");
        return Err(StatusCode::UNAUTHORIZED);
    };

    let user_id = match state.jwt.verify(&token) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::warn!("WebSocket connection rejected: {}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: frames queued for this
/// connection (broadcasts, acks) are sent to the client's WebSocket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, user_id: UserId) {
    let connection_id = ConnectionId::generate();

    // Create a channel for this connection to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectUserUseCase to handle connection
    // (registration, personal room, presence, online broadcast)
    state
        .connect_user_usecase
        .execute(user_id, connection_id, tx.clone())
        .await;

    let (sender, mut receiver) = socket.split();

    // Spawn a task to push queued frames to this client
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let ack_tx = tx;

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Unrecognized frame from {}: {}", connection_id, e);
                            continue;
                        }
                    };
                    dispatch_event(&state_clone, user_id, connection_id, &ack_tx, event).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Use DisconnectUserUseCase to handle disconnection
    // (presence compare-and-delete, registry cleanup, offline broadcast)
    state
        .disconnect_user_usecase
        .execute(user_id, connection_id)
        .await;
}

/// Routes one parsed client event to its usecase.
async fn dispatch_event(
    state: &Arc<AppState>,
    user_id: UserId,
    connection_id: ConnectionId,
    ack_tx: &PusherChannel,
    event: ClientEvent,
) {
    match event {
        ClientEvent::JoinThread { thread_id } => {
            let ack = match state
                .join_thread_usecase
                .execute(connection_id, thread_id)
                .await
            {
                Ok(_) => ServerEvent::ack_success(),
                Err(e) => ServerEvent::ack_error(e.to_string()),
            };
            // The connection may already be gone; nothing to do then.
            let _ = ack_tx.send(ack.to_json());
        }
        ClientEvent::LeaveThread { thread_id } => {
            state
                .leave_thread_usecase
                .execute(connection_id, thread_id)
                .await;
        }
        ClientEvent::Typing {
            thread_id,
            is_typing,
        } => {
            state
                .thread_events_usecase
                .notify_typing(user_id, connection_id, thread_id, is_typing)
                .await;
        }
        ClientEvent::MarkAsRead { thread_id } => {
            state
                .thread_events_usecase
                .notify_read(connection_id, thread_id)
                .await;
        }
    }
}
