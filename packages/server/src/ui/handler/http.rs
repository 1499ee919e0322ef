//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{
    domain::{DeliveredMessage, FileInfo, MessageContent, MessageKind, ThreadId, UserId},
    infrastructure::{
        auth::AuthError,
        dto::http::{SendMessageRequest, error_body, success_body},
    },
    ui::state::AppState,
    usecase::SendMessageError,
};

/// Accepted upload content types: images and common document formats.
const ALLOWED_UPLOAD_TYPES: [&str; 8] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Bearer-token middleware for the chat API routes.
///
/// On success the verified [`UserId`] is inserted as a request extension;
/// handlers never read identity from the request body.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);

    let Some(token) = token else {
        return unauthorized(&AuthError::MissingToken.to_string());
    };

    match state.jwt.verify(&token) {
        Ok(user_id) => {
            request.extensions_mut().insert(user_id);
            next.run(request).await
        }
        Err(e) => unauthorized(&e.to_string()),
    }
}

fn unauthorized(message: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(error_body(message))).into_response()
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// `POST /api/chat/send` — persist a text message and deliver it to the
/// thread room. Response `data` and the broadcast carry the identical
/// payload object.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    axum::Extension(user_id): axum::Extension<UserId>,
    Json(request): Json<SendMessageRequest>,
) -> (StatusCode, Json<Value>) {
    let thread_id = request.thread_id.and_then(|id| ThreadId::new(id).ok());
    let content = request
        .content
        .and_then(|content| MessageContent::new(content).ok());
    let (Some(thread_id), Some(content)) = (thread_id, content) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body("Thread ID and content are required")),
        );
    };

    let kind = request.message_type.unwrap_or_default();
    match state
        .send_message_usecase
        .execute(user_id, thread_id, kind, content, request.temp_id, None)
        .await
    {
        Ok(payload) => message_sent_response(payload),
        Err(e) => send_failure_response(e),
    }
}

fn message_sent_response(payload: DeliveredMessage) -> (StatusCode, Json<Value>) {
    // The payload serializes; it was just built from owned data.
    let data = serde_json::to_value(payload).unwrap_or(Value::Null);
    (
        StatusCode::OK,
        Json(success_body("Message sent successfully", Some(data))),
    )
}

fn send_failure_response(error: SendMessageError) -> (StatusCode, Json<Value>) {
    match error {
        SendMessageError::NotRecorded => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(error_body("Failed to send message")),
        ),
        SendMessageError::Store(e) => {
            tracing::error!("Store failure while sending message: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_body("Internal server error")),
            )
        }
    }
}

/// `POST /api/chat/upload` — store the file, then, when a `threadId`
/// accompanies the upload, deliver a `file` message pointing at the
/// storage URL. The response carries the storage URL either way.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    axum::Extension(user_id): axum::Extension<UserId>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut thread_id: Option<i64> = None;
    let mut temp_id: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Malformed multipart upload: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(error_body("Malformed upload request")),
                );
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((file_name, content_type, bytes.to_vec())),
                    Err(e) => {
                        tracing::warn!("Failed to read upload body: {}", e);
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(error_body("Malformed upload request")),
                        );
                    }
                }
            }
            Some("threadId") => {
                thread_id = field.text().await.ok().and_then(|v| v.parse().ok());
            }
            Some("tempId") => {
                temp_id = field.text().await.ok();
            }
            _ => {}
        }
    }

    let Some((file_name, content_type, data)) = file else {
        return (StatusCode::BAD_REQUEST, Json(error_body("No file uploaded")));
    };
    if !ALLOWED_UPLOAD_TYPES.contains(&content_type.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body("Invalid file type")),
        );
    }

    let file_info = FileInfo {
        name: file_name.clone(),
        size: data.len() as u64,
        mime_type: content_type.clone(),
    };

    let url = match state
        .file_storage
        .store(&file_name, &content_type, data)
        .await
    {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("File upload failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_body("Internal server error")),
            );
        }
    };

    // A threadId turns the upload into a file message on that thread.
    if let Some(thread_id) = thread_id.and_then(|id| ThreadId::new(id).ok()) {
        let content = match MessageContent::new(url.clone()) {
            Ok(content) => content,
            Err(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(error_body("Internal server error")),
                );
            }
        };
        if let Err(e) = state
            .send_message_usecase
            .execute(
                user_id,
                thread_id,
                MessageKind::File,
                content,
                temp_id,
                Some(file_info),
            )
            .await
        {
            return send_failure_response(e);
        }
    }

    (
        StatusCode::OK,
        Json(success_body("File uploaded", Some(json!({"url": url})))),
    )
}

/// `GET /api/chat/messages/{threadId}` — persisted messages for a thread.
pub async fn messages_by_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    let Ok(thread_id) = ThreadId::new(thread_id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(error_body("Thread ID is required")),
        );
    };

    match state.store.messages_by_thread(thread_id).await {
        Ok(rows) => {
            // 読み取り系なので行の is_read をそのまま返す
            let messages: Vec<DeliveredMessage> = rows
                .iter()
                .map(|row| {
                    let mut message = DeliveredMessage::from_stored(row, None, None);
                    message.is_read = row.is_read;
                    message
                })
                .collect();
            let data = serde_json::to_value(messages).unwrap_or(Value::Null);
            (
                StatusCode::OK,
                Json(success_body("Messages fetched", Some(data))),
            )
        }
        Err(e) => {
            tracing::error!("Store failure while fetching messages: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_body("Internal server error")),
            )
        }
    }
}

/// `POST /api/chat/last-seen` — records the caller online in the store.
pub async fn update_last_seen(
    State(state): State<Arc<AppState>>,
    axum::Extension(user_id): axum::Extension<UserId>,
) -> (StatusCode, Json<Value>) {
    match state.store.set_presence(user_id, true).await {
        Ok(()) => (
            StatusCode::OK,
            Json(success_body("Last seen updated", None)),
        ),
        Err(e) => {
            tracing::error!("Store failure while updating last seen: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_body("Internal server error")),
            )
        }
    }
}
