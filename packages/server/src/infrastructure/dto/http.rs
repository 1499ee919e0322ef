//! HTTP API の DTO 定義
//!
//! リクエストボディはワイヤ名（`threadId`, `messageType`, `tempId`）のまま
//! 受け、バリデーションはハンドラ / UseCase 側で行います。レスポンスは
//! `{status: 0|1, message, data?}` の統一エンベロープです。

use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::MessageKind;

/// `POST /api/chat/send` のリクエストボディ
///
/// 欠落フィールドはデシリアライズエラーにせず `None` で受ける。
/// `sender_id` はボディに含まれていても無視し、認証済みコンテキストの
/// ユーザー ID のみを使う。
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(rename = "threadId", default)]
    pub thread_id: Option<i64>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "messageType", default)]
    pub message_type: Option<MessageKind>,
    #[serde(rename = "tempId", default)]
    pub temp_id: Option<String>,
}

/// 成功レスポンスのボディを組み立てる（`status: 1`）
pub fn success_body(message: &str, data: Option<Value>) -> Value {
    match data {
        Some(data) => json!({"status": 1, "message": message, "data": data}),
        None => json!({"status": 1, "message": message}),
    }
}

/// 失敗レスポンスのボディを組み立てる（`status: 0`）
pub fn error_body(message: &str) -> Value {
    json!({"status": 0, "message": message})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_message_request_accepts_missing_fields() {
        // テスト項目: 欠落フィールドはエラーではなく None として受理される
        // given (前提条件):
        let body = r#"{"content":"hello"}"#;

        // when (操作):
        let request: SendMessageRequest = serde_json::from_str(body).unwrap();

        // then (期待する結果):
        assert_eq!(request.thread_id, None);
        assert_eq!(request.content.as_deref(), Some("hello"));
        assert_eq!(request.message_type, None);
        assert_eq!(request.temp_id, None);
    }

    #[test]
    fn test_send_message_request_uses_wire_names() {
        // テスト項目: リクエストのフィールドはワイヤ名でパースされる
        let body = r#"{"threadId":100,"content":"hi","messageType":"file","tempId":"t1"}"#;
        let request: SendMessageRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.thread_id, Some(100));
        assert_eq!(request.message_type, Some(MessageKind::File));
        assert_eq!(request.temp_id.as_deref(), Some("t1"));
    }

    #[test]
    fn test_response_envelope_shape() {
        // テスト項目: レスポンスエンベロープは {status, message, data?} になる
        let ok = success_body("Message sent successfully", Some(json!({"id": 1})));
        assert_eq!(ok["status"], 1);
        assert_eq!(ok["data"]["id"], 1);

        let err = error_body("Thread ID and content are required");
        assert_eq!(err["status"], 0);
        assert!(err.get("data").is_none());
    }
}
