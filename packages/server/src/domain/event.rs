//! WebSocket イベント定義
//!
//! 双方向チャネルを流れる JSON フレームのスキーマ。フレームは
//! `{"event": <名前>, "data": {...}}` のエンベロープで、イベント名と
//! フィールド名はクライアントと共有する正規のワイヤ名です。

use serde::{Deserialize, Serialize};

use super::model::DeliveredMessage;

/// クライアント → サーバーのイベント
///
/// `threadId` の欠落はデシリアライズエラーにせず `None` で受け、
/// 各 UseCase 側の no-op / エラー ACK ガードに委ねる。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "joinThread")]
    JoinThread {
        #[serde(rename = "threadId", default)]
        thread_id: Option<i64>,
    },
    #[serde(rename = "leaveThread")]
    LeaveThread {
        #[serde(rename = "threadId", default)]
        thread_id: Option<i64>,
    },
    #[serde(rename = "typing")]
    Typing {
        #[serde(rename = "threadId", default)]
        thread_id: Option<i64>,
        #[serde(rename = "isTyping", default)]
        is_typing: bool,
    },
    #[serde(rename = "markAsRead")]
    MarkAsRead {
        #[serde(rename = "threadId", default)]
        thread_id: Option<i64>,
    },
}

/// joinThread の ACK ステータス
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Success,
    Error,
}

/// サーバー → クライアントのイベント
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// joinThread のリクエスト / ACK パターンの応答
    #[serde(rename = "joinThread:ack")]
    JoinThreadAck {
        status: AckStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    /// 新着メッセージの配信（Message Delivery Bridge 経由）
    #[serde(rename = "message")]
    Message(DeliveredMessage),
    /// 入力中インジケーター（送信者以外のスレッドルームメンバー宛）
    #[serde(rename = "typing")]
    Typing {
        #[serde(rename = "userId")]
        user_id: i64,
        #[serde(rename = "isTyping")]
        is_typing: bool,
        #[serde(rename = "threadId")]
        thread_id: i64,
    },
    /// スレッドの全メッセージ既読シグナル（永続化はしない）
    #[serde(rename = "readMessages")]
    ReadMessages {
        #[serde(rename = "threadId")]
        thread_id: i64,
    },
    /// プレゼンス変更の全体通知
    #[serde(rename = "user-status")]
    UserStatus {
        #[serde(rename = "userId")]
        user_id: i64,
        #[serde(rename = "isOnline")]
        is_online: bool,
    },
}

impl ServerEvent {
    /// エンベロープごと JSON 文字列にシリアライズする
    ///
    /// スキーマは固定なのでシリアライズは失敗しない。
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    pub fn ack_success() -> Self {
        Self::JoinThreadAck {
            status: AckStatus::Success,
            error: None,
        }
    }

    pub fn ack_error(message: impl Into<String>) -> Self {
        Self::JoinThreadAck {
            status: AckStatus::Error,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_event_join_thread_is_parsed() {
        // テスト項目: joinThread イベントがワイヤ名のままパースされる
        // given (前提条件):
        let frame = r#"{"event":"joinThread","data":{"threadId":100}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(frame).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::JoinThread {
                thread_id: Some(100)
            }
        );
    }

    #[test]
    fn test_client_event_missing_thread_id_becomes_none() {
        // テスト項目: threadId 欠落はエラーではなく None として受理される
        let frame = r#"{"event":"joinThread","data":{}}"#;
        let event: ClientEvent = serde_json::from_str(frame).unwrap();
        assert_eq!(event, ClientEvent::JoinThread { thread_id: None });
    }

    #[test]
    fn test_client_event_typing_defaults_is_typing_to_false() {
        // テスト項目: isTyping 欠落時は false として扱う
        let frame = r#"{"event":"typing","data":{"threadId":3}}"#;
        let event: ClientEvent = serde_json::from_str(frame).unwrap();
        assert_eq!(
            event,
            ClientEvent::Typing {
                thread_id: Some(3),
                is_typing: false
            }
        );
    }

    #[test]
    fn test_server_event_user_status_wire_format() {
        // テスト項目: user-status イベントがワイヤ名でシリアライズされる
        // given (前提条件):
        let event = ServerEvent::UserStatus {
            user_id: 7,
            is_online: true,
        };

        // when (操作):
        let value: serde_json::Value = serde_json::from_str(&event.to_json()).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"event": "user-status", "data": {"userId": 7, "isOnline": true}})
        );
    }

    #[test]
    fn test_server_event_ack_error_carries_message() {
        // テスト項目: エラー ACK は error メッセージを含み、成功 ACK は含まない
        let error_ack: serde_json::Value =
            serde_json::from_str(&ServerEvent::ack_error("Thread ID is required").to_json())
                .unwrap();
        assert_eq!(error_ack["data"]["status"], "error");
        assert_eq!(error_ack["data"]["error"], "Thread ID is required");

        let success_ack: serde_json::Value =
            serde_json::from_str(&ServerEvent::ack_success().to_json()).unwrap();
        assert_eq!(success_ack["data"]["status"], "success");
        assert!(success_ack["data"].get("error").is_none());
    }
}
