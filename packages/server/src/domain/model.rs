//! チャットドメインのモデル定義
//!
//! 値オブジェクト（UserId, ThreadId, MessageContent など）と
//! エンティティ（StoredMessage, DeliveredMessage）を定義します。
//! 不正な値はコンストラクタで弾き、以降の層では検証済みとして扱います。

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use michizure_shared::time::timestamp_to_rfc3339;

/// ドメインモデルのバリデーションエラー
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Thread ID is required")]
    InvalidThreadId,
    #[error("Content is required")]
    EmptyMessageContent,
}

/// 認証済みユーザーの識別子（JWT の `id` クレーム由来）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// スレッド（2 ユーザー間の会話）の識別子
///
/// 正の整数のみ有効。0 以下はストアド側で採番されない値なので弾く。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadId(i64);

impl ThreadId {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidThreadId);
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ThreadId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 接続の識別子（トランスポート層で採番される不透明な値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// メッセージ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    File,
}

impl Default for MessageKind {
    /// 種別未指定のメッセージはテキストとして扱う
    fn default() -> Self {
        Self::Text
    }
}

/// メッセージ本文（テキスト、またはアップロード済みファイルの URL）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::EmptyMessageContent);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 永続化前のメッセージ
///
/// 送信者はクライアント入力ではなく、認証済みリクエストコンテキストから
/// 取得した値のみを許可します。
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub thread_id: ThreadId,
    pub sender_id: UserId,
    pub kind: MessageKind,
    pub content: MessageContent,
}

/// 永続化済みメッセージ（ストアが採番した正規の行）
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub id: i64,
    pub thread_id: ThreadId,
    pub sender_id: UserId,
    pub kind: MessageKind,
    pub content: String,
    /// 作成時刻（Unix ミリ秒、UTC）
    pub created_at: i64,
    pub is_read: bool,
}

/// ファイルメッセージに付加するメタ情報
///
/// 永続化された行ではなく、アップロードリクエストそのものに由来する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// 配信ペイロード
///
/// 永続化済みの行から組み立てる配信用メッセージ。WebSocket で
/// ブロードキャストされるオブジェクトと HTTP レスポンスの `data` は
/// 常にこの同一オブジェクトです。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveredMessage {
    pub id: i64,
    #[serde(rename = "tempId", skip_serializing_if = "Option::is_none", default)]
    pub temp_id: Option<String>,
    pub content: String,
    pub message_type: MessageKind,
    pub sender_id: i64,
    /// RFC 3339 (UTC) 形式の作成時刻
    pub created_at: String,
    pub is_read: bool,
    #[serde(rename = "threadId")]
    pub thread_id: i64,
    #[serde(rename = "fileInfo", skip_serializing_if = "Option::is_none", default)]
    pub file_info: Option<FileInfo>,
}

impl DeliveredMessage {
    /// 永続化済みの行からペイロードを組み立てる
    ///
    /// `temp_id` はクライアントが付けた相関トークンをそのまま透過し、
    /// `is_read` は常に false で初期化する（既読化はライブシグナルのみ）。
    pub fn from_stored(
        stored: &StoredMessage,
        temp_id: Option<String>,
        file_info: Option<FileInfo>,
    ) -> Self {
        Self {
            id: stored.id,
            temp_id,
            content: stored.content.clone(),
            message_type: stored.kind,
            sender_id: stored.sender_id.value(),
            created_at: timestamp_to_rfc3339(stored.created_at),
            is_read: false,
            thread_id: stored.thread_id.value(),
            file_info,
        }
    }
}
