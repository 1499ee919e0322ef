//! Broadcaster trait 定義
//!
//! ルーム単位のブロードキャスト機能の抽象化。UseCase 層はこの trait に
//! 依存し、WebSocket 等の具体的なトランスポートには依存しません。
//! 暗黙のシングルトンではなく、必要とするコンポーネントへ明示的に
//! 注入して使います。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::model::{ConnectionId, ThreadId, UserId};

/// 接続ごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// スレッドルーム名のプレフィックス
///
/// 接続は `thread-*` ルームに同時に 1 つまでしか所属できない。
/// `user-*` の個人ルームはこの制約の対象外。
pub const THREAD_ROOM_PREFIX: &str = "thread-";

/// スレッドルーム名を組み立てる
pub fn thread_room(thread_id: ThreadId) -> String {
    format!("{THREAD_ROOM_PREFIX}{thread_id}")
}

/// ユーザーの常設個人ルーム名を組み立てる
pub fn user_room(user_id: UserId) -> String {
    format!("user-{user_id}")
}

/// ブロードキャスト失敗
#[derive(Debug, Error, PartialEq)]
pub enum BroadcastError {
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// Broadcaster trait
///
/// 接続レジストリとルームメンバーシップを管理し、ルーム宛 / 全体宛の
/// 配信を行うインターフェース。プロセス内実装では配信は失敗せず、
/// 個別の送信失敗はログに残して読み飛ばします。
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// 接続を登録する
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を破棄し、所属する全ルームから退出させる
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 接続をルームに参加させる
    async fn join_room(&self, room: &str, connection_id: ConnectionId);

    /// 接続を指定ルームからのみ退出させる
    async fn leave_room(&self, room: &str, connection_id: &ConnectionId);

    /// 接続を全ての `thread-*` ルームから退出させる（個人ルームは残す）
    async fn leave_thread_rooms(&self, connection_id: &ConnectionId);

    /// 接続が所属しているルーム名の一覧を取得する
    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<String>;

    /// ルームの全メンバー（`exclude` を除く）へ配信する
    async fn emit_to_room(&self, room: &str, content: &str, exclude: Option<&ConnectionId>);

    /// 接続中の全クライアントへ配信する
    async fn emit_to_all(&self, content: &str);

    /// 特定の接続へ送信する
    async fn emit_to_connection(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), BroadcastError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_builders() {
        // テスト項目: ルーム名がワイヤ規約どおりに組み立てられる
        assert_eq!(thread_room(ThreadId::new(100).unwrap()), "thread-100");
        assert_eq!(user_room(UserId::new(42)), "user-42");
        assert!(thread_room(ThreadId::new(1).unwrap()).starts_with(THREAD_ROOM_PREFIX));
    }
}
