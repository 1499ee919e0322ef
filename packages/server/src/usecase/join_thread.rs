//! UseCase: スレッド参加処理
//!
//! ## 責務
//! - threadId を検証し、接続をスレッドルームへ参加させる
//!
//! ## 設計ノート
//! - 参加前に接続を全ての `thread-*` ルームから退出させるため、接続が
//!   同時に所属するスレッドルームは常に 1 つ以下になる。古いスレッドの
//!   typing / readMessages がリークしない
//! - 個人ルーム（`user-*`）はこの退出の対象外

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, ThreadId, thread_room};

use super::error::JoinThreadError;

/// スレッド参加のユースケース
pub struct JoinThreadUseCase {
    broadcaster: Arc<dyn Broadcaster>,
}

impl JoinThreadUseCase {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// 接続をスレッドルームへ参加させる
    ///
    /// # Returns
    ///
    /// * `Ok(ThreadId)` - 参加したスレッド（成功 ACK を返す）
    /// * `Err(JoinThreadError::MissingThreadId)` - threadId 欠落 / 不正
    ///   （エラー ACK を返す。接続は切断しない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        thread_id: Option<i64>,
    ) -> Result<ThreadId, JoinThreadError> {
        let thread_id = thread_id
            .and_then(|id| ThreadId::new(id).ok())
            .ok_or(JoinThreadError::MissingThreadId)?;

        // 先に全てのスレッドルームから退出してから参加する
        self.broadcaster.leave_thread_rooms(&connection_id).await;
        self.broadcaster
            .join_room(&thread_room(thread_id), connection_id)
            .await;

        tracing::info!("Connection {} joined thread {}", connection_id, thread_id);
        Ok(thread_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user_room;
    use crate::infrastructure::broadcaster::WebSocketBroadcaster;
    use tokio::sync::mpsc;

    async fn registered_connection(
        broadcaster: &Arc<WebSocketBroadcaster>,
    ) -> ConnectionId {
        let connection = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        broadcaster.register_connection(connection, tx).await;
        connection
    }

    #[tokio::test]
    async fn test_joining_a_second_thread_leaves_the_first() {
        // テスト項目: スレッド A に参加中の接続がスレッド B に参加すると
        // A からは退出する（同時所属は 1 つ以下）
        // given (前提条件):
        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let usecase = JoinThreadUseCase::new(broadcaster.clone());
        let connection = registered_connection(&broadcaster).await;

        // when (操作):
        usecase.execute(connection, Some(100)).await.unwrap();
        usecase.execute(connection, Some(200)).await.unwrap();

        // then (期待する結果):
        let rooms = broadcaster.rooms_of(&connection).await;
        assert_eq!(rooms, vec!["thread-200".to_string()]);
    }

    #[tokio::test]
    async fn test_personal_room_survives_thread_switches() {
        // テスト項目: スレッド切り替えで個人ルームの所属は失われない
        // given (前提条件):
        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let usecase = JoinThreadUseCase::new(broadcaster.clone());
        let connection = registered_connection(&broadcaster).await;
        broadcaster
            .join_room(&user_room(crate::domain::UserId::new(42)), connection)
            .await;

        // when (操作):
        usecase.execute(connection, Some(100)).await.unwrap();

        // then (期待する結果):
        let mut rooms = broadcaster.rooms_of(&connection).await;
        rooms.sort();
        assert_eq!(
            rooms,
            vec!["thread-100".to_string(), "user-42".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_thread_id_is_rejected() {
        // テスト項目: threadId 欠落 / 不正はエラーになり、所属は変わらない
        // given (前提条件):
        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let usecase = JoinThreadUseCase::new(broadcaster.clone());
        let connection = registered_connection(&broadcaster).await;
        usecase.execute(connection, Some(100)).await.unwrap();

        // when (操作) / then (期待する結果):
        assert_eq!(
            usecase.execute(connection, None).await,
            Err(JoinThreadError::MissingThreadId)
        );
        assert_eq!(
            usecase.execute(connection, Some(0)).await,
            Err(JoinThreadError::MissingThreadId)
        );
        let rooms = broadcaster.rooms_of(&connection).await;
        assert_eq!(rooms, vec!["thread-100".to_string()]);
    }
}
