//! UseCase: スレッド退出処理
//!
//! ## 責務
//! - 接続を指定されたスレッドルームから退出させる
//!
//! ## 設計ノート
//! - threadId 欠落 / 不正は ACK を伴わないイベントなので、エラーにせず
//!   no-op として扱う

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, ThreadId, thread_room};

/// スレッド退出のユースケース
pub struct LeaveThreadUseCase {
    broadcaster: Arc<dyn Broadcaster>,
}

impl LeaveThreadUseCase {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// 接続をスレッドルームから退出させる（threadId 欠落時は no-op）
    pub async fn execute(&self, connection_id: ConnectionId, thread_id: Option<i64>) {
        let Some(thread_id) = thread_id.and_then(|id| ThreadId::new(id).ok()) else {
            tracing::debug!(
                "leaveThread without a valid threadId from {}; ignoring",
                connection_id
            );
            return;
        };

        self.broadcaster
            .leave_room(&thread_room(thread_id), &connection_id)
            .await;
        tracing::info!("Connection {} left thread {}", connection_id, thread_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::broadcaster::WebSocketBroadcaster;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_leave_removes_the_thread_room_membership() {
        // テスト項目: leaveThread で接続がスレッドルームから退出する
        // given (前提条件):
        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let usecase = LeaveThreadUseCase::new(broadcaster.clone());
        let connection = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        broadcaster.register_connection(connection, tx).await;
        broadcaster.join_room("thread-100", connection).await;

        // when (操作):
        usecase.execute(connection, Some(100)).await;

        // then (期待する結果):
        assert!(broadcaster.rooms_of(&connection).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_thread_id_is_a_no_op() {
        // テスト項目: threadId 欠落時は何も起きない
        // given (前提条件):
        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let usecase = LeaveThreadUseCase::new(broadcaster.clone());
        let connection = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();
        broadcaster.register_connection(connection, tx).await;
        broadcaster.join_room("thread-100", connection).await;

        // when (操作):
        usecase.execute(connection, None).await;

        // then (期待する結果): 所属は変わらない
        assert_eq!(
            broadcaster.rooms_of(&connection).await,
            vec!["thread-100".to_string()]
        );
    }
}
