//! プレゼンス変更の通知
//!
//! ## 責務
//! - ユーザーのオンライン / オフライン状態の変更を耐久ストアへ記録する
//! - 記録に成功した場合のみ `user-status` イベントを全接続へ配信する
//!
//! ## 設計ノート
//! - ストアの失敗は警告ログに残して握りつぶす。配信はスキップされ、
//!   呼び出し元（接続 / 切断処理）は継続する

use std::sync::Arc;

use crate::domain::{Broadcaster, ChatStore, ServerEvent, UserId};

/// プレゼンス変更を記録・配信するコンポーネント
pub struct PresenceNotifier {
    store: Arc<dyn ChatStore>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl PresenceNotifier {
    pub fn new(store: Arc<dyn ChatStore>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { store, broadcaster }
    }

    /// プレゼンス変更を記録し、全接続へ `user-status` を配信する
    ///
    /// ストアへの記録が失敗した場合は配信もスキップする。記録できていない
    /// 状態を配信すると、ストアと接続中クライアントの見え方がズレるため。
    pub async fn user_status_changed(&self, user_id: UserId, is_online: bool) {
        if let Err(e) = self.store.set_presence(user_id, is_online).await {
            tracing::warn!(
                "Failed to record presence for user '{}' (online={}): {}",
                user_id,
                is_online,
                e
            );
            return;
        }

        let event = ServerEvent::UserStatus {
            user_id: user_id.value(),
            is_online,
        };
        self.broadcaster.emit_to_all(&event.to_json()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, MockChatStore, StoreError};
    use crate::infrastructure::broadcaster::WebSocketBroadcaster;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_user_status_is_broadcast_to_all_connections() {
        // テスト項目: プレゼンス変更が記録され、全接続へ配信される
        // given (前提条件):
        let mut store = MockChatStore::new();
        store
            .expect_set_presence()
            .times(1)
            .returning(|_, _| Ok(()));

        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let observer = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        broadcaster.register_connection(observer, tx).await;

        let notifier = PresenceNotifier::new(Arc::new(store), broadcaster);

        // when (操作):
        notifier.user_status_changed(UserId::new(7), true).await;

        // then (期待する結果):
        let frame: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(frame["event"], "user-status");
        assert_eq!(frame["data"]["userId"], 7);
        assert_eq!(frame["data"]["isOnline"], true);
    }

    #[tokio::test]
    async fn test_store_failure_skips_the_broadcast() {
        // テスト項目: ストア失敗時は user-status が配信されない
        // given (前提条件):
        let mut store = MockChatStore::new();
        store
            .expect_set_presence()
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("down".to_string())));

        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let observer = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        broadcaster.register_connection(observer, tx).await;

        let notifier = PresenceNotifier::new(Arc::new(store), broadcaster);

        // when (操作):
        notifier.user_status_changed(UserId::new(7), false).await;

        // then (期待する結果): 何も届かない
        assert!(rx.try_recv().is_err());
    }
}
