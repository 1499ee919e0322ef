//! UseCase: ユーザー接続処理
//!
//! ## 責務
//! - 認証済みユーザーの新しい接続を登録する
//! - 接続を常設の個人ルーム（`user-{id}`）へ参加させる
//! - プレゼンスストアへ接続を記録し、オンライン通知を配信する
//!
//! ## 設計ノート
//! - 同一ユーザーの 2 本目の接続はプレゼンスストアの上書きで
//!   last-connected wins になる（接続自体は拒否しない）

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, PresenceStore, PusherChannel, UserId, user_room};

use super::presence_notifier::PresenceNotifier;

/// ユーザー接続のユースケース
pub struct ConnectUserUseCase {
    presence: Arc<dyn PresenceStore>,
    broadcaster: Arc<dyn Broadcaster>,
    notifier: Arc<PresenceNotifier>,
}

impl ConnectUserUseCase {
    pub fn new(
        presence: Arc<dyn PresenceStore>,
        broadcaster: Arc<dyn Broadcaster>,
        notifier: Arc<PresenceNotifier>,
    ) -> Self {
        Self {
            presence,
            broadcaster,
            notifier,
        }
    }

    /// 接続を登録し、オンライン通知を配信する
    ///
    /// # Arguments
    ///
    /// * `user_id` - 認証済みユーザーの ID
    /// * `connection_id` - トランスポート層が採番した接続 ID
    /// * `sender` - この接続への送信チャンネル
    pub async fn execute(
        &self,
        user_id: UserId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) {
        // 1. 接続を Broadcaster のレジストリへ登録
        self.broadcaster
            .register_connection(connection_id, sender)
            .await;

        // 2. 常設の個人ルームへ参加（ユーザー宛配信の宛先になる）
        self.broadcaster
            .join_room(&user_room(user_id), connection_id)
            .await;

        // 3. プレゼンスストアへ記録（既存エントリは上書き）
        self.presence.set(user_id, connection_id).await;

        // 4. オンライン通知を全接続へ配信
        self.notifier.user_status_changed(user_id, true).await;

        tracing::info!("User '{}' connected ({})", user_id, connection_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockChatStore;
    use crate::infrastructure::broadcaster::WebSocketBroadcaster;
    use crate::infrastructure::store::InMemoryPresenceStore;
    use tokio::sync::mpsc;

    fn build_usecase() -> (
        ConnectUserUseCase,
        Arc<InMemoryPresenceStore>,
        Arc<WebSocketBroadcaster>,
    ) {
        let presence = Arc::new(InMemoryPresenceStore::new());
        let broadcaster = Arc::new(WebSocketBroadcaster::new());
        let mut store = MockChatStore::new();
        store.expect_set_presence().returning(|_, _| Ok(()));
        let notifier = Arc::new(PresenceNotifier::new(
            Arc::new(store),
            broadcaster.clone(),
        ));
        let usecase =
            ConnectUserUseCase::new(presence.clone(), broadcaster.clone(), notifier);
        (usecase, presence, broadcaster)
    }

    #[tokio::test]
    async fn test_connection_joins_the_personal_room() {
        // テスト項目: 接続が登録され、個人ルームへ参加し、プレゼンスが記録される
        // given (前提条件):
        let (usecase, presence, broadcaster) = build_usecase();
        let user = UserId::new(42);
        let connection = ConnectionId::generate();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        usecase.execute(user, connection, tx).await;

        // then (期待する結果):
        let rooms = broadcaster.rooms_of(&connection).await;
        assert_eq!(rooms, vec!["user-42".to_string()]);
        assert_eq!(presence.get(user).await, Some(connection));
    }

    #[tokio::test]
    async fn test_online_notification_reaches_existing_connections() {
        // テスト項目: 接続時に既存の接続へ user-status(online) が届く
        // given (前提条件): 別ユーザーの接続が既に存在する
        let (usecase, _presence, broadcaster) = build_usecase();
        let peer = ConnectionId::generate();
        let (peer_tx, mut peer_rx) = mpsc::unbounded_channel();
        broadcaster.register_connection(peer, peer_tx).await;

        // when (操作):
        let (tx, _rx) = mpsc::unbounded_channel();
        usecase
            .execute(UserId::new(7), ConnectionId::generate(), tx)
            .await;

        // then (期待する結果):
        let frame: serde_json::Value =
            serde_json::from_str(&peer_rx.recv().await.unwrap()).unwrap();
        assert_eq!(frame["event"], "user-status");
        assert_eq!(frame["data"]["userId"], 7);
        assert_eq!(frame["data"]["isOnline"], true);
    }
}
