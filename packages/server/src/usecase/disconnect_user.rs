//! UseCase: ユーザー切断処理
//!
//! ## 責務
//! - プレゼンスストアから接続のエントリを削除する（接続 ID を比較）
//! - 接続を Broadcaster のレジストリから破棄する
//! - エントリを実際に削除できた場合のみオフライン通知を配信する
//!
//! ## 設計ノート
//! - 再接続後に古い接続の切断が届くと、プレゼンスストアには新しい接続の
//!   エントリが残っている。このとき削除は行われず、オフライン通知も
//!   配信しない（ユーザーはまだオンライン）

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, PresenceStore, UserId};

use super::presence_notifier::PresenceNotifier;

/// ユーザー切断のユースケース
pub struct DisconnectUserUseCase {
    presence: Arc<dyn PresenceStore>,
    broadcaster: Arc<dyn Broadcaster>,
    notifier: Arc<PresenceNotifier>,
}

impl DisconnectUserUseCase {
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

    /// 接続を破棄し、必要ならオフライン通知を配信する
    pub async fn execute(&self, user_id: UserId, connection_id: ConnectionId) {
        // 1. プレゼンスストアのエントリがこの接続を指している場合のみ削除
        let removed = self.presence.remove(user_id, &connection_id).await;

        // 2. 接続をレジストリから破棄（全ルームから退出）
        self.broadcaster.unregister_connection(&connection_id).await;

        // 3. エントリを削除できた場合のみオフライン通知
        if removed {
            self.notifier.user_status_changed(user_id, false).await;
            tracing::info!("User '{}' disconnected ({})", user_id, connection_id);
        } else {
            tracing::debug!(
                "Stale connection {} for user '{}' closed; user still online",
                connection_id,
                user_id
            );
        }
    }
}
