//! WebSocket を使った Broadcaster 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` の管理
//! - ルームメンバーシップ（ルーム → 接続、接続 → ルーム）の管理
//! - ルーム宛 / 全体宛のメッセージ配信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、配信に使用します。
//!
//! レジストリ全体を 1 つの `Mutex` で守ることで、ルームと接続の
//! 2 つのマップが常に一致した状態で観測されます。配信はロックを
//! 保持したまま行うため、同一ルーム内の配信順序は発行順のままです。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    BroadcastError, Broadcaster, ConnectionId, PusherChannel, THREAD_ROOM_PREFIX,
};

#[derive(Default)]
struct Registry {
    /// 接続 ID → 送信チャンネル
    senders: HashMap<ConnectionId, PusherChannel>,
    /// ルーム名 → 所属する接続の集合
    rooms: HashMap<String, HashSet<ConnectionId>>,
    /// 接続 ID → 所属ルーム名の集合（切断時の掃除用の逆引き）
    memberships: HashMap<ConnectionId, HashSet<String>>,
}

impl Registry {
    fn join(&mut self, room: &str, connection_id: ConnectionId) {
        self.rooms
            .entry(room.to_string())
            .or_default()
            .insert(connection_id);
        self.memberships
            .entry(connection_id)
            .or_default()
            .insert(room.to_string());
    }

    fn leave(&mut self, room: &str, connection_id: &ConnectionId) {
        if let Some(members) = self.rooms.get_mut(room) {
            members.remove(connection_id);
            if members.is_empty() {
                self.rooms.remove(room);
            }
        }
        if let Some(rooms) = self.memberships.get_mut(connection_id) {
            rooms.remove(room);
        }
    }

    fn send(&self, connection_id: &ConnectionId, content: &str) {
        if let Some(sender) = self.senders.get(connection_id) {
            // 切断直後の接続への送信失敗は許容する
            if sender.send(content.to_string()).is_err() {
                tracing::warn!("Failed to push message to connection '{}'", connection_id);
            }
        }
    }
}

/// WebSocket を使った Broadcaster 実装
pub struct WebSocketBroadcaster {
    registry: Mutex<Registry>,
}

impl WebSocketBroadcaster {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
        }
    }
}

impl Default for WebSocketBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for WebSocketBroadcaster {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut registry = self.registry.lock().await;
        registry.senders.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to Broadcaster", connection_id);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.senders.remove(connection_id);
        if let Some(rooms) = registry.memberships.remove(connection_id) {
            for room in rooms {
                if let Some(members) = registry.rooms.get_mut(&room) {
                    members.remove(connection_id);
                    if members.is_empty() {
                        registry.rooms.remove(&room);
                    }
                }
            }
        }
        tracing::debug!("Connection '{}' unregistered from Broadcaster", connection_id);
    }

    async fn join_room(&self, room: &str, connection_id: ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.join(room, connection_id);
        tracing::debug!("Connection '{}' joined room '{}'", connection_id, room);
    }

    async fn leave_room(&self, room: &str, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.leave(room, connection_id);
        tracing::debug!("Connection '{}' left room '{}'", connection_id, room);
    }

    async fn leave_thread_rooms(&self, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        let thread_rooms: Vec<String> = registry
            .memberships
            .get(connection_id)
            .map(|rooms| {
                rooms
                    .iter()
                    .filter(|room| room.starts_with(THREAD_ROOM_PREFIX))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        for room in thread_rooms {
            registry.leave(&room, connection_id);
            tracing::debug!("Connection '{}' left room '{}'", connection_id, room);
        }
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<String> {
        let registry = self.registry.lock().await;
        registry
            .memberships
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn emit_to_room(&self, room: &str, content: &str, exclude: Option<&ConnectionId>) {
        let registry = self.registry.lock().await;
        let Some(members) = registry.rooms.get(room) else {
            return;
        };
        for member in members {
            if Some(member) == exclude {
                continue;
            }
            registry.send(member, content);
        }
    }

    async fn emit_to_all(&self, content: &str) {
        let registry = self.registry.lock().await;
        for connection_id in registry.senders.keys() {
            registry.send(connection_id, content);
        }
    }

    async fn emit_to_connection(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), BroadcastError> {
        let registry = self.registry.lock().await;
        let Some(sender) = registry.senders.get(connection_id) else {
            return Err(BroadcastError::ConnectionNotFound(
                connection_id.to_string(),
            ));
        };
        sender
            .send(content.to_string())
            .map_err(|e| BroadcastError::PushFailed(e.to_string()))
    }
}
