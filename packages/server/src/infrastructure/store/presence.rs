//! InMemory PresenceStore 実装
//!
//! ユーザー ID → 接続 ID の HashMap をプロセス内に保持します。
//! シングルインスタンス構成の既定実装で、マルチインスタンス構成では
//! 外部の共有キャッシュ実装に差し替えます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceStore, UserId};

/// インメモリ PresenceStore 実装
pub struct InMemoryPresenceStore {
    entries: Mutex<HashMap<UserId, ConnectionId>>,
}

impl InMemoryPresenceStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPresenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresenceStore for InMemoryPresenceStore {
    async fn set(&self, user_id: UserId, connection_id: ConnectionId) {
        let mut entries = self.entries.lock().await;
        entries.insert(user_id, connection_id);
    }

    async fn get(&self, user_id: UserId) -> Option<ConnectionId> {
        let entries = self.entries.lock().await;
        entries.get(&user_id).copied()
    }

    async fn remove(&self, user_id: UserId, connection_id: &ConnectionId) -> bool {
        let mut entries = self.entries.lock().await;
        match entries.get(&user_id) {
            Some(current) if current == connection_id => {
                entries.remove(&user_id);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_overwrites_previous_connection() {
        // テスト項目: 同一ユーザーの 2 本目の接続は前のエントリを上書きする
        // （last-connected wins）
        // given (前提条件):
        let store = InMemoryPresenceStore::new();
        let user = UserId::new(42);
        let older = ConnectionId::generate();
        let newer = ConnectionId::generate();

        // when (操作):
        store.set(user, older).await;
        store.set(user, newer).await;

        // then (期待する結果):
        assert_eq!(store.get(user).await, Some(newer));
    }

    #[tokio::test]
    async fn test_remove_deletes_only_the_matching_connection() {
        // テスト項目: remove は記録中の接続と一致する場合のみ削除する
        // given (前提条件):
        let store = InMemoryPresenceStore::new();
        let user = UserId::new(42);
        let connection = ConnectionId::generate();
        store.set(user, connection).await;

        // when (操作):
        let removed = store.remove(user, &connection).await;

        // then (期待する結果):
        assert!(removed);
        assert_eq!(store.get(user).await, None);
    }

    #[tokio::test]
    async fn test_remove_ignores_stale_connection() {
        // テスト項目: 古い接続の切断で新しい接続のエントリが消えない
        // （無条件削除の競合の回帰テスト）
        // given (前提条件):
        let store = InMemoryPresenceStore::new();
        let user = UserId::new(42);
        let older = ConnectionId::generate();
        let newer = ConnectionId::generate();
        store.set(user, older).await;
        store.set(user, newer).await;

        // when (操作): 古い接続の切断処理が後から届く
        let removed = store.remove(user, &older).await;

        // then (期待する結果): エントリは新しい接続のまま残る
        assert!(!removed);
        assert_eq!(store.get(user).await, Some(newer));
    }

    #[tokio::test]
    async fn test_remove_unknown_user_is_a_no_op() {
        // テスト項目: 存在しないユーザーの remove は何もしない
        let store = InMemoryPresenceStore::new();
        let removed = store
            .remove(UserId::new(99), &ConnectionId::generate())
            .await;
        assert!(!removed);
    }
}
