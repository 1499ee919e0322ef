//! InMemory ChatStore 実装
//!
//! ドメイン層が定義する ChatStore trait の具体的な実装。Vec と HashMap を
//! インメモリ DB として使用します。
//!
//! 本番の耐久ストア（ストアドプロシージャを持つ DBMS）はこのリポジトリの
//! スコープ外で、この実装は開発・テスト用の置き換えです。採番・タイム
//! スタンプ付与・書いた行の読み戻しという契約だけを忠実に再現します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use michizure_shared::time::get_utc_timestamp;

use crate::domain::{ChatStore, NewMessage, StoreError, StoredMessage, ThreadId, UserId};

#[derive(Default)]
struct StoreState {
    next_id: i64,
    messages: Vec<StoredMessage>,
    presence: HashMap<i64, bool>,
}

/// インメモリ ChatStore 実装
pub struct InMemoryChatStore {
    state: Mutex<StoreState>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }

    /// 記録済みのオンライン状態を取得する（テスト用の観測点）
    pub async fn presence_of(&self, user_id: UserId) -> Option<bool> {
        let state = self.state.lock().await;
        state.presence.get(&user_id.value()).copied()
    }
}

impl Default for InMemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn record_message(
        &self,
        message: NewMessage,
    ) -> Result<Option<StoredMessage>, StoreError> {
        let mut state = self.state.lock().await;
        state.next_id += 1;
        let stored = StoredMessage {
            id: state.next_id,
            thread_id: message.thread_id,
            sender_id: message.sender_id,
            kind: message.kind,
            content: message.content.into_string(),
            created_at: get_utc_timestamp(),
            is_read: false,
        };
        state.messages.push(stored.clone());
        Ok(Some(stored))
    }

    async fn set_presence(&self, user_id: UserId, is_online: bool) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.presence.insert(user_id.value(), is_online);
        Ok(())
    }

    async fn messages_by_thread(
        &self,
        thread_id: ThreadId,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.thread_id == thread_id)
            .cloned()
            .collect())
    }
}
