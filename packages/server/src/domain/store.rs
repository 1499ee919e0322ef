//! ChatStore trait 定義
//!
//! 耐久ストア（本番ではストアドプロシージャを持つ DBMS）への狭い
//! インターフェース。コアはメッセージの永続化・プレゼンスフラグの
//! 記録・スレッドのメッセージ参照のみを行い、マッチングや既読制約
//! などのロジックは一切関知しません。

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

use super::model::{NewMessage, StoredMessage, ThreadId, UserId};

/// 耐久ストアのエラー
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// ChatStore trait
///
/// `record_message` は採番済みの正規の行を返します。`Ok(None)` は
/// 「永続化が行を返さなかった」ことを意味し、呼び出し側は配信を
/// 行ってはいけません。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// メッセージを永続化し、採番された行を読み戻す
    async fn record_message(
        &self,
        message: NewMessage,
    ) -> Result<Option<StoredMessage>, StoreError>;

    /// ユーザーのオンライン / オフライン状態を記録する
    async fn set_presence(&self, user_id: UserId, is_online: bool) -> Result<(), StoreError>;

    /// スレッドの永続化済みメッセージを作成順で取得する
    async fn messages_by_thread(
        &self,
        thread_id: ThreadId,
    ) -> Result<Vec<StoredMessage>, StoreError>;
}
