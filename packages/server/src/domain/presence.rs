//! PresenceStore trait 定義
//!
//! ユーザー ID → 現在の接続 ID のマッピングの抽象化。プロセス内の
//! HashMap 実装が既定ですが、マルチインスタンス構成では外部の共有
//! キャッシュで差し替えられるよう trait として注入します。

use async_trait::async_trait;

use super::model::{ConnectionId, UserId};

/// PresenceStore trait
///
/// ユーザーごとに最新の接続を 1 件だけ記録する（last-connected wins）。
/// 同一ユーザーの 2 本目の接続は前のエントリを上書きします。
#[async_trait]
pub trait PresenceStore: Send + Sync {
    /// ユーザーの現在の接続を記録する（既存エントリは上書き）
    async fn set(&self, user_id: UserId, connection_id: ConnectionId);

    /// ユーザーの現在の接続 ID を取得する
    async fn get(&self, user_id: UserId) -> Option<ConnectionId>;

    /// エントリが `connection_id` を指している場合のみ削除する
    ///
    /// 古い接続の切断で新しい接続のエントリを消してしまう競合を防ぐため、
    /// 無条件削除ではなく接続 ID を比較してから削除します。
    /// 削除した場合は true を返します。
    async fn remove(&self, user_id: UserId, connection_id: &ConnectionId) -> bool;
}
