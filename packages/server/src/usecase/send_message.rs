//! UseCase: メッセージ送信処理（HTTP → WebSocket 配信ブリッジ）
//!
//! ## 責務
//! - メッセージを耐久ストアへ永続化する
//! - 永続化済みの行から配信ペイロードを組み立てる
//! - ペイロードをスレッドルームの全メンバーへ配信する
//!
//! ## 設計ノート
//! - 永続化が行を返さなかった場合（`Ok(None)`）は配信を行わず、呼び出し
//!   元へエラーを返す。永続化されていないメッセージは配信しない
//! - ブロードキャストと HTTP レスポンスの `data` は同一のペイロード
//!   オブジェクト。送信者自身もスレッドルームにいれば受信する
//!   （正規の行を受け取り、tempId で楽観的表示と突き合わせる）

use std::sync::Arc;

use crate::domain::{
    Broadcaster, ChatStore, DeliveredMessage, FileInfo, MessageContent, MessageKind, NewMessage,
    ServerEvent, ThreadId, UserId, thread_room,
};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    store: Arc<dyn ChatStore>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl SendMessageUseCase {
    pub fn new(store: Arc<dyn ChatStore>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { store, broadcaster }
    }

    /// メッセージを永続化し、スレッドルームへ配信する
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 認証済みコンテキストから取得した送信者
    /// * `temp_id` - クライアントの相関トークン（そのまま透過する）
    /// * `file_info` - ファイルメッセージのメタ情報（アップロード経由のみ）
    ///
    /// # Returns
    ///
    /// * `Ok(DeliveredMessage)` - 配信済みペイロード（HTTP レスポンスにも使う）
    /// * `Err(SendMessageError)` - 永続化失敗。何も配信されない
    pub async fn execute(
        &self,
        sender_id: UserId,
        thread_id: ThreadId,
        kind: MessageKind,
        content: MessageContent,
        temp_id: Option<String>,
        file_info: Option<FileInfo>,
    ) -> Result<DeliveredMessage, SendMessageError> {
        // 1. 耐久ストアへ永続化し、採番済みの行を読み戻す
        let stored = self
            .store
            .record_message(NewMessage {
                thread_id,
                sender_id,
                kind,
                content,
            })
            .await?
            .ok_or(SendMessageError::NotRecorded)?;

        // 2. 永続化済みの行から配信ペイロードを組み立てる
        let payload = DeliveredMessage::from_stored(&stored, temp_id, file_info);

        // 3. スレッドルームの全メンバーへ配信（送信者も含む）
        let event = ServerEvent::Message(payload.clone());
        self.broadcaster
            .emit_to_room(&thread_room(thread_id), &event.to_json(), None)
            .await;

        tracing::info!(
            "Message {} delivered to thread {} from user '{}'",
            payload.id,
            thread_id,
            sender_id
        );
        Ok(payload)
    }
}
