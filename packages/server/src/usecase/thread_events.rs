//! UseCase: スレッド内ライブシグナル（typing / markAsRead）
//!
//! ## 責務
//! - 入力中インジケーターと既読シグナルを、送信者を除くスレッドルームの
//!   メンバーへ転送する
//!
//! ## 設計ノート
//! - どちらも永続化を伴わないライブシグナル。markAsRead もストアには
//!   何も書かず、接続中のメンバーへの転送のみを行う
//! - threadId 欠落 / 不正は no-op（ACK を伴わないイベント）

use std::sync::Arc;

use crate::domain::{Broadcaster, ConnectionId, ServerEvent, ThreadId, UserId, thread_room};

/// スレッド内ライブシグナルのユースケース
pub struct ThreadEventsUseCase {
    broadcaster: Arc<dyn Broadcaster>,
}

impl ThreadEventsUseCase {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// 入力中インジケーターを送信者以外のスレッドルームメンバーへ転送する
    pub async fn notify_typing(
        &self,
        sender_id: UserId,
        sender_connection: ConnectionId,
        thread_id: Option<i64>,
        is_typing: bool,
    ) {
        let Some(thread_id) = thread_id.and_then(|id| ThreadId::new(id).ok()) else {
            return;
        };

        let event = ServerEvent::Typing {
            user_id: sender_id.value(),
            is_typing,
            thread_id: thread_id.value(),
        };
        self.broadcaster
            .emit_to_room(
                &thread_room(thread_id),
                &event.to_json(),
                Some(&sender_connection),
            )
            .await;
    }

    /// 既読シグナルを送信者以外のスレッドルームメンバーへ転送する
    pub async fn notify_read(&self, sender_connection: ConnectionId, thread_id: Option<i64>) {
        let Some(thread_id) = thread_id.and_then(|id| ThreadId::new(id).ok()) else {
            return;
        };

        let event = ServerEvent::ReadMessages {
            thread_id: thread_id.value(),
        };
        self.broadcaster
            .emit_to_room(
                &thread_room(thread_id),
                &event.to_json(),
                Some(&sender_connection),
            )
            .await;
    }
}
