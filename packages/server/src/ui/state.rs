//! Server state shared across handlers.

use std::sync::Arc;

use crate::domain::{ChatStore, FileStorage};
use crate::infrastructure::auth::JwtKeys;
use crate::usecase::{
    ConnectUserUseCase, DisconnectUserUseCase, JoinThreadUseCase, LeaveThreadUseCase,
    SendMessageUseCase, ThreadEventsUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectUserUseCase（ユーザー接続のユースケース）
    pub connect_user_usecase: Arc<ConnectUserUseCase>,
    /// DisconnectUserUseCase（ユーザー切断のユースケース）
    pub disconnect_user_usecase: Arc<DisconnectUserUseCase>,
    /// JoinThreadUseCase（スレッド参加のユースケース）
    pub join_thread_usecase: Arc<JoinThreadUseCase>,
    /// LeaveThreadUseCase（スレッド退出のユースケース）
    pub leave_thread_usecase: Arc<LeaveThreadUseCase>,
    /// ThreadEventsUseCase（typing / markAsRead 転送のユースケース）
    pub thread_events_usecase: Arc<ThreadEventsUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// ChatStore（耐久ストアの抽象化、読み取り系ハンドラが直接使う）
    pub store: Arc<dyn ChatStore>,
    /// FileStorage（オブジェクトストレージの抽象化）
    pub file_storage: Arc<dyn FileStorage>,
    /// JWT の署名 / 検証キー
    pub jwt: JwtKeys,
}
