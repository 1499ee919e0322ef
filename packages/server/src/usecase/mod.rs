//! UseCase 層
//!
//! ## 責務
//! - ドメインモデルを使ったアプリケーションのビジネスロジックを実装する
//! - trait（PresenceStore, Broadcaster, ChatStore）にのみ依存し、
//!   具体的なトランスポートやストアには依存しない
//!
//! ## 設計ノート
//! - 各 UseCase は 1 つの操作を表す struct で、依存は `Arc<dyn Trait>` で
//!   コンストラクタ注入する
//! - プレゼンス変更の通知は PresenceNotifier に集約し、接続 / 切断の
//!   UseCase から共有する

pub mod connect_user;
pub mod disconnect_user;
pub mod error;
pub mod join_thread;
pub mod leave_thread;
pub mod presence_notifier;
pub mod send_message;
pub mod thread_events;

pub use connect_user::ConnectUserUseCase;
pub use disconnect_user::DisconnectUserUseCase;
pub use error::{JoinThreadError, SendMessageError};
pub use join_thread::JoinThreadUseCase;
pub use leave_thread::LeaveThreadUseCase;
pub use presence_notifier::PresenceNotifier;
pub use send_message::SendMessageUseCase;
pub use thread_events::ThreadEventsUseCase;
