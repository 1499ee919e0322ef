//! ドメイン層
//!
//! チャット・プレゼンスのドメインモデルと、UseCase 層が依存する
//! インターフェース（trait）を定義します。具体的な実装は
//! Infrastructure 層が提供します（依存性の逆転）。

mod broadcaster;
mod event;
mod model;
mod presence;
mod storage;
mod store;

pub use broadcaster::{
    BroadcastError, Broadcaster, PusherChannel, THREAD_ROOM_PREFIX, thread_room, user_room,
};
pub use event::{AckStatus, ClientEvent, ServerEvent};
pub use model::{
    ConnectionId, DeliveredMessage, DomainError, FileInfo, MessageContent, MessageKind, NewMessage,
    StoredMessage, ThreadId, UserId,
};
pub use presence::PresenceStore;
pub use storage::{FileStorage, FileStorageError};
pub use store::{ChatStore, StoreError};

#[cfg(test)]
pub use store::MockChatStore;
