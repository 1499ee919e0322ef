//! 耐久ストア / プレゼンスストアの実装
//!
//! - `chat`: インメモリの ChatStore 実装
//! - `presence`: インメモリの PresenceStore 実装
//! - 将来的に: ストアドプロシージャを呼ぶ DBMS 実装、共有キャッシュ実装

pub mod chat;
pub mod presence;

pub use chat::InMemoryChatStore;
pub use presence::InMemoryPresenceStore;
