//! Broadcaster の実装
//!
//! - `websocket`: WebSocket 接続レジストリを使った実装
//! - 将来的に: Redis pub/sub などの外部ファンアウト

pub mod websocket;

pub use websocket::WebSocketBroadcaster;
