//! リアルタイムメッセージングサーバーの UI 層（HTTP / WebSocket）

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
