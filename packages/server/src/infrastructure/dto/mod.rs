//! DTO（Data Transfer Object）定義
//!
//! HTTP API のリクエスト / レスポンスボディのスキーマ。
//! WebSocket フレームのスキーマはドメイン層の event モジュールが持ちます。

pub mod http;
