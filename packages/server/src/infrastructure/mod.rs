//! Infrastructure 層
//!
//! ドメイン層が定義する trait の具体的な実装と、プロトコル境界の
//! DTO を提供します。
//!
//! - `auth`: JWT の署名・検証
//! - `broadcaster`: WebSocket 接続レジストリとルーム配信
//! - `store`: インメモリの耐久ストア / プレゼンスストア実装
//! - `storage`: インメモリのオブジェクトストレージ実装
//! - `dto`: HTTP API のリクエスト / レスポンス DTO

pub mod auth;
pub mod broadcaster;
pub mod dto;
pub mod storage;
pub mod store;
