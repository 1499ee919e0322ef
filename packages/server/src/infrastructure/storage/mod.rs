//! オブジェクトストレージの実装
//!
//! - `inmemory`: 開発・テスト用のインメモリ実装（本番は S3 だが
//!   このリポジトリのスコープ外）

pub mod inmemory;

pub use inmemory::InMemoryFileStorage;
