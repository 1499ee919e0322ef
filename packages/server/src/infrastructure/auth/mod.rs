//! 接続時認証の実装
//!
//! - `jwt`: 署名付きトークンの発行と検証

pub mod jwt;

pub use jwt::{AuthError, Claims, JwtKeys};
