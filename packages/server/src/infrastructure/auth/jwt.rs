//! JWT token signing and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::UserId;

/// Token lifetime: 1 day.
const TOKEN_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Authentication failure at connection or request time.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unauthorized: No token provided")]
    MissingToken,
    #[error("Invalid Token: {0}")]
    InvalidToken(String),
    #[error("Failed to sign token: {0}")]
    SignFailed(String),
}

/// Claims carried by a michizure access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User identifier.
    pub id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 key pair derived from the shared `JWT_SECRET`.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a token for `user_id` with the default 1-day expiry.
    pub fn sign(&self, user_id: UserId) -> Result<String, AuthError> {
        self.sign_with_expiry(user_id, Duration::seconds(TOKEN_EXPIRY_SECS))
    }

    /// Sign a token with an explicit expiry offset from now.
    ///
    /// A negative offset produces an already-expired token; only tests
    /// have a use for that.
    pub fn sign_with_expiry(
        &self,
        user_id: UserId,
        expires_in: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            id: user_id.value(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::SignFailed(e.to_string()))
    }

    /// Verify signature and expiry, returning the authenticated user id.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| UserId::new(data.claims.id))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keys() -> JwtKeys {
        JwtKeys::new(b"test-secret")
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        // テスト項目: 署名したトークンが検証を通り、ユーザー ID が復元される
        // given (前提条件):
        let keys = test_keys();

        // when (操作):
        let token = keys.sign(UserId::new(42)).unwrap();
        let verified = keys.verify(&token);

        // then (期待する結果):
        assert_eq!(verified.unwrap(), UserId::new(42));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        // テスト項目: 異なるシークレットで署名されたトークンは拒否される
        // given (前提条件):
        let keys = test_keys();
        let other_keys = JwtKeys::new(b"other-secret");

        // when (操作):
        let token = other_keys.sign(UserId::new(42)).unwrap();
        let verified = keys.verify(&token);

        // then (期待する結果):
        assert!(matches!(verified, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // テスト項目: 期限切れトークンは拒否される
        // given (前提条件): デフォルトの leeway (60 秒) を超えて期限切れ
        let keys = test_keys();
        let token = keys
            .sign_with_expiry(UserId::new(42), Duration::seconds(-120))
            .unwrap();

        // when (操作):
        let verified = keys.verify(&token);

        // then (期待する結果):
        assert!(matches!(verified, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_rejects_garbage_token() {
        // テスト項目: トークンとして解釈できない文字列は拒否される
        let keys = test_keys();
        assert!(matches!(
            keys.verify("not-a-token"),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
