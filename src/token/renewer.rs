//! Token 续期
//!
//! 用有效的 Refresh Token 换取新的 Token 对。续期是无状态的：旧的 Refresh Token
//! 在自然过期前仍然有效，库不记录已使用过的 Token。

use chrono::{DateTime, Utc};
use tracing::debug;

use super::claims::{TokenKind, TokenPair};
use super::issuer::TokenIssuer;
use super::secret::SigningSecret;
use super::validator::TokenValidator;
use crate::error::Result;

/// Refresh Token 续期器
#[derive(Debug, Clone)]
pub struct TokenRenewer {
    validator: TokenValidator,
    issuer: TokenIssuer,
}

impl TokenRenewer {
    /// 使用签名密钥创建续期器
    pub fn new(secret: &SigningSecret) -> Self {
        Self::from_parts(TokenValidator::new(secret), TokenIssuer::new(secret))
    }

    /// 由已有的验证器和签发器组装
    ///
    /// 两者应来自同一个签名密钥，否则续期出的 Token 无法再次续期。
    pub fn from_parts(validator: TokenValidator, issuer: TokenIssuer) -> Self {
        Self { validator, issuer }
    }

    /// 以当前时间续期
    ///
    /// ```rust
    /// use credkit::token::{SigningSecret, TokenIssuer, TokenRenewer};
    ///
    /// let secret = SigningSecret::new("my-secret-key-at-least-32-bytes!").unwrap();
    /// let pair = TokenIssuer::new(&secret).issue("alice").unwrap();
    ///
    /// let renewed = TokenRenewer::new(&secret).renew(&pair.refresh_token).unwrap();
    /// assert_ne!(renewed.refresh_token, pair.refresh_token);
    ///
    /// // Access Token 不能用于续期
    /// assert!(TokenRenewer::new(&secret).renew(&pair.access_token).is_err());
    /// ```
    pub fn renew(&self, refresh_token: &str) -> Result<TokenPair> {
        self.renew_at(refresh_token, Utc::now())
    }

    /// 以指定时刻续期
    ///
    /// 验证签名、过期时间、类型和主题后，为同一主题签发新的 Token 对，
    /// 新 Token 的有效期从 `now` 起算。
    pub fn renew_at(&self, refresh_token: &str, now: DateTime<Utc>) -> Result<TokenPair> {
        let claims = self
            .validator
            .validate_at(refresh_token, TokenKind::Refresh, now)
            .inspect_err(|e| debug!(error = %e, "refresh token rejected"))?;

        self.issuer.issue_at(&claims.sub, now)
    }
}
