//! Token 签发
//!
//! 为给定主题同时签发 Access / Refresh Token 对，使用 HS256 签名。

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tracing::debug;

use super::claims::{Claims, TokenKind, TokenPair};
use super::secret::SigningSecret;
use crate::error::{Result, TokenError};
use crate::random::generate_random_base64_url;

/// Token ID 的随机字节数
const JTI_BYTES: usize = 16;

/// Token 对签发器
///
/// 只持有从签名密钥派生的只读编码密钥，可在线程间自由共享。
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &self.header.alg)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// 使用签名密钥创建签发器
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            encoding_key: secret.encoding_key(),
            header: Header::new(Algorithm::HS256),
        }
    }

    /// 以当前时间签发 Token 对
    ///
    /// ```rust
    /// use credkit::token::{SigningSecret, TokenIssuer};
    ///
    /// let secret = SigningSecret::new("my-secret-key-at-least-32-bytes!").unwrap();
    /// let pair = TokenIssuer::new(&secret).issue("alice").unwrap();
    /// assert!(pair.access_expires_at < pair.refresh_expires_at);
    /// ```
    pub fn issue(&self, subject: &str) -> Result<TokenPair> {
        self.issue_at(subject, Utc::now())
    }

    /// 以指定时刻签发 Token 对
    ///
    /// 两个 Token 共享主题和签发时间，过期时间分别为 `now` 之后 15 分钟和 24 小时。
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<TokenPair> {
        if subject.is_empty() {
            return Err(TokenError::InvalidSubject.into());
        }

        let access = build_claims(subject, TokenKind::Access, now)?;
        let refresh = build_claims(subject, TokenKind::Refresh, now)?;

        let access_expires_at = expiry_of(&access)?;
        let refresh_expires_at = expiry_of(&refresh)?;

        let access_token = self.sign(&access)?;
        let refresh_token = self.sign(&refresh)?;

        debug!(
            subject,
            access_exp = access.exp,
            refresh_exp = refresh.exp,
            "issued token pair"
        );

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
            token_type: "Bearer".to_string(),
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| {
            TokenError::SigningFailed(format!("failed to encode {} token: {}", claims.kind, e))
                .into()
        })
    }
}

fn build_claims(subject: &str, kind: TokenKind, now: DateTime<Utc>) -> Result<Claims> {
    let jti = generate_random_base64_url(JTI_BYTES)
        .map_err(|e| TokenError::SigningFailed(format!("failed to generate token id: {}", e)))?;
    let iat = now.timestamp();

    Ok(Claims {
        sub: subject.to_string(),
        kind,
        exp: iat + kind.lifetime().num_seconds(),
        iat: Some(iat),
        jti: Some(jti),
    })
}

fn expiry_of(claims: &Claims) -> Result<DateTime<Utc>> {
    claims.expires_at().ok_or_else(|| {
        TokenError::SigningFailed(format!("{} token expiry is out of range", claims.kind)).into()
    })
}
