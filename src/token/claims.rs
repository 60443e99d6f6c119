//! Token 载荷与 Token 对
//!
//! 线上格式的 claims 为 `{"sub", "type", "exp", "iat", "jti"}`，
//! 其中 `type` 取值 `"access"` 或 `"refresh"`。

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access Token 有效期（秒），15 分钟
pub const ACCESS_TOKEN_LIFETIME_SECS: i64 = 15 * 60;

/// Refresh Token 有效期（秒），24 小时
pub const REFRESH_TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

/// Token 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// 短期有效，用于普通授权
    Access,
    /// 长期有效，只能用于换取新的 Token 对
    Refresh,
}

impl TokenKind {
    /// 线上格式中的名称
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }

    /// 从线上格式解析，无法识别时返回 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "access" => Some(TokenKind::Access),
            "refresh" => Some(TokenKind::Refresh),
            _ => None,
        }
    }

    /// 该类型的固定有效期
    pub fn lifetime(&self) -> Duration {
        match self {
            TokenKind::Access => Duration::seconds(ACCESS_TOKEN_LIFETIME_SECS),
            TokenKind::Refresh => Duration::seconds(REFRESH_TOKEN_LIFETIME_SECS),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 经过签名认证的 Token 载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// 主题（用户名）
    pub sub: String,

    /// Token 类型
    #[serde(rename = "type")]
    pub kind: TokenKind,

    /// 过期时间（Unix 时间戳，秒）
    pub exp: i64,

    /// 签发时间（Unix 时间戳，秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Token ID，保证同一秒内签发的 Token 也互不相同
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// 主题
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// 过期时间；时间戳超出可表示范围时返回 `None`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// 签发时间
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| DateTime::from_timestamp(iat, 0))
    }

    /// 在给定时刻是否已过期
    ///
    /// 过期时间不严格晚于 `now` 即视为过期。
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// 当前是否已过期
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Access Token 和 Refresh Token 对
///
/// 同时签发，之后不会被修改；库本身不保留任何已签发 Token 的引用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access Token（15 分钟）
    pub access_token: String,
    /// Refresh Token（24 小时）
    pub refresh_token: String,
    /// Access Token 过期时间
    pub access_expires_at: DateTime<Utc>,
    /// Refresh Token 过期时间
    pub refresh_expires_at: DateTime<Utc>,
    /// Token 类型，固定为 "Bearer"
    pub token_type: String,
}
