//! 统一错误类型模块
//!
//! 提供 credkit 库中所有操作的错误类型定义。
//!
//! 所有错误对单次调用都是终结性的，库内部不做重试；错误信息中不会出现
//! 明文密码、签名密钥或 token 字符串。

use thiserror::Error;

use crate::token::TokenKind;

/// credkit 库的统一结果类型
pub type Result<T> = std::result::Result<T, Error>;

/// credkit 库的错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 密码哈希错误
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Token 相关错误
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// 创建一个内部错误
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    /// 调用方是否可以考虑重试
    ///
    /// 只有底层密码学原语失败（哈希、签名）可能是暂时性的，其余错误
    /// 由输入决定，重试不会改变结果。
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::PasswordHash(PasswordHashError::HashFailed(_))
                | Error::Token(TokenError::SigningFailed(_))
        )
    }
}

/// 密码哈希相关错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// 哈希生成失败（底层原语错误，如资源耗尽）
    #[error("hash generation failed: {0}")]
    HashFailed(String),
    /// 存储的哈希无法识别
    #[error("malformed password hash: {0}")]
    MalformedHash(String),
    /// bcrypt cost 超出 4-31
    #[error("bcrypt cost {0} is out of range")]
    InvalidCost(u32),
}

/// Token 相关错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// 主题为空
    #[error("subject must not be empty")]
    InvalidSubject,
    /// 签名失败
    #[error("token signing failed: {0}")]
    SigningFailed(String),
    /// 结构错误或签名不匹配
    #[error("invalid token: {0}")]
    Invalid(String),
    /// Token 已过期
    #[error("token has expired")]
    Expired,
    /// Token 类型不符
    #[error("wrong token kind: expected {expected}, found {found}")]
    WrongKind {
        /// 期望的类型
        expected: TokenKind,
        /// 实际的类型
        found: FoundKind,
    },
    /// 签名有效但 claims 内容不完整
    #[error("malformed claims: {0}")]
    MalformedClaims(String),
}

/// Token 中实际携带的类型字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoundKind {
    /// 可识别的类型
    Known(TokenKind),
    /// 缺失或无法识别
    Unrecognized,
}

impl std::fmt::Display for FoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FoundKind::Known(kind) => write!(f, "{}", kind),
            FoundKind::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// 随机数生成失败
///
/// 由调用方映射为所在操作的错误类别（生成盐值时为 `HashFailed`，生成 token ID 时为
/// `SigningFailed`）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("random number generation failed: {0}")]
pub struct RngError(pub String);

/// 配置相关错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 未提供签名密钥
    #[error("signing secret is missing or empty")]
    MissingSecret,
    /// 配置源加载失败
    #[error("failed to load configuration: {0}")]
    Load(String),
}
