//! # credkit
//!
//! 会话凭证核心：把明文密码转换为可存储的哈希，为已认证的用户签发短期
//! Access Token 与长期 Refresh Token，并用 Refresh Token 续期。
//!
//! ## 功能特性
//!
//! - **密码哈希**: Argon2id（默认）或 bcrypt，带随机盐值与可调 cost
//! - **密码验证**: 常量时间比较，自动识别哈希格式
//! - **Token 签发**: HS256 签名的 JWT，Access 15 分钟 / Refresh 24 小时
//! - **Token 续期**: 按签名、过期、类型、主题的固定顺序验证后签发新的 Token 对
//!
//! 所有组件都是无状态的：唯一共享的资源是进程启动时注入的只读签名密钥，
//! 因此可以在任意数量的线程中并发调用，无需加锁。库不保存已签发的 Token，
//! 不支持吊销。
//!
//! ## Features
//!
//! - `argon2` - 启用 Argon2id 密码哈希支持（默认启用）
//! - `bcrypt` - 启用 bcrypt 密码哈希支持，用于验证已有的 bcrypt 哈希（默认启用）
//! - `full` - 启用所有功能
//!
//! ## 示例
//!
//! ```rust
//! use credkit::{CredentialService, CryptoService, SigningSecret};
//!
//! let secret = SigningSecret::new("my-secret-key-at-least-32-bytes!").unwrap();
//! let service = CryptoService::new(&secret);
//!
//! let hash = service.hash_password("my_secure_password").unwrap();
//! assert!(service.verify_password("my_secure_password", &hash).unwrap());
//!
//! let pair = service.issue_tokens("alice").unwrap();
//! let renewed = service.renew_tokens(&pair.refresh_token).unwrap();
//! assert!(renewed.access_expires_at < renewed.refresh_expires_at);
//! ```

pub mod config;
pub mod error;
pub mod password;
pub mod random;
pub mod service;
pub mod token;

pub use crate::config::AuthConfig;
pub use crate::error::{ConfigError, Error, FoundKind, PasswordHashError, Result, TokenError};

// ============================================================================
// 密码相关导出
// ============================================================================

pub use password::{Algorithm, PasswordHasher, hash_password, verify_password};

// ============================================================================
// Token 相关导出
// ============================================================================

pub use token::{
    Claims, SigningSecret, TokenIssuer, TokenKind, TokenPair, TokenRenewer, TokenValidator,
};

// ============================================================================
// 服务导出
// ============================================================================

pub use service::{CredentialService, CryptoService};
