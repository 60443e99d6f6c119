//! Token 模块
//!
//! 无状态的 Access / Refresh Token 签发、验证与续期。
//!
//! ## 子模块
//!
//! - **secret**: 进程级只读签名密钥
//! - **claims**: Token 载荷、类型和 Token 对
//! - **issuer**: Token 对签发
//! - **validator**: 签名、过期时间、类型、主题的顺序验证
//! - **renewer**: 用 Refresh Token 换取新的 Token 对
//!
//! Token 是 HS256 签名的 JWT。Access Token 有效期 15 分钟，Refresh Token 24 小时，
//! 两者都是固定常量。库不保存已签发的 Token，也不支持吊销。
//!
//! ## 示例
//!
//! ```rust
//! use credkit::token::{SigningSecret, TokenIssuer, TokenKind, TokenRenewer, TokenValidator};
//!
//! let secret = SigningSecret::new("my-secret-key-at-least-32-bytes!").unwrap();
//!
//! // 登录：签发 Token 对
//! let pair = TokenIssuer::new(&secret).issue("alice").unwrap();
//!
//! // 访问：验证 Access Token
//! let claims = TokenValidator::new(&secret)
//!     .validate(&pair.access_token, TokenKind::Access)
//!     .unwrap();
//! assert_eq!(claims.subject(), "alice");
//!
//! // 续期：用 Refresh Token 换取新的 Token 对
//! let renewed = TokenRenewer::new(&secret).renew(&pair.refresh_token).unwrap();
//! assert_ne!(renewed.access_token, pair.access_token);
//! ```

pub mod claims;
pub mod issuer;
pub mod renewer;
pub mod secret;
pub mod validator;

pub use claims::{
    ACCESS_TOKEN_LIFETIME_SECS, Claims, REFRESH_TOKEN_LIFETIME_SECS, TokenKind, TokenPair,
};
pub use issuer::TokenIssuer;
pub use renewer::TokenRenewer;
pub use secret::{MIN_RECOMMENDED_SECRET_LEN, SigningSecret};
pub use validator::TokenValidator;
