//! 签名密钥
//!
//! 进程启动时注入一次，之后只读，由 [`TokenIssuer`](super::TokenIssuer) 与
//! [`TokenValidator`](super::TokenValidator) 共享。

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};
use tracing::warn;

use crate::error::{ConfigError, Result};

/// 推荐的最小密钥长度（字节），与 HS256 的输出长度一致
pub const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

/// 对称签名密钥
///
/// 克隆只增加引用计数，密钥字节在进程生命周期内不会被修改。
/// `Debug` 输出不包含密钥内容。
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Arc<[u8]>,
}

impl SigningSecret {
    /// 从原始字节创建签名密钥
    ///
    /// 空密钥返回 `ConfigError::MissingSecret`；短于
    /// [`MIN_RECOMMENDED_SECRET_LEN`] 的密钥可以使用，但会记录一条警告。
    ///
    /// ```rust
    /// use credkit::token::SigningSecret;
    ///
    /// let secret = SigningSecret::new("my-secret-key-at-least-32-bytes!").unwrap();
    /// assert!(SigningSecret::new("").is_err());
    /// ```
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret.into());
        }
        if secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            warn!(
                len = secret.len(),
                recommended = MIN_RECOMMENDED_SECRET_LEN,
                "signing secret is shorter than recommended"
            );
        }
        Ok(Self {
            bytes: Arc::from(secret),
        })
    }

    /// 密钥长度（字节）
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 构造后总是非空
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.bytes)
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.bytes)
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
