//! 凭证服务
//!
//! 对外暴露的窄接口：哈希密码、验证密码、签发 Token 对、续期 Token 对。
//! HTTP 层和用户存储不在本库范围内，它们通过 [`CredentialService`] 使用这些能力。
//!
//! ## 示例
//!
//! ```rust
//! use credkit::{AuthConfig, CredentialService, CryptoService};
//!
//! let service = CryptoService::from_config(&AuthConfig::new(
//!     "my-secret-key-at-least-32-bytes!",
//! ))
//! .unwrap();
//!
//! // 注册
//! let stored = service.hash_password("correct horse battery staple").unwrap();
//!
//! // 登录：先由调用方验证密码，再签发 Token
//! assert!(service.verify_password("correct horse battery staple", &stored).unwrap());
//! let pair = service.issue_tokens("alice").unwrap();
//!
//! // 续期
//! let renewed = service.renew_tokens(&pair.refresh_token).unwrap();
//! assert_eq!(renewed.token_type, "Bearer");
//! ```

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::password::PasswordHasher;
use crate::token::{
    Claims, SigningSecret, TokenIssuer, TokenKind, TokenPair, TokenRenewer, TokenValidator,
};

/// 凭证服务接口
///
/// 所有方法都是无副作用的单次计算，可在任意线程并发调用。
pub trait CredentialService: Send + Sync {
    /// 将明文密码转换为可存储的哈希
    fn hash_password(&self, password: &str) -> Result<String>;

    /// 验证明文密码是否与存储的哈希匹配
    fn verify_password(&self, password: &str, stored: &str) -> Result<bool>;

    /// 为已认证的主题签发 Token 对
    fn issue_tokens(&self, subject: &str) -> Result<TokenPair>;

    /// 用 Refresh Token 换取新的 Token 对
    fn renew_tokens(&self, refresh_token: &str) -> Result<TokenPair>;
}

/// 默认的凭证服务实现
///
/// 持有一个密码哈希器，以及由同一签名密钥构造的签发器、验证器和续期器。
#[derive(Debug, Clone)]
pub struct CryptoService {
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    validator: TokenValidator,
    renewer: TokenRenewer,
}

impl CryptoService {
    /// 使用签名密钥和默认密码哈希器创建服务
    pub fn new(secret: &SigningSecret) -> Self {
        Self::with_hasher(secret, PasswordHasher::default())
    }

    /// 使用签名密钥和指定的密码哈希器创建服务
    pub fn with_hasher(secret: &SigningSecret, hasher: PasswordHasher) -> Self {
        let issuer = TokenIssuer::new(secret);
        let validator = TokenValidator::new(secret);
        Self {
            hasher,
            renewer: TokenRenewer::from_parts(validator.clone(), issuer.clone()),
            issuer,
            validator,
        }
    }

    /// 从配置创建服务
    pub fn from_config(config: &AuthConfig) -> Result<Self> {
        Ok(Self::new(&config.signing_secret()?))
    }

    /// 从环境变量创建服务
    pub fn from_env() -> Result<Self> {
        Self::from_config(&AuthConfig::from_env()?)
    }

    /// 密码哈希器
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// 验证 Access Token 并返回其 claims
    ///
    /// 与续期使用同一条验证路径，只是期望的类型为 Access。
    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        self.validator.validate(token, TokenKind::Access)
    }

    /// 在阻塞线程池中哈希密码
    ///
    /// 哈希是刻意耗费 CPU 的操作，在异步运行时中调用时应使用此方法，
    /// 避免阻塞调度线程。
    pub async fn hash_password_async(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| Error::internal(format!("password hashing task failed: {}", e)))?
    }

    /// 在阻塞线程池中验证密码
    pub async fn verify_password_async(&self, password: String, stored: String) -> Result<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| Error::internal(format!("password verification task failed: {}", e)))?
    }
}

impl CredentialService for CryptoService {
    fn hash_password(&self, password: &str) -> Result<String> {
        self.hasher.hash(password)
    }

    fn verify_password(&self, password: &str, stored: &str) -> Result<bool> {
        self.hasher.verify(password, stored)
    }

    fn issue_tokens(&self, subject: &str) -> Result<TokenPair> {
        self.issuer.issue(subject)
    }

    fn renew_tokens(&self, refresh_token: &str) -> Result<TokenPair> {
        self.renewer.renew(refresh_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, FoundKind, TokenError};
    use std::sync::Arc;

    const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes!";

    fn service() -> CryptoService {
        let hasher = PasswordHasher::default();
        #[cfg(feature = "argon2")]
        let hasher = hasher.with_argon2_params(argon2::Params::new(8, 1, 1, None).unwrap());
        #[cfg(feature = "bcrypt")]
        let hasher = hasher.with_bcrypt_cost(4).unwrap();
        CryptoService::with_hasher(&SigningSecret::new(TEST_SECRET).unwrap(), hasher)
    }

    #[test]
    fn test_full_flow() {
        let service = service();

        let stored = service.hash_password("p@ssw0rd").unwrap();
        assert!(service.verify_password("p@ssw0rd", &stored).unwrap());
        assert!(!service.verify_password("wrong", &stored).unwrap());

        // 测试用的低 cost 哈希低于默认配置
        assert!(!service.hasher().needs_rehash(&stored));
        assert!(CryptoService::new(&SigningSecret::new(TEST_SECRET).unwrap())
            .hasher()
            .needs_rehash(&stored));

        let pair = service.issue_tokens("alice").unwrap();
        let claims = service.validate_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.subject(), "alice");

        let renewed = service.renew_tokens(&pair.refresh_token).unwrap();
        let claims = service.validate_access_token(&renewed.access_token).unwrap();
        assert_eq!(claims.subject(), "alice");
    }

    #[test]
    fn test_refresh_token_is_not_access() {
        let service = service();
        let pair = service.issue_tokens("alice").unwrap();

        let result = service.validate_access_token(&pair.refresh_token);
        assert!(matches!(
            result,
            Err(Error::Token(TokenError::WrongKind {
                expected: TokenKind::Access,
                found: FoundKind::Known(TokenKind::Refresh),
            }))
        ));
    }

    #[test]
    fn test_from_config_rejects_empty_secret() {
        let result = CryptoService::from_config(&AuthConfig::new(""));
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingSecret))
        ));
    }

    #[test]
    fn test_usable_as_trait_object() {
        let service: Arc<dyn CredentialService> = Arc::new(service());
        let pair = service.issue_tokens("dave").unwrap();
        assert!(service.renew_tokens(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_concurrent_issue_and_renew() {
        let service = Arc::new(service());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || {
                    let subject = format!("user{}", i);
                    let pair = service.issue_tokens(&subject).unwrap();
                    let renewed = service.renew_tokens(&pair.refresh_token).unwrap();
                    service
                        .validate_access_token(&renewed.access_token)
                        .unwrap()
                        .sub
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("user{}", i));
        }
    }

    #[tokio::test]
    async fn test_async_hashing() {
        let service = service();

        let stored = service
            .hash_password_async("async-password".to_string())
            .await
            .unwrap();
        assert!(
            service
                .verify_password_async("async-password".to_string(), stored.clone())
                .await
                .unwrap()
        );
        assert!(
            !service
                .verify_password_async("nope".to_string(), stored)
                .await
                .unwrap()
        );
    }
}
