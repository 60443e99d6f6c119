//! 配置模块
//!
//! Token 核心只认识一个配置项：签名密钥。它在进程启动时读取一次，
//! 之后作为不可变值注入到各组件中。
//!
//! 配置来源按优先级从低到高合并：
//!
//! 1. 可选的配置文件（TOML / YAML / JSON，由 `config` crate 按扩展名识别）
//! 2. 以 `CREDKIT_` 为前缀的环境变量，例如 `CREDKIT_SIGNING_SECRET`

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::token::SigningSecret;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "CREDKIT";

/// 认证配置
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC 签名密钥
    #[serde(default)]
    pub signing_secret: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_secret", &"<redacted>")
            .finish()
    }
}

impl AuthConfig {
    /// 直接使用给定密钥创建配置
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
        }
    }

    /// 从进程环境变量加载
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// 从可选的配置文件和环境变量加载
    ///
    /// 环境变量覆盖文件中的值；两处都没有提供密钥时返回 `ConfigError::MissingSecret`。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    fn load_from(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(::config::Environment::with_prefix(ENV_PREFIX).source(env));

        let config: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        if config.signing_secret.is_empty() {
            return Err(ConfigError::MissingSecret.into());
        }
        Ok(config)
    }

    /// 构造签名密钥
    pub fn signing_secret(&self) -> Result<SigningSecret> {
        SigningSecret::new(&self.signing_secret)
    }
}
