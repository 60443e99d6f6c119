//! 密码哈希实现
//!
//! 提供密码哈希和验证的核心功能。明文密码只在单次调用期间存在，
//! 不会被记录到日志或错误信息中。

#[cfg(feature = "argon2")]
use argon2::{Algorithm as Argon2Algorithm, Argon2, Params as Argon2Params, Version};

#[cfg(feature = "argon2")]
use password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};

use tracing::debug;

use crate::error::{PasswordHashError, Result};

/// 每次哈希使用的盐值长度（字节），128 位
pub const SALT_LEN: usize = 16;

/// bcrypt 默认 cost
#[cfg(feature = "bcrypt")]
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt 可处理的最大输入长度（字节，含结尾的 NUL）
#[cfg(feature = "bcrypt")]
pub const BCRYPT_MAX_INPUT_LEN: usize = 72;

/// 支持的哈希算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Argon2id - 推荐的默认算法（内存硬）
    #[cfg(feature = "argon2")]
    Argon2id,

    /// bcrypt - 兼容旧数据的 CPU 硬算法
    #[cfg(feature = "bcrypt")]
    Bcrypt,
}

// 编译时检查：至少需要启用一个密码哈希算法
#[cfg(not(any(feature = "argon2", feature = "bcrypt")))]
compile_error!(
    "At least one password hashing algorithm (argon2 or bcrypt) must be enabled. Enable one of the password hashing features."
);

#[allow(clippy::derivable_impls)]
impl Default for Algorithm {
    fn default() -> Self {
        #[cfg(feature = "argon2")]
        {
            Algorithm::Argon2id
        }
        #[cfg(all(not(feature = "argon2"), feature = "bcrypt"))]
        {
            Algorithm::Bcrypt
        }
    }
}

/// 密码哈希器
///
/// 持有算法与 cost 参数，本身不可变，可在多线程间共享。
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    algorithm: Algorithm,

    /// Argon2 参数（内存 KiB、迭代次数、并行度）
    #[cfg(feature = "argon2")]
    argon2_params: Argon2Params,

    /// bcrypt 的 cost 参数 (4-31)
    #[cfg(feature = "bcrypt")]
    bcrypt_cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

impl PasswordHasher {
    /// 创建新的密码哈希器
    ///
    /// Argon2 使用 `argon2::Params::default()`（19 MiB，2 次迭代，1 并行度），
    /// 在普通硬件上单次耗时约数十毫秒。
    ///
    /// # Example
    ///
    /// ```rust
    /// use credkit::password::{PasswordHasher, Algorithm};
    ///
    /// # #[cfg(feature = "argon2")]
    /// let hasher = PasswordHasher::new(Algorithm::Argon2id);
    /// ```
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            #[cfg(feature = "argon2")]
            argon2_params: Argon2Params::default(),
            #[cfg(feature = "bcrypt")]
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// 当前使用的算法
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// 设置 Argon2 参数
    #[cfg(feature = "argon2")]
    pub fn with_argon2_params(mut self, params: Argon2Params) -> Self {
        self.argon2_params = params;
        self
    }

    /// 设置 bcrypt 的 cost 参数
    ///
    /// cost 不在 4-31 范围内时返回 `InvalidCost`。
    #[cfg(feature = "bcrypt")]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Result<Self> {
        if !(4..=31).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost).into());
        }
        self.bcrypt_cost = cost;
        Ok(self)
    }

    /// 哈希密码
    ///
    /// 每次调用生成新的随机盐值，因此同一密码的两次哈希结果不同。
    /// Argon2id 只在底层原语出错时返回 `HashFailed`。bcrypt 不截断输入，
    /// 密码超出 [`BCRYPT_MAX_INPUT_LEN`] 时同样返回 `HashFailed`。
    ///
    /// # Example
    ///
    /// ```rust
    /// use credkit::password::PasswordHasher;
    ///
    /// let hasher = PasswordHasher::default();
    /// let hash = hasher.hash("my_password").unwrap();
    /// # #[cfg(feature = "argon2")]
    /// assert!(hash.starts_with("$argon2id"));
    /// ```
    pub fn hash(&self, password: &str) -> Result<String> {
        match self.algorithm {
            #[cfg(feature = "argon2")]
            Algorithm::Argon2id => self.hash_argon2(password),
            #[cfg(feature = "bcrypt")]
            Algorithm::Bcrypt => self.hash_bcrypt(password),
        }
    }

    /// 验证密码
    ///
    /// 根据哈希前缀自动选择算法，使用哈希中嵌入的盐值和参数重新计算，
    /// 并以常量时间比较。
    ///
    /// # Returns
    ///
    /// 密码正确返回 `Ok(true)`，错误返回 `Ok(false)`；哈希格式无法识别时
    /// 返回 `MalformedHash`。
    ///
    /// # Example
    ///
    /// ```rust
    /// use credkit::password::PasswordHasher;
    ///
    /// let hasher = PasswordHasher::default();
    /// let hash = hasher.hash("my_password").unwrap();
    ///
    /// assert!(hasher.verify("my_password", &hash).unwrap());
    /// assert!(!hasher.verify("wrong_password", &hash).unwrap());
    /// ```
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        #[cfg(feature = "argon2")]
        if hash.starts_with("$argon2") {
            return self.verify_argon2(password, hash);
        }
        #[cfg(feature = "bcrypt")]
        if hash.starts_with("$2") {
            return self.verify_bcrypt(password, hash);
        }
        debug!("rejecting stored hash with unrecognized prefix");
        Err(PasswordHashError::MalformedHash("unknown hash format".to_string()).into())
    }

    /// 检查哈希是否需要重新生成
    ///
    /// 算法不同或参数弱于当前配置时返回 `true`，调用方可在下次登录成功后
    /// 用新哈希替换存储值。
    pub fn needs_rehash(&self, hash: &str) -> bool {
        match self.algorithm {
            #[cfg(feature = "argon2")]
            Algorithm::Argon2id => {
                let Ok(parsed) = PasswordHash::new(hash) else {
                    return true;
                };
                if parsed.algorithm != Argon2Algorithm::Argon2id.ident() {
                    return true;
                }
                match Argon2Params::try_from(&parsed) {
                    Ok(params) => {
                        params.m_cost() < self.argon2_params.m_cost()
                            || params.t_cost() < self.argon2_params.t_cost()
                            || params.p_cost() < self.argon2_params.p_cost()
                    }
                    Err(_) => true,
                }
            }
            #[cfg(feature = "bcrypt")]
            Algorithm::Bcrypt => {
                if !hash.starts_with("$2") {
                    return true;
                }
                if let Some(cost_str) = hash.get(4..6)
                    && let Ok(cost) = cost_str.parse::<u32>()
                {
                    return cost < self.bcrypt_cost;
                }
                true
            }
        }
    }

    // ========================================================================
    // Argon2 实现
    // ========================================================================

    #[cfg(feature = "argon2")]
    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(
            Argon2Algorithm::Argon2id,
            Version::V0x13,
            self.argon2_params.clone(),
        )
    }

    #[cfg(feature = "argon2")]
    fn hash_argon2(&self, password: &str) -> Result<String> {
        let salt_bytes = crate::random::generate_random_bytes(SALT_LEN)
            .map_err(|e| PasswordHashError::HashFailed(format!("failed to generate salt: {}", e)))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| PasswordHashError::HashFailed(format!("failed to encode salt: {}", e)))?;

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordHashError::HashFailed(format!("Argon2 hash failed: {}", e)).into())
    }

    #[cfg(feature = "argon2")]
    fn verify_argon2(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordHashError::MalformedHash(format!("invalid Argon2 hash: {}", e))
        })?;
        // PHC 格式允许省略盐值和输出，但这样的存储值无法用于验证
        if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
            debug!("rejecting Argon2 hash without salt or output");
            return Err(
                PasswordHashError::MalformedHash("Argon2 hash is missing salt or output".to_string())
                    .into(),
            );
        }

        // 参数取自哈希本身，而不是当前配置
        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => {
                Err(PasswordHashError::MalformedHash(format!("invalid Argon2 hash: {}", e)).into())
            }
        }
    }

    // ========================================================================
    // bcrypt 实现
    // ========================================================================

    #[cfg(feature = "bcrypt")]
    fn hash_bcrypt(&self, password: &str) -> Result<String> {
        bcrypt::non_truncating_hash(password, self.bcrypt_cost)
            .map_err(|e| PasswordHashError::HashFailed(format!("bcrypt hash failed: {}", e)).into())
    }

    #[cfg(feature = "bcrypt")]
    fn verify_bcrypt(&self, password: &str, hash: &str) -> Result<bool> {
        match bcrypt::non_truncating_verify(password, hash) {
            Ok(matched) => Ok(matched),
            // 过长的密码不可能由本库哈希得到，按不匹配处理
            Err(bcrypt::BcryptError::Truncation(_)) => Ok(false),
            Err(e) => {
                Err(PasswordHashError::MalformedHash(format!("invalid bcrypt hash: {}", e)).into())
            }
        }
    }
}

// ============================================================================
// 便捷函数
// ============================================================================

/// 使用默认算法和默认 cost 哈希密码
///
/// ```rust
/// use credkit::password::hash_password;
///
/// let hash = hash_password("my_secure_password").unwrap();
/// assert_ne!(hash, "my_secure_password");
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    PasswordHasher::default().hash(password)
}

/// 验证密码是否匹配哈希
///
/// 自动检测哈希格式（支持 Argon2 / bcrypt，取决于启用的 feature）
///
/// ```rust
/// use credkit::password::{hash_password, verify_password};
///
/// let hash = hash_password("my_secure_password").unwrap();
///
/// assert!(verify_password("my_secure_password", &hash).unwrap());
/// assert!(!verify_password("wrong_password", &hash).unwrap());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    PasswordHasher::default().verify(password, hash)
}
