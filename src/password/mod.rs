//! 密码哈希模块
//!
//! 将明文密码转换为可存储的、加盐的单向哈希，并支持将明文与存储的哈希进行验证。
//!
//! ## 支持的算法
//!
//! - **Argon2id** (推荐): 内存硬哈希算法，抵抗 GPU/ASIC 攻击（需启用 `argon2` feature）
//! - **bcrypt**: 兼容已有的 `$2a$` / `$2b$` 哈希（`bcrypt` feature，默认启用）。
//!   输入不截断，超过 72 字节的密码无法用 bcrypt 哈希
//!
//! 哈希字符串采用各算法的标准编码，盐值与 cost 参数都嵌在其中，验证时无需额外信息。
//!
//! ## 示例
//!
//! ```rust
//! use credkit::password::{hash_password, verify_password};
//!
//! let hash = hash_password("my_secure_password").unwrap();
//! assert!(verify_password("my_secure_password", &hash).unwrap());
//! ```
//!
//! ### 使用指定 cost
//!
#![cfg_attr(feature = "argon2", doc = "```rust")]
#![cfg_attr(not(feature = "argon2"), doc = "```rust,ignore")]
//! use credkit::password::PasswordHasher;
//!
//! let params = argon2::Params::new(64 * 1024, 3, 1, None).unwrap();
//! let hasher = PasswordHasher::default().with_argon2_params(params);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hash.contains("m=65536,t=3,p=1"));
//! ```

mod hasher;

pub use hasher::{Algorithm, PasswordHasher, SALT_LEN, hash_password, verify_password};

#[cfg(feature = "bcrypt")]
pub use hasher::{BCRYPT_MAX_INPUT_LEN, DEFAULT_BCRYPT_COST};
