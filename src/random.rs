//! 安全随机数生成模块
//!
//! 为密码盐值和 token ID 提供密码学安全的随机数据。

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

use crate::error::RngError;

/// 生成指定长度的随机字节数组
///
/// 使用操作系统提供的密码学安全随机数生成器 (CSPRNG)
///
/// # Arguments
///
/// * `length` - 要生成的字节数
///
/// # Example
///
/// ```rust
/// use credkit::random::generate_random_bytes;
///
/// let bytes = generate_random_bytes(16).unwrap();
/// assert_eq!(bytes.len(), 16);
/// ```
pub fn generate_random_bytes(length: usize) -> Result<Vec<u8>, RngError> {
    let mut bytes = vec![0u8; length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RngError(format!("{:?}", e)))?;
    Ok(bytes)
}

/// 生成指定长度的 Base64 URL 安全随机字符串（不含填充）
///
/// ```rust
/// use credkit::random::generate_random_base64_url;
///
/// let id = generate_random_base64_url(16).unwrap();
/// assert!(!id.contains('+'));
/// assert!(!id.contains('/'));
/// ```
pub fn generate_random_base64_url(byte_length: usize) -> Result<String, RngError> {
    let bytes = generate_random_bytes(byte_length)?;
    Ok(URL_SAFE_NO_PAD.encode(&bytes))
}
