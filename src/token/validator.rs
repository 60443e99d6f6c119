//! Token 验证
//!
//! 检查顺序固定：
//!
//! 1. 结构与签名（HS256，常量时间比较）
//! 2. 过期时间必须严格晚于当前时刻
//! 3. 类型必须与期望一致
//! 4. 主题必须存在且非空
//!
//! 签名通过之前不读取任何 claim，避免基于未认证的字段做判断。

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};

use super::claims::{Claims, TokenKind};
use super::secret::SigningSecret;
use crate::error::{FoundKind, Result, TokenError};

/// 早期版本把主题写在 `username` 字段中
const LEGACY_SUBJECT_CLAIM: &str = "username";

/// Token 验证器
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl TokenValidator {
    /// 使用签名密钥创建验证器
    pub fn new(secret: &SigningSecret) -> Self {
        // 时间与类型检查由本模块按固定顺序完成，jsonwebtoken 只负责结构和签名
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Self {
            decoding_key: secret.decoding_key(),
            validation,
        }
    }

    /// 以当前时间验证 Token
    pub fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        self.validate_at(token, expected, Utc::now())
    }

    /// 以指定时刻验证 Token
    ///
    /// ```rust
    /// use credkit::token::{SigningSecret, TokenIssuer, TokenKind, TokenValidator};
    ///
    /// let secret = SigningSecret::new("my-secret-key-at-least-32-bytes!").unwrap();
    /// let pair = TokenIssuer::new(&secret).issue("alice").unwrap();
    ///
    /// let claims = TokenValidator::new(&secret)
    ///     .validate(&pair.access_token, TokenKind::Access)
    ///     .unwrap();
    /// assert_eq!(claims.subject(), "alice");
    /// ```
    pub fn validate_at(
        &self,
        token: &str,
        expected: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<Claims> {
        let payload = self.verify_signature(token)?;

        let exp = payload
            .get("exp")
            .and_then(Value::as_i64)
            .ok_or_else(|| TokenError::MalformedClaims("missing or non-integer exp".to_string()))?;
        if now.timestamp() >= exp {
            return Err(TokenError::Expired.into());
        }

        let kind = match payload
            .get("type")
            .and_then(Value::as_str)
            .and_then(TokenKind::parse)
        {
            Some(kind) if kind == expected => kind,
            Some(kind) => {
                return Err(TokenError::WrongKind {
                    expected,
                    found: FoundKind::Known(kind),
                }
                .into());
            }
            None => {
                return Err(TokenError::WrongKind {
                    expected,
                    found: FoundKind::Unrecognized,
                }
                .into());
            }
        };

        let sub = payload
            .get("sub")
            .or_else(|| payload.get(LEGACY_SUBJECT_CLAIM))
            .and_then(Value::as_str)
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| TokenError::MalformedClaims("missing or empty subject".to_string()))?;

        Ok(Claims {
            sub: sub.to_string(),
            kind,
            exp,
            iat: payload.get("iat").and_then(Value::as_i64),
            jti: payload.get("jti").and_then(Value::as_str).map(str::to_string),
        })
    }

    fn verify_signature(&self, token: &str) -> Result<Map<String, Value>> {
        let data = decode::<Value>(token, &self.decoding_key, &self.validation).map_err(|e| {
            let reason = match e.kind() {
                ErrorKind::InvalidSignature => "signature mismatch",
                ErrorKind::InvalidAlgorithm => "unexpected signing algorithm",
                _ => "malformed token",
            };
            TokenError::Invalid(reason.to_string())
        })?;

        match data.claims {
            Value::Object(map) => Ok(map),
            _ => Err(TokenError::Invalid("claims payload is not an object".to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::token::issuer::TokenIssuer;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes!";

    fn secret() -> SigningSecret {
        SigningSecret::new(TEST_SECRET).unwrap()
    }

    fn sign_raw(payload: &Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            payload,
            &EncodingKey::from_secret(TEST_SECRET),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        Utc::now().timestamp() + 600
    }

    #[test]
    fn test_validate_access_token() {
        let pair = TokenIssuer::new(&secret()).issue("alice").unwrap();
        let claims = TokenValidator::new(&secret())
            .validate(&pair.access_token, TokenKind::Access)
            .unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.jti.is_some());
        assert!(claims.iat.is_some());
    }

    #[test]
    fn test_fifteen_minute_window() {
        let issued = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let pair = TokenIssuer::new(&secret())
            .issue_at("bob", issued)
            .unwrap();
        let validator = TokenValidator::new(&secret());

        let before = issued + Duration::minutes(14) + Duration::seconds(59);
        assert!(
            validator
                .validate_at(&pair.access_token, TokenKind::Access, before)
                .is_ok()
        );

        let after = issued + Duration::minutes(15) + Duration::seconds(1);
        let result = validator.validate_at(&pair.access_token, TokenKind::Access, after);
        assert!(matches!(result, Err(Error::Token(TokenError::Expired))));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let other = SigningSecret::new("another-secret-key-at-least-32-bytes").unwrap();
        let pair = TokenIssuer::new(&other).issue("alice").unwrap();

        let result = TokenValidator::new(&secret()).validate(&pair.refresh_token, TokenKind::Refresh);
        assert!(matches!(result, Err(Error::Token(TokenError::Invalid(_)))));
    }

    #[test]
    fn test_signature_checked_before_expiry() {
        // 已过期且签名错误：必须报告签名问题
        let other = SigningSecret::new("another-secret-key-at-least-32-bytes").unwrap();
        let issued = Utc::now() - Duration::days(3);
        let pair = TokenIssuer::new(&other).issue_at("alice", issued).unwrap();

        let result = TokenValidator::new(&secret()).validate(&pair.refresh_token, TokenKind::Refresh);
        assert!(matches!(result, Err(Error::Token(TokenError::Invalid(_)))));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let pair = TokenIssuer::new(&secret()).issue("alice").unwrap();
        let parts: Vec<&str> = pair.access_token.split('.').collect();

        let mut payload: Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        payload["type"] = json!("refresh");
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        let result = TokenValidator::new(&secret()).validate(&forged, TokenKind::Refresh);
        assert!(matches!(result, Err(Error::Token(TokenError::Invalid(_)))));
    }

    #[test]
    fn test_alg_none_rejected() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::to_vec(&json!({"sub": "mallory", "type": "refresh", "exp": future_exp()}))
                .unwrap(),
        );
        let token = format!("{}.{}.", header, payload);

        let result = TokenValidator::new(&secret()).validate(&token, TokenKind::Refresh);
        assert!(matches!(result, Err(Error::Token(TokenError::Invalid(_)))));
    }

    #[test]
    fn test_garbage_is_invalid() {
        let validator = TokenValidator::new(&secret());
        for token in ["", "not-a-token", "a.b.c", "a.b"] {
            let result = validator.validate(token, TokenKind::Refresh);
            assert!(
                matches!(result, Err(Error::Token(TokenError::Invalid(_)))),
                "token {:?} should be invalid",
                token
            );
        }
    }

    #[test]
    fn test_missing_exp_is_malformed() {
        let token = sign_raw(&json!({"sub": "alice", "type": "refresh"}));
        let result = TokenValidator::new(&secret()).validate(&token, TokenKind::Refresh);
        assert!(matches!(
            result,
            Err(Error::Token(TokenError::MalformedClaims(_)))
        ));
    }

    #[test]
    fn test_missing_type_is_wrong_kind() {
        let token = sign_raw(&json!({"sub": "alice", "exp": future_exp()}));
        let result = TokenValidator::new(&secret()).validate(&token, TokenKind::Refresh);
        assert!(matches!(
            result,
            Err(Error::Token(TokenError::WrongKind {
                expected: TokenKind::Refresh,
                found: FoundKind::Unrecognized,
            }))
        ));
    }

    #[test]
    fn test_expiry_checked_before_kind() {
        let token = sign_raw(&json!({"sub": "alice", "type": "access", "exp": 1}));
        let result = TokenValidator::new(&secret()).validate(&token, TokenKind::Refresh);
        assert!(matches!(result, Err(Error::Token(TokenError::Expired))));
    }

    #[test]
    fn test_kind_checked_before_subject() {
        let token = sign_raw(&json!({"type": "access", "exp": future_exp()}));
        let result = TokenValidator::new(&secret()).validate(&token, TokenKind::Refresh);
        assert!(matches!(
            result,
            Err(Error::Token(TokenError::WrongKind { .. }))
        ));
    }

    #[test]
    fn test_empty_subject_is_malformed() {
        for payload in [
            json!({"type": "refresh", "exp": future_exp()}),
            json!({"sub": "", "type": "refresh", "exp": future_exp()}),
            json!({"sub": 42, "type": "refresh", "exp": future_exp()}),
        ] {
            let token = sign_raw(&payload);
            let result = TokenValidator::new(&secret()).validate(&token, TokenKind::Refresh);
            assert!(matches!(
                result,
                Err(Error::Token(TokenError::MalformedClaims(_)))
            ));
        }
    }

    #[test]
    fn test_legacy_username_claim() {
        let token = sign_raw(&json!({"username": "carol", "type": "refresh", "exp": future_exp()}));
        let claims = TokenValidator::new(&secret())
            .validate(&token, TokenKind::Refresh)
            .unwrap();

        assert_eq!(claims.sub, "carol");
        assert_eq!(claims.iat, None);
        assert_eq!(claims.jti, None);
    }
}
