use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No authentication provided")]
    MissingHeader,

    #[error("Authorization header format must be JWT {{token}}")]
    InvalidScheme,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("No username")]
    MissingUsername,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
}

/// 認証済みの呼び出し元
///
/// 認証層で検証済みの値としてのみ生成される。エンドポイント層はこの値を
/// 明示的な引数として受け取り、署名や有効期限の再検証は行わない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(String);

impl Caller {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    pub fn username(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `Authorization` ヘッダー値からトークン部分を取り出す（`JWT` / `Bearer`、大文字小文字は無視）
pub fn extract_token(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("jwt") || scheme.eq_ignore_ascii_case("bearer") =>
        {
            Ok(token)
        }
        _ => Err(AuthError::InvalidScheme),
    }
}

/// HS256 トークンを発行する。`ttl_secs` が `None` の場合は `exp` を付与しない
pub fn issue_token(
    username: &str,
    secret: &str,
    ttl_secs: Option<usize>,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        username: username.to_string(),
        exp: ttl_secs.map(|ttl| now + ttl),
        iat: Some(now),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// トークンを検証し、`username` クレームから呼び出し元を得る
///
/// `exp` は必須にしない（付与されている場合のみ期限を検証する）。
pub fn verify_token(token: &str, secret: &str) -> Result<Caller, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    // 空白のみは拒否するが、値そのものは加工せずに使う
    let username = data.claims.username;
    if username.trim().is_empty() {
        return Err(AuthError::MissingUsername);
    }
    Ok(Caller::new(username))
}

/// ヘッダー値（無い場合は `None`）から呼び出し元を認証する
pub fn authenticate(header_value: Option<&str>, secret: &str) -> Result<Caller, AuthError> {
    let header_value = header_value.ok_or(AuthError::MissingHeader)?;
    let token = extract_token(header_value)?;
    verify_token(token, secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-for-unit-tests-only";

    #[test]
    fn test_issue_and_verify_token() {
        let token = issue_token("test@test.com", TEST_SECRET, Some(3600)).unwrap();
        let caller = verify_token(&token, TEST_SECRET).unwrap();
        assert_eq!(caller.username(), "test@test.com");
    }

    #[test]
    fn test_token_without_exp_is_accepted() {
        let token = issue_token("test@test.com", TEST_SECRET, None).unwrap();
        assert!(verify_token(&token, TEST_SECRET).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            username: "test@test.com".to_string(),
            exp: Some(1),
            iat: Some(0),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            verify_token(&token, TEST_SECRET),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token("test@test.com", TEST_SECRET, None).unwrap();
        assert!(verify_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn test_missing_username_is_rejected() {
        let token = issue_token("  ", TEST_SECRET, None).unwrap();
        assert!(matches!(
            verify_token(&token, TEST_SECRET),
            Err(AuthError::MissingUsername)
        ));
    }

    #[test]
    fn test_username_claim_is_kept_verbatim() {
        let token = issue_token(" test@test.com ", TEST_SECRET, None).unwrap();
        let caller = verify_token(&token, TEST_SECRET).unwrap();
        assert_eq!(caller.username(), " test@test.com ");
    }

    #[test]
    fn test_extract_token_schemes() {
        assert_eq!(extract_token("JWT abc").unwrap(), "abc");
        assert_eq!(extract_token("jwt abc").unwrap(), "abc");
        assert_eq!(extract_token("Bearer abc").unwrap(), "abc");
        assert!(matches!(extract_token("Basic abc"), Err(AuthError::InvalidScheme)));
        assert!(matches!(extract_token("JWT"), Err(AuthError::InvalidScheme)));
        assert!(matches!(extract_token("JWT a b"), Err(AuthError::InvalidScheme)));
    }

    #[test]
    fn test_authenticate_without_header() {
        assert!(matches!(
            authenticate(None, TEST_SECRET),
            Err(AuthError::MissingHeader)
        ));
    }
}
