//! フィンガープリント束縛トークンの発行。

use crate::claims::{TokenClaims, TokenType};
use crate::config::{DEFAULT_ACCESS_TTL_SECS, DEFAULT_REFRESH_TTL_SECS};
use crate::error::AuthError;
use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// TokenPair は同時に発行したアクセストークンとリフレッシュトークンの組を表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// アクセストークンをデフォルトの有効期限（15 分）で発行する。
pub fn issue_access_token(
    subject: &str,
    fingerprint_hash: &str,
    secret: &str,
) -> Result<String, AuthError> {
    issue_access_token_with_ttl(
        subject,
        fingerprint_hash,
        secret,
        Duration::from_secs(DEFAULT_ACCESS_TTL_SECS),
    )
}

/// アクセストークンを指定の有効期限で発行する。
pub fn issue_access_token_with_ttl(
    subject: &str,
    fingerprint_hash: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, AuthError> {
    issue_token(
        TokenType::Access,
        subject,
        fingerprint_hash,
        secret,
        ttl,
        Algorithm::HS256,
    )
}

/// リフレッシュトークンをデフォルトの有効期限（7 日）で発行する。
pub fn issue_refresh_token(
    subject: &str,
    fingerprint_hash: &str,
    secret: &str,
) -> Result<String, AuthError> {
    issue_refresh_token_with_ttl(
        subject,
        fingerprint_hash,
        secret,
        Duration::from_secs(DEFAULT_REFRESH_TTL_SECS),
    )
}

/// リフレッシュトークンを指定の有効期限で発行する。
pub fn issue_refresh_token_with_ttl(
    subject: &str,
    fingerprint_hash: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, AuthError> {
    issue_token(
        TokenType::Refresh,
        subject,
        fingerprint_hash,
        secret,
        ttl,
        Algorithm::HS256,
    )
}

/// アクセストークンとリフレッシュトークンをそれぞれ独立したシークレットで発行する。
pub fn issue_token_pair(
    subject: &str,
    fingerprint_hash: &str,
    access_secret: &str,
    refresh_secret: &str,
) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access_token: issue_access_token(subject, fingerprint_hash, access_secret)?,
        refresh_token: issue_refresh_token(subject, fingerprint_hash, refresh_secret)?,
    })
}

/// 種別・有効期限・アルゴリズムを指定してトークンを発行する。
///
/// `exp` は現在時刻に `ttl` の秒数（端数切り捨て）を加えた値になる。
pub fn issue_token(
    token_type: TokenType,
    subject: &str,
    fingerprint_hash: &str,
    secret: &str,
    ttl: Duration,
    algorithm: Algorithm,
) -> Result<String, AuthError> {
    let claims = TokenClaims::new(
        subject,
        fingerprint_hash,
        token_type,
        get_current_timestamp(),
        ttl.as_secs(),
    );
    let token = sign_claims(&claims, secret, algorithm)?;
    tracing::debug!(sub = %claims.sub, token_type = %token_type, exp = claims.exp, "トークンを発行しました");
    Ok(token)
}

/// Claims を指定シークレットで署名し、シリアライズ済みトークンを返す。
pub(crate) fn sign_claims(
    claims: &TokenClaims,
    secret: &str,
    algorithm: Algorithm,
) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::EmptySecret);
    }
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::new(algorithm), claims, &key).map_err(|e| AuthError::Signing(e.to_string()))
}
