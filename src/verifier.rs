//! フィンガープリント束縛トークンの検証。
//!
//! 検証は次の 3 条件がすべて成立した場合のみ成功する。
//!
//! 1. 署名と有効期限が正しい（JWT プリミティブに委譲）
//! 2. Claims のトークン種別が呼び出し側の期待値と一致する
//! 3. Claims のフィンガープリントハッシュが現在の値と定数時間比較で一致する
//!
//! 失敗はすべて [`VerificationResult::Invalid`] として返し、エラーを伝播させない。

use crate::claims::{TokenClaims, TokenType};
use crate::compare::constant_time_eq;
use crate::error::VerificationError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::de::IgnoredAny;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;

/// ClaimValue は文字列以外も受け付ける Claim 値を表す。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClaimValue {
    Text(String),
    #[allow(dead_code)]
    Other(IgnoredAny),
}

impl ClaimValue {
    fn into_text(value: Option<ClaimValue>) -> Option<String> {
        match value {
            Some(ClaimValue::Text(text)) => Some(text),
            _ => None,
        }
    }
}

/// 署名検証直後の Claims。type / fp の欠落や未知の値は後段の検査で判定する。
#[derive(Debug, Deserialize)]
struct DecodedClaims {
    #[serde(default)]
    sub: String,
    #[serde(default)]
    fp: Option<ClaimValue>,
    #[serde(default, rename = "type")]
    token_type: Option<ClaimValue>,
    #[serde(default)]
    iat: u64,
    exp: u64,
}

/// VerificationResult はトークン検証の結果を表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    Valid(TokenClaims),
    Invalid(VerificationError),
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationResult::Valid(_))
    }

    /// 検証成功時の Claims を返す。
    pub fn payload(&self) -> Option<&TokenClaims> {
        match self {
            VerificationResult::Valid(claims) => Some(claims),
            VerificationResult::Invalid(_) => None,
        }
    }

    /// 検証失敗時の理由を返す。
    pub fn error(&self) -> Option<&VerificationError> {
        match self {
            VerificationResult::Valid(_) => None,
            VerificationResult::Invalid(err) => Some(err),
        }
    }

    /// `?` で扱えるよう Result に変換する。
    pub fn into_result(self) -> Result<TokenClaims, VerificationError> {
        match self {
            VerificationResult::Valid(claims) => Ok(claims),
            VerificationResult::Invalid(err) => Err(err),
        }
    }
}

impl From<Result<TokenClaims, VerificationError>> for VerificationResult {
    fn from(result: Result<TokenClaims, VerificationError>) -> Self {
        match result {
            Ok(claims) => VerificationResult::Valid(claims),
            Err(err) => VerificationResult::Invalid(err),
        }
    }
}

/// `{"valid": true, "payload": {...}}` または `{"valid": false, "error": "..."}` 形式で出力する。
impl Serialize for VerificationResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("VerificationResult", 2)?;
        match self {
            VerificationResult::Valid(claims) => {
                state.serialize_field("valid", &true)?;
                state.serialize_field("payload", claims)?;
            }
            VerificationResult::Invalid(err) => {
                state.serialize_field("valid", &false)?;
                state.serialize_field("error", &err.to_string())?;
            }
        }
        state.end()
    }
}

/// アクセストークンを HS256 で検証する。
pub fn verify_access_token(
    token: &str,
    current_fingerprint_hash: &str,
    secret: &str,
) -> VerificationResult {
    verify_token(
        TokenType::Access,
        token,
        current_fingerprint_hash,
        secret,
        Algorithm::HS256,
        0,
    )
}

/// リフレッシュトークンを HS256 で検証する。
pub fn verify_refresh_token(
    token: &str,
    current_fingerprint_hash: &str,
    secret: &str,
) -> VerificationResult {
    verify_token(
        TokenType::Refresh,
        token,
        current_fingerprint_hash,
        secret,
        Algorithm::HS256,
        0,
    )
}

/// 期待するトークン種別・アルゴリズム・許容ずれを指定してトークンを検証する。
pub fn verify_token(
    expected: TokenType,
    token: &str,
    current_fingerprint_hash: &str,
    secret: &str,
    algorithm: Algorithm,
    leeway_secs: u64,
) -> VerificationResult {
    let result = check_token(
        expected,
        token,
        current_fingerprint_hash,
        secret,
        algorithm,
        leeway_secs,
    );
    match &result {
        Err(VerificationError::FingerprintMismatch) => {
            tracing::warn!(token_type = %expected, "フィンガープリント不一致のトークンを拒否しました");
        }
        Err(err) => {
            tracing::debug!(token_type = %expected, reason = %err, "トークン検証に失敗しました");
        }
        Ok(_) => {}
    }
    result.into()
}

fn check_token(
    expected: TokenType,
    token: &str,
    current_fingerprint_hash: &str,
    secret: &str,
    algorithm: Algorithm,
    leeway_secs: u64,
) -> Result<TokenClaims, VerificationError> {
    if secret.is_empty() {
        return Err(VerificationError::SignatureOrFormat(
            "secret or public key must be provided".into(),
        ));
    }

    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(algorithm);
    validation.leeway = leeway_secs;
    validation.validate_nbf = true;

    let decoded = decode::<DecodedClaims>(token, &key, &validation)
        .map_err(|e| VerificationError::SignatureOrFormat(e.to_string()))?
        .claims;

    let token_type = ClaimValue::into_text(decoded.token_type)
        .as_deref()
        .and_then(TokenType::from_wire);
    if token_type != Some(expected) {
        return Err(VerificationError::TokenTypeMismatch);
    }

    // fp が欠落・非文字列の場合は空文字列として比較する
    let fp = ClaimValue::into_text(decoded.fp).unwrap_or_default();
    if !constant_time_eq(&fp, current_fingerprint_hash) {
        return Err(VerificationError::FingerprintMismatch);
    }

    Ok(TokenClaims {
        sub: decoded.sub,
        fp,
        token_type: expected,
        iat: decoded.iat,
        exp: decoded.exp,
    })
}
