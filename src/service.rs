//! 設定とシークレットを束ねたトークンサービス。

use crate::claims::TokenType;
use crate::compare::constant_time_eq;
use crate::config::TokenConfig;
use crate::cookie::{build_clear_refresh_cookie, build_refresh_cookie_with_max_age, CookieDescriptor};
use crate::error::{AuthError, ConfigError};
use crate::issuer::{issue_token, TokenPair};
use crate::verifier::{verify_token, VerificationResult};
use secrecy::{ExposeSecret, SecretString};

/// FingerprintTokenService はアクセス用・リフレッシュ用の独立したシークレットと
/// TokenConfig を保持し、フィンガープリント束縛トークンの発行・検証を行う。
///
/// 内部に可変状態を持たないため、`Arc` で共有して複数リクエストから同時に利用できる。
#[derive(Debug)]
pub struct FingerprintTokenService {
    config: TokenConfig,
    access_secret: SecretString,
    refresh_secret: SecretString,
}

impl FingerprintTokenService {
    /// 新しい FingerprintTokenService を生成する。
    ///
    /// 設定が不正な場合、シークレットが空の場合、または 2 つのシークレットが同一の場合はエラーを返す。
    pub fn new(
        config: TokenConfig,
        access_secret: SecretString,
        refresh_secret: SecretString,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if access_secret.expose_secret().is_empty() {
            return Err(ConfigError::Validation("access secret is required".into()));
        }
        if refresh_secret.expose_secret().is_empty() {
            return Err(ConfigError::Validation(
                "refresh secret is required".into(),
            ));
        }
        if constant_time_eq(access_secret.expose_secret(), refresh_secret.expose_secret()) {
            return Err(ConfigError::SharedSecret);
        }
        Ok(Self {
            config,
            access_secret,
            refresh_secret,
        })
    }

    /// 文字列のシークレットから FingerprintTokenService を生成する。
    pub fn from_secrets(
        config: TokenConfig,
        access_secret: &str,
        refresh_secret: &str,
    ) -> Result<Self, ConfigError> {
        Self::new(
            config,
            SecretString::new(access_secret.to_string()),
            SecretString::new(refresh_secret.to_string()),
        )
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    fn secret_for(&self, token_type: TokenType) -> &str {
        match token_type {
            TokenType::Access => self.access_secret.expose_secret(),
            TokenType::Refresh => self.refresh_secret.expose_secret(),
        }
    }

    fn issue(
        &self,
        token_type: TokenType,
        subject: &str,
        fingerprint_hash: &str,
    ) -> Result<String, AuthError> {
        let ttl = match token_type {
            TokenType::Access => self.config.access_ttl(),
            TokenType::Refresh => self.config.refresh_ttl(),
        };
        issue_token(
            token_type,
            subject,
            fingerprint_hash,
            self.secret_for(token_type),
            ttl,
            self.config.algorithm,
        )
    }

    fn verify(
        &self,
        token_type: TokenType,
        token: &str,
        current_fingerprint_hash: &str,
    ) -> VerificationResult {
        verify_token(
            token_type,
            token,
            current_fingerprint_hash,
            self.secret_for(token_type),
            self.config.algorithm,
            self.config.leeway_secs,
        )
    }

    /// アクセストークンを発行する。
    pub fn issue_access_token(
        &self,
        subject: &str,
        fingerprint_hash: &str,
    ) -> Result<String, AuthError> {
        self.issue(TokenType::Access, subject, fingerprint_hash)
    }

    /// リフレッシュトークンを発行する。
    pub fn issue_refresh_token(
        &self,
        subject: &str,
        fingerprint_hash: &str,
    ) -> Result<String, AuthError> {
        self.issue(TokenType::Refresh, subject, fingerprint_hash)
    }

    /// アクセストークンとリフレッシュトークンを同時に発行する。
    pub fn issue_token_pair(
        &self,
        subject: &str,
        fingerprint_hash: &str,
    ) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(subject, fingerprint_hash)?,
            refresh_token: self.issue_refresh_token(subject, fingerprint_hash)?,
        })
    }

    /// アクセストークンを検証する。
    pub fn verify_access_token(
        &self,
        token: &str,
        current_fingerprint_hash: &str,
    ) -> VerificationResult {
        self.verify(TokenType::Access, token, current_fingerprint_hash)
    }

    /// リフレッシュトークンを検証する。
    pub fn verify_refresh_token(
        &self,
        token: &str,
        current_fingerprint_hash: &str,
    ) -> VerificationResult {
        self.verify(TokenType::Refresh, token, current_fingerprint_hash)
    }

    /// 設定の Max-Age でリフレッシュクッキーを生成する。
    pub fn refresh_cookie(&self, refresh_token: &str) -> CookieDescriptor {
        build_refresh_cookie_with_max_age(refresh_token, self.config.refresh_cookie_max_age_secs)
    }

    /// リフレッシュクッキーを削除するクッキーを生成する。
    #[allow(clippy::unused_self)]
    pub fn clear_refresh_cookie(&self) -> CookieDescriptor {
        build_clear_refresh_cookie()
    }
}
