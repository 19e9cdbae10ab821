//! トークン発行・検証の設定構造体。

use crate::error::ConfigError;
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// アクセストークンのデフォルト有効秒数（15 分）。
pub const DEFAULT_ACCESS_TTL_SECS: u64 = 15 * 60;

/// リフレッシュトークンのデフォルト有効秒数（7 日）。
pub const DEFAULT_REFRESH_TTL_SECS: u64 = 7 * 24 * 60 * 60;

fn default_access_ttl_secs() -> u64 {
    DEFAULT_ACCESS_TTL_SECS
}

fn default_refresh_ttl_secs() -> u64 {
    DEFAULT_REFRESH_TTL_SECS
}

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

/// TokenConfig はトークン発行・検証の設定を表す。
///
/// YAML から serde でデシリアライズ可能。省略したフィールドにはデフォルト値が使われる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// アクセストークンの有効秒数（デフォルト: 900 秒）。
    #[serde(default = "default_access_ttl_secs")]
    pub access_ttl_secs: u64,

    /// リフレッシュトークンの有効秒数（デフォルト: 604800 秒）。
    #[serde(default = "default_refresh_ttl_secs")]
    pub refresh_ttl_secs: u64,

    /// リフレッシュクッキーの Max-Age 秒数（デフォルト: 604800 秒）。
    #[serde(default = "default_refresh_ttl_secs")]
    pub refresh_cookie_max_age_secs: u64,

    /// 署名アルゴリズム。HMAC 系のみ利用可能（デフォルト: HS256）。
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,

    /// exp 検証時に許容する時計のずれ（秒）。
    #[serde(default)]
    pub leeway_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            access_ttl_secs: DEFAULT_ACCESS_TTL_SECS,
            refresh_ttl_secs: DEFAULT_REFRESH_TTL_SECS,
            refresh_cookie_max_age_secs: DEFAULT_REFRESH_TTL_SECS,
            algorithm: Algorithm::HS256,
            leeway_secs: 0,
        }
    }
}

impl TokenConfig {
    /// YAML 文字列から TokenConfig を生成し、検証する。
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: TokenConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// YAML ファイルを読み込み TokenConfig を返す。
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// 設定値のバリデーション。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "access_ttl_secs must be > 0".into(),
            ));
        }
        if self.refresh_ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh_ttl_secs must be > 0".into(),
            ));
        }
        if !matches!(
            self.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ConfigError::Validation(format!(
                "algorithm must be HS256, HS384, or HS512 (got {:?})",
                self.algorithm
            )));
        }
        Ok(())
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.access_ttl_secs)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_ttl_secs)
    }

    /// アクセストークンの有効秒数を設定する。
    pub fn with_access_ttl_secs(mut self, secs: u64) -> Self {
        self.access_ttl_secs = secs;
        self
    }

    /// リフレッシュトークンの有効秒数を設定する。
    pub fn with_refresh_ttl_secs(mut self, secs: u64) -> Self {
        self.refresh_ttl_secs = secs;
        self
    }

    /// リフレッシュクッキーの Max-Age 秒数を設定する。
    pub fn with_refresh_cookie_max_age_secs(mut self, secs: u64) -> Self {
        self.refresh_cookie_max_age_secs = secs;
        self
    }

    /// 署名アルゴリズムを設定する。
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// 許容する時計のずれを設定する。
    pub fn with_leeway_secs(mut self, secs: u64) -> Self {
        self.leeway_secs = secs;
        self
    }
}
