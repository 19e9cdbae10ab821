//! bro-auth: デバイスフィンガープリント束縛 JWT の発行・検証ライブラリ
//!
//! デバイスのフィンガープリントハッシュをトークンの Claims に埋め込み、検証時に
//! 現在のハッシュと定数時間で比較する。別デバイスからのトークン盗用・再送を防ぐ。
//! トークンの保存・失効リスト・セッション DB は持たないステートレスな補助層。
//!
//! # 使い方
//!
//! ```ignore
//! use bro_auth::{hash_fingerprint, issue_token_pair, verify_access_token, build_refresh_cookie};
//!
//! let fp = hash_fingerprint(&raw_signals);
//! let pair = issue_token_pair("user-1", fp.as_str(), &access_secret, &refresh_secret)?;
//!
//! let result = verify_access_token(&pair.access_token, fp.as_str(), &access_secret);
//! if let Some(claims) = result.payload() {
//!     println!("{}", claims.sub);
//! }
//!
//! let cookie = build_refresh_cookie(&pair.refresh_token);
//! ```

pub mod browser;
pub mod claims;
pub mod compare;
pub mod config;
pub mod cookie;
pub mod error;
pub mod fingerprint;
pub mod issuer;
pub mod service;
pub mod verifier;

pub use browser::{
    collect_fingerprint, BrowserFingerprint, EnvironmentProbe, FingerprintComponents, GpuProbe,
};
pub use claims::{TokenClaims, TokenType};
pub use compare::constant_time_eq;
pub use config::TokenConfig;
pub use cookie::{
    build_clear_refresh_cookie, build_refresh_cookie, build_refresh_cookie_with_max_age,
    CookieDescriptor, CookieOptions, SameSite, REFRESH_COOKIE_NAME,
};
pub use error::{AuthError, ConfigError, VerificationError};
pub use fingerprint::{hash_fingerprint, FingerprintHash};
pub use issuer::{
    issue_access_token, issue_access_token_with_ttl, issue_refresh_token,
    issue_refresh_token_with_ttl, issue_token, issue_token_pair, TokenPair,
};
pub use service::FingerprintTokenService;
pub use verifier::{verify_access_token, verify_refresh_token, verify_token, VerificationResult};
