//! リフレッシュトークン用クッキーの属性ビルダー。
//!
//! 実際のレスポンスへの設定は呼び出し側の HTTP フレームワークが行う。
//! ここでは宣言的な属性セットのみを組み立てる。

use crate::config::DEFAULT_REFRESH_TTL_SECS;
use serde::{Deserialize, Serialize};

/// リフレッシュトークンを格納するクッキー名。
pub const REFRESH_COOKIE_NAME: &str = "bro_refresh";

/// リフレッシュクッキーのパス。
pub const REFRESH_COOKIE_PATH: &str = "/";

/// SameSite 属性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    fn header_value(self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// CookieOptions はクッキーの属性を表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieOptions {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    /// 有効秒数。0 はクッキーの削除を意味する。
    pub max_age: u64,
}

impl CookieOptions {
    fn refresh(max_age: u64) -> Self {
        Self {
            http_only: true,
            secure: true,
            same_site: SameSite::Strict,
            path: REFRESH_COOKIE_PATH.to_string(),
            max_age,
        }
    }
}

/// CookieDescriptor は設定すべきクッキーの名前・値・属性を表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieDescriptor {
    pub name: String,
    pub value: String,
    pub options: CookieOptions,
}

/// `Set-Cookie` ヘッダ値として出力する。
impl std::fmt::Display for CookieDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}={}; Max-Age={}; Path={}",
            self.name, self.value, self.options.max_age, self.options.path
        )?;
        if self.options.http_only {
            f.write_str("; HttpOnly")?;
        }
        if self.options.secure {
            f.write_str("; Secure")?;
        }
        write!(f, "; SameSite={}", self.options.same_site.header_value())
    }
}

/// リフレッシュトークンを設定するクッキーをデフォルトの Max-Age（7 日）で生成する。
#[must_use]
pub fn build_refresh_cookie(token: &str) -> CookieDescriptor {
    build_refresh_cookie_with_max_age(token, DEFAULT_REFRESH_TTL_SECS)
}

/// リフレッシュトークンを設定するクッキーを指定の Max-Age で生成する。
#[must_use]
pub fn build_refresh_cookie_with_max_age(token: &str, max_age_secs: u64) -> CookieDescriptor {
    CookieDescriptor {
        name: REFRESH_COOKIE_NAME.to_string(),
        value: token.to_string(),
        options: CookieOptions::refresh(max_age_secs),
    }
}

/// リフレッシュクッキーを削除するクッキーを生成する。
///
/// 名前とパスは設定用と同一のため、クライアントのクッキーを上書きする。
#[must_use]
pub fn build_clear_refresh_cookie() -> CookieDescriptor {
    CookieDescriptor {
        name: REFRESH_COOKIE_NAME.to_string(),
        value: String::new(),
        options: CookieOptions::refresh(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let cookie = build_refresh_cookie("token-value");
        assert_eq!(cookie.name, "bro_refresh");
        assert_eq!(cookie.value, "token-value");
        assert!(cookie.options.http_only);
        assert!(cookie.options.secure);
        assert_eq!(cookie.options.same_site, SameSite::Strict);
        assert_eq!(cookie.options.path, "/");
        assert_eq!(cookie.options.max_age, 604_800);
    }

    #[test]
    fn test_refresh_cookie_custom_max_age() {
        let cookie = build_refresh_cookie_with_max_age("t", 3600);
        assert_eq!(cookie.options.max_age, 3600);
    }

    #[test]
    fn test_clear_cookie_overwrites_refresh_cookie() {
        let set = build_refresh_cookie("token-value");
        let clear = build_clear_refresh_cookie();

        assert_eq!(clear.name, set.name);
        assert_eq!(clear.options.path, set.options.path);
        assert_eq!(clear.value, "");
        assert_eq!(clear.options.max_age, 0);
        assert!(clear.options.http_only);
        assert!(clear.options.secure);
        assert_eq!(clear.options.same_site, SameSite::Strict);
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(build_refresh_cookie("t")).unwrap();
        assert_eq!(value["name"], "bro_refresh");
        assert_eq!(value["options"]["httpOnly"], true);
        assert_eq!(value["options"]["secure"], true);
        assert_eq!(value["options"]["sameSite"], "strict");
        assert_eq!(value["options"]["path"], "/");
        assert_eq!(value["options"]["maxAge"], 604_800);
    }

    #[test]
    fn test_set_cookie_header() {
        assert_eq!(
            build_refresh_cookie_with_max_age("abc.def.ghi", 60).to_string(),
            "bro_refresh=abc.def.ghi; Max-Age=60; Path=/; HttpOnly; Secure; SameSite=Strict"
        );
        assert_eq!(
            build_clear_refresh_cookie().to_string(),
            "bro_refresh=; Max-Age=0; Path=/; HttpOnly; Secure; SameSite=Strict"
        );
    }

    #[test]
    fn test_header_omits_disabled_flags() {
        let mut cookie = build_refresh_cookie_with_max_age("v", 1);
        cookie.options.http_only = false;
        cookie.options.secure = false;
        cookie.options.same_site = SameSite::Lax;
        assert_eq!(cookie.to_string(), "bro_refresh=v; Max-Age=1; Path=/; SameSite=Lax");
    }
}
