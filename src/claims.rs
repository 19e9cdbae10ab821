//! フィンガープリント束縛トークンの Claims 構造体。

use serde::{Deserialize, Serialize};

/// TokenType はトークン種別を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// リクエスト単位の認可に使う短命トークン。
    Access,
    /// アクセストークンの再発行に使う長命トークン。
    Refresh,
}

impl TokenType {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }

    /// Claim 上の文字列表現から TokenType を得る。未知の値は None。
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "access" => Some(TokenType::Access),
            "refresh" => Some(TokenType::Refresh),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TokenClaims は署名付きトークンに埋め込まれる Claims を表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// ユーザーの一意識別子
    pub sub: String,

    /// 発行時のデバイスフィンガープリントハッシュ
    pub fp: String,

    /// トークン種別
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// トークンの発行時刻（Unix タイムスタンプ）
    #[serde(default)]
    pub iat: u64,

    /// トークンの有効期限（Unix タイムスタンプ）
    pub exp: u64,
}

impl TokenClaims {
    /// 発行時刻と有効秒数から Claims を生成する。
    pub fn new(
        subject: &str,
        fingerprint_hash: &str,
        token_type: TokenType,
        issued_at: u64,
        ttl_secs: u64,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            fp: fingerprint_hash.to_string(),
            token_type,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
        }
    }
}

impl std::fmt::Display for TokenClaims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // fp は束縛値のため表示しない
        write!(
            f,
            "TokenClaims{{sub={}, type={}, iat={}, exp={}}}",
            self.sub, self.token_type, self.iat, self.exp,
        )
    }
}
