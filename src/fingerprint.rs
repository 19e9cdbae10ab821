//! デバイスフィンガープリントのハッシュ化。

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 ダイジェストの 16 進数表現の長さ。
pub const FINGERPRINT_HASH_LEN: usize = 64;

/// FingerprintHash は生のシグナル文字列から導出された 16 進数ダイジェストを表す。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FingerprintHash(String);

impl FingerprintHash {
    /// 16 進数文字列を返す。
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 内部の文字列を取り出す。
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for FingerprintHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FingerprintHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 生のシグナル文字列を SHA-256 でハッシュ化する。空文字列を含む任意の入力を受け付ける。
#[must_use]
pub fn hash_fingerprint(raw: &str) -> FingerprintHash {
    let digest = Sha256::digest(raw.as_bytes());
    FingerprintHash(hex::encode(digest))
}
