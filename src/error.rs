//! bro-auth のエラー定義。

/// AuthError はトークン発行処理で発生するエラーを表す。
///
/// 発行に失敗した場合に返せる妥当な値は存在しないため、呼び出し元へそのまま伝播する。
#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    /// 署名用シークレットが空である。
    #[error("secret must have a value")]
    EmptySecret,

    /// JWT の署名に失敗した。
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// VerificationError はトークン検証が失敗した理由を表す。
///
/// 検証 API はこの値を `VerificationResult::Invalid` に格納して返し、
/// エラーとして伝播させることはない。
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// 署名不正・期限切れ・形式不正。JWT プリミティブのメッセージをそのまま保持する。
    #[error("{0}")]
    SignatureOrFormat(String),

    /// Claims のトークン種別が検証呼び出しの期待値と一致しない。
    #[error("Invalid token type")]
    TokenTypeMismatch,

    /// Claims のフィンガープリントハッシュが現在の値と一致しない。
    #[error("Fingerprint mismatch")]
    FingerprintMismatch,
}

/// ConfigError は設定の読み込み・検証で発生するエラーを表す。
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read file: {0}")]
    ReadFile(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    /// アクセストークンとリフレッシュトークンに同一のシークレットが指定された。
    #[error("access and refresh tokens must use independent secrets")]
    SharedSecret,
}
