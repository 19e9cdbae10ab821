//! ブラウザ環境シグナルからのデバイスフィンガープリント収集。
//!
//! シグナルの実際の取得（navigator / screen / canvas / WebGL）は [`EnvironmentProbe`]
//! の実装側が担う。取得に失敗したシグナルは収集全体を中断せず、名前付きの代替値に置き換える。

use crate::fingerprint::{hash_fingerprint, FingerprintHash};
use serde::{Deserialize, Serialize};

/// canvas を取得できない場合の代替値。
pub const NO_CANVAS: &str = "no-canvas";

/// WebGL コンテキストを取得できない場合の代替値。
pub const NO_WEBGL: &str = "no-webgl";

/// WebGL のレンダラー情報拡張が無い場合の代替値。
pub const NO_RENDERER: &str = "no-renderer";

/// CPU コア数・デバイスメモリが取得できない場合の代替値。
pub const UNKNOWN: &str = "unknown";

/// シグナル値の区切り文字。
pub const COMPONENT_SEPARATOR: &str = "|";

/// canvas 描画に使用する識別テキスト。
pub const CANVAS_MARKER_TEXT: &str = "bro-auth-fingerprint";

/// GpuProbe は WebGL レンダラー取得の結果を表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuProbe {
    /// アンマスクされたレンダラー名。
    Renderer(String),
    /// WebGL は利用可能だがデバッグ情報拡張が無い。
    NoDebugInfo,
    /// WebGL コンテキストを取得できない、または取得中に失敗した。
    Unavailable,
}

impl GpuProbe {
    fn into_component(self) -> String {
        match self {
            GpuProbe::Renderer(name) => name,
            GpuProbe::NoDebugInfo => NO_RENDERER.to_string(),
            GpuProbe::Unavailable => NO_WEBGL.to_string(),
        }
    }
}

/// EnvironmentProbe はブラウザ環境シグナルの取得を抽象化するトレイト。
#[async_trait::async_trait]
pub trait EnvironmentProbe: Send + Sync {
    fn user_agent(&self) -> String;
    fn platform(&self) -> String;
    fn language(&self) -> String;
    fn languages(&self) -> Vec<String>;
    /// 画面の (幅, 高さ)。
    fn screen_size(&self) -> (u32, u32);
    fn color_depth(&self) -> u32;
    /// IANA タイムゾーン名。
    fn timezone(&self) -> String;
    /// UTC からのオフセット（分）。
    fn timezone_offset_minutes(&self) -> i32;
    fn hardware_concurrency(&self) -> Option<u32>;
    /// デバイスメモリ（GiB）。
    fn device_memory_gb(&self) -> Option<f64>;
    fn gpu(&self) -> GpuProbe;
    /// [`CANVAS_MARKER_TEXT`] を描画した canvas の data URL。取得できない場合は None。
    async fn canvas_data_url(&self) -> Option<String>;
}

/// FingerprintComponents は収集したシグナルを文字列化したものを表す。
///
/// フィールドの宣言順がハッシュ入力での連結順になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintComponents {
    pub user_agent: String,
    pub platform: String,
    pub language: String,
    pub languages: String,
    pub screen: String,
    pub color_depth: String,
    pub timezone: String,
    pub timezone_offset: String,
    pub cpu_cores: String,
    pub device_memory: String,
    pub gpu: String,
    pub canvas: String,
}

impl FingerprintComponents {
    /// シグナル値を連結順に返す。
    pub fn ordered_values(&self) -> [&str; 12] {
        [
            self.user_agent.as_str(),
            self.platform.as_str(),
            self.language.as_str(),
            self.languages.as_str(),
            self.screen.as_str(),
            self.color_depth.as_str(),
            self.timezone.as_str(),
            self.timezone_offset.as_str(),
            self.cpu_cores.as_str(),
            self.device_memory.as_str(),
            self.gpu.as_str(),
            self.canvas.as_str(),
        ]
    }

    /// ハッシュ入力となる生文字列を返す。
    pub fn raw_string(&self) -> String {
        self.ordered_values().join(COMPONENT_SEPARATOR)
    }

    /// 生文字列のフィンガープリントハッシュを返す。
    ///
    /// クライアントから送られたシグナル一式からサーバー側でハッシュを再計算する際にも使う。
    pub fn hash(&self) -> FingerprintHash {
        hash_fingerprint(&self.raw_string())
    }
}

/// BrowserFingerprint は収集結果を表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserFingerprint {
    pub raw: String,
    pub hash: FingerprintHash,
    pub components: FingerprintComponents,
}

fn optional_component<T: ToString>(value: Option<T>, is_present: impl Fn(&T) -> bool) -> String {
    match value {
        Some(v) if is_present(&v) => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// 環境シグナルを収集し、連結・ハッシュ化する。
pub async fn collect_fingerprint(probe: &dyn EnvironmentProbe) -> BrowserFingerprint {
    let (width, height) = probe.screen_size();
    let gpu = probe.gpu().into_component();
    let canvas = probe.canvas_data_url().await.unwrap_or_else(|| {
        tracing::debug!("canvas を取得できないため代替値を使用します");
        NO_CANVAS.to_string()
    });

    let components = FingerprintComponents {
        user_agent: probe.user_agent(),
        platform: probe.platform(),
        language: probe.language(),
        languages: probe.languages().join(","),
        screen: format!("{width}x{height}"),
        color_depth: probe.color_depth().to_string(),
        timezone: probe.timezone(),
        timezone_offset: probe.timezone_offset_minutes().to_string(),
        cpu_cores: optional_component(probe.hardware_concurrency(), |n| *n != 0),
        device_memory: optional_component(probe.device_memory_gb(), |gb| *gb != 0.0),
        gpu,
        canvas,
    };

    let raw = components.raw_string();
    let hash = hash_fingerprint(&raw);

    BrowserFingerprint {
        raw,
        hash,
        components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockProbe {
        gpu: GpuProbe,
        canvas: Option<String>,
        cores: Option<u32>,
        memory: Option<f64>,
    }

    impl Default for MockProbe {
        fn default() -> Self {
            Self {
                gpu: GpuProbe::Renderer("ANGLE (Intel UHD Graphics 620)".into()),
                canvas: Some("data:image/png;base64,iVBORw0KGgo".into()),
                cores: Some(8),
                memory: Some(8.0),
            }
        }
    }

    #[async_trait::async_trait]
    impl EnvironmentProbe for MockProbe {
        fn user_agent(&self) -> String {
            "Mozilla/5.0 (X11; Linux x86_64)".into()
        }
        fn platform(&self) -> String {
            "Linux x86_64".into()
        }
        fn language(&self) -> String {
            "ja-JP".into()
        }
        fn languages(&self) -> Vec<String> {
            vec!["ja-JP".into(), "en-US".into()]
        }
        fn screen_size(&self) -> (u32, u32) {
            (1920, 1080)
        }
        fn color_depth(&self) -> u32 {
            24
        }
        fn timezone(&self) -> String {
            "Asia/Tokyo".into()
        }
        fn timezone_offset_minutes(&self) -> i32 {
            -540
        }
        fn hardware_concurrency(&self) -> Option<u32> {
            self.cores
        }
        fn device_memory_gb(&self) -> Option<f64> {
            self.memory
        }
        fn gpu(&self) -> GpuProbe {
            self.gpu.clone()
        }
        async fn canvas_data_url(&self) -> Option<String> {
            self.canvas.clone()
        }
    }

    #[tokio::test]
    async fn test_collect_all_signals() {
        let fp = collect_fingerprint(&MockProbe::default()).await;

        assert_eq!(
            fp.raw,
            "Mozilla/5.0 (X11; Linux x86_64)|Linux x86_64|ja-JP|ja-JP,en-US|1920x1080|24|\
             Asia/Tokyo|-540|8|8|ANGLE (Intel UHD Graphics 620)|data:image/png;base64,iVBORw0KGgo"
        );
        assert_eq!(fp.hash, hash_fingerprint(&fp.raw));
        assert_eq!(fp.components.screen, "1920x1080");
    }

    #[tokio::test]
    async fn test_collect_is_deterministic() {
        let a = collect_fingerprint(&MockProbe::default()).await;
        let b = collect_fingerprint(&MockProbe::default()).await;
        assert_eq!(a.hash, b.hash);
    }

    #[tokio::test]
    async fn test_degrades_to_sentinels() {
        let probe = MockProbe {
            gpu: GpuProbe::Unavailable,
            canvas: None,
            cores: None,
            memory: None,
        };
        let fp = collect_fingerprint(&probe).await;

        assert_eq!(fp.components.gpu, NO_WEBGL);
        assert_eq!(fp.components.canvas, NO_CANVAS);
        assert_eq!(fp.components.cpu_cores, UNKNOWN);
        assert_eq!(fp.components.device_memory, UNKNOWN);
        // 残りのシグナルは収集される
        assert_eq!(fp.components.timezone, "Asia/Tokyo");
        assert!(fp.raw.ends_with("|unknown|unknown|no-webgl|no-canvas"));
    }

    #[tokio::test]
    async fn test_missing_renderer_extension() {
        let probe = MockProbe {
            gpu: GpuProbe::NoDebugInfo,
            ..MockProbe::default()
        };
        let fp = collect_fingerprint(&probe).await;
        assert_eq!(fp.components.gpu, NO_RENDERER);
    }

    #[tokio::test]
    async fn test_zero_hardware_values_are_unknown() {
        let probe = MockProbe {
            cores: Some(0),
            memory: Some(0.0),
            ..MockProbe::default()
        };
        let fp = collect_fingerprint(&probe).await;
        assert_eq!(fp.components.cpu_cores, UNKNOWN);
        assert_eq!(fp.components.device_memory, UNKNOWN);
    }

    #[tokio::test]
    async fn test_fractional_device_memory() {
        let probe = MockProbe {
            memory: Some(0.5),
            ..MockProbe::default()
        };
        let fp = collect_fingerprint(&probe).await;
        assert_eq!(fp.components.device_memory, "0.5");
    }

    #[tokio::test]
    async fn test_server_recomputes_hash_from_components() {
        let fp = collect_fingerprint(&MockProbe::default()).await;

        let json = serde_json::to_string(&fp.components).unwrap();
        assert!(json.contains("\"userAgent\""));
        assert!(json.contains("\"timezoneOffset\""));

        let received: FingerprintComponents = serde_json::from_str(&json).unwrap();
        assert_eq!(received.hash(), fp.hash);
    }
}
