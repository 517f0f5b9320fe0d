// 環境変数ベースの設定
//
// デプロイステージ情報とリード転送先URLを環境変数から読み込み、
// 型安全に提供するインフラストラクチャ層コンポーネント。

use thiserror::Error;

/// 設定読み込みのエラー型
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// デプロイステージ情報
///
/// ヘルスレポートとテレメトリのディメンションに使用する。
/// 未設定の環境変数にはデフォルト値を適用するため、読み込みは失敗しない。
#[derive(Debug, Clone)]
pub struct StageConfig {
    /// デプロイステージ名 (SITE_STAGE環境変数、デフォルト: dev)
    pub stage: String,
    /// 環境名 (SITE_ENVIRONMENT環境変数、デフォルト: development)
    pub environment: String,
    /// AWSリージョン (AWS_REGION環境変数、デフォルト: unknown)
    pub region: String,
    /// クレートバージョン（Cargo.tomlから）
    pub version: String,
}

impl StageConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> Self {
        let get_or = |key: &str, default: &str| -> String {
            std::env::var(key)
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            stage: get_or("SITE_STAGE", "dev"),
            environment: get_or("SITE_ENVIRONMENT", "development"),
            region: get_or("AWS_REGION", "unknown"),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 明示的な値で作成（テスト用）
    pub fn new(stage: &str, environment: &str, region: &str) -> Self {
        Self {
            stage: stage.to_string(),
            environment: environment.to_string(),
            region: region.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// リード転送先の設定
///
/// 転送先URLは必須。未設定の場合はエラーを返し、ハンドラー側で
/// 「未設定のダウンストリーム」として500レスポンスに変換される
/// （例外として伝播させない）。
#[derive(Debug, Clone)]
pub struct LeadForwardConfig {
    /// 転送先Lambda URL (LEAD_FORWARD_URL環境変数)
    url: String,
}

impl LeadForwardConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("LEAD_FORWARD_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("LEAD_FORWARD_URL".to_string()))?;

        Ok(Self { url })
    }

    /// 明示的な値で作成（テスト用）
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    /// 転送先URLを取得
    pub fn url(&self) -> &str {
        &self.url
    }
}
