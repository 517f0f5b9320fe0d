// リード転送クライアント
//
// バリデーション済みのリード送信をダウンストリームのLambda URLへ
// 転送するHTTPクライアント。転送は1回のみで、失敗時の再試行は行わない
// （失敗はそのままエラーレスポンスとして呼び出し元に返す）。

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::config::LeadForwardConfig;

/// リクエストタイムアウト（秒）
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 接続タイムアウト（秒）
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// 転送失敗のエラー型
///
/// ダウンストリームに到達できなかった場合のみエラーになる。
/// 到達した上でのエラーレスポンスは`ForwardOutcome`で表現する。
#[derive(Debug, Error)]
pub enum ForwardError {
    /// ネットワーク到達不能（接続失敗・タイムアウト含む）
    #[error("downstream unreachable: {0}")]
    Unreachable(String),
}

/// ダウンストリームからの応答の分類
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardOutcome {
    /// 2xx応答（ボディのJSON、JSONでない場合は受理メッセージ）
    Accepted(Value),
    /// 429応答（そのまま上流に429として通す）
    RateLimited,
    /// その他の非2xx応答
    Failed(u16),
}

/// リード転送のトレイト
///
/// 抽象化によりテスト時にモック実装を注入可能にする
#[async_trait]
pub trait LeadForward: Send + Sync {
    /// ペイロードをダウンストリームへ転送する（再試行なし）
    async fn forward(&self, payload: &Value) -> Result<ForwardOutcome, ForwardError>;
}

/// reqwestを使用した転送実装
#[derive(Clone)]
pub struct HttpLeadForwarder {
    client: Client,
    url: String,
}

impl std::fmt::Debug for HttpLeadForwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLeadForwarder")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl HttpLeadForwarder {
    /// 設定から転送クライアントを作成
    pub fn new(config: &LeadForwardConfig) -> Self {
        info!(url = config.url(), "リード転送クライアントを初期化");

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .expect("HTTPクライアントの構築に失敗");

        Self {
            client,
            url: config.url().to_string(),
        }
    }
}

#[async_trait]
impl LeadForward for HttpLeadForwarder {
    async fn forward(&self, payload: &Value) -> Result<ForwardOutcome, ForwardError> {
        debug!(url = %self.url, "リードを転送");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "リード転送リクエスト失敗");
                ForwardError::Unreachable(e.to_string())
            })?;

        let status = response.status();

        if status.is_success() {
            // ボディがJSONでなくても成功として扱う
            let body = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| json!({ "forwarded": true }));
            info!(status = %status, "リード転送成功");
            return Ok(ForwardOutcome::Accepted(body));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("ダウンストリームがレート制限中");
            return Ok(ForwardOutcome::RateLimited);
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "リード転送エラー");

        Ok(ForwardOutcome::Failed(status.as_u16()))
    }
}
