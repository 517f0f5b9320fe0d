// テレメトリシンク
//
// エンドポイント・メソッド・ステージをディメンションに持つ構造化ログと
// CloudWatch EMF形式のメトリクス出力を提供する。すべてfire-and-forget:
// 出力の失敗は警告ログに記録して握りつぶし、呼び出し元には伝播させない。

use chrono::Utc;
use serde_json::{Value, json};
use tracing::{error, info, warn};

/// メトリクスの単位（CloudWatch EMFのUnit値）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Count,
    Milliseconds,
}

impl MetricUnit {
    fn as_str(&self) -> &'static str {
        match self {
            MetricUnit::Count => "Count",
            MetricUnit::Milliseconds => "Milliseconds",
        }
    }
}

/// EMFメトリクスの名前空間
const METRIC_NAMESPACE: &str = "SiteApi";

/// エンドポイント単位のテレメトリシンク
///
/// 1リクエストのライフタイムを通じて同じ相関IDが全ログ行と
/// メトリクスディメンションに付与される。
#[derive(Debug, Clone)]
pub struct Telemetry {
    /// エンドポイントパス（例: "/pitch"）
    endpoint: &'static str,
    /// 受理するHTTPメソッド
    method: &'static str,
    /// デプロイステージ名
    stage: String,
}

impl Telemetry {
    /// エンドポイント情報でシンクを作成
    pub fn new(endpoint: &'static str, method: &'static str, stage: &str) -> Self {
        Self {
            endpoint,
            method,
            stage: stage.to_string(),
        }
    }

    /// infoレベルの構造化ログを出力
    pub fn log_info(&self, message: &str, fields: &Value, correlation_id: &str) {
        info!(
            endpoint = self.endpoint,
            method = self.method,
            stage = %self.stage,
            correlation_id = correlation_id,
            fields = %fields,
            "{message}"
        );
    }

    /// warnレベルの構造化ログを出力
    pub fn log_warn(&self, message: &str, fields: &Value, correlation_id: &str) {
        warn!(
            endpoint = self.endpoint,
            method = self.method,
            stage = %self.stage,
            correlation_id = correlation_id,
            fields = %fields,
            "{message}"
        );
    }

    /// errorレベルの構造化ログを出力
    pub fn log_error(&self, message: &str, fields: &Value, correlation_id: &str) {
        error!(
            endpoint = self.endpoint,
            method = self.method,
            stage = %self.stage,
            correlation_id = correlation_id,
            fields = %fields,
            "{message}"
        );
    }

    /// CloudWatch EMF形式のメトリクスを出力
    ///
    /// EMFはstdoutの生のJSON行を要求するため、ログレイヤーを経由せず
    /// 直接書き出す。出力に失敗しても警告ログに残すのみで、エラーは
    /// 呼び出し元に返さない。
    pub fn emit_metric(&self, name: &str, value: f64, unit: MetricUnit, correlation_id: &str) {
        let document = self.emf_document(name, value, unit, correlation_id);

        match serde_json::to_string(&document) {
            Ok(line) => {
                use std::io::Write;
                if let Err(e) = writeln!(std::io::stdout(), "{line}") {
                    warn!(error = %e, metric = name, "メトリクス出力に失敗");
                }
            }
            Err(e) => {
                warn!(error = %e, metric = name, "メトリクスのシリアライズに失敗");
            }
        }
    }

    /// EMFドキュメントを構築
    fn emf_document(&self, name: &str, value: f64, unit: MetricUnit, correlation_id: &str) -> Value {
        let mut document = json!({
            "_aws": {
                "Timestamp": Utc::now().timestamp_millis(),
                "CloudWatchMetrics": [{
                    "Namespace": METRIC_NAMESPACE,
                    "Dimensions": [["endpoint", "method", "stage"]],
                    "Metrics": [{ "Name": name, "Unit": unit.as_str() }],
                }],
            },
            "endpoint": self.endpoint,
            "method": self.method,
            "stage": self.stage,
            "correlation_id": correlation_id,
        });

        // メトリクス値はメトリクス名をキーにトップレベルへ置く（EMFの要求）
        if let Some(obj) = document.as_object_mut() {
            obj.insert(name.to_string(), json!(value));
        }

        document
    }
}
