// ヘルスレポートハンドラー
//
// GET /health を処理する。ステージ設定・注入されたランタイム
// メトリクス・依存先チェックからヘルスレポートを組み立てる。
// 全チェック通過なら200でレポートを返し、1つでも不健全なら
// 503のHEALTH_CHECK_FAILEDを返す。

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use lambda_http::http::Method;
use lambda_http::{Body, Request, Response};
use serde_json::json;

use crate::application::correlation::CorrelationId;
use crate::domain::envelope::{ErrorCode, ResponseBuilder};
use crate::domain::health::{DependencyCheck, HealthReport, MemorySnapshot};
use crate::domain::pitch::{Focus, Role};
use crate::infrastructure::config::StageConfig;
use crate::infrastructure::runtime_metrics::RuntimeMetrics;
use crate::infrastructure::telemetry::{MetricUnit, Telemetry};

/// /healthのメソッド許可リスト
const ALLOW_METHODS: &str = "GET, OPTIONS";

/// ヘルスレポートハンドラー
pub struct HealthHandler {
    responder: ResponseBuilder,
    telemetry: Telemetry,
    stage: StageConfig,
    /// ランタイムメトリクスアクセサ（注入）
    metrics: Arc<dyn RuntimeMetrics>,
    /// リード転送先が設定済みかどうか（起動時に判定）
    lead_configured: bool,
}

impl HealthHandler {
    /// ステージ設定とメトリクスアクセサからハンドラーを作成
    pub fn new(stage: StageConfig, metrics: Arc<dyn RuntimeMetrics>, lead_configured: bool) -> Self {
        Self {
            // ヘルス情報はキャッシュさせない
            responder: ResponseBuilder::new(ALLOW_METHODS).no_store(),
            telemetry: Telemetry::new("/health", "GET", &stage.stage),
            stage,
            metrics,
            lead_configured,
        }
    }

    /// リクエストを処理してレスポンスを生成
    pub fn handle(&self, request: &Request) -> Response<Body> {
        let correlation = CorrelationId::from_request(request);
        let started = Instant::now();

        self.telemetry
            .log_info("ヘルスチェックリクエスト受信", &json!({}), correlation.as_str());

        let mut response = self.dispatch(request, &correlation);
        correlation.apply(&mut response);

        self.telemetry
            .emit_metric("RequestCount", 1.0, MetricUnit::Count, correlation.as_str());
        self.telemetry.emit_metric(
            "LatencyMs",
            started.elapsed().as_millis() as f64,
            MetricUnit::Milliseconds,
            correlation.as_str(),
        );

        response
    }

    fn dispatch(&self, request: &Request, correlation: &CorrelationId) -> Response<Body> {
        // 1. メソッドチェック
        if request.method() != Method::GET {
            self.telemetry.log_warn(
                "許可されていないメソッド",
                &json!({ "received": request.method().as_str() }),
                correlation.as_str(),
            );
            return self
                .responder
                .error(ErrorCode::MethodNotAllowed, "method not allowed");
        }

        // 2. レポート組み立て
        let report = self.build_report();

        // 3. 健全性に応じた応答
        if report.is_healthy() {
            self.telemetry
                .log_info("ヘルスチェック成功", &json!({}), correlation.as_str());

            let payload =
                serde_json::to_value(&report).expect("ヘルスレポートのシリアライズに失敗");
            self.responder.success(payload)
        } else {
            let failed: Vec<&str> = report
                .checks
                .iter()
                .filter(|c| !c.healthy)
                .map(|c| c.name.as_str())
                .collect();
            self.telemetry.log_error(
                "ヘルスチェック失敗",
                &json!({ "failed": failed }),
                correlation.as_str(),
            );

            self.responder.error(
                ErrorCode::HealthCheckFailed,
                "one or more dependencies are unhealthy",
            )
        }
    }

    /// 依存先チェックを実行してレポートを構築
    fn build_report(&self) -> HealthReport {
        let template_count = Role::ALL.len() * Focus::ALL.len();
        let checks = vec![
            DependencyCheck::healthy(
                "pitch_templates",
                &format!("{template_count} templates loaded"),
            ),
            if self.lead_configured {
                DependencyCheck::healthy("lead_forwarder", "configured")
            } else {
                DependencyCheck::unhealthy("lead_forwarder", "LEAD_FORWARD_URL not set")
            },
        ];

        let memory = MemorySnapshot {
            limit_mb: self.metrics.memory_limit_mb(),
            uptime_secs: self.metrics.uptime_secs(),
        };

        let mut metadata = BTreeMap::new();
        metadata.insert("runtime".to_string(), "rust".to_string());
        metadata.insert("package".to_string(), env!("CARGO_PKG_NAME").to_string());

        HealthReport::build(
            self.stage.version.clone(),
            self.stage.environment.clone(),
            self.stage.stage.clone(),
            self.stage.region.clone(),
            memory,
            checks,
            metadata,
        )
    }
}
