// リード送信ハンドラー
//
// POST /lead を処理する。コンタクトフォームの入力を検証し、
// サニタイズ済みペイロードを設定されたダウンストリームLambda URLへ
// 転送する。転送は1回のみで再試行しない。ダウンストリーム未設定は
// 到達可能だがエラーを返すダウンストリームとは区別してログに残すが、
// どちらも500のINTERNAL_ERRORとして応答する。

use std::sync::Arc;
use std::time::Instant;

use lambda_http::http::Method;
use lambda_http::{Body, Request, Response};
use serde_json::json;

use crate::application::body::parse_json;
use crate::application::correlation::CorrelationId;
use crate::domain::envelope::{ErrorCode, ResponseBuilder};
use crate::domain::field_spec::{FieldRule, FieldSpec};
use crate::domain::validator::validate;
use crate::infrastructure::config::StageConfig;
use crate::infrastructure::downstream::{ForwardOutcome, LeadForward};
use crate::infrastructure::telemetry::{MetricUnit, Telemetry};

/// /leadのメソッド許可リスト
const ALLOW_METHODS: &str = "POST, OPTIONS";

/// /leadのフィールド仕様
///
/// name: トリム後2文字以上 / email: 寛容なメール形式 /
/// message: トリム後10〜1000文字（両端含む）
const LEAD_FIELDS: [FieldSpec; 3] = [
    FieldSpec::required("name", FieldRule::Length { min: 2, max: None }),
    FieldSpec::required("email", FieldRule::Email),
    FieldSpec::required(
        "message",
        FieldRule::Length {
            min: 10,
            max: Some(1000),
        },
    ),
];

/// リード送信ハンドラー
pub struct LeadHandler {
    responder: ResponseBuilder,
    telemetry: Telemetry,
    /// 転送クライアント（未設定環境ではNone）
    forwarder: Option<Arc<dyn LeadForward>>,
}

impl LeadHandler {
    /// ステージ設定と転送クライアントからハンドラーを作成
    ///
    /// `forwarder`が`None`の場合、バリデーション通過後のリクエストは
    /// 「未設定のダウンストリーム」として500で応答する。
    pub fn new(stage: &StageConfig, forwarder: Option<Arc<dyn LeadForward>>) -> Self {
        Self {
            responder: ResponseBuilder::new(ALLOW_METHODS),
            telemetry: Telemetry::new("/lead", "POST", &stage.stage),
            forwarder,
        }
    }

    /// リクエストを処理してレスポンスを生成
    ///
    /// すべての失敗は統一エンベロープに変換され、この関数から
    /// エラーが伝播することはない。
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let correlation = CorrelationId::from_request(request);
        let started = Instant::now();

        self.telemetry
            .log_info("リードリクエスト受信", &json!({}), correlation.as_str());

        let mut response = self.dispatch(request, &correlation).await;
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

    async fn dispatch(&self, request: &Request, correlation: &CorrelationId) -> Response<Body> {
        // 1. メソッドチェック
        if request.method() != Method::POST {
            self.telemetry.log_warn(
                "許可されていないメソッド",
                &json!({ "received": request.method().as_str() }),
                correlation.as_str(),
            );
            return self
                .responder
                .error(ErrorCode::MethodNotAllowed, "method not allowed");
        }

        // 2. ボディパース（失敗はINTERNAL_ERRORに畳み込む）
        let Some(body) = parse_json(request) else {
            self.telemetry.log_error(
                "リクエストボディのパースに失敗",
                &json!({}),
                correlation.as_str(),
            );
            return self
                .responder
                .error(ErrorCode::InternalError, "request could not be processed");
        };

        // 3. バリデーション
        let result = validate(&body, &LEAD_FIELDS);
        if !result.valid {
            self.telemetry.log_warn(
                "バリデーション失敗",
                &json!({ "errors": result.errors }),
                correlation.as_str(),
            );
            return self
                .responder
                .error(ErrorCode::ValidationError, &result.joined_errors());
        }

        // 4. ダウンストリームへの転送
        let Some(forwarder) = &self.forwarder else {
            // 未設定は到達不能とは別の終端状態としてログに残す
            self.telemetry.log_error(
                "リード転送先が未設定",
                &json!({ "missing": "LEAD_FORWARD_URL" }),
                correlation.as_str(),
            );
            return self
                .responder
                .error(ErrorCode::InternalError, "lead forwarding is not configured");
        };

        let payload = json!({
            "name": result.sanitized("name"),
            "email": result.sanitized("email"),
            "message": result.sanitized("message"),
            "correlation_id": correlation.as_str(),
        });

        // 5. 結果のマッピング（429はそのまま通し、その他の失敗は500）
        match forwarder.forward(&payload).await {
            Ok(ForwardOutcome::Accepted(downstream_body)) => {
                self.telemetry
                    .log_info("リード転送成功", &json!({}), correlation.as_str());
                self.responder.success(downstream_body)
            }
            Ok(ForwardOutcome::RateLimited) => {
                self.telemetry.log_warn(
                    "ダウンストリームがレート制限中",
                    &json!({}),
                    correlation.as_str(),
                );
                self.responder.error(
                    ErrorCode::RateLimitExceeded,
                    "downstream rate limit exceeded",
                )
            }
            Ok(ForwardOutcome::Failed(status)) => {
                self.telemetry.log_error(
                    "ダウンストリームがエラー応答",
                    &json!({ "status": status }),
                    correlation.as_str(),
                );
                self.responder
                    .error(ErrorCode::InternalError, "lead forwarding failed")
            }
            Err(e) => {
                self.telemetry.log_error(
                    "ダウンストリームに到達できない",
                    &json!({ "error": e.to_string() }),
                    correlation.as_str(),
                );
                self.responder
                    .error(ErrorCode::InternalError, "lead forwarding failed")
            }
        }
    }
}
