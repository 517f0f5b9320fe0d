// ピッチ生成ハンドラー
//
// POST /pitch を処理する。ボディの(role, focus)を検証し、
// テンプレートストアから定型ピッチ文と確信度を引いて返す。
// リクエスト間で共有する可変状態は持たない。

use std::time::Instant;

use lambda_http::http::Method;
use lambda_http::{Body, Request, Response};
use serde_json::json;

use crate::application::body::parse_json;
use crate::application::correlation::CorrelationId;
use crate::domain::envelope::{ErrorCode, ResponseBuilder};
use crate::domain::field_spec::{FieldRule, FieldSpec};
use crate::domain::pitch::{Focus, Role, template_for};
use crate::domain::validator::validate;
use crate::infrastructure::config::StageConfig;
use crate::infrastructure::telemetry::{MetricUnit, Telemetry};

/// /pitchのメソッド許可リスト
const ALLOW_METHODS: &str = "POST, OPTIONS";

/// /pitchのフィールド仕様
const PITCH_FIELDS: [FieldSpec; 2] = [
    FieldSpec::required("role", FieldRule::Enumeration(Role::ALLOWED)),
    FieldSpec::required("focus", FieldRule::Enumeration(Focus::ALLOWED)),
];

/// ピッチ生成ハンドラー
pub struct PitchHandler {
    responder: ResponseBuilder,
    telemetry: Telemetry,
}

impl PitchHandler {
    /// ステージ設定からハンドラーを作成
    pub fn new(stage: &StageConfig) -> Self {
        Self {
            responder: ResponseBuilder::new(ALLOW_METHODS),
            telemetry: Telemetry::new("/pitch", "POST", &stage.stage),
        }
    }

    /// リクエストを処理してレスポンスを生成
    ///
    /// すべての失敗は統一エンベロープに変換され、この関数から
    /// エラーが伝播することはない。
    pub fn handle(&self, request: &Request) -> Response<Body> {
        let correlation = CorrelationId::from_request(request);
        let started = Instant::now();

        self.telemetry
            .log_info("ピッチリクエスト受信", &json!({}), correlation.as_str());

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
        let result = validate(&body, &PITCH_FIELDS);
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

        // 4. 列挙型へのパース（バリデーション通過後は到達しないはずの
        //    失敗を防御的に処理する）
        let role = result.sanitized("role").and_then(Role::parse);
        let focus = result.sanitized("focus").and_then(Focus::parse);
        let (Some(role), Some(focus)) = (role, focus) else {
            self.telemetry.log_error(
                "バリデーション通過後の列挙値パース失敗",
                &json!({}),
                correlation.as_str(),
            );
            return self.responder.error(
                ErrorCode::InvalidCombination,
                "unsupported role and focus combination",
            );
        };

        // 5. テンプレートルックアップと成功レスポンス
        let template = template_for(role, focus);

        self.telemetry.log_info(
            "ピッチ生成成功",
            &json!({ "role": role.as_str(), "focus": focus.as_str() }),
            correlation.as_str(),
        );

        self.responder.success(json!({
            "success": true,
            "pitch": template.text,
            "confidence": template.confidence,
            "role": role.as_str(),
            "focus": focus.as_str(),
        }))
    }
}
