// レスポンスエンベロープビルダー
//
// 成功・失敗を問わず全レスポンスを統一されたJSON形状に包む。
// 各エンベロープ種別からHTTPステータスコードは一意に導出され、
// 全レスポンスにCORSヘッダーとレスポンス構築時点のISO-8601
// タイムスタンプが付与される。

use chrono::{SecondsFormat, Utc};
use lambda_http::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue,
};
use lambda_http::{Body, Response};
use serde_json::{Value, json};

/// エラーレスポンスの分類コード
///
/// 各コードは正確に1つのHTTPステータスに対応する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// 入力バリデーション失敗（400）
    ValidationError,
    /// 許可されていないHTTPメソッド（405）
    MethodNotAllowed,
    /// ダウンストリームのレート制限をそのまま通す（429）
    RateLimitExceeded,
    /// 想定外の失敗全般（500）
    InternalError,
    /// 依存先が不健全（503）
    HealthCheckFailed,
    /// バリデーション通過後の列挙値パース失敗（400、防御的経路）
    InvalidCombination,
}

impl ErrorCode {
    /// レスポンスボディの`code`フィールド値
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ErrorCode::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::HealthCheckFailed => "HEALTH_CHECK_FAILED",
            ErrorCode::InvalidCombination => "INVALID_COMBINATION",
        }
    }

    /// コードに対応するHTTPステータス
    pub fn status(&self) -> u16 {
        match self {
            ErrorCode::ValidationError => 400,
            ErrorCode::InvalidCombination => 400,
            ErrorCode::MethodNotAllowed => 405,
            ErrorCode::RateLimitExceeded => 429,
            ErrorCode::InternalError => 500,
            ErrorCode::HealthCheckFailed => 503,
        }
    }
}

/// エンドポイントごとのレスポンスビルダー
///
/// メソッド許可リストとキャッシュ方針を保持し、成功・失敗の
/// エンベロープを統一形状で構築する。
#[derive(Debug, Clone, Copy)]
pub struct ResponseBuilder {
    /// Access-Control-Allow-Methodsに設定する許可リスト
    allow_methods: &'static str,
    /// 成功レスポンスにno-cacheディレクティブを付けるか
    no_store: bool,
}

impl ResponseBuilder {
    /// 指定したメソッド許可リストでビルダーを作成
    pub const fn new(allow_methods: &'static str) -> Self {
        Self {
            allow_methods,
            no_store: false,
        }
    }

    /// 成功レスポンスにキャッシュ抑止ヘッダーを付与する
    pub const fn no_store(mut self) -> Self {
        self.no_store = true;
        self
    }

    /// 成功エンベロープ（200）を構築
    ///
    /// ペイロードのトップレベルに構築時点の`timestamp`を挿入する。
    /// ペイロードがオブジェクトでない場合は`{"data": payload}`に包む。
    pub fn success(&self, payload: Value) -> Response<Body> {
        let mut body = match payload {
            Value::Object(map) => Value::Object(map),
            other => json!({ "data": other }),
        };
        if let Some(obj) = body.as_object_mut() {
            obj.insert("timestamp".to_string(), json!(iso_timestamp()));
        }
        self.build(200, &body, self.no_store)
    }

    /// エラーエンベロープを構築
    ///
    /// ボディ形状は `{error: true, message, code, timestamp}` で固定。
    /// スタックトレースや内部例外文字列は含めない。
    pub fn error(&self, code: ErrorCode, message: &str) -> Response<Body> {
        let body = json!({
            "error": true,
            "message": message,
            "code": code.as_str(),
            "timestamp": iso_timestamp(),
        });
        self.build(code.status(), &body, false)
    }

    fn build(&self, status: u16, body: &Value, no_store: bool) -> Response<Body> {
        let json = serde_json::to_string(body).expect("エンベロープのシリアライズに失敗");

        let mut response = Response::builder()
            .status(status)
            .body(Body::Text(json))
            .expect("レスポンスの構築に失敗");

        *response.headers_mut() = self.headers(no_store);

        response
    }

    /// CORSヘッダーを生成
    fn headers(&self, no_store: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(self.allow_methods),
        );

        if no_store {
            headers.insert(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store, no-cache"),
            );
        }

        headers
    }
}

/// レスポンス構築時点のISO-8601タイムスタンプ（UTC、ミリ秒精度）
fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
