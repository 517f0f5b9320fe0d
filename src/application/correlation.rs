// 相関ID
//
// インバウンドヘッダーまたはクエリパラメータから相関IDを読み取り、
// 存在しなければ新規生成する。1リクエストのライフタイムを通じて
// 全ログ行・メトリクスディメンション・レスポンスヘッダーに同じIDが付く。

use lambda_http::http::header::HeaderValue;
use lambda_http::{Body, Request, RequestExt, Response};
use uuid::Uuid;

/// 相関IDを運ぶヘッダー名
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// 相関IDを運ぶクエリパラメータ名
pub const CORRELATION_QUERY_PARAM: &str = "correlation_id";

/// 1リクエスト分の相関ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// リクエストから相関IDを取り出す
    ///
    /// 優先順: `x-correlation-id`ヘッダー → `correlation_id`クエリ
    /// パラメータ → UUID v4を新規生成。
    pub fn from_request(request: &Request) -> Self {
        let from_header = request
            .headers()
            .get(CORRELATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if let Some(id) = from_header {
            return Self(id.to_string());
        }

        let params = request.query_string_parameters();
        let from_query = params
            .first(CORRELATION_QUERY_PARAM)
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if let Some(id) = from_query {
            return Self(id.to_string());
        }

        Self::generate()
    }

    /// 新しい相関IDを生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// レスポンスに相関IDヘッダーを付与する
    ///
    /// ヘッダー値として不正な文字列だった場合は付与をスキップする
    /// （リクエスト失敗にはしない）。
    pub fn apply(&self, response: &mut Response<Body>) {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            response.headers_mut().insert(CORRELATION_HEADER, value);
        }
    }
}
