/// リード送信HTTP Lambdaエントリポイント
///
/// Lambda Function URL経由のPOSTリクエストを処理し、検証済みの
/// コンタクトフォーム入力をダウンストリームLambda URLへ転送する。
use std::sync::Arc;

use lambda_http::{Body, Error, Request, Response, run, service_fn};
use site_api::application::LeadHandler;
use site_api::infrastructure::{
    HttpLeadForwarder, LeadForward, LeadForwardConfig, StageConfig, init_logging,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("lead Lambda関数を初期化");

    // Lambda関数を実行
    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// LEAD_FORWARD_URLが未設定の場合も起動は継続し、リクエスト時に
/// 「未設定のダウンストリーム」として500を返す。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let stage = StageConfig::from_env();

    let forwarder: Option<Arc<dyn LeadForward>> = match LeadForwardConfig::from_env() {
        Ok(config) => Some(Arc::new(HttpLeadForwarder::new(&config))),
        Err(e) => {
            warn!(error = %e, "リード転送先が未設定");
            None
        }
    };

    let lead_handler = LeadHandler::new(&stage, forwarder);

    Ok(lead_handler.handle(&request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::Request as HttpRequest;
    use serial_test::serial;
    use site_api::infrastructure::init_logging;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    fn post(body: &str) -> Request {
        HttpRequest::builder()
            .method("POST")
            .uri("/lead")
            .header("Content-Type", "application/json")
            .body(Body::Text(body.to_string()))
            .unwrap()
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        let body = match response.body() {
            Body::Text(text) => text.clone(),
            Body::Binary(bytes) => String::from_utf8(bytes.clone()).unwrap(),
            Body::Empty => String::new(),
            _ => panic!("予期しないBody型"),
        };
        serde_json::from_str(&body).unwrap()
    }

    /// 転送先未設定の有効なリードは500を返す（例外は投げない）
    #[tokio::test]
    #[serial(site_env)]
    async fn test_handler_returns_500_when_unconfigured() {
        init_logging();
        unsafe {
            remove_env("LEAD_FORWARD_URL");
        }

        let body = serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "message": "I would like to discuss a project."
        });
        let response = handler(post(&body.to_string())).await.unwrap();

        assert_eq!(response.status(), 500);
        let parsed = body_json(&response);
        assert_eq!(parsed["code"], "INTERNAL_ERROR");
        assert_eq!(parsed["message"], "lead forwarding is not configured");
    }

    /// バリデーション失敗は転送設定の有無に関わらず400
    #[tokio::test]
    #[serial(site_env)]
    async fn test_handler_returns_400_for_invalid_input() {
        init_logging();
        unsafe {
            remove_env("LEAD_FORWARD_URL");
        }

        let body = serde_json::json!({ "name": "A", "email": "bad", "message": "short" });
        let response = handler(post(&body.to_string())).await.unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response)["code"], "VALIDATION_ERROR");
    }

    /// ハンドラーがGETに405を返す
    #[tokio::test]
    #[serial(site_env)]
    async fn test_handler_returns_405_for_get() {
        init_logging();

        let request = HttpRequest::builder()
            .method("GET")
            .uri("/lead")
            .body(Body::Empty)
            .unwrap();

        let response = handler(request).await.unwrap();

        assert_eq!(response.status(), 405);
        assert_eq!(body_json(&response)["code"], "METHOD_NOT_ALLOWED");
    }
}
