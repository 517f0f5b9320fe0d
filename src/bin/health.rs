/// ヘルスレポートHTTP Lambdaエントリポイント
///
/// Lambda Function URL経由のGETリクエストを処理し、プロセス情報と
/// 依存先チェックを含むヘルスレポートJSONを返却する。
use std::sync::Arc;

use lambda_http::{Body, Error, Request, Response, run, service_fn};
use site_api::application::HealthHandler;
use site_api::infrastructure::{
    LambdaRuntimeMetrics, LeadForwardConfig, StageConfig, init_logging,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("health Lambda関数を初期化");

    // プロセス起動時刻を記録（uptime計測の起点）
    LambdaRuntimeMetrics::new();

    // Lambda関数を実行
    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let stage = StageConfig::from_env();
    let metrics = Arc::new(LambdaRuntimeMetrics::new());
    let lead_configured = LeadForwardConfig::from_env().is_ok();

    let health_handler = HealthHandler::new(stage, metrics, lead_configured);

    Ok(health_handler.handle(&request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http::Request as HttpRequest;
    use serial_test::serial;
    use site_api::infrastructure::init_logging;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    fn get() -> Request {
        HttpRequest::builder()
            .method("GET")
            .uri("/health")
            .body(Body::Empty)
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

    /// 転送先が設定済みなら200のhealthyレポートを返す
    #[tokio::test]
    #[serial(site_env)]
    async fn test_handler_returns_200_when_configured() {
        init_logging();
        unsafe {
            set_env("LEAD_FORWARD_URL", "https://example.com/lead");
        }

        let response = handler(get()).await.unwrap();

        assert_eq!(response.status(), 200);
        let body = body_json(&response);
        assert_eq!(body["status"], "healthy");
        assert!(body["checks"].is_array());
        assert!(body["system"].is_object());
        assert!(body["memory"].is_object());

        unsafe {
            remove_env("LEAD_FORWARD_URL");
        }
    }

    /// 転送先未設定なら503のHEALTH_CHECK_FAILEDを返す
    #[tokio::test]
    #[serial(site_env)]
    async fn test_handler_returns_503_when_dependency_missing() {
        init_logging();
        unsafe {
            remove_env("LEAD_FORWARD_URL");
        }

        let response = handler(get()).await.unwrap();

        assert_eq!(response.status(), 503);
        assert_eq!(body_json(&response)["code"], "HEALTH_CHECK_FAILED");
    }

    /// 非GETメソッドは405
    #[tokio::test]
    #[serial(site_env)]
    async fn test_handler_returns_405_for_post() {
        init_logging();

        let request = HttpRequest::builder()
            .method("POST")
            .uri("/health")
            .body(Body::Empty)
            .unwrap();

        let response = handler(request).await.unwrap();

        assert_eq!(response.status(), 405);
        assert_eq!(body_json(&response)["code"], "METHOD_NOT_ALLOWED");
    }

    /// ステージ設定が環境変数からレポートに反映される
    #[tokio::test]
    #[serial(site_env)]
    async fn test_handler_reflects_stage_env() {
        init_logging();
        unsafe {
            set_env("LEAD_FORWARD_URL", "https://example.com/lead");
            set_env("SITE_STAGE", "prod");
            set_env("SITE_ENVIRONMENT", "production");
        }

        let response = handler(get()).await.unwrap();

        let body = body_json(&response);
        assert_eq!(body["stage"], "prod");
        assert_eq!(body["environment"], "production");

        unsafe {
            remove_env("LEAD_FORWARD_URL");
            remove_env("SITE_STAGE");
            remove_env("SITE_ENVIRONMENT");
        }
    }
}
