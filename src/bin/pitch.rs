/// ピッチ生成HTTP Lambdaエントリポイント
///
/// Lambda Function URL経由のPOSTリクエストを処理し、
/// (role, focus) に対応する定型ピッチ文を返却する。
use lambda_http::{Body, Error, Request, Response, run, service_fn};
use site_api::application::PitchHandler;
use site_api::infrastructure::{StageConfig, init_logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("pitch Lambda関数を初期化");

    // Lambda関数を実行
    run(service_fn(handler)).await
}

/// HTTPリクエストハンドラー
///
/// リクエスト起因の失敗はすべて統一エンベロープのレスポンスに
/// 変換されるため、この関数が`Err`を返すことはない。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let stage = StageConfig::from_env();
    let pitch_handler = PitchHandler::new(&stage);

    Ok(pitch_handler.handle(&request))
}
