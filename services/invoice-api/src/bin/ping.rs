/// ヘルスチェック Lambda関数（GET /public/ping、認証なし）
use invoice_api::application::PingHandler;
use invoice_api::infrastructure::init_logging;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("ping Lambda関数を初期化");

    run(service_fn(handler)).await
}

async fn handler(_request: Request) -> Result<Response<Body>, Error> {
    debug!("pingリクエスト受信");
    Ok(PingHandler::new().handle())
}
