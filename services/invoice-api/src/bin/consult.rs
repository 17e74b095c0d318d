/// 請求書照会 Lambda関数（GET /invoices/{id}）
///
/// API Gateway（Cognitoオーソライザーで認証済み）からのリクエストを受け取り、
/// 請求書テーブルを参照して整形済みJSONを返す。
/// Lambda関数としても、ローカルスクリプトとしても実行可能。
///
/// # 環境変数
/// - TABLE_INVOICES: 請求書テーブル名（必須、ローカル実行では--tableで上書き可能）
/// - TABLE_REQUESTS / BUCKET_DOCS: 共通で注入される（照会では未使用）
/// - RUST_LOG: ログレベル（デフォルト: info）
///
/// # ローカル実行
/// ```bash
/// export TABLE_INVOICES=NfseStack-InvoicesTable
///
/// cargo run --bin consult -- --id inv-001
///
/// # テーブル指定
/// cargo run --bin consult -- --id inv-001 --table my-invoices
/// ```
use clap::Parser;
use invoice_api::application::InvoiceLookupHandler;
use invoice_api::infrastructure::{
    init_logging, DynamoInvoiceRepository, InvoiceRepository, InvoiceStoreConfig,
};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use tracing::{error, info};

/// パスパラメータ名
const ID_PATH_PARAM: &str = "id";

/// コマンドライン引数（ローカル実行用）
#[derive(Parser, Debug)]
#[command(name = "consult")]
#[command(about = "請求書テーブルから請求書を1件照会")]
struct CliArgs {
    /// 照会する請求書ID
    #[arg(long, short = 'i')]
    id: Option<String>,

    /// 請求書テーブル名（環境変数TABLE_INVOICESより優先される）
    #[arg(long, short = 't')]
    table: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    if std::env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok() {
        info!("Lambda関数として起動");
        run_lambda().await
    } else {
        info!("ローカルスクリプトとして起動");
        run_local(CliArgs::parse()).await
    }
}

/// Lambdaランタイムで実行
///
/// 設定・クライアント・ハンドラーは実行環境ごとに一度だけ構築し、
/// 全呼び出しで共有する。設定読み込みに失敗した場合は起動失敗とする。
async fn run_lambda() -> Result<(), Error> {
    let config = InvoiceStoreConfig::from_env().await.inspect_err(|err| {
        error!(error = %err, "請求書ストア設定読み込み失敗");
    })?;

    let repo = DynamoInvoiceRepository::new(
        config.client().clone(),
        config.invoices_table().to_string(),
    );
    let handler = InvoiceLookupHandler::new(repo);
    let handler = &handler;

    run(service_fn(move |request: Request| async move {
        Ok::<_, Error>(handle_request(handler, request).await)
    }))
    .await
}

/// HTTPリクエストハンドラー
///
/// パスパラメータ`id`を取り出して照会ハンドラーに渡す。
/// 失敗は全てレスポンスに変換済みのため、エラーは返さない。
async fn handle_request<R>(handler: &InvoiceLookupHandler<R>, request: Request) -> Response<Body>
where
    R: InvoiceRepository,
{
    let path_parameters = request.path_parameters();
    let invoice_id = path_parameters.first(ID_PATH_PARAM);

    handler.handle(invoice_id).await
}

/// ローカル環境で1件照会して結果を標準出力に表示
async fn run_local(args: CliArgs) -> Result<(), Error> {
    let config = InvoiceStoreConfig::from_env_with_table(args.table).await?;

    info!(table = config.invoices_table(), "照会対象テーブル");

    let repo = DynamoInvoiceRepository::new(
        config.client().clone(),
        config.invoices_table().to_string(),
    );
    let handler = InvoiceLookupHandler::new(repo);

    let response = handler.handle(args.id.as_deref()).await;
    let body = match response.body() {
        Body::Text(text) => text.clone(),
        Body::Binary(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        _ => String::new(),
    };

    println!("{}", response.status());
    println!("{}", body);

    Ok(())
}
