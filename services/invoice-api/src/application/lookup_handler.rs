// 請求書照会ハンドラー
//
// GET /invoices/{id} のパスパラメータから請求書IDを取り出し、
// 請求書テーブルを1回だけ参照して、整形済みJSONまたはエラーを返す。
// 失敗は全てここでレスポンスに変換し、呼び出し元に伝播させない。

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::{InvoiceDocument, InvoiceId, InvoiceIdError, ShapeError};
use crate::infrastructure::{InvoiceRepository, RepositoryError};

/// 500レスポンスのボディ（内部エラーの詳細は含めない）
pub const INTERNAL_ERROR_BODY: &str = r#"{"message": "Internal error"}"#;

/// 400レスポンスのボディ
const BAD_REQUEST_BODY: &str = "Missing id";

/// 404レスポンスのボディ
const NOT_FOUND_BODY: &str = "Not found";

const APPLICATION_JSON: &str = "application/json";
const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// 照会処理のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    /// パスパラメータ`id`が未指定または空
    #[error("Missing id")]
    BadRequest,

    /// 該当する請求書が存在しない
    #[error("Invoice not found")]
    NotFound,

    /// ストアアクセスまたは整形中の想定外の失敗（原因はログにのみ出力）
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<InvoiceIdError> for LookupError {
    fn from(_: InvoiceIdError) -> Self {
        LookupError::BadRequest
    }
}

impl From<RepositoryError> for LookupError {
    fn from(err: RepositoryError) -> Self {
        LookupError::Internal(err.to_string())
    }
}

impl From<ShapeError> for LookupError {
    fn from(err: ShapeError) -> Self {
        LookupError::Internal(err.to_string())
    }
}

impl LookupError {
    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::BadRequest => StatusCode::BAD_REQUEST,
            LookupError::NotFound => StatusCode::NOT_FOUND,
            LookupError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// エラーレスポンスを生成
    ///
    /// - BadRequest: 400、プレーンテキスト
    /// - NotFound: 404、プレーンテキスト
    /// - Internal: 500、固定のJSONボディ（原因は含めない）
    pub fn into_response(self) -> Response<Body> {
        let (body, content_type) = match self {
            LookupError::BadRequest => (BAD_REQUEST_BODY, TEXT_PLAIN),
            LookupError::NotFound => (NOT_FOUND_BODY, TEXT_PLAIN),
            LookupError::Internal(_) => (INTERNAL_ERROR_BODY, APPLICATION_JSON),
        };
        build_response(self.status_code(), body.to_string(), content_type)
    }
}

/// 200レスポンスを生成
///
/// # 戻り値
/// * 成功時はJSONボディと`Content-Type: application/json`を持つレスポンス
/// * シリアライズ失敗時は`Err(LookupError::Internal)`
pub fn success_response(document: &InvoiceDocument) -> Result<Response<Body>, LookupError> {
    let json = document
        .to_json()
        .map_err(|e| LookupError::Internal(format!("Serialization error: {}", e)))?;
    Ok(build_response(StatusCode::OK, json, APPLICATION_JSON))
}

fn build_response(status: StatusCode, body: String, content_type: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::Text(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// 請求書照会ハンドラー
///
/// リポジトリは起動時に一度だけ構築して渡す。
/// ハンドラー自体は状態を持たず、(ID, リポジトリ) → レスポンスの純粋な変換となる。
pub struct InvoiceLookupHandler<R>
where
    R: InvoiceRepository,
{
    /// 請求書リポジトリ
    repo: R,
}

impl<R> InvoiceLookupHandler<R>
where
    R: InvoiceRepository,
{
    /// 新しいInvoiceLookupHandlerを作成
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 請求書を照会して整形する
    ///
    /// # 処理フロー
    /// 1. IDの存在チェック（空ならストアにアクセスせずBadRequest）
    /// 2. パーティションキーで1回だけ参照（再試行しない）
    /// 3. レコードが無ければNotFound
    /// 4. タグを外してtotalを数値化
    pub async fn lookup(&self, raw_id: Option<&str>) -> Result<InvoiceDocument, LookupError> {
        let id = InvoiceId::parse(raw_id)?;

        let record = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or(LookupError::NotFound)?;

        Ok(record.shape()?)
    }

    /// 請求書照会リクエストを処理してHTTPレスポンスを返す
    ///
    /// エラーは返さない。全ての失敗は400/404/500のいずれかに変換される。
    pub async fn handle(&self, raw_id: Option<&str>) -> Response<Body> {
        let result = match self.lookup(raw_id).await {
            Ok(document) => success_response(&document).map(|response| (response, document.len())),
            Err(err) => Err(err),
        };

        match result {
            Ok((response, field_count)) => {
                info!(invoice_id = ?raw_id, field_count = field_count, "請求書照会成功");
                response
            }
            Err(err) => {
                match &err {
                    LookupError::BadRequest => {
                        warn!("請求書IDが指定されていません");
                    }
                    LookupError::NotFound => {
                        info!(invoice_id = ?raw_id, "請求書が見つかりません");
                    }
                    LookupError::Internal(cause) => {
                        error!(invoice_id = ?raw_id, error = %cause, "請求書照会で内部エラー");
                    }
                }
                err.into_response()
            }
        }
    }
}
