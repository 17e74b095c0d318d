// ヘルスチェックハンドラー
//
// GET /public/ping（認証なし）に応答する。ストアにはアクセスしない。

use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;

/// pingレスポンスのボディ
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PingBody {
    pub status: &'static str,
    pub version: &'static str,
}

/// ヘルスチェックハンドラー
#[derive(Debug, Clone, Copy, Default)]
pub struct PingHandler;

impl PingHandler {
    pub fn new() -> Self {
        Self
    }

    /// 固定のpingボディ
    pub fn body() -> PingBody {
        PingBody {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// 200 OKとJSONボディを返す
    pub fn handle(&self) -> Response<Body> {
        // 固定の文字列フィールドのみのためシリアライズは失敗しない
        let json = serde_json::to_string(&Self::body()).unwrap_or_default();

        let mut response = Response::new(Body::Text(json));
        *response.status_mut() = StatusCode::OK;
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
