// アプリケーション層モジュール
pub mod lookup_handler;
pub mod ping_handler;

// 再エクスポート
pub use lookup_handler::{InvoiceLookupHandler, LookupError, INTERNAL_ERROR_BODY};
pub use ping_handler::PingHandler;
