/// 請求書ID
///
/// パスパラメータ`id`から取り出した値をそのまま保持する。
/// 形式チェックは行わず、存在判定はストアに委ねる。
use std::fmt;
use thiserror::Error;

/// 請求書IDのパースエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvoiceIdError {
    /// IDが未指定または空文字列
    #[error("Missing id")]
    Missing,
}

/// 請求書テーブルのパーティションキー
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceId(String);

impl InvoiceId {
    /// パスパラメータの値からInvoiceIdを作成
    ///
    /// # 引数
    /// * `raw` - パスパラメータ`id`の値（存在しない場合はNone）
    ///
    /// # 戻り値
    /// * 空でない場合は`Ok(InvoiceId)`（トリムせずそのまま保持）
    /// * 未指定または空の場合は`Err(InvoiceIdError::Missing)`
    pub fn parse(raw: Option<&str>) -> Result<Self, InvoiceIdError> {
        match raw {
            Some(value) if !value.is_empty() => Ok(Self(value.to_string())),
            _ => Err(InvoiceIdError::Missing),
        }
    }

    /// 文字列として参照
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
