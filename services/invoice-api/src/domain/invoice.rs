/// 請求書レコードと整形済みドキュメント
///
/// ストアから取得したタグ付きレコードを、フィールド名 → 生値の
/// フラットなJSONマッピングへ変換する。
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use thiserror::Error;

use super::TaggedValue;

/// 数値変換の対象となるフィールド名
pub const TOTAL_FIELD: &str = "total";

/// パーティションキーのフィールド名
pub const INVOICE_ID_FIELD: &str = "invoiceId";

/// 整形処理のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShapeError {
    /// totalが有限の浮動小数点数に変換できない
    #[error("total is not a finite number (tag {tag}): {raw}")]
    InvalidTotal {
        /// 格納されていた型タグ
        tag: &'static str,
        /// タグを外した生値のテキスト表現
        raw: String,
    },
}

/// ストアに格納された請求書レコード
///
/// 各フィールドは型タグ付きの値として保持される。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceRecord {
    fields: BTreeMap<String, TaggedValue>,
}

impl InvoiceRecord {
    /// フィールドのマップからレコードを作成
    pub fn new(fields: BTreeMap<String, TaggedValue>) -> Self {
        Self { fields }
    }

    /// フィールドを取得
    pub fn get(&self, name: &str) -> Option<&TaggedValue> {
        self.fields.get(name)
    }

    /// フィールド数
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// フィールドが空かどうか
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// タグを外してフラットなドキュメントに整形
    ///
    /// # 処理フロー
    /// 1. 全フィールドの型タグを外し、生値のみを残す
    /// 2. `total`が存在する場合のみ、生のテキストを浮動小数点数に変換する
    ///
    /// # 戻り値
    /// * 成功時は`Ok(InvoiceDocument)`（全フィールド名を保持）
    /// * `total`が数値に変換できない場合は`Err(ShapeError::InvalidTotal)`
    pub fn shape(self) -> Result<InvoiceDocument, ShapeError> {
        let mut document = Map::with_capacity(self.fields.len());

        for (name, value) in self.fields {
            let raw = if name == TOTAL_FIELD {
                Value::Number(parse_total(&value)?)
            } else {
                value.untag()
            };
            document.insert(name, raw);
        }

        Ok(InvoiceDocument(document))
    }
}

impl FromIterator<(String, TaggedValue)> for InvoiceRecord {
    fn from_iter<I: IntoIterator<Item = (String, TaggedValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// totalの生テキストを有限のf64に変換
fn parse_total(value: &TaggedValue) -> Result<Number, ShapeError> {
    let invalid = || ShapeError::InvalidTotal {
        tag: value.tag(),
        raw: value.untag().to_string(),
    };

    let text = value.as_number_text().ok_or_else(invalid)?;
    let parsed = text.trim().parse::<f64>().map_err(|_| invalid())?;

    // NaN/無限大はJSONで表現できない
    Number::from_f64(parsed).ok_or_else(invalid)
}

/// 整形済みの請求書ドキュメント
///
/// フィールド名 → 生値のフラットなJSONオブジェクトとしてシリアライズされる。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InvoiceDocument(Map<String, Value>);

impl InvoiceDocument {
    /// フィールドを取得
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// フィールド数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// フィールドが空かどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// フィールド名の一覧
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// JSON文字列にシリアライズ
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    /// 内部のJSONマップを取り出す
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}
