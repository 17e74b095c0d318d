/// DynamoDBの請求書テーブルを参照する請求書リポジトリ
///
/// パーティションキー`invoiceId`による単一キー参照のみを行う。
/// 書き込み・削除は行わない。
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

use crate::domain::{InvoiceId, InvoiceRecord, TaggedValue, INVOICE_ID_FIELD};

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// JSONで表現できない属性型（バイナリ等）
    #[error("Unsupported attribute type {tag} in field {field}")]
    UnsupportedAttribute {
        /// トップレベルのフィールド名
        field: String,
        /// DynamoDBの型タグ
        tag: String,
    },
}

/// 請求書の参照用トレイト
///
/// 実際のDynamoDB実装とテスト用モックを差し替え可能にする。
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// 請求書IDでレコードを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(InvoiceRecord))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(RepositoryError)`
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<InvoiceRecord>, RepositoryError>;
}

/// InvoiceRepositoryのDynamoDB実装
///
/// クライアントは実行環境内の全呼び出しで共有される（ロック不要）。
#[derive(Debug, Clone)]
pub struct DynamoInvoiceRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// 請求書テーブル名
    table_name: String,
}

impl DynamoInvoiceRepository {
    /// 新しいDynamoInvoiceRepositoryを作成
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// テーブル名を取得
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// GetItemの結果をInvoiceRecordに変換
    fn item_to_record(
        item: HashMap<String, AttributeValue>,
    ) -> Result<InvoiceRecord, RepositoryError> {
        item.into_iter()
            .map(|(field, value)| -> Result<_, RepositoryError> {
                let tagged = to_tagged_value(&field, value)?;
                Ok((field, tagged))
            })
            .collect()
    }
}

#[async_trait]
impl InvoiceRepository for DynamoInvoiceRepository {
    async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<InvoiceRecord>, RepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(INVOICE_ID_FIELD, AttributeValue::S(id.as_str().to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(DisplayErrorContext(&e).to_string()))?;

        match output.item {
            Some(item) => {
                debug!(
                    invoice_id = %id,
                    field_count = item.len(),
                    "請求書レコードを取得"
                );
                Self::item_to_record(item).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// SDKのAttributeValueをTaggedValueに変換
///
/// 文字列セット/数値セットは要素をタグ付けしたリストとして扱う。
/// バイナリ型はJSONで表現できないためエラーとする。
fn to_tagged_value(field: &str, value: AttributeValue) -> Result<TaggedValue, RepositoryError> {
    let unsupported = |tag: &str| RepositoryError::UnsupportedAttribute {
        field: field.to_string(),
        tag: tag.to_string(),
    };

    let tagged = match value {
        AttributeValue::S(s) => TaggedValue::S(s),
        AttributeValue::N(n) => TaggedValue::N(n),
        AttributeValue::Bool(b) => TaggedValue::Bool(b),
        AttributeValue::Null(_) => TaggedValue::Null,
        AttributeValue::Ss(items) => TaggedValue::L(items.into_iter().map(TaggedValue::S).collect()),
        AttributeValue::Ns(items) => TaggedValue::L(items.into_iter().map(TaggedValue::N).collect()),
        AttributeValue::L(items) => TaggedValue::L(
            items
                .into_iter()
                .map(|item| to_tagged_value(field, item))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(entries) => TaggedValue::M(
            entries
                .into_iter()
                .map(|(name, item)| -> Result<_, RepositoryError> {
                    Ok((name, to_tagged_value(field, item)?))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()?,
        ),
        AttributeValue::B(_) => return Err(unsupported("B")),
        AttributeValue::Bs(_) => return Err(unsupported("BS")),
        _ => return Err(unsupported("UNKNOWN")),
    };

    Ok(tagged)
}
