/// 請求書ストア（DynamoDB）接続設定
///
/// 実行環境の起動時に一度だけ解決し、ハンドラーの構築時に明示的に渡す。
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;
use tracing::info;

/// 請求書テーブル名の環境変数
pub const TABLE_INVOICES_ENV: &str = "TABLE_INVOICES";

/// リクエストテーブル名の環境変数（発行Lambda用、照会では未使用）
pub const TABLE_REQUESTS_ENV: &str = "TABLE_REQUESTS";

/// ドキュメント（XML/PDF）バケット名の環境変数（照会では未使用）
pub const BUCKET_DOCS_ENV: &str = "BUCKET_DOCS";

/// 設定読み込みのエラー型
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// 請求書テーブル名とクライアントを持つ設定
///
/// デプロイ時に全関数へ共通で注入される環境変数:
/// - TABLE_INVOICES: 請求書テーブル（必須）
/// - TABLE_REQUESTS: 発行リクエストテーブル（任意）
/// - BUCKET_DOCS: ドキュメントバケット（任意）
#[derive(Debug, Clone)]
pub struct InvoiceStoreConfig {
    client: DynamoDbClient,
    invoices_table: String,
    requests_table: Option<String>,
    docs_bucket: Option<String>,
}

impl InvoiceStoreConfig {
    /// 環境からAWS設定とテーブル名を読み込む
    pub async fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_table(None).await
    }

    /// 環境から読み込み、請求書テーブル名のみ明示的に上書きする
    ///
    /// `invoices_table`が`Some`の場合はTABLE_INVOICESを参照しない
    /// （ローカル実行でテーブルを指定する場合に使用）。
    pub async fn from_env_with_table(invoices_table: Option<String>) -> Result<Self, ConfigError> {
        let invoices_table = match invoices_table {
            Some(table) => table,
            None => required_env(TABLE_INVOICES_ENV)?,
        };
        let requests_table = optional_env(TABLE_REQUESTS_ENV);
        let docs_bucket = optional_env(BUCKET_DOCS_ENV);

        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = DynamoDbClient::new(&aws_config);

        info!(
            invoices_table = %invoices_table,
            requests_table = ?requests_table,
            docs_bucket = ?docs_bucket,
            "請求書ストア設定を読み込み"
        );

        Ok(Self {
            client,
            invoices_table,
            requests_table,
            docs_bucket,
        })
    }

    /// 明示的な値で作成（テスト用）
    pub fn new(client: DynamoDbClient, invoices_table: String) -> Self {
        Self {
            client,
            invoices_table,
            requests_table: None,
            docs_bucket: None,
        }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// 請求書テーブル名を取得
    pub fn invoices_table(&self) -> &str {
        &self.invoices_table
    }

    /// リクエストテーブル名を取得
    pub fn requests_table(&self) -> Option<&str> {
        self.requests_table.as_deref()
    }

    /// ドキュメントバケット名を取得
    pub fn docs_bucket(&self) -> Option<&str> {
        self.docs_bucket.as_deref()
    }
}

/// 必須の環境変数を読み込む（空文字列は未設定扱い）
fn required_env(name: &str) -> Result<String, ConfigError> {
    optional_env(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// 任意の環境変数を読み込む（空文字列は未設定扱い）
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    unsafe fn cleanup_store_env() {
        unsafe {
            remove_env(TABLE_INVOICES_ENV);
            remove_env(TABLE_REQUESTS_ENV);
            remove_env(BUCKET_DOCS_ENV);
        }
    }

    /// ネットワークに接続しないテスト用クライアント
    fn offline_client() -> DynamoDbClient {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        DynamoDbClient::from_conf(config)
    }

    #[test]
    fn test_missing_env_var_error_display() {
        let error = ConfigError::MissingEnvVar(TABLE_INVOICES_ENV.to_string());
        assert_eq!(error.to_string(), "Missing environment variable: TABLE_INVOICES");
    }

    #[test]
    fn test_new_sets_table_and_leaves_optionals_empty() {
        let config = InvoiceStoreConfig::new(offline_client(), "invoices-test".to_string());

        assert_eq!(config.invoices_table(), "invoices-test");
        assert!(config.requests_table().is_none());
        assert!(config.docs_bucket().is_none());
        let _client_ref = config.client();
    }

    #[test]
    #[serial(store_env)]
    fn test_required_env_missing() {
        unsafe { cleanup_store_env() };

        assert_eq!(
            required_env(TABLE_INVOICES_ENV),
            Err(ConfigError::MissingEnvVar("TABLE_INVOICES".to_string()))
        );
    }

    #[test]
    #[serial(store_env)]
    fn test_required_env_empty_is_missing() {
        unsafe {
            cleanup_store_env();
            set_env(TABLE_INVOICES_ENV, "");
        }

        assert!(required_env(TABLE_INVOICES_ENV).is_err());

        unsafe { cleanup_store_env() };
    }

    #[tokio::test]
    #[serial(store_env)]
    async fn test_from_env_missing_invoices_table() {
        unsafe {
            cleanup_store_env();
            set_env(TABLE_REQUESTS_ENV, "requests");
        }

        let result = InvoiceStoreConfig::from_env().await;
        match result {
            Err(ConfigError::MissingEnvVar(var)) => assert_eq!(var, "TABLE_INVOICES"),
            Ok(_) => panic!("TABLE_INVOICES未設定ではエラーになるべき"),
        }

        unsafe { cleanup_store_env() };
    }

    #[tokio::test]
    #[serial(store_env)]
    async fn test_from_env_reads_all_names() {
        unsafe {
            cleanup_store_env();
            set_env(TABLE_INVOICES_ENV, "nfse-invoices");
            set_env(TABLE_REQUESTS_ENV, "nfse-requests");
            set_env(BUCKET_DOCS_ENV, "nfse-docs");
        }

        let config = InvoiceStoreConfig::from_env().await.unwrap();

        assert_eq!(config.invoices_table(), "nfse-invoices");
        assert_eq!(config.requests_table(), Some("nfse-requests"));
        assert_eq!(config.docs_bucket(), Some("nfse-docs"));

        unsafe { cleanup_store_env() };
    }

    /// 明示的なテーブル名はTABLE_INVOICESより優先される
    #[tokio::test]
    #[serial(store_env)]
    async fn test_from_env_with_table_override() {
        unsafe { cleanup_store_env() };

        let config = InvoiceStoreConfig::from_env_with_table(Some("local-invoices".to_string()))
            .await
            .unwrap();

        assert_eq!(config.invoices_table(), "local-invoices");
        assert!(config.requests_table().is_none());
    }
}
