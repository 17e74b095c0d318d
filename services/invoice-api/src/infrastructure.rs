// Infrastructure layer modules
pub mod config;
pub mod invoice_repository;
pub mod logging;

// Re-exports
pub use config::{ConfigError, InvoiceStoreConfig};
pub use invoice_repository::{DynamoInvoiceRepository, InvoiceRepository, RepositoryError};
pub use logging::init_logging;
