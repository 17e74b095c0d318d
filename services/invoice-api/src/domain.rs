// Domain layer modules
pub mod invoice;
pub mod invoice_id;
pub mod tagged_value;

// Re-exports
pub use invoice::{InvoiceDocument, InvoiceRecord, ShapeError, INVOICE_ID_FIELD, TOTAL_FIELD};
pub use invoice_id::{InvoiceId, InvoiceIdError};
pub use tagged_value::TaggedValue;
