pub mod types;
pub mod classification;
pub mod retry;

pub use types::PagescopeError;
pub use classification::{ErrorClassification, FailureKind};
pub use retry::{RetryConfig, with_retry};
