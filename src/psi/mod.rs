pub mod client;
pub mod pagespeed;
pub mod score;
pub mod problems;

pub use client::AuditClient;
pub use pagespeed::PageSpeedClient;
pub use score::category_score;
pub use problems::extract_problems;
