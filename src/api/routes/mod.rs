pub mod health;
pub mod metrics;
pub mod batches;
pub mod reports;
