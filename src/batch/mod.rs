pub mod runner;
pub mod state;
pub mod dashboard;
pub mod events;

pub use runner::{BatchAuditRunner, audit_target};
pub use state::{ApplyResult, BatchSnapshot, BatchState};
pub use dashboard::Dashboard;
pub use events::BatchEvent;
