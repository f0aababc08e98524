//! Batch page-speed auditing.
//!
//! A batch is a list of URLs scored for one metric by an external page-analysis
//! service. Each URL is audited independently; results land in the batch as they
//! arrive, and failing checks are pulled out of each response as [`models::Problem`]s.

pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod psi;
pub mod reporting;
pub mod targets;
