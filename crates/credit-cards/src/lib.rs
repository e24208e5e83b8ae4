//! Credit card application intake: form validation, automated decisioning, and the
//! persistence and HTTP seams that surround it.

pub mod applications;
pub mod config;
pub mod error;
pub mod jobs;
pub mod telemetry;
