//! Offline jobs that drive the application service in bulk.

pub mod batch;

pub use batch::{run_batch, BatchError, BatchSummary, RowRejection, BATCH_JOB_STARTED};
