pub mod r_pipeline;

pub use r_pipeline::{RecoveryReport, StageTimings, recover_private_key, recover_with_report};
