pub mod r_config;

pub use r_config::{RecoveryConfig, SqrtStrategy};
