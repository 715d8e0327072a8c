pub mod recovery_error;

pub use recovery_error::{KeyRecoveryError, parse_positive};
