pub mod r_keys;

pub use r_keys::{PublicKey, PrivateKey, RecoveredKey};
