// Déclaration des modules
pub mod recovery_error;
pub mod rsa_recovery;
pub mod key_management;

pub use crate::rsa_recovery::math;
pub use crate::rsa_recovery::r_totient;
pub use crate::rsa_recovery::r_factor;
pub use crate::rsa_recovery::r_inverse;
pub use crate::rsa_recovery::r_pipeline;

// Étapes du pipeline
pub use crate::rsa_recovery::r_totient::{compute_totient, totient_from_factors};
pub use crate::rsa_recovery::r_factor::{FactorPair, recover_factors, recover_factors_with};
pub use crate::rsa_recovery::r_inverse::{compute_d, solve_inverse};
pub use crate::rsa_recovery::math::{extended_euclid, BezoutResult};

// Orchestration et types
pub use crate::rsa_recovery::r_pipeline::{RecoveryReport, StageTimings, recover_private_key, recover_with_report};
pub use crate::rsa_recovery::r_keys::{PublicKey, PrivateKey, RecoveredKey};
pub use crate::rsa_recovery::r_config::{RecoveryConfig, SqrtStrategy};

// Erreur centralisée
pub use recovery_error::{KeyRecoveryError, parse_positive};
