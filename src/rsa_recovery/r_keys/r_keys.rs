use serde::{Serialize, Deserialize};
use zeroize::Zeroize;
use crate::recovery_error::KeyRecoveryError;

// ============================================================================
// Clé publique RSA (e, n) — pas de données secrètes
// ============================================================================
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub e: u64,
    pub n: u64,
}

impl PublicKey {
    /// Construit une clé publique en rejetant e = 0 ou n = 0.
    /// La nature semi-première de n est vérifiée plus tard, pas supposée.
    pub fn new(e: u64, n: u64) -> Result<Self, KeyRecoveryError> {
        if n == 0 {
            return Err(KeyRecoveryError::InvalidInput("le module n doit être non nul".to_string()));
        }
        if e == 0 {
            return Err(KeyRecoveryError::InvalidInput("l'exposant e doit être non nul".to_string()));
        }
        Ok(PublicKey { e, n })
    }
}

// ============================================================================
// Clé privée RSA (d, n) — d ZEROISÉ À LA DESTRUCTION
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    pub d: u64,
    pub n: u64,
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.d.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// ============================================================================
// Résultat exposé à l'appelant : facteurs et exposant privé
// ============================================================================
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveredKey {
    pub p: u64,
    pub q: u64,
    pub d: u64,
}
