// ============================================================================
// Sources de clés publiques pour la couche d'entrée
//
// Le pipeline ne lit jamais de table globale : l'appelant choisit une
// source (saisie fixe ou échantillon aléatoire) et lui passe des valeurs.
// ============================================================================

use rand::Rng;
use crate::recovery_error::KeyRecoveryError;
use crate::rsa_recovery::r_keys::PublicKey;

// ---------------------------------------------------------------------------
// Paires (e, n) connues : n semi-premier, e inversible modulo φ(n).
// ---------------------------------------------------------------------------
pub const SAMPLE_KEYS: &[(u64, u64)] = &[
    (813283,   33582751),
    (47363,    128865743),
    (29287,    54569519),
    (709,      56440001),
    (10739591, 48588341),
    (37811,    782303),
    (19,       928639),
    (2269,     528109),
    (6113,     44801),
    (383,      626),
    (1877,     6109),
    (13903,    65591),
    (983,      7387),
    (2545861,  22915111),
    (664123,   8702927),
    (29,       9332989),
    (67,       77),
    (241,      2491),
    (11842807, 249),
    (13,       21551749),
    (2311,     15),
    (7577,     4234403),
    (3373,     1012627051),
    (431,      253301693),
    (45887,    446),
    (65537,    460584613),
];

pub trait KeySource {
    fn public_key(&mut self) -> Result<PublicKey, KeyRecoveryError>;
}

// Clé saisie par l'utilisateur
pub struct FixedKey {
    pub e: u64,
    pub n: u64,
}

impl KeySource for FixedKey {
    fn public_key(&mut self) -> Result<PublicKey, KeyRecoveryError> {
        PublicKey::new(self.e, self.n)
    }
}

// Tirage uniforme dans une table d'échantillons
pub struct SampleKeys<'a, R: Rng> {
    table: &'a [(u64, u64)],
    rng:   R,
}

impl<R: Rng> SampleKeys<'static, R> {
    pub fn new(rng: R) -> Self {
        SampleKeys { table: SAMPLE_KEYS, rng }
    }
}

#[cfg(test)]
impl<'a, R: Rng> SampleKeys<'a, R> {
    pub fn with_table(table: &'a [(u64, u64)], rng: R) -> Self {
        SampleKeys { table, rng }
    }
}

impl<R: Rng> KeySource for SampleKeys<'_, R> {
    fn public_key(&mut self) -> Result<PublicKey, KeyRecoveryError> {
        if self.table.is_empty() {
            return Err(KeyRecoveryError::InvalidInput("table d'échantillons vide".to_string()));
        }
        let (e, n) = self.table[self.rng.gen_range(0..self.table.len())];
        PublicKey::new(e, n)
    }
}
