use std::time::{Duration, Instant};
use serde::{Serialize, Deserialize};
use tracing::{debug, info};
use crate::recovery_error::KeyRecoveryError;
use crate::rsa_recovery::math::{mod_pow, BezoutResult};
use crate::rsa_recovery::r_config::RecoveryConfig;
use crate::rsa_recovery::r_factor::{FactorPair, recover_factors_with};
use crate::rsa_recovery::r_inverse::solve_inverse;
use crate::rsa_recovery::r_keys::{PublicKey, PrivateKey, RecoveredKey};
use crate::rsa_recovery::r_totient::compute_totient;

// ============================================================================
// Durée de chaque étape du pipeline
// ============================================================================
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTimings {
    pub totient: Duration,
    pub factors: Duration,
    pub inverse: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.totient + self.factors + self.inverse
    }
}

// ============================================================================
// Rapport complet d'une récupération réussie
//
// Contient tout ce que la couche d'affichage présente : φ(n), p et q,
// coefficients de Bézout, d, et les durées par étape. N'existe que si
// toutes les étapes ont réussi : jamais de clé partielle.
// ============================================================================
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryReport {
    pub public_key:  PublicKey,
    pub phi:         u64,
    pub factors:     FactorPair,
    pub bezout:      BezoutResult,
    pub private_key: PrivateKey,
    pub timings:     StageTimings,
}

impl RecoveryReport {
    pub fn recovered_key(&self) -> RecoveredKey {
        RecoveredKey {
            p: self.factors.p,
            q: self.factors.q,
            d: self.private_key.d,
        }
    }

    /// Chiffre m avec (e, n) puis déchiffre avec (d, n) : vrai si m revient.
    pub fn verify_round_trip(&self, m: u64) -> Result<bool, KeyRecoveryError> {
        let n = self.public_key.n;
        if m >= n {
            return Err(KeyRecoveryError::InvalidInput(format!("le message {m} doit être < n = {n}")));
        }
        let c = mod_pow(m, self.public_key.e, n);
        Ok(mod_pow(c, self.private_key.d, n) == m)
    }

    /// Comme verify_round_trip, mais un message non restitué est une erreur.
    pub fn check_round_trip(&self, m: u64) -> Result<(), KeyRecoveryError> {
        if self.verify_round_trip(m)? {
            Ok(())
        } else {
            Err(KeyRecoveryError::RoundTripMismatch { m, n: self.public_key.n })
        }
    }
}

// ---------------------------------------------------------------------------
// Point d'entrée simple : (e, n) → (p, q, d), configuration par défaut
// ---------------------------------------------------------------------------
pub fn recover_private_key(e: u64, n: u64) -> Result<RecoveredKey, KeyRecoveryError> {
    let key = PublicKey::new(e, n)?;
    recover_with_report(key, &RecoveryConfig::default()).map(|report| report.recovered_key())
}

// ============================================================================
// Orchestration du pipeline
//
//   (e, n) → φ(n) → { facteurs (n, φ) ; inverse (e, φ) } → rapport validé
//
// Les deux dernières étapes ne dépendent que de φ(n) : elles tournent en
// séquence ou, si config.parallel, via rayon::join. En cas d'échec des deux,
// l'erreur de factorisation est rapportée en premier.
// ============================================================================
pub fn recover_with_report(key: PublicKey, config: &RecoveryConfig) -> Result<RecoveryReport, KeyRecoveryError> {
    // Revalide : les champs de PublicKey sont publics
    let PublicKey { e, n } = PublicKey::new(key.e, key.n)?;

    let t = Instant::now();
    let phi = compute_totient(n);
    let totient_time = t.elapsed();
    debug!(n, phi, elapsed = ?totient_time, "φ(n) calculé");

    let factor_stage = || {
        let t = Instant::now();
        let res = recover_factors_with(n, phi, config.sqrt);
        (res, t.elapsed())
    };
    let inverse_stage = || {
        let t = Instant::now();
        let res = solve_inverse(e, phi);
        (res, t.elapsed())
    };

    let ((factors, factors_time), (inverse, inverse_time)) = if config.parallel {
        rayon::join(factor_stage, inverse_stage)
    } else {
        (factor_stage(), inverse_stage())
    };
    let factors = factors?;
    let (bezout, d) = inverse?;

    // --- Validation de l'assemblage -------------------------------------
    if u128::from(e) * u128::from(d) % u128::from(phi) != 1 % u128::from(phi) {
        return Err(KeyRecoveryError::NoInverse { e, phi, gcd: bezout.gcd });
    }

    let timings = StageTimings {
        totient: totient_time,
        factors: factors_time,
        inverse: inverse_time,
    };
    info!(e, n, p = factors.p, q = factors.q, total = ?timings.total(), "clé privée récupérée");

    Ok(RecoveryReport {
        public_key: key,
        phi,
        factors,
        bezout,
        private_key: PrivateKey { d, n },
        timings,
    })
}
