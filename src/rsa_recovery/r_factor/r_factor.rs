use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;
use serde::{Serialize, Deserialize};
use tracing::{debug, warn};
use crate::recovery_error::KeyRecoveryError;
use crate::rsa_recovery::math::exact_sqrt;
use crate::rsa_recovery::r_config::SqrtStrategy;

// ============================================================================
// Paire de facteurs premiers de n, non ordonnée au sens mathématique.
// Stockée avec p = racine « + » et q = racine « - » (donc p > q).
// ============================================================================
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorPair {
    pub p: u64,
    pub q: u64,
}

impl FactorPair {
    pub fn product(&self) -> Option<u64> {
        self.p.checked_mul(self.q)
    }

    #[cfg(test)]
    pub fn contains(&self, x: u64) -> bool {
        self.p == x || self.q == x
    }
}

// Stratégie par défaut : racine f64 tronquée
pub fn recover_factors(n: u64, phi: u64) -> Result<FactorPair, KeyRecoveryError> {
    recover_factors_with(n, phi, SqrtStrategy::Float64)
}

// ============================================================================
// Récupération de p et q à partir de n et φ(n)
//
//   φ(n) = (p-1)(q-1) = n - (p+q) + 1   →   p + q = n - φ(n) + 1 = b
//   p·q  = n
// p et q sont les racines de x² - b·x + n = 0 :
//   p, q = (b ± √(b² - 4n)) / 2
//
// Postcondition : p·q == n exactement, p != q, q > 1.
// Tout échec (discriminant négatif, racine non entière, produit faux) est
// signalé par InvalidModulus : n n'est pas le produit de deux premiers
// distincts. Le cas p = q (n = p²) est rejeté ; avec le vrai φ(p²) = p(p-1)
// le discriminant est d'ailleurs toujours négatif.
// ============================================================================
pub fn recover_factors_with(n: u64, phi: u64, strategy: SqrtStrategy) -> Result<FactorPair, KeyRecoveryError> {
    let invalid = KeyRecoveryError::InvalidModulus { n };

    // φ(n) < n pour tout n > 1 ; sinon b ne serait pas positif
    if phi == 0 || phi >= n {
        warn!(n, phi, "φ(n) incompatible avec n");
        return Err(invalid);
    }
    let b = n - phi + 1;

    let roots = match strategy {
        SqrtStrategy::Float64 => float_roots(b, n),
        SqrtStrategy::Exact   => exact_roots(b, n),
    };
    let Some((p, q)) = roots else {
        warn!(n, phi, %strategy, "discriminant négatif ou racine non entière");
        return Err(invalid);
    };

    let pair = FactorPair { p, q };
    if q <= 1 || p == q || pair.product() != Some(n) {
        warn!(n, p, q, "postcondition p·q == n non vérifiée");
        return Err(invalid);
    }

    debug!(n, p, q, %strategy, "facteurs récupérés");
    Ok(pair)
}

// ---------------------------------------------------------------------------
// Racines en double précision, tronquées AVANT la division entière par 2.
// Perte de précision au-delà de ~2^52 : limitation connue de ce chemin.
// ---------------------------------------------------------------------------
fn float_roots(b: u64, n: u64) -> Option<(u64, u64)> {
    let bf = b as f64;
    let discriminant = bf * bf - 4.0 * n as f64;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    // `as` sature : pas de débordement si bf + root dépasse u64::MAX
    let p = (bf + root) as u64 / 2;
    let q = (bf - root) as u64 / 2;
    Some((p, q))
}

// ---------------------------------------------------------------------------
// Racines exactes sur grands entiers : b² - 4n doit être un carré parfait
// et b ± √Δ pair.
// ---------------------------------------------------------------------------
fn exact_roots(b: u64, n: u64) -> Option<(u64, u64)> {
    let b_big = BigInt::from(b);
    let discriminant = &b_big * &b_big - BigInt::from(4u8) * BigInt::from(n);
    let root = exact_sqrt(&discriminant)?;

    let plus  = &b_big + &root;
    let minus = &b_big - &root;
    if plus.is_odd() {
        return None;
    }
    let p = (plus / 2u32).to_u64()?;
    let q = (minus / 2u32).to_u64()?;
    Some((p, q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa_recovery::r_totient::compute_totient;
    use proptest::prelude::*;

    const PRIMES: &[u64] = &[2, 3, 5, 7, 11, 13, 41, 59, 83, 149, 313, 809, 967, 8951];

    fn assert_invalid(n: u64) {
        let phi = compute_totient(n);
        assert_eq!(recover_factors(n, phi), Err(KeyRecoveryError::InvalidModulus { n }), "float, n = {n}");
        assert_eq!(
            recover_factors_with(n, phi, SqrtStrategy::Exact),
            Err(KeyRecoveryError::InvalidModulus { n }),
            "exact, n = {n}"
        );
    }

    #[test]
    fn test_recover_factors_known_scenarios() {
        assert_eq!(recover_factors(6109, 5920), Ok(FactorPair { p: 149, q: 41 }));
        assert_eq!(recover_factors(15, 8), Ok(FactorPair { p: 5, q: 3 }));
        assert_eq!(recover_factors(77, 60), Ok(FactorPair { p: 11, q: 7 }));
        assert_eq!(recover_factors(626, 312), Ok(FactorPair { p: 313, q: 2 }));
    }

    #[test]
    fn test_primes_are_rejected() {
        for &p in &[2u64, 3, 7, 13, 6113, 65537] {
            assert_invalid(p);
        }
    }

    #[test]
    fn test_prime_squares_are_rejected() {
        // n = 4 : double racine p = q = 2, rejeté de façon cohérente
        for &p in &[2u64, 3, 5, 7, 11, 31] {
            assert_invalid(p * p);
        }
    }

    #[test]
    fn test_three_or_more_factors_are_rejected() {
        for &n in &[30u64, 105, 1001, 8, 12, 18, 60] {
            assert_invalid(n);
        }
    }

    #[test]
    fn test_supplied_double_root_phi_is_rejected() {
        // φ = (p-1)² donne b = 2p, Δ = 0 : p = q, refusé
        assert_eq!(recover_factors(49, 36), Err(KeyRecoveryError::InvalidModulus { n: 49 }));
        assert_eq!(
            recover_factors_with(49, 36, SqrtStrategy::Exact),
            Err(KeyRecoveryError::InvalidModulus { n: 49 })
        );
    }

    #[test]
    fn test_phi_out_of_range_is_rejected() {
        assert_eq!(recover_factors(15, 0), Err(KeyRecoveryError::InvalidModulus { n: 15 }));
        assert_eq!(recover_factors(15, 15), Err(KeyRecoveryError::InvalidModulus { n: 15 }));
    }

    #[test]
    fn test_exact_path_beyond_float_precision() {
        // Deux premiers de 32 bits : n ~ 2^64, b² dépasse largement 2^52
        let (p, q) = (4_294_967_291u64, 4_294_967_279u64);
        let n = p * q;
        let phi = (p - 1) * (q - 1);
        assert_eq!(recover_factors_with(n, phi, SqrtStrategy::Exact), Ok(FactorPair { p, q }));
        // Limite connue du chemin f64 : Δ arrondi à 0, double racine rejetée
        assert_eq!(recover_factors(n, phi), Err(KeyRecoveryError::InvalidModulus { n }));
    }

    #[test]
    fn test_float_path_still_exact_near_2_pow_53() {
        let (p, q) = (94_906_249u64, 94_906_247u64);
        let n = p * q;
        let phi = (p - 1) * (q - 1);
        assert_eq!(recover_factors(n, phi), Ok(FactorPair { p, q }));
    }

    proptest! {
        #[test]
        fn prop_recovers_semiprime_factors(i in 0usize..14, j in 0usize..14) {
            prop_assume!(i != j);
            let (a, b) = (PRIMES[i], PRIMES[j]);
            let n = a * b;
            let phi = (a - 1) * (b - 1);
            for strategy in [SqrtStrategy::Float64, SqrtStrategy::Exact] {
                let pair = recover_factors_with(n, phi, strategy).unwrap();
                prop_assert!(pair.contains(a) && pair.contains(b));
                prop_assert_eq!(pair.product(), Some(n));
            }
        }
    }
}
