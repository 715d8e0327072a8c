use tracing::{debug, warn};
use crate::recovery_error::KeyRecoveryError;
use crate::rsa_recovery::math::{extended_euclid, BezoutResult};

// ---------------------------------------------------------------------------
// Exposant privé d = e⁻¹ mod φ(n).
// Retourne Err(NoInverse) si gcd(e, φ) != 1.
// ---------------------------------------------------------------------------
pub fn compute_d(e: u64, phi: u64) -> Result<u64, KeyRecoveryError> {
    solve_inverse(e, phi).map(|(_, d)| d)
}

// ---------------------------------------------------------------------------
// Comme compute_d, mais renvoie aussi les coefficients de Bézout pour
// l'affichage de l'identité a·e + b·φ = 1.
//
// Normalisation : d = a mod φ, ramené dans [0, φ) en ajoutant φ si négatif.
// ---------------------------------------------------------------------------
pub fn solve_inverse(e: u64, phi: u64) -> Result<(BezoutResult, u64), KeyRecoveryError> {
    if phi == 0 {
        return Err(KeyRecoveryError::InvalidInput("φ(n) doit être non nul".to_string()));
    }

    let bezout = extended_euclid(e, phi);
    if bezout.gcd != 1 {
        warn!(e, phi, gcd = bezout.gcd, "e n'est pas inversible modulo φ(n)");
        return Err(KeyRecoveryError::NoInverse { e, phi, gcd: bezout.gcd });
    }

    let phi_big = i128::from(phi);
    let mut d = bezout.a % phi_big;
    if d < 0 {
        d += phi_big;
    }

    debug!(e, phi, a = %bezout.a, b = %bezout.b, d = %d, "inverse modulaire calculé");
    // d dans [0, φ) donc toujours représentable en u64
    Ok((bezout, u64::try_from(d).unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa_recovery::math::gcd;
    use proptest::prelude::*;

    #[test]
    fn test_compute_d_known_values() {
        // 7·7 = 49 ≡ 1 mod 8
        assert_eq!(compute_d(7, 8), Ok(7));
        assert_eq!(compute_d(1877, 5920), Ok(3933));
        assert_eq!(compute_d(7, 60), Ok(43));
        // e > φ
        assert_eq!(compute_d(11842807, 164), Ok(143));
    }

    #[test]
    fn test_no_inverse_when_gcd_not_one() {
        assert_eq!(compute_d(3, 12), Err(KeyRecoveryError::NoInverse { e: 3, phi: 12, gcd: 3 }));
        assert_eq!(compute_d(7, 21542220), Err(KeyRecoveryError::NoInverse { e: 7, phi: 21542220, gcd: 7 }));
    }

    #[test]
    fn test_zero_exponent_and_zero_phi() {
        assert!(matches!(compute_d(0, 5920), Err(KeyRecoveryError::NoInverse { gcd: 5920, .. })));
        assert!(matches!(compute_d(7, 0), Err(KeyRecoveryError::InvalidInput(_))));
    }

    #[test]
    fn test_bezout_coefficients_returned() {
        let (bezout, d) = solve_inverse(1877, 5920).unwrap();
        assert_eq!(bezout.gcd, 1);
        assert_eq!(bezout.a * 1877 + bezout.b * 5920, 1);
        assert_eq!(d, 3933);
    }

    proptest! {
        #[test]
        fn prop_inverse_when_coprime(e in 1u64..1_000_000, phi in 2u64..1_000_000) {
            if gcd(e, phi) == 1 {
                let d = compute_d(e, phi).unwrap();
                prop_assert!(d < phi);
                prop_assert_eq!(u128::from(e) * u128::from(d) % u128::from(phi), 1);
            } else {
                let is_no_inverse = matches!(compute_d(e, phi), Err(KeyRecoveryError::NoInverse { .. }));
                prop_assert!(is_no_inverse);
            }
        }
    }
}
