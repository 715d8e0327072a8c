use tracing::debug;
use crate::rsa_recovery::r_factor::FactorPair;

// ---------------------------------------------------------------------------
// Petits premiers testés avant le balayage
// ---------------------------------------------------------------------------
const SEED_PRIMES: [u64; 3] = [2, 3, 5];

// ============================================================================
// Indicatrice d'Euler φ(n) par balayage exhaustif — O(n)
//
// Liste de facteurs connus initialisée avec ceux de 2, 3, 5 qui divisent n.
// Pour chaque i dans [2, n) :
//   - i multiple d'un facteur connu → ignoré (non premier avec n)
//   - i divise n                    → nouveau facteur
//   - sinon                         → compté comme premier avec n
// Les facteurs premiers de n sont découverts dans l'ordre croissant, donc
// tout i partageant un facteur avec n est écarté avant d'être compté.
// Le +1 final compte la valeur 1, hors de la plage balayée.
//
// Ce coût linéaire est volontaire : c'est l'étape dominante du pipeline
// dès que n dépasse ~10^8.
// ============================================================================
pub fn compute_totient(n: u64) -> u64 {
    if n <= 1 {
        return 1;
    }

    let mut factors: Vec<u64> = SEED_PRIMES.iter().copied().filter(|f| n % f == 0).collect();
    let mut count: u64 = 0;

    for i in 2..n {
        if factors.iter().any(|f| i % f == 0) {
            continue;
        }
        if n % i == 0 {
            factors.push(i);
        } else {
            count += 1;
        }
    }

    debug!(n, ?factors, phi = count + 1, "balayage de l'indicatrice terminé");
    count + 1
}

// Chemin rapide (p-1)(q-1), une fois p et q connus.
// Sert de contrôle croisé, jamais de remplacement du balayage.
pub fn totient_from_factors(pair: &FactorPair) -> u64 {
    pair.p.saturating_sub(1) * pair.q.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SMALL_PRIMES: &[u64] = &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101, 149];

    // Référence naïve par pgcd
    fn reference_totient(n: u64) -> u64 {
        (1..=n).filter(|k| crate::rsa_recovery::math::gcd(*k, n) == 1).count() as u64
    }

    #[test]
    fn test_totient_small_values() {
        assert_eq!(compute_totient(1), 1);
        assert_eq!(compute_totient(2), 1);
        assert_eq!(compute_totient(4), 2);
        assert_eq!(compute_totient(15), 8);
        assert_eq!(compute_totient(21), 12);
        assert_eq!(compute_totient(77), 60);
        assert_eq!(compute_totient(6109), 5920);
    }

    #[test]
    fn test_totient_matches_reference_for_all_small_n() {
        // Couvre premiers, puissances de premiers et n à 3+ facteurs
        for n in 2..600u64 {
            assert_eq!(compute_totient(n), reference_totient(n), "n = {n}");
        }
    }

    #[test]
    fn test_fast_path_matches_scan() {
        let pair = FactorPair { p: 149, q: 41 };
        assert_eq!(totient_from_factors(&pair), compute_totient(6109));
    }

    proptest! {
        #[test]
        fn prop_semiprime_totient(i in 0usize..27, j in 0usize..27) {
            prop_assume!(i != j);
            let (p, q) = (SMALL_PRIMES[i], SMALL_PRIMES[j]);
            prop_assert_eq!(compute_totient(p * q), (p - 1) * (q - 1));
        }
    }
}
