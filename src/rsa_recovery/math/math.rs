use num_bigint::{BigInt, BigUint, Sign};
use num_integer::{Integer, Roots};
use num_traits::ToPrimitive;
use serde::{Serialize, Deserialize};

// ---------------------------------------------------------------------------
// Résultat de l'algorithme d'Euclide étendu : a·e + b·φ = gcd
//
// Les coefficients sont en i128 : pour des entrées u64, |a| <= φ et |b| <= e,
// aucun produit intermédiaire ne déborde.
// ---------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BezoutResult {
    pub gcd: u64,
    pub a:   i128,
    pub b:   i128,
}

// Calcule le pgcd de deux nombres
pub fn gcd(a: u64, b: u64) -> u64 {
    a.gcd(&b)
}

// ---------------------------------------------------------------------------
// Algorithme d'Euclide étendu, forme itérative.
//
// Même suite de coefficients que la définition récursive
//   gcd(e, 0) = (e, 1, 0)
//   gcd(e, φ) = (d, b', a' - (e / φ)·b')  avec (d, a', b') = gcd(φ, e mod φ)
// mais sans pile d'appels : e = 0 ou des entrées pathologiques ne
// peuvent pas épuiser la pile.
// ---------------------------------------------------------------------------
pub fn extended_euclid(e: u64, phi: u64) -> BezoutResult {
    let (mut old_r, mut r) = (i128::from(e), i128::from(phi));
    let (mut old_s, mut s) = (1i128, 0i128);
    let (mut old_t, mut t) = (0i128, 1i128);

    while r != 0 {
        let quotient = old_r / r;

        let temp_r = r;
        r = old_r - quotient * r;
        old_r = temp_r;

        let temp_s = s;
        s = old_s - quotient * s;
        old_s = temp_s;

        let temp_t = t;
        t = old_t - quotient * t;
        old_t = temp_t;
    }

    // old_r est un reste d'entiers positifs : toujours dans [0, u64::MAX]
    let gcd_val = u64::try_from(old_r).unwrap_or_default();

    BezoutResult { gcd: gcd_val, a: old_s, b: old_t }
}

// ---------------------------------------------------------------------------
// Exponentiation modulaire base^exp mod modulus, via BigUint::modpow.
// Retourne 0 pour un module <= 1.
// ---------------------------------------------------------------------------
pub fn mod_pow(base: u64, exp: u64, modulus: u64) -> u64 {
    if modulus <= 1 {
        return 0;
    }
    let result = BigUint::from(base).modpow(&BigUint::from(exp), &BigUint::from(modulus));
    // result < modulus <= u64::MAX
    result.to_u64().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Racine carrée entière exacte (Newton sur grands entiers via num-integer).
// None si la valeur est négative ou n'est pas un carré parfait.
// ---------------------------------------------------------------------------
pub fn exact_sqrt(value: &BigInt) -> Option<BigInt> {
    if value.sign() == Sign::Minus {
        return None;
    }
    let root = Roots::sqrt(value);
    if &(&root * &root) == value {
        Some(root)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_bezout(e: u64, phi: u64) {
        let r = extended_euclid(e, phi);
        assert_eq!(r.a * i128::from(e) + r.b * i128::from(phi), i128::from(r.gcd));
        assert_eq!(r.gcd, gcd(e, phi));
    }

    #[test]
    fn test_extended_euclid_identity_holds() {
        check_bezout(7, 8);
        check_bezout(1877, 5920);
        check_bezout(3, 12);
        check_bezout(11842807, 164); // e > φ
        check_bezout(u64::MAX, u64::MAX - 1);
    }

    #[test]
    fn test_extended_euclid_base_case() {
        // gcd(e, 0) = (e, 1, 0)
        assert_eq!(extended_euclid(42, 0), BezoutResult { gcd: 42, a: 1, b: 0 });
    }

    #[test]
    fn test_extended_euclid_zero_exponent_does_not_overflow_stack() {
        let r = extended_euclid(0, 5920);
        assert_eq!(r.gcd, 5920);
    }

    #[test]
    fn test_mod_pow() {
        assert_eq!(mod_pow(4, 13, 497), 445);
        assert_eq!(mod_pow(2, 0, 7), 1);
        assert_eq!(mod_pow(5, 3, 1), 0);
        // Modules proches de 2^64 : aucun débordement intermédiaire
        assert_eq!(mod_pow(u64::MAX, 2, u64::MAX - 58), {
            let m = u128::from(u64::MAX - 58);
            (u128::from(u64::MAX) % m * (u128::from(u64::MAX) % m) % m) as u64
        });
        assert_eq!(mod_pow(2, 64, u64::MAX), 1);
        // Aller-retour RSA sur n = 6109 : (42^1877)^3933 mod n = 42
        assert_eq!(mod_pow(mod_pow(42, 1877, 6109), 3933, 6109), 42);
    }

    #[test]
    fn test_exact_sqrt() {
        assert_eq!(exact_sqrt(&BigInt::from(11664)), Some(BigInt::from(108)));
        assert_eq!(exact_sqrt(&BigInt::from(0)), Some(BigInt::from(0)));
        assert_eq!(exact_sqrt(&BigInt::from(409)), None);
        assert_eq!(exact_sqrt(&BigInt::from(-7)), None);
    }
}
