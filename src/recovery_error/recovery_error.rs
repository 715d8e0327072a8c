// ===========================================================================
// Gestion centralisée des erreurs de récupération de clé
//
// Toutes les étapes du pipeline retournent ce type au lieu de panic!/unwrap().
// Chaque erreur est terminale : aucune clé partielle n'est jamais produite.
// ===========================================================================

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRecoveryError {
    // --- Erreurs de paramètres d'entrée ---
    /// e ou n nul, négatif ou illisible ; message clair hors domaine
    InvalidInput(String),

    // --- Erreurs mathématiques ---
    /// n n'est pas le produit de deux premiers distincts (p·q != n)
    InvalidModulus { n: u64 },
    /// gcd(e, φ(n)) != 1 : e n'a pas d'inverse modulo φ(n)
    NoInverse { e: u64, phi: u64, gcd: u64 },
    /// (m^e)^d mod n != m : la clé privée ne déchiffre pas
    RoundTripMismatch { m: u64, n: u64 },
}

impl fmt::Display for KeyRecoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRecoveryError::InvalidInput(msg) =>
                write!(f, "Entrée invalide : {msg}"),
            KeyRecoveryError::InvalidModulus { n } =>
                write!(f, "Module invalide : {n} n'est pas un semi-premier (produit de deux premiers distincts)"),
            KeyRecoveryError::NoInverse { e, phi, gcd } =>
                write!(f, "Clé de chiffrement invalide : gcd({e}, {phi}) = {gcd}, e n'a pas d'inverse modulo ϕn"),
            KeyRecoveryError::RoundTripMismatch { m, n } =>
                write!(f, "Clé privée incorrecte : (m^e)^d mod {n} != m pour m = {m}"),
        }
    }
}

impl std::error::Error for KeyRecoveryError {}

// ---------------------------------------------------------------------------
// Lecture d'un entier strictement positif depuis une saisie utilisateur.
// Les valeurs négatives, nulles ou non numériques sont rejetées ici,
// avant tout calcul.
// ---------------------------------------------------------------------------
pub fn parse_positive(input: &str, label: &str) -> Result<u64, KeyRecoveryError> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return Err(KeyRecoveryError::InvalidInput(format!("{label} doit être positif (reçu {trimmed})")));
    }
    let value: u64 = trimmed
        .parse()
        .map_err(|_| KeyRecoveryError::InvalidInput(format!("{label} n'est pas un entier 64 bits valide : {trimmed:?}")))?;
    if value == 0 {
        return Err(KeyRecoveryError::InvalidInput(format!("{label} doit être non nul")));
    }
    Ok(value)
}
