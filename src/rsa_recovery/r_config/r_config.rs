use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::recovery_error::KeyRecoveryError;

// ---------------------------------------------------------------------------
// Extraction de la racine du discriminant b² - 4n
//
// Float64 : racine f64 tronquée, comportement historique de l'outil.
//           Fiable tant que b² tient dans les 52 bits de mantisse (~2^52).
// Exact   : racine entière sur BigInt, pour les modules au-delà.
// ---------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqrtStrategy {
    #[default]
    Float64,
    Exact,
}

impl FromStr for SqrtStrategy {
    type Err = KeyRecoveryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float" | "float64" | "f64" => Ok(SqrtStrategy::Float64),
            "exact" | "bigint"          => Ok(SqrtStrategy::Exact),
            other => Err(KeyRecoveryError::InvalidInput(
                format!("stratégie de racine inconnue : {other:?} (attendu float ou exact)"),
            )),
        }
    }
}

impl fmt::Display for SqrtStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqrtStrategy::Float64 => write!(f, "float64"),
            SqrtStrategy::Exact   => write!(f, "exact"),
        }
    }
}

// ---------------------------------------------------------------------------
// Paramètres du pipeline — valeurs simples passées par l'appelant,
// jamais lues depuis l'environnement par la bibliothèque.
// ---------------------------------------------------------------------------
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    pub sqrt:     SqrtStrategy,
    /// Exécute la récupération des facteurs et le calcul de d en parallèle
    pub parallel: bool,
}
