// Réexporte les primitives arithmétiques du pipeline

mod math;

pub use math::{gcd, extended_euclid, mod_pow, exact_sqrt, BezoutResult};
