pub mod r_totient;

pub use r_totient::{compute_totient, totient_from_factors};
