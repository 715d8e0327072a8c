pub mod r_factor;

pub use r_factor::{FactorPair, recover_factors, recover_factors_with};
