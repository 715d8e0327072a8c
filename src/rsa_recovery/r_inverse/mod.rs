pub mod r_inverse;

pub use r_inverse::{compute_d, solve_inverse};
