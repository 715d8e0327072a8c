pub mod math;
pub mod r_config;
pub mod r_keys;
pub mod r_totient;
pub mod r_factor;
pub mod r_inverse;
pub mod r_pipeline;
