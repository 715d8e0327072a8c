pub mod key_storage;
pub mod sample_keys;

// Réexportations key_storage
pub use key_storage::{
    save_report_json, load_report_json,
    key_file_exists, ensure_keys_directory,
};

// Réexportations sample_keys
pub use sample_keys::{KeySource, SampleKeys, FixedKey, SAMPLE_KEYS};
