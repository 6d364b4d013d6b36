use std::path::PathBuf;

pub const PREFS_DB_FILE: &str = "wayfinder.db";

pub fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn default_prefs_db() -> PathBuf {
    repo_root().join(PREFS_DB_FILE)
}
