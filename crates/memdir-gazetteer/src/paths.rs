//! Gazetteer directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the gazetteer data directory.
pub const GAZETTEER_ENV_VAR: &str = "MEMDIR_GAZETTEER_DIR";

/// Get the gazetteer root directory.
///
/// Resolution order:
/// 1. `MEMDIR_GAZETTEER_DIR` environment variable
/// 2. `data/gazetteer/` directory relative to workspace root
pub fn gazetteer_root() -> PathBuf {
    if let Ok(root) = std::env::var(GAZETTEER_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/gazetteer")
}
