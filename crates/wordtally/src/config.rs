//! # Vocabulary Path Configuration

use std::{
    env,
    path::{Path, PathBuf},
};

/// The conventional vocabulary location, relative to the working directory.
pub const DEFAULT_VOCAB_PATH: &str = "data/vocabulary.yaml";

/// Environment variable key to override the default vocabulary path.
pub const WORDTALLY_VOCAB_PATH: &str = "WORDTALLY_VOCAB_PATH";

/// Get the vocabulary path.
///
/// The resolution order is:
/// 1. `path`, if present.
/// 2. [`WORDTALLY_VOCAB_PATH`] env var, if set and non-empty.
/// 3. [`DEFAULT_VOCAB_PATH`].
pub fn resolve_vocab_path<P: AsRef<Path>>(path: Option<P>) -> PathBuf {
    if let Some(path) = path {
        path.as_ref().to_path_buf()
    } else if let Some(path) = env::var_os(WORDTALLY_VOCAB_PATH).filter(|p| !p.is_empty()) {
        PathBuf::from(path)
    } else {
        PathBuf::from(DEFAULT_VOCAB_PATH)
    }
}
