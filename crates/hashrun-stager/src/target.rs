//! Target descriptions.

use std::path::{Path, PathBuf};

/// Where a hash list or wordlist comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// A literal value, written to a file in the work directory.
    Inline(String),
    /// A file that already exists locally.
    Local(PathBuf),
    /// A file to download (and unpack, depending on its name).
    Url(String),
}

impl TargetSpec {
    /// Interpret a command-line target: an existing path is used as is,
    /// anything else is a literal hash.
    pub fn from_argument(value: &str) -> Self {
        let path = Path::new(value);
        if path.is_file() {
            Self::Local(path.to_path_buf())
        } else {
            Self::Inline(value.to_string())
        }
    }
}
