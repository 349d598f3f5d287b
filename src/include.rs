//! Include capability
//!
//! The include production only needs "resolve a requested path, read it, fail
//! if absent". `IncludeSource` is that seam; the filesystem implementation is
//! what the binary uses, the in-memory one backs tests and embedders.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where included files come from
pub trait IncludeSource {
    /// Resolve a requested include path to the full path that will be read
    fn resolve(&self, requested: &str) -> PathBuf;

    /// Read the file at `path`. `Ok(None)` means it does not exist.
    fn read(&self, path: &Path) -> std::io::Result<Option<String>>;
}

/// Reads includes from disk, relative to a base directory
#[derive(Debug, Clone)]
pub struct FsIncludeSource {
    base_dir: PathBuf,
}

impl FsIncludeSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl IncludeSource for FsIncludeSource {
    fn resolve(&self, requested: &str) -> PathBuf {
        self.base_dir.join(requested)
    }

    fn read(&self, path: &Path) -> std::io::Result<Option<String>> {
        if !path.is_file() {
            return Ok(None);
        }
        std::fs::read_to_string(path).map(Some)
    }
}

/// Fixed set of named documents, keyed by their resolved path
#[derive(Debug, Clone, Default)]
pub struct MemoryIncludeSource {
    base_dir: PathBuf,
    files: HashMap<PathBuf, String>,
}

impl MemoryIncludeSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            files: HashMap::new(),
        }
    }

    /// Register a file, path relative to the base directory
    pub fn with_file(mut self, path: impl AsRef<Path>, contents: impl Into<String>) -> Self {
        let full = self.base_dir.join(path);
        self.files.insert(full, contents.into());
        self
    }
}

impl IncludeSource for MemoryIncludeSource {
    fn resolve(&self, requested: &str) -> PathBuf {
        self.base_dir.join(requested)
    }

    fn read(&self, path: &Path) -> std::io::Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}
