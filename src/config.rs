//! Run configuration
//!
//! Include base directory and variables defined before the scan starts.

use std::path::{Path, PathBuf};

use crate::symbols::is_identifier;

/// Environment override for the include base directory
pub const BASE_DIR_ENV: &str = "MD_PREPROCESS_BASE_DIR";

#[derive(Debug, Clone)]
pub struct PreprocessorConfig {
    /// Directory that include paths are resolved against
    pub base_dir: PathBuf,
    /// Seed definitions, applied in order before any directive
    pub predefined: Vec<(String, String)>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            predefined: Vec::new(),
        }
    }
}

impl PreprocessorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base directory for an input: the file's directory, or the current
    /// working directory when reading stdin
    pub fn from_input_path(input: Option<&Path>) -> Self {
        let base_dir = match input.and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        };
        Self {
            base_dir,
            ..Default::default()
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn define(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.predefined.push((name.into(), value.into()));
        self
    }
}

/// Parse a `NAME=VALUE` definition as given on the command line
pub fn parse_definition(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", arg))?;

    if !is_identifier(name) {
        return Err(format!(
            "invalid variable name '{}': must match [A-Za-z][A-Za-z_-0-9]*",
            name
        ));
    }

    Ok((name.to_string(), value.to_string()))
}
