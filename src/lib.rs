//! md-preprocess: single-pass directive preprocessor for markdown sources
//!
//! Directives are written `{% ... %}` and come in three forms:
//! - `{% include path/to/file.md %}` - splice in a file, verbatim
//! - `{% define name some value %}` - bind a variable (emits nothing)
//! - `{% name %}` - substitute a bound variable
//!
//! `\{%` and `\%}` produce literal markers. Directives are evaluated left to
//! right in one pass; neither included text nor variable values are scanned
//! again.
//!
//! ```
//! use md_preprocess::{preprocess, PreprocessorConfig};
//!
//! let out = preprocess("{% define X hello %}{% X %}", &PreprocessorConfig::new()).unwrap();
//! assert_eq!(out, "hello");
//! ```

pub mod config;
pub mod error;
pub mod escape;
pub mod include;
pub mod preprocessor;
pub mod production;
pub mod scanner;
pub mod symbols;

pub use config::PreprocessorConfig;
pub use error::{Diagnostic, ErrorKind, Location, PreprocessError};
pub use include::{FsIncludeSource, IncludeSource, MemoryIncludeSource};
pub use preprocessor::{preprocess, PreprocessOutput, Preprocessor};
pub use production::{Directive, Production, ProductionRegistry};
pub use symbols::SymbolTable;
