//! Preprocessing driver
//!
//! One `Preprocessor` is one run: scan directives left to right, evaluate
//! each against the run's symbol table, splice in the replacement text, then
//! apply the escape pass. Replacement text is never rescanned.

use tracing::info;

use crate::config::PreprocessorConfig;
use crate::error::{Location, PreprocessError, Result};
use crate::escape::unescape_markers;
use crate::include::{FsIncludeSource, IncludeSource};
use crate::production::{EvalContext, ProductionRegistry};
use crate::scanner::scan_directives;
use crate::symbols::SymbolTable;

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    /// The fully processed document
    pub text: String,
    /// Symbol table as it stood at the end of the run
    pub symbols: SymbolTable,
    /// Number of directives evaluated
    pub directives: usize,
}

pub struct Preprocessor {
    symbols: SymbolTable,
    registry: ProductionRegistry,
    includes: Box<dyn IncludeSource>,
}

impl Preprocessor {
    /// Preprocessor reading includes from `config.base_dir` on disk
    pub fn new(config: &PreprocessorConfig) -> Self {
        Self::with_include_source(config, FsIncludeSource::new(&config.base_dir))
    }

    pub fn with_include_source(
        config: &PreprocessorConfig,
        includes: impl IncludeSource + 'static,
    ) -> Self {
        let mut symbols = SymbolTable::new();
        for (name, value) in &config.predefined {
            symbols.define(name.as_str(), value.as_str());
        }

        Self {
            symbols,
            registry: ProductionRegistry::builtin(),
            includes: Box::new(includes),
        }
    }

    /// Process `input`. The first failing directive aborts the run.
    pub fn run(mut self, input: &str) -> Result<PreprocessOutput> {
        let spans = scan_directives(input);
        let mut evaluated = String::with_capacity(input.len());
        let mut last_end = 0;
        // Running position, advanced only over text not yet counted
        let mut cursor = (0, Location::new(1, 1));

        for span in &spans {
            evaluated.push_str(&input[last_end..span.start]);

            let location = cursor.1.advance(&input[cursor.0..span.start]);
            cursor = (span.start, location);
            let production = self.registry.find(span.inner).ok_or_else(|| {
                PreprocessError::UnrecognizedDirective {
                    text: span.inner.to_string(),
                    location,
                }
            })?;

            let mut ctx = EvalContext {
                symbols: &mut self.symbols,
                includes: self.includes.as_ref(),
                location,
            };
            let replacement = production.evaluate(&mut ctx, span.inner)?;
            evaluated.push_str(&replacement);

            last_end = span.end;
        }
        evaluated.push_str(&input[last_end..]);

        info!(
            directives = spans.len(),
            symbols = self.symbols.len(),
            "preprocessing complete"
        );

        Ok(PreprocessOutput {
            text: unescape_markers(&evaluated),
            symbols: self.symbols,
            directives: spans.len(),
        })
    }
}

/// Convenience wrapper: preprocess `input` with includes read from disk
pub fn preprocess(input: &str, config: &PreprocessorConfig) -> Result<String> {
    Preprocessor::new(config).run(input).map(|output| output.text)
}
