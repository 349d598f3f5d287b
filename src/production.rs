//! Directive productions
//!
//! A production pairs a recognizer over a directive's inner text with an
//! evaluator that turns it into replacement text. The recognizers overlap
//! (`define` on its own is also a valid identifier), so they are always tried
//! in registry order and the first match wins.
//!
//! ```text
//! include <path>          -> contents of <path>, verbatim
//! define <name> <value>   -> "" (binds name)
//! <name>                  -> bound value, verbatim
//! ```

use std::fmt;

use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{multispace1, satisfy},
    combinator::{all_consuming, recognize, rest},
    error::ParseError as NomParseError,
    sequence::pair,
    IResult,
};
use tracing::debug;

use crate::error::{Location, PreprocessError, Result};
use crate::include::IncludeSource;
use crate::symbols::{is_identifier_char, SymbolTable};

// ============================================================================
// Grammar
// ============================================================================

/// `[A-Za-z][A-Za-z_\-0-9]*`
fn identifier<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(is_identifier_char),
    ))(input)
}

/// `include <path>` - the path is everything after the separator, trimmed
fn include_form<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    let (input, _) = tag("include")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, path) = rest(input)?;
    Ok((input, path.trim()))
}

/// `define <name> <value>` - the value is everything after the separator
fn define_form<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (&'a str, &'a str), E> {
    let (input, _) = tag("define")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, name) = identifier(input)?;
    let (input, _) = multispace1(input)?;
    let (input, value) = rest(input)?;
    Ok((input, (name, value)))
}

/// Directive inner text after it has been recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    Include { path: &'a str },
    Define { name: &'a str, value: &'a str },
    Dereference { name: &'a str },
}

type Simple<'a> = nom::error::Error<&'a str>;

// ============================================================================
// Productions
// ============================================================================

/// The built-in directive forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Include,
    Define,
    Dereference,
}

/// State a production reads and mutates while evaluating one directive
pub struct EvalContext<'a> {
    pub symbols: &'a mut SymbolTable,
    pub includes: &'a dyn IncludeSource,
    /// Position of the directive being evaluated, for diagnostics
    pub location: Location,
}

impl Production {
    pub fn name(self) -> &'static str {
        match self {
            Production::Include => "include",
            Production::Define => "define",
            Production::Dereference => "dereference",
        }
    }

    /// Parse `inner` against this production's grammar
    pub fn parse(self, inner: &str) -> Option<Directive<'_>> {
        match self {
            Production::Include => all_consuming(include_form::<Simple>)(inner)
                .ok()
                .filter(|(_, path)| !path.is_empty())
                .map(|(_, path)| Directive::Include { path }),
            Production::Define => all_consuming(define_form::<Simple>)(inner)
                .ok()
                .filter(|(_, (_, value))| !value.is_empty())
                .map(|(_, (name, value))| Directive::Define { name, value }),
            Production::Dereference => all_consuming(identifier::<Simple>)(inner)
                .ok()
                .map(|(_, name)| Directive::Dereference { name }),
        }
    }

    pub fn matches(self, inner: &str) -> bool {
        self.parse(inner).is_some()
    }

    /// Evaluate a directive this production matched, producing its replacement
    ///
    /// Returns `UnrecognizedDirective` if called with text that does not match.
    pub fn evaluate(self, ctx: &mut EvalContext<'_>, inner: &str) -> Result<String> {
        let directive = self
            .parse(inner)
            .ok_or_else(|| PreprocessError::UnrecognizedDirective {
                text: inner.to_string(),
                location: ctx.location,
            })?;

        debug!(production = self.name(), line = ctx.location.line, "evaluating directive");

        match directive {
            Directive::Include { path } => {
                let resolved = ctx.includes.resolve(path);
                match ctx.includes.read(&resolved) {
                    Ok(Some(contents)) => Ok(contents),
                    Ok(None) => Err(PreprocessError::UnresolvedInclude {
                        requested: path.to_string(),
                        resolved,
                        location: ctx.location,
                    }),
                    Err(source) => Err(PreprocessError::Io {
                        path: resolved,
                        source,
                    }),
                }
            }
            Directive::Define { name, value } => {
                ctx.symbols.define(name, value);
                Ok(String::new())
            }
            Directive::Dereference { name } => match ctx.symbols.get(name) {
                Some(value) => Ok(value.to_string()),
                None => Err(PreprocessError::UndefinedVariable {
                    name: name.to_string(),
                    location: ctx.location,
                }),
            },
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Productions in priority order
#[derive(Debug, Clone)]
pub struct ProductionRegistry {
    productions: Vec<Production>,
}

impl Default for ProductionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProductionRegistry {
    /// include, define, dereference - in that order
    pub fn builtin() -> Self {
        Self {
            productions: vec![
                Production::Include,
                Production::Define,
                Production::Dereference,
            ],
        }
    }

    /// First production whose recognizer accepts `inner`
    pub fn find(&self, inner: &str) -> Option<Production> {
        self.productions.iter().copied().find(|p| p.matches(inner))
    }

    pub fn iter(&self) -> impl Iterator<Item = Production> + '_ {
        self.productions.iter().copied()
    }
}
