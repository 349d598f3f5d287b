//! Symbol table - variable name to defined value, scoped to one run

use std::collections::HashMap;

use tracing::trace;

/// Variables defined so far in a preprocessing run
///
/// Values are stored verbatim and never rescanned for directives.
/// Redefinition overwrites silently (last write wins).
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Bind `name` to `value`, replacing any earlier binding
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        if self.symbols.insert(name.clone(), value.into()).is_some() {
            trace!(variable = %name, "variable redefined");
        }
    }

    /// Look up a value. Callers check `has` first; an unknown name yields `None`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// True iff `name` matches `[A-Za-z][A-Za-z_\-0-9]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => chars.all(is_identifier_char),
        _ => false,
    }
}

pub(crate) fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut table = SymbolTable::new();
        assert!(!table.has("title"));
        assert!(table.is_empty());

        table.define("title", "Hello World");
        assert!(table.has("title"));
        assert_eq!(table.get("title"), Some("Hello World"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_redefine_last_write_wins() {
        let mut table = SymbolTable::new();
        table.define("X", "a");
        table.define("X", "b");
        assert_eq!(table.get("X"), Some("b"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_get_unknown() {
        let table = SymbolTable::new();
        assert_eq!(table.get("nope"), None);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("X"));
        assert!(is_identifier("chapter-2_title"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2fast"));
        assert!(!is_identifier("_private"));
        assert!(!is_identifier("has space"));
        assert!(!is_identifier("dotted.name"));
        assert!(!is_identifier("café"));
    }
}
