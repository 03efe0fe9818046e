//! Symbol table collaborator
//!
//! Scope resolution lives outside this crate; the parser only consults a
//! [`SymbolLookup`] (when one is installed) to note identifiers that are not
//! declared anywhere. The check never fails a parse — unknown identifiers
//! are a semantic concern and are merely logged.

use rustc_hash::FxHashMap;

/// Identifier-validity oracle consulted by the expression parser.
pub trait SymbolLookup {
    fn is_declared(&self, name: &str) -> bool;
}

/// Minimal flat symbol table backed by an `FxHashMap`, mapping names to the
/// declared type keyword. Enough for drivers that pre-register globals and
/// SFR names before parsing.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: FxHashMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>, data_type: impl Into<String>) {
        self.entries.insert(name.into(), data_type.into());
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SymbolLookup for SymbolTable {
    fn is_declared(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        table.declare("P0", "sfr");
        table.declare("counter", "int");

        assert!(table.is_declared("P0"));
        assert_eq!(table.type_of("counter"), Some("int"));
        assert!(!table.is_declared("missing"));
    }
}
