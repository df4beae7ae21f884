// Symbol table for Callvine.
// Tracks the declarations seen so far during one file walk.

use indexmap::{IndexMap, IndexSet};

/// Synthetic caller used when a reference occurs outside any named
/// declaration. Never declared as a symbol itself.
pub const GLOBAL_SCOPE: &str = "global";

/// Declaration kinds the walker recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Class,
    Arrow,
    Variable,
    Component,
}

/// A declared name known to the walker.
///
/// Class methods are stored under their dotted name (`ClassName.methodName`),
/// everything else under the bare name.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub declared_at_line: usize,
    /// Cache of callee names this symbol is known to invoke. Derived from
    /// the edges resolved out of this symbol, not authoritative.
    pub referenced_callees: IndexSet<String>,
}

/// Name -> declaration metadata for one file walk.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration if the name is not already taken.
    /// The first declaration of a name wins; re-declarations are no-ops.
    pub fn declare(&mut self, name: &str, line: usize, kind: SymbolKind) {
        if self.symbols.contains_key(name) {
            return;
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                kind,
                declared_at_line: line,
                referenced_callees: IndexSet::new(),
            },
        );
    }

    pub fn has(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Append `callee` to the caller's outgoing-call cache. Callers that
    /// are not declared symbols (notably the synthetic "global" scope)
    /// leave no trace here; the edge itself is recorded elsewhere.
    pub fn record_outgoing_call(&mut self, caller: &str, callee: &str) {
        if let Some(symbol) = self.symbols.get_mut(caller) {
            symbol.referenced_callees.insert(callee.to_string());
        }
    }
}
