//! Interned method names

use std::collections::HashMap;

/// Interned method name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub(crate) u32);

impl Symbol {
    /// `to_s`, pre-interned in every table
    pub const TO_S: Symbol = Symbol(0);
}

const PREINTERNED: &[&str] = &["to_s"];

#[derive(Debug, Clone)]
pub struct SymbolTable {
    names: Vec<String>,
    index: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut table = Self {
            names: Vec::new(),
            index: HashMap::new(),
        };
        for name in PREINTERNED {
            table.intern(name);
        }
        table
    }

    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.index.get(name) {
            return sym;
        }

        let sym = Symbol(self.names.len() as u32);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), sym);
        sym
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.index.get(name).copied()
    }

    pub fn name(&self, sym: Symbol) -> Option<&str> {
        self.names.get(sym.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_s_preinterned() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup("to_s"), Some(Symbol::TO_S));
        assert_eq!(table.name(Symbol::TO_S), Some("to_s"));
    }

    #[test]
    fn test_intern_is_stable() {
        let mut table = SymbolTable::new();
        let a = table.intern("length");
        let b = table.intern("length");
        assert_eq!(a, b);
        assert_ne!(a, Symbol::TO_S);
        assert_eq!(table.len(), 2);
    }
}
