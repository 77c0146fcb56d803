//! Class descriptors - named method tables

use std::collections::HashMap;

use super::{ClassId, NativeFn, Symbol};

/// Registered method
pub struct MethodEntry<H> {
    pub arity: usize,
    pub func: NativeFn<H>,
}

impl<H> Clone for MethodEntry<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for MethodEntry<H> {}

impl<H> std::fmt::Debug for MethodEntry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodEntry")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Host class: name, superclass and method table
pub struct ClassDescriptor<H> {
    id: ClassId,
    name: String,
    superclass: Option<ClassId>,
    methods: HashMap<Symbol, MethodEntry<H>>,
    frozen: bool,
}

impl<H> ClassDescriptor<H> {
    pub(crate) fn new(id: ClassId, name: &str, superclass: Option<ClassId>) -> Self {
        Self {
            id,
            name: name.to_string(),
            superclass,
            methods: HashMap::new(),
            frozen: false,
        }
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn superclass(&self) -> Option<ClassId> {
        self.superclass
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Method defined directly on this class (no superclass lookup)
    pub fn own_method(&self, sym: Symbol) -> Option<MethodEntry<H>> {
        self.methods.get(&sym).copied()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    /// Insert or rebind; returns true when the name was already bound
    pub(crate) fn bind(&mut self, sym: Symbol, entry: MethodEntry<H>) -> bool {
        self.methods.insert(sym, entry).is_some()
    }
}

impl<H> std::fmt::Debug for ClassDescriptor<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassDescriptor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("superclass", &self.superclass)
            .field("methods", &self.methods.len())
            .field("frozen", &self.frozen)
            .finish()
    }
}
