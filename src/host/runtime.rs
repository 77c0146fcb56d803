//! In-process host runtime
//!
//! Owns the heap, the class table and the symbol table. Native methods get
//! `&mut Runtime` for the duration of a call, so at most one runs at a time.

use std::any::Any;
use std::collections::HashMap;
use std::ffi::CStr;

use super::heap::{Heap, HeapObject};
use super::{short_type_name, ClassDescriptor, ClassId, Host, MethodEntry, NativeFn, Symbol, SymbolTable};
use crate::errors::{HostError, HostResult};
use crate::logging::{debug, info, trace};
use crate::objects::Value;

/// Classes every runtime defines at startup
#[derive(Debug, Clone, Copy)]
pub struct CoreClasses {
    pub object: ClassId,
    pub nil: ClassId,
    pub true_class: ClassId,
    pub false_class: ClassId,
    pub integer: ClassId,
    pub string: ClassId,
}

pub struct Runtime {
    heap: Heap,
    classes: Vec<ClassDescriptor<Runtime>>,
    class_names: HashMap<String, ClassId>,
    symbols: SymbolTable,
    core: CoreClasses,
}

impl Runtime {
    pub fn new() -> Self {
        let mut rt = Self {
            heap: Heap::default(),
            classes: Vec::new(),
            class_names: HashMap::new(),
            symbols: SymbolTable::new(),
            core: CoreClasses {
                object: ClassId(0),
                nil: ClassId(0),
                true_class: ClassId(0),
                false_class: ClassId(0),
                integer: ClassId(0),
                string: ClassId(0),
            },
        };
        rt.bootstrap();
        info!(event = "runtime_init", classes = rt.classes.len(), "Host runtime ready");
        rt
    }

    fn bootstrap(&mut self) {
        let object = self.push_class("Object", None);
        self.core = CoreClasses {
            object,
            nil: self.push_class("NilClass", Some(object)),
            true_class: self.push_class("TrueClass", Some(object)),
            false_class: self.push_class("FalseClass", Some(object)),
            integer: self.push_class("Integer", Some(object)),
            string: self.push_class("String", Some(object)),
        };

        let core = self.core;
        let builtins: [(ClassId, NativeFn<Runtime>); 6] = [
            (core.object, object_to_s),
            (core.nil, nil_to_s),
            (core.true_class, true_to_s),
            (core.false_class, false_to_s),
            (core.integer, integer_to_s),
            (core.string, string_to_s),
        ];
        for (class, func) in builtins {
            self.classes[class.0 as usize].bind(Symbol::TO_S, MethodEntry { arity: 0, func });
        }
    }

    fn push_class(&mut self, name: &str, superclass: Option<ClassId>) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(ClassDescriptor::new(id, name, superclass));
        self.class_names.insert(name.to_string(), id);
        id
    }

    pub fn core(&self) -> CoreClasses {
        self.core
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    /// Define a class, or reopen it when the name is already taken.
    ///
    /// `superclass` defaults to `Object`.
    pub fn define_class(&mut self, name: &str, superclass: Option<ClassId>) -> HostResult<ClassId> {
        if let Some(&existing) = self.class_names.get(name) {
            return Ok(existing);
        }

        let superclass = superclass.unwrap_or(self.core.object);
        self.class(superclass)?;

        let id = self.push_class(name, Some(superclass));
        debug!(event = "define_class", class = name, id = id.0);
        Ok(id)
    }

    pub fn class(&self, id: ClassId) -> HostResult<&ClassDescriptor<Runtime>> {
        self.classes
            .get(id.0 as usize)
            .ok_or(HostError::UnknownClass(id.0))
    }

    fn class_mut(&mut self, id: ClassId) -> HostResult<&mut ClassDescriptor<Runtime>> {
        self.classes
            .get_mut(id.0 as usize)
            .ok_or(HostError::UnknownClass(id.0))
    }

    pub fn class_named(&self, name: &str) -> Option<ClassId> {
        self.class_names.get(name).copied()
    }

    pub fn freeze_class(&mut self, id: ClassId) -> HostResult<()> {
        self.class_mut(id)?.freeze();
        Ok(())
    }

    pub fn class_of(&self, value: Value) -> ClassId {
        if value.is_fixnum() {
            return self.core.integer;
        }
        match value.as_bool() {
            Some(true) => return self.core.true_class,
            Some(false) => return self.core.false_class,
            None => {}
        }

        match value.slot().and_then(|slot| self.heap.get(slot)) {
            Some(HeapObject::Str(_)) => self.core.string,
            Some(HeapObject::BigInt(_)) => self.core.integer,
            Some(HeapObject::Object { class }) | Some(HeapObject::Data { class, .. }) => *class,
            None => self.core.nil,
        }
    }

    pub fn class_name_of(&self, value: Value) -> &str {
        self.class(self.class_of(value))
            .map(|class| class.name())
            .unwrap_or("Object")
    }

    /// Walk the superclass chain for `sym`
    pub fn find_method(&self, class: ClassId, sym: Symbol) -> Option<MethodEntry<Runtime>> {
        let mut current = Some(class);
        while let Some(id) = current {
            let descriptor = self.classes.get(id.0 as usize)?;
            if let Some(entry) = descriptor.own_method(sym) {
                return Some(entry);
            }
            current = descriptor.superclass();
        }
        None
    }

    pub fn respond_to(&self, value: Value, name: &str) -> bool {
        self.symbols
            .lookup(name)
            .and_then(|sym| self.find_method(self.class_of(value), sym))
            .is_some()
    }

    // ------------------------------------------------------------------
    // Symbols
    // ------------------------------------------------------------------

    pub fn intern(&mut self, name: &str) -> Symbol {
        self.symbols.intern(name)
    }

    pub fn lookup_symbol(&self, name: &str) -> Option<Symbol> {
        self.symbols.lookup(name)
    }

    pub fn symbol_name(&self, sym: Symbol) -> &str {
        self.symbols.name(sym).unwrap_or("?")
    }

    // ------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------

    pub fn str_new(&mut self, s: &str) -> Value {
        self.str_from_bytes(s.as_bytes())
    }

    pub fn str_from_bytes(&mut self, bytes: &[u8]) -> Value {
        Value::from_slot(self.heap.alloc(HeapObject::string(bytes)))
    }

    /// String contents without the terminating NUL
    pub fn string_bytes(&self, value: Value) -> HostResult<&[u8]> {
        match value.slot().and_then(|slot| self.heap.get(slot)) {
            Some(HeapObject::Str(buf)) => Ok(&buf[..buf.len() - 1]),
            _ => Err(HostError::type_error(self.class_name_of(value), "String")),
        }
    }

    /// Integer payload of a small or big integer
    pub fn int_value(&self, value: Value) -> Option<i128> {
        if let Some(n) = value.as_fixnum() {
            return Some(n as i128);
        }
        match value.slot().and_then(|slot| self.heap.get(slot)) {
            Some(HeapObject::BigInt(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn is_string(&self, value: Value) -> bool {
        matches!(
            value.slot().and_then(|slot| self.heap.get(slot)),
            Some(HeapObject::Str(_))
        )
    }

    /// Plain instance of `class`
    pub fn object_new(&mut self, class: ClassId) -> HostResult<Value> {
        self.class(class)?;
        Ok(Value::from_slot(self.heap.alloc(HeapObject::Object { class })))
    }

    /// Wrap native data in an instance of `class`
    pub fn wrap_data<T: Any + Send>(&mut self, class: ClassId, data: T) -> HostResult<Value> {
        self.class(class)?;
        let slot = self.heap.alloc(HeapObject::Data {
            class,
            payload: Box::new(data),
        });
        Ok(Value::from_slot(slot))
    }

    /// Mutable typed borrow of the data behind a handle
    pub fn data_mut<T: Any>(&mut self, handle: Value) -> HostResult<&mut T> {
        let found = self.class_name_of(handle).to_string();
        match handle.slot().and_then(|slot| self.heap.get_mut(slot)) {
            Some(HeapObject::Data { payload, .. }) => payload
                .downcast_mut::<T>()
                .ok_or_else(|| HostError::type_error(&found, short_type_name::<T>())),
            _ => Err(HostError::type_error(&found, short_type_name::<T>())),
        }
    }

    /// Free the heap slot behind `value`; immediates are ignored
    pub fn release(&mut self, value: Value) {
        if let Some(slot) = value.slot() {
            self.heap.release(slot);
        }
    }

    /// Current allocation mark, for [`Runtime::allocated_since`]
    pub fn allocation_mark(&self) -> u64 {
        self.heap.mark()
    }

    /// Whether `value` is a live heap object allocated after `mark`
    pub fn allocated_since(&self, value: Value, mark: u64) -> bool {
        value
            .slot()
            .map_or(false, |slot| self.heap.allocated_since(slot, mark))
    }

    /// Generation of the heap slot behind `value` (0 for immediates)
    pub fn generation_of(&self, value: Value) -> u32 {
        value.slot().map_or(0, |slot| self.heap.generation(slot))
    }

    /// Number of live heap objects
    pub fn live_objects(&self) -> usize {
        self.heap.live()
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Dispatch by method name
    pub fn send(&mut self, receiver: Value, name: &str, args: &[Value]) -> HostResult<Value> {
        let sym = self.intern(name);
        self.funcall(receiver, sym, args)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for Runtime {
    fn resolve<T: Any>(&self, handle: Value) -> HostResult<&T> {
        match handle.slot().and_then(|slot| self.heap.get(slot)) {
            Some(HeapObject::Data { payload, .. }) => payload.downcast_ref::<T>().ok_or_else(|| {
                HostError::type_error(self.class_name_of(handle), short_type_name::<T>())
            }),
            _ => Err(HostError::type_error(
                self.class_name_of(handle),
                short_type_name::<T>(),
            )),
        }
    }

    fn box_integer(&mut self, n: i128) -> Value {
        i64::try_from(n)
            .ok()
            .and_then(Value::fixnum)
            .unwrap_or_else(|| Value::from_slot(self.heap.alloc(HeapObject::BigInt(n))))
    }

    fn define_method(
        &mut self,
        class: ClassId,
        name: &str,
        arity: usize,
        func: NativeFn<Self>,
    ) -> HostResult<()> {
        let sym = self.symbols.intern(name);
        let descriptor = self.class_mut(class)?;
        if descriptor.is_frozen() {
            return Err(HostError::FrozenError(descriptor.name().to_string()));
        }

        let rebound = descriptor.bind(sym, MethodEntry { arity, func });
        debug!(
            event = "define_method",
            class = descriptor.name(),
            method = name,
            arity,
            rebound
        );
        Ok(())
    }

    fn funcall(&mut self, receiver: Value, method: Symbol, args: &[Value]) -> HostResult<Value> {
        let class = self.class_of(receiver);
        let entry = self.find_method(class, method).ok_or_else(|| HostError::NoMethodError {
            method: self.symbol_name(method).to_string(),
            class: self.class_name_of(receiver).to_string(),
        })?;

        if entry.arity != args.len() {
            return Err(HostError::ArgumentError {
                expected: entry.arity,
                given: args.len(),
            });
        }

        trace!(event = "funcall", method = self.symbol_name(method), args = args.len());
        (entry.func)(self, receiver, args)
    }

    fn to_s_symbol(&self) -> Symbol {
        Symbol::TO_S
    }

    fn c_str(&self, value: Value) -> HostResult<&CStr> {
        match value.slot().and_then(|slot| self.heap.get(slot)) {
            Some(HeapObject::Str(buf)) => {
                CStr::from_bytes_with_nul(buf).map_err(|_| HostError::NullByte)
            }
            _ => Err(HostError::type_error(self.class_name_of(value), "String")),
        }
    }
}

// ----------------------------------------------------------------------
// Builtin `to_s`
// ----------------------------------------------------------------------

fn object_to_s(rt: &mut Runtime, this: Value, _args: &[Value]) -> HostResult<Value> {
    let text = format!("#<{}>", rt.class_name_of(this));
    Ok(rt.str_new(&text))
}

fn nil_to_s(rt: &mut Runtime, _this: Value, _args: &[Value]) -> HostResult<Value> {
    Ok(rt.str_new(""))
}

fn true_to_s(rt: &mut Runtime, _this: Value, _args: &[Value]) -> HostResult<Value> {
    Ok(rt.str_new("true"))
}

fn false_to_s(rt: &mut Runtime, _this: Value, _args: &[Value]) -> HostResult<Value> {
    Ok(rt.str_new("false"))
}

fn integer_to_s(rt: &mut Runtime, this: Value, _args: &[Value]) -> HostResult<Value> {
    let n = rt
        .int_value(this)
        .ok_or_else(|| HostError::type_error(rt.class_name_of(this), "Integer"))?;
    Ok(rt.str_new(&n.to_string()))
}

fn string_to_s(_rt: &mut Runtime, this: Value, _args: &[Value]) -> HostResult<Value> {
    Ok(this)
}
