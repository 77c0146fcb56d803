//! Host runtime boundary
//!
//! Design: every primitive the set bindings need from the embedding runtime
//! sits behind [`Host`]:
//! 1. Typed resolution of a data handle (`resolve`)
//! 2. Integer boxing (`box_integer`)
//! 3. Method registration (`define_method`)
//! 4. Method dispatch and the stringification symbol (`funcall`, `to_s_symbol`)
//! 5. NUL-terminated view of host strings (`c_str`)
//!
//! [`Runtime`] is the in-process host. Tests substitute their own doubles.

mod class;
mod guard;
mod heap;
mod runtime;
mod symbols;


pub use class::{ClassDescriptor, MethodEntry};
pub use guard::{lock as lock_runtime, with_runtime, InterpreterGuard};
pub use runtime::{CoreClasses, Runtime};
pub use symbols::{Symbol, SymbolTable};

use std::any::Any;
use std::ffi::CStr;

use crate::errors::HostResult;
use crate::objects::Value;

/// Handle to a class descriptor owned by a host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

/// Native method body: `(host, receiver, arguments) -> result`
pub type NativeFn<H> = fn(&mut H, Value, &[Value]) -> HostResult<Value>;

/// Primitives supplied by the embedding runtime
pub trait Host: Sized {
    /// Borrow the native data behind `handle` as a `T`.
    ///
    /// Fails with the host's type error when the handle does not wrap a `T`.
    fn resolve<T: Any>(&self, handle: Value) -> HostResult<&T>;

    /// Package a machine integer as a host integer, widening past the
    /// small-integer range.
    fn box_integer(&mut self, n: i128) -> Value;

    /// Attach `func` to `class` under `name`. Rebinding an existing name
    /// replaces the previous entry.
    fn define_method(
        &mut self,
        class: ClassId,
        name: &str,
        arity: usize,
        func: NativeFn<Self>,
    ) -> HostResult<()>;

    /// Dispatch `method` on `receiver`.
    fn funcall(&mut self, receiver: Value, method: Symbol, args: &[Value]) -> HostResult<Value>;

    /// Symbol of the stringification method.
    fn to_s_symbol(&self) -> Symbol;

    /// NUL-terminated contents of a host string.
    ///
    /// The borrow is tied to `self`: no host call can happen while it lives.
    fn c_str(&self, value: Value) -> HostResult<&CStr>;
}

/// Last path segment of a Rust type name, used in type error messages
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
