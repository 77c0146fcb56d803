//! Global interpreter guard
//!
//! The process-wide runtime used by the C ABI. Every entry point goes
//! through [`with_runtime`], so native methods never run concurrently.
//! Native methods already hold `&mut Runtime`; calling `with_runtime` from
//! inside one deadlocks.

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};

use super::Runtime;

static INTERPRETER: Lazy<Mutex<Runtime>> = Lazy::new(|| Mutex::new(Runtime::new()));

/// Exclusive access to the global runtime for as long as the guard lives
pub type InterpreterGuard = MutexGuard<'static, Runtime>;

/// Run `f` with the global runtime locked
pub fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
    let mut guard = lock();
    f(&mut *guard)
}

/// Acquire the interpreter guard
pub fn lock() -> InterpreterGuard {
    INTERPRETER.lock()
}
