//! lovely-sets - ordered set containers for an embedded host runtime
//!
//! The crate publishes a `length` accessor on host classes for each native
//! set variant, plus a helper that turns any host value into a C string via
//! its own `to_s`.
//!
//! Layout:
//! - `objects` - tagged host values
//! - `host` - host boundary trait and the in-process runtime
//! - `sets` - native set variants and the `SetSize` capability
//! - `binding` - length accessor, registration hook, stringification
//! - `ffi` - C ABI over the global runtime
//! - `config`, `logging`, `errors` - ambient support

pub mod binding;
pub mod config;
pub mod errors;
pub mod ffi;
pub mod host;
pub mod logging;
pub mod objects;
pub mod sets;

#[cfg(feature = "python")]
mod python;

// Re-export core types
pub use binding::{init_set, install, set_length, to_c_string, with_c_str, SetClasses};
pub use config::Config;
pub use errors::{HostError, HostResult};
pub use host::{ClassId, Host, Runtime, Symbol};
pub use objects::Value;
pub use sets::{Element, HashSet, SetSize, SetVariant, SortedSet};
