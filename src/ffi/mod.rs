//! C FFI - stable ABI for native hosts
//!
//! Design: every entry point locks the global interpreter guard, so calls
//! from any thread are serialized. Values cross the boundary as raw tag
//! bits (`u64`). Failures return `nil` bits or null and leave a message in
//! a thread-local slot:
//! 1. Lifecycle (`lovely_sets_init`)
//! 2. Set handles and `length`
//! 3. Integer boxing, C strings and releasing heap values

mod set;
mod string;

pub use set::{lovely_sets_hash_set_new, lovely_sets_length, lovely_sets_sorted_set_new};
pub use string::{
    lovely_sets_int_from_i64, lovely_sets_int_to_i64, lovely_sets_release, lovely_sets_str_new,
    lovely_sets_string_free, lovely_sets_to_s,
};

use once_cell::sync::OnceCell;
use std::cell::RefCell;
use std::ffi::{c_char, CString};

use crate::binding::{install, SetClasses};
use crate::config::Config;
use crate::errors::{HostError, HostResult};
use crate::host::with_runtime;
use crate::logging::{self, log_ffi_error, LogConfig};

static INSTALLED: OnceCell<SetClasses> = OnceCell::new();

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set classes of the global runtime, installing them on first use.
///
/// Must not be called while the interpreter guard is held.
pub(crate) fn installed_classes() -> HostResult<SetClasses> {
    INSTALLED
        .get_or_try_init(|| {
            let config = Config::discover();
            logging::init_with_config(LogConfig::from_settings(&config.logging).with_env());
            with_runtime(|rt| install(rt, &config))
        })
        .copied()
}

/// Initialize logging and install the set classes (idempotent)
#[no_mangle]
pub extern "C" fn lovely_sets_init() -> bool {
    match installed_classes() {
        Ok(_) => true,
        Err(err) => {
            record_error("lovely_sets_init", &err);
            false
        }
    }
}

/// Last error message on this thread, or null.
///
/// The caller owns the returned string and releases it with
/// `lovely_sets_string_free`.
#[no_mangle]
pub extern "C" fn lovely_sets_last_error() -> *mut c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(std::ptr::null_mut(), |msg| msg.clone().into_raw())
    })
}

pub(crate) fn record_error(fn_name: &str, err: &HostError) {
    let message = err.to_string();
    log_ffi_error(fn_name, &message);

    // Messages never contain NUL; fall back to the class name if one does.
    let c_message = CString::new(message)
        .or_else(|_| CString::new(err.class_name()))
        .ok();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = c_message);
}

pub(crate) fn clear_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

#[cfg(test)]
mod tests;
