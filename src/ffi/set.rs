//! Set handles - C API for set creation and `length`

use super::{clear_error, installed_classes, record_error};
use crate::binding::{new_set, SetClasses, LENGTH};
use crate::errors::HostResult;
use crate::host::{with_runtime, ClassId, Runtime};
use crate::logging::log_ffi_call;
use crate::objects::Value;
use crate::sets::{HashSet, SetVariant, SortedSet};

/// New empty `SortedSet`; returns its handle bits, or `nil` bits on error
#[no_mangle]
pub extern "C" fn lovely_sets_sorted_set_new() -> u64 {
    new_handle::<SortedSet>("lovely_sets_sorted_set_new", |classes| classes.sorted_set)
}

/// New empty `HashSet`; returns its handle bits, or `nil` bits on error
#[no_mangle]
pub extern "C" fn lovely_sets_hash_set_new() -> u64 {
    new_handle::<HashSet>("lovely_sets_hash_set_new", |classes| classes.hash_set)
}

fn new_handle<T: SetVariant>(fn_name: &str, pick: fn(&SetClasses) -> ClassId) -> u64 {
    log_ffi_call(fn_name);
    let result = installed_classes()
        .and_then(|classes| with_runtime(|rt| new_set::<T>(rt, pick(&classes))));
    finish(fn_name, result)
}

/// `handle.length` dispatched through the host method table.
///
/// Returns the integer's value bits, or `nil` bits on error.
#[no_mangle]
pub extern "C" fn lovely_sets_length(handle: u64) -> u64 {
    log_ffi_call("lovely_sets_length");
    let result = with_runtime(|rt: &mut Runtime| rt.send(Value::from_bits(handle), LENGTH, &[]));
    finish("lovely_sets_length", result)
}

pub(super) fn finish(fn_name: &str, result: HostResult<Value>) -> u64 {
    match result {
        Ok(value) => {
            clear_error();
            value.to_bits()
        }
        Err(err) => {
            record_error(fn_name, &err);
            Value::NIL.to_bits()
        }
    }
}
