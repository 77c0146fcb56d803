//! Integers and C strings - C API for value conversion

use std::ffi::{c_char, CStr, CString};

use super::set::finish;
use super::{clear_error, record_error};
use crate::errors::HostResult;
use crate::host::{with_runtime, Host, Runtime};
use crate::logging::log_ffi_call;
use crate::objects::Value;

/// Box a C integer as a host integer.
///
/// Integers outside the small range are heap objects; release them with
/// `lovely_sets_release`.
#[no_mangle]
pub extern "C" fn lovely_sets_int_from_i64(value: i64) -> u64 {
    log_ffi_call("lovely_sets_int_from_i64");
    finish(
        "lovely_sets_int_from_i64",
        Ok(with_runtime(|rt| rt.box_integer(value as i128))),
    )
}

/// Extract a host integer into `out`.
///
/// # Safety
/// `out` must be null or valid for a write of one `i64`.
/// Returns false (leaving `out` untouched) for non-integers and integers
/// that do not fit.
#[no_mangle]
pub unsafe extern "C" fn lovely_sets_int_to_i64(value: u64, out: *mut i64) -> bool {
    log_ffi_call("lovely_sets_int_to_i64");
    let extracted = with_runtime(|rt| rt.int_value(Value::from_bits(value)))
        .and_then(|n| i64::try_from(n).ok());

    match extracted {
        Some(n) if !out.is_null() => {
            *out = n;
            true
        }
        _ => false,
    }
}

/// New host string copied from a NUL-terminated C string.
///
/// # Safety
/// `ptr` must be null or point to a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn lovely_sets_str_new(ptr: *const c_char) -> u64 {
    log_ffi_call("lovely_sets_str_new");
    if ptr.is_null() {
        clear_error();
        return Value::NIL.to_bits();
    }

    let bytes = CStr::from_ptr(ptr).to_bytes();
    finish("lovely_sets_str_new", Ok(with_runtime(|rt| rt.str_from_bytes(bytes))))
}

/// `value.to_s` as a newly allocated C string, or null on error.
///
/// Release the result with `lovely_sets_string_free`.
#[no_mangle]
pub extern "C" fn lovely_sets_to_s(value: u64) -> *mut c_char {
    log_ffi_call("lovely_sets_to_s");

    match with_runtime(|rt| copy_to_s(rt, Value::from_bits(value))) {
        Ok(text) => {
            clear_error();
            text.into_raw()
        }
        Err(err) => {
            record_error("lovely_sets_to_s", &err);
            std::ptr::null_mut()
        }
    }
}

/// Copy `receiver.to_s` out of the runtime.
///
/// The host string `to_s` produced is released afterwards when it was
/// allocated by this call; a receiver returning itself or a string it
/// already holds keeps it.
pub(crate) fn copy_to_s(rt: &mut Runtime, receiver: Value) -> HostResult<CString> {
    let mark = rt.allocation_mark();
    let to_s = rt.to_s_symbol();
    let text = rt.funcall(receiver, to_s, &[])?;
    let copied = rt.c_str(text).map(|c_str| c_str.to_owned());

    if text != receiver && rt.allocated_since(text, mark) {
        rt.release(text);
    }
    copied
}

/// Release a heap value (set handle, big integer, string) created through
/// this library. Immediates and already released handles are ignored.
///
/// The handle must not be used afterwards.
#[no_mangle]
pub extern "C" fn lovely_sets_release(value: u64) {
    log_ffi_call("lovely_sets_release");
    with_runtime(|rt| rt.release(Value::from_bits(value)));
    clear_error();
}

/// Release a string returned by this library.
///
/// # Safety
/// `ptr` must be null or a pointer previously returned by this library and
/// not yet freed.
#[no_mangle]
pub unsafe extern "C" fn lovely_sets_string_free(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}
