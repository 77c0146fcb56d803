//! Stringification helper - C string form of any host value
//!
//! Calls the value's own `to_s`. The result is either copied out
//! ([`to_c_string`]) or lent to a closure ([`with_c_str`]); the lent `&CStr`
//! borrows the host, so it cannot survive a later host call.

use std::ffi::{CStr, CString};

use crate::errors::HostResult;
use crate::host::Host;
use crate::objects::Value;

/// Owned copy of `value.to_s`
pub fn to_c_string<H: Host>(host: &mut H, value: Value) -> HostResult<CString> {
    with_c_str(host, value, |c_str| c_str.to_owned())
}

/// Run `f` over a borrowed view of `value.to_s`.
///
/// Errors raised by `to_s` propagate unchanged. A non-string result is a
/// type error and an interior NUL is an argument error.
pub fn with_c_str<H: Host, R>(
    host: &mut H,
    value: Value,
    f: impl FnOnce(&CStr) -> R,
) -> HostResult<R> {
    let to_s = host.to_s_symbol();
    let text = host.funcall(value, to_s, &[])?;
    let c_str = host.c_str(text)?;
    Ok(f(c_str))
}
