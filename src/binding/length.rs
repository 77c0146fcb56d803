//! Length accessor - set cardinality as a host integer
//!
//! Design: one generic thunk per set variant. Resolution is the host's
//! concern; the only capability required from `T` is [`SetSize`].

use std::any::Any;

use crate::errors::HostResult;
use crate::host::{ClassId, Host};
use crate::logging::{debug, trace};
use crate::objects::Value;
use crate::sets::SetSize;

/// Host method name the accessor is published under
pub const LENGTH: &str = "length";

/// `set.length` - current cardinality of the set behind `this`.
///
/// Pure read: no mutation, no host callback, and a heap allocation only
/// when the count leaves the small-integer range.
pub fn set_length<H: Host, T: SetSize + Any>(
    host: &mut H,
    this: Value,
    _args: &[Value],
) -> HostResult<Value> {
    let size = cardinality(host.resolve::<T>(this)?);
    trace!(event = "set_length", size);
    Ok(host.box_integer(size as i128))
}

/// Cardinality of a borrowed set
#[inline]
pub fn cardinality<T: SetSize + ?Sized>(set: &T) -> usize {
    set.size()
}

/// Bind `length` (arity 0) on `class` for variant `T`.
///
/// Registering twice rebinds the same function.
pub fn init_set<H: Host, T: SetSize + Any>(host: &mut H, class: ClassId) -> HostResult<()> {
    host.define_method(class, LENGTH, 0, set_length::<H, T>)?;
    debug!(event = "init_set", class = class.0, method = LENGTH);
    Ok(())
}

/// [`init_set`] plus the same accessor under each alias
pub fn init_set_with_aliases<H: Host, T: SetSize + Any>(
    host: &mut H,
    class: ClassId,
    aliases: &[String],
) -> HostResult<()> {
    init_set::<H, T>(host, class)?;
    for alias in aliases.iter().filter(|alias| alias.as_str() != LENGTH) {
        host.define_method(class, alias, 0, set_length::<H, T>)?;
    }
    Ok(())
}
