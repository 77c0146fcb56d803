//! Host bindings for the native sets
//!
//! - `length` - cardinality accessor and its registration hook
//! - `to_s` - C string form of arbitrary host values
//!
//! [`install`] wires every set variant into a host the way an extension's
//! init routine does.

pub mod length;
pub mod to_s;


pub use length::{cardinality, init_set, init_set_with_aliases, set_length, LENGTH};
pub use to_s::{to_c_string, with_c_str};

use crate::config::Config;
use crate::errors::HostResult;
use crate::host::{ClassId, Runtime};
use crate::logging::info;
use crate::objects::Value;
use crate::sets::{HashSet, SetVariant, SortedSet};

/// Classes created by [`install`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetClasses {
    pub sorted_set: ClassId,
    pub hash_set: ClassId,
}

/// Define the set classes on `rt` and register their accessors
pub fn install(rt: &mut Runtime, config: &Config) -> HostResult<SetClasses> {
    let aliases = &config.methods.aliases;

    let sorted_set = define_set_class::<SortedSet>(rt, &config.classes.sorted_set, aliases)?;
    let hash_set = define_set_class::<HashSet>(rt, &config.classes.hash_set, aliases)?;

    info!(
        event = "install",
        sorted_set = %config.classes.sorted_set,
        hash_set = %config.classes.hash_set,
        aliases = aliases.len(),
        "Set classes installed"
    );
    Ok(SetClasses { sorted_set, hash_set })
}

fn define_set_class<T: SetVariant>(
    rt: &mut Runtime,
    name: &str,
    aliases: &[String],
) -> HostResult<ClassId> {
    let class = rt.define_class(name, None)?;
    init_set_with_aliases::<Runtime, T>(rt, class, aliases)?;
    Ok(class)
}

/// Empty instance of `T` wrapped in `class`
pub fn new_set<T: SetVariant>(rt: &mut Runtime, class: ClassId) -> HostResult<Value> {
    rt.wrap_data(class, T::default())
}
