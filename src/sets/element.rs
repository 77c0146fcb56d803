//! Set elements - structural keys for host values
//!
//! nil, booleans, integers and strings compare by value (small and big
//! integers compare numerically). Every other heap object compares by
//! identity: its handle plus the slot generation, so a released object
//! never matches whatever reuses its slot.

use crate::host::Runtime;
use crate::objects::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Element {
    Nil,
    Bool(bool),
    Int(i128),
    Str(Vec<u8>),
    /// Identity of any other heap object
    Ref { bits: u64, generation: u32 },
}

impl Element {
    /// Key for `value` under the set equivalence relation
    pub fn from_value(rt: &Runtime, value: Value) -> Self {
        if value.is_nil() {
            return Element::Nil;
        }
        if let Some(b) = value.as_bool() {
            return Element::Bool(b);
        }
        if let Some(n) = rt.int_value(value) {
            return Element::Int(n);
        }
        match rt.string_bytes(value) {
            Ok(bytes) => Element::Str(bytes.to_vec()),
            Err(_) => Element::Ref {
                bits: value.to_bits(),
                generation: rt.generation_of(value),
            },
        }
    }

    /// Host value for this key; strings are freshly allocated
    pub fn to_value(&self, rt: &mut Runtime) -> Value {
        use crate::host::Host;

        match self {
            Element::Nil => Value::NIL,
            Element::Bool(b) => Value::from_bool(*b),
            Element::Int(n) => rt.box_integer(*n),
            Element::Str(bytes) => rt.str_from_bytes(bytes),
            Element::Ref { bits, .. } => Value::from_bits(*bits),
        }
    }
}

impl From<i32> for Element {
    fn from(n: i32) -> Self {
        Element::Int(n as i128)
    }
}

impl From<i64> for Element {
    fn from(n: i64) -> Self {
        Element::Int(n as i128)
    }
}

impl From<bool> for Element {
    fn from(b: bool) -> Self {
        Element::Bool(b)
    }
}

impl From<&str> for Element {
    fn from(s: &str) -> Self {
        Element::Str(s.as_bytes().to_vec())
    }
}

impl From<String> for Element {
    fn from(s: String) -> Self {
        Element::Str(s.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Host;

    #[test]
    fn test_structural_keys() {
        let mut rt = Runtime::new();
        let a = rt.str_new("hello");
        let b = rt.str_new("hello");
        assert_ne!(a, b);
        assert_eq!(Element::from_value(&rt, a), Element::from_value(&rt, b));
        assert_eq!(Element::from_value(&rt, a), Element::from("hello"));
    }

    #[test]
    fn test_big_and_small_ints_agree() {
        let mut rt = Runtime::new();
        let small = rt.box_integer(7);
        let big = rt.box_integer(1i128 << 70);
        assert_eq!(Element::from_value(&rt, small), Element::Int(7));
        assert_eq!(Element::from_value(&rt, big), Element::Int(1i128 << 70));
    }

    #[test]
    fn test_objects_by_identity() {
        let mut rt = Runtime::new();
        let class = rt.define_class("Point", None).unwrap();
        let p = rt.object_new(class).unwrap();
        let q = rt.object_new(class).unwrap();
        assert_eq!(Element::from_value(&rt, p), Element::from_value(&rt, p));
        assert_ne!(Element::from_value(&rt, p), Element::from_value(&rt, q));
        assert_eq!(Element::from_value(&rt, p).to_value(&mut rt), p);
    }

    #[test]
    fn test_released_identity_not_reused() {
        use crate::sets::{SetSize, SetVariant, SortedSet};

        let mut rt = Runtime::new();
        let class = rt.define_class("Point", None).unwrap();
        let p = rt.object_new(class).unwrap();
        let mut set = SortedSet::new();
        assert!(set.insert(Element::from_value(&rt, p)));

        rt.release(p);
        let q = rt.object_new(class).unwrap();
        assert_eq!(q, p); // same slot

        assert!(set.insert(Element::from_value(&rt, q)));
        assert_eq!(set.size(), 2);
    }

    #[test]
    fn test_to_value() {
        let mut rt = Runtime::new();
        let v = Element::from("abc").to_value(&mut rt);
        assert_eq!(rt.string_bytes(v).unwrap(), b"abc");
        assert_eq!(Element::Nil.to_value(&mut rt), Value::NIL);
        let neg = Element::Int(-5).to_value(&mut rt);
        assert_eq!(rt.int_value(neg), Some(-5));
    }
}
