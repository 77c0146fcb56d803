//! Host heap - slot storage for non-immediate values
//!
//! Slots are reused after release. Each slot carries a generation that is
//! bumped on release, so identity keys taken before a release never match
//! the slot's next occupant. Strings keep a trailing NUL so a C view never
//! needs a copy.

use std::any::Any;

use super::ClassId;
use crate::logging::trace;

pub(crate) enum HeapObject {
    /// String bytes followed by a terminating NUL
    Str(Vec<u8>),
    /// Integer outside the small range
    BigInt(i128),
    /// Plain instance of a class
    Object { class: ClassId },
    /// Native data wrapped by a class
    Data {
        class: ClassId,
        payload: Box<dyn Any + Send>,
    },
}

impl HeapObject {
    pub(crate) fn string(bytes: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(bytes.len() + 1);
        buf.extend_from_slice(bytes);
        buf.push(0);
        HeapObject::Str(buf)
    }

    fn kind(&self) -> &'static str {
        match self {
            HeapObject::Str(_) => "string",
            HeapObject::BigInt(_) => "bigint",
            HeapObject::Object { .. } => "object",
            HeapObject::Data { .. } => "data",
        }
    }
}

#[derive(Default)]
pub(crate) struct Heap {
    slots: Vec<Option<HeapObject>>,
    generations: Vec<u32>,
    /// Allocation stamp of each slot's current occupant
    stamps: Vec<u64>,
    allocations: u64,
    free: Vec<usize>,
}

impl Heap {
    pub(crate) fn alloc(&mut self, obj: HeapObject) -> usize {
        trace!(event = "heap_alloc", kind = obj.kind());
        self.allocations += 1;

        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(obj);
                self.stamps[slot] = self.allocations;
                slot
            }
            None => {
                self.slots.push(Some(obj));
                self.generations.push(0);
                self.stamps.push(self.allocations);
                self.slots.len() - 1
            }
        }
    }

    /// Allocations made so far; compare with [`Heap::allocated_since`]
    pub(crate) fn mark(&self) -> u64 {
        self.allocations
    }

    /// Whether the live object in `slot` was allocated after `mark`
    pub(crate) fn allocated_since(&self, slot: usize, mark: u64) -> bool {
        self.get(slot).is_some() && self.stamps[slot] > mark
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&HeapObject> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut HeapObject> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Free a slot; returns the object that lived there
    pub(crate) fn release(&mut self, slot: usize) -> Option<HeapObject> {
        let obj = self.slots.get_mut(slot)?.take()?;
        trace!(event = "heap_release", slot, kind = obj.kind());
        self.generations[slot] = self.generations[slot].wrapping_add(1);
        self.free.push(slot);
        Some(obj)
    }

    /// Number of times `slot` has been released
    pub(crate) fn generation(&self, slot: usize) -> u32 {
        self.generations.get(slot).copied().unwrap_or(0)
    }

    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_nul_terminated() {
        match HeapObject::string(b"abc") {
            HeapObject::Str(buf) => assert_eq!(buf, b"abc\0"),
            _ => panic!("expected string"),
        }
    }

    #[test]
    fn test_slot_reuse() {
        let mut heap = Heap::default();
        let a = heap.alloc(HeapObject::BigInt(1));
        let b = heap.alloc(HeapObject::BigInt(2));
        assert_eq!(heap.live(), 2);

        assert!(heap.release(a).is_some());
        assert!(heap.release(a).is_none());
        assert_eq!(heap.live(), 1);

        let c = heap.alloc(HeapObject::BigInt(3));
        assert_eq!(c, a);
        assert!(matches!(heap.get(b), Some(HeapObject::BigInt(2))));
        assert!(matches!(heap.get(c), Some(HeapObject::BigInt(3))));
    }

    #[test]
    fn test_allocated_since_mark() {
        let mut heap = Heap::default();
        let old = heap.alloc(HeapObject::BigInt(1));
        let mark = heap.mark();
        let fresh = heap.alloc(HeapObject::BigInt(2));

        assert!(!heap.allocated_since(old, mark));
        assert!(heap.allocated_since(fresh, mark));

        heap.release(fresh);
        assert!(!heap.allocated_since(fresh, mark));
    }

    #[test]
    fn test_generation_bumps_on_release() {
        let mut heap = Heap::default();
        let a = heap.alloc(HeapObject::BigInt(1));
        assert_eq!(heap.generation(a), 0);

        heap.release(a);
        let b = heap.alloc(HeapObject::BigInt(2));
        assert_eq!(b, a);
        assert_eq!(heap.generation(b), 1);

        // a double release does not bump again
        heap.release(b);
        heap.release(b);
        assert_eq!(heap.generation(b), 2);
    }
}
