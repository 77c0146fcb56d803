//! Object system - tagged representation of host values
//!
//! Design: Tagged scalars + heap slots:
//! - Small ints inline (61-bit signed)
//! - nil/true/false as special constants
//! - Everything else is an index into the host heap
//! - Integers outside the small range widen to a heap big integer

/// Tagged value encoding
///
/// Layout (64-bit):
/// - Bits 0-1 = 00: Heap reference (slot index in bits 3-63)
/// - Bits 0-1 = 01: SmallInt (61-bit signed, bits 3-63)
/// - Bits 0-1 = 11: Special (nil/true/false, bits 2-7 encode which)
const TAG_MASK: u64 = 0b11;
const REF_TAG: u64 = 0b00;
const INT_TAG: u64 = 0b01;
const SPECIAL_TAG: u64 = 0b11;

const PAYLOAD_SHIFT: u32 = 3;
const SPECIAL_TYPE_SHIFT: u32 = 2;
const SPECIAL_NIL: u64 = 0;
const SPECIAL_TRUE: u64 = 1;
const SPECIAL_FALSE: u64 = 2;

/// Smallest integer representable without a heap slot
pub const SMALL_INT_MIN: i64 = -(1i64 << 60);
/// Largest integer representable without a heap slot
pub const SMALL_INT_MAX: i64 = (1i64 << 60) - 1;

/// Universal host value (8 bytes)
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value {
    bits: u64,
}

impl Value {
    pub const NIL: Value = Value::special(SPECIAL_NIL);
    pub const TRUE: Value = Value::special(SPECIAL_TRUE);
    pub const FALSE: Value = Value::special(SPECIAL_FALSE);

    const fn special(code: u64) -> Self {
        Self {
            bits: (code << SPECIAL_TYPE_SHIFT) | SPECIAL_TAG,
        }
    }

    /// Rebuild a value from its raw bits (C ABI boundary)
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.bits
    }

    /// Create small integer, `None` when the value needs a heap slot
    #[inline]
    pub fn fixnum(val: i64) -> Option<Self> {
        if (SMALL_INT_MIN..=SMALL_INT_MAX).contains(&val) {
            Some(Self {
                bits: ((val as u64) << PAYLOAD_SHIFT) | INT_TAG,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn from_bool(val: bool) -> Self {
        if val {
            Self::TRUE
        } else {
            Self::FALSE
        }
    }

    /// Reference to a heap slot
    #[inline]
    pub(crate) const fn from_slot(slot: usize) -> Self {
        Self {
            bits: ((slot as u64) << PAYLOAD_SHIFT) | REF_TAG,
        }
    }

    #[inline]
    pub fn is_ref(self) -> bool {
        (self.bits & TAG_MASK) == REF_TAG
    }

    #[inline]
    pub fn is_fixnum(self) -> bool {
        (self.bits & TAG_MASK) == INT_TAG
    }

    #[inline]
    pub fn is_special(self) -> bool {
        (self.bits & TAG_MASK) == SPECIAL_TAG
    }

    #[inline]
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }

    /// Small int payload, if this is one
    #[inline]
    pub fn as_fixnum(self) -> Option<i64> {
        self.is_fixnum()
            .then(|| (self.bits as i64) >> PAYLOAD_SHIFT)
    }

    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::TRUE => Some(true),
            Self::FALSE => Some(false),
            _ => None,
        }
    }

    /// Heap slot index, if this is a reference
    #[inline]
    pub(crate) fn slot(self) -> Option<usize> {
        self.is_ref()
            .then(|| (self.bits >> PAYLOAD_SHIFT) as usize)
    }

    /// Truthiness (everything except nil and false)
    #[inline]
    pub fn is_truthy(self) -> bool {
        self != Self::NIL && self != Self::FALSE
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(n) = self.as_fixnum() {
            write!(f, "Value::Int({})", n)
        } else if let Some(b) = self.as_bool() {
            write!(f, "Value::Bool({})", b)
        } else if self.is_nil() {
            write!(f, "Value::Nil")
        } else if let Some(slot) = self.slot() {
            write!(f, "Value::Ref(#{})", slot)
        } else {
            write!(f, "Value::Special({:#x})", self.bits)
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::NIL
    }
}
