//! Tests for the C ABI

use super::*;
use parking_lot::{const_mutex, Mutex};
use std::ffi::CStr;

use super::string::copy_to_s;
use crate::host::{Host, Runtime};
use crate::objects::Value;
use crate::sets::{Element, SetVariant, SortedSet};

/// Serializes tests that count objects on the global runtime
static SERIAL: Mutex<()> = const_mutex(());

fn live_objects() -> usize {
    with_runtime(|rt: &mut Runtime| rt.live_objects())
}

fn take_string(ptr: *mut c_char) -> String {
    assert!(!ptr.is_null());
    let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
    unsafe { lovely_sets_string_free(ptr) };
    text
}

fn int_of(bits: u64) -> Option<i64> {
    let mut out = 0i64;
    unsafe { lovely_sets_int_to_i64(bits, &mut out) }.then_some(out)
}

#[test]
fn test_init_idempotent() {
    assert!(lovely_sets_init());
    assert!(lovely_sets_init());
}

#[test]
fn test_length_of_new_sets() {
    let _serial = SERIAL.lock();
    assert!(lovely_sets_init());

    let sorted = lovely_sets_sorted_set_new();
    let hashed = lovely_sets_hash_set_new();
    assert_ne!(sorted, Value::NIL.to_bits());

    assert_eq!(int_of(lovely_sets_length(sorted)), Some(0));
    assert_eq!(int_of(lovely_sets_length(hashed)), Some(0));
}

#[test]
fn test_length_after_mutation() {
    let _serial = SERIAL.lock();
    assert!(lovely_sets_init());
    let handle = lovely_sets_sorted_set_new();

    with_runtime(|rt: &mut Runtime| {
        let set = rt.data_mut::<SortedSet>(Value::from_bits(handle)).unwrap();
        set.insert(Element::from(42));
        set.insert(Element::from("hello"));
    });

    assert_eq!(int_of(lovely_sets_length(handle)), Some(2));
}

#[test]
fn test_length_error_is_recorded() {
    let _serial = SERIAL.lock();
    assert!(lovely_sets_init());

    let bits = lovely_sets_length(lovely_sets_int_from_i64(5));
    assert_eq!(bits, Value::NIL.to_bits());

    let message = take_string(lovely_sets_last_error());
    assert!(message.starts_with("NoMethodError"), "{}", message);
}

#[test]
fn test_to_s_roundtrip() {
    let _serial = SERIAL.lock();
    assert_eq!(take_string(lovely_sets_to_s(lovely_sets_int_from_i64(42))), "42");
    assert_eq!(take_string(lovely_sets_to_s(lovely_sets_int_from_i64(-7))), "-7");
    assert_eq!(take_string(lovely_sets_to_s(Value::NIL.to_bits())), "");

    let hello = CString::new("hello").unwrap();
    let s = unsafe { lovely_sets_str_new(hello.as_ptr()) };
    assert_eq!(take_string(lovely_sets_to_s(s)), "hello");
}

#[test]
fn test_int_conversion() {
    let _serial = SERIAL.lock();
    assert_eq!(int_of(lovely_sets_int_from_i64(i64::MAX)), Some(i64::MAX));
    assert_eq!(int_of(lovely_sets_int_from_i64(i64::MIN)), Some(i64::MIN));
    assert_eq!(int_of(Value::TRUE.to_bits()), None);
    assert!(!unsafe { lovely_sets_int_to_i64(lovely_sets_int_from_i64(1), std::ptr::null_mut()) });
}

#[test]
fn test_null_string_is_nil() {
    let bits = unsafe { lovely_sets_str_new(std::ptr::null()) };
    assert_eq!(bits, Value::NIL.to_bits());
}

#[test]
fn test_to_s_does_not_grow_heap() {
    let _serial = SERIAL.lock();
    let small = lovely_sets_int_from_i64(42);
    let big = lovely_sets_int_from_i64(i64::MAX);
    let before = live_objects();

    for _ in 0..100 {
        assert_eq!(take_string(lovely_sets_to_s(small)), "42");
        assert_eq!(take_string(lovely_sets_to_s(big)), i64::MAX.to_string());
    }

    assert_eq!(live_objects(), before);
    lovely_sets_release(big);
}

#[test]
fn test_to_s_keeps_string_receiver() {
    let _serial = SERIAL.lock();
    let hello = CString::new("hello").unwrap();
    let s = unsafe { lovely_sets_str_new(hello.as_ptr()) };
    let before = live_objects();

    assert_eq!(take_string(lovely_sets_to_s(s)), "hello");
    assert_eq!(take_string(lovely_sets_to_s(s)), "hello");
    assert_eq!(live_objects(), before);
    lovely_sets_release(s);
}

#[test]
fn test_release_handles() {
    let _serial = SERIAL.lock();
    assert!(lovely_sets_init());
    let before = live_objects();

    let set = lovely_sets_sorted_set_new();
    let big = lovely_sets_int_from_i64(i64::MIN);
    assert_eq!(live_objects(), before + 2);

    lovely_sets_release(set);
    lovely_sets_release(big);
    assert_eq!(live_objects(), before);

    // immediates and stale handles are ignored
    lovely_sets_release(Value::NIL.to_bits());
    lovely_sets_release(set);
    assert_eq!(live_objects(), before);
    assert!(lovely_sets_last_error().is_null());
}

#[test]
fn test_copy_to_s_releases_only_fresh_strings() {
    let mut rt = Runtime::new();
    let n = rt.box_integer(7);
    let s = rt.str_new("kept");
    let before = rt.live_objects();

    assert_eq!(copy_to_s(&mut rt, n).unwrap().to_str().unwrap(), "7");
    assert_eq!(copy_to_s(&mut rt, s).unwrap().to_str().unwrap(), "kept");
    assert_eq!(rt.live_objects(), before);
    assert_eq!(rt.string_bytes(s).unwrap(), b"kept");
}

#[test]
fn test_int_from_i64_clears_last_error() {
    let _serial = SERIAL.lock();
    assert!(lovely_sets_init());
    lovely_sets_length(lovely_sets_int_from_i64(5));
    assert!(take_string(lovely_sets_last_error()).starts_with("NoMethodError"));

    lovely_sets_int_from_i64(1);
    assert!(lovely_sets_last_error().is_null());
}
