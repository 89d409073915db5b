//! Mutable byte-sequence built-in type.
//!
//! Construction accepts heterogeneous sources (counts, text, byte-valued
//! iterables), item access supports the index protocol and slices, and
//! comparison is byte-lexicographic against both bytearray and textual
//! operands. The buffer is guarded by a lock for memory safety of the shared
//! payload; cross-operation serialization of mutation remains the caller's
//! responsibility.

use crate::object::compare::{byte_view, compare_bytes, unorderable};
use crate::object::type_obj::{TypeFlags, TypeId, TypeObject, TypeSlots};
use crate::object::{NativeValue, Value, dispatch};
use crate::types::list::SeqIterObject;
use crate::types::slice::{normalize_index, try_index};
use ember_core::{Frame, Raised, runtime_config};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// ByteArrayObject
// =============================================================================

/// Growable byte buffer payload, shared behind its handle's `Arc`.
pub struct ByteArrayObject {
    /// Byte storage.
    data: RwLock<Vec<u8>>,
}

impl ByteArrayObject {
    /// Create an empty bytearray.
    #[inline]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a bytearray from a slice.
    #[inline]
    pub fn from_slice(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Create a bytearray from an owned vector.
    #[inline]
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            data: RwLock::new(data),
        }
    }

    /// Get the number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Clone the bytes into a new vector.
    #[inline]
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.read().clone()
    }

    /// Get a byte by index (supports negative indexing).
    #[inline]
    pub fn get(&self, index: i64) -> Option<u8> {
        let data = self.data.read();
        let idx = normalize_raw(index, data.len())?;
        data.get(idx).copied()
    }

    /// Append one byte.
    #[inline]
    pub fn push(&self, byte: u8) {
        self.data.write().push(byte);
    }

    /// Set one byte by index (supports negative indexing).
    ///
    /// Returns false on an out-of-bounds index.
    #[inline]
    pub fn set(&self, index: i64, byte: u8) -> bool {
        let mut data = self.data.write();
        let Some(idx) = normalize_raw(index, data.len()) else {
            return false;
        };
        data[idx] = byte;
        true
    }
}

impl Default for ByteArrayObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ByteArrayObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteArrayObject")
            .field("len", &self.len())
            .finish()
    }
}

#[inline]
fn normalize_raw(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let idx = if index < 0 { len + index } else { index };
    if idx < 0 || idx >= len {
        None
    } else {
        Some(idx as usize)
    }
}

// =============================================================================
// Type descriptor
// =============================================================================

/// Type descriptor for bytearray.
pub static BYTEARRAY_TYPE: TypeObject = TypeObject {
    id: TypeId::BYTEARRAY,
    name: "bytearray",
    flags: TypeFlags::instantiable_basetype(),
    slots: TypeSlots {
        construct: Some(bytearray_construct),
        compare: Some(bytearray_compare),
        get_item: Some(bytearray_get_item),
        iter: Some(bytearray_iter),
        repr: Some(bytearray_repr),
        str_: Some(bytearray_str),
        native: Some(bytearray_native),
        ..TypeSlots::EMPTY
    },
};

/// Narrow a handle already dispatched through `BYTEARRAY_TYPE`.
fn expect_bytearray<'a>(
    frame: &Frame,
    obj: &'a Value,
) -> Result<&'a ByteArrayObject, Raised> {
    match obj.as_bytearray() {
        Some(ba) => Ok(ba),
        None => Err(frame.raise_type_error(format!(
            "bytearray slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

// =============================================================================
// Construction
// =============================================================================

fn bytearray_construct(
    frame: &mut Frame,
    _type_obj: &'static TypeObject,
    args: &[Value],
) -> Result<Value, Raised> {
    if args.len() > 1 {
        return Err(frame.raise_type_error(format!(
            "bytearray() takes at most 1 argument ({} given)",
            args.len()
        )));
    }

    let Some(source) = args.first() else {
        return Ok(Value::bytearray(ByteArrayObject::new()));
    };

    // Count form: a buffer of N zero bytes.
    if let Some(count) = source.as_integer() {
        return from_count(frame, count);
    }

    // Textual form: raw bytes verbatim.
    if let Some(s) = source.as_str() {
        return Ok(Value::bytearray(ByteArrayObject::from_slice(s.as_bytes())));
    }

    // Copy form.
    if let Some(other) = source.as_bytearray() {
        return Ok(Value::bytearray(ByteArrayObject::from_vec(other.to_vec())));
    }

    // Iterable form; the source is drained eagerly before the bytearray is
    // considered built. Non-iterables surface here.
    let items = dispatch::collect_iterable(frame, source)?;
    let mut data = Vec::with_capacity(items.len());
    for item in &items {
        data.push(element_to_byte(frame, item)?);
    }
    Ok(Value::bytearray(ByteArrayObject::from_vec(data)))
}

fn from_count(frame: &Frame, count: i64) -> Result<Value, Raised> {
    if count < 0 {
        return Err(frame.raise_value_error("negative count"));
    }
    if count as u64 > runtime_config().max_byte_alloc {
        return Err(frame.raise_overflow_error("bytearray size too large"));
    }
    Ok(Value::bytearray(ByteArrayObject::from_vec(vec![
        0;
        count as usize
    ])))
}

fn element_to_byte(frame: &Frame, item: &Value) -> Result<u8, Raised> {
    if let Some(i) = item.as_integer() {
        if (0..=255).contains(&i) {
            return Ok(i as u8);
        }
        return Err(frame.raise_value_error("byte must be in range(0, 256)"));
    }
    if let Some(s) = item.as_str() {
        let bytes = s.as_bytes();
        if bytes.len() == 1 {
            return Ok(bytes[0]);
        }
        return Err(frame.raise_value_error("string must be of size 1"));
    }
    Err(frame.raise_type_error("an integer or string of size 1 is required"))
}

// =============================================================================
// Item access
// =============================================================================

fn bytearray_get_item(frame: &mut Frame, obj: &Value, key: &Value) -> Result<Value, Raised> {
    let ba = expect_bytearray(frame, obj)?;

    if let Some(slice) = key.as_slice() {
        let data = ba.to_vec();
        let indices = slice.indices(frame, data.len())?;
        let selected: Vec<u8> = indices.iter().map(|i| data[i]).collect();
        return Ok(Value::bytearray(ByteArrayObject::from_vec(selected)));
    }

    // Index-protocol errors propagate unchanged.
    match try_index(frame, key)? {
        Some(raw) => {
            let data = ba.to_vec();
            let idx = normalize_index(frame, data.len(), raw)?;
            Ok(Value::int(data[idx] as i64))
        }
        None => Err(frame.raise_type_error(format!(
            "bytearray indices must be integers or slice, not {}",
            key.type_name()
        ))),
    }
}

// =============================================================================
// Comparison
// =============================================================================

fn bytearray_compare(frame: &mut Frame, a: &Value, b: &Value) -> Result<Ordering, Raised> {
    let ba = expect_bytearray(frame, a)?;
    // The comparand may be a bytearray or a textual value with the same
    // byte content; ordering and equality hold for both.
    let Some(other) = byte_view(b) else {
        return Err(unorderable(frame, a, b));
    };
    Ok(compare_bytes(&ba.to_vec(), &other))
}

// =============================================================================
// Iteration
// =============================================================================

fn bytearray_iter(frame: &mut Frame, obj: &Value) -> Result<Value, Raised> {
    let ba = expect_bytearray(frame, obj)?;
    let items: Vec<Value> = ba.to_vec().into_iter().map(|b| Value::int(b as i64)).collect();
    Ok(Value::seq_iter(SeqIterObject::new(items)))
}

// =============================================================================
// Text conversion
// =============================================================================

fn bytearray_repr(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    let ba = expect_bytearray(frame, obj)?;
    let data = ba.to_vec();
    let mut out = String::with_capacity(data.len() + 16);
    out.push_str("bytearray(b'");
    for &byte in &data {
        escape_byte_into(&mut out, byte);
    }
    out.push_str("')");
    Ok(out)
}

fn bytearray_str(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    let ba = expect_bytearray(frame, obj)?;
    Ok(String::from_utf8_lossy(&ba.to_vec()).into_owned())
}

/// Escape one byte the way the surface language's bytes repr does.
fn escape_byte_into(out: &mut String, byte: u8) {
    match byte {
        b'\\' => out.push_str("\\\\"),
        b'\'' => out.push_str("\\'"),
        b'\t' => out.push_str("\\t"),
        b'\n' => out.push_str("\\n"),
        b'\r' => out.push_str("\\r"),
        0x20..=0x7e => out.push(byte as char),
        _ => out.push_str(&format!("\\x{:02x}", byte)),
    }
}

// =============================================================================
// Native interop
// =============================================================================

fn bytearray_native(frame: &mut Frame, obj: &Value) -> Result<NativeValue, Raised> {
    let ba = expect_bytearray(frame, obj)?;
    Ok(NativeValue::Bytes(ba.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::registry::init_builtin_types;

    fn construct_one(arg: Value) -> Result<Value, Raised> {
        init_builtin_types();
        let mut frame = Frame::root();
        bytearray_construct(&mut frame, &BYTEARRAY_TYPE, &[arg])
    }

    fn bytes_of(v: &Value) -> Vec<u8> {
        v.as_bytearray().unwrap().to_vec()
    }

    // =========================================================================
    // Payload
    // =========================================================================

    #[test]
    fn test_payload_get_negative_and_bounds() {
        let ba = ByteArrayObject::from_slice(&[10, 20, 30]);
        assert_eq!(ba.get(0), Some(10));
        assert_eq!(ba.get(-1), Some(30));
        assert_eq!(ba.get(3), None);
        assert_eq!(ba.get(-4), None);
    }

    #[test]
    fn test_payload_push_and_set() {
        let ba = ByteArrayObject::new();
        ba.push(1);
        ba.push(2);
        assert!(ba.set(-1, 7));
        assert!(!ba.set(2, 9));
        assert_eq!(ba.to_vec(), vec![1, 7]);
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_construct_empty_and_count() {
        init_builtin_types();
        let mut frame = Frame::root();
        let empty = bytearray_construct(&mut frame, &BYTEARRAY_TYPE, &[]).unwrap();
        assert!(bytes_of(&empty).is_empty());

        let zeros = construct_one(Value::int(3)).unwrap();
        assert_eq!(bytes_of(&zeros), vec![0, 0, 0]);
    }

    #[test]
    fn test_construct_negative_count() {
        let err = construct_one(Value::int(-1)).unwrap_err();
        assert!(matches!(err, Raised::ValueError(_)));
        assert_eq!(err.message(), "negative count");
    }

    #[test]
    fn test_construct_count_over_cap() {
        let err = construct_one(Value::int(i64::MAX)).unwrap_err();
        assert!(matches!(err, Raised::OverflowError(_)));
        assert_eq!(err.message(), "bytearray size too large");
    }

    #[test]
    fn test_construct_from_str_and_copy() {
        let a = construct_one(Value::string("abc")).unwrap();
        assert_eq!(bytes_of(&a), b"abc");

        let b = construct_one(a.clone()).unwrap();
        assert_eq!(bytes_of(&b), b"abc");
        assert!(!a.identity_eq(&b));
    }

    #[test]
    fn test_construct_from_int_list() {
        let v = construct_one(Value::list(vec![
            Value::int(3),
            Value::int(2),
            Value::int(1),
        ]))
        .unwrap();
        assert_eq!(bytes_of(&v), vec![3, 2, 1]);
    }

    #[test]
    fn test_construct_from_char_list() {
        let v = construct_one(Value::list(vec![
            Value::string("a"),
            Value::string("b"),
            Value::string("c"),
        ]))
        .unwrap();
        assert_eq!(bytes_of(&v), b"abc");
    }

    #[test]
    fn test_construct_element_errors() {
        let err = construct_one(Value::list(vec![Value::int(-1)])).unwrap_err();
        assert_eq!(err.message(), "byte must be in range(0, 256)");

        let err = construct_one(Value::list(vec![Value::int(256)])).unwrap_err();
        assert_eq!(err.message(), "byte must be in range(0, 256)");

        let err = construct_one(Value::list(vec![Value::string("ab")])).unwrap_err();
        assert!(matches!(err, Raised::ValueError(_)));
        assert_eq!(err.message(), "string must be of size 1");

        let err =
            construct_one(Value::list(vec![Value::int(5), Value::list(vec![])])).unwrap_err();
        assert!(matches!(err, Raised::TypeError(_)));
        assert_eq!(err.message(), "an integer or string of size 1 is required");
    }

    #[test]
    fn test_construct_non_iterable() {
        let err = construct_one(Value::none()).unwrap_err();
        assert!(matches!(err, Raised::TypeError(_)));
        assert_eq!(err.message(), "'NoneType' object is not iterable");
    }

    // =========================================================================
    // Text conversion
    // =========================================================================

    #[test]
    fn test_repr_escaping() {
        init_builtin_types();
        let mut frame = Frame::root();
        let v = Value::bytearray(ByteArrayObject::from_slice(b"a\\b'c\td\x00"));
        assert_eq!(
            bytearray_repr(&mut frame, &v).unwrap(),
            "bytearray(b'a\\\\b\\'c\\td\\x00')"
        );
    }
}
