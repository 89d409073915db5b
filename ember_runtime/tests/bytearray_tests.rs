//! End-to-end bytearray behavior through the public dispatch surface.

use ember_runtime::object::{compare, dispatch};
use ember_runtime::types::bytearray::{ByteArrayObject, BYTEARRAY_TYPE};
use ember_runtime::types::function::FunctionObject;
use ember_runtime::types::slice::SliceObject;
use ember_runtime::{init_builtin_types, Frame, Raised, TypeFlags, TypeSlots, Value};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;

fn ba(content: &[u8]) -> Value {
    Value::bytearray(ByteArrayObject::from_slice(content))
}

fn bytes_of(frame: &mut Frame, v: &Value) -> Vec<u8> {
    dispatch::to_native(frame, v)
        .unwrap()
        .as_bytes()
        .unwrap()
        .to_vec()
}

// =============================================================================
// Comparison
// =============================================================================

#[test]
fn test_comparison_matrix() {
    init_builtin_types();
    let mut frame = Frame::root();

    let cases: Vec<(Value, Value, Ordering)> = vec![
        (ba(b""), ba(b""), Ordering::Equal),
        (ba(b""), ba(b"foo"), Ordering::Less),
        (ba(b"foo"), ba(b"foo"), Ordering::Equal),
        (ba(b"foo"), ba(b"foob"), Ordering::Less),
        (ba(b"foob"), ba(b"foo"), Ordering::Greater),
        (ba(b"bar"), ba(b"baz"), Ordering::Less),
        (ba(b"foo"), Value::string("foo"), Ordering::Equal),
        (ba(b"foo"), Value::string("fop"), Ordering::Less),
    ];
    for (a, b, expected) in cases {
        assert_eq!(compare::compare(&mut frame, &a, &b).unwrap(), expected);
    }
}

#[test]
fn test_comparison_with_unrelated_kind_is_type_error() {
    init_builtin_types();
    let mut frame = Frame::root();
    let err = compare::compare(&mut frame, &ba(b"foo"), &Value::int(3)).unwrap_err();
    assert!(matches!(err, Raised::TypeError(_)));
    assert_eq!(err.message(), "cannot compare 'bytearray' with 'int'");
}

#[test]
fn test_equality_with_str_is_content_based() {
    init_builtin_types();
    let mut frame = Frame::root();
    assert!(compare::values_eq(&mut frame, &ba(b"foo"), &Value::string("foo")).unwrap());
    assert!(!compare::values_eq(&mut frame, &ba(b"foo"), &Value::string("bar")).unwrap());
    assert!(!compare::values_eq(&mut frame, &ba(b"foo"), &Value::int(3)).unwrap());
}

// =============================================================================
// Item access
// =============================================================================

#[test]
fn test_get_item_by_index() {
    init_builtin_types();
    let mut frame = Frame::root();
    let v = ba(b"bar");

    assert_eq!(
        dispatch::get_item(&mut frame, &v, &Value::int(1)).unwrap().as_int(),
        Some(b'a' as i64)
    );
    assert_eq!(
        dispatch::get_item(&mut frame, &v, &Value::int(-1)).unwrap().as_int(),
        Some(b'r' as i64)
    );
    // Booleans index like the integers they convert to.
    assert_eq!(
        dispatch::get_item(&mut frame, &v, &Value::bool(true)).unwrap().as_int(),
        Some(b'a' as i64)
    );

    let err = dispatch::get_item(&mut frame, &v, &Value::int(3)).unwrap_err();
    assert!(matches!(err, Raised::IndexError(_)));
    assert_eq!(err.message(), "index out of range");

    let err = dispatch::get_item(&mut frame, &v, &Value::int(-4)).unwrap_err();
    assert!(matches!(err, Raised::IndexError(_)));
}

#[test]
fn test_get_item_rejects_non_index_kinds() {
    init_builtin_types();
    let mut frame = Frame::root();
    let v = ba(b"bar");

    let err = dispatch::get_item(&mut frame, &v, &Value::float(1.0)).unwrap_err();
    assert!(matches!(err, Raised::TypeError(_)));
    assert_eq!(
        err.message(),
        "bytearray indices must be integers or slice, not float"
    );

    let err = dispatch::get_item(&mut frame, &v, &Value::none()).unwrap_err();
    assert_eq!(
        err.message(),
        "bytearray indices must be integers or slice, not NoneType"
    );
}

#[test]
fn test_get_item_propagates_index_slot_errors() {
    init_builtin_types();
    let mut frame = Frame::root();
    let registry = ember_runtime::global_registry();
    let bad_index = registry.define_type(
        "badindex",
        TypeFlags::empty(),
        TypeSlots {
            index: Some(|frame, _obj| Err(frame.raise_value_error("wut"))),
            ..TypeSlots::EMPTY
        },
    );
    let key = Value::instance(bad_index);

    let err = dispatch::get_item(&mut frame, &ba(b"bar"), &key).unwrap_err();
    assert!(matches!(err, Raised::ValueError(_)));
    assert_eq!(err.message(), "wut");
}

#[test]
fn test_get_item_slices() {
    init_builtin_types();
    let mut frame = Frame::root();
    let cases: Vec<(&[u8], Option<i64>, Option<i64>, Option<i64>, &[u8])> = vec![
        (b"bar", None, Some(2), None, b"ba"),
        (b"bar", Some(1), Some(3), None, b"ar"),
        (b"bar", Some(1), None, None, b"ar"),
        (b"foobarbaz", Some(1), Some(8), Some(2), b"obra"),
        (b"abc", None, None, Some(-1), b"cba"),
        (b"bar", Some(-2), None, None, b"ar"),
        (b"bar", Some(2), Some(1), None, b""),
    ];
    for (content, start, stop, step, expected) in cases {
        let key = Value::slice(SliceObject::new(start, stop, step));
        let sliced = dispatch::get_item(&mut frame, &ba(content), &key).unwrap();
        assert_eq!(bytes_of(&mut frame, &sliced), expected);
    }
}

#[test]
fn test_get_item_zero_step_slice() {
    init_builtin_types();
    let mut frame = Frame::root();
    let key = Value::slice(SliceObject::new(Some(1), Some(2), Some(0)));
    let err = dispatch::get_item(&mut frame, &ba(b"bar"), &key).unwrap_err();
    assert!(matches!(err, Raised::ValueError(_)));
    assert_eq!(err.message(), "slice step cannot be zero");
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_construct_matrix() {
    init_builtin_types();
    let mut frame = Frame::root();

    let empty = dispatch::construct(&mut frame, &BYTEARRAY_TYPE, &[]).unwrap();
    assert!(bytes_of(&mut frame, &empty).is_empty());

    let zeros = dispatch::construct(&mut frame, &BYTEARRAY_TYPE, &[Value::int(3)]).unwrap();
    assert_eq!(bytes_of(&mut frame, &zeros), vec![0, 0, 0]);

    let text = dispatch::construct(&mut frame, &BYTEARRAY_TYPE, &[Value::string("abc")]).unwrap();
    assert_eq!(bytes_of(&mut frame, &text), b"abc");

    let copy = dispatch::construct(&mut frame, &BYTEARRAY_TYPE, &[text.clone()]).unwrap();
    assert_eq!(bytes_of(&mut frame, &copy), b"abc");

    let list = Value::list(vec![Value::int(102), Value::string("o"), Value::int(111)]);
    let from_list = dispatch::construct(&mut frame, &BYTEARRAY_TYPE, &[list]).unwrap();
    assert_eq!(bytes_of(&mut frame, &from_list), b"foo");
}

#[test]
fn test_construct_errors() {
    init_builtin_types();
    let mut frame = Frame::root();

    let err = dispatch::construct(
        &mut frame,
        &BYTEARRAY_TYPE,
        &[Value::int(1), Value::int(2)],
    )
    .unwrap_err();
    assert_eq!(err.message(), "bytearray() takes at most 1 argument (2 given)");

    let err =
        dispatch::construct(&mut frame, &BYTEARRAY_TYPE, &[Value::int(-1)]).unwrap_err();
    assert_eq!(err.message(), "negative count");

    let err =
        dispatch::construct(&mut frame, &BYTEARRAY_TYPE, &[Value::float(1.5)]).unwrap_err();
    assert!(matches!(err, Raised::TypeError(_)));
    assert_eq!(err.message(), "'float' object is not iterable");
}

#[test]
fn test_construct_from_callable_iterator() {
    init_builtin_types();
    let mut frame = Frame::root();
    let counter = Arc::new(AtomicI64::new(0));
    let producer = Value::function(FunctionObject::new("producer", move |_, _| {
        Ok(Value::int(counter.fetch_add(1, AtomicOrdering::SeqCst) + 1))
    }));
    let iter = dispatch::iterate_with_sentinel(&mut frame, &producer, &Value::int(4)).unwrap();
    let built = dispatch::construct(&mut frame, &BYTEARRAY_TYPE, &[iter]).unwrap();
    assert_eq!(bytes_of(&mut frame, &built), vec![1, 2, 3]);
}

// =============================================================================
// Iteration and text conversion
// =============================================================================

#[test]
fn test_iteration_yields_byte_values() {
    init_builtin_types();
    let mut frame = Frame::root();
    let items = dispatch::collect_iterable(&mut frame, &ba(b"ab")).unwrap();
    let ints: Vec<i64> = items.iter().map(|v| v.as_int().unwrap()).collect();
    assert_eq!(ints, vec![97, 98]);
}

#[test]
fn test_repr_and_str() {
    init_builtin_types();
    let mut frame = Frame::root();

    assert_eq!(dispatch::repr_value(&mut frame, &ba(b"")).unwrap(), "bytearray(b'')");
    assert_eq!(
        dispatch::repr_value(&mut frame, &ba(b"foo")).unwrap(),
        "bytearray(b'foo')"
    );
    let v = ba(b"a\\b'c\td\x00\x7f");
    assert_eq!(
        dispatch::repr_value(&mut frame, &v).unwrap(),
        "bytearray(b'a\\\\b\\'c\\td\\x00\\x7f')"
    );
    assert_eq!(dispatch::str_value(&mut frame, &ba(b"foo")).unwrap(), "foo");
}
