//! Scalar built-ins: none, bool, int, float, str.
//!
//! The three numeric kinds share one compare slot so cross-kind ordering
//! (int vs float, bool vs int) lands in the same code path. Strings order
//! against other strings and against byte sequences by content.

use crate::object::compare::{byte_view, compare_bytes, compare_numeric, unorderable};
use crate::object::type_obj::{TypeFlags, TypeId, TypeObject, TypeSlots};
use crate::object::{NativeValue, Value};
use ember_core::{Frame, Raised};
use std::cmp::Ordering;

// =============================================================================
// Type descriptors
// =============================================================================

/// Type descriptor for the none singleton.
pub static NONE_TYPE: TypeObject = TypeObject {
    id: TypeId::NONE,
    name: "NoneType",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        repr: Some(none_repr),
        ..TypeSlots::EMPTY
    },
};

/// Type descriptor for bool.
pub static BOOL_TYPE: TypeObject = TypeObject {
    id: TypeId::BOOL,
    name: "bool",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        compare: Some(numeric_compare),
        repr: Some(bool_repr),
        native: Some(integer_native),
        index: Some(integer_index),
        ..TypeSlots::EMPTY
    },
};

/// Type descriptor for int.
pub static INT_TYPE: TypeObject = TypeObject {
    id: TypeId::INT,
    name: "int",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        compare: Some(numeric_compare),
        repr: Some(int_repr),
        native: Some(integer_native),
        index: Some(integer_index),
        ..TypeSlots::EMPTY
    },
};

/// Type descriptor for float.
pub static FLOAT_TYPE: TypeObject = TypeObject {
    id: TypeId::FLOAT,
    name: "float",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        compare: Some(numeric_compare),
        repr: Some(float_repr),
        ..TypeSlots::EMPTY
    },
};

/// Type descriptor for str.
pub static STR_TYPE: TypeObject = TypeObject {
    id: TypeId::STR,
    name: "str",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        compare: Some(str_compare),
        repr: Some(str_repr),
        str_: Some(str_str),
        native: Some(str_native),
        ..TypeSlots::EMPTY
    },
};

// =============================================================================
// Comparison slots
// =============================================================================

fn numeric_compare(frame: &mut Frame, a: &Value, b: &Value) -> Result<Ordering, Raised> {
    compare_numeric(a, b).ok_or_else(|| unorderable(frame, a, b))
}

fn str_compare(frame: &mut Frame, a: &Value, b: &Value) -> Result<Ordering, Raised> {
    let Some(x) = a.as_str() else {
        return Err(frame.raise_type_error(format!(
            "str slot invoked on '{}' object",
            a.type_name()
        )));
    };
    if let Some(y) = b.as_str() {
        return Ok(x.cmp(y));
    }
    // Byte sequences order against text by raw byte content.
    if b.as_bytearray().is_some() {
        if let Some(bytes) = byte_view(b) {
            return Ok(compare_bytes(x.as_bytes(), &bytes));
        }
    }
    Err(unorderable(frame, a, b))
}

// =============================================================================
// Representation slots
// =============================================================================

fn none_repr(_frame: &mut Frame, _obj: &Value) -> Result<String, Raised> {
    Ok("None".to_string())
}

fn bool_repr(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    match obj.as_bool() {
        Some(true) => Ok("True".to_string()),
        Some(false) => Ok("False".to_string()),
        None => Err(frame.raise_type_error(format!(
            "bool slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

fn int_repr(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    match obj.as_int() {
        Some(i) => Ok(i.to_string()),
        None => Err(frame.raise_type_error(format!(
            "int slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

fn float_repr(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    match obj.as_float() {
        // Debug formatting keeps a trailing ".0" on whole values.
        Some(f) => Ok(format!("{:?}", f)),
        None => Err(frame.raise_type_error(format!(
            "float slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

fn str_repr(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    let Some(s) = obj.as_str() else {
        return Err(frame.raise_type_error(format!(
            "str slot invoked on '{}' object",
            obj.type_name()
        )));
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    Ok(out)
}

fn str_str(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    match obj.as_str() {
        Some(s) => Ok(s.to_string()),
        None => Err(frame.raise_type_error(format!(
            "str slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

// =============================================================================
// Native and index slots
// =============================================================================

fn integer_native(frame: &mut Frame, obj: &Value) -> Result<NativeValue, Raised> {
    match obj.as_integer() {
        Some(i) => Ok(NativeValue::Int(i)),
        None => Err(frame.raise_type_error(format!(
            "integer slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

fn integer_index(frame: &mut Frame, obj: &Value) -> Result<i64, Raised> {
    match obj.as_integer() {
        Some(i) => Ok(i),
        None => Err(frame.raise_type_error(format!(
            "integer slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

fn str_native(frame: &mut Frame, obj: &Value) -> Result<NativeValue, Raised> {
    match obj.as_str() {
        Some(s) => Ok(NativeValue::Str(s.to_string())),
        None => Err(frame.raise_type_error(format!(
            "str slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::registry::init_builtin_types;
    use crate::object::{compare, dispatch};

    #[test]
    fn test_numeric_ordering_across_kinds() {
        init_builtin_types();
        let mut frame = Frame::root();
        assert_eq!(
            compare::compare(&mut frame, &Value::int(2), &Value::int(3)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            compare::compare(&mut frame, &Value::float(2.5), &Value::int(2)).unwrap(),
            Ordering::Greater
        );
        assert_eq!(
            compare::compare(&mut frame, &Value::bool(false), &Value::float(0.0)).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_numeric_vs_str_is_type_error() {
        init_builtin_types();
        let mut frame = Frame::root();
        let err = compare::compare(&mut frame, &Value::int(1), &Value::string("x")).unwrap_err();
        assert_eq!(err.message(), "cannot compare 'int' with 'str'");
    }

    #[test]
    fn test_str_ordering() {
        init_builtin_types();
        let mut frame = Frame::root();
        assert_eq!(
            compare::compare(&mut frame, &Value::string("bar"), &Value::string("baz")).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            compare::compare(&mut frame, &Value::string("foo"), &Value::string("foo")).unwrap(),
            Ordering::Equal
        );
    }

    #[test]
    fn test_reprs() {
        init_builtin_types();
        let mut frame = Frame::root();
        assert_eq!(dispatch::repr_value(&mut frame, &Value::none()).unwrap(), "None");
        assert_eq!(dispatch::repr_value(&mut frame, &Value::bool(true)).unwrap(), "True");
        assert_eq!(dispatch::repr_value(&mut frame, &Value::int(-7)).unwrap(), "-7");
        assert_eq!(dispatch::repr_value(&mut frame, &Value::float(1.0)).unwrap(), "1.0");
        assert_eq!(dispatch::repr_value(&mut frame, &Value::float(2.5)).unwrap(), "2.5");
        assert_eq!(
            dispatch::repr_value(&mut frame, &Value::string("a'\nb")).unwrap(),
            "'a\\'\\nb'"
        );
    }

    #[test]
    fn test_str_of_string_is_contents() {
        init_builtin_types();
        let mut frame = Frame::root();
        assert_eq!(
            dispatch::str_value(&mut frame, &Value::string("plain")).unwrap(),
            "plain"
        );
    }

    #[test]
    fn test_native_conversions() {
        init_builtin_types();
        let mut frame = Frame::root();
        assert!(matches!(
            dispatch::to_native(&mut frame, &Value::int(5)).unwrap(),
            NativeValue::Int(5)
        ));
        assert!(matches!(
            dispatch::to_native(&mut frame, &Value::bool(true)).unwrap(),
            NativeValue::Int(1)
        ));
        match dispatch::to_native(&mut frame, &Value::string("s")).unwrap() {
            NativeValue::Str(s) => assert_eq!(s, "s"),
            other => panic!("unexpected native value: {:?}", other),
        }
        let err = dispatch::to_native(&mut frame, &Value::none()).unwrap_err();
        assert!(matches!(err, Raised::TypeError(_)));
    }
}
