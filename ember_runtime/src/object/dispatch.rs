//! Protocol dispatch entry points.
//!
//! Every operation on a value is resolved by looking up the relevant slot on
//! the value's type and invoking it with a frame. An absent slot fails with
//! a TypeError at dispatch time. Errors from slot implementations propagate
//! unchanged.

use crate::object::type_obj::TypeObject;
use crate::object::{NativeValue, Value};
use crate::types::callable_iter::CallableIterObject;
use ember_core::{Frame, Raised};

/// Construct a new instance of a type from positional arguments.
pub fn construct(
    frame: &mut Frame,
    type_obj: &'static TypeObject,
    args: &[Value],
) -> Result<Value, Raised> {
    if !type_obj.flags.is_instantiable() {
        return Err(frame.raise_type_error(format!(
            "cannot create '{}' instances",
            type_obj.name
        )));
    }
    let Some(slot) = type_obj.slots.construct else {
        return Err(frame.raise_type_error(format!(
            "cannot create '{}' instances",
            type_obj.name
        )));
    };
    slot(frame, type_obj, args)
}

/// Subscript access: `obj[key]`.
pub fn get_item(frame: &mut Frame, obj: &Value, key: &Value) -> Result<Value, Raised> {
    let Some(slot) = obj.type_obj().slots.get_item else {
        return Err(frame.raise_type_error(format!(
            "'{}' object is not subscriptable",
            obj.type_name()
        )));
    };
    slot(frame, obj, key)
}

/// Obtain an iteration handle for a value.
pub fn iterate(frame: &mut Frame, obj: &Value) -> Result<Value, Raised> {
    let Some(slot) = obj.type_obj().slots.iter else {
        return Err(frame.raise_type_error(format!(
            "'{}' object is not iterable",
            obj.type_name()
        )));
    };
    slot(frame, obj)
}

/// Advance an iteration handle, yielding the next item.
///
/// Exhaustion surfaces as StopIteration, which only iteration-driving
/// callers may absorb.
pub fn next_item(frame: &mut Frame, iter: &Value) -> Result<Value, Raised> {
    let Some(slot) = iter.type_obj().slots.next else {
        return Err(frame.raise_type_error(format!(
            "'{}' object is not an iterator",
            iter.type_name()
        )));
    };
    slot(frame, iter)
}

/// Invoke a callable value with positional arguments.
pub fn call(frame: &mut Frame, callee: &Value, args: &[Value]) -> Result<Value, Raised> {
    let Some(slot) = callee.type_obj().slots.call else {
        return Err(frame.raise_type_error(format!(
            "'{}' object is not callable",
            callee.type_name()
        )));
    };
    frame.enter()?;
    let result = slot(frame, callee, args);
    frame.leave();
    result
}

/// Developer-facing representation of a value.
pub fn repr_value(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    match obj.type_obj().slots.repr {
        Some(slot) => slot(frame, obj),
        None => Ok(format!("<{} object>", obj.type_name())),
    }
}

/// User-facing text conversion; falls back to repr when no str slot exists.
pub fn str_value(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    match obj.type_obj().slots.str_ {
        Some(slot) => slot(frame, obj),
        None => repr_value(frame, obj),
    }
}

/// One-way read conversion to a host-native representation.
pub fn to_native(frame: &mut Frame, obj: &Value) -> Result<NativeValue, Raised> {
    let Some(slot) = obj.type_obj().slots.native else {
        return Err(frame.raise_type_error(format!(
            "cannot convert '{}' object to a native value",
            obj.type_name()
        )));
    };
    slot(frame, obj)
}

/// Two-argument iteration: adapt a zero-argument callable plus a sentinel
/// value into an iterator that ends when the sentinel is produced.
pub fn iterate_with_sentinel(
    frame: &mut Frame,
    callable: &Value,
    sentinel: &Value,
) -> Result<Value, Raised> {
    if callable.type_obj().slots.call.is_none() {
        return Err(frame.raise_type_error(format!(
            "iter(v, w): v must be callable, not '{}'",
            callable.type_name()
        )));
    }
    Ok(Value::callable_iter(CallableIterObject::new(
        callable.clone(),
        sentinel.clone(),
    )))
}

/// Drain an iterable eagerly into a vector.
///
/// This is the single place StopIteration is absorbed; every other error is
/// forwarded verbatim.
pub fn collect_iterable(frame: &mut Frame, source: &Value) -> Result<Vec<Value>, Raised> {
    let iter = iterate(frame, source)?;
    let mut items = Vec::new();
    loop {
        match next_item(frame, &iter) {
            Ok(item) => items.push(item),
            Err(raised) if raised.is_stop_iteration() => break,
            Err(raised) => return Err(raised),
        }
    }
    Ok(items)
}
