//! Built-in type implementations.
//!
//! Each module owns one family of built-ins: its payload struct, its static
//! `TypeObject` descriptor, and the slot functions wired into it. The
//! descriptors are registered once by `object::registry::init_builtin_types`.

pub mod bytearray;
pub mod callable_iter;
pub mod function;
pub mod list;
pub mod scalar;
pub mod slice;

use crate::object::Value;
use ember_core::{Frame, Raised};

/// Iter slot for types that are already iterators.
pub(crate) fn iter_self(_frame: &mut Frame, obj: &Value) -> Result<Value, Raised> {
    Ok(obj.clone())
}
