//! Sentinel-terminated callable iterators.
//!
//! A callable iterator repeatedly invokes a zero-argument producer and yields
//! each result until one compares equal to the sentinel. Exhaustion is a
//! one-way latch: once the sentinel is observed, the producer reference is
//! dropped and every later advance ends the iteration without calling it.

use crate::object::type_obj::{TypeFlags, TypeId, TypeObject, TypeSlots};
use crate::object::{compare, dispatch, Value};
use crate::types::iter_self;
use ember_core::{Frame, Raised};
use parking_lot::Mutex;
use std::fmt;

/// Iterator driven by a callable and stopped by a sentinel value.
pub struct CallableIterObject {
    sentinel: Value,
    /// Producer while active; `None` once exhausted.
    callable: Mutex<Option<Value>>,
}

impl CallableIterObject {
    /// Create an active callable iterator.
    pub fn new(callable: Value, sentinel: Value) -> Self {
        Self {
            sentinel,
            callable: Mutex::new(Some(callable)),
        }
    }
}

impl fmt::Debug for CallableIterObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallableIterObject")
            .field("exhausted", &self.callable.lock().is_none())
            .finish()
    }
}

/// Type descriptor for the callable iterator.
pub static CALLABLE_ITER_TYPE: TypeObject = TypeObject {
    id: TypeId::CALLABLE_ITER,
    name: "callable_iterator",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        iter: Some(iter_self),
        next: Some(callable_iter_next),
        ..TypeSlots::EMPTY
    },
};

fn callable_iter_next(frame: &mut Frame, obj: &Value) -> Result<Value, Raised> {
    let Some(iter) = obj.as_callable_iter() else {
        return Err(frame.raise_type_error(format!(
            "iterator slot invoked on '{}' object",
            obj.type_name()
        )));
    };

    // The lock spans the producer call and the sentinel check so concurrent
    // consumers serialize on advancement and never observe a value produced
    // after the sentinel.
    let mut guard = iter.callable.lock();
    let callable = match guard.as_ref() {
        Some(callable) => callable.clone(),
        None => return Err(frame.raise_stop_iteration()),
    };

    // A producer failure propagates without latching; the iterator stays
    // active and a later advance invokes the producer again.
    let item = dispatch::call(frame, &callable, &[])?;

    if compare::values_eq(frame, &item, &iter.sentinel)? {
        *guard = None;
        return Err(frame.raise_stop_iteration());
    }
    Ok(item)
}
