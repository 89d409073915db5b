//! List type and the shared sequence iterator.
//!
//! Lists here are construction sources and protocol vehicles; the full
//! mutable-list surface lives outside this core. `SeqIterObject` is the
//! iteration handle for any materialized sequence (lists, bytearray byte
//! snapshots).

use crate::object::type_obj::{TypeFlags, TypeId, TypeObject, TypeSlots};
use crate::object::{Value, dispatch};
use crate::types::iter_self;
use crate::types::slice::{normalize_index, try_index};
use ember_core::{Frame, Raised};
use parking_lot::Mutex;
use std::fmt;

// =============================================================================
// ListObject
// =============================================================================

/// Sequence of values.
#[derive(Debug)]
pub struct ListObject {
    items: Vec<Value>,
}

impl ListObject {
    /// Create a list payload.
    #[inline]
    pub fn new(items: Vec<Value>) -> Self {
        Self { items }
    }

    /// Borrow the elements.
    #[inline]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Get the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Type descriptor for list.
pub static LIST_TYPE: TypeObject = TypeObject {
    id: TypeId::LIST,
    name: "list",
    flags: TypeFlags::instantiable_basetype(),
    slots: TypeSlots {
        construct: Some(list_construct),
        get_item: Some(list_get_item),
        iter: Some(list_iter),
        repr: Some(list_repr),
        ..TypeSlots::EMPTY
    },
};

fn expect_list<'a>(frame: &Frame, obj: &'a Value) -> Result<&'a ListObject, Raised> {
    match obj.as_list() {
        Some(list) => Ok(list),
        None => Err(frame.raise_type_error(format!(
            "list slot invoked on '{}' object",
            obj.type_name()
        ))),
    }
}

fn list_construct(
    frame: &mut Frame,
    _type_obj: &'static TypeObject,
    args: &[Value],
) -> Result<Value, Raised> {
    match args {
        [] => Ok(Value::list(Vec::new())),
        [source] => Ok(Value::list(dispatch::collect_iterable(frame, source)?)),
        _ => Err(frame.raise_type_error(format!(
            "list() takes at most 1 argument ({} given)",
            args.len()
        ))),
    }
}

fn list_get_item(frame: &mut Frame, obj: &Value, key: &Value) -> Result<Value, Raised> {
    let list = expect_list(frame, obj)?;

    if let Some(slice) = key.as_slice() {
        let indices = slice.indices(frame, list.len())?;
        let selected: Vec<Value> = indices.iter().map(|i| list.items[i].clone()).collect();
        return Ok(Value::list(selected));
    }

    match try_index(frame, key)? {
        Some(raw) => {
            let idx = normalize_index(frame, list.len(), raw)?;
            Ok(list.items[idx].clone())
        }
        None => Err(frame.raise_type_error(format!(
            "list indices must be integers or slices, not {}",
            key.type_name()
        ))),
    }
}

fn list_iter(frame: &mut Frame, obj: &Value) -> Result<Value, Raised> {
    let list = expect_list(frame, obj)?;
    Ok(Value::seq_iter(SeqIterObject::new(list.items.clone())))
}

fn list_repr(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    let list = expect_list(frame, obj)?;
    let mut out = String::from("[");
    for (i, item) in list.items().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&dispatch::repr_value(frame, item)?);
    }
    out.push(']');
    Ok(out)
}

// =============================================================================
// SeqIterObject
// =============================================================================

/// Iteration handle over a materialized sequence.
///
/// The cursor sits behind a mutex so a shared handle stays consistent under
/// concurrent advancement; each element is yielded at most once.
pub struct SeqIterObject {
    items: Vec<Value>,
    cursor: Mutex<usize>,
}

impl SeqIterObject {
    /// Create an iterator over the given elements.
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            cursor: Mutex::new(0),
        }
    }
}

impl fmt::Debug for SeqIterObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqIterObject")
            .field("len", &self.items.len())
            .finish()
    }
}

/// Type descriptor for the sequence iterator.
pub static SEQ_ITER_TYPE: TypeObject = TypeObject {
    id: TypeId::SEQ_ITER,
    name: "sequence_iterator",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        iter: Some(iter_self),
        next: Some(seq_iter_next),
        ..TypeSlots::EMPTY
    },
};

fn seq_iter_next(frame: &mut Frame, obj: &Value) -> Result<Value, Raised> {
    let Some(iter) = obj.as_seq_iter() else {
        return Err(frame.raise_type_error(format!(
            "iterator slot invoked on '{}' object",
            obj.type_name()
        )));
    };
    let mut cursor = iter.cursor.lock();
    if *cursor >= iter.items.len() {
        return Err(frame.raise_stop_iteration());
    }
    let item = iter.items[*cursor].clone();
    *cursor += 1;
    Ok(item)
}
