//! Universal value handle and object payloads.
//!
//! Every runtime value is a `Value`: scalars are stored inline, heap types
//! behind shared `Arc` payloads. The variant — and therefore the type — is
//! fixed at construction and never reassigned. Narrowing a handle to a
//! concrete payload is a type-checked capability used only by that type's
//! own slot implementations, never across the public protocol boundary.

pub mod compare;
pub mod dispatch;
pub mod registry;
pub mod type_obj;

use crate::types::bytearray::ByteArrayObject;
use crate::types::callable_iter::CallableIterObject;
use crate::types::function::FunctionObject;
use crate::types::list::{ListObject, SeqIterObject};
use crate::types::slice::SliceObject;
use crate::types::{bytearray, callable_iter, function, list, scalar, slice};
use std::fmt;
use std::sync::Arc;
use type_obj::{TypeId, TypeObject};

// =============================================================================
// Value
// =============================================================================

/// Universal value handle.
///
/// Cheap to clone: scalars copy, heap payloads bump an `Arc`.
#[derive(Clone)]
pub struct Value {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    ByteArray(Arc<ByteArrayObject>),
    List(Arc<ListObject>),
    Slice(Arc<SliceObject>),
    Function(Arc<FunctionObject>),
    CallableIter(Arc<CallableIterObject>),
    SeqIter(Arc<SeqIterObject>),
    Instance(Arc<InstanceObject>),
}

impl Value {
    /// The singleton none value.
    #[inline]
    pub fn none() -> Self {
        Self { repr: Repr::None }
    }

    /// Create a boolean value.
    #[inline]
    pub fn bool(b: bool) -> Self {
        Self {
            repr: Repr::Bool(b),
        }
    }

    /// Create an integer value.
    #[inline]
    pub fn int(i: i64) -> Self {
        Self { repr: Repr::Int(i) }
    }

    /// Create a float value.
    #[inline]
    pub fn float(f: f64) -> Self {
        Self {
            repr: Repr::Float(f),
        }
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Self {
            repr: Repr::Str(s.into()),
        }
    }

    /// Wrap a bytearray payload.
    #[inline]
    pub fn bytearray(obj: ByteArrayObject) -> Self {
        Self {
            repr: Repr::ByteArray(Arc::new(obj)),
        }
    }

    /// Wrap a list payload.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Self {
            repr: Repr::List(Arc::new(ListObject::new(items))),
        }
    }

    /// Wrap a slice payload.
    #[inline]
    pub fn slice(obj: SliceObject) -> Self {
        Self {
            repr: Repr::Slice(Arc::new(obj)),
        }
    }

    /// Wrap a native function payload.
    #[inline]
    pub fn function(obj: FunctionObject) -> Self {
        Self {
            repr: Repr::Function(Arc::new(obj)),
        }
    }

    /// Wrap a callable iterator payload.
    #[inline]
    pub fn callable_iter(obj: CallableIterObject) -> Self {
        Self {
            repr: Repr::CallableIter(Arc::new(obj)),
        }
    }

    /// Wrap a sequence iterator payload.
    #[inline]
    pub fn seq_iter(obj: SeqIterObject) -> Self {
        Self {
            repr: Repr::SeqIter(Arc::new(obj)),
        }
    }

    /// Create a payload-free instance of a registered type.
    #[inline]
    pub fn instance(type_obj: &'static TypeObject) -> Self {
        Self {
            repr: Repr::Instance(Arc::new(InstanceObject { type_obj })),
        }
    }

    // =========================================================================
    // Type access
    // =========================================================================

    /// Get the type identifier, fixed at construction.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_obj().id
    }

    /// Get the shared type descriptor.
    #[inline]
    pub fn type_obj(&self) -> &'static TypeObject {
        match &self.repr {
            Repr::None => &scalar::NONE_TYPE,
            Repr::Bool(_) => &scalar::BOOL_TYPE,
            Repr::Int(_) => &scalar::INT_TYPE,
            Repr::Float(_) => &scalar::FLOAT_TYPE,
            Repr::Str(_) => &scalar::STR_TYPE,
            Repr::ByteArray(_) => &bytearray::BYTEARRAY_TYPE,
            Repr::List(_) => &list::LIST_TYPE,
            Repr::Slice(_) => &slice::SLICE_TYPE,
            Repr::Function(_) => &function::FUNCTION_TYPE,
            Repr::CallableIter(_) => &callable_iter::CALLABLE_ITER_TYPE,
            Repr::SeqIter(_) => &list::SEQ_ITER_TYPE,
            Repr::Instance(inst) => inst.type_obj,
        }
    }

    /// Display name of the value's type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_obj().name
    }

    // =========================================================================
    // Scalar accessors
    // =========================================================================

    /// Check for the none value.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self.repr, Repr::None)
    }

    /// Get as bool, if this is a bool.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self.repr {
            Repr::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Get as integer, if this is an int.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self.repr {
            Repr::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Get as float, if this is a float.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self.repr {
            Repr::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Get as a string slice, if this is a str.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match &self.repr {
            Repr::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as an integer, widening bool to 0/1.
    ///
    /// This is the "integer-like" check used by byte conversion and index
    /// resolution; floats deliberately do not qualify.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self.repr {
            Repr::Int(i) => Some(i),
            Repr::Bool(b) => Some(b as i64),
            _ => None,
        }
    }

    // =========================================================================
    // Payload narrowing (internal capability)
    // =========================================================================

    #[inline]
    pub(crate) fn as_bytearray(&self) -> Option<&Arc<ByteArrayObject>> {
        match &self.repr {
            Repr::ByteArray(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_list(&self) -> Option<&Arc<ListObject>> {
        match &self.repr {
            Repr::List(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> Option<&Arc<SliceObject>> {
        match &self.repr {
            Repr::Slice(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_function(&self) -> Option<&Arc<FunctionObject>> {
        match &self.repr {
            Repr::Function(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_callable_iter(&self) -> Option<&Arc<CallableIterObject>> {
        match &self.repr {
            Repr::CallableIter(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn as_seq_iter(&self) -> Option<&Arc<SeqIterObject>> {
        match &self.repr {
            Repr::SeqIter(obj) => Some(obj),
            _ => None,
        }
    }

    /// Identity comparison for reference payloads.
    ///
    /// Scalars have no identity at this layer; only heap payloads compare.
    #[inline]
    pub(crate) fn identity_eq(&self, other: &Value) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::ByteArray(a), Repr::ByteArray(b)) => Arc::ptr_eq(a, b),
            (Repr::List(a), Repr::List(b)) => Arc::ptr_eq(a, b),
            (Repr::Slice(a), Repr::Slice(b)) => Arc::ptr_eq(a, b),
            (Repr::Function(a), Repr::Function(b)) => Arc::ptr_eq(a, b),
            (Repr::CallableIter(a), Repr::CallableIter(b)) => Arc::ptr_eq(a, b),
            (Repr::SeqIter(a), Repr::SeqIter(b)) => Arc::ptr_eq(a, b),
            (Repr::Instance(a), Repr::Instance(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::None => write!(f, "None"),
            Repr::Bool(b) => write!(f, "{:?}", b),
            Repr::Int(i) => write!(f, "{}", i),
            Repr::Float(v) => write!(f, "{:?}", v),
            Repr::Str(s) => write!(f, "{:?}", s),
            _ => write!(f, "<{} object>", self.type_name()),
        }
    }
}

// =============================================================================
// InstanceObject
// =============================================================================

/// Payload-free instance of a dynamically registered type.
///
/// Carries only the shared descriptor pointer; behavior lives entirely in
/// the type's slot table.
#[derive(Debug)]
pub struct InstanceObject {
    /// The instance's type, fixed at creation.
    pub type_obj: &'static TypeObject,
}

// =============================================================================
// NativeValue
// =============================================================================

/// Host-native result of the `native` conversion slot.
///
/// A read view of the value's content handed to host-environment bridges.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// Machine integer.
    Int(i64),
    /// Owned text.
    Str(String),
}

impl NativeValue {
    /// Get the byte content, if this is a byte sequence.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            NativeValue::Bytes(data) => Some(data),
            _ => None,
        }
    }
}
