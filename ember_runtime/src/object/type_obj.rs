//! Type descriptors and the slot table.
//!
//! Every value kind is described by exactly one `TypeObject`: a display
//! name, behavior flags, and a table of optionally-implemented protocol
//! slots. Type objects are created once, are immutable thereafter, and are
//! shared by all instances.

use crate::object::{NativeValue, Value};
use ember_core::{Frame, Raised};
use std::cmp::Ordering;

// =============================================================================
// TypeId
// =============================================================================

/// Dense type identifier for fast dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const NONE: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const FLOAT: TypeId = TypeId(3);
    pub const STR: TypeId = TypeId(4);
    pub const BYTEARRAY: TypeId = TypeId(5);
    pub const LIST: TypeId = TypeId(6);
    pub const SLICE: TypeId = TypeId(7);
    pub const FUNCTION: TypeId = TypeId(8);
    pub const CALLABLE_ITER: TypeId = TypeId(9);
    pub const SEQ_ITER: TypeId = TypeId(10);

    /// First identifier available for dynamically registered types.
    pub const FIRST_USER_TYPE: u32 = 256;

    /// Raw value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a built-in type.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_USER_TYPE
    }
}

// =============================================================================
// TypeFlags
// =============================================================================

/// Type behavior bits packed into u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFlags(u32);

impl TypeFlags {
    /// Instances may be constructed directly by user code.
    const INSTANTIABLE: u32 = 0x1;
    /// The type may serve as a base for further specialization.
    const BASETYPE: u32 = 0x2;

    /// No flags set: internal-only, final type.
    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Flags for an ordinary user-constructible type.
    #[inline]
    pub const fn instantiable_basetype() -> Self {
        Self(Self::INSTANTIABLE | Self::BASETYPE)
    }

    /// Check whether user code may construct instances.
    #[inline]
    pub const fn is_instantiable(self) -> bool {
        (self.0 & Self::INSTANTIABLE) != 0
    }

    /// Check whether the type may be specialized.
    #[inline]
    pub const fn is_basetype(self) -> bool {
        (self.0 & Self::BASETYPE) != 0
    }
}

impl Default for TypeFlags {
    fn default() -> Self {
        Self::empty()
    }
}

// =============================================================================
// Slot Signatures
// =============================================================================

/// Construct a new instance of a type from raw positional arguments.
pub type ConstructFn =
    fn(&mut Frame, &'static TypeObject, &[Value]) -> Result<Value, Raised>;

/// Unary protocol operation producing a value (iterate, advance).
pub type UnaryFn = fn(&mut Frame, &Value) -> Result<Value, Raised>;

/// Subscript access: `(self, key) -> item`.
pub type GetItemFn = fn(&mut Frame, &Value, &Value) -> Result<Value, Raised>;

/// Invoke a callable with positional arguments.
pub type CallFn = fn(&mut Frame, &Value, &[Value]) -> Result<Value, Raised>;

/// Three-way comparison against an arbitrary operand.
pub type CompareFn = fn(&mut Frame, &Value, &Value) -> Result<Ordering, Raised>;

/// Render a value (repr or str).
pub type ReprFn = fn(&mut Frame, &Value) -> Result<String, Raised>;

/// Convert a value to a host-native representation.
pub type NativeFn = fn(&mut Frame, &Value) -> Result<NativeValue, Raised>;

/// Supply an integer for use as a sequence index.
pub type IndexFn = fn(&mut Frame, &Value) -> Result<i64, Raised>;

// =============================================================================
// TypeSlots
// =============================================================================

/// Per-type operation table.
///
/// Each slot is an optional function pointer; absence means the operation is
/// unsupported for the type and fails with a TypeError at dispatch time.
/// This reproduces dynamic-dispatch semantics without a class hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct TypeSlots {
    /// Instance construction.
    pub construct: Option<ConstructFn>,
    /// Total-order comparison.
    pub compare: Option<CompareFn>,
    /// Subscript access.
    pub get_item: Option<GetItemFn>,
    /// Obtain an iteration handle.
    pub iter: Option<UnaryFn>,
    /// Advance an iteration handle.
    pub next: Option<UnaryFn>,
    /// Invoke as a callable.
    pub call: Option<CallFn>,
    /// Developer-facing representation.
    pub repr: Option<ReprFn>,
    /// User-facing text conversion (falls back to `repr` when absent).
    pub str_: Option<ReprFn>,
    /// Host-native conversion.
    pub native: Option<NativeFn>,
    /// Index protocol: yield an integer usable as a sequence index.
    pub index: Option<IndexFn>,
}

impl TypeSlots {
    /// Table with every slot absent.
    pub const EMPTY: TypeSlots = TypeSlots {
        construct: None,
        compare: None,
        get_item: None,
        iter: None,
        next: None,
        call: None,
        repr: None,
        str_: None,
        native: None,
        index: None,
    };
}

impl Default for TypeSlots {
    fn default() -> Self {
        Self::EMPTY
    }
}

// =============================================================================
// TypeObject
// =============================================================================

/// Descriptor for one value kind.
///
/// Type objects are `&'static`, registered once during start-up, and shared
/// process-wide; slot lookups need no synchronization.
#[derive(Debug)]
pub struct TypeObject {
    /// Type identifier.
    pub id: TypeId,
    /// Display name.
    pub name: &'static str,
    /// Behavior flags.
    pub flags: TypeFlags,
    /// Protocol slot table.
    pub slots: TypeSlots,
}
