//! Object model and built-in types for the Ember runtime.
//!
//! This crate provides:
//! - The universal value handle (Value, NativeValue)
//! - The type descriptor machinery (TypeObject, slots)
//! - Type registry for dispatch
//! - Slot-based protocol operations (construct, iterate, call, repr)
//! - Cross-type comparison and equality
//! - Built-in types (scalars, bytearray, list, slice, function, iterators)

pub mod object;
pub mod types;

// Re-export commonly used items
pub use object::registry::{TypeRegistry, global_registry, init_builtin_types};
pub use object::type_obj::{TypeFlags, TypeId, TypeObject, TypeSlots};
pub use object::{NativeValue, Value};

// Re-export the error channel so downstream code needs one import
pub use ember_core::{ExcKind, Frame, Raised, RuntimeConfig, runtime_config};
