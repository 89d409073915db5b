//! Type registry for mapping TypeId to TypeObject.
//!
//! Provides O(1) lookup of type objects by TypeId. Built-in types are
//! registered once at startup; dynamically defined types are added through
//! the same registry and become immutable on registration.

use crate::object::type_obj::{TypeFlags, TypeId, TypeObject, TypeSlots};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

/// Global type registry.
///
/// Holds references to all registered type objects. Steady state is
/// read-only: slot lookups take the read lock only.
pub struct TypeRegistry {
    /// Map from TypeId to TypeObject.
    types: RwLock<FxHashMap<TypeId, &'static TypeObject>>,
    /// Counter for generating new TypeIds.
    next_id: AtomicU32,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            types: RwLock::new(FxHashMap::default()),
            next_id: AtomicU32::new(TypeId::FIRST_USER_TYPE),
        }
    }

    /// Allocate a new TypeId for a dynamically defined type.
    pub fn allocate_type_id(&self) -> TypeId {
        TypeId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Register a type object.
    pub fn register(&self, type_obj: &'static TypeObject) {
        let mut types = self.types.write();
        types.insert(type_obj.id, type_obj);
    }

    /// Define and register a new type in one step.
    ///
    /// The descriptor is leaked: types live for the rest of the process,
    /// matching the shared-immutable contract.
    pub fn define_type(
        &self,
        name: &'static str,
        flags: TypeFlags,
        slots: TypeSlots,
    ) -> &'static TypeObject {
        let id = self.allocate_type_id();
        let type_obj: &'static TypeObject = Box::leak(Box::new(TypeObject {
            id,
            name,
            flags,
            slots,
        }));
        self.register(type_obj);
        type_obj
    }

    /// Look up a type by ID.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeObject> {
        let types = self.types.read();
        types.get(&type_id).copied()
    }

    /// Check if a type is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        let types = self.types.read();
        types.contains_key(&type_id)
    }

    /// Get the number of registered types.
    pub fn len(&self) -> usize {
        let types = self.types.read();
        types.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Global Registry Access
// =============================================================================

/// Global type registry singleton.
static GLOBAL_REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();

/// Get the global type registry.
pub fn global_registry() -> &'static TypeRegistry {
    GLOBAL_REGISTRY.get_or_init(TypeRegistry::new)
}

/// Initialize the type registry with built-in types.
///
/// Idempotent; safe to call from every entry point that needs the registry
/// populated. Registration is single-writer behind the registry lock.
pub fn init_builtin_types() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let registry = global_registry();
        registry.register(&crate::types::scalar::NONE_TYPE);
        registry.register(&crate::types::scalar::BOOL_TYPE);
        registry.register(&crate::types::scalar::INT_TYPE);
        registry.register(&crate::types::scalar::FLOAT_TYPE);
        registry.register(&crate::types::scalar::STR_TYPE);
        registry.register(&crate::types::bytearray::BYTEARRAY_TYPE);
        registry.register(&crate::types::list::LIST_TYPE);
        registry.register(&crate::types::list::SEQ_ITER_TYPE);
        registry.register(&crate::types::slice::SLICE_TYPE);
        registry.register(&crate::types::function::FUNCTION_TYPE);
        registry.register(&crate::types::callable_iter::CALLABLE_ITER_TYPE);
    });
}
