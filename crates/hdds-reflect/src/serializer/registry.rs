// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Serializer catalog.
//!
//! ```text
//! SerializerRegistry
//! +-- generic: DashMap<name, Arc<dyn GenericSerializer>>
//! +-- typed:   DashMap<(TypeId, name), TypedEntry>
//!                                      +-- Box<dyn Any> holding Arc<dyn TypeSerializer<T>>
//! ```
//!
//! A typed entry is only ever read back under the `TypeId` it was stored
//! with, so the inner downcast cannot fail for a well-formed entry. Codec
//! handles are cloned out of the maps before use: no shard guard is held
//! while a codec runs.

use super::{GenericSerializer, TypeSerializer};
use dashmap::DashMap;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::sync::Arc;

type TypedKey = (TypeId, Arc<str>);

struct TypedEntry {
    type_name: &'static str,
    handle: Box<dyn Any + Send + Sync>,
}

/// Catalog of generic and type-specific serializers.
pub struct SerializerRegistry {
    generic: DashMap<Arc<str>, Arc<dyn GenericSerializer>>,
    typed: DashMap<TypedKey, TypedEntry>,
}

impl SerializerRegistry {
    pub fn new() -> Self {
        Self {
            generic: DashMap::new(),
            typed: DashMap::new(),
        }
    }

    // ========================================================================
    // Generic catalog
    // ========================================================================

    /// Register a generic serializer under `name`, replacing any previous one.
    pub fn register_generic(&self, name: &str, serializer: Arc<dyn GenericSerializer>) {
        if self.generic.insert(Arc::from(name), serializer).is_some() {
            log::debug!("[SerializerRegistry] Replaced generic serializer '{}'", name);
        } else {
            log::debug!("[SerializerRegistry] Registered generic serializer '{}'", name);
        }
    }

    pub fn get_generic(&self, name: &str) -> Option<Arc<dyn GenericSerializer>> {
        self.generic.get(name).map(|entry| Arc::clone(entry.value()))
    }

    pub fn has_generic(&self, name: &str) -> bool {
        self.generic.contains_key(name)
    }

    pub fn remove_generic(&self, name: &str) -> Option<Arc<dyn GenericSerializer>> {
        self.generic.remove(name).map(|(_, serializer)| serializer)
    }

    /// Generic serializer names, unordered.
    pub fn generic_names(&self) -> Vec<String> {
        self.generic.iter().map(|entry| entry.key().to_string()).collect()
    }

    // ========================================================================
    // Type-specific catalog
    // ========================================================================

    /// Register a serializer for `T` under `name`, replacing any previous one
    /// for the same `(T, name)` pair. Other types using `name` are unaffected.
    pub fn register_typed<T: 'static>(&self, name: &str, serializer: Arc<dyn TypeSerializer<T>>) {
        let entry = TypedEntry {
            type_name: type_name::<T>(),
            handle: Box::new(serializer),
        };
        if self.typed.insert(typed_key::<T>(name), entry).is_some() {
            log::debug!(
                "[SerializerRegistry] Replaced serializer '{}' for {}",
                name,
                type_name::<T>()
            );
        } else {
            log::debug!(
                "[SerializerRegistry] Registered serializer '{}' for {}",
                name,
                type_name::<T>()
            );
        }
    }

    pub fn get_typed<T: 'static>(&self, name: &str) -> Option<Arc<dyn TypeSerializer<T>>> {
        let entry = self.typed.get(&typed_key::<T>(name))?;
        let serializer = entry
            .handle
            .downcast_ref::<Arc<dyn TypeSerializer<T>>>()
            .cloned();
        serializer
    }

    pub fn has_typed<T: 'static>(&self, name: &str) -> bool {
        self.typed.contains_key(&typed_key::<T>(name))
    }

    pub fn remove_typed<T: 'static>(&self, name: &str) -> Option<Arc<dyn TypeSerializer<T>>> {
        let (_, entry) = self.typed.remove(&typed_key::<T>(name))?;
        entry
            .handle
            .downcast::<Arc<dyn TypeSerializer<T>>>()
            .ok()
            .map(|serializer| *serializer)
    }

    /// Serializer names registered for `T`, unordered.
    pub fn typed_names<T: 'static>(&self) -> Vec<String> {
        let id = TypeId::of::<T>();
        self.typed
            .iter()
            .filter(|entry| entry.key().0 == id)
            .map(|entry| entry.key().1.to_string())
            .collect()
    }

    /// Remove every serializer from both catalogs.
    pub fn clear(&self) {
        self.generic.clear();
        self.typed.clear();
        log::debug!("[SerializerRegistry] Cleared");
    }
}

fn typed_key<T: 'static>(name: &str) -> TypedKey {
    (TypeId::of::<T>(), Arc::from(name))
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let typed: Vec<String> = self
            .typed
            .iter()
            .map(|entry| format!("{}@{}", entry.key().1, entry.value().type_name))
            .collect();
        f.debug_struct("SerializerRegistry")
            .field("generic", &self.generic_names())
            .field("typed", &typed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MessageDescriptor;
    use crate::error::{ReflectError, Result};

    struct Named(&'static str);

    impl GenericSerializer for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn serialize(&self, _: &dyn Any, _: &MessageDescriptor) -> Result<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }

        fn deserialize(&self, _: &[u8], _: &mut dyn Any, _: &MessageDescriptor) -> Result<()> {
            Ok(())
        }
    }

    struct Tagged(u8);

    impl<T: Default> TypeSerializer<T> for Tagged {
        fn name(&self) -> &str {
            "tagged"
        }

        fn serialize(&self, _: &T) -> Result<Vec<u8>> {
            Ok(vec![self.0])
        }

        fn deserialize(&self, bytes: &[u8]) -> Result<T> {
            if bytes.is_empty() {
                return Err(ReflectError::codec("tagged", "empty input"));
            }
            Ok(T::default())
        }
    }

    #[test]
    fn test_generic_catalog() {
        let registry = SerializerRegistry::new();
        assert!(!registry.has_generic("json"));

        registry.register_generic("json", Arc::new(Named("first")));
        registry.register_generic("json", Arc::new(Named("second")));
        assert!(registry.has_generic("json"));
        assert_eq!(registry.generic_names(), ["json"]);
        assert_eq!(
            registry.get_generic("json").map(|s| s.name().to_string()),
            Some("second".to_string())
        );

        assert!(registry.remove_generic("json").is_some());
        assert!(registry.get_generic("json").is_none());
    }

    #[test]
    fn test_typed_catalog_is_keyed_by_type() {
        let registry = SerializerRegistry::new();
        registry.register_typed::<u32>("tagged", Arc::new(Tagged(1)));
        registry.register_typed::<String>("tagged", Arc::new(Tagged(2)));

        assert!(registry.has_typed::<u32>("tagged"));
        assert!(registry.has_typed::<String>("tagged"));
        assert!(!registry.has_typed::<u64>("tagged"));
        assert!(!registry.has_typed::<u32>("other"));

        let for_u32 = registry.get_typed::<u32>("tagged").expect("u32 codec");
        let for_string = registry.get_typed::<String>("tagged").expect("String codec");
        assert_eq!(for_u32.serialize(&5).expect("encode"), [1]);
        assert_eq!(for_string.serialize(&String::new()).expect("encode"), [2]);

        assert!(registry.remove_typed::<u32>("tagged").is_some());
        assert!(!registry.has_typed::<u32>("tagged"));
        assert!(registry.has_typed::<String>("tagged"));
        assert_eq!(registry.typed_names::<String>(), ["tagged"]);
    }

    #[test]
    fn test_default_deserialize_into() {
        let codec = Tagged(0);
        let mut target = 9u32;
        TypeSerializer::<u32>::deserialize_into(&codec, &[0], &mut target).expect("decode");
        assert_eq!(target, 0);
        assert!(TypeSerializer::<u32>::deserialize_into(&codec, &[], &mut target).is_err());
    }

    #[test]
    fn test_clear_empties_both_catalogs() {
        let registry = SerializerRegistry::new();
        registry.register_generic("json", Arc::new(Named("json")));
        registry.register_typed::<u32>("tagged", Arc::new(Tagged(1)));
        registry.clear();
        assert!(registry.generic_names().is_empty());
        assert!(!registry.has_typed::<u32>("tagged"));
    }
}
