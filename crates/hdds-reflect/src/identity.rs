// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type identity registry.
//!
//! Maps a [`TypeIdentity`] (a `TypeId` plus the compiler's name for the type)
//! to a registered display name and back.
//!
//! # Invariants
//!
//! - The two maps form a bijection at all times: every registered identity
//!   owns exactly one name and every name points back to exactly one identity.
//! - Both maps live behind one lock, so a reader never sees one side updated
//!   without the other.
//!
//! # Example
//!
//! ```rust
//! use hdds_reflect::{RegistryConfig, TypeIdentity, TypeIdentityRegistry};
//!
//! struct User;
//!
//! let registry = TypeIdentityRegistry::new(RegistryConfig::default());
//! registry.register(TypeIdentity::of::<User>(), Some("app.User")).unwrap();
//!
//! assert_eq!(registry.name_of(TypeIdentity::of::<User>()), "app.User");
//! assert!(registry.has_name("app.User"));
//! ```

use crate::config::{CollisionPolicy, NameStyle, RegistryConfig};
use crate::error::{ReflectError, Result};
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Process-local identity of a concrete type.
///
/// Equality and hashing use the `TypeId` only. Not stable across builds;
/// never persist or transmit it.
#[derive(Clone, Copy)]
pub struct TypeIdentity {
    id: TypeId,
    canonical: &'static str,
}

impl TypeIdentity {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            canonical: std::any::type_name::<T>(),
        }
    }

    /// Underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Compiler-provided name, e.g. `my_app::msg::User`.
    pub fn canonical_name(&self) -> &'static str {
        self.canonical
    }
}

impl PartialEq for TypeIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeIdentity {}

impl Hash for TypeIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeIdentity({})", self.canonical)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical)
    }
}

/// Compiler-provided name of `T`.
pub fn canonical_type_name<T: ?Sized + 'static>() -> &'static str {
    std::any::type_name::<T>()
}

/// Name that [`TypeIdentityRegistry::register`] derives for `T` under `style`.
pub fn derive_type_name<T: ?Sized + 'static>(style: NameStyle) -> String {
    derive_name(canonical_type_name::<T>(), style)
}

fn derive_name(canonical: &str, style: NameStyle) -> String {
    match style {
        NameStyle::Qualified => canonical.to_string(),
        NameStyle::Short => shorten_type_name(canonical),
    }
}

/// Strip module paths from every path in a type name.
///
/// `alloc::vec::Vec<my_app::User>` becomes `Vec<User>`.
pub fn shorten_type_name(canonical: &str) -> String {
    let mut out = String::with_capacity(canonical.len());
    // Start (in `out`) of the path currently being written.
    let mut segment_start = 0;
    let mut chars = canonical.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                out.truncate(segment_start);
            }
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | '&' | ';' | '*' => {
                out.push(c);
                segment_start = out.len();
            }
            _ => out.push(c),
        }
    }
    out
}

#[derive(Default)]
struct IdentityTable {
    names: HashMap<TypeIdentity, Arc<str>>,
    identities: HashMap<Arc<str>, TypeIdentity>,
}

/// Bidirectional `TypeIdentity <-> name` registry.
pub struct TypeIdentityRegistry {
    config: RegistryConfig,
    table: RwLock<IdentityTable>,
}

impl TypeIdentityRegistry {
    /// Create an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            table: RwLock::new(IdentityTable::default()),
        }
    }

    /// Configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register `identity` under `custom_name`, or under a derived name.
    ///
    /// Re-registering an identity replaces its name and retires the old one.
    /// Returns the name actually registered.
    ///
    /// # Errors
    ///
    /// - `InvalidTypeName` if the name is empty.
    /// - `NameCollision` if another identity holds the name and the policy
    ///   is [`CollisionPolicy::Reject`].
    pub fn register(&self, identity: TypeIdentity, custom_name: Option<&str>) -> Result<String> {
        let name: Arc<str> = match custom_name {
            Some(custom) => Arc::from(custom),
            None => Arc::from(derive_name(identity.canonical_name(), self.config.naming)),
        };
        if name.is_empty() {
            return Err(ReflectError::InvalidTypeName {
                name: String::new(),
            });
        }

        let mut guard = self.table.write();
        let table = &mut *guard;

        let holder = table.identities.get(&*name).copied();
        if let Some(holder) = holder.filter(|h| *h != identity) {
            match self.config.collision {
                CollisionPolicy::Reject => {
                    return Err(ReflectError::NameCollision {
                        name: name.to_string(),
                        existing: holder.canonical_name(),
                    });
                }
                CollisionPolicy::Overwrite => {
                    log::warn!(
                        "[TypeRegistry] name '{}' moved from {} to {}",
                        name,
                        holder,
                        identity
                    );
                    table.names.remove(&holder);
                }
            }
        }

        if let Some(previous) = table.names.insert(identity, Arc::clone(&name)) {
            if previous != name {
                table.identities.remove(&*previous);
            }
        }
        table.identities.insert(Arc::clone(&name), identity);
        drop(guard);

        log::debug!("[TypeRegistry] registered {} as '{}'", identity, name);
        Ok(name.to_string())
    }

    /// Registered name, or `""` if `identity` is unregistered.
    pub fn name_of(&self, identity: TypeIdentity) -> String {
        self.lookup(identity).unwrap_or_default()
    }

    /// Registered name, if any.
    pub fn lookup(&self, identity: TypeIdentity) -> Option<String> {
        self.table
            .read()
            .names
            .get(&identity)
            .map(|name| name.to_string())
    }

    /// Identity currently holding `name`.
    pub fn identity_of(&self, name: &str) -> Option<TypeIdentity> {
        self.table.read().identities.get(name).copied()
    }

    /// Whether `identity` has a name.
    pub fn is_registered(&self, identity: TypeIdentity) -> bool {
        self.table.read().names.contains_key(&identity)
    }

    /// Whether some registered identity holds `name`.
    pub fn has_name(&self, name: &str) -> bool {
        self.table.read().identities.contains_key(name)
    }

    /// Snapshot of all registered names, in no particular order.
    pub fn all_names(&self) -> Vec<String> {
        self.table
            .read()
            .names
            .values()
            .map(|name| name.to_string())
            .collect()
    }

    /// Number of registered identities.
    pub fn count(&self) -> usize {
        self.table.read().names.len()
    }

    /// Remove `identity`, returning the name it held.
    pub fn unregister(&self, identity: TypeIdentity) -> Option<String> {
        let mut guard = self.table.write();
        let table = &mut *guard;
        let name = table.names.remove(&identity)?;
        table.identities.remove(&*name);
        Some(name.to_string())
    }

    /// Remove every registration.
    pub fn clear(&self) {
        let mut table = self.table.write();
        table.names.clear();
        table.identities.clear();
        log::debug!("[TypeRegistry] cleared");
    }
}

impl Default for TypeIdentityRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl fmt::Debug for TypeIdentityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeIdentityRegistry")
            .field("config", &self.config)
            .field("count", &self.count())
            .finish()
    }
}
