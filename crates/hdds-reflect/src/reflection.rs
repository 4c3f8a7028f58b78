// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor registry: registered type name -> [`MessageDescriptor`].
//!
//! # Performance
//!
//! - **Atomic swap**: the map lives behind an `ArcSwap`; readers load a
//!   snapshot without locking.
//! - **Read-copy-update**: writers clone the map, edit the copy and swap it in.
//!   Registration is a setup-time operation, lookups happen on every dispatch.

use crate::descriptor::MessageDescriptor;
use crate::error::{ReflectError, Result};
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type DescriptorMap = HashMap<Arc<str>, Arc<MessageDescriptor>>;

/// Catalog of message descriptors keyed by registered type name.
pub struct DescriptorRegistry {
    descriptors: ArcSwap<DescriptorMap>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Publish `descriptor` under `name`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// `InvalidTypeName` for an empty name.
    pub fn register(&self, name: &str, descriptor: impl Into<Arc<MessageDescriptor>>) -> Result<()> {
        if name.is_empty() {
            return Err(ReflectError::InvalidTypeName {
                name: name.to_string(),
            });
        }
        let key: Arc<str> = Arc::from(name);
        let descriptor = descriptor.into();
        let fields = descriptor.len();
        let previous = self.descriptors.rcu(|current| {
            let mut next = DescriptorMap::clone(current);
            next.insert(Arc::clone(&key), Arc::clone(&descriptor));
            next
        });
        if previous.contains_key(name) {
            log::debug!("[DescriptorRegistry] Replaced descriptor '{}' ({} fields)", name, fields);
        } else {
            log::debug!("[DescriptorRegistry] Registered descriptor '{}' ({} fields)", name, fields);
        }
        Ok(())
    }

    /// Descriptor published under `name`.
    pub fn descriptor_of(&self, name: &str) -> Option<Arc<MessageDescriptor>> {
        self.descriptors.load().get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.descriptors.load().contains_key(name)
    }

    /// Registered descriptor names, unordered.
    pub fn all_names(&self) -> Vec<String> {
        self.descriptors
            .load()
            .keys()
            .map(|k| k.to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.load().is_empty()
    }

    /// Remove and return the descriptor under `name`.
    pub fn unregister(&self, name: &str) -> Option<Arc<MessageDescriptor>> {
        let previous = self.descriptors.rcu(|current| {
            let mut next = DescriptorMap::clone(current);
            next.remove(name);
            next
        });
        let removed = previous.get(name).cloned();
        if removed.is_some() {
            log::debug!("[DescriptorRegistry] Unregistered descriptor '{}'", name);
        }
        removed
    }

    pub fn clear(&self) {
        self.descriptors.store(Arc::new(HashMap::new()));
        log::debug!("[DescriptorRegistry] Cleared");
    }
}

impl Default for DescriptorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DescriptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorRegistry")
            .field("descriptors", &self.len())
            .finish()
    }
}
