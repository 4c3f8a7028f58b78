// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registry configuration.
//!
//! Two knobs, both affecting type-name registration:
//!
//! - [`CollisionPolicy`]: what happens when a second type claims a name that
//!   is already held.
//! - [`NameStyle`]: how a name is derived when the caller supplies none.
//!
//! Defaults come from the environment when built with
//! [`RegistryConfig::from_env`]:
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `HDDS_REFLECT_COLLISION` | `overwrite`, `reject` | `overwrite` |
//! | `HDDS_REFLECT_NAMING` | `qualified`, `short` | `qualified` |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable selecting the [`CollisionPolicy`].
pub const ENV_COLLISION: &str = "HDDS_REFLECT_COLLISION";
/// Environment variable selecting the [`NameStyle`].
pub const ENV_NAMING: &str = "HDDS_REFLECT_NAMING";

/// Behaviour when a type registers a name another type already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CollisionPolicy {
    /// The newcomer takes the name; the previous holder is unregistered.
    /// Logged as a warning.
    #[default]
    Overwrite,
    /// Registration fails with `ReflectError::NameCollision`.
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown collision policy: {}", other)),
        }
    }
}

/// How a registered name is derived when no custom name is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NameStyle {
    /// Full path as reported by the compiler (`my_app::msg::User`).
    #[default]
    Qualified,
    /// Module paths stripped, generics kept (`User`, `Envelope<User>`).
    Short,
}

impl FromStr for NameStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qualified" => Ok(Self::Qualified),
            "short" => Ok(Self::Short),
            other => Err(format!("unknown name style: {}", other)),
        }
    }
}

/// Configuration for a [`ReflectRegistry`](crate::ReflectRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    /// Name collision handling.
    pub collision: CollisionPolicy,
    /// Derived-name style.
    pub naming: NameStyle,
}

impl RegistryConfig {
    /// Default configuration (overwrite on collision, qualified names).
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration seeded from `HDDS_REFLECT_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults; unparsable ones
    /// are logged.
    pub fn from_env() -> Self {
        Self {
            collision: env_or_default(ENV_COLLISION),
            naming: env_or_default(ENV_NAMING),
        }
    }

    /// Set the collision policy.
    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    /// Set the derived-name style.
    pub fn with_naming(mut self, naming: NameStyle) -> Self {
        self.naming = naming;
        self
    }
}

fn env_or_default<T>(var: &str) -> T
where
    T: FromStr<Err = String> + Default,
{
    match std::env::var(var) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            log::warn!("[RegistryConfig] ignoring {}={:?}: {}", var, raw, e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}
