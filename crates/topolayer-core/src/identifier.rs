//! Node identifiers.
//!
//! This module provides the [`Id`] type used to name nodes throughout topolayer.
//! Identifiers are ordered by their string value, so ordered collections keyed by
//! [`Id`] iterate in the same order on every platform.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Identifier of a node in a topology.
///
/// # Examples
///
/// ```
/// use topolayer_core::identifier::Id;
///
/// let spine = Id::new("spine1");
/// let leaf = Id::from("leaf1");
///
/// assert!(leaf < spine);
/// assert_eq!(spine, "spine1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// Creates an `Id` from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the maximal leading alphabetic part of the identifier.
    ///
    /// Nodes sharing a prefix are considered to play the same role in a topology
    /// (`leaf1`, `leaf2`, ...).
    ///
    /// # Examples
    ///
    /// ```
    /// use topolayer_core::identifier::Id;
    ///
    /// assert_eq!(Id::new("leaf12").alpha_prefix(), "leaf");
    /// assert_eq!(Id::new("dc1-spine").alpha_prefix(), "dc");
    /// assert_eq!(Id::new("42").alpha_prefix(), "");
    /// ```
    pub fn alpha_prefix(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .find(|(_, c)| !c.is_alphabetic())
            .map_or(self.0.len(), |(idx, _)| idx);
        &self.0[..end]
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Id {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
