// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Configurator navigation library - group traversal for product configurations
//!
//! This crate provides the group tree model of a product configuration, pure
//! lookups over that tree, per-group status tracking and a navigator that
//! issues commands to an external store holding the configuration snapshots.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod lookup;
pub mod navigator;
pub mod observe;
pub mod render;
pub mod session;
pub mod status;
pub mod store;

/// Core data types of a configuration and its group tree
pub mod types {
    use serde::{Deserialize, Serialize};
    use std::collections::{BTreeMap, HashSet};
    use std::fmt;

    // =========================================================================
    // Owner
    // =========================================================================

    /// Kind of business entity a configuration belongs to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub enum OwnerType {
        /// A product opened from the catalog
        Product,
        /// An entry of the current cart
        CartEntry,
        /// An entry of a placed order
        OrderEntry,
    }

    impl OwnerType {
        /// Get the short code for this owner type
        #[must_use]
        pub fn code(&self) -> &'static str {
            match self {
                Self::Product => "product",
                Self::CartEntry => "cartEntry",
                Self::OrderEntry => "orderEntry",
            }
        }

        /// Parse an owner type from its short code
        #[must_use]
        pub fn from_code(code: &str) -> Option<Self> {
            match code {
                "product" => Some(Self::Product),
                "cartEntry" => Some(Self::CartEntry),
                "orderEntry" => Some(Self::OrderEntry),
                _ => None,
            }
        }
    }

    /// Opaque identifier of the entity a configuration belongs to
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Owner {
        /// Entity kind
        pub owner_type: OwnerType,
        /// Entity identifier (product code, cart entry number, ...)
        pub id: String,
    }

    impl Owner {
        /// Create an owner of the given type
        pub fn new(owner_type: OwnerType, id: impl Into<String>) -> Self {
            Self {
                owner_type,
                id: id.into(),
            }
        }

        /// Owner of a product configuration
        pub fn product(id: impl Into<String>) -> Self {
            Self::new(OwnerType::Product, id)
        }

        /// Key under which the store indexes this owner: `<type>/<id>`
        #[must_use]
        pub fn key(&self) -> String {
            format!("{}/{}", self.owner_type.code(), self.id)
        }

        /// Parse an owner from its key
        #[must_use]
        pub fn from_key(key: &str) -> Option<Self> {
            let (code, id) = key.split_once('/')?;
            if id.is_empty() {
                return None;
            }
            Some(Self::new(OwnerType::from_code(code)?, id))
        }
    }

    impl fmt::Display for Owner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.key())
        }
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Group types
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum GroupType {
        /// Ordinary group of attributes
        #[default]
        AttributeGroup,
        /// Group standing for a sub item of the product
        SubItemGroup,
        /// Structural header above all conflict groups
        ConflictHeaderGroup,
        /// A detected conflict that needs resolution
        ConflictGroup,
    }

    /// Node in the navigation tree of a configuration
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Group {
        /// Unique identifier within the configuration
        pub id: String,
        /// Display name
        #[serde(default)]
        pub name: String,
        /// Description
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        /// Group type
        #[serde(default)]
        pub group_type: GroupType,
        /// Child groups
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub sub_groups: Vec<Group>,
    }

    impl Group {
        /// Create a leaf attribute group
        pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
            Self {
                id: id.into(),
                name: name.into(),
                description: None,
                group_type: GroupType::AttributeGroup,
                sub_groups: Vec::new(),
            }
        }

        /// Set the group type
        #[must_use]
        pub fn with_type(mut self, group_type: GroupType) -> Self {
            self.group_type = group_type;
            self
        }

        /// Set the child groups
        #[must_use]
        pub fn with_sub_groups(mut self, sub_groups: Vec<Group>) -> Self {
            self.sub_groups = sub_groups;
            self
        }
    }

    /// Status of a single group
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct GroupStatus {
        /// Group has been left at least once by navigation
        #[serde(default)]
        pub visited: bool,
        /// All mandatory content of the group is filled (derived externally)
        #[serde(default)]
        pub complete: bool,
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Per-configuration cursor data
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct InteractionState {
        /// Active group
        #[serde(default)]
        pub current_group: Option<String>,
        /// Group whose children are shown in the group menu
        #[serde(default)]
        pub menu_parent_group: Option<String>,
    }

    /// A configurable product session
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Configuration {
        /// Backend configuration identifier
        #[serde(default)]
        pub config_id: String,
        /// Entity this configuration belongs to
        pub owner: Owner,
        /// Top-level groups (tree)
        #[serde(default)]
        pub groups: Vec<Group>,
        /// All groups in depth-first pre-order
        #[serde(default)]
        pub flat_groups: Vec<Group>,
        /// Cursor data
        #[serde(default)]
        pub interaction_state: InteractionState,
        /// Tracked status per group id
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        pub statuses: BTreeMap<String, GroupStatus>,
        /// Whole configuration is complete
        #[serde(default)]
        pub complete: bool,
        /// Whole configuration is free of conflicts
        #[serde(default = "default_consistent")]
        pub consistent: bool,
    }

    fn default_consistent() -> bool {
        true
    }

    impl Configuration {
        /// Create a configuration from its group tree, deriving the flat groups
        pub fn new(owner: Owner, groups: Vec<Group>) -> Self {
            Self {
                config_id: String::new(),
                owner,
                groups,
                flat_groups: Vec::new(),
                interaction_state: InteractionState::default(),
                statuses: BTreeMap::new(),
                complete: false,
                consistent: true,
            }
            .with_flat_groups()
        }

        /// Derive `flat_groups` from `groups` when they are missing
        #[must_use]
        pub fn with_flat_groups(mut self) -> Self {
            if self.flat_groups.is_empty() {
                self.flat_groups = crate::lookup::flatten_groups(&self.groups);
            }
            self
        }

        /// Check that `flat_groups` is the pre-order linearization of `groups`
        /// and that no group id occurs twice
        #[must_use]
        pub fn flat_groups_consistent(&self) -> bool {
            if self.duplicate_group_id().is_some() {
                return false;
            }
            let expected = crate::lookup::flatten_groups(&self.groups);
            expected.len() == self.flat_groups.len()
                && expected
                    .iter()
                    .zip(&self.flat_groups)
                    .all(|(a, b)| a.id == b.id)
        }

        /// First group id that occurs more than once in the tree, in pre-order
        #[must_use]
        pub fn duplicate_group_id(&self) -> Option<&str> {
            let mut seen = HashSet::new();
            let mut stack: Vec<&Group> = self.groups.iter().rev().collect();
            while let Some(group) = stack.pop() {
                if !seen.insert(group.id.as_str()) {
                    return Some(group.id.as_str());
                }
                stack.extend(group.sub_groups.iter().rev());
            }
            None
        }

        /// Tracked status of a group, defaulting to unvisited and incomplete
        #[must_use]
        pub fn status_of(&self, group_id: &str) -> GroupStatus {
            self.statuses.get(group_id).copied().unwrap_or_default()
        }

        /// Position of a group in `flat_groups`
        #[must_use]
        pub fn flat_index_of(&self, group_id: &str) -> Option<usize> {
            self.flat_groups.iter().position(|g| g.id == group_id)
        }

        /// Whether a group with this id exists anywhere in the tree
        #[must_use]
        pub fn contains_group(&self, group_id: &str) -> bool {
            crate::lookup::find_group_by_id(&self.groups, Some(group_id)).is_some()
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{NavError, Result};
    pub use crate::navigator::ConfiguratorGroups;
    pub use crate::observe::Selection;
    pub use crate::status::GroupStatusTracker;
    pub use crate::store::{Action, ConfiguratorStore, MemoryStore};
    pub use crate::types::*;
}
