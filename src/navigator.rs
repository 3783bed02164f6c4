// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Group navigation for a configuration
//!
//! The navigator resolves the current group, its neighbours in sequential
//! order and the conflict groups of a configuration. Navigation marks the
//! group being left as visited and then asks the store to change the group.

use crate::error::Result;
use crate::lookup::{find_group_by_id, find_parent_group, has_sub_groups};
use crate::observe::Selection;
use crate::status::{first_incomplete_group, GroupStatusTracker};
use crate::store::{Action, ConfiguratorStore};
use crate::types::{Configuration, Group, GroupStatus, GroupType, Owner};
use std::sync::Arc;
use tracing::{debug, warn};

/// Id of the active group: the explicit one, else the first flat group
#[must_use]
pub fn current_group_id(configuration: &Configuration) -> Option<&str> {
    configuration
        .interaction_state
        .current_group
        .as_deref()
        .or_else(|| configuration.flat_groups.first().map(|g| g.id.as_str()))
}

/// First group of type `CONFLICT_GROUP` in sequential order
#[must_use]
pub fn first_conflict_group(configuration: &Configuration) -> Option<&Group> {
    configuration
        .flat_groups
        .iter()
        .find(|g| g.group_type == GroupType::ConflictGroup)
}

/// Whether the group type belongs to conflict solving
#[must_use]
pub fn is_conflict_group_type(group_type: GroupType) -> bool {
    matches!(
        group_type,
        GroupType::ConflictHeaderGroup | GroupType::ConflictGroup
    )
}

fn neighbouring_group_id(configuration: &Configuration, offset: isize) -> Option<String> {
    let current = current_group_id(configuration)?;
    let index = configuration.flat_index_of(current)?;
    let target = index.checked_add_signed(offset)?;
    configuration.flat_groups.get(target).map(|g| g.id.clone())
}

/// Navigator over the configurations held by a store
#[derive(Debug)]
pub struct ConfiguratorGroups<S> {
    store: Arc<S>,
    status: GroupStatusTracker<S>,
}

impl<S> Clone for ConfiguratorGroups<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            status: self.status.clone(),
        }
    }
}

impl<S: ConfiguratorStore> ConfiguratorGroups<S> {
    /// Create a navigator on top of a store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            status: GroupStatusTracker::new(Arc::clone(&store)),
            store,
        }
    }

    /// The status tracker sharing this navigator's store
    #[must_use]
    pub fn status(&self) -> &GroupStatusTracker<S> {
        &self.status
    }

    fn select<T: 'static>(
        &self,
        owner: &Owner,
        project: impl Fn(&Arc<Configuration>) -> T + Send + Sync + 'static,
    ) -> Selection<T> {
        Selection::new(owner.key(), self.store.select(owner), project)
    }

    /// Latest configuration of an owner
    pub fn get_configuration(&self, owner: &Owner) -> Selection<Arc<Configuration>> {
        self.select(owner, Arc::clone)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current group id, falling back to the first flat group
    pub fn get_current_group_id(&self, owner: &Owner) -> Selection<Option<String>> {
        self.select(owner, |configuration| {
            current_group_id(configuration).map(str::to_owned)
        })
    }

    /// Current group; no lookup happens when there is no current id
    pub fn get_current_group(&self, owner: &Owner) -> Selection<Option<Group>> {
        self.select(owner, |configuration| {
            let current = current_group_id(configuration)?;
            find_group_by_id(&configuration.groups, Some(current)).cloned()
        })
    }

    /// Id of the group after the current one in sequential order
    pub fn get_next_group_id(&self, owner: &Owner) -> Selection<Option<String>> {
        self.select(owner, |configuration| neighbouring_group_id(configuration, 1))
    }

    /// Id of the group before the current one in sequential order
    pub fn get_previous_group_id(&self, owner: &Owner) -> Selection<Option<String>> {
        self.select(owner, |configuration| neighbouring_group_id(configuration, -1))
    }

    /// Group whose children the menu currently shows
    pub fn get_menu_parent_group(&self, owner: &Owner) -> Selection<Option<Group>> {
        self.select(owner, |configuration| {
            find_group_by_id(
                &configuration.groups,
                configuration.interaction_state.menu_parent_group.as_deref(),
            )
            .cloned()
        })
    }

    /// First conflict group of a configuration
    #[must_use]
    pub fn get_first_conflict_group<'a>(&self, configuration: &'a Configuration) -> Option<&'a Group> {
        first_conflict_group(configuration)
    }

    /// See [`is_conflict_group_type`]
    #[must_use]
    pub fn is_conflict_group_type(&self, group_type: GroupType) -> bool {
        is_conflict_group_type(group_type)
    }

    /// Parent of a group within `groups`, `None` for top-level groups
    #[must_use]
    pub fn get_parent_group<'a>(&self, groups: &'a [Group], group: &Group) -> Option<&'a Group> {
        find_parent_group(groups, &group.id)
    }

    /// Whether the group has children
    #[must_use]
    pub fn has_sub_groups(&self, group: &Group) -> bool {
        has_sub_groups(group)
    }

    /// Whether a group has been visited
    pub fn is_group_visited(&self, owner: &Owner, group_id: &str) -> Selection<bool> {
        self.status.is_group_visited(owner, group_id)
    }

    /// Tracked status of a group
    pub fn get_group_status(&self, owner: &Owner, group_id: &str) -> Selection<GroupStatus> {
        self.status.get_group_status(owner, group_id)
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Record the visited flag of a group against the latest configuration
    ///
    /// # Errors
    /// [`crate::error::NavError::StoreClosed`] if no configuration is ever published.
    pub async fn set_group_status(&self, owner: &Owner, group_id: &str, visited: bool) -> Result<()> {
        let configuration = self.get_configuration(owner).first().await?;
        self.status.set_group_status(&configuration, group_id, visited);
        Ok(())
    }

    /// Show the children of `group_id` in the menu. The id is not validated.
    pub fn set_menu_parent_group(&self, owner: &Owner, group_id: &str) {
        self.store.dispatch(Action::SetMenuParentGroup {
            entity_key: owner.key(),
            menu_parent_group: Some(group_id.to_owned()),
        });
    }

    /// Navigate to a group.
    ///
    /// With `mark_previous_visited`, the group being left is recorded as
    /// visited before the group change is dispatched.
    ///
    /// # Errors
    /// [`crate::error::NavError::StoreClosed`] if the current group cannot be resolved.
    pub async fn navigate_to_group(
        &self,
        configuration: &Configuration,
        group_id: &str,
        mark_previous_visited: bool,
    ) -> Result<()> {
        self.navigate(configuration, Some(group_id), mark_previous_visited)
            .await
    }

    /// Navigate to the first group that is not complete.
    ///
    /// Callers check beforehand that such a group exists. When none does, the
    /// group change carries no target and the store ignores it.
    ///
    /// # Errors
    /// [`crate::error::NavError::StoreClosed`] if no configuration is ever published.
    pub async fn navigate_to_first_incomplete_group(&self, owner: &Owner) -> Result<()> {
        let configuration = self.get_configuration(owner).first().await?;
        let target = first_incomplete_group(&configuration).map(|g| g.id.clone());
        if target.is_none() {
            warn!(%owner, "No incomplete group to navigate to");
        }
        self.navigate(&configuration, target.as_deref(), true).await
    }

    /// Navigate to the first conflict group, with the conflict header as menu parent.
    ///
    /// Callers check beforehand that the configuration has conflicts.
    ///
    /// # Errors
    /// [`crate::error::NavError::StoreClosed`] if no configuration is ever published.
    pub async fn navigate_to_conflict_solver(&self, owner: &Owner) -> Result<()> {
        let configuration = self.get_configuration(owner).first().await?;
        let target = first_conflict_group(&configuration).map(|g| g.id.clone());
        if target.is_none() {
            warn!(%owner, "No conflict group to navigate to");
        }
        self.navigate(&configuration, target.as_deref(), true).await
    }

    async fn navigate(
        &self,
        configuration: &Configuration,
        group_id: Option<&str>,
        mark_previous_visited: bool,
    ) -> Result<()> {
        let owner = &configuration.owner;

        if mark_previous_visited {
            if let Some(previous) = self.get_current_group(owner).first().await? {
                debug!(%owner, group = %previous.id, "Marking group visited");
                self.status.set_group_status(configuration, &previous.id, true);
            }
        }

        let parent_group_id = group_id
            .and_then(|id| find_parent_group(&configuration.groups, id))
            .map(|parent| parent.id.clone());

        debug!(%owner, target = ?group_id, parent = ?parent_group_id, "Changing group");
        self.store.dispatch(Action::ChangeGroup {
            owner: owner.clone(),
            group_id: group_id.map(str::to_owned),
            parent_group_id,
        });
        Ok(())
    }
}
