// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Visited and complete status per (owner, group)

use crate::observe::Selection;
use crate::store::{Action, ConfiguratorStore};
use crate::types::{Configuration, Group, GroupStatus, Owner};
use std::sync::Arc;
use tracing::trace;

/// Reads group statuses from the store and issues status commands
#[derive(Debug)]
pub struct GroupStatusTracker<S> {
    store: Arc<S>,
}

impl<S> Clone for GroupStatusTracker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: ConfiguratorStore> GroupStatusTracker<S> {
    /// Create a tracker on top of a store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Record the visited flag of a group.
    ///
    /// Unknown group ids are ignored.
    pub fn set_group_status(&self, configuration: &Configuration, group_id: &str, visited: bool) {
        if !configuration.contains_group(group_id) {
            trace!(owner = %configuration.owner, group = group_id, "No such group, status not recorded");
            return;
        }
        self.store.dispatch(Action::SetGroupStatus {
            owner: configuration.owner.clone(),
            group_id: group_id.to_owned(),
            visited,
        });
    }

    /// Record the complete flag of a group
    pub fn set_group_complete(&self, owner: &Owner, group_id: &str, complete: bool) {
        self.store.dispatch(Action::SetGroupComplete {
            owner: owner.clone(),
            group_id: group_id.to_owned(),
            complete,
        });
    }

    /// Whether a group has been visited (`false` until recorded)
    pub fn is_group_visited(&self, owner: &Owner, group_id: &str) -> Selection<bool> {
        self.get_group_status(owner, group_id).map(|status| status.visited)
    }

    /// Tracked status of a group
    pub fn get_group_status(&self, owner: &Owner, group_id: &str) -> Selection<GroupStatus> {
        let group_id = group_id.to_owned();
        Selection::new(owner.key(), self.store.select(owner), move |configuration| {
            configuration.status_of(&group_id)
        })
    }

    /// First group in sequential order that is not complete
    #[must_use]
    pub fn get_first_incomplete_group<'a>(&self, configuration: &'a Configuration) -> Option<&'a Group> {
        first_incomplete_group(configuration)
    }
}

/// First entry of `flat_groups` whose tracked status is incomplete
#[must_use]
pub fn first_incomplete_group(configuration: &Configuration) -> Option<&Group> {
    configuration
        .flat_groups
        .iter()
        .find(|group| !configuration.status_of(&group.id).complete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn setup() -> (Arc<MemoryStore>, GroupStatusTracker<MemoryStore>, Owner) {
        let configuration = Configuration::new(
            Owner::product("P"),
            vec![Group::new("a", "A"), Group::new("b", "B"), Group::new("c", "C")],
        );
        let owner = configuration.owner.clone();
        let store = Arc::new(MemoryStore::with_configurations([configuration]));
        (Arc::clone(&store), GroupStatusTracker::new(store), owner)
    }

    #[test]
    fn test_unseen_group_defaults() {
        let (_, tracker, owner) = setup();
        assert_eq!(tracker.is_group_visited(&owner, "a").latest(), Some(false));
        assert_eq!(
            tracker.get_group_status(&owner, "never-heard-of").latest(),
            Some(GroupStatus::default())
        );
    }

    #[test]
    fn test_set_group_status_is_idempotent() {
        let (store, tracker, owner) = setup();
        let configuration = store.snapshot(&owner).unwrap();

        tracker.set_group_status(&configuration, "b", true);
        tracker.set_group_status(&configuration, "b", true);

        assert_eq!(tracker.is_group_visited(&owner, "b").latest(), Some(true));
        assert_eq!(store.snapshot(&owner).unwrap().statuses.len(), 1);
    }

    #[test]
    fn test_unknown_group_is_silent_noop() {
        let (store, tracker, owner) = setup();
        let configuration = store.snapshot(&owner).unwrap();

        tracker.set_group_status(&configuration, "zzz", true);

        assert!(store.snapshot(&owner).unwrap().statuses.is_empty());
    }

    #[test]
    fn test_first_incomplete_group() {
        let (store, tracker, owner) = setup();
        tracker.set_group_complete(&owner, "a", true);

        let configuration = store.snapshot(&owner).unwrap();
        assert_eq!(
            tracker.get_first_incomplete_group(&configuration).map(|g| g.id.as_str()),
            Some("b")
        );

        tracker.set_group_complete(&owner, "b", true);
        tracker.set_group_complete(&owner, "c", true);
        let configuration = store.snapshot(&owner).unwrap();
        assert!(tracker.get_first_incomplete_group(&configuration).is_none());
    }
}
