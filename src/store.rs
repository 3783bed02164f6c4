// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Store seam: configuration snapshots in, commands out
//!
//! The navigator never mutates a configuration. It selects snapshots from a
//! [`ConfiguratorStore`] and dispatches [`Action`]s that the store applies.

use crate::types::{Configuration, Owner};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

/// Latest published configuration of an owner (`None` until loaded)
pub type Snapshot = Option<Arc<Configuration>>;

/// Commands accepted by a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Put a configuration into the store, replacing any previous one
    LoadConfiguration {
        /// Configuration to hold
        configuration: Configuration,
    },
    /// Discard a configuration together with its group statuses
    RemoveConfiguration {
        /// Owner of the configuration
        owner: Owner,
    },
    /// Make a group current and show its parent in the menu
    ChangeGroup {
        /// Owner of the configuration
        owner: Owner,
        /// Target group; no target is a no-op
        group_id: Option<String>,
        /// Parent of the target, if it is nested
        parent_group_id: Option<String>,
    },
    /// Set the group whose children the menu shows
    SetMenuParentGroup {
        /// Owner key
        entity_key: String,
        /// New menu parent
        menu_parent_group: Option<String>,
    },
    /// Record whether a group has been visited
    SetGroupStatus {
        /// Owner of the configuration
        owner: Owner,
        /// Group to update
        group_id: String,
        /// Visited flag
        visited: bool,
    },
    /// Record whether a group is complete
    SetGroupComplete {
        /// Owner of the configuration
        owner: Owner,
        /// Group to update
        group_id: String,
        /// Complete flag
        complete: bool,
    },
}

impl Action {
    /// Key of the owner this command addresses
    #[must_use]
    pub fn owner_key(&self) -> String {
        match self {
            Self::LoadConfiguration { configuration } => configuration.owner.key(),
            Self::SetMenuParentGroup { entity_key, .. } => entity_key.clone(),
            Self::RemoveConfiguration { owner }
            | Self::ChangeGroup { owner, .. }
            | Self::SetGroupStatus { owner, .. }
            | Self::SetGroupComplete { owner, .. } => owner.key(),
        }
    }
}

/// Holder of configuration snapshots
pub trait ConfiguratorStore: Send + Sync {
    /// Subscribe to the snapshots of an owner, starting with the latest one
    fn select(&self, owner: &Owner) -> watch::Receiver<Snapshot>;

    /// Apply a command
    fn dispatch(&self, action: Action);
}

impl<S: ConfiguratorStore + ?Sized> ConfiguratorStore for Arc<S> {
    fn select(&self, owner: &Owner) -> watch::Receiver<Snapshot> {
        (**self).select(owner)
    }

    fn dispatch(&self, action: Action) {
        (**self).dispatch(action);
    }
}

/// In-process store with one latest-value channel per owner
///
/// Commands are applied one at a time under the write lock, and a new
/// snapshot is published only when a command changes something.
#[derive(Debug, Default)]
pub struct MemoryStore {
    channels: RwLock<HashMap<String, watch::Sender<Snapshot>>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given configurations
    pub fn with_configurations(configurations: impl IntoIterator<Item = Configuration>) -> Self {
        let store = Self::new();
        for configuration in configurations {
            store.dispatch(Action::LoadConfiguration { configuration });
        }
        store
    }

    /// Latest snapshot of an owner without subscribing
    #[must_use]
    pub fn snapshot(&self, owner: &Owner) -> Snapshot {
        self.channels
            .read()
            .get(&owner.key())
            .and_then(|sender| sender.borrow().clone())
    }

    /// All loaded configurations, ordered by owner key
    #[must_use]
    pub fn configurations(&self) -> Vec<Arc<Configuration>> {
        let channels = self.channels.read();
        let mut keys: Vec<_> = channels.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|key| channels[key].borrow().clone())
            .collect()
    }
}

impl ConfiguratorStore for MemoryStore {
    fn select(&self, owner: &Owner) -> watch::Receiver<Snapshot> {
        let key = owner.key();
        if let Some(sender) = self.channels.read().get(&key) {
            return sender.subscribe();
        }
        self.channels
            .write()
            .entry(key)
            .or_insert_with(|| watch::channel(None).0)
            .subscribe()
    }

    fn dispatch(&self, action: Action) {
        let key = action.owner_key();
        let mut channels = self.channels.write();
        let sender = channels
            .entry(key.clone())
            .or_insert_with(|| watch::channel(None).0);

        let changed = sender.send_if_modified(|snapshot| reduce(snapshot, &action));
        debug!(owner = %key, changed, "Applied {}", action_name(&action));

        // an owner with no configuration and no watchers keeps no channel
        if sender.borrow().is_none() && sender.receiver_count() == 0 {
            channels.remove(&key);
            trace!(owner = %key, "Dropped unused channel");
        }
    }
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::LoadConfiguration { .. } => "LoadConfiguration",
        Action::RemoveConfiguration { .. } => "RemoveConfiguration",
        Action::ChangeGroup { .. } => "ChangeGroup",
        Action::SetMenuParentGroup { .. } => "SetMenuParentGroup",
        Action::SetGroupStatus { .. } => "SetGroupStatus",
        Action::SetGroupComplete { .. } => "SetGroupComplete",
    }
}

/// Apply a command to a snapshot slot; returns whether it changed
fn reduce(snapshot: &mut Snapshot, action: &Action) -> bool {
    match action {
        Action::LoadConfiguration { configuration } => {
            *snapshot = Some(Arc::new(configuration.clone().with_flat_groups()));
            true
        }
        Action::RemoveConfiguration { .. } => snapshot.take().is_some(),
        _ => {
            let Some(current) = snapshot.as_ref() else {
                warn!(owner = %action.owner_key(), "Ignoring {} for unloaded configuration", action_name(action));
                return false;
            };
            match apply(current, action) {
                Some(next) => {
                    *snapshot = Some(Arc::new(next));
                    true
                }
                None => false,
            }
        }
    }
}

/// Compute the successor of a configuration, or `None` when nothing changes
fn apply(current: &Configuration, action: &Action) -> Option<Configuration> {
    match action {
        Action::ChangeGroup {
            group_id,
            parent_group_id,
            ..
        } => {
            let Some(group_id) = group_id else {
                trace!("ChangeGroup without target group, nothing to do");
                return None;
            };
            if !current.contains_group(group_id) {
                warn!(group = %group_id, "ChangeGroup to unknown group ignored");
                return None;
            }
            let state = &current.interaction_state;
            if state.current_group.as_deref() == Some(group_id.as_str())
                && state.menu_parent_group == *parent_group_id
            {
                return None;
            }
            let mut next = current.clone();
            next.interaction_state.current_group = Some(group_id.clone());
            next.interaction_state.menu_parent_group = parent_group_id.clone();
            Some(next)
        }
        Action::SetMenuParentGroup {
            menu_parent_group, ..
        } => {
            if current.interaction_state.menu_parent_group == *menu_parent_group {
                return None;
            }
            let mut next = current.clone();
            next.interaction_state.menu_parent_group = menu_parent_group.clone();
            Some(next)
        }
        Action::SetGroupStatus {
            group_id, visited, ..
        } => {
            if current.statuses.get(group_id).is_some_and(|s| s.visited == *visited) {
                return None;
            }
            let mut next = current.clone();
            next.statuses.entry(group_id.clone()).or_default().visited = *visited;
            Some(next)
        }
        Action::SetGroupComplete {
            group_id, complete, ..
        } => {
            if current.statuses.get(group_id).is_some_and(|s| s.complete == *complete) {
                return None;
            }
            let mut next = current.clone();
            next.statuses.entry(group_id.clone()).or_default().complete = *complete;
            Some(next)
        }
        Action::LoadConfiguration { .. } | Action::RemoveConfiguration { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Group;

    fn make_configuration() -> Configuration {
        Configuration::new(
            Owner::product("CONF_LAPTOP"),
            vec![
                Group::new("a", "A"),
                Group::new("b", "B").with_sub_groups(vec![Group::new("b1", "B1")]),
            ],
        )
    }

    #[test]
    fn test_load_and_snapshot() {
        let configuration = make_configuration();
        let owner = configuration.owner.clone();
        let store = MemoryStore::with_configurations([configuration]);

        let snapshot = store.snapshot(&owner).unwrap();
        assert_eq!(snapshot.flat_groups.len(), 3);
        assert_eq!(store.configurations().len(), 1);
    }

    #[test]
    fn test_change_group_sets_cursor() {
        let configuration = make_configuration();
        let owner = configuration.owner.clone();
        let store = MemoryStore::with_configurations([configuration]);

        store.dispatch(Action::ChangeGroup {
            owner: owner.clone(),
            group_id: Some("b1".into()),
            parent_group_id: Some("b".into()),
        });

        let state = store.snapshot(&owner).unwrap().interaction_state.clone();
        assert_eq!(state.current_group.as_deref(), Some("b1"));
        assert_eq!(state.menu_parent_group.as_deref(), Some("b"));
    }

    #[test]
    fn test_change_group_without_target_is_noop() {
        let configuration = make_configuration();
        let owner = configuration.owner.clone();
        let store = MemoryStore::with_configurations([configuration]);
        let rx = store.select(&owner);

        store.dispatch(Action::ChangeGroup {
            owner: owner.clone(),
            group_id: None,
            parent_group_id: None,
        });
        store.dispatch(Action::ChangeGroup {
            owner: owner.clone(),
            group_id: Some("unknown".into()),
            parent_group_id: None,
        });

        assert!(!rx.has_changed().unwrap());
        assert!(store.snapshot(&owner).unwrap().interaction_state.current_group.is_none());
    }

    #[test]
    fn test_status_entry_created_on_first_command() {
        let configuration = make_configuration();
        let owner = configuration.owner.clone();
        let store = MemoryStore::with_configurations([configuration]);
        assert!(store.snapshot(&owner).unwrap().statuses.is_empty());

        store.dispatch(Action::SetGroupStatus {
            owner: owner.clone(),
            group_id: "a".into(),
            visited: true,
        });
        store.dispatch(Action::SetGroupComplete {
            owner: owner.clone(),
            group_id: "b".into(),
            complete: true,
        });

        let snapshot = store.snapshot(&owner).unwrap();
        assert!(snapshot.status_of("a").visited);
        assert!(!snapshot.status_of("a").complete);
        assert!(snapshot.status_of("b").complete);
        assert_eq!(snapshot.statuses.len(), 2);
    }

    #[test]
    fn test_remove_discards_statuses() {
        let configuration = make_configuration();
        let owner = configuration.owner.clone();
        let store = MemoryStore::with_configurations([configuration.clone()]);
        store.dispatch(Action::SetGroupStatus {
            owner: owner.clone(),
            group_id: "a".into(),
            visited: true,
        });

        store.dispatch(Action::RemoveConfiguration { owner: owner.clone() });
        assert!(store.snapshot(&owner).is_none());

        store.dispatch(Action::LoadConfiguration { configuration });
        assert!(!store.snapshot(&owner).unwrap().status_of("a").visited);
    }

    #[test]
    fn test_remove_drops_unwatched_channel() {
        let configuration = make_configuration();
        let owner = configuration.owner.clone();
        let store = MemoryStore::with_configurations([configuration]);
        assert_eq!(store.channels.read().len(), 1);

        store.dispatch(Action::RemoveConfiguration { owner: owner.clone() });

        assert!(store.channels.read().is_empty());
        assert!(store.configurations().is_empty());
    }

    #[test]
    fn test_remove_keeps_watched_channel() {
        let configuration = make_configuration();
        let owner = configuration.owner.clone();
        let store = MemoryStore::with_configurations([configuration.clone()]);
        let rx = store.select(&owner);

        store.dispatch(Action::RemoveConfiguration { owner: owner.clone() });

        assert_eq!(store.channels.read().len(), 1);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow().is_none());

        store.dispatch(Action::LoadConfiguration { configuration });
        assert!(rx.borrow().is_some());
    }

    #[test]
    fn test_commands_for_unloaded_owner_are_ignored() {
        let store = MemoryStore::new();
        let owner = Owner::product("nothing");
        store.dispatch(Action::SetMenuParentGroup {
            entity_key: owner.key(),
            menu_parent_group: Some("x".into()),
        });
        assert!(store.snapshot(&owner).is_none());
        assert!(store.channels.read().is_empty());
    }

    #[tokio::test]
    async fn test_select_before_load_sees_load() {
        let store = MemoryStore::new();
        let configuration = make_configuration();
        let mut rx = store.select(&configuration.owner);
        assert!(rx.borrow().is_none());

        store.dispatch(Action::LoadConfiguration { configuration });
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_some());
    }
}
