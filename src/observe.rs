// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Projections of an owner's configuration snapshots

use crate::error::{NavError, Result};
use crate::store::Snapshot;
use crate::types::Configuration;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;

type Projection<T> = Arc<dyn Fn(&Arc<Configuration>) -> T + Send + Sync>;

/// A value derived from the latest configuration of one owner
///
/// Reads come in three flavours:
/// - [`Selection::latest`] pulls the value for the current snapshot, if any
/// - [`Selection::first`] waits for a snapshot, yields exactly one value and
///   drops the subscription
/// - [`Selection::changed`] waits for the next published snapshot
pub struct Selection<T> {
    owner_key: String,
    rx: watch::Receiver<Snapshot>,
    project: Projection<T>,
}

impl<T> fmt::Debug for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("owner", &self.owner_key)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Selection<T> {
    /// Project a snapshot channel
    pub fn new(
        owner_key: impl Into<String>,
        rx: watch::Receiver<Snapshot>,
        project: impl Fn(&Arc<Configuration>) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            owner_key: owner_key.into(),
            rx,
            project: Arc::new(project),
        }
    }

    /// Chain another projection on top of this one
    #[must_use]
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Selection<U> {
        let inner = self.project;
        Selection {
            owner_key: self.owner_key,
            rx: self.rx,
            project: Arc::new(move |configuration: &Arc<Configuration>| f(inner(configuration))),
        }
    }

    /// Value for the current snapshot, `None` if nothing is loaded yet
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        let snapshot = self.rx.borrow().clone();
        snapshot.map(|configuration| (self.project)(&configuration))
    }

    /// Wait for a snapshot and resolve exactly once
    ///
    /// # Errors
    /// [`NavError::StoreClosed`] if the store goes away before any snapshot
    /// is published.
    pub async fn first(mut self) -> Result<T> {
        let snapshot = self.wait_for_snapshot().await?;
        Ok((self.project)(&snapshot))
    }

    /// Wait for the next published snapshot and project it
    ///
    /// # Errors
    /// [`NavError::StoreClosed`] once the store has been dropped.
    pub async fn changed(&mut self) -> Result<T> {
        loop {
            self.rx.changed().await.map_err(|_| self.closed())?;
            let snapshot = self.rx.borrow_and_update().clone();
            if let Some(configuration) = snapshot {
                return Ok((self.project)(&configuration));
            }
        }
    }

    async fn wait_for_snapshot(&mut self) -> Result<Arc<Configuration>> {
        let owner = self.owner_key.clone();
        let closed = || NavError::StoreClosed {
            owner: owner.clone(),
        };
        let snapshot = match self.rx.wait_for(Option::is_some).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => return Err(closed()),
        };
        snapshot.ok_or_else(closed)
    }

    fn closed(&self) -> NavError {
        NavError::StoreClosed {
            owner: self.owner_key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Group, Owner};

    fn make_configuration(groups: &[&str]) -> Arc<Configuration> {
        Arc::new(Configuration::new(
            Owner::product("P"),
            groups.iter().map(|id| Group::new(*id, *id)).collect(),
        ))
    }

    #[tokio::test]
    async fn test_first_waits_for_snapshot() {
        let (tx, rx) = watch::channel(None);
        let selection = Selection::new("product/P", rx, |c| c.flat_groups.len());
        assert_eq!(selection.latest(), None);

        let pending = tokio::spawn(selection.first());
        tx.send_replace(Some(make_configuration(&["a", "b"])));

        assert_eq!(pending.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_first_fails_when_store_closes() {
        let (tx, rx) = watch::channel::<Snapshot>(None);
        let selection = Selection::new("product/P", rx, |c| c.flat_groups.len());
        drop(tx);

        let err = selection.first().await.unwrap_err();
        assert!(matches!(err, NavError::StoreClosed { owner } if owner == "product/P"));
    }

    #[tokio::test]
    async fn test_changed_and_map() {
        let (tx, rx) = watch::channel(Some(make_configuration(&["a"])));
        let mut selection =
            Selection::new("product/P", rx, |c| c.flat_groups.len()).map(|n| n * 10);
        assert_eq!(selection.latest(), Some(10));

        tx.send_replace(Some(make_configuration(&["a", "b", "c"])));
        assert_eq!(selection.changed().await.unwrap(), 30);
    }
}
