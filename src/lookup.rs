// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Pure lookups over a group tree
//!
//! The `groups` argument is authoritative on every call; nothing is cached.

use crate::types::Group;

/// Find a group anywhere in the tree.
///
/// Each level is scanned before descending into sub groups. A `None` id
/// finds nothing.
#[must_use]
pub fn find_group_by_id<'a>(groups: &'a [Group], group_id: Option<&str>) -> Option<&'a Group> {
    let group_id = group_id?;
    if let Some(found) = groups.iter().find(|g| g.id == group_id) {
        return Some(found);
    }
    groups
        .iter()
        .find_map(|g| find_group_by_id(&g.sub_groups, Some(group_id)))
}

/// Find the group that has `group_id` among its direct children.
///
/// Top-level groups have no parent. Callers must already know the target
/// exists, since a missing target also yields `None`.
#[must_use]
pub fn find_parent_group<'a>(groups: &'a [Group], group_id: &str) -> Option<&'a Group> {
    groups.iter().find_map(|candidate| {
        if candidate.sub_groups.iter().any(|child| child.id == group_id) {
            Some(candidate)
        } else {
            find_parent_group(&candidate.sub_groups, group_id)
        }
    })
}

/// Whether the group has children
#[must_use]
pub fn has_sub_groups(group: &Group) -> bool {
    !group.sub_groups.is_empty()
}

/// Linearize the tree in depth-first pre-order
#[must_use]
pub fn flatten_groups(groups: &[Group]) -> Vec<Group> {
    let mut flat = Vec::new();
    push_pre_order(groups, &mut flat);
    flat
}

fn push_pre_order(groups: &[Group], flat: &mut Vec<Group>) {
    for group in groups {
        flat.push(group.clone());
        push_pre_order(&group.sub_groups, flat);
    }
}

/// Nesting level of a group (0 for top-level)
#[must_use]
pub fn depth_of(groups: &[Group], group_id: &str) -> Option<usize> {
    if groups.iter().any(|g| g.id == group_id) {
        return Some(0);
    }
    groups
        .iter()
        .find_map(|g| depth_of(&g.sub_groups, group_id))
        .map(|d| d + 1)
}
