// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Plain-text view of a configuration's groups

use crate::lookup::depth_of;
use crate::navigator::{current_group_id, is_conflict_group_type};
use crate::types::{Configuration, Group};

/// Render all groups in sequential order, one per line.
///
/// The current group is marked with `>`, nesting is shown by indentation and
/// flags follow in parentheses.
#[must_use]
pub fn tree(configuration: &Configuration) -> String {
    let mut lines = vec![format!(
        "{} - {} groups",
        configuration.owner,
        configuration.flat_groups.len()
    )];
    lines.extend(
        configuration
            .flat_groups
            .iter()
            .map(|group| line(configuration, group)),
    );
    lines.join("\n")
}

/// Render a single group as `name [id] (flags)`
#[must_use]
pub fn group_label(configuration: &Configuration, group: &Group) -> String {
    let flags = flags(configuration, group);
    if flags.is_empty() {
        format!("{} [{}]", group.name, group.id)
    } else {
        format!("{} [{}] ({})", group.name, group.id, flags.join(", "))
    }
}

fn line(configuration: &Configuration, group: &Group) -> String {
    let marker = if current_group_id(configuration) == Some(group.id.as_str()) {
        '>'
    } else {
        '-'
    };
    let depth = depth_of(&configuration.groups, &group.id).unwrap_or(0);
    format!(
        "{marker} {}{}",
        "  ".repeat(depth),
        group_label(configuration, group)
    )
}

fn flags(configuration: &Configuration, group: &Group) -> Vec<&'static str> {
    let status = configuration.status_of(&group.id);
    let mut flags = Vec::new();
    if is_conflict_group_type(group.group_type) {
        flags.push("conflict");
    }
    if status.visited {
        flags.push("visited");
    }
    if status.complete {
        flags.push("complete");
    }
    if configuration.interaction_state.menu_parent_group.as_deref() == Some(group.id.as_str()) {
        flags.push("menu parent");
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GroupStatus, GroupType, Owner};

    #[test]
    fn test_tree_snapshot() {
        let mut configuration = Configuration::new(
            Owner::product("CONF_CAMERA"),
            vec![
                Group::new("basics", "Basics"),
                Group::new("optics", "Optics").with_sub_groups(vec![
                    Group::new("lens", "Lens"),
                    Group::new("filter", "Filter"),
                ]),
                Group::new("conflicts", "Conflicts")
                    .with_type(GroupType::ConflictHeaderGroup)
                    .with_sub_groups(vec![
                        Group::new("conflict-1", "Lens vs filter").with_type(GroupType::ConflictGroup)
                    ]),
            ],
        );
        configuration.interaction_state.current_group = Some("lens".into());
        configuration.interaction_state.menu_parent_group = Some("optics".into());
        configuration.statuses.insert(
            "basics".into(),
            GroupStatus {
                visited: true,
                complete: true,
            },
        );

        insta::assert_snapshot!(tree(&configuration), @r"
        product/CONF_CAMERA - 6 groups
        - Basics [basics] (visited, complete)
        - Optics [optics] (menu parent)
        >   Lens [lens]
        -   Filter [filter]
        - Conflicts [conflicts] (conflict)
        -   Lens vs filter [conflict-1] (conflict)
        ");
    }

    #[test]
    fn test_unset_current_marks_first_group() {
        let configuration =
            Configuration::new(Owner::product("P"), vec![Group::new("a", "A"), Group::new("b", "B")]);
        let rendered = tree(&configuration);
        assert!(rendered.contains("> A [a]"));
        assert!(rendered.contains("- B [b]"));
    }
}
