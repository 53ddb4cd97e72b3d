/**
 * Canvas Model Mutations
 *
 * The client edits a canvas as a plain in-memory snapshot (a list of
 * nodes) through a small set of mutations. Every mutation is pure
 * state-in, state-out over the snapshot, which is what makes the
 * undo/redo history a matter of keeping old snapshots around.
 *
 * Deleting a node cascades to all of its descendants; children are
 * never silently re-rooted by a local delete.
 */

use std::collections::HashSet;

use crate::shared::NodeData;

/// Layout origin for organized root nodes
const ORGANIZE_ORIGIN: (f64, f64) = (40.0, 40.0);

/// Vertical spacing between organized root nodes
const ORGANIZE_ROW_HEIGHT: f64 = 120.0;

/// A single local edit to the canvas snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Insert a node
    Add(NodeData),
    /// Replace a node's title
    SetTitle { id: String, title: String },
    /// Move a node to an absolute position
    MoveTo { id: String, x: f64, y: f64 },
    /// Advance the node's priority one step in the fixed cycle
    CyclePriority { id: String },
    /// Set the completion flag
    SetCompleted { id: String, completed: bool },
    /// Set or clear the due date
    SetDueDate { id: String, due_date: Option<String> },
    /// Re-parent a node (`None` makes it a root)
    SetParent { id: String, parent_id: Option<String> },
    /// Remove a node and every descendant
    Delete { id: String },
    /// Close an inline title editor
    ///
    /// Confirming an empty title on a node created by this very edit
    /// removes the node instead of keeping a blank one.
    FinishTitle {
        id: String,
        title: String,
        created_by_edit: bool,
    },
    /// Make every node a root, keeping positions
    DetachAll,
    /// Remove every node
    Clear,
    /// Replace the whole snapshot (loading a file, pulling the server)
    Import(Vec<NodeData>),
    /// Line roots up vertically, most urgent first
    OrganizeRoots,
}

/// Collect the ids of every descendant of `id`
///
/// Walks the child relation breadth-first with a visited set, so a
/// malformed snapshot containing a parent cycle terminates instead of
/// looping. The returned set does not include `id` itself.
pub fn descendants(nodes: &[NodeData], id: &str) -> HashSet<String> {
    let mut found: HashSet<String> = HashSet::new();
    let mut frontier: Vec<&str> = vec![id];

    while let Some(current) = frontier.pop() {
        for node in nodes {
            if node.parent_id.as_deref() == Some(current) && found.insert(node.id.clone()) {
                frontier.push(&node.id);
            }
        }
    }

    found
}

/// Apply one mutation to a snapshot
///
/// Mutations addressing an unknown id are no-ops; the id may have been
/// removed by an earlier cascade in the same user gesture.
pub fn apply(nodes: &mut Vec<NodeData>, mutation: &Mutation) {
    match mutation {
        Mutation::Add(node) => {
            nodes.push(node.clone());
        }
        Mutation::SetTitle { id, title } => {
            if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                node.title = title.clone();
            }
        }
        Mutation::MoveTo { id, x, y } => {
            if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                node.x = *x;
                node.y = *y;
            }
        }
        Mutation::CyclePriority { id } => {
            if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                node.priority = node.priority.cycled();
            }
        }
        Mutation::SetCompleted { id, completed } => {
            if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                node.completed = *completed;
            }
        }
        Mutation::SetDueDate { id, due_date } => {
            if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                node.due_date = due_date.clone();
            }
        }
        Mutation::SetParent { id, parent_id } => {
            // A node cannot parent itself, and re-parenting under one of
            // its own descendants would detach the subtree into a cycle.
            if parent_id.as_deref() == Some(id.as_str()) {
                return;
            }
            if let Some(parent) = parent_id {
                if descendants(nodes, id).contains(parent) {
                    return;
                }
            }
            if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                node.parent_id = parent_id.clone();
            }
        }
        Mutation::Delete { id } => {
            let mut doomed = descendants(nodes, id);
            doomed.insert(id.clone());
            nodes.retain(|n| !doomed.contains(&n.id));
        }
        Mutation::FinishTitle {
            id,
            title,
            created_by_edit,
        } => {
            if title.is_empty() && *created_by_edit {
                nodes.retain(|n| &n.id != id);
            } else if let Some(node) = nodes.iter_mut().find(|n| &n.id == id) {
                node.title = title.clone();
            }
        }
        Mutation::DetachAll => {
            for node in nodes.iter_mut() {
                node.parent_id = None;
            }
        }
        Mutation::Clear => {
            nodes.clear();
        }
        Mutation::Import(snapshot) => {
            *nodes = snapshot.clone();
        }
        Mutation::OrganizeRoots => {
            let mut roots: Vec<usize> = nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| n.parent_id.is_none())
                .map(|(i, _)| i)
                .collect();
            roots.sort_by(|&a, &b| {
                nodes[a]
                    .priority
                    .urgency_rank()
                    .cmp(&nodes[b].priority.urgency_rank())
                    .then_with(|| nodes[a].title.cmp(&nodes[b].title))
            });
            for (row, index) in roots.into_iter().enumerate() {
                nodes[index].x = ORGANIZE_ORIGIN.0;
                nodes[index].y = ORGANIZE_ORIGIN.1 + row as f64 * ORGANIZE_ROW_HEIGHT;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Priority;

    fn node(id: &str, parent: Option<&str>) -> NodeData {
        let mut n = NodeData::new(id, 0.0, 0.0);
        n.parent_id = parent.map(String::from);
        n
    }

    fn tree() -> Vec<NodeData> {
        // root -> a -> b, root -> c
        vec![
            node("root", None),
            node("a", Some("root")),
            node("b", Some("a")),
            node("c", Some("root")),
        ]
    }

    #[test]
    fn test_descendants_transitive() {
        let nodes = tree();
        let found = descendants(&nodes, "root");
        assert_eq!(found.len(), 3);
        assert!(found.contains("b"));
        assert!(!found.contains("root"));
    }

    #[test]
    fn test_descendants_terminates_on_cycle() {
        // Corrupt snapshot: a and b parent each other.
        let nodes = vec![node("a", Some("b")), node("b", Some("a"))];
        let found = descendants(&nodes, "a");
        assert!(found.contains("b"));
    }

    #[test]
    fn test_delete_cascades() {
        let mut nodes = tree();
        apply(&mut nodes, &Mutation::Delete { id: "a".into() });

        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "c"]);
    }

    #[test]
    fn test_cycle_priority_steps_through_all_levels() {
        let mut nodes = vec![node("a", None)];
        let expected = [Priority::Low, Priority::Medium, Priority::High, Priority::None];

        for want in expected {
            apply(&mut nodes, &Mutation::CyclePriority { id: "a".into() });
            assert_eq!(nodes[0].priority, want);
        }
    }

    #[test]
    fn test_reparent_rejects_own_descendant() {
        let mut nodes = tree();
        apply(
            &mut nodes,
            &Mutation::SetParent {
                id: "root".into(),
                parent_id: Some("b".into()),
            },
        );
        assert_eq!(nodes[0].parent_id, None);
    }

    #[test]
    fn test_finish_title_removes_abandoned_new_node() {
        let mut nodes = vec![node("a", None)];
        apply(
            &mut nodes,
            &Mutation::FinishTitle {
                id: "a".into(),
                title: "".into(),
                created_by_edit: true,
            },
        );
        assert!(nodes.is_empty());

        // An existing node just keeps its old title on an empty confirm.
        let mut nodes = vec![node("a", None)];
        nodes[0].title = "keep me".into();
        apply(
            &mut nodes,
            &Mutation::FinishTitle {
                id: "a".into(),
                title: "".into(),
                created_by_edit: false,
            },
        );
        assert_eq!(nodes[0].title, "keep me");
    }

    #[test]
    fn test_detach_all_and_clear() {
        let mut nodes = tree();
        apply(&mut nodes, &Mutation::DetachAll);
        assert!(nodes.iter().all(|n| n.parent_id.is_none()));

        apply(&mut nodes, &Mutation::Clear);
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_organize_roots_orders_by_urgency() {
        let mut low = node("low", None);
        low.priority = Priority::Low;
        let mut high = node("high", None);
        high.priority = Priority::High;
        let plain = node("plain", None);
        let child = node("child", Some("high"));
        let mut nodes = vec![low, plain, high, child];

        apply(&mut nodes, &Mutation::OrganizeRoots);

        let y_of = |id: &str| nodes.iter().find(|n| n.id == id).unwrap().y;
        // Most urgent at the top of the column, unprioritized last.
        assert!(y_of("high") < y_of("low"));
        assert!(y_of("low") < y_of("plain"));
        // Children keep their positions.
        assert_eq!(y_of("child"), 0.0);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut nodes = tree();
        apply(
            &mut nodes,
            &Mutation::SetTitle {
                id: "ghost".into(),
                title: "boo".into(),
            },
        );
        assert_eq!(nodes, tree());
    }
}
