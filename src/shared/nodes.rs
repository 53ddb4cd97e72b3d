/**
 * Node Wire Shape
 *
 * This module defines the node representation exchanged between client
 * and server. The server persists exactly this shape (plus timestamps);
 * the client mutates lists of it in memory.
 *
 * # Wire Format
 *
 * Nodes are serialized as camelCase JSON:
 *
 * ```json
 * {
 *   "id": "k3j9x2a",
 *   "title": "Buy milk",
 *   "x": 120.5,
 *   "y": 340.0,
 *   "priority": "low",
 *   "completed": false,
 *   "parentId": null,
 *   "dueDate": "2026-09-01"
 * }
 * ```
 *
 * Every field except `id` is optional on input; omitted fields take
 * their defaults. Unknown extra fields are ignored.
 */

use serde::{Deserialize, Serialize};

/// Task priority level.
///
/// Cycling order is none → low → medium → high → none, matching the
/// priority button on a task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// The next priority in the cycle.
    pub fn cycled(self) -> Self {
        match self {
            Priority::None => Priority::Low,
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::None,
        }
    }

    /// Stable string form, as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse the database string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Priority::None),
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Sort rank for organizing, highest urgency first.
    pub fn urgency_rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
            Priority::None => 3,
        }
    }
}

/// A single task node as it travels over the wire.
///
/// `id` is client-generated and required; everything else defaults.
/// `parent_id`, when set, should name another node in the same canvas.
/// `due_date` is an ISO calendar date string or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl NodeData {
    /// A fresh node at the given position with all defaults.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            x,
            y,
            priority: Priority::None,
            completed: false,
            parent_id: None,
            due_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_cycle() {
        assert_eq!(Priority::None.cycled(), Priority::Low);
        assert_eq!(Priority::Low.cycled(), Priority::Medium);
        assert_eq!(Priority::Medium.cycled(), Priority::High);
        assert_eq!(Priority::High.cycled(), Priority::None);
    }

    #[test]
    fn test_priority_round_trip() {
        for p in [Priority::None, Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::parse(p.as_str()), Some(p));
        }
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_node_defaults_on_deserialize() {
        let node: NodeData = serde_json::from_str(r#"{"id":"a1"}"#).unwrap();
        assert_eq!(node.title, "");
        assert_eq!(node.x, 0.0);
        assert_eq!(node.y, 0.0);
        assert_eq!(node.priority, Priority::None);
        assert!(!node.completed);
        assert_eq!(node.parent_id, None);
        assert_eq!(node.due_date, None);
    }

    #[test]
    fn test_node_ignores_unknown_fields() {
        let node: NodeData =
            serde_json::from_str(r#"{"id":"a1","color":"green","weight":3}"#).unwrap();
        assert_eq!(node.id, "a1");
    }

    #[test]
    fn test_node_camel_case_wire_names() {
        let node = NodeData {
            parent_id: Some("root".into()),
            due_date: Some("2026-09-01".into()),
            ..NodeData::new("a1", 1.0, 2.0)
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["parentId"], "root");
        assert_eq!(json["dueDate"], "2026-09-01");
        assert_eq!(json["priority"], "none");
    }
}
