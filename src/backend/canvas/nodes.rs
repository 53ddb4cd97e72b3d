/**
 * Node Tree Store: Snapshot Replace
 *
 * This module owns the node rows belonging to a canvas. Nodes are never
 * created, updated, or deleted individually on the server; they exist
 * only as the result of a full-snapshot replace scoped to one canvas.
 *
 * # Replace Contract
 *
 * `replace_all` deletes every existing node row for the canvas and
 * inserts the supplied list, as a single transaction. A concurrent
 * reader observes either the fully-old or fully-new set, never a
 * partial one. Two concurrent replaces for the same canvas are
 * last-writer-wins: whichever commits second fully overwrites the
 * other, with no merge and no conflict detection.
 *
 * # Snapshot Hygiene
 *
 * Before a snapshot is accepted:
 * - every node must carry a non-empty string id;
 * - parent chains must be acyclic;
 * - a parent reference to an id outside the submitted set (including a
 *   node in some other canvas) is stored as NULL rather than trusted.
 *
 * Positions are client-owned and stored as-is; the server performs no
 * geometric validation.
 */

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::shared::{NodeData, Priority};

/// Snapshot validation failures
#[derive(Debug, Error, PartialEq)]
pub enum SnapshotError {
    /// A node without a usable id cannot be addressed or re-parented
    #[error("every node needs a non-empty string id")]
    EmptyId,

    /// Two nodes in one snapshot share an id
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    /// The parent chain starting at this node never terminates
    #[error("cyclic parent chain at node {0}")]
    CyclicParents(String),
}

/// Snapshot replace failures
#[derive(Debug, Error)]
pub enum ReplaceError {
    /// A submitted id already names a node in some other canvas
    ///
    /// Ids are client-generated but globally unique; accepting the
    /// conflict would overwrite another user's node.
    #[error("node id {0} is already in use")]
    ForeignId(String),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl From<ReplaceError> for crate::backend::error::ApiError {
    fn from(err: ReplaceError) -> Self {
        match err {
            ReplaceError::ForeignId(_) => Self::Validation(err.to_string()),
            ReplaceError::Db(e) => Self::Database(e),
        }
    }
}

/// Validate a snapshot before it may replace a canvas's node set
///
/// Checks ids and rejects cyclic parent chains. Parent references that
/// point outside the snapshot are not an error here; they are nulled
/// at insert time.
pub fn validate_snapshot(nodes: &[NodeData]) -> Result<(), SnapshotError> {
    let mut ids = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if node.id.is_empty() {
            return Err(SnapshotError::EmptyId);
        }
        if !ids.insert(node.id.as_str()) {
            return Err(SnapshotError::DuplicateId(node.id.clone()));
        }
    }

    // Walk each parent chain with a visited set so a cycle cannot loop
    // forever. Only edges that stay inside the snapshot count.
    let parents: HashMap<&str, &str> = nodes
        .iter()
        .filter_map(|n| {
            n.parent_id
                .as_deref()
                .filter(|p| ids.contains(p))
                .map(|p| (n.id.as_str(), p))
        })
        .collect();

    let mut acyclic: HashSet<&str> = HashSet::new();
    for node in nodes {
        let mut chain: Vec<&str> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = node.id.as_str();

        while !acyclic.contains(current) {
            if !seen.insert(current) {
                return Err(SnapshotError::CyclicParents(node.id.clone()));
            }
            chain.push(current);
            match parents.get(current) {
                Some(next) => current = next,
                None => break,
            }
        }
        acyclic.extend(chain);
    }

    Ok(())
}

/// Atomically replace every node of a canvas with the supplied set
///
/// Missing optional fields have already been defaulted by
/// deserialization. Returns the number of nodes stored.
///
/// Every row of the canvas is deleted inside the transaction before
/// the inserts, so a primary-key conflict can only mean the id belongs
/// to a node in a different canvas. That is refused rather than
/// upserted; the write must never touch rows outside the target
/// canvas.
pub async fn replace_all(
    pool: &SqlitePool,
    canvas_id: &str,
    nodes: &[NodeData],
) -> Result<usize, ReplaceError> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let now = Utc::now();

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM nodes WHERE canvas_id = $1")
        .bind(canvas_id)
        .execute(&mut *tx)
        .await?;

    for node in nodes {
        // Dangling parents (deleted nodes, other canvases) become roots.
        let parent_id = node
            .parent_id
            .as_deref()
            .filter(|p| *p != node.id && ids.contains(p));

        let inserted = sqlx::query(
            r#"
            INSERT INTO nodes (id, canvas_id, title, x, y, priority, completed, parent_id, due_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&node.id)
        .bind(canvas_id)
        .bind(&node.title)
        .bind(node.x)
        .bind(node.y)
        .bind(node.priority.as_str())
        .bind(node.completed)
        .bind(parent_id)
        .bind(&node.due_date)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(ReplaceError::ForeignId(node.id.clone()));
            }
            Err(e) => return Err(e.into()),
        }
    }

    tx.commit().await?;

    Ok(nodes.len())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

/// Node row as stored
#[derive(Debug, sqlx::FromRow)]
struct NodeRow {
    id: String,
    title: String,
    x: f64,
    y: f64,
    priority: String,
    completed: bool,
    parent_id: Option<String>,
    due_date: Option<String>,
}

impl From<NodeRow> for NodeData {
    fn from(row: NodeRow) -> Self {
        NodeData {
            id: row.id,
            title: row.title,
            x: row.x,
            y: row.y,
            priority: Priority::parse(&row.priority).unwrap_or_default(),
            completed: row.completed,
            parent_id: row.parent_id,
            due_date: row.due_date,
        }
    }
}

/// Read all nodes of a canvas in creation order
///
/// The ordering is stable insertion order; the client consumes it as
/// the default paint order.
pub async fn find_by_canvas(
    pool: &SqlitePool,
    canvas_id: &str,
) -> Result<Vec<NodeData>, sqlx::Error> {
    let rows = sqlx::query_as::<_, NodeRow>(
        r#"
        SELECT id, title, x, y, priority, completed, parent_id, due_date
        FROM nodes
        WHERE canvas_id = $1
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(canvas_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(NodeData::from).collect())
}
