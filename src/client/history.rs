/**
 * Bounded Undo/Redo History
 *
 * Snapshot-based history over the canvas model. Each committed edit
 * pushes the previous snapshot onto the undo stack; the stack is capped
 * so memory stays bounded for long editing sessions, evicting the
 * oldest entry first. Any new edit clears the redo stack.
 *
 * # Drag Coalescing
 *
 * A pointer drag emits a continuous stream of positions. Recording each
 * one would flood the undo stack with micro-moves, so the drag is
 * bracketed: `begin_drag` captures the pre-drag snapshot once,
 * `drag_to` mutates the present state freely, and `end_drag` commits
 * the captured snapshot as a single undo entry.
 */

use std::collections::VecDeque;

use crate::client::model::{self, Mutation};
use crate::shared::NodeData;

/// Maximum retained undo steps
pub const UNDO_CAP: usize = 40;

/// Canvas snapshot history with bounded undo
#[derive(Debug, Default)]
pub struct History {
    present: Vec<NodeData>,
    undo: VecDeque<Vec<NodeData>>,
    redo: Vec<Vec<NodeData>>,
    drag_origin: Option<Vec<NodeData>>,
}

impl History {
    /// Start a history from a loaded snapshot
    pub fn new(snapshot: Vec<NodeData>) -> Self {
        History {
            present: snapshot,
            ..Default::default()
        }
    }

    /// The current snapshot
    pub fn present(&self) -> &[NodeData] {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    fn push_undo(&mut self, snapshot: Vec<NodeData>) {
        if self.undo.len() == UNDO_CAP {
            self.undo.pop_front();
        }
        self.undo.push_back(snapshot);
        self.redo.clear();
    }

    /// Apply a mutation as one undoable step
    pub fn commit(&mut self, mutation: &Mutation) {
        let before = self.present.clone();
        model::apply(&mut self.present, mutation);
        self.push_undo(before);
    }

    /// Replace the whole snapshot as one undoable step
    ///
    /// Used when fresh server state should overwrite local state but
    /// remain reversible.
    pub fn replace(&mut self, snapshot: Vec<NodeData>) {
        let before = std::mem::replace(&mut self.present, snapshot);
        self.push_undo(before);
    }

    /// Step back one edit; returns whether anything changed
    pub fn undo(&mut self) -> bool {
        match self.undo.pop_back() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.present, previous);
                self.redo.push(current);
                true
            }
            None => false,
        }
    }

    /// Step forward one undone edit; returns whether anything changed
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                if self.undo.len() == UNDO_CAP {
                    self.undo.pop_front();
                }
                self.undo.push_back(current);
                true
            }
            None => false,
        }
    }

    /// Capture the pre-drag snapshot; later moves coalesce into it
    ///
    /// A second call while a drag is open keeps the original capture.
    pub fn begin_drag(&mut self) {
        if self.drag_origin.is_none() {
            self.drag_origin = Some(self.present.clone());
        }
    }

    /// Move a node during an open drag without recording history
    pub fn drag_to(&mut self, id: &str, x: f64, y: f64) {
        model::apply(
            &mut self.present,
            &Mutation::MoveTo {
                id: id.to_string(),
                x,
                y,
            },
        );
    }

    /// Close the drag, committing it as a single undo entry
    ///
    /// A drag that never moved anything records nothing.
    pub fn end_drag(&mut self) {
        if let Some(origin) = self.drag_origin.take() {
            if origin != self.present {
                self.push_undo(origin);
            }
        }
    }
}
