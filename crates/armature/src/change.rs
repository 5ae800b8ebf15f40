//! Change notifications emitted by diagram operations.
//!
//! Every mutation of an element's position, size or angle is recorded in
//! the diagram's [`ChangeLog`]. Compound operations bracket their records
//! between [`Change::BatchStart`] and [`Change::BatchStop`] so observers
//! can tell one logical operation with several field changes apart from
//! independent unrelated changes. Batches are purely observational; they
//! carry no locking semantics and may nest.

use armature_core::geometry::{Point, Size};

use crate::diagram::CellId;

/// The compound operations that bracket their changes in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Batch {
    Translate,
    Resize,
    Rotate,
    Scale,
    FitEmbeds,
}

/// A single recorded state change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    /// Start of a compound operation.
    BatchStart(Batch),

    /// End of a compound operation.
    BatchStop(Batch),

    /// A cell's position changed.
    ///
    /// `delta` is the effective movement that occurred, after any
    /// restricted-area clamping.
    Position {
        cell: CellId,
        position: Point,
        delta: Point,
    },

    /// A cell's size changed.
    Size { cell: CellId, size: Size },

    /// A cell's rotation angle changed. The recorded angle is normalized
    /// into `[0, 360)`.
    Angle { cell: CellId, angle: f32 },
}

/// An ordered log of [`Change`] records for observers to drain.
#[derive(Debug, Default)]
pub struct ChangeLog {
    changes: Vec<Change>,
}

impl ChangeLog {
    pub(crate) fn record(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub(crate) fn start_batch(&mut self, batch: Batch) {
        self.changes.push(Change::BatchStart(batch));
    }

    pub(crate) fn stop_batch(&mut self, batch: Batch) {
        self.changes.push(Change::BatchStop(batch));
    }

    /// Returns the recorded changes without consuming them.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Returns the number of recorded changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Checks whether no changes have been recorded.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Removes and returns all recorded changes.
    pub fn drain(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }
}
