//! Error types for diagram operations.

use thiserror::Error;

use crate::diagram::CellId;

/// The main error type for diagram operations.
///
/// Cell resolution is the only fallible step in the transformation core:
/// every operation takes a [`CellId`] and fails when the identifier no
/// longer names a live cell, or names a cell of the wrong kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArmatureError {
    /// The cell is not attached to the diagram (never added, or removed).
    #[error("cell {0} is not attached to the diagram")]
    Unattached(CellId),

    /// The cell exists but is a link where an element was required.
    #[error("cell {0} is not an element")]
    NotAnElement(CellId),

    /// Embedding the child under the parent would create a containment
    /// cycle.
    #[error("embedding cell {child} under {parent} would create a cycle")]
    EmbeddingCycle { parent: CellId, child: CellId },
}
