//! Cell storage and the embedding relation.
//!
//! The diagram owns every cell in a stable directed graph whose edges point
//! from a parent to its embedded children. Cells hold no pointers to each
//! other; all parent/child resolution goes through indexed lookups on the
//! diagram, so the embedding relation cannot form ownership cycles.

use std::collections::VecDeque;
use std::fmt;

use log::trace;
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;

use armature_core::geometry::Rect;

use crate::change::{Change, ChangeLog};
use crate::element::Element;
use crate::error::ArmatureError;
use crate::link::Link;
use crate::transition::TransitionRequest;

mod transform;

pub use transform::{
    FitEmbedsOptions, PositionOptions, ResizeDirection, ResizeOptions, TranslateOptions,
};

/// Stable identity of a cell within a diagram.
///
/// Identifiers survive removals of other cells; a removed cell's identifier
/// becomes dangling and any operation handed it fails with
/// [`ArmatureError::Unattached`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(NodeIndex);

impl CellId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(NodeIndex::new(index))
    }

    fn node(self) -> NodeIndex {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

/// A member of a diagram: an element with geometry, or a link without.
#[derive(Debug, Clone)]
pub enum Cell {
    Element(Element),
    Link(Link),
}

impl Cell {
    /// Checks whether this cell is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, Cell::Element(_))
    }

    /// Returns the contained element, if this cell is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Cell::Element(element) => Some(element),
            Cell::Link(_) => None,
        }
    }

    /// Returns the contained link, if this cell is one.
    pub fn as_link(&self) -> Option<&Link> {
        match self {
            Cell::Element(_) => None,
            Cell::Link(link) => Some(link),
        }
    }

    fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Cell::Element(element) => Some(element),
            Cell::Link(_) => None,
        }
    }
}

/// A collection of cells with an embedding hierarchy, change notifications
/// and a transition queue.
///
/// All transform operations live on the diagram and are keyed by
/// [`CellId`]; see the `transform` operations for the mutation surface.
#[derive(Debug, Default)]
pub struct Diagram {
    cells: StableDiGraph<Cell, ()>,
    changes: ChangeLog,
    transitions: Vec<TransitionRequest>,
}

impl Diagram {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element and returns its identity.
    pub fn add_element(&mut self, element: Element) -> CellId {
        let id = CellId(self.cells.add_node(Cell::Element(element)));
        trace!(id:% = id; "Added element");
        id
    }

    /// Adds a link and returns its identity.
    pub fn add_link(&mut self, link: Link) -> CellId {
        let id = CellId(self.cells.add_node(Cell::Link(link)));
        trace!(id:% = id; "Added link");
        id
    }

    /// Checks whether a cell is attached to the diagram.
    pub fn contains(&self, id: CellId) -> bool {
        self.cells.contains_node(id.node())
    }

    /// Returns the cell with the given identity.
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.node_weight(id.node())
    }

    /// Resolves an element, failing if the identity is dangling or names a
    /// link.
    pub fn element(&self, id: CellId) -> Result<&Element, ArmatureError> {
        self.cell(id)
            .ok_or(ArmatureError::Unattached(id))?
            .as_element()
            .ok_or(ArmatureError::NotAnElement(id))
    }

    pub(crate) fn element_mut(&mut self, id: CellId) -> Result<&mut Element, ArmatureError> {
        self.cells
            .node_weight_mut(id.node())
            .ok_or(ArmatureError::Unattached(id))?
            .as_element_mut()
            .ok_or(ArmatureError::NotAnElement(id))
    }

    /// Embeds `child` under `parent`, re-parenting the child if it was
    /// embedded elsewhere. Fails if either cell is dangling or if the
    /// embedding would create a containment cycle.
    pub fn embed(&mut self, parent: CellId, child: CellId) -> Result<(), ArmatureError> {
        if !self.contains(parent) {
            return Err(ArmatureError::Unattached(parent));
        }
        if !self.contains(child) {
            return Err(ArmatureError::Unattached(child));
        }

        // Walk the ancestor chain of the prospective parent; finding the
        // child there (or the parent being the child) means a cycle.
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(ArmatureError::EmbeddingCycle { parent, child });
            }
            ancestor = self.parent(current);
        }

        self.detach_from_parent(child);
        self.cells.add_edge(parent.node(), child.node(), ());
        trace!(parent:% = parent, child:% = child; "Embedded cell");
        Ok(())
    }

    /// Removes `child` from its parent, making it a root cell again.
    pub fn unembed(&mut self, child: CellId) -> Result<(), ArmatureError> {
        if !self.contains(child) {
            return Err(ArmatureError::Unattached(child));
        }
        self.detach_from_parent(child);
        Ok(())
    }

    /// Removes a cell from the diagram. Its embedded children stay
    /// attached to the diagram but become root cells.
    pub fn remove(&mut self, id: CellId) -> Result<(), ArmatureError> {
        self.cells
            .remove_node(id.node())
            .ok_or(ArmatureError::Unattached(id))?;
        trace!(id:% = id; "Removed cell");
        Ok(())
    }

    fn detach_from_parent(&mut self, child: CellId) {
        let incoming: Vec<_> = self
            .cells
            .edges_directed(child.node(), Direction::Incoming)
            .map(|edge| edge.id())
            .collect();
        for edge in incoming {
            self.cells.remove_edge(edge);
        }
    }

    /// Returns the parent a cell is embedded under, if any.
    pub fn parent(&self, id: CellId) -> Option<CellId> {
        self.cells
            .neighbors_directed(id.node(), Direction::Incoming)
            .next()
            .map(CellId)
    }

    /// Returns the directly embedded children in embed order.
    pub fn embedded_cells(&self, id: CellId) -> Vec<CellId> {
        // Neighbor iteration yields the most recently added edge first.
        let mut children: Vec<CellId> = self
            .cells
            .neighbors_directed(id.node(), Direction::Outgoing)
            .map(CellId)
            .collect();
        children.reverse();
        children
    }

    /// Returns every embedded descendant, breadth first.
    ///
    /// The traversal uses an explicit queue rather than recursion, so deep
    /// hierarchies cannot grow the stack.
    pub fn embedded_cells_deep(&self, id: CellId) -> Vec<CellId> {
        let mut descendants = Vec::new();
        let mut queue: VecDeque<CellId> = self.embedded_cells(id).into();
        while let Some(current) = queue.pop_front() {
            descendants.push(current);
            queue.extend(self.embedded_cells(current));
        }
        descendants
    }

    /// Computes the union bounding box of the elements among the given
    /// cells. Links and dangling identifiers contribute nothing; the
    /// result is `None` when no element contributes.
    pub fn cells_bbox(&self, ids: &[CellId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|&id| self.cell(id)?.as_element())
            .map(Element::bbox)
            .reduce(|acc, bbox| acc.union(&bbox))
    }

    /// Returns the recorded change notifications.
    pub fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    /// Removes and returns all recorded change notifications.
    pub fn drain_changes(&mut self) -> Vec<Change> {
        self.changes.drain()
    }

    pub(crate) fn changes_mut(&mut self) -> &mut ChangeLog {
        &mut self.changes
    }

    /// Returns the queued transition requests without consuming them.
    pub fn transitions(&self) -> &[TransitionRequest] {
        &self.transitions
    }

    /// Removes and returns all queued transition requests, for the
    /// animation driver to apply.
    pub fn take_transitions(&mut self) -> Vec<TransitionRequest> {
        std::mem::take(&mut self.transitions)
    }

    pub(crate) fn push_transition(&mut self, request: TransitionRequest) {
        self.transitions.push(request);
    }
}
