//! Links between elements.
//!
//! A link is a cell without geometry of its own: it references an element
//! (and optionally one of its ports) at each end, and its endpoints are
//! resolved on demand through `Element::point_from_connected_link`.
//! Routing and vertices are outside the transformation core.

use crate::diagram::CellId;

/// Selects one end of a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEnd {
    Source,
    Target,
}

/// One end of a link: the connected element and, optionally, the port it
/// attaches to.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    cell: CellId,
    port: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint attached to an element's body.
    pub fn cell(cell: CellId) -> Self {
        Self { cell, port: None }
    }

    /// Creates an endpoint attached to a named port of an element.
    pub fn port(cell: CellId, port: impl Into<String>) -> Self {
        Self {
            cell,
            port: Some(port.into()),
        }
    }

    /// Returns the connected element.
    pub fn cell_id(&self) -> CellId {
        self.cell
    }

    /// Returns the connected port id, if the endpoint names one.
    pub fn port_id(&self) -> Option<&str> {
        self.port.as_deref()
    }
}

/// A connection between two elements. Either end may be unset while the
/// link is being constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    source: Option<Endpoint>,
    target: Option<Endpoint>,
}

impl Link {
    /// Creates a link connecting two endpoints.
    pub fn new(source: Endpoint, target: Endpoint) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
        }
    }

    /// Sets the source endpoint (builder style).
    pub fn with_source(mut self, source: Endpoint) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the target endpoint (builder style).
    pub fn with_target(mut self, target: Endpoint) -> Self {
        self.target = Some(target);
        self
    }

    /// Returns the endpoint definition for the given end.
    pub fn endpoint(&self, end: LinkEnd) -> Option<&Endpoint> {
        match end {
            LinkEnd::Source => self.source.as_ref(),
            LinkEnd::Target => self.target.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_selection() {
        let a = CellId::from_index(0);
        let b = CellId::from_index(1);
        let link = Link::new(Endpoint::cell(a), Endpoint::port(b, "in"));

        let source = link.endpoint(LinkEnd::Source).unwrap();
        assert_eq!(source.cell_id(), a);
        assert_eq!(source.port_id(), None);

        let target = link.endpoint(LinkEnd::Target).unwrap();
        assert_eq!(target.cell_id(), b);
        assert_eq!(target.port_id(), Some("in"));
    }

    #[test]
    fn test_partial_link() {
        let link = Link::default().with_source(Endpoint::cell(CellId::from_index(2)));
        assert!(link.endpoint(LinkEnd::Source).is_some());
        assert!(link.endpoint(LinkEnd::Target).is_none());
    }
}
