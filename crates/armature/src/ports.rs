//! Named attachment points on an element.
//!
//! Ports belong to named groups and a group's layout decides where its
//! ports sit on the element box. Positions are element-local: the element's
//! unrotated box origin is at `(0, 0)` and rotation is applied by the
//! caller (see `Element::point_from_connected_link`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use armature_core::geometry::{Point, Size};

/// How a group lays its ports out on the element box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortLayout {
    /// Each port sits at its own stored offset.
    #[default]
    Absolute,

    /// Ports are evenly spaced along the left edge, top to bottom.
    Left,

    /// Ports are evenly spaced along the right edge, top to bottom.
    Right,

    /// Ports are evenly spaced along the top edge, left to right.
    Top,

    /// Ports are evenly spaced along the bottom edge, left to right.
    Bottom,
}

impl PortLayout {
    /// Computes the local position of the port at `index` out of `count`
    /// ports in the group, for an element box of the given size.
    ///
    /// Side layouts place the i-th of n ports at fraction `(i + 0.5) / n`
    /// along the side. The absolute layout ignores the index and uses the
    /// port's own offset.
    fn position(self, index: usize, count: usize, offset: Point, size: Size) -> Point {
        let fraction = (index as f32 + 0.5) / count as f32;
        match self {
            PortLayout::Absolute => offset,
            PortLayout::Left => Point::new(0.0, size.height() * fraction),
            PortLayout::Right => Point::new(size.width(), size.height() * fraction),
            PortLayout::Top => Point::new(size.width() * fraction, 0.0),
            PortLayout::Bottom => Point::new(size.width() * fraction, size.height()),
        }
    }
}

/// A single named attachment point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// The group this port belongs to. Ports without a group use the
    /// absolute layout.
    #[serde(default)]
    group: Option<String>,

    /// Element-local offset, used by the absolute layout.
    #[serde(default)]
    offset: Point,
}

impl Port {
    /// Creates a port in the given group.
    pub fn in_group(group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            offset: Point::default(),
        }
    }

    /// Creates an ungrouped port at a fixed element-local offset.
    pub fn at_offset(offset: Point) -> Self {
        Self {
            group: None,
            offset,
        }
    }

    /// Returns the group this port belongs to, if any.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Returns the port's element-local offset.
    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// The port table of an element: groups with layouts, and named ports in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ports {
    #[serde(default)]
    groups: IndexMap<String, PortLayout>,

    #[serde(default)]
    ports: IndexMap<String, Port>,
}

impl Ports {
    /// Defines a group and its layout. Redefining a group replaces its
    /// layout but keeps its ports.
    pub fn add_group(&mut self, name: impl Into<String>, layout: PortLayout) {
        self.groups.insert(name.into(), layout);
    }

    /// Adds a port. Re-adding a port with the same id replaces it in place.
    pub fn add_port(&mut self, id: impl Into<String>, port: Port) {
        self.ports.insert(id.into(), port);
    }

    /// Checks whether a port with the given id exists.
    pub fn has_port(&self, id: &str) -> bool {
        self.ports.contains_key(id)
    }

    /// Returns the port with the given id.
    pub fn port(&self, id: &str) -> Option<&Port> {
        self.ports.get(id)
    }

    /// Returns the group a port belongs to, if the port exists and is
    /// grouped.
    pub fn port_group(&self, id: &str) -> Option<&str> {
        self.ports.get(id).and_then(Port::group)
    }

    /// Computes the element-local positions of every port in a group.
    ///
    /// Passing `None` selects the ungrouped ports, which always use the
    /// absolute layout. An unknown group name also resolves to the absolute
    /// layout, so ports referencing it still get a position.
    pub fn positions(&self, group: Option<&str>, size: Size) -> IndexMap<&str, Point> {
        let layout = group
            .and_then(|name| self.groups.get(name).copied())
            .unwrap_or_default();

        let members: Vec<(&str, &Port)> = self
            .ports
            .iter()
            .filter(|(_, port)| port.group() == group)
            .map(|(id, port)| (id.as_str(), port))
            .collect();

        let count = members.len();
        members
            .into_iter()
            .enumerate()
            .map(|(index, (id, port))| (id, layout.position(index, count, port.offset(), size)))
            .collect()
    }

    /// Resolves a single port's element-local position through its group's
    /// layout. Returns `None` if no port with the given id exists.
    pub fn position(&self, id: &str, size: Size) -> Option<Point> {
        let port = self.ports.get(id)?;
        self.positions(port.group(), size).get(id).copied()
    }
}
