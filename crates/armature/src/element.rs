//! Element state: position, size, rotation angle and ports.
//!
//! An element is constructed with defaults (position `(0, 0)`, size
//! `(1, 1)`, angle `0`) and mutated exclusively through the diagram's
//! transform operations, which record change notifications. The element
//! itself only exposes read access and crate-private field setters.

use serde::{Deserialize, Serialize};

use armature_core::geometry::{Point, Rect, Size, normalize_angle};

use crate::link::{Link, LinkEnd};
use crate::ports::{Port, PortLayout, Ports};

/// A positioned, sized, rotatable diagram entity.
///
/// `position` is the top-left corner of the element's unrotated bounding
/// box in world coordinates. Rotation does not nest coordinate frames: a
/// rotated element is still described by an axis-aligned origin and size,
/// with the angle applied visually on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    position: Point,
    size: Size,
    angle: f32,

    #[serde(default)]
    ports: Ports,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            position: Point::new(0.0, 0.0),
            size: Size::new(1.0, 1.0),
            angle: 0.0,
            ports: Ports::default(),
        }
    }
}

impl Element {
    /// Creates an element with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the position (builder style).
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Sets the size (builder style).
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Sets the rotation angle in degrees (builder style). The stored
    /// angle is normalized into `[0, 360)`.
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = normalize_angle(angle);
        self
    }

    /// Defines a port group and its layout (builder style).
    pub fn with_port_group(mut self, name: impl Into<String>, layout: PortLayout) -> Self {
        self.ports.add_group(name, layout);
        self
    }

    /// Adds a port (builder style).
    pub fn with_port(mut self, id: impl Into<String>, port: Port) -> Self {
        self.ports.add_port(id, port);
        self
    }

    /// Returns the current position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the current rotation angle, normalized into `[0, 360)`.
    pub fn angle(&self) -> f32 {
        normalize_angle(self.angle)
    }

    /// Returns the unrotated bounding box.
    ///
    /// Callers needing the rotated silhouette rotate the corners
    /// themselves; the box here is always axis-aligned.
    pub fn bbox(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Returns the element's port table.
    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    /// Returns mutable access to the element's port table.
    pub fn ports_mut(&mut self) -> &mut Ports {
        &mut self.ports
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub(crate) fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_angle(angle);
    }

    /// Resolves the world-space point a connected link attaches to.
    ///
    /// If the link has no endpoint definition for `end`, or the endpoint
    /// names no port (or an unknown one), the result is the box center.
    /// Otherwise the port's group layout yields its element-local position,
    /// which is offset by the box origin and, for a rotated element,
    /// rotated about the box center by the negated angle to express it in
    /// world coordinates.
    pub fn point_from_connected_link(&self, link: &Link, end: LinkEnd) -> Point {
        let bbox = self.bbox();
        let center = bbox.center();

        let Some(endpoint) = link.endpoint(end) else {
            return center;
        };
        let Some(port_id) = endpoint.port_id() else {
            return center;
        };
        let Some(local) = self.ports.position(port_id, self.size) else {
            return center;
        };

        let port_center = local.add_point(bbox.origin());
        let angle = self.angle();
        if angle == 0.0 {
            port_center
        } else {
            port_center.rotated_about(center, -angle)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::CellId;
    use crate::link::Endpoint;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_default_element() {
        let element = Element::new();
        assert_eq!(element.position(), Point::new(0.0, 0.0));
        assert_eq!(element.size(), Size::new(1.0, 1.0));
        assert_eq!(element.angle(), 0.0);
    }

    #[test]
    fn test_builder_normalizes_angle() {
        let element = Element::new().with_angle(-90.0);
        assert_eq!(element.angle(), 270.0);
    }

    #[test]
    fn test_bbox() {
        let element = Element::new().with_position(2.0, 3.0).with_size(10.0, 4.0);
        assert_eq!(element.bbox(), Rect::new(2.0, 3.0, 10.0, 4.0));
    }

    #[test]
    fn test_link_point_without_port_is_center() {
        let element = Element::new().with_position(0.0, 0.0).with_size(10.0, 10.0);
        let link = Link::default().with_source(Endpoint::cell(CellId::from_index(0)));

        // Source endpoint names no port, target endpoint is absent; both
        // resolve to the box center.
        let source = element.point_from_connected_link(&link, LinkEnd::Source);
        let target = element.point_from_connected_link(&link, LinkEnd::Target);
        assert_eq!(source, Point::new(5.0, 5.0));
        assert_eq!(target, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_link_point_unknown_port_is_center() {
        let element = Element::new().with_size(10.0, 10.0);
        let link =
            Link::default().with_source(Endpoint::port(CellId::from_index(0), "missing"));
        let point = element.point_from_connected_link(&link, LinkEnd::Source);
        assert_eq!(point, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_link_point_resolves_port() {
        let element = Element::new()
            .with_position(10.0, 20.0)
            .with_size(10.0, 10.0)
            .with_port_group("out", PortLayout::Right)
            .with_port("r", Port::in_group("out"));
        let link = Link::default().with_target(Endpoint::port(CellId::from_index(0), "r"));

        let point = element.point_from_connected_link(&link, LinkEnd::Target);
        assert_eq!(point, Point::new(20.0, 25.0));
    }

    #[test]
    fn test_link_point_accounts_for_rotation() {
        // A port on the right edge of a box rotated a quarter turn ends up
        // below the center on screen.
        let element = Element::new()
            .with_size(10.0, 10.0)
            .with_angle(90.0)
            .with_port_group("out", PortLayout::Right)
            .with_port("r", Port::in_group("out"));
        let link = Link::default().with_target(Endpoint::port(CellId::from_index(0), "r"));

        let point = element.point_from_connected_link(&link, LinkEnd::Target);
        assert_approx_eq!(f32, point.x(), 5.0, epsilon = 1e-4);
        assert_approx_eq!(f32, point.y(), 10.0, epsilon = 1e-4);
    }
}
