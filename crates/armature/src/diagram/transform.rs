//! Transform operations on elements.
//!
//! Every operation lives on [`Diagram`] and is keyed by [`CellId`], since
//! moving an element must reach its embedded subtree and positioning
//! relative to a parent must resolve the embedding relation. The geometry
//! here preserves two non-obvious invariants: a directional resize keeps
//! its anchor corner visually fixed for any rotation angle, and a
//! restricted-area translate clamps against the whole subtree's footprint
//! rather than the element's own box.

use std::f32::consts::FRAC_PI_2;

use log::{debug, trace};

use armature_core::geometry::{Insets, Point, Rect, Size, normalize_angle};

use super::{Cell, CellId, Diagram};
use crate::change::{Batch, Change};
use crate::element::Element;
use crate::error::ArmatureError;
use crate::link::{Link, LinkEnd};
use crate::transition::{Transition, TransitionRequest};

/// Options for [`Diagram::set_position`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionOptions {
    /// Interpret the given coordinates relative to the parent's position.
    pub parent_relative: bool,

    /// Move the embedded subtree along by redirecting into a translate.
    pub deep: bool,
}

/// Options for [`Diagram::translate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateOptions {
    /// Clamp the movement so the element's whole embedded subtree stays
    /// inside this rectangle.
    pub restricted_area: Option<Rect>,

    /// Queue the movement as an animated transition instead of applying it
    /// immediately.
    pub transition: Option<Transition>,
}

/// The directional anchor of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeDirection {
    /// Maps the direction to the quadrant index selecting the fixed
    /// corner. The table is fixed; anchored resize depends on this exact
    /// ordering.
    fn quadrant(self) -> u32 {
        match self {
            Self::TopRight | Self::Right => 0,
            Self::TopLeft | Self::Top => 1,
            Self::BottomLeft | Self::Left => 2,
            Self::BottomRight | Self::Bottom => 3,
        }
    }
}

/// Options for [`Diagram::resize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ResizeOptions {
    /// Anchored resize: the opposite corner stays visually fixed. Without
    /// a direction the size is simply overwritten in place.
    pub direction: Option<ResizeDirection>,

    /// Interpret the direction in visual terms, accounting for the
    /// element's current rotation.
    pub absolute: bool,
}

/// Options for [`Diagram::fit_embeds`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FitEmbedsOptions {
    /// Fit every embedded child bottom-up before fitting this element.
    pub deep: bool,

    /// Padding around the children's union box. `Insets::from(n)` gives
    /// the uniform single-number form.
    pub padding: Insets,
}

impl Diagram {
    /// Returns an element's position.
    pub fn position(&self, id: CellId) -> Result<Point, ArmatureError> {
        Ok(self.element(id)?.position())
    }

    /// Returns an element's position relative to its parent.
    ///
    /// A missing parent, or a parent without a position of its own (a
    /// link), counts as `(0, 0)`.
    pub fn relative_position(&self, id: CellId) -> Result<Point, ArmatureError> {
        let position = self.element(id)?.position();
        Ok(position.sub_point(self.parent_position(id)))
    }

    fn parent_position(&self, id: CellId) -> Point {
        self.parent(id)
            .and_then(|parent| self.cell(parent))
            .and_then(Cell::as_element)
            .map(Element::position)
            .unwrap_or_default()
    }

    /// Sets an element's position.
    ///
    /// With `parent_relative` the coordinates are offset by the parent's
    /// position first. With `deep` the call is redirected into
    /// [`Diagram::translate`] with the delta from the current position, so
    /// the embedded subtree moves along; otherwise the position is
    /// overwritten and embedded cells stay where they are.
    pub fn set_position(
        &mut self,
        id: CellId,
        x: f32,
        y: f32,
        options: &PositionOptions,
    ) -> Result<(), ArmatureError> {
        let current = self.element(id)?.position();

        let mut target = Point::new(x, y);
        if options.parent_relative {
            target = target.add_point(self.parent_position(id));
        }

        if options.deep {
            let delta = target.sub_point(current);
            return self.translate(id, delta.x(), delta.y(), &TranslateOptions::default());
        }

        self.apply_position(id, target, target.sub_point(current))
    }

    /// Moves an element by a delta, and every embedded descendant by the
    /// identical delta.
    ///
    /// A `(0, 0)` delta is a strict no-op: nothing is mutated and nothing
    /// is recorded. With a restricted area the delta is clamped so the
    /// whole subtree's bounding box stays inside; the clamp applies only
    /// here at the initiating element, not to the recursive propagation.
    /// With a transition the movement is queued for the animation driver
    /// instead of applied immediately; otherwise the element's own move
    /// and the propagation share one `Translate` batch.
    pub fn translate(
        &mut self,
        id: CellId,
        tx: f32,
        ty: f32,
        options: &TranslateOptions,
    ) -> Result<(), ArmatureError> {
        self.translate_tree(id, id, tx, ty, options)
    }

    fn translate_tree(
        &mut self,
        id: CellId,
        initiator: CellId,
        tx: f32,
        ty: f32,
        options: &TranslateOptions,
    ) -> Result<(), ArmatureError> {
        let position = self.element(id)?.position();

        if tx == 0.0 && ty == 0.0 {
            return Ok(());
        }

        let (tx, ty) = match options.restricted_area {
            Some(area) if id == initiator => {
                // Clamp against the combined footprint of the subtree, so
                // dragging a parent cannot push a descendant outside the
                // area. The lower bound wins when the subtree is larger
                // than the area.
                let bbox = self.deep_bbox(id)?;
                let dx = position.x() - bbox.x();
                let dy = position.y() - bbox.y();
                let x = (position.x() + tx)
                    .min(area.x() + area.width() + dx - bbox.width())
                    .max(area.x() + dx);
                let y = (position.y() + ty)
                    .min(area.y() + area.height() + dy - bbox.height())
                    .max(area.y() + dy);
                (x - position.x(), y - position.y())
            }
            _ => (tx, ty),
        };

        let translated = position.offset(tx, ty);
        trace!(id:% = id, tx, ty; "Translating element");

        if let Some(transition) = options.transition {
            self.push_transition(TransitionRequest {
                cell: id,
                target: translated,
                transition,
            });
            self.translate_children(id, initiator, tx, ty, options)?;
        } else {
            self.changes_mut().start_batch(Batch::Translate);
            self.apply_position(id, translated, Point::new(tx, ty))?;
            self.translate_children(id, initiator, tx, ty, options)?;
            self.changes_mut().stop_batch(Batch::Translate);
        }
        Ok(())
    }

    fn translate_children(
        &mut self,
        id: CellId,
        initiator: CellId,
        tx: f32,
        ty: f32,
        options: &TranslateOptions,
    ) -> Result<(), ArmatureError> {
        for child in self.embedded_cells(id) {
            // Links derive their geometry from their endpoints; only
            // element children move.
            if self.cell(child).is_some_and(Cell::is_element) {
                self.translate_tree(child, initiator, tx, ty, options)?;
            }
        }
        Ok(())
    }

    /// Returns an element's size.
    pub fn size(&self, id: CellId) -> Result<Size, ArmatureError> {
        Ok(self.element(id)?.size())
    }

    /// Resizes an element.
    ///
    /// Without a direction the size is overwritten in place. With a
    /// direction the resize is anchored: the corner opposite the direction
    /// keeps its exact on-screen location, whatever the element's current
    /// rotation. Horizontal-only directions keep the current height and
    /// vertical-only directions keep the current width.
    pub fn resize(
        &mut self,
        id: CellId,
        width: f32,
        height: f32,
        options: &ResizeOptions,
    ) -> Result<(), ArmatureError> {
        let (current_size, angle, bbox) = {
            let element = self.element(id)?;
            (element.size(), element.angle(), element.bbox())
        };

        debug!(id:% = id, width, height; "Resizing element");

        let Some(direction) = options.direction else {
            self.changes_mut().start_batch(Batch::Resize);
            self.apply_size(id, Size::new(width, height))?;
            self.changes_mut().stop_batch(Batch::Resize);
            return Ok(());
        };

        let (width, height) = match direction {
            ResizeDirection::Left | ResizeDirection::Right => (width, current_size.height()),
            ResizeDirection::Top | ResizeDirection::Bottom => (current_size.width(), height),
            _ => (width, height),
        };

        let mut quadrant = direction.quadrant();
        if options.absolute {
            // Rotate the quadrant so the direction refers to the element's
            // visual orientation rather than its unrotated local frame.
            quadrant += ((angle + 45.0) / 90.0).floor() as u32;
            quadrant %= 4;
        }

        // The corner of the current, unrotated box that must stay visually
        // fixed.
        let fixed_point = match quadrant {
            0 => bbox.bottom_left(),
            1 => bbox.bottom_right(),
            2 => bbox.top_right(),
            _ => bbox.origin(),
        };

        // Its true on-screen location under the current rotation.
        let image_fixed_point = fixed_point.rotated_about(bbox.center(), -angle);

        // Distance from the new box's center to any of its corners.
        let radius = Size::new(width, height).half_diagonal();

        // Angle from the new box's center to the fixed corner, expressed
        // in world terms by subtracting the current rotation.
        let mut alpha = quadrant as f32 * FRAC_PI_2;
        alpha += if quadrant % 2 == 0 {
            (height / width).atan()
        } else {
            (width / height).atan()
        };
        alpha -= angle.to_radians();

        // Walk back from the fixed corner to find the new center, then the
        // new origin.
        let center = Point::from_polar(radius, alpha, image_fixed_point);
        let origin = center.offset(width / -2.0, height / -2.0);

        self.changes_mut().start_batch(Batch::Resize);
        self.apply_size(id, Size::new(width, height))?;
        self.apply_position(id, origin, origin.sub_point(bbox.origin()))?;
        self.changes_mut().stop_batch(Batch::Resize);
        Ok(())
    }

    /// Scales an element's box by `(sx, sy)` about `origin` (the world
    /// origin when absent), applying the scaled box's position and size
    /// inside one `Scale` batch.
    pub fn scale(
        &mut self,
        id: CellId,
        sx: f32,
        sy: f32,
        origin: Option<Point>,
    ) -> Result<(), ArmatureError> {
        let bbox = self.bbox(id)?;
        let scaled = bbox.scaled(sx, sy, origin.unwrap_or_default());

        debug!(id:% = id, sx, sy; "Scaling element");

        self.changes_mut().start_batch(Batch::Scale);
        self.apply_position(id, scaled.origin(), scaled.origin().sub_point(bbox.origin()))?;
        self.resize(id, scaled.width(), scaled.height(), &ResizeOptions::default())?;
        self.changes_mut().stop_batch(Batch::Scale);
        Ok(())
    }

    /// Returns an element's rotation angle, normalized into `[0, 360)`.
    pub fn angle(&self, id: CellId) -> Result<f32, ArmatureError> {
        Ok(self.element(id)?.angle())
    }

    /// Rotates an element.
    ///
    /// Without an origin the angle itself is updated: to the literal value
    /// when `absolute`, otherwise by adding to the current angle; the
    /// result is always normalized into `[0, 360)`. With an origin the
    /// element's center is first rotated about it by the delta between the
    /// current and the requested angle, the element repositioned
    /// accordingly, and then the angle updated, all in one `Rotate` batch.
    pub fn rotate(
        &mut self,
        id: CellId,
        angle: f32,
        absolute: bool,
        origin: Option<Point>,
    ) -> Result<(), ArmatureError> {
        match origin {
            Some(origin) => {
                let (current_angle, size, position, center) = {
                    let element = self.element(id)?;
                    (
                        element.angle(),
                        element.size(),
                        element.position(),
                        element.bbox().center(),
                    )
                };

                let center = center.rotated_about(origin, current_angle - angle);
                let dx = center.x() - size.width() / 2.0 - position.x();
                let dy = center.y() - size.height() / 2.0 - position.y();

                self.changes_mut().start_batch(Batch::Rotate);
                self.apply_position(id, position.offset(dx, dy), Point::new(dx, dy))?;
                self.rotate(id, angle, absolute, None)?;
                self.changes_mut().stop_batch(Batch::Rotate);
            }
            None => {
                let current = self.element(id)?.angle();
                let next = normalize_angle(if absolute { angle } else { current + angle });
                trace!(id:% = id, angle = next; "Rotating element");
                self.element_mut(id)?.set_angle(next);
                self.changes_mut().record(Change::Angle {
                    cell: id,
                    angle: next,
                });
            }
        }
        Ok(())
    }

    /// Returns an element's own unrotated bounding box.
    pub fn bbox(&self, id: CellId) -> Result<Rect, ArmatureError> {
        Ok(self.element(id)?.bbox())
    }

    /// Returns the union bounding box of an element and its whole embedded
    /// subtree.
    pub fn deep_bbox(&self, id: CellId) -> Result<Rect, ArmatureError> {
        let own = self.bbox(id)?;
        let descendants = self.embedded_cells_deep(id);
        Ok(match self.cells_bbox(&descendants) {
            Some(subtree) => own.union(&subtree),
            None => own,
        })
    }

    /// Resizes and repositions an element to tightly enclose its embedded
    /// children plus padding.
    ///
    /// A no-op when the element has no element children. With `deep` every
    /// child is fitted first, so sizes settle bottom-up.
    pub fn fit_embeds(
        &mut self,
        id: CellId,
        options: &FitEmbedsOptions,
    ) -> Result<(), ArmatureError> {
        let current = self.element(id)?.position();

        let children: Vec<CellId> = self
            .embedded_cells(id)
            .into_iter()
            .filter(|&child| self.cell(child).is_some_and(Cell::is_element))
            .collect();
        if children.is_empty() {
            return Ok(());
        }

        debug!(id:% = id, children_len = children.len(); "Fitting element to embedded children");

        self.changes_mut().start_batch(Batch::FitEmbeds);
        if options.deep {
            for &child in &children {
                self.fit_embeds(child, options)?;
            }
        }

        let bbox = self
            .cells_bbox(&children)
            .expect("children contain at least one element");
        let fitted = bbox.add_padding(options.padding);

        self.apply_position(id, fitted.origin(), fitted.origin().sub_point(current))?;
        self.apply_size(id, fitted.size())?;
        self.changes_mut().stop_batch(Batch::FitEmbeds);
        Ok(())
    }

    /// Resolves the world-space point a connected link attaches to on the
    /// given element. See [`Element::point_from_connected_link`].
    pub fn point_from_connected_link(
        &self,
        id: CellId,
        link: &Link,
        end: LinkEnd,
    ) -> Result<Point, ArmatureError> {
        Ok(self.element(id)?.point_from_connected_link(link, end))
    }

    fn apply_position(
        &mut self,
        id: CellId,
        position: Point,
        delta: Point,
    ) -> Result<(), ArmatureError> {
        self.element_mut(id)?.set_position(position);
        self.changes_mut().record(Change::Position {
            cell: id,
            position,
            delta,
        });
        Ok(())
    }

    fn apply_size(&mut self, id: CellId, size: Size) -> Result<(), ArmatureError> {
        self.element_mut(id)?.set_size(size);
        self.changes_mut().record(Change::Size { cell: id, size });
        Ok(())
    }
}
