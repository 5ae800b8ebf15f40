//! Integration tests for the diagram transform operations.
//!
//! These exercise the public API end to end: embedded subtrees moving
//! together, rotation-aware anchored resize, restricted-area clamping,
//! fit-to-children and the change notification stream.

use armature::change::{Batch, Change};
use armature::diagram::{
    FitEmbedsOptions, PositionOptions, ResizeDirection, ResizeOptions, TranslateOptions,
};
use armature::geometry::{Insets, Point, Rect};
use armature::transition::Transition;
use armature::{Diagram, Element};
use float_cmp::assert_approx_eq;
use proptest::prelude::*;

fn element_at(x: f32, y: f32, w: f32, h: f32) -> Element {
    Element::new().with_position(x, y).with_size(w, h)
}

#[test]
fn test_zero_translate_is_a_strict_noop() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(3.0, 4.0, 10.0, 10.0).with_angle(30.0));
    diagram.drain_changes();

    diagram.translate(id, 0.0, 0.0, &TranslateOptions::default()).unwrap();

    assert_eq!(diagram.position(id).unwrap(), Point::new(3.0, 4.0));
    assert_eq!(diagram.angle(id).unwrap(), 30.0);
    assert!(diagram.changes().is_empty(), "no notifications for a zero delta");
    assert!(diagram.transitions().is_empty());
}

#[test]
fn test_translate_moves_whole_subtree_by_same_delta() {
    let mut diagram = Diagram::new();
    let parent = diagram.add_element(element_at(0.0, 0.0, 30.0, 30.0));
    let child = diagram.add_element(element_at(5.0, 5.0, 5.0, 5.0));
    let grandchild = diagram.add_element(element_at(6.0, 6.0, 2.0, 2.0));
    diagram.embed(parent, child).unwrap();
    diagram.embed(child, grandchild).unwrap();

    let before = diagram.bbox(parent).unwrap();
    diagram.translate(parent, 7.0, -3.0, &TranslateOptions::default()).unwrap();

    assert_eq!(diagram.bbox(parent).unwrap(), before.translated(7.0, -3.0));
    assert_eq!(diagram.position(child).unwrap(), Point::new(12.0, 2.0));
    assert_eq!(diagram.position(grandchild).unwrap(), Point::new(13.0, 3.0));
}

#[test]
fn test_translate_emits_one_batch_with_deltas() {
    let mut diagram = Diagram::new();
    let parent = diagram.add_element(element_at(0.0, 0.0, 20.0, 20.0));
    let child = diagram.add_element(element_at(1.0, 1.0, 2.0, 2.0));
    diagram.embed(parent, child).unwrap();
    diagram.drain_changes();

    diagram.translate(parent, 4.0, 2.0, &TranslateOptions::default()).unwrap();

    let changes = diagram.drain_changes();
    assert_eq!(changes.first(), Some(&Change::BatchStart(Batch::Translate)));
    assert_eq!(changes.last(), Some(&Change::BatchStop(Batch::Translate)));

    let deltas: Vec<Point> = changes
        .iter()
        .filter_map(|change| match change {
            Change::Position { delta, .. } => Some(*delta),
            _ => None,
        })
        .collect();
    assert_eq!(deltas, vec![Point::new(4.0, 2.0); 2]);
}

#[test]
fn test_restricted_area_clamps_against_subtree_footprint() {
    // The subtree's deep bbox is (0, 0, 10, 10) while the element itself
    // sits at (0, 0); moving right by 20 inside a 15-wide area stops at 5
    // so the subtree's right edge stays at x = 15.
    let mut diagram = Diagram::new();
    let parent = diagram.add_element(element_at(0.0, 0.0, 6.0, 10.0));
    let child = diagram.add_element(element_at(4.0, 0.0, 6.0, 6.0));
    diagram.embed(parent, child).unwrap();

    let options = TranslateOptions {
        restricted_area: Some(Rect::new(0.0, 0.0, 15.0, 15.0)),
        ..Default::default()
    };
    diagram.translate(parent, 20.0, 0.0, &options).unwrap();

    assert_eq!(diagram.position(parent).unwrap(), Point::new(5.0, 0.0));
    assert_eq!(diagram.position(child).unwrap(), Point::new(9.0, 0.0));
    assert_eq!(diagram.deep_bbox(parent).unwrap(), Rect::new(5.0, 0.0, 10.0, 10.0));
}

#[test]
fn test_restricted_area_clamps_only_the_initiating_element() {
    // The child starts outside the area; if clamping applied to the
    // recursive propagation it could not follow the parent's delta.
    let mut diagram = Diagram::new();
    let parent = diagram.add_element(element_at(0.0, 0.0, 5.0, 5.0));
    let child = diagram.add_element(element_at(20.0, 0.0, 5.0, 5.0));
    diagram.embed(parent, child).unwrap();

    let options = TranslateOptions {
        restricted_area: Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
        ..Default::default()
    };
    diagram.translate(parent, 10.0, 0.0, &options).unwrap();

    assert_eq!(diagram.position(child).unwrap(), Point::new(30.0, 0.0));
}

#[test]
fn test_transition_translate_defers_movement() {
    let mut diagram = Diagram::new();
    let parent = diagram.add_element(element_at(0.0, 0.0, 20.0, 20.0));
    let child = diagram.add_element(element_at(2.0, 2.0, 2.0, 2.0));
    diagram.embed(parent, child).unwrap();
    diagram.drain_changes();

    let options = TranslateOptions {
        transition: Some(Transition::default()),
        ..Default::default()
    };
    diagram.translate(parent, 10.0, 0.0, &options).unwrap();

    // Nothing moves immediately and nothing is recorded; the movement is
    // queued for the animation driver, one request per affected element.
    assert_eq!(diagram.position(parent).unwrap(), Point::new(0.0, 0.0));
    assert_eq!(diagram.position(child).unwrap(), Point::new(2.0, 2.0));
    assert!(diagram.changes().is_empty());

    let requests = diagram.take_transitions();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].target, Point::new(10.0, 0.0));
    assert_eq!(requests[1].target, Point::new(12.0, 2.0));
    assert!(diagram.transitions().is_empty());
}

#[test]
fn test_rotate_absolute_normalizes_angle() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(Element::new());

    diagram.rotate(id, 450.0, true, None).unwrap();
    assert_eq!(diagram.angle(id).unwrap(), 90.0);

    diagram.rotate(id, -90.0, true, None).unwrap();
    assert_eq!(diagram.angle(id).unwrap(), 270.0);
}

#[test]
fn test_rotate_relative_accumulates() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(Element::new());

    diagram.rotate(id, 270.0, false, None).unwrap();
    diagram.rotate(id, 270.0, false, None).unwrap();
    assert_eq!(diagram.angle(id).unwrap(), 180.0);
}

#[test]
fn test_resize_right_at_zero_rotation_keeps_left_edge() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(0.0, 0.0, 10.0, 10.0));

    let options = ResizeOptions {
        direction: Some(ResizeDirection::Right),
        ..Default::default()
    };
    diagram.resize(id, 20.0, 10.0, &options).unwrap();

    let bbox = diagram.bbox(id).unwrap();
    assert_approx_eq!(f32, bbox.x(), 0.0, epsilon = 1e-4);
    assert_approx_eq!(f32, bbox.y(), 0.0, epsilon = 1e-4);
    assert_approx_eq!(f32, bbox.width(), 20.0, epsilon = 1e-4);
    assert_approx_eq!(f32, bbox.height(), 10.0, epsilon = 1e-4);
}

#[test]
fn test_resize_right_forces_current_height() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(0.0, 0.0, 10.0, 10.0));

    let options = ResizeOptions {
        direction: Some(ResizeDirection::Right),
        ..Default::default()
    };
    diagram.resize(id, 20.0, 99.0, &options).unwrap();
    assert_eq!(diagram.size(id).unwrap().height(), 10.0);
}

#[test]
fn test_absolute_resize_on_rotated_element_keeps_fixed_corner() {
    // At 90 degrees the "right" direction rotates into quadrant 1, whose
    // fixed corner (the box's bottom-right) sits on screen at (0, 10).
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(0.0, 0.0, 10.0, 10.0).with_angle(90.0));

    let options = ResizeOptions {
        direction: Some(ResizeDirection::Right),
        absolute: true,
    };
    diagram.resize(id, 20.0, 10.0, &options).unwrap();

    let bbox = diagram.bbox(id).unwrap();
    assert_approx_eq!(f32, bbox.x(), -5.0, epsilon = 1e-3);
    assert_approx_eq!(f32, bbox.y(), -5.0, epsilon = 1e-3);
    assert_approx_eq!(f32, bbox.width(), 20.0, epsilon = 1e-3);
    assert_approx_eq!(f32, bbox.height(), 10.0, epsilon = 1e-3);

    // The anchor corner's on-screen location is unchanged by the resize.
    let world_corner = bbox
        .bottom_right()
        .rotated_about(bbox.center(), -diagram.angle(id).unwrap());
    assert_approx_eq!(f32, world_corner.x(), 0.0, epsilon = 1e-3);
    assert_approx_eq!(f32, world_corner.y(), 10.0, epsilon = 1e-3);
}

#[test]
fn test_anchored_resize_keeps_corner_for_arbitrary_rotation() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(12.0, -3.0, 8.0, 14.0).with_angle(37.0));

    let before = diagram.bbox(id).unwrap();
    let angle = diagram.angle(id).unwrap();
    let anchor_before = before.origin().rotated_about(before.center(), -angle);

    // Direction bottom-right uses quadrant 3, whose fixed corner is the
    // box origin.
    let options = ResizeOptions {
        direction: Some(ResizeDirection::BottomRight),
        ..Default::default()
    };
    diagram.resize(id, 20.0, 6.0, &options).unwrap();

    let after = diagram.bbox(id).unwrap();
    let anchor_after = after.origin().rotated_about(after.center(), -angle);
    assert_approx_eq!(f32, anchor_after.x(), anchor_before.x(), epsilon = 1e-2);
    assert_approx_eq!(f32, anchor_after.y(), anchor_before.y(), epsilon = 1e-2);
}

#[test]
fn test_unanchored_resize_overwrites_in_place() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(3.0, 3.0, 10.0, 10.0));
    diagram.drain_changes();

    diagram.resize(id, 5.0, 7.0, &ResizeOptions::default()).unwrap();

    assert_eq!(diagram.bbox(id).unwrap(), Rect::new(3.0, 3.0, 5.0, 7.0));
    let changes = diagram.drain_changes();
    assert_eq!(changes.first(), Some(&Change::BatchStart(Batch::Resize)));
    assert_eq!(changes.last(), Some(&Change::BatchStop(Batch::Resize)));
}

#[test]
fn test_scale_about_world_origin() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(2.0, 3.0, 4.0, 5.0));

    diagram.scale(id, 2.0, 2.0, None).unwrap();
    assert_eq!(diagram.bbox(id).unwrap(), Rect::new(4.0, 6.0, 8.0, 10.0));
}

#[test]
fn test_scale_about_custom_origin() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(2.0, 2.0, 4.0, 4.0));

    diagram.scale(id, 0.5, 0.5, Some(Point::new(4.0, 4.0))).unwrap();
    assert_eq!(diagram.bbox(id).unwrap(), Rect::new(3.0, 3.0, 2.0, 2.0));
}

#[test]
fn test_deep_bbox_unions_subtree() {
    let mut diagram = Diagram::new();
    let parent = diagram.add_element(element_at(0.0, 0.0, 5.0, 5.0));
    let child = diagram.add_element(element_at(8.0, 8.0, 4.0, 4.0));
    let grandchild = diagram.add_element(element_at(-2.0, 1.0, 1.0, 1.0));
    diagram.embed(parent, child).unwrap();
    diagram.embed(child, grandchild).unwrap();

    assert_eq!(diagram.bbox(parent).unwrap(), Rect::new(0.0, 0.0, 5.0, 5.0));
    assert_eq!(
        diagram.deep_bbox(parent).unwrap(),
        Rect::new(-2.0, 0.0, 14.0, 12.0)
    );
}

#[test]
fn test_getters_do_not_mutate() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(1.0, 2.0, 3.0, 4.0));
    diagram.drain_changes();

    let first = diagram.bbox(id).unwrap();
    let second = diagram.bbox(id).unwrap();
    assert_eq!(first, second);

    diagram.position(id).unwrap();
    diagram.size(id).unwrap();
    diagram.angle(id).unwrap();
    assert!(diagram.changes().is_empty());
}

#[test]
fn test_fit_embeds_wraps_children_with_padding() {
    let mut diagram = Diagram::new();
    let parent = diagram.add_element(element_at(100.0, 100.0, 1.0, 1.0));
    let a = diagram.add_element(element_at(0.0, 0.0, 4.0, 10.0));
    let b = diagram.add_element(element_at(6.0, 2.0, 4.0, 8.0));
    diagram.embed(parent, a).unwrap();
    diagram.embed(parent, b).unwrap();

    let options = FitEmbedsOptions {
        padding: Insets::from(2.0),
        ..Default::default()
    };
    diagram.fit_embeds(parent, &options).unwrap();

    assert_eq!(diagram.position(parent).unwrap(), Point::new(-2.0, -2.0));
    assert_eq!(diagram.bbox(parent).unwrap(), Rect::new(-2.0, -2.0, 14.0, 14.0));
}

#[test]
fn test_fit_embeds_without_children_is_noop() {
    let mut diagram = Diagram::new();
    let id = diagram.add_element(element_at(5.0, 5.0, 2.0, 2.0));
    diagram.drain_changes();

    diagram.fit_embeds(id, &FitEmbedsOptions::default()).unwrap();
    assert_eq!(diagram.bbox(id).unwrap(), Rect::new(5.0, 5.0, 2.0, 2.0));
    assert!(diagram.changes().is_empty());
}

#[test]
fn test_fit_embeds_deep_settles_bottom_up() {
    let mut diagram = Diagram::new();
    let root = diagram.add_element(element_at(50.0, 50.0, 1.0, 1.0));
    let middle = diagram.add_element(element_at(40.0, 40.0, 1.0, 1.0));
    let leaf = diagram.add_element(element_at(10.0, 10.0, 4.0, 4.0));
    diagram.embed(root, middle).unwrap();
    diagram.embed(middle, leaf).unwrap();

    let options = FitEmbedsOptions {
        deep: true,
        padding: Insets::from(1.0),
    };
    diagram.fit_embeds(root, &options).unwrap();

    // The middle element wraps the leaf first, then the root wraps the
    // already-fitted middle.
    assert_eq!(diagram.bbox(middle).unwrap(), Rect::new(9.0, 9.0, 6.0, 6.0));
    assert_eq!(diagram.bbox(root).unwrap(), Rect::new(8.0, 8.0, 8.0, 8.0));
}

proptest! {
    #[test]
    fn prop_absolute_rotation_lands_in_range(angle in -3600.0f32..3600.0) {
        let mut diagram = Diagram::new();
        let id = diagram.add_element(Element::new());
        diagram.rotate(id, angle, true, None).unwrap();
        let normalized = diagram.angle(id).unwrap();
        prop_assert!((0.0..360.0).contains(&normalized));
    }

    #[test]
    fn prop_translate_shifts_deep_bbox_exactly(
        tx in -50.0f32..50.0,
        ty in -50.0f32..50.0,
    ) {
        let mut diagram = Diagram::new();
        let parent = diagram.add_element(element_at(0.0, 0.0, 10.0, 10.0));
        let child = diagram.add_element(element_at(3.0, 12.0, 4.0, 4.0));
        diagram.embed(parent, child).unwrap();

        let before = diagram.deep_bbox(parent).unwrap();
        diagram.translate(parent, tx, ty, &TranslateOptions::default()).unwrap();
        let after = diagram.deep_bbox(parent).unwrap();

        prop_assert!((after.x() - (before.x() + tx)).abs() < 1e-4);
        prop_assert!((after.y() - (before.y() + ty)).abs() < 1e-4);
        prop_assert!((after.width() - before.width()).abs() < 1e-4);
        prop_assert!((after.height() - before.height()).abs() < 1e-4);
    }
}
