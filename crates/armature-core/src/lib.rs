//! Armature Core Types
//!
//! This crate provides the foundational geometry types for the armature
//! diagram engine:
//!
//! - **Points and sizes**: [`geometry::Point`], [`geometry::Size`]
//! - **Rectangles**: [`geometry::Rect`] with corner accessors and padding
//! - **Insets**: [`geometry::Insets`] for per-side spacing
//! - **Angles**: [`geometry::normalize_angle`] and rotation helpers
//!
//! All coordinates follow the screen convention: the y axis grows downward
//! and a positive angle rotates counter-clockwise on screen.

pub mod geometry;
