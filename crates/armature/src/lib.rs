//! Armature - the geometric transformation core of interactive diagram
//! elements.
//!
//! An [`Element`] owns a position, size and rotation angle, may be nested
//! inside other elements (embedding), and is mutated through [`Diagram`]
//! operations that keep embedded children and rotation-derived geometry
//! consistent: a directional resize keeps its anchor corner visually
//! fixed, a restricted-area translate clamps the whole embedded subtree,
//! and fit-to-children recomputes a parent's box from its descendants.
//!
//! Mutations emit [`change::Change`] records, with compound operations
//! bracketed in batches so observers can group related field changes.
//! Animated movement is handed off through the [`transition`] queue to an
//! external driver.
//!
//! # Examples
//!
//! ```
//! use armature::{Diagram, Element};
//! use armature::diagram::TranslateOptions;
//!
//! let mut diagram = Diagram::new();
//! let parent = diagram.add_element(Element::new().with_size(40.0, 40.0));
//! let child = diagram.add_element(Element::new().with_size(10.0, 10.0));
//! diagram.embed(parent, child)?;
//!
//! // Moving the parent moves the embedded subtree by the same delta.
//! diagram.translate(parent, 5.0, 5.0, &TranslateOptions::default())?;
//! assert_eq!(diagram.position(child)?.x(), 5.0);
//! # Ok::<(), armature::ArmatureError>(())
//! ```

pub mod change;
pub mod diagram;
pub mod element;
pub mod error;
pub mod link;
pub mod ports;
pub mod transition;

pub use armature_core::geometry;

pub use diagram::{Cell, CellId, Diagram};
pub use element::Element;
pub use error::ArmatureError;
pub use link::{Endpoint, Link, LinkEnd};
