use serde::{Deserialize, Serialize};

/// Normalizes an angle in degrees into the half-open range `[0, 360)`.
pub fn normalize_angle(angle: f32) -> f32 {
    ((angle % 360.0) + 360.0) % 360.0
}

/// A point in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Moves the point by the given offsets
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Rotates the point around `origin` by `angle` degrees.
    ///
    /// A positive angle rotates counter-clockwise on screen. With the y axis
    /// growing downward this is a rotation by `-angle` in the usual
    /// mathematical convention.
    pub fn rotated_about(self, origin: Point, angle: f32) -> Self {
        let rad = normalize_angle(-angle).to_radians();
        let (sin, cos) = rad.sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Self {
            x: cos * dx - sin * dy + origin.x,
            y: sin * dx + cos * dy + origin.y,
        }
    }

    /// Constructs a point from polar coordinates relative to `origin`.
    ///
    /// The angle is in radians, measured counter-clockwise on screen from
    /// the positive x axis, so an angle in `(0, 90)` degrees lands up and to
    /// the right of the origin.
    pub fn from_polar(radius: f32, angle: f32, origin: Point) -> Self {
        Self {
            x: origin.x + radius * angle.cos(),
            y: origin.y - radius * angle.sin(),
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Multiplies the dimensions by separate horizontal and vertical factors
    pub fn scaled(self, sx: f32, sy: f32) -> Self {
        Self {
            width: self.width * sx,
            height: self.height * sy,
        }
    }

    /// Returns half the diagonal of a box with these dimensions.
    ///
    /// This is the distance from the center of the box to any of its
    /// corners.
    pub fn half_diagonal(self) -> f32 {
        self.width.hypot(self.height) / 2.0
    }
}

/// An axis-aligned rectangle described by its top-left origin and size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a new rectangle with the specified origin and dimensions
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from a top-left origin point and a size
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x(),
            y: origin.y(),
            width: size.width(),
            height: size.height(),
        }
    }

    /// Returns the x-coordinate of the rectangle's origin
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the rectangle's origin
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the width of the rectangle
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height of the rectangle
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the top-left corner
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the top-right corner
    pub fn top_right(self) -> Point {
        Point::new(self.x + self.width, self.y)
    }

    /// Returns the bottom-left corner
    pub fn bottom_left(self) -> Point {
        Point::new(self.x, self.y + self.height)
    }

    /// Returns the bottom-right corner
    pub fn bottom_right(self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Returns the center of the rectangle
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Converts the rectangle's dimensions to a Size object
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Merges two rectangles to create a larger one that contains both
    pub fn union(&self, other: &Self) -> Self {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Moves the rectangle by the specified offsets
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Scales the rectangle about `origin` with separate x and y factors
    pub fn scaled(&self, sx: f32, sy: f32, origin: Point) -> Self {
        Self {
            x: origin.x() + (self.x - origin.x()) * sx,
            y: origin.y() + (self.y - origin.y()) * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }

    /// Expands the rectangle outward by adding insets.
    ///
    /// This moves the origin up and to the left by the top/left insets and
    /// grows the dimensions by the sums of the opposing insets.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            x: self.x - insets.left(),
            y: self.y - insets.top(),
            width: self.width + insets.horizontal_sum(),
            height: self.height + insets.vertical_sum(),
        }
    }

    /// Checks whether a point lies inside the rectangle (edges included)
    pub fn contains_point(&self, point: Point) -> bool {
        point.x() >= self.x
            && point.x() <= self.x + self.width
            && point.y() >= self.y
            && point.y() <= self.y + self.height
    }
}

/// Represents spacing around an element (padding, margin, etc.)
/// with potentially different values for each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

impl From<f32> for Insets {
    fn from(value: f32) -> Self {
        Self::uniform(value)
    }
}
