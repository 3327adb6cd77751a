//! Geometric primitives for layout reconstruction.
//!
//! Detections arrive as [`Quad`]s (four points, possibly rotated). All layout
//! decisions are made on the derived [`AxisBox`], and the two metrics used for
//! table cell fusion, [`distance`] and [`iou`], are defined here.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 2D point in image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_layout::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A four-point text region as produced by a detector.
///
/// Points are ordered top-left, top-right, bottom-right, bottom-left. The
/// region may be rotated, so the points need not be axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    /// Corner points in TL, TR, BR, BL order
    pub points: [Point; 4],
}

impl Quad {
    /// Create a quad from its four corner points.
    pub fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Create an axis-aligned quad from two corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_layout::geometry::Quad;
    ///
    /// let quad = Quad::from_rect(0.0, 0.0, 50.0, 20.0);
    /// let bbox = quad.axis_box();
    /// assert_eq!(bbox.x1, 50.0);
    /// assert_eq!(bbox.y1, 20.0);
    /// ```
    pub fn from_rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            points: [
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
        }
    }

    /// Create a quad from a flat `[x, y, x, y, ...]` coordinate list.
    ///
    /// Detection models commonly emit 8 floats per region; any other length is
    /// rejected.
    pub fn from_flat(coords: &[f32]) -> Result<Self> {
        if coords.len() != 8 {
            return Err(Error::InputInvalid(format!(
                "quad needs 8 coordinates, got {}",
                coords.len()
            )));
        }

        let mut points = [Point::new(0.0, 0.0); 4];
        for (point, pair) in points.iter_mut().zip(coords.chunks_exact(2)) {
            *point = Point::new(pair[0], pair[1]);
        }
        Ok(Self { points })
    }

    /// Compute the minimal axis-aligned box enclosing this quad.
    pub fn axis_box(&self) -> AxisBox {
        let mut x0 = self.points[0].x;
        let mut y0 = self.points[0].y;
        let mut x1 = x0;
        let mut y1 = y0;

        for p in &self.points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }

        AxisBox { x0, y0, x1, y1 }
    }
}

/// An axis-aligned box given by its top-left `(x0, y0)` and bottom-right
/// `(x1, y1)` corners.
///
/// Boxes derived through [`Quad::axis_box`] always satisfy `x0 <= x1` and
/// `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl AxisBox {
    /// Create a box from two corners, normalizing their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_layout::geometry::AxisBox;
    ///
    /// let bbox = AxisBox::new(100.0, 50.0, 0.0, 0.0);
    /// assert_eq!(bbox.x0, 0.0);
    /// assert_eq!(bbox.y1, 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Area of the box.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Center point of the box.
    pub fn center(&self) -> Point {
        Point {
            x: (self.x0 + self.x1) / 2.0,
            y: (self.y0 + self.y1) / 2.0,
        }
    }

    /// Check if this box overlaps another with positive area.
    ///
    /// Boxes that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &AxisBox) -> bool {
        self.x0.max(other.x0) < self.x1.min(other.x1)
            && self.y0.max(other.y0) < self.y1.min(other.y1)
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &AxisBox) -> AxisBox {
        AxisBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

impl From<&Quad> for AxisBox {
    fn from(quad: &Quad) -> Self {
        quad.axis_box()
    }
}

/// Corner distance between two boxes.
///
/// This is the L1 distance over both corners plus the smaller of the two
/// single-corner distances, so boxes sharing one corner region score better
/// than boxes that are offset on both corners:
///
/// ```text
/// d  = |bx0-ax0| + |by0-ay0| + |bx1-ax1| + |by1-ay1|
/// d1 = |bx0-ax0| + |by0-ay0|
/// d2 = |bx1-ax1| + |by1-ay1|
/// distance = d + min(d1, d2)
/// ```
///
/// # Examples
///
/// ```
/// use ocr_layout::geometry::{distance, AxisBox};
///
/// let a = AxisBox::new(0.0, 0.0, 10.0, 10.0);
/// let b = AxisBox::new(0.0, 0.0, 12.0, 13.0);
/// // d = 5, d1 = 0, d2 = 5
/// assert_eq!(distance(&a, &b), 5.0);
/// assert_eq!(distance(&b, &a), 5.0);
/// ```
pub fn distance(a: &AxisBox, b: &AxisBox) -> f32 {
    let dx0 = (b.x0 - a.x0).abs();
    let dy0 = (b.y0 - a.y0).abs();
    let dx1 = (b.x1 - a.x1).abs();
    let dy1 = (b.y1 - a.y1).abs();

    let d = dx0 + dy0 + dx1 + dy1;
    let d1 = dx0 + dy0;
    let d2 = dx1 + dy1;

    d + d1.min(d2)
}

/// Intersection over union of two boxes, in `[0, 1]`.
///
/// Returns `0.0` when the boxes do not overlap with positive area.
///
/// # Examples
///
/// ```
/// use ocr_layout::geometry::{iou, AxisBox};
///
/// let a = AxisBox::new(0.0, 0.0, 10.0, 10.0);
/// let b = AxisBox::new(5.0, 0.0, 15.0, 10.0);
/// let c = AxisBox::new(10.0, 0.0, 20.0, 10.0);
///
/// assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-6);
/// assert_eq!(iou(&a, &c), 0.0);
/// ```
pub fn iou(a: &AxisBox, b: &AxisBox) -> f32 {
    let left_line = a.x0.max(b.x0);
    let right_line = a.x1.min(b.x1);
    let top_line = a.y0.max(b.y0);
    let bottom_line = a.y1.min(b.y1);

    if left_line >= right_line || top_line >= bottom_line {
        return 0.0;
    }

    let intersect = (right_line - left_line) * (bottom_line - top_line);
    let sum_area = a.area() + b.area();

    intersect / (sum_area - intersect)
}
