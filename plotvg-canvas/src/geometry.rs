//! Points and rectangles in user space.

use crate::path::Path;
use crate::units::Length;
use std::fmt;
use std::ops::{Add, Sub};

/// A position in user space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    /// Create a point from two lengths.
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Create a point from coordinates in points.
    pub const fn pt(x: f64, y: f64) -> Self {
        Self {
            x: Length(x),
            y: Length(y),
        }
    }

    /// Scale both coordinates by a factor.
    pub fn scale(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }

    pub(crate) fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x.0, self.y.0)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    /// Create a rectangle from two corners, normalizing so that `min <= max`.
    pub fn new(a: Point, b: Point) -> Self {
        Rectangle { min: a, max: b }.normalize()
    }

    /// Swap coordinates as needed so that `min.x <= max.x` and `min.y <= max.y`.
    pub fn normalize(self) -> Self {
        Rectangle {
            min: Point::new(self.min.x.min(self.max.x), self.min.y.min(self.max.y)),
            max: Point::new(self.min.x.max(self.max.x), self.min.y.max(self.max.y)),
        }
    }

    /// Width and height as a point.
    pub fn size(&self) -> Point {
        self.max - self.min
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        let a = self.normalize();
        let b = other.normalize();
        Rectangle {
            min: Point::new(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
            max: Point::new(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
        }
    }

    /// Whether the point lies inside the rectangle (edges included).
    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// The rectangle translated by `p`.
    pub fn add(&self, p: Point) -> Rectangle {
        Rectangle {
            min: self.min + p,
            max: self.max + p,
        }
    }

    /// A closed path tracing the rectangle outline counter-clockwise.
    pub fn path(&self) -> Path {
        let mut p = Path::new();
        p.move_to(self.min);
        p.line_to(Point::new(self.max.x, self.min.y));
        p.line_to(self.max);
        p.line_to(Point::new(self.min.x, self.max.y));
        p.close();
        p
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.min, self.max)
    }
}
