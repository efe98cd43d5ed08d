//! Device-independent lengths.
//!
//! All drawing coordinates are expressed as [`Length`] values measured in
//! points (1/72 inch). Backends convert to device pixels with
//! [`Length::dots`].

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A distance in points. Negative lengths are valid and used for offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Length(pub f64);

impl Length {
    /// Zero length.
    pub const ZERO: Length = Length(0.0);
    /// One point, the base unit.
    pub const POINT: Length = Length(1.0);
    /// One inch (72 points).
    pub const INCH: Length = Length(72.0);
    /// One centimeter.
    pub const CENTIMETER: Length = Length(72.0 / 2.54);
    /// One millimeter.
    pub const MILLIMETER: Length = Length(72.0 / 25.4);

    /// Create a length from a number of points.
    pub const fn points(pt: f64) -> Self {
        Length(pt)
    }

    /// Create a length from a number of inches.
    pub fn inches(inch: f64) -> Self {
        Self::INCH * inch
    }

    /// Create a length from a number of centimeters.
    pub fn centimeters(cm: f64) -> Self {
        Self::CENTIMETER * cm
    }

    /// Create a length from a number of millimeters.
    pub fn millimeters(mm: f64) -> Self {
        Self::MILLIMETER * mm
    }

    /// The length in points.
    pub const fn to_points(self) -> f64 {
        self.0
    }

    /// Convert to device pixels at the given resolution in dots per inch.
    pub fn dots(self, dpi: f64) -> f64 {
        self.0 / Self::INCH.0 * dpi
    }

    /// The smaller of two lengths.
    pub fn min(self, other: Length) -> Length {
        Length(self.0.min(other.0))
    }

    /// The larger of two lengths.
    pub fn max(self, other: Length) -> Length {
        Length(self.0.max(other.0))
    }
}

impl From<f64> for Length {
    fn from(pt: f64) -> Self {
        Length(pt)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;
    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;
    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}
