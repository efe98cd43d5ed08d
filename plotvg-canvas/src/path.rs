//! Path model shared by stroke and fill operations.
//!
//! A [`Path`] is an ordered list of [`PathComponent`]s describing one or more
//! sub-paths. No validation happens while building; [`Path::to_bezpath`]
//! defines how backends interpret malformed sequences:
//!
//! - `Line` or `Arc` without a current point starts a new sub-path there.
//! - Segments following `Close` restart at the closed sub-path's start point.
//!
//! Arc angles are in radians, measured from the positive x-axis; a positive
//! sweep turns counter-clockwise in the y-up user space.

use crate::geometry::Point;
use crate::units::Length;
use kurbo::{BezPath, Vec2};
use std::fmt;

/// Flattening tolerance (in points) used when lowering arcs to cubics.
const ARC_TOLERANCE: f64 = 0.01;

/// One step of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathComponent {
    /// Start a new sub-path at the position.
    Move(Point),
    /// Straight segment from the current point to the position.
    Line(Point),
    /// Circular arc. The start point is joined to the current point with a line.
    Arc {
        center: Point,
        radius: Length,
        start: f64,
        sweep: f64,
    },
    /// Close the current sub-path.
    Close,
}

impl fmt::Display for PathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathComponent::Move(p) => write!(f, "Move({}, {})", p.x, p.y),
            PathComponent::Line(p) => write!(f, "Line({}, {})", p.x, p.y),
            PathComponent::Arc {
                center,
                radius,
                start,
                sweep,
            } => write!(
                f,
                "Arc({}, {}, {}, {}, {})",
                center.x, center.y, radius, start, sweep
            ),
            PathComponent::Close => write!(f, "Close"),
        }
    }
}

/// An ordered sequence of path components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path(pub Vec<PathComponent>);

impl Path {
    /// Create an empty path.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a move to `p`.
    pub fn move_to(&mut self, p: Point) {
        self.0.push(PathComponent::Move(p));
    }

    /// Append a line to `p`.
    pub fn line_to(&mut self, p: Point) {
        self.0.push(PathComponent::Line(p));
    }

    /// Append a circular arc.
    pub fn arc(&mut self, center: Point, radius: Length, start: f64, sweep: f64) {
        self.0.push(PathComponent::Arc {
            center,
            radius,
            start,
            sweep,
        });
    }

    /// Close the current sub-path.
    pub fn close(&mut self) {
        self.0.push(PathComponent::Close);
    }

    /// The components in order.
    pub fn components(&self) -> &[PathComponent] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lower the path to a kurbo Bézier path in user space, approximating
    /// arcs with cubic curves.
    pub fn to_bezpath(&self) -> BezPath {
        let mut out = BezPath::new();
        let mut current: Option<kurbo::Point> = None;
        let mut subpath_start: Option<kurbo::Point> = None;

        for comp in &self.0 {
            match *comp {
                PathComponent::Move(p) => {
                    let p = p.to_kurbo();
                    out.move_to(p);
                    current = Some(p);
                    subpath_start = Some(p);
                }
                PathComponent::Line(p) => {
                    let p = p.to_kurbo();
                    if begin_segment(&mut out, &mut current, &mut subpath_start, p) {
                        out.line_to(p);
                    }
                    current = Some(p);
                }
                PathComponent::Arc {
                    center,
                    radius,
                    start,
                    sweep,
                } => {
                    let c = center.to_kurbo();
                    let r = radius.0;
                    let from = c + Vec2::new(r * start.cos(), r * start.sin());
                    if begin_segment(&mut out, &mut current, &mut subpath_start, from) {
                        out.line_to(from);
                    }
                    let arc = kurbo::Arc {
                        center: c,
                        radii: Vec2::new(r, r),
                        start_angle: start,
                        sweep_angle: sweep,
                        x_rotation: 0.0,
                    };
                    for el in arc.append_iter(ARC_TOLERANCE) {
                        out.push(el);
                    }
                    let end = start + sweep;
                    current = Some(c + Vec2::new(r * end.cos(), r * end.sin()));
                }
                PathComponent::Close => {
                    if current.is_some() {
                        out.close_path();
                    }
                    current = None;
                }
            }
        }
        out
    }
}

/// Make sure a sub-path is open before a segment ending at `to`.
///
/// Returns false when the segment itself became the sub-path start, in which
/// case no connecting line must be drawn.
fn begin_segment(
    out: &mut BezPath,
    current: &mut Option<kurbo::Point>,
    subpath_start: &mut Option<kurbo::Point>,
    to: kurbo::Point,
) -> bool {
    if current.is_some() {
        return true;
    }
    match *subpath_start {
        Some(restart) => {
            out.move_to(restart);
            *current = Some(restart);
            true
        }
        None => {
            out.move_to(to);
            *subpath_start = Some(to);
            *current = Some(to);
            false
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, comp) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", comp)?;
        }
        write!(f, "]")
    }
}

impl FromIterator<PathComponent> for Path {
    fn from_iter<I: IntoIterator<Item = PathComponent>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl IntoIterator for Path {
    type Item = PathComponent;
    type IntoIter = std::vec::IntoIter<PathComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathComponent;
    type IntoIter = std::slice::Iter<'a, PathComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
