use std::fmt;

/// Integer point in window pixels (top-left origin).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rectangle anchored at the origin with this size.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Half-open rectangle: contains points with `min.x <= x < max.x` and `min.y <= y < max.y`.
///
/// A rectangle with `max <= min` on either axis is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Rectangle of `size` whose top-left corner is `origin`.
    #[inline]
    pub fn from_origin(origin: Point, width: i32, height: i32) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x.saturating_add(width),
            origin.y.saturating_add(height),
        )
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x < self.max.x && self.min.y <= p.y && p.y < self.max.y
    }

    /// Largest rectangle contained by both. Empty inputs give `Rect::default()`.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        );
        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }

    /// Four strips of `width` pixels lining the inside edge of `self`:
    /// top, bottom, left, right. Left/right strips exclude the corners
    /// already covered by top/bottom.
    pub fn border(&self, width: i32) -> [Rect; 4] {
        let w = width.max(0);
        let top = Rect::new(self.min.x, self.min.y, self.max.x, (self.min.y + w).min(self.max.y));
        let bottom = Rect::new(self.min.x, (self.max.y - w).max(top.max.y), self.max.x, self.max.y);
        let left = Rect::new(self.min.x, top.max.y, (self.min.x + w).min(self.max.x), bottom.min.y);
        let right = Rect::new((self.max.x - w).max(left.max.x), top.max.y, self.max.x, bottom.min.y);
        [top, bottom, left, right]
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
