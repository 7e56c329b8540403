use std::fmt;

/// Stable identifier of a circle inside one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CircleId(pub u64);

impl CircleId {
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for CircleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point in image (data) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Point in device (screen) coordinates, as delivered by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One annotated circle. Rows of the persisted table map 1:1 onto these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleRecord {
    pub id: CircleId,
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl CircleRecord {
    pub const fn center(&self) -> DataPoint {
        DataPoint::new(self.x, self.y)
    }

    /// Closed-disk containment test.
    pub fn contains(&self, p: DataPoint) -> bool {
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        dx.mul_add(dx, dy * dy) <= self.r * self.r
    }
}

/// Circle whose diameter runs from `a` to `b`: returns `(center, radius)`.
pub fn circle_from_diameter(a: DataPoint, b: DataPoint) -> (DataPoint, f64) {
    (a.midpoint(b), a.distance(b) / 2.0)
}
