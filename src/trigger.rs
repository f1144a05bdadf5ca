//! Sweep/object contact test that decides when to ping.
//!
//! The test is coarse: an object counts as touched when it lies inside the
//! axis-aligned box spanned by the radar centre and the sweep tip. Near the axes the box
//! collapses to a thin strip (under-triggering), and away from them it covers far more than
//! the sweep line (over-triggering). An object at the centre is inside the box for every
//! angle and therefore pings on every tick.

use serde::{Deserialize, Serialize};

/// Sweep line state for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sweep {
    pub angle_degrees: f32,
    pub radius: f32,
}

impl Sweep {
    pub fn new(angle_degrees: f32, radius: f32) -> Self {
        Self { angle_degrees, radius }
    }

    /// End point of the sweep line relative to the radar centre.
    pub fn tip(&self) -> (f32, f32) {
        let rad = self.angle_degrees.to_radians();
        (self.radius * rad.cos(), self.radius * rad.sin())
    }
}

/// Object position relative to the radar centre.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Is `value` between 0 and `bound` inclusive, whichever sign `bound` has.
pub fn within_span(value: f32, bound: f32) -> bool {
    if bound < 0.0 {
        value >= bound && value <= 0.0
    } else {
        value >= 0.0 && value <= bound
    }
}

fn inside_box((lx, ly): (f32, f32), point: &Point) -> bool {
    within_span(point.x, lx) && within_span(point.y, ly)
}

/// Single-object form of `sweep_hits`.
pub fn touches(sweep: &Sweep, point: &Point) -> bool {
    inside_box(sweep.tip(), point)
}

/// True if any object is touched by the sweep this tick.
pub fn sweep_hits<'a, I>(sweep: &Sweep, positions: I) -> bool
where
    I: IntoIterator<Item = &'a Point>,
{
    let tip = sweep.tip();
    positions.into_iter().any(|p| inside_box(tip, p))
}
