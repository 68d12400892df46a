use serde::Serialize;

/// Single sub-pixel edge hit in image coordinates.
///
/// `strength` is the signed derivative value at the refined peak; its sign
/// encodes the transition polarity under the `filtered[c-1] - filtered[c+1]`
/// convention.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgePoint {
    pub x: f32,
    pub y: f32,
    pub strength: f32,
}

/// Fitted 2D line in normal form: `a·x + b·y + c = 0` with `a² + b² = 1`.
///
/// `(cx, cy)` is a point on the line (the weighted centroid of the final
/// fit), from which `c` is derived.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FittedLine {
    pub a: f32,
    pub b: f32,
    pub cx: f32,
    pub cy: f32,
}

impl FittedLine {
    /// Offset term of the implicit form `a·x + b·y + c = 0`.
    #[inline]
    pub fn c(&self) -> f32 {
        -(self.a * self.cx + self.b * self.cy)
    }

    /// Unit direction along the line.
    #[inline]
    pub fn direction(&self) -> (f32, f32) {
        (-self.b, self.a)
    }

    /// Signed perpendicular distance from a point to the line.
    #[inline]
    pub fn signed_distance(&self, x: f32, y: f32) -> f32 {
        self.a * (x - self.cx) + self.b * (y - self.cy)
    }
}

/// Per-frame detection output: the accumulated edge hits and the robust line
/// fitted through them.
#[derive(Clone, Debug, Serialize)]
pub struct CaliperResult {
    pub edge_points: Vec<EdgePoint>,
    pub line: FittedLine,
    pub latency_ms: f64,
}
