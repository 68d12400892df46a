//! Rigid mapping between ROI-local coordinates and image coordinates.
//!
//! A [`RotatedRect`] describes the caliper ROI as placed by the operator; a
//! [`RoiTransform`] carries the 2×3 affine that maps ROI-local points (the
//! unrotated rectangle footprint) into image space. Rotating by `-angle`
//! compensates for the ROI's own rotation so that ROI-local horizontal scans
//! run perpendicular to the expected edge.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Rotated rectangular region of interest.
///
/// `angle_deg` is positive counter-clockwise in image coordinates.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct RotatedRect {
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
    pub angle_deg: f64,
}

impl RotatedRect {
    pub fn new(cx: f64, cy: f64, width: f64, height: f64, angle_deg: f64) -> Self {
        Self {
            cx,
            cy,
            width,
            height,
            angle_deg,
        }
    }

    /// Left edge of the unrotated footprint.
    #[inline]
    pub fn left(&self) -> f64 {
        self.cx - self.width * 0.5
    }

    /// Top edge of the unrotated footprint.
    #[inline]
    pub fn top(&self) -> f64 {
        self.cy - self.height * 0.5
    }

    /// The four corners in image space, in top-left, top-right, bottom-right,
    /// bottom-left order. Exposed as plain data for overlay rendering.
    pub fn corners(&self) -> [[f64; 2]; 4] {
        let t = RoiTransform::new(self.cx, self.cy, self.angle_deg);
        let (l, tp) = (self.left(), self.top());
        let (r, b) = (l + self.width, tp + self.height);
        let map = |x: f64, y: f64| {
            let (px, py) = t.apply(x, y);
            [px, py]
        };
        [map(l, tp), map(r, tp), map(r, b), map(l, b)]
    }
}

/// 2×3 affine mapping ROI-local coordinates to image coordinates, stored in
/// homogeneous form. Equivalent to rotating by `-angle_deg` about the ROI
/// center with unit scale.
#[derive(Clone, Copy, Debug)]
pub struct RoiTransform {
    m: Matrix3<f64>,
}

impl RoiTransform {
    pub fn new(cx: f64, cy: f64, angle_deg: f64) -> Self {
        let theta = (-angle_deg).to_radians();
        let (a, b) = (theta.cos(), theta.sin());
        #[rustfmt::skip]
        let m = Matrix3::new(
            a,   b,   (1.0 - a) * cx - b * cy,
            -b,  a,   b * cx + (1.0 - a) * cy,
            0.0, 0.0, 1.0,
        );
        Self { m }
    }

    /// Map a ROI-local point into image coordinates.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.m * Vector3::new(x, y, 1.0);
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_angle_is_identity() {
        let t = RoiTransform::new(10.0, 20.0, 0.0);
        let (x, y) = t.apply(3.25, -7.5);
        assert!(approx_eq(x, 3.25));
        assert!(approx_eq(y, -7.5));
    }

    #[test]
    fn center_is_fixed_point() {
        let t = RoiTransform::new(42.0, 17.0, 33.7);
        let (x, y) = t.apply(42.0, 17.0);
        assert!(approx_eq(x, 42.0));
        assert!(approx_eq(y, 17.0));
    }

    #[test]
    fn quarter_turn_moves_axis_point() {
        // A +90° ROI angle rotates local points by -90°, mapping (1, 0)
        // onto (0, 1) in image coordinates (y grows downward).
        let t = RoiTransform::new(0.0, 0.0, 90.0);
        let (x, y) = t.apply(1.0, 0.0);
        assert!(approx_eq(x, 0.0));
        assert!(approx_eq(y, 1.0));
    }

    #[test]
    fn corners_of_axis_aligned_rect() {
        let roi = RotatedRect::new(50.0, 40.0, 20.0, 10.0, 0.0);
        let c = roi.corners();
        assert!(approx_eq(c[0][0], 40.0) && approx_eq(c[0][1], 35.0));
        assert!(approx_eq(c[2][0], 60.0) && approx_eq(c[2][1], 45.0));
    }
}
