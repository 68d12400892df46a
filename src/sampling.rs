//! ROI sampling grid and bilinear intensity lookup.
//!
//! The grid is precomputed once per ROI configuration: for every ROI-local
//! (row, col) cell it stores the image-space coordinate produced by the ROI
//! transform. Per frame, the detector reads intensities at those coordinates
//! with bilinear interpolation.

use crate::geometry::RoiTransform;
use crate::image::ImageU8;

/// Precomputed image-space coordinates for every ROI-local (row, col) cell.
///
/// Coordinates are computed in f64 and stored as f32; the grid is immutable
/// after construction and shared by all frames of a configuration.
#[derive(Clone, Debug)]
pub struct SamplingGrid {
    width: usize,
    height: usize,
    coords: Vec<[f32; 2]>,
}

impl SamplingGrid {
    /// Build the grid for a ROI whose unrotated footprint starts at
    /// `(left, top)` and spans `width × height` cells.
    pub fn new(left: f64, top: f64, width: usize, height: usize, transform: &RoiTransform) -> Self {
        let mut coords = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let (x, y) = transform.apply(left + col as f64, top + row as f64);
                coords.push([x as f32, y as f32]);
            }
        }
        Self {
            width,
            height,
            coords,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Image-space coordinate of a ROI-local cell.
    #[inline]
    pub fn coord(&self, row: usize, col: usize) -> [f32; 2] {
        self.coords[row * self.width + col]
    }

    /// Coordinates of one ROI-local row.
    #[inline]
    pub fn row(&self, row: usize) -> &[[f32; 2]] {
        let start = row * self.width;
        &self.coords[start..start + self.width]
    }
}

/// Bilinear intensity lookup at a fractional image coordinate.
///
/// Returns `None` when any of the four integer corners falls outside the
/// image; callers treat such samples as zero and exclude them downstream.
/// At exact integer coordinates the blend degenerates to the pixel value.
#[inline]
pub fn bilinear_sample(image: &ImageU8<'_>, x: f32, y: f32) -> Option<f32> {
    if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return None;
    }
    let xf = x.floor();
    let yf = y.floor();
    let x1 = xf as usize;
    let y1 = yf as usize;
    if x1 + 1 >= image.w || y1 + 1 >= image.h {
        return None;
    }
    let q11 = image.get(x1, y1) as f32;
    let q21 = image.get(x1 + 1, y1) as f32;
    let q12 = image.get(x1, y1 + 1) as f32;
    let q22 = image.get(x1 + 1, y1 + 1) as f32;

    let tx = x - xf;
    let ty = y - yf;
    let top = q11 * (1.0 - tx) + q21 * tx;
    let bottom = q12 * (1.0 - tx) + q22 * tx;
    Some(top * (1.0 - ty) + bottom * ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RoiTransform;

    fn gradient_image(data: &mut Vec<u8>, w: usize, h: usize) -> ImageU8<'_> {
        data.clear();
        for y in 0..h {
            for x in 0..w {
                data.push((x * 10 + y) as u8);
            }
        }
        ImageU8::new(w, h, data)
    }

    #[test]
    fn integer_coordinates_are_exact() {
        let mut buf = Vec::new();
        let img = gradient_image(&mut buf, 8, 8);
        let v = bilinear_sample(&img, 3.0, 2.0).unwrap();
        assert_eq!(v, 32.0);
    }

    #[test]
    fn midpoint_blends_four_corners() {
        let mut buf = Vec::new();
        let img = gradient_image(&mut buf, 8, 8);
        // Corners 32, 42, 33, 43 -> mean 37.5
        let v = bilinear_sample(&img, 3.5, 2.5).unwrap();
        assert!((v - 37.5).abs() < 1e-5);
    }

    #[test]
    fn out_of_bounds_returns_none() {
        let mut buf = Vec::new();
        let img = gradient_image(&mut buf, 8, 8);
        assert!(bilinear_sample(&img, -0.5, 2.0).is_none());
        assert!(bilinear_sample(&img, 2.0, -0.1).is_none());
        // x1 + 1 out of range even though x is inside the last pixel.
        assert!(bilinear_sample(&img, 7.2, 3.0).is_none());
        assert!(bilinear_sample(&img, 3.0, 7.0).is_none());
        assert!(bilinear_sample(&img, f32::NAN, 3.0).is_none());
    }

    #[test]
    fn grid_matches_transform() {
        let t = RoiTransform::new(16.0, 12.0, 30.0);
        let grid = SamplingGrid::new(10.0, 8.0, 12, 8, &t);
        let (x, y) = t.apply(10.0 + 5.0, 8.0 + 3.0);
        let c = grid.coord(3, 5);
        assert!((c[0] - x as f32).abs() < 1e-4);
        assert!((c[1] - y as f32).abs() < 1e-4);
    }
}
