//! Per-frame profile buffers, reused across frames to avoid repeated
//! allocations in the hot path.
//!
//! All four buffers live in the ROI-local frame; values outside a
//! representative row are unused and stay zero. The buffers are mutated on
//! every `process` call, so a detector instance must not run concurrent
//! frames without external serialization.

use crate::image::ImageF32;

pub struct ProfileWorkspace {
    /// Bilinear samples at every active ROI row.
    pub(crate) sampled: ImageF32,
    /// Segment means, populated only at representative rows.
    pub(crate) mean: ImageF32,
    /// Smoothed representative rows.
    pub(crate) filtered: ImageF32,
    /// Central-difference derivative of the filtered rows.
    pub(crate) derivative: ImageF32,
}

impl ProfileWorkspace {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            sampled: ImageF32::new(width, height),
            mean: ImageF32::new(width, height),
            filtered: ImageF32::new(width, height),
            derivative: ImageF32::new(width, height),
        }
    }

    /// Re-zero every buffer ahead of a new frame.
    pub fn reset(&mut self) {
        self.sampled.fill_zero();
        self.mean.fill_zero();
        self.filtered.fill_zero();
        self.derivative.fill_zero();
    }
}
