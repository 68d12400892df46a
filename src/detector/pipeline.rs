//! Caliper detector: configuration-time precompute plus the per-frame
//! processing pipeline.
//!
//! Construction validates the configuration and precomputes everything that
//! does not depend on pixel data (ROI transform, sampling grid, segment
//! schedule, filter kernel). `process` then runs the five per-frame stages:
//! sample, aggregate, smooth, differentiate + pick peaks, fit.

use crate::detector::params::EdgeDetectionConfig;
use crate::detector::workspace::ProfileWorkspace;
use crate::error::{ConfigError, ProcessError};
use crate::fit::fit_line;
use crate::geometry::{RoiTransform, RotatedRect};
use crate::image::{ImageF32, ImageU8, ImageView, ImageViewMut};
use crate::profile::{derivative_row, find_row_peak, GaussianKernel};
use crate::sampling::{bilinear_sample, SamplingGrid};
use crate::segments::SegmentSchedule;
use crate::types::{CaliperResult, EdgePoint};
use log::debug;
use std::time::Instant;

/// Smallest usable grid extent; the peak scan needs two guard columns on
/// each side and a segment needs at least one row.
const MIN_GRID_DIM: usize = 3;

/// Sub-pixel 1D edge detector over a rotated rectangular ROI.
///
/// A detector is bound to one image geometry and one ROI placement; build a
/// new one when either changes. `process` reuses internal buffers, so a
/// single instance handles a frame stream without per-frame allocation
/// beyond the output edge points.
pub struct CaliperDetector {
    image_width: usize,
    image_height: usize,
    roi: RotatedRect,
    config: EdgeDetectionConfig,
    transform: RoiTransform,
    grid: SamplingGrid,
    schedule: SegmentSchedule,
    kernel: Option<GaussianKernel>,
    workspace: ProfileWorkspace,
}

impl CaliperDetector {
    /// Validate the configuration and precompute the per-ROI state.
    pub fn new(
        image_width: usize,
        image_height: usize,
        roi: RotatedRect,
        config: EdgeDetectionConfig,
    ) -> Result<Self, ConfigError> {
        if config.segment_width == 0 || config.step == 0 {
            return Err(ConfigError::InvalidSegmentGeometry {
                segment_width: config.segment_width,
                step: config.step,
            });
        }
        let dims_ok = roi.width.is_finite()
            && roi.height.is_finite()
            && roi.width > 0.0
            && roi.height > 0.0
            && roi.cx.is_finite()
            && roi.cy.is_finite()
            && roi.angle_deg.is_finite();
        if !dims_ok {
            return Err(ConfigError::InvalidRoi {
                width: roi.width,
                height: roi.height,
            });
        }

        let grid_w = (roi.width.round() as usize).max(MIN_GRID_DIM);
        let grid_h = (roi.height.round() as usize).max(MIN_GRID_DIM);

        let transform = RoiTransform::new(roi.cx, roi.cy, roi.angle_deg);
        let grid = SamplingGrid::new(roi.left(), roi.top(), grid_w, grid_h, &transform);
        let schedule = SegmentSchedule::new(
            grid_h,
            config.segment_width,
            config.start_offset,
            config.step,
            config.segment_count_max,
        );
        if schedule.count() == 0 {
            return Err(ConfigError::NoSegments {
                roi_height: grid_h,
                start_offset: config.start_offset,
                segment_width: config.segment_width,
                step: config.step,
            });
        }
        let kernel = GaussianKernel::new(config.filter_size, config.filter_sigma);

        debug!(
            "caliper configured: grid {grid_w}x{grid_h}, {} segments, filter {}",
            schedule.count(),
            kernel.as_ref().map_or(0, GaussianKernel::len),
        );

        Ok(Self {
            image_width,
            image_height,
            roi,
            config,
            transform,
            grid,
            schedule,
            kernel,
            workspace: ProfileWorkspace::new(grid_w, grid_h),
        })
    }

    /// Run the detector on one frame.
    ///
    /// On a failed line fit the edge points gathered this frame travel with
    /// the error, so a "no edge" frame still yields renderable hits.
    pub fn process(&mut self, image: &ImageU8<'_>) -> Result<CaliperResult, ProcessError> {
        if image.w != self.image_width || image.h != self.image_height {
            return Err(ProcessError::ImageSizeMismatch {
                expected: (self.image_width, self.image_height),
                got: (image.w, image.h),
            });
        }
        let started = Instant::now();
        self.workspace.reset();

        self.sample_active_rows(image);
        self.accumulate_segments();
        self.smooth_rep_rows();
        let edge_points = self.collect_edge_points();

        let points: Vec<[f32; 2]> = edge_points.iter().map(|p| [p.x, p.y]).collect();
        let line = fit_line(&points, &self.config.fit).map_err(|source| ProcessError::Fit {
            source,
            edge_points: edge_points.clone(),
        })?;

        let latency_ms = started.elapsed().as_secs_f64() * 1e3;
        debug!(
            "caliper frame: {} / {} segments produced edge points, {:.3} ms",
            edge_points.len(),
            self.schedule.count(),
            latency_ms,
        );
        Ok(CaliperResult {
            edge_points,
            line,
            latency_ms,
        })
    }

    /// Bilinear-sample every row that feeds at least one segment. Samples
    /// falling outside the image read as zero.
    fn sample_active_rows(&mut self, image: &ImageU8<'_>) {
        let grid = &self.grid;
        let schedule = &self.schedule;
        let sampled = &mut self.workspace.sampled;

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            sampled
                .data
                .par_chunks_mut(grid.width())
                .enumerate()
                .for_each(|(row, dst)| {
                    if schedule.is_active_row(row) {
                        sample_row(image, grid.row(row), dst);
                    }
                });
        }
        #[cfg(not(feature = "parallel"))]
        for row in 0..grid.height() {
            if schedule.is_active_row(row) {
                sample_row(image, grid.row(row), sampled.row_mut(row));
            }
        }
    }

    /// Average each segment's rows into its representative profile row.
    fn accumulate_segments(&mut self) {
        let schedule = &self.schedule;
        let sampled = &self.workspace.sampled;
        let mean = &mut self.workspace.mean;
        let inv = 1.0 / schedule.segment_width() as f32;

        for n in 0..schedule.count() {
            let rep = schedule.rep_row(n);
            let dst = mean.row_mut(rep);
            for row in schedule.rows(n) {
                for (d, &s) in dst.iter_mut().zip(sampled.row(row)) {
                    *d += s;
                }
            }
            for d in dst.iter_mut() {
                *d *= inv;
            }
        }
    }

    /// Gaussian-smooth each representative row, or copy it through when the
    /// filter is disabled.
    fn smooth_rep_rows(&mut self) {
        let mean = &self.workspace.mean;
        let filtered = &mut self.workspace.filtered;
        for &rep in self.schedule.rep_rows() {
            match &self.kernel {
                Some(k) => k.smooth_row(mean.row(rep), filtered.row_mut(rep)),
                None => filtered.row_mut(rep).copy_from_slice(mean.row(rep)),
            }
        }
    }

    /// Differentiate each representative row, pick its peak and map the hit
    /// into image coordinates.
    fn collect_edge_points(&mut self) -> Vec<EdgePoint> {
        let filtered = &self.workspace.filtered;
        let derivative = &mut self.workspace.derivative;
        let (left, top) = (self.roi.left(), self.roi.top());
        let mut edge_points = Vec::with_capacity(self.schedule.count());

        for &rep in self.schedule.rep_rows() {
            derivative_row(filtered.row(rep), derivative.row_mut(rep));
            let hit = match find_row_peak(
                derivative.row(rep),
                self.config.trace,
                self.config.transition,
                self.config.threshold,
            ) {
                Some(h) => h,
                None => continue,
            };
            let (x, y) = self.transform.apply(left + hit.col, top + rep as f64);
            edge_points.push(EdgePoint {
                x: x as f32,
                y: y as f32,
                strength: hit.strength as f32,
            });
        }
        edge_points
    }

    /// ROI corners in image space, for overlay rendering.
    pub fn roi_corners(&self) -> [[f64; 2]; 4] {
        self.roi.corners()
    }

    /// The most recent frame's unrotated ROI samples, for debug dumps.
    pub fn sampled_roi(&self) -> &ImageF32 {
        &self.workspace.sampled
    }

    /// Number of scheduled segments.
    pub fn segment_count(&self) -> usize {
        self.schedule.count()
    }

    pub fn config(&self) -> &EdgeDetectionConfig {
        &self.config
    }

    pub fn roi(&self) -> &RotatedRect {
        &self.roi
    }
}

fn sample_row(image: &ImageU8<'_>, coords: &[[f32; 2]], dst: &mut [f32]) {
    for (v, c) in dst.iter_mut().zip(coords) {
        *v = bilinear_sample(image, c[0], c[1]).unwrap_or(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roi() -> RotatedRect {
        RotatedRect::new(50.0, 50.0, 40.0, 30.0, 0.0)
    }

    #[test]
    fn zero_step_is_rejected() {
        let cfg = EdgeDetectionConfig {
            step: 0,
            ..Default::default()
        };
        assert!(matches!(
            CaliperDetector::new(100, 100, roi(), cfg),
            Err(ConfigError::InvalidSegmentGeometry { step: 0, .. })
        ));
    }

    #[test]
    fn non_positive_roi_is_rejected() {
        let bad = RotatedRect::new(50.0, 50.0, -4.0, 30.0, 0.0);
        assert!(matches!(
            CaliperDetector::new(100, 100, bad, EdgeDetectionConfig::default()),
            Err(ConfigError::InvalidRoi { .. })
        ));
        let nan = RotatedRect::new(50.0, 50.0, 40.0, f64::NAN, 0.0);
        assert!(matches!(
            CaliperDetector::new(100, 100, nan, EdgeDetectionConfig::default()),
            Err(ConfigError::InvalidRoi { .. })
        ));
    }

    #[test]
    fn empty_schedule_is_rejected() {
        let cfg = EdgeDetectionConfig {
            start_offset: 100,
            ..Default::default()
        };
        assert!(matches!(
            CaliperDetector::new(100, 100, roi(), cfg),
            Err(ConfigError::NoSegments { .. })
        ));
    }

    #[test]
    fn tiny_roi_is_clamped_to_usable_grid() {
        let small = RotatedRect::new(50.0, 50.0, 1.0, 1.0, 0.0);
        let cfg = EdgeDetectionConfig {
            segment_width: 1,
            step: 1,
            ..Default::default()
        };
        let det = CaliperDetector::new(100, 100, small, cfg).unwrap();
        assert_eq!(det.segment_count(), 3);
    }

    #[test]
    fn mismatched_frame_size_is_rejected() {
        let mut det =
            CaliperDetector::new(100, 100, roi(), EdgeDetectionConfig::default()).unwrap();
        let data = vec![0u8; 80 * 100];
        let img = ImageU8::new(80, 100, &data);
        assert!(matches!(
            det.process(&img),
            Err(ProcessError::ImageSizeMismatch { .. })
        ));
    }
}
