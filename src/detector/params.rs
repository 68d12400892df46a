//! Parameter types configuring the caliper detector.
//!
//! Defaults follow common inspection practice: 3-row segments every 3 rows,
//! a 5-tap Gaussian profile filter and a Tukey-weighted robust fit. For
//! tuning, start with `threshold` and the segment schedule.

use crate::fit::FitOptions;
use serde::{Deserialize, Serialize};

/// Scan order along the ROI-local x axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum TraceDirection {
    /// Visit columns left to right.
    #[default]
    Forward,
    /// Visit columns right to left.
    Reverse,
}

/// Intensity transition polarity that qualifies as an edge.
///
/// Polarity is defined by the sign of the profile derivative
/// `filtered[c-1] - filtered[c+1]`: `BrightToDark` accepts negative
/// derivative extrema, `DarkToBright` positive ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum TransitionDirection {
    #[default]
    BrightToDark,
    DarkToBright,
    /// Accept either polarity.
    Both,
}

/// Caliper edge-detection configuration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct EdgeDetectionConfig {
    pub trace: TraceDirection,
    pub transition: TransitionDirection,
    /// Rows averaged into one representative profile row.
    pub segment_width: usize,
    /// First ROI row included in the schedule.
    pub start_offset: usize,
    /// Spacing between segment start rows.
    pub step: usize,
    /// Upper bound on the segment count; -1 leaves it unbounded.
    pub segment_count_max: i64,
    /// Minimum derivative magnitude for an accepted edge.
    pub threshold: f32,
    /// Profile filter width; values <= 1 disable smoothing.
    pub filter_size: usize,
    /// Gaussian standard deviation of the profile filter.
    pub filter_sigma: f64,
    /// Robust line-fit options.
    pub fit: FitOptions,
}

impl Default for EdgeDetectionConfig {
    fn default() -> Self {
        Self {
            trace: TraceDirection::Forward,
            transition: TransitionDirection::BrightToDark,
            segment_width: 3,
            start_offset: 0,
            step: 3,
            segment_count_max: -1,
            threshold: 10.0,
            filter_size: 5,
            filter_sigma: 1.0,
            fit: FitOptions::default(),
        }
    }
}
