//! Error types for configuration and per-frame processing.

use crate::fit::FitError;
use crate::types::EdgePoint;

/// Rejected detector configuration. Fatal to that configuration; the caller
/// must reconfigure before processing frames.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// ROI width or height was non-positive or non-finite.
    InvalidRoi { width: f64, height: f64 },
    /// Segment width or step was zero.
    InvalidSegmentGeometry { segment_width: usize, step: usize },
    /// The segment schedule produced zero segments.
    NoSegments {
        roi_height: usize,
        start_offset: usize,
        segment_width: usize,
        step: usize,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidRoi { width, height } => {
                write!(f, "invalid ROI dimensions {width}x{height}")
            }
            ConfigError::InvalidSegmentGeometry {
                segment_width,
                step,
            } => write!(
                f,
                "segment width ({segment_width}) and step ({step}) must be non-zero"
            ),
            ConfigError::NoSegments {
                roi_height,
                start_offset,
                segment_width,
                step,
            } => write!(
                f,
                "schedule yields no segments (roi_height={roi_height}, \
                 start_offset={start_offset}, segment_width={segment_width}, step={step})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Per-frame processing failure.
///
/// A failed line fit is recoverable: the collected edge points travel with
/// the error so the caller can still render them and treat the frame as
/// "no edge found".
#[derive(Clone, Debug)]
pub enum ProcessError {
    /// The supplied image does not match the configured dimensions.
    ImageSizeMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// The robust line fit failed; edge points collected this frame attached.
    Fit {
        source: FitError,
        edge_points: Vec<EdgePoint>,
    },
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessError::ImageSizeMismatch { expected, got } => write!(
                f,
                "image size {}x{} does not match configured {}x{}",
                got.0, got.1, expected.0, expected.1
            ),
            ProcessError::Fit {
                source,
                edge_points,
            } => write!(
                f,
                "line fit failed with {} edge points: {source}",
                edge_points.len()
            ),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Fit { source, .. } => Some(source),
            _ => None,
        }
    }
}
