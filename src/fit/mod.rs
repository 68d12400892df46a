//! Outlier-robust 2D line fitting.
//!
//! [`fit_line`] fits a line through a point set using iteratively
//! reweighted least squares with a choice of M-estimator, combined with
//! randomized multi-start: each restart seeds the weights from a small
//! random subsample, and the fit with the lowest residual sum over all
//! points wins. The random generator is threaded explicitly through
//! [`FitOptions::seed`] so results are reproducible.

pub mod estimators;
mod irls;

pub use estimators::DistanceType;

use crate::types::FittedLine;
use serde::{Deserialize, Serialize};

/// Options for [`fit_line`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct FitOptions {
    /// M-estimator selecting the residual weighting.
    pub dist: DistanceType,
    /// Estimator scale; 0 selects the estimator's built-in constant.
    pub param: f32,
    /// Point-shift convergence tolerance (pixels); 0 selects 1.0.
    pub reps: f32,
    /// Angular convergence tolerance (radians); 0 selects 0.01.
    pub aeps: f32,
    /// Seed for the multi-start subsampling generator.
    pub seed: u64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            dist: DistanceType::Tukey,
            param: 0.0,
            reps: 0.0,
            aeps: 0.0,
            seed: u64::MAX,
        }
    }
}

/// Line-fit failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitError {
    /// The input point set was empty.
    InsufficientPoints,
    /// The point scatter has no dominant direction (e.g. coincident points).
    DegenerateFit,
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::InsufficientPoints => write!(f, "no points to fit a line through"),
            FitError::DegenerateFit => write!(f, "point scatter is degenerate"),
        }
    }
}

impl std::error::Error for FitError {}

/// Fit a 2D line through `points`, robust to a fraction of outliers.
pub fn fit_line(points: &[[f32; 2]], opts: &FitOptions) -> Result<FittedLine, FitError> {
    irls::fit_line_impl(points, opts)
}
