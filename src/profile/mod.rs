//! Profile smoothing and derivative-based sub-pixel peak detection.

pub mod filter;
pub mod peaks;

pub use filter::GaussianKernel;
pub use peaks::{derivative_row, find_row_peak, PeakHit};
