//! M-estimator weight functions for the robust line fitter.

use serde::{Deserialize, Serialize};

const EPS: f32 = 1e-6;

/// Residual weighting scheme used by the iteratively reweighted fit.
///
/// `L2` performs a single unweighted least-squares fit with no IRLS loop.
/// The remaining estimators down-weight large residuals; their default
/// scale constants follow the classic tuning values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum DistanceType {
    L2,
    L1,
    /// L1-L2 hybrid.
    L12,
    Fair,
    Welsch,
    Huber,
    #[default]
    Tukey,
}

impl DistanceType {
    /// Convert non-negative residual distances into weights. `param` is the
    /// estimator scale; zero (or negative where noted) selects the built-in
    /// default constant.
    pub(crate) fn compute_weights(self, dist: &[f32], param: f32, w: &mut [f32]) {
        debug_assert_eq!(dist.len(), w.len());
        match self {
            DistanceType::L2 => w.fill(1.0),
            DistanceType::L1 => {
                for (wi, &d) in w.iter_mut().zip(dist) {
                    *wi = 1.0 / d.abs().max(EPS);
                }
            }
            DistanceType::L12 => {
                for (wi, &d) in w.iter_mut().zip(dist) {
                    *wi = 1.0 / (1.0 + (d as f64 * d as f64 * 0.5)).sqrt() as f32;
                }
            }
            DistanceType::Fair => {
                let c = if param == 0.0 { 1.0 / 1.3998 } else { 1.0 / param };
                for (wi, &d) in w.iter_mut().zip(dist) {
                    *wi = 1.0 / (1.0 + d * c);
                }
            }
            DistanceType::Welsch => {
                let c = if param == 0.0 { 1.0 / 2.9846 } else { 1.0 / param };
                for (wi, &d) in w.iter_mut().zip(dist) {
                    *wi = (-d * d * c * c).exp();
                }
            }
            DistanceType::Huber => {
                let c = if param <= 0.0 { 1.345 } else { param };
                for (wi, &d) in w.iter_mut().zip(dist) {
                    *wi = if d < c { 1.0 } else { c / d };
                }
            }
            DistanceType::Tukey => {
                let c = if param == 0.0 { 1.0 } else { param };
                for (wi, &d) in w.iter_mut().zip(dist) {
                    *wi = if d < c {
                        let t = 1.0 - (d / c) * (d / c);
                        t * t
                    } else {
                        0.0
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(dist: &[f32], ty: DistanceType, param: f32) -> Vec<f32> {
        let mut w = vec![0.0; dist.len()];
        ty.compute_weights(dist, param, &mut w);
        w
    }

    #[test]
    fn huber_weight_basic() {
        let w = weights(&[0.5, 1.345, 2.69], DistanceType::Huber, 0.0);
        assert!((w[0] - 1.0).abs() < 1e-6);
        assert!((w[2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn tukey_cuts_off_beyond_scale() {
        let w = weights(&[0.0, 0.5, 1.0, 5.0], DistanceType::Tukey, 1.0);
        assert!((w[0] - 1.0).abs() < 1e-6);
        assert!((w[1] - 0.5625).abs() < 1e-6); // (1 - 0.25)^2
        assert_eq!(w[2], 0.0);
        assert_eq!(w[3], 0.0);
    }

    #[test]
    fn l1_is_inverse_distance() {
        let w = weights(&[2.0, 0.0], DistanceType::L1, 0.0);
        assert!((w[0] - 0.5).abs() < 1e-6);
        assert!(w[1] >= 1e5); // clamped by epsilon, never infinite
    }

    #[test]
    fn welsch_decays_smoothly() {
        let w = weights(&[0.0, 2.9846], DistanceType::Welsch, 0.0);
        assert!((w[0] - 1.0).abs() < 1e-6);
        assert!((w[1] - (-1.0f32).exp()).abs() < 1e-4);
    }
}
