//! Truncated Gaussian smoothing along the sampling direction.
//!
//! The kernel is normalized to unit sum. Columns closer to either row end
//! than half the kernel are copied from the unfiltered mean profile verbatim
//! (no partial-kernel renormalization); derivative values near the ROI
//! edges depend on this boundary policy.

/// Normalized 1D Gaussian kernel of odd length `2·(filter_size/2) + 1`.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f32>,
    half: usize,
}

impl GaussianKernel {
    /// Build the kernel. Returns `None` when `filter_size <= 1`, which
    /// disables smoothing entirely.
    pub fn new(filter_size: usize, sigma: f64) -> Option<Self> {
        if filter_size <= 1 {
            return None;
        }
        let half = filter_size / 2;
        let len = 2 * half + 1;
        let s = sigma.max(1e-3);
        let inv_2s2 = 1.0 / (2.0 * s * s);
        let mut taps = Vec::with_capacity(len);
        let mut sum = 0.0f64;
        for i in 0..len {
            let d = i as f64 - half as f64;
            let v = (-d * d * inv_2s2).exp();
            taps.push(v);
            sum += v;
        }
        let taps = taps.into_iter().map(|v| (v / sum) as f32).collect();
        Some(Self { taps, half })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    #[inline]
    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    /// Convolve one representative row. Interior columns get the full
    /// kernel; border columns copy the raw mean.
    pub fn smooth_row(&self, mean: &[f32], out: &mut [f32]) {
        debug_assert_eq!(mean.len(), out.len());
        let w = mean.len();
        if w < self.taps.len() {
            out.copy_from_slice(mean);
            return;
        }
        out[..self.half].copy_from_slice(&mean[..self.half]);
        out[w - self.half..].copy_from_slice(&mean[w - self.half..]);
        for c in self.half..w - self.half {
            let mut acc = 0.0f32;
            for (i, &k) in self.taps.iter().enumerate() {
                acc += mean[c - self.half + i] * k;
            }
            out[c] = acc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_one_disables_smoothing() {
        assert!(GaussianKernel::new(0, 1.0).is_none());
        assert!(GaussianKernel::new(1, 1.0).is_none());
        assert!(GaussianKernel::new(2, 1.0).is_some());
    }

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let k = GaussianKernel::new(5, 1.0).unwrap();
        assert_eq!(k.len(), 5);
        let sum: f32 = k.taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert!((k.taps()[0] - k.taps()[4]).abs() < 1e-7);
        assert!((k.taps()[1] - k.taps()[3]).abs() < 1e-7);
        assert!(k.taps()[2] > k.taps()[1]);
    }

    #[test]
    fn constant_signal_is_preserved() {
        let k = GaussianKernel::new(5, 1.2).unwrap();
        let mean = vec![42.0f32; 16];
        let mut out = vec![0.0f32; 16];
        k.smooth_row(&mean, &mut out);
        for &v in &out {
            assert!((v - 42.0).abs() < 1e-4);
        }
    }

    #[test]
    fn borders_copy_raw_mean() {
        let k = GaussianKernel::new(5, 1.0).unwrap();
        let mut mean = vec![0.0f32; 12];
        mean[0] = 7.0;
        mean[1] = 3.0;
        mean[10] = 5.0;
        mean[11] = 9.0;
        let mut out = vec![0.0f32; 12];
        k.smooth_row(&mean, &mut out);
        assert_eq!(out[0], 7.0);
        assert_eq!(out[1], 3.0);
        assert_eq!(out[10], 5.0);
        assert_eq!(out[11], 9.0);
        // Interior columns are actually convolved.
        assert!(out[2] > 0.0 && out[2] < 3.0);
    }

    #[test]
    fn narrow_row_copies_everything() {
        let k = GaussianKernel::new(9, 2.0).unwrap();
        let mean = vec![1.0f32, 2.0, 3.0];
        let mut out = vec![0.0f32; 3];
        k.smooth_row(&mean, &mut out);
        assert_eq!(out, mean);
    }
}
