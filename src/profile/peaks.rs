//! Central-difference derivative and sub-pixel peak detection.
//!
//! The derivative convention is `filtered[c-1] - filtered[c+1]`
//! (forward-minus-backward); it fixes which transition polarity counts as
//! bright-to-dark versus dark-to-bright. Candidates are gated by a slightly
//! relaxed threshold so that near-threshold true peaks lost to quantization
//! survive until parabolic refinement; final acceptance uses the strict
//! threshold on the refined vertex value.

use crate::detector::params::{TraceDirection, TransitionDirection};

/// Relaxation factor applied to the threshold at candidate-selection time
/// only. Tunable, not load-bearing.
pub(crate) const CANDIDATE_RELAX: f32 = 1.0 - 0.05;

/// Sub-pixel peak in a representative row's derivative profile.
#[derive(Clone, Copy, Debug)]
pub struct PeakHit {
    /// ROI-local column of the refined vertex.
    pub col: f64,
    /// Signed derivative value at the vertex.
    pub strength: f64,
}

/// Fill `out` with the central difference of `filtered`; the two boundary
/// columns stay zero.
pub fn derivative_row(filtered: &[f32], out: &mut [f32]) {
    debug_assert_eq!(filtered.len(), out.len());
    let w = filtered.len();
    if w < 3 {
        out.fill(0.0);
        return;
    }
    out[0] = 0.0;
    out[w - 1] = 0.0;
    for c in 1..w - 1 {
        out[c] = filtered[c - 1] - filtered[c + 1];
    }
}

/// Scan one representative row's derivative for the first accepted peak.
///
/// Columns are visited left-to-right for [`TraceDirection::Forward`] and
/// right-to-left for [`TraceDirection::Reverse`]; the first candidate whose
/// refined vertex clears the strict threshold wins (single-edge caliper
/// semantics: at most one hit per representative row).
pub fn find_row_peak(
    derivative: &[f32],
    trace: TraceDirection,
    transition: TransitionDirection,
    threshold: f32,
) -> Option<PeakHit> {
    let w = derivative.len();
    if w < 5 {
        return None;
    }
    let thr = threshold.abs();
    let relaxed = thr * CANDIDATE_RELAX;

    let mut scan = |col: usize| -> Option<PeakHit> {
        let d = derivative[col];
        let prev = derivative[col - 1];
        let next = derivative[col + 1];
        let falling = d < -relaxed && d <= prev && d <= next;
        let rising = d > relaxed && d >= prev && d >= next;
        let candidate = match transition {
            TransitionDirection::BrightToDark => falling,
            TransitionDirection::DarkToBright => rising,
            TransitionDirection::Both => falling || rising,
        };
        if !candidate {
            return None;
        }
        let (x0, y0) = parabola_vertex(
            [col as f64 - 1.0, col as f64, col as f64 + 1.0],
            [prev as f64, d as f64, next as f64],
        );
        (y0.abs() >= thr as f64).then_some(PeakHit {
            col: x0,
            strength: y0,
        })
    };

    match trace {
        TraceDirection::Forward => (2..w - 2).find_map(&mut scan),
        TraceDirection::Reverse => (2..w - 2).rev().find_map(&mut scan),
    }
}

/// Vertex of the parabola through three points, with the degenerate cases
/// resolved before solving:
/// - all three values equal: the first point is the vertex verbatim;
/// - the center value equals exactly one neighbor: that neighbor's value is
///   replaced by the opposite neighbor's (removes zero curvature).
fn parabola_vertex(x: [f64; 3], mut y: [f64; 3]) -> (f64, f64) {
    if y[0] == y[1] && y[1] == y[2] {
        return (x[0], y[0]);
    }
    if y[1] == y[0] {
        y[0] = y[2];
    } else if y[1] == y[2] {
        y[2] = y[0];
    }
    let a = -((x[0] - x[1]) * (y[2] - y[0]) - (x[2] - x[0]) * (y[0] - y[1]))
        / ((x[0] - x[1]) * (x[1] - x[2]) * (x[2] - x[0]));
    if a.abs() < f64::EPSILON {
        return (x[1], y[1]);
    }
    let b = (y[0] - y[1] - a * (x[0] * x[0] - x[1] * x[1])) / (x[0] - x[1]);
    let c = y[0] - a * x[0] * x[0] - b * x[0];
    (-b / (2.0 * a), (4.0 * a * c - b * b) / (4.0 * a))
}
