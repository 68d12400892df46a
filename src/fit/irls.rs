//! Weighted eigen line fit and the multi-start IRLS driver.
//!
//! The weighted fit solves the 2×2 eigenproblem of the centered second
//! moments and takes the eigenvector of the smaller eigenvalue as the line
//! normal. The IRLS driver restarts from random point subsamples and keeps
//! the fit with the lowest residual sum, guarding against a bad initial fit
//! trapping the reweighting in a poor local optimum.

use super::{FitError, FitOptions};
use crate::fit::estimators::DistanceType;
use crate::types::FittedLine;
use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OUTER_RESTARTS: usize = 20;
const INNER_ITERS: usize = 30;
/// Seeding subsample size per restart.
const SUBSAMPLE: usize = 10;
const EPS: f64 = 1e-12;

/// Line state carried through the refinement iterations (f64 precision;
/// the public `FittedLine` stores f32).
#[derive(Clone, Copy, Debug)]
struct LineState {
    normal: [f64; 2],
    point: [f64; 2],
}

impl LineState {
    fn to_fitted(self) -> FittedLine {
        FittedLine {
            a: self.normal[0] as f32,
            b: self.normal[1] as f32,
            cx: self.point[0] as f32,
            cy: self.point[1] as f32,
        }
    }
}

/// Weighted total-least-squares line through `points`. `None` weights mean
/// an unweighted fit.
fn fit_weighted(points: &[[f32; 2]], weights: Option<&[f32]>) -> Result<LineState, FitError> {
    let mut sum_w = 0.0f64;
    let mut mx = 0.0f64;
    let mut my = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        let w = weights.map_or(1.0, |ws| ws[i] as f64);
        sum_w += w;
        mx += w * p[0] as f64;
        my += w * p[1] as f64;
    }
    if sum_w <= EPS {
        return Err(FitError::DegenerateFit);
    }
    mx /= sum_w;
    my /= sum_w;

    let mut dxx = 0.0f64;
    let mut dxy = 0.0f64;
    let mut dyy = 0.0f64;
    for (i, p) in points.iter().enumerate() {
        let w = weights.map_or(1.0, |ws| ws[i] as f64);
        let dx = p[0] as f64 - mx;
        let dy = p[1] as f64 - my;
        dxx += w * dx * dx;
        dxy += w * dx * dy;
        dyy += w * dy * dy;
    }
    dxx /= sum_w;
    dxy /= sum_w;
    dyy /= sum_w;

    // Smaller eigenvalue of [[dxx, dxy], [dxy, dyy]]; its eigenvector is
    // the line normal.
    let lambda = ((dxx + dyy) - ((dxx - dyy) * (dxx - dyy) + 4.0 * dxy * dxy).sqrt()) / 2.0;
    let mut normal = [dxy, lambda - dxx];
    let denom = (normal[0] * normal[0] + normal[1] * normal[1]).sqrt();
    if denom > EPS {
        normal[0] /= denom;
        normal[1] /= denom;
        return Ok(LineState {
            normal,
            point: [mx, my],
        });
    }

    // Eigenvector collapsed: the scatter has no usable off-diagonal
    // structure. Fall back to an axis-aligned line when one axis clearly
    // dominates, otherwise the fit is degenerate.
    if dyy > dxx.max(EPS) {
        Ok(LineState {
            normal: [1.0, 0.0],
            point: [mx, my],
        })
    } else if dxx > dyy.max(EPS) {
        Ok(LineState {
            normal: [0.0, 1.0],
            point: [mx, my],
        })
    } else {
        Err(FitError::DegenerateFit)
    }
}

/// Sum of absolute perpendicular distances; fills `dist` per point.
fn residual_sum(points: &[[f32; 2]], line: &LineState, dist: &mut [f32]) -> f64 {
    let mut sum = 0.0f64;
    for (d, p) in dist.iter_mut().zip(points) {
        let r = line.normal[0] * (p[0] as f64 - line.point[0])
            + line.normal[1] * (p[1] as f64 - line.point[1]);
        *d = r.abs() as f32;
        sum += r.abs();
    }
    sum
}

fn converged(line: &LineState, prev: &LineState, adelta: f64, rdelta: f64) -> bool {
    let t = (line.normal[0] * prev.normal[0] + line.normal[1] * prev.normal[1]).clamp(-1.0, 1.0);
    if t.acos().abs() >= adelta {
        return false;
    }
    let dx = (line.point[0] - prev.point[0]).abs();
    let dy = (line.point[1] - prev.point[1]).abs();
    dx.max(dy) < rdelta
}

pub(crate) fn fit_line_impl(points: &[[f32; 2]], opts: &FitOptions) -> Result<FittedLine, FitError> {
    if points.is_empty() {
        return Err(FitError::InsufficientPoints);
    }
    if opts.dist == DistanceType::L2 {
        return fit_weighted(points, None).map(LineState::to_fitted);
    }

    let n = points.len();
    let rdelta = if opts.reps != 0.0 { opts.reps as f64 } else { 1.0 };
    let adelta = if opts.aeps != 0.0 { opts.aeps as f64 } else { 0.01 };
    let eps = n as f64 * f32::EPSILON as f64;

    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut w = vec![0.0f32; n];
    let mut dist = vec![0.0f32; n];
    let mut best: Option<(f64, LineState)> = None;

    for _ in 0..OUTER_RESTARTS {
        // Seed this restart from a random subsample of distinct points.
        w.fill(0.0);
        let target = n.min(SUBSAMPLE);
        let mut picked = 0;
        while picked < target {
            let j = rng.gen_range(0..n);
            if w[j] < f32::EPSILON {
                w[j] = 1.0;
                picked += 1;
            }
        }

        let mut line = match fit_weighted(points, Some(&w)) {
            Ok(l) => l,
            Err(_) => continue,
        };
        let mut prev: Option<LineState> = None;
        let mut err = f64::MAX;

        for _ in 0..INNER_ITERS {
            if let Some(p) = &prev {
                if converged(&line, p, adelta, rdelta) {
                    break;
                }
            }
            err = residual_sum(points, &line, &mut dist);
            if err < eps {
                break;
            }
            opts.dist.compute_weights(&dist, opts.param, &mut w);
            let sum_w: f64 = w.iter().map(|&v| v as f64).sum();
            if sum_w.abs() > f32::EPSILON as f64 {
                let inv = 1.0 / sum_w;
                for v in w.iter_mut() {
                    *v = (*v as f64 * inv) as f32;
                }
            } else {
                w.fill(1.0);
            }
            prev = Some(line);
            line = match fit_weighted(points, Some(&w)) {
                Ok(l) => l,
                Err(_) => break,
            };
        }

        if best.as_ref().map_or(true, |(e, _)| err < *e) {
            best = Some((err, line));
            if err < eps {
                break;
            }
        }
    }

    match best {
        Some((_, line)) => Ok(line.to_fitted()),
        None => {
            warn!("line fit: every restart collapsed to a degenerate scatter");
            Err(FitError::DegenerateFit)
        }
    }
}
