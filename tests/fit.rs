use line_caliper::{fit_line, DistanceType, FitError, FitOptions};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 40 points on y = 0.5x + 10.
fn inliers() -> Vec<[f32; 2]> {
    (0..40).map(|i| [i as f32, 0.5 * i as f32 + 10.0]).collect()
}

/// 10 points shifted +8 in y, evenly spread in x.
fn outliers() -> Vec<[f32; 2]> {
    (0..10)
        .map(|k| {
            let x = (2 + 4 * k) as f32;
            [x, 0.5 * x + 18.0]
        })
        .collect()
}

#[test]
fn every_estimator_fits_a_clean_line() {
    init_logs();
    let points: Vec<[f32; 2]> = (0..30).map(|i| [i as f32, 2.0 * i as f32 + 1.0]).collect();
    for dist in [
        DistanceType::L2,
        DistanceType::L1,
        DistanceType::L12,
        DistanceType::Fair,
        DistanceType::Welsch,
        DistanceType::Huber,
        DistanceType::Tukey,
    ] {
        let opts = FitOptions {
            dist,
            ..Default::default()
        };
        let line = fit_line(&points, &opts).unwrap();
        // Normal perpendicular to the direction (1, 2) of y = 2x + 1.
        let dot = (line.a as f64 + 2.0 * line.b as f64) / 5.0f64.sqrt();
        assert!(dot.abs() < 1e-3, "{dist:?}: normal off by {dot}");
        assert!(
            line.signed_distance(0.0, 1.0).abs() < 1e-2,
            "{dist:?}: line misses (0, 1)"
        );
    }
}

#[test]
fn tukey_rejects_one_sided_outliers() {
    init_logs();
    let mut points = inliers();
    points.extend(outliers());
    let opts = FitOptions {
        dist: DistanceType::Tukey,
        param: 2.0,
        ..Default::default()
    };
    let line = fit_line(&points, &opts).unwrap();
    for p in inliers() {
        let d = line.signed_distance(p[0], p[1]).abs();
        assert!(d < 0.1, "inlier ({}, {}) off by {d}", p[0], p[1]);
    }
}

#[test]
fn plain_least_squares_is_dragged_by_outliers() {
    init_logs();
    let mut points = inliers();
    points.extend(outliers());
    let opts = FitOptions {
        dist: DistanceType::L2,
        ..Default::default()
    };
    let line = fit_line(&points, &opts).unwrap();
    let mean_dev: f32 = inliers()
        .iter()
        .map(|p| line.signed_distance(p[0], p[1]).abs())
        .sum::<f32>()
        / 40.0;
    assert!(mean_dev > 0.8, "L2 deviation only {mean_dev}");
}

#[test]
fn fixed_seed_is_reproducible() {
    init_logs();
    let mut points = inliers();
    points.extend(outliers());
    let opts = FitOptions {
        seed: 7,
        ..Default::default()
    };
    let a = fit_line(&points, &opts).unwrap();
    let b = fit_line(&points, &opts).unwrap();
    assert_eq!(a.a, b.a);
    assert_eq!(a.b, b.b);
    assert_eq!(a.cx, b.cx);
    assert_eq!(a.cy, b.cy);
}

#[test]
fn empty_input_is_rejected() {
    init_logs();
    assert_eq!(
        fit_line(&[], &FitOptions::default()),
        Err(FitError::InsufficientPoints)
    );
}

#[test]
fn coincident_points_are_degenerate() {
    init_logs();
    let points = vec![[3.0f32, -4.0]; 8];
    assert_eq!(
        fit_line(&points, &FitOptions::default()),
        Err(FitError::DegenerateFit)
    );
    let opts = FitOptions {
        dist: DistanceType::L2,
        ..Default::default()
    };
    assert_eq!(fit_line(&points, &opts), Err(FitError::DegenerateFit));
}
