use line_caliper::config::load_config;
use line_caliper::image::io::{load_grayscale_image, save_grayscale_f32, write_json_file};
use line_caliper::{CaliperDetector, CaliperResult, EdgePoint, FittedLine};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let gray = load_grayscale_image(&config.input)?;
    let mut detector = CaliperDetector::new(gray.width(), gray.height(), config.roi, config.edge)
        .map_err(|e| format!("Invalid caliper configuration: {e}"))?;

    let outcome = detector.process(&gray.as_view());
    let summary = match &outcome {
        Ok(result) => CaliperSummary::found(result, detector.roi_corners()),
        Err(err) => CaliperSummary::not_found(err, detector.roi_corners()),
    };

    write_json_file(&config.output.result_json, &summary)?;
    if let Some(roi_path) = &config.output.roi_image {
        save_grayscale_f32(detector.sampled_roi(), roi_path)?;
        println!("Saved unrotated ROI samples to {}", roi_path.display());
    }

    match outcome {
        Ok(result) => println!(
            "Found line through {} edge points in {:.3} ms; result in {}",
            result.edge_points.len(),
            result.latency_ms,
            config.output.result_json.display()
        ),
        Err(err) => println!("No edge found ({err}); result in {}", config.output.result_json.display()),
    }

    Ok(())
}

fn usage() -> String {
    "Usage: caliper_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CaliperSummary {
    found: bool,
    edge_point_count: usize,
    edge_points: Vec<EdgePoint>,
    line: Option<FittedLine>,
    roi_corners: [[f64; 2]; 4],
    latency_ms: Option<f64>,
    error: Option<String>,
}

impl CaliperSummary {
    fn found(result: &CaliperResult, roi_corners: [[f64; 2]; 4]) -> Self {
        Self {
            found: true,
            edge_point_count: result.edge_points.len(),
            edge_points: result.edge_points.clone(),
            line: Some(result.line),
            roi_corners,
            latency_ms: Some(result.latency_ms),
            error: None,
        }
    }

    fn not_found(err: &line_caliper::ProcessError, roi_corners: [[f64; 2]; 4]) -> Self {
        let edge_points = match err {
            line_caliper::ProcessError::Fit { edge_points, .. } => edge_points.clone(),
            _ => Vec::new(),
        };
        Self {
            found: false,
            edge_point_count: edge_points.len(),
            edge_points,
            line: None,
            roi_corners,
            latency_ms: None,
            error: Some(err.to_string()),
        }
    }
}
