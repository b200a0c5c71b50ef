//! VeRDET segmentation of a single forest pixel.
//!
//! Run with: cargo run --example quickstart

use verdet::segmentation::{TrendKind, Verdet, VerdetConfig};

fn main() {
    println!("=== VeRDET Quickstart ===\n");

    // One vegetation index value per year
    let series = vec![
        0.82, 0.78, 0.77, 0.86, 0.94, 0.95, 0.70, 0.78, 0.61, 0.42, 0.28, 0.18, 0.10, 0.10, 0.12,
        0.24, 0.39, 0.43, 0.50, 0.70,
    ];

    let config = VerdetConfig::default();
    println!(
        "alpha = {}, tolerance = {}, max_iterations = {}\n",
        config.alpha, config.tolerance, config.max_iterations
    );

    let mut solver = Verdet::new(config);
    let segmentation = match solver.segment(&series) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("segmentation failed: {}", e);
            return;
        }
    };
    let fitted = match segmentation.fit(&series) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("refit failed: {}", e);
            return;
        }
    };

    println!(
        "Denoiser: {} iterations (converged: {})",
        segmentation.iterations, segmentation.converged
    );
    println!("Vertices: {:?}\n", segmentation.vertex_indices());

    println!("{:<6} {:>10} {:>10}", "Year", "Observed", "Fitted");
    println!("{:-<28}", "");
    for (year, (obs, fit)) in series.iter().zip(fitted.iter()).enumerate() {
        println!("{:<6} {:>10.3} {:>10.3}", year, obs, fit);
    }

    println!("\n--- Trend Segments ---");
    if let Ok(trends) = segmentation.trends(&fitted, 0.01) {
        for t in trends {
            let label = match t.kind {
                TrendKind::Disturbance => "disturbance",
                TrendKind::Stable => "stable",
                TrendKind::Regeneration => "regeneration",
            };
            println!(
                "years {:>2}..{:<2} slope {:>7.3}/yr  {}",
                t.start, t.end, t.slope, label
            );
        }
    }
}
