// File: crates/plot-examples/src/bin/lines.rs
// Summary: Minimal example that renders a simple line plot to PNG.

use anyhow::Result;
use plot_core::{Plot, SeriesKind, SeriesSpec};

fn main() -> Result<()> {
    env_logger::init();

    let data = vec![
        (0.0, 0.0),
        (1.0, 1.2),
        (2.0, 0.8),
        (3.0, 1.8),
        (4.0, 1.4),
        (5.0, 2.0),
    ];

    let plot = Plot::builder(plot_core::types::WIDTH, plot_core::types::HEIGHT)
        .build(vec![SeriesSpec::with_data(SeriesKind::Lines, data).label("sample")])?;

    let out = std::path::PathBuf::from("target/out/example_lines.png");
    std::fs::create_dir_all(out.parent().unwrap_or(std::path::Path::new(".")))?;
    plot.render_to_png(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}
