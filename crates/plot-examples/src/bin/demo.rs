// File: crates/plot-examples/src/bin/demo.rs
// Summary: Demo loads a CSV of columns and renders line, point and bar plots to PNGs.

use anyhow::{Context, Result};
use log::{info, warn};
use plot_core::series::RawValue;
use plot_core::{theme, FillSpec, Options, Plot, RawPoint, SeriesKind, SeriesSpec};
use std::path::{Path, PathBuf};

const USAGE: &str = "usage: plot-demo <data.csv> [options.json] [theme]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let csv_path = PathBuf::from(args.next().context(USAGE)?);
    let options_path = args.next();
    let theme_name = args.next();

    let mut options = match &options_path {
        Some(p) => {
            let json = std::fs::read_to_string(p).with_context(|| format!("reading options {p}"))?;
            Options::from_json(&json).with_context(|| format!("parsing options {p}"))?
        }
        None => Options::default(),
    };
    if let Some(name) = &theme_name {
        theme::find(name).apply(&mut options);
    }

    let columns = load_columns(&csv_path).with_context(|| format!("failed to load CSV '{}'", csv_path.display()))?;
    if columns.is_empty() {
        anyhow::bail!("no numeric columns in {}", csv_path.display());
    }
    info!("loaded {} series from {}", columns.len(), csv_path.display());

    let (w, h) = (plot_core::types::WIDTH, plot_core::types::HEIGHT);

    // 1) Lines, the first series filled
    let lines: Vec<SeriesSpec> = columns
        .iter()
        .enumerate()
        .map(|(i, (label, data))| {
            let spec = SeriesSpec::new(data.clone()).label(label.clone()).kind(SeriesKind::Lines);
            if i == 0 { spec.fill(FillSpec::Opacity(0.2)) } else { spec }
        })
        .collect();
    render(Plot::builder(w, h).options(options.clone()).build(lines)?, &csv_path, "lines")?;

    // 2) Points
    let points: Vec<SeriesSpec> = columns
        .iter()
        .map(|(label, data)| SeriesSpec::new(data.clone()).label(label.clone()).kind(SeriesKind::Points))
        .collect();
    render(Plot::builder(w, h).options(options.clone()).build(points)?, &csv_path, "points")?;

    // 3) Bars of the first column
    let (label, data) = &columns[0];
    let bars = vec![SeriesSpec::new(data.clone())
        .label(label.clone())
        .kind(SeriesKind::Bars)
        .bar_width(0.8)
        .align(plot_core::BarAlign::Center)];
    render(Plot::builder(w, h).options(options).build(bars)?, &csv_path, "bars")?;

    Ok(())
}

fn render(plot: Plot, input: &Path, suffix: &str) -> Result<()> {
    let out = out_name_with(input, suffix);
    plot.render_to_png(&out)?;
    println!("Wrote {}", out.display());
    Ok(())
}

/// Produce output file name like target/out/plot_<stem>_<suffix>.png
fn out_name_with(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("plot");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("plot_{stem}_{suffix}.png"));
    out
}

/// Load a CSV whose first column is x and every further column a series.
/// Non-numeric x falls back to the row index; empty or non-numeric y cells
/// become gaps.
fn load_columns(path: &Path) -> Result<Vec<(String, Vec<RawPoint>)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if headers.len() < 2 {
        anyhow::bail!("expected an x column and at least one y column, found headers {headers:?}");
    }
    let mut columns: Vec<(String, Vec<RawPoint>)> = headers[1..].iter().map(|h| (h.clone(), Vec::new())).collect();

    for (row, rec) in rdr.records().enumerate() {
        let rec = match rec {
            Ok(rec) => rec,
            Err(e) => {
                warn!("skipping row {row}: {e}");
                continue;
            }
        };
        let x = rec.get(0).and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(row as f64);
        for (i, (_, data)) in columns.iter_mut().enumerate() {
            let y = rec
                .get(i + 1)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .map_or(RawValue::Missing, RawValue::Number);
            data.push(RawPoint::Tuple(vec![RawValue::Number(x), y]));
        }
    }
    Ok(columns)
}
