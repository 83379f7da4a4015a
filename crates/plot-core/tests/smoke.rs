// File: crates/plot-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use plot_core::{Plot, SeriesKind, SeriesSpec};

#[test]
fn render_smoke_png() {
    let _ = env_logger::builder().is_test(true).try_init();
    let plot = Plot::builder(320, 240)
        .build(vec![SeriesSpec::with_data(
            SeriesKind::Lines,
            vec![(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.5), (4.0, 2.5)],
        )
        .label("smoke")])
        .expect("build plot");

    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();

    plot.render_to_png(&out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // In-memory export decodes to the canvas size.
    let bytes = plot.render_to_png_bytes().expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (320, 240));
}
