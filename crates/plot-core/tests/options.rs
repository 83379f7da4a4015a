// File: crates/plot-core/tests/options.rs
// Purpose: JSON option loading, derived colors and theme presets.

use plot_core::options::TickLength;
use plot_core::theme;
use plot_core::types::Sides;
use plot_core::{Options, PlotError, Rgba};

#[test]
fn json_merges_over_defaults() {
    let options = Options::from_json(r#"{"grid":{"hoverable":true},"yaxis":{"min":0}}"#).expect("valid options");
    assert!(options.grid.hoverable);
    assert_eq!(options.grid.color, "#545454");
    assert_eq!(options.grid.mouse_active_radius, 10.0);
    assert_eq!(options.yaxis.min, Some(0.0));
    // Siblings of a merged key keep their defaults.
    assert_eq!(options.yaxis.autoscale_margin, Some(0.02));
    assert_eq!(options.colors.len(), 5);
}

#[test]
fn json_arrays_replace() {
    let options = Options::from_json(r##"{"colors":["#000000"]}"##).expect("valid options");
    assert_eq!(options.colors, vec!["#000000".to_string()]);
}

#[test]
fn json_accepts_per_side_values_and_keywords() {
    let options = Options::from_json(
        r#"{"grid":{"borderWidth":1,"border_width":{"top":1,"right":2,"bottom":3,"left":4}},
            "xaxis":{"tick_length":"full"},"yaxis":{"tick_length":4}}"#,
    )
    .expect("valid options");
    assert_eq!(options.grid.border_width, Sides::PerSide { top: 1.0, right: 2.0, bottom: 3.0, left: 4.0 });
    assert_eq!(options.grid.border_width.left(), 4.0);
    assert_eq!(options.xaxis.tick_length, Some(TickLength::Full));
    assert_eq!(options.yaxis.tick_length, Some(TickLength::Pixels(4.0)));
}

#[test]
fn invalid_json_is_an_options_error() {
    assert!(matches!(Options::from_json("{not json"), Err(PlotError::Options(_))));
    assert!(matches!(Options::from_json(r#"{"grid":{"hoverable":"yes"}}"#), Err(PlotError::Options(_))));
}

#[test]
fn finalize_derives_axis_and_border_colors() {
    let mut options = Options::default();
    options.finalize();
    assert_eq!(options.xaxis.color.as_deref(), Some("rgba(84,84,84,0.22)"));
    assert_eq!(options.yaxis.tick_color, options.yaxis.color);
    assert_eq!(options.grid.border_color, Some(Sides::Uniform("#545454".to_string())));

    // Explicit colors survive.
    let mut options = Options::default();
    options.xaxis.color = Some("red".into());
    options.finalize();
    assert_eq!(options.xaxis.color.as_deref(), Some("red"));
    assert_eq!(Rgba::parse(options.xaxis.tick_color.as_deref().unwrap_or_default()), Rgba::parse("rgba(84,84,84,0.22)"));
}

#[test]
fn themes_restyle_palette_and_grid() {
    let dark = theme::find("dark");
    let options = Options::themed(&dark);
    assert_eq!(options.colors[0], dark.palette[0].to_string());
    assert_eq!(Rgba::parse(&options.grid.color), dark.grid);
    assert_eq!(options.grid.background_color.as_deref().map(Rgba::parse), Some(dark.background));
    // Non-color options are untouched.
    assert_eq!(options.yaxis.autoscale_margin, Some(0.02));
}

#[test]
fn theme_lookup_falls_back_to_classic() {
    assert_eq!(theme::presets().len(), 5);
    assert_eq!(theme::find("Solarized-Dark").name, "solarized-dark");
    assert_eq!(theme::find("no-such-theme").name, "classic");
}
