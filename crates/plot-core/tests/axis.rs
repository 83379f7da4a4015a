// File: crates/plot-core/tests/axis.rs
// Purpose: Axis range policy, tick step selection and tick generation properties.

use plot_core::axis::{compute_range, format_fixed, tick_step, tick_values, MAX_TICKS};
use plot_core::options::{AxisMode, AxisOptions, TicksOption};
use plot_core::{Options, Plot, PlotError, SeriesKind, SeriesSpec, TickEntry};
use proptest::prelude::*;

fn margin(m: f64) -> AxisOptions {
    AxisOptions { autoscale_margin: Some(m), ..AxisOptions::default() }
}

#[test]
fn explicit_bounds_are_verbatim() {
    let opts = AxisOptions::default().with_range(Some(-3.0), Some(7.5));
    assert_eq!(compute_range(Some(0.0), Some(1.0), &opts), (-3.0, 7.5));
}

#[test]
fn degenerate_extent_is_padded_by_one_percent() {
    let (min, max) = compute_range(Some(50.0), Some(50.0), &AxisOptions::default());
    assert!((min - 49.5).abs() < 1e-12);
    assert!((max - 50.5).abs() < 1e-12);

    let (min, max) = compute_range(Some(0.0), Some(0.0), &AxisOptions::default());
    assert_eq!((min, max), (-1.0, 1.0));
}

#[test]
fn degenerate_extent_pads_only_unset_bound() {
    let opts = AxisOptions::default().with_range(Some(10.0), None);
    let (min, max) = compute_range(Some(10.0), Some(10.0), &opts);
    assert_eq!(min, 10.0);
    assert!(max > 10.0);
}

#[test]
fn no_data_gives_unit_range() {
    assert_eq!(compute_range(None, None, &AxisOptions::default()), (-1.0, 1.0));
}

#[test]
fn autoscale_margin_snaps_to_zero() {
    // Non-negative data never gets a negative lower bound.
    let (min, max) = compute_range(Some(0.0), Some(1.0), &margin(0.02));
    assert_eq!(min, 0.0);
    assert!((max - 1.02).abs() < 1e-12);

    // Symmetric case for non-positive data.
    let (min, max) = compute_range(Some(-1.0), Some(0.0), &margin(0.02));
    assert!((min + 1.02).abs() < 1e-12);
    assert_eq!(max, 0.0);

    // Data straddling zero gets the margin on both sides.
    let (min, max) = compute_range(Some(-1.0), Some(1.0), &margin(0.1));
    assert!((min + 1.2).abs() < 1e-12);
    assert!((max - 1.2).abs() < 1e-12);
}

#[test]
fn inverted_explicit_bounds_are_swapped() {
    let opts = AxisOptions::default().with_range(Some(5.0), Some(1.0));
    assert_eq!(compute_range(None, None, &opts), (1.0, 5.0));
}

#[test]
fn tick_step_snaps_to_nice_sizes() {
    let s = tick_step(0.0, 10.0, 5.0, None, None);
    assert_eq!(s.size, 2.0);
    assert_eq!(s.decimals, 0);

    let s = tick_step(0.0, 1.0, 4.0, None, None);
    assert!((s.size - 0.25).abs() < 1e-12);
    assert_eq!(s.decimals, 2);

    // 2.5 needs an extra decimal; with max one decimal it falls back to 2.
    let s = tick_step(0.0, 1.0, 4.0, Some(1), None);
    assert!((s.size - 0.2).abs() < 1e-12);
    assert_eq!(s.decimals, 1);

    let s = tick_step(0.0, 100.0, 3.0, None, None);
    assert_eq!(s.size, 50.0);

    let s = tick_step(0.0, 1.0, 10.0, None, Some(0.5));
    assert_eq!(s.size, 0.5);
}

#[test]
fn tick_values_bracket_the_range() {
    let ticks = tick_values(0.3, 9.7, 2.0);
    assert_eq!(ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
}

#[test]
fn tick_values_reject_bad_steps() {
    assert!(tick_values(0.0, 1.0, 0.0).is_empty());
    assert!(tick_values(0.0, 1.0, -1.0).is_empty());
    assert!(tick_values(0.0, 1.0, f64::NAN).is_empty());
}

#[test]
fn tick_values_are_capped() {
    let ticks = tick_values(0.0, 1e12, 1.0);
    assert_eq!(ticks.len(), MAX_TICKS);
}

#[test]
fn format_fixed_pads_and_rounds() {
    assert_eq!(format_fixed(1.0, 2), "1.00");
    assert_eq!(format_fixed(2.345, 1), "2.3");
    assert_eq!(format_fixed(-0.0001, 2), "0.00");
    assert_eq!(format_fixed(250.0, 0), "250");
}

fn built(options: Options, data: Vec<(f64, f64)>) -> Plot {
    Plot::builder(400, 300)
        .options(options)
        .build(vec![SeriesSpec::with_data(SeriesKind::Lines, data)])
        .expect("build plot")
}

#[test]
fn non_positive_tick_size_falls_back_to_computed_step() {
    let mut options = Options::default();
    options.xaxis.tick_size = Some(0.0);
    let plot = built(options, vec![(0.0, 0.0), (10.0, 1.0)]);
    let x = &plot.x_axes()[0];
    assert!(x.tick_size > 0.0);
    assert!(x.ticks.len() >= 2 && x.ticks.len() < 100);

    let mut options = Options::default();
    options.xaxis.tick_size = Some(-5.0);
    let plot = built(options, vec![(0.0, 0.0), (10.0, 1.0)]);
    assert!(plot.x_axes()[0].tick_size > 0.0);
}

#[test]
fn tiny_tick_size_still_brackets_the_range() {
    let mut options = Options::default();
    options.xaxis = options.xaxis.clone().with_range(Some(0.0), Some(1.0));
    options.xaxis.tick_size = Some(1e-9);
    let plot = built(options, vec![(0.0, 0.0), (1.0, 1.0)]);
    let x = &plot.x_axes()[0];

    assert!(x.tick_size >= 1.0 / (MAX_TICKS - 3) as f64);
    assert!(x.ticks.len() <= MAX_TICKS);
    assert!(x.ticks[0].value <= x.min);
    assert!(x.ticks[x.ticks.len() - 1].value >= x.max);
}

#[test]
fn explicit_tick_list_and_formatter() {
    let mut options = Options::default();
    options.xaxis.ticks = Some(TicksOption::List(vec![
        TickEntry::Value(0.0),
        TickEntry::Labeled(5.0, "five".into()),
        TickEntry::Value(f64::NAN),
    ]));
    options.yaxis = options.yaxis.clone().with_tick_formatter(|v, _| format!("{v:.0}%"));
    let plot = built(options, vec![(0.0, 0.0), (10.0, 100.0)]);

    let x = &plot.x_axes()[0];
    assert_eq!(x.ticks.len(), 2);
    assert_eq!(x.ticks[0].label, "0");
    assert_eq!(x.ticks[1].label, "five");

    let y = &plot.y_axes()[0];
    assert!(y.ticks.iter().all(|t| t.label.ends_with('%')));
}

#[test]
fn zero_tick_count_hides_ticks() {
    let mut options = Options::default();
    options.yaxis.ticks = Some(TicksOption::Count(0.0));
    let plot = built(options, vec![(0.0, 0.0), (10.0, 1.0)]);
    assert!(plot.y_axes()[0].ticks.is_empty());
}

#[test]
fn tick_generator_callback_is_used() {
    let mut options = Options::default();
    options.xaxis = options
        .xaxis
        .clone()
        .with_tick_generator(|axis| vec![TickEntry::Value(axis.min), TickEntry::Value(axis.max)]);
    let plot = built(options, vec![(2.0, 0.0), (8.0, 1.0)]);
    let values: Vec<f64> = plot.x_axes()[0].ticks.iter().map(|t| t.value).collect();
    assert_eq!(values, vec![2.0, 8.0]);
}

#[test]
fn aligned_axis_reuses_tick_positions() {
    let mut options = Options::default();
    options.yaxes = vec![AxisOptions::default(), AxisOptions { align_ticks_with_axis: Some(1), ..AxisOptions::default() }];
    let plot = Plot::builder(400, 300)
        .options(options)
        .build(vec![
            SeriesSpec::with_data(SeriesKind::Lines, vec![(0.0, 0.0), (1.0, 10.0)]),
            SeriesSpec::with_data(SeriesKind::Lines, vec![(0.0, 0.0), (1.0, 3.0)]).axes(1, 2),
        ])
        .expect("build plot");

    let (y1, y2) = (&plot.y_axes()[0], &plot.y_axes()[1]);
    assert_eq!(y1.ticks.len(), y2.ticks.len());
    for (a, b) in y1.ticks.iter().zip(&y2.ticks) {
        let ta = (a.value - y1.min) / (y1.max - y1.min);
        let tb = (b.value - y2.min) / (y2.max - y2.min);
        assert!((ta - tb).abs() < 1e-9);
    }
}

#[test]
fn time_mode_needs_a_tick_generator() {
    let mut options = Options::default();
    options.xaxis.mode = Some(AxisMode::Time);
    let result = Plot::builder(400, 300)
        .options(options.clone())
        .build(vec![SeriesSpec::with_data(SeriesKind::Lines, vec![(0.0, 0.0), (1.0, 1.0)])]);
    assert!(matches!(result, Err(PlotError::MissingTimeSupport { .. })));

    options.xaxis = options.xaxis.clone().with_tick_generator(|axis| vec![TickEntry::Value(axis.min)]);
    let result = Plot::builder(400, 300)
        .options(options)
        .build(vec![SeriesSpec::with_data(SeriesKind::Lines, vec![(0.0, 0.0), (1.0, 1.0)])]);
    assert!(result.is_ok());
}

proptest! {
    #[test]
    fn derived_range_contains_data(lo in -1e6f64..1e6, span in 1e-3f64..1e6, m in 0.0f64..0.5) {
        let hi = lo + span;
        let (min, max) = compute_range(Some(lo), Some(hi), &margin(m));
        prop_assert!(min <= max);
        prop_assert!(min <= lo);
        prop_assert!(max >= hi);
    }

    #[test]
    fn range_is_ordered_for_any_options(
        dmin in proptest::option::of(-1e6f64..1e6),
        omin in proptest::option::of(-1e6f64..1e6),
        omax in proptest::option::of(-1e6f64..1e6),
    ) {
        let opts = AxisOptions::default().with_range(omin, omax);
        let (min, max) = compute_range(dmin, dmin.map(|d| d + 1.0), &opts);
        prop_assert!(min <= max);
    }

    #[test]
    fn generated_ticks_increase_and_bracket(lo in -1e4f64..1e4, span in 1e-2f64..1e4, dim in 50.0f64..2000.0) {
        let hi = lo + span;
        let step = tick_step(lo, hi, 0.3 * dim.sqrt(), None, None);
        let ticks = tick_values(lo, hi, step.size);
        prop_assert!(!ticks.is_empty());
        prop_assert!(ticks.len() <= MAX_TICKS);
        for pair in ticks.windows(2) {
            prop_assert!(pair[1] > pair[0]);
        }
        prop_assert!(ticks[0] <= lo + step.size);
        prop_assert!(*ticks.last().unwrap() >= hi - step.size);
    }
}
