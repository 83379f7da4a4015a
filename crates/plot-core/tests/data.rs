// File: crates/plot-core/tests/data.rs
// Purpose: Raw data normalization, gap handling, extents and palette assignment.

use plot_core::color::Channel;
use plot_core::data::{coerce, normalize, FieldFormat, FieldRole, SeriesExtents};
use plot_core::series::{RawObject, RawValue, SeriesColor};
use plot_core::{BarAlign, Options, Plot, RawPoint, Rgba, SeriesKind, SeriesSpec};

fn xy_format() -> Vec<FieldFormat> {
    vec![FieldFormat::required(FieldRole::X), FieldFormat::required(FieldRole::Y)]
}

fn base_format() -> Vec<FieldFormat> {
    let mut f = xy_format();
    f.push(FieldFormat { role: FieldRole::Y, number: true, required: false, default: Some(0.0), autoscale: true });
    f
}

#[test]
fn coerce_handles_strings_and_infinities() {
    assert_eq!(coerce(&RawValue::Number(1.5)), Some(1.5));
    assert_eq!(coerce(&RawValue::Text(" 2.5 ".into())), Some(2.5));
    assert_eq!(coerce(&RawValue::Text(String::new())), Some(0.0));
    assert_eq!(coerce(&RawValue::Text("abc".into())), None);
    assert_eq!(coerce(&RawValue::Number(f64::NAN)), None);
    assert_eq!(coerce(&RawValue::Missing), None);
    assert_eq!(coerce(&RawValue::Number(f64::INFINITY)), Some(f64::MAX));
    assert_eq!(coerce(&RawValue::Number(f64::NEG_INFINITY)), Some(-f64::MAX));
}

#[test]
fn missing_samples_become_gap_markers() {
    let raw: Vec<RawPoint> = vec![
        RawPoint::xy(0.0, 1.0),
        RawPoint::Missing,
        (2.0, None::<f64>).into(),
        RawPoint::Tuple(vec![RawValue::Number(3.0), RawValue::Text("4".into())]),
    ];
    let mut gaps = SeriesExtents::default();
    let buf = normalize(&raw, &xy_format(), false, &mut gaps);

    assert_eq!(buf.len(), 4);
    assert_eq!(buf.pointsize, 2);
    assert_eq!(buf.xy(0), Some((0.0, 1.0)));
    assert_eq!(buf.point(1), &[None, None]);
    assert_eq!(buf.point(2), &[None, None]);
    assert_eq!(buf.xy(3), Some((3.0, 4.0)));

    // The gap's x still counts towards the axis extent.
    assert_eq!(gaps.x.bounds(), Some((2.0, 2.0)));
    assert!(gaps.y.is_empty());
}

#[test]
fn object_samples_are_read_by_field() {
    let raw = vec![RawPoint::Object(RawObject { x: 1.0.into(), y: 2.0.into(), base: RawValue::Missing })];
    let mut gaps = SeriesExtents::default();
    let buf = normalize(&raw, &base_format(), false, &mut gaps);
    assert_eq!(buf.point(0), &[Some(1.0), Some(2.0), Some(0.0)]);
}

#[test]
fn base_defaults_to_zero() {
    let raw = vec![RawPoint::xy(1.0, 5.0), RawPoint::xyb(2.0, 5.0, 2.0)];
    let mut gaps = SeriesExtents::default();
    let buf = normalize(&raw, &base_format(), false, &mut gaps);
    assert_eq!(buf.pointsize, 3);
    assert_eq!(buf.base(0), 0.0);
    assert_eq!(buf.base(1), 2.0);
}

#[test]
fn steps_insert_horizontal_corners() {
    let raw: Vec<RawPoint> = vec![(0.0, 1.0).into(), (1.0, 2.0).into(), (2.0, 2.0).into()];
    let mut gaps = SeriesExtents::default();
    let buf = normalize(&raw, &xy_format(), true, &mut gaps);
    let pts: Vec<_> = (0..buf.len()).filter_map(|i| buf.xy(i)).collect();
    // No corner before (2, 2): y did not change.
    assert_eq!(pts, vec![(0.0, 1.0), (1.0, 1.0), (1.0, 2.0), (2.0, 2.0)]);
}

#[test]
fn infinite_values_do_not_stretch_axes() {
    let plot = Plot::builder(200, 200)
        .build(vec![SeriesSpec::new(vec![
            RawPoint::xy(0.0, 1.0),
            RawPoint::xy(1.0, f64::INFINITY),
            RawPoint::xy(2.0, 3.0),
        ])])
        .expect("build plot");
    let y = &plot.y_axes()[0];
    assert_eq!(y.datamin, Some(1.0));
    assert_eq!(y.datamax, Some(3.0));
}

#[test]
fn bar_extents_include_width_and_base() {
    let plot = Plot::builder(200, 200)
        .build(vec![SeriesSpec::with_data(SeriesKind::Bars, vec![(0.0, 3.0), (4.0, 5.0)])
            .bar_width(0.8)
            .align(BarAlign::Center)])
        .expect("build plot");
    let x = &plot.x_axes()[0];
    assert!((x.datamin.unwrap() + 0.4).abs() < 1e-12);
    assert!((x.datamax.unwrap() - 4.4).abs() < 1e-12);
    // The zero base is autoscaled.
    assert_eq!(plot.y_axes()[0].datamin, Some(0.0));
}

#[test]
fn gap_values_widen_axis_extents() {
    let plot = Plot::builder(200, 200)
        .build(vec![SeriesSpec::new(vec![
            RawPoint::xy(1.0, 1.0),
            RawPoint::Tuple(vec![RawValue::Number(10.0), RawValue::Missing]),
            RawPoint::xy(2.0, 2.0),
        ])])
        .expect("build plot");
    assert_eq!(plot.x_axes()[0].datamax, Some(10.0));
}

#[test]
fn palette_is_assigned_in_order_and_varied_on_wrap() {
    let options = Options::default();
    let specs: Vec<SeriesSpec> = (0..6).map(|i| SeriesSpec::with_data(SeriesKind::Lines, vec![(0.0, i as f64)])).collect();
    let plot = Plot::builder(200, 200).options(options.clone()).build(specs).expect("build plot");

    for (series, expected) in plot.series().iter().zip(&options.colors) {
        assert_eq!(series.color, Rgba::parse(expected));
    }
    let first = plot.series()[0].color;
    let wrapped = plot.series()[5].color;
    assert_ne!(first, wrapped);
    assert_eq!(wrapped, first.scale(Channel::RGB, 0.8));
}

#[test]
fn explicit_colors_do_not_consume_palette_slots() {
    let mut index = SeriesSpec::with_data(SeriesKind::Lines, vec![(0.0, 0.0)]);
    index.color = Some(SeriesColor::Index(2));
    let specs = vec![
        SeriesSpec::with_data(SeriesKind::Lines, vec![(0.0, 0.0)]).color("red"),
        SeriesSpec::with_data(SeriesKind::Lines, vec![(0.0, 0.0)]),
        index,
    ];
    let plot = Plot::builder(200, 200).build(specs).expect("build plot");
    let palette = &Options::default().colors;
    assert_eq!(plot.series()[0].color, Rgba::rgb(255, 0, 0));
    assert_eq!(plot.series()[1].color, Rgba::parse(&palette[0]));
    assert_eq!(plot.series()[2].color, Rgba::parse(&palette[2]));
}
