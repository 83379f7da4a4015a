// File: crates/plot-core/tests/layout.rs
// Purpose: Axis box allocation, plugin hooks, markings and the legend.

use std::cell::RefCell;
use std::rc::Rc;

use plot_core::axis::MAX_AXES;
use plot_core::data::FieldFormat;
use plot_core::legend::legend_entries;
use plot_core::options::{AxisPosition, GridOptions, LegendOptions, LegendSort};
use plot_core::series::Series;
use plot_core::types::PlotOffset;
use plot_core::{
    Axis, AxisOptions, DrawContext, Marking, MarkingRange, Options, Plot, PlotError, Plugin, RawPoint, Recorder, Rgba, SeriesKind,
    SeriesSpec, TickEntry,
};

fn line(data: Vec<(f64, f64)>) -> SeriesSpec {
    SeriesSpec::with_data(SeriesKind::Lines, data)
}

#[test]
fn second_y_axis_stacks_on_the_right() {
    let mut options = Options::default();
    options.yaxes = vec![AxisOptions::default(), AxisOptions { position: Some(AxisPosition::Right), ..AxisOptions::default() }];
    let plot = Plot::builder(400, 300)
        .options(options)
        .build(vec![line(vec![(0.0, 0.0), (1.0, 1.0)]), line(vec![(0.0, 100.0), (1.0, 200.0)]).axes(1, 2)])
        .expect("build plot");

    let (y1, y2) = (&plot.y_axes()[0], &plot.y_axes()[1]);
    assert!(y1.show && y2.show);
    assert_eq!(y2.position, AxisPosition::Right);
    assert!(y2.bbox.left > y1.bbox.left + plot.plot_width() / 2.0);
    assert!(plot.plot_offset().right > y2.label_width);
    assert!(y2.datamin == Some(100.0) && y2.datamax == Some(200.0));
}

#[test]
fn unused_axis_is_hidden() {
    let mut options = Options::default();
    options.yaxes = vec![AxisOptions::default(), AxisOptions::default()];
    let plot = Plot::builder(400, 300).options(options).build(vec![line(vec![(0.0, 0.0), (1.0, 1.0)])]).expect("build plot");
    assert_eq!(plot.y_axes().len(), 2);
    assert!(!plot.y_axes()[1].used);
    assert!(!plot.y_axes()[1].show);
    // Only used axes report pointer coordinates.
    assert_eq!(plot.canvas_to_data(10.0, 10.0).len(), 2);
}

#[test]
fn out_of_range_axis_ordinal_is_rejected() {
    let built = Plot::builder(400, 300).build(vec![line(vec![(0.0, 0.0)]).axes(1, 200_000)]);
    assert!(matches!(built, Err(PlotError::Options(_))));

    let mut plot = Plot::builder(400, 300).build(vec![line(vec![(0.0, 1.0), (1.0, 2.0)])]).expect("build plot");
    assert!(plot.set_data(vec![line(vec![(0.0, 0.0)]).axes(usize::MAX, 1)]).is_err());
    // The rejected call leaves data and axes alone.
    assert_eq!(plot.series().len(), 1);
    assert_eq!(plot.x_axes().len(), 1);
    assert_eq!(plot.x_axes()[0].datamax, Some(1.0));

    // Ordinals up to the limit fill the missing axes densely.
    plot.set_data(vec![line(vec![(0.0, 0.0), (1.0, 1.0)]).axes(1, MAX_AXES)]).expect("set data");
    plot.setup_grid().expect("layout");
    assert_eq!(plot.y_axes().len(), MAX_AXES);
    assert!(plot.y_axes()[MAX_AXES - 1].used);
    assert!(plot.y_axes()[1..MAX_AXES - 1].iter().all(|a| !a.used));
}

#[test]
fn tiny_canvas_keeps_a_plot_area() {
    let plot = Plot::builder(12, 10).build(vec![line(vec![(0.0, 0.0), (1000.0, 1000.0)])]).expect("build plot");
    let offset = plot.plot_offset();
    assert!(offset.left + offset.right < 12.0);
    assert!(offset.top + offset.bottom < 10.0);
    assert!(plot.plot_width() >= 1.0 && plot.plot_height() >= 1.0);
}

#[test]
fn invalid_dimensions_are_rejected() {
    assert!(Plot::builder(0, 10).build(Vec::new()).is_err());
    let mut plot = Plot::builder(100, 100).build(Vec::new()).expect("empty plot");
    assert!(plot.resize(-1, 10).is_err());
    plot.resize(300, 200).expect("resize");
    assert_eq!((plot.width(), plot.height()), (300.0, 200.0));
}

#[test]
fn empty_plot_uses_unit_ranges() {
    let plot = Plot::builder(200, 200).build(Vec::new()).expect("empty plot");
    assert!(plot.series().is_empty());
    let mut rec = Recorder::new(200.0, 200.0);
    plot.draw(&mut rec);
    assert!(!rec.ops.is_empty());
}

/// Records hook calls and exercises each customization point.
#[derive(Default)]
struct HookLog {
    calls: RefCell<Vec<&'static str>>,
}

impl Plugin for HookLog {
    fn id(&self) -> &'static str {
        "hook-log"
    }

    fn process_options(&self, options: &mut Options) {
        self.calls.borrow_mut().push("options");
        options.grid.hoverable = true;
    }

    fn process_raw_data(&self, _series: &Series, _raw: &[RawPoint], _format: &mut Vec<FieldFormat>) {
        self.calls.borrow_mut().push("raw");
    }

    fn process_datapoints(&self, series: &mut Series) {
        self.calls.borrow_mut().push("datapoints");
        for v in series.datapoints.points.iter_mut().flatten() {
            *v *= 2.0;
        }
    }

    fn process_axis(&self, axis: &mut Axis) {
        self.calls.borrow_mut().push("axis");
        if axis.id.n == 1 && axis.direction() == plot_core::Direction::X {
            axis.install_tick_generator(plot_core::options::Callback(Rc::new(|a: &Axis| {
                vec![TickEntry::Labeled(a.min, "start".into()), TickEntry::Labeled(a.max, "end".into())]
            })));
        }
    }

    fn process_offset(&self, offset: &mut PlotOffset) {
        self.calls.borrow_mut().push("offset");
        offset.left += 30.0;
    }

    fn draw_background(&self, _plot: &Plot, _ctx: &mut dyn DrawContext) {
        self.calls.borrow_mut().push("background");
    }

    fn draw_series(&self, _plot: &Plot, _ctx: &mut dyn DrawContext, _series: &Series) {
        self.calls.borrow_mut().push("series");
    }

    fn draw(&self, _plot: &Plot, _ctx: &mut dyn DrawContext) {
        self.calls.borrow_mut().push("draw");
    }
}

#[test]
fn plugin_hooks_run_in_pipeline_order() {
    let hooks = Rc::new(HookLog::default());
    let plot = Plot::builder(400, 300)
        .plugin(Rc::clone(&hooks))
        .build(vec![line(vec![(0.0, 1.0), (5.0, 3.0)])])
        .expect("build plot");

    assert!(plot.options().grid.hoverable);
    assert_eq!(plot.y_axes()[0].datamax, Some(6.0));
    let labels: Vec<&str> = plot.x_axes()[0].ticks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["start", "end"]);

    {
        let calls = hooks.calls.borrow();
        let first = |name: &str| calls.iter().position(|c| *c == name).expect("hook called");
        assert!(first("options") < first("raw"));
        assert!(first("raw") < first("datapoints"));
        assert!(first("datapoints") < first("offset"));
        assert!(first("offset") < first("axis"));
    }

    hooks.calls.borrow_mut().clear();
    let mut rec = Recorder::new(400.0, 300.0);
    plot.draw(&mut rec);
    assert_eq!(*hooks.calls.borrow(), vec!["background", "series", "draw"]);
}

struct Inset(f64);

impl Plugin for Inset {
    fn id(&self) -> &'static str {
        "inset"
    }

    fn process_offset(&self, offset: &mut PlotOffset) {
        offset.left += self.0;
    }
}

#[test]
fn plugin_offset_shrinks_the_plot_area() {
    let data = vec![(0.0, 1.0), (5.0, 3.0)];
    let plain = Plot::builder(400, 300).build(vec![line(data.clone())]).expect("build plot");
    let inset = Plot::builder(400, 300).plugin(Inset(30.0)).build(vec![line(data)]).expect("build plot");
    assert_eq!(inset.plot_offset().left, plain.plot_offset().left + 30.0);
    assert_eq!(inset.plot_width(), plain.plot_width() - 30.0);
}

#[test]
fn markings_paint_bands_in_their_color() {
    let band = Marking {
        xaxis: Some(MarkingRange::span(1.0, 2.0)),
        yaxis: None,
        color: Some("#ff0000".into()),
        line_width: None,
    };
    let missing_axis = Marking {
        xaxis: Some(MarkingRange { from: Some(0.0), to: Some(1.0), axis: Some(7) }),
        color: Some("#00ff00".into()),
        ..Marking::default()
    };
    let options = Options { grid: GridOptions { markings: vec![band, missing_axis], ..GridOptions::default() }, ..Options::default() };
    let plot = Plot::builder(400, 300).options(options).build(vec![line(vec![(0.0, 0.0), (4.0, 4.0)])]).expect("build plot");

    let mut rec = Recorder::new(400.0, 300.0);
    plot.draw(&mut rec);
    let red = rec.fills().into_iter().filter(|p| p.color == Rgba::rgb(255, 0, 0)).count();
    assert_eq!(red, 1);
    let green = rec.fills().into_iter().filter(|p| p.color == Rgba::rgb(0, 255, 0)).count();
    assert_eq!(green, 0);
}

#[test]
fn markings_callback_sees_axis_ranges() {
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let grid = GridOptions::default().with_markings_fn(move |ranges| {
        *sink.borrow_mut() = Some(ranges.x[0]);
        vec![Marking { yaxis: Some(MarkingRange::at(2.0)), color: Some("blue".into()), ..Marking::default() }]
    });
    let options = Options { grid, ..Options::default() };
    let plot = Plot::builder(400, 300).options(options).build(vec![line(vec![(0.0, 0.0), (4.0, 4.0)])]).expect("build plot");

    let mut rec = Recorder::new(400.0, 300.0);
    plot.draw(&mut rec);
    assert_eq!(*seen.borrow(), Some((0.0, 4.0)));
    // A single-valued range becomes a line.
    let blue: Vec<_> = rec.strokes().into_iter().filter(|p| p.color == Rgba::rgb(0, 0, 255)).collect();
    assert_eq!(blue.len(), 1);
}

#[test]
fn legend_lists_labeled_series() {
    let plot = Plot::builder(400, 300)
        .build(vec![
            line(vec![(0.0, 0.0), (1.0, 1.0)]).label("beta"),
            line(vec![(0.0, 1.0), (1.0, 0.0)]),
            line(vec![(0.0, 2.0), (1.0, 2.0)]).label("alpha"),
        ])
        .expect("build plot");
    let mut rec = Recorder::new(400.0, 300.0);
    plot.draw(&mut rec);
    let texts: Vec<String> = rec.texts().into_iter().map(|t| t.0).collect();
    assert!(texts.contains(&"beta".to_string()));
    assert!(texts.contains(&"alpha".to_string()));

    let sorted = LegendOptions { sorted: Some(LegendSort::Ascending), ..LegendOptions::default() };
    let entries = legend_entries(plot.series(), &sorted);
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["alpha", "beta"]);
    assert_eq!(entries[0].series_index, 2);

    let reversed = LegendOptions { sorted: Some(LegendSort::Reverse), ..LegendOptions::default() };
    let labels: Vec<String> = legend_entries(plot.series(), &reversed).into_iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["alpha", "beta"]);

    // A custom comparator wins over the sort keyword.
    let by_series = LegendOptions { sorted: Some(LegendSort::Ascending), ..LegendOptions::default() }
        .with_sort_fn(|a, b| b.series_index.cmp(&a.series_index));
    let indices: Vec<usize> = legend_entries(plot.series(), &by_series).into_iter().map(|e| e.series_index).collect();
    assert_eq!(indices, vec![2, 0]);

    let hidden = LegendOptions::default().with_label_formatter(|l, _| (l != "beta").then(|| l.to_uppercase()));
    let labels: Vec<String> = legend_entries(plot.series(), &hidden).into_iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["ALPHA"]);
}

#[test]
fn hidden_legend_draws_no_text_boxes() {
    let options = Options { legend: LegendOptions { show: false, ..LegendOptions::default() }, ..Options::default() };
    let plot = Plot::builder(400, 300).options(options).build(vec![line(vec![(0.0, 0.0)]).label("only")]).expect("build plot");
    let mut rec = Recorder::new(400.0, 300.0);
    plot.draw(&mut rec);
    assert!(!rec.texts().iter().any(|t| t.0 == "only"));
}
