// File: crates/plot-core/src/legend.rs
// Summary: Legend entries (format, sort) and the in-canvas legend box.

use crate::canvas::{DrawContext, StrokeStyle, TextAlign, TextBaseline};
use crate::color::{Channel, Rgba};
use crate::options::{LegendOptions, LegendPosition, LegendSort};
use crate::plot::Plot;
use crate::series::Series;

const SWATCH_WIDTH: f64 = 18.0;
const SWATCH_HEIGHT: f64 = 14.0;
const LABEL_OFFSET: f64 = 23.0;
const COLUMN_GAP: f64 = 8.0;
const PADDING: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
    pub series_index: usize,
}

/// Entries for every labeled series, formatted and sorted as configured.
/// A formatter returning `None` hides the entry.
pub fn legend_entries(series: &[Series], options: &LegendOptions) -> Vec<LegendEntry> {
    let mut entries: Vec<LegendEntry> = series
        .iter()
        .enumerate()
        .filter_map(|(i, s)| {
            let label = s.label.as_deref().filter(|l| !l.is_empty())?;
            let label = match &options.label_formatter {
                Some(f) => f(label, s)?,
                None => label.to_string(),
            };
            (!label.is_empty()).then(|| LegendEntry { label, color: s.color, series_index: i })
        })
        .collect();

    if let Some(sort) = &options.sort_fn {
        entries.sort_by(|a, b| sort(a, b));
    } else {
        match options.sorted {
            Some(LegendSort::Ascending) => entries.sort_by(|a, b| a.label.cmp(&b.label)),
            Some(LegendSort::Descending) => entries.sort_by(|a, b| b.label.cmp(&a.label)),
            Some(LegendSort::Reverse) => entries.reverse(),
            None => {}
        }
    }
    entries
}

/// Draw the legend box in the configured plot corner.
pub fn draw_legend(plot: &Plot, ctx: &mut dyn DrawContext) {
    let options = &plot.options().legend;
    if !options.show {
        return;
    }
    let entries = legend_entries(plot.series(), options);
    if entries.is_empty() {
        return;
    }

    let font = options.font.clone().unwrap_or_default();
    let grid_color = Rgba::parse(&plot.options().grid.color);
    let text_color = font.color.as_deref().map(Rgba::parse).unwrap_or(grid_color);
    let measure = plot.text_measure();

    let columns = options.columns.max(1);
    let rows = entries.len().div_ceil(columns);
    let row_height = font.line_height().max(SWATCH_HEIGHT) + PADDING;

    let mut column_widths = vec![0.0f64; columns];
    for (i, entry) in entries.iter().enumerate() {
        let (w, _) = measure.measure(&entry.label, &font);
        let col = i % columns;
        column_widths[col] = column_widths[col].max(LABEL_OFFSET + w);
    }
    let used_columns = columns.min(entries.len());
    let width = column_widths[..used_columns].iter().sum::<f64>() + COLUMN_GAP * (used_columns - 1) as f64 + 2.0 * PADDING;
    let height = rows as f64 * row_height + 2.0 * PADDING;

    let offset = plot.plot_offset();
    let (mx, my) = options.margin.xy();
    let left = match options.position {
        LegendPosition::Ne | LegendPosition::Se => offset.left + plot.plot_width() - mx - width,
        LegendPosition::Nw | LegendPosition::Sw => offset.left + mx,
    };
    let top = match options.position {
        LegendPosition::Ne | LegendPosition::Nw => offset.top + my,
        LegendPosition::Se | LegendPosition::Sw => offset.top + plot.plot_height() - my - height,
    };

    let background = options
        .background_color
        .as_deref()
        .or(plot.options().grid.background_color.as_deref())
        .map(|c| Rgba::parse(c).with_alpha(1.0))
        .unwrap_or(Rgba::WHITE);
    if options.background_opacity > 0.0 {
        ctx.fill_rect(left, top, width, height, background.scale(Channel::ALPHA, options.background_opacity));
    }

    let border = StrokeStyle::new(Rgba::parse(&options.label_box_border_color), 1.0);
    for (i, entry) in entries.iter().enumerate() {
        let (row, col) = (i / columns, i % columns);
        let x = left + PADDING + column_widths[..col].iter().sum::<f64>() + COLUMN_GAP * col as f64;
        let y = top + PADDING + row as f64 * row_height;
        let sy = y + (row_height - SWATCH_HEIGHT) / 2.0;

        ctx.stroke_rect(x + 0.5, sy + 0.5, SWATCH_WIDTH - 1.0, SWATCH_HEIGHT - 1.0, &border);
        ctx.fill_rect(x + 2.0, sy + 2.0, SWATCH_WIDTH - 4.0, SWATCH_HEIGHT - 4.0, entry.color);
        ctx.fill_text(&entry.label, x + LABEL_OFFSET, y + row_height / 2.0, TextAlign::Left, TextBaseline::Middle, &font, text_color);
    }
}
