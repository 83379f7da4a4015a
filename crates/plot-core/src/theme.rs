// File: crates/plot-core/src/theme.rs
// Summary: Named color presets restyling the palette, grid, markings and legend.

use crate::color::Rgba;
use crate::options::Options;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    /// Canvas and plot area background.
    pub background: Rgba,
    /// Grid, border and tick label color.
    pub grid: Rgba,
    pub markings: Rgba,
    pub legend_background: Rgba,
    pub legend_border: Rgba,
    pub palette: [Rgba; 5],
}

impl Theme {
    /// The stock look on a white canvas.
    pub fn classic() -> Self {
        Self {
            name: "classic",
            background: Rgba::WHITE,
            grid: Rgba::rgb(0x54, 0x54, 0x54),
            markings: Rgba::rgb(0xf4, 0xf4, 0xf4),
            legend_background: Rgba::WHITE,
            legend_border: Rgba::rgb(0xcc, 0xcc, 0xcc),
            palette: [
                Rgba::rgb(0xed, 0xc2, 0x40),
                Rgba::rgb(0xaf, 0xd8, 0xf8),
                Rgba::rgb(0xcb, 0x4b, 0x4b),
                Rgba::rgb(0x4d, 0xa7, 0x4d),
                Rgba::rgb(0x94, 0x40, 0xed),
            ],
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            grid: Rgba::rgb(180, 180, 190),
            markings: Rgba::rgb(40, 40, 45),
            legend_background: Rgba::rgb(30, 30, 34),
            legend_border: Rgba::rgb(90, 90, 100),
            palette: [
                Rgba::rgb(64, 160, 255),
                Rgba::rgb(255, 230, 70),
                Rgba::rgb(220, 80, 80),
                Rgba::rgb(40, 200, 120),
                Rgba::rgb(190, 120, 255),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(250, 250, 252),
            grid: Rgba::rgb(60, 60, 70),
            markings: Rgba::rgb(230, 230, 235),
            legend_background: Rgba::rgb(255, 255, 255),
            legend_border: Rgba::rgb(200, 200, 210),
            palette: [
                Rgba::rgb(32, 120, 200),
                Rgba::rgb(200, 60, 60),
                Rgba::rgb(20, 160, 90),
                Rgba::rgb(230, 150, 20),
                Rgba::rgb(120, 70, 190),
            ],
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: Rgba::rgb(0x00, 0x2b, 0x36), // base03
            grid: Rgba::rgb(0x93, 0xa1, 0xa1),       // base1
            markings: Rgba::rgb(0x07, 0x36, 0x42),   // base02
            legend_background: Rgba::rgb(0x07, 0x36, 0x42),
            legend_border: Rgba::rgb(0x58, 0x6e, 0x75),
            palette: [
                Rgba::rgb(0x26, 0x8b, 0xd2), // blue
                Rgba::rgb(0xb5, 0x89, 0x00), // yellow
                Rgba::rgb(0xdc, 0x32, 0x2f), // red
                Rgba::rgb(0x2a, 0xa1, 0x98), // cyan
                Rgba::rgb(0x6c, 0x71, 0xc4), // violet
            ],
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: Rgba::rgb(0xfd, 0xf6, 0xe3), // base3
            grid: Rgba::rgb(0x65, 0x7b, 0x83),       // base00
            markings: Rgba::rgb(0xee, 0xe8, 0xd5),   // base2
            legend_background: Rgba::rgb(0xee, 0xe8, 0xd5),
            legend_border: Rgba::rgb(0x93, 0xa1, 0xa1),
            palette: [
                Rgba::rgb(0x26, 0x8b, 0xd2),
                Rgba::rgb(0xcb, 0x4b, 0x16),
                Rgba::rgb(0xdc, 0x32, 0x2f),
                Rgba::rgb(0x85, 0x99, 0x00),
                Rgba::rgb(0xd3, 0x36, 0x82),
            ],
        }
    }

    /// Restyle `options` in place. Series-level colors are left alone.
    pub fn apply(&self, options: &mut Options) {
        options.colors = self.palette.iter().map(|c| c.to_string()).collect();
        options.grid.color = self.grid.to_string();
        options.grid.background_color = Some(self.background.to_string());
        options.grid.markings_color = self.markings.to_string();
        options.legend.background_color = Some(self.legend_background.to_string());
        options.legend.label_box_border_color = self.legend_border.to_string();
    }
}

/// Built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::classic(), Theme::dark(), Theme::light(), Theme::solarized_dark(), Theme::solarized_light()]
}

/// Find a theme by its `name`, falling back to classic.
pub fn find(name: &str) -> Theme {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name)).unwrap_or_else(Theme::classic)
}
