// File: crates/plot-core/src/error.rs
// Summary: Library error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("{axis}: time mode requires an installed tick generator")]
    MissingTimeSupport { axis: String },
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("failed to create raster surface {width}x{height}")]
    Surface { width: i32, height: i32 },
    #[error("failed to encode {0}")]
    Encode(&'static str),
    #[error("invalid options: {0}")]
    Options(String),
}

pub type Result<T> = std::result::Result<T, PlotError>;
