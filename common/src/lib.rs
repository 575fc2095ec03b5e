//! Shared raster containers and logging setup for the rasterkit workspace.

pub mod buffer2;
pub mod buffer_n;
pub mod log_setup;

pub use buffer2::Buffer2;
pub use buffer_n::{BufferN, ShapeError};
