//! Raster containers shared with the rest of the workspace.

pub use ::common::buffer2::Buffer2;
pub use ::common::buffer_n::{BufferN, ShapeError};
