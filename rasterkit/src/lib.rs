//! Segmentation and reverse-indexing primitives for integer rasters.
//!
//! - [`clump`] groups equal-valued, 4-connected pixels into uniquely
//!   numbered clumps, restricted to a validity mask.
//! - [`ValueIndex`] records, for every distinct value of an n-dimensional
//!   array, the coordinates of all elements holding it.
//! - [`ops`] has the elementwise helpers that usually surround the two:
//!   mask algebra, layer stacking, edge detection and histogram stretch.
//!
//! A typical pipeline labels a classified raster, then builds a
//! [`ValueIndex`] over the labels to visit each clump's pixels directly.

pub mod clump;
pub mod common;
pub mod config;
pub mod error;
pub mod ops;
pub mod prelude;
pub mod sample;
pub mod value_index;

pub use clump::{clump_size_image, clump_sizes, label, label_raster, Clumps};
pub use crate::common::{Buffer2, BufferN};
pub use config::{LookupStrategy, StretchParams, ValueIndexConfig};
pub use error::{Error, Result};
pub use sample::{IntegerSample, Raster, SampleType};
pub use value_index::{Coordinates, DynValueIndex, ValueIndex};
