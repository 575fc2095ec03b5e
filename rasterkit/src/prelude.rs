//! Common imports for working with rasterkit.

pub use crate::clump::{clump_size_image, clump_sizes, label, label_raster, Clumps};
pub use crate::common::{Buffer2, BufferN};
pub use crate::config::{LookupStrategy, StretchParams, ValueIndexConfig};
pub use crate::error::{Error, Result};
pub use crate::ops::{Layers, StackPart};
pub use crate::sample::{IntegerSample, Raster, SampleType};
pub use crate::value_index::{Coordinates, DynValueIndex, ValueIndex};
