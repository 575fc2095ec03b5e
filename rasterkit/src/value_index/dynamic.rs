use super::{Coordinates, ValueIndex};
use crate::common::BufferN;
use crate::config::ValueIndexConfig;
use crate::error::{Error, Result};
use crate::sample::{IntegerSample, Raster, SampleType};

/// A [`ValueIndex`] over a raster whose element type is only known at
/// runtime. Values cross the boundary as `i128`.
#[derive(Debug, Clone)]
pub enum DynValueIndex {
    U8(ValueIndex<u8>),
    U16(ValueIndex<u16>),
    U32(ValueIndex<u32>),
    U64(ValueIndex<u64>),
    I8(ValueIndex<i8>),
    I16(ValueIndex<i16>),
    I32(ValueIndex<i32>),
    I64(ValueIndex<i64>),
}

macro_rules! with_index {
    ($index:expr, $inner:ident => $body:expr) => {
        match $index {
            DynValueIndex::U8($inner) => $body,
            DynValueIndex::U16($inner) => $body,
            DynValueIndex::U32($inner) => $body,
            DynValueIndex::U64($inner) => $body,
            DynValueIndex::I8($inner) => $body,
            DynValueIndex::I16($inner) => $body,
            DynValueIndex::I32($inner) => $body,
            DynValueIndex::I64($inner) => $body,
        }
    };
}

impl DynValueIndex {
    /// Null values that cannot be represented in the raster's element type
    /// never occur in it and are dropped.
    pub fn build(
        raster: &Raster,
        null_values: &[i128],
        config: &ValueIndexConfig,
    ) -> Result<Self> {
        Ok(match raster {
            Raster::U8(buf) => DynValueIndex::U8(build_narrowed(buf, null_values, config)?),
            Raster::U16(buf) => DynValueIndex::U16(build_narrowed(buf, null_values, config)?),
            Raster::U32(buf) => DynValueIndex::U32(build_narrowed(buf, null_values, config)?),
            Raster::U64(buf) => DynValueIndex::U64(build_narrowed(buf, null_values, config)?),
            Raster::I8(buf) => DynValueIndex::I8(build_narrowed(buf, null_values, config)?),
            Raster::I16(buf) => DynValueIndex::I16(build_narrowed(buf, null_values, config)?),
            Raster::I32(buf) => DynValueIndex::I32(build_narrowed(buf, null_values, config)?),
            Raster::I64(buf) => DynValueIndex::I64(build_narrowed(buf, null_values, config)?),
            Raster::F32(_) | Raster::F64(_) => {
                return Err(Error::NonIntegerType {
                    sample_type: raster.sample_type(),
                })
            }
        })
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            DynValueIndex::U8(_) => SampleType::U8,
            DynValueIndex::U16(_) => SampleType::U16,
            DynValueIndex::U32(_) => SampleType::U32,
            DynValueIndex::U64(_) => SampleType::U64,
            DynValueIndex::I8(_) => SampleType::I8,
            DynValueIndex::I16(_) => SampleType::I16,
            DynValueIndex::I32(_) => SampleType::I32,
            DynValueIndex::I64(_) => SampleType::I64,
        }
    }

    /// Values outside the element type's range give empty coordinates.
    pub fn get_indexes(&self, value: i128) -> Coordinates<'_> {
        with_index!(self, index => index.get_indexes_wide(value))
    }

    pub fn values(&self) -> Vec<i128> {
        with_index!(self, index => index.values().iter().map(|v| v.to_wide()).collect())
    }

    pub fn counts(&self) -> &[u32] {
        with_index!(self, index => index.counts())
    }

    pub fn start(&self) -> &[u32] {
        with_index!(self, index => index.start())
    }

    pub fn end(&self) -> &[u32] {
        with_index!(self, index => index.end())
    }

    pub fn indexes(&self) -> &[u32] {
        with_index!(self, index => index.indexes())
    }

    pub fn shape(&self) -> &[usize] {
        with_index!(self, index => index.shape())
    }

    pub fn ndim(&self) -> usize {
        with_index!(self, index => index.ndim())
    }

    pub fn total_count(&self) -> usize {
        with_index!(self, index => index.total_count())
    }
}

fn build_narrowed<T: IntegerSample>(
    array: &BufferN<T>,
    null_values: &[i128],
    config: &ValueIndexConfig,
) -> Result<ValueIndex<T>> {
    let nulls: Vec<T> = null_values
        .iter()
        .filter_map(|&v| T::from_wide(v))
        .collect();
    ValueIndex::build_with_config(array, &nulls, config)
}
