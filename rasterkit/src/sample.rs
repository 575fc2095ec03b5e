//! Element types accepted by the labeling and indexing routines.

use std::fmt;
use std::hash::Hash;

use num_traits::PrimInt;

use crate::common::BufferN;

/// Fixed-width integer element of a categorical raster.
///
/// Values are widened to `i128` for range arithmetic so that the full span
/// of `u64` and `i64` can be represented without overflow.
pub trait IntegerSample: PrimInt + Hash + fmt::Debug + Send + Sync + 'static {
    const SAMPLE_TYPE: SampleType;

    fn to_wide(self) -> i128;

    /// Narrow a wide value, or `None` if it does not fit this type.
    fn from_wide(value: i128) -> Option<Self>;
}

macro_rules! impl_integer_sample {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntegerSample for $ty {
                const SAMPLE_TYPE: SampleType = SampleType::$variant;

                #[inline]
                fn to_wide(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_wide(value: i128) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_integer_sample!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
);

/// Element type of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl SampleType {
    pub fn is_integer(self) -> bool {
        !matches!(self, SampleType::F32 | SampleType::F64)
    }

    pub fn byte_size(self) -> usize {
        match self {
            SampleType::U8 | SampleType::I8 => 1,
            SampleType::U16 | SampleType::I16 => 2,
            SampleType::U32 | SampleType::I32 | SampleType::F32 => 4,
            SampleType::U64 | SampleType::I64 | SampleType::F64 => 8,
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SampleType::U8 => "u8",
            SampleType::U16 => "u16",
            SampleType::U32 => "u32",
            SampleType::U64 => "u64",
            SampleType::I8 => "i8",
            SampleType::I16 => "i16",
            SampleType::I32 => "i32",
            SampleType::I64 => "i64",
            SampleType::F32 => "f32",
            SampleType::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// An array whose element type is only known at runtime, e.g. a band read by
/// the surrounding pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    U8(BufferN<u8>),
    U16(BufferN<u16>),
    U32(BufferN<u32>),
    U64(BufferN<u64>),
    I8(BufferN<i8>),
    I16(BufferN<i16>),
    I32(BufferN<i32>),
    I64(BufferN<i64>),
    F32(BufferN<f32>),
    F64(BufferN<f64>),
}

/// Evaluate `$body` with `$buf` bound to the inner buffer of any variant.
macro_rules! with_buffer {
    ($raster:expr, $buf:ident => $body:expr) => {
        match $raster {
            Raster::U8($buf) => $body,
            Raster::U16($buf) => $body,
            Raster::U32($buf) => $body,
            Raster::U64($buf) => $body,
            Raster::I8($buf) => $body,
            Raster::I16($buf) => $body,
            Raster::I32($buf) => $body,
            Raster::I64($buf) => $body,
            Raster::F32($buf) => $body,
            Raster::F64($buf) => $body,
        }
    };
}

impl Raster {
    pub fn sample_type(&self) -> SampleType {
        match self {
            Raster::U8(_) => SampleType::U8,
            Raster::U16(_) => SampleType::U16,
            Raster::U32(_) => SampleType::U32,
            Raster::U64(_) => SampleType::U64,
            Raster::I8(_) => SampleType::I8,
            Raster::I16(_) => SampleType::I16,
            Raster::I32(_) => SampleType::I32,
            Raster::I64(_) => SampleType::I64,
            Raster::F32(_) => SampleType::F32,
            Raster::F64(_) => SampleType::F64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        with_buffer!(self, buf => buf.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn len(&self) -> usize {
        with_buffer!(self, buf => buf.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! impl_raster_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<BufferN<$ty>> for Raster {
                fn from(buffer: BufferN<$ty>) -> Self {
                    Raster::$variant(buffer)
                }
            }
        )*
    };
}

impl_raster_from!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);
