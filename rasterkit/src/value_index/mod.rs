//! Reverse index from raster values to the coordinates holding them.
//!
//! Building the index costs two passes over the array: one to count every
//! value, one to scatter coordinates into a packed table grouped by value.
//! Afterwards all coordinates of a value are a contiguous slice, which is far
//! cheaper than scanning the whole array once per distinct value.

mod coordinates;
pub mod cursor;
mod dynamic;
mod lookup;

pub use coordinates::Coordinates;
pub use cursor::{NdCursor, MAX_DIMS};
pub use dynamic::DynValueIndex;
pub use lookup::NOT_TRACKED;

use hashbrown::HashMap;

use crate::common::BufferN;
use crate::config::ValueIndexConfig;
use crate::error::{Error, Result};
use crate::sample::IntegerSample;
use lookup::{dense_span, try_filled, ValueLookup};

/// All coordinates of every distinct value in an integer array.
///
/// Null values are neither counted nor indexed.
#[derive(Debug, Clone)]
pub struct ValueIndex<T> {
    shape: Vec<usize>,
    null_values: Vec<T>,
    values: Vec<T>,
    counts: Vec<u32>,
    start: Vec<u32>,
    end: Vec<u32>,
    indexes: Vec<u32>,
    lookup: ValueLookup<T>,
}

impl<T: IntegerSample> ValueIndex<T> {
    /// Index `array` with the default configuration.
    pub fn build(array: &BufferN<T>, null_values: &[T]) -> Result<Self> {
        Self::build_with_config(array, null_values, &ValueIndexConfig::default())
    }

    /// # Panics
    ///
    /// Panics if `config` is invalid.
    pub fn build_with_config(
        array: &BufferN<T>,
        null_values: &[T],
        config: &ValueIndexConfig,
    ) -> Result<Self> {
        config.validate();

        let shape = array.shape();
        if shape.is_empty() || shape.len() > MAX_DIMS {
            return Err(Error::UnsupportedRank {
                rank: shape.len(),
                min: 1,
                max: MAX_DIMS,
            });
        }
        if let Some(&len) = shape.iter().find(|&&len| len > u32::MAX as usize) {
            return Err(Error::TooManyElements { count: len as u64 });
        }

        let mut nulls = null_values.to_vec();
        nulls.sort_unstable();
        nulls.dedup();

        let is_null = |v: &T| nulls.binary_search(v).is_ok();

        let Some(range) = tracked_range(array.data(), &is_null) else {
            return Ok(Self::empty(shape, nulls));
        };
        if range.count > u32::MAX as u64 {
            return Err(Error::TooManyElements { count: range.count });
        }
        let span = (range.max - range.min) as u128 + 1;
        let dense = config.lookup.prefers_dense(span);

        let tallies = if dense {
            dense_tallies(array.data(), &is_null, range.min, range.max)?
        } else {
            hashed_tallies(array.data(), &is_null)
        };
        let total = range.count;
        let (values, counts): (Vec<T>, Vec<u32>) = tallies.into_iter().unzip();

        let mut start = Vec::with_capacity(counts.len());
        let mut end = Vec::with_capacity(counts.len());
        let mut offset = 0u32;
        for &count in &counts {
            start.push(offset);
            offset += count;
            end.push(offset);
        }

        let lookup = ValueLookup::build(&values, dense)?;
        if lookup.is_dense() && lookup.len() > 0 {
            let fill = values.len() as f64 / lookup.len() as f64;
            if fill < config.sparse_warn_ratio {
                tracing::warn!(
                    distinct = values.len(),
                    table_entries = lookup.len(),
                    fill,
                    "Dense value lookup is sparse, consider LookupStrategy::Hashed"
                );
            }
        }

        let ndim = shape.len();
        let mut indexes = try_filled(total as usize * ndim, 0u32, "packed indexes")?;
        if !values.is_empty() {
            let mut next_row = start.clone();
            let mut cursor = NdCursor::new(shape);
            for &value in array.iter() {
                if let Some(pos) = lookup.position(value) {
                    let row = next_row[pos] as usize;
                    cursor.write_coords(&mut indexes[row * ndim..(row + 1) * ndim]);
                    next_row[pos] += 1;
                }
                cursor.advance();
            }
        }

        tracing::debug!(
            shape = ?shape,
            distinct = values.len(),
            indexed = total,
            dense_lookup = lookup.is_dense(),
            lookup_entries = lookup.len(),
            "Built value index"
        );

        Ok(Self {
            shape: shape.to_vec(),
            null_values: nulls,
            values,
            counts,
            start,
            end,
            indexes,
            lookup,
        })
    }

    fn empty(shape: &[usize], null_values: Vec<T>) -> Self {
        Self {
            shape: shape.to_vec(),
            null_values,
            values: Vec::new(),
            counts: Vec::new(),
            start: Vec::new(),
            end: Vec::new(),
            indexes: Vec::new(),
            lookup: ValueLookup::Empty,
        }
    }

    /// Coordinates of every element equal to `value`.
    ///
    /// Values that do not occur, and null values, give empty coordinates.
    pub fn get_indexes(&self, value: T) -> Coordinates<'_> {
        match self.values.binary_search(&value) {
            Ok(pos) => self.coordinates_at(pos),
            Err(_) => Coordinates::empty(self.ndim()),
        }
    }

    /// [`get_indexes`](Self::get_indexes) for a value that may not fit `T`.
    pub fn get_indexes_wide(&self, value: i128) -> Coordinates<'_> {
        match T::from_wide(value) {
            Some(value) => self.get_indexes(value),
            None => Coordinates::empty(self.ndim()),
        }
    }

    /// Position of `value` within [`values`](Self::values), in constant time.
    #[inline]
    pub fn position(&self, value: T) -> Option<usize> {
        self.lookup.position(value)
    }

    /// Every indexed value with its coordinates, ascending by value.
    pub fn iter(&self) -> impl Iterator<Item = (T, Coordinates<'_>)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(pos, &value)| (value, self.coordinates_at(pos)))
    }

    fn coordinates_at(&self, pos: usize) -> Coordinates<'_> {
        let ndim = self.ndim();
        let from = self.start[pos] as usize * ndim;
        let to = self.end[pos] as usize * ndim;
        Coordinates::new(ndim, &self.indexes[from..to])
    }

    /// Distinct indexed values, strictly ascending.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// First packed row of each value.
    #[inline]
    pub fn start(&self) -> &[u32] {
        &self.start
    }

    /// One past the last packed row of each value.
    #[inline]
    pub fn end(&self) -> &[u32] {
        &self.end
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Sorted, deduplicated.
    #[inline]
    pub fn null_values(&self) -> &[T] {
        &self.null_values
    }

    /// Packed `total_count() x ndim()` coordinate table.
    #[inline]
    pub fn indexes(&self) -> &[u32] {
        &self.indexes
    }

    #[inline]
    pub fn total_count(&self) -> usize {
        self.indexes.len() / self.ndim()
    }
}

/// Bounds and size of the non-null part of an array.
struct TrackedRange {
    min: i128,
    max: i128,
    count: u64,
}

fn tracked_range<T: IntegerSample>(
    data: &[T],
    is_null: &impl Fn(&T) -> bool,
) -> Option<TrackedRange> {
    let mut range: Option<TrackedRange> = None;
    for v in data.iter().filter(|v| !is_null(*v)) {
        let v = v.to_wide();
        match range.as_mut() {
            Some(r) => {
                r.min = r.min.min(v);
                r.max = r.max.max(v);
                r.count += 1;
            }
            None => {
                range = Some(TrackedRange {
                    min: v,
                    max: v,
                    count: 1,
                })
            }
        }
    }
    range
}

/// Occurrences of every non-null value in `min..=max`, ascending, zero counts
/// dropped. The caller guarantees the non-null count fits in `u32`.
fn dense_tallies<T: IntegerSample>(
    data: &[T],
    is_null: &impl Fn(&T) -> bool,
    min: i128,
    max: i128,
) -> Result<Vec<(T, u32)>> {
    let mut histogram = try_filled(dense_span(min, max)?, 0u32, "value histogram")?;
    for v in data.iter().filter(|v| !is_null(*v)) {
        histogram[(v.to_wide() - min) as usize] += 1;
    }

    Ok(histogram
        .into_iter()
        .enumerate()
        .filter(|&(_, count)| count > 0)
        .filter_map(|(offset, count)| T::from_wide(min + offset as i128).map(|v| (v, count)))
        .collect())
}

/// Occurrences of every distinct non-null value, ascending.
fn hashed_tallies<T: IntegerSample>(data: &[T], is_null: &impl Fn(&T) -> bool) -> Vec<(T, u32)> {
    let mut map: HashMap<T, u32> = HashMap::new();
    for &v in data.iter().filter(|v| !is_null(*v)) {
        *map.entry(v).or_insert(0) += 1;
    }

    let mut tallies: Vec<(T, u32)> = map.into_iter().collect();
    tallies.sort_unstable_by_key(|&(v, _)| v);
    tallies
}
