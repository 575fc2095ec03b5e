use hashbrown::HashMap;

use crate::error::{Error, Result};
use crate::sample::IntegerSample;

/// Dense table entry for a value inside the range that is not tracked.
pub const NOT_TRACKED: u32 = u32::MAX;

/// Number of table entries needed to cover `min..=max`, or an error if that
/// exceeds 32-bit addressing.
pub(crate) fn dense_span(min: i128, max: i128) -> Result<usize> {
    let span = (max - min) as u128 + 1;
    if span > u32::MAX as u128 {
        return Err(Error::ValueRange { min, max, span });
    }
    Ok(span as usize)
}

/// A vector of `len` copies of `value`, or an error if the memory cannot be
/// reserved.
pub(crate) fn try_filled<V: Clone>(len: usize, value: V, what: &'static str) -> Result<Vec<V>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed {
            what,
            entries: len as u64,
        })?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Maps a raw value to its position in the sorted `values` list.
#[derive(Debug, Clone)]
pub(crate) enum ValueLookup<T> {
    /// Nothing is tracked.
    Empty,
    /// `table[value - min]` holds the position or [`NOT_TRACKED`].
    Dense { min: i128, table: Vec<u32> },
    Hashed(HashMap<T, u32>),
}

impl<T: IntegerSample> ValueLookup<T> {
    /// `values` must be strictly ascending.
    pub(crate) fn build(values: &[T], dense: bool) -> Result<Self> {
        let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
            return Ok(ValueLookup::Empty);
        };

        if !dense {
            let map = values
                .iter()
                .enumerate()
                .map(|(pos, &value)| (value, pos as u32))
                .collect();
            return Ok(ValueLookup::Hashed(map));
        }

        let min = first.to_wide();
        let span = dense_span(min, last.to_wide())?;
        let mut table = try_filled(span, NOT_TRACKED, "value lookup table")?;
        for (pos, &value) in values.iter().enumerate() {
            table[(value.to_wide() - min) as usize] = pos as u32;
        }

        Ok(ValueLookup::Dense { min, table })
    }

    pub(crate) fn position(&self, value: T) -> Option<usize> {
        match self {
            ValueLookup::Empty => None,
            ValueLookup::Dense { min, table } => {
                let offset = value.to_wide() - min;
                if offset < 0 || offset >= table.len() as i128 {
                    return None;
                }
                match table[offset as usize] {
                    NOT_TRACKED => None,
                    pos => Some(pos as usize),
                }
            }
            ValueLookup::Hashed(map) => map.get(&value).map(|&pos| pos as usize),
        }
    }

    /// Entries held by the lookup structure.
    pub(crate) fn len(&self) -> usize {
        match self {
            ValueLookup::Empty => 0,
            ValueLookup::Dense { table, .. } => table.len(),
            ValueLookup::Hashed(map) => map.len(),
        }
    }

    pub(crate) fn is_dense(&self) -> bool {
        matches!(self, ValueLookup::Dense { .. })
    }
}
