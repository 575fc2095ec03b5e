use std::slice::ChunksExact;

/// Coordinate tuples of every element holding one value.
///
/// Stored packed: row `i` is the `ndim` coordinates of the `i`-th match, in
/// row-major traversal order. [`to_columns`](Self::to_columns) gives the
/// per-dimension view, suitable for fancy indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coordinates<'a> {
    ndim: usize,
    rows: &'a [u32],
}

impl<'a> Coordinates<'a> {
    pub(crate) fn new(ndim: usize, rows: &'a [u32]) -> Self {
        debug_assert!(ndim > 0);
        debug_assert_eq!(rows.len() % ndim, 0);
        Self { ndim, rows }
    }

    /// No matches, still reporting `ndim` columns.
    pub fn empty(ndim: usize) -> Self {
        Self { ndim, rows: &[] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len() / self.ndim
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    #[inline]
    pub fn row(&self, i: usize) -> &'a [u32] {
        &self.rows[i * self.ndim..(i + 1) * self.ndim]
    }

    pub fn rows(&self) -> ChunksExact<'a, u32> {
        self.rows.chunks_exact(self.ndim)
    }

    /// Coordinates along dimension `dim` for every match.
    pub fn column(&self, dim: usize) -> impl Iterator<Item = u32> + 'a {
        assert!(dim < self.ndim, "dimension {dim} out of range for rank {}", self.ndim);
        let (rows, ndim) = (self.rows, self.ndim);
        rows.iter().skip(dim).step_by(ndim).copied()
    }

    /// One sequence per dimension.
    pub fn to_columns(&self) -> Vec<Vec<u32>> {
        (0..self.ndim).map(|dim| self.column(dim).collect()).collect()
    }

    #[inline]
    pub fn packed(&self) -> &'a [u32] {
        self.rows
    }

    /// Row-major linear offsets into an array of `shape`.
    pub fn to_offsets(&self, shape: &[usize]) -> Vec<usize> {
        assert_eq!(shape.len(), self.ndim, "shape rank must match coordinates");
        self.rows()
            .map(|row| {
                row.iter()
                    .zip(shape)
                    .fold(0, |acc, (&c, &len)| acc * len + c as usize)
            })
            .collect()
    }
}
