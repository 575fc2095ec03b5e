/// Highest array rank a [`NdCursor`] can walk.
pub const MAX_DIMS: usize = 6;

/// Row-major multi-index over an n-dimensional shape.
///
/// Starts at the all-zero coordinate. Each [`advance`](Self::advance) moves
/// to the next element with the last dimension varying fastest.
#[derive(Debug, Clone)]
pub struct NdCursor {
    shape: [u32; MAX_DIMS],
    coords: [u32; MAX_DIMS],
    ndim: usize,
}

impl NdCursor {
    /// # Panics
    ///
    /// Panics if the rank exceeds [`MAX_DIMS`] or a dimension does not fit in
    /// `u32`. Callers validate both beforehand.
    pub fn new(shape: &[usize]) -> Self {
        assert!(
            shape.len() <= MAX_DIMS,
            "rank {} exceeds the supported maximum of {}",
            shape.len(),
            MAX_DIMS
        );

        let mut dims = [0u32; MAX_DIMS];
        for (dst, &len) in dims.iter_mut().zip(shape) {
            assert!(
                len <= u32::MAX as usize,
                "dimension length {len} does not fit in u32"
            );
            *dst = len as u32;
        }

        Self {
            shape: dims,
            coords: [0; MAX_DIMS],
            ndim: shape.len(),
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.ndim
    }

    #[inline]
    pub fn coords(&self) -> &[u32] {
        &self.coords[..self.ndim]
    }

    #[inline]
    pub fn write_coords(&self, out: &mut [u32]) {
        out.copy_from_slice(self.coords());
    }

    /// Step to the next element. Returns `false` once the last element has
    /// been passed; the coordinates wrap back to zero in that case.
    pub fn advance(&mut self) -> bool {
        for dim in (0..self.ndim).rev() {
            self.coords[dim] += 1;
            if self.coords[dim] < self.shape[dim] {
                return true;
            }
            self.coords[dim] = 0;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(shape: &[usize]) -> Vec<Vec<u32>> {
        let mut cursor = NdCursor::new(shape);
        let mut visited = vec![cursor.coords().to_vec()];
        while cursor.advance() {
            visited.push(cursor.coords().to_vec());
        }
        visited
    }

    #[test]
    fn test_rank_one_counts_up() {
        assert_eq!(walk(&[3]), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_last_dimension_varies_fastest() {
        assert_eq!(
            walk(&[2, 3]),
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_visits_every_element_once_at_max_rank() {
        let shape = [2, 1, 3, 2, 1, 2];
        let visited = walk(&shape);
        assert_eq!(visited.len(), 24);
        assert_eq!(visited.last().unwrap(), &vec![1, 0, 2, 1, 0, 1]);

        let mut sorted = visited.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 24);
    }

    #[test]
    fn test_write_coords_copies_current_position() {
        let mut cursor = NdCursor::new(&[2, 2, 2]);
        cursor.advance();
        cursor.advance();
        cursor.advance();
        let mut out = [9u32; 3];
        cursor.write_coords(&mut out);
        assert_eq!(out, [0, 1, 1]);
        assert_eq!(cursor.ndim(), 3);
    }

    #[test]
    #[should_panic(expected = "exceeds the supported maximum")]
    fn test_rank_seven_panics() {
        NdCursor::new(&[1; 7]);
    }
}
