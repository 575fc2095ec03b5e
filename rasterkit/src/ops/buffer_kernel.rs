use crate::common::Buffer2;

/// Disk of the given radius for buffering masks: a `(2r + 1)` square with 1
/// where the distance to the centre is at most `radius`. `None` for radius 0.
pub fn make_buffer_kernel(radius: usize) -> Option<Buffer2<u8>> {
    if radius == 0 {
        return None;
    }

    let size = 2 * radius + 1;
    let limit = radius * radius;
    let mut kernel = Vec::with_capacity(size * size);
    for row in 0..size {
        let dy = row.abs_diff(radius);
        for col in 0..size {
            let dx = col.abs_diff(radius);
            kernel.push(u8::from(dx * dx + dy * dy <= limit));
        }
    }
    Some(Buffer2::new(size, size, kernel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_radius_has_no_kernel() {
        assert!(make_buffer_kernel(0).is_none());
    }

    #[test]
    fn test_radius_one_is_a_cross() {
        let kernel = make_buffer_kernel(1).unwrap();
        let expected = Buffer2::from_rows(&[[0u8, 1, 0], [1, 1, 1], [0, 1, 0]]);
        assert_eq!(kernel, expected);
    }

    #[test]
    fn test_radius_two_disk() {
        let kernel = make_buffer_kernel(2).unwrap();
        assert_eq!(kernel.shape(), [5, 5]);
        assert_eq!(kernel.row(0), &[0, 0, 1, 0, 0]);
        assert_eq!(kernel.row(1), &[0, 1, 1, 1, 0]);
        assert_eq!(kernel.row(2), &[1, 1, 1, 1, 1]);
        assert_eq!(kernel.iter().map(|&v| v as u32).sum::<u32>(), 13);
    }
}
