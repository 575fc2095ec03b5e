use crate::common::Buffer2;
use crate::error::{Error, Result};

/// Pixelwise AND over every mask.
pub fn and_all(masks: &[&Buffer2<bool>]) -> Result<Buffer2<bool>> {
    reduce(masks, "and_all", |a, b| a && b)
}

/// Pixelwise OR over every mask.
pub fn or_all(masks: &[&Buffer2<bool>]) -> Result<Buffer2<bool>> {
    reduce(masks, "or_all", |a, b| a || b)
}

fn reduce(
    masks: &[&Buffer2<bool>],
    context: &'static str,
    op: impl Fn(bool, bool) -> bool,
) -> Result<Buffer2<bool>> {
    let (first, rest) = masks.split_first().ok_or(Error::EmptyInput { context })?;

    let mut combined = (*first).clone();
    for mask in rest {
        if !combined.same_dimensions(mask) {
            return Err(Error::ShapeMismatch {
                context,
                expected: combined.shape().to_vec(),
                actual: mask.shape().to_vec(),
            });
        }
        for (acc, &v) in combined.pixels_mut().iter_mut().zip(mask.iter()) {
            *acc = op(*acc, v);
        }
    }
    Ok(combined)
}

/// True where the pixel equals any of `values`.
pub fn pix_in_list<T: PartialEq>(img: &Buffer2<T>, values: &[T]) -> Buffer2<bool> {
    img.map(|v| values.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_or_reduce_all_masks() {
        let a = Buffer2::from_rows(&[[true, true], [false, true]]);
        let b = Buffer2::from_rows(&[[true, false], [false, true]]);
        let c = Buffer2::from_rows(&[[true, true], [true, false]]);

        let and = and_all(&[&a, &b, &c]).unwrap();
        assert_eq!(and.pixels(), &[true, false, false, false]);

        let or = or_all(&[&a, &b, &c]).unwrap();
        assert_eq!(or.pixels(), &[true, true, true, true]);

        assert_eq!(and_all(&[&a]).unwrap(), a);
    }

    #[test]
    fn test_empty_list_is_an_error() {
        assert_eq!(
            or_all(&[]).unwrap_err(),
            Error::EmptyInput { context: "or_all" }
        );
    }

    #[test]
    fn test_mismatched_masks_are_rejected() {
        let a = Buffer2::new_filled(3, 2, true);
        let b = Buffer2::new_filled(2, 3, true);
        let err = and_all(&[&a, &b]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { context: "and_all", .. }));
    }

    #[test]
    fn test_pix_in_list() {
        let img = Buffer2::from_rows(&[[1u8, 4, 7], [4, 9, 1]]);
        let mask = pix_in_list(&img, &[1, 9]);
        assert_eq!(mask.pixels(), &[true, false, false, false, true, true]);
        assert!(pix_in_list(&img, &[]).iter().all(|&v| !v));
    }
}
