use num_traits::AsPrimitive;
use rayon::prelude::*;

use crate::common::Buffer2;

const DIFFERENCE: [f64; 3] = [1.0, 0.0, -1.0];
const SMOOTH: [f64; 3] = [1.0, 1.0, 1.0];

/// Prewitt edge magnitude `sqrt(gx^2 + gy^2)`, computed separably.
///
/// The one-pixel border is always 0. Rasters narrower or shorter than three
/// pixels have no interior and come back all zero.
pub fn prewitt<T>(img: &Buffer2<T>) -> Buffer2<f64>
where
    T: AsPrimitive<f64> + Sync,
{
    let gx = conv_cols(&conv_rows(img, DIFFERENCE), SMOOTH);
    let gy = conv_rows(&conv_cols(img, DIFFERENCE), SMOOTH);

    let mut magnitude = Buffer2::new_default(img.width(), img.height());
    magnitude
        .pixels_mut()
        .par_iter_mut()
        .zip(gx.pixels().par_iter().zip(gy.pixels().par_iter()))
        .for_each(|(out, (&x, &y))| *out = (x * x + y * y).sqrt());

    magnitude
}

/// Correlate `kernel` along every row, writing columns `1..width - 1`.
///
/// Output column `x` is `sum(kernel[k] * img[x - 1 + k])`; the first and
/// last columns stay 0.
pub fn conv_rows<T>(img: &Buffer2<T>, kernel: [f64; 3]) -> Buffer2<f64>
where
    T: AsPrimitive<f64> + Sync,
{
    let (width, height) = (img.width(), img.height());
    let mut out = Buffer2::new_default(width, height);
    if width < 3 {
        return out;
    }

    out.pixels_mut()
        .par_chunks_mut(width)
        .zip(img.pixels().par_chunks(width))
        .for_each(|(out_row, in_row)| {
            for (x, window) in in_row.windows(3).enumerate() {
                out_row[x + 1] = correlate(window, kernel);
            }
        });

    out
}

/// Correlate `kernel` down every column, writing rows `1..height - 1`.
pub fn conv_cols<T>(img: &Buffer2<T>, kernel: [f64; 3]) -> Buffer2<f64>
where
    T: AsPrimitive<f64> + Sync,
{
    let (width, height) = (img.width(), img.height());
    let mut out = Buffer2::new_default(width, height);
    if height < 3 || width == 0 {
        return out;
    }

    out.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .skip(1)
        .take(height - 2)
        .for_each(|(y, out_row)| {
            let (above, here, below) = (img.row(y - 1), img.row(y), img.row(y + 1));
            for (x, value) in out_row.iter_mut().enumerate() {
                *value = correlate(&[above[x], here[x], below[x]], kernel);
            }
        });

    out
}

#[inline]
fn correlate<T: AsPrimitive<f64>>(window: &[T], kernel: [f64; 3]) -> f64 {
    window
        .iter()
        .zip(kernel)
        .map(|(&v, k)| v.as_() * k)
        .sum()
}
