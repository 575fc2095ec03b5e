use num_traits::AsPrimitive;
use rayon::prelude::*;

use crate::common::Buffer2;
pub use crate::config::StretchParams;

/// Stretch `img` linearly so that `mean +- num_std_dev * std_dev` spans
/// `min..=max`, clipping outside that range.
///
/// # Panics
///
/// Panics if `params` is invalid.
pub fn stretch<T>(img: &Buffer2<T>, params: &StretchParams) -> Buffer2<f64>
where
    T: AsPrimitive<f64> + Sync,
{
    params.validate();

    let spread = params.std_dev * params.num_std_dev;
    let scale = (params.max - params.min) / (2.0 * spread);
    let offset = spread - params.mean;

    let mut out = Buffer2::new_default(img.width(), img.height());
    out.pixels_mut()
        .par_iter_mut()
        .zip(img.pixels().par_iter())
        .for_each(|(dst, &src)| {
            let v: f64 = src.as_();
            *dst = if params.ignore_value == Some(v) {
                params.output_null
            } else {
                (params.min + (v + offset) * scale).clamp(params.min, params.max)
            };
        });

    out
}
