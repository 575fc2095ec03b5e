use rayon::prelude::*;

use crate::common::Buffer2;

/// Pixel count per clump id, indexed by id.
///
/// The table has `max(label) + 1` entries. The entry for `null_label` is
/// always reported as 0 regardless of how many pixels carry it: downstream
/// size filters rely on the background never qualifying as a clump. A
/// `null_label` beyond the table leaves it untouched.
///
/// The table is indexed by id, so it takes `8 * (max(label) + 1)` bytes even
/// when most ids are unused. Labels produced by chained calls with a large
/// start id should be renumbered from 1 first, or counted with a
/// [`ValueIndex`](crate::ValueIndex), whose `counts` only cover ids present.
pub fn clump_sizes(labels: &Buffer2<u32>, null_label: u32) -> Vec<u64> {
    let max_label = labels.iter().copied().max().unwrap_or(0);
    let mut sizes = vec![0u64; max_label as usize + 1];
    for &label in labels.iter() {
        sizes[label as usize] += 1;
    }

    if let Some(size) = sizes.get_mut(null_label as usize) {
        *size = 0;
    }
    sizes
}

/// Replace every pixel by the size of its clump; `null_label` pixels get 0.
///
/// Useful for building masks of clumps within a size range.
pub fn clump_size_image(labels: &Buffer2<u32>, null_label: u32) -> Buffer2<u64> {
    let sizes = clump_sizes(labels, null_label);

    let mut image = Buffer2::new_default(labels.width(), labels.height());
    image
        .pixels_mut()
        .par_iter_mut()
        .zip(labels.pixels().par_iter())
        .for_each(|(size, &label)| *size = sizes[label as usize]);

    image
}
