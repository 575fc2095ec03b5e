//! Connected component labeling ("clumping") of categorical rasters.
//!
//! Pixels are grouped by 4-connectivity: two valid pixels belong to the same
//! clump when a path of valid, equal-valued, edge-adjacent pixels joins them.
//! Labeling is an explicit-stack flood fill seeded by a row-major scan, so
//! ids are handed out in the order seeds are discovered and the result is
//! deterministic for a given input, mask and start id.

mod sizes;
#[cfg(test)]
mod tests;

pub use sizes::{clump_size_image, clump_sizes};

use crate::common::{Buffer2, BufferN};
use crate::error::{Error, Result};
use crate::sample::{IntegerSample, Raster};

/// Label raster produced by [`label`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clumps {
    labels: Buffer2<u32>,
    start_id: u32,
    next_id: u32,
}

impl Clumps {
    /// Clump id per pixel; 0 marks pixels outside the validity mask.
    #[inline]
    pub fn labels(&self) -> &Buffer2<u32> {
        &self.labels
    }

    #[inline]
    pub fn into_labels(self) -> Buffer2<u32> {
        self.labels
    }

    #[inline]
    pub fn start_id(&self) -> u32 {
        self.start_id
    }

    /// One past the highest id used. Pass it as the start id of the next call
    /// to keep ids unique across calls.
    #[inline]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    #[inline]
    pub fn num_clumps(&self) -> u32 {
        self.next_id - self.start_id
    }
}

/// Label the 4-connected clumps of `input` restricted to `valid`.
///
/// Every valid pixel ends up with an id `>= start_id`, every invalid pixel
/// with 0.
pub fn label<T: IntegerSample>(
    input: &Buffer2<T>,
    valid: &Buffer2<bool>,
    start_id: u32,
) -> Result<Clumps> {
    if !input.same_dimensions(valid) {
        return Err(Error::ShapeMismatch {
            context: "validity mask",
            expected: input.shape().to_vec(),
            actual: valid.shape().to_vec(),
        });
    }

    label_pixels(
        input.pixels(),
        valid.pixels(),
        input.width(),
        input.height(),
        start_id,
    )
}

/// [`label`] for a raster whose rank and element type are only known at
/// runtime.
///
/// Fails with [`Error::NotImage`] unless both arrays are 2-D, with
/// [`Error::ShapeMismatch`] if their shapes differ and with
/// [`Error::NonIntegerType`] for floating point rasters.
pub fn label_raster(input: &Raster, valid: &BufferN<bool>, start_id: u32) -> Result<Clumps> {
    if input.ndim() != 2 {
        return Err(Error::NotImage {
            context: "clump input",
            shape: input.shape().to_vec(),
        });
    }
    if valid.ndim() != 2 {
        return Err(Error::NotImage {
            context: "validity mask",
            shape: valid.shape().to_vec(),
        });
    }
    if input.shape() != valid.shape() {
        return Err(Error::ShapeMismatch {
            context: "validity mask",
            expected: input.shape().to_vec(),
            actual: valid.shape().to_vec(),
        });
    }

    let (height, width) = (input.shape()[0], input.shape()[1]);
    let valid = valid.data();
    match input {
        Raster::U8(buf) => label_pixels(buf.data(), valid, width, height, start_id),
        Raster::U16(buf) => label_pixels(buf.data(), valid, width, height, start_id),
        Raster::U32(buf) => label_pixels(buf.data(), valid, width, height, start_id),
        Raster::U64(buf) => label_pixels(buf.data(), valid, width, height, start_id),
        Raster::I8(buf) => label_pixels(buf.data(), valid, width, height, start_id),
        Raster::I16(buf) => label_pixels(buf.data(), valid, width, height, start_id),
        Raster::I32(buf) => label_pixels(buf.data(), valid, width, height, start_id),
        Raster::I64(buf) => label_pixels(buf.data(), valid, width, height, start_id),
        Raster::F32(_) | Raster::F64(_) => Err(Error::NonIntegerType {
            sample_type: input.sample_type(),
        }),
    }
}

fn label_pixels<T: IntegerSample>(
    pixels: &[T],
    valid: &[bool],
    width: usize,
    height: usize,
    start_id: u32,
) -> Result<Clumps> {
    if start_id == 0 {
        return Err(Error::InvalidClumpId(start_id));
    }
    debug_assert_eq!(pixels.len(), width * height);
    debug_assert_eq!(valid.len(), width * height);

    let mut labels = vec![0u32; pixels.len()];
    let next_id = flood_fill(pixels, valid, width, height, start_id, &mut labels)?;

    tracing::debug!(
        width,
        height,
        start_id,
        clumps = next_id - start_id,
        "Labeled clumps"
    );

    Ok(Clumps {
        labels: Buffer2::new(width, height, labels),
        start_id,
        next_id,
    })
}

/// Flood fill every unlabeled valid pixel in row-major order.
///
/// Pixels are labeled when pushed, not when popped, so each pixel enters the
/// pending stack at most once. Returns one past the last id used.
fn flood_fill<T: IntegerSample>(
    pixels: &[T],
    valid: &[bool],
    width: usize,
    height: usize,
    start_id: u32,
    labels: &mut [u32],
) -> Result<u32> {
    let mut pending: Vec<(usize, usize)> = Vec::new();
    let mut clump_id = start_id;

    for y in 0..height {
        for x in 0..width {
            let seed = y * width + x;
            if !valid[seed] || labels[seed] != 0 {
                continue;
            }
            // the id after this clump must still be representable
            if clump_id == u32::MAX {
                return Err(Error::ClumpIdOverflow { start_id });
            }

            let seed_value = pixels[seed];
            labels[seed] = clump_id;
            pending.push((y, x));

            while let Some((sy, sx)) = pending.pop() {
                // 3x3 window clamped to the raster
                let top = sy.saturating_sub(1);
                let bottom = (sy + 1).min(height - 1);
                let left = sx.saturating_sub(1);
                let right = (sx + 1).min(width - 1);

                for cx in left..=right {
                    for cy in top..=bottom {
                        // 4-neighbours only; the centre is already labeled
                        if cy != sy && cx != sx {
                            continue;
                        }
                        let idx = cy * width + cx;
                        if valid[idx] && labels[idx] == 0 && pixels[idx] == seed_value {
                            labels[idx] = clump_id;
                            pending.push((cy, cx));
                        }
                    }
                }
            }

            clump_id += 1;
        }
    }

    Ok(clump_id)
}
