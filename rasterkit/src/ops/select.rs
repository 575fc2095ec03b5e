use crate::common::{Buffer2, BufferN};
use crate::error::{Error, Result};

/// One branch of [`stack_where`].
#[derive(Debug, Clone, Copy)]
pub enum Layers<'a, T> {
    /// Broadcast to every pixel of every layer.
    Scalar(T),
    /// Broadcast to every layer.
    Image(&'a Buffer2<T>),
    /// `(layers, height, width)` stack.
    Stack(&'a BufferN<T>),
}

impl<T: Copy> Layers<'_, T> {
    fn validate(&self, height: usize, width: usize) -> Result<()> {
        match self {
            Layers::Scalar(_) => Ok(()),
            Layers::Image(img) => {
                if img.shape() != [height, width] {
                    return Err(Error::ShapeMismatch {
                        context: "stack_where input",
                        expected: vec![height, width],
                        actual: img.shape().to_vec(),
                    });
                }
                Ok(())
            }
            Layers::Stack(stack) => {
                if stack.ndim() != 3 {
                    return Err(Error::NotImage {
                        context: "stack_where input",
                        shape: stack.shape().to_vec(),
                    });
                }
                if stack.shape()[1..] != [height, width] {
                    return Err(Error::ShapeMismatch {
                        context: "stack_where input",
                        expected: vec![height, width],
                        actual: stack.shape()[1..].to_vec(),
                    });
                }
                Ok(())
            }
        }
    }

    fn stack_layers(&self) -> Option<usize> {
        match self {
            Layers::Stack(stack) => Some(stack.shape()[0]),
            _ => None,
        }
    }

    #[inline]
    fn value(&self, layer: usize, offset: usize) -> T {
        match self {
            Layers::Scalar(v) => *v,
            Layers::Image(img) => img[offset],
            Layers::Stack(stack) => stack.layer(layer)[offset],
        }
    }
}

/// Per-layer `where`: pick from `when_true` where `mask` is set and from
/// `when_false` elsewhere.
///
/// The result is a `(layers, height, width)` stack with as many layers as
/// the stack branches, or a single layer when neither branch is a stack.
pub fn stack_where<T: Copy>(
    mask: &Buffer2<bool>,
    when_true: Layers<'_, T>,
    when_false: Layers<'_, T>,
) -> Result<BufferN<T>> {
    let [height, width] = mask.shape();
    when_true.validate(height, width)?;
    when_false.validate(height, width)?;

    let layers = match (when_true.stack_layers(), when_false.stack_layers()) {
        (Some(first), Some(second)) if first != second => {
            return Err(Error::LayerCountMismatch { first, second });
        }
        (Some(n), _) | (None, Some(n)) => n,
        (None, None) => 1,
    };

    let mut data = Vec::with_capacity(layers * mask.len());
    for layer in 0..layers {
        for (offset, &selected) in mask.iter().enumerate() {
            let branch = if selected { &when_true } else { &when_false };
            data.push(branch.value(layer, offset));
        }
    }

    Ok(BufferN::new(&[layers, height, width], data))
}
