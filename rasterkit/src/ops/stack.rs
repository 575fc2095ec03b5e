use crate::common::{Buffer2, BufferN};
use crate::error::{Error, Result};

/// An input to [`make_stack`].
#[derive(Debug, Clone, Copy)]
pub enum StackPart<'a, T> {
    /// Contributes one layer.
    Image(&'a Buffer2<T>),
    /// `(layers, height, width)`, contributes all of its layers.
    Stack(&'a BufferN<T>),
}

impl<'a, T> From<&'a Buffer2<T>> for StackPart<'a, T> {
    fn from(img: &'a Buffer2<T>) -> Self {
        StackPart::Image(img)
    }
}

impl<'a, T> From<&'a BufferN<T>> for StackPart<'a, T> {
    fn from(stack: &'a BufferN<T>) -> Self {
        StackPart::Stack(stack)
    }
}

impl<T> StackPart<'_, T> {
    /// `(layers, [height, width])` of a valid part.
    fn extent(&self) -> Result<(usize, [usize; 2])> {
        match self {
            StackPart::Image(img) => Ok((1, img.shape())),
            StackPart::Stack(stack) => match *stack.shape() {
                [layers, height, width] => Ok((layers, [height, width])),
                _ => Err(Error::NotImage {
                    context: "make_stack input",
                    shape: stack.shape().to_vec(),
                }),
            },
        }
    }

    fn data(&self) -> &[T] {
        match self {
            StackPart::Image(img) => img.pixels(),
            StackPart::Stack(stack) => stack.data(),
        }
    }
}

/// Concatenate images and stacks along the layer axis.
pub fn make_stack<T: Clone>(parts: &[StackPart<'_, T>]) -> Result<BufferN<T>> {
    let first = parts.first().ok_or(Error::EmptyInput {
        context: "make_stack",
    })?;
    let (_, dims) = first.extent()?;

    let mut layers = 0;
    for part in parts {
        let (n, part_dims) = part.extent()?;
        if part_dims != dims {
            return Err(Error::ShapeMismatch {
                context: "make_stack input",
                expected: dims.to_vec(),
                actual: part_dims.to_vec(),
            });
        }
        layers += n;
    }

    let mut data = Vec::with_capacity(layers * dims[0] * dims[1]);
    for part in parts {
        data.extend_from_slice(part.data());
    }

    Ok(BufferN::new(&[layers, dims[0], dims[1]], data))
}
