//! Dense row-major n-dimensional array.
//!
//! `BufferN` is the rank-erased counterpart of [`Buffer2`]: the shape is a
//! runtime list of dimension lengths and the last dimension varies fastest.

use std::ops::Deref;
use std::slice;

use thiserror::Error;

use crate::buffer2::Buffer2;

/// Errors raised when a buffer's shape does not fit its data or its use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("data length {actual} does not match shape {shape:?} ({expected} elements)")]
    LengthMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("expected a rank {expected} array, got rank {actual} (shape {shape:?})")]
    RankMismatch {
        expected: usize,
        actual: usize,
        shape: Vec<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferN<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

impl<T> BufferN<T> {
    /// # Panics
    ///
    /// Panics if `data.len()` is not the product of `shape`.
    pub fn new(shape: &[usize], data: Vec<T>) -> Self {
        match Self::try_new(shape, data) {
            Ok(buffer) => buffer,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(shape: &[usize], data: Vec<T>) -> Result<Self, ShapeError> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(ShapeError::LengthMismatch {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data,
            shape: shape.to_vec(),
        })
    }

    /// A rank-1 array over `data`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Row-major strides in elements.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.shape.len()];
        for dim in (0..self.shape.len().saturating_sub(1)).rev() {
            strides[dim] = strides[dim + 1] * self.shape[dim + 1];
        }
        strides
    }

    /// Linear offset of a coordinate tuple.
    pub fn offset(&self, coords: &[usize]) -> usize {
        debug_assert_eq!(coords.len(), self.shape.len());
        coords
            .iter()
            .zip(&self.shape)
            .fold(0, |acc, (&c, &len)| {
                debug_assert!(c < len);
                acc * len + c
            })
    }

    #[inline]
    pub fn get(&self, coords: &[usize]) -> &T {
        &self.data[self.offset(coords)]
    }

    /// Reinterpret a rank-2 array as a raster.
    pub fn into_buffer2(self) -> Result<Buffer2<T>, ShapeError> {
        match *self.shape.as_slice() {
            [height, width] => Ok(Buffer2::new(width, height, self.data)),
            _ => Err(ShapeError::RankMismatch {
                expected: 2,
                actual: self.shape.len(),
                shape: self.shape,
            }),
        }
    }

    /// Borrow layer `index` of a rank-3 `(layers, height, width)` stack.
    pub fn layer(&self, index: usize) -> &[T] {
        debug_assert_eq!(self.shape.len(), 3);
        let layer_len = self.shape[1] * self.shape[2];
        &self.data[index * layer_len..(index + 1) * layer_len]
    }
}

impl<T: Clone> BufferN<T> {
    pub fn new_filled(shape: &[usize], value: T) -> Self {
        Self {
            data: vec![value; shape.iter().product()],
            shape: shape.to_vec(),
        }
    }

    /// Copy a rank-2 array out as a raster.
    pub fn to_buffer2(&self) -> Result<Buffer2<T>, ShapeError> {
        self.clone().into_buffer2()
    }
}

impl<T> From<Buffer2<T>> for BufferN<T> {
    fn from(buffer: Buffer2<T>) -> Self {
        let shape = buffer.shape().to_vec();
        Self {
            data: buffer.into_vec(),
            shape,
        }
    }
}

impl<T> Deref for BufferN<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
