use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Array shape, the number of elements in each dimension.
///
/// The rank is dynamic and fixed at construction. An empty shape has rank 0 and
/// describes a single scalar element.
#[derive(Clone, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(transparent))]
pub struct Shape {
    dims: Box<[usize]>,
}

/// Conversion trait into an array shape.
pub trait IntoShape {
    /// Creates array shape from a value.
    fn into_shape(self) -> Shape;
}

impl Shape {
    /// Creates an array shape with the given dimensions.
    pub fn from_dims(dims: &[usize]) -> Self {
        Self { dims: dims.into() }
    }

    /// Returns the number of elements in the specified dimension.
    ///
    /// # Panics
    ///
    /// Panics if the dimension is out of bounds.
    pub fn dim(&self, index: usize) -> usize {
        assert!(index < self.rank(), "invalid dimension");

        self.dims[index]
    }

    /// Returns the number of elements in each dimension.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns `true` if the array contains no elements.
    pub fn is_empty(&self) -> bool {
        self.dims.contains(&0)
    }

    /// Returns the number of elements in the array.
    ///
    /// # Panics
    ///
    /// Panics if the number of elements overflows `usize`.
    pub fn len(&self) -> usize {
        self.checked_len().expect("invalid length")
    }

    /// Returns the number of elements in the array, or `None` on overflow.
    ///
    /// A shape with a zero-sized dimension has length 0 even if the product
    /// of the other dimensions would overflow.
    pub fn checked_len(&self) -> Option<usize> {
        if self.is_empty() {
            Some(0)
        } else {
            self.dims.iter().try_fold(1usize, |acc, &x| acc.checked_mul(x))
        }
    }

    /// Returns the array rank, i.e. the number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Returns the row-major strides for the shape, in elements.
    ///
    /// The last dimension has stride 1, and each outer stride is the product of
    /// the inner stride and the inner dimension. Strides are computed also when
    /// a dimension is zero.
    pub fn strides(&self) -> Box<[usize]> {
        let mut strides = vec![0; self.rank()].into_boxed_slice();
        let mut stride = 1usize;

        for i in (0..self.rank()).rev() {
            strides[i] = stride;
            stride = stride.wrapping_mul(self.dims[i]);
        }

        strides
    }
}

impl AsRef<[usize]> for Shape {
    fn as_ref(&self) -> &[usize] {
        &self.dims
    }
}

impl Debug for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.dims.iter()).finish()
    }
}

impl Deref for Shape {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.dims
    }
}

impl From<Shape> for Vec<usize> {
    fn from(shape: Shape) -> Self {
        shape.dims.into_vec()
    }
}

impl IntoShape for Shape {
    fn into_shape(self) -> Shape {
        self
    }
}

impl IntoShape for &Shape {
    fn into_shape(self) -> Shape {
        self.clone()
    }
}

impl IntoShape for &[usize] {
    fn into_shape(self) -> Shape {
        Shape::from_dims(self)
    }
}

impl IntoShape for Box<[usize]> {
    fn into_shape(self) -> Shape {
        Shape { dims: self }
    }
}

impl IntoShape for Vec<usize> {
    fn into_shape(self) -> Shape {
        Shape { dims: self.into() }
    }
}

impl IntoShape for &Vec<usize> {
    fn into_shape(self) -> Shape {
        Shape::from_dims(self)
    }
}

impl<const N: usize> IntoShape for [usize; N] {
    fn into_shape(self) -> Shape {
        Shape::from_dims(&self)
    }
}

impl<const N: usize> IntoShape for &[usize; N] {
    fn into_shape(self) -> Shape {
        Shape::from_dims(self)
    }
}
