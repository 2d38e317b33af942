use crate::error::{Error, Result};
use crate::index::{self, Coord, NdIndex};
use crate::shape::Shape;

/// Dense, row-major layout mapping with shape and precomputed strides.
///
/// The mapping is computed once when an array is created and never changes.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DenseMapping {
    shape: Shape,
    strides: Box<[usize]>,
    len: usize,
}

impl DenseMapping {
    /// Creates a new, dense layout mapping with the specified shape.
    ///
    /// # Panics
    ///
    /// Panics if the number of elements overflows `usize`.
    pub fn new(shape: Shape) -> Self {
        Self::try_new(shape).expect("invalid length")
    }

    /// Creates a new, dense layout mapping, or returns an error if the number
    /// of elements overflows `usize`.
    pub fn try_new(shape: Shape) -> Result<Self> {
        let len = shape.checked_len().ok_or(Error::SizeOverflow)?;
        let strides = shape.strides();

        Ok(Self { shape, strides, len })
    }

    /// Returns the number of elements in the specified dimension.
    ///
    /// # Panics
    ///
    /// Panics if the dimension is out of bounds.
    pub fn dim(&self, index: usize) -> usize {
        self.shape.dim(index)
    }

    /// Returns `true` if the array contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements in the array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the array rank, i.e. the number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Returns the array shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the distance between elements in the specified dimension.
    ///
    /// # Panics
    ///
    /// Panics if the dimension is out of bounds.
    pub fn stride(&self, index: usize) -> usize {
        assert!(index < self.rank(), "invalid dimension");

        self.strides[index]
    }

    /// Returns the distance between elements in each dimension.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Resolves a multidimensional index to a flat offset, checking the rank,
    /// the sign of each index and the bounds of each dimension.
    pub fn offset<I: NdIndex + ?Sized>(&self, index: &I) -> Result<usize> {
        if index.rank() != self.rank() {
            return Err(Error::RankMismatch { expected: self.rank(), found: index.rank() });
        }

        let mut offset = 0;

        for axis in 0..self.rank() {
            let coord = index.coord(axis);
            let i = coord.to_index().map_err(|i| Error::NegativeIndex { axis, index: i })?;
            let extent = self.shape[axis];

            if i >= extent {
                return Err(Error::OutOfBounds { axis, index: i, extent });
            }

            offset += i * self.strides[axis];
        }

        Ok(offset)
    }

    /// Checks a flat index against the number of elements.
    pub fn linear_offset(&self, index: usize) -> Result<usize> {
        if index < self.len {
            Ok(index)
        } else {
            Err(Error::FlatOutOfBounds { index, len: self.len })
        }
    }

    // Offset for the indexing operators. The rank is always checked. Each
    // dimension is checked with the `bounds-check` feature, otherwise only the
    // resulting offset is checked against the number of elements.
    #[inline]
    pub(crate) fn fast_offset<I: NdIndex<Coord = usize> + ?Sized>(&self, index: &I) -> usize {
        if index.rank() != self.rank() {
            index::panic_rank_mismatch(self.rank(), index.rank());
        }

        #[cfg(feature = "bounds-check")]
        for axis in 0..self.rank() {
            if index.coord(axis) >= self.shape[axis] {
                index::panic_axis_bounds_check(axis, index.coord(axis), self.shape[axis]);
            }
        }

        let mut offset = 0usize;

        for axis in 0..self.rank() {
            offset = offset.wrapping_add(index.coord(axis).wrapping_mul(self.strides[axis]));
        }

        #[cfg(not(feature = "bounds-check"))]
        if offset >= self.len {
            index::panic_bounds_check(offset, self.len);
        }

        offset
    }

    #[inline]
    pub(crate) fn fast_linear_offset(&self, index: usize) -> usize {
        if index >= self.len {
            index::panic_bounds_check(index, self.len);
        }

        index
    }

    #[inline]
    pub(crate) fn offset_unchecked<I: NdIndex<Coord = usize> + ?Sized>(&self, index: &I) -> usize {
        debug_assert!(index.rank() == self.rank(), "invalid rank");

        let mut offset = 0;

        for axis in 0..self.rank() {
            debug_assert!(index.coord(axis) < self.shape[axis], "index out of bounds");

            offset += index.coord(axis) * self.strides[axis];
        }

        offset
    }
}
