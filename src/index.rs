//! Module for multidimensional and flat element indexing.

use crate::mapping::DenseMapping;

/// Index coordinate trait, for a single index along one dimension.
///
/// Signed coordinates are accepted by the checked accessors, where a negative
/// value is rejected instead of being reinterpreted as a large unsigned index.
pub trait Coord: Copy {
    /// Returns the coordinate as an unsigned index, or the negative value.
    fn to_index(self) -> Result<usize, i64>;
}

/// Multidimensional index trait, for an ordered sequence of coordinates.
///
/// Fixed small rank is supported with arrays and tuples of up to four
/// coordinates, and arbitrary rank with slices and vectors.
pub trait NdIndex {
    /// Coordinate type.
    type Coord: Coord;

    /// Returns the number of coordinates.
    fn rank(&self) -> usize;

    /// Returns the coordinate for the specified dimension.
    ///
    /// # Panics
    ///
    /// Panics if the dimension is out of bounds.
    fn coord(&self, axis: usize) -> Self::Coord;
}

/// Array index trait, for an element given by a flat or a multidimensional index.
///
/// The index is resolved to a flat offset, which the array then dereferences.
pub trait ArrayIndex {
    #[doc(hidden)]
    fn checked_offset(self, mapping: &DenseMapping) -> Option<usize>;

    #[doc(hidden)]
    fn offset(self, mapping: &DenseMapping) -> usize;

    #[doc(hidden)]
    fn unchecked_offset(self, mapping: &DenseMapping) -> usize;
}

impl ArrayIndex for usize {
    fn checked_offset(self, mapping: &DenseMapping) -> Option<usize> {
        mapping.linear_offset(self).ok()
    }

    fn offset(self, mapping: &DenseMapping) -> usize {
        mapping.fast_linear_offset(self)
    }

    fn unchecked_offset(self, mapping: &DenseMapping) -> usize {
        debug_assert!(self < mapping.len(), "index out of bounds");

        self
    }
}

macro_rules! impl_array_index {
    ($(const $($param:ident),+;)? $type:ty) => {
        impl<$($(const $param: usize),+)?> ArrayIndex for $type {
            fn checked_offset(self, mapping: &DenseMapping) -> Option<usize> {
                mapping.offset(&self).ok()
            }

            fn offset(self, mapping: &DenseMapping) -> usize {
                mapping.fast_offset(&self)
            }

            fn unchecked_offset(self, mapping: &DenseMapping) -> usize {
                mapping.offset_unchecked(&self)
            }
        }
    };
}

impl_array_index!(&[usize]);
impl_array_index!(const N; [usize; N]);
impl_array_index!(const N; &[usize; N]);
impl_array_index!(Vec<usize>);
impl_array_index!(&Vec<usize>);
impl_array_index!((usize,));
impl_array_index!((usize, usize));
impl_array_index!((usize, usize, usize));
impl_array_index!((usize, usize, usize, usize));

impl Coord for usize {
    fn to_index(self) -> Result<usize, i64> {
        Ok(self)
    }
}

macro_rules! impl_unsigned_coord {
    ($($type:ty),+) => {
        $(
            impl Coord for $type {
                fn to_index(self) -> Result<usize, i64> {
                    Ok(usize::try_from(self).unwrap_or(usize::MAX))
                }
            }
        )+
    };
}

macro_rules! impl_signed_coord {
    ($($type:ty),+) => {
        $(
            impl Coord for $type {
                fn to_index(self) -> Result<usize, i64> {
                    if self < 0 {
                        Err(self as i64)
                    } else {
                        Ok(usize::try_from(self).unwrap_or(usize::MAX))
                    }
                }
            }
        )+
    };
}

impl_unsigned_coord!(u32, u64);
impl_signed_coord!(i32, i64, isize);

impl<C: Coord> NdIndex for [C] {
    type Coord = C;

    fn rank(&self) -> usize {
        self.len()
    }

    fn coord(&self, axis: usize) -> C {
        self[axis]
    }
}

impl<C: Coord, const N: usize> NdIndex for [C; N] {
    type Coord = C;

    fn rank(&self) -> usize {
        N
    }

    fn coord(&self, axis: usize) -> C {
        self[axis]
    }
}

impl<C: Coord> NdIndex for Vec<C> {
    type Coord = C;

    fn rank(&self) -> usize {
        self.len()
    }

    fn coord(&self, axis: usize) -> C {
        self[axis]
    }
}

impl<I: NdIndex + ?Sized> NdIndex for &I {
    type Coord = I::Coord;

    fn rank(&self) -> usize {
        (**self).rank()
    }

    fn coord(&self, axis: usize) -> I::Coord {
        (**self).coord(axis)
    }
}

macro_rules! impl_tuple_index {
    ($n:tt, ($($c:ident),+), ($($i:tt),+)) => {
        impl<C: Coord> NdIndex for ($($c,)+) {
            type Coord = C;

            fn rank(&self) -> usize {
                $n
            }

            fn coord(&self, axis: usize) -> C {
                match axis {
                    $($i => self.$i,)+
                    _ => panic!("invalid dimension"),
                }
            }
        }
    };
}

impl_tuple_index!(1, (C), (0));
impl_tuple_index!(2, (C, C), (0, 1));
impl_tuple_index!(3, (C, C, C), (0, 1, 2));
impl_tuple_index!(4, (C, C, C, C), (0, 1, 2, 3));

#[cfg(feature = "bounds-check")]
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn panic_axis_bounds_check(axis: usize, index: usize, extent: usize) -> ! {
    panic!("index out of bounds: axis {axis} has extent {extent} but the index is {index}")
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn panic_bounds_check(index: usize, len: usize) -> ! {
    panic!("index out of bounds: the len is {len} but the index is {index}")
}

#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn panic_rank_mismatch(expected: usize, found: usize) -> ! {
    panic!("rank mismatch: expected {expected} indices, got {found}")
}
