//! Module for creating array views over a single shared buffer.
//!
//! The views returned here alias each other: they point into the same buffer,
//! and a write through one view is visible through every view covering the
//! same element. Elements of a view are read and written by value, so no
//! reference into the buffer is held while another view writes to it.

use std::sync::Arc;

use crate::array::ArrayView;
use crate::error::Result;
use crate::owner::SharedBuffer;
use crate::shape::IntoShape;

/// Creates an array view over a new shared buffer holding the given elements.
///
/// The number of elements must be at least the size of the shape.
pub fn make_view<T: 'static, I: IntoShape>(shape: I, source: Vec<T>) -> Result<ArrayView<T>> {
    let owner = Arc::new(SharedBuffer::from_vec(source));

    ArrayView::view(shape, &owner, 0)
}

/// Creates two array views with independent shapes over a single shared buffer
/// holding the given elements.
///
/// Both views start at the first element, and the number of elements must be
/// at least the size of each shape.
pub fn make_two_views<T: 'static, I: IntoShape, J: IntoShape>(
    shape1: I,
    shape2: J,
    source: Vec<T>,
) -> Result<(ArrayView<T>, ArrayView<T>)> {
    let owner = Arc::new(SharedBuffer::from_vec(source));

    let first = ArrayView::view(shape1, &owner, 0)?;
    let second = ArrayView::view(shape2, &owner, 0)?;

    log::debug!("created views with shapes {:?} and {:?}", first.shape(), second.shape());

    Ok((first, second))
}

/// Creates array views over a single shared buffer holding the given elements,
/// each with its own shape and element offset into the buffer.
///
/// The views may be disjoint or overlapping, and each must fit in the buffer.
pub fn make_views<T, I, S>(source: Vec<T>, layouts: I) -> Result<Vec<ArrayView<T>>>
where
    T: 'static,
    I: IntoIterator<Item = (S, usize)>,
    S: IntoShape,
{
    let owner = Arc::new(SharedBuffer::from_vec(source));

    layouts.into_iter().map(|(shape, offset)| ArrayView::view(shape, &owner, offset)).collect()
}
