//! Module for shared buffer ownership.
//!
//! A view does not own its elements. It holds a data pointer into a buffer and
//! an [`OwnerHandle`], a reference-counted token that keeps the buffer alive.
//! The buffer is released when the last handle is dropped, independent of the
//! scope of the variable that created it.
//!
//! Several views may point into the same buffer, so elements in shared storage
//! are read and written by value and never through references. References into
//! a view are only given by the `unsafe` accessors.

use std::any::Any;
use std::cell::UnsafeCell;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Reference-counted handle that keeps the buffer of a view alive.
pub type OwnerHandle = Arc<dyn Any>;

/// Owner trait for buffers that can back array views.
///
/// # Safety
///
/// The pointer returned by `as_mut_ptr` must be valid for reads and writes of
/// `len` elements for as long as the owner is alive, and the elements must be
/// mutable through shared references to the owner (i.e. have interior mutability).
pub unsafe trait Owner<T>: 'static {
    /// Returns a raw pointer to the first element of the buffer.
    fn as_mut_ptr(&self) -> *mut T;

    /// Returns the number of elements in the buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the buffer contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Array storage trait, selecting the element access available for an array.
pub trait Storage {
    /// True if the array is a view into a shared buffer.
    const IS_VIEW: bool;
}

/// Owned storage type, where the array has exclusive access to its elements.
#[derive(Clone, Copy, Debug, Default)]
pub struct Owned;

/// Shared storage type, where the array is a view into a buffer that may be
/// aliased by other views.
#[derive(Clone, Copy, Debug, Default)]
pub struct Shared;

/// Heap buffer with interior mutability, for sharing between array views.
///
/// Elements are read and written through the views, or directly with `get`
/// and `set` to cross-check the raw storage.
pub struct SharedBuffer<T> {
    data: Box<[UnsafeCell<T>]>,
}

impl Storage for Owned {
    const IS_VIEW: bool = false;
}

impl Storage for Shared {
    const IS_VIEW: bool = true;
}

impl<T> SharedBuffer<T> {
    /// Creates a shared buffer from the given elements.
    pub fn from_vec(vec: Vec<T>) -> Self {
        log::trace!("creating shared buffer with {} elements", vec.len());

        Self { data: vec.into_iter().map(UnsafeCell::new).collect() }
    }

    /// Returns a copy of the element at the given position, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<T>
    where
        T: Copy,
    {
        self.data.get(index).map(|x| unsafe { x.get().read() })
    }

    /// Returns `true` if the buffer contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Writes the element at the given position.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn set(&self, index: usize, value: T)
    where
        T: Copy,
    {
        unsafe {
            self.data[index].get().write(value);
        }
    }

    /// Copies the buffer contents into a new vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Copy,
    {
        self.data.iter().map(|x| unsafe { x.get().read() }).collect()
    }
}

impl<T: Copy + Debug> Debug for SharedBuffer<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}

impl<T> From<Vec<T>> for SharedBuffer<T> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_vec(vec)
    }
}

unsafe impl<T: 'static> Owner<T> for SharedBuffer<T> {
    fn as_mut_ptr(&self) -> *mut T {
        UnsafeCell::raw_get(self.data.as_ptr())
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> Drop for SharedBuffer<T> {
    fn drop(&mut self) {
        log::trace!("releasing shared buffer with {} elements", self.data.len());
    }
}
