use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::sync::Arc;
use std::{mem, slice};

use crate::error::{Error, Result};
use crate::index::{ArrayIndex, NdIndex};
use crate::mapping::DenseMapping;
use crate::owner::{Owned, Owner, OwnerHandle, Shared, Storage};
use crate::raw_array::RawArray;
use crate::shape::IntoShape;

/// Contiguous multidimensional array with row-major layout.
///
/// The storage type selects how elements are accessed:
///
/// - With [`Owned`] storage, the default, the array has exclusive access to
///   its elements. It is indexed with the indexing operators and gives
///   references and slices.
/// - With [`Shared`] storage, see [`ArrayView`], the array is a view into a
///   buffer shared with other arrays through a reference-counted owner. Views
///   created from the same owner alias each other, and a write through one view
///   is visible through all views covering the same element. Elements are read
///   and written by value, and references are only given by `unsafe` methods.
///
/// Element access is available at three levels:
///
/// - `at` and [`index`](Self::index) always check the rank, the sign and the
///   bounds of each index, and return an error on failure.
/// - The indexing operators, `element` for owned arrays and `read`/`write` for
///   views always check the rank. With the `bounds-check` feature, each
///   dimension is checked and they panic naming the offending axis. Without it,
///   only the resulting flat offset is checked, so an index that is out of
///   bounds in one dimension but inside the array may address another element.
/// - [`get_unchecked`](Self::get_unchecked) does no checking at all, and an
///   index out of bounds is undefined behavior.
///
/// The array holds a raw data pointer and is neither `Send` nor `Sync`.
pub struct NdArray<T, S: Storage = Owned> {
    raw: RawArray<T>,
    phantom: PhantomData<S>,
}

/// Array view into a buffer shared with other arrays.
///
/// Views are not indexed with the indexing operators, since two views may
/// refer to the same element:
///
/// ```compile_fail
/// let (mut a, mut b) = cnda::make_two_views([4], [4], vec![0; 4]).unwrap();
///
/// let x = &mut a[0];
/// let y = &mut b[0];
/// ```
pub type ArrayView<T> = NdArray<T, Shared>;

impl<T, S: Storage> NdArray<T, S> {
    /// Returns a mutable pointer to the first element.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.raw.as_mut_ptr()
    }

    /// Returns a raw pointer to the first element.
    pub fn as_ptr(&self) -> *const T {
        self.raw.as_ptr()
    }

    /// Returns the address of the first element.
    pub fn data_addr(&self) -> usize {
        self.as_ptr() as usize
    }

    /// Returns the address of an element, checking the rank, the sign and the
    /// bounds of each index.
    pub fn element_addr<I: NdIndex>(&self, index: I) -> Result<usize> {
        Ok(self.data_addr() + self.mapping().offset(&index)? * mem::size_of::<T>())
    }

    /// Returns a reference to an element without any checking.
    ///
    /// # Safety
    ///
    /// The index must have the same rank as the array and be within bounds.
    /// For a view, the element must not be written through another array or
    /// the owner while the reference is in use.
    pub unsafe fn get_unchecked<I: ArrayIndex>(&self, index: I) -> &T {
        unsafe { &*self.as_ptr().add(index.unchecked_offset(self.mapping())) }
    }

    /// Returns a mutable reference to an element without any checking.
    ///
    /// # Safety
    ///
    /// The index must have the same rank as the array and be within bounds.
    /// For a view, the element must not be accessed through another array or
    /// the owner while the reference is in use.
    pub unsafe fn get_unchecked_mut<I: ArrayIndex>(&mut self, index: I) -> &mut T {
        let offset = index.unchecked_offset(self.mapping());

        unsafe { &mut *self.as_mut_ptr().add(offset) }
    }

    /// Resolves a multidimensional index to the flat offset of the element,
    /// checking the rank, the sign and the bounds of each index.
    pub fn index<I: NdIndex>(&self, index: I) -> Result<usize> {
        self.mapping().offset(&index)
    }

    /// Returns `true` if the array contains no elements.
    pub fn is_empty(&self) -> bool {
        self.mapping().is_empty()
    }

    /// Returns `true` if the array is a view into a shared buffer.
    pub fn is_view(&self) -> bool {
        S::IS_VIEW
    }

    /// Returns the array layout mapping.
    pub fn mapping(&self) -> &DenseMapping {
        self.raw.mapping()
    }

    /// Returns the array rank, i.e. the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.mapping().rank()
    }

    /// Returns the owner handle if the array is a view, or `None` for owned storage.
    pub fn owner(&self) -> Option<&OwnerHandle> {
        self.raw.owner()
    }

    /// Returns the number of elements in each dimension.
    pub fn shape(&self) -> &[usize] {
        self.mapping().shape()
    }

    /// Returns the number of elements in the array.
    pub fn size(&self) -> usize {
        self.mapping().len()
    }

    /// Returns the distance between elements in each dimension.
    pub fn strides(&self) -> &[usize] {
        self.mapping().strides()
    }

    fn from_raw(raw: RawArray<T>) -> Self {
        Self { raw, phantom: PhantomData }
    }
}

impl<T> NdArray<T> {
    /// Returns a reference to an element, checking the rank, the sign and the
    /// bounds of each index.
    ///
    /// Signed indices are accepted so that negative values are rejected rather
    /// than reinterpreted as large unsigned indices.
    pub fn at<I: NdIndex>(&self, index: I) -> Result<&T> {
        let offset = self.mapping().offset(&index)?;

        unsafe { Ok(&*self.as_ptr().add(offset)) }
    }

    /// Returns a mutable reference to an element, checking the rank, the sign
    /// and the bounds of each index.
    pub fn at_mut<I: NdIndex>(&mut self, index: I) -> Result<&mut T> {
        let offset = self.mapping().offset(&index)?;

        unsafe { Ok(&mut *self.as_mut_ptr().add(offset)) }
    }

    /// Returns a slice of all elements in the array, in row-major order.
    pub fn data(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.size()) }
    }

    /// Returns a mutable slice of all elements in the array, in row-major order.
    pub fn data_mut(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.size()) }
    }

    /// Returns a reference to an element given by a flat index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not less than the number of elements.
    pub fn element(&self, index: usize) -> &T {
        &self[index]
    }

    /// Returns a mutable reference to an element given by a flat index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not less than the number of elements.
    pub fn element_mut(&mut self, index: usize) -> &mut T {
        &mut self[index]
    }

    /// Assigns the value to all elements.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.data_mut().fill(value);
    }

    /// Creates an array from the given element.
    ///
    /// # Panics
    ///
    /// Panics if the number of elements overflows `usize`.
    pub fn from_elem<I: IntoShape>(shape: I, elem: T) -> Self
    where
        T: Clone,
    {
        let mapping = DenseMapping::new(shape.into_shape());

        Self::from_mapping(vec![elem; mapping.len()], mapping)
    }

    /// Creates an array from a vector of elements in row-major order.
    pub fn from_vec<I: IntoShape>(shape: I, vec: Vec<T>) -> Result<Self> {
        let mapping = DenseMapping::try_new(shape.into_shape())?;

        if vec.len() != mapping.len() {
            return Err(Error::LengthMismatch { expected: mapping.len(), found: vec.len() });
        }

        Ok(Self::from_mapping(vec, mapping))
    }

    /// Returns a reference to an element, or `None` if the index has the wrong
    /// rank or is out of bounds.
    pub fn get<I: ArrayIndex>(&self, index: I) -> Option<&T> {
        let offset = index.checked_offset(self.mapping())?;

        unsafe { Some(&*self.as_ptr().add(offset)) }
    }

    /// Returns a mutable reference to an element, or `None` if the index has the
    /// wrong rank or is out of bounds.
    pub fn get_mut<I: ArrayIndex>(&mut self, index: I) -> Option<&mut T> {
        let offset = index.checked_offset(self.mapping())?;

        unsafe { Some(&mut *self.as_mut_ptr().add(offset)) }
    }

    /// Converts the array into a vector of its elements in row-major order.
    pub fn into_vec(self) -> Vec<T> {
        match self.raw.into_vec() {
            Ok(vec) => vec,
            Err(_) => unreachable!(),
        }
    }

    /// Creates an array with default elements.
    ///
    /// # Panics
    ///
    /// Panics if the number of elements overflows `usize`.
    pub fn new<I: IntoShape>(shape: I) -> Self
    where
        T: Default,
    {
        let mapping = DenseMapping::new(shape.into_shape());
        let mut vec = Vec::with_capacity(mapping.len());

        vec.resize_with(mapping.len(), T::default);

        Self::from_mapping(vec, mapping)
    }

    fn from_mapping(vec: Vec<T>, mapping: DenseMapping) -> Self {
        log::trace!("allocating array with shape {:?}", mapping.shape());

        Self::from_raw(RawArray::from_vec(vec, mapping))
    }
}

impl<T> ArrayView<T> {
    /// Returns a slice of all elements in the view, in row-major order.
    ///
    /// # Safety
    ///
    /// The elements must not be written through another array or the owner
    /// while the slice is in use.
    pub unsafe fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.size()) }
    }

    /// Returns a mutable slice of all elements in the view, in row-major order.
    ///
    /// # Safety
    ///
    /// The elements must not be accessed through another array or the owner
    /// while the slice is in use.
    pub unsafe fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.size()) }
    }

    /// Creates an array view from a raw data pointer and an owner handle.
    ///
    /// The view shares ownership of the buffer through the handle, and the
    /// reference count of the handle is kept until the view is dropped.
    ///
    /// # Safety
    ///
    /// The pointer must be valid for reads and writes of the number of elements
    /// given by the shape, for as long as the owner is alive. The elements must
    /// be initialized, and must only be accessed through array views or raw
    /// pointers while the view exists.
    ///
    /// # Panics
    ///
    /// Panics if the pointer is null and the array is not empty, or if the
    /// number of elements overflows `usize`.
    pub unsafe fn from_raw_parts<I: IntoShape>(shape: I, ptr: *mut T, owner: OwnerHandle) -> Self {
        let mapping = DenseMapping::new(shape.into_shape());

        log::trace!("creating view with shape {:?} at {:p}", mapping.shape(), ptr);

        Self::from_raw(unsafe { RawArray::from_shared(ptr, mapping, owner) })
    }

    /// Creates an array view into the buffer of an owner, starting at the
    /// given element offset.
    ///
    /// The view increments the reference count of the owner, and the buffer
    /// is kept alive until all views and handles are dropped.
    pub fn view<I, O>(shape: I, owner: &Arc<O>, offset: usize) -> Result<Self>
    where
        I: IntoShape,
        O: Owner<T>,
    {
        let mapping = DenseMapping::try_new(shape.into_shape())?;
        let capacity = owner.len();

        if offset > capacity || mapping.len() > capacity - offset {
            return Err(Error::ViewOutOfRange { offset, len: mapping.len(), capacity });
        }

        log::trace!("creating view with shape {:?} at offset {}", mapping.shape(), offset);

        let ptr = unsafe { owner.as_mut_ptr().add(offset) };
        let handle: OwnerHandle = owner.clone();

        Ok(Self::from_raw(unsafe { RawArray::from_shared(ptr, mapping, handle) }))
    }

    fn ptr_at(&self, offset: usize) -> *mut T {
        unsafe { (self.as_ptr() as *mut T).add(offset) }
    }
}

impl<T: Copy> ArrayView<T> {
    /// Returns a copy of an element, checking the rank, the sign and the
    /// bounds of each index.
    pub fn at<I: NdIndex>(&self, index: I) -> Result<T> {
        let offset = self.mapping().offset(&index)?;

        unsafe { Ok(self.ptr_at(offset).read()) }
    }

    /// Assigns the value to all elements.
    pub fn fill(&self, value: T) {
        for i in 0..self.size() {
            unsafe {
                self.ptr_at(i).write(value);
            }
        }
    }

    /// Returns a copy of an element, or `None` if the index has the wrong rank
    /// or is out of bounds.
    pub fn get<I: ArrayIndex>(&self, index: I) -> Option<T> {
        let offset = index.checked_offset(self.mapping())?;

        unsafe { Some(self.ptr_at(offset).read()) }
    }

    /// Copies the elements into a vector in row-major order.
    pub fn into_vec(self) -> Vec<T> {
        self.to_vec()
    }

    /// Returns a copy of an element.
    ///
    /// # Panics
    ///
    /// Panics if the rank does not match, or if the index is out of bounds as
    /// selected by the `bounds-check` feature.
    pub fn read<I: ArrayIndex>(&self, index: I) -> T {
        unsafe { self.ptr_at(index.offset(self.mapping())).read() }
    }

    /// Writes an element, checking the rank, the sign and the bounds of each index.
    pub fn set_at<I: NdIndex>(&self, index: I, value: T) -> Result<()> {
        let offset = self.mapping().offset(&index)?;

        unsafe {
            self.ptr_at(offset).write(value);
        }

        Ok(())
    }

    /// Copies the elements into a new array with owned storage.
    pub fn to_owned_array(&self) -> NdArray<T> {
        NdArray::from_mapping(self.to_vec(), self.mapping().clone())
    }

    /// Copies the elements into a vector in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        (0..self.size()).map(|i| unsafe { self.ptr_at(i).read() }).collect()
    }

    /// Writes an element.
    ///
    /// # Panics
    ///
    /// Panics if the rank does not match, or if the index is out of bounds as
    /// selected by the `bounds-check` feature.
    pub fn write<I: ArrayIndex>(&self, index: I, value: T) {
        unsafe {
            self.ptr_at(index.offset(self.mapping())).write(value);
        }
    }
}

impl<T: Clone> Clone for NdArray<T> {
    fn clone(&self) -> Self {
        Self::from_mapping(self.data().to_vec(), self.mapping().clone())
    }
}

impl<T> Clone for ArrayView<T> {
    fn clone(&self) -> Self {
        let ptr = self.as_ptr() as *mut T;

        match self.owner() {
            Some(owner) => unsafe {
                Self::from_raw(RawArray::from_shared(ptr, self.mapping().clone(), owner.clone()))
            },
            None => unreachable!(),
        }
    }
}

impl<T: Debug> Debug for NdArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdArray")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("view", &false)
            .field("data", &self.data())
            .finish()
    }
}

impl<T: Copy + Debug> Debug for ArrayView<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdArray")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("view", &true)
            .field("data", &self.to_vec())
            .finish()
    }
}

impl<T, I: ArrayIndex> Index<I> for NdArray<T> {
    type Output = T;

    fn index(&self, index: I) -> &T {
        unsafe { &*self.as_ptr().add(index.offset(self.mapping())) }
    }
}

impl<T, I: ArrayIndex> IndexMut<I> for NdArray<T> {
    fn index_mut(&mut self, index: I) -> &mut T {
        let offset = index.offset(self.mapping());

        unsafe { &mut *self.as_mut_ptr().add(offset) }
    }
}

impl<T: PartialEq> PartialEq for NdArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.data() == other.data()
    }
}

impl<T: Copy + PartialEq> PartialEq<ArrayView<T>> for NdArray<T> {
    fn eq(&self, other: &ArrayView<T>) -> bool {
        self.shape() == other.shape() && self.data() == other.to_vec()
    }
}

impl<T: Copy + PartialEq> PartialEq for ArrayView<T> {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.to_vec() == other.to_vec()
    }
}

impl<T: Eq> Eq for NdArray<T> {}
