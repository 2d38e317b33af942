use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::{self, NonNull};

use crate::mapping::DenseMapping;
use crate::owner::OwnerHandle;

// Storage of the array elements, either owned or shared with other arrays.
pub(crate) enum Backing {
    Owned { capacity: usize },
    Shared(OwnerHandle),
}

pub(crate) struct RawArray<T> {
    ptr: NonNull<T>,
    mapping: DenseMapping,
    backing: Backing,
    phantom: PhantomData<T>,
}

impl<T> RawArray<T> {
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    pub(crate) fn from_vec(vec: Vec<T>, mapping: DenseMapping) -> Self {
        assert!(vec.len() == mapping.len(), "length mismatch");

        let mut vec = ManuallyDrop::new(vec);

        Self {
            ptr: unsafe { NonNull::new_unchecked(vec.as_mut_ptr()) },
            backing: Backing::Owned { capacity: vec.capacity() },
            mapping,
            phantom: PhantomData,
        }
    }

    pub(crate) unsafe fn from_shared(
        ptr: *mut T,
        mapping: DenseMapping,
        owner: OwnerHandle,
    ) -> Self {
        let ptr = match NonNull::new(ptr) {
            Some(ptr) => ptr,
            None => {
                assert!(mapping.is_empty(), "null pointer");

                NonNull::dangling()
            }
        };

        Self { ptr, mapping, backing: Backing::Shared(owner), phantom: PhantomData }
    }

    // Returns the elements as a vector if the storage is owned.
    pub(crate) fn into_vec(self) -> Result<Vec<T>, Self> {
        let capacity = match self.backing {
            Backing::Owned { capacity } => capacity,
            Backing::Shared(_) => return Err(self),
        };

        let me = ManuallyDrop::new(self);

        unsafe {
            let vec = Vec::from_raw_parts(me.ptr.as_ptr(), me.mapping.len(), capacity);

            drop(ptr::read(&me.mapping));

            Ok(vec)
        }
    }

    pub(crate) fn mapping(&self) -> &DenseMapping {
        &self.mapping
    }

    pub(crate) fn owner(&self) -> Option<&OwnerHandle> {
        match &self.backing {
            Backing::Owned { .. } => None,
            Backing::Shared(owner) => Some(owner),
        }
    }
}

impl<T> Drop for RawArray<T> {
    fn drop(&mut self) {
        if let Backing::Owned { capacity } = self.backing {
            unsafe {
                drop(Vec::from_raw_parts(self.ptr.as_ptr(), self.mapping.len(), capacity));
            }
        }
    }
}
