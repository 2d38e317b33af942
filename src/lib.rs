/*!
# Contiguous multidimensional arrays

The cnda crate provides a contiguous multidimensional array with row-major
element order and dynamic rank. It is a building block for numeric code that
needs a predictable memory layout, for example language bindings, particle and
grid data stored as arrays of structures, or tensor pipelines.

Here are the main features of cnda:

- Dense array type [`NdArray`] with owned storage, or as a view into a buffer
  shared with other arrays, see [`ArrayView`].
- Shared buffers are reference counted, and several views with different shapes
  and offsets can alias one allocation.
- Explicit multidimensional and flat indexing, with checked, policy-gated and
  unchecked accessors.
- Generic over the element type, which can be a scalar or a flat aggregate.

## Ownership

An array created with [`NdArray::new`], [`NdArray::from_elem`] or
[`NdArray::from_vec`] owns its elements and frees them when dropped. It has
exclusive access to its elements, and gives references and slices.

An array created with [`NdArray::view`] or [`NdArray::from_raw_parts`] is a
view. It holds a data pointer and an [`OwnerHandle`] that keeps the buffer alive.
Cloning a view copies the handle and not the elements, and the buffer is
released when the last handle is dropped. The functions in the [`view`] module
create one or more views over a new [`SharedBuffer`].

Views may alias each other, so their elements are read and written by value
with methods such as `at`, `set_at`, `read` and `write`. References into a view
are only given by `unsafe` methods.

## Indexing

Row-major strides are computed once when the array is created. The last
dimension has stride 1, and an empty shape gives a scalar array with one element.

- `at` and [`NdArray::index`] always check the rank, the sign and the bounds
  of the index, and return an [`Error`] on failure.
- The indexing operators, [`NdArray::element`] and the `read` and `write`
  methods of views always check the rank. Each dimension is checked only with
  the `bounds-check` feature, while otherwise the resulting flat offset is
  checked against the number of elements.
- [`NdArray::get_unchecked`] does no checking, and an index out of bounds is
  undefined behavior.

```
use cnda::{make_two_views, NdArray};

let mut a = NdArray::<i32>::new([3, 4]);

a[[1, 2]] = 99;

assert_eq!(a.strides(), [4, 1]);
assert_eq!(a.index([1, 2]), Ok(6));
assert_eq!(a.data()[6], 99);
assert!(a.at([-1, 0]).is_err());

let (v1, v2) = make_two_views([2, 3], [6], vec![0; 6]).unwrap();

v1.write([1, 2], 5);

assert_eq!(v2.read(5), 5);
```

## Features

- `bounds-check`: check each dimension in the indexing operators.
- `serde`: serialization of [`Shape`] and [`DType`].
*/

#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![warn(unused_results)]

mod array;
mod error;
mod mapping;
mod raw_array;
mod shape;

pub mod dtype;
pub mod index;
pub mod owner;
pub mod view;

pub use array::{ArrayView, NdArray};
pub use dtype::{DType, Element, TypeRegistry};
pub use error::{Error, Result};
pub use mapping::DenseMapping;
pub use owner::{Owned, Owner, OwnerHandle, Shared, SharedBuffer, Storage};
pub use shape::{IntoShape, Shape};
pub use view::{make_two_views, make_view, make_views};
