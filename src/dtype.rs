//! Module for element types and their sizes.
//!
//! Elements are fixed-size payloads, either scalars or flat aggregates. The
//! size of an element type can be looked up by name, for layers that select
//! the element type from a string.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::mem;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::array::NdArray;
use crate::error::{Error, Result};
use crate::owner::Storage;

const ALIASES: [(&str, DType); 3] =
    [("int", DType::Int32), ("float", DType::Float32), ("double", DType::Float64)];

/// Scalar element type.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize), serde(rename_all = "lowercase"))]
pub enum DType {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
}

/// Scalar element trait, mapping a Rust type to its element type.
pub trait Element: Copy + Default + 'static {
    /// Element type.
    const DTYPE: DType;
}

/// Registry of element type sizes by name.
///
/// The scalar types are registered by default, and aggregate types are added
/// with [`register`](Self::register).
#[derive(Clone, Debug)]
pub struct TypeRegistry {
    sizes: HashMap<String, usize>,
}

impl DType {
    /// All scalar element types.
    pub const ALL: [DType; 4] = [DType::Int32, DType::Int64, DType::Float32, DType::Float64];

    /// Returns the element type of the Rust type.
    pub fn of<T: Element>() -> Self {
        T::DTYPE
    }

    /// Returns the canonical name of the element type.
    pub fn name(self) -> &'static str {
        match self {
            DType::Int32 => "int32",
            DType::Int64 => "int64",
            DType::Float32 => "float32",
            DType::Float64 => "float64",
        }
    }

    /// Returns the size of the element type in bytes.
    pub fn size(self) -> usize {
        match self {
            DType::Int32 => mem::size_of::<i32>(),
            DType::Int64 => mem::size_of::<i64>(),
            DType::Float32 => mem::size_of::<f32>(),
            DType::Float64 => mem::size_of::<f64>(),
        }
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int32" | "int" => Ok(DType::Int32),
            "int64" => Ok(DType::Int64),
            "float32" | "float" => Ok(DType::Float32),
            "float64" | "double" => Ok(DType::Float64),
            _ => Err(Error::UnknownType(s.to_owned())),
        }
    }
}

macro_rules! impl_element {
    ($($type:ty => $dtype:ident),+) => {
        $(
            impl Element for $type {
                const DTYPE: DType = DType::$dtype;
            }
        )+
    };
}

impl_element!(i32 => Int32, i64 => Int64, f32 => Float32, f64 => Float64);

impl TypeRegistry {
    /// Creates a registry with the scalar element types.
    pub fn new() -> Self {
        let mut sizes = HashMap::new();

        for dtype in DType::ALL {
            _ = sizes.insert(dtype.name().to_owned(), dtype.size());
        }

        for (alias, dtype) in ALIASES {
            _ = sizes.insert(alias.to_owned(), dtype.size());
        }

        Self { sizes }
    }

    /// Returns `true` if a type is registered under the name.
    pub fn contains(&self, name: &str) -> bool {
        self.sizes.contains_key(name)
    }

    /// Registers the element type under the name, and returns the size
    /// previously registered under the same name if any.
    pub fn register<T: Copy + 'static>(&mut self, name: &str) -> Option<usize> {
        log::debug!("registering element type {} with size {}", name, mem::size_of::<T>());

        self.sizes.insert(name.to_owned(), mem::size_of::<T>())
    }

    /// Returns the size in bytes of the element type registered under the name.
    pub fn size_of(&self, name: &str) -> Result<usize> {
        self.sizes.get(name).copied().ok_or_else(|| Error::UnknownType(name.to_owned()))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element, S: Storage> NdArray<T, S> {
    /// Returns the element type of the array.
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }
}

/// Returns the size in bytes of the scalar element type with the given name.
pub fn size_of_name(name: &str) -> Result<usize> {
    name.parse::<DType>().map(DType::size)
}
