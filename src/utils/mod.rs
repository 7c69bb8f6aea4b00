//! Various unsorted utilities.

pub use self::array::Array2;

mod array;
