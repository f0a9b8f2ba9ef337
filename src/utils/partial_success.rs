//! Type aliases for operations that support partial success.
//! Parts of such an operation may fail without failing the whole; the failures are
//! handed back next to the result so the caller can report them.

/// A completed operation together with the errors of the parts that were skipped.
pub type PartialSuccess<T, E> = ( T, Vec<E> );
