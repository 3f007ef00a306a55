//! Collection operators

pub mod slice;

pub use slice::{SliceKind, SliceOp};
