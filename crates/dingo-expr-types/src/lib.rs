//! Dingo expression type system
//!
//! This crate defines the types the expression runtime works with:
//! - The closed type lattice (scalars plus Array, List, Tuple and Map)
//! - A visitor for adding operations over every type variant
//! - The type registry: canonical instances, constructors and unification
//! - Host type and runtime value to type derivation

pub mod host;
pub mod parse;
pub mod registry;
pub mod type_system;
pub mod value;
pub mod visitor;

pub use host::HostType;
pub use parse::{MAX_NESTING_DEPTH, TypeParseError};
pub use registry::Types;
pub use type_system::{codes, TupleElements, Type, TypeKind};
pub use value::{ArrayValue, Value};
pub use visitor::TypeVisitor;
