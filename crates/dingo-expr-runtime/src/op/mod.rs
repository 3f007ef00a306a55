//! Operator specialization
//!
//! Operators whose implementation depends on the shape of their operand type
//! expose a static `of(&Type)` lookup. It returns the specialization for that
//! type from a process-wide [`OpCache`](crate::OpCache), or `None` when the
//! generic implementation applies.

pub mod collection;
pub mod date;

use dingo_expr_types::Type;

/// An operator specialized for one original operand type
pub trait OpFactory: Send + Sync {
    /// Operator name, e.g. "SLICE"
    fn name(&self) -> &'static str;

    /// The original operand type this operator was specialized for
    fn key(&self) -> &Type;

    /// The type of the values this operator produces
    fn result_type(&self) -> Type;
}
