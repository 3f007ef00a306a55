//! Dingo expression runtime support
//!
//! This crate binds operators to operand types for the expression evaluator:
//!
//! - **Specialization**: operators such as `SLICE` pick an implementation from
//!   the nesting shape of their operand type (`SliceOp::of`)
//! - **Caching**: specializations are memoized per original type in an
//!   [`OpCache`], shared by every thread
//! - **Configuration**: [`ExprConfig`] carries time zone and locale into
//!   operator evaluation
//!
//! # Example
//!
//! ```
//! use dingo_expr_runtime::{OpFactory, SliceOp};
//! use dingo_expr_types::Types;
//!
//! let rows = Types::list(Types::list(Types::string()));
//! let slice = SliceOp::of(&rows).expect("list of lists is specialized");
//! assert_eq!(slice.result_type(), Types::list(Types::string()));
//!
//! // Collections of scalars use the generic slice.
//! assert!(SliceOp::of(&Types::list(Types::string())).is_none());
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod op;

pub use cache::OpCache;
pub use config::{ExprConfig, ExprConfigBuilder};
pub use error::{ExprError, ExprResult};
pub use op::collection::{SliceKind, SliceOp};
pub use op::date::YearFun;
pub use op::OpFactory;
