//! Slice operator
//!
//! `SLICE(collection, index)` takes the element at `index` out of every nested
//! collection of `collection`, i.e. extracts one column. Collections of
//! scalars (or maps) are handled by the generic implementation; collections of
//! arrays, lists or tuples get a specialization chosen by their nesting shape.

use dingo_expr_types::{Type, TypeKind, Types, Value};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::cache::OpCache;
use crate::error::{ExprError, ExprResult};
use crate::op::OpFactory;

static SLICE_OPS: Lazy<OpCache<SliceOp>> = Lazy::new(OpCache::new);

/// Nesting shape a slice is specialized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKind {
    ArrayOfArray,
    ArrayOfList,
    ArrayOfTuple,
    ListOfArray,
    ListOfList,
}

impl SliceKind {
    /// Check if the outer collection is an array
    pub fn is_array(self) -> bool {
        matches!(self, Self::ArrayOfArray | Self::ArrayOfList | Self::ArrayOfTuple)
    }
}

/// A slice operator specialized for one original collection type
#[derive(Debug)]
pub struct SliceOp {
    kind: SliceKind,
    original_type: Type,
    /// Element type of the original, the nested collection type
    inner_type: Type,
    result_type: Type,
}

impl SliceOp {
    pub const NAME: &'static str = "SLICE";

    /// Get the cached slice specialization for `original`
    ///
    /// Returns `None` when no specialization applies and the generic slice
    /// should be used.
    pub fn of(original: &Type) -> Option<Arc<SliceOp>> {
        SLICE_OPS.get_or_build(original, Self::specialize)
    }

    /// Decide the slice specialization for `original` without caching
    pub fn specialize(original: &Type) -> Option<SliceOp> {
        let (kind, inner) = match original.kind() {
            TypeKind::Array(inner) => match inner.kind() {
                TypeKind::Array(_) => (SliceKind::ArrayOfArray, inner),
                TypeKind::List(_) => (SliceKind::ArrayOfList, inner),
                TypeKind::Tuple(_) => (SliceKind::ArrayOfTuple, inner),
                _ => return None,
            },
            TypeKind::List(inner) => match inner.kind() {
                TypeKind::Array(_) => (SliceKind::ListOfArray, inner),
                TypeKind::List(_) => (SliceKind::ListOfList, inner),
                _ => return None,
            },
            _ => return None,
        };

        let column_type = match inner.kind() {
            TypeKind::Array(element) | TypeKind::List(element) => element.clone(),
            TypeKind::Tuple(elements) => common_element(elements),
            _ => return None,
        };
        let result_type = if kind.is_array() {
            Types::array(column_type)
        } else {
            Types::list(column_type)
        };
        log::trace!("{} of {} is {:?}, producing {}", Self::NAME, original, kind, result_type);

        Some(Self {
            kind,
            original_type: original.clone(),
            inner_type: inner.clone(),
            result_type,
        })
    }

    /// The nesting shape
    pub fn kind(&self) -> SliceKind {
        self.kind
    }

    /// Slice `value` at a runtime index value
    ///
    /// A null index gives null; the index must otherwise be a non-negative
    /// INT or LONG.
    pub fn eval_value(&self, value: &Value, index: &Value) -> ExprResult<Value> {
        let index = match index {
            Value::Null => return Ok(Value::Null),
            Value::Int(i) => i64::from(*i),
            Value::Long(i) => *i,
            other => return Err(ExprError::type_mismatch(Types::long(), other.kind_name())),
        };
        let index = usize::try_from(index).map_err(|_| {
            ExprError::invalid_operand(Self::NAME, format!("negative index {}", index))
        })?;
        self.eval(value, index)
    }

    /// Take element `index` of every nested collection in `value`
    ///
    /// Null or too short nested collections give null in that position.
    pub fn eval(&self, value: &Value, index: usize) -> ExprResult<Value> {
        let outer = match (self.kind.is_array(), value) {
            (_, Value::Null) => return Ok(Value::Null),
            (true, Value::Array(array)) => &array.elements,
            (false, Value::List(elements)) => elements,
            (_, other) => {
                return Err(ExprError::type_mismatch(&self.original_type, other.kind_name()));
            }
        };

        let column = outer
            .iter()
            .map(|nested| {
                let elements = match (self.kind, nested) {
                    (_, Value::Null) => return Ok(Value::Null),
                    (SliceKind::ArrayOfArray | SliceKind::ListOfArray, Value::Array(array)) => {
                        &array.elements
                    }
                    (SliceKind::ArrayOfList | SliceKind::ListOfList, Value::List(elements)) => elements,
                    (SliceKind::ArrayOfTuple, Value::Tuple(elements)) => elements,
                    (_, other) => {
                        return Err(ExprError::type_mismatch(&self.inner_type, other.kind_name()));
                    }
                };
                Ok(elements.get(index).cloned().unwrap_or(Value::Null))
            })
            .collect::<ExprResult<Vec<_>>>()?;

        Ok(match self.result_type.element_type() {
            Some(element) if self.kind.is_array() => Value::array(element.clone(), column),
            _ => Value::List(column),
        })
    }
}

impl OpFactory for SliceOp {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn key(&self) -> &Type {
        &self.original_type
    }

    fn result_type(&self) -> Type {
        self.result_type.clone()
    }
}

/// The single type shared by all tuple elements, `ANY` otherwise
fn common_element(elements: &[Type]) -> Type {
    match elements.split_first() {
        Some((first, rest)) if rest.iter().all(|e| e == first) => first.clone(),
        _ => Types::any(),
    }
}
