//! YEAR function
//!
//! Extracts the calendar year from a DATE or TIMESTAMP. Timestamps are read in
//! the time zone of the evaluation configuration.

use chrono::Datelike;
use dingo_expr_types::{Type, TypeKind, Types, Value};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::cache::OpCache;
use crate::config::ExprConfig;
use crate::error::{ExprError, ExprResult};
use crate::op::OpFactory;

static YEAR_FUNS: Lazy<OpCache<YearFun>> = Lazy::new(OpCache::new);

/// YEAR specialized for one operand type
#[derive(Debug)]
pub struct YearFun {
    operand_type: Type,
}

impl YearFun {
    pub const NAME: &'static str = "YEAR";

    /// Get the YEAR implementation for `operand`, `None` if it has no year
    pub fn of(operand: &Type) -> Option<Arc<YearFun>> {
        YEAR_FUNS.get_or_build(operand, |ty| match ty.kind() {
            TypeKind::Date | TypeKind::Timestamp => Some(Self {
                operand_type: ty.clone(),
            }),
            _ => None,
        })
    }

    /// Evaluate on one value
    pub fn eval(&self, value: &Value, config: &ExprConfig) -> ExprResult<Value> {
        match (self.operand_type.kind(), value) {
            (_, Value::Null) => Ok(Value::Null),
            (TypeKind::Date, Value::Date(date)) => Ok(Value::Int(date.year())),
            (TypeKind::Timestamp, Value::Timestamp(ts)) => {
                Ok(Value::Int(ts.with_timezone(&config.time_zone).year()))
            }
            (_, other) => Err(ExprError::type_mismatch(&self.operand_type, other.kind_name())),
        }
    }
}

impl OpFactory for YearFun {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn key(&self) -> &Type {
        &self.operand_type
    }

    fn result_type(&self) -> Type {
        Types::int()
    }
}
