//! Runtime values
//!
//! The host-side representation of the values expressions evaluate over. Each
//! value knows its expression type through [`Types::value_type`](crate::Types::value_type).

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::Type;

/// A runtime value
#[derive(Debug, Clone)]
pub enum Value {
    // === Scalars ===
    Null,
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Decimal(Decimal),
    String(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(DateTime<Utc>),
    /// Interval in months
    IntervalYearMonth(i32),
    IntervalDayTime(TimeDelta),

    // === Composites ===
    /// Array with a declared element type
    Array(ArrayValue),
    /// List of values of any type
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Map entries in insertion order
    Map(Vec<(Value, Value)>),

    /// Opaque host object, typed as `ANY`
    Object(Arc<dyn Any + Send + Sync>),
}

/// An array value with its element type
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    pub element_type: Type,
    pub elements: Vec<Value>,
}

impl Value {
    /// Create an array value
    pub fn array(element_type: Type, elements: Vec<Value>) -> Self {
        Self::Array(ArrayValue {
            element_type,
            elements,
        })
    }

    /// Wrap an arbitrary host object
    pub fn object<T: Any + Send + Sync>(object: T) -> Self {
        Self::Object(Arc::new(object))
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the elements of an array, list or tuple
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Array(array) => Some(&array.elements),
            Self::List(elements) | Self::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    /// Get the variant name, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Int(_) => "INT",
            Self::Long(_) => "LONG",
            Self::Float(_) => "FLOAT",
            Self::Double(_) => "DOUBLE",
            Self::Bool(_) => "BOOL",
            Self::Decimal(_) => "DECIMAL",
            Self::String(_) => "STRING",
            Self::Bytes(_) => "BYTES",
            Self::Date(_) => "DATE",
            Self::Time(_) => "TIME",
            Self::Timestamp(_) => "TIMESTAMP",
            Self::IntervalYearMonth(_) => "INTERVAL_YEAR_MONTH",
            Self::IntervalDayTime(_) => "INTERVAL_DAY_TIME",
            Self::Array(_) => "ARRAY",
            Self::List(_) => "LIST",
            Self::Tuple(_) => "TUPLE",
            Self::Map(_) => "MAP",
            Self::Object(_) => "OBJECT",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Long(a), Self::Long(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::IntervalYearMonth(a), Self::IntervalYearMonth(b)) => a == b,
            (Self::IntervalDayTime(a), Self::IntervalDayTime(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            // Host objects are only equal to themselves.
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", v)?;
            }
            Ok(())
        }

        match self {
            Self::Null => f.write_str("null"),
            Self::Int(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "'{}'", v),
            Self::Bytes(v) => write!(f, "{:02x?}", v),
            Self::Date(v) => write!(f, "{}", v),
            Self::Time(v) => write!(f, "{}", v),
            Self::Timestamp(v) => write!(f, "{}", v),
            Self::IntervalYearMonth(months) => write!(f, "{} MONTHS", months),
            Self::IntervalDayTime(delta) => write!(f, "{}", delta),
            Self::Array(array) => {
                f.write_str("[")?;
                join(f, &array.elements)?;
                f.write_str("]")
            }
            Self::List(elements) => {
                f.write_str("LIST(")?;
                join(f, elements)?;
                f.write_str(")")
            }
            Self::Tuple(elements) => {
                f.write_str("(")?;
                join(f, elements)?;
                f.write_str(")")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                f.write_str("}")
            }
            Self::Object(_) => f.write_str("<object>"),
        }
    }
}
