//! Expression Type Lattice
//!
//! This module defines the closed set of types the expression runtime can hold:
//! - `TypeKind` enum with every scalar and composite variant
//! - `Type` handle, a cheap shared reference used everywhere a type is passed
//! - Stable names, integer codes and numeric precedence
//!
//! Composite types are only built through [`Types`](crate::Types), which keeps
//! canonical instances for scalars and homogeneous collections of scalars.

use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Stable integer codes, one per variant.
pub mod codes {
    pub const NULL: i32 = 0;
    pub const INT: i32 = 1;
    pub const LONG: i32 = 2;
    pub const FLOAT: i32 = 3;
    pub const DOUBLE: i32 = 4;
    pub const BOOL: i32 = 5;
    pub const DECIMAL: i32 = 6;
    pub const STRING: i32 = 7;
    pub const BYTES: i32 = 8;
    pub const DATE: i32 = 101;
    pub const TIME: i32 = 102;
    pub const TIMESTAMP: i32 = 103;
    pub const INTERVAL_YEAR_MONTH: i32 = 207;
    pub const INTERVAL_DAY_TIME: i32 = 208;
    pub const ANY: i32 = 901;
    pub const ARRAY: i32 = 1001;
    pub const LIST: i32 = 1002;
    pub const MAP: i32 = 1003;
    pub const TUPLE: i32 = 1004;
}

/// Element types of a tuple
pub type TupleElements = SmallVec<[Type; 4]>;

/// The structure of a type
///
/// Match on this to branch over every variant; the compiler checks the match is
/// exhaustive. External code that wants a pluggable operation can use
/// [`TypeVisitor`](crate::TypeVisitor) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    // === Scalar Types ===
    /// Type of the null literal
    Null,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Boolean
    Bool,
    /// Arbitrary precision decimal
    Decimal,
    /// Unicode string
    String,
    /// Byte sequence, a scalar in this model
    Bytes,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Point in time
    Timestamp,
    /// Interval counted in years and months
    IntervalYearMonth,
    /// Interval counted in days and time units
    IntervalDayTime,
    /// Universal fallback type
    Any,

    // === Composite Types ===
    /// Fixed-element-type array
    Array(Type),
    /// List of elements
    List(Type),
    /// Ordered, heterogeneous elements
    Tuple(TupleElements),
    /// Key/value map
    Map(Type, Type),
}

/// A shared, immutable expression type
///
/// Cloning is a reference-count bump. Equality is structural; canonical
/// instances handed out by the registry additionally compare equal by
/// identity (see [`Type::ptr_eq`]).
#[derive(Clone)]
pub struct Type(Arc<TypeKind>);

impl Type {
    /// Sentinel precedence of every non-numeric type
    pub const NOT_NUMERIC: u8 = 0;

    pub(crate) fn from_kind(kind: TypeKind) -> Self {
        Self(Arc::new(kind))
    }

    /// The structure of this type
    pub fn kind(&self) -> &TypeKind {
        &self.0
    }

    /// Check if both handles point to the same instance
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Get the canonical name of the variant (`"INT"`, `"ARRAY"`, ...)
    pub fn name(&self) -> &'static str {
        match self.kind() {
            TypeKind::Null => "NULL",
            TypeKind::Int => "INT",
            TypeKind::Long => "LONG",
            TypeKind::Float => "FLOAT",
            TypeKind::Double => "DOUBLE",
            TypeKind::Bool => "BOOL",
            TypeKind::Decimal => "DECIMAL",
            TypeKind::String => "STRING",
            TypeKind::Bytes => "BYTES",
            TypeKind::Date => "DATE",
            TypeKind::Time => "TIME",
            TypeKind::Timestamp => "TIMESTAMP",
            TypeKind::IntervalYearMonth => "INTERVAL_YEAR_MONTH",
            TypeKind::IntervalDayTime => "INTERVAL_DAY_TIME",
            TypeKind::Any => "ANY",
            TypeKind::Array(_) => "ARRAY",
            TypeKind::List(_) => "LIST",
            TypeKind::Tuple(_) => "TUPLE",
            TypeKind::Map(..) => "MAP",
        }
    }

    /// Get the stable integer code of the variant
    pub fn code(&self) -> i32 {
        match self.kind() {
            TypeKind::Null => codes::NULL,
            TypeKind::Int => codes::INT,
            TypeKind::Long => codes::LONG,
            TypeKind::Float => codes::FLOAT,
            TypeKind::Double => codes::DOUBLE,
            TypeKind::Bool => codes::BOOL,
            TypeKind::Decimal => codes::DECIMAL,
            TypeKind::String => codes::STRING,
            TypeKind::Bytes => codes::BYTES,
            TypeKind::Date => codes::DATE,
            TypeKind::Time => codes::TIME,
            TypeKind::Timestamp => codes::TIMESTAMP,
            TypeKind::IntervalYearMonth => codes::INTERVAL_YEAR_MONTH,
            TypeKind::IntervalDayTime => codes::INTERVAL_DAY_TIME,
            TypeKind::Any => codes::ANY,
            TypeKind::Array(_) => codes::ARRAY,
            TypeKind::List(_) => codes::LIST,
            TypeKind::Tuple(_) => codes::TUPLE,
            TypeKind::Map(..) => codes::MAP,
        }
    }

    /// Get the identity hash of this type
    ///
    /// Scalars hash to `code * 31`. Composites fold their component hashes into
    /// that seed (`h * 31 + component`), so structurally equal types hash the
    /// same however they were built.
    pub fn hash_code(&self) -> i32 {
        let seed = self.code().wrapping_mul(31);
        let fold = |h: i32, t: &Type| h.wrapping_mul(31).wrapping_add(t.hash_code());
        match self.kind() {
            TypeKind::Array(element) | TypeKind::List(element) => fold(seed, element),
            TypeKind::Tuple(elements) => elements.iter().fold(seed, fold),
            TypeKind::Map(key, value) => fold(fold(seed, key), value),
            _ => seed,
        }
    }

    /// Get the numeric precedence used for promotion
    ///
    /// `Bool < Int < Long < Float < Double < Decimal`; every other type
    /// (including `Null`) returns [`Type::NOT_NUMERIC`].
    pub fn numeric_precedence(&self) -> u8 {
        match self.kind() {
            TypeKind::Bool => 1,
            TypeKind::Int => 2,
            TypeKind::Long => 3,
            TypeKind::Float => 4,
            TypeKind::Double => 5,
            TypeKind::Decimal => 6,
            _ => Self::NOT_NUMERIC,
        }
    }

    /// Check if this type is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.kind(),
            TypeKind::Int | TypeKind::Long | TypeKind::Float | TypeKind::Double | TypeKind::Decimal
        )
    }

    /// Check if this type has no component types
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self.kind(),
            TypeKind::Array(_) | TypeKind::List(_) | TypeKind::Tuple(_) | TypeKind::Map(..)
        )
    }

    /// Check if this is the Null type
    pub fn is_null(&self) -> bool {
        matches!(self.kind(), TypeKind::Null)
    }

    /// Check if this is the Any type
    pub fn is_any(&self) -> bool {
        matches!(self.kind(), TypeKind::Any)
    }

    /// Check if this is an Array or List type
    pub fn is_collection(&self) -> bool {
        matches!(self.kind(), TypeKind::Array(_) | TypeKind::List(_))
    }

    /// Get the element type for Array and List types
    pub fn element_type(&self) -> Option<&Type> {
        match self.kind() {
            TypeKind::Array(element) | TypeKind::List(element) => Some(element),
            _ => None,
        }
    }

    /// Get the element types for Tuple types
    pub fn tuple_elements(&self) -> Option<&[Type]> {
        match self.kind() {
            TypeKind::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    /// Get the key and value types for Map types
    pub fn map_types(&self) -> Option<(&Type, &Type)> {
        match self.kind() {
            TypeKind::Map(key, value) => Some((key, value)),
            _ => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.kind() == other.kind()
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            TypeKind::Array(element) | TypeKind::List(element) => {
                write!(f, "{}<{}>", self.name(), element)
            }
            TypeKind::Tuple(elements) => {
                write!(f, "{}<", self.name())?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str(">")
            }
            TypeKind::Map(key, value) => write!(f, "{}<{}, {}>", self.name(), key, value),
            _ => f.write_str(self.name()),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
