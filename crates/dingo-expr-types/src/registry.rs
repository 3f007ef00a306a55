//! Type registry
//!
//! Canonical instances for every scalar type and for arrays/lists of scalars,
//! constructors for composite types, and type unification.

use crate::host::HostType;
use crate::{Type, TypeKind, TypeVisitor, Value};
use once_cell::sync::Lazy;

/// One instance per scalar variant
struct ScalarTable {
    null: Type,
    int: Type,
    long: Type,
    float: Type,
    double: Type,
    bool: Type,
    decimal: Type,
    string: Type,
    bytes: Type,
    date: Type,
    time: Type,
    timestamp: Type,
    interval_year_month: Type,
    interval_day_time: Type,
    any: Type,
}

impl ScalarTable {
    fn new() -> Self {
        Self {
            null: Type::from_kind(TypeKind::Null),
            int: Type::from_kind(TypeKind::Int),
            long: Type::from_kind(TypeKind::Long),
            float: Type::from_kind(TypeKind::Float),
            double: Type::from_kind(TypeKind::Double),
            bool: Type::from_kind(TypeKind::Bool),
            decimal: Type::from_kind(TypeKind::Decimal),
            string: Type::from_kind(TypeKind::String),
            bytes: Type::from_kind(TypeKind::Bytes),
            date: Type::from_kind(TypeKind::Date),
            time: Type::from_kind(TypeKind::Time),
            timestamp: Type::from_kind(TypeKind::Timestamp),
            interval_year_month: Type::from_kind(TypeKind::IntervalYearMonth),
            interval_day_time: Type::from_kind(TypeKind::IntervalDayTime),
            any: Type::from_kind(TypeKind::Any),
        }
    }

    /// Wrap every scalar of `self` into a composite built by `wrap`
    fn map(&self, wrap: impl Fn(Type) -> TypeKind) -> Self {
        let build = |t: &Type| Type::from_kind(wrap(t.clone()));
        Self {
            null: build(&self.null),
            int: build(&self.int),
            long: build(&self.long),
            float: build(&self.float),
            double: build(&self.double),
            bool: build(&self.bool),
            decimal: build(&self.decimal),
            string: build(&self.string),
            bytes: build(&self.bytes),
            date: build(&self.date),
            time: build(&self.time),
            timestamp: build(&self.timestamp),
            interval_year_month: build(&self.interval_year_month),
            interval_day_time: build(&self.interval_day_time),
            any: build(&self.any),
        }
    }
}

struct Canonical {
    scalars: ScalarTable,
    arrays: ScalarTable,
    lists: ScalarTable,
    map: Type,
}

static CANONICAL: Lazy<Canonical> = Lazy::new(|| {
    let scalars = ScalarTable::new();
    let arrays = scalars.map(TypeKind::Array);
    let lists = scalars.map(TypeKind::List);
    let map = Type::from_kind(TypeKind::Map(scalars.any.clone(), scalars.any.clone()));
    Canonical {
        scalars,
        arrays,
        lists,
        map,
    }
});

/// Maps a scalar type to its canonical collection in a table
struct CollectionBuilder(&'static ScalarTable);

impl TypeVisitor<Type, ()> for CollectionBuilder {
    fn visit_null(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.null.clone())
    }

    fn visit_int(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.int.clone())
    }

    fn visit_long(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.long.clone())
    }

    fn visit_float(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.float.clone())
    }

    fn visit_double(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.double.clone())
    }

    fn visit_bool(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.bool.clone())
    }

    fn visit_decimal(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.decimal.clone())
    }

    fn visit_string(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.string.clone())
    }

    fn visit_bytes(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.bytes.clone())
    }

    fn visit_date(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.date.clone())
    }

    fn visit_time(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.time.clone())
    }

    fn visit_timestamp(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.timestamp.clone())
    }

    fn visit_interval_year_month(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.interval_year_month.clone())
    }

    fn visit_interval_day_time(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.interval_day_time.clone())
    }

    fn visit_any(&self, _ty: &Type, _ctx: ()) -> Option<Type> {
        Some(self.0.any.clone())
    }
}

/// Registry of canonical types and type constructors
///
/// Scalars, arrays/lists of scalars and `MAP<ANY, ANY>` are interned: every call
/// returns the same instance. Other composites are built fresh on each call and
/// compare equal structurally.
#[derive(Debug, Clone, Copy, Default)]
pub struct Types;

impl Types {
    // === Scalars ===

    pub fn null() -> Type {
        CANONICAL.scalars.null.clone()
    }

    pub fn int() -> Type {
        CANONICAL.scalars.int.clone()
    }

    pub fn long() -> Type {
        CANONICAL.scalars.long.clone()
    }

    pub fn float() -> Type {
        CANONICAL.scalars.float.clone()
    }

    pub fn double() -> Type {
        CANONICAL.scalars.double.clone()
    }

    pub fn bool() -> Type {
        CANONICAL.scalars.bool.clone()
    }

    pub fn decimal() -> Type {
        CANONICAL.scalars.decimal.clone()
    }

    pub fn string() -> Type {
        CANONICAL.scalars.string.clone()
    }

    pub fn bytes() -> Type {
        CANONICAL.scalars.bytes.clone()
    }

    pub fn date() -> Type {
        CANONICAL.scalars.date.clone()
    }

    pub fn time() -> Type {
        CANONICAL.scalars.time.clone()
    }

    pub fn timestamp() -> Type {
        CANONICAL.scalars.timestamp.clone()
    }

    pub fn interval_year_month() -> Type {
        CANONICAL.scalars.interval_year_month.clone()
    }

    pub fn interval_day_time() -> Type {
        CANONICAL.scalars.interval_day_time.clone()
    }

    pub fn any() -> Type {
        CANONICAL.scalars.any.clone()
    }

    /// The canonical `MAP<ANY, ANY>`
    pub fn map_any() -> Type {
        CANONICAL.map.clone()
    }

    // === Composite constructors ===

    /// Create an array type
    ///
    /// Arrays of scalars are canonical; arrays of composites are built fresh.
    pub fn array(element_type: Type) -> Type {
        if element_type.is_scalar() {
            if let Some(canonical) = CollectionBuilder(&CANONICAL.arrays).visit(&element_type, ()) {
                return canonical;
            }
        }
        Type::from_kind(TypeKind::Array(element_type))
    }

    /// Create a list type
    ///
    /// Lists of scalars are canonical; lists of composites are built fresh.
    pub fn list(element_type: Type) -> Type {
        if element_type.is_scalar() {
            if let Some(canonical) = CollectionBuilder(&CANONICAL.lists).visit(&element_type, ()) {
                return canonical;
            }
        }
        Type::from_kind(TypeKind::List(element_type))
    }

    /// Create a map type
    pub fn map(key_type: Type, value_type: Type) -> Type {
        Type::from_kind(TypeKind::Map(key_type, value_type))
    }

    /// Create a tuple type
    pub fn tuple(element_types: impl IntoIterator<Item = Type>) -> Type {
        Type::from_kind(TypeKind::Tuple(element_types.into_iter().collect()))
    }

    // === Derivation ===

    /// Get the type of a host Rust type
    ///
    /// Types the model does not know resolve to `ANY`; this never fails.
    pub fn class_type<T: HostType + ?Sized>() -> Type {
        T::expr_type()
    }

    /// Get the type of a runtime value
    pub fn value_type(value: &Value) -> Type {
        match value {
            Value::Null => Self::null(),
            Value::Int(_) => Self::int(),
            Value::Long(_) => Self::long(),
            Value::Float(_) => Self::float(),
            Value::Double(_) => Self::double(),
            Value::Bool(_) => Self::bool(),
            Value::Decimal(_) => Self::decimal(),
            Value::String(_) => Self::string(),
            Value::Bytes(_) => Self::bytes(),
            Value::Date(_) => Self::date(),
            Value::Time(_) => Self::time(),
            Value::Timestamp(_) => Self::timestamp(),
            Value::IntervalYearMonth(_) => Self::interval_year_month(),
            Value::IntervalDayTime(_) => Self::interval_day_time(),
            Value::Array(array) => Self::array(array.element_type.clone()),
            Value::List(_) => Self::list(Self::any()),
            Value::Tuple(elements) => Self::tuple(elements.iter().map(Self::value_type)),
            Value::Map(_) => Self::map_any(),
            Value::Object(_) => Self::any(),
        }
    }

    /// Get the type of a possibly absent value, `NULL` when absent
    pub fn value_type_of(value: Option<&Value>) -> Type {
        value.map_or_else(Self::null, Self::value_type)
    }

    // === Unification ===

    /// Find the type operands of a mixed-type operation promote to
    ///
    /// If any operand is numeric, the one with the highest numeric precedence
    /// wins, with `BOOL` promoted to `INT`. Otherwise all operands must be
    /// `NULL` or one and the same type. Returns `None` when the operands do not
    /// unify; callers report the operator as not applicable.
    ///
    /// `NULL` is not numeric, so it never moves the operands onto the numeric
    /// path: `best_type(&[STRING, BYTES, NULL])` is `None`, not `INT`.
    pub fn best_type(types: &[Type]) -> Option<Type> {
        let mut best = Self::null();
        for ty in types {
            if ty.numeric_precedence() > best.numeric_precedence() {
                best = ty.clone();
            }
        }
        if best.numeric_precedence() != Type::NOT_NUMERIC {
            return Some(match best.kind() {
                TypeKind::Null | TypeKind::Bool => Self::int(),
                _ => best,
            });
        }

        let mut common: Option<&Type> = None;
        for ty in types.iter().filter(|t| !t.is_null()) {
            match common {
                None => common = Some(ty),
                Some(c) if c == ty => {}
                Some(c) => {
                    log::debug!("no common type for {} and {}", c, ty);
                    return None;
                }
            }
        }
        Some(common.cloned().unwrap_or_else(Self::null))
    }
}
