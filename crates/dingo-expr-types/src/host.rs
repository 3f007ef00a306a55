//! Host type mapping
//!
//! [`HostType`] derives an expression type from a Rust type at build time.
//! Sequences map to arrays of their element type, except byte sequences which
//! are the scalar `BYTES`. Every list-like collection maps to `LIST<ANY>` and
//! every map-like collection to `MAP<ANY, ANY>`, since they share one set of
//! operations. Anything else resolves to `ANY`.

use crate::{Type, Types};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, LinkedList, VecDeque};

/// A Rust type with a known expression type
pub trait HostType {
    /// The expression type of this host type, `ANY` unless overridden
    fn expr_type() -> Type {
        Types::any()
    }

    /// The expression type of a sequence of this host type
    fn sequence_type() -> Type {
        Types::array(Self::expr_type())
    }
}

macro_rules! host_scalar {
    ($($host:ty => $ty:ident),* $(,)?) => {
        $(
            impl HostType for $host {
                fn expr_type() -> Type {
                    Types::$ty()
                }
            }
        )*
    };
}

host_scalar! {
    () => null,
    i32 => int,
    i64 => long,
    f32 => float,
    f64 => double,
    bool => bool,
    Decimal => decimal,
    String => string,
    str => string,
    NaiveDate => date,
    NaiveTime => time,
    NaiveDateTime => timestamp,
}

impl<Tz: TimeZone> HostType for DateTime<Tz> {
    fn expr_type() -> Type {
        Types::timestamp()
    }
}

// Integers without a matching expression type fall back to ANY.
impl HostType for i8 {}
impl HostType for i16 {}
impl HostType for u16 {}
impl HostType for u32 {}
impl HostType for u64 {}
impl HostType for usize {}
impl HostType for char {}

impl HostType for u8 {
    fn sequence_type() -> Type {
        Types::bytes()
    }
}

impl<T: HostType + ?Sized> HostType for &T {
    fn expr_type() -> Type {
        T::expr_type()
    }

    fn sequence_type() -> Type {
        T::sequence_type()
    }
}

impl<T: HostType> HostType for Option<T> {
    fn expr_type() -> Type {
        T::expr_type()
    }
}

impl<T: HostType> HostType for Vec<T> {
    fn expr_type() -> Type {
        T::sequence_type()
    }
}

impl<T: HostType> HostType for [T] {
    fn expr_type() -> Type {
        T::sequence_type()
    }
}

impl<T: HostType, const N: usize> HostType for [T; N] {
    fn expr_type() -> Type {
        T::sequence_type()
    }
}

impl<T: HostType + ?Sized> HostType for Box<T> {
    fn expr_type() -> Type {
        T::expr_type()
    }
}

impl<T> HostType for VecDeque<T> {
    fn expr_type() -> Type {
        Types::list(Types::any())
    }
}

impl<T> HostType for LinkedList<T> {
    fn expr_type() -> Type {
        Types::list(Types::any())
    }
}

impl<K, V, S> HostType for HashMap<K, V, S> {
    fn expr_type() -> Type {
        Types::map_any()
    }
}

impl<K, V> HostType for BTreeMap<K, V> {
    fn expr_type() -> Type {
        Types::map_any()
    }
}

impl<K, V, S> HostType for IndexMap<K, V, S> {
    fn expr_type() -> Type {
        Types::map_any()
    }
}
