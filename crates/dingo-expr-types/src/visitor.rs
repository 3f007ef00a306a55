//! Double dispatch over the type variants
//!
//! A [`TypeVisitor`] adds an operation over every type variant without touching
//! the variants themselves. [`Type::accept`] picks the visitor method from the
//! receiver's own variant. Every method defaults to `None`, which callers treat
//! as "no contribution", so a visitor only overrides the variants it handles.

use crate::{Type, TypeKind};

/// Visitor over type variants, producing `R` from a context `T`
pub trait TypeVisitor<R, T> {
    /// Visit a type, shorthand for [`Type::accept`]
    fn visit(&self, ty: &Type, ctx: T) -> Option<R>
    where
        Self: Sized,
    {
        ty.accept(self, ctx)
    }

    fn visit_null(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_int(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_long(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_float(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_double(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_bool(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_decimal(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_string(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_bytes(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_date(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_time(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_timestamp(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_interval_year_month(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_interval_day_time(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_any(&self, _ty: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_array(&self, _ty: &Type, _element: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_list(&self, _ty: &Type, _element: &Type, _ctx: T) -> Option<R> {
        None
    }

    fn visit_tuple(&self, _ty: &Type, _elements: &[Type], _ctx: T) -> Option<R> {
        None
    }

    fn visit_map(&self, _ty: &Type, _key: &Type, _value: &Type, _ctx: T) -> Option<R> {
        None
    }
}

impl Type {
    /// Dispatch to the visitor method matching this type's variant
    pub fn accept<R, T, V>(&self, visitor: &V, ctx: T) -> Option<R>
    where
        V: TypeVisitor<R, T> + ?Sized,
    {
        match self.kind() {
            TypeKind::Null => visitor.visit_null(self, ctx),
            TypeKind::Int => visitor.visit_int(self, ctx),
            TypeKind::Long => visitor.visit_long(self, ctx),
            TypeKind::Float => visitor.visit_float(self, ctx),
            TypeKind::Double => visitor.visit_double(self, ctx),
            TypeKind::Bool => visitor.visit_bool(self, ctx),
            TypeKind::Decimal => visitor.visit_decimal(self, ctx),
            TypeKind::String => visitor.visit_string(self, ctx),
            TypeKind::Bytes => visitor.visit_bytes(self, ctx),
            TypeKind::Date => visitor.visit_date(self, ctx),
            TypeKind::Time => visitor.visit_time(self, ctx),
            TypeKind::Timestamp => visitor.visit_timestamp(self, ctx),
            TypeKind::IntervalYearMonth => visitor.visit_interval_year_month(self, ctx),
            TypeKind::IntervalDayTime => visitor.visit_interval_day_time(self, ctx),
            TypeKind::Any => visitor.visit_any(self, ctx),
            TypeKind::Array(element) => visitor.visit_array(self, element, ctx),
            TypeKind::List(element) => visitor.visit_list(self, element, ctx),
            TypeKind::Tuple(elements) => visitor.visit_tuple(self, elements, ctx),
            TypeKind::Map(key, value) => visitor.visit_map(self, key, value, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Types;

    struct Silent;

    impl TypeVisitor<(), ()> for Silent {}

    /// Counts nesting depth, recursing through composites.
    struct Depth;

    impl TypeVisitor<usize, ()> for Depth {
        fn visit_int(&self, _ty: &Type, _ctx: ()) -> Option<usize> {
            Some(1)
        }

        fn visit_string(&self, _ty: &Type, _ctx: ()) -> Option<usize> {
            Some(1)
        }

        fn visit_array(&self, _ty: &Type, element: &Type, ctx: ()) -> Option<usize> {
            self.visit(element, ctx).map(|d| d + 1)
        }

        fn visit_list(&self, _ty: &Type, element: &Type, ctx: ()) -> Option<usize> {
            self.visit(element, ctx).map(|d| d + 1)
        }

        fn visit_tuple(&self, _ty: &Type, elements: &[Type], ctx: ()) -> Option<usize> {
            elements
                .iter()
                .map(|e| self.visit(e, ctx))
                .try_fold(0, |max, d| d.map(|d| max.max(d)))
                .map(|d| d + 1)
        }
    }

    #[test]
    fn test_silent_visitor_returns_none_for_every_variant() {
        let all = [
            Types::null(),
            Types::int(),
            Types::long(),
            Types::float(),
            Types::double(),
            Types::bool(),
            Types::decimal(),
            Types::string(),
            Types::bytes(),
            Types::date(),
            Types::time(),
            Types::timestamp(),
            Types::interval_year_month(),
            Types::interval_day_time(),
            Types::any(),
            Types::array(Types::int()),
            Types::list(Types::any()),
            Types::tuple([Types::int(), Types::string()]),
            Types::map_any(),
        ];
        for ty in &all {
            assert_eq!(ty.accept(&Silent, ()), None, "{ty}");
        }
    }

    #[test]
    fn test_visitor_recursion() {
        let ty = Types::list(Types::array(Types::tuple([Types::int(), Types::string()])));
        assert_eq!(ty.accept(&Depth, ()), Some(4));

        // Unhandled variants contribute nothing.
        let ty = Types::list(Types::date());
        assert_eq!(ty.accept(&Depth, ()), None);
    }

    #[test]
    fn test_dyn_visitor() {
        let visitor: &dyn TypeVisitor<usize, ()> = &Depth;
        assert_eq!(Types::array(Types::int()).accept(visitor, ()), Some(2));
    }
}
