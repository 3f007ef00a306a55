//! Property tests for type equality, hashing and naming

use dingo_expr_types::*;
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Type> {
    prop::sample::select(vec![
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
    ])
}

fn any_type() -> impl Strategy<Value = Type> {
    scalar().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Types::array),
            inner.clone().prop_map(Types::list),
            (inner.clone(), inner.clone()).prop_map(|(k, v)| Types::map(k, v)),
            prop::collection::vec(inner, 0..4).prop_map(Types::tuple),
        ]
    })
}

/// Rebuilds a type bottom-up through the registry constructors.
struct Rebuild;

impl Rebuild {
    fn scalar(ty: &Type) -> Option<Type> {
        ty.to_string().parse().ok()
    }
}

impl TypeVisitor<Type, ()> for Rebuild {
    fn visit_null(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_int(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_long(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_float(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_double(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_bool(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_decimal(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_string(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_bytes(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_date(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_time(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_timestamp(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_interval_year_month(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_interval_day_time(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }
    fn visit_any(&self, ty: &Type, _ctx: ()) -> Option<Type> {
        Self::scalar(ty)
    }

    fn visit_array(&self, _ty: &Type, element: &Type, ctx: ()) -> Option<Type> {
        self.visit(element, ctx).map(Types::array)
    }

    fn visit_list(&self, _ty: &Type, element: &Type, ctx: ()) -> Option<Type> {
        self.visit(element, ctx).map(Types::list)
    }

    fn visit_tuple(&self, _ty: &Type, elements: &[Type], ctx: ()) -> Option<Type> {
        elements
            .iter()
            .map(|e| self.visit(e, ctx))
            .collect::<Option<Vec<_>>>()
            .map(Types::tuple)
    }

    fn visit_map(&self, _ty: &Type, key: &Type, value: &Type, ctx: ()) -> Option<Type> {
        Some(Types::map(self.visit(key, ctx)?, self.visit(value, ctx)?))
    }
}

proptest! {
    #[test]
    fn rebuilt_types_are_equal_and_hash_alike(ty in any_type()) {
        let rebuilt = ty.accept(&Rebuild, ()).expect("every variant is rebuilt");
        prop_assert_eq!(&rebuilt, &ty);
        prop_assert_eq!(rebuilt.hash_code(), ty.hash_code());
    }

    #[test]
    fn names_round_trip(ty in any_type()) {
        let parsed: Type = ty.to_string().parse().expect("display output parses");
        prop_assert_eq!(parsed.to_string(), ty.to_string());
        prop_assert_eq!(parsed, ty);
    }

    #[test]
    fn equal_types_have_equal_hash_codes(a in any_type(), b in any_type()) {
        if a == b {
            prop_assert_eq!(a.hash_code(), b.hash_code());
        }
        prop_assert_eq!(a == b, a.to_string() == b.to_string());
    }

    #[test]
    fn best_type_is_one_of_the_operands_or_int(types in prop::collection::vec(scalar(), 1..5)) {
        if let Some(best) = Types::best_type(&types) {
            prop_assert!(best == Types::int() || best.is_null() || types.contains(&best));
        }
    }
}
