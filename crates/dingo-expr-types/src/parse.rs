//! Type names
//!
//! Parses canonical type names back into types (`INT`, `ARRAY<LIST<STRING>>`,
//! `MAP<ANY, ANY>`, `TUPLE<INT, STRING>`) and implements serde for [`Type`]
//! on top of them. The grammar is parsed with winnow into a syntax tree, then
//! resolved through the registry constructors, so canonical instances are
//! reused.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use winnow::ModalResult;
use winnow::ascii::multispace0;
use winnow::combinator::{cut_err, fail, opt, preceded, separated};
use winnow::error::{ContextError, ParseError, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::stream::Offset;
use winnow::token::take_while;

use crate::{Type, Types};

/// Deepest nesting of type arguments accepted in a type name
pub const MAX_NESTING_DEPTH: usize = 128;

const DEPTH_LABEL: &str = "nesting depth";

type Input<'a> = &'a str;
type PResult<T> = ModalResult<T>;

/// Type name parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    /// Name is not a known type
    #[error("Unknown type name '{name}' at position {position}")]
    UnknownType { name: String, position: usize },

    /// A specific character was expected
    #[error("Expected '{expected}' at position {position}")]
    Expected { expected: char, position: usize },

    /// Type given the wrong number of type arguments
    #[error("{name} takes {expected} type argument(s), found {found}")]
    ArgumentCount {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    /// Type arguments nested deeper than [`MAX_NESTING_DEPTH`]
    #[error("Type name nested too deeply at position {position}")]
    TooDeep { position: usize },

    /// Input ended early
    #[error("Unexpected end of type name")]
    UnexpectedEnd,

    /// Input left over after a complete type
    #[error("Unexpected trailing input '{rest}'")]
    TrailingInput { rest: String },
}

impl TypeParseError {
    fn from_syntax(source: &str, err: &ParseError<Input<'_>, ContextError>) -> Self {
        let position = err.offset();
        let rest = source.get(position..).unwrap_or_default();
        match err.inner().context().next() {
            Some(StrContext::Label(DEPTH_LABEL)) => Self::TooDeep { position },
            _ if rest.is_empty() => Self::UnexpectedEnd,
            Some(StrContext::Expected(StrContextValue::CharLiteral(expected))) => Self::Expected {
                expected: *expected,
                position,
            },
            Some(_) => Self::UnknownType {
                name: rest.to_string(),
                position,
            },
            // Only the end-of-input check fails without context.
            None => Self::TrailingInput {
                rest: rest.to_string(),
            },
        }
    }
}

/// A type name as written, before resolution against the registry
struct TypeName<'a> {
    name: &'a str,
    arguments: Option<Vec<TypeName<'a>>>,
}

fn ws(input: &mut Input<'_>) -> PResult<()> {
    multispace0.void().parse_next(input)
}

fn ident<'a>(input: &mut Input<'a>) -> PResult<&'a str> {
    cut_err(take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_'))
        .context(StrContext::Expected(StrContextValue::Description("type name")))
        .parse_next(input)
}

fn type_name<'a>(input: &mut Input<'a>, depth: usize) -> PResult<TypeName<'a>> {
    if depth > MAX_NESTING_DEPTH {
        return cut_err(fail::<_, TypeName<'a>, _>)
            .context(StrContext::Label(DEPTH_LABEL))
            .parse_next(input);
    }
    ws.parse_next(input)?;
    let name = ident(input)?;
    let arguments = if opt(preceded(ws, '<')).parse_next(input)?.is_some() {
        Some(type_arguments(input, depth)?)
    } else {
        None
    };
    Ok(TypeName { name, arguments })
}

/// Parse the arguments after `<` up to and including `>`
fn type_arguments<'a>(input: &mut Input<'a>, depth: usize) -> PResult<Vec<TypeName<'a>>> {
    if opt(preceded(ws, '>')).parse_next(input)?.is_some() {
        return Ok(Vec::new());
    }
    let arguments: Vec<TypeName<'a>> = separated(
        1..,
        |input: &mut Input<'a>| type_name(input, depth + 1),
        (ws, ','),
    )
    .parse_next(input)?;
    ws.parse_next(input)?;
    cut_err('>')
        .context(StrContext::Expected(StrContextValue::CharLiteral('>')))
        .parse_next(input)?;
    Ok(arguments)
}

fn root<'a>(input: &mut Input<'a>) -> PResult<TypeName<'a>> {
    let name = type_name(input, 0)?;
    ws.parse_next(input)?;
    Ok(name)
}

impl TypeName<'_> {
    fn position(&self, source: &str) -> usize {
        self.name.offset_from(&source)
    }

    fn resolve(&self, source: &str) -> Result<Type, TypeParseError> {
        let scalar = match self.name.to_ascii_uppercase().as_str() {
            "NULL" => Types::null(),
            "INT" => Types::int(),
            "LONG" => Types::long(),
            "FLOAT" => Types::float(),
            "DOUBLE" => Types::double(),
            "BOOL" => Types::bool(),
            "DECIMAL" => Types::decimal(),
            "STRING" => Types::string(),
            "BYTES" => Types::bytes(),
            "DATE" => Types::date(),
            "TIME" => Types::time(),
            "TIMESTAMP" => Types::timestamp(),
            "INTERVAL_YEAR_MONTH" => Types::interval_year_month(),
            "INTERVAL_DAY_TIME" => Types::interval_day_time(),
            "ANY" => Types::any(),
            "ARRAY" => {
                let [element] = self.exact::<1>("ARRAY", source)?;
                return Ok(Types::array(element));
            }
            "LIST" => {
                let [element] = self.exact::<1>("LIST", source)?;
                return Ok(Types::list(element));
            }
            "MAP" => {
                let [key, value] = self.exact::<2>("MAP", source)?;
                return Ok(Types::map(key, value));
            }
            "TUPLE" => return Ok(Types::tuple(self.resolve_arguments(source)?)),
            _ => {
                return Err(TypeParseError::UnknownType {
                    name: self.name.to_string(),
                    position: self.position(source),
                });
            }
        };
        match &self.arguments {
            None => Ok(scalar),
            Some(arguments) => Err(TypeParseError::ArgumentCount {
                name: scalar.name(),
                expected: 0,
                found: arguments.len(),
            }),
        }
    }

    fn resolve_arguments(&self, source: &str) -> Result<Vec<Type>, TypeParseError> {
        let Some(arguments) = &self.arguments else {
            return Err(TypeParseError::Expected {
                expected: '<',
                position: self.position(source) + self.name.len(),
            });
        };
        arguments.iter().map(|argument| argument.resolve(source)).collect()
    }

    fn exact<const N: usize>(
        &self,
        name: &'static str,
        source: &str,
    ) -> Result<[Type; N], TypeParseError> {
        let arguments = self.resolve_arguments(source)?;
        let found = arguments.len();
        arguments.try_into().map_err(|_| TypeParseError::ArgumentCount {
            name,
            expected: N,
            found,
        })
    }
}

impl FromStr for Type {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = root
            .parse(s)
            .map_err(|err| TypeParseError::from_syntax(s, &err))?;
        name.resolve(s)
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TypeNameVisitor;

        impl Visitor<'_> for TypeNameVisitor {
            type Value = Type;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a type name such as INT or ARRAY<STRING>")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Type, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TypeNameVisitor)
    }
}
