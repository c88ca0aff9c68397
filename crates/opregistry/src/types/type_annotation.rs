use crate::ValuePath;
use crate::types::ListTypeAnnotation;
use crate::types::NamedTypeAnnotation;
use crate::types::ValueTypeMismatch;
use crate::types::json_kind;
use serde_json::Value;
use thiserror::Error;

/// Represents the annotated type of a
/// [`VariableDefinition`](crate::operation::VariableDefinition), e.g.
/// `ID!` or `[String!]`.
///
/// Serialized as its GraphQL source form.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeAnnotation {
    List(ListTypeAnnotation),
    Named(NamedTypeAnnotation),
}
impl TypeAnnotation {
    pub fn named(type_name: impl Into<String>, nullable: bool) -> Self {
        Self::Named(NamedTypeAnnotation::new(type_name, nullable))
    }

    pub fn list(inner: TypeAnnotation, nullable: bool) -> Self {
        Self::List(ListTypeAnnotation::new(inner, nullable))
    }

    /// Parse GraphQL type-reference syntax such as `[ID!]!`.
    pub fn parse(input: &str) -> Result<Self, TypeAnnotationParseError> {
        let mut parser = AnnotationParser {
            bytes: input.as_bytes(),
            input,
            pos: 0,
        };

        parser.skip_whitespace();
        if parser.at_end() {
            return Err(TypeAnnotationParseError::Empty);
        }

        let annotation = parser.parse_type(0)?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(TypeAnnotationParseError::TrailingInput {
                input: input.to_string(),
                position: parser.pos,
            });
        }

        Ok(annotation)
    }

    /// Unwrap the [`ListTypeAnnotation`] if this annotation is one.
    pub fn as_list_annotation(&self) -> Option<&ListTypeAnnotation> {
        if let Self::List(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Unwrap the [`NamedTypeAnnotation`] if this annotation is one.
    pub fn as_named_annotation(&self) -> Option<&NamedTypeAnnotation> {
        if let Self::Named(annot) = self {
            Some(annot)
        } else {
            None
        }
    }

    /// Recursively unwrap this [`TypeAnnotation`] and return the inner-most
    /// [`NamedTypeAnnotation`] from it.
    pub fn innermost_named_type_annotation(&self) -> &NamedTypeAnnotation {
        match self {
            Self::List(ListTypeAnnotation { inner_type_ref, .. })
                => inner_type_ref.innermost_named_type_annotation(),
            Self::Named(named_annot)
                => named_annot,
        }
    }

    /// Indicates if this [`TypeAnnotation`] is [nullable or
    /// non-nullable](https://spec.graphql.org/October2021/#sec-Non-Null).
    pub fn nullable(&self) -> bool {
        match self {
            Self::List(ListTypeAnnotation { nullable, .. }) => *nullable,
            Self::Named(NamedTypeAnnotation { nullable, .. }) => *nullable,
        }
    }

    /// Check that `value` has the shape this annotation declares.
    ///
    /// Only shape is checked: lists must be JSON arrays (a single value is
    /// never coerced into a list), built-in scalars must carry a matching
    /// JSON kind, and any other named type accepts every non-list value
    /// since enums, input objects and custom scalars are opaque here.
    pub fn check_value(
        &self,
        value: &Value,
        path: &mut ValuePath,
    ) -> Result<(), ValueTypeMismatch> {
        if value.is_null() {
            return if self.nullable() {
                Ok(())
            } else {
                Err(self.mismatch(value, path))
            };
        }

        match self {
            Self::List(list_annot) => {
                let Value::Array(items) = value else {
                    return Err(self.mismatch(value, path));
                };
                for (idx, item) in items.iter().enumerate() {
                    path.push_index(idx);
                    list_annot.inner_type_annotation().check_value(item, path)?;
                    path.pop();
                }
                Ok(())
            },

            Self::Named(named_annot) => match named_annot.builtin_scalar() {
                Some(scalar) if scalar.accepts(value) => Ok(()),
                Some(_) => Err(self.mismatch(value, path)),
                None if value.is_array() => Err(self.mismatch(value, path)),
                None => Ok(()),
            },
        }
    }

    fn mismatch(&self, value: &Value, path: &ValuePath) -> ValueTypeMismatch {
        ValueTypeMismatch {
            path: path.clone(),
            expected: self.to_string(),
            found: json_kind(value),
        }
    }
}
impl std::convert::From<ListTypeAnnotation> for TypeAnnotation {
    fn from(value: ListTypeAnnotation) -> Self {
        Self::List(value)
    }
}
impl std::convert::From<NamedTypeAnnotation> for TypeAnnotation {
    fn from(value: NamedTypeAnnotation) -> Self {
        Self::Named(value)
    }
}
impl std::convert::TryFrom<String> for TypeAnnotation {
    type Error = TypeAnnotationParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
impl std::convert::From<TypeAnnotation> for String {
    fn from(value: TypeAnnotation) -> Self {
        value.to_string()
    }
}
impl std::str::FromStr for TypeAnnotation {
    type Err = TypeAnnotationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(list_annot) => write!(
                f,
                "[{}]{}",
                list_annot.inner_type_annotation(),
                if list_annot.nullable() { "" } else { "!" },
            ),

            Self::Named(named_annot) => write!(
                f,
                "{}{}",
                named_annot.graphql_type_name(),
                if named_annot.nullable() { "" } else { "!" },
            ),
        }
    }
}

/// Deepest list nesting accepted by [`TypeAnnotation::parse`].
pub(crate) const MAX_LIST_DEPTH: usize = 64;

struct AnnotationParser<'a> {
    bytes: &'a [u8],
    input: &'a str,
    pos: usize,
}
impl<'a> AnnotationParser<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.bytes.get(self.pos)
            && (b.is_ascii_whitespace() || *b == b',') {
            self.pos += 1;
        }
    }

    fn parse_type(&mut self, depth: usize) -> Result<TypeAnnotation, TypeAnnotationParseError> {
        self.skip_whitespace();
        let unwrapped = if self.eat(b'[') {
            let list_start = self.pos - 1;
            if depth >= MAX_LIST_DEPTH {
                return Err(TypeAnnotationParseError::TooDeeplyNested {
                    input_len: self.input.len(),
                    max_depth: MAX_LIST_DEPTH,
                    position: list_start,
                });
            }
            let inner = self.parse_type(depth + 1)?;
            self.skip_whitespace();
            if !self.eat(b']') {
                return Err(TypeAnnotationParseError::UnclosedList {
                    input: self.input.to_string(),
                    position: list_start,
                });
            }
            TypeAnnotation::list(inner, true)
        } else {
            TypeAnnotation::named(self.parse_name()?, true)
        };

        self.skip_whitespace();
        Ok(if self.eat(b'!') {
            match unwrapped {
                TypeAnnotation::List(mut annot) => {
                    annot.nullable = false;
                    TypeAnnotation::List(annot)
                },
                TypeAnnotation::Named(mut annot) => {
                    annot.nullable = false;
                    TypeAnnotation::Named(annot)
                },
            }
        } else {
            unwrapped
        })
    }

    fn parse_name(&mut self) -> Result<&'a str, TypeAnnotationParseError> {
        let start = self.pos;
        match self.bytes.get(self.pos) {
            Some(b) if b.is_ascii_alphabetic() || *b == b'_' => self.pos += 1,
            _ => return Err(TypeAnnotationParseError::InvalidName {
                input: self.input.to_string(),
                position: start,
            }),
        }
        while let Some(b) = self.bytes.get(self.pos)
            && (b.is_ascii_alphanumeric() || *b == b'_') {
            self.pos += 1;
        }
        Ok(&self.input[start..self.pos])
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TypeAnnotationParseError {
    #[error("Type annotation is empty")]
    Empty,

    #[error("Expected a type name at position {position} of `{input}`")]
    InvalidName {
        input: String,
        position: usize,
    },

    #[error(
        "List type at position {position} of a {input_len}-byte annotation nests \
        deeper than {max_depth} levels"
    )]
    TooDeeplyNested {
        input_len: usize,
        max_depth: usize,
        position: usize,
    },

    #[error("Unexpected input at position {position} of `{input}`")]
    TrailingInput {
        input: String,
        position: usize,
    },

    #[error("List type opened at position {position} of `{input}` is never closed")]
    UnclosedList {
        input: String,
        position: usize,
    },
}
