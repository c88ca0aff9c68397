use crate::operation::printer;
use indexmap::IndexMap;
use serde_json::Value;

/// The value passed to a field argument or a fragment argument.
///
/// Plain JSON cannot tell an enum value from a string, nor a variable from
/// a literal, so both get their own variant. Lists and objects may nest
/// variables anywhere inside them.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum ArgumentValue {
    Enum { value: String },
    List { items: Vec<ArgumentValue> },
    Literal { value: Value },
    Object { fields: IndexMap<String, ArgumentValue> },
    Variable { variable_name: String },
}
impl ArgumentValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal { value: value.into() }
    }

    pub fn variable(variable_name: impl Into<String>) -> Self {
        Self::Variable { variable_name: variable_name.into() }
    }

    pub fn enum_value(value: impl Into<String>) -> Self {
        Self::Enum { value: value.into() }
    }

    /// Names of every variable referenced anywhere in this value, in the
    /// order they appear.
    pub fn referenced_variables(&self) -> Vec<&str> {
        let mut names = vec![];
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Variable { variable_name } => names.push(variable_name),
            Self::List { items } => {
                for item in items {
                    item.collect_variables(names);
                }
            },
            Self::Object { fields } => {
                for value in fields.values() {
                    value.collect_variables(names);
                }
            },
            Self::Enum { .. } | Self::Literal { .. } => (),
        }
    }

    pub(crate) fn write_graphql(&self, out: &mut String) {
        match self {
            Self::Enum { value } => out.push_str(value),
            Self::List { items } => {
                out.push('[');
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    item.write_graphql(out);
                }
                out.push(']');
            },
            Self::Literal { value } => printer::write_json_literal(value, out),
            Self::Object { fields } => {
                out.push('{');
                for (idx, (key, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push_str(": ");
                    value.write_graphql(out);
                }
                out.push('}');
            },
            Self::Variable { variable_name } => {
                out.push('$');
                out.push_str(variable_name);
            },
        }
    }
}
