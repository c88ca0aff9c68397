use crate::operation::ArgumentValue;
use crate::operation::OperationKind;
use crate::operation::Selection;
use crate::operation::VariableDefinition;
use indexmap::IndexMap;
use serde_json::Value;

const INDENT: &str = "  ";

/// Borrowed view of everything that goes into a definition's text.
pub(crate) struct PrintableDefinition<'a> {
    pub kind: OperationKind,
    pub name: &'a str,
    pub selections: &'a [Selection],
    pub type_condition: Option<&'a str>,
    pub variables: &'a IndexMap<String, VariableDefinition>,
}

/// Print a definition in canonical form: two-space indentation, one
/// selection per line, arguments in declared order.
///
/// Fragment arguments use the Relay directives: definitions print as
/// `@argumentDefinitions(...)` and references carry their values with
/// `@arguments(...)`. Neither survives into the composed wire document.
pub(crate) fn print_definition(def: &PrintableDefinition<'_>) -> String {
    let mut out = String::new();
    out.push_str(def.kind.keyword());
    out.push(' ');
    out.push_str(def.name);

    if def.kind == OperationKind::Fragment {
        out.push_str(" on ");
        out.push_str(def.type_condition.unwrap_or_default());
        if !def.variables.is_empty() {
            write_argument_definitions(def.variables, &mut out);
        }
    } else if !def.variables.is_empty() {
        out.push('(');
        for (idx, var) in def.variables.values().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            out.push('$');
            out.push_str(var.name());
            out.push_str(": ");
            out.push_str(&var.type_annotation().to_string());
            if let Some(default_value) = var.default_value() {
                out.push_str(" = ");
                write_json_literal(default_value, &mut out);
            }
        }
        out.push(')');
    }

    out.push_str(" {\n");
    write_selections(def.selections, 1, &mut out);
    out.push('}');
    out
}

fn write_argument_definitions(variables: &IndexMap<String, VariableDefinition>, out: &mut String) {
    out.push_str(" @argumentDefinitions(");
    for (idx, var) in variables.values().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        out.push_str(var.name());
        out.push_str(": {type: \"");
        out.push_str(&var.type_annotation().to_string());
        out.push('"');
        if let Some(default_value) = var.default_value() {
            out.push_str(", defaultValue: ");
            write_json_literal(default_value, out);
        }
        out.push('}');
    }
    out.push(')');
}

fn write_selections(selections: &[Selection], depth: usize, out: &mut String) {
    for selection in selections {
        out.push_str(&INDENT.repeat(depth));
        match selection {
            Selection::Scalar(field) => {
                write_field_head(field.alias(), field.field_name(), field.arguments(), out);
                out.push('\n');
            },

            Selection::LinkedObject(field) => {
                write_field_head(field.alias(), field.field_name(), field.arguments(), out);
                write_block(field.children(), depth, out);
            },

            Selection::TypeBranch(branch) => {
                out.push_str("... on ");
                out.push_str(branch.declared_type());
                write_block(branch.children(), depth, out);
            },

            Selection::FragmentReference(reference) => {
                out.push_str("...");
                out.push_str(reference.fragment_name());
                if !reference.provided_arguments().is_empty() {
                    out.push_str(" @arguments");
                    write_arguments(reference.provided_arguments(), out);
                }
                out.push('\n');
            },
        }
    }
}

fn write_block(children: &[Selection], depth: usize, out: &mut String) {
    out.push_str(" {\n");
    write_selections(children, depth + 1, out);
    out.push_str(&INDENT.repeat(depth));
    out.push_str("}\n");
}

fn write_field_head(
    alias: Option<&str>,
    field_name: &str,
    arguments: &IndexMap<String, ArgumentValue>,
    out: &mut String,
) {
    if let Some(alias) = alias {
        out.push_str(alias);
        out.push_str(": ");
    }
    out.push_str(field_name);
    if !arguments.is_empty() {
        write_arguments(arguments, out);
    }
}

fn write_arguments(arguments: &IndexMap<String, ArgumentValue>, out: &mut String) {
    out.push('(');
    for (idx, (name, value)) in arguments.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        out.push_str(name);
        out.push_str(": ");
        value.write_graphql(out);
    }
    out.push(')');
}

/// Write a JSON value as a GraphQL input literal. JSON string escapes are
/// valid GraphQL string escapes, so strings and numbers print as JSON;
/// object keys print bare.
pub(crate) fn write_json_literal(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                write_json_literal(item, out);
            }
            out.push(']');
        },
        Value::Object(fields) => {
            out.push('{');
            for (idx, (key, item)) in fields.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push_str(": ");
                write_json_literal(item, out);
            }
            out.push('}');
        },
        Value::Bool(_) | Value::Null | Value::Number(_) | Value::String(_) => {
            out.push_str(&value.to_string());
        },
    }
}
