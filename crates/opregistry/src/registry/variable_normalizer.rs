use crate::PathSegment;
use crate::UnknownVariablePolicy;
use crate::ValuePath;
use crate::operation::OperationDescriptor;
use crate::registry::SerializeError;
use crate::types::ValueTypeMismatch;
use crate::types::json_kind;
use serde_json::Map;
use serde_json::Value;

/// Check caller-supplied variables against `descriptor`'s declarations and
/// produce the set to transmit.
///
/// Variables are visited in declaration order and the first problem found
/// is returned.
pub(super) fn normalize_variables(
    descriptor: &OperationDescriptor,
    variables: &Value,
    unknown_variables: UnknownVariablePolicy,
) -> Result<Map<String, Value>, SerializeError> {
    let empty = Map::new();
    let supplied = match variables {
        Value::Null => &empty,
        Value::Object(supplied) => supplied,
        other => return Err(SerializeError::TypeMismatch {
            mismatch: ValueTypeMismatch {
                path: ValuePath::from_segments([PathSegment::Key("$".to_string())]),
                expected: "an object of variables".to_string(),
                found: json_kind(other),
            },
            operation_name: descriptor.name().to_string(),
        }),
    };

    let mut normalized = Map::new();
    for (name, definition) in descriptor.variable_definitions() {
        match supplied.get(name) {
            Some(value) => {
                let mut path = ValuePath::new();
                path.push_key("$");
                path.push_key(name.as_str());
                definition
                    .type_annotation()
                    .check_value(value, &mut path)
                    .map_err(|mismatch| SerializeError::TypeMismatch {
                        mismatch,
                        operation_name: descriptor.name().to_string(),
                    })?;
                normalized.insert(name.clone(), value.clone());
            },

            None => match definition.default_value() {
                Some(default_value) => {
                    normalized.insert(name.clone(), default_value.clone());
                },
                None if definition.type_annotation().nullable() => (),
                None => return Err(SerializeError::MissingVariable {
                    operation_name: descriptor.name().to_string(),
                    variable_name: name.clone(),
                }),
            },
        }
    }

    for name in supplied.keys() {
        if descriptor.variable_definitions().contains_key(name) {
            continue;
        }
        match unknown_variables {
            UnknownVariablePolicy::Drop => log::debug!(
                "Dropping variable `${name}`, which operation `{}` does not declare.",
                descriptor.name(),
            ),
            UnknownVariablePolicy::Reject => return Err(SerializeError::UnknownVariable {
                operation_name: descriptor.name().to_string(),
                variable_name: name.clone(),
            }),
        }
    }

    Ok(normalized)
}
