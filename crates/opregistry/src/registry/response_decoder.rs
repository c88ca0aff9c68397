use crate::ValuePath;
use crate::operation::LinkedField;
use crate::operation::OperationDescriptor;
use crate::operation::ScalarField;
use crate::operation::Selection;
use crate::registry::DecodeError;
use crate::registry::OperationRegistry;
use crate::registry::ShapeMismatchReason;
use crate::types::json_kind;
use serde_json::Map;
use serde_json::Value;

type Result<T> = std::result::Result<T, DecodeError>;

/// Walks a selection tree alongside a raw response in a single pass.
pub(super) struct ResponseDecoder<'r> {
    discriminator_field: &'r str,
    operation_name: &'r str,
    registry: &'r OperationRegistry,
}
impl<'r> ResponseDecoder<'r> {
    pub(super) fn new(registry: &'r OperationRegistry, operation_name: &'r str) -> Self {
        Self {
            discriminator_field: registry.config().discriminator_field.as_str(),
            operation_name,
            registry,
        }
    }

    pub(super) fn decode_root(
        &self,
        descriptor: &OperationDescriptor,
        raw_response: &Value,
    ) -> Result<Map<String, Value>> {
        let mut path = ValuePath::new();
        let Value::Object(raw) = raw_response else {
            return Err(self.mismatch(&path, ShapeMismatchReason::ExpectedObject {
                found: json_kind(raw_response),
            }));
        };
        self.decode_object(descriptor.selections(), raw, descriptor.root_type_name(), &mut path)
    }

    fn decode_object(
        &self,
        selections: &[Selection],
        raw: &Map<String, Value>,
        type_hint: Option<&str>,
        path: &mut ValuePath,
    ) -> Result<Map<String, Value>> {
        let typename = raw
            .get(self.discriminator_field)
            .and_then(Value::as_str)
            .or(type_hint);

        let mut out = Map::new();
        self.decode_into(selections, raw, typename, &mut out, path)?;
        Ok(out)
    }

    fn decode_into(
        &self,
        selections: &[Selection],
        raw: &Map<String, Value>,
        typename: Option<&str>,
        out: &mut Map<String, Value>,
        path: &mut ValuePath,
    ) -> Result<()> {
        let mut applied_branches: Vec<&str> = vec![];

        for selection in selections {
            match selection {
                Selection::Scalar(field) => {
                    path.push_key(field.response_key());
                    let value = self.decode_scalar(field, raw, path)?;
                    path.pop();
                    merge_field(out, field.response_key(), value);
                },

                Selection::LinkedObject(field) => {
                    path.push_key(field.response_key());
                    let value = self.decode_linked(field, raw, path)?;
                    path.pop();
                    merge_field(out, field.response_key(), value);
                },

                Selection::TypeBranch(branch) => {
                    let Some(typename) = typename else {
                        return Err(self.mismatch(
                            &path.with_key(self.discriminator_field),
                            ShapeMismatchReason::MissingDiscriminator {
                                field: self.discriminator_field.to_string(),
                            },
                        ));
                    };

                    // First branch declaring a given type wins.
                    let declared_type = branch.declared_type();
                    if declared_type != typename || applied_branches.contains(&declared_type) {
                        continue;
                    }
                    applied_branches.push(declared_type);
                    self.decode_into(branch.children(), raw, Some(typename), out, path)?;
                },

                Selection::FragmentReference(reference) => {
                    let fragment = self.registry.resolve(reference.fragment_name())?;
                    self.decode_into(fragment.selections(), raw, typename, out, path)?;
                },
            }
        }

        Ok(())
    }

    fn decode_scalar(
        &self,
        field: &ScalarField,
        raw: &Map<String, Value>,
        path: &ValuePath,
    ) -> Result<Value> {
        match raw.get(field.response_key()) {
            None if !field.nullable() => Err(self.mismatch(path, ShapeMismatchReason::MissingField)),
            Some(Value::Null) if !field.nullable() => Err(self.mismatch(path, ShapeMismatchReason::NullField)),
            None => Ok(Value::Null),
            Some(value) => Ok(value.clone()),
        }
    }

    fn decode_linked(
        &self,
        field: &LinkedField,
        raw: &Map<String, Value>,
        path: &mut ValuePath,
    ) -> Result<Value> {
        let value = match raw.get(field.response_key()) {
            None if !field.nullable() => return Err(self.mismatch(path, ShapeMismatchReason::MissingField)),
            Some(Value::Null) if !field.nullable() => return Err(self.mismatch(path, ShapeMismatchReason::NullField)),
            None | Some(Value::Null) => return Ok(Value::Null),
            Some(value) => value,
        };

        if !field.is_plural() {
            return self.decode_linked_item(field, value, path);
        }

        let Value::Array(items) = value else {
            return Err(self.mismatch(path, ShapeMismatchReason::ExpectedList {
                found: json_kind(value),
            }));
        };

        let mut decoded = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            path.push_index(idx);
            decoded.push(match item {
                Value::Null => Value::Null,
                item => self.decode_linked_item(field, item, path)?,
            });
            path.pop();
        }
        Ok(Value::Array(decoded))
    }

    fn decode_linked_item(
        &self,
        field: &LinkedField,
        value: &Value,
        path: &mut ValuePath,
    ) -> Result<Value> {
        let Value::Object(raw) = value else {
            return Err(self.mismatch(path, ShapeMismatchReason::ExpectedObject {
                found: json_kind(value),
            }));
        };
        self.decode_object(field.children(), raw, field.concrete_type(), path)
            .map(Value::Object)
    }

    fn mismatch(&self, path: &ValuePath, reason: ShapeMismatchReason) -> DecodeError {
        DecodeError::ShapeMismatch {
            operation_name: self.operation_name.to_string(),
            path: path.clone(),
            reason,
        }
    }
}

/// Insert `value` under `key`, deep-merging objects (and lists of objects)
/// that an earlier branch or fragment already produced for the same key.
fn merge_field(out: &mut Map<String, Value>, key: &str, value: Value) {
    match out.get_mut(key) {
        Some(existing) => merge_values(existing, value),
        None => {
            out.insert(key.to_string(), value);
        },
    }
}

fn merge_values(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                merge_field(existing, &key, value);
            }
        },
        (Value::Array(existing), Value::Array(incoming)) if existing.len() == incoming.len() => {
            for (slot, value) in existing.iter_mut().zip(incoming) {
                merge_values(slot, value);
            }
        },
        (slot, incoming) => *slot = incoming,
    }
}
