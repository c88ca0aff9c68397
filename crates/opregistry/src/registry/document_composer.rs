use crate::ContentHash;
use crate::operation::ArgumentValue;
use crate::operation::FragmentReference;
use crate::operation::LinkedField;
use crate::operation::OperationDescriptor;
use crate::operation::OperationKind;
use crate::operation::ScalarField;
use crate::operation::Selection;
use crate::operation::TypeBranch;
use crate::operation::printer;
use crate::operation::printer::PrintableDefinition;
use crate::registry::RegistryBuildError;
use crate::registry::operation_registry::PreparedDocument;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Values bound to a fragment's declared arguments at one spread site.
type Bindings = IndexMap<String, ArgumentValue>;

/// Builds the document sent on the wire for one executable operation: its
/// own text followed by the text of every fragment it reaches, ordered by
/// fragment name.
///
/// Servers do not understand fragment arguments. A spread of a fragment
/// that declares arguments is rewritten to a copy of that fragment with the
/// bound values (provided, else the declared default) inlined. The copy is
/// named `<Fragment>_<hash>`, where the hash covers the bound values, so
/// spreads that bind the same values share one copy. Arguments left
/// unbound, and variables a fragment uses without declaring them, resolve
/// to the operation's own variables.
pub(super) struct DocumentComposer<'a> {
    descriptors: &'a IndexMap<String, OperationDescriptor>,
    errors: Vec<RegistryBuildError>,
    fragments: BTreeMap<String, String>,
    operation: &'a OperationDescriptor,
}

impl<'a> DocumentComposer<'a> {
    pub(super) fn compose(
        descriptors: &'a IndexMap<String, OperationDescriptor>,
        operation: &'a OperationDescriptor,
    ) -> Result<PreparedDocument, Vec<RegistryBuildError>> {
        let mut composer = Self {
            descriptors,
            errors: vec![],
            fragments: BTreeMap::new(),
            operation,
        };

        let selections = composer.specialize_selections(operation.selections(), &Bindings::new(), None);
        if !composer.errors.is_empty() {
            return Err(composer.errors);
        }

        let mut text = if selections.as_slice() == operation.selections() {
            operation.query_text().to_string()
        } else {
            printer::print_definition(&PrintableDefinition {
                kind: operation.kind(),
                name: operation.name(),
                selections: &selections,
                type_condition: None,
                variables: operation.variable_definitions(),
            })
        };
        for fragment_text in composer.fragments.into_values() {
            text.push_str("\n\n");
            text.push_str(&fragment_text);
        }

        Ok(PreparedDocument {
            content_hash: ContentHash::of(&text),
            text,
        })
    }

    /// `scope` names the fragment whose selections are being rewritten, or
    /// `None` at the operation's root.
    fn specialize_selections(
        &mut self,
        selections: &[Selection],
        bindings: &Bindings,
        scope: Option<&str>,
    ) -> Vec<Selection> {
        selections
            .iter()
            .map(|selection| match selection {
                Selection::Scalar(field) => Selection::Scalar(ScalarField {
                    alias: field.alias.clone(),
                    arguments: self.substitute_arguments(field.arguments(), bindings, scope),
                    field_name: field.field_name.clone(),
                    nullable: field.nullable,
                }),

                Selection::LinkedObject(field) => Selection::LinkedObject(LinkedField {
                    alias: field.alias.clone(),
                    arguments: self.substitute_arguments(field.arguments(), bindings, scope),
                    children: self.specialize_selections(field.children(), bindings, scope),
                    concrete_type: field.concrete_type.clone(),
                    field_name: field.field_name.clone(),
                    nullable: field.nullable,
                    plural: field.plural,
                }),

                Selection::TypeBranch(branch) => Selection::TypeBranch(TypeBranch {
                    children: self.specialize_selections(branch.children(), bindings, scope),
                    declared_type: branch.declared_type.clone(),
                }),

                Selection::FragmentReference(reference) => {
                    Selection::FragmentReference(self.specialize_spread(reference, bindings, scope))
                },
            })
            .collect()
    }

    fn specialize_spread(
        &mut self,
        reference: &FragmentReference,
        bindings: &Bindings,
        scope: Option<&str>,
    ) -> FragmentReference {
        let descriptors = self.descriptors;
        // Undefined references fail validation before composition.
        let Some(fragment) = descriptors.get(reference.fragment_name()) else {
            return reference.clone();
        };

        let mut fragment_bindings = Bindings::new();
        for (argument_name, definition) in fragment.variable_definitions() {
            if let Some(provided) = reference.provided_arguments().get(argument_name) {
                let value = self.substitute(provided, bindings, scope);
                fragment_bindings.insert(argument_name.clone(), value);
            } else if let Some(default_value) = definition.default_value() {
                fragment_bindings.insert(
                    argument_name.clone(),
                    ArgumentValue::Literal { value: default_value.clone() },
                );
            }
        }

        let instance_name = specialized_name(fragment.name(), &fragment_bindings);
        if !self.fragments.contains_key(&instance_name) {
            let selections = self.specialize_selections(
                fragment.selections(),
                &fragment_bindings,
                Some(fragment.name()),
            );
            let text = if fragment.variable_definitions().is_empty()
                && selections.as_slice() == fragment.selections() {
                fragment.query_text().to_string()
            } else {
                printer::print_definition(&PrintableDefinition {
                    kind: OperationKind::Fragment,
                    name: &instance_name,
                    selections: &selections,
                    type_condition: fragment.type_condition(),
                    variables: &IndexMap::new(),
                })
            };
            self.fragments.insert(instance_name.clone(), text);
        }

        FragmentReference::new(instance_name)
    }

    fn substitute_arguments(
        &mut self,
        arguments: &IndexMap<String, ArgumentValue>,
        bindings: &Bindings,
        scope: Option<&str>,
    ) -> IndexMap<String, ArgumentValue> {
        arguments
            .iter()
            .map(|(name, value)| (name.clone(), self.substitute(value, bindings, scope)))
            .collect()
    }

    fn substitute(
        &mut self,
        value: &ArgumentValue,
        bindings: &Bindings,
        scope: Option<&str>,
    ) -> ArgumentValue {
        match value {
            ArgumentValue::Variable { variable_name } => {
                if let Some(bound) = bindings.get(variable_name) {
                    return bound.clone();
                }
                // Operation-level references were checked when the
                // operation's descriptor was built.
                if let Some(fragment_name) = scope
                    && !self.operation.variable_definitions().contains_key(variable_name) {
                    let error = RegistryBuildError::UndefinedVariable {
                        fragment_name: fragment_name.to_string(),
                        operation_name: self.operation.name().to_string(),
                        variable_name: variable_name.clone(),
                    };
                    if !self.errors.contains(&error) {
                        self.errors.push(error);
                    }
                }
                value.clone()
            },

            ArgumentValue::List { items } => ArgumentValue::List {
                items: items
                    .iter()
                    .map(|item| self.substitute(item, bindings, scope))
                    .collect(),
            },

            ArgumentValue::Object { fields } => ArgumentValue::Object {
                fields: self.substitute_arguments(fields, bindings, scope),
            },

            ArgumentValue::Enum { .. } | ArgumentValue::Literal { .. } => value.clone(),
        }
    }
}

fn specialized_name(fragment_name: &str, bindings: &Bindings) -> String {
    if bindings.is_empty() {
        return fragment_name.to_string();
    }

    let mut key = String::new();
    for (idx, (name, value)) in bindings.iter().enumerate() {
        if idx > 0 {
            key.push_str(", ");
        }
        key.push_str(name);
        key.push_str(": ");
        value.write_graphql(&mut key);
    }
    let hex = ContentHash::of(&key).to_hex();
    format!("{fragment_name}_{}", &hex[..8])
}
