use crate::ContentHash;
use crate::ValuePath;
use crate::operation::OperationDescriptor;
use crate::operation::OperationKind;
use crate::operation::Selection;
use crate::operation::VariableDefinition;
use crate::operation::printer;
use crate::types::ValueTypeMismatch;
use indexmap::IndexMap;
use std::collections::HashSet;
use thiserror::Error;

type Result<T> = std::result::Result<T, Vec<OperationDescriptorBuildError>>;

/// Builder for an immutable [`OperationDescriptor`].
///
/// Variables are checked as they are added; the selection tree is checked
/// as a whole by [`build`](Self::build), which reports every problem it
/// finds rather than stopping at the first one.
///
/// ```
/// use opregistry::operation::ArgumentValue;
/// use opregistry::operation::LinkedField;
/// use opregistry::operation::OperationDescriptor;
/// use opregistry::operation::OperationKind;
/// use opregistry::operation::ScalarField;
/// use opregistry::operation::VariableDefinition;
/// use opregistry::types::TypeAnnotation;
///
/// let descriptor = OperationDescriptor::builder("ProjectNameQuery", OperationKind::Query)
///     .add_variable(VariableDefinition::new("id", TypeAnnotation::named("ID", false)))
///     .unwrap()
///     .add_selection(
///         LinkedField::new("node")
///             .with_argument("id", ArgumentValue::variable("id"))
///             .with_child(ScalarField::new("__typename").non_null())
///             .with_child(ScalarField::new("id").non_null()),
///     )
///     .build()
///     .unwrap();
///
/// assert!(descriptor.query_text().starts_with("query ProjectNameQuery($id: ID!) {"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDescriptorBuilder {
    kind: OperationKind,
    name: String,
    query_text: Option<String>,
    selections: Vec<Selection>,
    type_condition: Option<String>,
    variable_definitions: IndexMap<String, VariableDefinition>,
}
impl OperationDescriptorBuilder {
    pub fn new(name: impl Into<String>, kind: OperationKind) -> Self {
        Self {
            kind,
            name: name.into(),
            query_text: None,
            selections: vec![],
            type_condition: None,
            variable_definitions: IndexMap::new(),
        }
    }

    /// Add a [`Selection`] after any previously added `Selection`s.
    pub fn add_selection(mut self, selection: impl Into<Selection>) -> Self {
        self.selections.push(selection.into());
        self
    }

    /// Add a [`VariableDefinition`] after any previously added ones.
    ///
    /// Fails if the name is already declared or if the default value does
    /// not fit the declared type.
    pub fn add_variable(mut self, variable: VariableDefinition) -> Result<Self> {
        if self.variable_definitions.contains_key(variable.name()) {
            return Err(vec![
                OperationDescriptorBuildError::DuplicateVariableName {
                    operation_name: self.name.clone(),
                    variable_name: variable.name().to_string(),
                }
            ]);
        }

        if let Some(default_value) = variable.default_value() {
            let mut path = ValuePath::new();
            path.push_key("$");
            path.push_key(variable.name());
            if let Err(mismatch) = variable.type_annotation().check_value(default_value, &mut path) {
                return Err(vec![
                    OperationDescriptorBuildError::InvalidDefaultValue {
                        operation_name: self.name.clone(),
                        variable_name: variable.name().to_string(),
                        mismatch,
                    }
                ]);
            }
        }

        self.variable_definitions.insert(variable.name().to_string(), variable);
        Ok(self)
    }

    /// Use `text` verbatim as the descriptor's query text instead of
    /// printing it from the selection tree. Intended for text produced by
    /// an external compiler.
    pub fn query_text(mut self, text: impl Into<String>) -> Self {
        self.query_text = Some(text.into());
        self
    }

    /// Set the type a fragment applies to.
    pub fn type_condition(mut self, type_name: impl Into<String>) -> Self {
        self.type_condition = Some(type_name.into());
        self
    }

    /// Consume this [`OperationDescriptorBuilder`] to produce an
    /// [`OperationDescriptor`].
    pub fn build(self) -> Result<OperationDescriptor> {
        let mut errors = vec![];

        if self.name.trim().is_empty() {
            errors.push(OperationDescriptorBuildError::EmptyOperationName);
        }

        match (self.kind, &self.type_condition) {
            (OperationKind::Fragment, None) => errors.push(
                OperationDescriptorBuildError::MissingTypeCondition {
                    fragment_name: self.name.clone(),
                },
            ),
            (kind, Some(type_condition)) if kind.is_executable() => errors.push(
                OperationDescriptorBuildError::UnexpectedTypeCondition {
                    operation_name: self.name.clone(),
                    type_condition: type_condition.clone(),
                },
            ),
            _ => (),
        }

        let mut checker = SelectionChecker {
            check_variables: self.kind.is_executable(),
            errors: &mut errors,
            operation_name: &self.name,
            path: ValuePath::new(),
            variables: &self.variable_definitions,
        };
        checker.check_selection_list(&self.selections);

        if !errors.is_empty() {
            return Err(errors);
        }

        let query_text = self.query_text.unwrap_or_else(|| {
            printer::print_definition(&printer::PrintableDefinition {
                kind: self.kind,
                name: &self.name,
                selections: &self.selections,
                type_condition: self.type_condition.as_deref(),
                variables: &self.variable_definitions,
            })
        });
        let content_hash = ContentHash::of(&query_text);

        Ok(OperationDescriptor {
            content_hash,
            kind: self.kind,
            name: self.name,
            query_text,
            selections: self.selections,
            type_condition: self.type_condition,
            variable_definitions: self.variable_definitions,
        })
    }
}

struct SelectionChecker<'a> {
    check_variables: bool,
    errors: &'a mut Vec<OperationDescriptorBuildError>,
    operation_name: &'a str,
    path: ValuePath,
    variables: &'a IndexMap<String, VariableDefinition>,
}
impl SelectionChecker<'_> {
    fn check_selection_list(&mut self, selections: &[Selection]) {
        if selections.is_empty() {
            self.errors.push(OperationDescriptorBuildError::EmptySelectionSet {
                operation_name: self.operation_name.to_string(),
                path: self.path.clone(),
            });
            return;
        }

        let mut seen_keys = HashSet::new();
        for selection in selections {
            if let Some(key) = selection.response_key()
                && !seen_keys.insert(key) {
                self.errors.push(OperationDescriptorBuildError::DuplicateResponseKey {
                    operation_name: self.operation_name.to_string(),
                    path: self.path.with_key(key),
                    response_key: key.to_string(),
                });
            }

            match selection {
                Selection::Scalar(field) => {
                    self.path.push_key(field.response_key());
                    for value in field.arguments().values() {
                        self.check_variable_refs(value.referenced_variables());
                    }
                    self.path.pop();
                },

                Selection::LinkedObject(field) => {
                    self.path.push_key(field.response_key());
                    for value in field.arguments().values() {
                        self.check_variable_refs(value.referenced_variables());
                    }
                    self.check_selection_list(field.children());
                    self.path.pop();
                },

                Selection::TypeBranch(branch) => {
                    self.path.push_type_condition(branch.declared_type());
                    self.check_selection_list(branch.children());
                    self.path.pop();
                },

                Selection::FragmentReference(reference) => {
                    self.path.push_fragment_spread(reference.fragment_name());
                    for value in reference.provided_arguments().values() {
                        self.check_variable_refs(value.referenced_variables());
                    }
                    self.path.pop();
                },
            }
        }
    }

    // Fragments may use variables of whichever operation spreads them, so
    // only executable operations are checked.
    fn check_variable_refs(&mut self, names: Vec<&str>) {
        if !self.check_variables {
            return;
        }
        for name in names {
            if !self.variables.contains_key(name) {
                self.errors.push(OperationDescriptorBuildError::UndefinedVariable {
                    operation_name: self.operation_name.to_string(),
                    path: self.path.clone(),
                    variable_name: name.to_string(),
                });
            }
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum OperationDescriptorBuildError {
    #[error("Operation '{operation_name}' declares variable '${variable_name}' more than once")]
    DuplicateVariableName {
        operation_name: String,
        variable_name: String,
    },

    #[error("Operation '{operation_name}' selects response key '{response_key}' twice at `{path}`")]
    DuplicateResponseKey {
        operation_name: String,
        path: ValuePath,
        response_key: String,
    },

    #[error("Operation name must not be empty")]
    EmptyOperationName,

    #[error("Operation '{operation_name}' has an empty selection set at `{path}`")]
    EmptySelectionSet {
        operation_name: String,
        path: ValuePath,
    },

    #[error("Default value of variable '${variable_name}' in operation '{operation_name}' is invalid: {mismatch}")]
    InvalidDefaultValue {
        operation_name: String,
        variable_name: String,
        mismatch: ValueTypeMismatch,
    },

    #[error("Fragment '{fragment_name}' has no type condition")]
    MissingTypeCondition {
        fragment_name: String,
    },

    #[error("Operation '{operation_name}' references undeclared variable '${variable_name}' at `{path}`")]
    UndefinedVariable {
        operation_name: String,
        path: ValuePath,
        variable_name: String,
    },

    #[error("Operation '{operation_name}' is not a fragment but has type condition '{type_condition}'")]
    UnexpectedTypeCondition {
        operation_name: String,
        type_condition: String,
    },
}
