use crate::ContentHash;
use crate::OperationRegistryBuilder;
use crate::operation::ArgumentValue;
use crate::operation::DescriptorLoadError;
use crate::operation::FragmentReference;
use crate::operation::LinkedField;
use crate::operation::OperationDescriptor;
use crate::operation::OperationKind;
use crate::operation::ScalarField;
use crate::operation::VariableDefinition;
use crate::registry::RegisterOutcome;
use crate::registry::RegistryBuildError;
use crate::test;
use crate::types::TypeAnnotation;
use serde_json::json;

fn project_query(fields: &[&str]) -> OperationDescriptor {
    let mut project = LinkedField::new("project");
    for field in fields {
        project = project.with_child(ScalarField::new(*field));
    }
    OperationDescriptor::builder("ProjectQuery", OperationKind::Query)
        .add_selection(project)
        .build()
        .unwrap()
}

fn fragment(name: &str, references: &[&str]) -> OperationDescriptor {
    let mut builder = OperationDescriptor::builder(name, OperationKind::Fragment)
        .type_condition("Project")
        .add_selection(ScalarField::new("id"));
    for reference in references {
        builder = builder.add_selection(FragmentReference::new(*reference));
    }
    builder.build().unwrap()
}

#[test]
fn empty_registry_creation() {
    let builder = OperationRegistryBuilder::new();
    assert!(builder.is_empty());
    let registry = builder.build().unwrap();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn resolve_returns_the_registered_descriptor() {
    let descriptor = project_query(&["id", "name"]);
    let expected_hash = *descriptor.content_hash();

    let mut builder = OperationRegistryBuilder::new();
    assert_eq!(builder.register(descriptor).unwrap(), RegisterOutcome::Inserted);
    assert!(builder.contains("ProjectQuery"));
    let registry = builder.build().unwrap();

    let resolved = registry.resolve("ProjectQuery").unwrap();
    assert_eq!(resolved.content_hash(), &expected_hash);
    assert_eq!(resolved.kind(), OperationKind::Query);
}

#[test]
fn resolve_unknown_name_fails() {
    let registry = OperationRegistryBuilder::new().build().unwrap();
    let err = registry.resolve("MissingQuery").unwrap_err();
    assert_eq!(err.operation_name, "MissingQuery");
}

#[test]
fn re_registering_identical_descriptor_is_a_no_op() {
    let mut builder = OperationRegistryBuilder::new();
    builder.register(project_query(&["id"])).unwrap();

    let outcome = builder.register(project_query(&["id"])).unwrap();

    assert_eq!(outcome, RegisterOutcome::AlreadyRegistered);
    assert_eq!(builder.len(), 1);
}

#[test]
fn re_registering_same_json_inserts_nothing() {
    let mut builder = OperationRegistryBuilder::new();
    let first = builder.register_from_json_str(test::TRACE_RETENTION_DESCRIPTORS, None).unwrap();
    let second = builder.register_from_json_str(test::TRACE_RETENTION_DESCRIPTORS, None).unwrap();

    assert_eq!(first, 3);
    assert_eq!(second, 0);
    assert_eq!(builder.len(), 3);
}

#[test]
fn same_name_with_different_content_is_rejected() {
    let original = project_query(&["id"]);
    let changed = project_query(&["id", "name"]);
    let original_hash = *original.content_hash();
    let changed_hash = *changed.content_hash();

    let mut builder = OperationRegistryBuilder::new();
    builder.register(original).unwrap();
    let err = builder.register(changed).unwrap_err();

    assert_eq!(err, RegistryBuildError::DuplicateOperation {
        existing_hash: original_hash,
        new_hash: changed_hash,
        operation_name: "ProjectQuery".to_string(),
    });
    assert_eq!(
        builder.build().unwrap().resolve("ProjectQuery").unwrap().content_hash(),
        &original_hash,
    );
}

#[test]
fn malformed_json_is_reported_with_file_path() {
    let mut builder = OperationRegistryBuilder::new();
    let path = std::path::Path::new("descriptors/broken.json");
    let errors = builder.register_from_json_str("{ not json", Some(path)).unwrap_err();

    assert_eq!(errors.len(), 1);
    let RegistryBuildError::DescriptorLoad(DescriptorLoadError::MalformedJson { file_path, .. }) = &errors[0] else {
        panic!("Expected MalformedJson, got {:?}", errors[0]);
    };
    assert_eq!(file_path.as_deref(), Some(path));
}

#[test]
fn invalid_documents_are_reported_and_valid_ones_kept() {
    let content = json!([
        {"name": "BrokenQuery", "kind": "Query", "selections": []},
        {"name": "ViewerQuery", "kind": "Query", "selections": [{"kind": "Scalar", "name": "viewerId"}]}
    ]).to_string();

    let mut builder = OperationRegistryBuilder::new();
    let errors = builder.register_from_json_str(content, None).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        RegistryBuildError::DescriptorLoad(DescriptorLoadError::InvalidDescriptor { name, .. })
            if name == "BrokenQuery"
    ));
    assert!(builder.contains("ViewerQuery"));
    assert!(!builder.contains("BrokenQuery"));
}

#[test]
fn missing_file_is_a_read_error() {
    let mut builder = OperationRegistryBuilder::new();
    let errors = builder
        .register_from_file(test::fixtures_dir().join("does_not_exist.json"))
        .unwrap_err();

    assert!(matches!(
        errors.as_slice(),
        [RegistryBuildError::DescriptorLoad(DescriptorLoadError::ReadError(_))]
    ));
}

#[test]
fn undefined_fragment_reference_fails_build() {
    let query = OperationDescriptor::builder("ProjectQuery", OperationKind::Query)
        .add_selection(LinkedField::new("project").with_child(FragmentReference::new("ProjectFields")))
        .build()
        .unwrap();

    let mut builder = OperationRegistryBuilder::new();
    builder.register(query).unwrap();
    let errors = builder.build().unwrap_err();

    assert_eq!(errors.len(), 1);
    let RegistryBuildError::UndefinedFragmentReference { fragment_name, operation_name, path } = &errors[0] else {
        panic!("Expected UndefinedFragmentReference, got {:?}", errors[0]);
    };
    assert_eq!(fragment_name, "ProjectFields");
    assert_eq!(operation_name, "ProjectQuery");
    assert_eq!(path.to_string(), "project");
}

#[test]
fn referencing_an_executable_operation_fails_build() {
    let query = OperationDescriptor::builder("OwnerQuery", OperationKind::Query)
        .add_selection(FragmentReference::new("ProjectQuery"))
        .build()
        .unwrap();

    let mut builder = OperationRegistryBuilder::new();
    builder.register(project_query(&["id"])).unwrap();
    builder.register(query).unwrap();
    let errors = builder.build().unwrap_err();

    assert_eq!(errors, vec![RegistryBuildError::NotAFragment {
        fragment_name: "ProjectQuery".to_string(),
        kind: OperationKind::Query,
        operation_name: "OwnerQuery".to_string(),
    }]);
}

#[test]
fn fragment_arguments_must_be_declared_and_fit() {
    let limits = OperationDescriptor::builder("RuleLimits", OperationKind::Fragment)
        .type_condition("TraceRetentionRule")
        .add_variable(VariableDefinition::new("units", TypeAnnotation::parse("[String!]").unwrap()))
        .unwrap()
        .add_selection(ScalarField::new("id"))
        .build()
        .unwrap();
    let query = OperationDescriptor::builder("RulesQuery", OperationKind::Query)
        .add_selection(
            LinkedField::new("rules")
                .plural()
                .with_child(
                    FragmentReference::new("RuleLimits")
                        .with_argument("units", ArgumentValue::literal(json!(["DAYS", 7])))
                        .with_argument("scale", ArgumentValue::literal(json!(2))),
                ),
        )
        .build()
        .unwrap();

    let mut builder = OperationRegistryBuilder::new();
    builder.register(limits).unwrap();
    builder.register(query).unwrap();
    let errors = builder.build().unwrap_err();

    assert_eq!(errors.len(), 2, "{errors:#?}");
    let RegistryBuildError::InvalidFragmentArgument { mismatch, .. } = &errors[0] else {
        panic!("Expected InvalidFragmentArgument, got {:?}", errors[0]);
    };
    assert_eq!(mismatch.path.to_string(), "$units[1]");
    assert_eq!(errors[1], RegistryBuildError::UnknownFragmentArgument {
        argument_name: "scale".to_string(),
        fragment_name: "RuleLimits".to_string(),
        operation_name: "RulesQuery".to_string(),
    });
}

#[test]
fn fragment_cycle_is_reported_once() {
    let mut builder = OperationRegistryBuilder::new();
    builder.register(fragment("FragmentA", &["FragmentB"])).unwrap();
    builder.register(fragment("FragmentB", &["FragmentA"])).unwrap();

    let errors = builder.build().unwrap_err();

    assert_eq!(errors, vec![RegistryBuildError::FragmentCycleDetected {
        cycle_path: vec![
            "FragmentA".to_string(),
            "FragmentB".to_string(),
            "FragmentA".to_string(),
        ],
    }]);
}

#[test]
fn self_referencing_fragment_is_a_cycle() {
    let mut builder = OperationRegistryBuilder::new();
    builder.register(fragment("ProjectFields", &["ProjectFields"])).unwrap();

    let errors = builder.build().unwrap_err();

    assert_eq!(errors, vec![RegistryBuildError::FragmentCycleDetected {
        cycle_path: vec!["ProjectFields".to_string(), "ProjectFields".to_string()],
    }]);
}

#[test]
fn diamond_references_are_not_cycles() {
    let mut builder = OperationRegistryBuilder::new();
    builder.register(fragment("Leaf", &[])).unwrap();
    builder.register(fragment("Left", &["Leaf"])).unwrap();
    builder.register(fragment("Right", &["Leaf"])).unwrap();
    builder.register(fragment("Top", &["Left", "Right"])).unwrap();

    assert!(builder.build().is_ok());
}

fn project_spans(count: Option<VariableDefinition>) -> OperationDescriptor {
    let mut builder = OperationDescriptor::builder("ProjectSpans", OperationKind::Fragment)
        .type_condition("Project");
    if let Some(count) = count {
        builder = builder.add_variable(count).unwrap();
    }
    builder
        .add_selection(ScalarField::new("spans").with_argument("first", ArgumentValue::variable("count")))
        .build()
        .unwrap()
}

fn spans_query(variables: Vec<VariableDefinition>) -> OperationDescriptor {
    let mut builder = OperationDescriptor::builder("ProjectQuery", OperationKind::Query);
    for variable in variables {
        builder = builder.add_variable(variable).unwrap();
    }
    builder
        .add_selection(LinkedField::new("project").with_child(FragmentReference::new("ProjectSpans")))
        .build()
        .unwrap()
}

#[test]
fn fragment_variable_undeclared_by_the_operation_fails_build() {
    let mut builder = OperationRegistryBuilder::new();
    builder.register(project_spans(None)).unwrap();
    builder.register(spans_query(vec![])).unwrap();

    let errors = builder.build().unwrap_err();

    assert_eq!(errors, vec![RegistryBuildError::UndefinedVariable {
        fragment_name: "ProjectSpans".to_string(),
        operation_name: "ProjectQuery".to_string(),
        variable_name: "count".to_string(),
    }]);
}

#[test]
fn fragment_variable_resolves_to_operation_variable_or_argument() {
    let mut builder = OperationRegistryBuilder::new();
    builder.register(project_spans(None)).unwrap();
    builder
        .register(spans_query(vec![VariableDefinition::new("count", TypeAnnotation::named("Int", true))]))
        .unwrap();
    assert!(builder.build().is_ok());

    let mut builder = OperationRegistryBuilder::new();
    builder
        .register(project_spans(Some(
            VariableDefinition::new("count", TypeAnnotation::named("Int", false))
                .with_default(json!(10)),
        )))
        .unwrap();
    builder.register(spans_query(vec![])).unwrap();
    assert!(builder.build().is_ok());
}

#[test]
fn unbound_fragment_argument_without_default_needs_an_operation_variable() {
    let mut builder = OperationRegistryBuilder::new();
    builder
        .register(project_spans(Some(VariableDefinition::new("count", TypeAnnotation::named("Int", true)))))
        .unwrap();
    builder.register(spans_query(vec![])).unwrap();

    let errors = builder.build().unwrap_err();

    assert!(matches!(
        errors.as_slice(),
        [RegistryBuildError::UndefinedVariable { variable_name, .. }] if variable_name == "count"
    ), "{errors:#?}");
}

#[test]
fn operations_with_identical_documents_fail_build() {
    let text = "query { viewer { id } }";
    let viewer_query = |name: &str| {
        OperationDescriptor::builder(name, OperationKind::Query)
            .add_selection(LinkedField::new("viewer").with_child(ScalarField::new("id")))
            .query_text(text)
            .build()
            .unwrap()
    };

    let mut builder = OperationRegistryBuilder::new();
    builder.register(viewer_query("ViewerQuery")).unwrap();
    builder.register(viewer_query("ViewerAgainQuery")).unwrap();

    let errors = builder.build().unwrap_err();

    assert_eq!(errors, vec![RegistryBuildError::DuplicateDocument {
        content_hash: ContentHash::of(text),
        existing_operation: "ViewerQuery".to_string(),
        operation_name: "ViewerAgainQuery".to_string(),
    }]);
}
