use crate::OperationRegistry;
use crate::test;
use rayon::prelude::*;
use serde_json::json;
use std::sync::Arc;

#[test]
fn registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OperationRegistry>();
}

#[test]
fn concurrent_reads_agree() {
    let registry = Arc::new(test::fixture_registry());
    let fixture: serde_json::Value = serde_json::from_str(test::TRACE_RETENTION_RULES_RESPONSE).unwrap();
    let expected_hash = registry
        .serialize("TraceRetentionRulesQuery", &json!({"projectId": "proj-0"}))
        .unwrap()
        .content_hash;

    let mismatches = (0..512)
        .into_par_iter()
        .filter(|idx| {
            let registry = Arc::clone(&registry);
            let variables = json!({"projectId": format!("proj-{idx}")});
            let serialized = registry.serialize("TraceRetentionRulesQuery", &variables).unwrap();
            let decoded = registry.decode("TraceRetentionRulesQuery", &fixture).unwrap();

            serialized.content_hash != expected_hash
                || serialized.variables["projectId"] != variables["projectId"]
                || decoded.into_value() != fixture
        })
        .count();

    assert_eq!(mismatches, 0);
}

#[test]
fn operations_iterate_in_registration_order() {
    let registry = test::fixture_registry();

    let names = registry.operations().map(|d| d.name()).collect::<Vec<_>>();

    assert_eq!(names, vec![
        "TraceRetentionRuleFields",
        "TraceRetentionRulesQuery",
        "DeleteTraceRetentionRuleMutation",
        "ProjectSettingsQuery",
    ]);
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.config().discriminator_field, "__typename");
}
