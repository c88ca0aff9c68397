//! Shared descriptor fixtures for unit tests across the crate.
//!
//! Fixture files live under `src/test/fixtures` and are embedded with
//! `include_str!` so tests do not depend on the working directory. Tests
//! that exercise file loading use [`fixtures_dir`] instead.

use crate::OperationRegistry;
use crate::OperationRegistryBuilder;
use crate::RegistryConfig;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

pub(crate) const TRACE_RETENTION_DESCRIPTORS: &str =
    include_str!("fixtures/trace_retention_descriptors.json");

pub(crate) const TRACE_RETENTION_RULES_RESPONSE: &str =
    include_str!("fixtures/trace_retention_rules_response.json");

pub(crate) const PROJECT_SETTINGS_DESCRIPTORS: &str =
    include_str!("fixtures/project_settings_descriptors.json");

pub(crate) fn fixtures_dir() -> &'static Path {
    static FIXTURES_DIR: OnceLock<PathBuf> = OnceLock::new();
    FIXTURES_DIR.get_or_init(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/test/fixtures")
    })
}

/// A registry holding every descriptor fixture.
pub(crate) fn fixture_registry() -> OperationRegistry {
    fixture_registry_with_config(RegistryConfig::default())
}

pub(crate) fn fixture_registry_with_config(config: RegistryConfig) -> OperationRegistry {
    let mut builder = OperationRegistryBuilder::with_config(config);
    builder.register_from_json_str(TRACE_RETENTION_DESCRIPTORS, None).unwrap();
    builder.register_from_json_str(PROJECT_SETTINGS_DESCRIPTORS, None).unwrap();
    builder.build().unwrap()
}

#[cfg(test)]
mod tests {
    use crate::OperationRegistryBuilder;
    use crate::operation::DescriptorDocument;
    use crate::test;
    use serde_json::Value;

    #[test]
    fn every_fixture_file_loads_into_one_registry() {
        let mut builder = OperationRegistryBuilder::new();
        let mut json_files = std::fs::read_dir(test::fixtures_dir())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with("_descriptors.json"))
            })
            .collect::<Vec<_>>();
        json_files.sort();

        let mut inserted = 0;
        for path in &json_files {
            inserted += builder.register_from_file(path).unwrap();
        }

        assert_eq!(json_files.len(), 2);
        assert_eq!(inserted, 4);
        let registry = builder.build().unwrap();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn fixture_response_round_trips_through_decode() {
        let registry = test::fixture_registry();
        let fixture: Value = serde_json::from_str(test::TRACE_RETENTION_RULES_RESPONSE).unwrap();

        let decoded = registry.decode("TraceRetentionRulesQuery", &fixture).unwrap();

        assert_eq!(decoded.into_value(), fixture);
    }

    #[test]
    fn descriptors_survive_document_conversion() {
        let registry = test::fixture_registry();

        for descriptor in registry.operations() {
            let document = descriptor.to_document();
            let json = serde_json::to_string(&document).unwrap();
            let reparsed = DescriptorDocument::parse_many(&json).unwrap();
            assert_eq!(reparsed.len(), 1);

            let rebuilt = reparsed.into_iter().next().unwrap().build().unwrap();
            assert_eq!(&rebuilt, descriptor);
        }
    }
}
