mod operation_registry_builder_tests;
mod operation_registry_tests;
