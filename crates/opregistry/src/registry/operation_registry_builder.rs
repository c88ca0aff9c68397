use crate::ContentHash;
use crate::RegistryConfig;
use crate::ValuePath;
use crate::file_reader;
use crate::operation::ArgumentValue;
use crate::operation::DescriptorDocument;
use crate::operation::DescriptorLoadError;
use crate::operation::OperationDescriptor;
use crate::operation::OperationKind;
use crate::operation::Selection;
use crate::registry::OperationRegistry;
use crate::registry::document_composer::DocumentComposer;
use crate::types::ValueTypeMismatch;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

type Result<T> = std::result::Result<T, Vec<RegistryBuildError>>;

/// What [`OperationRegistryBuilder::register`] did with a descriptor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegisterOutcome {
    /// An identical descriptor (same name, same content hash) was already
    /// registered; nothing changed.
    AlreadyRegistered,
    Inserted,
}

/// Collects [`OperationDescriptor`]s during initialization and freezes them
/// into an immutable [`OperationRegistry`].
///
/// Registration is the only phase that mutates anything. [`build`](Self::build)
/// checks that the descriptors compose (every fragment reference resolves,
/// no fragment spreads itself) and reports every problem at once.
///
/// ```
/// use opregistry::OperationRegistryBuilder;
///
/// let mut builder = OperationRegistryBuilder::new();
/// builder.register_from_json_str(r#"{
///     "name": "ProjectNameQuery",
///     "kind": "Query",
///     "selections": [{"kind": "Scalar", "name": "viewerProjectCount"}]
/// }"#, None).unwrap();
///
/// let registry = builder.build().unwrap();
/// assert!(registry.resolve("ProjectNameQuery").is_ok());
/// ```
#[derive(Debug, Default)]
pub struct OperationRegistryBuilder {
    config: RegistryConfig,
    descriptors: IndexMap<String, OperationDescriptor>,
}

impl OperationRegistryBuilder {
    /// Create a new empty `OperationRegistryBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            descriptors: IndexMap::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Add a descriptor keyed by its name.
    ///
    /// Registering a descriptor identical to one already present is a
    /// no-op. Registering a different descriptor under a taken name fails.
    pub fn register(
        &mut self,
        descriptor: OperationDescriptor,
    ) -> std::result::Result<RegisterOutcome, RegistryBuildError> {
        if let Some(existing) = self.descriptors.get(descriptor.name()) {
            if existing.content_hash() == descriptor.content_hash() {
                log::debug!(
                    "Operation `{}` is already registered with the same content; skipping.",
                    descriptor.name(),
                );
                return Ok(RegisterOutcome::AlreadyRegistered);
            }

            return Err(RegistryBuildError::DuplicateOperation {
                existing_hash: *existing.content_hash(),
                new_hash: *descriptor.content_hash(),
                operation_name: descriptor.name().to_string(),
            });
        }

        log::trace!(
            "Registering {} `{}` ({}).",
            descriptor.kind(),
            descriptor.name(),
            descriptor.content_hash(),
        );
        self.descriptors.insert(descriptor.name().to_string(), descriptor);
        Ok(RegisterOutcome::Inserted)
    }

    /// Parse descriptor documents from a JSON string and register each.
    ///
    /// Returns how many descriptors were newly inserted. Documents that
    /// fail to build or collide with a registered name are all reported;
    /// the valid ones are still registered.
    pub fn register_from_json_str(
        &mut self,
        content: impl AsRef<str>,
        file_path: Option<&Path>,
    ) -> Result<usize> {
        let documents = DescriptorDocument::parse_many(content.as_ref())
            .map_err(|e| vec![RegistryBuildError::DescriptorLoad(
                DescriptorLoadError::MalformedJson {
                    file_path: file_path.map(Path::to_path_buf),
                    message: e.to_string(),
                },
            )])?;

        let mut errors = vec![];
        let mut inserted = 0;
        for document in documents {
            let name = document.name.clone();
            let descriptor = match document.build() {
                Ok(descriptor) => descriptor,
                Err(build_errors) => {
                    errors.push(RegistryBuildError::DescriptorLoad(
                        DescriptorLoadError::InvalidDescriptor {
                            errors: build_errors,
                            file_path: file_path.map(Path::to_path_buf),
                            name,
                        },
                    ));
                    continue;
                },
            };

            match self.register(descriptor) {
                Ok(RegisterOutcome::Inserted) => inserted += 1,
                Ok(RegisterOutcome::AlreadyRegistered) => (),
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(inserted)
    }

    /// Read a JSON descriptor file and register every document in it.
    pub fn register_from_file(&mut self, file_path: impl AsRef<Path>) -> Result<usize> {
        let file_path = file_path.as_ref();
        let content = file_reader::read_descriptor_file(file_path)
            .map_err(|e| vec![RegistryBuildError::DescriptorLoad(e.into())])?;

        self.register_from_json_str(content, Some(file_path))
    }

    /// Build the immutable [`OperationRegistry`].
    ///
    /// This method performs the following validations:
    /// - every fragment reference names a registered fragment
    /// - every provided fragment argument is declared by that fragment
    /// - no fragment spreads itself, directly or through others
    /// - every variable a reachable fragment uses is bound by an argument
    ///   or declared by the operation spreading it
    /// - no two operations compose to the same document
    ///
    /// If any validation errors are found, returns all errors at once
    /// rather than failing on the first error.
    pub fn build(self) -> Result<OperationRegistry> {
        let mut errors = self.validate_fragment_references();
        errors.extend(self.validate_no_cycles());

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut documents = HashMap::new();
        let mut names_by_document_hash: HashMap<ContentHash, String> = HashMap::new();
        for descriptor in self.descriptors.values().filter(|d| d.kind().is_executable()) {
            let document = match DocumentComposer::compose(&self.descriptors, descriptor) {
                Ok(document) => document,
                Err(compose_errors) => {
                    errors.extend(compose_errors);
                    continue;
                },
            };

            if let Some(existing_operation) = names_by_document_hash.get(&document.content_hash) {
                errors.push(RegistryBuildError::DuplicateDocument {
                    content_hash: document.content_hash,
                    existing_operation: existing_operation.clone(),
                    operation_name: descriptor.name().to_string(),
                });
                continue;
            }

            names_by_document_hash.insert(document.content_hash, descriptor.name().to_string());
            documents.insert(descriptor.name().to_string(), document);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        log::debug!(
            "Built operation registry with {} executable operations and {} fragments.",
            documents.len(),
            self.descriptors.len() - documents.len(),
        );

        Ok(OperationRegistry {
            config: self.config,
            descriptors: self.descriptors,
            documents,
            names_by_document_hash,
        })
    }

    /// Validate that all fragment references point to registered fragments
    /// and only pass arguments those fragments declare.
    fn validate_fragment_references(&self) -> Vec<RegistryBuildError> {
        let mut errors = Vec::new();

        for (operation_name, descriptor) in &self.descriptors {
            let mut path = ValuePath::new();
            self.check_fragment_refs_in_selections(
                operation_name,
                descriptor.selections(),
                &mut path,
                &mut errors,
            );
        }

        errors
    }

    fn check_fragment_refs_in_selections(
        &self,
        operation_name: &str,
        selections: &[Selection],
        path: &mut ValuePath,
        errors: &mut Vec<RegistryBuildError>,
    ) {
        for selection in selections {
            match selection {
                Selection::FragmentReference(reference) => {
                    let fragment_name = reference.fragment_name();
                    let Some(fragment) = self.descriptors.get(fragment_name) else {
                        errors.push(RegistryBuildError::UndefinedFragmentReference {
                            fragment_name: fragment_name.to_string(),
                            operation_name: operation_name.to_string(),
                            path: path.clone(),
                        });
                        continue;
                    };

                    if fragment.kind() != OperationKind::Fragment {
                        errors.push(RegistryBuildError::NotAFragment {
                            fragment_name: fragment_name.to_string(),
                            kind: fragment.kind(),
                            operation_name: operation_name.to_string(),
                        });
                        continue;
                    }

                    for (argument_name, value) in reference.provided_arguments() {
                        let Some(definition) = fragment.variable_definitions().get(argument_name) else {
                            errors.push(RegistryBuildError::UnknownFragmentArgument {
                                argument_name: argument_name.to_string(),
                                fragment_name: fragment_name.to_string(),
                                operation_name: operation_name.to_string(),
                            });
                            continue;
                        };

                        if let ArgumentValue::Literal { value } = value {
                            let mut arg_path = ValuePath::new();
                            arg_path.push_key("$");
                            arg_path.push_key(argument_name.as_str());
                            if let Err(mismatch) = definition.type_annotation().check_value(value, &mut arg_path) {
                                errors.push(RegistryBuildError::InvalidFragmentArgument {
                                    fragment_name: fragment_name.to_string(),
                                    mismatch,
                                    operation_name: operation_name.to_string(),
                                });
                            }
                        }
                    }
                },

                Selection::LinkedObject(field) => {
                    path.push_key(field.response_key());
                    self.check_fragment_refs_in_selections(
                        operation_name,
                        field.children(),
                        path,
                        errors,
                    );
                    path.pop();
                },

                Selection::TypeBranch(branch) => {
                    self.check_fragment_refs_in_selections(
                        operation_name,
                        branch.children(),
                        path,
                        errors,
                    );
                },

                Selection::Scalar(_) => (),
            }
        }
    }

    /// Validate that no cycles exist in fragment references.
    ///
    /// Uses DFS traversal with cycle normalization so that rotations of the
    /// same cycle are reported once.
    fn validate_no_cycles(&self) -> Vec<RegistryBuildError> {
        let mut all_cycles = Vec::new();
        let mut seen_normalized_cycles = HashSet::new();

        let fragment_names = self.descriptors
            .values()
            .filter(|d| d.kind() == OperationKind::Fragment)
            .map(|d| d.name());

        for fragment_name in fragment_names {
            let mut path = Vec::new();
            let mut visiting = HashSet::new();

            self.check_fragment_cycles(
                fragment_name,
                &mut path,
                &mut visiting,
                &mut all_cycles,
                &mut seen_normalized_cycles,
            );
        }

        all_cycles
    }

    fn check_fragment_cycles(
        &self,
        fragment_name: &str,
        path: &mut Vec<String>,
        visiting: &mut HashSet<String>,
        errors: &mut Vec<RegistryBuildError>,
        seen_normalized: &mut HashSet<Vec<String>>,
    ) {
        if visiting.contains(fragment_name) {
            path.push(fragment_name.to_string());

            let normalized = normalize_cycle(path);
            if seen_normalized.insert(normalized) {
                // Only the looping tail of the path is part of the cycle.
                let start = path
                    .iter()
                    .position(|name| name == fragment_name)
                    .unwrap_or(0);
                errors.push(RegistryBuildError::FragmentCycleDetected {
                    cycle_path: path[start..].to_vec(),
                });
            }

            path.pop();
            return;
        }

        // Undefined references are reported by validate_fragment_references
        let Some(fragment) = self.descriptors.get(fragment_name) else {
            return;
        };
        if fragment.kind() != OperationKind::Fragment {
            return;
        }

        path.push(fragment_name.to_string());
        visiting.insert(fragment_name.to_string());

        for referenced in fragment.fragment_references() {
            self.check_fragment_cycles(
                referenced,
                path,
                visiting,
                errors,
                seen_normalized,
            );
        }

        path.pop();
        visiting.remove(fragment_name);
    }
}

/// Normalize a cycle to canonical form for deduplication.
///
/// `[B, C, A, B]` and `[C, A, B, C]` both normalize to `[A, B, C, A]`. The
/// input may carry a lead-in before the cycle proper (`[X, A, B, A]`); only
/// the part starting at the first occurrence of the closing name counts.
fn normalize_cycle(path: &[String]) -> Vec<String> {
    let Some(last) = path.last() else {
        return Vec::new();
    };
    let start = path.iter().position(|name| name == last).unwrap_or(0);
    let cycle_without_repeat = &path[start..path.len() - 1];
    if cycle_without_repeat.is_empty() {
        return vec![last.clone()];
    }

    let min_idx = cycle_without_repeat
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(idx, _)| idx)
        .unwrap_or(0);

    let mut normalized = Vec::with_capacity(cycle_without_repeat.len() + 1);
    normalized.extend_from_slice(&cycle_without_repeat[min_idx..]);
    normalized.extend_from_slice(&cycle_without_repeat[..min_idx]);
    normalized.push(normalized[0].clone());
    normalized
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RegistryBuildError {
    #[error(transparent)]
    DescriptorLoad(#[from] DescriptorLoadError),

    #[error(
        "Operation '{operation_name}' composes to the same document as \
        '{existing_operation}' (content hash {content_hash})"
    )]
    DuplicateDocument {
        content_hash: ContentHash,
        existing_operation: String,
        operation_name: String,
    },

    #[error(
        "Operation '{operation_name}' is already registered with content hash \
        {existing_hash}; refusing different content with hash {new_hash}"
    )]
    DuplicateOperation {
        existing_hash: ContentHash,
        new_hash: ContentHash,
        operation_name: String,
    },

    #[error("Fragment cycle detected: {}", format_cycle_path(.cycle_path))]
    FragmentCycleDetected { cycle_path: Vec<String> },

    #[error("Operation '{operation_name}' passes an invalid argument to fragment '{fragment_name}': {mismatch}")]
    InvalidFragmentArgument {
        fragment_name: String,
        mismatch: ValueTypeMismatch,
        operation_name: String,
    },

    #[error("Operation '{operation_name}' references '{fragment_name}', which is a {kind}, not a fragment")]
    NotAFragment {
        fragment_name: String,
        kind: OperationKind,
        operation_name: String,
    },

    #[error("Operation '{operation_name}' references undefined fragment '{fragment_name}' at `{path}`")]
    UndefinedFragmentReference {
        fragment_name: String,
        operation_name: String,
        path: ValuePath,
    },

    #[error(
        "Fragment '{fragment_name}' uses variable '${variable_name}', which operation \
        '{operation_name}' neither binds as a fragment argument nor declares"
    )]
    UndefinedVariable {
        fragment_name: String,
        operation_name: String,
        variable_name: String,
    },

    #[error("Operation '{operation_name}' passes undeclared argument '{argument_name}' to fragment '{fragment_name}'")]
    UnknownFragmentArgument {
        argument_name: String,
        fragment_name: String,
        operation_name: String,
    },
}

fn format_cycle_path(cycle: &[String]) -> String {
    cycle.join(" → ")
}
