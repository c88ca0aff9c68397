use crate::CommandResult;
use crate::output_utils;
use opregistry::OperationRegistry;
use opregistry::OperationRegistryBuilder;
use opregistry::RegistryConfig;
use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Descriptor file inputs shared by every subcommand.
#[derive(Debug, clap::Args)]
pub(crate) struct DescriptorArgs {
    #[arg(
        default_values_t=["json".to_string()],
        help="Set of file extensions to filter to when searching for \
             descriptor files within a directory.",
        long,
        value_delimiter = ',',
    )]
    descriptor_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more descriptor JSON files or directories \
             containing them.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

pub(crate) struct LoadedRegistry {
    pub num_files: usize,
    pub num_skipped: usize,
    pub registry: OperationRegistry,
}

impl DescriptorArgs {
    /// Find every descriptor file at or under the given paths, register
    /// them all and build the registry.
    pub(crate) fn load_registry(
        &self,
        config: RegistryConfig,
    ) -> Result<LoadedRegistry, Vec<Box<dyn Error>>> {
        let mut errors: Vec<Box<dyn Error>> = vec![];

        let descriptor_file_exts: HashSet<&str> =
            self.descriptor_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.'))
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let mut num_skipped: usize = 0;
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            for entry in WalkDir::new(path.as_path()).follow_links(true).sort_by_file_name() {
                match entry {
                    Ok(entry) => {
                        let path = entry.path();
                        if !entry.file_type().is_file() {
                            continue;
                        }
                        let matches_ext = path.extension()
                            .and_then(|ext| ext.to_str())
                            .is_some_and(|ext| descriptor_file_exts.contains(ext));
                        if matches_ext {
                            log::trace!("Found descriptor file at {path:#?}.");
                            file_paths.push(path.to_path_buf());
                        } else {
                            log::trace!("Skipping non-descriptor file: {path:#?}.");
                            num_skipped += 1;
                        }
                    },

                    Err(e) => {
                        log::trace!(
                            "Encountered an error while iterating recursive \
                            filesystem entities at/under {path:#?}."
                        );
                        errors.push(Box::new(e));
                    },
                }
            }
        }

        // A single explicit file argument is loaded whatever its extension.
        if file_paths.is_empty()
            && self.file_or_dir_paths.len() == 1
            && let Some(first_arg_path) = self.file_or_dir_paths.first()
            && first_arg_path.is_file() {
            log::warn!(
                "Proceeding to load {first_arg_path:#?} even though it \
                doesn't match any of the --descriptor-file-exts ({}).",
                self.descriptor_file_exts.join(", "),
            );
            file_paths.push(first_arg_path.to_path_buf());
            num_skipped = num_skipped.saturating_sub(1);
        }

        log::debug!("Found {} descriptor files to load.", file_paths.len());

        let mut builder = OperationRegistryBuilder::with_config(config);
        for file_path in &file_paths {
            if let Err(file_errors) = builder.register_from_file(file_path) {
                errors.extend(file_errors.into_iter().map(|e| Box::new(e) as Box<dyn Error>));
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        match builder.build() {
            Ok(registry) => Ok(LoadedRegistry {
                num_files: file_paths.len(),
                num_skipped,
                registry,
            }),
            Err(build_errors) => Err(
                build_errors.into_iter().map(|e| Box::new(e) as Box<dyn Error>).collect()
            ),
        }
    }
}

pub(crate) fn report_load_errors(errors: Vec<Box<dyn Error>>) -> CommandResult {
    CommandResult::failed(format_args!(
        "{} Failed to load operation descriptors:\n{}",
        output_utils::RED_X,
        errors.iter()
            .map(|e| format!("  * {e}"))
            .collect::<Vec<_>>()
            .join("\n"),
    ))
}
