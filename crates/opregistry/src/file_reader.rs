use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Read a descriptor document from disk as UTF-8 text.
pub(crate) fn read_descriptor_file(
    file_path: &Path,
) -> Result<String, ReadContentError> {
    if !file_path.is_file() {
        return Err(ReadContentError::NotAFile(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path).map_err(|err| ReadContentError::Io {
        file_path: file_path.to_path_buf(),
        kind: err.kind(),
        message: err.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|err| ReadContentError::NotUtf8 {
        file_path: file_path.to_path_buf(),
        valid_up_to: err.utf8_error().valid_up_to(),
    })
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ReadContentError {
    #[error("Failed to read {file_path:?}: {message}")]
    Io {
        file_path: PathBuf,
        kind: std::io::ErrorKind,
        message: String,
    },

    #[error("Descriptor path is not a file: {0:?}")]
    NotAFile(PathBuf),

    #[error("{file_path:?} is not valid UTF-8 (valid up to byte {valid_up_to})")]
    NotUtf8 {
        file_path: PathBuf,
        valid_up_to: usize,
    },
}
