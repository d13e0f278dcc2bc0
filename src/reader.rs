//! Reading the schema and submission files from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::submission::ContentSubmission;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("no file path provided")]
    EmptyPath,

    #[error("{} is empty", .0.display())]
    EmptyFile(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid submission file {}: {source}", .path.display())]
    Submission {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ReadError> {
    if path.as_os_str().is_empty() {
        return Err(ReadError::EmptyPath);
    }
    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(ReadError::EmptyFile(path.to_path_buf()));
    }
    Ok(bytes)
}

/// Read a form schema. Empty files are rejected.
pub fn read_form(path: &Path) -> Result<Vec<u8>, ReadError> {
    let bytes = read_bytes(path)?;
    log::debug!("read {} bytes of schema from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Read and decode a JSON submission file.
pub fn read_submission(path: &Path) -> Result<ContentSubmission, ReadError> {
    let bytes = read_bytes(path)?;
    let submission =
        ContentSubmission::from_json(&bytes).map_err(|source| ReadError::Submission {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!(
        "read {} answer(s) from {}",
        submission.len(),
        path.display()
    );
    Ok(submission)
}
