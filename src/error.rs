use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::classify::FileFormat;
use crate::engine::RenderError;
use crate::reader::ReadError;
use crate::sink::SinkError;
use crate::tree::ParseError;

/// Anything that stops a conversion.
#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("failed to parse form: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to render form: {0}")]
    Render(#[from] RenderError),

    #[error("failed to finish document: {0}")]
    Finish(#[from] SinkError),

    #[error("unsupported input format: {0}")]
    UnsupportedInput(FileFormat),

    #[error("unsupported output format: {0}")]
    UnsupportedOutput(FileFormat),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
