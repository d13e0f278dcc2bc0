//! Command options and output path derivation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::classify::FileFormat;
use crate::pipeline::{PageOrientation, PipelineConfig};

/// Everything one conversion needs, as resolved from the command line.
#[derive(Debug, Clone)]
pub struct CommandOptions {
    /// Form schema to read.
    pub file: PathBuf,
    /// JSON submission to merge in.
    pub submission: PathBuf,
    /// Directory for the output; defaults to the schema's directory.
    pub output_dir: Option<PathBuf>,
    pub from: FileFormat,
    pub to: FileFormat,
    /// Document title; defaults to the schema's file stem.
    pub title: Option<String>,
    pub orientation: PageOrientation,
}

impl CommandOptions {
    /// Where the artifact will be written.
    pub fn output_path(&self) -> PathBuf {
        derive_output_path(&self.file, self.output_dir.as_deref(), self.to)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        let title = self.title.clone().unwrap_or_else(|| {
            self.file
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("form-forge output")
                .to_string()
        });
        PipelineConfig {
            title,
            orientation: self.orientation.clone(),
            ..PipelineConfig::default()
        }
    }
}

/// `<dir>/<input stem>.<ext>`, where `dir` is `output_dir` when given and
/// the input's own directory otherwise.
pub fn derive_output_path(input: &Path, output_dir: Option<&Path>, format: FileFormat) -> PathBuf {
    let mut name: OsString = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".");
    name.push(format.extension());

    match output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
        _ => input
            .parent()
            .map(|parent| parent.join(&name))
            .unwrap_or_else(|| PathBuf::from(&name)),
    }
}
