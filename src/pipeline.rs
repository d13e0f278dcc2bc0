//! Pipeline – ties together reading, parsing, rendering and writing into a
//! single function call.

use std::fs;
use std::path::PathBuf;

use crate::classify::FileFormat;
use crate::config::CommandOptions;
use crate::diagnostics::{log_warnings, Observer, Warning};
use crate::engine::render;
use crate::error::FormError;
use crate::pagination::PAGE_MARGIN_PT;
use crate::reader::{read_form, read_submission};
use crate::sink::writer_for;
use crate::submission::ContentSubmission;
use crate::tree::{build_tree, ContentNode};

/// Page orientation for the generated PDF.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageOrientation {
    /// Portrait mode: height > width (default).
    #[default]
    Portrait,
    /// Landscape mode: width > height.
    Landscape,
}

/// Configuration for document generation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    /// Page width in points (default: A4 = 595.28).
    pub page_width: f32,
    /// Page height in points (default: A4 = 841.89).
    pub page_height: f32,
    /// Page margin in points (default: 40).
    pub page_margin: f32,
    /// Page orientation; swaps effective width/height when `Landscape`.
    pub orientation: PageOrientation,
    /// Body text size in points (default: 12).
    pub font_size: f32,
    /// Section title size in points (default: 14).
    pub heading_font_size: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            title: "form-forge output".to_string(),
            page_width: 595.28,
            page_height: 841.89,
            page_margin: PAGE_MARGIN_PT,
            orientation: PageOrientation::Portrait,
            font_size: 12.0,
            heading_font_size: 14.0,
        }
    }
}

impl PipelineConfig {
    /// Effective page width after applying orientation.
    pub fn effective_width(&self) -> f32 {
        match self.orientation {
            PageOrientation::Portrait => self.page_width,
            PageOrientation::Landscape => self.page_height,
        }
    }

    /// Effective page height after applying orientation.
    pub fn effective_height(&self) -> f32 {
        match self.orientation {
            PageOrientation::Portrait => self.page_height,
            PageOrientation::Landscape => self.page_width,
        }
    }
}

/// An in-memory artifact and the warnings raised producing it.
#[derive(Debug)]
pub struct Generated {
    pub bytes: Vec<u8>,
    pub warnings: Vec<Warning>,
}

/// Outcome of [`run`].
#[derive(Debug)]
pub struct Report {
    pub output: PathBuf,
    pub bytes: usize,
    pub warnings: Vec<Warning>,
}

/// Parse a schema written in `format`.
pub fn parse_form(
    format: FileFormat,
    bytes: &[u8],
    observer: &mut dyn Observer,
) -> Result<ContentNode, FormError> {
    match format {
        FileFormat::Xml => Ok(build_tree(bytes, observer)?),
        other => Err(FormError::UnsupportedInput(other)),
    }
}

/// Full pipeline in memory: schema bytes + answers → artifact bytes.
pub fn generate(
    form: &[u8],
    submission: Option<&ContentSubmission>,
    from: FileFormat,
    to: FileFormat,
    config: &PipelineConfig,
) -> Result<Generated, FormError> {
    if from != FileFormat::Xml {
        return Err(FormError::UnsupportedInput(from));
    }
    let mut writer = writer_for(to, config).ok_or(FormError::UnsupportedOutput(to))?;
    let mut warnings = Vec::new();

    let root = parse_form(from, form, &mut warnings)?;
    log::debug!("parsed form with {} node(s)", root.node_count());

    render(&root, submission, writer.as_mut(), &mut warnings)?;
    let bytes = writer.finish()?;

    Ok(Generated { bytes, warnings })
}

/// Convenience: XML schema → PDF bytes with the default A4 config.
pub fn generate_pdf(form: &str, submission: Option<&ContentSubmission>) -> Result<Generated, FormError> {
    generate(
        form.as_bytes(),
        submission,
        FileFormat::Xml,
        FileFormat::Pdf,
        &PipelineConfig::default(),
    )
}

/// Read both files, convert, and write the artifact next to the schema or
/// into the requested output directory.
pub fn run(options: &CommandOptions) -> Result<Report, FormError> {
    let form = read_form(&options.file)?;
    let submission = read_submission(&options.submission)?;

    let generated = generate(
        &form,
        Some(&submission),
        options.from,
        options.to,
        &options.pipeline_config(),
    )?;
    log_warnings(&generated.warnings);

    let output = options.output_path();
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| FormError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(&output, &generated.bytes).map_err(|source| FormError::Write {
        path: output.clone(),
        source,
    })?;
    log::info!(
        "wrote {} ({} bytes)",
        output.display(),
        generated.bytes.len()
    );

    Ok(Report {
        output,
        bytes: generated.bytes.len(),
        warnings: generated.warnings,
    })
}
