//! Concrete document sinks and the output-format factory.
//!
//! - [`PdfSink`] buffers blocks, paginates them and writes a PDF on finish.
//! - [`JsonSink`] streams one JSON object per block (JSON Lines) into any
//!   writer as blocks arrive.

use std::io::{self, Write};

use thiserror::Error;

use crate::block::Block;
use crate::classify::FileFormat;
use crate::engine::DocumentSink;
use crate::fonts::FontMetrics;
use crate::pagination::paginate;
use crate::pipeline::PipelineConfig;
use crate::render::render_pdf;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to encode block as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write PDF: {0}")]
    Pdf(String),
}

/// A sink that turns the accepted blocks into a finished artifact.
pub trait DocumentWriter: DocumentSink {
    fn format(&self) -> FileFormat;

    /// Consume the sink and return the artifact bytes.
    fn finish(self: Box<Self>) -> Result<Vec<u8>, SinkError>;
}

/// Pick the writer for an output format, if one exists.
pub fn writer_for(format: FileFormat, config: &PipelineConfig) -> Option<Box<dyn DocumentWriter>> {
    match format {
        FileFormat::Pdf => Some(Box::new(PdfSink::new(config.clone()))),
        FileFormat::Json => Some(Box::new(JsonSink::new(Vec::new()))),
        FileFormat::Xml | FileFormat::Html | FileFormat::Unknown => None,
    }
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

pub struct PdfSink {
    config: PipelineConfig,
    metrics: FontMetrics,
    blocks: Vec<Block>,
}

impl PdfSink {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            metrics: FontMetrics::default(),
            blocks: Vec::new(),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

impl DocumentSink for PdfSink {
    fn accept(&mut self, block: Block) -> Result<(), SinkError> {
        self.blocks.push(block);
        Ok(())
    }
}

impl DocumentWriter for PdfSink {
    fn format(&self) -> FileFormat {
        FileFormat::Pdf
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, SinkError> {
        let layout = paginate(&self.blocks, &self.config, &self.metrics);
        log::info!(
            "laid out {} block(s) on {} page(s)",
            self.blocks.len(),
            layout.pages.len()
        );
        render_pdf(&layout).map_err(SinkError::Pdf)
    }
}

// ---------------------------------------------------------------------------
// JSON Lines
// ---------------------------------------------------------------------------

pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DocumentSink for JsonSink<W> {
    fn accept(&mut self, block: Block) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.out, &block)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl DocumentWriter for JsonSink<Vec<u8>> {
    fn format(&self) -> FileFormat {
        FileFormat::Json
    }

    fn finish(self: Box<Self>) -> Result<Vec<u8>, SinkError> {
        Ok(self.out)
    }
}
