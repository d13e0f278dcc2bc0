//! # form-forge – form schema + answers → document
//!
//! This crate renders a tagged-markup form description merged with a flat
//! set of submitted answers. The pipeline stages are:
//!
//! 1. **Read** – schema bytes and JSON answers from disk ([`reader`])
//! 2. **Parse** – markup → [`tree::ContentNode`] tree ([`tree`], [`classify`])
//! 3. **Render** – tree + answers → ordered [`block::Block`]s ([`engine`])
//! 4. **Write** – blocks → PDF or JSON Lines ([`sink`], [`pagination`], [`render`])
//!
//! Recoverable problems never abort a run; they are collected as
//! [`diagnostics::Warning`]s and returned next to the result.

pub mod block;
pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fonts;
pub mod layout_config;
pub mod pagination;
pub mod pipeline;
pub mod reader;
pub mod render;
pub mod samples;
pub mod sink;
pub mod submission;
pub mod tree;

// Re-exports for convenience
pub use engine::{render_blocks, DocumentSink};
pub use error::FormError;
pub use pipeline::{generate, generate_pdf, run, PageOrientation, PipelineConfig};
pub use tree::{build_tree, ContentNode};
