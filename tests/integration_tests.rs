//! Integration tests for the form-forge pipeline.
//!
//! These tests validate:
//! - The schema tree matches the source document
//! - Rendered blocks follow the ordering and placeholder rules
//! - PDF and JSON output exist and have a valid format
//! - Files land at the derived output path

use std::fs;
use std::path::PathBuf;

use form_forge::block::Block;
use form_forge::classify::{ElementType, FieldType, FileFormat};
use form_forge::config::CommandOptions;
use form_forge::diagnostics::{count, Ignore, WarningKind};
use form_forge::engine::{render_blocks, MISSING_ANSWER};
use form_forge::error::FormError;
use form_forge::fonts::FontMetrics;
use form_forge::layout_config::LayoutConfig;
use form_forge::pagination::paginate;
use form_forge::reader::ReadError;
use form_forge::submission::ContentSubmission;
use form_forge::tree::{build_tree, ParseError};
use form_forge::{generate, generate_pdf, run, samples, PageOrientation, PipelineConfig};

// =====================================================================
// Helper
// =====================================================================

fn survey_submission() -> ContentSubmission {
    ContentSubmission::from_json(samples::survey_submission().as_bytes()).unwrap()
}

fn assert_valid_pdf(bytes: &[u8]) {
    assert!(bytes.len() > 100, "PDF too small: {} bytes", bytes.len());
    assert_eq!(&bytes[0..5], b"%PDF-", "Missing PDF header");
}

fn options(dir: &tempfile::TempDir, out: Option<PathBuf>, to: FileFormat) -> CommandOptions {
    let file = dir.path().join("survey.xml");
    let submission = dir.path().join("survey.json");
    fs::write(&file, samples::survey_form()).unwrap();
    fs::write(&submission, samples::survey_submission()).unwrap();
    CommandOptions {
        file,
        submission,
        output_dir: out,
        from: FileFormat::Xml,
        to,
        title: None,
        orientation: PageOrientation::Portrait,
    }
}

// =====================================================================
// Tree building
// =====================================================================

#[test]
fn survey_tree_matches_source() {
    let root = build_tree(samples::survey_form().as_bytes(), &mut Ignore).unwrap();
    assert_eq!(root.element_type, ElementType::Form);
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.value, "");

    let field = &root.children[0];
    assert_eq!(field.element_type, ElementType::Field);
    assert_eq!(field.name, "program_language");
    assert_eq!(field.field_type, FieldType::Select);
    assert_eq!(field.metadata["Type"], "Enumeration(A,B,C)");
    assert_eq!(field.metadata["Optional"], "False");
    assert_eq!(field.children.len(), 2);
    assert_eq!(field.value, "");

    let caption = &field.children[0];
    assert_eq!(caption.element_type, ElementType::Caption);
    assert!(caption.metadata.is_empty());
    assert_eq!(caption.value, "Pick your programing language");

    let labels = &field.children[1];
    assert_eq!(labels.element_type, ElementType::Labels);
    assert_eq!(labels.value, "");
    let label_values: Vec<_> = labels.children.iter().map(|l| l.value.as_str()).collect();
    assert_eq!(label_values, vec!["A(+)", "B", "C (All flavors except C#)"]);
    assert!(labels.children.iter().all(|l| l.children.is_empty()));

    let section = &root.children[1];
    assert_eq!(section.element_type, ElementType::Section);
    assert_eq!(section.name, "experience");
    assert_eq!(section.children[0].value, "Regarding your experience");

    let contents = &section.children[1];
    assert_eq!(contents.element_type, ElementType::Contents);
    assert_eq!(contents.value, "");
    assert_eq!(section.value, "");
    let names: Vec<_> = contents.children.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["other", "code_repos"]);
    assert_eq!(contents.children[0].field_type, FieldType::Textbox);
    assert_eq!(contents.children[1].field_type, FieldType::File);
    assert_eq!(
        contents.children[1].children[0].value,
        "Upload your code repo's in ZIP."
    );
}

#[test]
fn attribute_order_does_not_matter() {
    let a = build_tree(
        br#"<field Name="x" FieldType="Select" Optional="True"/>"#,
        &mut Ignore,
    )
    .unwrap();
    let b = build_tree(
        br#"<field Optional="True" FieldType="Select" Name="x"/>"#,
        &mut Ignore,
    )
    .unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_input_builds_nothing() {
    assert!(matches!(
        build_tree(b"", &mut Ignore),
        Err(ParseError::Empty)
    ));
    assert!(matches!(
        generate_pdf("", None),
        Err(FormError::Parse(ParseError::Empty))
    ));
}

#[test]
fn unbalanced_document_is_fatal() {
    let err = generate_pdf("<form><field Name=\"a\" FieldType=\"textbox\">", None).unwrap_err();
    assert!(matches!(
        err,
        FormError::Parse(ParseError::Unbalanced { open: 2, .. })
    ));
}

// =====================================================================
// Rendering
// =====================================================================

#[test]
fn survey_renders_in_document_order() {
    let root = build_tree(samples::survey_form().as_bytes(), &mut Ignore).unwrap();
    let (blocks, warnings) = render_blocks(&root, Some(&survey_submission())).unwrap();

    let lines: Vec<String> = blocks.iter().map(Block::line).collect();
    assert_eq!(
        lines,
        vec![
            "Pick your programing language: B",
            "- A(+)",
            "- B (selected)",
            "- C (All flavors except C#)",
            "Regarding your experience",
            "Other programming experiences",
            "Rust, Python, C++",
            "Upload your code repo's in ZIP.",
            "repo.zip",
        ]
    );
    assert_eq!(blocks.iter().filter(|b| b.is_selected()).count(), 1);
    assert_eq!(blocks[4], Block::heading("Regarding your experience"));
    assert!(warnings.is_empty(), "{warnings:?}");
}

#[test]
fn survey_without_answers_uses_placeholders() {
    let root = build_tree(samples::survey_form().as_bytes(), &mut Ignore).unwrap();
    let (blocks, warnings) = render_blocks(&root, None).unwrap();

    assert_eq!(
        blocks[0],
        Block::emphasized(format!("Pick your programing language: {MISSING_ANSWER}"))
    );
    assert!(blocks.iter().all(|b| !b.is_selected()));
    assert_eq!(
        blocks
            .iter()
            .filter(|b| **b == Block::highlighted(MISSING_ANSWER))
            .count(),
        2
    );
    assert_eq!(count(&warnings, WarningKind::MissingAnswer), 3);
}

#[test]
fn unknown_vocabulary_degrades_gracefully() {
    let mut warnings = Vec::new();
    let root = build_tree(samples::evolving_form().as_bytes(), &mut warnings).unwrap();
    let answers: ContentSubmission = [("comment", "Nice"), ("rating", "5")].into_iter().collect();
    let (blocks, render_warnings) = render_blocks(&root, Some(&answers)).unwrap();

    assert_eq!(
        blocks,
        vec![Block::emphasized("Comments"), Block::highlighted("Nice")]
    );
    assert_eq!(count(&render_warnings, WarningKind::UnknownElement), 2);
    assert_eq!(count(&render_warnings, WarningKind::UnknownFieldType), 1);
}

// =====================================================================
// Document generation
// =====================================================================

#[test]
fn generate_pdf_from_survey() {
    let generated = generate_pdf(samples::survey_form(), Some(&survey_submission())).unwrap();
    assert_valid_pdf(&generated.bytes);
}

#[test]
fn generate_json_lines_from_survey() {
    let generated = generate(
        samples::survey_form().as_bytes(),
        Some(&survey_submission()),
        FileFormat::Xml,
        FileFormat::Json,
        &PipelineConfig::default(),
    )
    .unwrap();
    let text = String::from_utf8(generated.bytes).unwrap();
    let values: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(values.len(), 9);
    assert_eq!(values[2]["kind"], "option");
    assert_eq!(values[2]["selected"], true);
    assert_eq!(values[2]["text"], "B");
}

#[test]
fn long_form_spans_pages() {
    let root = build_tree(samples::multi_page_form().as_bytes(), &mut Ignore).unwrap();
    let (blocks, _) = render_blocks(&root, None).unwrap();
    let layout = paginate(&blocks, &PipelineConfig::default(), &FontMetrics::default());
    assert!(layout.pages.len() > 1, "got {} page(s)", layout.pages.len());

    let json = layout.to_json();
    let parsed = LayoutConfig::from_json(&json).unwrap();
    assert_eq!(parsed.pages.len(), layout.pages.len());

    let generated = generate_pdf(&samples::multi_page_form(), None).unwrap();
    assert_valid_pdf(&generated.bytes);
}

// =====================================================================
// File pipeline
// =====================================================================

#[test]
fn run_writes_into_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let report = run(&options(&dir, Some(out.clone()), FileFormat::Pdf)).unwrap();

    assert_eq!(report.output, out.join("survey.pdf"));
    let bytes = fs::read(&report.output).unwrap();
    assert_valid_pdf(&bytes);
    assert_eq!(report.bytes, bytes.len());
}

#[test]
fn run_defaults_to_schema_directory() {
    let dir = tempfile::tempdir().unwrap();
    let report = run(&options(&dir, None, FileFormat::Json)).unwrap();
    assert_eq!(report.output, dir.path().join("survey.json"));
    assert!(report.output.exists());
}

#[test]
fn run_fails_before_writing_on_bad_submission() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let opts = options(&dir, Some(out.clone()), FileFormat::Pdf);
    fs::write(&opts.submission, "not json").unwrap();

    let err = run(&opts).unwrap_err();
    assert!(matches!(err, FormError::Read(ReadError::Submission { .. })));
    assert!(!out.exists());
}

#[test]
fn run_rejects_unsupported_output() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(&options(&dir, None, FileFormat::Html)).unwrap_err();
    assert!(matches!(err, FormError::UnsupportedOutput(FileFormat::Html)));
}
