//! Classifier – maps raw tag, attribute and format names onto closed
//! enumerations.
//!
//! Every function here is total: names outside the vocabulary degrade to the
//! `Unknown` variant instead of failing, so newer schemas keep rendering with
//! older builds. Matching is ASCII case-insensitive.

use std::fmt;

use serde::Serialize;

/// Kind of a schema element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Form,
    Field,
    Caption,
    Labels,
    Label,
    Section,
    Title,
    Contents,
    /// Any tag outside the vocabulary.
    Unknown,
}

/// Answer kind of a `<field>`, read from its `FieldType` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Select,
    Textbox,
    File,
    /// Unrecognised or missing `FieldType`.
    #[default]
    Unknown,
}

/// Input or output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Xml,
    Json,
    Pdf,
    Html,
    Unknown,
}

/// Classify an element tag name.
pub fn classify_element(name: &str) -> ElementType {
    match name.to_ascii_lowercase().as_str() {
        "form" => ElementType::Form,
        "field" => ElementType::Field,
        "caption" => ElementType::Caption,
        "labels" => ElementType::Labels,
        "label" => ElementType::Label,
        "section" => ElementType::Section,
        "title" => ElementType::Title,
        "contents" => ElementType::Contents,
        _ => ElementType::Unknown,
    }
}

/// Classify the value of a `FieldType` attribute.
pub fn classify_field_type(name: &str) -> FieldType {
    match name.to_ascii_lowercase().as_str() {
        "select" => FieldType::Select,
        "textbox" => FieldType::Textbox,
        "file" => FieldType::File,
        _ => FieldType::Unknown,
    }
}

/// Classify a file format name such as `xml` or `PDF`.
pub fn classify_file_format(name: &str) -> FileFormat {
    match name.to_ascii_lowercase().as_str() {
        "xml" => FileFormat::Xml,
        "json" => FileFormat::Json,
        "pdf" => FileFormat::Pdf,
        "html" => FileFormat::Html,
        _ => FileFormat::Unknown,
    }
}

impl ElementType {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Form => "form",
            ElementType::Field => "field",
            ElementType::Caption => "caption",
            ElementType::Labels => "labels",
            ElementType::Label => "label",
            ElementType::Section => "section",
            ElementType::Title => "title",
            ElementType::Contents => "contents",
            ElementType::Unknown => "unknown",
        }
    }
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Select => "select",
            FieldType::Textbox => "textbox",
            FieldType::File => "file",
            FieldType::Unknown => "unknown",
        }
    }
}

impl FileFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            FileFormat::Xml => "xml",
            FileFormat::Json => "json",
            FileFormat::Pdf => "pdf",
            FileFormat::Html => "html",
            FileFormat::Unknown => "unknown",
        }
    }

    /// File extension used for artifacts of this format.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
