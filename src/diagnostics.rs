//! Non-fatal diagnostics raised while building and rendering a form.
//!
//! The tree builder and render engine never log directly. They report
//! recoverable problems to an [`Observer`] handed in by the caller, which is
//! usually a plain `Vec<Warning>` that the pipeline forwards to the logger
//! once the run is over.

use std::fmt;

use serde::Serialize;

/// What kind of recoverable problem was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A tag outside the schema vocabulary.
    UnknownElement,
    /// A `<field>` whose `FieldType` is missing or unrecognised.
    UnknownFieldType,
    /// A field without a `<caption>` child.
    MissingCaption,
    /// No submitted answer for a field (store absent, key absent or empty value).
    MissingAnswer,
    /// A select answer that names none of the field's labels.
    UnmatchedSelection,
    /// A `<label>` without a `Name` attribute.
    UnnamedLabel,
    /// Two labels of one select field share a name.
    DuplicateLabel,
    /// Something other than `<label>` inside `<labels>`.
    UnexpectedLabelsChild,
    /// An element repeats an attribute name.
    DuplicateAttribute,
}

/// A recoverable problem, with a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receives warnings as they are raised.
pub trait Observer {
    fn warn(&mut self, warning: Warning);
}

impl Observer for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ignore;

impl Observer for Ignore {
    fn warn(&mut self, _warning: Warning) {}
}

/// Forward collected warnings to the `log` facade.
pub fn log_warnings(warnings: &[Warning]) {
    for w in warnings {
        log::warn!("{w}");
    }
}

/// Count warnings of one kind.
pub fn count(warnings: &[Warning], kind: WarningKind) -> usize {
    warnings.iter().filter(|w| w.kind == kind).count()
}
