//! Render output – the abstract, ordered units a document sink lays out.

use serde::Serialize;

/// Marker appended to the chosen option of a select field.
pub const SELECTED_MARKER: &str = "(selected)";

/// How a block should look. Sinks decide what each style means concretely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Section title: larger and bold.
    Heading,
    /// Captions: bold.
    Emphasized,
    Plain,
    /// Answers and the selected option: filled background.
    Highlighted,
}

/// One unit of output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    Heading { text: String },
    Emphasized { text: String },
    Plain { text: String },
    Highlighted { text: String },
    /// One option of a select field, shown as a bullet.
    Option { text: String, selected: bool },
}

impl Block {
    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading { text: text.into() }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Block::Emphasized { text: text.into() }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Block::Plain { text: text.into() }
    }

    pub fn highlighted(text: impl Into<String>) -> Self {
        Block::Highlighted { text: text.into() }
    }

    pub fn option(text: impl Into<String>, selected: bool) -> Self {
        Block::Option {
            text: text.into(),
            selected,
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Block::Heading { .. } => Style::Heading,
            Block::Emphasized { .. } => Style::Emphasized,
            Block::Plain { .. } => Style::Plain,
            Block::Highlighted { .. } => Style::Highlighted,
            Block::Option { selected: true, .. } => Style::Highlighted,
            Block::Option { selected: false, .. } => Style::Plain,
        }
    }

    /// Text as it appears on the page, bullet and marker included.
    pub fn line(&self) -> String {
        match self {
            Block::Heading { text }
            | Block::Emphasized { text }
            | Block::Plain { text }
            | Block::Highlighted { text } => text.clone(),
            Block::Option {
                text,
                selected: true,
            } => format!("- {text} {SELECTED_MARKER}"),
            Block::Option {
                text,
                selected: false,
            } => format!("- {text}"),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Block::Option { selected: true, .. })
    }
}
