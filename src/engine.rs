//! Render engine – walks a [`ContentNode`] tree, merges in the submitted
//! answers and emits [`Block`]s to a [`DocumentSink`].
//!
//! The walk is pre-order and depth-first. Only sections and fields produce
//! output; every other element just passes through to its children, so
//! fields nested under `<contents>` or unknown wrappers still render.
//!
//! Nothing inside the walk is fatal. A missing caption or answer becomes a
//! placeholder, an unknown field type is skipped, and each of these is
//! reported to the [`Observer`]. The only error is a sink refusing a block.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::block::Block;
use crate::classify::{ElementType, FieldType};
use crate::diagnostics::{Observer, Warning, WarningKind};
use crate::sink::SinkError;
use crate::submission::{lookup, ContentSubmission};
use crate::tree::{ContentNode, FIELD_TYPE_ATTR};

/// Shown in place of a field caption the schema does not provide.
pub const MISSING_CAPTION: &str = "(missing caption)";
/// Shown in place of an answer the submission does not provide.
pub const MISSING_ANSWER: &str = "(missing answer)";

/// Accepts blocks in render order.
pub trait DocumentSink {
    fn accept(&mut self, block: Block) -> Result<(), SinkError>;
}

impl DocumentSink for Vec<Block> {
    fn accept(&mut self, block: Block) -> Result<(), SinkError> {
        self.push(block);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("document sink failed: {0}")]
    SinkWrite(#[from] SinkError),
}

/// Render `root` into `sink`.
///
/// `submission` may be absent; every field then renders as unanswered.
pub fn render<S, O>(
    root: &ContentNode,
    submission: Option<&ContentSubmission>,
    sink: &mut S,
    observer: &mut O,
) -> Result<(), RenderError>
where
    S: DocumentSink + ?Sized,
    O: Observer + ?Sized,
{
    let mut engine = Engine {
        submission,
        sink,
        observer,
    };
    engine.node(root)
}

/// Render `root` into memory and return the blocks and warnings.
pub fn render_blocks(
    root: &ContentNode,
    submission: Option<&ContentSubmission>,
) -> Result<(Vec<Block>, Vec<Warning>), RenderError> {
    let mut blocks = Vec::new();
    let mut warnings = Vec::new();
    render(root, submission, &mut blocks, &mut warnings)?;
    Ok((blocks, warnings))
}

struct Engine<'a, S: ?Sized, O: ?Sized> {
    submission: Option<&'a ContentSubmission>,
    sink: &'a mut S,
    observer: &'a mut O,
}

impl<'a, S, O> Engine<'a, S, O>
where
    S: DocumentSink + ?Sized,
    O: Observer + ?Sized,
{
    fn node(&mut self, node: &ContentNode) -> Result<(), RenderError> {
        match node.element_type {
            ElementType::Form => {}
            ElementType::Section => self.section(node)?,
            ElementType::Field => self.field(node)?,
            // Consumed by their section or field.
            ElementType::Caption
            | ElementType::Labels
            | ElementType::Label
            | ElementType::Title
            | ElementType::Contents => {}
            ElementType::Unknown => self.warn(
                WarningKind::UnknownElement,
                format!("skipping unrecognised element <{}>", node.tag),
            ),
        }

        for child in &node.children {
            self.node(child)?;
        }
        Ok(())
    }

    fn section(&mut self, node: &ContentNode) -> Result<(), RenderError> {
        if let Some(title) = node.first_child(ElementType::Title) {
            self.emit(Block::heading(title.value.as_str()))?;
        }
        Ok(())
    }

    fn field(&mut self, node: &ContentNode) -> Result<(), RenderError> {
        match node.field_type {
            FieldType::Textbox | FieldType::File => self.text_field(node),
            FieldType::Select => self.select_field(node),
            FieldType::Unknown => {
                let declared = node
                    .metadata
                    .get(FIELD_TYPE_ATTR)
                    .map(String::as_str)
                    .unwrap_or("<none>");
                self.warn(
                    WarningKind::UnknownFieldType,
                    format!("skipping field {:?}: unknown FieldType {declared}", node.name),
                );
                Ok(())
            }
        }
    }

    /// Caption in bold, then the answer highlighted underneath.
    fn text_field(&mut self, node: &ContentNode) -> Result<(), RenderError> {
        let caption = self.caption(node);
        let answer = self.answer(node).unwrap_or(MISSING_ANSWER);

        self.emit(Block::emphasized(caption))?;
        self.emit(Block::highlighted(answer))
    }

    /// `caption: answer`, then every option sorted by label name with the
    /// chosen one highlighted.
    fn select_field(&mut self, node: &ContentNode) -> Result<(), RenderError> {
        let caption = self.caption(node);
        let answer = self.answer(node);

        self.emit(Block::emphasized(format!(
            "{caption}: {}",
            answer.unwrap_or(MISSING_ANSWER)
        )))?;

        let labels = self.collect_labels(node);

        if let Some(answer) = answer {
            if !labels.contains_key(answer) {
                self.warn(
                    WarningKind::UnmatchedSelection,
                    format!(
                        "submitted value {answer:?} for field {:?} matches no label",
                        node.name
                    ),
                );
            }
        }

        for (name, text) in labels {
            self.emit(Block::option(text, Some(name) == answer))?;
        }
        Ok(())
    }

    /// Label name → display text for every `<label>` under the field's
    /// `<labels>` children. Later duplicates replace earlier ones.
    fn collect_labels<'n>(&mut self, node: &'n ContentNode) -> BTreeMap<&'n str, &'n str> {
        let mut labels = BTreeMap::new();

        for group in node.children_of(ElementType::Labels) {
            for label in &group.children {
                if label.element_type != ElementType::Label {
                    self.warn(
                        WarningKind::UnexpectedLabelsChild,
                        format!(
                            "skipping <{}> inside the labels of field {:?}",
                            label.tag, node.name
                        ),
                    );
                    continue;
                }
                let Some(name) = label.name_attr() else {
                    self.warn(
                        WarningKind::UnnamedLabel,
                        format!(
                            "skipping label {:?} of field {:?}: no Name",
                            label.value, node.name
                        ),
                    );
                    continue;
                };
                if labels.insert(name, label.value.as_str()).is_some() {
                    self.warn(
                        WarningKind::DuplicateLabel,
                        format!("field {:?} declares label {name:?} twice", node.name),
                    );
                }
            }
        }

        labels
    }

    fn caption<'n>(&mut self, node: &'n ContentNode) -> &'n str {
        match node.first_child(ElementType::Caption) {
            Some(caption) => caption.value.as_str(),
            None => {
                self.warn(
                    WarningKind::MissingCaption,
                    format!("field {:?} has no caption", node.name),
                );
                MISSING_CAPTION
            }
        }
    }

    fn answer(&mut self, node: &ContentNode) -> Option<&'a str> {
        let answer = lookup(self.submission, &node.name);
        if answer.is_none() {
            self.warn(
                WarningKind::MissingAnswer,
                format!("no answer submitted for field {:?}", node.name),
            );
        }
        answer
    }

    fn emit(&mut self, block: Block) -> Result<(), RenderError> {
        log::debug!("emit {:?}: {}", block.style(), block.line());
        self.sink.accept(block)?;
        Ok(())
    }

    fn warn(&mut self, kind: WarningKind, message: String) {
        self.observer.warn(Warning::new(kind, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::count;

    fn caption(text: &str) -> ContentNode {
        ContentNode::new(ElementType::Caption).text(text)
    }

    fn label(name: &str, text: &str) -> ContentNode {
        ContentNode::new(ElementType::Label)
            .attr("Name", name)
            .text(text)
    }

    fn select(name: &str, labels: Vec<ContentNode>) -> ContentNode {
        let mut group = ContentNode::new(ElementType::Labels);
        group.children = labels;
        ContentNode::new(ElementType::Field)
            .attr("Name", name)
            .attr("FieldType", "Select")
            .child(caption("Pick one"))
            .child(group)
    }

    fn textbox(name: &str) -> ContentNode {
        ContentNode::new(ElementType::Field)
            .attr("Name", name)
            .attr("FieldType", "TextBox")
            .child(caption("Tell us more"))
    }

    fn submission(pairs: &[(&str, &str)]) -> ContentSubmission {
        pairs.iter().copied().collect()
    }

    #[test]
    fn select_orders_labels_by_name_and_marks_answer() {
        let form = ContentNode::new(ElementType::Form).child(select(
            "lang",
            vec![label("B", "Beta"), label("A", "Alpha")],
        ));
        let (blocks, warnings) = render_blocks(&form, Some(&submission(&[("lang", "B")]))).unwrap();

        assert_eq!(
            blocks,
            vec![
                Block::emphasized("Pick one: B"),
                Block::option("Alpha", false),
                Block::option("Beta", true),
            ]
        );
        let lines: Vec<_> = blocks.iter().map(Block::line).collect();
        assert_eq!(lines, vec!["Pick one: B", "- Alpha", "- Beta (selected)"]);
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn select_with_unmatched_answer_marks_nothing() {
        let form = select("lang", vec![label("A", "Alpha"), label("B", "Beta")]);
        let (blocks, warnings) = render_blocks(&form, Some(&submission(&[("lang", "Z")]))).unwrap();

        assert_eq!(blocks[0], Block::emphasized("Pick one: Z"));
        assert!(blocks.iter().all(|b| !b.is_selected()));
        assert_eq!(count(&warnings, WarningKind::UnmatchedSelection), 1);
    }

    #[test]
    fn select_without_answer_uses_placeholder() {
        let form = select("lang", vec![label("A", "Alpha")]);
        let (blocks, warnings) = render_blocks(&form, None).unwrap();

        assert_eq!(blocks[0], Block::emphasized("Pick one: (missing answer)"));
        assert_eq!(blocks[1], Block::option("Alpha", false));
        assert_eq!(count(&warnings, WarningKind::MissingAnswer), 1);
        assert_eq!(count(&warnings, WarningKind::UnmatchedSelection), 0);
    }

    #[test]
    fn select_skips_unnamed_labels_and_keeps_last_duplicate() {
        let unnamed = ContentNode::new(ElementType::Label).text("Nameless");
        let form = select(
            "lang",
            vec![
                label("A", "First"),
                unnamed,
                ContentNode::new(ElementType::Caption).text("stray"),
                label("A", "Second"),
            ],
        );
        let (blocks, warnings) = render_blocks(&form, Some(&submission(&[("lang", "A")]))).unwrap();

        assert_eq!(
            blocks,
            vec![
                Block::emphasized("Pick one: A"),
                Block::option("Second", true)
            ]
        );
        assert_eq!(count(&warnings, WarningKind::UnnamedLabel), 1);
        assert_eq!(count(&warnings, WarningKind::DuplicateLabel), 1);
        assert_eq!(count(&warnings, WarningKind::UnexpectedLabelsChild), 1);
    }

    #[test]
    fn textbox_and_file_render_caption_then_answer() {
        let form = ContentNode::new(ElementType::Form)
            .child(textbox("other"))
            .child(
                ContentNode::new(ElementType::Field)
                    .attr("Name", "repo")
                    .attr("FieldType", "File")
                    .child(caption("Upload")),
            );
        let sub = submission(&[("other", "Rust"), ("repo", "repo.zip")]);
        let (blocks, _) = render_blocks(&form, Some(&sub)).unwrap();

        assert_eq!(
            blocks,
            vec![
                Block::emphasized("Tell us more"),
                Block::highlighted("Rust"),
                Block::emphasized("Upload"),
                Block::highlighted("repo.zip"),
            ]
        );
    }

    #[test]
    fn unanswered_variants_render_identically() {
        let form = textbox("other");
        let blank = submission(&[("other", "")]);
        let unrelated = submission(&[("something", "else")]);

        let (none, _) = render_blocks(&form, None).unwrap();
        let (missing, _) = render_blocks(&form, Some(&unrelated)).unwrap();
        let (empty, _) = render_blocks(&form, Some(&blank)).unwrap();

        assert_eq!(
            none,
            vec![
                Block::emphasized("Tell us more"),
                Block::highlighted(MISSING_ANSWER)
            ]
        );
        assert_eq!(none, missing);
        assert_eq!(none, empty);
    }

    #[test]
    fn missing_caption_uses_placeholder() {
        let form = ContentNode::new(ElementType::Field)
            .attr("Name", "x")
            .attr("FieldType", "textbox");
        let (blocks, warnings) = render_blocks(&form, Some(&submission(&[("x", "y")]))).unwrap();

        assert_eq!(blocks[0], Block::emphasized(MISSING_CAPTION));
        assert_eq!(count(&warnings, WarningKind::MissingCaption), 1);
    }

    #[test]
    fn unknown_field_type_is_skipped_and_siblings_render() {
        let bogus = ContentNode::new(ElementType::Field)
            .attr("Name", "b")
            .attr("FieldType", "bogus")
            .child(caption("never shown"));
        let form = ContentNode::new(ElementType::Form)
            .child(bogus)
            .child(textbox("other"));
        let (blocks, warnings) = 
            render_blocks(&form, Some(&submission(&[("other", "x")]))).unwrap();

        assert_eq!(
            blocks,
            vec![Block::emphasized("Tell us more"), Block::highlighted("x")]
        );
        assert_eq!(count(&warnings, WarningKind::UnknownFieldType), 1);
    }

    #[test]
    fn field_without_field_type_is_unknown() {
        let form = ContentNode::new(ElementType::Field).attr("Name", "n");
        let (blocks, warnings) = render_blocks(&form, None).unwrap();
        assert!(blocks.is_empty());
        assert_eq!(count(&warnings, WarningKind::UnknownFieldType), 1);
    }

    #[test]
    fn section_emits_title_before_contents() {
        let section = ContentNode::new(ElementType::Section)
            .child(ContentNode::new(ElementType::Title).text("Experience"))
            .child(ContentNode::new(ElementType::Contents).child(textbox("other")));
        let (blocks, _) = render_blocks(&section, Some(&submission(&[("other", "Go")]))).unwrap();

        assert_eq!(
            blocks,
            vec![
                Block::heading("Experience"),
                Block::emphasized("Tell us more"),
                Block::highlighted("Go"),
            ]
        );
    }

    #[test]
    fn section_without_title_emits_no_heading() {
        let section = ContentNode::new(ElementType::Section);
        let (blocks, _) = render_blocks(&section, None).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn unknown_elements_warn_and_pass_through() {
        let mut wrapper = ContentNode::new(ElementType::Unknown).child(textbox("other"));
        wrapper.tag = "widget".to_string();
        let (blocks, warnings) = render_blocks(&wrapper, None).unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(warnings[0].kind, WarningKind::UnknownElement);
        assert!(warnings[0].message.contains("widget"));
    }

    struct FailingSink {
        accepted: usize,
        limit: usize,
    }

    impl DocumentSink for FailingSink {
        fn accept(&mut self, _block: Block) -> Result<(), SinkError> {
            if self.accepted == self.limit {
                return Err(SinkError::Io(std::io::Error::other("disk full")));
            }
            self.accepted += 1;
            Ok(())
        }
    }

    #[test]
    fn sink_failure_aborts_the_walk() {
        let form = ContentNode::new(ElementType::Form)
            .child(textbox("a"))
            .child(textbox("b"));
        let mut sink = FailingSink {
            accepted: 0,
            limit: 1,
        };
        let mut warnings = Vec::new();
        let err = render(&form, None, &mut sink, &mut warnings).unwrap_err();

        assert!(matches!(err, RenderError::SinkWrite(SinkError::Io(_))));
        assert_eq!(sink.accepted, 1);
    }
}
