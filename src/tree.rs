//! Schema parser – turns form markup into a [`ContentNode`] tree.
//!
//! The tree is schema-agnostic: every element becomes a node whatever its
//! tag, carrying its classified [`ElementType`], the raw attribute map and
//! the text found directly inside it. Tokens come from `quick-xml`'s pull
//! reader and are folded into the tree with an explicit stack of open nodes.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::classify::{classify_element, classify_field_type, ElementType, FieldType};
use crate::diagnostics::{Observer, Warning, WarningKind};

/// Attribute carrying the identity of fields and labels.
pub const NAME_ATTR: &str = "Name";
/// Attribute selecting how a field is rendered.
pub const FIELD_TYPE_ATTR: &str = "FieldType";

// ---------------------------------------------------------------------------
// Tree types
// ---------------------------------------------------------------------------

/// One schema element.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentNode {
    pub element_type: ElementType,
    /// Tag name as written in the source.
    pub tag: String,
    /// Raw attributes; the last occurrence of a repeated name wins.
    pub metadata: HashMap<String, String>,
    /// Trimmed text found directly inside this element, concatenated.
    pub value: String,
    /// Copy of `metadata["Name"]`, or empty.
    pub name: String,
    /// `metadata["FieldType"]` classified; `Unknown` when absent.
    pub field_type: FieldType,
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Create a node with no attributes, text or children.
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            tag: element_type.to_string(),
            metadata: HashMap::new(),
            value: String::new(),
            name: String::new(),
            field_type: FieldType::Unknown,
            children: Vec::new(),
        }
    }

    /// Create a node from its tag and attribute map, lifting `Name` and
    /// `FieldType` into typed fields.
    pub fn from_tag(tag: String, metadata: HashMap<String, String>) -> Self {
        let element_type = classify_element(&tag);
        let name = metadata.get(NAME_ATTR).cloned().unwrap_or_default();
        let field_type = metadata
            .get(FIELD_TYPE_ATTR)
            .map(|t| classify_field_type(t))
            .unwrap_or_default();
        Self {
            element_type,
            tag,
            metadata,
            value: String::new(),
            name,
            field_type,
            children: Vec::new(),
        }
    }

    /// Builder-style helper for tests and programmatic trees.
    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        if key == NAME_ATTR {
            self.name = value.to_string();
        } else if key == FIELD_TYPE_ATTR {
            self.field_type = classify_field_type(value);
        }
        self
    }

    pub fn text(mut self, value: &str) -> Self {
        self.value.push_str(value);
        self
    }

    pub fn child(mut self, child: ContentNode) -> Self {
        self.children.push(child);
        self
    }

    /// First direct child of the given type.
    pub fn first_child(&self, element_type: ElementType) -> Option<&ContentNode> {
        self.children.iter().find(|c| c.element_type == element_type)
    }

    /// Direct children of the given type, in document order.
    pub fn children_of(&self, element_type: ElementType) -> impl Iterator<Item = &ContentNode> {
        self.children
            .iter()
            .filter(move |c| c.element_type == element_type)
    }

    /// `Name` attribute, if the element has one.
    pub fn name_attr(&self) -> Option<&str> {
        self.metadata.get(NAME_ATTR).map(|s| s.as_str())
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ContentNode::node_count).sum::<usize>()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal problems while building the tree. No partial tree survives these.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,

    #[error("malformed markup at byte {position}: {source}")]
    TokenDecode {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("document ended with {open} unclosed element(s), innermost <{innermost}>")]
    Unbalanced { open: usize, innermost: String },

    #[error("document contains no elements")]
    NoRoot,

    #[error("second top-level element at byte {position}")]
    MultipleRoots { position: u64 },
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Parse schema markup into its root node.
///
/// Whitespace around each text fragment is trimmed and non-empty fragments
/// are appended, with no separator, to the innermost open element. Closing
/// tags pop the stack without comparing names. A document that ends with
/// elements still open is rejected with [`ParseError::Unbalanced`].
pub fn build_tree(bytes: &[u8], observer: &mut dyn Observer) -> Result<ContentNode, ParseError> {
    if bytes.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut reader = Reader::from_reader(bytes);
    {
        let config = reader.config_mut();
        config.trim_text(true);
        config.expand_empty_elements = true;
        config.check_end_names = false;
    }

    let mut builder = TreeBuilder::default();
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| ParseError::TokenDecode {
                position: reader.error_position() as u64,
                source,
            })?;
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(start) => {
                let node = open_node(&reader, &start, observer).map_err(|source| {
                    ParseError::TokenDecode { position, source }
                })?;
                builder.open(node, position)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|source| ParseError::TokenDecode { position, source })?;
                builder.text(&text);
            }
            Event::CData(cdata) => {
                let text = reader
                    .decoder()
                    .decode(&cdata)
                    .map_err(|e| ParseError::TokenDecode {
                        position,
                        source: e.into(),
                    })?;
                builder.text(&text);
            }
            Event::End(_) => builder.close(),
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no form content.
            _ => {}
        }
        buf.clear();
    }

    builder.finish()
}

/// Decode a start tag into a fresh node.
fn open_node<R>(
    reader: &Reader<R>,
    start: &BytesStart<'_>,
    observer: &mut dyn Observer,
) -> Result<ContentNode, quick_xml::Error> {
    let decoder = reader.decoder();
    let tag = decoder.decode(start.local_name().as_ref())?.into_owned();

    let mut metadata = HashMap::new();
    for attr in start.attributes().with_checks(false) {
        let attr = attr?;
        let key = decoder.decode(attr.key.local_name().as_ref())?.into_owned();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        if let Some(previous) = metadata.insert(key.clone(), value) {
            observer.warn(Warning::new(
                WarningKind::DuplicateAttribute,
                format!("<{tag}> repeats attribute {key:?}; dropped earlier value {previous:?}"),
            ));
        }
    }

    Ok(ContentNode::from_tag(tag, metadata))
}

/// Stack of open elements. Each node is attached to its parent when it
/// closes, so siblings land in document order.
#[derive(Debug, Default)]
struct TreeBuilder {
    stack: Vec<ContentNode>,
    root: Option<ContentNode>,
}

impl TreeBuilder {
    fn open(&mut self, node: ContentNode, position: u64) -> Result<(), ParseError> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(ParseError::MultipleRoots { position });
        }
        self.stack.push(node);
        Ok(())
    }

    fn text(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        // Text outside the root element has no owner and is dropped.
        if let Some(current) = self.stack.last_mut() {
            current.value.push_str(fragment);
        }
    }

    fn close(&mut self) {
        let Some(node) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root = Some(node),
        }
    }

    fn finish(mut self) -> Result<ContentNode, ParseError> {
        if !self.stack.is_empty() {
            return Err(ParseError::Unbalanced {
                open: self.stack.len(),
                innermost: self.stack.pop().map(|n| n.tag).unwrap_or_default(),
            });
        }
        self.root.ok_or(ParseError::NoRoot)
    }
}
