//! Tree builder: tolerant parse of a hierarchy dump into a [`NodeTree`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;
use tracing::{debug, warn};

use super::NodeTree;
use crate::node::{Attributes, Node, NodeId};

/// Classes treated as transparent when nothing inside them is visible.
pub const DEFAULT_CONTAINER_CLASSES: &[&str] = &[
    "android.widget.FrameLayout",
    "android.widget.LinearLayout",
    "android.widget.RelativeLayout",
    "android.view.ViewGroup",
    "androidx.constraintlayout.widget.ConstraintLayout",
    "androidx.recyclerview.widget.RecyclerView",
    "android.widget.ScrollView",
    "android.widget.HorizontalScrollView",
    "android.widget.ListView",
];

/// Wrapper element of the dump format; carries no node.
const HIERARCHY_TAG: &[u8] = b"hierarchy";

/// Element that carries one node.
const NODE_TAG: &[u8] = b"node";

/// Parse errors tolerated before the rest of the dump is abandoned.
pub const MAX_PARSE_ERRORS: usize = 16;

/// Result of one build: the tree plus what had to be dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub tree: NodeTree,
    /// Markup errors the reader recovered from (or stopped at).
    pub parse_errors: usize,
    /// Elements dropped together with their subtree.
    pub skipped_elements: usize,
}

/// Open element on the builder stack.
#[derive(Debug, Clone, Copy)]
enum Frame {
    Wrapper,
    Node(NodeId),
    Skipped,
}

/// Builds a [`NodeTree`] from a raw hierarchy dump.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    container_classes: Vec<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            container_classes: DEFAULT_CONTAINER_CLASSES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }

    /// Add container classes on top of [`DEFAULT_CONTAINER_CLASSES`].
    pub fn with_container_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for class in classes {
            let class = class.into();
            if !self.container_classes.contains(&class) {
                self.container_classes.push(class);
            }
        }
        self
    }

    pub fn container_classes(&self) -> &[String] {
        &self.container_classes
    }

    /// Parse `dump` into a tree. Never fails: unparseable input yields an
    /// empty tree, malformed elements are dropped with their subtree.
    pub fn build(&self, dump: &str) -> BuildOutcome {
        let mut outcome = BuildOutcome::default();
        let mut stack: Vec<Frame> = Vec::new();

        // quick-xml stops for good after an error, so recovery restarts a
        // fresh reader at the next tag after the failure point.
        let mut resume = 0;
        'fragments: loop {
            let mut reader = Reader::from_str(&dump[resume..]);
            reader.trim_text(true);
            reader.check_end_names(false);

            loop {
                match reader.read_event() {
                    Ok(Event::Start(e)) => {
                        let frame = self.open(&e, &stack, &mut outcome);
                        stack.push(frame);
                    }
                    Ok(Event::Empty(e)) => {
                        if let Frame::Node(id) = self.open(&e, &stack, &mut outcome) {
                            outcome.tree.close(id);
                        }
                    }
                    Ok(Event::End(_)) => {
                        if let Some(Frame::Node(id)) = stack.pop() {
                            outcome.tree.close(id);
                        }
                    }
                    Ok(Event::Eof) => break 'fragments,
                    Err(e) => {
                        let at = resume + reader.buffer_position();
                        warn!("Hierarchy dump parse error at byte {}: {}", at, e);
                        outcome.parse_errors += 1;
                        if outcome.parse_errors >= MAX_PARSE_ERRORS {
                            warn!("Giving up after {} parse errors", outcome.parse_errors);
                            break 'fragments;
                        }
                        match next_tag(dump, at.max(resume + 1)) {
                            Some(next) => {
                                resume = next;
                                continue 'fragments;
                            }
                            None => break 'fragments,
                        }
                    }
                    _ => {}
                }
            }
        }

        // Unclosed elements end where the input ends.
        while let Some(frame) = stack.pop() {
            if let Frame::Node(id) = frame {
                outcome.tree.close(id);
            }
        }

        outcome.tree.finish(&self.container_classes);

        debug!(
            "Built node tree: {} nodes, {} parse errors, {} skipped elements",
            outcome.tree.len(),
            outcome.parse_errors,
            outcome.skipped_elements
        );
        outcome
    }

    /// Convenience wrapper returning only the tree.
    pub fn parse(&self, dump: &str) -> NodeTree {
        self.build(dump).tree
    }

    fn open(&self, e: &BytesStart<'_>, stack: &[Frame], outcome: &mut BuildOutcome) -> Frame {
        match e.name().as_ref() {
            HIERARCHY_TAG => return Frame::Wrapper,
            NODE_TAG => {}
            other => {
                debug!(
                    "Skipping unknown element <{}>",
                    String::from_utf8_lossy(other)
                );
                outcome.skipped_elements += 1;
                return Frame::Skipped;
            }
        }

        let parent = match stack.iter().rev().find(|f| !matches!(f, Frame::Wrapper)) {
            Some(Frame::Node(id)) => Some(*id),
            Some(Frame::Skipped) => {
                outcome.skipped_elements += 1;
                return Frame::Skipped;
            }
            Some(Frame::Wrapper) | None => None,
        };

        if parent.is_none() && !outcome.tree.is_empty() {
            warn!("Dropping extra top-level element; only the first root is kept");
            outcome.skipped_elements += 1;
            return Frame::Skipped;
        }

        let attrs = read_attributes(e, outcome);
        match Node::from_attributes(&attrs) {
            Ok(node) => Frame::Node(outcome.tree.push(node, parent)),
            Err(err) => {
                warn!("Skipping malformed element and its subtree: {}", err);
                outcome.skipped_elements += 1;
                Frame::Skipped
            }
        }
    }
}

/// Byte offset of the first `<` at or after `from`.
fn next_tag(dump: &str, from: usize) -> Option<usize> {
    let bytes = dump.as_bytes();
    let start = from.min(bytes.len());
    bytes[start..]
        .iter()
        .position(|b| *b == b'<')
        .map(|i| start + i)
}

fn read_attributes(e: &BytesStart<'_>, outcome: &mut BuildOutcome) -> Attributes {
    let mut attrs = Attributes::new();
    for attr in e.attributes().with_checks(false) {
        match attr {
            Ok(attr) => {
                let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
                let value = match attr.unescape_value() {
                    Ok(v) => v.to_string(),
                    Err(_) => String::from_utf8_lossy(&attr.value).to_string(),
                };
                attrs.insert(key, Value::String(value));
            }
            Err(err) => {
                debug!("Ignoring malformed attribute: {}", err);
                outcome.parse_errors += 1;
            }
        }
    }
    attrs
}
