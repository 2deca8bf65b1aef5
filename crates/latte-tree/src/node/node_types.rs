//! Node type definition and derived predicates.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::geometry::Rect;

/// Stable handle of a node: its position in the preorder node list.
pub type NodeId = usize;

/// Accessibility action code equivalent to a click.
pub const ACTION_CLICK: &str = "16";
/// Accessibility action code equivalent to a long click.
pub const ACTION_LONG_CLICK: &str = "32";
/// Accessibility action code equivalent to focusing.
pub const ACTION_FOCUS: &str = "64";

/// One UI element.
///
/// Only `xpath`, `covered` and `is_ad` are written after construction, and
/// only by the annotation passes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    #[serde(skip)]
    pub(crate) id: NodeId,
    #[serde(skip)]
    pub(crate) parent: Option<NodeId>,
    #[serde(skip)]
    pub(crate) children: Vec<NodeId>,
    /// One past the last preorder id of this node's subtree.
    #[serde(skip)]
    pub(crate) subtree_end: NodeId,
    #[serde(skip)]
    pub(crate) has_visible_descendant: bool,
    #[serde(skip)]
    pub(crate) empty_container: bool,

    pub index: i64,
    #[serde(rename = "classname")]
    pub class_name: String,
    pub resource_id: String,
    pub package_name: String,
    pub xpath: String,
    pub drawing_order: i64,

    pub text: String,
    pub content_description: String,

    pub visible: bool,
    pub clickable: bool,
    pub long_clickable: bool,
    pub checkable: bool,
    pub checked: bool,
    pub enabled: bool,
    pub focusable: bool,
    pub focused: bool,
    pub important_for_accessibility: bool,
    pub clickable_span: bool,
    pub context_clickable: bool,
    pub invalid: bool,
    pub naf: bool,

    pub bounds: Rect,
    #[serde(rename = "a11yActions")]
    pub a11y_actions: BTreeSet<String>,

    pub covered: bool,
    pub is_ad: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            id: 0,
            parent: None,
            children: Vec::new(),
            subtree_end: 1,
            has_visible_descendant: false,
            empty_container: false,
            index: 0,
            class_name: String::new(),
            resource_id: String::new(),
            package_name: String::new(),
            xpath: String::new(),
            drawing_order: 0,
            text: String::new(),
            content_description: String::new(),
            visible: true,
            clickable: false,
            long_clickable: false,
            checkable: false,
            checked: false,
            enabled: true,
            focusable: false,
            focused: false,
            important_for_accessibility: true,
            clickable_span: false,
            context_clickable: false,
            invalid: false,
            naf: false,
            bounds: Rect::default(),
            a11y_actions: BTreeSet::new(),
            covered: false,
            is_ad: false,
        }
    }
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn child_ids(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether any node of the raw subtree below is visible with valid bounds.
    pub fn has_visible_descendant(&self) -> bool {
        self.has_visible_descendant
    }

    /// Container class with nothing visible inside it.
    pub fn is_empty_container(&self) -> bool {
        self.empty_container
    }

    /// Signed area of the raw bounds.
    pub fn area(&self) -> i128 {
        self.bounds.area()
    }

    pub fn normalized_bounds(&self) -> Rect {
        self.bounds.normalized()
    }

    pub fn is_valid_bounds(&self) -> bool {
        self.bounds.is_valid()
    }

    pub fn is_out_of_bounds(&self, screen: &Rect) -> bool {
        self.normalized_bounds().is_outside(screen)
    }

    pub fn potentially_data(&self) -> bool {
        !self.text.is_empty() || !self.content_description.is_empty()
    }

    pub fn potentially_function(&self) -> bool {
        self.clickable
            || self.long_clickable
            || self.a11y_actions.contains(ACTION_CLICK)
            || self.a11y_actions.contains(ACTION_LONG_CLICK)
    }

    pub fn practically_invisible(&self) -> bool {
        self.covered || !self.visible || !self.is_valid_bounds() || self.empty_container
    }

    pub fn belongs_to(&self, package: &str) -> bool {
        self.package_name == package
    }

    pub fn has_action(&self, code: &str) -> bool {
        self.a11y_actions.contains(code)
    }

    /// Equality ignoring fields that flicker between otherwise identical
    /// captures: `focused`, `bounds`, `index`, `drawing_order` and
    /// `a11y_actions`.
    pub fn practically_equal(&self, other: &Node) -> bool {
        self.class_name == other.class_name
            && self.resource_id == other.resource_id
            && self.package_name == other.package_name
            && self.xpath == other.xpath
            && self.text == other.text
            && self.content_description == other.content_description
            && self.visible == other.visible
            && self.clickable == other.clickable
            && self.long_clickable == other.long_clickable
            && self.checkable == other.checkable
            && self.checked == other.checked
            && self.enabled == other.enabled
            && self.focusable == other.focusable
            && self.important_for_accessibility == other.important_for_accessibility
            && self.clickable_span == other.clickable_span
            && self.context_clickable == other.context_clickable
            && self.invalid == other.invalid
            && self.naf == other.naf
            && self.covered == other.covered
            && self.is_ad == other.is_ad
    }

    /// Serialized form used by the JSON-lines report.
    pub fn to_json(&self) -> serde_json::Value {
        // Serializing plain strings, bools and integers cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class_name)?;
        if !self.resource_id.is_empty() {
            write!(f, " id={}", self.resource_id)?;
        }
        if !self.text.is_empty() {
            let text: String = self.text.chars().take(40).collect();
            write!(f, " text=\"{}\"", text.replace('\n', " "))?;
        }
        if !self.content_description.is_empty() {
            let desc: String = self.content_description.chars().take(40).collect();
            write!(f, " desc=\"{}\"", desc.replace('\n', " "))?;
        }
        write!(f, " {}", self.bounds)
    }
}
