//! Attribute coercion from dump values into typed node fields.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::Node;
use crate::error::NodeError;
use crate::geometry::Rect;

/// Raw attribute map: dump-format strings or already typed values.
pub type Attributes = HashMap<String, Value>;

// Canonical name first, then the aliases used by the dump tools.
const INDEX: &[&str] = &["index"];
const CLASS_NAME: &[&str] = &["classname", "className", "class"];
const RESOURCE_ID: &[&str] = &["resourceId", "resource-id"];
const PACKAGE_NAME: &[&str] = &["packageName", "package"];
const XPATH: &[&str] = &["xpath"];
const DRAWING_ORDER: &[&str] = &["drawingOrder", "drawing-order"];
const TEXT: &[&str] = &["text"];
const CONTENT_DESCRIPTION: &[&str] = &["contentDescription", "content-desc"];
const VISIBLE: &[&str] = &["visible", "visible-to-user"];
const CLICKABLE: &[&str] = &["clickable"];
const LONG_CLICKABLE: &[&str] = &["longClickable", "long-clickable"];
const CHECKABLE: &[&str] = &["checkable"];
const CHECKED: &[&str] = &["checked"];
const ENABLED: &[&str] = &["enabled"];
const FOCUSABLE: &[&str] = &["focusable"];
const FOCUSED: &[&str] = &["focused"];
const IMPORTANT: &[&str] = &["importantForAccessibility", "important-for-accessibility"];
const CLICKABLE_SPAN: &[&str] = &["clickableSpan", "clickable-span"];
const CONTEXT_CLICKABLE: &[&str] = &["contextClickable", "context-clickable"];
const INVALID: &[&str] = &["invalid"];
const NAF: &[&str] = &["naf", "NAF"];
const BOUNDS: &[&str] = &["bounds"];
const ACTIONS: &[&str] = &["a11yActions", "actionList"];
const COVERED: &[&str] = &["covered"];
const IS_AD: &[&str] = &["isAd"];

fn bounds_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\[(-?\d+),(-?\d+)\]\[(-?\d+),(-?\d+)\]$").expect("bounds pattern is valid")
    })
}

/// Parse a `[L,T][R,B]` bounds string.
pub fn parse_bounds(raw: &str) -> Result<Rect, NodeError> {
    let caps = bounds_re()
        .captures(raw.trim())
        .ok_or_else(|| NodeError::InvalidBounds(raw.to_string()))?;

    let mut coords = [0i32; 4];
    for (i, coord) in coords.iter_mut().enumerate() {
        *coord = caps[i + 1]
            .parse::<i32>()
            .map_err(|_| NodeError::InvalidBounds(raw.to_string()))?;
    }
    Ok(Rect::from(coords))
}

/// Split a `-` joined action list; empty tokens are dropped.
pub fn parse_actions(raw: &str) -> BTreeSet<String> {
    raw.split('-')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

struct AttrReader<'a> {
    attrs: &'a Attributes,
}

impl<'a> AttrReader<'a> {
    fn lookup(&self, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
        keys.iter()
            .find_map(|key| self.attrs.get(*key).map(|value| (*key, value)))
            .filter(|(_, value)| !value.is_null())
    }

    fn string(&self, keys: &[&'static str]) -> String {
        match self.lookup(keys) {
            Some((_, Value::String(s))) => s.clone(),
            Some((_, other)) => other.to_string(),
            None => String::new(),
        }
    }

    /// Only a literal `true` (string or JSON bool) is true.
    fn boolean(&self, keys: &[&'static str], default: bool) -> bool {
        match self.lookup(keys) {
            Some((_, Value::Bool(b))) => *b,
            Some((_, Value::String(s))) => s == "true",
            Some(_) => false,
            None => default,
        }
    }

    fn integer(&self, keys: &[&'static str]) -> Result<i64, NodeError> {
        let Some((field, value)) = self.lookup(keys) else {
            return Ok(0);
        };
        let invalid = || NodeError::InvalidInteger {
            field: field.to_string(),
            value: value.to_string(),
        };
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(invalid),
            Value::String(s) if s.trim().is_empty() => Ok(0),
            Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    fn bounds(&self, keys: &[&'static str]) -> Result<Rect, NodeError> {
        match self.lookup(keys) {
            None => Ok(Rect::default()),
            Some((_, Value::String(s))) => parse_bounds(s),
            Some((_, Value::Array(items))) if items.len() == 4 => {
                let mut coords = [0i32; 4];
                for (slot, item) in coords.iter_mut().zip(items) {
                    *slot = item
                        .as_i64()
                        .and_then(|v| i32::try_from(v).ok())
                        .ok_or_else(|| NodeError::InvalidBounds(item.to_string()))?;
                }
                Ok(Rect::from(coords))
            }
            Some((_, other)) => Err(NodeError::InvalidBounds(other.to_string())),
        }
    }

    fn actions(&self, keys: &[&'static str]) -> Result<BTreeSet<String>, NodeError> {
        match self.lookup(keys) {
            None => Ok(BTreeSet::new()),
            Some((_, Value::String(s))) => Ok(parse_actions(s)),
            Some((field, Value::Array(items))) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) if s.trim().is_empty() => None,
                    Value::String(s) => Some(Ok(s.trim().to_string())),
                    Value::Number(n) => Some(Ok(n.to_string())),
                    other => Some(Err(NodeError::InvalidAttribute {
                        field: field.to_string(),
                        message: format!("unexpected action token {}", other),
                    })),
                })
                .collect(),
            Some((field, other)) => Err(NodeError::InvalidAttribute {
                field: field.to_string(),
                message: format!("expected list or string, got {}", other),
            }),
        }
    }
}

impl Node {
    /// Build a node from an attribute map, accepting canonical names and
    /// dump aliases (`class`, `resource-id`, `content-desc`, ...).
    ///
    /// `visible`, `enabled` and `importantForAccessibility` default to true
    /// when absent; every other flag defaults to false.
    pub fn from_attributes(attrs: &Attributes) -> Result<Node, NodeError> {
        let r = AttrReader { attrs };

        Ok(Node {
            index: r.integer(INDEX)?,
            class_name: r.string(CLASS_NAME),
            resource_id: r.string(RESOURCE_ID),
            package_name: r.string(PACKAGE_NAME),
            xpath: r.string(XPATH),
            drawing_order: r.integer(DRAWING_ORDER)?,
            text: r.string(TEXT),
            content_description: r.string(CONTENT_DESCRIPTION),
            visible: r.boolean(VISIBLE, true),
            clickable: r.boolean(CLICKABLE, false),
            long_clickable: r.boolean(LONG_CLICKABLE, false),
            checkable: r.boolean(CHECKABLE, false),
            checked: r.boolean(CHECKED, false),
            enabled: r.boolean(ENABLED, true),
            focusable: r.boolean(FOCUSABLE, false),
            focused: r.boolean(FOCUSED, false),
            important_for_accessibility: r.boolean(IMPORTANT, true),
            clickable_span: r.boolean(CLICKABLE_SPAN, false),
            context_clickable: r.boolean(CONTEXT_CLICKABLE, false),
            invalid: r.boolean(INVALID, false),
            naf: r.boolean(NAF, false),
            bounds: r.bounds(BOUNDS)?,
            a11y_actions: r.actions(ACTIONS)?,
            covered: r.boolean(COVERED, false),
            is_ad: r.boolean(IS_AD, false),
            ..Node::default()
        })
    }

    /// Rebuild a node from its serialized JSON object.
    pub fn from_json(value: &Value) -> Result<Node, NodeError> {
        match value {
            Value::Object(map) => {
                let attrs: Attributes = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                Node::from_attributes(&attrs)
            }
            other => Err(NodeError::InvalidAttribute {
                field: "node".to_string(),
                message: format!("expected object, got {}", other),
            }),
        }
    }
}
