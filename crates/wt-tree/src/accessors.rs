//! Label-based lookups over property lists.
//!
//! Reserved labels are matched by their resolved text unless a
//! [`LabelMatcher`] knows a stable identifier for the label and the property
//! carries one, in which case the identifiers are compared instead. Resolved
//! text is display-facing and may be translated; identifiers are not.

use std::collections::HashMap;

use crate::node::{Label, PropertyNode, ValueContent, ValueNode};

/// Maps reserved label text to stable label identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelMatcher {
    ids: HashMap<String, String>,
}

impl LabelMatcher {
    /// Create a matcher that compares resolved text only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the stable identifier of a reserved label.
    #[must_use]
    pub fn with_id(mut self, label: impl Into<String>, uuid: impl Into<String>) -> Self {
        self.ids.insert(label.into(), uuid.into());
        self
    }

    /// Check whether a property label denotes the reserved `label`.
    pub fn matches(&self, candidate: &Label, label: &str) -> bool {
        if let (Some(expected), Some(actual)) = (self.ids.get(label), candidate.uuid.as_deref()) {
            return expected == actual;
        }
        candidate.resolved() == label
    }
}

/// Read-only view over one property list.
#[derive(Clone, Copy, Debug)]
pub struct Properties<'a> {
    nodes: &'a [PropertyNode],
    matcher: Option<&'a LabelMatcher>,
}

impl<'a> Properties<'a> {
    /// View matching labels by resolved text.
    pub fn new(nodes: &'a [PropertyNode]) -> Self {
        Self {
            nodes,
            matcher: None,
        }
    }

    /// View matching labels through `matcher`.
    pub fn with_matcher(nodes: &'a [PropertyNode], matcher: &'a LabelMatcher) -> Self {
        Self {
            nodes,
            matcher: Some(matcher),
        }
    }

    /// Same matcher, different list (typically a subtree).
    #[must_use]
    pub fn scoped(&self, nodes: &'a [PropertyNode]) -> Self {
        Self {
            nodes,
            matcher: self.matcher,
        }
    }

    /// Underlying property list.
    pub fn nodes(&self) -> &'a [PropertyNode] {
        self.nodes
    }

    fn is_label(&self, node: &PropertyNode, label: &str) -> bool {
        match self.matcher {
            Some(matcher) => matcher.matches(&node.label, label),
            None => node.label.resolved() == label,
        }
    }

    /// First property with the given label.
    pub fn find(&self, label: &str) -> Option<&'a PropertyNode> {
        self.nodes.iter().find(|node| self.is_label(node, label))
    }

    /// All properties with the given label, in authored order.
    pub fn find_all<'l>(self, label: &'l str) -> impl Iterator<Item = &'a PropertyNode> + 'l
    where
        'a: 'l,
    {
        self.nodes
            .iter()
            .filter(move |node| self.is_label(node, label))
    }

    /// First property with the given label and a value whose text is `value`.
    pub fn find_with_value(&self, label: &str, value: &str) -> Option<&'a PropertyNode> {
        self.nodes.iter().find(|node| {
            self.is_label(node, label)
                && node
                    .values
                    .iter()
                    .filter_map(ValueNode::content)
                    .any(|c| c.to_string() == value)
        })
    }

    /// First value of the first property with the given label.
    pub fn value(&self, label: &str) -> Option<ValueContent> {
        self.find(label)?.first_value()
    }

    /// First value as text.
    pub fn string(&self, label: &str) -> Option<String> {
        self.value(label).map(|v| v.to_string())
    }

    /// First value as a boolean; unparseable values read as `None`.
    pub fn bool(&self, label: &str) -> Option<bool> {
        self.value(label)?.as_bool()
    }

    /// First value as a number; unparseable values read as `None`.
    pub fn number(&self, label: &str) -> Option<f64> {
        self.value(label)?.as_f64()
    }

    /// Subproperties of the first property with the given label.
    pub fn children_of(&self, label: &str) -> Option<Self> {
        self.find(label).map(|node| self.scoped(&node.subproperties))
    }
}

/// First property with the given label.
pub fn find_by_label<'a>(nodes: &'a [PropertyNode], label: &str) -> Option<&'a PropertyNode> {
    Properties::new(nodes).find(label)
}

/// First property with the given label and value.
pub fn find_by_label_and_value<'a>(
    nodes: &'a [PropertyNode],
    label: &str,
    value: &str,
) -> Option<&'a PropertyNode> {
    Properties::new(nodes).find_with_value(label, value)
}

/// First value of the first property with the given label.
pub fn value_by_label(nodes: &[PropertyNode], label: &str) -> Option<ValueContent> {
    Properties::new(nodes).value(label)
}

/// All properties with the given label, in authored order.
pub fn find_all_by_label<'a>(nodes: &'a [PropertyNode], label: &str) -> Vec<&'a PropertyNode> {
    Properties::new(nodes).find_all(label).collect()
}

pub fn string_by_label(nodes: &[PropertyNode], label: &str) -> Option<String> {
    Properties::new(nodes).string(label)
}

pub fn bool_by_label(nodes: &[PropertyNode], label: &str) -> Option<bool> {
    Properties::new(nodes).bool(label)
}

pub fn number_by_label(nodes: &[PropertyNode], label: &str) -> Option<f64> {
    Properties::new(nodes).number(label)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn props(value: serde_json::Value) -> Vec<PropertyNode> {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<PropertyNode> {
        props(json!([
            {"label": "presentation", "value": "css"},
            {"label": {"uuid": "u-pres", "content": "presentation"}, "value": "page",
             "property": [{"label": "width", "value": "full"}]},
            {"label": "is-visible", "value": {"content": "false", "dataType": "boolean"}},
            {"label": "count", "value": {"content": "3", "dataType": "integer"}}
        ]))
    }

    #[test]
    fn test_find_by_label_returns_first() {
        let nodes = sample();
        let found = find_by_label(&nodes, "presentation").unwrap();
        assert_eq!(found.first_text().as_deref(), Some("css"));
    }

    #[test]
    fn test_find_by_label_missing() {
        let nodes = sample();
        assert!(find_by_label(&nodes, "absent").is_none());
        assert!(value_by_label(&nodes, "absent").is_none());
    }

    #[test]
    fn test_find_by_label_and_value() {
        let nodes = sample();
        let found = find_by_label_and_value(&nodes, "presentation", "page").unwrap();
        assert_eq!(found.subproperties.len(), 1);
        assert!(find_by_label_and_value(&nodes, "presentation", "block").is_none());
    }

    #[test]
    fn test_typed_readers() {
        let nodes = sample();
        let view = Properties::new(&nodes);
        assert_eq!(view.bool("is-visible"), Some(false));
        assert_eq!(view.number("count"), Some(3.0));
        assert_eq!(view.string("count").as_deref(), Some("3"));
        assert_eq!(
            view.children_of("presentation")
                .map(|p| p.nodes().len()),
            Some(0)
        );
    }

    #[test]
    fn test_free_readers() {
        let nodes = sample();
        assert_eq!(find_all_by_label(&nodes, "presentation").len(), 2);
        assert_eq!(string_by_label(&nodes, "presentation").as_deref(), Some("css"));
        assert_eq!(bool_by_label(&nodes, "is-visible"), Some(false));
        assert_eq!(number_by_label(&nodes, "count"), Some(3.0));
        assert_eq!(number_by_label(&nodes, "presentation"), None);
    }

    #[test]
    fn test_find_all_keeps_order() {
        let nodes = sample();
        let values: Vec<String> = Properties::new(&nodes)
            .find_all("presentation")
            .filter_map(PropertyNode::first_text)
            .collect();
        assert_eq!(values, vec!["css", "page"]);
    }

    #[test]
    fn test_matcher_prefers_identifier() {
        let nodes = sample();
        let matcher = LabelMatcher::new().with_id("presentation", "u-pres");
        let view = Properties::with_matcher(&nodes, &matcher);
        // The untagged "presentation" property is still matched by text, the
        // tagged one by identifier.
        let values: Vec<String> = view
            .find_all("presentation")
            .filter_map(PropertyNode::first_text)
            .collect();
        assert_eq!(values, vec!["css", "page"]);

        let wrong = LabelMatcher::new().with_id("presentation", "u-other");
        let view = Properties::with_matcher(&nodes, &wrong);
        let values: Vec<String> = view
            .find_all("presentation")
            .filter_map(PropertyNode::first_text)
            .collect();
        assert_eq!(values, vec!["css"]);
    }

    #[test]
    fn test_identifier_match_ignores_translated_text() {
        let nodes = props(json!([
            {"label": {"uuid": "u-pres", "content": "présentation"}, "value": "page"}
        ]));
        let matcher = LabelMatcher::new().with_id("presentation", "u-pres");
        let view = Properties::with_matcher(&nodes, &matcher);
        assert_eq!(view.string("presentation").as_deref(), Some("page"));
        assert!(Properties::new(&nodes).find("presentation").is_none());
    }
}
