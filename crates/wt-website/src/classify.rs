//! Structural role classification.
//!
//! A node's role is not stored anywhere; it is derived from the reserved
//! `presentation` property in the node's top-level property list. This is the
//! only place the derivation happens.

use std::fmt;

use wt_tree::{LabelMatcher, Node, Properties};

/// Reserved label carrying structural and widget intent.
pub const PRESENTATION: &str = "presentation";

/// Structural role of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Page,
    Segment,
    SegmentItem,
    Block,
    Element,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Segment => "segment",
            Self::SegmentItem => "segment-item",
            Self::Block => "block",
            Self::Element => "element",
        }
    }

    fn from_marker(value: &str) -> Option<Self> {
        match value {
            "page" => Some(Self::Page),
            "segment" => Some(Self::Segment),
            "segment-item" => Some(Self::SegmentItem),
            "block" => Some(Self::Block),
            "element" => Some(Self::Element),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation sub-markers consumed inside a node's presentation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Marker {
    Css,
    CssTablet,
    CssMobile,
    Title,
}

impl Marker {
    fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::CssTablet => "css-tablet",
            Self::CssMobile => "css-mobile",
            Self::Title => "title",
        }
    }
}

/// A classified node.
#[derive(Clone, Copy, Debug)]
pub struct Classified<'a> {
    pub role: Role,
    /// The node's whole top-level property list.
    pub node: Properties<'a>,
    /// Subproperties of the structural `presentation` property.
    pub tree: Properties<'a>,
}

impl<'a> Classified<'a> {
    /// Sub-tree under `presentation = <marker>`, looked up in the presentation
    /// tree first and the node's top-level list second.
    pub(crate) fn marker(&self, marker: Marker) -> Option<Properties<'a>> {
        [self.tree, self.node].into_iter().find_map(|scope| {
            scope
                .find_with_value(PRESENTATION, marker.as_str())
                .map(|prop| scope.scoped(&prop.subproperties))
        })
    }
}

/// Classify a node by its first `presentation` property.
///
/// Only that property's first value is inspected. Returns `None` when it is
/// missing or not a structural marker; such nodes are library content that
/// is referenced elsewhere rather than rendered in place.
pub fn classify<'a>(node: &'a Node, matcher: &'a LabelMatcher) -> Option<Classified<'a>> {
    let props = Properties::with_matcher(&node.properties, matcher);
    let prop = props.find(PRESENTATION)?;
    let role = Role::from_marker(&prop.first_text()?)?;
    Some(Classified {
        role,
        node: props,
        tree: props.scoped(&prop.subproperties),
    })
}
