//! Parse errors and warnings.
//!
//! Errors abort the whole parse. Warnings describe content that was dropped or
//! degraded to a default; the walk continues past them.

use std::fmt;

use serde::Serialize;
use wt_tree::DocumentError;

use crate::classify::Role;
use crate::component::ComponentKind;

/// Fatal problem in the resource tree.
///
/// Every variant names the offending node by its resolved label.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A component's mandatory link or document is absent.
    #[error("{component} element \"{label}\" is missing required {expected}")]
    MissingRequiredReference {
        label: String,
        component: ComponentKind,
        expected: &'static str,
    },
    /// A structural node lacks a mandatory field (e.g. a page without slug).
    #[error("{role} \"{label}\" is missing required field \"{field}\"")]
    MissingRequiredField {
        label: String,
        role: Role,
        field: &'static str,
    },
    /// A block contains a child its layout does not allow.
    #[error("accordion block \"{block}\" may only contain text elements, found {found} \"{label}\"")]
    StructuralViolation {
        block: String,
        label: String,
        found: String,
    },
    /// The document resolver failed.
    #[error("failed to resolve document for \"{label}\": {source}")]
    Document {
        label: String,
        #[source]
        source: DocumentError,
    },
}

/// Non-fatal finding recorded during the walk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParseWarning {
    /// Element with an unknown or missing component; the element was dropped.
    UnrecognizedComponent { label: String, component: String },
    /// Option value outside its vocabulary; the default was used.
    InvalidOption {
        label: String,
        option: String,
        value: String,
    },
    /// Page or segment dropped because of a page-level field problem.
    DroppedPage { label: String, reason: String },
    /// Sidebar after the first one; ignored.
    ExtraSidebar { label: String },
    /// Sidebar element outside the website root; ignored.
    MisplacedSidebar { label: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedComponent { label, component } if component.is_empty() => {
                write!(f, "element \"{label}\" has no component; skipped")
            }
            Self::UnrecognizedComponent { label, component } => {
                write!(f, "element \"{label}\" has unknown component \"{component}\"; skipped")
            }
            Self::InvalidOption {
                label,
                option,
                value,
            } => write!(
                f,
                "\"{label}\": invalid value \"{value}\" for option \"{option}\"; using default"
            ),
            Self::DroppedPage { label, reason } => write!(f, "\"{label}\" dropped: {reason}"),
            Self::ExtraSidebar { label } => {
                write!(f, "sidebar \"{label}\" ignored; only the first sidebar is used")
            }
            Self::MisplacedSidebar { label } => {
                write!(f, "sidebar \"{label}\" ignored; sidebars belong at the website root")
            }
        }
    }
}
