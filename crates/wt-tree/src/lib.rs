//! Resource tree input model for Webtree.
//!
//! This crate provides:
//! - [`Node`]: the generic, loosely-typed resource tree node and its parts
//!   ([`PropertyNode`], [`ValueNode`], [`LinkRef`], [`Identification`])
//! - [`RichText`]: possibly multi-language labels and documents, resolved to
//!   display strings through a [`TextRenderer`]
//! - [`Properties`]: label-based lookups over property lists
//! - [`DocumentResolver`]: capability for documents that are not inline
//!
//! Every collection in the source format may be authored as a single item or
//! an array; decoding normalizes both shapes into `Vec`s.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), serde_json::Error> {
//! use wt_tree::{Node, Properties};
//!
//! let node: Node = serde_json::from_str(
//!     r#"{
//!         "uuid": "a1",
//!         "identification": { "label": "Home" },
//!         "properties": { "property": { "label": "presentation", "value": "page" } }
//!     }"#,
//! )?;
//!
//! let props = Properties::new(&node.properties);
//! assert_eq!(props.string("presentation").as_deref(), Some("page"));
//! assert_eq!(node.label(), "Home");
//! # Ok(())
//! # }
//! ```

mod accessors;
mod node;
mod one_or_many;
mod resolver;
mod rich_text;

pub use accessors::{
    LabelMatcher, Properties, bool_by_label, find_all_by_label, find_by_label,
    find_by_label_and_value, number_by_label, string_by_label, value_by_label,
};
pub use node::{
    Identification, ImageDims, Label, License, LinkRef, Node, PropertyNode, ValueContent,
    ValueNode,
};
pub use resolver::{DirDocuments, DocumentError, DocumentResolver, NoDocuments, StaticDocuments};
pub use rich_text::{DEFAULT_LANGUAGE, PlainTextRenderer, RichText, TextRenderer, Translation};
