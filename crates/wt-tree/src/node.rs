//! Resource tree node types.
//!
//! Mirrors the loose JSON shape of the source format: every collection may be
//! a single item or an array, property lists may or may not be wrapped in a
//! `{ "property": ... }` object, and links are keyed by category.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::one_or_many::{OneOrMany, one_or_many};
use crate::rich_text::RichText;

/// A node of the resource tree.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Stable identifier.
    #[serde(default)]
    pub uuid: String,
    /// Display label and abbreviation.
    #[serde(default)]
    pub identification: Option<Identification>,
    /// Property list, in authored order.
    #[serde(default, deserialize_with = "property_list")]
    pub properties: Vec<PropertyNode>,
    /// Outgoing links, flattened across categories in authored order.
    #[serde(default, deserialize_with = "link_list")]
    pub links: Vec<LinkRef>,
    /// Nested child resources.
    #[serde(default, rename = "resource", deserialize_with = "one_or_many")]
    pub children: Vec<Node>,
    /// Routing slug for pages.
    #[serde(default)]
    pub slug: Option<String>,
    /// Inline document content.
    #[serde(default)]
    pub document: Option<RichText>,
    /// Authors of the resource.
    #[serde(default, deserialize_with = "creator_list")]
    pub creators: Vec<Node>,
    /// License statement.
    #[serde(default)]
    pub license: Option<License>,
}

impl Node {
    /// Resolved display label with the default language (empty when unnamed).
    pub fn label(&self) -> String {
        self.identification
            .as_ref()
            .map(|id| id.label.plain_text())
            .unwrap_or_default()
    }

    /// Links of the given category.
    pub fn links_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a LinkRef> + 'a {
        self.links.iter().filter(move |link| link.category == category)
    }
}

/// Label and optional abbreviation of a node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    #[serde(default)]
    pub label: RichText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<RichText>,
}

/// License statement attached to a resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct License {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// A label/values/subproperties record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PropertyNode {
    pub label: Label,
    #[serde(default, rename = "value", alias = "values", deserialize_with = "one_or_many")]
    pub values: Vec<ValueNode>,
    #[serde(
        default,
        rename = "property",
        alias = "subproperties",
        deserialize_with = "one_or_many"
    )]
    pub subproperties: Vec<PropertyNode>,
}

impl PropertyNode {
    /// First value of the property, typed by its declared data type.
    pub fn first_value(&self) -> Option<ValueContent> {
        self.values.first().and_then(ValueNode::content)
    }

    /// First value rendered as text.
    pub fn first_text(&self) -> Option<String> {
        self.first_value().map(|v| v.to_string())
    }
}

/// Property label: display text plus an optional stable identifier.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawLabel")]
pub struct Label {
    pub uuid: Option<String>,
    pub text: RichText,
}

impl Label {
    /// Resolved label text.
    pub fn resolved(&self) -> String {
        self.text.plain_text()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Identified {
        #[serde(default)]
        uuid: Option<String>,
        content: RichText,
    },
    Plain(RichText),
}

impl From<RawLabel> for Label {
    fn from(raw: RawLabel) -> Self {
        match raw {
            RawLabel::Identified { uuid, content } => Self {
                uuid,
                text: content,
            },
            RawLabel::Plain(text) => Self { uuid: None, text },
        }
    }
}

/// A single property value.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawValue")]
pub struct ValueNode {
    pub content: Option<RichText>,
    pub data_type: Option<String>,
    pub uuid: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    #[serde(rename_all = "camelCase")]
    Typed {
        #[serde(default)]
        content: Option<RichText>,
        #[serde(default, alias = "type")]
        data_type: Option<String>,
        #[serde(default)]
        uuid: Option<String>,
    },
    Bare(RichText),
}

impl From<RawValue> for ValueNode {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Typed {
                content,
                data_type,
                uuid,
            } => Self {
                content,
                data_type,
                uuid,
            },
            RawValue::Bare(content) => Self {
                content: Some(content),
                data_type: None,
                uuid: None,
            },
        }
    }
}

/// Typed value content.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValueContent {
    String(String),
    Number(f64),
    Boolean(bool),
    Uuid(String),
}

impl fmt::Display for ValueContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Uuid(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl ValueContent {
    /// Boolean reading; strings `"true"`/`"false"` are accepted.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Numeric reading; numeric strings are accepted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl ValueNode {
    /// Content typed by the declared data type, falling back to the JSON type.
    pub fn content(&self) -> Option<ValueContent> {
        let declared = self.data_type.as_deref();
        if declared == Some("IDREF") {
            return self
                .uuid
                .clone()
                .or_else(|| self.content.as_ref().map(RichText::plain_text))
                .map(ValueContent::Uuid);
        }

        let content = self.content.as_ref()?;
        let text = content.plain_text();
        let typed = match declared {
            Some("boolean") => text.trim().parse().ok().map(ValueContent::Boolean),
            Some("integer" | "decimal" | "number") => {
                text.trim().parse().ok().map(ValueContent::Number)
            }
            Some(_) => None,
            None => match content {
                RichText::Boolean(b) => Some(ValueContent::Boolean(*b)),
                RichText::Number(n) => n.as_f64().map(ValueContent::Number),
                _ => None,
            },
        };
        Some(typed.unwrap_or(ValueContent::String(text)))
    }
}

/// Pixel dimensions of a linked image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDims {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Reference to another entity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkRef {
    /// Link category (the key it was authored under: `resource`, `set`, ...).
    pub category: String,
    pub uuid: String,
    pub link_type: Option<String>,
    pub file_format: Option<String>,
    pub href: Option<String>,
    pub identification: Option<Identification>,
    pub image: Option<ImageDims>,
    /// Identifiers of bibliographies attached to the linked entity.
    pub bibliographies: Vec<String>,
}

impl LinkRef {
    /// True for IIIF manifests and image services.
    pub fn is_iiif(&self) -> bool {
        self.file_format
            .as_deref()
            .is_some_and(|f| f.to_ascii_lowercase().contains("iiif"))
    }

    /// True for image resources, including IIIF ones.
    pub fn is_image(&self) -> bool {
        self.link_type.as_deref() == Some("image") || self.is_iiif()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLink {
    #[serde(default)]
    uuid: String,
    #[serde(default, rename = "type")]
    link_type: Option<String>,
    #[serde(default)]
    file_format: Option<String>,
    #[serde(default)]
    href: Option<String>,
    #[serde(default)]
    identification: Option<Identification>,
    #[serde(default)]
    image: Option<ImageDims>,
    #[serde(default, deserialize_with = "bibliography_refs")]
    bibliographies: Vec<UuidRef>,
}

#[derive(Deserialize)]
struct UuidRef {
    uuid: String,
}

/// Links keyed by category, one object of the `links` field.
struct LinkGroup(Vec<LinkRef>);

impl<'de> Deserialize<'de> for LinkGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupVisitor;

        impl<'de> Visitor<'de> for GroupVisitor {
            type Value = LinkGroup;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of link categories")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<LinkGroup, A::Error> {
                let mut links = Vec::new();
                while let Some(category) = map.next_key::<String>()? {
                    let raw: Option<OneOrMany<RawLink>> = map.next_value()?;
                    for link in raw.map(Vec::from).unwrap_or_default() {
                        links.push(LinkRef {
                            category: category.clone(),
                            uuid: link.uuid,
                            link_type: link.link_type,
                            file_format: link.file_format,
                            href: link.href,
                            identification: link.identification,
                            image: link.image,
                            bibliographies: link.bibliographies.into_iter().map(|b| b.uuid).collect(),
                        });
                    }
                }
                Ok(LinkGroup(links))
            }
        }

        deserializer.deserialize_map(GroupVisitor)
    }
}

fn link_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<LinkRef>, D::Error> {
    let groups: Vec<LinkGroup> = one_or_many(deserializer)?;
    Ok(groups.into_iter().flat_map(|g| g.0).collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PropertyList {
    Bare(OneOrMany<PropertyNode>),
    Wrapped { property: Option<OneOrMany<PropertyNode>> },
}

fn property_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<PropertyNode>, D::Error> {
    Ok(match Option::<PropertyList>::deserialize(deserializer)? {
        Some(PropertyList::Bare(list)) => list.into(),
        Some(PropertyList::Wrapped { property }) => property.map(Vec::from).unwrap_or_default(),
        None => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreatorList {
    Wrapped { creator: OneOrMany<Node> },
    Bare(OneOrMany<Node>),
}

fn creator_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Node>, D::Error> {
    Ok(match Option::<CreatorList>::deserialize(deserializer)? {
        Some(CreatorList::Wrapped { creator } | CreatorList::Bare(creator)) => creator.into(),
        None => Vec::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BibliographyRefs {
    Wrapped { bibliography: OneOrMany<UuidRef> },
    Bare(OneOrMany<UuidRef>),
}

fn bibliography_refs<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<UuidRef>, D::Error> {
    Ok(match Option::<BibliographyRefs>::deserialize(deserializer)? {
        Some(BibliographyRefs::Wrapped { bibliography } | BibliographyRefs::Bare(bibliography)) => {
            bibliography.into()
        }
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    static_assertions::assert_impl_all!(Node: Send, Sync);

    fn node(value: serde_json::Value) -> Node {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_minimal_node() {
        let n = node(json!({"uuid": "n1"}));
        assert_eq!(n.uuid, "n1");
        assert!(n.properties.is_empty());
        assert!(n.children.is_empty());
        assert_eq!(n.label(), "");
    }

    #[test]
    fn test_wrapped_single_property() {
        let n = node(json!({
            "properties": {"property": {"label": "presentation", "value": "page"}}
        }));
        assert_eq!(n.properties.len(), 1);
        assert_eq!(n.properties[0].label.resolved(), "presentation");
        assert_eq!(n.properties[0].first_text().as_deref(), Some("page"));
    }

    #[test]
    fn test_bare_property_array() {
        let n = node(json!({
            "properties": [
                {"label": "a", "value": "1"},
                {"label": "b", "value": "2"}
            ]
        }));
        let labels: Vec<String> = n.properties.iter().map(|p| p.label.resolved()).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn test_nested_subproperties() {
        let n = node(json!({
            "properties": {"property": {
                "label": {"uuid": "u-pres", "content": "presentation"},
                "value": {"content": "element", "dataType": "string"},
                "property": [{"label": "component", "value": "text"}]
            }}
        }));
        let pres = &n.properties[0];
        assert_eq!(pres.label.uuid.as_deref(), Some("u-pres"));
        assert_eq!(pres.subproperties.len(), 1);
        assert_eq!(pres.subproperties[0].first_text().as_deref(), Some("text"));
    }

    #[test]
    fn test_value_typing() {
        let v: ValueNode =
            serde_json::from_value(json!({"content": "true", "dataType": "boolean"})).unwrap();
        assert_eq!(v.content(), Some(ValueContent::Boolean(true)));

        let v: ValueNode =
            serde_json::from_value(json!({"content": "12.5", "dataType": "decimal"})).unwrap();
        assert_eq!(v.content(), Some(ValueContent::Number(12.5)));

        let v: ValueNode =
            serde_json::from_value(json!({"content": "Logo", "dataType": "IDREF", "uuid": "u1"}))
                .unwrap();
        assert_eq!(v.content(), Some(ValueContent::Uuid("u1".to_owned())));

        let v: ValueNode = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(v.content(), Some(ValueContent::Boolean(false)));

        let v: ValueNode =
            serde_json::from_value(json!({"content": "maybe", "dataType": "boolean"})).unwrap();
        assert_eq!(v.content(), Some(ValueContent::String("maybe".to_owned())));
    }

    #[test]
    fn test_links_flattened_in_order() {
        let n = node(json!({
            "links": {
                "resource": [
                    {"uuid": "img1", "type": "image", "image": {"width": 800, "height": 600}},
                    {"uuid": "doc1", "type": "document"}
                ],
                "set": {"uuid": "set1"}
            }
        }));
        let ids: Vec<(&str, &str)> = n
            .links
            .iter()
            .map(|l| (l.category.as_str(), l.uuid.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![("resource", "img1"), ("resource", "doc1"), ("set", "set1")]
        );
        assert!(n.links[0].is_image());
        assert_eq!(
            n.links[0].image,
            Some(ImageDims {
                width: Some(800),
                height: Some(600)
            })
        );
        assert_eq!(n.links_in("set").count(), 1);
    }

    #[test]
    fn test_link_bibliographies() {
        let n = node(json!({
            "links": {"resource": {"uuid": "r1", "bibliographies": {"bibliography": [{"uuid": "b1"}, {"uuid": "b2"}]}}}
        }));
        assert_eq!(n.links[0].bibliographies, vec!["b1", "b2"]);
    }

    #[test]
    fn test_iiif_link_is_image() {
        let n = node(json!({
            "links": {"resource": {"uuid": "m1", "fileFormat": "application/IIIF"}}
        }));
        assert!(n.links[0].is_iiif());
        assert!(n.links[0].is_image());
    }

    #[test]
    fn test_single_child_and_creators() {
        let n = node(json!({
            "resource": {"uuid": "c1", "identification": {"label": "Child"}},
            "creators": {"creator": {"uuid": "p1", "identification": {"label": "Ada"}}}
        }));
        assert_eq!(n.children.len(), 1);
        assert_eq!(n.children[0].label(), "Child");
        assert_eq!(n.creators[0].label(), "Ada");
    }
}
