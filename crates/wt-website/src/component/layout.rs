//! Text, navigation and spacing widgets.

use serde::{Deserialize, Serialize};

use super::ElementInput;
use crate::assemble::Walker;
use crate::error::{ParseError, ParseWarning};
use crate::model::WebElement;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonVariant {
    #[default]
    Default,
    Transparent,
    Link,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub href: String,
    /// True when the target lies outside the website.
    pub is_external: bool,
    pub variant: ButtonVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_icon: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EmptySpace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Iframe {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NColumns {
    pub columns: Vec<WebElement>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NRows {
    pub rows: Vec<WebElement>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextVariantName {
    #[default]
    Block,
    Paragraph,
    Label,
    Heading,
    Display,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextSize {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextVariant {
    pub name: TextVariantName,
    /// Absent for the `block` variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<TextSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Text {
    pub content: String,
    pub variant: TextVariant,
}

/// Resolve a button target.
///
/// `navigate-to` is an internal route and wins over `link-to`; a `webpage`
/// link with an href is the last resort.
pub(super) fn button(walker: &mut Walker<'_>, input: &ElementInput<'_>) -> Result<Button, ParseError> {
    let opts = input.options;
    let (href, is_external) = if let Some(route) = opts.string("navigate-to") {
        (route, false)
    } else if let Some(url) = opts.string("link-to") {
        (url, true)
    } else {
        let href = input
            .node
            .links_in("webpage")
            .find_map(|link| link.href.clone())
            .ok_or_else(|| input.missing("navigate-to, link-to or webpage link"))?;
        (href, true)
    };

    Ok(Button {
        href,
        is_external,
        variant: walker.choice(opts, "variant", input.label),
        start_icon: opts.string("start-icon"),
        end_icon: opts.string("end-icon"),
    })
}

pub(super) fn empty_space(input: &ElementInput<'_>) -> EmptySpace {
    EmptySpace {
        height: input.options.string("height"),
        width: input.options.string("width"),
    }
}

pub(super) fn iframe(input: &ElementInput<'_>) -> Result<Iframe, ParseError> {
    let href = input
        .options
        .string("link-to")
        .or_else(|| {
            input
                .node
                .links_in("webpage")
                .find_map(|link| link.href.clone())
        })
        .ok_or_else(|| input.missing("link-to or webpage link"))?;

    Ok(Iframe {
        href,
        height: input.options.string("height"),
        width: input.options.string("width"),
    })
}

/// Inline document first, then the document resolver.
pub(super) fn text(walker: &mut Walker<'_>, input: &ElementInput<'_>) -> Result<Text, ParseError> {
    let parser = walker.parser();
    let content = if let Some(document) = &input.node.document {
        parser.display(document)
    } else {
        let resolved = parser
            .resolver()
            .resolve(&input.node.uuid)
            .map_err(|source| ParseError::Document {
                label: input.label.to_owned(),
                source,
            })?;
        let document = resolved.ok_or_else(|| input.missing("inline document"))?;
        parser.display(&document)
    };

    let opts = input.options;
    let name: TextVariantName = walker.choice(opts, "variant", input.label);
    let size = match name {
        TextVariantName::Block => None,
        _ => Some(walker.choice(opts, "size", input.label)),
    };
    let heading_level = walker
        .number(opts, "heading-level", input.label)
        .and_then(|level| checked_heading_level(walker, input, level));

    Ok(Text {
        content,
        variant: TextVariant {
            name,
            size,
            heading_level,
        },
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn checked_heading_level(walker: &mut Walker<'_>, input: &ElementInput<'_>, level: f64) -> Option<u8> {
    if (1.0..=6.0).contains(&level) && level.fract() == 0.0 {
        return Some(level as u8);
    }
    walker.warn(ParseWarning::InvalidOption {
        label: input.label.to_owned(),
        option: "heading-level".to_owned(),
        value: level.to_string(),
    });
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::component::ElementComponent;
    use crate::component::tests::{element, element_with};
    use crate::parser::WebsiteParser;

    fn widget(
        component: &str,
        links: serde_json::Value,
        options: serde_json::Value,
    ) -> serde_json::Value {
        let mut node = json!({
            "uuid": "w",
            "identification": {"label": "Widget"},
            "properties": {"property": {"label": "presentation", "value": "element", "property": [
                {"label": "component", "value": component}
            ]}}
        });
        node["links"] = links;
        node["properties"]["property"]["property"][0]["property"] = options;
        node
    }

    fn button_of(value: serde_json::Value) -> Button {
        match element(value).0.unwrap().component {
            ElementComponent::Button(button) => button,
            other => panic!("expected button, got {other:?}"),
        }
    }

    #[test]
    fn test_button_navigate_to_is_internal() {
        let button = button_of(widget(
            "button",
            json!({}),
            json!([
                {"label": "navigate-to", "value": "/about"},
                {"label": "link-to", "value": "https://example.org"}
            ]),
        ));
        assert_eq!(button.href, "/about");
        assert!(!button.is_external);
    }

    #[test]
    fn test_button_link_to_is_external() {
        let button = button_of(widget(
            "button",
            json!({}),
            json!({"label": "link-to", "value": "https://example.org"}),
        ));
        assert_eq!(button.href, "https://example.org");
        assert!(button.is_external);
        assert_eq!(button.variant, ButtonVariant::Default);
    }

    #[test]
    fn test_button_falls_back_to_webpage_link() {
        let button = button_of(widget(
            "button",
            json!({"webpage": {"uuid": "pg", "href": "https://other.example/page"}}),
            json!({"label": "start-icon", "value": "arrow"}),
        ));
        assert_eq!(button.href, "https://other.example/page");
        assert!(button.is_external);
        assert_eq!(button.start_icon.as_deref(), Some("arrow"));
    }

    #[test]
    fn test_button_without_target_fails() {
        let (found, _) = element(widget("button", json!({}), json!([])));
        assert!(matches!(
            found,
            Err(ParseError::MissingRequiredReference { .. })
        ));
    }

    #[test]
    fn test_text_inline_document() {
        let mut node = widget(
            "text",
            json!({}),
            json!({"label": "variant", "value": "heading"}),
        );
        node["document"] = json!({"content": "Hello"});
        let (found, _) = element(node);
        assert_eq!(
            found.unwrap().component,
            ElementComponent::Text(Text {
                content: "Hello".to_owned(),
                variant: TextVariant {
                    name: TextVariantName::Heading,
                    size: Some(TextSize::Md),
                    heading_level: None,
                },
            })
        );
    }

    #[test]
    fn test_text_block_variant_has_no_size() {
        let mut node = widget(
            "text",
            json!({}),
            json!({"label": "size", "value": "lg"}),
        );
        node["document"] = json!("Body");
        let ElementComponent::Text(text) = element(node).0.unwrap().component else {
            panic!("expected text");
        };
        assert_eq!(text.variant.name, TextVariantName::Block);
        assert_eq!(text.variant.size, None);
    }

    #[test]
    fn test_text_uses_resolver_when_no_inline_document() {
        let parser = WebsiteParser::new()
            .with_resolver(wt_tree::StaticDocuments::new().with_document("w", "From store"));
        let (found, _) = element_with(&parser, widget("text", json!({}), json!([])));
        let ElementComponent::Text(text) = found.unwrap().component else {
            panic!("expected text");
        };
        assert_eq!(text.content, "From store");
    }

    #[test]
    fn test_text_without_any_document_fails() {
        let (found, _) = element(widget("text", json!({}), json!([])));
        assert!(matches!(
            found,
            Err(ParseError::MissingRequiredReference {
                expected: "inline document",
                ..
            })
        ));
    }

    #[test]
    fn test_heading_level_out_of_range_warns() {
        let mut node = widget(
            "text",
            json!({}),
            json!({"label": "heading-level", "value": {"content": 9, "dataType": "integer"}}),
        );
        node["document"] = json!("Title");
        let (found, warnings) = element(node);
        let ElementComponent::Text(text) = found.unwrap().component else {
            panic!("expected text");
        };
        assert_eq!(text.variant.heading_level, None);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_iframe_href() {
        let (found, _) = element(widget(
            "iframe",
            json!({}),
            json!([
                {"label": "link-to", "value": "https://maps.example"},
                {"label": "height", "value": "400px"}
            ]),
        ));
        assert_eq!(
            found.unwrap().component,
            ElementComponent::Iframe(Iframe {
                href: "https://maps.example".to_owned(),
                height: Some("400px".to_owned()),
                width: None,
            })
        );
    }

    #[test]
    fn test_empty_space_and_network_graph_never_fail() {
        let (found, _) = element(widget("empty-space", json!({}), json!([])));
        assert_eq!(
            found.unwrap().component,
            ElementComponent::EmptySpace(EmptySpace::default())
        );
        let (found, _) = element(widget("network-graph", json!({}), json!([])));
        assert_eq!(found.unwrap().component, ElementComponent::NetworkGraph);
    }
}
