//! Responsive style extraction.

use wt_tree::Properties;

use crate::classify::{Classified, Marker};
use crate::model::{ResponsiveStyles, Style};

/// Collect the three style tiers of a classified node.
///
/// Each tier is read on its own; a missing tier is empty.
pub(crate) fn extract_styles(classified: &Classified<'_>) -> ResponsiveStyles {
    let tier = |marker| {
        classified
            .marker(marker)
            .map(declarations)
            .unwrap_or_default()
    };

    ResponsiveStyles {
        default: tier(Marker::Css),
        tablet: tier(Marker::CssTablet),
        mobile: tier(Marker::CssMobile),
    }
}

fn declarations(tier: Properties<'_>) -> Vec<Style> {
    tier.nodes()
        .iter()
        .filter_map(|prop| {
            Some(Style {
                label: prop.label.resolved(),
                value: prop.first_text()?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wt_tree::{LabelMatcher, Node};

    use super::*;
    use crate::classify::classify;

    fn styles(value: serde_json::Value) -> ResponsiveStyles {
        let node: Node = serde_json::from_value(value).unwrap();
        let matcher = LabelMatcher::new();
        extract_styles(&classify(&node, &matcher).unwrap())
    }

    fn style(label: &str, value: &str) -> Style {
        Style {
            label: label.to_owned(),
            value: value.to_owned(),
        }
    }

    #[test]
    fn test_default_tier_only() {
        let found = styles(json!({
            "properties": {"property": {"label": "presentation", "value": "element", "property": [
                {"label": "presentation", "value": "css", "property": [
                    {"label": "padding", "value": "1rem"},
                    {"label": "z-index", "value": {"content": 3, "dataType": "integer"}}
                ]}
            ]}}
        }));
        assert_eq!(found.default, vec![style("padding", "1rem"), style("z-index", "3")]);
        assert!(found.tablet.is_empty());
        assert!(found.mobile.is_empty());
    }

    #[test]
    fn test_tiers_are_independent() {
        let found = styles(json!({
            "properties": {"property": {"label": "presentation", "value": "block", "property": [
                {"label": "presentation", "value": "css-mobile", "property": [
                    {"label": "margin", "value": "0"}
                ]}
            ]}}
        }));
        assert!(found.default.is_empty());
        assert!(found.tablet.is_empty());
        assert_eq!(found.mobile, vec![style("margin", "0")]);
    }

    #[test]
    fn test_declaration_without_value_skipped() {
        let found = styles(json!({
            "properties": {"property": {"label": "presentation", "value": "element", "property": [
                {"label": "presentation", "value": "css", "property": [
                    {"label": "color"},
                    {"label": "width", "value": "50%"}
                ]}
            ]}}
        }));
        assert_eq!(found.default, vec![style("width", "50%")]);
    }
}
