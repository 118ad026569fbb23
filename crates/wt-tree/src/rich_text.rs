//! Rich text labels and documents.
//!
//! Identification labels, abbreviations and inline documents share one loose
//! shape: a plain scalar, a `{content}` wrapper, a `{lang, string}`
//! translation, a list of translations, or arbitrary markup. [`RichText`]
//! models those shapes and [`RichText::resolve`] turns any of them into a
//! single display string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Language picked from multi-language text when none is configured.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Renders embedded markup (links, annotations, formatting runs) to a string.
///
/// Markup rendering lives outside this crate; [`PlainTextRenderer`] is the
/// fallback that keeps only the text.
pub trait TextRenderer: Send + Sync {
    /// Render a markup fragment to a display string.
    fn render(&self, markup: &Value) -> String;
}

/// Renderer that concatenates text fragments in authored order.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextRenderer;

impl TextRenderer for PlainTextRenderer {
    fn render(&self, markup: &Value) -> String {
        let mut out = String::new();
        collect_text(markup, &mut out);
        out
    }
}

fn collect_text(value: &Value, out: &mut String) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Array(items) => items.iter().for_each(|item| collect_text(item, out)),
        Value::Object(map) => {
            for key in ["string", "content", "text"] {
                if let Some(inner) = map.get(key) {
                    collect_text(inner, out);
                    return;
                }
            }
        }
        Value::Null => {}
    }
}

/// One language variant of a multi-language text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// ISO 639-3 language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Text in that language.
    pub string: Box<RichText>,
}

/// Possibly multi-language, possibly marked-up text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    Text(String),
    Number(serde_json::Number),
    Boolean(bool),
    Wrapped { content: Box<RichText> },
    Translation(Translation),
    Translations(Vec<Translation>),
    /// Anything else; only a [`TextRenderer`] knows how to display it.
    Markup(Value),
}

impl Default for RichText {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for RichText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl RichText {
    /// Resolve to a display string in the given language.
    ///
    /// Translations fall back to the first entry when `lang` is absent.
    /// Markup is delegated to `renderer`.
    pub fn resolve(&self, lang: &str, renderer: &dyn TextRenderer) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Wrapped { content } => content.resolve(lang, renderer),
            Self::Translation(t) => t.string.resolve(lang, renderer),
            Self::Translations(list) => list
                .iter()
                .find(|t| t.lang.as_deref() == Some(lang))
                .or_else(|| list.first())
                .map(|t| t.string.resolve(lang, renderer))
                .unwrap_or_default(),
            Self::Markup(value) => renderer.render(value),
        }
    }

    /// Resolve with the default language and plain text rendering.
    pub fn plain_text(&self) -> String {
        self.resolve(DEFAULT_LANGUAGE, &PlainTextRenderer)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> RichText {
        serde_json::from_value(value).unwrap()
    }

    struct Shouting;

    impl TextRenderer for Shouting {
        fn render(&self, markup: &Value) -> String {
            PlainTextRenderer.render(markup).to_uppercase()
        }
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(parse(json!("Home")).plain_text(), "Home");
    }

    #[test]
    fn test_number_and_boolean_stringified() {
        assert_eq!(parse(json!(42)).plain_text(), "42");
        assert_eq!(parse(json!(true)).plain_text(), "true");
    }

    #[test]
    fn test_wrapped_content() {
        assert_eq!(parse(json!({"content": "About"})).plain_text(), "About");
    }

    #[test]
    fn test_translations_pick_language() {
        let text = parse(json!({"content": [
            {"lang": "deu", "string": "Startseite"},
            {"lang": "eng", "string": "Home"}
        ]}));
        assert!(matches!(text, RichText::Wrapped { .. }));
        assert_eq!(text.resolve("eng", &PlainTextRenderer), "Home");
        assert_eq!(text.resolve("deu", &PlainTextRenderer), "Startseite");
    }

    #[test]
    fn test_translations_fall_back_to_first() {
        let text = parse(json!([
            {"lang": "deu", "string": "Startseite"},
            {"lang": "fra", "string": "Accueil"}
        ]));
        assert_eq!(text.resolve("eng", &PlainTextRenderer), "Startseite");
    }

    #[test]
    fn test_empty_translations_resolve_empty() {
        let text = RichText::Translations(Vec::new());
        assert_eq!(text.plain_text(), "");
    }

    #[test]
    fn test_markup_goes_through_renderer() {
        let text = parse(json!({"content": [
            {"lang": "eng", "string": [{"content": "see "}, {"content": "link", "href": "x"}]}
        ]}));
        assert_eq!(text.plain_text(), "see link");
        assert_eq!(text.resolve("eng", &Shouting), "SEE LINK");
    }
}
