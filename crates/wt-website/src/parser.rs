//! Parser entry point and configuration.

use serde::Serialize;
use wt_tree::{
    DEFAULT_LANGUAGE, DocumentResolver, LabelMatcher, NoDocuments, Node, PlainTextRenderer,
    PropertyNode, Properties, RichText, TextRenderer,
};

use crate::assemble::Walker;
use crate::error::{ParseError, ParseWarning};
use crate::model::Website;

/// What to do when a page or segment lacks its routing field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageErrorPolicy {
    /// Drop the page (and its subtree) with a warning.
    #[default]
    Skip,
    /// Abort the whole parse.
    Abort,
}

/// Parsed website plus everything that was dropped or defaulted on the way.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParsedWebsite {
    pub website: Website,
    pub warnings: Vec<ParseWarning>,
}

/// Interprets a resource tree as a [`Website`].
///
/// Stateless between calls: parsing the same tree twice yields equal output.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use wt_tree::Node;
/// use wt_website::WebsiteParser;
///
/// let root: Node = serde_json::from_value(json!({
///     "uuid": "site",
///     "identification": {"label": "Demo"},
///     "resource": {
///         "uuid": "p1",
///         "slug": "home",
///         "identification": {"label": "Home"},
///         "properties": {"property": {"label": "presentation", "value": "page"}}
///     }
/// })).unwrap();
///
/// let parsed = WebsiteParser::new().parse(&root).unwrap();
/// assert_eq!(parsed.website.pages[0].slug, "home");
/// ```
pub struct WebsiteParser {
    language: String,
    matcher: LabelMatcher,
    page_errors: PageErrorPolicy,
    renderer: Box<dyn TextRenderer>,
    resolver: Box<dyn DocumentResolver>,
}

impl Default for WebsiteParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WebsiteParser {
    /// Parser with plain text rendering, no document resolver, and the
    /// default language.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_owned(),
            matcher: LabelMatcher::new(),
            page_errors: PageErrorPolicy::default(),
            renderer: Box::new(PlainTextRenderer),
            resolver: Box::new(NoDocuments),
        }
    }

    /// Language picked from multi-language text.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Stable identifiers for reserved labels.
    #[must_use]
    pub fn with_label_matcher(mut self, matcher: LabelMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub fn with_page_errors(mut self, policy: PageErrorPolicy) -> Self {
        self.page_errors = policy;
        self
    }

    /// Renderer for markup inside labels and documents.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl TextRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Resolver for text elements without an inline document.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl DocumentResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Interpret `root` as a website.
    ///
    /// # Errors
    ///
    /// Returns the first fatal problem found: a missing component reference,
    /// a structural violation, a resolver failure, or (under
    /// [`PageErrorPolicy::Abort`]) a page without its routing field.
    pub fn parse(&self, root: &Node) -> Result<ParsedWebsite, ParseError> {
        let mut walker = Walker::new(self);
        let website = walker.website(root)?;
        Ok(ParsedWebsite {
            website,
            warnings: walker.into_warnings(),
        })
    }

    pub(crate) fn matcher(&self) -> &LabelMatcher {
        &self.matcher
    }

    pub(crate) fn page_errors(&self) -> PageErrorPolicy {
        self.page_errors
    }

    pub(crate) fn resolver(&self) -> &dyn DocumentResolver {
        self.resolver.as_ref()
    }

    pub(crate) fn view<'a>(&'a self, nodes: &'a [PropertyNode]) -> Properties<'a> {
        Properties::with_matcher(nodes, &self.matcher)
    }

    /// Resolve rich text for display.
    pub(crate) fn display(&self, text: &RichText) -> String {
        text.resolve(&self.language, self.renderer.as_ref())
    }

    /// Display label of a node.
    pub(crate) fn label_of(&self, node: &Node) -> String {
        node.identification
            .as_ref()
            .map(|id| self.display(&id.label))
            .unwrap_or_default()
    }
}
