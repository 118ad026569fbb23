//! Recursive walk from classified nodes to the website model.
//!
//! The [`Walker`] carries the parser configuration and the warnings collected
//! so far. Pages accumulate slugs from their ancestors; blocks enforce the
//! accordion content rule before parsing their children.

use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::de::{DeserializeOwned, IntoDeserializer};
use wt_tree::{Node, Properties, PropertyNode};

use crate::classify::{Classified, Role, classify};
use crate::component::{COMPONENT, ComponentKind, ElementInput, SIDEBAR, dispatch};
use crate::error::{ParseError, ParseWarning};
use crate::model::{
    AccordionOptions, BlockItem, BlockLayout, BlockLayoutOptions, BlockLayoutOverride,
    BlockProperties, PageItem, SegmentItemChild, WebBlock, WebElement, WebSegment, WebSegmentItem,
    Webpage, WebpageProperties,
};
use crate::parser::{PageErrorPolicy, WebsiteParser};
use crate::styles::extract_styles;
use crate::title::patch_title;

/// Parse a kebab-case option value into one of its enum variants.
pub(crate) fn parse_choice<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let de: StrDeserializer<'_, ValueError> = raw.trim().into_deserializer();
    T::deserialize(de).ok()
}

/// Join a parent path and a node's own slug into a full path.
///
/// An empty parent contributes nothing, so a top-level page keeps its own
/// slug unchanged.
pub(crate) fn join_slug(parent: &str, own: &str) -> String {
    let parent = parent.trim_end_matches('/');
    let own = own.trim_matches('/');
    match (parent.is_empty(), own.is_empty()) {
        (true, _) => own.to_owned(),
        (false, true) => parent.to_owned(),
        (false, false) => format!("{parent}/{own}"),
    }
}

/// The `component` property of an element: presentation tree first, then top level.
pub(crate) fn component_property<'a>(classified: &Classified<'a>) -> Option<&'a PropertyNode> {
    classified
        .tree
        .find(COMPONENT)
        .or_else(|| classified.node.find(COMPONENT))
}

pub(crate) struct Walker<'p> {
    parser: &'p WebsiteParser,
    warnings: Vec<ParseWarning>,
}

impl<'p> Walker<'p> {
    pub(crate) fn new(parser: &'p WebsiteParser) -> Self {
        Self {
            parser,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }

    pub(crate) fn parser(&self) -> &'p WebsiteParser {
        self.parser
    }

    pub(crate) fn warn(&mut self, warning: ParseWarning) {
        tracing::warn!(%warning, "Content skipped or defaulted");
        self.warnings.push(warning);
    }

    pub(crate) fn classify<'n>(&self, node: &'n Node) -> Option<Classified<'n>>
    where
        'p: 'n,
    {
        let parser: &'p WebsiteParser = self.parser;
        classify(node, parser.matcher())
    }

    fn invalid_option(&mut self, owner: &str, option: &str, value: String) {
        self.warn(ParseWarning::InvalidOption {
            label: owner.to_owned(),
            option: option.to_owned(),
            value,
        });
    }

    /// Enumerated option, or `None` when unset or invalid (with a warning).
    pub(crate) fn optional_choice<T: DeserializeOwned>(
        &mut self,
        props: Properties<'_>,
        option: &str,
        owner: &str,
    ) -> Option<T> {
        let raw = props.string(option)?;
        let parsed = parse_choice(&raw);
        if parsed.is_none() {
            self.invalid_option(owner, option, raw);
        }
        parsed
    }

    /// Enumerated option falling back to the type's default.
    pub(crate) fn choice<T: DeserializeOwned + Default>(
        &mut self,
        props: Properties<'_>,
        option: &str,
        owner: &str,
    ) -> T {
        self.optional_choice(props, option, owner)
            .unwrap_or_default()
    }

    /// Boolean option falling back to `default`.
    pub(crate) fn flag(
        &mut self,
        props: Properties<'_>,
        option: &str,
        default: bool,
        owner: &str,
    ) -> bool {
        let Some(value) = props.value(option) else {
            return default;
        };
        value.as_bool().unwrap_or_else(|| {
            self.invalid_option(owner, option, value.to_string());
            default
        })
    }

    /// Numeric option; unparseable values warn and read as unset.
    pub(crate) fn number(&mut self, props: Properties<'_>, option: &str, owner: &str) -> Option<f64> {
        let value = props.value(option)?;
        let parsed = value.as_f64();
        if parsed.is_none() {
            self.invalid_option(owner, option, value.to_string());
        }
        parsed
    }

    /// Apply the page-error policy to a missing routing field.
    fn missing_field<T>(
        &mut self,
        role: Role,
        label: String,
        field: &'static str,
    ) -> Result<Option<T>, ParseError> {
        let error = ParseError::MissingRequiredField {
            label: label.clone(),
            role,
            field,
        };
        match self.parser.page_errors() {
            PageErrorPolicy::Abort => Err(error),
            PageErrorPolicy::Skip => {
                self.warn(ParseWarning::DroppedPage {
                    label,
                    reason: error.to_string(),
                });
                Ok(None)
            }
        }
    }

    /// Parse a page and its subtree; `None` when the page was dropped.
    pub(crate) fn page(
        &mut self,
        node: &Node,
        classified: &Classified<'_>,
        parent_path: &str,
    ) -> Result<Option<Webpage>, ParseError> {
        let label = self.parser.label_of(node);
        let Some(own) = node.slug.as_deref() else {
            return self.missing_field(Role::Page, label, "slug");
        };
        let slug = join_slug(parent_path, own);

        let mut items = Vec::new();
        let mut webpages = Vec::new();
        for child in &node.children {
            let Some(inner) = self.classify(child) else {
                tracing::debug!(uuid = %child.uuid, "Skipping unclassified node");
                continue;
            };
            match inner.role {
                Role::Page => webpages.extend(self.page(child, &inner, &slug)?),
                Role::Segment => {
                    items.extend(self.segment(child, &slug)?.map(PageItem::Segment));
                }
                Role::Block => items.push(PageItem::Block(self.block(child, &inner)?)),
                Role::Element => {
                    items.extend(self.element(child, &inner)?.map(PageItem::Element));
                }
                Role::SegmentItem => {
                    tracing::debug!(uuid = %child.uuid, "Skipping segment item outside a segment");
                }
            }
        }

        let tree = classified.tree;
        let properties = WebpageProperties {
            width: self.choice(tree, "width", &label),
            variant: self.choice(tree, "variant", &label),
            is_sidebar_displayed: self.flag(tree, "sidebar-visible", true, &label),
            is_breadcrumbs_displayed: self.flag(tree, "breadcrumbs-visible", false, &label),
            is_header_displayed: self.flag(tree, "header", true, &label),
            background_image_uuid: tree.string("background-image"),
        };

        Ok(Some(Webpage {
            uuid: node.uuid.clone(),
            slug,
            title: label,
            items,
            webpages,
            properties,
            css_styles: extract_styles(classified),
        }))
    }

    fn abbreviation(&self, node: &Node) -> Option<String> {
        node.identification
            .as_ref()?
            .abbreviation
            .as_ref()
            .map(|text| self.parser.display(text))
            .filter(|text| !text.trim().is_empty())
    }

    /// Parse a navigation segment; its slug is the node's abbreviation.
    pub(crate) fn segment(
        &mut self,
        node: &Node,
        parent_path: &str,
    ) -> Result<Option<WebSegment>, ParseError> {
        let label = self.parser.label_of(node);
        let Some(own) = self.abbreviation(node) else {
            return self.missing_field(Role::Segment, label, "abbreviation");
        };
        let slug = join_slug(parent_path, &own);

        let mut items = Vec::new();
        for child in &node.children {
            match self.classify(child) {
                Some(inner) if inner.role == Role::SegmentItem => {
                    items.extend(self.segment_item(child, &slug)?);
                }
                _ => tracing::debug!(uuid = %child.uuid, "Skipping non-item child of segment"),
            }
        }

        Ok(Some(WebSegment {
            uuid: node.uuid.clone(),
            title: label,
            slug,
            items,
        }))
    }

    fn segment_item(
        &mut self,
        node: &Node,
        parent_path: &str,
    ) -> Result<Option<WebSegmentItem>, ParseError> {
        let label = self.parser.label_of(node);
        let Some(own) = self.abbreviation(node) else {
            return self.missing_field(Role::SegmentItem, label, "abbreviation");
        };
        let slug = join_slug(parent_path, &own);

        let mut items = Vec::new();
        for child in &node.children {
            match self.classify(child) {
                Some(inner) if inner.role == Role::Page => {
                    items.extend(self.page(child, &inner, &slug)?.map(SegmentItemChild::Page));
                }
                Some(inner) if inner.role == Role::Segment => {
                    items.extend(
                        self.segment(child, &slug)?
                            .map(SegmentItemChild::Segment),
                    );
                }
                _ => tracing::debug!(uuid = %child.uuid, "Skipping child of segment item"),
            }
        }

        Ok(Some(WebSegmentItem {
            uuid: node.uuid.clone(),
            title: label,
            slug,
            items,
        }))
    }

    /// Parse a block, enforcing the accordion content rule first.
    pub(crate) fn block(
        &mut self,
        node: &Node,
        classified: &Classified<'_>,
    ) -> Result<WebBlock, ParseError> {
        let label = self.parser.label_of(node);
        let tree = classified.tree;
        let layout: BlockLayout = self.choice(tree, "layout", &label);

        if layout == BlockLayout::Accordion {
            self.check_accordion(node, &label)?;
        }

        let accordion = (layout == BlockLayout::Accordion).then(|| AccordionOptions {
            is_accordion_enabled: self.flag(tree, "is-accordion-enabled", true, &label),
            is_accordion_expanded_by_default: self.flag(
                tree,
                "is-accordion-expanded-by-default",
                true,
                &label,
            ),
            is_accordion_sidebar_displayed: self.flag(
                tree,
                "is-accordion-sidebar-displayed",
                false,
                &label,
            ),
        });
        let default = BlockLayoutOptions {
            spacing: tree.string("spacing"),
            gap: tree.string("gap"),
            align_items: self.choice(tree, "align-items", &label),
            justify_content: self.choice(tree, "justify-content", &label),
            accordion,
        };
        let tablet = tree
            .children_of("overwrite-tablet")
            .map(|tier| self.layout_override(tier, &label));
        let mobile = tree
            .children_of("overwrite-mobile")
            .map(|tier| self.layout_override(tier, &label));

        let mut items = Vec::new();
        for child in &node.children {
            let Some(inner) = self.classify(child) else {
                tracing::debug!(uuid = %child.uuid, "Skipping unclassified node");
                continue;
            };
            match inner.role {
                Role::Block => items.push(BlockItem::Block(self.block(child, &inner)?)),
                Role::Element => {
                    items.extend(self.element(child, &inner)?.map(BlockItem::Element));
                }
                Role::Page | Role::Segment | Role::SegmentItem => {
                    tracing::debug!(uuid = %child.uuid, role = %inner.role, "Skipping non-content child of block");
                }
            }
        }

        Ok(WebBlock {
            uuid: node.uuid.clone(),
            title: self.web_title(&label, classified),
            layout,
            items,
            properties: BlockProperties {
                default,
                tablet,
                mobile,
            },
            css_styles: extract_styles(classified),
        })
    }

    fn layout_override(&mut self, tier: Properties<'_>, owner: &str) -> BlockLayoutOverride {
        BlockLayoutOverride {
            layout: self.optional_choice(tier, "layout", owner),
            spacing: tier.string("spacing"),
            gap: tier.string("gap"),
            align_items: self.optional_choice(tier, "align-items", owner),
            justify_content: self.optional_choice(tier, "justify-content", owner),
        }
    }

    /// Every child of an accordion must be a text element.
    fn check_accordion(&self, node: &Node, block: &str) -> Result<(), ParseError> {
        for child in &node.children {
            let found = match self.classify(child) {
                None => Some("unclassified node".to_owned()),
                Some(inner) if inner.role == Role::Element => {
                    let component = component_property(&inner)
                        .and_then(PropertyNode::first_text)
                        .unwrap_or_default();
                    match ComponentKind::parse(&component) {
                        Some(ComponentKind::Text) => None,
                        _ if component.is_empty() => Some("element".to_owned()),
                        _ => Some(format!("{component} element")),
                    }
                }
                Some(inner) => Some(inner.role.to_string()),
            };
            if let Some(found) = found {
                return Err(ParseError::StructuralViolation {
                    block: block.to_owned(),
                    label: self.parser.label_of(child),
                    found,
                });
            }
        }
        Ok(())
    }

    /// Parse an element; `None` when its component is missing or unknown.
    pub(crate) fn element(
        &mut self,
        node: &Node,
        classified: &Classified<'_>,
    ) -> Result<Option<WebElement>, ParseError> {
        let label = self.parser.label_of(node);
        let Some(marker) = component_property(classified) else {
            self.warn(ParseWarning::UnrecognizedComponent {
                label,
                component: String::new(),
            });
            return Ok(None);
        };
        let value = marker.first_text().unwrap_or_default();
        let Some(kind) = ComponentKind::parse(&value) else {
            let warning = if value == SIDEBAR {
                ParseWarning::MisplacedSidebar { label }
            } else {
                ParseWarning::UnrecognizedComponent {
                    label,
                    component: value,
                }
            };
            self.warn(warning);
            return Ok(None);
        };

        let input = ElementInput {
            node,
            label: &label,
            kind,
            options: classified.tree.scoped(&marker.subproperties),
        };
        let component = dispatch(self, &input)?;
        let mut title = self.web_title(&label, classified);
        patch_title(&mut title, &component);

        Ok(Some(WebElement {
            uuid: node.uuid.clone(),
            title,
            css_styles: extract_styles(classified),
            component,
        }))
    }

    /// Direct children parsed strictly as elements; anything else is skipped.
    pub(crate) fn child_elements(&mut self, node: &Node) -> Result<Vec<WebElement>, ParseError> {
        let mut elements = Vec::new();
        for child in &node.children {
            match self.classify(child) {
                Some(inner) if inner.role == Role::Element => {
                    elements.extend(self.element(child, &inner)?);
                }
                _ => tracing::debug!(uuid = %child.uuid, "Skipping non-element child"),
            }
        }
        Ok(elements)
    }
}
