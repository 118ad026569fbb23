//! Website document model.
//!
//! Output of the interpreter. Every type serializes to camelCase JSON for the
//! rendering layer; the tree is rebuilt on every parse and never mutated
//! afterwards.

use serde::{Deserialize, Serialize};
use wt_tree::License;

use crate::component::ElementComponent;

/// One CSS declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Style {
    pub label: String,
    pub value: String,
}

/// Style declarations per responsive tier.
///
/// Tiers are independent: a missing tablet or mobile list is empty, never a
/// copy of the default list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResponsiveStyles {
    pub default: Vec<Style>,
    pub tablet: Vec<Style>,
    pub mobile: Vec<Style>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleVariant {
    #[default]
    Default,
    Simple,
}

/// Which parts of a title are shown.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleVisibility {
    pub is_name_displayed: bool,
    pub is_description_displayed: bool,
    pub is_date_displayed: bool,
    pub is_creators_displayed: bool,
    pub is_count_displayed: bool,
}

/// Title of an element or block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WebTitle {
    pub label: String,
    pub variant: TitleVariant,
    pub properties: TitleVisibility,
}

/// A leaf widget.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebElement {
    pub uuid: String,
    pub title: WebTitle,
    pub css_styles: ResponsiveStyles,
    #[serde(flatten)]
    pub component: ElementComponent,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockLayout {
    #[default]
    Vertical,
    Horizontal,
    Grid,
    VerticalFlex,
    HorizontalFlex,
    Accordion,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    #[default]
    Start,
    Center,
    End,
    Stretch,
    Baseline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    #[default]
    Stretch,
}

/// Accordion behavior, present only for accordion blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionOptions {
    pub is_accordion_enabled: bool,
    pub is_accordion_expanded_by_default: bool,
    pub is_accordion_sidebar_displayed: bool,
}

impl Default for AccordionOptions {
    fn default() -> Self {
        Self {
            is_accordion_enabled: true,
            is_accordion_expanded_by_default: true,
            is_accordion_sidebar_displayed: false,
        }
    }
}

/// Complete layout of the default tier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockLayoutOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    pub align_items: AlignItems,
    pub justify_content: JustifyContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accordion: Option<AccordionOptions>,
}

/// Partial layout of the tablet or mobile tier.
///
/// Unset fields inherit from the default tier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockLayoutOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<BlockLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BlockProperties {
    pub default: BlockLayoutOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablet: Option<BlockLayoutOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<BlockLayoutOverride>,
}

/// Child of a block.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockItem {
    Element(WebElement),
    Block(WebBlock),
}

/// Layout container of elements and nested blocks.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebBlock {
    pub uuid: String,
    pub title: WebTitle,
    pub layout: BlockLayout,
    pub items: Vec<BlockItem>,
    pub properties: BlockProperties,
    pub css_styles: ResponsiveStyles,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageWidth {
    #[default]
    Default,
    Full,
    Large,
    Narrow,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageVariant {
    #[default]
    Default,
    NoBackground,
}

/// Page layout and visibility options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebpageProperties {
    pub width: PageWidth,
    pub variant: PageVariant,
    pub is_sidebar_displayed: bool,
    pub is_breadcrumbs_displayed: bool,
    pub is_header_displayed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image_uuid: Option<String>,
}

impl Default for WebpageProperties {
    fn default() -> Self {
        Self {
            width: PageWidth::Default,
            variant: PageVariant::Default,
            is_sidebar_displayed: true,
            is_breadcrumbs_displayed: false,
            is_header_displayed: true,
            background_image_uuid: None,
        }
    }
}

/// Same-level content of a page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageItem {
    Element(WebElement),
    Block(WebBlock),
    Segment(WebSegment),
}

/// A routable page.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Webpage {
    pub uuid: String,
    /// Full path without leading slash (e.g. "about/team").
    pub slug: String,
    pub title: String,
    pub items: Vec<PageItem>,
    pub webpages: Vec<Webpage>,
    pub properties: WebpageProperties,
    pub css_styles: ResponsiveStyles,
}

/// Navigation group of segment items.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WebSegment {
    pub uuid: String,
    pub title: String,
    pub slug: String,
    pub items: Vec<WebSegmentItem>,
}

/// Child of a segment item.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SegmentItemChild {
    Page(Webpage),
    Segment(WebSegment),
}

/// Entry of a segment; holds pages and nested segments.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WebSegmentItem {
    pub uuid: String,
    pub title: String,
    pub slug: String,
    pub items: Vec<SegmentItemChild>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarLayout {
    #[default]
    Start,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarMobileLayout {
    #[default]
    Default,
    Inline,
}

/// Site-wide sidebar.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidebar {
    pub uuid: String,
    pub title: WebTitle,
    pub items: Vec<WebElement>,
    pub layout: SidebarLayout,
    pub mobile_layout: SidebarMobileLayout,
    pub css_styles: ResponsiveStyles,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WebsiteIdentification {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Creator {
    pub uuid: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WebsiteType {
    #[default]
    Traditional,
    DigitalCollection,
    Plum,
    Cedar,
    Elm,
    Maple,
    Oak,
    Palm,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WebsiteStatus {
    #[default]
    Development,
    Preview,
    Production,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WebsitePrivacy {
    #[default]
    Public,
    Password,
    Private,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    pub default_theme: Theme,
    pub is_theme_toggle_displayed: bool,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            default_theme: Theme::System,
            is_theme_toggle_displayed: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_touch_icon_uuid: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavbarVariant {
    #[default]
    Default,
    Floating,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavbarAlignment {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarOptions {
    pub is_displayed: bool,
    pub variant: NavbarVariant,
    pub alignment: NavbarAlignment,
    pub is_project_displayed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_bar_bound_element_uuid: Option<String>,
}

impl Default for NavbarOptions {
    fn default() -> Self {
        Self {
            is_displayed: true,
            variant: NavbarVariant::Default,
            alignment: NavbarAlignment::Start,
            is_project_displayed: true,
            search_bar_bound_element_uuid: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterOptions {
    pub is_displayed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_uuid: Option<String>,
}

impl Default for FooterOptions {
    fn default() -> Self {
        Self {
            is_displayed: true,
            logo_uuid: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IiifViewerKind {
    #[default]
    UniversalViewer,
    Clover,
}

/// Display toggles for generated item pages.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPageOptions {
    pub is_main_content_displayed: bool,
    pub is_description_displayed: bool,
    pub is_documents_displayed: bool,
    pub is_notes_displayed: bool,
    pub is_events_displayed: bool,
    pub is_periods_displayed: bool,
    pub is_properties_displayed: bool,
    pub is_bibliography_displayed: bool,
    pub is_property_values_grouped: bool,
    pub iiif_viewer: IiifViewerKind,
}

impl Default for ItemPageOptions {
    fn default() -> Self {
        Self {
            is_main_content_displayed: true,
            is_description_displayed: true,
            is_documents_displayed: true,
            is_notes_displayed: true,
            is_events_displayed: false,
            is_periods_displayed: true,
            is_properties_displayed: true,
            is_bibliography_displayed: true,
            is_property_values_grouped: true,
            iiif_viewer: IiifViewerKind::UniversalViewer,
        }
    }
}

/// Named search scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scope {
    pub uuid: String,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextKind {
    Flatten,
    Filter,
    Sort,
    Detail,
    Download,
    Label,
    Prominent,
}

/// One hierarchy level of a context: a variable and optionally a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelContextItem {
    pub variable_uuid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_uuid: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LevelContext {
    pub levels: Vec<LevelContextItem>,
}

/// Level contexts grouped by the kind of filter they drive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LevelContexts {
    pub flatten: Vec<LevelContext>,
    pub filter: Vec<LevelContext>,
    pub sort: Vec<LevelContext>,
    pub detail: Vec<LevelContext>,
    pub download: Vec<LevelContext>,
    pub label: Vec<LevelContext>,
    pub prominent: Vec<LevelContext>,
}

impl LevelContexts {
    pub(crate) fn push(&mut self, kind: ContextKind, context: LevelContext) {
        let bucket = match kind {
            ContextKind::Flatten => &mut self.flatten,
            ContextKind::Filter => &mut self.filter,
            ContextKind::Sort => &mut self.sort,
            ContextKind::Detail => &mut self.detail,
            ContextKind::Download => &mut self.download,
            ContextKind::Label => &mut self.label,
            ContextKind::Prominent => &mut self.prominent,
        };
        bucket.push(context);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WebsiteOptions {
    pub scopes: Vec<Scope>,
    pub contexts: LevelContexts,
}

/// Global website configuration groups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteProperties {
    #[serde(rename = "type")]
    pub website_type: WebsiteType,
    pub status: WebsiteStatus,
    pub privacy: WebsitePrivacy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub theme: ThemeOptions,
    pub icon: IconSet,
    pub navbar: NavbarOptions,
    pub footer: FooterOptions,
    pub item_page: ItemPageOptions,
    pub options: WebsiteOptions,
}

/// Root aggregate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Website {
    pub uuid: String,
    pub identification: WebsiteIdentification,
    pub creators: Vec<Creator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
    pub pages: Vec<Webpage>,
    pub segments: Vec<WebSegment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<Sidebar>,
    pub properties: WebsiteProperties,
}

impl Website {
    /// Find a page anywhere in the tree by its full slug.
    pub fn find_page(&self, slug: &str) -> Option<&Webpage> {
        fn in_pages<'a>(pages: &'a [Webpage], slug: &str) -> Option<&'a Webpage> {
            pages.iter().find_map(|page| {
                if page.slug == slug {
                    Some(page)
                } else {
                    in_pages(&page.webpages, slug).or_else(|| in_items(&page.items, slug))
                }
            })
        }

        fn in_items<'a>(items: &'a [PageItem], slug: &str) -> Option<&'a Webpage> {
            items.iter().find_map(|item| match item {
                PageItem::Segment(segment) => in_segment(segment, slug),
                PageItem::Element(_) | PageItem::Block(_) => None,
            })
        }

        fn in_segment<'a>(segment: &'a WebSegment, slug: &str) -> Option<&'a Webpage> {
            segment.items.iter().find_map(|item| {
                item.items.iter().find_map(|child| match child {
                    SegmentItemChild::Page(page) => in_pages(std::slice::from_ref(page), slug),
                    SegmentItemChild::Segment(nested) => in_segment(nested, slug),
                })
            })
        }

        in_pages(&self.pages, slug).or_else(|| {
            self.segments
                .iter()
                .find_map(|segment| in_segment(segment, slug))
        })
    }
}
