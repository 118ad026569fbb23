//! Website document model interpreter.
//!
//! Reads a resource tree ([`wt_tree::Node`]) whose nodes declare their intent
//! through a reserved `presentation` property and builds a typed [`Website`]:
//! pages and navigation segments made of blocks and elements, where every
//! element renders as one [`ComponentKind`].
//!
//! The walk is synchronous and pure. Problems that make the output wrong
//! abort with a [`ParseError`]; content that can be dropped or defaulted is
//! reported as a [`ParseWarning`] next to the result.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use wt_tree::Node;
//! use wt_website::{ElementComponent, PageItem, WebsiteParser};
//!
//! let root: Node = serde_json::from_value(json!({
//!     "uuid": "site",
//!     "resource": {
//!         "uuid": "p1",
//!         "slug": "home",
//!         "properties": {"property": {"label": "presentation", "value": "page"}},
//!         "resource": {
//!             "uuid": "t1",
//!             "document": "Hello",
//!             "properties": {"property": {"label": "presentation", "value": "element", "property": {
//!                 "label": "component", "value": "text"
//!             }}}
//!         }
//!     }
//! })).unwrap();
//!
//! let parsed = WebsiteParser::new().parse(&root).unwrap();
//! let page = parsed.website.find_page("home").unwrap();
//! let PageItem::Element(element) = &page.items[0] else { unreachable!() };
//! assert!(matches!(&element.component, ElementComponent::Text(text) if text.content == "Hello"));
//! ```

mod assemble;
mod classify;
mod component;
mod error;
mod model;
mod parser;
mod styles;
mod title;
mod website;

pub use classify::{Classified, PRESENTATION, Role, classify};
pub use component::{
    AnnotatedDocument, AnnotatedImage, AudioPlayer, Bibliography, BibliographyLayout, Button,
    ButtonVariant, COMPONENT, CaptionLayout, CarouselOptions, Collection, CollectionFilter,
    CollectionItemVariant, CollectionLayout, CollectionVariant, ComponentKind, ElementComponent,
    EmptySpace, Entries, EntriesVariant, IiifViewer, Iframe, Image, ImageGallery, ImageQuality,
    ImageVariant, Map, MapBounds, NColumns, NRows, PaginationVariant, Query, QueryPrompt,
    QueryVariant, SIDEBAR, SearchBar, Table, Text, TextSize, TextSource, TextVariant,
    TextVariantName, Timeline, Video, WebImage,
};
pub use error::{ParseError, ParseWarning};
pub use model::{
    AccordionOptions, AlignItems, BlockItem, BlockLayout, BlockLayoutOptions, BlockLayoutOverride,
    BlockProperties, ContextKind, Creator, FooterOptions, IconSet, IiifViewerKind,
    ItemPageOptions, JustifyContent, LevelContext, LevelContextItem, LevelContexts,
    NavbarAlignment, NavbarOptions, NavbarVariant, PageItem, PageVariant, PageWidth,
    ResponsiveStyles, Scope, SegmentItemChild, Sidebar, SidebarLayout, SidebarMobileLayout, Style,
    Theme, ThemeOptions, TitleVariant, TitleVisibility, WebBlock, WebElement, WebSegment,
    WebSegmentItem, WebTitle, Webpage, WebpageProperties, Website, WebsiteIdentification,
    WebsiteOptions, WebsitePrivacy, WebsiteProperties, WebsiteStatus, WebsiteType,
};
pub use parser::{PageErrorPolicy, ParsedWebsite, WebsiteParser};
