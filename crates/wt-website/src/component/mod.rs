//! Component dispatch for element nodes.
//!
//! An element's `component` property selects one member of the closed
//! [`ComponentKind`] enumeration. Each kind has one extractor that locates the
//! kind's mandatory references among the node's links (failing with
//! [`ParseError::MissingRequiredReference`]) and overlays authored options onto
//! the kind's defaults. Options are read from the `component` property's
//! subproperties.

mod data;
mod layout;
mod media;

use std::fmt;

use serde::{Deserialize, Serialize};
use wt_tree::{LinkRef, Node, Properties};

use crate::assemble::Walker;
use crate::error::ParseError;

pub use data::{
    Bibliography, BibliographyLayout, Collection, CollectionFilter, CollectionItemVariant,
    CollectionLayout, CollectionVariant, Entries, EntriesVariant, Map, MapBounds,
    PaginationVariant, Query, QueryPrompt, QueryVariant, SearchBar, Table, Timeline,
};
pub use layout::{
    Button, ButtonVariant, EmptySpace, Iframe, NColumns, NRows, Text, TextSize, TextVariant,
    TextVariantName,
};
pub use media::{
    AnnotatedDocument, AnnotatedImage, AudioPlayer, CaptionLayout, CarouselOptions, IiifViewer,
    Image, ImageGallery, ImageQuality, ImageVariant, TextSource, Video, WebImage,
};

/// Reserved label of the component marker.
pub const COMPONENT: &str = "component";

/// Component value reserved for the website sidebar.
pub const SIDEBAR: &str = "sidebar";

/// Closed set of element widget kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    AnnotatedDocument,
    AnnotatedImage,
    AudioPlayer,
    Bibliography,
    Button,
    Collection,
    EmptySpace,
    Entries,
    Iframe,
    IiifViewer,
    Image,
    ImageGallery,
    Map,
    NColumns,
    NRows,
    NetworkGraph,
    Query,
    SearchBar,
    Table,
    Text,
    Timeline,
    Video,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AnnotatedDocument => "annotated-document",
            Self::AnnotatedImage => "annotated-image",
            Self::AudioPlayer => "audio-player",
            Self::Bibliography => "bibliography",
            Self::Button => "button",
            Self::Collection => "collection",
            Self::EmptySpace => "empty-space",
            Self::Entries => "entries",
            Self::Iframe => "iframe",
            Self::IiifViewer => "iiif-viewer",
            Self::Image => "image",
            Self::ImageGallery => "image-gallery",
            Self::Map => "map",
            Self::NColumns => "n-columns",
            Self::NRows => "n-rows",
            Self::NetworkGraph => "network-graph",
            Self::Query => "query",
            Self::SearchBar => "search-bar",
            Self::Table => "table",
            Self::Text => "text",
            Self::Timeline => "timeline",
            Self::Video => "video",
        }
    }

    /// Parse a component marker value.
    pub fn parse(value: &str) -> Option<Self> {
        crate::assemble::parse_choice(value)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of an element, tagged by `component`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "component", rename_all = "kebab-case")]
pub enum ElementComponent {
    AnnotatedDocument(AnnotatedDocument),
    AnnotatedImage(AnnotatedImage),
    AudioPlayer(AudioPlayer),
    Bibliography(Bibliography),
    Button(Button),
    Collection(Collection),
    EmptySpace(EmptySpace),
    Entries(Entries),
    Iframe(Iframe),
    IiifViewer(IiifViewer),
    Image(Image),
    ImageGallery(ImageGallery),
    Map(Map),
    NColumns(NColumns),
    NRows(NRows),
    /// Placeholder; carries no data.
    NetworkGraph,
    Query(Query),
    SearchBar(SearchBar),
    Table(Table),
    Text(Text),
    Timeline(Timeline),
    Video(Video),
}

/// Everything an extractor reads.
pub(crate) struct ElementInput<'a> {
    pub node: &'a Node,
    /// Resolved display label, used in errors and warnings.
    pub label: &'a str,
    pub kind: ComponentKind,
    /// Subproperties of the `component` property.
    pub options: Properties<'a>,
}

impl<'a> ElementInput<'a> {
    pub fn missing(&self, expected: &'static str) -> ParseError {
        ParseError::MissingRequiredReference {
            label: self.label.to_owned(),
            component: self.kind,
            expected,
        }
    }

    /// First link satisfying `accept`, or a missing-reference error.
    pub fn require_link(
        &self,
        expected: &'static str,
        accept: impl Fn(&LinkRef) -> bool,
    ) -> Result<&'a LinkRef, ParseError> {
        self.node
            .links
            .iter()
            .find(|&link| accept(link))
            .ok_or_else(|| self.missing(expected))
    }

    /// First link in any of `categories`.
    pub fn require_category(
        &self,
        expected: &'static str,
        categories: &[&str],
    ) -> Result<&'a LinkRef, ParseError> {
        self.require_link(expected, |link| categories.contains(&link.category.as_str()))
    }
}

/// Run the extractor registered for `input.kind`.
pub(crate) fn dispatch(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<ElementComponent, ParseError> {
    use ComponentKind as K;
    use ElementComponent as C;

    Ok(match input.kind {
        K::AnnotatedDocument => C::AnnotatedDocument(media::annotated_document(walker, input)?),
        K::AnnotatedImage => C::AnnotatedImage(media::annotated_image(walker, input)?),
        K::AudioPlayer => C::AudioPlayer(media::audio_player(walker, input)?),
        K::Bibliography => C::Bibliography(data::bibliography(walker, input)?),
        K::Button => C::Button(layout::button(walker, input)?),
        K::Collection => C::Collection(data::collection(walker, input)?),
        K::EmptySpace => C::EmptySpace(layout::empty_space(input)),
        K::Entries => C::Entries(data::entries(walker, input)?),
        K::Iframe => C::Iframe(layout::iframe(input)?),
        K::IiifViewer => C::IiifViewer(media::iiif_viewer(walker, input)?),
        K::Image => C::Image(media::image(walker, input)?),
        K::ImageGallery => C::ImageGallery(media::image_gallery(walker, input)?),
        K::Map => C::Map(data::map(walker, input)?),
        K::NColumns => C::NColumns(NColumns {
            columns: walker.child_elements(input.node)?,
        }),
        K::NRows => C::NRows(NRows {
            rows: walker.child_elements(input.node)?,
        }),
        K::NetworkGraph => C::NetworkGraph,
        K::Query => C::Query(data::query(walker, input)?),
        K::SearchBar => C::SearchBar(data::search_bar(walker, input)),
        K::Table => C::Table(data::table(input)?),
        K::Text => C::Text(layout::text(walker, input)?),
        K::Timeline => C::Timeline(data::timeline(input)?),
        K::Video => C::Video(media::video(walker, input)?),
    })
}
