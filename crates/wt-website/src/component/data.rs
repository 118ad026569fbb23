//! Data-driven widgets backed by sets, trees and queries.

use serde::{Deserialize, Serialize};
use wt_tree::ValueNode;

use super::ElementInput;
use crate::assemble::Walker;
use crate::error::{ParseError, ParseWarning};

/// South-west and north-east corners as `[[lat, lon], [lat, lon]]`.
pub type MapBounds = [[f64; 2]; 2];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BibliographyLayout {
    #[default]
    Long,
    Short,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bibliography {
    /// Bibliography entries in link order, without duplicates.
    pub item_uuids: Vec<String>,
    pub layout: BibliographyLayout,
    pub is_source_document_displayed: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionVariant {
    #[default]
    Full,
    Highlights,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionItemVariant {
    #[default]
    Detailed,
    Card,
    Tile,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationVariant {
    #[default]
    Default,
    Numeric,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionLayout {
    ImageTop,
    #[default]
    ImageStart,
}

/// Filter panel toggles of a collection.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionFilter {
    pub is_sidebar_displayed: bool,
    pub is_results_bar_displayed: bool,
    pub is_map_displayed: bool,
    pub is_input_displayed: bool,
    pub is_limited_to_title_query: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub collection_id: String,
    pub variant: CollectionVariant,
    pub item_variant: CollectionItemVariant,
    pub pagination_variant: PaginationVariant,
    pub layout: CollectionLayout,
    pub is_sort_displayed: bool,
    pub is_using_query_params: bool,
    pub filter: CollectionFilter,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntriesVariant {
    #[default]
    Entry,
    Item,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entries {
    pub entries_id: String,
    pub variant: EntriesVariant,
    pub is_filter_input_displayed: bool,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Map {
    pub map_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_basemap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_bounds: Option<MapBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_bounds: Option<MapBounds>,
    pub is_interactive: bool,
    pub is_clustered: bool,
    pub is_using_pins: bool,
    pub is_controls_displayed: bool,
    pub is_full_height: bool,
}

/// One prompt of a query widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPrompt {
    pub label: String,
    pub property_uuids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_icon: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Query {
    pub items: Vec<QueryPrompt>,
}

/// When a search bar submits its query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryVariant {
    #[default]
    Submit,
    Change,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBar {
    pub query_variant: QueryVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_element_uuid: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub timeline_id: String,
}

pub(super) fn bibliography(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<Bibliography, ParseError> {
    let mut item_uuids: Vec<String> = Vec::new();
    for link in &input.node.links {
        let own = (link.category == "bibliography").then_some(&link.uuid);
        for uuid in own.into_iter().chain(&link.bibliographies) {
            if !item_uuids.contains(uuid) {
                item_uuids.push(uuid.clone());
            }
        }
    }
    if item_uuids.is_empty() {
        return Err(input.missing("bibliography link"));
    }

    Ok(Bibliography {
        item_uuids,
        layout: walker.choice(input.options, "layout", input.label),
        is_source_document_displayed: walker.flag(
            input.options,
            "source-document-displayed",
            true,
            input.label,
        ),
    })
}

pub(super) fn collection(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<Collection, ParseError> {
    let link = input.require_category("set link", &["set"])?;
    let (opts, label) = (input.options, input.label);
    Ok(Collection {
        collection_id: link.uuid.clone(),
        variant: walker.choice(opts, "variant", label),
        item_variant: walker.choice(opts, "item-variant", label),
        pagination_variant: walker.choice(opts, "pagination-variant", label),
        layout: walker.choice(opts, "layout", label),
        is_sort_displayed: walker.flag(opts, "sort-displayed", false, label),
        is_using_query_params: walker.flag(opts, "using-query-params", false, label),
        filter: CollectionFilter {
            is_sidebar_displayed: walker.flag(opts, "filter-sidebar-displayed", false, label),
            is_results_bar_displayed: walker.flag(
                opts,
                "filter-results-bar-displayed",
                false,
                label,
            ),
            is_map_displayed: walker.flag(opts, "filter-map-displayed", false, label),
            is_input_displayed: walker.flag(opts, "filter-input-displayed", false, label),
            is_limited_to_title_query: walker.flag(
                opts,
                "filter-limited-to-title-query",
                false,
                label,
            ),
        },
    })
}

pub(super) fn entries(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<Entries, ParseError> {
    let link = input.require_category("tree or set link", &["tree", "set"])?;
    Ok(Entries {
        entries_id: link.uuid.clone(),
        variant: walker.choice(input.options, "variant", input.label),
        is_filter_input_displayed: walker.flag(
            input.options,
            "filter-input-displayed",
            false,
            input.label,
        ),
    })
}

pub(super) fn map(walker: &mut Walker<'_>, input: &ElementInput<'_>) -> Result<Map, ParseError> {
    let link = input.require_category("set or tree link", &["set", "tree"])?;
    let (opts, label) = (input.options, input.label);
    Ok(Map {
        map_id: link.uuid.clone(),
        custom_basemap: opts.string("custom-basemap"),
        initial_bounds: bounds(walker, input, "initial-bounds"),
        maximum_bounds: bounds(walker, input, "maximum-bounds"),
        is_interactive: walker.flag(opts, "interactive", true, label),
        is_clustered: walker.flag(opts, "clustered", false, label),
        is_using_pins: walker.flag(opts, "using-pins", false, label),
        is_controls_displayed: walker.flag(opts, "controls-displayed", false, label),
        is_full_height: walker.flag(opts, "full-height", false, label),
    })
}

fn bounds(walker: &mut Walker<'_>, input: &ElementInput<'_>, option: &str) -> Option<MapBounds> {
    let raw = input.options.string(option)?;
    match serde_json::from_str::<MapBounds>(&raw) {
        Ok(bounds) => Some(bounds),
        Err(err) => {
            tracing::debug!(option, error = %err, "Unparseable map bounds");
            walker.warn(ParseWarning::InvalidOption {
                label: input.label.to_owned(),
                option: option.to_owned(),
                value: raw,
            });
            None
        }
    }
}

pub(super) fn query(walker: &mut Walker<'_>, input: &ElementInput<'_>) -> Result<Query, ParseError> {
    let parser = walker.parser();
    let items: Vec<QueryPrompt> = input
        .options
        .find_all("query-prompt")
        .map(|prompt| {
            let sub = input.options.scoped(&prompt.subproperties);
            QueryPrompt {
                label: prompt
                    .values
                    .first()
                    .and_then(|value| value.content.as_ref())
                    .map(|text| parser.display(text))
                    .unwrap_or_default(),
                property_uuids: sub
                    .find_all("use-property")
                    .flat_map(|prop| prop.values.iter().filter_map(ValueNode::content))
                    .map(|content| content.to_string())
                    .collect(),
                start_icon: sub.string("start-icon"),
                end_icon: sub.string("end-icon"),
            }
        })
        .collect();
    if items.is_empty() {
        return Err(input.missing("query prompt"));
    }
    Ok(Query { items })
}

pub(super) fn search_bar(walker: &mut Walker<'_>, input: &ElementInput<'_>) -> SearchBar {
    let opts = input.options;
    SearchBar {
        query_variant: walker.choice(opts, "query-variant", input.label),
        placeholder: opts.string("placeholder"),
        base_query: opts.string("base-query"),
        bound_element_uuid: opts.string("bound-element"),
    }
}

pub(super) fn table(input: &ElementInput<'_>) -> Result<Table, ParseError> {
    let link = input.require_category("set link", &["set"])?;
    Ok(Table {
        table_id: link.uuid.clone(),
    })
}

pub(super) fn timeline(input: &ElementInput<'_>) -> Result<Timeline, ParseError> {
    let link = input.require_category("tree or set link", &["tree", "set"])?;
    Ok(Timeline {
        timeline_id: link.uuid.clone(),
    })
}
