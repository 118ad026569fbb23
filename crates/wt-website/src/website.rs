//! Website root: top-level routing, the sidebar and global settings.

use wt_tree::{Node, Properties, PropertyNode};

use crate::assemble::{Walker, component_property, parse_choice};
use crate::classify::{Classified, PRESENTATION, Role};
use crate::component::SIDEBAR;
use crate::error::{ParseError, ParseWarning};
use crate::model::{
    ContextKind, Creator, FooterOptions, IconSet, ItemPageOptions, LevelContext, LevelContextItem,
    NavbarOptions, Scope, Sidebar, ThemeOptions, Website, WebsiteIdentification, WebsiteOptions,
    WebsiteProperties,
};
use crate::styles::extract_styles;

fn is_sidebar(classified: &Classified<'_>) -> bool {
    classified.role == Role::Element
        && component_property(classified)
            .and_then(PropertyNode::first_text)
            .is_some_and(|value| value == SIDEBAR)
}

impl Walker<'_> {
    /// Build the website from the root node.
    pub(crate) fn website(&mut self, root: &Node) -> Result<Website, ParseError> {
        let parser = self.parser();
        let label = parser.label_of(root);

        let mut pages = Vec::new();
        let mut segments = Vec::new();
        let mut sidebar: Option<Sidebar> = None;
        for child in &root.children {
            let Some(classified) = self.classify(child) else {
                tracing::debug!(uuid = %child.uuid, "Skipping unclassified node");
                continue;
            };
            match classified.role {
                Role::Page => pages.extend(self.page(child, &classified, "")?),
                Role::Segment => segments.extend(self.segment(child, "")?),
                Role::Element if is_sidebar(&classified) => {
                    if sidebar.is_some() {
                        self.warn(ParseWarning::ExtraSidebar {
                            label: parser.label_of(child),
                        });
                    } else {
                        sidebar = Some(self.sidebar(child, &classified)?);
                    }
                }
                role => {
                    tracing::debug!(uuid = %child.uuid, %role, "Skipping top-level node outside any page");
                }
            }
        }

        Ok(Website {
            uuid: root.uuid.clone(),
            identification: WebsiteIdentification {
                abbreviation: root
                    .identification
                    .as_ref()
                    .and_then(|id| id.abbreviation.as_ref())
                    .map(|text| parser.display(text)),
                label: label.clone(),
            },
            creators: root
                .creators
                .iter()
                .map(|creator| Creator {
                    uuid: creator.uuid.clone(),
                    label: parser.label_of(creator),
                })
                .collect(),
            license: root.license.clone(),
            pages,
            segments,
            sidebar,
            properties: self.website_properties(root, &label),
        })
    }

    fn sidebar(&mut self, node: &Node, classified: &Classified<'_>) -> Result<Sidebar, ParseError> {
        let label = self.parser().label_of(node);
        let options = component_property(classified)
            .map_or(classified.tree, |marker| {
                classified.tree.scoped(&marker.subproperties)
            });

        Ok(Sidebar {
            uuid: node.uuid.clone(),
            title: self.web_title(&label, classified),
            items: self.child_elements(node)?,
            layout: self.choice(options, "layout", &label),
            mobile_layout: self.choice(options, "mobile-layout", &label),
            css_styles: extract_styles(classified),
        })
    }

    /// Global groups from the root's first `presentation` property.
    ///
    /// Every group defaults on its own; nothing here is fatal.
    fn website_properties(&mut self, root: &Node, owner: &str) -> WebsiteProperties {
        let parser = self.parser();
        let Some(g) = parser.view(&root.properties).children_of(PRESENTATION) else {
            return WebsiteProperties::default();
        };

        WebsiteProperties {
            website_type: self.choice(g, "website-type", owner),
            status: self.choice(g, "status", owner),
            privacy: self.choice(g, "privacy", owner),
            contact: g.string("contact"),
            theme: ThemeOptions {
                default_theme: self.choice(g, "default-theme", owner),
                is_theme_toggle_displayed: self.flag(g, "theme-toggle-visible", true, owner),
            },
            icon: IconSet {
                logo_uuid: g.string("logo"),
                favicon_uuid: g.string("favicon"),
                apple_touch_icon_uuid: g.string("apple-touch-icon"),
            },
            navbar: NavbarOptions {
                is_displayed: self.flag(g, "navbar-visible", true, owner),
                variant: self.choice(g, "navbar-variant", owner),
                alignment: self.choice(g, "navbar-alignment", owner),
                is_project_displayed: self.flag(g, "navbar-project-visible", true, owner),
                search_bar_bound_element_uuid: g.string("navbar-search-bar"),
            },
            footer: FooterOptions {
                is_displayed: self.flag(g, "footer-visible", true, owner),
                logo_uuid: g.string("footer-logo"),
            },
            item_page: self.item_page(g, owner),
            options: self.website_options(g, owner),
        }
    }

    fn item_page(&mut self, g: Properties<'_>, owner: &str) -> ItemPageOptions {
        let defaults = ItemPageOptions::default();
        let mut flag = |option: &str, default: bool| {
            self.flag(g, &format!("item-page-{option}"), default, owner)
        };
        ItemPageOptions {
            is_main_content_displayed: flag("main-content-visible", defaults.is_main_content_displayed),
            is_description_displayed: flag("description-visible", defaults.is_description_displayed),
            is_documents_displayed: flag("documents-visible", defaults.is_documents_displayed),
            is_notes_displayed: flag("notes-visible", defaults.is_notes_displayed),
            is_events_displayed: flag("events-visible", defaults.is_events_displayed),
            is_periods_displayed: flag("periods-visible", defaults.is_periods_displayed),
            is_properties_displayed: flag("properties-visible", defaults.is_properties_displayed),
            is_bibliography_displayed: flag(
                "bibliography-visible",
                defaults.is_bibliography_displayed,
            ),
            is_property_values_grouped: flag(
                "property-values-grouped",
                defaults.is_property_values_grouped,
            ),
            iiif_viewer: self.choice(g, "item-page-iiif-viewer", owner),
        }
    }

    fn website_options(&mut self, g: Properties<'_>, owner: &str) -> WebsiteOptions {
        let parser = self.parser();
        let mut options = WebsiteOptions::default();

        for scope in g.find_all("scope") {
            let Some(value) = scope.values.first() else {
                continue;
            };
            let Some(uuid) = value
                .uuid
                .clone()
                .or_else(|| value.content().map(|c| c.to_string()))
            else {
                continue;
            };
            options.scopes.push(Scope {
                uuid,
                label: value
                    .content
                    .as_ref()
                    .map(|text| parser.display(text))
                    .unwrap_or_default(),
            });
        }

        for context in g.find_all("context") {
            let raw = context.first_text().unwrap_or_default();
            let Some(kind) = parse_choice::<ContextKind>(&raw) else {
                self.warn(ParseWarning::InvalidOption {
                    label: owner.to_owned(),
                    option: "context".to_owned(),
                    value: raw,
                });
                continue;
            };
            let levels = g
                .scoped(&context.subproperties)
                .find_all("level")
                .filter_map(|level| {
                    Some(LevelContextItem {
                        variable_uuid: level.first_text()?,
                        value_uuid: g.scoped(&level.subproperties).string("level-value"),
                    })
                })
                .collect();
            options.contexts.push(kind, LevelContext { levels });
        }

        options
    }
}
