//! Web title derivation.

use crate::assemble::Walker;
use crate::classify::{Classified, Marker};
use crate::component::{CollectionVariant, ElementComponent};
use crate::model::{TitleVisibility, WebTitle};

impl Walker<'_> {
    /// Read the `presentation = title` sub-tree; every flag defaults to false.
    pub(crate) fn web_title(&mut self, label: &str, classified: &Classified<'_>) -> WebTitle {
        let Some(tree) = classified.marker(Marker::Title) else {
            return WebTitle {
                label: label.to_owned(),
                ..WebTitle::default()
            };
        };

        WebTitle {
            label: label.to_owned(),
            variant: self.choice(tree, "variant", label),
            properties: TitleVisibility {
                is_name_displayed: self.flag(tree, "name-displayed", false, label),
                is_description_displayed: self.flag(tree, "description-displayed", false, label),
                is_date_displayed: self.flag(tree, "date-displayed", false, label),
                is_creators_displayed: self.flag(tree, "creators-displayed", false, label),
                is_count_displayed: self.flag(tree, "count-displayed", false, label),
            },
        }
    }
}

/// Force the flags some components always show.
pub(crate) fn patch_title(title: &mut WebTitle, component: &ElementComponent) {
    match component {
        ElementComponent::AnnotatedImage(_) | ElementComponent::AnnotatedDocument(_) => {
            title.properties.is_name_displayed = true;
        }
        ElementComponent::Collection(collection) => {
            title.properties.is_name_displayed = true;
            if collection.variant == CollectionVariant::Full {
                title.properties.is_count_displayed = true;
            }
        }
        _ => {}
    }
}
