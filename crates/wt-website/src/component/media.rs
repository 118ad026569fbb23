//! Media widgets: images, annotated resources, audio, video and IIIF.

use serde::{Deserialize, Serialize};
use wt_tree::LinkRef;

use super::ElementInput;
use crate::assemble::Walker;
use crate::error::ParseError;
use crate::model::IiifViewerKind;

const SECONDS_PER_IMAGE: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedDocument {
    pub document_id: String,
    pub is_filter_input_displayed: bool,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedImage {
    pub image_uuid: String,
    pub is_filter_input_displayed: bool,
    pub is_options_displayed: bool,
    pub is_annotation_highlights_displayed: bool,
    pub is_annotation_tooltips_displayed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlayer {
    pub audio_id: String,
    pub is_speed_controls_displayed: bool,
    pub is_volume_controls_displayed: bool,
    pub is_seek_bar_displayed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IiifViewer {
    pub iiif_id: String,
    pub variant: IiifViewerKind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageVariant {
    #[default]
    Default,
    Carousel,
    Grid,
    Slideshow,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaptionLayout {
    Top,
    #[default]
    Bottom,
    Inset,
    Suppress,
}

/// Which identification field feeds a caption or alt text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextSource {
    #[default]
    Name,
    Abbreviation,
    Description,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageQuality {
    #[default]
    High,
    Low,
}

/// One linked image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WebImage {
    pub uuid: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselOptions {
    pub seconds_per_image: u32,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub images: Vec<WebImage>,
    pub variant: ImageVariant,
    pub caption_layout: CaptionLayout,
    pub caption_source: TextSource,
    pub alt_text_source: TextSource,
    pub image_quality: ImageQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub is_full_width: bool,
    pub is_full_height: bool,
    pub is_transparent_background: bool,
    pub is_cover: bool,
    /// Present whenever more than one image is linked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carousel_options: Option<CarouselOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGallery {
    pub gallery_id: String,
    pub is_filter_input_displayed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub video_id: String,
    pub is_chapters_displayed: bool,
}

fn has_type(link: &LinkRef, link_type: &str) -> bool {
    link.category == "resource" && link.link_type.as_deref() == Some(link_type)
}

pub(super) fn annotated_document(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<AnnotatedDocument, ParseError> {
    let link = input.require_category("resource link", &["resource"])?;
    Ok(AnnotatedDocument {
        document_id: link.uuid.clone(),
        is_filter_input_displayed: walker.flag(
            input.options,
            "filter-input-displayed",
            false,
            input.label,
        ),
    })
}

pub(super) fn annotated_image(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<AnnotatedImage, ParseError> {
    let link = input.require_link("image link", LinkRef::is_image)?;
    let (opts, label) = (input.options, input.label);
    Ok(AnnotatedImage {
        image_uuid: link.uuid.clone(),
        is_filter_input_displayed: walker.flag(opts, "filter-input-displayed", true, label),
        is_options_displayed: walker.flag(opts, "options-displayed", true, label),
        is_annotation_highlights_displayed: walker.flag(
            opts,
            "annotation-highlights-displayed",
            true,
            label,
        ),
        is_annotation_tooltips_displayed: walker.flag(
            opts,
            "annotation-tooltips-displayed",
            true,
            label,
        ),
    })
}

pub(super) fn audio_player(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<AudioPlayer, ParseError> {
    let link = input.require_link("audio resource link", |link| has_type(link, "audio"))?;
    let (opts, label) = (input.options, input.label);
    Ok(AudioPlayer {
        audio_id: link.uuid.clone(),
        is_speed_controls_displayed: walker.flag(opts, "speed-controls-displayed", false, label),
        is_volume_controls_displayed: walker.flag(opts, "volume-controls-displayed", true, label),
        is_seek_bar_displayed: walker.flag(opts, "seek-bar-displayed", true, label),
    })
}

pub(super) fn iiif_viewer(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<IiifViewer, ParseError> {
    let link = input.require_link("IIIF link", LinkRef::is_iiif)?;
    Ok(IiifViewer {
        iiif_id: link.uuid.clone(),
        variant: walker.choice(input.options, "variant", input.label),
    })
}

pub(super) fn image(walker: &mut Walker<'_>, input: &ElementInput<'_>) -> Result<Image, ParseError> {
    let images: Vec<WebImage> = input
        .node
        .links
        .iter()
        .filter(|link| link.is_image())
        .map(|link| WebImage {
            uuid: link.uuid.clone(),
            label: link
                .identification
                .as_ref()
                .map(|id| walker.parser().display(&id.label))
                .unwrap_or_default(),
            width: link.image.and_then(|dims| dims.width),
            height: link.image.and_then(|dims| dims.height),
        })
        .collect();
    if images.is_empty() {
        return Err(input.missing("image link"));
    }

    let (opts, label) = (input.options, input.label);
    let carousel_options = (images.len() > 1).then(|| CarouselOptions {
        seconds_per_image: walker
            .number(opts, "seconds-per-image", label)
            .and_then(whole_seconds)
            .unwrap_or(SECONDS_PER_IMAGE),
    });

    Ok(Image {
        variant: walker.choice(opts, "variant", label),
        caption_layout: walker.choice(opts, "caption-layout", label),
        caption_source: walker.choice(opts, "caption-source", label),
        alt_text_source: walker.choice(opts, "alt-text-source", label),
        image_quality: walker.choice(opts, "image-quality", label),
        width: walker.number(opts, "width", label),
        height: walker.number(opts, "height", label),
        is_full_width: walker.flag(opts, "full-width", true, label),
        is_full_height: walker.flag(opts, "full-height", true, label),
        is_transparent_background: walker.flag(opts, "transparent-background", false, label),
        is_cover: walker.flag(opts, "cover", false, label),
        carousel_options,
        images,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(value: f64) -> Option<u32> {
    (1.0..=f64::from(u32::MAX)).contains(&value).then(|| value.round() as u32)
}

pub(super) fn image_gallery(
    walker: &mut Walker<'_>,
    input: &ElementInput<'_>,
) -> Result<ImageGallery, ParseError> {
    let link = input.require_category("tree or set link", &["tree", "set"])?;
    Ok(ImageGallery {
        gallery_id: link.uuid.clone(),
        is_filter_input_displayed: walker.flag(
            input.options,
            "filter-input-displayed",
            false,
            input.label,
        ),
    })
}

pub(super) fn video(walker: &mut Walker<'_>, input: &ElementInput<'_>) -> Result<Video, ParseError> {
    let link = input.require_link("video resource link", |link| has_type(link, "video"))?;
    Ok(Video {
        video_id: link.uuid.clone(),
        is_chapters_displayed: walker.flag(input.options, "chapters-displayed", true, input.label),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::component::ElementComponent;
    use crate::component::tests::element;
    use crate::error::ParseWarning;

    fn image_node(links: serde_json::Value, options: serde_json::Value) -> serde_json::Value {
        let mut node = json!({
            "uuid": "img",
            "identification": {"label": "Hero"},
            "properties": {"property": {"label": "presentation", "value": "element", "property": [
                {"label": "component", "value": "image"}
            ]}}
        });
        node["links"] = links;
        node["properties"]["property"]["property"][0]["property"] = options;
        node
    }

    #[test]
    fn test_image_defaults_with_two_images() {
        let (found, warnings) = element(image_node(
            json!({"resource": [
                {"uuid": "i1", "type": "image", "identification": {"label": "One"},
                 "image": {"width": 800, "height": 600}},
                {"uuid": "i2", "type": "image"}
            ]}),
            json!([]),
        ));
        let ElementComponent::Image(image) = found.unwrap().component else {
            panic!("expected image");
        };
        assert!(warnings.is_empty());
        assert_eq!(image.images.len(), 2);
        assert_eq!(image.images[0].label, "One");
        assert_eq!(image.images[0].width, Some(800));
        assert_eq!(image.variant, ImageVariant::Default);
        assert_eq!(image.caption_layout, CaptionLayout::Bottom);
        assert_eq!(image.caption_source, TextSource::Name);
        assert_eq!(image.alt_text_source, TextSource::Name);
        assert_eq!(image.image_quality, ImageQuality::High);
        assert!(image.is_full_width && image.is_full_height);
        assert!(!image.is_transparent_background && !image.is_cover);
        assert_eq!(
            image.carousel_options,
            Some(CarouselOptions {
                seconds_per_image: 5
            })
        );
    }

    #[test]
    fn test_single_image_has_no_carousel() {
        let (found, _) = element(image_node(
            json!({"resource": {"uuid": "i1", "fileFormat": "application/iiif+json"}}),
            json!({"label": "variant", "value": "carousel"}),
        ));
        let ElementComponent::Image(image) = found.unwrap().component else {
            panic!("expected image");
        };
        assert_eq!(image.variant, ImageVariant::Carousel);
        assert_eq!(image.carousel_options, None);
    }

    #[test]
    fn test_image_options_override_defaults() {
        let (found, warnings) = element(image_node(
            json!({"resource": [{"uuid": "i1", "type": "image"}, {"uuid": "i2", "type": "image"}]}),
            json!([
                {"label": "seconds-per-image", "value": {"content": 8, "dataType": "integer"}},
                {"label": "caption-layout", "value": "inset"},
                {"label": "cover", "value": {"content": "true", "dataType": "boolean"}},
                {"label": "image-quality", "value": "blurry"}
            ]),
        ));
        let ElementComponent::Image(image) = found.unwrap().component else {
            panic!("expected image");
        };
        assert_eq!(image.carousel_options.unwrap().seconds_per_image, 8);
        assert_eq!(image.caption_layout, CaptionLayout::Inset);
        assert!(image.is_cover);
        assert_eq!(image.image_quality, ImageQuality::High);
        assert_eq!(
            warnings,
            vec![ParseWarning::InvalidOption {
                label: "Hero".to_owned(),
                option: "image-quality".to_owned(),
                value: "blurry".to_owned(),
            }]
        );
    }

    #[test]
    fn test_image_without_image_links_fails() {
        let (found, _) = element(image_node(
            json!({"resource": {"uuid": "d1", "type": "document"}}),
            json!([]),
        ));
        assert!(matches!(
            found,
            Err(ParseError::MissingRequiredReference { ref label, .. }) if label == "Hero"
        ));
    }

    #[test]
    fn test_audio_requires_audio_resource() {
        let node = |link_type: &str| {
            json!({
                "uuid": "a",
                "identification": {"label": "Song"},
                "links": {"resource": {"uuid": "r1", "type": link_type}},
                "properties": {"property": {"label": "presentation", "value": "element", "property": [
                    {"label": "component", "value": "audio-player"}
                ]}}
            })
        };

        let (found, _) = element(node("audio"));
        assert_eq!(
            found.unwrap().component,
            ElementComponent::AudioPlayer(AudioPlayer {
                audio_id: "r1".to_owned(),
                is_speed_controls_displayed: false,
                is_volume_controls_displayed: true,
                is_seek_bar_displayed: true,
            })
        );

        let (found, _) = element(node("video"));
        assert!(found.is_err());
    }

    #[test]
    fn test_iiif_viewer_picks_manifest_link() {
        let (found, _) = element(json!({
            "uuid": "v",
            "links": {"resource": [
                {"uuid": "plain", "type": "image"},
                {"uuid": "manifest", "fileFormat": "IIIF"}
            ]},
            "properties": {"property": {"label": "presentation", "value": "element", "property": [
                {"label": "component", "value": "iiif-viewer", "property": {"label": "variant", "value": "clover"}}
            ]}}
        }));
        assert_eq!(
            found.unwrap().component,
            ElementComponent::IiifViewer(IiifViewer {
                iiif_id: "manifest".to_owned(),
                variant: IiifViewerKind::Clover,
            })
        );
    }
}
