//! `wt tree` command implementation.

use std::fmt::Write as _;
use std::io::Write;

use clap::Args;
use wt_website::{PageItem, SegmentItemChild, WebSegment, Webpage, Website};

use super::InputArgs;
use crate::error::CliError;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    pub(crate) input: InputArgs,
}

impl TreeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let settings = self.input.cli_settings();
        let (_, parsed) = self.input.load(&settings)?;
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}", render_tree(&parsed.website))?;
        Ok(())
    }
}

/// Render pages as `/slug  Title` and segments as `[segment] slug  Title`,
/// indented two spaces per level.
fn render_tree(website: &Website) -> String {
    let mut out = String::new();
    let name = &website.identification.label;
    if !name.is_empty() {
        let _ = writeln!(out, "{name}");
    }
    for page in &website.pages {
        render_page(&mut out, page, 0);
    }
    for segment in &website.segments {
        render_segment(&mut out, segment, 0);
    }
    if website.sidebar.is_some() {
        let _ = writeln!(out, "[sidebar]");
    }
    out
}

fn render_page(out: &mut String, page: &Webpage, depth: usize) {
    let _ = writeln!(out, "{}/{}  {}", indent(depth), page.slug, page.title);
    for item in &page.items {
        if let PageItem::Segment(segment) = item {
            render_segment(out, segment, depth + 1);
        }
    }
    for child in &page.webpages {
        render_page(out, child, depth + 1);
    }
}

fn render_segment(out: &mut String, segment: &WebSegment, depth: usize) {
    let _ = writeln!(
        out,
        "{}[segment] {}  {}",
        indent(depth),
        segment.slug,
        segment.title
    );
    for item in &segment.items {
        let _ = writeln!(out, "{}[item] {}  {}", indent(depth + 1), item.slug, item.title);
        for child in &item.items {
            match child {
                SegmentItemChild::Page(page) => render_page(out, page, depth + 2),
                SegmentItemChild::Segment(nested) => render_segment(out, nested, depth + 2),
            }
        }
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}
