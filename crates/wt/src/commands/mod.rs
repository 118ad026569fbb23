//! CLI command implementations.

mod parse;
mod tree;

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use wt_config::{CliSettings, Config, InvalidPagePolicy};
use wt_tree::{DirDocuments, LabelMatcher, Node};
use wt_website::{PageErrorPolicy, ParsedWebsite, WebsiteParser};

use crate::error::CliError;
use crate::output::Output;

pub(crate) use parse::ParseArgs;
pub(crate) use tree::TreeArgs;

/// Input and interpretation arguments shared by every command.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Resource tree JSON file, or `-` for stdin.
    input: PathBuf,

    /// Path to configuration file (default: auto-discover webtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language picked from multi-language text (overrides config).
    #[arg(long, env = "WT_LANG")]
    lang: Option<String>,

    /// Fail on pages without a slug instead of dropping them.
    #[arg(long)]
    strict: bool,

    /// Directory holding `<uuid>.json` documents (overrides config).
    #[arg(long)]
    documents_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl InputArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            language: self.lang.clone(),
            on_invalid_page: self.strict.then_some(InvalidPagePolicy::Abort),
            documents_dir: self.documents_dir.clone(),
            ..CliSettings::default()
        }
    }

    /// Load config, read the input tree and interpret it.
    ///
    /// Warnings are printed to stderr; the returned config carries the
    /// output settings.
    fn load(&self, settings: &CliSettings) -> Result<(Config, ParsedWebsite), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), Some(settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let root = read_tree(&self.input)?;
        let parsed = build_parser(&config).parse(&root)?;
        for warning in &parsed.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        Ok((config, parsed))
    }
}

/// Read and decode a resource tree.
fn read_tree(path: &Path) -> Result<Node, CliError> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    serde_json::from_str(&content).map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Configure a parser from the loaded settings.
fn build_parser(config: &Config) -> WebsiteParser {
    let matcher = config
        .labels
        .iter()
        .fold(LabelMatcher::new(), |matcher, (label, uuid)| {
            matcher.with_id(label, uuid)
        });
    let policy = match config.parse.on_invalid_page {
        InvalidPagePolicy::Skip => PageErrorPolicy::Skip,
        InvalidPagePolicy::Abort => PageErrorPolicy::Abort,
    };

    let parser = WebsiteParser::new()
        .with_language(&config.parse.language)
        .with_label_matcher(matcher)
        .with_page_errors(policy);
    match &config.documents_resolved.dir {
        Some(dir) => parser.with_resolver(DirDocuments::new(dir)),
        None => parser,
    }
}
