use crate::content::collector::CollectOptions;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser, Debug)]
#[command(name = "datasource-workflow")]
#[command(about = "Report the workflow state of the datasource items a page uses")]
#[command(long_about = "datasource-workflow walks the renderings of a content item, collects every \
                       datasource item they use (including personalization and multivariate test \
                       variants) and reports the ones that are still moving through a workflow. \
                       Run it against a content snapshot exported as JSON or TOML.")]
pub struct Cli {
    /// Configuration file to use instead of datasource-workflow.toml
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Content editor warnings for the datasources of an item
    Warnings(TargetArgs),
    /// Inline (page editing) notifications for the datasources of an item
    Notifications(TargetArgs),
    /// Run the save-time validator: warns when datasources are not final
    Validate(TargetArgs),
    /// List every unique datasource of an item with its workflow state
    Datasources(TargetArgs),
}

/// Which item to inspect, and on whose behalf
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Content snapshot (.json or .toml)
    #[arg(long, help = "Content snapshot file (.json or .toml)")]
    pub snapshot: PathBuf,

    /// Item id or content path
    #[arg(long, help = "Id or path of the item to inspect")]
    pub item: String,

    #[arg(long, default_value = "master", help = "Repository the item is read from")]
    pub repository: String,

    #[arg(long, default_value = "anonymous", help = "User the request is made for")]
    pub user: String,

    #[arg(long, default_value = "default", help = "Device the page is rendered for")]
    pub device: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, help = "Ignore datasources set by personalization rules")]
    pub no_personalization: bool,

    #[arg(long, help = "Ignore datasources of multivariate test variants")]
    pub no_multivariate: bool,
}

impl TargetArgs {
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            personalization: !self.no_personalization,
            multivariate: !self.no_multivariate,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
