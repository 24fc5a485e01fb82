use anyhow::Result;
use clap::Parser;

use datasource_workflow::cli::commands::{
    show_how_to_use, Command, DatasourcesCommand, NotificationsCommand, ValidateCommand,
    WarningsCommand,
};
use datasource_workflow::cli::{Cli, Commands};
use datasource_workflow::config::NotifierConfig;
use datasource_workflow::telemetry::init_telemetry;

fn main() -> Result<()> {
    NotifierConfig::load_env_file()?;
    let cli = Cli::parse();

    let config = NotifierConfig::load(cli.config.as_deref())?;
    init_telemetry(&config.observability)?;

    match cli.command {
        // No subcommand: explain how to use the tool
        None => show_how_to_use(),
        Some(Commands::Warnings(args)) => WarningsCommand::new(args, config).execute(),
        Some(Commands::Notifications(args)) => NotificationsCommand::new(args, config).execute(),
        Some(Commands::Validate(args)) => ValidateCommand::new(args, config).execute(),
        Some(Commands::Datasources(args)) => DatasourcesCommand::new(args, config).execute(),
    }
}
