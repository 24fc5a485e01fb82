use crate::adapters::{EditorWarnings, EditorWarningsArgs, Processor};
use crate::cli::commands::{editor_link, render_records, with_target, Command};
use crate::cli::{OutputFormat, TargetArgs};
use crate::config::NotifierConfig;
use crate::notifications::types::NotificationRecord;
use anyhow::Result;
use serde::Serialize;

pub struct WarningsCommand {
    pub args: TargetArgs,
    pub config: NotifierConfig,
}

#[derive(Debug, Serialize)]
pub struct RecordReport {
    pub surface: &'static str,
    pub item: String,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_url: Option<String>,
    pub records: Vec<NotificationRecord>,
}

impl WarningsCommand {
    pub fn new(args: TargetArgs, config: NotifierConfig) -> Self {
        Self { args, config }
    }

    pub fn report(&self) -> Result<RecordReport> {
        let adapter = EditorWarnings::new().with_options(self.args.collect_options());
        with_target(&self.args, &self.config, |ctx, item| {
            let mut args = EditorWarningsArgs::new(item.clone());
            adapter.process(ctx, &mut args)?;
            Ok(RecordReport {
                surface: adapter.surface(),
                item: item.path.clone(),
                user: ctx.user.name.clone(),
                editor_url: editor_link(&self.config, item)?,
                records: args.warnings,
            })
        })
    }
}

impl Command for WarningsCommand {
    fn render(&self) -> Result<String> {
        let report = self.report()?;
        match self.args.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => Ok(render_records(
                "⚠️  Datasource workflow warnings",
                &report.item,
                &report.user,
                report.editor_url.as_deref(),
                &report.records,
            )),
        }
    }
}
