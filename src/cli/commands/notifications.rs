use crate::adapters::{InlineNotificationArgs, InlineNotifications, Processor};
use crate::cli::commands::warnings::RecordReport;
use crate::cli::commands::{editor_link, render_records, with_target, Command};
use crate::cli::{OutputFormat, TargetArgs};
use crate::config::NotifierConfig;
use anyhow::Result;

pub struct NotificationsCommand {
    pub args: TargetArgs,
    pub config: NotifierConfig,
}

impl NotificationsCommand {
    pub fn new(args: TargetArgs, config: NotifierConfig) -> Self {
        Self { args, config }
    }

    pub fn report(&self) -> Result<RecordReport> {
        let adapter = InlineNotifications::new().with_options(self.args.collect_options());
        with_target(&self.args, &self.config, |ctx, item| {
            let mut args = InlineNotificationArgs::new(item.clone());
            adapter.process(ctx, &mut args)?;
            Ok(RecordReport {
                surface: adapter.surface(),
                item: item.path.clone(),
                user: ctx.user.name.clone(),
                editor_url: editor_link(&self.config, item)?,
                records: args.notifications,
            })
        })
    }
}

impl Command for NotificationsCommand {
    fn render(&self) -> Result<String> {
        let report = self.report()?;
        match self.args.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => Ok(render_records(
                "💬 Datasource workflow notifications",
                &report.item,
                &report.user,
                report.editor_url.as_deref(),
                &report.records,
            )),
        }
    }
}
