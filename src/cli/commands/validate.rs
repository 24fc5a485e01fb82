use crate::adapters::{Processor, SaveGate, SaveGateArgs};
use crate::cli::commands::{editor_link, with_target, Command};
use crate::cli::{OutputFormat, TargetArgs};
use crate::config::NotifierConfig;
use crate::notifications::types::{Severity, ValidationOutcome};
use anyhow::Result;
use serde::Serialize;

pub struct ValidateCommand {
    pub args: TargetArgs,
    pub config: NotifierConfig,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_url: Option<String>,
    #[serde(flatten)]
    pub outcome: ValidationOutcome,
}

impl ValidateCommand {
    pub fn new(args: TargetArgs, config: NotifierConfig) -> Self {
        Self { args, config }
    }

    pub fn report(&self) -> Result<ValidationReport> {
        let gate = SaveGate::new().with_options(self.args.collect_options());
        with_target(&self.args, &self.config, |ctx, item| {
            let mut args = SaveGateArgs::new(item.clone());
            gate.process(ctx, &mut args)?;
            Ok(ValidationReport {
                item: item.path.clone(),
                editor_url: editor_link(&self.config, item)?,
                outcome: args.outcome,
            })
        })
    }
}

impl Command for ValidateCommand {
    fn render(&self) -> Result<String> {
        let report = self.report()?;
        if self.args.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&report)?);
        }

        let mut out = vec![format!("🔎 {} for {}", report.outcome.validator, report.item)];
        if let Some(link) = &report.editor_url {
            out.push(format!("   🔗 Editor: {link}"));
        }
        match report.outcome.severity {
            Severity::Valid => out.push("   ✅ Valid".to_string()),
            Severity::Warning => out.push(format!("   ⚠️  Warning: {}", report.outcome.text)),
        }
        Ok(out.join("\n"))
    }
}
