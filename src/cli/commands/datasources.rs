use crate::cli::commands::{editor_link, with_target, Command};
use crate::cli::{OutputFormat, TargetArgs};
use crate::config::NotifierConfig;
use crate::notifications::builder::NotificationBuilder;
use crate::workflow::types::WorkflowAssignment;
use anyhow::Result;
use serde::Serialize;

pub struct DatasourcesCommand {
    pub args: TargetArgs,
    pub config: NotifierConfig,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum DatasourceStatus {
    Actionable { workflow: String, state: String },
    Final { workflow: String, state: String },
    Unresolved { reason: String },
}

#[derive(Debug, Serialize)]
pub struct DatasourceEntry {
    pub name: String,
    pub path: String,
    pub id: String,
    pub version: u32,
    pub language: String,
    #[serde(flatten)]
    pub status: DatasourceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_url: Option<String>,
}

impl DatasourceEntry {
    fn from_assignment(assignment: &WorkflowAssignment<'_>, editor_url: Option<String>) -> Self {
        let item = assignment.item();
        let status = match assignment {
            WorkflowAssignment::Resolved(resolved) => {
                let workflow = resolved.workflow_name().to_string();
                let state = resolved.state.display_name.clone();
                if resolved.state.is_terminal {
                    DatasourceStatus::Final { workflow, state }
                } else {
                    DatasourceStatus::Actionable { workflow, state }
                }
            }
            WorkflowAssignment::Unresolved { reason, .. } => DatasourceStatus::Unresolved {
                reason: reason.to_string(),
            },
        };
        Self {
            name: item.display_name().to_string(),
            path: item.path.clone(),
            id: item.id.to_string(),
            version: item.version,
            language: item.language.clone(),
            status,
            editor_url,
        }
    }
}

impl DatasourcesCommand {
    pub fn new(args: TargetArgs, config: NotifierConfig) -> Self {
        Self { args, config }
    }

    pub fn entries(&self) -> Result<Vec<DatasourceEntry>> {
        with_target(&self.args, &self.config, |ctx, item| {
            let builder = NotificationBuilder::new(ctx).with_options(self.args.collect_options());
            builder
                .datasource_assignments(item)
                .iter()
                .map(|a| {
                    let link = editor_link(&self.config, a.item())?;
                    Ok(DatasourceEntry::from_assignment(a, link))
                })
                .collect::<Result<Vec<_>>>()
        })
    }
}

impl Command for DatasourcesCommand {
    fn render(&self) -> Result<String> {
        let entries = self.entries()?;
        if self.args.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&entries)?);
        }

        let mut out = vec![format!("📦 Datasources of {}", self.args.item), String::new()];
        if entries.is_empty() {
            out.push("📋 No datasource items found".to_string());
            return Ok(out.join("\n"));
        }

        for entry in &entries {
            let status = match &entry.status {
                DatasourceStatus::Actionable { workflow, state } => {
                    format!("🟡 {state} ({workflow})")
                }
                DatasourceStatus::Final { workflow, state } => format!("🟢 {state} ({workflow})"),
                DatasourceStatus::Unresolved { reason } => format!("⚪ no workflow: {reason}"),
            };
            out.push(format!("   {} {}", entry.path, status));
            if let Some(link) = &entry.editor_url {
                out.push(format!("      🔗 {link}"));
            }
        }
        out.push(String::new());
        out.push(format!("📈 {} unique datasource item(s)", entries.len()));
        Ok(out.join("\n"))
    }
}
