use crate::cli::TargetArgs;
use crate::config::NotifierConfig;
use crate::content::links::content_editor_url;
use crate::content::types::{ContentItem, DeviceId, User};
use crate::context::RequestContext;
use crate::notifications::types::NotificationRecord;
use crate::snapshot::ContentSnapshot;
use anyhow::{anyhow, Context, Result};
use tracing::debug;

pub mod datasources;
pub mod notifications;
pub mod validate;
pub mod warnings;

pub use datasources::DatasourcesCommand;
pub use notifications::NotificationsCommand;
pub use validate::ValidateCommand;
pub use warnings::WarningsCommand;

pub trait Command {
    /// Produce the command output without printing it
    fn render(&self) -> Result<String>;

    fn execute(&self) -> Result<()> {
        println!("{}", self.render()?);
        Ok(())
    }
}

/// Load the snapshot named by `args`, look up the target item and run `f`
/// with a request context for the requested user and device.
pub fn with_target<F, R>(args: &TargetArgs, config: &NotifierConfig, f: F) -> Result<R>
where
    F: FnOnce(&RequestContext<'_>, &ContentItem) -> Result<R>,
{
    let snapshot = ContentSnapshot::load(&args.snapshot)
        .with_context(|| format!("Could not load snapshot {}", args.snapshot.display()))?;
    snapshot.require_repository(&args.repository)?;

    let item = snapshot
        .find_item(&args.repository, &args.item)
        .ok_or_else(|| {
            anyhow!(
                "Item '{}' was not found in repository '{}'",
                args.item,
                args.repository
            )
        })?;
    debug!(item = %item.path, user = %args.user, device = %args.device, "Target item resolved");

    let user = User::new(args.user.clone());
    let device = DeviceId::new(args.device.clone());
    let ctx = snapshot.context(&user, &device, &config.notifications);
    f(&ctx, &item)
}

/// Editor link for `item` when a base URL is configured
pub fn editor_link(config: &NotifierConfig, item: &ContentItem) -> Result<Option<String>> {
    let Some(base) = config.editor.base_url.as_deref() else {
        return Ok(None);
    };
    let url = content_editor_url(item, base)
        .with_context(|| format!("Invalid editor.base_url '{base}'"))?;
    Ok(Some(url.into()))
}

/// Shared text layout of the warnings and notifications commands
pub(crate) fn render_records(
    heading: &str,
    item_path: &str,
    user: &str,
    link: Option<&str>,
    records: &[NotificationRecord],
) -> String {
    let mut out = Vec::new();
    out.push(format!("{heading} for {item_path}"));
    out.push(format!("   👤 User: {user}"));
    if let Some(link) = link {
        out.push(format!("   🔗 Editor: {link}"));
    }
    out.push(String::new());

    if records.is_empty() {
        out.push("✅ No datasource items need workflow attention".to_string());
        return out.join("\n");
    }

    for (i, record) in records.iter().enumerate() {
        if record.icon.is_empty() {
            out.push(format!("{}. {}", i + 1, record.title));
        } else {
            out.push(format!("{}. {} [{}]", i + 1, record.title, record.icon));
        }
        out.push(format!("   {}", record.text));
        for option in &record.options {
            out.push(format!("   ▶️  {} → {}", option.label, option.action_token));
        }
    }
    out.push(String::new());
    out.push(format!("📋 {} datasource item(s) in workflow", records.len()));
    out.join("\n")
}

pub fn show_how_to_use() -> Result<()> {
    println!("🧩 datasource-workflow - workflow state of page datasources");
    println!();
    println!("Commands:");
    println!("  ⚠️  datasource-workflow warnings      # Content editor warnings");
    println!("  💬 datasource-workflow notifications # Inline page editing notifications");
    println!("  🔎 datasource-workflow validate      # Save-time validation result");
    println!("  📦 datasource-workflow datasources   # Every datasource and its state");
    println!();
    println!("💡 Example: datasource-workflow warnings --snapshot site.json --item /sitecore/content/Home --user author");
    Ok(())
}
