// Command line behavior against the site fixture

use assert_cmd::Command;
use clap::Parser;
use datasource_workflow::cli::commands::{
    Command as _, DatasourcesCommand, ValidateCommand, WarningsCommand,
};
use datasource_workflow::cli::{Cli, Commands, OutputFormat};
use datasource_workflow::config::NotifierConfig;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/site.json")
        .display()
        .to_string()
}

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("datasource-workflow").unwrap();
    cmd.env("RUST_LOG", "off");
    cmd
}

fn parse(args: &[&str]) -> Commands {
    Cli::try_parse_from(args)
        .expect("arguments should parse")
        .command
        .expect("a subcommand")
}

#[test]
fn parses_target_arguments_with_defaults() {
    let fixture = fixture();
    let Commands::Warnings(args) = parse(&[
        "datasource-workflow",
        "warnings",
        "--snapshot",
        &fixture,
        "--item",
        "/sitecore/content/Home",
    ]) else {
        panic!("expected the warnings command");
    };

    assert_eq!(args.repository, "master");
    assert_eq!(args.user, "anonymous");
    assert_eq!(args.device, "default");
    assert_eq!(args.format, OutputFormat::Text);
    assert!(args.collect_options().personalization);
    assert!(args.collect_options().multivariate);
}

#[test]
fn parses_toggles_and_global_config() {
    let cli = Cli::try_parse_from([
        "datasource-workflow",
        "datasources",
        "--snapshot",
        "site.toml",
        "--item",
        "{6A1D2C3E-1111-4A4A-8A8A-000000000001}",
        "--format",
        "json",
        "--no-multivariate",
        "--config",
        "custom.toml",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    let Some(Commands::Datasources(args)) = cli.command else {
        panic!("expected the datasources command");
    };
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.collect_options().personalization);
    assert!(!args.collect_options().multivariate);
}

#[test]
fn missing_required_arguments_are_rejected() {
    assert!(Cli::try_parse_from(["datasource-workflow", "validate", "--item", "/x"]).is_err());
    assert!(Cli::try_parse_from(["datasource-workflow", "warnings", "--snapshot", "a.json"]).is_err());
    assert!(Cli::try_parse_from(["datasource-workflow", "warnings", "--format", "xml"]).is_err());
}

#[test]
fn no_subcommand_shows_usage() {
    bin()
        .assert()
        .success()
        .stdout(predicate::str::contains("datasource-workflow warnings"))
        .stdout(predicate::str::contains("--snapshot"));
}

#[test]
fn warnings_for_author_list_commands() {
    bin()
        .args(["warnings", "--snapshot", fixture().as_str(), "--item", "/sitecore/content/Home", "--user", "author"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Datasource Item in Workflow"))
        .stdout(predicate::str::contains("'/sitecore/content/Data/Promo'"))
        .stdout(predicate::str::contains("Approve"))
        .stdout(predicate::str::contains("3 datasource item(s) in workflow"));
}

#[test]
fn warnings_as_json() {
    let output = bin()
        .args([
            "warnings", "--snapshot", fixture().as_str(), "--item", "/sitecore/content/Home",
            "--user", "author", "--format", "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["surface"], "editor-warnings");
    assert_eq!(report["records"].as_array().unwrap().len(), 3);
    assert_eq!(report["records"][0]["options"][0]["label"], "Submit");
    assert_eq!(report["records"][0]["kind"], "warning");
}

#[test]
fn validate_warns_but_succeeds() {
    bin()
        .args(["validate", "--snapshot", fixture().as_str(), "--item", "/sitecore/content/Home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Component Workflow State"))
        .stdout(predicate::str::contains("are not in a final workflow state."));

    bin()
        .args(["validate", "--snapshot", fixture().as_str(), "--item", "/sitecore/content/About"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Valid"));
}

#[test]
fn unknown_item_fails() {
    bin()
        .args(["datasources", "--snapshot", fixture().as_str(), "--item", "/sitecore/content/Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("was not found"));
}

#[test]
fn unknown_repository_fails() {
    bin()
        .args([
            "datasources", "--snapshot", fixture().as_str(), "--item", "/sitecore/content/Home",
            "--repository", "core",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown repository 'core'"));
}

fn target(subcommand: &str, extra: &[&str]) -> Commands {
    let fixture = fixture();
    let mut args = vec![
        "datasource-workflow",
        subcommand,
        "--snapshot",
        fixture.as_str(),
        "--item",
        "/sitecore/content/Home",
    ];
    args.extend_from_slice(extra);
    parse(&args)
}

#[test]
fn datasources_report_every_status() {
    let Commands::Datasources(args) = target("datasources", &["--format", "json"]) else {
        panic!("expected the datasources command");
    };
    let mut config = NotifierConfig::default();
    config.editor.base_url = Some("https://cms.example.com".to_string());

    let rendered = DatasourcesCommand::new(args, config).render().unwrap();
    let entries: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    let statuses: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["status"].as_str().unwrap())
        .collect();

    assert_eq!(statuses, vec!["actionable", "final", "actionable", "unresolved", "actionable"]);
    assert_eq!(entries[2]["state"], "Awaiting Approval");
    assert_eq!(entries[2]["version"], 2);
    assert!(entries[0]["editor_url"]
        .as_str()
        .unwrap()
        .starts_with("https://cms.example.com/sitecore/shell/Applications/Content%20Editor?id=%7B3C1715FE"));
}

#[test]
fn invalid_editor_base_url_is_reported() {
    let Commands::Warnings(args) = target("warnings", &[]) else {
        panic!("expected the warnings command");
    };
    let mut config = NotifierConfig::default();
    config.editor.base_url = Some("cms.example.com".to_string());

    let error = WarningsCommand::new(args, config).report().unwrap_err();
    assert!(error.to_string().contains("Invalid editor.base_url 'cms.example.com'"));
}

#[test]
fn no_access_message_follows_configuration() {
    let Commands::Warnings(args) = target("warnings", &["--user", "visitor"]) else {
        panic!("expected the warnings command");
    };

    let quiet = WarningsCommand::new(args.clone(), NotifierConfig::default()).report().unwrap();
    assert!(quiet.records.is_empty());

    let mut config = NotifierConfig::default();
    config.notifications.show_workflow_no_access_message = true;
    let informed = WarningsCommand::new(args, config).report().unwrap();
    assert_eq!(informed.records.len(), 3);
    assert!(informed.records.iter().all(|r| r.options.is_empty()));
}

#[test]
fn validate_report_serializes_outcome_fields() {
    let Commands::Validate(args) = target("validate", &["--no-personalization", "--no-multivariate"]) else {
        panic!("expected the validate command");
    };

    let report = ValidateCommand::new(args, NotifierConfig::default()).report().unwrap();
    assert_eq!(
        report.outcome.text,
        "The datasource item /sitecore/content/Data/Promo is not in a final workflow state."
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["severity"], "warning");
    assert_eq!(json["validator"], "Component Workflow State");
}
