// Behavioral properties of the datasource workflow engine, exercised
// through the public API against the site fixture

use datasource_workflow::adapters::{EditorWarnings, EditorWarningsArgs, Processor, SaveGate, SaveGateArgs};
use datasource_workflow::content::{
    CollectOptions, ContentItem, RenderingReference, ReferenceCollector, TestVariantSource,
};
use datasource_workflow::notifications::{NotificationBuilder, Severity, TextMode, NO_ACCESS_CLAUSE};
use datasource_workflow::security::PrivilegeElevator;
use datasource_workflow::{ContentSnapshot, DeviceId, HostError, NotificationSettings, User};
use std::cell::Cell;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/site.json")
}

fn site() -> ContentSnapshot {
    ContentSnapshot::load(&fixture_path()).expect("site fixture should load")
}

fn item(snapshot: &ContentSnapshot, path: &str) -> ContentItem {
    snapshot.find_item("master", path).expect("fixture item")
}

/// Counts acquires and releases
#[derive(Default)]
struct CountingElevator {
    acquired: Cell<u32>,
    released: Cell<u32>,
}

impl PrivilegeElevator for CountingElevator {
    fn acquire(&self) {
        self.acquired.set(self.acquired.get() + 1);
    }

    fn release(&self) {
        self.released.set(self.released.get() + 1);
    }
}

struct BrokenTestingStore;

impl TestVariantSource for BrokenTestingStore {
    fn variable_item(&self, _reference: &RenderingReference) -> Result<Option<ContentItem>, HostError> {
        Err(HostError::Unavailable("testing store offline".to_string()))
    }
}

#[test]
fn item_without_references_has_no_datasources() {
    let snapshot = site();
    let user = User::new("author");
    let device = DeviceId::default();
    let settings = NotificationSettings::default();
    let ctx = snapshot.context(&user, &device, &settings);

    let promo = item(&snapshot, "/sitecore/content/Data/Promo");
    let set = ReferenceCollector::new(&ctx).all_unique_datasource_items(&promo, CollectOptions::default());
    assert!(set.is_empty());

    let mut args = EditorWarningsArgs::new(promo);
    EditorWarnings::new().process(&ctx, &mut args).unwrap();
    assert!(args.warnings.is_empty());
}

#[test]
fn id_and_path_references_to_one_item_collapse() {
    let snapshot = site();
    let user = User::new("author");
    let device = DeviceId::default();
    let settings = NotificationSettings::default();
    let ctx = snapshot.context(&user, &device, &settings);
    let home = item(&snapshot, "/sitecore/content/Home");

    let set = ReferenceCollector::new(&ctx).all_unique_datasource_items(&home, CollectOptions::default());
    let promos = set.iter().filter(|ds| ds.name == "Promo").count();
    assert_eq!(promos, 1);
    assert_eq!(set.len(), 5);
}

#[test]
fn terminal_and_unresolved_datasources_never_produce_output() {
    let snapshot = site();
    let user = User::new("author");
    let device = DeviceId::default();
    let settings = NotificationSettings {
        show_workflow_no_access_message: true,
        use_html_in_messaging: false,
    };
    let ctx = snapshot.context(&user, &device, &settings);

    let mut args = EditorWarningsArgs::new(item(&snapshot, "/sitecore/content/Home"));
    EditorWarnings::new().process(&ctx, &mut args).unwrap();

    for warning in &args.warnings {
        assert!(!warning.text.contains("/sitecore/content/Data/Hero"));
        assert!(!warning.text.contains("/sitecore/content/Data/Loose"));
        assert!(!warning.text.contains("'Approved'"));
    }

    // About only uses an approved item and an item outside any workflow
    let mut args = EditorWarningsArgs::new(item(&snapshot, "/sitecore/content/About"));
    EditorWarnings::new().process(&ctx, &mut args).unwrap();
    assert!(args.warnings.is_empty());
}

#[test]
fn users_without_write_access_get_no_options() {
    let snapshot = site();
    let user = User::new("visitor");
    let device = DeviceId::default();
    let settings = NotificationSettings {
        show_workflow_no_access_message: true,
        use_html_in_messaging: false,
    };
    let ctx = snapshot.context(&user, &device, &settings);

    let records = NotificationBuilder::new(&ctx)
        .records(&item(&snapshot, "/sitecore/content/Home"), TextMode::Plain);

    assert_eq!(records.len(), 3);
    for record in records {
        assert!(record.options.is_empty());
        assert!(record.text.ends_with(NO_ACCESS_CLAUSE));
    }
}

#[test]
fn save_gate_never_exceeds_warning() {
    let snapshot = site();
    let device = DeviceId::default();
    let settings = NotificationSettings::default();

    for user in ["author", "visitor", "anonymous"] {
        let user = User::new(user);
        let ctx = snapshot.context(&user, &device, &settings);
        for path in ["/sitecore/content/Home", "/sitecore/content/About", "/sitecore/content/Data/Promo"] {
            let mut args = SaveGateArgs::new(item(&snapshot, path));
            SaveGate::new().process(&ctx, &mut args).unwrap();
            assert!(args.outcome.severity <= Severity::MAX);
        }
    }
}

#[test]
fn single_non_final_datasource_uses_singular_text() {
    let snapshot = site();
    let user = User::new("author");
    let device = DeviceId::new("mobile");
    let settings = NotificationSettings::default();
    let ctx = snapshot.context(&user, &device, &settings);

    let outcome = SaveGate::new().evaluate(&ctx, &item(&snapshot, "/sitecore/content/Home"));
    assert_eq!(outcome.severity, Severity::Warning);
    assert_eq!(
        outcome.text,
        "The datasource item /sitecore/content/Data/Banner is not in a final workflow state."
    );
}

#[test]
fn elevation_is_released_when_variant_lookup_fails() {
    let snapshot = site();
    let user = User::new("author");
    let device = DeviceId::default();
    let settings = NotificationSettings::default();
    let elevator = CountingElevator::default();
    let store = BrokenTestingStore;
    let mut ctx = snapshot.context(&user, &device, &settings);
    ctx.elevator = &elevator;
    ctx.test_variants = &store;

    let mut args = EditorWarningsArgs::new(item(&snapshot, "/sitecore/content/Home"));
    EditorWarnings::new().process(&ctx, &mut args).unwrap();

    assert!(elevator.acquired.get() > 0);
    assert_eq!(elevator.acquired.get(), elevator.released.get());
    // Banner was only reachable through the test variants
    assert_eq!(args.warnings.len(), 2);
}
