use std::fs;
use std::sync::Arc;

use contacts::storage::json::{self, ContactDocument, RecoveryOutcome};
use contacts::storage::{Logged, text};
use contacts::test_utils::UnitTestFixture;
use contacts::{ActivityLog, Contact, ContactRepository, ContactStore, JsonRepository, TextRepository};

const VALID_ID: &str = "3f2b8c1e-9a4d-4e21-b8f0-5c6d7e8f9a0b";

#[test]
fn mixed_text_file_keeps_only_valid_records() {
    let fixture = UnitTestFixture::new();
    let path = fixture.create_file(
        "contacts.txt",
        &format!(
            "{VALID_ID};Martin;Claire;claire@example.com;0601\n\
             Bernard;Luc;luc@example.com\n\
             not-a-uuid;Durand;Alice;alice@example.com;0603\n"
        ),
    );

    let parsed = TextRepository::new(&path).load_parsed().unwrap();
    assert_eq!(parsed.store.len(), 1);
    assert_eq!(parsed.store.get(1).unwrap().id.to_string(), VALID_ID);
    assert_eq!(parsed.issues.len(), 2);
    assert_eq!(parsed.migrated, 0);
}

#[test]
fn latin1_line_is_skipped_not_fatal() {
    let fixture = UnitTestFixture::new();
    let path = fixture.path().join("contacts.txt");
    let mut content = format!("{VALID_ID};Martin;Paul;p@x;1\n").into_bytes();
    content.extend_from_slice(b"Dupr\xe9;Jos\xe9;j@x;2\n");
    fs::write(&path, content).unwrap();

    let repo = TextRepository::new(&path);
    let parsed = repo.load_parsed().unwrap();
    assert_eq!(parsed.store.len(), 1);
    assert_eq!(parsed.store.get(1).unwrap().last_name, "Martin");
    assert_eq!(
        parsed.issues,
        vec![text::LineIssue {
            line: 2,
            kind: text::LineIssueKind::Encoding,
        }]
    );
    assert_eq!(repo.load().unwrap().len(), 1);
}

#[test]
fn legacy_lines_get_fresh_ids_on_every_load() {
    let content = "Martin;Claire;claire@example.com;0601\n";
    let first = text::parse(content).store;
    let second = text::parse(content).store;

    let a = first.get(1).unwrap();
    let b = second.get(1).unwrap();
    assert!(a.has_id());
    assert!(b.has_id());
    assert_ne!(a.id, b.id);
    assert_eq!(a.last_name, b.last_name);
}

#[test]
fn json_save_rotates_backup() {
    let fixture = UnitTestFixture::new();
    let repo = JsonRepository::new(
        fixture.path().join("contacts.json"),
        fixture.path().join("contacts_backup.json"),
    );

    let mut store = ContactStore::new();
    store.add(Contact::new("Martin", "Claire", "", ""));
    repo.save(&store).unwrap();
    assert!(!repo.backup_path().exists());

    store.add(Contact::new("Bernard", "Luc", "", ""));
    repo.save(&store).unwrap();

    let backup = ContactDocument::from_json(&fs::read_to_string(repo.backup_path()).unwrap())
        .unwrap()
        .into_store();
    assert_eq!(backup.len(), 1);
    assert_eq!(repo.load().unwrap().len(), 2);
}

#[test]
fn recovery_without_backup_is_empty() {
    let fixture = UnitTestFixture::new();
    let primary = fixture.create_file("contacts.json", "garbage");
    let repo = JsonRepository::new(primary, fixture.path().join("contacts_backup.json"));

    let recovery = repo.recover_from_backup();
    assert!(recovery.store.is_empty());
    assert!(matches!(recovery.outcome, RecoveryOutcome::NoBackup));

    let report = repo.load_report().unwrap();
    assert!(report.store.is_empty());
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn export_does_not_touch_backup() {
    let fixture = UnitTestFixture::new();
    let mut store = ContactStore::new();
    store.add(Contact::new("Martin", "Claire", "claire@example.com", "0601"));

    let path = fixture.path().join("out/export.json");
    json::export_to(&store, &path).unwrap();
    json::export_to(&store, &path).unwrap();

    let entries: Vec<_> = fs::read_dir(fixture.path().join("out"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(json::import_from(&path).unwrap(), store);
}

#[test]
fn logged_repository_writes_activity() {
    let fixture = UnitTestFixture::new();
    let log = Arc::new(ActivityLog::new(fixture.path().join("activity.log")));
    let repo = Logged::new(
        TextRepository::new(fixture.path().join("contacts.txt")),
        Arc::clone(&log),
    );

    let mut store = ContactStore::new();
    store.add(Contact::new("Martin", "Claire", "", ""));
    repo.save(&store).unwrap();
    assert_eq!(repo.load().unwrap(), store);

    let stats = log.stats().unwrap();
    assert_eq!(stats.success, 2);
    assert!(repo.inner().path().exists());
}
