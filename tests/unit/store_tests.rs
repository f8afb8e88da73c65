use contacts::core::store::MIN_ID_PREFIX;
use contacts::test_utils::{TestCase, run_table_tests};
use contacts::{Contact, ContactPatch, ContactStore, ContactsError, SortDirection, SortKey};

fn sample() -> ContactStore {
    ContactStore::from_contacts(vec![
        Contact::new("Martin", "Claire", "claire@example.com", "0601"),
        Contact::new("Bernard", "Luc", "luc@example.com", "0602"),
        Contact::new("Durand", "Alice", "alice@example.com", "0603"),
    ])
}

#[test]
fn duplicate_detection_table() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "exact match",
            input: ("Martin", "Claire", "claire@example.com"),
            expected: true,
            should_panic: false,
        },
        TestCase {
            name: "case differs",
            input: ("MARTIN", "claire", "Claire@Example.COM"),
            expected: true,
            should_panic: false,
        },
        TestCase {
            name: "email differs",
            input: ("Martin", "Claire", "other@example.com"),
            expected: false,
            should_panic: false,
        },
        TestCase {
            name: "first name differs",
            input: ("Martin", "Paul", "claire@example.com"),
            expected: false,
            should_panic: false,
        },
    ];

    let store = sample();
    run_table_tests(cases, |(last, first, email)| {
        store.exists_duplicate(last, first, email)
    })
}

#[test]
fn find_by_id_prefix_table() -> Result<(), String> {
    let store = sample();
    let id = store.get(2).unwrap().id.to_string();

    let cases = vec![
        TestCase {
            name: "full id",
            input: id.clone(),
            expected: Some("Bernard".to_string()),
            should_panic: false,
        },
        TestCase {
            name: "minimum prefix",
            input: id[..MIN_ID_PREFIX].to_string(),
            expected: Some("Bernard".to_string()),
            should_panic: false,
        },
        TestCase {
            name: "uppercase prefix",
            input: id[..12].to_uppercase(),
            expected: Some("Bernard".to_string()),
            should_panic: false,
        },
        TestCase {
            name: "short prefix",
            input: id[..MIN_ID_PREFIX - 1].to_string(),
            expected: None,
            should_panic: false,
        },
        TestCase {
            name: "empty",
            input: String::new(),
            expected: None,
            should_panic: false,
        },
    ];

    run_table_tests(cases, |input| {
        store.find_by_id(&input).map(|c| c.last_name.clone())
    })
}

#[test]
fn remove_and_edit_reject_out_of_range() {
    let mut store = sample();
    let before = store.clone();
    assert!(matches!(
        store.remove_at(0),
        Err(ContactsError::InvalidSelection(_))
    ));
    assert!(matches!(
        store.remove_at(4),
        Err(ContactsError::InvalidSelection(_))
    ));
    let patch = ContactPatch {
        phone: Some("0700".to_string()),
        ..ContactPatch::default()
    };
    assert!(store.edit(9, &patch).is_err());
    assert_eq!(store, before);
}

#[test]
fn sort_by_first_name_then_reverse() {
    let mut store = sample();
    store.sort(SortKey::FirstName, SortDirection::Ascending);
    let firsts: Vec<&str> = store.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(firsts, ["Alice", "Claire", "Luc"]);

    store.sort(SortKey::FirstName, SortDirection::Descending);
    let firsts: Vec<&str> = store.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(firsts, ["Luc", "Claire", "Alice"]);
}

#[test]
fn merge_skips_known_ids() {
    let mut store = sample();
    let mut incoming = ContactStore::from_contacts(store.as_slice()[..1].to_vec());
    incoming.add(Contact::new("Petit", "Marc", "", ""));

    assert_eq!(store.merge(incoming), 1);
    assert_eq!(store.len(), 4);
    assert_eq!(store.get(4).unwrap().last_name, "Petit");
}
