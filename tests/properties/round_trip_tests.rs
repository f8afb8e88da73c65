use proptest::prelude::*;

use contacts::storage::json::ContactDocument;
use contacts::storage::text;
use contacts::{Contact, ContactStore};

/// Field text that survives the delimited format: no `;` and no line breaks.
fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9@. +-]{0,16}"
}

fn contacts() -> impl Strategy<Value = ContactStore> {
    prop::collection::vec((field(), field(), field(), field()), 0..12).prop_map(|rows| {
        ContactStore::from_contacts(
            rows.into_iter()
                .map(|(last, first, email, phone)| Contact::new(last, first, email, phone))
                .collect(),
        )
    })
}

proptest! {
    #[test]
    fn test_text_round_trip(store in contacts()) {
        let parsed = text::parse(&text::render(&store));
        prop_assert!(parsed.issues.is_empty());
        prop_assert_eq!(parsed.migrated, 0);
        prop_assert_eq!(parsed.store, store);
    }

    #[test]
    fn test_json_round_trip(store in contacts()) {
        let raw = ContactDocument::new(&store).to_json().unwrap();
        let document = ContactDocument::from_json(&raw).unwrap();
        prop_assert_eq!(document.contact_count, store.len());
        prop_assert_eq!(document.into_store(), store);
    }
}
