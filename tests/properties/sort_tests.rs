use std::collections::HashSet;

use proptest::prelude::*;

use contacts::{Contact, ContactStore, SortDirection, SortKey};

fn distinct_last_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Za-z]{1,12}", 0..20)
        .prop_map(|names: HashSet<String>| names.into_iter().collect())
}

fn store_from(names: &[String]) -> ContactStore {
    ContactStore::from_contacts(
        names
            .iter()
            .map(|name| Contact::new(name.as_str(), "First", "", ""))
            .collect(),
    )
}

proptest! {
    #[test]
    fn test_descending_is_reverse_of_ascending(names in distinct_last_names()) {
        let mut ascending = store_from(&names);
        let mut descending = ascending.clone();
        ascending.sort(SortKey::LastName, SortDirection::Ascending);
        descending.sort(SortKey::LastName, SortDirection::Descending);

        let mut reversed = ascending.into_contacts();
        reversed.reverse();
        prop_assert_eq!(reversed, descending.into_contacts());
    }

    #[test]
    fn test_sort_keeps_every_contact(names in prop::collection::vec("[a-z]{0,6}", 0..20)) {
        let original = store_from(&names);
        let mut sorted = original.clone();
        sorted.sort(SortKey::LastName, SortDirection::Ascending);

        prop_assert_eq!(sorted.len(), original.len());
        let before: HashSet<_> = original.iter().map(|c| c.id).collect();
        let after: HashSet<_> = sorted.iter().map(|c| c.id).collect();
        prop_assert_eq!(before, after);
        prop_assert!(sorted
            .as_slice()
            .windows(2)
            .all(|pair| pair[0].last_name <= pair[1].last_name));
    }

    #[test]
    fn test_short_prefix_never_matches(len in 0usize..8) {
        let store = store_from(&["Martin".to_string()]);
        let id = store.get(1).unwrap().id.to_string();
        prop_assert!(store.find_by_id(&id[..len]).is_none());
    }
}
