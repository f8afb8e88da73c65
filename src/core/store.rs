//! In-memory contact store
//!
//! An ordered list of contacts plus the linear-scan operations the CLI needs:
//! lookup, duplicate detection, editing, and sorting. Order is insertion or
//! load order until an explicit [`ContactStore::sort`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::contact::{Contact, ContactPatch};
use crate::error::{ContactsError, Result};

/// Minimum length of an id prefix accepted by [`ContactStore::find_by_id`].
pub const MIN_ID_PREFIX: usize = 8;

/// Field used by [`ContactStore::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    LastName,
    FirstName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl ContactStore {
    pub const fn new() -> Self {
        Self {
            contacts: Vec::new(),
        }
    }

    /// Build a store from decoded records, assigning ids to any that lack one.
    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        let mut store = Self { contacts };
        store.ensure_ids();
        store
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }

    pub fn as_slice(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn into_contacts(self) -> Vec<Contact> {
        self.contacts
    }

    /// 1-based lookup, as shown to a human.
    pub fn get(&self, index: usize) -> Option<&Contact> {
        index.checked_sub(1).and_then(|i| self.contacts.get(i))
    }

    /// Append a contact, assigning an id if it has none.
    pub fn add(&mut self, mut contact: Contact) -> &Contact {
        if !contact.has_id() {
            contact.id = self.fresh_id();
        }
        self.contacts.push(contact);
        &self.contacts[self.contacts.len() - 1]
    }

    /// Case-insensitive match on last name, first name, and email together.
    pub fn exists_duplicate(&self, last_name: &str, first_name: &str, email: &str) -> bool {
        self.contacts.iter().any(|c| {
            eq_ignore_case(&c.last_name, last_name)
                && eq_ignore_case(&c.first_name, first_name)
                && eq_ignore_case(&c.email, email)
        })
    }

    /// Remove the contact at a 1-based index.
    pub fn remove_at(&mut self, index: usize) -> Result<Contact> {
        let position = self.position(index)?;
        Ok(self.contacts.remove(position))
    }

    /// Apply `patch` to the contact at a 1-based index.
    pub fn edit(&mut self, index: usize, patch: &ContactPatch) -> Result<&Contact> {
        let position = self.position(index)?;
        let contact = &mut self.contacts[position];
        contact.apply(patch);
        Ok(contact)
    }

    /// First contact whose last name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Contact> {
        self.contacts
            .iter()
            .find(|c| eq_ignore_case(&c.last_name, name))
    }

    /// Exact match for a full UUID, otherwise a case-insensitive prefix match
    /// for inputs of at least [`MIN_ID_PREFIX`] characters.
    pub fn find_by_id(&self, input: &str) -> Option<&Contact> {
        let input = input.trim();
        if let Ok(id) = Uuid::parse_str(input) {
            return self.contacts.iter().find(|c| c.id == id);
        }
        if input.chars().count() < MIN_ID_PREFIX {
            return None;
        }
        let prefix = input.to_lowercase();
        self.contacts
            .iter()
            .find(|c| c.id.to_string().starts_with(&prefix))
    }

    /// Stable sort by `key`, reversed afterwards when descending.
    pub fn sort(&mut self, key: SortKey, direction: SortDirection) {
        match key {
            SortKey::LastName => self.contacts.sort_by(|a, b| a.last_name.cmp(&b.last_name)),
            SortKey::FirstName => self
                .contacts
                .sort_by(|a, b| a.first_name.cmp(&b.first_name)),
        }
        if direction == SortDirection::Descending {
            self.contacts.reverse();
        }
    }

    /// Append contacts whose ids are not already present. Returns how many
    /// were added.
    pub fn merge(&mut self, other: Self) -> usize {
        let mut known: HashSet<Uuid> = self.contacts.iter().map(|c| c.id).collect();
        let mut added = 0;
        for contact in other.contacts {
            if known.insert(contact.id) {
                self.contacts.push(contact);
                added += 1;
            }
        }
        added
    }

    /// Give every id-less record a fresh id that does not collide with any id
    /// already in the store. Returns how many records were migrated.
    pub fn ensure_ids(&mut self) -> usize {
        let mut known: HashSet<Uuid> = self
            .contacts
            .iter()
            .filter(|c| c.has_id())
            .map(|c| c.id)
            .collect();
        let mut migrated = 0;
        for contact in self.contacts.iter_mut().filter(|c| !c.has_id()) {
            contact.id = unused_id(&known);
            known.insert(contact.id);
            migrated += 1;
        }
        migrated
    }

    fn fresh_id(&self) -> Uuid {
        let known: HashSet<Uuid> = self.contacts.iter().map(|c| c.id).collect();
        unused_id(&known)
    }

    fn position(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.contacts.len() {
            return Err(ContactsError::InvalidSelection(format!(
                "contact number {index} is out of range (1-{})",
                self.contacts.len()
            )));
        }
        Ok(index - 1)
    }
}

impl<'a> IntoIterator for &'a ContactStore {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.iter()
    }
}

fn unused_id(known: &HashSet<Uuid>) -> Uuid {
    loop {
        let id = Uuid::new_v4();
        if !known.contains(&id) {
            return id;
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContactStore {
        let mut store = ContactStore::new();
        store.add(Contact::new("Martin", "Paul", "paul@example.com", "111"));
        store.add(Contact::new("Durand", "Alice", "alice@example.com", "222"));
        store.add(Contact::new("Bernard", "Zoe", "zoe@example.com", "333"));
        store
    }

    fn last_names(store: &ContactStore) -> Vec<&str> {
        store.iter().map(|c| c.last_name.as_str()).collect()
    }

    #[test]
    fn test_add_assigns_missing_id() {
        let mut store = ContactStore::new();
        let added = store.add(Contact::unassigned("Doe", "Jane", "", ""));
        assert!(added.has_id());
    }

    #[test]
    fn test_add_keeps_existing_id() {
        let mut store = ContactStore::new();
        let contact = Contact::new("Doe", "Jane", "", "");
        let id = contact.id;
        assert_eq!(store.add(contact).id, id);
    }

    #[test]
    fn test_exists_duplicate_requires_all_three_fields() {
        let store = sample();
        assert!(store.exists_duplicate("MARTIN", "paul", "Paul@Example.com"));
        assert!(!store.exists_duplicate("Martin", "Paul", "other@example.com"));
        assert!(!store.exists_duplicate("Martin", "Pierre", "paul@example.com"));
        assert!(!store.exists_duplicate("Martinez", "Paul", "paul@example.com"));
    }

    #[test]
    fn test_remove_at_is_one_based() {
        let mut store = sample();
        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.last_name, "Martin");
        assert_eq!(last_names(&store), vec!["Durand", "Bernard"]);
    }

    #[test]
    fn test_remove_out_of_range_leaves_store_unchanged() {
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
        assert_eq!(store, before);
    }

    #[test]
    fn test_edit_applies_only_supplied_fields() {
        let mut store = sample();
        let patch = ContactPatch {
            phone: Some("999".to_string()),
            email: Some(String::new()),
            ..ContactPatch::default()
        };
        let edited = store.edit(2, &patch).unwrap();
        assert_eq!(edited.phone, "999");
        assert_eq!(edited.email, "alice@example.com");
        assert!(store.edit(9, &patch).is_err());
    }

    #[test]
    fn test_find_by_name_is_case_insensitive_exact() {
        let store = sample();
        assert_eq!(store.find_by_name("durand").unwrap().first_name, "Alice");
        assert!(store.find_by_name("Dur").is_none());
    }

    #[test]
    fn test_find_by_name_returns_first_hit() {
        let mut store = sample();
        store.add(Contact::new("Durand", "Bob", "bob@example.com", "444"));
        assert_eq!(store.find_by_name("Durand").unwrap().first_name, "Alice");
    }

    #[test]
    fn test_find_by_full_id() {
        let store = sample();
        let id = store.get(3).unwrap().id;
        assert_eq!(store.find_by_id(&id.to_string()).unwrap().id, id);
        assert_eq!(
            store
                .find_by_id(&id.to_string().to_uppercase())
                .unwrap()
                .id,
            id
        );
    }

    #[test]
    fn test_find_by_id_prefix_needs_eight_chars() {
        let store = sample();
        let id = store.get(2).unwrap().id.to_string();
        let prefix = id[..8].to_uppercase();
        assert_eq!(
            store.find_by_id(&prefix).unwrap().id.to_string(),
            id
        );
        assert!(store.find_by_id(&id[..7]).is_none());
    }

    #[test]
    fn test_sort_by_last_name_both_directions() {
        let mut store = sample();
        store.sort(SortKey::LastName, SortDirection::Ascending);
        let ascending: Vec<String> = store.iter().map(|c| c.last_name.clone()).collect();
        assert_eq!(ascending, vec!["Bernard", "Durand", "Martin"]);

        store.sort(SortKey::LastName, SortDirection::Descending);
        let mut descending: Vec<String> = store.iter().map(|c| c.last_name.clone()).collect();
        descending.reverse();
        assert_eq!(descending, ascending);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut store = ContactStore::new();
        store.add(Contact::new("Same", "First", "", ""));
        store.add(Contact::new("Same", "Second", "", ""));
        store.add(Contact::new("Alpha", "Third", "", ""));
        store.sort(SortKey::LastName, SortDirection::Ascending);
        let firsts: Vec<&str> = store.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(firsts, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn test_sort_by_first_name() {
        let mut store = sample();
        store.sort(SortKey::FirstName, SortDirection::Ascending);
        let firsts: Vec<&str> = store.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(firsts, vec!["Alice", "Paul", "Zoe"]);
    }

    #[test]
    fn test_merge_skips_known_ids() {
        let mut store = sample();
        let mut incoming = ContactStore::new();
        incoming.add(store.get(1).unwrap().clone());
        incoming.add(Contact::new("Petit", "Luc", "", ""));
        assert_eq!(store.merge(incoming), 1);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_ensure_ids_assigns_unique_ids() {
        let existing = Contact::new("Kept", "Id", "", "");
        let existing_id = existing.id;
        let store = ContactStore::from_contacts(vec![
            existing,
            Contact::unassigned("A", "a", "", ""),
            Contact::unassigned("B", "b", "", ""),
        ]);
        let ids: HashSet<Uuid> = store.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(store.iter().all(Contact::has_id));
        assert_eq!(store.get(1).unwrap().id, existing_id);
    }
}
