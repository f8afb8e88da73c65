//! Contact record

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single contact.
///
/// `id` is the nil UUID until the record has been assigned one, which happens
/// when it enters a [`ContactStore`](super::store::ContactStore). Records read
/// from JSON without an `id` deserialize with the nil UUID and are migrated
/// on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub id: Uuid,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Contact {
    /// Create a contact with a freshly generated id.
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), last_name, first_name, email, phone)
    }

    /// Create a contact with a known id (used when loading from disk).
    pub fn with_id(
        id: Uuid,
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            last_name: last_name.into(),
            first_name: first_name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Create a contact that has no id yet.
    pub fn unassigned(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::nil(), last_name, first_name, email, phone)
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_nil()
    }

    /// Two records are the same contact when their ids match.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// First eight characters of the hyphenated id, enough for `find`.
    pub fn short_id(&self) -> String {
        self.id.to_string().chars().take(8).collect()
    }

    /// Apply a patch. Blank or unset fields keep their current value.
    pub fn apply(&mut self, patch: &ContactPatch) {
        fn take(target: &mut String, value: Option<&String>) {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                target.clone_from(value);
            }
        }
        take(&mut self.last_name, patch.last_name.as_ref());
        take(&mut self.first_name, patch.first_name.as_ref());
        take(&mut self.email, patch.email.as_ref());
        take(&mut self.phone, patch.phone.as_ref());
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) - {}",
            self.last_name, self.first_name, self.email, self.phone
        )
    }
}

/// Partial update for [`Contact::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactPatch {
    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        [&self.last_name, &self.first_name, &self.email, &self.phone]
            .iter()
            .all(|field| field.as_deref().is_none_or(str::is_empty))
    }
}
