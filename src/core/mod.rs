//! Core contact types and the in-memory store.

pub mod contact;
pub mod store;

pub use contact::{Contact, ContactPatch};
pub use store::{ContactStore, SortDirection, SortKey};
