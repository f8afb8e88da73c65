//! contacts - a small console contact manager
//!
//! Contacts live in a delimited text file or a JSON document with a rolling
//! backup. The [`storage`] layer owns loading, legacy-record migration, and
//! recovery; [`cli`] is a thin shell over it.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod storage;
pub mod test_utils;
pub mod utils;

pub use crate::core::{Contact, ContactPatch, ContactStore, SortDirection, SortKey};
pub use error::{ContactsError, Result};
pub use logging::ActivityLog;
pub use storage::{ContactRepository, JsonRepository, StorageFormat, TextRepository};
