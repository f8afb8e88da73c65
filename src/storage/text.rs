//! Delimited-text storage
//!
//! One contact per line, `id;lastName;firstName;email;phone`. Lines written
//! before ids existed carry only the four name/contact fields and receive a
//! fresh id when loaded. Fields are not escaped, so a `;` inside a value makes
//! that line unreadable on the next load.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::core::{Contact, ContactStore};
use crate::error::Result;
use crate::storage::{ContactRepository, LoadReport};
use crate::utils::file_size;

pub const DELIMITER: char = ';';

const CURRENT_FIELDS: usize = 5;
const LEGACY_FIELDS: usize = 4;

/// Why a line was skipped during load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineIssueKind {
    InvalidId(String),
    FieldCount(usize),
    /// Not valid UTF-8.
    Encoding,
}

/// A skipped line, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIssue {
    pub line: usize,
    pub kind: LineIssueKind,
}

impl std::fmt::Display for LineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            LineIssueKind::InvalidId(raw) => {
                write!(f, "line {}: invalid id {raw:?}", self.line)
            }
            LineIssueKind::FieldCount(count) => write!(
                f,
                "line {}: expected {CURRENT_FIELDS} or {LEGACY_FIELDS} fields, found {count}",
                self.line
            ),
            LineIssueKind::Encoding => write!(f, "line {}: not valid UTF-8", self.line),
        }
    }
}

/// Result of parsing a text file: the usable records plus what was skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedText {
    pub store: ContactStore,
    pub issues: Vec<LineIssue>,
    /// Records that arrived without an id and were given one.
    pub migrated: usize,
}

/// Parse file content. Never fails; bad lines become [`LineIssue`]s.
pub fn parse(content: &str) -> ParsedText {
    let mut lines = LineParser::default();
    for (idx, line) in content.lines().enumerate() {
        lines.push(idx + 1, line);
    }
    lines.finish()
}

/// Parse raw file bytes, decoding each line on its own so one line in a
/// foreign encoding is skipped instead of failing the whole file.
pub fn parse_bytes(content: &[u8]) -> ParsedText {
    let mut lines = LineParser::default();
    for (idx, raw) in content.split(|b| *b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) => lines.push(idx + 1, line),
            Err(_) => lines.skip(idx + 1, LineIssueKind::Encoding),
        }
    }
    lines.finish()
}

#[derive(Default)]
struct LineParser {
    contacts: Vec<Contact>,
    issues: Vec<LineIssue>,
}

impl LineParser {
    fn push(&mut self, line_no: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        match fields.as_slice() {
            [id, last, first, email, phone] => match Uuid::parse_str(id.trim()) {
                Ok(id) => self
                    .contacts
                    .push(Contact::with_id(id, *last, *first, *email, *phone)),
                Err(_) => self.skip(line_no, LineIssueKind::InvalidId((*id).to_string())),
            },
            [last, first, email, phone] => {
                self.contacts
                    .push(Contact::unassigned(*last, *first, *email, *phone));
            }
            other => self.skip(line_no, LineIssueKind::FieldCount(other.len())),
        }
    }

    fn skip(&mut self, line: usize, kind: LineIssueKind) {
        self.issues.push(LineIssue { line, kind });
    }

    fn finish(self) -> ParsedText {
        // Legacy ids are assigned once every explicit id is known, so they
        // cannot collide with one.
        let migrated = self.contacts.iter().filter(|c| !c.has_id()).count();
        ParsedText {
            store: ContactStore::from_contacts(self.contacts),
            issues: self.issues,
            migrated,
        }
    }
}

/// Render a store in the current five-field format.
pub fn render(store: &ContactStore) -> String {
    let mut out = String::new();
    for c in store {
        let _ = writeln!(
            out,
            "{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}{DELIMITER}{}",
            c.id, c.last_name, c.first_name, c.email, c.phone
        );
    }
    out
}

pub struct TextRepository {
    path: PathBuf,
}

impl TextRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load with the list of skipped lines. A missing file is an empty store.
    pub fn load_parsed(&self) -> Result<ParsedText> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "text store absent, starting empty");
            return Ok(ParsedText::default());
        }
        let raw = fs::read(&self.path)?;
        let parsed = parse_bytes(&raw);
        for issue in &parsed.issues {
            debug!(path = %self.path.display(), "skipping malformed line: {issue}");
        }
        if parsed.migrated > 0 {
            debug!(count = parsed.migrated, "assigned ids to legacy records");
        }
        Ok(parsed)
    }

    /// File details for `contacts info`.
    pub fn inspect(&self) -> Result<TextReport> {
        let size_bytes = file_size(&self.path)?;
        let parsed = self.load_parsed()?;
        Ok(TextReport {
            path: self.path.clone(),
            exists: size_bytes.is_some(),
            size_bytes,
            records: parsed.store.len(),
            skipped_lines: parsed.issues.len(),
            legacy_records: parsed.migrated,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TextReport {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub records: usize,
    pub skipped_lines: usize,
    pub legacy_records: usize,
}

impl ContactRepository for TextRepository {
    fn load_report(&self) -> Result<LoadReport> {
        let parsed = self.load_parsed()?;
        let mut warnings: Vec<String> = parsed
            .issues
            .iter()
            .map(|issue| format!("skipped {issue}"))
            .collect();
        if parsed.migrated > 0 {
            warnings.push(format!(
                "assigned new ids to {} records without one",
                parsed.migrated
            ));
        }
        Ok(LoadReport {
            store: parsed.store,
            warnings,
        })
    }

    fn save(&self, store: &ContactStore) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, render(store))?;
        debug!(path = %self.path.display(), count = store.len(), "text store written");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("text file {}", self.path.display())
    }
}
