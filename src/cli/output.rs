use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use crate::core::Contact;
use crate::error::{ContactsError, Result};
use crate::utils::truncate_string;

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    Error { code: String, message: String },
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    RobotResponse {
        status: RobotStatus::Ok,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

pub fn robot_error(
    code: impl Into<String>,
    message: impl Into<String>,
) -> RobotResponse<serde_json::Value> {
    RobotResponse {
        status: RobotStatus::Error {
            code: code.into(),
            message: message.into(),
        },
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data: serde_json::Value::Null,
        warnings: Vec::new(),
    }
}

impl<T> RobotResponse<T> {
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

pub fn emit_robot<T: Serialize>(response: &RobotResponse<T>) -> Result<()> {
    emit_json(response)
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| ContactsError::Serialization(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 18,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let key_style = style(key).dim().to_string();
        self.lines.push(format!(
            "{key_style:width$} {value}",
            width = self.key_width
        ));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

/// Serializable view of a contact with its 1-based position.
#[derive(Debug, Clone, Serialize)]
pub struct ContactEntry {
    pub index: usize,
    pub id: String,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactEntry {
    pub fn new(index: usize, contact: &Contact) -> Self {
        Self {
            index,
            id: contact.id.to_string(),
            last_name: contact.last_name.clone(),
            first_name: contact.first_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

/// One table row: `[n] id-prefix  last  first  email  phone`.
pub fn contact_row(index: usize, contact: &Contact) -> String {
    format!(
        "[{index}] {}  {:<16} {:<16} {:<28} {}",
        style(contact.short_id()).dim(),
        truncate_string(&contact.last_name, 16),
        truncate_string(&contact.first_name, 16),
        truncate_string(&contact.email, 28),
        contact.phone
    )
}

/// Full detail block for a single contact.
pub fn contact_detail(layout: &mut HumanLayout, contact: &Contact) {
    layout
        .kv("ID", &contact.id.to_string())
        .kv("Last name", &contact.last_name)
        .kv("First name", &contact.first_name)
        .kv("Email", &contact.email)
        .kv("Phone", &contact.phone);
}
