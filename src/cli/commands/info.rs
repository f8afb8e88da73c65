//! contacts info - Show storage file details

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;
use crate::storage::json::FileReport;
use crate::storage::text::TextReport;
use crate::storage::{StorageFormat, TextRepository, json_repository};
use crate::utils::format_size;

#[derive(Args, Debug)]
pub struct InfoArgs {}

#[derive(Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
enum InfoReport {
    Text(TextReport),
    Json(FileReport),
}

pub fn run(ctx: &AppContext, _args: &InfoArgs) -> Result<()> {
    let report = match ctx.config.storage.format {
        StorageFormat::Text => {
            InfoReport::Text(TextRepository::new(&ctx.config.storage.text_file).inspect()?)
        }
        StorageFormat::Json => InfoReport::Json(json_repository(&ctx.config).inspect()?),
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok(report));
    }

    let mut layout = HumanLayout::new();
    layout.title("Storage");
    layout.kv("Root", &ctx.root.display().to_string());
    layout.kv("Config", &ctx.config_path.display().to_string());
    layout.kv("Format", ctx.config.storage.format.as_str());
    match &report {
        InfoReport::Text(text) => {
            layout.kv("File", &text.path.display().to_string());
            if !text.exists {
                layout.kv("Status", "not created yet");
            } else {
                layout
                    .kv("Size", &format_size(text.size_bytes.unwrap_or(0)))
                    .kv("Records", &text.records.to_string())
                    .kv("Skipped lines", &text.skipped_lines.to_string())
                    .kv("Without id", &text.legacy_records.to_string());
            }
        }
        InfoReport::Json(json) => {
            layout.kv("File", &json.path.display().to_string());
            if !json.exists {
                layout.kv("Status", "not created yet");
            } else {
                layout.kv("Size", &format_size(json.size_bytes.unwrap_or(0)));
                if let Some(modified) = json.modified {
                    layout.kv("Modified", &modified.format("%Y-%m-%d %H:%M:%S").to_string());
                }
                if let Some(doc) = &json.document {
                    layout
                        .kv("Version", &doc.version)
                        .kv("Saved at", &doc.saved_at.to_rfc3339())
                        .kv("Contacts", &doc.contact_count.to_string());
                }
                if let Some(err) = &json.document_error {
                    layout.kv("Unreadable", err);
                }
            }
            match &json.backup {
                Some(backup) => layout.kv(
                    "Backup",
                    &format!(
                        "{} ({})",
                        backup.path.display(),
                        format_size(backup.size_bytes)
                    ),
                ),
                None => layout.kv("Backup", "none"),
            };
        }
    }
    if let Some(path) = ctx.log.path() {
        layout.kv("Activity log", &path.display().to_string());
    }
    emit_human(layout);
    Ok(())
}
