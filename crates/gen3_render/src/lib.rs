use std::fmt::Write as _;

use gen3_core::core_api::{Session, ValidationReport};
use gen3_core::diagnostics::Severity;
use serde_json::{Map as JsonMap, Value as JsonValue};

const SECTION_COL_WIDTH_NAME: usize = 14;
const SECTION_COL_WIDTH_OFFSET: usize = 10;

pub fn render_json_info(session: &Session) -> JsonValue {
    let info = session.info();
    let mut out = JsonMap::new();

    out.insert("valid".to_string(), JsonValue::Bool(true));
    out.insert(
        "slot".to_string(),
        JsonValue::String(info.active_slot.to_string()),
    );
    out.insert("slot_base".to_string(), JsonValue::from(info.slot_base));
    out.insert(
        "save_counter".to_string(),
        JsonValue::from(info.save_counter),
    );
    out.insert(
        "game".to_string(),
        JsonValue::String(format!("{:?}", info.version)),
    );
    out.insert(
        "game_name".to_string(),
        JsonValue::String(info.display_name.clone()),
    );
    out.insert("sections".to_string(), sections_to_json(session));
    out.insert(
        "missing_sections".to_string(),
        JsonValue::Array(
            info.missing_sections
                .iter()
                .map(|&id| JsonValue::from(id))
                .collect(),
        ),
    );

    JsonValue::Object(out)
}

pub fn render_json_validation(report: &ValidationReport) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("valid".to_string(), JsonValue::Bool(report.valid));
    out.insert(
        "errors".to_string(),
        JsonValue::Array(
            report
                .errors
                .iter()
                .map(|e| JsonValue::String(e.clone()))
                .collect(),
        ),
    );
    out.insert(
        "warnings".to_string(),
        JsonValue::Array(
            report
                .warnings
                .iter()
                .map(|w| JsonValue::String(w.clone()))
                .collect(),
        ),
    );
    JsonValue::Object(out)
}

/// Fixed-width structural summary sheet.
pub fn render_text_sheet(session: &Session) -> String {
    let info = session.info();
    let mut out = String::new();

    let _ = writeln!(out, "GEN 3 SAVE FILE");
    let _ = writeln!(out, "===============");
    let _ = writeln!(out, "Game         : {}", info.display_name);
    let _ = writeln!(
        out,
        "Active slot  : {} (base 0x{:04X})",
        info.active_slot, info.slot_base
    );
    let _ = writeln!(out, "Save counter : {}", info.save_counter);
    out.push('\n');

    let _ = writeln!(
        out,
        "{:<4} {:<width_name$} {:<width_off$} {}",
        "ID",
        "Section",
        "Offset",
        "Checksum",
        width_name = SECTION_COL_WIDTH_NAME,
        width_off = SECTION_COL_WIDTH_OFFSET,
    );
    for entry in session.section_entries() {
        let _ = writeln!(
            out,
            "{:<4} {:<width_name$} 0x{:06X}   {}",
            entry.id,
            entry.name,
            entry.offset,
            if entry.checksum_ok { "ok" } else { "MISMATCH" },
            width_name = SECTION_COL_WIDTH_NAME,
        );
    }

    if !info.missing_sections.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Missing sections: {:?}", info.missing_sections);
    }

    let warnings: Vec<_> = session
        .diagnostics()
        .iter()
        .filter(|d| d.severity != Severity::Info)
        .collect();
    if !warnings.is_empty() {
        out.push('\n');
        for diag in warnings {
            let _ = writeln!(out, "[{}] {}", diag.component, diag.message);
        }
    }

    out
}

pub fn render_text_validation(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "valid={}",
        if report.valid { "true" } else { "false" }
    );
    for error in &report.errors {
        let _ = writeln!(out, "error: {error}");
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    out
}

fn sections_to_json(session: &Session) -> JsonValue {
    JsonValue::Array(
        session
            .section_entries()
            .into_iter()
            .map(|entry| {
                let mut obj = JsonMap::new();
                obj.insert("id".to_string(), JsonValue::from(entry.id));
                obj.insert("name".to_string(), JsonValue::String(entry.name));
                obj.insert("offset".to_string(), JsonValue::from(entry.offset));
                obj.insert(
                    "checksum_ok".to_string(),
                    JsonValue::Bool(entry.checksum_ok),
                );
                JsonValue::Object(obj)
            })
            .collect(),
    )
}
