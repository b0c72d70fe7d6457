use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use gen3_core::core_api::{Engine, Session};
use gen3_render::{
    render_json_info, render_json_validation, render_text_sheet, render_text_validation,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

#[derive(Debug, Parser)]
#[command(version, about = "Inspect and validate Gen 3 handheld save files")]
struct Cli {
    #[arg(value_name = "SAVE_FILE")]
    path: PathBuf,
    /// Print which save slot (A/B) is active.
    #[arg(long)]
    slot: bool,
    /// Print the active slot's save counter.
    #[arg(long)]
    counter: bool,
    /// Print the detected game version.
    #[arg(long)]
    game: bool,
    /// Print the section id -> offset table.
    #[arg(long)]
    sections: bool,
    /// Print ids of sections missing from the active slot.
    #[arg(long)]
    missing: bool,
    /// Print per-section checksum status.
    #[arg(long)]
    checksums: bool,
    /// Run structure validation and print errors/warnings.
    #[arg(long)]
    validate: bool,
    /// Scan a section for valid character records; prints offsets.
    #[arg(long, value_name = "SECTION_ID")]
    scan: Option<u16>,
    /// Entry stride in bytes for --scan (80 for PC boxes, 100 for party).
    #[arg(long = "entry-size", default_value_t = 80, requires = "scan")]
    entry_size: usize,
    /// Maximum entries to scan with --scan.
    #[arg(long = "max-entries", default_value_t = 30, requires = "scan")]
    max_entries: usize,
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Clone, Copy)]
struct FieldSelection {
    slot: bool,
    counter: bool,
    game: bool,
    sections: bool,
    missing: bool,
    checksums: bool,
}

impl FieldSelection {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            slot: cli.slot,
            counter: cli.counter,
            game: cli.game,
            sections: cli.sections,
            missing: cli.missing,
            checksums: cli.checksums,
        }
    }

    fn is_field_mode(&self) -> bool {
        self.slot || self.counter || self.game || self.sections || self.missing || self.checksums
    }

    fn selected_pairs(&self, session: &Session) -> Vec<(&'static str, String)> {
        let info = session.info();
        let mut out = Vec::new();

        if self.slot {
            out.push(("slot", info.active_slot.to_string()));
        }
        if self.counter {
            out.push(("counter", info.save_counter.to_string()));
        }
        if self.game {
            out.push(("game", info.display_name.clone()));
        }
        if self.sections {
            let table = session
                .section_entries()
                .into_iter()
                .map(|e| format!("{}:0x{:06X}", e.id, e.offset))
                .collect::<Vec<_>>()
                .join(",");
            out.push(("sections", table));
        }
        if self.missing {
            let missing = info
                .missing_sections
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            out.push(("missing", missing));
        }
        if self.checksums {
            let table = session
                .section_entries()
                .into_iter()
                .map(|e| format!("{}:{}", e.id, if e.checksum_ok { "ok" } else { "bad" }))
                .collect::<Vec<_>>()
                .join(",");
            out.push(("checksums", table));
        }

        out
    }

    fn selected_json(&self, session: &Session) -> JsonMap<String, JsonValue> {
        let info = session.info();
        let mut out = JsonMap::new();

        if self.slot {
            out.insert(
                "slot".to_string(),
                JsonValue::String(info.active_slot.to_string()),
            );
        }
        if self.counter {
            out.insert("counter".to_string(), JsonValue::from(info.save_counter));
        }
        if self.game {
            out.insert(
                "game".to_string(),
                JsonValue::String(info.display_name.clone()),
            );
        }
        if self.sections || self.checksums {
            out.insert(
                "sections".to_string(),
                JsonValue::Array(
                    session
                        .section_entries()
                        .into_iter()
                        .map(|e| {
                            let mut m = JsonMap::new();
                            m.insert("id".to_string(), JsonValue::from(e.id));
                            m.insert("offset".to_string(), JsonValue::from(e.offset));
                            if self.checksums {
                                m.insert(
                                    "checksum_ok".to_string(),
                                    JsonValue::Bool(e.checksum_ok),
                                );
                            }
                            JsonValue::Object(m)
                        })
                        .collect(),
                ),
            );
        }
        if self.missing {
            out.insert(
                "missing".to_string(),
                JsonValue::Array(
                    info.missing_sections
                        .iter()
                        .map(|&id| JsonValue::from(id))
                        .collect(),
                ),
            );
        }

        out
    }
}

fn main() {
    let cli = Cli::parse();
    let fields = FieldSelection::from_cli(&cli);

    let bytes = fs::read(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", cli.path.display());
        process::exit(1);
    });

    let engine = Engine::new();

    // Validation has its own result shape and never needs a Session.
    if cli.validate {
        let report = engine.validate_bytes(&bytes);
        if cli.json {
            print_json(&render_json_validation(&report));
        } else {
            print!("{}", render_text_validation(&report));
        }
        if !report.valid {
            process::exit(1);
        }
        return;
    }

    let session = engine.open_bytes(&bytes).unwrap_or_else(|e| {
        eprintln!("Error parsing {}:", cli.path.display());
        eprintln!("  {}", e);
        process::exit(1);
    });

    if let Some(section_id) = cli.scan {
        let offsets = session.scan_section(section_id, cli.entry_size, cli.max_entries);
        if cli.json {
            print_json(&JsonValue::Array(
                offsets.iter().map(|&o| JsonValue::from(o)).collect(),
            ));
        } else {
            for offset in offsets {
                println!("0x{offset:06X}");
            }
        }
        return;
    }

    if cli.json {
        let json = if fields.is_field_mode() {
            JsonValue::Object(fields.selected_json(&session))
        } else {
            render_json_info(&session)
        };
        print_json(&json);
        return;
    }

    if fields.is_field_mode() {
        for (key, value) in fields.selected_pairs(&session) {
            println!("{key}={value}");
        }
        return;
    }

    print!("{}", render_text_sheet(&session));
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}
