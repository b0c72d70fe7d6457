use serde::{Deserialize, Serialize};

use crate::layout::SectionMap;
use crate::slot::SaveSlot;
use crate::version::GameVersion;

/// Structural summary of a successfully parsed save image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveInfo {
    pub active_slot: SaveSlot,
    pub slot_base: usize,
    pub save_counter: u32,
    pub version: GameVersion,
    pub display_name: String,
    pub section_map: SectionMap,
    pub missing_sections: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionEntry {
    pub id: u16,
    pub name: String,
    pub offset: usize,
    pub checksum_ok: bool,
}

/// Structure validation outcome. Only a too-small image makes the save
/// invalid; missing sections and checksum mismatches are warnings so a
/// single corrupted section never hides the rest of the save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}
