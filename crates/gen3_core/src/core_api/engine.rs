use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::layout::{SAVE_COUNTER_OFFSET, SAVE_IMAGE_SIZE, SECTION_COUNT, SectionMap};
use crate::reader::SliceReader;
use crate::record::{is_valid_record, scan_for_records};
use crate::sections::{build_section_map, validate_section_checksum};
use crate::slot::{SaveSlot, find_active_save_slot, is_blank_save};
use crate::version::{GameVersion, detect_game_version};

use super::error::{CoreError, CoreErrorCode};
use super::types::{SaveInfo, SectionEntry, ValidationReport};

#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

/// A parsed save image plus the structural summary and the diagnostics
/// accumulated while building it. Everything here is a read-only view
/// derived from the owned bytes; nothing persists across parses.
#[derive(Debug)]
pub struct Session {
    data: Vec<u8>,
    info: SaveInfo,
    diagnostics: Vec<Diagnostic>,
}

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Parses a full save image. Fatal conditions (too small, blank,
    /// undetectable version) come back as typed errors; everything else
    /// is recorded as a diagnostic on the session.
    pub fn open_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> Result<Session, CoreError> {
        let bytes = bytes.as_ref();

        // Size gate comes before any offset read.
        if bytes.len() < SAVE_IMAGE_SIZE {
            return Err(CoreError::new(
                CoreErrorCode::TooSmall,
                format!(
                    "save file too small: {} bytes (expected {})",
                    bytes.len(),
                    SAVE_IMAGE_SIZE
                ),
            ));
        }

        if is_blank_save(bytes) {
            return Err(CoreError::new(
                CoreErrorCode::BlankSave,
                "save file is blank/uninitialized",
            ));
        }

        let mut diag = Diagnostics::new();

        let slot_base = find_active_save_slot(bytes);
        let section_map = build_section_map(bytes, slot_base, &mut diag);
        let version = detect_game_version(bytes, &section_map, &mut diag);

        if version == GameVersion::Invalid {
            return Err(CoreError::new(
                CoreErrorCode::UndetectedVersion,
                "could not detect game version - save may be corrupted",
            ));
        }

        // Already bounds-checked by the size gate above.
        let save_counter = SliceReader::new(bytes)
            .read_u32(slot_base + SAVE_COUNTER_OFFSET)
            .unwrap_or(0);

        let missing_sections = section_map.missing_ids();
        let info = SaveInfo {
            active_slot: SaveSlot::from_base(slot_base),
            slot_base,
            save_counter,
            version,
            display_name: version.name().to_string(),
            section_map,
            missing_sections,
        };

        Ok(Session {
            data: bytes.to_vec(),
            info,
            diagnostics: diag.into_entries(),
        })
    }

    /// Convenience wrapper when only the structural summary is wanted.
    pub fn get_save_info<B: AsRef<[u8]>>(&self, bytes: B) -> Result<SaveInfo, CoreError> {
        self.open_bytes(bytes).map(|session| session.info)
    }

    /// Validates structure without rejecting recoverable damage: missing
    /// sections and checksum mismatches populate warnings; only a
    /// too-small image is an error.
    pub fn validate_bytes<B: AsRef<[u8]>>(&self, bytes: B) -> ValidationReport {
        let bytes = bytes.as_ref();
        let mut report = ValidationReport {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        if bytes.len() < SAVE_IMAGE_SIZE {
            report.valid = false;
            report.errors.push(format!(
                "Save file too small: {} bytes (expected {})",
                bytes.len(),
                SAVE_IMAGE_SIZE
            ));
            return report;
        }

        let mut diag = Diagnostics::new();
        let slot_base = find_active_save_slot(bytes);
        let section_map = build_section_map(bytes, slot_base, &mut diag);

        for section_id in 0..SECTION_COUNT as u16 {
            if section_map.get(section_id).is_none() {
                report.warnings.push(format!("Missing section {section_id}"));
            }
        }

        for (section_id, offset) in section_map.iter() {
            if !validate_section_checksum(bytes, offset, section_id) {
                report
                    .warnings
                    .push(format!("Section {section_id} checksum mismatch"));
            }
        }

        report
    }
}

impl Session {
    pub fn info(&self) -> &SaveInfo {
        &self.info
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn section_map(&self) -> &SectionMap {
        &self.info.section_map
    }

    pub fn section_offset(&self, section_id: u16) -> Option<usize> {
        self.info.section_map.get(section_id)
    }

    pub fn is_section_checksum_valid(&self, section_id: u16) -> Option<bool> {
        self.section_offset(section_id)
            .map(|offset| validate_section_checksum(&self.data, offset, section_id))
    }

    /// Per-section entries in id order, with checksum status.
    pub fn section_entries(&self) -> Vec<SectionEntry> {
        self.info
            .section_map
            .iter()
            .map(|(id, offset)| SectionEntry {
                id,
                name: crate::layout::section_name(id).to_string(),
                offset,
                checksum_ok: validate_section_checksum(&self.data, offset, id),
            })
            .collect()
    }

    pub fn validation_report(&self) -> ValidationReport {
        Engine::new().validate_bytes(&self.data)
    }

    pub fn is_record_at(&self, offset: usize) -> bool {
        is_valid_record(&self.data, offset)
    }

    /// Scans a mapped section for valid character records at a fixed
    /// entry stride. Returns absolute offsets; an unmapped section scans
    /// as empty.
    pub fn scan_section(&self, section_id: u16, entry_size: usize, max_entries: usize) -> Vec<usize> {
        match self.section_offset(section_id) {
            Some(offset) => scan_for_records(&self.data, offset, entry_size, max_entries),
            None => Vec::new(),
        }
    }
}
