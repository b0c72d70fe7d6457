use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::layout::{EMERALD_MARKER_END, EMERALD_MARKER_START, GAME_CODE_OFFSET, SectionMap};
use crate::reader::SliceReader;

const COMPONENT: &str = "GameDetect";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameVersion {
    FireRedLeafGreen,
    RubySapphire,
    Emerald,
    Invalid,
}

impl GameVersion {
    pub fn name(self) -> &'static str {
        match self {
            Self::FireRedLeafGreen => "FireRed/LeafGreen",
            Self::RubySapphire => "Ruby/Sapphire",
            Self::Emerald => "Emerald",
            Self::Invalid => "Invalid/Blank Save",
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies the save as one of the three game variants that share this
/// container layout.
///
/// The game code at section0+0x0AC is 1 in FireRed/LeafGreen. In
/// Ruby/Sapphire/Emerald the same field holds either the Emerald security
/// key or Ruby/Sapphire battle tower data (0 when absent), so any value
/// other than 1 is ambiguous on its own: the decision falls to a scan of
/// a trainer-data range only Emerald populates. Game code 1
/// short-circuits; the scan is skipped entirely.
pub fn detect_game_version(
    data: &[u8],
    section_map: &SectionMap,
    diag: &mut Diagnostics,
) -> GameVersion {
    if section_map.is_empty() {
        diag.error(
            COMPONENT,
            "no valid sections found - save image is blank or corrupted",
        );
        return GameVersion::Invalid;
    }

    let section0_offset = section_map.get(0).unwrap_or(0);
    if section_map.get(0).is_none() {
        diag.warn(COMPONENT, "section 0 not found");
    }
    if section_map.get(1).is_none() {
        diag.warn(COMPONENT, "section 1 not found");
    }

    let r = SliceReader::new(data);

    let game_code = match r.read_u32(section0_offset + GAME_CODE_OFFSET) {
        Ok(value) => value,
        Err(e) => {
            diag.error(COMPONENT, format!("game code field unreadable: {e}"));
            return GameVersion::Invalid;
        }
    };

    if game_code == 1 {
        diag.info(COMPONENT, "FireRed/LeafGreen detected: game code value was 1");
        return GameVersion::FireRedLeafGreen;
    }
    if game_code == 0 {
        diag.info(
            COMPONENT,
            "game code value was 0: Ruby/Sapphire unless Emerald-only data present",
        );
    }

    let marker_start = section0_offset + EMERALD_MARKER_START;
    let marker_end = section0_offset + EMERALD_MARKER_END;
    let marker = match r.read_bytes(marker_start, marker_end - marker_start) {
        Ok(bytes) => bytes,
        Err(e) => {
            diag.error(COMPONENT, format!("Emerald marker range unreadable: {e}"));
            return GameVersion::Invalid;
        }
    };

    if marker.iter().any(|&b| b != 0) {
        diag.info(COMPONENT, "Emerald detected: trainer data past 0x890");
        GameVersion::Emerald
    } else {
        diag.info(COMPONENT, "Ruby/Sapphire detected: no trainer data past 0x890");
        GameVersion::RubySapphire
    }
}
