use serde::{Deserialize, Serialize};

/// Total size of a full save image: two slots plus trailing hardware data.
pub const SAVE_IMAGE_SIZE: usize = 0x20000;

pub const SLOT_A_BASE: usize = 0x0000;
pub const SLOT_B_BASE: usize = 0xE000;

/// Each slot holds 14 contiguous 0x1000-byte sections.
pub const SECTION_SIZE: usize = 0x1000;
pub const SECTION_COUNT: usize = 14;

/// Slot-relative offset of the 32-bit save counter.
pub const SAVE_COUNTER_OFFSET: usize = 0x0FFC;

/// Section-relative offset of the 16-bit section id.
pub const SECTION_ID_OFFSET: usize = 0xFF4;
/// Section-relative offset of the stored 16-bit checksum.
pub const SECTION_CHECKSUM_OFFSET: usize = 0xFF6;

/// Section-0-relative offset of the 32-bit game code field.
pub const GAME_CODE_OFFSET: usize = 0x0AC;

/// Section-0-relative range that only Emerald writes to.
pub const EMERALD_MARKER_START: usize = 0x890;
pub const EMERALD_MARKER_END: usize = 0xF2C;

/// Checksummed data size for each section id. Ids outside the table
/// (forward-compat) use the 3968-byte default.
pub fn section_data_size(section_id: u16) -> usize {
    match section_id {
        0 => 3884,  // Trainer info
        4 => 3848,  // Rival info
        13 => 2000, // PC buffer I
        _ => 3968,
    }
}

pub const SECTION_NAMES: [&str; SECTION_COUNT] = [
    "Trainer info",
    "Team/items",
    "Game state",
    "Misc data",
    "Rival info",
    "PC buffer A",
    "PC buffer B",
    "PC buffer C",
    "PC buffer D",
    "PC buffer E",
    "PC buffer F",
    "PC buffer G",
    "PC buffer H",
    "PC buffer I",
];

pub fn section_name(section_id: u16) -> &'static str {
    SECTION_NAMES
        .get(section_id as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// Mapping from section id (0-13) to absolute byte offset in the image.
///
/// A fixed array rather than a hash map: a missing section is an empty
/// slot, and the key space is exactly 0..14.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    offsets: [Option<usize>; SECTION_COUNT],
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `section_id -> offset`, overwriting any earlier entry.
    /// Ids outside 0-13 are the caller's problem and are ignored here.
    pub fn insert(&mut self, section_id: u16, offset: usize) {
        if let Some(slot) = self.offsets.get_mut(section_id as usize) {
            *slot = Some(offset);
        }
    }

    pub fn get(&self, section_id: u16) -> Option<usize> {
        self.offsets.get(section_id as usize).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.offsets.iter().filter(|o| o.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.iter().all(|o| o.is_none())
    }

    pub fn missing_ids(&self) -> Vec<u16> {
        self.offsets
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_none())
            .map(|(id, _)| id as u16)
            .collect()
    }

    /// Present entries as `(section_id, absolute_offset)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        self.offsets
            .iter()
            .enumerate()
            .filter_map(|(id, o)| o.map(|offset| (id as u16, offset)))
    }
}
