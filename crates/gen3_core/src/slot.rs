use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::{
    SAVE_COUNTER_OFFSET, SECTION_COUNT, SECTION_ID_OFFSET, SECTION_SIZE, SLOT_A_BASE, SLOT_B_BASE,
};
use crate::reader::SliceReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveSlot {
    A,
    B,
}

impl SaveSlot {
    pub fn base(self) -> usize {
        match self {
            Self::A => SLOT_A_BASE,
            Self::B => SLOT_B_BASE,
        }
    }

    pub fn from_base(base: usize) -> Self {
        if base == SLOT_B_BASE { Self::B } else { Self::A }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the physically active save slot by comparing the two 32-bit
/// save counters. The larger counter is newer unless the difference
/// exceeds 0x80000000, which means the smaller one wrapped past the
/// 32-bit boundary. Equal counters select slot B. A truncated image
/// falls back to slot A rather than failing; slot selection always
/// produces an answer.
pub fn find_active_save_slot(data: &[u8]) -> usize {
    let r = SliceReader::new(data);

    let (counter_a, counter_b) = match (
        r.read_u32(SLOT_A_BASE + SAVE_COUNTER_OFFSET),
        r.read_u32(SLOT_B_BASE + SAVE_COUNTER_OFFSET),
    ) {
        (Ok(a), Ok(b)) => (a, b),
        _ => return SLOT_A_BASE,
    };

    if counter_a > counter_b {
        if counter_a - counter_b > 0x8000_0000 {
            SLOT_B_BASE // B wrapped around, B is newer
        } else {
            SLOT_A_BASE
        }
    } else if counter_b - counter_a > 0x8000_0000 {
        SLOT_A_BASE // A wrapped around, A is newer
    } else {
        SLOT_B_BASE
    }
}

/// Cheap pre-filter for uninitialized images. A slot looks valid when the
/// section id of its first section is in 0-13; the image is blank only if
/// neither slot passes. A factory-blank cartridge reads 0xFFFF there.
pub fn is_blank_save(data: &[u8]) -> bool {
    if data.len() < SECTION_SIZE {
        return true;
    }

    let r = SliceReader::new(data);

    let slot_a_valid = r
        .read_u16(SLOT_A_BASE + SECTION_ID_OFFSET)
        .map(|id| (id as usize) < SECTION_COUNT)
        .unwrap_or(false);

    let slot_b_valid = r
        .read_u16(SLOT_B_BASE + SECTION_ID_OFFSET)
        .map(|id| (id as usize) < SECTION_COUNT)
        .unwrap_or(false);

    !slot_a_valid && !slot_b_valid
}
