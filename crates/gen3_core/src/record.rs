use crate::reader::SliceReader;

/// Offset of the encrypted payload within a record entry.
const PAYLOAD_OFFSET: usize = 0x20;
/// The payload is four 12-byte sub-blocks.
const PAYLOAD_SIZE: usize = 48;
const BLOCK_SIZE: usize = 12;

/// The two reserved personality values that never denote a real record.
const PERSONALITY_EMPTY: u32 = 0;
const PERSONALITY_UNINITIALIZED: u32 = 0xFFFF_FFFF;

/// Species ids live in two disjoint numbering spaces.
const SPECIES_RANGE_LOW: std::ops::RangeInclusive<u16> = 1..=251;
const SPECIES_RANGE_HIGH: std::ops::RangeInclusive<u16> = 277..=411;

const MAX_PLAUSIBLE_EXPERIENCE: u32 = 2_000_000;

/// Sub-block orderings for each `personality % 24`. Index 0 of each entry
/// is the physical position of the growth block. This table encodes the
/// cartridge's own shuffle algorithm and is fixed format data; it cannot
/// be derived.
pub const BLOCK_ORDERS: [[usize; 4]; 24] = [
    [0, 1, 2, 3],
    [0, 1, 3, 2],
    [0, 2, 1, 3],
    [0, 3, 1, 2],
    [0, 2, 3, 1],
    [0, 3, 2, 1],
    [1, 0, 2, 3],
    [1, 0, 3, 2],
    [2, 0, 1, 3],
    [3, 0, 1, 2],
    [2, 0, 3, 1],
    [3, 0, 2, 1],
    [1, 2, 0, 3],
    [1, 3, 0, 2],
    [2, 1, 0, 3],
    [3, 1, 0, 2],
    [2, 3, 0, 1],
    [3, 2, 0, 1],
    [1, 2, 3, 0],
    [1, 3, 2, 0],
    [2, 1, 3, 0],
    [3, 1, 2, 0],
    [2, 3, 1, 0],
    [3, 2, 1, 0],
];

/// The fields of a record that the plausibility check looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSummary {
    pub personality: u32,
    pub ot_id: u32,
    pub species: u16,
    pub experience: u32,
}

/// Decrypts the record at `offset` and extracts its growth-block fields.
///
/// Returns None for sentinel personalities and for any truncated read;
/// a bad offset is "no record here", never an error.
pub fn decode_record(data: &[u8], offset: usize) -> Option<RecordSummary> {
    let r = SliceReader::new(data);

    let personality = r.read_u32(offset).ok()?;
    let ot_id = r.read_u32(offset + 4).ok()?;

    if personality == PERSONALITY_EMPTY || personality == PERSONALITY_UNINITIALIZED {
        return None;
    }

    let key = personality ^ ot_id;

    let mut decrypted = [0u8; PAYLOAD_SIZE];
    for i in (0..PAYLOAD_SIZE).step_by(4) {
        let word = r.read_u32(offset + PAYLOAD_OFFSET + i).ok()?;
        decrypted[i..i + 4].copy_from_slice(&(word ^ key).to_le_bytes());
    }

    let block_order = BLOCK_ORDERS[(personality % 24) as usize];
    let growth_start = block_order[0] * BLOCK_SIZE;
    let growth = &decrypted[growth_start..growth_start + BLOCK_SIZE];

    let species = u16::from_le_bytes([growth[0], growth[1]]);
    let experience = u32::from_le_bytes([growth[4], growth[5], growth[6], growth[7]]);

    Some(RecordSummary {
        personality,
        ot_id,
        species,
        experience,
    })
}

/// Whether the bytes at `offset` plausibly hold a real character record.
pub fn is_valid_record(data: &[u8], offset: usize) -> bool {
    let Some(record) = decode_record(data, offset) else {
        return false;
    };

    let species_valid = SPECIES_RANGE_LOW.contains(&record.species)
        || SPECIES_RANGE_HIGH.contains(&record.species);

    species_valid && record.experience < MAX_PLAUSIBLE_EXPERIENCE
}

/// Scans up to `max_entries` fixed-size entries starting at `region_offset`
/// and returns the absolute offsets that validate as real records.
pub fn scan_for_records(
    data: &[u8],
    region_offset: usize,
    entry_size: usize,
    max_entries: usize,
) -> Vec<usize> {
    if entry_size == 0 {
        return Vec::new();
    }

    (0..max_entries)
        .map(|i| region_offset + i * entry_size)
        .filter(|&offset| is_valid_record(data, offset))
        .collect()
}
