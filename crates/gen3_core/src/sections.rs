use crate::diagnostics::Diagnostics;
use crate::layout::{
    SECTION_CHECKSUM_OFFSET, SECTION_COUNT, SECTION_ID_OFFSET, SECTION_SIZE, SectionMap,
    section_data_size,
};
use crate::reader::SliceReader;
use crate::slot::is_blank_save;

const COMPONENT: &str = "SectionMap";

/// Walks the 14 fixed-size regions of a slot and maps each in-range
/// section id to its absolute offset.
///
/// Section identity is independent of physical position; ids may appear
/// in any of the 14 positions. Duplicate ids overwrite (last position
/// wins) and out-of-range ids are skipped - both are corruption signs
/// that are reported but never abort the walk.
pub fn build_section_map(data: &[u8], base_offset: usize, diag: &mut Diagnostics) -> SectionMap {
    let mut map = SectionMap::new();

    if is_blank_save(data) {
        diag.error(
            COMPONENT,
            "save image is blank/uninitialized (all 0xFF or no valid slot)",
        );
        return map;
    }

    let r = SliceReader::new(data);

    for section_index in 0..SECTION_COUNT {
        let section_offset = base_offset + section_index * SECTION_SIZE;

        match r.read_u16(section_offset + SECTION_ID_OFFSET) {
            Ok(section_id) if (section_id as usize) < SECTION_COUNT => {
                map.insert(section_id, section_offset);
            }
            Ok(section_id) => {
                diag.warn(
                    COMPONENT,
                    format!("invalid section id {section_id} at index {section_index}"),
                );
            }
            Err(e) => {
                diag.warn(
                    COMPONENT,
                    format!("error reading section {section_index}: {e}"),
                );
            }
        }
    }

    if map.len() < SECTION_COUNT {
        diag.warn(
            COMPONENT,
            format!("only found {}/{} sections", map.len(), SECTION_COUNT),
        );
        diag.warn(COMPONENT, format!("missing sections: {:?}", map.missing_ids()));
    }

    map
}

/// Recomputes a section's checksum and compares it to the stored value.
///
/// The checksum covers only the section's declared data size, summed as
/// little-endian u32 words with wrapping arithmetic, then folded to 16
/// bits by adding the high half to the low half exactly once. The footer
/// (id/checksum fields) is never included. A truncated buffer fails the
/// check rather than erroring.
pub fn validate_section_checksum(data: &[u8], section_offset: usize, section_id: u16) -> bool {
    let size = section_data_size(section_id);
    let r = SliceReader::new(data);

    let Ok(stored) = r.read_u16(section_offset + SECTION_CHECKSUM_OFFSET) else {
        return false;
    };

    match compute_section_checksum(&r, section_offset, size) {
        Ok(calculated) => calculated == stored,
        Err(_) => false,
    }
}

fn compute_section_checksum(
    r: &SliceReader<'_>,
    section_offset: usize,
    size: usize,
) -> std::io::Result<u16> {
    let mut checksum: u32 = 0;
    for i in (0..size).step_by(4) {
        let word = r.read_u32(section_offset + i)?;
        checksum = checksum.wrapping_add(word);
    }

    // One fold, not iterated: this matches the format's definition.
    Ok(((checksum >> 16) + (checksum & 0xFFFF)) as u16)
}
