#![allow(dead_code)]

use gen3_core::layout::{
    SAVE_IMAGE_SIZE, SECTION_CHECKSUM_OFFSET, SECTION_COUNT, SECTION_ID_OFFSET, SECTION_SIZE,
    SLOT_B_BASE, section_data_size,
};

pub fn write_u16(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

pub fn write_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

pub fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// A factory-blank cartridge image: all 0xFF.
pub fn blank_image() -> Vec<u8> {
    vec![0xFF; SAVE_IMAGE_SIZE]
}

/// Reference checksum: wrapping u32 word sum over the section's data
/// size, folded once to 16 bits.
pub fn reference_checksum(data: &[u8], section_offset: usize, section_id: u16) -> u16 {
    let size = section_data_size(section_id);
    let mut sum: u32 = 0;
    for i in (0..size).step_by(4) {
        sum = sum.wrapping_add(u32::from_le_bytes([
            data[section_offset + i],
            data[section_offset + i + 1],
            data[section_offset + i + 2],
            data[section_offset + i + 3],
        ]));
    }
    ((sum >> 16) + (sum & 0xFFFF)) as u16
}

/// Recomputes and stores every section checksum in the slot at `base`.
pub fn stamp_checksums(data: &mut [u8], base: usize) {
    for i in 0..SECTION_COUNT {
        let section_offset = base + i * SECTION_SIZE;
        let id = read_u16(data, section_offset + SECTION_ID_OFFSET);
        if (id as usize) < SECTION_COUNT {
            let checksum = reference_checksum(data, section_offset, id);
            write_u16(data, section_offset + SECTION_CHECKSUM_OFFSET, checksum);
        }
    }
}

/// Builds a structurally valid image: slot A zeroed and populated with 14
/// sections whose ids are rotated by `rotation` relative to physical
/// position, slot B left factory-blank (0xFF). Counters default to A=5,
/// B=3 so slot A is active.
pub fn build_image(game_code: u32, emerald_marker: bool, rotation: usize) -> Vec<u8> {
    build_image_with_counters(game_code, emerald_marker, rotation, 5, 3)
}

pub fn build_image_with_counters(
    game_code: u32,
    emerald_marker: bool,
    rotation: usize,
    counter_a: u32,
    counter_b: u32,
) -> Vec<u8> {
    let mut image = blank_image();
    image[..SLOT_B_BASE].fill(0);

    for i in 0..SECTION_COUNT {
        let id = ((i + rotation) % SECTION_COUNT) as u16;
        let section_offset = i * SECTION_SIZE;
        write_u16(&mut image, section_offset + SECTION_ID_OFFSET, id);

        if id == 0 {
            write_u32(&mut image, section_offset + 0x0AC, game_code);
            if emerald_marker {
                image[section_offset + 0x890] = 1;
            }
        }
    }

    write_u32(&mut image, 0x0FFC, counter_a);
    write_u32(&mut image, SLOT_B_BASE + 0x0FFC, counter_b);
    stamp_checksums(&mut image, 0);

    image
}
