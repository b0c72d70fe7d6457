use gen3_core::core_api::{Engine, Session};
use gen3_render::{
    render_json_info, render_json_validation, render_text_sheet, render_text_validation,
};
use serde_json::Value;

fn write_u16(data: &mut [u8], offset: usize, value: u16) {
    data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn write_u32(data: &mut [u8], offset: usize, value: u32) {
    data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Minimal valid image: slot A populated in id order with correct
/// checksums, slot B factory-blank.
fn build_image(game_code: u32) -> Vec<u8> {
    let mut image = vec![0xFFu8; 0x20000];
    image[..0xE000].fill(0);

    for i in 0..14usize {
        write_u16(&mut image, i * 0x1000 + 0xFF4, i as u16);
    }
    write_u32(&mut image, 0x0AC, game_code);
    write_u32(&mut image, 0x0FFC, 5);
    write_u32(&mut image, 0xEFFC, 3);

    for i in 0..14u16 {
        let offset = i as usize * 0x1000;
        let size = match i {
            0 => 3884,
            4 => 3848,
            13 => 2000,
            _ => 3968,
        };
        let mut sum: u32 = 0;
        for j in (0..size).step_by(4) {
            sum = sum.wrapping_add(u32::from_le_bytes([
                image[offset + j],
                image[offset + j + 1],
                image[offset + j + 2],
                image[offset + j + 3],
            ]));
        }
        write_u16(&mut image, offset + 0xFF6, ((sum >> 16) + (sum & 0xFFFF)) as u16);
    }

    image
}

fn session(game_code: u32) -> Session {
    Engine::new()
        .open_bytes(build_image(game_code))
        .expect("image should parse")
}

#[test]
fn info_json_uses_canonical_top_level_order() {
    let value = render_json_info(&session(1));
    let keys: Vec<&str> = value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(
        keys,
        vec![
            "valid",
            "slot",
            "slot_base",
            "save_counter",
            "game",
            "game_name",
            "sections",
            "missing_sections",
        ]
    );
}

#[test]
fn info_json_carries_structural_fields() {
    let value = render_json_info(&session(1));

    assert_eq!(value["valid"], Value::Bool(true));
    assert_eq!(value["slot"], "A");
    assert_eq!(value["save_counter"], 5);
    assert_eq!(value["game_name"], "FireRed/LeafGreen");

    let sections = value["sections"].as_array().expect("sections array");
    assert_eq!(sections.len(), 14);
    assert_eq!(sections[0]["id"], 0);
    assert_eq!(sections[0]["name"], "Trainer info");
    assert_eq!(sections[0]["checksum_ok"], Value::Bool(true));
    assert!(value["missing_sections"].as_array().expect("array").is_empty());
}

#[test]
fn text_sheet_lists_game_slot_and_sections() {
    let sheet = render_text_sheet(&session(1));

    assert!(sheet.contains("Game         : FireRed/LeafGreen"));
    assert!(sheet.contains("Active slot  : A (base 0x0000)"));
    assert!(sheet.contains("Save counter : 5"));
    assert!(sheet.contains("Trainer info"));
    assert!(sheet.contains("PC buffer I"));
    assert!(!sheet.contains("MISMATCH"));
}

#[test]
fn text_sheet_marks_checksum_mismatch() {
    let mut image = build_image(0);
    image[3 * 0x1000 + 64] ^= 0xFF;
    let session = Engine::new().open_bytes(image).expect("image should parse");

    let sheet = render_text_sheet(&session);
    assert!(sheet.contains("MISMATCH"));
}

#[test]
fn validation_rendering_round_trips_findings() {
    let mut image = build_image(0);
    image[2 * 0x1000 + 8] ^= 0x01;
    let report = Engine::new().validate_bytes(&image);

    let json = render_json_validation(&report);
    assert_eq!(json["valid"], Value::Bool(true));
    assert_eq!(json["warnings"][0], "Section 2 checksum mismatch");

    let text = render_text_validation(&report);
    assert!(text.starts_with("valid=true"));
    assert!(text.contains("warning: Section 2 checksum mismatch"));
}
