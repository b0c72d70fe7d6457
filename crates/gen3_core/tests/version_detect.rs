mod common;

use common::{blank_image, build_image};
use gen3_core::diagnostics::{Diagnostics, Severity};
use gen3_core::layout::{SLOT_A_BASE, SectionMap};
use gen3_core::sections::build_section_map;
use gen3_core::version::{GameVersion, detect_game_version};

fn detect(image: &[u8]) -> GameVersion {
    let mut diag = Diagnostics::new();
    let map = build_section_map(image, SLOT_A_BASE, &mut diag);
    detect_game_version(image, &map, &mut diag)
}

#[test]
fn game_code_one_is_firered_leafgreen() {
    let image = build_image(1, false, 0);
    assert_eq!(detect(&image), GameVersion::FireRedLeafGreen);
}

#[test]
fn game_code_one_short_circuits_past_emerald_marker() {
    // Marker bytes present, but game code 1 decides first.
    let image = build_image(1, true, 0);
    assert_eq!(detect(&image), GameVersion::FireRedLeafGreen);
}

#[test]
fn game_code_zero_with_clean_marker_is_ruby_sapphire() {
    let image = build_image(0, false, 0);
    assert_eq!(detect(&image), GameVersion::RubySapphire);
}

#[test]
fn game_code_zero_with_marker_byte_is_emerald() {
    let image = build_image(0, true, 0);
    assert_eq!(detect(&image), GameVersion::Emerald);
}

#[test]
fn security_key_with_marker_byte_is_emerald() {
    // Emerald stores its security key in the game code field: any value
    // other than 0 or 1 still defers to the marker scan.
    let image = build_image(0xDEAD_BEEF, true, 0);
    assert_eq!(detect(&image), GameVersion::Emerald);
}

#[test]
fn battle_tower_data_without_marker_is_ruby_sapphire() {
    let image = build_image(0x1234_5678, false, 0);
    assert_eq!(detect(&image), GameVersion::RubySapphire);
}

#[test]
fn detection_follows_section_zero_regardless_of_position() {
    let image = build_image(0, true, 5);
    assert_eq!(detect(&image), GameVersion::Emerald);
}

#[test]
fn empty_section_map_is_invalid() {
    let image = blank_image();
    let mut diag = Diagnostics::new();
    let map = SectionMap::new();

    assert_eq!(
        detect_game_version(&image, &map, &mut diag),
        GameVersion::Invalid
    );
    assert!(
        diag.entries()
            .iter()
            .any(|d| d.severity == Severity::Error && d.component == "GameDetect")
    );
}

#[test]
fn classification_emits_info_diagnostic() {
    let image = build_image(1, false, 0);
    let mut diag = Diagnostics::new();
    let map = build_section_map(&image, SLOT_A_BASE, &mut diag);
    let before = diag.entries().len();

    let version = detect_game_version(&image, &map, &mut diag);

    assert_eq!(version, GameVersion::FireRedLeafGreen);
    assert!(diag.entries().len() > before);
    assert!(
        diag.entries()
            .iter()
            .any(|d| d.severity == Severity::Info && d.message.contains("FireRed/LeafGreen"))
    );
}

#[test]
fn display_names_match_detected_variants() {
    assert_eq!(GameVersion::FireRedLeafGreen.name(), "FireRed/LeafGreen");
    assert_eq!(GameVersion::RubySapphire.name(), "Ruby/Sapphire");
    assert_eq!(GameVersion::Emerald.name(), "Emerald");
    assert_eq!(GameVersion::Invalid.name(), "Invalid/Blank Save");
}
