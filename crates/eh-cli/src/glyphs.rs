//! Display glyphs for engine values. Unknown values fall back to a default.

use eh_adventure::ItemId;
use eh_slope::ObjectKind;

/// Shown for items without a glyph of their own.
pub const DEFAULT_ITEM_GLYPH: &str = "*";

const ITEM_GLYPHS: &[(&str, &str)] = &[
    ("SKI_GOGGLES", "()"),
    ("TORN_FABRIC", "%"),
    ("SHED_KEY", "-o"),
    ("BOOT_PRINT_PHOTO", "#"),
    ("CARDIGAN_SKI_PASS", "="),
    ("CLIPBOARD_PAGE", "&"),
    ("EAGLE_TROPHY", "Y"),
];

/// Glyph for an inventory item.
pub fn item_glyph(id: &ItemId) -> &'static str {
    ITEM_GLYPHS
        .iter()
        .find(|(key, _)| *key == id.as_str())
        .map_or(DEFAULT_ITEM_GLYPH, |(_, glyph)| *glyph)
}

/// Glyph for a course object.
pub fn object_glyph(kind: ObjectKind) -> char {
    match kind {
        ObjectKind::Tree => 'T',
        ObjectKind::LandmarkRock => 'R',
        ObjectKind::LandmarkLodge => 'L',
        ObjectKind::IcePatch => '~',
        ObjectKind::GateLeft => '[',
        ObjectKind::GateRight => ']',
    }
}
