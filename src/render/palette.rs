//! Five-segment radar palette: blue, green, yellow, red, violet, six shades each.

use image::Rgba;

pub const BLUE_GREEN_YELLOW_RED_VIOLET: [&str; 30] = [
    "#ebf5fb", "#aed6f1", "#85c1e9", "#3498db", "#2e86c1", "#21618c", // blue
    "#7dcea0", "#52be80", "#229954", "#1e8449", "#196f3d", "#145a32", // green
    "#f7dc6f", "#f4d03f", "#f1c40f", "#d4ac0d", "#9a7d0a", "#7d6608", // yellow
    "#d98880", "#cd6155", "#c0392b", "#922b21", "#7b241c", "#641e16", // red
    "#ebdef0", "#d7bde2", "#c39bd3", "#af7ac5", "#884ea0", "#512e5f", // violet
];

/// Replaces the lightest blue so weak echoes fade into the background.
const FIRST_COLOR: &str = "#fffffe";

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// The palette used for radar figures, opaque RGBA.
pub fn radar_palette() -> Vec<Rgba<u8>> {
    std::iter::once(FIRST_COLOR)
        .chain(BLUE_GREEN_YELLOW_RED_VIOLET.iter().skip(1).copied())
        .filter_map(hex_to_rgb)
        .map(|(r, g, b)| Rgba([r, g, b, 255]))
        .collect()
}
