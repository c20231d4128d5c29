//! Glyph drawing for figure annotations.

use crate::render::error::RenderError;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};
use std::path::Path;

/// Loads a TrueType or OpenType font file.
pub fn load_font(path: &Path) -> Result<Font<'static>, RenderError> {
    let data = std::fs::read(path).map_err(|e| RenderError::FontRead(path.to_path_buf(), e))?;
    Font::try_from_vec(data).ok_or_else(|| RenderError::InvalidFont(path.to_path_buf()))
}

/// Horizontal placement of a string relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Draws single-line strings in one color.
#[derive(Debug, Clone, Copy)]
pub struct TextPainter<'f> {
    font: &'f Font<'static>,
    color: Rgba<u8>,
}

impl<'f> TextPainter<'f> {
    pub fn new(font: &'f Font<'static>, color: Rgba<u8>) -> Self {
        Self { font, color }
    }

    /// Width of `text` in pixels at pixel height `size`.
    pub fn width(&self, text: &str, size: f32) -> i32 {
        text_size(Scale::uniform(size), self.font, text).0
    }

    /// Draws `text` with its top edge at `y`.
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, size: f32, align: Align) {
        let x = match align {
            Align::Left => x,
            Align::Center => x - self.width(text, size) / 2,
            Align::Right => x - self.width(text, size),
        };
        draw_text_mut(canvas, self.color, x, y, Scale::uniform(size), self.font, text);
    }
}

/// Colorbar tick label: at most three decimals, trailing zeros dropped.
pub fn format_tick(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    /// A font from the host, if one can be found.
    ///
    /// `DWD_RADAR_TEST_FONT` takes precedence over the usual system locations.
    pub(crate) fn host_font() -> Option<Font<'static>> {
        const CANDIDATES: [&str; 5] = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        std::env::var("DWD_RADAR_TEST_FONT")
            .ok()
            .into_iter()
            .chain(CANDIDATES.iter().map(|p| p.to_string()))
            .find_map(|p| load_font(Path::new(&p)).ok())
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(0.01), "0.01");
        assert_eq!(format_tick(0.108), "0.108");
        assert_eq!(format_tick(220.8), "220.8");
        assert_eq!(format_tick(-0.0001), "0");
    }

    #[test]
    fn missing_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_font(&dir.path().join("none.ttf")).unwrap_err();
        assert!(matches!(err, RenderError::FontRead(..)));
    }

    #[test]
    fn garbage_is_not_a_font() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();
        let err = load_font(file.path()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFont(..)));
    }

    #[test]
    fn alignment_shifts_text() {
        let Some(font) = host_font() else {
            eprintln!("no font on this host, skipping");
            return;
        };
        let painter = TextPainter::new(&font, Rgba([0, 0, 0, 255]));
        let width = painter.width("RADOLAN", 16.0);
        assert!(width > 0);

        let leftmost_ink = |align| {
            let mut canvas = RgbaImage::from_pixel(200, 30, Rgba([255, 255, 255, 255]));
            painter.draw(&mut canvas, "RADOLAN", 100, 5, 16.0, align);
            canvas
                .enumerate_pixels()
                .filter(|(_, _, p)| p[0] < 128)
                .map(|(x, _, _)| x as i32)
                .min()
        };
        let left = leftmost_ink(Align::Left).unwrap();
        let right = leftmost_ink(Align::Right).unwrap();
        assert!(left >= 100 && right < 100, "left = {left}, right = {right}");
    }
}
