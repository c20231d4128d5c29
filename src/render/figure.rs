//! Raster map of a composite with station markers and a colorbar.
//!
//! The map panel uses the Mercator projection; every pixel looks up the
//! RADOLAN cell under its center. With a font, the title, colorbar ticks,
//! unit label, station names and attribution are drawn into the image.
//! They are always stored as PNG `tEXt` chunks as well.

use crate::grid::Grid;
use crate::projection::{MercatorFrame, RadolanGrid};
use crate::render::error::RenderError;
use crate::render::scale::ColorScale;
use crate::render::text::{format_tick, Align, TextPainter};
use crate::types::station::RadarStation;
use bon::Builder;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use rusttype::Font;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const LEFT_MARGIN: u32 = 40;
/// Room for the two title lines.
const TOP_MARGIN: u32 = 60;
/// Room for the attribution lines.
const BOTTOM_MARGIN: u32 = 44;
const RIGHT_MARGIN: u32 = 16;
const COLORBAR_GAP: u32 = 30;
const COLORBAR_WIDTH: u32 = 24;
/// Room for tick labels right of the colorbar.
const TICK_LABEL_WIDTH: u32 = 56;
const TICK_LENGTH: f32 = 4.0;
/// Colorbar height relative to the map panel.
const COLORBAR_SHRINK: f64 = 0.6;
const MARKER_HALF_SIZE: f32 = 6.0;

const TITLE_SIZE: f32 = 18.0;
const LABEL_SIZE: f32 = 13.0;
const TICK_SIZE: f32 = 11.0;
const STATION_SIZE: f32 = 11.0;
const ATTRIBUTION_SIZE: f32 = 12.0;

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub const ATTRIBUTION: &str = "Data from opendata.dwd.de";
/// Lines printed below the map, top to bottom.
pub const ATTRIBUTION_LINES: [&str; 2] = ["www.meteo-blog.net", ATTRIBUTION];

#[derive(Debug, Builder)]
pub struct RadarFigure<'a> {
    grid: &'a Grid,
    radar_grid: RadolanGrid,
    scale: &'a ColorScale,
    #[builder(default)]
    stations: Vec<&'static RadarStation>,
    /// Title; `\n` starts a new line.
    #[builder(into)]
    title: String,
    units: &'static str,
    /// Font for visible annotations; without one only markers and colors are drawn.
    font: Option<&'a Font<'static>>,
    #[builder(default = MercatorFrame::GERMANY)]
    frame: MercatorFrame,
    /// Width of the map panel in pixels.
    #[builder(default = 800)]
    map_width: u32,
}

/// Vertical extent of the colorbar in image pixels.
#[derive(Debug, Clone, Copy)]
struct ColorbarBox {
    left: u32,
    top: u32,
    height: u32,
}

impl RadarFigure<'_> {
    pub fn map_height(&self) -> u32 {
        (self.map_width as f64 * self.frame.aspect_ratio()).round() as u32
    }

    /// Pixel position of the map panel's top left corner in the full image.
    pub fn map_origin(&self) -> (u32, u32) {
        (LEFT_MARGIN, TOP_MARGIN)
    }

    /// Full image size.
    pub fn size(&self) -> (u32, u32) {
        let width = LEFT_MARGIN
            + self.map_width
            + COLORBAR_GAP
            + COLORBAR_WIDTH
            + TICK_LABEL_WIDTH
            + RIGHT_MARGIN;
        let height = TOP_MARGIN + self.map_height() + BOTTOM_MARGIN;
        (width, height)
    }

    fn colorbar_box(&self) -> ColorbarBox {
        let map_h = self.map_height();
        let height = ((map_h as f64 * COLORBAR_SHRINK).round() as u32).max(1);
        ColorbarBox {
            left: LEFT_MARGIN + self.map_width + COLORBAR_GAP,
            top: TOP_MARGIN + map_h.saturating_sub(height) / 2,
            height,
        }
    }

    pub fn render(&self) -> RgbaImage {
        let map_w = self.map_width;
        let map_h = self.map_height();
        let (width, height) = self.size();
        let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

        for py in 0..map_h {
            for px in 0..map_w {
                let (lon, lat) =
                    self.frame
                        .pixel_to_lonlat(px as f64 + 0.5, py as f64 + 0.5, map_w, map_h);
                let color = self
                    .radar_grid
                    .cell_at(lon, lat)
                    .and_then(|(row, col)| self.scale.color(self.grid.get(row, col)));
                if let Some(color) = color {
                    canvas.put_pixel(LEFT_MARGIN + px, TOP_MARGIN + py, color);
                }
            }
        }

        draw_hollow_rect_mut(
            &mut canvas,
            Rect::at(LEFT_MARGIN as i32 - 1, TOP_MARGIN as i32 - 1).of_size(map_w + 2, map_h + 2),
            INK,
        );
        self.draw_stations(&mut canvas);
        self.draw_colorbar(&mut canvas);
        if let Some(font) = self.font {
            self.draw_annotations(&mut canvas, &TextPainter::new(font, INK));
        }
        canvas
    }

    /// Marker centers of the stations inside the map, in image pixels.
    fn station_positions(&self) -> Vec<(&'static RadarStation, f32, f32)> {
        let map_w = self.map_width;
        let map_h = self.map_height();
        self.stations
            .iter()
            .filter_map(|&station| {
                let (x, y) = self
                    .frame
                    .lonlat_to_pixel(station.lon, station.lat, map_w, map_h);
                if x < 0.0 || y < 0.0 || x >= map_w as f64 || y >= map_h as f64 {
                    return None;
                }
                Some((
                    station,
                    (LEFT_MARGIN as f64 + x).round() as f32,
                    (TOP_MARGIN as f64 + y).round() as f32,
                ))
            })
            .collect()
    }

    fn draw_stations(&self, canvas: &mut RgbaImage) {
        for (_, cx, cy) in self.station_positions() {
            draw_line_segment_mut(
                canvas,
                (cx - MARKER_HALF_SIZE, cy),
                (cx + MARKER_HALF_SIZE, cy),
                INK,
            );
            draw_line_segment_mut(
                canvas,
                (cx, cy - MARKER_HALF_SIZE),
                (cx, cy + MARKER_HALF_SIZE),
                INK,
            );
        }
    }

    /// Y coordinate of boundary `k`; boundaries are evenly spaced along the bar.
    fn tick_y(&self, bar: ColorbarBox, k: usize) -> f32 {
        let n = self.scale.boundaries().len().max(2) - 1;
        (bar.top + bar.height) as f32 - k as f32 * bar.height as f32 / n as f32
    }

    /// Vertical colorbar right of the map, lowest bucket at the bottom.
    fn draw_colorbar(&self, canvas: &mut RgbaImage) {
        let colors = self.scale.bucket_colors();
        if colors.is_empty() {
            return;
        }
        let bar = self.colorbar_box();
        let swatch_h = bar.height as f64 / colors.len() as f64;

        for (i, color) in colors.iter().enumerate() {
            let from_top = colors.len() - 1 - i;
            let y0 = bar.top + (from_top as f64 * swatch_h).round() as u32;
            let y1 = bar.top + ((from_top + 1) as f64 * swatch_h).round() as u32;
            draw_filled_rect_mut(
                canvas,
                Rect::at(bar.left as i32, y0 as i32).of_size(COLORBAR_WIDTH, (y1 - y0).max(1)),
                *color,
            );
        }
        draw_hollow_rect_mut(
            canvas,
            Rect::at(bar.left as i32, bar.top as i32).of_size(COLORBAR_WIDTH, bar.height),
            INK,
        );

        let right = (bar.left + COLORBAR_WIDTH) as f32;
        for k in 0..self.scale.boundaries().len() {
            let y = self.tick_y(bar, k);
            draw_line_segment_mut(canvas, (right, y), (right + TICK_LENGTH, y), INK);
        }
    }

    fn draw_annotations(&self, canvas: &mut RgbaImage, painter: &TextPainter) {
        let map_w = self.map_width;
        let map_h = self.map_height();

        let center_x = (LEFT_MARGIN + map_w / 2) as i32;
        let line_height = (TITLE_SIZE * 1.25) as i32;
        for (i, line) in self.title.lines().enumerate() {
            painter.draw(canvas, line, center_x, 8 + i as i32 * line_height, TITLE_SIZE, Align::Center);
        }

        for (station, cx, cy) in self.station_positions() {
            let x = (cx + MARKER_HALF_SIZE + 2.0) as i32;
            let y = (cy - MARKER_HALF_SIZE - STATION_SIZE) as i32;
            painter.draw(canvas, station.name, x, y, STATION_SIZE, Align::Left);
        }

        let bar = self.colorbar_box();
        let label_x = (bar.left + COLORBAR_WIDTH) as i32 + TICK_LENGTH as i32 + 3;
        let mut last_label_y: Option<f32> = None;
        for (k, &bound) in self.scale.boundaries().iter().enumerate() {
            let y = self.tick_y(bar, k);
            // Skip labels that would overlap the one below.
            if last_label_y.is_some_and(|last| last - y < TICK_SIZE) {
                continue;
            }
            let top = (y - TICK_SIZE / 2.0) as i32;
            painter.draw(canvas, &format_tick(bound), label_x, top, TICK_SIZE, Align::Left);
            last_label_y = Some(y);
        }
        painter.draw(
            canvas,
            self.units,
            (bar.left + COLORBAR_WIDTH / 2) as i32,
            bar.top as i32 - LABEL_SIZE as i32 - 6,
            LABEL_SIZE,
            Align::Center,
        );

        let attribution_x = (LEFT_MARGIN as f64 + 0.7 * map_w as f64) as i32;
        let attribution_y = (TOP_MARGIN + map_h) as i32 + 6;
        for (i, line) in ATTRIBUTION_LINES.iter().enumerate() {
            let y = attribution_y + i as i32 * (ATTRIBUTION_SIZE as i32 + 4);
            painter.draw(canvas, line, attribution_x, y, ATTRIBUTION_SIZE, Align::Left);
        }
    }

    /// `tEXt` chunks describing the figure.
    pub fn text_chunks(&self) -> Vec<(String, String)> {
        let stations = self
            .stations
            .iter()
            .map(|s| format!("{} {}", s.code, s.name))
            .collect::<Vec<_>>()
            .join(", ");
        let boundaries = self
            .scale
            .boundaries()
            .iter()
            .map(|b| format!("{:.3}", b))
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("Title".to_string(), self.title.clone()),
            ("Units".to_string(), self.units.to_string()),
            ("Stations".to_string(), stations),
            ("Boundaries".to_string(), boundaries),
            ("Source".to_string(), ATTRIBUTION_LINES.join("\n")),
            (
                "Software".to_string(),
                format!("dwd_radar {}", env!("CARGO_PKG_VERSION")),
            ),
        ]
    }

    /// Renders the figure and writes it to `path` as PNG.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let image = self.render();
        write_png(&image, &self.text_chunks(), path)
    }
}

/// Encodes an RGBA image as PNG with the given `tEXt` chunks.
pub fn write_png(
    image: &RgbaImage,
    text: &[(String, String)],
    path: &Path,
) -> Result<(), RenderError> {
    let file = File::create(path).map_err(|e| RenderError::FileCreate(path.to_path_buf(), e))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    for (keyword, value) in text {
        encoder.add_text_chunk(keyword.clone(), value.clone())?;
    }
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::RawGrid;
    use crate::render::text::tests::host_font;
    use crate::types::output_units::OutputUnits;

    const NODATA: f64 = -9999.0;

    fn national_grid(value: f64) -> Grid {
        let n = RadolanGrid::NATIONAL;
        RawGrid::new(n.nrows, n.ncols, vec![value; n.nrows * n.ncols])
            .unwrap()
            .mask_equal(NODATA)
    }

    fn station_pixel(figure: &RadarFigure, station: &RadarStation) -> (u32, u32) {
        let (x, y) = figure.frame.lonlat_to_pixel(
            station.lon,
            station.lat,
            figure.map_width,
            figure.map_height(),
        );
        (
            (LEFT_MARGIN as f64 + x).round() as u32,
            (TOP_MARGIN as f64 + y).round() as u32,
        )
    }

    fn has_ink(image: &RgbaImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> bool {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .any(|(x, y)| image.get_pixel(x, y)[0] < 128)
    }

    #[test]
    fn colors_cells_inside_the_composite() {
        let grid = national_grid(40.0);
        let scale = ColorScale::for_units(OutputUnits::Dbz);
        let figure = RadarFigure::builder()
            .grid(&grid)
            .radar_grid(RadolanGrid::NATIONAL)
            .scale(&scale)
            .title("RADOLAN RX")
            .units("dBZ")
            .map_width(200)
            .build();
        let image = figure.render();
        let (x0, y0) = figure.map_origin();

        assert_eq!((image.width(), image.height()), figure.size());
        assert_eq!(image.height(), y0 + figure.map_height() + BOTTOM_MARGIN);

        let center = image.get_pixel(x0 + 100, y0 + figure.map_height() / 2);
        assert_eq!(Some(*center), scale.color(Some(40.0)));

        // 5E 55N lies north of the composite.
        assert_eq!(*image.get_pixel(x0 + 1, y0 + 1), BACKGROUND);
    }

    #[test]
    fn masked_composite_leaves_map_empty() {
        let grid = national_grid(NODATA);
        let scale = ColorScale::for_units(OutputUnits::RainRate);
        let figure = RadarFigure::builder()
            .grid(&grid)
            .radar_grid(RadolanGrid::NATIONAL)
            .scale(&scale)
            .title("RADOLAN RX")
            .units("mm/h")
            .map_width(120)
            .build();
        let image = figure.render();
        let (x0, y0) = figure.map_origin();

        for py in 0..figure.map_height() {
            for px in 0..120 {
                assert_eq!(*image.get_pixel(x0 + px, y0 + py), BACKGROUND);
            }
        }
    }

    #[test]
    fn marks_stations_and_draws_colorbar() {
        let grid = national_grid(NODATA);
        let scale = ColorScale::for_units(OutputUnits::Dbz);
        let boostedt = RadarStation::lookup("boo").unwrap();
        let figure = RadarFigure::builder()
            .grid(&grid)
            .radar_grid(RadolanGrid::NATIONAL)
            .scale(&scale)
            .stations(vec![boostedt])
            .title("RADOLAN RX")
            .units("dBZ")
            .map_width(300)
            .build();
        let image = figure.render();

        let (x, y) = station_pixel(&figure, boostedt);
        assert_eq!(*image.get_pixel(x, y), INK);

        let bar = figure.colorbar_box();
        let bar_x = bar.left + COLORBAR_WIDTH / 2;
        assert_eq!(*image.get_pixel(bar_x, bar.top + bar.height - 3), scale.palette()[0]);
        assert_eq!(*image.get_pixel(bar_x, bar.top + 3), scale.palette()[29]);
    }

    #[test]
    fn no_text_without_font() {
        let grid = national_grid(NODATA);
        let scale = ColorScale::for_units(OutputUnits::Dbz);
        let figure = RadarFigure::builder()
            .grid(&grid)
            .radar_grid(RadolanGrid::NATIONAL)
            .scale(&scale)
            .title("RADOLAN RX\n2019-01-02T20:50:00")
            .units("dBZ")
            .map_width(300)
            .build();
        let image = figure.render();
        let (width, _) = figure.size();
        assert!(!has_ink(&image, 0..width, 0..TOP_MARGIN - 2));
    }

    #[test]
    fn draws_annotations_with_font() {
        let Some(font) = host_font() else {
            eprintln!("no font on this host, skipping");
            return;
        };
        let grid = national_grid(NODATA);
        let scale = ColorScale::for_units(OutputUnits::RainRate);
        let figure = RadarFigure::builder()
            .grid(&grid)
            .radar_grid(RadolanGrid::NATIONAL)
            .scale(&scale)
            .stations(vec![RadarStation::lookup("ess").unwrap()])
            .title("RADOLAN RX\n2019-01-02T20:50:00")
            .units("mm/h")
            .font(&font)
            .map_width(400)
            .build();
        let image = figure.render();
        let (x0, y0) = figure.map_origin();
        let map_h = figure.map_height();
        let (width, height) = figure.size();

        // Title above the map.
        assert!(has_ink(&image, x0..x0 + 400, 0..y0 - 2));
        // Tick labels right of the colorbar ticks.
        let bar = figure.colorbar_box();
        let labels_x = bar.left + COLORBAR_WIDTH + TICK_LENGTH as u32 + 2;
        assert!(has_ink(&image, labels_x..width, bar.top..bar.top + bar.height));
        // Unit label above the bar.
        assert!(has_ink(&image, bar.left..bar.left + COLORBAR_WIDTH, y0..bar.top - 2));
        // Attribution below the map.
        assert!(has_ink(&image, x0..x0 + 400, y0 + map_h + 2..height));
        // Station name next to the marker.
        let (sx, sy) = station_pixel(&figure, RadarStation::lookup("ess").unwrap());
        assert!(has_ink(&image, sx + 8..sx + 60, sy - 20..sy - 6));
    }

    #[test]
    fn saves_png_with_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("radar_plot.png");
        let grid = national_grid(65.0);
        let scale = ColorScale::for_units(OutputUnits::Dbz);
        let figure = RadarFigure::builder()
            .grid(&grid)
            .radar_grid(RadolanGrid::NATIONAL)
            .scale(&scale)
            .stations(vec![RadarStation::lookup("ess").unwrap()])
            .title("RADOLAN RX\n2019-01-02T20:50:00")
            .units("dBZ")
            .map_width(100)
            .build();
        figure.save(&path).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), figure.size());
        let text = |keyword: &str| {
            info.uncompressed_latin1_text
                .iter()
                .find(|chunk| chunk.keyword == keyword)
                .map(|chunk| chunk.text.clone())
        };
        assert_eq!(
            text("Title").as_deref(),
            Some("RADOLAN RX\n2019-01-02T20:50:00")
        );
        assert_eq!(text("Units").as_deref(), Some("dBZ"));
        assert_eq!(text("Stations").as_deref(), Some("ESS Essen"));
        assert_eq!(
            text("Source").as_deref(),
            Some("www.meteo-blog.net\nData from opendata.dwd.de")
        );
    }

    #[test]
    fn unwritable_path() {
        let image = RgbaImage::new(2, 2);
        let dir = tempfile::tempdir().unwrap();
        let err = write_png(&image, &[], &dir.path().join("missing/plot.png")).unwrap_err();
        assert!(matches!(err, RenderError::FileCreate(..)));
    }
}
