//! Map projections used by the plotter, implemented from the closed-form
//! spherical formulas.
//!
//! RADOLAN composites live on a polar stereographic grid:
//! - sphere with radius 6370.04 km
//! - projection plane true to scale at 60 N
//! - central meridian 10 E
//!
//! Coordinates on the grid are kilometers; the national 900 x 900 grid has
//! its south-west corner at (-523.4622, -4658.6447).

use std::f64::consts::FRAC_PI_4;

pub const EARTH_RADIUS_KM: f64 = 6370.04;
const TRUE_SCALE_LAT_DEG: f64 = 60.0;
const CENTRAL_LON_DEG: f64 = 10.0;

/// Radius of the projection at the pole, `R * (1 + sin 60)`.
fn scale_radius() -> f64 {
    EARTH_RADIUS_KM * (1.0 + TRUE_SCALE_LAT_DEG.to_radians().sin())
}

/// Geographic coordinates (degrees) to RADOLAN stereographic coordinates (km).
pub fn to_stereographic(lon: f64, lat: f64) -> (f64, f64) {
    let phi = lat.to_radians();
    let dlambda = (lon - CENTRAL_LON_DEG).to_radians();
    let rho = scale_radius() * phi.cos() / (1.0 + phi.sin());
    (rho * dlambda.sin(), -rho * dlambda.cos())
}

/// RADOLAN stereographic coordinates (km) to geographic coordinates (degrees).
pub fn from_stereographic(x: f64, y: f64) -> (f64, f64) {
    let rho = x.hypot(y);
    let lat = 90.0 - 2.0 * (rho / scale_radius()).atan().to_degrees();
    let lon = CENTRAL_LON_DEG + x.atan2(-y).to_degrees();
    (lon, lat)
}

/// Placement of a RADOLAN grid on the stereographic plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadolanGrid {
    /// x of the south-west corner (km)
    pub x0: f64,
    /// y of the south-west corner (km)
    pub y0: f64,
    /// Edge length of a cell (km)
    pub cell_size: f64,
    pub nrows: usize,
    pub ncols: usize,
}

impl RadolanGrid {
    /// The 900 x 900 km national composite grid.
    pub const NATIONAL: RadolanGrid = RadolanGrid {
        x0: -523.4622,
        y0: -4658.6447,
        cell_size: 1.0,
        nrows: 900,
        ncols: 900,
    };

    /// The 1100 x 900 km extended grid of the WX product.
    pub const EXTENDED: RadolanGrid = RadolanGrid {
        x0: -443.4622,
        y0: -4758.6447,
        cell_size: 1.0,
        nrows: 1100,
        ncols: 900,
    };

    /// Grid definition matching a decoded shape, if it is a known one.
    pub fn for_shape(nrows: usize, ncols: usize) -> Option<RadolanGrid> {
        [Self::NATIONAL, Self::EXTENDED]
            .into_iter()
            .find(|g| g.nrows == nrows && g.ncols == ncols)
    }

    /// Row and column of the cell containing the given point, if inside the grid.
    ///
    /// Row 0 is the southern edge.
    pub fn cell_at(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        let (x, y) = to_stereographic(lon, lat);
        let col = ((x - self.x0) / self.cell_size).floor();
        let row = ((y - self.y0) / self.cell_size).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.nrows && col < self.ncols).then_some((row, col))
    }

    /// Geographic coordinates of the south-west corner of a cell.
    pub fn corner(&self, row: usize, col: usize) -> (f64, f64) {
        from_stereographic(
            self.x0 + col as f64 * self.cell_size,
            self.y0 + row as f64 * self.cell_size,
        )
    }
}

/// A rectangular map extent in the Mercator projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorFrame {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl MercatorFrame {
    /// Germany and its direct surroundings.
    pub const GERMANY: MercatorFrame = MercatorFrame {
        lon_min: 5.0,
        lon_max: 16.0,
        lat_min: 47.0,
        lat_max: 55.0,
    };

    fn y(lat: f64) -> f64 {
        (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln()
    }

    fn lat(y: f64) -> f64 {
        (2.0 * y.exp().atan() - 2.0 * FRAC_PI_4).to_degrees()
    }

    /// Height / width ratio of the frame on the projected plane.
    pub fn aspect_ratio(&self) -> f64 {
        let height = Self::y(self.lat_max) - Self::y(self.lat_min);
        let width = (self.lon_max - self.lon_min).to_radians();
        height / width
    }

    /// Geographic coordinates of a pixel position; `(0, 0)` is the top left corner.
    pub fn pixel_to_lonlat(&self, px: f64, py: f64, width: u32, height: u32) -> (f64, f64) {
        let lon = self.lon_min + (self.lon_max - self.lon_min) * px / width as f64;
        let y_max = Self::y(self.lat_max);
        let y_min = Self::y(self.lat_min);
        let y = y_max - (y_max - y_min) * py / height as f64;
        (lon, Self::lat(y))
    }

    /// Pixel position of a geographic point; may lie outside the image.
    pub fn lonlat_to_pixel(&self, lon: f64, lat: f64, width: u32, height: u32) -> (f64, f64) {
        let px = (lon - self.lon_min) / (self.lon_max - self.lon_min) * width as f64;
        let y_max = Self::y(self.lat_max);
        let y_min = Self::y(self.lat_min);
        let py = (y_max - Self::y(lat)) / (y_max - y_min) * height as f64;
        (px, py)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn national_grid_corners() {
        let (lon, lat) = RadolanGrid::NATIONAL.corner(0, 0);
        assert!(close(lon, 3.5889, 0.01), "lon = {lon}");
        assert!(close(lat, 46.9526, 0.01), "lat = {lat}");

        let (lon, lat) = RadolanGrid::NATIONAL.corner(900, 900);
        assert!(close(lon, 15.7208, 0.01), "lon = {lon}");
        assert!(close(lat, 54.7405, 0.01), "lat = {lat}");
    }

    #[test]
    fn central_meridian_points_south() {
        let (x, y) = to_stereographic(10.0, 52.0);
        assert!(close(x, 0.0, 1e-9));
        assert!(y < 0.0);
    }

    #[test]
    fn stereographic_inverse() {
        for (lon, lat) in [(13.4, 52.5), (6.0, 47.5), (15.2, 54.1)] {
            let (x, y) = to_stereographic(lon, lat);
            let (lon2, lat2) = from_stereographic(x, y);
            assert!(close(lon, lon2, 1e-9) && close(lat, lat2, 1e-9));
        }
    }

    #[test]
    fn cell_lookup() {
        let grid = RadolanGrid::NATIONAL;
        let (row, col) = grid.cell_at(10.04687, 54.00438).unwrap();
        assert!(row > 700 && col > 400 && col < 600, "({row}, {col})");
        assert!(grid.cell_at(0.0, 40.0).is_none());
        assert!(grid.cell_at(25.0, 60.0).is_none());
    }

    #[test]
    fn known_shapes() {
        assert_eq!(RadolanGrid::for_shape(900, 900), Some(RadolanGrid::NATIONAL));
        assert_eq!(RadolanGrid::for_shape(1100, 900), Some(RadolanGrid::EXTENDED));
        assert_eq!(RadolanGrid::for_shape(10, 10), None);
    }

    #[test]
    fn mercator_pixels() {
        let frame = MercatorFrame::GERMANY;
        let (w, h) = (800, 930);
        let (lon, lat) = frame.pixel_to_lonlat(0.0, 0.0, w, h);
        assert!(close(lon, 5.0, 1e-9) && close(lat, 55.0, 1e-9));
        let (lon, lat) = frame.pixel_to_lonlat(w as f64, h as f64, w, h);
        assert!(close(lon, 16.0, 1e-9) && close(lat, 47.0, 1e-9));

        let (px, py) = frame.lonlat_to_pixel(10.5, 51.0, w, h);
        let (lon, lat) = frame.pixel_to_lonlat(px, py, w, h);
        assert!(close(lon, 10.5, 1e-9) && close(lat, 51.0, 1e-9));
        assert!(frame.aspect_ratio() > 1.1 && frame.aspect_ratio() < 1.2);
    }
}
