//! Conversions from RVP6 byte values to physical quantities.

use crate::grid::Grid;

/// Multiplier `a` of the Z-R relation `Z = a * R^b`.
pub const ZR_A: f64 = 256.0;
/// Exponent `b` of the Z-R relation `Z = a * R^b`.
pub const ZR_B: f64 = 1.42;

/// RVP6 units to reflectivity: `dBZ = v / 2 - 32.5`.
pub fn rvp6_to_dbz(value: f64) -> f64 {
    value / 2.0 - 32.5
}

/// Reflectivity to rain rate in mm/h.
///
/// Inverts the standard RADOLAN Z-R relation `Z = 256 * R^1.42`, with
/// `Z = 10^(dBZ / 10)` in mm^6/m^3. Non-positive reflectivities yield small
/// positive rates; nothing is rejected.
pub fn dbz_to_rainrate(dbz: f64) -> f64 {
    let z = 10f64.powf(dbz / 10.0);
    (z / ZR_A).powf(1.0 / ZR_B)
}

impl Grid {
    /// Reflectivity grid from a masked RVP6 grid.
    pub fn to_dbz(&self) -> Grid {
        self.map(rvp6_to_dbz)
    }

    /// Rain-rate grid from a masked reflectivity grid.
    pub fn to_rainrate(&self) -> Grid {
        self.map(dbz_to_rainrate)
    }
}
