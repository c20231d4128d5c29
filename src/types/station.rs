//! Defines the DWD weather radar sites that contribute to the RADOLAN
//! composites, together with their location metadata.

use serde::Serialize;

/// A single DWD weather radar site.
///
/// Composite headers list the contributing sites by their lowercase
/// three-letter code; [`RadarStation::lookup`] resolves such a code against
/// [`RADAR_STATIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarStation {
    /// Upper case three-letter site code (e.g. `"BOO"`).
    pub code: &'static str,
    /// Human readable site name.
    pub name: &'static str,
    /// World Meteorological Organization station number.
    pub wmo: u32,
    /// Longitude in decimal degrees east.
    pub lon: f64,
    /// Latitude in decimal degrees north.
    pub lat: f64,
    /// Antenna altitude above sea level in meters.
    pub alt: f64,
}

/// The 19 radar sites known to the plotter.
pub const RADAR_STATIONS: [RadarStation; 19] = [
    RadarStation { code: "ASB", name: "ASB Borkum", wmo: 10103, lon: 6.748292, lat: 53.564011, alt: 261.0 },
    RadarStation { code: "ASD", name: "ASR Dresden", wmo: 10487, lon: 13.76347, lat: 51.12404, alt: 261.0 },
    RadarStation { code: "BOO", name: "Boostedt", wmo: 10132, lon: 10.04687, lat: 54.00438, alt: 124.56 },
    RadarStation { code: "DRS", name: "Dresden", wmo: 10488, lon: 13.76865, lat: 51.12465, alt: 263.36 },
    RadarStation { code: "EIS", name: "Eisberg", wmo: 10780, lon: 12.40278, lat: 49.54066, alt: 798.79 },
    RadarStation { code: "EMD", name: "Emden", wmo: 10204, lon: 7.02377, lat: 53.33872, alt: 58.0 },
    RadarStation { code: "ESS", name: "Essen", wmo: 10410, lon: 6.96712, lat: 51.40563, alt: 185.10 },
    RadarStation { code: "FBG", name: "Feldberg", wmo: 10908, lon: 8.00361, lat: 47.87361, alt: 1516.10 },
    RadarStation { code: "FLD", name: "Flechtdorf", wmo: 10440, lon: 8.802, lat: 51.3112, alt: 627.88 },
    RadarStation { code: "HNR", name: "Hannover", wmo: 10339, lon: 9.69452, lat: 52.46008, alt: 97.66 },
    RadarStation { code: "NEU", name: "Neuhaus", wmo: 10557, lon: 11.13504, lat: 50.50012, alt: 878.04 },
    RadarStation { code: "NHB", name: "Neuheilenbach", wmo: 10605, lon: 6.54853, lat: 50.10965, alt: 585.84 },
    RadarStation { code: "OFT", name: "Offenthal", wmo: 10629, lon: 8.71293, lat: 49.9847, alt: 245.80 },
    RadarStation { code: "PRO", name: "Proetzel", wmo: 10392, lon: 13.85821, lat: 52.64867, alt: 193.92 },
    RadarStation { code: "MEM", name: "Memmingen", wmo: 10950, lon: 10.21924, lat: 48.04214, alt: 724.40 },
    RadarStation { code: "ROS", name: "Rostock", wmo: 10169, lon: 12.05808, lat: 54.17566, alt: 37.0 },
    RadarStation { code: "ISN", name: "Isen", wmo: 10873, lon: 12.10177, lat: 48.1747, alt: 677.77 },
    RadarStation { code: "TUR", name: "Tuerkheim", wmo: 10832, lon: 9.78278, lat: 48.58528, alt: 767.62 },
    RadarStation { code: "UMM", name: "Ummendorf", wmo: 10356, lon: 11.17609, lat: 52.16009, alt: 183.0 },
];

impl RadarStation {
    /// Resolves a site code as found in composite headers.
    ///
    /// The match is case-insensitive. Headers name Ummendorf `umd`, which is
    /// mapped onto the `UMM` entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use dwd_radar::RadarStation;
    ///
    /// assert_eq!(RadarStation::lookup("boo").unwrap().name, "Boostedt");
    /// assert_eq!(RadarStation::lookup("umd").unwrap().code, "UMM");
    /// assert!(RadarStation::lookup("xyz").is_none());
    /// ```
    pub fn lookup(code: &str) -> Option<&'static RadarStation> {
        let code = code.trim();
        let code = if code.eq_ignore_ascii_case("umd") {
            "UMM"
        } else {
            code
        };
        RADAR_STATIONS
            .iter()
            .find(|station| station.code.eq_ignore_ascii_case(code))
    }
}
