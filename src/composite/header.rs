//! Parsing of the ASCII header that precedes every RADOLAN composite.
//!
//! Layout of an RX header (terminated by ETX, `0x03`):
//!
//! ```text
//! RX022050100000119BY 810134VS 3SW   2.18.3PR E+00INT   5GP 900x 900MS 58<boo,ros,...>
//! ^^                 product
//!   ^^^^^^           day, hour, minute (UTC)
//!         ^^^^^      radar id, always 10000 for composites
//!              ^^^^  month, two-digit year
//! ```

use crate::composite::error::DecodeError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Sentinel written into cells flagged as "no data".
pub const NODATA: f64 = -9999.0;

const FIXED_PART_LEN: usize = 17;

/// Tokens that may appear between the fixed part and the `MS` text block.
const TOKENS: [&str; 10] = ["BY", "VS", "SW", "PR", "INT", "GP", "VV", "MF", "QN", "VR"];

/// Metadata of a decoded composite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeAttributes {
    /// Two-letter product type, upper case (e.g. `"RX"`).
    pub product: String,
    /// Acquisition time (UTC).
    pub datetime: DateTime<Utc>,
    /// Radar id; `10000` for national composites.
    pub radar_id: String,
    /// Payload size in bytes, derived from the `BY` token.
    pub datasize: Option<usize>,
    /// Format version (`VS`).
    pub format_version: Option<u8>,
    /// Version of the RADOLAN software that produced the file (`SW`).
    pub software_version: Option<String>,
    /// Scale factor applied to two-byte values (`PR`).
    pub precision: f64,
    /// Accumulation interval in seconds (`INT`).
    pub interval_seconds: Option<u32>,
    pub nrows: usize,
    pub ncols: usize,
    /// Lowercase codes of the contributing radar sites.
    pub radar_locations: Vec<String>,
    /// Value written into no-data cells.
    pub nodata_flag: f64,
    /// Flat indices of cells flagged as clutter.
    #[serde(skip)]
    pub clutter: Vec<usize>,
    /// Flat indices of cells carrying secondary data.
    #[serde(skip)]
    pub secondary: Vec<usize>,
}

/// Parses the header text (everything before ETX).
pub fn parse_header(header: &str) -> Result<CompositeAttributes, DecodeError> {
    if !header.is_ascii() {
        return Err(DecodeError::NonAsciiHeader);
    }
    if header.len() < FIXED_PART_LEN {
        return Err(DecodeError::HeaderTooShort(header.len()));
    }

    let product = header[0..2].to_ascii_uppercase();
    let datetime = parse_timestamp(&header[2..8], &header[13..17])?;
    let radar_id = header[8..13].to_string();

    let rest = &header[FIXED_PART_LEN..];
    let (fields, text) = match rest.find("MS") {
        Some(pos) => (&rest[..pos], Some(&rest[pos..])),
        None => (rest, None),
    };
    let values = token_values(fields);
    let value = |token: &str| {
        values
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, v)| v.trim())
    };

    let datasize = value("BY")
        .map(|v| parse_field::<usize>("BY", v))
        .transpose()?
        .map(|total| total.saturating_sub(header.len() + 1));
    let format_version = value("VS")
        .map(|v| parse_field::<u8>("VS", v))
        .transpose()?;
    let software_version = value("SW").map(str::to_string);
    let precision = value("PR")
        .map(|v| parse_field::<f64>("PR", &format!("1{}", v)))
        .transpose()?
        .unwrap_or(1.0);
    let interval_seconds = value("INT")
        .map(|v| parse_field::<u32>("INT", v))
        .transpose()?
        .map(|minutes| {
            minutes.checked_mul(60).ok_or_else(|| DecodeError::InvalidField {
                field: "INT",
                value: minutes.to_string(),
            })
        })
        .transpose()?;

    let dimensions = value("GP").ok_or(DecodeError::MissingToken("GP"))?;
    let (nrows, ncols) = parse_dimensions(dimensions)?;

    Ok(CompositeAttributes {
        product,
        datetime,
        radar_id,
        datasize,
        format_version,
        software_version,
        precision,
        interval_seconds,
        nrows,
        ncols,
        radar_locations: text.map(parse_radar_locations).unwrap_or_default(),
        nodata_flag: NODATA,
        clutter: Vec::new(),
        secondary: Vec::new(),
    })
}

fn parse_timestamp(day_time: &str, month_year: &str) -> Result<DateTime<Utc>, DecodeError> {
    let invalid = || DecodeError::InvalidTimestamp(format!("{}{}", day_time, month_year));
    let number = |s: &str| s.parse::<u32>().map_err(|_| invalid());

    let day = number(&day_time[0..2])?;
    let hour = number(&day_time[2..4])?;
    let minute = number(&day_time[4..6])?;
    let month = number(&month_year[0..2])?;
    let year = 2000 + number(&month_year[2..4])? as i32;

    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(invalid)
}

/// Splits the token section into `(token, value)` pairs; each value runs up
/// to the next token.
fn token_values(fields: &str) -> Vec<(&'static str, &str)> {
    let mut positions: Vec<(usize, &'static str)> = TOKENS
        .iter()
        .filter_map(|&token| fields.find(token).map(|pos| (pos, token)))
        .collect();
    positions.sort_unstable();

    positions
        .iter()
        .enumerate()
        .map(|(i, &(pos, token))| {
            let end = positions.get(i + 1).map_or(fields.len(), |&(next, _)| next);
            (token, &fields[pos + token.len()..end])
        })
        .collect()
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, DecodeError> {
    value.trim().parse().map_err(|_| DecodeError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn parse_dimensions(value: &str) -> Result<(usize, usize), DecodeError> {
    let invalid = || DecodeError::InvalidField {
        field: "GP",
        value: value.to_string(),
    };
    let (rows, cols) = value.split_once('x').ok_or_else(invalid)?;
    let nrows = rows.trim().parse().map_err(|_| invalid())?;
    let ncols = cols.trim().parse().map_err(|_| invalid())?;
    Ok((nrows, ncols))
}

/// Extracts `<boo,ros,...>` from the `MS` text block.
fn parse_radar_locations(text: &str) -> Vec<String> {
    let Some(start) = text.find('<') else {
        return Vec::new();
    };
    let end = text[start..].find('>').map_or(text.len(), |e| start + e);
    text[start + 1..end]
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .map(str::to_ascii_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const RX_HEADER: &str = "RX022050100000119BY 810134VS 3SW   2.18.3PR E+00INT   5GP 900x 900MS 58<boo,ros,emd,hnr,umd,pro,ess,asd,neu,nhb,oft,tur,isn,fbg,mem> ";

    #[test]
    fn parses_rx_header() {
        let attrs = parse_header(RX_HEADER).unwrap();
        assert_eq!(attrs.product, "RX");
        assert_eq!(
            attrs.datetime,
            Utc.with_ymd_and_hms(2019, 1, 2, 20, 50, 0).unwrap()
        );
        assert_eq!(attrs.radar_id, "10000");
        assert_eq!(attrs.format_version, Some(3));
        assert_eq!(attrs.software_version.as_deref(), Some("2.18.3"));
        assert_eq!(attrs.precision, 1.0);
        assert_eq!(attrs.interval_seconds, Some(300));
        assert_eq!((attrs.nrows, attrs.ncols), (900, 900));
        assert_eq!(attrs.datasize, Some(810134 - RX_HEADER.len() - 1));
        assert_eq!(attrs.radar_locations.len(), 15);
        assert_eq!(attrs.radar_locations[0], "boo");
        assert!(attrs.radar_locations.contains(&"umd".to_string()));
        assert_eq!(attrs.nodata_flag, NODATA);
    }

    #[test]
    fn parses_precision_exponent() {
        let header = "RW100950100000113BY1620127VS 3SW   2.13.1PR E-01INT  60GP 900x 900MS 10<asb,boo> ";
        let attrs = parse_header(header).unwrap();
        assert!((attrs.precision - 0.1).abs() < 1e-12);
        assert_eq!(attrs.interval_seconds, Some(3600));
        assert_eq!(attrs.radar_locations, vec!["asb", "boo"]);
    }

    #[test]
    fn station_list_after_ms_is_ignored_for_tokens() {
        let header = "RW100950100000113BY1620127VS 3PR E-01GP 900x 900MS 14<asb,boo,drs> ST 15<asb 1,boo 1>";
        let attrs = parse_header(header).unwrap();
        assert_eq!(attrs.radar_locations, vec!["asb", "boo", "drs"]);
    }

    #[test]
    fn missing_grid_dimensions() {
        let err = parse_header("RX022050100000119BY 810134VS 3").unwrap_err();
        assert!(matches!(err, DecodeError::MissingToken("GP")));
    }

    #[test]
    fn invalid_timestamp() {
        let err = parse_header("RX322050100000119GP 900x 900").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidTimestamp(_)));
    }

    #[test]
    fn short_header() {
        assert!(matches!(
            parse_header("RX0220"),
            Err(DecodeError::HeaderTooShort(6))
        ));
    }

    #[test]
    fn malformed_dimensions() {
        let err = parse_header("RX022050100000119GP 900 900").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { field: "GP", .. }));
    }

    #[test]
    fn oversized_interval() {
        let err = parse_header("RX022050100000119INT 99999999GP 900x 900").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { field: "INT", .. }));
    }
}
