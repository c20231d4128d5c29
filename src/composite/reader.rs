use crate::composite::error::DecodeError;
use crate::composite::header::{parse_header, CompositeAttributes, NODATA};
use crate::grid::RawGrid;
use std::path::Path;

const ETX: u8 = 0x03;

const RVP6_NODATA: u8 = 250;
const RVP6_CLUTTER: u8 = 249;

const SECONDARY_BIT: u16 = 0x1000;
const NODATA_BIT: u16 = 0x2000;
const NEGATIVE_BIT: u16 = 0x4000;
const CLUTTER_BIT: u16 = 0x8000;
const VALUE_MASK: u16 = 0x0FFF;

/// A decoded RADOLAN composite.
#[derive(Debug, Clone)]
pub struct Composite {
    pub grid: RawGrid,
    pub attributes: CompositeAttributes,
}

/// Reads and decodes the composite stored at `path`.
pub fn read_radolan_composite(path: &Path) -> Result<Composite, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::FileRead(path.to_path_buf(), e))?;
    parse_radolan_composite(&bytes)
}

/// Decodes a composite held in memory.
pub fn parse_radolan_composite(bytes: &[u8]) -> Result<Composite, DecodeError> {
    let etx = bytes
        .iter()
        .position(|&b| b == ETX)
        .ok_or(DecodeError::MissingEtx)?;
    let header = std::str::from_utf8(&bytes[..etx]).map_err(|_| DecodeError::NonAsciiHeader)?;
    let mut attributes = parse_header(header)?;
    let payload = &bytes[etx + 1..];

    let cells = attributes
        .nrows
        .checked_mul(attributes.ncols)
        .ok_or_else(|| DecodeError::InvalidField {
            field: "GP",
            value: format!("{}x{}", attributes.nrows, attributes.ncols),
        })?;
    let values = match bytes_per_cell(&attributes.product)? {
        1 => decode_rvp6(payload, cells, &mut attributes)?,
        _ => decode_two_byte(payload, cells, &mut attributes)?,
    };

    let grid = RawGrid::new(attributes.nrows, attributes.ncols, values).ok_or(
        DecodeError::DataSizeMismatch {
            expected: cells,
            found: payload.len(),
        },
    )?;
    Ok(Composite { grid, attributes })
}

fn bytes_per_cell(product: &str) -> Result<usize, DecodeError> {
    match product {
        "RX" | "WX" | "EX" => Ok(1),
        "PG" | "PC" => Err(DecodeError::UnsupportedProduct(product.to_string())),
        _ => Ok(2),
    }
}

fn checked_payload(payload: &[u8], expected: usize) -> Result<&[u8], DecodeError> {
    payload
        .get(..expected)
        .ok_or(DecodeError::DataSizeMismatch {
            expected,
            found: payload.len(),
        })
}

/// One byte per cell in RVP6 units.
fn decode_rvp6(
    payload: &[u8],
    cells: usize,
    attributes: &mut CompositeAttributes,
) -> Result<Vec<f64>, DecodeError> {
    let data = checked_payload(payload, cells)?;
    Ok(data
        .iter()
        .enumerate()
        .map(|(i, &b)| match b {
            RVP6_NODATA => NODATA,
            RVP6_CLUTTER => {
                attributes.clutter.push(i);
                b as f64
            }
            _ => b as f64,
        })
        .collect())
}

/// Two bytes per cell, little endian: 12 value bits plus flag bits.
fn decode_two_byte(
    payload: &[u8],
    cells: usize,
    attributes: &mut CompositeAttributes,
) -> Result<Vec<f64>, DecodeError> {
    let data = checked_payload(payload, cells.saturating_mul(2))?;
    let precision = attributes.precision;
    Ok(data
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let raw = u16::from_le_bytes([pair[0], pair[1]]);
            if raw & SECONDARY_BIT != 0 {
                attributes.secondary.push(i);
            }
            if raw & CLUTTER_BIT != 0 {
                attributes.clutter.push(i);
            }
            if raw & NODATA_BIT != 0 {
                return NODATA;
            }
            let value = (raw & VALUE_MASK) as f64 * precision;
            if raw & NEGATIVE_BIT != 0 {
                -value
            } else {
                value
            }
        })
        .collect())
}
