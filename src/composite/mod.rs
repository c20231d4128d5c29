//! Reader for RADOLAN composite files as published by DWD.
//!
//! Only the uncompressed formats are supported: one byte per cell for the
//! reflectivity products (RX, WX, EX) and two bytes per cell for the
//! precipitation products (RW and friends).

pub mod error;
pub mod header;
pub mod reader;

#[cfg(test)]
pub(crate) mod testdata;
