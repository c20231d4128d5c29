//! Synthetic composites for tests.

fn header(
    product: &str,
    precision: &str,
    nrows: usize,
    ncols: usize,
    stations: &str,
    payload_len: usize,
) -> String {
    let text = format!("<{}>", stations);
    let build = |total: usize| {
        format!(
            "{}022050100000119BY{:7}VS 3SW   2.18.3PR{}INT   5GP{:>4}x{:>4}MS{:3}{}",
            product,
            total,
            precision,
            nrows,
            ncols,
            text.len(),
            text
        )
    };
    let len = build(0).len();
    build(len + 1 + payload_len)
}

/// RX file (one byte per cell) dated 2019-01-02 20:50 UTC.
pub(crate) fn rx_file(nrows: usize, ncols: usize, data: &[u8], stations: &str) -> Vec<u8> {
    let mut bytes = header("RX", " E+00", nrows, ncols, stations, data.len()).into_bytes();
    bytes.push(0x03);
    bytes.extend_from_slice(data);
    bytes
}

/// RW file (two bytes per cell, precision 0.1) dated 2019-01-02 20:50 UTC.
pub(crate) fn rw_file(nrows: usize, ncols: usize, cells: &[u16]) -> Vec<u8> {
    let mut bytes = header("RW", " E-01", nrows, ncols, "asb,boo", cells.len() * 2).into_bytes();
    bytes.push(0x03);
    for cell in cells {
        bytes.extend_from_slice(&cell.to_le_bytes());
    }
    bytes
}
