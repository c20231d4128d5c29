//! Construction of download URLs on the DWD open-data server.
//!
//! Sample URLs:
//!
//! ```text
//! https://opendata.dwd.de/weather/radar/radolan/rw/raa01-rw_10000-latest-dwd---bin
//! https://opendata.dwd.de/weather/radar/composit/rx/raa01-rx_10000-2013010950-dwd---bin
//! ```

use crate::download::error::RequestError;
use crate::types::product::{FileTime, Product};

/// Builds the URL of a single composite file.
///
/// # Examples
///
/// ```
/// use dwd_radar::{dwd_url, FileTime, Product};
///
/// assert_eq!(
///     dwd_url(Product::Rx, &FileTime::Latest),
///     "https://opendata.dwd.de/weather/radar/composit/rx/raa01-rx_10000-latest-dwd---bin"
/// );
/// ```
pub fn dwd_url(product: Product, time: &FileTime) -> String {
    format!("{}-{}-dwd---bin", product.base_url(), time.url_suffix())
}

/// Builds the URL from loosely typed parameters, the way they come from
/// user input.
///
/// The date/time check runs before the product is resolved.
///
/// # Errors
///
/// * [`RequestError::MissingDateTime`] if `latest` is false and `date` or `time` is empty.
/// * [`RequestError::InvalidProduct`] if `product` is not one of `rw`, `rx`, `wx`.
pub fn build_url(
    product: &str,
    latest: bool,
    date: &str,
    time: &str,
) -> Result<String, RequestError> {
    let time = FileTime::from_parts(latest, date, time)?;
    let product: Product = product.parse()?;
    Ok(dwd_url(product, &time))
}
