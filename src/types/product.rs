//! Defines the RADOLAN products that can be fetched from the DWD open-data
//! server and the time selector used to pick a single composite file.

use crate::download::error::RequestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host and root directory of the DWD radar open-data tree.
pub const DWD_RADAR_BASE_URL: &str = "https://opendata.dwd.de/weather/radar";

/// A RADOLAN composite product published on `opendata.dwd.de`.
///
/// | Code | Interval | Content                                             |
/// |------|----------|-----------------------------------------------------|
/// | RW   | 1 h      | hourly sum with standard adjustment, 0.1 mm         |
/// | RX   | 5 min    | reflectivity in RVP6 units (1 byte per cell)        |
/// | WX   | 5 min    | RX extended to the neighbouring countries (1 byte)  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Product {
    /// Hourly precipitation sum, adjusted with rain gauges.
    Rw,
    /// Five minute reflectivity composite.
    Rx,
    /// Five minute reflectivity composite, extended domain.
    Wx,
}

impl Product {
    /// All products the downloader knows about.
    pub const ALL: [Product; 3] = [Product::Rw, Product::Rx, Product::Wx];

    /// Lowercase product code as used in DWD file names (e.g. `"rx"`).
    pub fn code(&self) -> &'static str {
        match self {
            Product::Rw => "rw",
            Product::Rx => "rx",
            Product::Wx => "wx",
        }
    }

    /// Directory of the product family on the open-data server.
    pub(crate) fn family(&self) -> &'static str {
        match self {
            Product::Rw => "radolan",
            Product::Rx | Product::Wx => "composit",
        }
    }

    /// URL prefix shared by every file of this product, up to the time suffix.
    ///
    /// ```
    /// use dwd_radar::Product;
    ///
    /// assert_eq!(
    ///     Product::Rw.base_url(),
    ///     "https://opendata.dwd.de/weather/radar/radolan/rw/raa01-rw_10000"
    /// );
    /// ```
    pub fn base_url(&self) -> String {
        format!(
            "{}/{}/{}/raa01-{}_10000",
            DWD_RADAR_BASE_URL,
            self.family(),
            self.code(),
            self.code()
        )
    }
}

impl FromStr for Product {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rw" => Ok(Product::Rw),
            "rx" => Ok(Product::Rx),
            "wx" => Ok(Product::Wx),
            _ => Err(RequestError::InvalidProduct(s.to_string())),
        }
    }
}

/// Formats a `Product` using its lowercase code.
///
/// # Examples
///
/// ```
/// use dwd_radar::Product;
///
/// assert_eq!(Product::Rx.to_string(), "rx");
/// ```
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Selects which file of a product to download.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileTime {
    /// The most recent composite (`...-latest-dwd---bin`).
    Latest,
    /// A specific composite, identified by its UTC date (`YYMMDD`) and time (`HHMM`).
    At { date: String, time: String },
}

impl FileTime {
    /// Builds a `FileTime` from the loose `latest` / `date` / `time` triple.
    ///
    /// Date and time are ignored when `latest` is set. Otherwise both have to
    /// be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingDateTime`] if `latest` is false and either
    /// `date` or `time` is empty.
    pub fn from_parts(latest: bool, date: &str, time: &str) -> Result<Self, RequestError> {
        if latest {
            return Ok(FileTime::Latest);
        }
        if date.is_empty() || time.is_empty() {
            return Err(RequestError::MissingDateTime);
        }
        Ok(FileTime::At {
            date: date.to_string(),
            time: time.to_string(),
        })
    }

    /// Selects the composite that was produced at `datetime` (UTC).
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use dwd_radar::FileTime;
    ///
    /// let at = FileTime::at(Utc.with_ymd_and_hms(2013, 1, 9, 9, 50, 0).unwrap());
    /// assert_eq!(at, FileTime::At { date: "130109".into(), time: "0950".into() });
    /// ```
    pub fn at(datetime: DateTime<Utc>) -> Self {
        FileTime::At {
            date: datetime.format("%y%m%d").to_string(),
            time: datetime.format("%H%M").to_string(),
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, FileTime::Latest)
    }

    /// File name fragment between the product prefix and `-dwd---bin`.
    pub(crate) fn url_suffix(&self) -> String {
        match self {
            FileTime::Latest => "latest".to_string(),
            FileTime::At { date, time } => format!("{}{}", date, time),
        }
    }
}

impl fmt::Display for FileTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileTime::Latest => write!(f, "latest"),
            FileTime::At { date, time } => write!(f, "{} {}", date, time),
        }
    }
}
