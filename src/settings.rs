//! Run configuration for [`RadarPlot`](crate::RadarPlot).

use crate::download::error::RequestError;
use crate::types::output_units::OutputUnits;
use crate::types::product::{FileTime, Product};
use crate::utils::get_cache_dir;
use bon::bon;
use std::path::PathBuf;
use thiserror::Error;

const TMP_FILE_NAME: &str = "dwd_radar_data.bin";
const FIG_FILE_NAME: &str = "radar_plot.png";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("No units given for plot")]
    MissingOutputUnits,

    #[error("Unknown output units '{0}', expected 'dBZ' or 'rainrate'")]
    InvalidOutputUnits(String),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Failed to determine cache directory for default file locations")]
    CacheDirResolution,
}

/// What to download, where to store it, and how to plot it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub product: Product,
    pub time: FileTime,
    /// Where the downloaded composite is stored.
    pub tmp_filename: PathBuf,
    /// Where the figure is written.
    pub fig_filename: PathBuf,
    pub output_units: OutputUnits,
    /// TrueType/OpenType font for titles and labels drawn into the figure.
    pub font_file: Option<PathBuf>,
}

#[bon]
impl PlotSettings {
    /// Builds the settings for one run.
    ///
    /// * `.product(Product)`: Optional, defaults to [`Product::Rx`].
    /// * `.latest(bool)`: Optional, defaults to `true`. `date` and `time` are
    ///   ignored while this is set.
    /// * `.date(..)` / `.time(..)`: `YYMMDD` and `HHMM` (UTC) of the file to fetch.
    /// * `.tmp_filename(..)` / `.fig_filename(..)`: Optional, default to files
    ///   in the `dwd_radar` cache directory.
    /// * `.output_units(OutputUnits)`: **Required.**
    /// * `.font_file(..)`: Optional font; without it the figure carries its
    ///   annotations only as PNG text chunks.
    ///
    /// # Errors
    ///
    /// * [`SettingsError::MissingOutputUnits`] if no units were given.
    /// * [`SettingsError::Request`] if `latest` is false and date or time is missing.
    /// * [`SettingsError::CacheDirResolution`] if a default path is needed but
    ///   the cache directory is unknown.
    ///
    /// ```
    /// use dwd_radar::{FileTime, OutputUnits, PlotSettings, Product};
    ///
    /// let settings = PlotSettings::builder()
    ///     .product(Product::Rw)
    ///     .latest(false)
    ///     .date("201301")
    ///     .time("0950")
    ///     .tmp_filename("/tmp/rw.bin")
    ///     .fig_filename("/tmp/rw.png")
    ///     .output_units(OutputUnits::RainRate)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(settings.time, FileTime::At { date: "201301".into(), time: "0950".into() });
    /// ```
    #[builder(finish_fn = build)]
    pub fn new(
        product: Option<Product>,
        #[builder(default = true)] latest: bool,
        #[builder(into)] date: Option<String>,
        #[builder(into)] time: Option<String>,
        #[builder(into)] tmp_filename: Option<PathBuf>,
        #[builder(into)] fig_filename: Option<PathBuf>,
        output_units: Option<OutputUnits>,
        #[builder(into)] font_file: Option<PathBuf>,
    ) -> Result<Self, SettingsError> {
        let output_units = output_units.ok_or(SettingsError::MissingOutputUnits)?;
        let time = FileTime::from_parts(
            latest,
            date.as_deref().unwrap_or_default(),
            time.as_deref().unwrap_or_default(),
        )?;
        let tmp_filename = match tmp_filename {
            Some(path) => path,
            None => default_path(TMP_FILE_NAME)?,
        };
        let fig_filename = match fig_filename {
            Some(path) => path,
            None => default_path(FIG_FILE_NAME)?,
        };

        Ok(Self {
            product: product.unwrap_or(Product::Rx),
            time,
            tmp_filename,
            fig_filename,
            output_units,
            font_file,
        })
    }
}

fn default_path(file_name: &str) -> Result<PathBuf, SettingsError> {
    get_cache_dir()
        .map(|dir| dir.join(file_name))
        .ok_or(SettingsError::CacheDirResolution)
}
