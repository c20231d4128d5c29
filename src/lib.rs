//! Fetch, decode and plot RADOLAN radar composites of the German Weather
//! Service (DWD) from its open data server.

mod composite;
mod conversion;
mod download;
mod error;
mod grid;
mod projection;
mod radar_plot;
mod render;
mod settings;
mod types;
mod utils;

pub use error::RadarError;
pub use radar_plot::*;
pub use settings::{PlotSettings, SettingsError};

pub use composite::error::DecodeError;
pub use composite::header::{CompositeAttributes, NODATA};
pub use composite::reader::{parse_radolan_composite, read_radolan_composite, Composite};
pub use conversion::{dbz_to_rainrate, rvp6_to_dbz, ZR_A, ZR_B};
pub use download::downloader::RadarDownloader;
pub use download::error::{DownloadError, RequestError};
pub use download::url::{build_url, dwd_url};
pub use grid::{Grid, RawGrid};
pub use projection::{from_stereographic, to_stereographic, MercatorFrame, RadolanGrid};
pub use render::error::RenderError;
pub use render::figure::RadarFigure;
pub use render::scale::{BoundaryNorm, ColorScale};
pub use render::text::load_font;

pub use types::output_units::OutputUnits;
pub use types::product::{FileTime, Product, DWD_RADAR_BASE_URL};
pub use types::station::{RadarStation, RADAR_STATIONS};
