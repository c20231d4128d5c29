//! The download → decode → convert → plot pipeline.

use crate::composite::reader::{read_radolan_composite, Composite};
use crate::download::downloader::RadarDownloader;
use crate::download::url::dwd_url;
use crate::error::RadarError;
use crate::grid::Grid;
use crate::projection::RadolanGrid;
use crate::render::error::RenderError;
use crate::render::figure::RadarFigure;
use crate::render::scale::ColorScale;
use crate::render::text::load_font;
use crate::settings::PlotSettings;
use crate::types::output_units::OutputUnits;
use crate::types::product::{FileTime, Product};
use crate::types::station::RadarStation;
use crate::utils::ensure_parent_dir_exists;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tokio::task;

/// Runs one plot job described by [`PlotSettings`].
///
/// ```no_run
/// # use dwd_radar::{OutputUnits, PlotSettings, RadarError, RadarPlot};
/// # async fn run() -> Result<(), RadarError> {
/// let settings = PlotSettings::builder()
///     .output_units(OutputUnits::Dbz)
///     .build()?;
/// RadarPlot::new(settings).run().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RadarPlot {
    settings: PlotSettings,
    downloader: RadarDownloader,
}

impl RadarPlot {
    pub fn new(settings: PlotSettings) -> Self {
        Self::with_downloader(settings, RadarDownloader::new())
    }

    pub fn with_downloader(settings: PlotSettings, downloader: RadarDownloader) -> Self {
        Self {
            settings,
            downloader,
        }
    }

    pub fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    /// Download URL of the configured product and time.
    pub fn url(&self) -> String {
        dwd_url(self.settings.product, &self.settings.time)
    }

    /// Fetches the composite into `tmp_filename`. Returns the number of bytes stored.
    pub async fn download_radar_data(&self) -> Result<u64, RadarError> {
        match &self.settings.time {
            FileTime::Latest => info!("Fetching latest {} composite", self.settings.product),
            time => info!("Fetching {} composite for {}", self.settings.product, time),
        }
        let url = self.url();
        Ok(self
            .downloader
            .download(&url, &self.settings.tmp_filename)
            .await?)
    }

    /// Decodes the composite stored at `tmp_filename`.
    pub async fn load_composite(&self) -> Result<Composite, RadarError> {
        let path = self.settings.tmp_filename.clone();
        info!("Reading composite from {}", path.display());
        let composite = task::spawn_blocking(move || read_radolan_composite(&path)).await??;

        match serde_json::to_string(&composite.attributes) {
            Ok(json) => debug!("Composite attributes: {}", json),
            Err(e) => warn!("Could not serialize composite attributes: {}", e),
        }
        Ok(composite)
    }

    /// Masks no-data cells and converts to the configured output units.
    pub fn derive_grid(&self, composite: &Composite) -> Grid {
        let dbz = composite
            .grid
            .mask_equal(composite.attributes.nodata_flag)
            .to_dbz();
        let grid = match self.settings.output_units {
            OutputUnits::Dbz => dbz,
            OutputUnits::RainRate => dbz.to_rainrate(),
        };
        info!(
            "{} of {} cells hold data, maximum {:?} {}",
            grid.valid_count(),
            grid.nrows() * grid.ncols(),
            grid.max(),
            self.settings.output_units.label()
        );
        grid
    }

    /// Renders `grid` and writes the figure to `fig_filename`.
    pub async fn create_radar_fig(
        &self,
        composite: &Composite,
        grid: Grid,
    ) -> Result<PathBuf, RadarError> {
        let radar_grid = RadolanGrid::for_shape(grid.nrows(), grid.ncols()).ok_or(
            RenderError::UnknownGridShape {
                nrows: grid.nrows(),
                ncols: grid.ncols(),
            },
        )?;
        let stations = resolve_stations(&composite.attributes.radar_locations);
        let title = format!(
            "RADOLAN {}\n{}",
            self.settings.product.code().to_uppercase(),
            composite.attributes.datetime.format("%Y-%m-%dT%H:%M:%S")
        );
        let units = self.settings.output_units;
        let path = self.settings.fig_filename.clone();
        ensure_parent_dir_exists(&path)
            .await
            .map_err(|e| RadarError::OutputDirCreation(path.clone(), e))?;

        let target = path.clone();
        let font_file = self.settings.font_file.clone();
        task::spawn_blocking(move || {
            let font = font_file.as_deref().map(load_font).transpose()?;
            let scale = ColorScale::for_units(units);
            RadarFigure::builder()
                .grid(&grid)
                .radar_grid(radar_grid)
                .scale(&scale)
                .stations(stations)
                .title(title)
                .units(units.label())
                .maybe_font(font.as_ref())
                .build()
                .save(&target)
        })
        .await??;

        info!("Figure written to {}", path.display());
        Ok(path)
    }

    /// Plots the composite already stored at `tmp_filename`.
    pub async fn plot_stored_composite(&self) -> Result<PathBuf, RadarError> {
        let composite = self.load_composite().await?;
        let grid = self.derive_grid(&composite);
        self.create_radar_fig(&composite, grid).await
    }

    /// Downloads, decodes and plots. Returns the figure path.
    pub async fn run(&self) -> Result<PathBuf, RadarError> {
        self.download_radar_data().await?;
        self.plot_stored_composite().await
    }
}

/// Looks up the contributing radar sites; unknown codes are skipped.
fn resolve_stations(codes: &[String]) -> Vec<&'static RadarStation> {
    codes
        .iter()
        .filter_map(|code| {
            let station = RadarStation::lookup(code);
            if station.is_none() {
                warn!("Unknown radar station '{}', not drawn", code);
            }
            station
        })
        .collect()
}

/// Plots the latest RX composite as rain rate.
///
/// The composite is downloaded to `tmp_file`, the figure written to `fig_file`.
pub async fn process(tmp_file: &Path, fig_file: &Path) -> Result<PathBuf, RadarError> {
    let settings = PlotSettings::builder()
        .product(Product::Rx)
        .latest(true)
        .tmp_filename(tmp_file)
        .fig_filename(fig_file)
        .output_units(OutputUnits::RainRate)
        .build()?;
    RadarPlot::new(settings).run().await
}
