use clap::Parser;
use dwd_radar::{OutputUnits, PlotSettings, Product, RadarError, RadarPlot};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;

/// Download the latest DWD radar composite and plot it as PNG.
#[derive(Parser, Debug)]
#[command(name = "dwd-radar-plot", version, about)]
struct Cli {
    /// Where to store the downloaded composite
    tmp_file: PathBuf,

    /// Where to write the figure
    fig_file: PathBuf,

    /// Product to fetch (rw, rx or wx)
    #[arg(long, default_value = "rx")]
    product: Product,

    /// Date of a past composite, YYMMDD (UTC)
    #[arg(long, requires = "time")]
    date: Option<String>,

    /// Time of a past composite, HHMM (UTC)
    #[arg(long, requires = "date")]
    time: Option<String>,

    /// Quantity to plot (dBZ or rainrate)
    #[arg(long, default_value = "rainrate")]
    units: OutputUnits,

    /// TTF/OTF font used to draw title, labels and attribution
    #[arg(long, value_name = "TTF")]
    font: Option<PathBuf>,
}

async fn run(cli: Cli) -> Result<PathBuf, RadarError> {
    let settings = PlotSettings::builder()
        .product(cli.product)
        .latest(cli.date.is_none())
        .maybe_date(cli.date)
        .maybe_time(cli.time)
        .tmp_filename(cli.tmp_file)
        .fig_filename(cli.fig_file)
        .output_units(cli.units)
        .maybe_font_file(cli.font)
        .build()?;
    RadarPlot::new(settings).run().await
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(path) => {
            info!("Done: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
