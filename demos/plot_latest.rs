// demos/plot_latest.rs
use dwd_radar::{process, RadarError};
use std::env;

#[tokio::main]
async fn main() -> Result<(), RadarError> {
    // Set RUST_LOG=info (or debug) to follow the pipeline
    env_logger::init();

    let out_dir = env::temp_dir().join("dwd_radar_demo");
    let tmp_file = out_dir.join("dwd_radar_data.bin");
    let fig_file = out_dir.join("radar_plot.png");

    println!("Fetching the latest RX composite...");
    match process(&tmp_file, &fig_file).await {
        Ok(path) => println!("Rain rate map written to {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
