//! calc-wind-speed
//!
//! Usage: `calc-wind-speed <u_file> <u_variable> <v_file> <v_variable> <output_file>`

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use wind_speed::{run, Args, ProvenanceContext, RuntimeConfig};

fn main() -> Result<()> {
    let args = Args::parse();

    // Optional .env for CALC_WSP_* / LOG_LEVEL
    dotenvy::dotenv().ok();
    let config = RuntimeConfig::from_env().context("Failed to read runtime configuration")?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Must run before the first netcdf call
    netcdf_io::silence_hdf5_errors();

    let provenance =
        ProvenanceContext::from_process(&config).context("Failed to determine code revision")?;

    info!(
        u_file = %args.u_file.display(),
        v_file = %args.v_file.display(),
        output = %args.output_file.display(),
        "Calculating wind speed"
    );

    run(&args, &provenance).with_context(|| {
        format!(
            "Wind speed calculation for {} failed",
            args.output_file.display()
        )
    })?;

    Ok(())
}
