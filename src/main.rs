use anyhow::Result;
use log::info;

use point_fit::{DriverConfig, run};

fn main() -> Result<()> {
    env_logger::init();

    let config = DriverConfig::load()?;
    info!("configuration: {config:?}");

    let summary = run(&config)?;
    if summary.failed > 0 {
        info!("{} file(s) could not be processed", summary.failed);
    }

    Ok(())
}
