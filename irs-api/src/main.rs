use clap::Parser;

use irs_api::{ApiConfig, app, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::parse();
    logging::init_logging(config.log_file.as_deref())?;

    app::run(&config).await
}
