use anyhow::Result;
use status_alert_rust::{
    app::StatusAlertApp,
    config,
    infrastructure::{directories, logging},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let app = StatusAlertApp::initialize(config, paths)?;
    app.run().await
}
