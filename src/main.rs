mod app;
mod config;
mod corpus;
mod domain;
mod error;
mod evaluation;
mod infrastructure;
mod model;
mod text;

use anyhow::Result;
use infrastructure::{directories, logging};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let app = app::SpamLabApp::initialize(config, paths);
    if let Err(err) = app.run() {
        tracing::error!(target: "app", error = %format!("{err:#}"), "pipeline failed");
        return Err(err);
    }
    Ok(())
}
