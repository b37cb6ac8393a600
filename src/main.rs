mod app;
mod chat;
mod cli;
mod commands;
mod config;
mod core;
mod display;
mod input;
mod map;
mod providers;
mod route;

use crate::app::Application;
use crate::cli::parser::Args;
use crate::config::Config;
use crate::core::error::TmapError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn load_config(args: &Args) -> Result<Config, TmapError> {
    let path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&path)?;
    if let Some(name) = &args.geocoder {
        config.set_geocoder(name)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            display::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let mut app = Application::new(args, config);
    if let Err(e) = app.run().await {
        tracing::debug!(error = ?e, "run failed");
        display::display_error(&e.to_string());
        std::process::exit(1);
    }
}
