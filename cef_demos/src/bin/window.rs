use anyhow::{Context, Result};
use cef_demos::{
    cef_app::{DemoApp, get_settings, load_runtime},
    config::read_config,
    driver::AppDriver,
    window,
};
use rust_cef::{
    enums::log_severity::LogSeverity, functions::try_start_subprocess::try_start_subprocess,
    structs::main_args::MainArgs,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = read_config()?;
    load_runtime(&config).context("failed to load CEF")?;

    let main_args = MainArgs::from_env();
    let app = DemoApp::new().build();
    try_start_subprocess(&main_args, Some(app.clone()))?;

    let mut driver = AppDriver::new();
    driver.initialize(
        &main_args,
        &get_settings(&config, LogSeverity::Warning, false),
        Some(app),
    )?;
    window::run(&mut driver, &config.window_url)?;
    Ok(())
}
