use anyhow::{Context, Result, bail};
use cef_demos::{
    cef_app::{get_settings, load_runtime},
    config::read_config,
    driver::AppDriver,
    javascript::{JavascriptBridge, app},
    static_server::StaticServer,
};
use log::{error, info};
use rust_cef::{
    enums::log_severity::LogSeverity,
    functions::try_start_subprocess::try_start_subprocess,
    structs::{browser_settings::BrowserSettings, main_args::MainArgs, window_info::WindowInfo},
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = read_config()?;
    load_runtime(&config).context("failed to load CEF")?;

    let main_args = MainArgs::from_env();
    let app = app();
    try_start_subprocess(&main_args, Some(app.clone()))?;

    let server = StaticServer::start(&config.webpage_dir)?;
    let bridge = JavascriptBridge::new();

    let mut driver = AppDriver::new();
    driver.initialize(
        &main_args,
        &get_settings(&config, LogSeverity::Debug, true),
        Some(app),
    )?;
    driver.run_browser(
        &WindowInfo::windowless("javascript"),
        bridge.client(),
        &server.url("index.html"),
        &BrowserSettings::default(),
    )?;
    server.shutdown()?;

    let errors = bridge.take_errors();
    for err in &errors {
        error!("{err}");
    }
    if !errors.is_empty() {
        bail!("the javascript example failed with {} error(s)", errors.len());
    }
    if !bridge.bar_called() {
        bail!("example.bar() was never called");
    }
    info!("done");
    Ok(())
}
