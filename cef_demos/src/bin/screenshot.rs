use anyhow::{Context, Result, bail};
use cef_demos::{
    cef_app::{DemoApp, get_settings, load_runtime},
    config::read_config,
    driver::AppDriver,
    screenshot::Screenshot,
};
use log::info;
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
    let app = DemoApp::new().build();
    try_start_subprocess(&main_args, Some(app.clone()))?;

    let screenshot = Screenshot::new(config.screenshot_path.clone());
    let mut driver = AppDriver::new();
    driver.initialize(
        &main_args,
        &get_settings(&config, LogSeverity::Warning, true),
        Some(app),
    )?;
    driver.run_browser(
        &WindowInfo::windowless("screenshot"),
        screenshot.client(),
        &config.screenshot_url,
        &BrowserSettings::default(),
    )?;

    match screenshot.take_outcome() {
        Some(Ok(path)) => {
            info!("done, see {}", path.display());
            Ok(())
        }
        Some(Err(err)) => Err(err).context("no screenshot was saved"),
        None => bail!("the browser closed before a screenshot was saved"),
    }
}
