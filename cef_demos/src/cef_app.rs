//! Pieces every demo shares: the app table, runtime settings, the client
//! table and the browser handle that posted tasks act on.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use rust_cef::{
    CefError,
    c_to_rust::{
        browser::Browser,
        command_line::{CommandLine, ProcessType},
        frame::Frame,
    },
    api,
    enums::log_severity::LogSeverity,
    functions::{message_loop::quit_message_loop, version::version_info},
    rust_to_c::{
        app::{App, AppConfig},
        client::{Client, ClientConfig},
        life_span_handler::{LifeSpanHandler, LifeSpanHandlerConfig},
        load_handler::LoadHandler,
        render_handler::RenderHandler,
        render_process_handler::RenderProcessHandler,
    },
    structs::settings::Settings,
    util::cef_arc::CefArc,
};

use crate::config::Config;

/// Loads the runtime library the config points at.
pub fn load_runtime(config: &Config) -> Result<(), CefError> {
    // SAFETY: the configured library is a CEF build with the layout these
    // bindings are generated from.
    unsafe { api::load(&config.library_path) }?;
    match version_info() {
        Ok(version) => info!("CEF version: {version}"),
        Err(err) => warn!("failed to read the CEF version: {err}"),
    }
    Ok(())
}

#[derive(Default)]
pub struct DemoApp {
    single_process: bool,
    render_process_handler: Option<CefArc<RenderProcessHandler>>,
}

impl DemoApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the renderer inside the browser process, which in-process V8
    /// extensions need.
    pub fn single_process(mut self) -> Self {
        self.single_process = true;
        self
    }

    pub fn with_render_process_handler(mut self, handler: CefArc<RenderProcessHandler>) -> Self {
        self.render_process_handler = Some(handler);
        self
    }

    pub fn build(self) -> CefArc<App> {
        App::new(self)
    }
}

impl AppConfig for DemoApp {
    fn on_before_command_line_processing(
        &self,
        process_type: ProcessType,
        command_line: &CommandLine,
    ) {
        if process_type != ProcessType::Browser {
            return;
        }
        #[cfg(target_os = "macos")]
        command_line.append_switch("use-mock-keychain");
        if self.single_process {
            debug!("appending single-process switch");
            command_line.append_switch("single-process");
        }
    }

    fn get_render_process_handler(&self) -> Option<CefArc<RenderProcessHandler>> {
        self.render_process_handler.clone()
    }
}

/// Runtime settings shared by the demos. `log_severity` applies unless the
/// configuration overrides it.
pub fn get_settings(config: &Config, log_severity: LogSeverity, windowless: bool) -> Settings {
    let path = |path: &Option<std::path::PathBuf>| {
        path.as_ref().map(|path| path.display().to_string())
    };

    Settings {
        no_sandbox: true,
        windowless_rendering_enabled: windowless,
        log_severity: config.log_severity.unwrap_or(log_severity),
        resources_dir_path: path(&config.resources_dir),
        locales_dir_path: path(&config.locales_dir),
        root_cache_path: path(&config.cache_dir),
        ..Default::default()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("no browser has been saved yet")]
    NotSaved,

    #[error(transparent)]
    Cef(#[from] CefError),
}

/// The last browser seen by an event callback, read later by posted tasks.
#[derive(Clone, Default)]
pub struct SavedBrowser(Arc<Mutex<Option<CefArc<Browser>>>>);

impl SavedBrowser {
    pub fn save(&self, browser: CefArc<Browser>) {
        *self.0.lock() = Some(browser);
    }

    pub fn get(&self) -> Result<CefArc<Browser>, BrowserError> {
        self.0.lock().clone().ok_or(BrowserError::NotSaved)
    }

    pub fn is_saved(&self) -> bool {
        self.0.lock().is_some()
    }

    pub fn clear(&self) -> Option<CefArc<Browser>> {
        self.0.lock().take()
    }

    /// Asks the runtime to close the saved browser and forgets it. Must run
    /// in a posted task, never inside a load or paint callback.
    pub fn close(&self) -> Result<(), BrowserError> {
        let browser = self.clear().ok_or(BrowserError::NotSaved)?;
        let host = browser
            .get_host()
            .ok_or(CefError::NullHandle("browser host"))?;
        info!("closing browser {}", browser.identifier());
        host.close_browser(false);
        Ok(())
    }
}

impl fmt::Debug for SavedBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.0.lock().as_ref().map(|browser| browser.identifier());
        f.debug_tuple("SavedBrowser").field(&id).finish()
    }
}

/// A main frame navigation that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub url: String,
    pub error_code: i32,
    pub error_text: String,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to load {}: {} ({})",
            self.url, self.error_text, self.error_code
        )
    }
}

/// Logs a failed navigation and returns it if it happened in the main
/// frame. Failures of sub-frames are ignored.
pub fn main_frame_failure(
    frame: &Frame,
    error_code: i32,
    error_text: &str,
    failed_url: &str,
) -> Option<LoadFailure> {
    if !frame.is_main() {
        debug!("ignoring load error {error_code} of a sub-frame: {failed_url}");
        return None;
    }
    let failure = LoadFailure {
        url: failed_url.to_string(),
        error_code,
        error_text: error_text.to_string(),
    };
    error!("{failure}");
    Some(failure)
}

/// Quits the message loop once the last open browser is about to close.
pub struct QuitOnClose {
    open: AtomicUsize,
    saved: Option<SavedBrowser>,
}

impl QuitOnClose {
    pub fn new() -> Self {
        Self {
            open: AtomicUsize::new(0),
            saved: None,
        }
    }

    /// Also saves each browser as soon as it is created.
    pub fn saving_into(saved: SavedBrowser) -> Self {
        Self {
            open: AtomicUsize::new(0),
            saved: Some(saved),
        }
    }

    pub fn build(self) -> CefArc<LifeSpanHandler> {
        LifeSpanHandler::new(self)
    }
}

impl Default for QuitOnClose {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeSpanHandlerConfig for QuitOnClose {
    fn on_after_created(&self, browser: CefArc<Browser>) {
        self.open.fetch_add(1, Ordering::SeqCst);
        debug!("browser {} created", browser.identifier());
        if let Some(saved) = &self.saved {
            saved.save(browser);
        }
    }

    fn on_before_close(&self, browser: CefArc<Browser>) {
        let id = browser.identifier();
        if let Some(saved) = &self.saved {
            if saved.get().is_ok_and(|saved| saved.identifier() == id) {
                saved.clear();
            }
        }

        let remaining = self
            .open
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |open| {
                Some(open.saturating_sub(1))
            })
            .map_or(0, |open| open.saturating_sub(1));
        info!("browser {id} closed, {remaining} open");
        if remaining == 0 {
            if let Err(err) = quit_message_loop() {
                error!("failed to quit the message loop: {err}");
            }
        }
    }
}

/// The client table of a demo. Every client quits the loop on close.
pub struct DemoClient {
    life_span: CefArc<LifeSpanHandler>,
    load: Option<CefArc<LoadHandler>>,
    render: Option<CefArc<RenderHandler>>,
}

impl DemoClient {
    pub fn new(life_span: CefArc<LifeSpanHandler>) -> Self {
        Self {
            life_span,
            load: None,
            render: None,
        }
    }

    pub fn with_load_handler(mut self, load: CefArc<LoadHandler>) -> Self {
        self.load = Some(load);
        self
    }

    pub fn with_render_handler(mut self, render: CefArc<RenderHandler>) -> Self {
        self.render = Some(render);
        self
    }

    pub fn build(self) -> CefArc<Client> {
        Client::new(self)
    }
}

impl ClientConfig for DemoClient {
    fn get_life_span_handler(&self) -> Option<CefArc<LifeSpanHandler>> {
        Some(self.life_span.clone())
    }

    fn get_load_handler(&self) -> Option<CefArc<LoadHandler>> {
        self.load.clone()
    }

    fn get_render_handler(&self) -> Option<CefArc<RenderHandler>> {
        self.render.clone()
    }
}

#[cfg(test)]
mod test {
    use std::path::PathBuf;

    use rust_cef::{
        functions::{
            initialize::initialize,
            post_task::{RuntimeTaskPoster, TaskPoster},
        },
        structs::{
            browser_settings::BrowserSettings, main_args::MainArgs, window_info::WindowInfo,
        },
        testing::{LOAD_DURATION, SimRuntime},
    };

    use super::*;
    use crate::{config::read_config_from, driver::AppDriver};

    fn config() -> Config {
        read_config_from(|name| match name {
            "CEF_DEMOS_LIBRARY_PATH" => Some("/opt/cef/libcef.so".to_string()),
            "CEF_DEMOS_RESOURCES_DIR" => Some("/opt/cef/Resources".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn settings_follow_the_config() {
        let settings = get_settings(&config(), LogSeverity::Warning, true);
        assert!(settings.no_sandbox);
        assert!(settings.windowless_rendering_enabled);
        assert_eq!(settings.log_severity, LogSeverity::Warning);
        assert_eq!(settings.resources_dir_path.as_deref(), Some("/opt/cef/Resources"));
        assert_eq!(settings.root_cache_path, None);

        let config = Config {
            log_severity: Some(LogSeverity::Disable),
            cache_dir: Some(PathBuf::from("/tmp/cache")),
            ..config()
        };
        let settings = get_settings(&config, LogSeverity::Warning, false);
        assert_eq!(settings.log_severity, LogSeverity::Disable);
        assert_eq!(settings.root_cache_path.as_deref(), Some("/tmp/cache"));
    }

    #[test]
    fn single_process_switch_is_opt_in() {
        let sim = SimRuntime::install();
        initialize(&MainArgs::new(["demo"]), &Settings::default(), Some(DemoApp::new().build()))
            .unwrap();
        assert!(!sim.record().has_switch("single-process"));
        drop(sim);

        let sim = SimRuntime::install();
        initialize(
            &MainArgs::new(["demo"]),
            &Settings::default(),
            Some(DemoApp::new().single_process().build()),
        )
        .unwrap();
        assert!(sim.record().has_switch("single-process"));
    }

    #[test]
    fn closing_without_a_saved_browser_fails() {
        let _sim = SimRuntime::install();
        let saved = SavedBrowser::default();
        assert!(matches!(saved.close(), Err(BrowserError::NotSaved)));
    }

    #[test]
    fn closing_the_saved_browser_quits_the_loop() {
        let sim = SimRuntime::install();
        let saved = SavedBrowser::default();
        let mut driver = AppDriver::new();
        driver
            .initialize(&MainArgs::new(["demo"]), &Settings::default(), None)
            .unwrap();
        driver
            .create_browser(
                &WindowInfo::windowless("demo"),
                DemoClient::new(QuitOnClose::saving_into(saved.clone()).build()).build(),
                "https://example.test/",
                &BrowserSettings::default(),
            )
            .unwrap();

        sim.advance(LOAD_DURATION);
        assert!(saved.is_saved());
        let closing = saved.clone();
        RuntimeTaskPoster
            .post_ui(std::time::Duration::ZERO, move || closing.close().unwrap())
            .unwrap();
        driver.run_message_loop().unwrap();
        driver.shutdown().unwrap();

        let record = sim.record();
        assert_eq!(record.quit_calls, 1);
        assert_eq!(record.closes.len(), 1);
        assert!(!record.closes[0].force);
        assert!(!saved.is_saved());
        assert!(sim.open_browsers().is_empty());
    }
}
