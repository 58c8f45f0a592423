use log::{debug, info};
use rust_cef::{
    CefError,
    functions::{
        create_browser::browser_host_create_browser,
        initialize::initialize,
        message_loop::{run_message_loop, shutdown},
    },
    rust_to_c::{app::App, client::Client},
    structs::{
        browser_settings::BrowserSettings, main_args::MainArgs, settings::Settings,
        window_info::WindowInfo,
    },
    util::cef_arc::CefArc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverState {
    Uninitialized,
    Initialized,
    BrowserRequested,
    MessageLoopRunning,
    ShuttingDown,
    Terminated,
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: DriverState, to: DriverState },

    #[error(transparent)]
    Cef(#[from] CefError),
}

/// Walks the runtime through its lifecycle in the only order it accepts:
/// initialize, request a browser, run the message loop, shut down.
#[derive(Debug)]
pub struct AppDriver {
    state: DriverState,
}

impl Default for AppDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AppDriver {
    pub fn new() -> Self {
        Self {
            state: DriverState::Uninitialized,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn initialize(
        &mut self,
        main_args: &MainArgs,
        settings: &Settings,
        app: Option<CefArc<App>>,
    ) -> Result<(), DriverError> {
        self.check(DriverState::Uninitialized, DriverState::Initialized)?;
        initialize(main_args, settings, app)?;
        self.enter(DriverState::Initialized);
        Ok(())
    }

    /// Asks the runtime for a browser. The browser itself is created later,
    /// from inside the message loop.
    pub fn create_browser(
        &mut self,
        window_info: &WindowInfo,
        client: CefArc<Client>,
        url: &str,
        browser_settings: &BrowserSettings,
    ) -> Result<(), DriverError> {
        self.check(DriverState::Initialized, DriverState::BrowserRequested)?;
        info!("creating browser for {url}");
        browser_host_create_browser(window_info, client, url, browser_settings)?;
        self.enter(DriverState::BrowserRequested);
        Ok(())
    }

    /// Blocks until something quits the message loop.
    pub fn run_message_loop(&mut self) -> Result<(), DriverError> {
        self.check(DriverState::BrowserRequested, DriverState::MessageLoopRunning)?;
        self.enter(DriverState::MessageLoopRunning);
        let result = run_message_loop();
        self.enter(DriverState::ShuttingDown);
        Ok(result?)
    }

    pub fn shutdown(&mut self) -> Result<(), DriverError> {
        self.check(DriverState::ShuttingDown, DriverState::Terminated)?;
        shutdown()?;
        self.enter(DriverState::Terminated);
        Ok(())
    }

    /// Requests the browser, runs the loop and shuts down.
    pub fn run_browser(
        &mut self,
        window_info: &WindowInfo,
        client: CefArc<Client>,
        url: &str,
        browser_settings: &BrowserSettings,
    ) -> Result<(), DriverError> {
        self.create_browser(window_info, client, url, browser_settings)?;
        self.run_message_loop()?;
        self.shutdown()
    }

    fn check(&self, expected: DriverState, to: DriverState) -> Result<(), DriverError> {
        if self.state != expected {
            return Err(DriverError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        Ok(())
    }

    fn enter(&mut self, state: DriverState) {
        debug!("driver {:?} -> {:?}", self.state, state);
        self.state = state;
    }
}

#[cfg(test)]
mod test {
    use rust_cef::{
        functions::post_task::{RuntimeTaskPoster, TaskPoster},
        rust_to_c::client::ClientConfig,
        testing::SimRuntime,
    };

    use super::*;

    struct Bare;
    impl ClientConfig for Bare {}

    fn requested(sim: &SimRuntime) -> AppDriver {
        let mut driver = AppDriver::new();
        driver
            .initialize(&MainArgs::new(["driver"]), &Settings::default(), None)
            .unwrap();
        driver
            .create_browser(
                &WindowInfo::windowless("driver"),
                Client::new(Bare),
                "https://example.test/",
                &BrowserSettings::default(),
            )
            .unwrap();
        assert_eq!(sim.record().created_urls, ["https://example.test/"]);
        driver
    }

    #[test]
    fn states_advance_linearly() {
        let sim = SimRuntime::install();
        let mut driver = requested(&sim);
        assert_eq!(driver.state(), DriverState::BrowserRequested);

        RuntimeTaskPoster
            .post_ui(std::time::Duration::from_millis(10), || {
                rust_cef::functions::message_loop::quit_message_loop().unwrap();
            })
            .unwrap();
        driver.run_message_loop().unwrap();
        assert_eq!(driver.state(), DriverState::ShuttingDown);

        driver.shutdown().unwrap();
        assert_eq!(driver.state(), DriverState::Terminated);

        let record = sim.record();
        assert_eq!(record.initialize_calls, 1);
        assert_eq!(record.message_loop_runs, 1);
        assert_eq!(record.shutdown_calls, 1);
    }

    #[test]
    fn out_of_order_calls_are_rejected() {
        let sim = SimRuntime::install();
        let mut driver = AppDriver::new();

        let err = driver.run_message_loop().unwrap_err();
        assert!(matches!(
            err,
            DriverError::InvalidTransition {
                from: DriverState::Uninitialized,
                to: DriverState::MessageLoopRunning,
            }
        ));
        assert!(matches!(
            driver.shutdown(),
            Err(DriverError::InvalidTransition { .. })
        ));
        assert_eq!(sim.record().message_loop_runs, 0);
        assert_eq!(sim.record().shutdown_calls, 0);
    }

    #[test]
    fn shutdown_happens_once() {
        let sim = SimRuntime::install();
        let mut driver = requested(&sim);

        driver.run_message_loop().unwrap();
        driver.shutdown().unwrap();
        assert!(matches!(
            driver.shutdown(),
            Err(DriverError::InvalidTransition {
                from: DriverState::Terminated,
                to: DriverState::Terminated,
            })
        ));
        assert_eq!(sim.record().shutdown_calls, 1);
    }

    #[test]
    fn a_second_initialize_is_rejected() {
        let _sim = SimRuntime::install();
        let mut driver = AppDriver::new();
        driver
            .initialize(&MainArgs::new(["driver"]), &Settings::default(), None)
            .unwrap();

        assert!(matches!(
            driver.initialize(&MainArgs::new(["driver"]), &Settings::default(), None),
            Err(DriverError::InvalidTransition {
                from: DriverState::Initialized,
                to: DriverState::Initialized,
            })
        ));
    }
}
