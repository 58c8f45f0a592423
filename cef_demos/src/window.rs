//! A browser in a native top-level window.
//!
//! On linux the window is created with winit on X11 and the browser is
//! embedded as its child. Window events are pumped from a task on the
//! browser's UI thread, so closing the window closes the browser; so do
//! SIGINT and SIGTERM. On windows the runtime creates and owns the window
//! itself.

use std::time::Duration;

use log::{error, info, warn};
use rust_cef::{
    CefError,
    functions::{message_loop::quit_message_loop, post_task::TaskPoster},
    rust_to_c::client::Client,
    structs::geometry::Size,
    util::cef_arc::CefArc,
};

use crate::{
    cef_app::{BrowserError, DemoClient, QuitOnClose, SavedBrowser},
    driver::{AppDriver, DriverError},
};

pub const WINDOW_TITLE: &str = "rust_cef example";
pub const WINDOW_NAME: &str = "rust_cef window example";
pub const WINDOW_SIZE: Size = Size::new(800, 600);

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[cfg(target_os = "linux")]
    #[error("window event loop failed")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[cfg(target_os = "linux")]
    #[error("failed to create the window")]
    Os(#[from] winit::error::OsError),

    #[cfg(target_os = "linux")]
    #[error("failed to get the native window handle")]
    Handle(#[from] winit::raw_window_handle::HandleError),

    #[error("the window was not created")]
    NotCreated,

    #[error("the window is not an X11 window")]
    UnsupportedHandle,

    #[error("failed to listen for termination signals")]
    Signals(#[source] std::io::Error),

    #[error("windowed browsers are not supported on this platform")]
    UnsupportedPlatform,

    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// The client of a windowed browser: it saves the browser for later closing
/// and quits the loop once the browser is gone.
pub fn window_client(saved: SavedBrowser) -> CefArc<Client> {
    DemoClient::new(QuitOnClose::saving_into(saved).build()).build()
}

/// Posts a close of the saved browser onto the UI thread. Without a browser
/// to close the message loop is quit directly.
pub fn request_close<P: TaskPoster>(poster: &P, saved: &SavedBrowser) -> Result<(), CefError> {
    let saved = saved.clone();
    poster.post_ui(Duration::ZERO, move || match saved.close() {
        Ok(()) => {}
        Err(BrowserError::NotSaved) => {
            warn!("no browser to close, quitting the message loop");
            if let Err(err) = quit_message_loop() {
                error!("failed to quit the message loop: {err}");
            }
        }
        Err(err) => error!("failed to close the browser: {err}"),
    })
}

#[cfg(target_os = "linux")]
pub use linux::run;

#[cfg(target_os = "linux")]
mod linux {
    use std::{
        cell::RefCell,
        thread::{self, JoinHandle},
    };

    use log::debug;
    use signal_hook::{consts, iterator::Signals};
    use winit::{
        application::ApplicationHandler,
        dpi::PhysicalSize,
        event::WindowEvent,
        event_loop::{ActiveEventLoop, EventLoop},
        platform::{
            pump_events::{EventLoopExtPumpEvents, PumpStatus},
            x11::EventLoopBuilderExtX11,
        },
        raw_window_handle::{HasWindowHandle, RawWindowHandle},
        window::{Window, WindowId},
    };

    use rust_cef::{
        functions::post_task::RuntimeTaskPoster,
        structs::{
            browser_settings::BrowserSettings,
            geometry::Rect,
            window_info::{WindowHandle, WindowInfo},
        },
    };

    use super::*;

    /// How often window events are pumped while the browser loop runs.
    const PUMP_INTERVAL: Duration = Duration::from_millis(10);

    thread_local! {
        static PUMP: RefCell<Option<WindowPump>> = const { RefCell::new(None) };
    }

    struct WindowPump {
        event_loop: EventLoop<()>,
        host: WindowHost,
    }

    /// Opens the window, then runs the browser inside it until it closes.
    /// `driver` must be initialized.
    pub fn run(driver: &mut AppDriver, url: &str) -> Result<(), WindowError> {
        let mut builder = EventLoop::builder();
        builder.with_x11();
        let mut event_loop = builder.build()?;

        let saved = SavedBrowser::default();
        let mut host = WindowHost::new(saved.clone());
        // the first pump delivers `resumed`, which creates the window.
        if let PumpStatus::Exit(code) = event_loop.pump_app_events(Some(Duration::ZERO), &mut host) {
            warn!("window event loop exited early with {code}");
        }
        if let Some(err) = host.error.take() {
            return Err(err);
        }
        let window = host.window.as_ref().ok_or(WindowError::NotCreated)?;

        let parent = x11_window_id(window)?;
        let size = window.inner_size();
        let bounds = Rect::new(
            0,
            0,
            i32::try_from(size.width).unwrap_or(WINDOW_SIZE.width),
            i32::try_from(size.height).unwrap_or(WINDOW_SIZE.height),
        );
        info!("embedding the browser in X11 window {parent:#x}");

        let _signals = SignalListener::start(saved.clone())?;
        PUMP.with(|pump| pump.replace(Some(WindowPump { event_loop, host })));
        schedule_pump();

        let result = driver.run_browser(
            &WindowInfo::child(WINDOW_NAME, parent, bounds),
            window_client(saved),
            url,
            &BrowserSettings::default(),
        );
        // the window outlives the browser embedded in it.
        PUMP.with(|pump| pump.take());
        Ok(result?)
    }

    fn schedule_pump() {
        if let Err(err) = RuntimeTaskPoster.post_ui(PUMP_INTERVAL, pump_window_events) {
            error!("failed to schedule window events: {err}");
        }
    }

    /// Runs on the UI thread; reschedules itself while the window is up.
    fn pump_window_events() {
        let pumping = PUMP.with(|pump| {
            let mut pump = pump.borrow_mut();
            let Some(WindowPump { event_loop, host }) = pump.as_mut() else {
                return false;
            };
            match event_loop.pump_app_events(Some(Duration::ZERO), host) {
                PumpStatus::Continue => true,
                PumpStatus::Exit(code) => {
                    debug!("window event loop exited with {code}");
                    false
                }
            }
        });
        if pumping {
            schedule_pump();
        }
    }

    struct WindowHost {
        saved: SavedBrowser,
        window: Option<Window>,
        error: Option<WindowError>,
        close_requested: bool,
    }

    impl WindowHost {
        fn new(saved: SavedBrowser) -> Self {
            Self {
                saved,
                window: None,
                error: None,
                close_requested: false,
            }
        }

        fn handle_window_event<P: TaskPoster>(&mut self, poster: &P, event: &WindowEvent) {
            match event {
                WindowEvent::CloseRequested if self.close_requested => {
                    debug!("the browser is already closing");
                }
                WindowEvent::CloseRequested => {
                    info!("window closed, closing the browser");
                    match request_close(poster, &self.saved) {
                        Ok(()) => self.close_requested = true,
                        Err(err) => error!("{err}"),
                    }
                }
                _ => {}
            }
        }
    }

    impl ApplicationHandler for WindowHost {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_some() || self.error.is_some() {
                return;
            }
            let attributes = Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(PhysicalSize::new(WINDOW_SIZE.width, WINDOW_SIZE.height));
            match event_loop.create_window(attributes) {
                Ok(window) => self.window = Some(window),
                Err(err) => self.error = Some(err.into()),
            }
        }

        fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
            self.handle_window_event(&RuntimeTaskPoster, &event);
        }
    }

    fn x11_window_id(window: &Window) -> Result<WindowHandle, WindowError> {
        match window.window_handle()?.as_raw() {
            RawWindowHandle::Xlib(handle) => Ok(handle.window),
            RawWindowHandle::Xcb(handle) => Ok(WindowHandle::from(handle.window.get())),
            _ => Err(WindowError::UnsupportedHandle),
        }
    }

    /// Turns SIGINT and SIGTERM into a posted close of the browser, for as
    /// long as it is alive.
    struct SignalListener {
        handle: signal_hook::iterator::Handle,
        thread: Option<JoinHandle<()>>,
    }

    impl SignalListener {
        fn start(saved: SavedBrowser) -> Result<Self, WindowError> {
            let mut signals =
                Signals::new([consts::SIGINT, consts::SIGTERM]).map_err(WindowError::Signals)?;
            let handle = signals.handle();

            let thread = thread::Builder::new()
                .name("signal listener".to_string())
                .spawn(move || {
                    for signal in signals.forever() {
                        info!("received signal {signal}, closing the browser");
                        if let Err(err) = request_close(&RuntimeTaskPoster, &saved) {
                            error!("{err}");
                        }
                    }
                })
                .map_err(WindowError::Signals)?;

            Ok(Self {
                handle,
                thread: Some(thread),
            })
        }
    }

    impl Drop for SignalListener {
        fn drop(&mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                if thread.join().is_err() {
                    error!("signal listener panicked");
                }
            }
        }
    }

    #[cfg(test)]
    mod test {
        use rust_cef::{
            structs::{main_args::MainArgs, settings::Settings},
            testing::{LOAD_DURATION, SimRuntime},
        };

        use super::*;

        #[test]
        fn closing_the_window_closes_the_browser_once() {
            let sim = SimRuntime::install();
            let saved = SavedBrowser::default();
            let mut driver = AppDriver::new();
            driver
                .initialize(&MainArgs::new(["window"]), &Settings::default(), None)
                .unwrap();
            driver
                .create_browser(
                    &WindowInfo::child(WINDOW_NAME, 42, Rect::from_size(WINDOW_SIZE)),
                    window_client(saved.clone()),
                    "https://example.test/",
                    &BrowserSettings::default(),
                )
                .unwrap();
            sim.advance(LOAD_DURATION);

            let mut host = WindowHost::new(saved.clone());
            host.handle_window_event(&RuntimeTaskPoster, &WindowEvent::Focused(true));
            assert!(sim.record().posted.is_empty());

            host.handle_window_event(&RuntimeTaskPoster, &WindowEvent::CloseRequested);
            host.handle_window_event(&RuntimeTaskPoster, &WindowEvent::CloseRequested);
            assert_eq!(sim.record().posted.len(), 1);

            driver.run_message_loop().unwrap();
            driver.shutdown().unwrap();

            let record = sim.record();
            assert_eq!(record.closes.len(), 1);
            assert_eq!(record.reentrant_closes().count(), 0);
            assert_eq!(record.quit_calls, 1);
            assert!(sim.open_browsers().is_empty());
        }

        #[test]
        fn window_events_are_pumped_from_the_ui_thread() {
            let sim = SimRuntime::install();
            schedule_pump();
            // nothing to pump, so the task does not reschedule itself.
            sim.run_until_idle();

            let record = sim.record();
            assert_eq!(record.posted.len(), 1);
            assert_eq!(record.posted[0].delay, PUMP_INTERVAL);
        }
    }
}

/// Runs the browser in a window the runtime creates. `driver` must be
/// initialized.
#[cfg(target_os = "windows")]
pub fn run(driver: &mut AppDriver, url: &str) -> Result<(), WindowError> {
    use rust_cef::structs::{browser_settings::BrowserSettings, window_info::WindowInfo};

    driver.run_browser(
        &WindowInfo::popup(WINDOW_NAME),
        window_client(SavedBrowser::default()),
        url,
        &BrowserSettings::default(),
    )?;
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
pub fn run(_driver: &mut AppDriver, _url: &str) -> Result<(), WindowError> {
    Err(WindowError::UnsupportedPlatform)
}

#[cfg(test)]
mod test {
    use rust_cef::{
        functions::post_task::RuntimeTaskPoster,
        structs::{
            browser_settings::BrowserSettings, geometry::Rect, main_args::MainArgs,
            settings::Settings, window_info::WindowInfo,
        },
        testing::{LOAD_DURATION, SimRuntime},
    };

    use super::*;

    #[cfg(target_os = "linux")]
    #[test]
    fn a_requested_close_ends_the_loop() {
        let sim = SimRuntime::install();
        let saved = SavedBrowser::default();
        let mut driver = AppDriver::new();
        driver
            .initialize(&MainArgs::new(["window"]), &Settings::default(), None)
            .unwrap();
        driver
            .create_browser(
                &WindowInfo::child(WINDOW_NAME, 42, Rect::from_size(WINDOW_SIZE)),
                window_client(saved.clone()),
                "https://example.test/",
                &BrowserSettings::default(),
            )
            .unwrap();
        sim.advance(LOAD_DURATION);
        assert!(saved.is_saved());

        request_close(&RuntimeTaskPoster, &saved).unwrap();
        driver.run_message_loop().unwrap();
        driver.shutdown().unwrap();

        let record = sim.record();
        assert_eq!(record.closes.len(), 1);
        assert_eq!(record.reentrant_closes().count(), 0);
        assert_eq!(record.quit_calls, 1);
        assert!(sim.open_browsers().is_empty());
    }

    #[test]
    fn a_close_before_the_browser_exists_quits_the_loop() {
        let sim = SimRuntime::install();
        request_close(&RuntimeTaskPoster, &SavedBrowser::default()).unwrap();
        assert!(sim.record().closes.is_empty());

        sim.run_until_idle();
        let record = sim.record();
        assert!(record.closes.is_empty());
        assert_eq!(record.quit_calls, 1);
    }
}
