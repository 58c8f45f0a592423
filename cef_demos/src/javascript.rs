//! Calls between page JavaScript and Rust through a V8 extension.
//!
//! The extension defines `example.foo(x)`, backed by the native function
//! `Foo`. The page defines `example.bar(x)` on load, which the host calls
//! back once loading completes.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use log::{debug, error, info};
use parking_lot::Mutex;
use rust_cef::{
    CefError,
    c_to_rust::{browser::Browser, frame::Frame, v8value::V8Value},
    functions::{
        message_loop::quit_message_loop,
        post_task::{RuntimeTaskPoster, TaskPoster},
        register_extension::register_extension,
    },
    rust_to_c::{
        app::App,
        client::Client,
        load_handler::{LoadHandler, LoadHandlerConfig},
        render_process_handler::{RenderProcessHandler, RenderProcessHandlerConfig},
        v8handler::{V8Handler, V8HandlerConfig, V8Return},
    },
    util::cef_arc::CefArc,
};

use crate::{
    cef_app::{
        BrowserError, DemoApp, DemoClient, LoadFailure, QuitOnClose, SavedBrowser,
        main_frame_failure,
    },
    offscreen::{OffscreenView, VIEWPORT},
};

pub const EXTENSION_NAME: &str = "v8/test_extension";

pub const EXTENSION_CODE: &str = r#"
var example = {};
(function(){
    example.foo = function(x){
        native function Foo(x);
        return Foo(x);
    };
})();
"#;

pub const BAR_CALL: &str = r#"example.bar("x from javascript:execute_bar()");"#;

/// Delay between the page finishing loading and the call into it, and again
/// between that call and closing the browser.
pub const SCRIPT_DELAY: Duration = Duration::from_secs(1);

/// Implements `Foo`: one string argument starting with `x`, returns `"foo"`.
pub struct FooHandler;

impl V8HandlerConfig for FooHandler {
    fn execute(
        &self,
        name: &str,
        _object: Option<CefArc<V8Value>>,
        arguments: &[Option<CefArc<V8Value>>],
    ) -> V8Return {
        if name != "Foo" {
            error!("Unknown function called: {name}");
            return V8Return::Exception("Unknown function called.".to_string());
        }
        info!("Foo() called.");

        let [argument] = arguments else {
            return V8Return::Exception("Foo() arg should be one.".to_string());
        };
        let Some(argument) = argument.as_ref().filter(|argument| argument.is_string()) else {
            return V8Return::Exception("Foo() arg should be string.".to_string());
        };
        let value = argument.string_value().unwrap_or_default();
        if !value.starts_with('x') {
            return V8Return::Exception(r#"Foo() arg should start with "x"."#.to_string());
        }

        info!("Foo() called with right arg {value:?}.");
        match V8Value::create_string("foo") {
            Ok(result) => V8Return::Value(result),
            Err(err) => V8Return::Exception(err.to_string()),
        }
    }
}

/// Registers the extension once WebKit is up in the renderer.
pub struct ExtensionRegistrar;

impl RenderProcessHandlerConfig for ExtensionRegistrar {
    fn on_web_kit_initialized(&self) {
        info!("on_web_kit_initialized");
        if let Err(err) =
            register_extension(EXTENSION_NAME, EXTENSION_CODE, Some(V8Handler::new(FooHandler)))
        {
            error!("{err}");
        }
    }
}

/// The app table: a single process, so the renderer and its extension live
/// in this process.
pub fn app() -> CefArc<App> {
    DemoApp::new()
        .single_process()
        .with_render_process_handler(RenderProcessHandler::new(ExtensionRegistrar))
        .build()
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("{0}")]
    LoadFailed(LoadFailure),

    #[error(transparent)]
    Browser(#[from] BrowserError),
}

struct Inner<P> {
    poster: P,
    browser: SavedBrowser,
    bar_scheduled: AtomicBool,
    bar_called: AtomicBool,
    errors: Mutex<Vec<BridgeError>>,
}

/// Waits for the page, calls `example.bar` and closes the browser.
pub struct JavascriptBridge<P = RuntimeTaskPoster> {
    inner: Arc<Inner<P>>,
}

impl<P> Clone for JavascriptBridge<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl JavascriptBridge {
    pub fn new() -> Self {
        Self::with_poster(RuntimeTaskPoster)
    }
}

impl Default for JavascriptBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TaskPoster + 'static> JavascriptBridge<P> {
    pub fn with_poster(poster: P) -> Self {
        Self {
            inner: Arc::new(Inner {
                poster,
                browser: SavedBrowser::default(),
                bar_scheduled: AtomicBool::new(false),
                bar_called: AtomicBool::new(false),
                errors: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn client(&self) -> CefArc<Client> {
        DemoClient::new(QuitOnClose::new().build())
            .with_load_handler(LoadHandler::new(BridgeLoad(self.clone())))
            .with_render_handler(OffscreenView::new(VIEWPORT).build())
            .build()
    }

    pub fn bar_called(&self) -> bool {
        self.inner.bar_called.load(Ordering::SeqCst)
    }

    pub fn take_errors(&self) -> Vec<BridgeError> {
        std::mem::take(&mut *self.inner.errors.lock())
    }

    fn fail(&self, err: BridgeError) {
        error!("{err}");
        self.inner.errors.lock().push(err);
    }

    fn post(&self, delay: Duration, work: impl FnOnce(Self) + Send + 'static) {
        let this = self.clone();
        if let Err(err) = self.inner.poster.post_ui(delay, move || work(this)) {
            self.fail(BrowserError::from(err).into());
            if let Err(err) = quit_message_loop() {
                error!("failed to quit the message loop: {err}");
            }
        }
    }

    fn on_load_complete(&self, browser: CefArc<Browser>) {
        if self.inner.bar_scheduled.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("Web page loading is complete");
        self.inner.browser.save(browser);
        self.post(SCRIPT_DELAY, |this| this.execute_bar());
    }

    fn on_load_failed(&self, browser: CefArc<Browser>, failure: LoadFailure) {
        // the loading state change that follows must not call into the page.
        self.inner.bar_scheduled.store(true, Ordering::SeqCst);
        self.inner.browser.save(browser);
        self.fail(BridgeError::LoadFailed(failure));
        self.post(Duration::ZERO, |this| this.exit_app());
    }

    /// Calls `example.bar` in the main frame, then closes the browser a
    /// little later.
    pub fn execute_bar(&self) {
        debug!("execute_bar in");
        let frame = self.inner.browser.get().and_then(|browser| {
            browser
                .get_main_frame()
                .ok_or_else(|| CefError::NullHandle("main frame").into())
        });
        match frame {
            Ok(frame) => {
                frame.execute_java_script(BAR_CALL, None, 0);
                self.inner.bar_called.store(true, Ordering::SeqCst);
            }
            Err(err) => self.fail(err.into()),
        }
        debug!("execute_bar out");
        self.post(SCRIPT_DELAY, |this| this.exit_app());
    }

    fn exit_app(&self) {
        info!("exit_app");
        if let Err(err) = self.inner.browser.close() {
            self.fail(err.into());
            if let Err(err) = quit_message_loop() {
                error!("failed to quit the message loop: {err}");
            }
        }
    }
}

struct BridgeLoad<P>(JavascriptBridge<P>);

impl<P: TaskPoster + 'static> LoadHandlerConfig for BridgeLoad<P> {
    fn on_loading_state_change(
        &self,
        browser: CefArc<Browser>,
        is_loading: bool,
        _can_go_back: bool,
        _can_go_forward: bool,
    ) {
        debug!("on_loading_state_change loading={is_loading}");
        if !is_loading {
            self.0.on_load_complete(browser);
        }
    }

    fn on_load_error(
        &self,
        browser: CefArc<Browser>,
        frame: CefArc<Frame>,
        error_code: i32,
        error_text: &str,
        failed_url: &str,
    ) {
        if let Some(failure) = main_frame_failure(&frame, error_code, error_text, failed_url) {
            self.0.on_load_failed(browser, failure);
        }
    }
}

#[cfg(test)]
mod test;
