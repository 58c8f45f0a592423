//! An in-process stand-in for `libcef`.
//!
//! [`SimRuntime::install`] puts a table of simulated entry points into
//! [`crate::api`]. The simulation runs on the installing thread with a
//! virtual clock: posted tasks and browser events are queued by due time and
//! delivered through the host's real `extern "C"` slots while the message
//! loop runs. Each test thread gets its own runtime state.

use std::{marker::PhantomData, time::Duration};

use cef_wrapper::cef_capi_sys::cef_v8value_t;
use log::warn;

use crate::{
    api,
    c_to_rust::{browser::Browser, v8value::V8Value},
    util::{
        cef_arc::CefArc,
        cef_string::{CefString, cef_string_to_string, empty_cef_string},
        wrap_boolean::unwrap_boolean,
    },
};

mod dispatch;
mod entry_points;
mod objects;
mod record;
mod state;

pub use objects::SimValue;
pub use record::{CloseRequest, ExecutedScript, PostedTask, SimRecord, SimSettings};
pub use state::LOAD_DURATION;

/// The pixel every simulated paint is filled with, in BGRA order.
pub const PAINT_PIXEL: [u8; 4] = [1, 2, 3, 255];

/// How a navigation to a URL plays out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageScript {
    /// Loads after [`LOAD_DURATION`], then paints `paint_after` later, or
    /// never when `None`.
    Load { paint_after: Option<Duration> },
    /// Fails after [`LOAD_DURATION`] with a net error.
    Fail { error_code: i32, error_text: String },
    /// A sub-frame fails halfway through the load; the page itself then
    /// loads and paints like [`PageScript::Load`].
    SubFrameFail {
        error_code: i32,
        error_text: String,
        paint_after: Option<Duration>,
    },
}

impl Default for PageScript {
    fn default() -> Self {
        Self::Load {
            paint_after: Some(Duration::from_millis(50)),
        }
    }
}

/// What calling a native function from JavaScript produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeOutcome {
    /// No registered extension declares the function.
    Missing,
    /// The handler declined the call.
    NotHandled,
    Returned(SimValue),
    Exception(String),
}

/// Handle to the simulated runtime on the current thread. Dropping it tears
/// the simulation down and releases everything the runtime still holds.
pub struct SimRuntime {
    _thread_bound: PhantomData<*const ()>,
}

impl SimRuntime {
    pub fn install() -> Self {
        if let Err(installed) = api::install(entry_points::api()) {
            if installed.initialize as usize != entry_points::api().initialize as usize {
                warn!("another CEF api is installed; the simulation will not see calls");
            }
        }
        drop(state::replace(Some(state::SimState::default())));

        Self {
            _thread_bound: PhantomData,
        }
    }

    pub fn script_page(&self, url: impl Into<String>, script: PageScript) {
        let url = url.into();
        state::with(|state| state.script_page(url, script));
    }

    /// Script for URLs without one of their own.
    pub fn set_default_page(&self, script: PageScript) {
        state::with(|state| state.default_page = script);
    }

    pub fn now(&self) -> Duration {
        state::with(|state| state.now)
    }

    /// Runs everything due within `by`, then moves the clock to the end of
    /// the window.
    pub fn advance(&self, by: Duration) {
        let deadline = self.now() + by;
        while let Some(work) = state::with(|state| state.pop_due(Some(deadline))) {
            dispatch::run(work);
        }
        state::with(|state| state.now = state.now.max(deadline));
    }

    /// Runs queued work until nothing is left, ignoring quit requests.
    pub fn run_until_idle(&self) {
        while let Some(work) = state::with(|state| state.pop_next()) {
            dispatch::run(work);
        }
    }

    pub fn pending(&self) -> usize {
        state::with(|state| state.pending())
    }

    pub fn record(&self) -> SimRecord {
        state::with(|state| state.record.clone())
    }

    pub fn open_browsers(&self) -> Vec<i32> {
        state::with(|state| state.open_browsers())
    }

    /// A handle to a browser the simulation created.
    pub fn browser(&self, id: i32) -> Option<CefArc<Browser>> {
        state::with(|state| state.browser(id).is_some()).then(|| objects::browser(id))
    }

    pub fn extension_code(&self, name: &str) -> Option<String> {
        state::with(|state| {
            state
                .extensions
                .iter()
                .find(|extension| extension.name == name)
                .map(|extension| extension.code.clone())
        })
    }

    /// Calls native function `name` the way the extension's JavaScript
    /// would, through the registered handler's `execute` slot.
    pub fn invoke_native(&self, name: &str, arguments: Vec<SimValue>) -> NativeOutcome {
        self.invoke_native_nullable(name, arguments.into_iter().map(Some).collect())
    }

    /// Like [`invoke_native`](Self::invoke_native), but a `None` argument is
    /// passed as a null value pointer.
    pub fn invoke_native_nullable(
        &self,
        name: &str,
        arguments: Vec<Option<SimValue>>,
    ) -> NativeOutcome {
        let declaration = format!("native function {name}(");
        let handler = state::with(|state| {
            state
                .extensions
                .iter()
                .find(|extension| extension.code.contains(&declaration))
                .and_then(|extension| extension.handler.clone())
        });
        let Some(handler) = handler else {
            return NativeOutcome::Missing;
        };
        let Some(execute) = handler.0.execute else {
            return NativeOutcome::NotHandled;
        };

        let function_name = CefString::new(name);
        let arguments = arguments
            .into_iter()
            .map(|argument| match argument {
                Some(argument) => objects::v8value(argument).into_raw().cast::<cef_v8value_t>(),
                None => std::ptr::null_mut(),
            })
            .collect::<Vec<_>>();
        let mut retval: *mut cef_v8value_t = std::ptr::null_mut();
        let mut exception = empty_cef_string();

        let handled = unsafe {
            execute(
                handler.as_ptr().cast(),
                function_name.as_raw(),
                std::ptr::null_mut(),
                arguments.len(),
                arguments.as_ptr(),
                &mut retval,
                &mut exception,
            )
        };

        let exception_text = if exception.str_.is_null() {
            None
        } else {
            let text = unsafe { cef_string_to_string(&exception) };
            if let Some(dtor) = exception.dtor {
                unsafe { dtor(exception.str_) };
            }
            text
        };
        let retval = unsafe { CefArc::<V8Value>::try_from_raw(retval.cast()) };

        if !unwrap_boolean(handled) {
            return NativeOutcome::NotHandled;
        }
        match (exception_text, retval) {
            (Some(text), _) => NativeOutcome::Exception(text),
            (None, Some(value)) => NativeOutcome::Returned(SimValue::read(&value)),
            (None, None) => NativeOutcome::Returned(SimValue::Undefined),
        }
    }
}

impl Drop for SimRuntime {
    fn drop(&mut self) {
        if let Some(mut state) = state::replace(None) {
            // release queued tasks before the tables they may reference.
            drop(state.take_queue());
            drop(state);
        }
    }
}

#[cfg(test)]
mod test;
