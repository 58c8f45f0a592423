use std::os::raw::c_int;

use cef_wrapper::cef_capi_sys::{
    cef_base_ref_counted_t, cef_browser_t, cef_errorcode_t, cef_frame_t, cef_load_handler_t,
    cef_string_t, cef_transition_type_t,
};

use crate::{
    c_to_rust::{browser::Browser, frame::Frame},
    util::{
        cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
        cef_string::cef_string_to_string,
        starts_with::StartsWith,
        wrap_boolean::unwrap_boolean,
    },
};

#[repr(transparent)]
pub struct LoadHandler(pub(crate) cef_load_handler_t);

unsafe impl StartsWith<cef_load_handler_t> for LoadHandler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for LoadHandler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_load_handler_t {}

impl LoadHandler {
    pub fn new<C: LoadHandlerConfig>(config: C) -> CefArc<Self> {
        let v_table = LoadHandler(cef_load_handler_t {
            base: uninit_arc_vtable(),
            on_loading_state_change: Some(C::on_loading_state_change_raw),
            on_load_start: Some(C::on_load_start_raw),
            on_load_end: Some(C::on_load_end_raw),
            on_load_error: Some(C::on_load_error_raw),
        });
        CefArc::new(v_table, config).type_erase()
    }
}

/// Browser load notifications. Called on the UI thread or the render process
/// main thread.
pub trait LoadHandlerConfig: Sized + Send + Sync {
    /// Called when loading starts and again once loading has finished or
    /// failed.
    fn on_loading_state_change(
        &self,
        _browser: CefArc<Browser>,
        _is_loading: bool,
        _can_go_back: bool,
        _can_go_forward: bool,
    ) {
    }

    fn on_load_start(&self, _browser: CefArc<Browser>, _frame: CefArc<Frame>, _transition_type: u32) {}

    fn on_load_end(&self, _browser: CefArc<Browser>, _frame: CefArc<Frame>, _http_status_code: i32) {}

    /// Called when a navigation fails or is canceled. `error_code` is a net
    /// error code.
    fn on_load_error(
        &self,
        _browser: CefArc<Browser>,
        _frame: CefArc<Frame>,
        _error_code: i32,
        _error_text: &str,
        _failed_url: &str,
    ) {
    }
}

pub(crate) trait LoadHandlerConfigExt: LoadHandlerConfig {
    unsafe extern "C" fn on_loading_state_change_raw(
        ptr: *mut cef_load_handler_t,
        browser: *mut cef_browser_t,
        is_loading: c_int,
        can_go_back: c_int,
        can_go_forward: c_int,
    ) {
        let rust_impl =
            unsafe { CefArcFromRust::<LoadHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        let Some(browser) = (unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) }) else {
            return;
        };

        rust_impl.on_loading_state_change(
            browser,
            unwrap_boolean(is_loading),
            unwrap_boolean(can_go_back),
            unwrap_boolean(can_go_forward),
        );
    }

    unsafe extern "C" fn on_load_start_raw(
        ptr: *mut cef_load_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        transition_type: cef_transition_type_t,
    ) {
        let rust_impl =
            unsafe { CefArcFromRust::<LoadHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        let Some((browser, frame)) = (unsafe { adopt(browser, frame) }) else {
            return;
        };

        rust_impl.on_load_start(browser, frame, transition_type);
    }

    unsafe extern "C" fn on_load_end_raw(
        ptr: *mut cef_load_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        http_status_code: c_int,
    ) {
        let rust_impl =
            unsafe { CefArcFromRust::<LoadHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        let Some((browser, frame)) = (unsafe { adopt(browser, frame) }) else {
            return;
        };

        rust_impl.on_load_end(browser, frame, http_status_code);
    }

    unsafe extern "C" fn on_load_error_raw(
        ptr: *mut cef_load_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        error_code: cef_errorcode_t,
        error_text: *const cef_string_t,
        failed_url: *const cef_string_t,
    ) {
        let rust_impl =
            unsafe { CefArcFromRust::<LoadHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        let Some((browser, frame)) = (unsafe { adopt(browser, frame) }) else {
            return;
        };
        let error_text = unsafe { cef_string_to_string(error_text) }.unwrap_or_default();
        let failed_url = unsafe { cef_string_to_string(failed_url) }.unwrap_or_default();

        rust_impl.on_load_error(browser, frame, error_code, &error_text, &failed_url);
    }
}

impl<T: LoadHandlerConfig> LoadHandlerConfigExt for T {}

/// Takes ownership of both references, releasing whichever is non-null if the
/// other is missing.
unsafe fn adopt(
    browser: *mut cef_browser_t,
    frame: *mut cef_frame_t,
) -> Option<(CefArc<Browser>, CefArc<Frame>)> {
    let browser = unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) };
    let frame = unsafe { CefArc::<Frame>::try_from_raw(frame.cast()) };
    browser.zip(frame)
}
