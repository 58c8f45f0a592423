use std::os::raw::c_int;

use cef_wrapper::cef_capi_sys::{cef_base_ref_counted_t, cef_browser_t, cef_life_span_handler_t};

use crate::{
    c_to_rust::browser::Browser,
    util::{
        cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
        starts_with::StartsWith,
        wrap_boolean::wrap_boolean,
    },
};

#[repr(transparent)]
pub struct LifeSpanHandler(pub(crate) cef_life_span_handler_t);

unsafe impl StartsWith<cef_life_span_handler_t> for LifeSpanHandler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for LifeSpanHandler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_life_span_handler_t {}

impl LifeSpanHandler {
    pub fn new<C: LifeSpanHandlerConfig>(config: C) -> CefArc<Self> {
        let v_table = LifeSpanHandler(cef_life_span_handler_t {
            base: uninit_arc_vtable(),
            on_before_popup: None,
            on_after_created: Some(C::on_after_created_raw),
            do_close: Some(C::do_close_raw),
            on_before_close: Some(C::on_before_close_raw),
        });
        CefArc::new(v_table, config).type_erase()
    }
}

pub trait LifeSpanHandlerConfig: Sized + Send + Sync {
    fn on_after_created(&self, _browser: CefArc<Browser>) {}

    /// Return true to cancel the default close behavior.
    fn do_close(&self, _browser: CefArc<Browser>) -> bool {
        false
    }

    /// The last callback for a browser. Any reference kept to it must be
    /// dropped here.
    fn on_before_close(&self, _browser: CefArc<Browser>) {}
}

pub(crate) trait LifeSpanHandlerConfigExt: LifeSpanHandlerConfig {
    unsafe extern "C" fn on_after_created_raw(
        ptr: *mut cef_life_span_handler_t,
        browser: *mut cef_browser_t,
    ) {
        let rust_impl =
            unsafe { CefArcFromRust::<LifeSpanHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        if let Some(browser) = unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) } {
            rust_impl.on_after_created(browser);
        }
    }

    unsafe extern "C" fn do_close_raw(
        ptr: *mut cef_life_span_handler_t,
        browser: *mut cef_browser_t,
    ) -> c_int {
        let rust_impl =
            unsafe { CefArcFromRust::<LifeSpanHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        match unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) } {
            Some(browser) => wrap_boolean(rust_impl.do_close(browser)),
            None => wrap_boolean(false),
        }
    }

    unsafe extern "C" fn on_before_close_raw(
        ptr: *mut cef_life_span_handler_t,
        browser: *mut cef_browser_t,
    ) {
        let rust_impl =
            unsafe { CefArcFromRust::<LifeSpanHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        if let Some(browser) = unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) } {
            rust_impl.on_before_close(browser);
        }
    }
}

impl<T: LifeSpanHandlerConfig> LifeSpanHandlerConfigExt for T {}
