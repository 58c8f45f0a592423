use cef_wrapper::cef_capi_sys::{cef_base_ref_counted_t, cef_browser_host_t};

use crate::util::{cef_arc::CefArc, starts_with::StartsWith, wrap_boolean::wrap_boolean};

use super::browser::Browser;

#[repr(transparent)]
pub struct BrowserHost(pub(crate) cef_browser_host_t);

unsafe impl StartsWith<cef_browser_host_t> for BrowserHost {}
unsafe impl StartsWith<cef_base_ref_counted_t> for BrowserHost {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_browser_host_t {}

impl BrowserHost {
    pub(crate) fn as_raw(&self) -> *mut cef_browser_host_t {
        &self.0 as *const _ as *mut _
    }

    pub fn get_browser(&self) -> Option<CefArc<Browser>> {
        let browser = unsafe { invoke_v_table!(self => get_browser()) }?;
        unsafe { CefArc::try_from_raw(browser.cast()) }
    }

    /// Requests that the browser close. Without `force_close` the page may
    /// still cancel through its unload handlers. The life span handler's
    /// `on_before_close` runs once the close goes through.
    ///
    /// Must not be called from inside load or paint callbacks; post a task
    /// that calls it instead.
    pub fn close_browser(&self, force_close: bool) {
        unsafe { invoke_v_table!(self => close_browser(wrap_boolean(force_close))) };
    }

    /// Like `close_browser(false)`, but returns whether the close went
    /// through immediately.
    pub fn try_close_browser(&self) -> bool {
        unsafe { invoke_v_table!(self => try_close_browser()) }.is_some_and(|closed| closed != 0)
    }
}
