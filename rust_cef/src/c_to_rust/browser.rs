use cef_wrapper::cef_capi_sys::{cef_base_ref_counted_t, cef_browser_t};

use crate::util::{cef_arc::CefArc, starts_with::StartsWith};

use super::{browser_host::BrowserHost, frame::Frame};

#[repr(transparent)]
pub struct Browser(pub(crate) cef_browser_t);

unsafe impl StartsWith<cef_browser_t> for Browser {}
unsafe impl StartsWith<cef_base_ref_counted_t> for Browser {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_browser_t {}

impl Browser {
    pub(crate) fn as_raw(&self) -> *mut cef_browser_t {
        &self.0 as *const _ as *mut _
    }

    /// Returns false once the browser has been closed.
    pub fn is_valid(&self) -> bool {
        unsafe { invoke_v_table!(self => is_valid()) }.is_some_and(|valid| valid != 0)
    }

    pub fn get_host(&self) -> Option<CefArc<BrowserHost>> {
        let host = unsafe { invoke_v_table!(self => get_host()) }?;
        unsafe { CefArc::try_from_raw(host.cast()) }
    }

    pub fn get_main_frame(&self) -> Option<CefArc<Frame>> {
        let frame = unsafe { invoke_v_table!(self => get_main_frame()) }?;
        unsafe { CefArc::try_from_raw(frame.cast()) }
    }

    /// Globally unique identifier of this browser, or 0 if unavailable.
    pub fn identifier(&self) -> i32 {
        unsafe { invoke_v_table!(self => get_identifier()) }.unwrap_or(0)
    }

    pub fn is_loading(&self) -> bool {
        unsafe { invoke_v_table!(self => is_loading()) }.is_some_and(|loading| loading != 0)
    }
}
