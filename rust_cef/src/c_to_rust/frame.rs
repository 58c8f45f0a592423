use cef_wrapper::cef_capi_sys::{cef_base_ref_counted_t, cef_frame_t};

use crate::util::{
    cef_string::{CefString, cef_string_userfree_into_string},
    starts_with::StartsWith,
};

#[repr(transparent)]
pub struct Frame(pub(crate) cef_frame_t);

unsafe impl StartsWith<cef_frame_t> for Frame {}
unsafe impl StartsWith<cef_base_ref_counted_t> for Frame {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_frame_t {}

impl Frame {
    pub(crate) fn as_raw(&self) -> *mut cef_frame_t {
        &self.0 as *const _ as *mut _
    }

    pub fn is_valid(&self) -> bool {
        unsafe { invoke_v_table!(self => is_valid()) }.is_some_and(|valid| valid != 0)
    }

    /// Whether this is the top-level frame of its browser.
    pub fn is_main(&self) -> bool {
        unsafe { invoke_v_table!(self => is_main()) }.is_some_and(|main| main != 0)
    }

    pub fn url(&self) -> Option<String> {
        let url = unsafe { invoke_v_table!(self => get_url()) }?;
        unsafe { cef_string_userfree_into_string(url) }
    }

    /// Runs `code` in this frame asynchronously. `script_url` is reported in
    /// stack traces; `None` leaves it empty.
    pub fn execute_java_script(&self, code: &str, script_url: Option<&str>, start_line: i32) {
        let code = CefString::new(code);
        let script_url = script_url.map(CefString::new);
        let script_url_ptr = script_url
            .as_ref()
            .map_or(std::ptr::null(), CefString::as_raw);
        unsafe {
            invoke_v_table!(self => execute_java_script(code.as_raw(), script_url_ptr, start_line))
        };
    }
}
