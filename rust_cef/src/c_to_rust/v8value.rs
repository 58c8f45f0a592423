use cef_wrapper::cef_capi_sys::{cef_base_ref_counted_t, cef_v8value_t};

use crate::{
    CefError, api,
    util::{
        cef_arc::CefArc,
        cef_string::{CefString, cef_string_userfree_into_string},
        starts_with::StartsWith,
    },
};

/// A JavaScript value. Only usable on the render process main thread, inside
/// a V8 context.
#[repr(transparent)]
pub struct V8Value(pub(crate) cef_v8value_t);

unsafe impl StartsWith<cef_v8value_t> for V8Value {}
unsafe impl StartsWith<cef_base_ref_counted_t> for V8Value {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_v8value_t {}

impl V8Value {
    pub(crate) fn as_raw(&self) -> *mut cef_v8value_t {
        &self.0 as *const _ as *mut _
    }

    pub fn create_string(value: &str) -> Result<CefArc<V8Value>, CefError> {
        let api = api::get()?;
        let value = CefString::new(value);
        let created = unsafe { (api.v8value_create_string)(value.as_raw()) };
        unsafe { CefArc::try_from_raw(created.cast()) }.ok_or(CefError::NullHandle("V8 string"))
    }

    pub fn is_valid(&self) -> bool {
        unsafe { invoke_v_table!(self => is_valid()) }.is_some_and(|valid| valid != 0)
    }

    pub fn is_string(&self) -> bool {
        unsafe { invoke_v_table!(self => is_string()) }.is_some_and(|string| string != 0)
    }

    pub fn is_int(&self) -> bool {
        unsafe { invoke_v_table!(self => is_int()) }.is_some_and(|int| int != 0)
    }

    /// The string content, or `None` if this is not a string.
    pub fn string_value(&self) -> Option<String> {
        if !self.is_string() {
            return None;
        }
        let value = unsafe { invoke_v_table!(self => get_string_value()) }?;
        // an empty JavaScript string comes back as a null userfree string.
        Some(unsafe { cef_string_userfree_into_string(value) }.unwrap_or_default())
    }

    pub fn int_value(&self) -> Option<i32> {
        if !self.is_int() {
            return None;
        }
        unsafe { invoke_v_table!(self => get_int_value()) }
    }
}
