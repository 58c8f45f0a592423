use cef_wrapper::cef_capi_sys::cef_base_ref_counted_t;

use crate::util::starts_with::StartsWith;

/// A V8 context handed to the render process handler. Only its reference
/// count is used on this side.
#[repr(transparent)]
pub struct V8Context(pub(crate) cef_base_ref_counted_t);

unsafe impl StartsWith<cef_base_ref_counted_t> for V8Context {}
