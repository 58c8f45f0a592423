use std::{fmt, ptr};

use cef_wrapper::cef_capi_sys::{cef_string_t, cef_string_userfree_t, cef_string_utf16_t};
use log::warn;

const HEADER_BYTES: usize = std::mem::size_of::<usize>();
const HEADER_LENGTH: usize = HEADER_BYTES / std::mem::size_of::<u16>();

/// An owned, rust-allocated `cef_string_utf16_t`.
///
/// The destructor stored in a cef string only receives the data pointer, so
/// the length of the data is written into the `usize` preceding it. The
/// destructor reads it back to rebuild and free the original allocation.
pub struct CefString {
    raw: cef_string_utf16_t,
}

unsafe impl Send for CefString {}
unsafe impl Sync for CefString {}

impl CefString {
    pub fn new(value: &str) -> Self {
        let mut buffer = vec![0u16; HEADER_LENGTH];
        buffer.extend(value.encode_utf16());
        let length = buffer.len() - HEADER_LENGTH;

        let start = Box::into_raw(buffer.into_boxed_slice()).cast::<u16>();
        unsafe { start.cast::<usize>().write_unaligned(length) };

        Self {
            raw: cef_string_utf16_t {
                str_: unsafe { start.add(HEADER_LENGTH) },
                length,
                dtor: Some(drop_string),
            },
        }
    }

    /// Pointer suitable for `const cef_string_t*` parameters.
    pub fn as_raw(&self) -> *const cef_string_t {
        &self.raw
    }

    /// A copy of the struct without a destructor. It is only valid while
    /// `self` is alive.
    pub fn view(&self) -> cef_string_t {
        cef_string_utf16_t {
            dtor: None,
            ..self.raw
        }
    }

    /// Hands the allocation, destructor included, to the receiver.
    pub fn into_raw(self) -> cef_string_t {
        std::mem::ManuallyDrop::new(self).raw
    }

    pub fn as_utf16(&self) -> &[u16] {
        unsafe { std::slice::from_raw_parts(self.raw.str_, self.raw.length) }
    }
}

impl Drop for CefString {
    fn drop(&mut self) {
        if let Some(dtor) = self.raw.dtor {
            unsafe { dtor(self.raw.str_) };
        }
    }
}

impl From<&str> for CefString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for CefString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf16_lossy(self.as_utf16()))
    }
}

impl fmt::Debug for CefString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf16_lossy(self.as_utf16()))
    }
}

unsafe extern "C" fn drop_string(data: *mut u16) {
    if data.is_null() {
        return;
    }
    unsafe {
        let start = data.sub(HEADER_LENGTH);
        let length = start.cast::<usize>().read_unaligned();
        let slice = ptr::slice_from_raw_parts_mut(start, length + HEADER_LENGTH);
        drop(Box::from_raw(slice));
    }
}

/// An empty string with no allocation, as cef expects for unset fields.
pub fn empty_cef_string() -> cef_string_t {
    cef_string_utf16_t {
        str_: ptr::null_mut(),
        length: 0,
        dtor: None,
    }
}

/// Owns the strings whose views are embedded in a C struct.
#[derive(Default)]
pub(crate) struct StringArena(Vec<CefString>);

impl StringArena {
    pub(crate) fn view(&mut self, value: &str) -> cef_string_t {
        let string = CefString::new(value);
        let view = string.view();
        self.0.push(string);
        view
    }

    pub(crate) fn view_opt(&mut self, value: Option<&str>) -> cef_string_t {
        match value {
            Some(value) => self.view(value),
            None => empty_cef_string(),
        }
    }
}

/// # Safety
///
/// `cef_string` must be null or point at a valid `cef_string_t` for the
/// duration of the call.
pub unsafe fn cef_string_to_string(cef_string: *const cef_string_t) -> Option<String> {
    let cef_string = unsafe { cef_string.as_ref() }?;
    if cef_string.str_.is_null() {
        return Some(String::new());
    }
    let units = unsafe { std::slice::from_raw_parts(cef_string.str_, cef_string.length) };
    Some(String::from_utf16_lossy(units))
}

/// Decodes a string returned by the runtime and frees it.
///
/// # Safety
///
/// `cef_string` must be null or a userfree string the caller owns.
pub unsafe fn cef_string_userfree_into_string(cef_string: cef_string_userfree_t) -> Option<String> {
    if cef_string.is_null() {
        return None;
    }
    let value = unsafe { cef_string_to_string(cef_string) };

    match crate::api::get() {
        Ok(api) => unsafe { (api.string_userfree_utf16_free)(cef_string) },
        Err(err) => warn!("leaking a userfree string: {err}"),
    }

    value
}

/// Replaces the value of an output string parameter, releasing the previous
/// value through its own destructor.
///
/// # Safety
///
/// `target` must be null or point at a writable, initialised `cef_string_t`.
pub unsafe fn cef_string_set(target: *mut cef_string_t, value: &str) {
    let Some(target) = (unsafe { target.as_mut() }) else {
        return;
    };
    if let Some(dtor) = target.dtor {
        unsafe { dtor(target.str_) };
    }
    *target = CefString::new(value).into_raw();
}

#[cfg(test)]
mod test;
