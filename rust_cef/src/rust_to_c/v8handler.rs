use std::os::raw::c_int;

use cef_wrapper::cef_capi_sys::{
    cef_base_ref_counted_t, cef_string_t, cef_v8handler_t, cef_v8value_t,
};

use crate::{
    c_to_rust::v8value::V8Value,
    util::{
        cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
        cef_string::{cef_string_set, cef_string_to_string},
        starts_with::StartsWith,
        wrap_boolean::wrap_boolean,
    },
};

#[repr(transparent)]
pub struct V8Handler(pub(crate) cef_v8handler_t);

unsafe impl StartsWith<cef_v8handler_t> for V8Handler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for V8Handler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_v8handler_t {}

impl V8Handler {
    pub fn new<C: V8HandlerConfig>(config: C) -> CefArc<Self> {
        let v_table = V8Handler(cef_v8handler_t {
            base: uninit_arc_vtable(),
            execute: Some(C::execute_raw),
        });
        CefArc::new(v_table, config).type_erase()
    }
}

/// The outcome of a native function call.
#[derive(Debug)]
pub enum V8Return {
    /// The function name is not handled here. JavaScript sees a missing
    /// native function.
    NotHandled,
    /// Handled, returning `undefined`.
    Handled,
    Value(CefArc<V8Value>),
    /// Throws an exception with this message in JavaScript.
    Exception(String),
}

/// Implements the native functions of a V8 extension.
pub trait V8HandlerConfig: Sized + Send + Sync {
    /// `arguments` has one entry per argument the runtime reported. An entry
    /// is `None` where the runtime passed a null value.
    fn execute(
        &self,
        name: &str,
        object: Option<CefArc<V8Value>>,
        arguments: &[Option<CefArc<V8Value>>],
    ) -> V8Return;
}

pub(crate) trait V8HandlerConfigExt: V8HandlerConfig {
    unsafe extern "C" fn execute_raw(
        ptr: *mut cef_v8handler_t,
        name: *const cef_string_t,
        object: *mut cef_v8value_t,
        arguments_count: usize,
        arguments: *const *mut cef_v8value_t,
        retval: *mut *mut cef_v8value_t,
        exception: *mut cef_string_t,
    ) -> c_int {
        let rust_impl =
            unsafe { CefArcFromRust::<V8Handler, Self>::rust_impl_from_ptr(ptr.cast()) };

        let name = unsafe { cef_string_to_string(name) }.unwrap_or_default();
        let object = unsafe { CefArc::<V8Value>::try_from_raw(object.cast()) };
        let arguments = if arguments.is_null() {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(arguments, arguments_count) }
                .iter()
                .map(|&argument| unsafe { CefArc::<V8Value>::try_from_raw(argument.cast()) })
                .collect::<Vec<_>>()
        };

        match rust_impl.execute(&name, object, &arguments) {
            V8Return::NotHandled => wrap_boolean(false),
            V8Return::Handled => wrap_boolean(true),
            V8Return::Value(value) => {
                match unsafe { retval.as_mut() } {
                    Some(retval) => {
                        // the slot owns whatever it held before.
                        let previous = std::mem::replace(retval, value.into_raw().cast());
                        drop(unsafe { CefArc::<V8Value>::try_from_raw(previous.cast()) });
                    }
                    None => drop(value),
                }
                wrap_boolean(true)
            }
            V8Return::Exception(message) => {
                unsafe { cef_string_set(exception, &message) };
                wrap_boolean(true)
            }
        }
    }
}

impl<T: V8HandlerConfig> V8HandlerConfigExt for T {}
