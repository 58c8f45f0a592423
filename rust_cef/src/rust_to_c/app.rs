use cef_wrapper::cef_capi_sys::{
    cef_app_t, cef_base_ref_counted_t, cef_command_line_t, cef_render_process_handler_t,
    cef_string_t,
};

use crate::{
    c_to_rust::command_line::{CommandLine, ProcessType},
    util::{
        cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
        cef_string::cef_string_to_string,
        starts_with::StartsWith,
    },
};

use super::render_process_handler::RenderProcessHandler;

#[repr(transparent)]
pub struct App(pub(crate) cef_app_t);

unsafe impl StartsWith<cef_app_t> for App {}
unsafe impl StartsWith<cef_base_ref_counted_t> for App {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_app_t {}

impl App {
    pub fn new<C: AppConfig>(config: C) -> CefArc<Self> {
        let v_table = App(cef_app_t {
            base: uninit_arc_vtable(),
            on_before_command_line_processing: Some(C::on_before_command_line_processing_raw),
            on_register_custom_schemes: None,
            get_resource_bundle_handler: None,
            get_browser_process_handler: None,
            get_render_process_handler: Some(C::get_render_process_handler_raw),
        });
        CefArc::new(v_table, config).type_erase()
    }
}

/// Process-wide callbacks, passed to `initialize` and `execute_process`.
pub trait AppConfig: Sized + Send + Sync {
    /// Lets the app adjust the command line before the runtime parses it.
    fn on_before_command_line_processing(
        &self,
        _process_type: ProcessType,
        _command_line: &CommandLine,
    ) {
    }

    fn get_render_process_handler(&self) -> Option<CefArc<RenderProcessHandler>> {
        None
    }
}

pub(crate) trait AppConfigExt: AppConfig {
    unsafe extern "C" fn on_before_command_line_processing_raw(
        ptr: *mut cef_app_t,
        process_type: *const cef_string_t,
        command_line: *mut cef_command_line_t,
    ) {
        let rust_impl = unsafe { CefArcFromRust::<App, Self>::rust_impl_from_ptr(ptr.cast()) };
        let Some(command_line) =
            (unsafe { CefArc::<CommandLine>::try_from_raw(command_line.cast()) })
        else {
            return;
        };
        let process_type = unsafe { cef_string_to_string(process_type) };
        let process_type = ProcessType::from_switch_value(process_type.as_deref());

        rust_impl.on_before_command_line_processing(process_type, &command_line);
    }

    unsafe extern "C" fn get_render_process_handler_raw(
        ptr: *mut cef_app_t,
    ) -> *mut cef_render_process_handler_t {
        let rust_impl = unsafe { CefArcFromRust::<App, Self>::rust_impl_from_ptr(ptr.cast()) };

        match rust_impl.get_render_process_handler() {
            Some(handler) => handler.type_erase::<cef_render_process_handler_t>().into_raw(),
            None => std::ptr::null_mut(),
        }
    }
}

impl<T: AppConfig> AppConfigExt for T {}
