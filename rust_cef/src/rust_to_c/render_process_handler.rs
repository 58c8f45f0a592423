use cef_wrapper::cef_capi_sys::{
    cef_base_ref_counted_t, cef_browser_t, cef_frame_t, cef_render_process_handler_t,
    cef_v8context_t,
};

use crate::{
    c_to_rust::{browser::Browser, frame::Frame, v8context::V8Context},
    util::{
        cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
        starts_with::StartsWith,
    },
};

#[repr(transparent)]
pub struct RenderProcessHandler(pub(crate) cef_render_process_handler_t);

unsafe impl StartsWith<cef_render_process_handler_t> for RenderProcessHandler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for RenderProcessHandler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_render_process_handler_t {}

impl RenderProcessHandler {
    pub fn new<C: RenderProcessHandlerConfig>(config: C) -> CefArc<Self> {
        let v_table = RenderProcessHandler(cef_render_process_handler_t {
            base: uninit_arc_vtable(),
            on_web_kit_initialized: Some(C::on_web_kit_initialized_raw),
            on_browser_created: None,
            on_browser_destroyed: None,
            get_load_handler: None,
            on_context_created: Some(C::on_context_created_raw),
            on_context_released: None,
            on_uncaught_exception: None,
            on_focused_node_changed: None,
            on_process_message_received: None,
        });
        CefArc::new(v_table, config).type_erase()
    }
}

/// Callbacks on the main thread of a render process.
pub trait RenderProcessHandlerConfig: Sized + Send + Sync {
    /// Called once WebKit is up. V8 extensions are registered here.
    fn on_web_kit_initialized(&self) {}

    fn on_context_created(
        &self,
        _browser: CefArc<Browser>,
        _frame: CefArc<Frame>,
        _context: CefArc<V8Context>,
    ) {
    }
}

pub(crate) trait RenderProcessHandlerConfigExt: RenderProcessHandlerConfig {
    unsafe extern "C" fn on_web_kit_initialized_raw(ptr: *mut cef_render_process_handler_t) {
        let rust_impl = unsafe {
            CefArcFromRust::<RenderProcessHandler, Self>::rust_impl_from_ptr(ptr.cast())
        };
        rust_impl.on_web_kit_initialized();
    }

    unsafe extern "C" fn on_context_created_raw(
        ptr: *mut cef_render_process_handler_t,
        browser: *mut cef_browser_t,
        frame: *mut cef_frame_t,
        context: *mut cef_v8context_t,
    ) {
        let rust_impl = unsafe {
            CefArcFromRust::<RenderProcessHandler, Self>::rust_impl_from_ptr(ptr.cast())
        };
        let browser = unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) };
        let frame = unsafe { CefArc::<Frame>::try_from_raw(frame.cast()) };
        let context = unsafe { CefArc::<V8Context>::try_from_raw(context.cast()) };

        if let (Some(browser), Some(frame), Some(context)) = (browser, frame, context) {
            rust_impl.on_context_created(browser, frame, context);
        }
    }
}

impl<T: RenderProcessHandlerConfig> RenderProcessHandlerConfigExt for T {}
