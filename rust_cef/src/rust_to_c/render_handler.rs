use std::os::raw::{c_int, c_void};

use cef_wrapper::cef_capi_sys::{
    cef_base_ref_counted_t, cef_browser_t, cef_paint_element_type_t, cef_rect_t,
    cef_render_handler_t, cef_screen_info_t,
};

use crate::{
    c_to_rust::browser::Browser,
    enums::paint_element_type::PaintElementType,
    structs::{geometry::Rect, screen_info::ScreenInfo},
    util::{
        cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
        starts_with::StartsWith,
        wrap_boolean::wrap_boolean,
    },
};

#[repr(transparent)]
pub struct RenderHandler(pub(crate) cef_render_handler_t);

unsafe impl StartsWith<cef_render_handler_t> for RenderHandler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for RenderHandler {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_render_handler_t {}

impl RenderHandler {
    pub fn new<C: RenderHandlerConfig>(config: C) -> CefArc<Self> {
        let v_table = RenderHandler(cef_render_handler_t {
            base: uninit_arc_vtable(),
            get_accessibility_handler: None,
            get_root_screen_rect: None,
            get_view_rect: Some(C::get_view_rect_raw),
            get_screen_point: None,
            get_screen_info: Some(C::get_screen_info_raw),
            on_popup_show: None,
            on_popup_size: None,
            on_paint: Some(C::on_paint_raw),
            on_accelerated_paint: None,
            get_touch_handle_size: None,
            on_touch_handle_state_changed: None,
            start_dragging: None,
            update_drag_cursor: None,
            on_scroll_offset_changed: None,
            on_ime_composition_range_changed: None,
            on_text_selection_changed: None,
            on_virtual_keyboard_requested: None,
        });
        CefArc::new(v_table, config).type_erase()
    }
}

// these methods are all called on the ui thread.
pub trait RenderHandlerConfig: Sized + Send + Sync {
    /// The view rectangle in screen DIP coordinates. Must be non-empty.
    fn get_view_rect(&self, browser: CefArc<Browser>) -> Rect;

    /// Called when an element has been rendered. `buffer` holds
    /// `width * height` BGRA pixels, upper-left origin, and is only valid for
    /// the duration of the call.
    fn on_paint(
        &self,
        _browser: CefArc<Browser>,
        _paint_element_type: PaintElementType,
        _dirty_rects: &[Rect],
        _buffer: &[u8],
        _width: usize,
        _height: usize,
    ) {
    }

    fn get_screen_info(&self, _browser: CefArc<Browser>) -> Option<ScreenInfo> {
        None
    }
}

pub(crate) trait RenderHandlerConfigExt: RenderHandlerConfig {
    unsafe extern "C" fn get_view_rect_raw(
        ptr: *mut cef_render_handler_t,
        browser: *mut cef_browser_t,
        rect: *mut cef_rect_t,
    ) {
        let rust_impl =
            unsafe { CefArcFromRust::<RenderHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        let Some(browser) = (unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) }) else {
            return;
        };

        let view_rect = rust_impl.get_view_rect(browser);
        if let Some(rect) = unsafe { rect.as_mut() } {
            *rect = view_rect.into();
        }
    }

    #[allow(clippy::too_many_arguments)]
    unsafe extern "C" fn on_paint_raw(
        ptr: *mut cef_render_handler_t,
        browser: *mut cef_browser_t,
        paint_element_type: cef_paint_element_type_t,
        dirty_rects_count: usize,
        dirty_rects_start: *const cef_rect_t,
        buffer: *const c_void,
        width: c_int,
        height: c_int,
    ) {
        let rust_impl =
            unsafe { CefArcFromRust::<RenderHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        let Some(browser) = (unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) }) else {
            return;
        };

        let dirty_rects = if dirty_rects_start.is_null() {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(dirty_rects_start, dirty_rects_count) }
                .iter()
                .copied()
                .map(Rect::from)
                .collect()
        };

        let width = usize::try_from(width).unwrap_or(0);
        let height = usize::try_from(height).unwrap_or(0);
        let buffer = if buffer.is_null() {
            &[][..]
        } else {
            unsafe { std::slice::from_raw_parts(buffer.cast::<u8>(), width * height * 4) }
        };

        rust_impl.on_paint(
            browser,
            paint_element_type.into(),
            &dirty_rects,
            buffer,
            width,
            height,
        );
    }

    unsafe extern "C" fn get_screen_info_raw(
        ptr: *mut cef_render_handler_t,
        browser: *mut cef_browser_t,
        screen_info: *mut cef_screen_info_t,
    ) -> c_int {
        let rust_impl =
            unsafe { CefArcFromRust::<RenderHandler, Self>::rust_impl_from_ptr(ptr.cast()) };
        let Some(browser) = (unsafe { CefArc::<Browser>::try_from_raw(browser.cast()) }) else {
            return 0;
        };

        match (rust_impl.get_screen_info(browser), unsafe { screen_info.as_mut() }) {
            (Some(new_screen_info), Some(screen_info)) => {
                *screen_info = new_screen_info.into();
                wrap_boolean(true)
            }
            _ => wrap_boolean(false),
        }
    }
}

impl<T: RenderHandlerConfig> RenderHandlerConfigExt for T {}
