use cef_wrapper::cef_capi_sys::cef_screen_info_t;

use crate::util::wrap_boolean::{unwrap_boolean, wrap_boolean};

use super::geometry::Rect;

/// Screen information used when window rendering is disabled. Returned from
/// the render handler's `get_screen_info`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenInfo {
    /// Ratio between physical and logical pixels.
    pub device_scale_factor: f32,
    /// Screen depth in bits per pixel.
    pub depth: u32,
    pub depth_per_component: u32,
    pub is_monochrome: bool,
    /// The display rectangle in virtual-screen coordinates.
    pub rect: Rect,
    /// The work area of the display, excluding task bars and the like.
    pub available_rect: Rect,
}

impl ScreenInfo {
    /// A 24-bit screen exactly the size of `rect` at the given scale.
    pub fn for_view(rect: Rect, device_scale_factor: f32) -> Self {
        Self {
            device_scale_factor,
            depth: 24,
            depth_per_component: 8,
            is_monochrome: false,
            rect,
            available_rect: rect,
        }
    }
}

impl From<cef_screen_info_t> for ScreenInfo {
    fn from(info: cef_screen_info_t) -> Self {
        Self {
            device_scale_factor: info.device_scale_factor,
            depth: info.depth as u32,
            depth_per_component: info.depth_per_component as u32,
            is_monochrome: unwrap_boolean(info.is_monochrome),
            rect: info.rect.into(),
            available_rect: info.available_rect.into(),
        }
    }
}

impl From<ScreenInfo> for cef_screen_info_t {
    fn from(val: ScreenInfo) -> Self {
        cef_screen_info_t {
            device_scale_factor: val.device_scale_factor,
            depth: val.depth as i32,
            depth_per_component: val.depth_per_component as i32,
            is_monochrome: wrap_boolean(val.is_monochrome),
            rect: val.rect.into(),
            available_rect: val.available_rect.into(),
        }
    }
}
