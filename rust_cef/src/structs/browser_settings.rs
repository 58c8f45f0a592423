use std::num::NonZeroU32;

use cef_wrapper::cef_capi_sys::cef_browser_settings_t;

use crate::{enums::state::State, util::cef_string::StringArena};

/// Per-browser settings. `None` and [`State::Default`] leave the runtime's
/// choice in place.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    /// Paint rate of an off-screen browser, 30 when unset.
    pub windowless_frame_rate: Option<NonZeroU32>,
    pub standard_font_family: Option<String>,
    pub fixed_font_family: Option<String>,
    pub default_font_size: Option<u32>,
    pub minimum_font_size: Option<u32>,
    pub default_encoding: Option<String>,
    pub remote_fonts: State,
    pub javascript: State,
    pub javascript_close_windows: State,
    pub javascript_access_clipboard: State,
    pub javascript_dom_paste: State,
    pub image_loading: State,
    pub local_storage: State,
    pub databases: State,
    pub webgl: State,
    pub background_color: u32,
}

/// The C view of [`BrowserSettings`], owning the strings it points into.
pub(crate) struct RawBrowserSettings {
    pub(crate) raw: cef_browser_settings_t,
    _strings: StringArena,
}

impl From<&BrowserSettings> for RawBrowserSettings {
    fn from(value: &BrowserSettings) -> Self {
        let mut strings = StringArena::default();
        let size = |s: Option<u32>| s.map(|v| v as i32).unwrap_or(0);

        let raw = cef_browser_settings_t {
            size: std::mem::size_of::<cef_browser_settings_t>(),
            windowless_frame_rate: value.windowless_frame_rate.map(|v| v.get() as i32).unwrap_or(0),
            standard_font_family: strings.view_opt(value.standard_font_family.as_deref()),
            fixed_font_family: strings.view_opt(value.fixed_font_family.as_deref()),
            serif_font_family: strings.view_opt(None),
            sans_serif_font_family: strings.view_opt(None),
            cursive_font_family: strings.view_opt(None),
            fantasy_font_family: strings.view_opt(None),
            default_font_size: size(value.default_font_size),
            default_fixed_font_size: 0,
            minimum_font_size: size(value.minimum_font_size),
            minimum_logical_font_size: 0,
            default_encoding: strings.view_opt(value.default_encoding.as_deref()),
            remote_fonts: value.remote_fonts.into(),
            javascript: value.javascript.into(),
            javascript_close_windows: value.javascript_close_windows.into(),
            javascript_access_clipboard: value.javascript_access_clipboard.into(),
            javascript_dom_paste: value.javascript_dom_paste.into(),
            image_loading: value.image_loading.into(),
            image_shrink_standalone_to_fit: State::Default.into(),
            text_area_resize: State::Default.into(),
            tab_to_links: State::Default.into(),
            local_storage: value.local_storage.into(),
            databases: value.databases.into(),
            webgl: value.webgl.into(),
            background_color: value.background_color,
            chrome_status_bubble: State::Default.into(),
            chrome_zoom_bubble: State::Default.into(),
        };

        Self {
            raw,
            _strings: strings,
        }
    }
}
