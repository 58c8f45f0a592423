use log::debug;

use crate::{
    CefError, api,
    rust_to_c::client::Client,
    structs::{
        browser_settings::{BrowserSettings, RawBrowserSettings},
        window_info::{RawWindowInfo, WindowInfo},
    },
    util::{cef_arc::CefArc, cef_string::CefString},
};

/// Asks the runtime to create a browser. The browser arrives later through
/// the life span handler's `on_after_created`.
pub fn browser_host_create_browser(
    window_info: &WindowInfo,
    client: CefArc<Client>,
    url: &str,
    settings: &BrowserSettings,
) -> Result<(), CefError> {
    let api = api::get()?;
    let window_info = RawWindowInfo::from(window_info);
    let settings = RawBrowserSettings::from(settings);
    let url_string = CefString::new(url);

    let created = unsafe {
        (api.browser_host_create_browser)(
            &window_info.raw,
            client.into_raw().cast(),
            url_string.as_raw(),
            &settings.raw,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
        )
    };
    if created == 0 {
        return Err(CefError::CreateBrowser);
    }

    debug!("requested a browser for {url}");
    Ok(())
}
