use log::info;

use crate::{
    CefError, api,
    rust_to_c::app::App,
    structs::{
        main_args::{MainArgs, RawMainArgs},
        settings::{RawSettings, Settings},
    },
    util::cef_arc::CefArc,
};

/// Initializes the runtime in the browser process. Must be called once, on
/// the thread that later runs the message loop.
pub fn initialize(
    main_args: &MainArgs,
    settings: &Settings,
    app: Option<CefArc<App>>,
) -> Result<(), CefError> {
    let api = api::get()?;
    let main_args = RawMainArgs::from(main_args);
    let settings = RawSettings::from(settings);
    let app = app.map_or(std::ptr::null_mut(), |app| app.into_raw().cast());

    let initialized = unsafe {
        (api.initialize)(&main_args.raw, &settings.raw, app, std::ptr::null_mut())
    };
    if initialized == 0 {
        return Err(CefError::Initialize);
    }

    info!("CEF initialized");
    Ok(())
}
