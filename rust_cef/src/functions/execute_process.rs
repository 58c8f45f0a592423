use log::debug;

use crate::{
    CefError, api,
    rust_to_c::app::App,
    structs::main_args::{MainArgs, RawMainArgs},
    util::cef_arc::CefArc,
};

/// Runs a secondary process if the command line asks for one.
///
/// Returns `Ok(None)` in the browser process. In a sub-process this blocks
/// until the sub-process is done and returns its exit code.
pub fn execute_process(
    main_args: &MainArgs,
    app: Option<CefArc<App>>,
) -> Result<Option<i32>, CefError> {
    let api = api::get()?;
    let main_args = RawMainArgs::from(main_args);
    let app = app.map_or(std::ptr::null_mut(), |app| app.into_raw().cast());

    let exit_code = unsafe { (api.execute_process)(&main_args.raw, app, std::ptr::null_mut()) };
    debug!("cef_execute_process returned {exit_code}");

    Ok((exit_code >= 0).then_some(exit_code))
}
