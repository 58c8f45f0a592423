use log::debug;

use crate::{CefError, api};

/// Runs the runtime's message loop until [`quit_message_loop`] is called.
pub fn run_message_loop() -> Result<(), CefError> {
    let api = api::get()?;
    debug!("entering the message loop");
    unsafe { (api.run_message_loop)() };
    debug!("message loop returned");
    Ok(())
}

/// Makes [`run_message_loop`] return. Only valid on the UI thread.
pub fn quit_message_loop() -> Result<(), CefError> {
    let api = api::get()?;
    unsafe { (api.quit_message_loop)() };
    Ok(())
}

/// Shuts the runtime down. Every browser must be closed first.
pub fn shutdown() -> Result<(), CefError> {
    let api = api::get()?;
    unsafe { (api.shutdown)() };
    debug!("CEF shut down");
    Ok(())
}
