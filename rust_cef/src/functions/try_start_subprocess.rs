use log::debug;

use crate::{
    CefError,
    c_to_rust::command_line::ProcessType,
    functions::execute_process::execute_process,
    rust_to_c::app::App,
    structs::main_args::MainArgs,
    util::cef_arc::CefArc,
};

/// Process type requested by a `--type=` switch in `main_args`.
pub fn process_type(main_args: &MainArgs) -> ProcessType {
    let value = main_args
        .args
        .iter()
        .skip(1)
        .filter_map(|arg| arg.to_str())
        .find_map(|arg| arg.strip_prefix("--type="));
    ProcessType::from_switch_value(value)
}

/// Hands control to the runtime when this executable was launched as one of
/// its sub-processes, and exits with the sub-process's exit code. Returns in
/// the browser process.
pub fn try_start_subprocess(main_args: &MainArgs, app: Option<CefArc<App>>) -> Result<(), CefError> {
    let process_type = process_type(main_args);
    debug!("starting as {process_type:?} process");

    if let Some(exit_code) = execute_process(main_args, app)? {
        std::process::exit(exit_code);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn type_switch_selects_the_process() {
        let browser = MainArgs::new(["demo", "--enable-logging"]);
        let renderer = MainArgs::new(["demo", "--type=renderer", "--lang=en-US"]);
        let gpu = MainArgs::new(["demo", "--type=gpu-process"]);

        assert_eq!(process_type(&browser), ProcessType::Browser);
        assert_eq!(process_type(&renderer), ProcessType::Renderer);
        assert_eq!(process_type(&gpu), ProcessType::Other("gpu-process".to_owned()));
    }
}
