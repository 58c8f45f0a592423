use std::ffi::OsString;
#[cfg(not(target_os = "windows"))]
use std::ffi::{CString, OsStr, c_char, c_int};

use cef_wrapper::cef_capi_sys::cef_main_args_t;

/// Process arguments, forwarded byte for byte to the runtime's argument
/// parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainArgs {
    pub args: Vec<OsString>,
}

impl MainArgs {
    pub fn new(args: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            args: std::env::args_os().collect(),
        }
    }
}

/// The C view of [`MainArgs`], owning the storage `argv` points into.
pub(crate) struct RawMainArgs {
    pub(crate) raw: cef_main_args_t,
    #[cfg(not(target_os = "windows"))]
    _args: Vec<CString>,
    #[cfg(not(target_os = "windows"))]
    _argv: Vec<*mut c_char>,
}

#[cfg(not(target_os = "windows"))]
impl From<&MainArgs> for RawMainArgs {
    fn from(value: &MainArgs) -> Self {
        // arguments with interior nul bytes cannot be represented in argv.
        let args = value
            .args
            .iter()
            .filter_map(|arg| CString::new(arg_bytes(arg)).ok())
            .collect::<Vec<_>>();

        let mut argv = args
            .iter()
            .map(|arg| arg.as_ptr() as *mut c_char)
            .collect::<Vec<_>>();
        let argc = argv.len() as c_int;
        argv.push(std::ptr::null_mut());

        Self {
            raw: cef_main_args_t {
                argc,
                argv: argv.as_mut_ptr(),
            },
            _args: args,
            _argv: argv,
        }
    }
}

#[cfg(unix)]
fn arg_bytes(arg: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;

    arg.as_bytes().to_vec()
}

#[cfg(not(any(unix, target_os = "windows")))]
fn arg_bytes(arg: &OsStr) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}

#[cfg(target_os = "windows")]
impl From<&MainArgs> for RawMainArgs {
    fn from(_value: &MainArgs) -> Self {
        // the runtime reads the command line itself on windows.
        Self {
            raw: cef_main_args_t {
                instance: unsafe { GetModuleHandleW(std::ptr::null()) },
            },
        }
    }
}

#[cfg(target_os = "windows")]
#[link(name = "kernel32")]
unsafe extern "system" {
    fn GetModuleHandleW(module_name: *const u16) -> *mut std::ffi::c_void;
}

#[cfg(all(test, unix))]
mod test {
    use std::{ffi::CStr, os::unix::ffi::OsStrExt};

    use super::*;

    #[test]
    fn argv_keeps_non_utf8_bytes() {
        let path = OsStr::from_bytes(b"--cache-path=/tmp/caf\xe9");
        let main_args = MainArgs::new([OsStr::new("demo"), path]);
        let raw = RawMainArgs::from(&main_args);

        assert_eq!(raw.raw.argc, 2);
        let argv = unsafe { std::slice::from_raw_parts(raw.raw.argv, 3) };
        let second = unsafe { CStr::from_ptr(argv[1]) };
        assert_eq!(second.to_bytes(), b"--cache-path=/tmp/caf\xe9");
        assert!(argv[2].is_null());
    }

    #[test]
    fn arguments_with_nul_bytes_are_dropped() {
        let main_args = MainArgs::new(["demo", "bad\0arg", "--enable-logging"]);
        let raw = RawMainArgs::from(&main_args);
        assert_eq!(raw.raw.argc, 2);
    }
}
