use cef_wrapper::cef_capi_sys::{cef_base_ref_counted_t, cef_command_line_t};

use crate::util::{
    cef_string::{CefString, cef_string_userfree_into_string},
    starts_with::StartsWith,
};

#[repr(transparent)]
pub struct CommandLine(pub(crate) cef_command_line_t);

unsafe impl StartsWith<cef_command_line_t> for CommandLine {}
unsafe impl StartsWith<cef_base_ref_counted_t> for CommandLine {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_command_line_t {}

impl CommandLine {
    pub(crate) fn as_raw(&self) -> *mut cef_command_line_t {
        &self.0 as *const _ as *mut _
    }

    #[doc = "\n Returns true if this object is valid. Do not call any other functions\n if this function returns false.\n"]
    pub fn is_valid(&self) -> bool {
        unsafe { invoke_v_table!(self => is_valid()) }.is_some_and(|valid| valid != 0)
    }

    #[doc = "\n Returns true if the values of this object are read-only. Some APIs may\n expose read-only objects.\n"]
    pub fn is_read_only(&self) -> bool {
        unsafe { invoke_v_table!(self => is_read_only()) }.is_none_or(|read_only| read_only != 0)
    }

    #[doc = "\n Get the program part of the command line string (the first item).\n"]
    pub fn get_program(&self) -> Option<String> {
        let program = unsafe { invoke_v_table!(self => get_program()) }?;
        unsafe { cef_string_userfree_into_string(program) }
    }

    #[doc = "\n Returns true (1) if the command line has switches.\n"]
    pub fn has_switches(&self) -> bool {
        unsafe { invoke_v_table!(self => has_switches()) }.is_some_and(|has| has != 0)
    }

    #[doc = "\n Returns true (1) if the command line contains the given switch.\n"]
    pub fn has_switch(&self, name: &str) -> bool {
        let name = CefString::new(name);
        unsafe { invoke_v_table!(self => has_switch(name.as_raw())) }.is_some_and(|has| has != 0)
    }

    #[doc = "\n Returns the value associated with the given switch. If the switch has no\n value or isn't present this function returns the NULL string.\n"]
    pub fn get_switch_value(&self, name: &str) -> Option<String> {
        let name = CefString::new(name);
        let value = unsafe { invoke_v_table!(self => get_switch_value(name.as_raw())) }?;
        unsafe { cef_string_userfree_into_string(value) }.filter(|value| !value.is_empty())
    }

    #[doc = "\n Add a switch to the end of the command line.\n"]
    pub fn append_switch(&self, name: &str) {
        let name = CefString::new(name);
        unsafe { invoke_v_table!(self => append_switch(name.as_raw())) };
    }

    #[doc = "\n Add a switch with the specified value to the end of the command line. If\n the switch has no value pass an NULL value string.\n"]
    pub fn append_switch_with_value(&self, name: &str, value: &str) {
        let name = CefString::new(name);
        let value = CefString::new(value);
        unsafe { invoke_v_table!(self => append_switch_with_value(name.as_raw(), value.as_raw())) };
    }

    #[doc = "\n Add an argument to the end of the command line.\n"]
    pub fn append_argument(&self, argument: &str) {
        let argument = CefString::new(argument);
        unsafe { invoke_v_table!(self => append_argument(argument.as_raw())) };
    }
}

/// Which kind of process a command line belongs to, from its `type` switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessType {
    Browser,
    Renderer,
    Other(String),
}

impl ProcessType {
    /// `process_type` is the value of the `type` switch; the browser process
    /// has none.
    pub fn from_switch_value(process_type: Option<&str>) -> Self {
        match process_type {
            None | Some("") => Self::Browser,
            Some("renderer") => Self::Renderer,
            #[cfg(target_os = "linux")]
            Some("zygote") => Self::Renderer,
            Some(other) => Self::Other(other.to_string()),
        }
    }
}

impl CommandLine {
    pub fn get_process_type(&self) -> ProcessType {
        ProcessType::from_switch_value(self.get_switch_value("type").as_deref())
    }
}
