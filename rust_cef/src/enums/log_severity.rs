use std::str::FromStr;

use cef_wrapper::cef_capi_sys::{
    cef_log_severity_t, cef_log_severity_t_LOGSEVERITY_DEBUG,
    cef_log_severity_t_LOGSEVERITY_DEFAULT, cef_log_severity_t_LOGSEVERITY_DISABLE,
    cef_log_severity_t_LOGSEVERITY_ERROR, cef_log_severity_t_LOGSEVERITY_FATAL,
    cef_log_severity_t_LOGSEVERITY_INFO, cef_log_severity_t_LOGSEVERITY_WARNING,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum LogSeverity {
    #[default]
    Default = cef_log_severity_t_LOGSEVERITY_DEFAULT,
    Debug = cef_log_severity_t_LOGSEVERITY_DEBUG,
    Info = cef_log_severity_t_LOGSEVERITY_INFO,
    Warning = cef_log_severity_t_LOGSEVERITY_WARNING,
    Error = cef_log_severity_t_LOGSEVERITY_ERROR,
    Fatal = cef_log_severity_t_LOGSEVERITY_FATAL,
    Disable = cef_log_severity_t_LOGSEVERITY_DISABLE,
}

impl From<LogSeverity> for cef_log_severity_t {
    fn from(value: LogSeverity) -> Self {
        value as _
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown log severity `{0}`")]
pub struct ParseLogSeverityError(String);

impl FromStr for LogSeverity {
    type Err = ParseLogSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "debug" | "verbose" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "disable" | "off" => Ok(Self::Disable),
            _ => Err(ParseLogSeverityError(s.to_string())),
        }
    }
}
