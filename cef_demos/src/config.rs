use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

use rust_cef::{
    api::LIBRARY_FILE_NAME,
    enums::log_severity::{LogSeverity, ParseLogSeverityError},
};

pub const DEFAULT_SCREENSHOT_URL: &str = "https://www.google.com/ncr";
pub const DEFAULT_SCREENSHOT_PATH: &str = "screenshot.png";
pub const DEFAULT_WINDOW_URL: &str = "https://www.google.com/ncr";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub library_path: PathBuf,
    pub resources_dir: Option<PathBuf>,
    pub locales_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    /// Overrides the runtime log level each demo picks for itself.
    pub log_severity: Option<LogSeverity>,
    pub screenshot_url: String,
    pub screenshot_path: PathBuf,
    pub window_url: String,
    pub webpage_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has to be one of debug|info|warning|error|fatal|disable")]
    LogSeverity {
        name: &'static str,
        #[source]
        source: ParseLogSeverityError,
    },

    #[error("{name} must not be empty")]
    Empty { name: &'static str },

    #[error("could not locate the running executable, set {name}")]
    CurrentExe {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub fn read_config() -> Result<Config, ConfigError> {
    read_config_from(|name| env::var(name).ok())
}

/// Builds the config from `lookup`, which returns the value of an
/// environment variable if it is set.
pub fn read_config_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let library_path = match path_var(&lookup, "CEF_DEMOS_LIBRARY_PATH")? {
        Some(path) => path,
        None => next_to_executable("CEF_DEMOS_LIBRARY_PATH")?,
    };

    let log_severity = match string_var(&lookup, "CEF_DEMOS_LOG_SEVERITY")? {
        Some(severity) => Some(LogSeverity::from_str(&severity).map_err(|source| {
            ConfigError::LogSeverity {
                name: "CEF_DEMOS_LOG_SEVERITY",
                source,
            }
        })?),
        None => None,
    };

    let webpage_dir = path_var(&lookup, "CEF_DEMOS_WEBPAGE_DIR")?
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("webpage"));

    Ok(Config {
        library_path,
        resources_dir: path_var(&lookup, "CEF_DEMOS_RESOURCES_DIR")?,
        locales_dir: path_var(&lookup, "CEF_DEMOS_LOCALES_DIR")?,
        cache_dir: path_var(&lookup, "CEF_DEMOS_CACHE_DIR")?,
        log_severity,
        screenshot_url: string_var(&lookup, "CEF_DEMOS_SCREENSHOT_URL")?
            .unwrap_or_else(|| DEFAULT_SCREENSHOT_URL.to_string()),
        screenshot_path: path_var(&lookup, "CEF_DEMOS_SCREENSHOT_PATH")?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCREENSHOT_PATH)),
        window_url: string_var(&lookup, "CEF_DEMOS_WINDOW_URL")?
            .unwrap_or_else(|| DEFAULT_WINDOW_URL.to_string()),
        webpage_dir,
    })
}

// set-but-empty is an error; unset falls back to the default.
fn string_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<String>, ConfigError> {
    match lookup(name) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

fn path_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<PathBuf>, ConfigError> {
    Ok(string_var(lookup, name)?.map(PathBuf::from))
}

fn next_to_executable(name: &'static str) -> Result<PathBuf, ConfigError> {
    let exe = env::current_exe().map_err(|source| ConfigError::CurrentExe { name, source })?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(LIBRARY_FILE_NAME))
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = read_config_from(lookup(&[])).unwrap();

        assert!(config.library_path.ends_with(LIBRARY_FILE_NAME));
        assert_eq!(config.resources_dir, None);
        assert_eq!(config.log_severity, None);
        assert_eq!(config.screenshot_url, DEFAULT_SCREENSHOT_URL);
        assert_eq!(config.screenshot_path, PathBuf::from("screenshot.png"));
        assert_eq!(config.window_url, DEFAULT_WINDOW_URL);
        assert!(config.webpage_dir.join("index.html").is_file());
    }

    #[test]
    fn variables_override_defaults() {
        let config = read_config_from(lookup(&[
            ("CEF_DEMOS_LIBRARY_PATH", "/opt/cef/libcef.so"),
            ("CEF_DEMOS_RESOURCES_DIR", "/opt/cef/Resources"),
            ("CEF_DEMOS_LOG_SEVERITY", "Error"),
            ("CEF_DEMOS_SCREENSHOT_PATH", "out/shot.png"),
            ("CEF_DEMOS_WINDOW_URL", " https://example.com/ "),
        ]))
        .unwrap();

        assert_eq!(config.library_path, PathBuf::from("/opt/cef/libcef.so"));
        assert_eq!(config.resources_dir, Some(PathBuf::from("/opt/cef/Resources")));
        assert_eq!(config.log_severity, Some(LogSeverity::Error));
        assert_eq!(config.screenshot_path, PathBuf::from("out/shot.png"));
        assert_eq!(config.window_url, "https://example.com/");
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = read_config_from(lookup(&[("CEF_DEMOS_LOG_SEVERITY", "loud")])).unwrap_err();
        assert!(err.to_string().contains("CEF_DEMOS_LOG_SEVERITY"));

        let err = read_config_from(lookup(&[("CEF_DEMOS_SCREENSHOT_URL", "  ")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Empty {
                name: "CEF_DEMOS_SCREENSHOT_URL"
            }
        ));
    }
}
