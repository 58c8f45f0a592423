use cef_wrapper::cef_capi_sys::cef_settings_t;

use crate::{
    enums::{log_item::LogItems, log_severity::LogSeverity},
    util::{cef_string::StringArena, wrap_boolean::wrap_boolean},
};

/// Global runtime configuration passed to `cef_initialize`.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub accept_languages: Vec<String>,
    pub background_color: u32,
    pub browser_subprocess_path: Option<String>,
    pub cache_path: Option<String>,
    pub chrome_runtime: bool,
    pub command_line_args_disabled: bool,
    pub external_message_pump: bool,
    #[cfg(target_os = "macos")]
    pub framework_dir_path: Option<String>,
    pub javascript_flags: Option<String>,
    pub locale: Option<String>,
    pub locales_dir_path: Option<String>,
    pub log_file: Option<String>,
    pub log_items: LogItems,
    pub log_severity: LogSeverity,
    #[cfg(target_os = "macos")]
    pub main_bundle_path: Option<String>,
    pub multi_threaded_message_loop: bool,
    pub no_sandbox: bool,
    pub persist_session_cookies: bool,
    pub remote_debugging_port: Option<u16>,
    pub resources_dir_path: Option<String>,
    pub root_cache_path: Option<String>,
    pub user_agent: Option<String>,
    pub windowless_rendering_enabled: bool,
}

/// The C view of [`Settings`], owning the strings it points into.
pub(crate) struct RawSettings {
    pub(crate) raw: cef_settings_t,
    _strings: StringArena,
}

impl From<&Settings> for RawSettings {
    fn from(value: &Settings) -> Self {
        let mut strings = StringArena::default();
        let accept_languages = value.accept_languages.join(",");

        let raw = cef_settings_t {
            size: std::mem::size_of::<cef_settings_t>(),
            no_sandbox: wrap_boolean(value.no_sandbox),
            browser_subprocess_path: strings.view_opt(value.browser_subprocess_path.as_deref()),
            #[cfg(target_os = "macos")]
            framework_dir_path: strings.view_opt(value.framework_dir_path.as_deref()),
            #[cfg(not(target_os = "macos"))]
            framework_dir_path: strings.view_opt(None),
            #[cfg(target_os = "macos")]
            main_bundle_path: strings.view_opt(value.main_bundle_path.as_deref()),
            #[cfg(not(target_os = "macos"))]
            main_bundle_path: strings.view_opt(None),
            chrome_runtime: wrap_boolean(value.chrome_runtime),
            multi_threaded_message_loop: wrap_boolean(value.multi_threaded_message_loop),
            external_message_pump: wrap_boolean(value.external_message_pump),
            windowless_rendering_enabled: wrap_boolean(value.windowless_rendering_enabled),
            command_line_args_disabled: wrap_boolean(value.command_line_args_disabled),
            cache_path: strings.view_opt(value.cache_path.as_deref()),
            root_cache_path: strings.view_opt(value.root_cache_path.as_deref()),
            persist_session_cookies: wrap_boolean(value.persist_session_cookies),
            persist_user_preferences: 0,
            user_agent: strings.view_opt(value.user_agent.as_deref()),
            user_agent_product: strings.view_opt(None),
            locale: strings.view_opt(value.locale.as_deref()),
            log_file: strings.view_opt(value.log_file.as_deref()),
            log_severity: value.log_severity.into(),
            log_items: value.log_items.into(),
            javascript_flags: strings.view_opt(value.javascript_flags.as_deref()),
            resources_dir_path: strings.view_opt(value.resources_dir_path.as_deref()),
            locales_dir_path: strings.view_opt(value.locales_dir_path.as_deref()),
            pack_loading_disabled: 0,
            remote_debugging_port: value.remote_debugging_port.map(i32::from).unwrap_or(0),
            uncaught_exception_stack_size: 0,
            background_color: value.background_color,
            accept_language_list: strings
                .view_opt(Some(accept_languages.as_str()).filter(|list| !list.is_empty())),
            cookieable_schemes_list: strings.view_opt(None),
            cookieable_schemes_exclude_defaults: 0,
            chrome_policy_id: strings.view_opt(None),
            chrome_app_icon_id: 0,
        };

        Self {
            raw,
            _strings: strings,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::cef_string::cef_string_to_string;

    #[test]
    fn raw_settings_point_at_owned_strings() {
        let settings = Settings {
            no_sandbox: true,
            windowless_rendering_enabled: true,
            log_severity: LogSeverity::Warning,
            resources_dir_path: Some("/opt/cef/Resources".to_string()),
            accept_languages: vec!["en-US".to_string(), "fr".to_string()],
            ..Default::default()
        };

        let raw = RawSettings::from(&settings);

        assert_eq!(raw.raw.size, std::mem::size_of::<cef_settings_t>());
        assert_eq!(raw.raw.no_sandbox, 1);
        assert_eq!(raw.raw.windowless_rendering_enabled, 1);
        assert_eq!(raw.raw.log_severity, 3);
        assert_eq!(
            unsafe { cef_string_to_string(&raw.raw.resources_dir_path) }.as_deref(),
            Some("/opt/cef/Resources")
        );
        assert_eq!(
            unsafe { cef_string_to_string(&raw.raw.accept_language_list) }.as_deref(),
            Some("en-US,fr")
        );
        assert!(raw.raw.cache_path.str_.is_null());
        assert!(raw.raw.locales_dir_path.dtor.is_none());
    }
}
