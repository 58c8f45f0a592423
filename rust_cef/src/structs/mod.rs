pub mod browser_settings;
pub mod geometry;
pub mod main_args;
pub mod screen_info;
pub mod settings;
pub mod window_info;
