pub mod browser;
pub mod browser_host;
pub mod command_line;
pub mod frame;
pub mod v8context;
pub mod v8value;
