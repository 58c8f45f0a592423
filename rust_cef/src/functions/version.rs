use std::fmt;

use crate::{CefError, api};

/// Versions of the loaded runtime and the chromium it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub cef_major: i32,
    pub cef_minor: i32,
    pub cef_patch: i32,
    pub cef_commit: i32,
    pub chrome_major: i32,
    pub chrome_minor: i32,
    pub chrome_build: i32,
    pub chrome_patch: i32,
}

pub fn version_info() -> Result<Version, CefError> {
    let api = api::get()?;
    let entry = |index| unsafe { (api.version_info)(index) };

    Ok(Version {
        cef_major: entry(0),
        cef_minor: entry(1),
        cef_patch: entry(2),
        cef_commit: entry(3),
        chrome_major: entry(4),
        chrome_minor: entry(5),
        chrome_build: entry(6),
        chrome_patch: entry(7),
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}+chromium-{}.{}.{}.{}",
            self.cef_major,
            self.cef_minor,
            self.cef_patch,
            self.chrome_major,
            self.chrome_minor,
            self.chrome_build,
            self.chrome_patch
        )
    }
}
