// src/repository/locator.rs

//! Index document location
//!
//! Pure string composition of repository URLs. The Qt online repository is
//! laid out as:
//!
//! ```text
//! <host>/online/qtsdkrepository/<os>_x64/<target>/qt5_<digits>/Updates.xml
//! <host>/online/qtsdkrepository/<os>_x64/<target>/qt5_<digits>_wasm/Updates.xml
//! <host>/online/qtsdkrepository/<os>_x64/<target>/<tool>/Updates.xml
//! ```
//!
//! Windows packages live under `_x86` regardless of the requested arch.

/// Default repository host
pub const DEFAULT_BASE_URL: &str = "https://download.qt.io";

/// Path from the host to the repository root
const REPOSITORY_PATH: &str = "/online/qtsdkrepository/";

/// Arch name whose packages live in a separate `_wasm` directory
pub const WASM_ARCH: &str = "wasm_32";

/// Name of the index document in every repository directory
pub const INDEX_FILE: &str = "Updates.xml";

/// Location of one index document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLocation {
    /// Directory URL, always ending in `/`; archive URLs are built on top of it
    pub directory: String,
    /// Absolute URL of the `Updates.xml` document
    pub document: String,
}

/// Builds repository URLs for a default host or a mirror
#[derive(Debug, Clone)]
pub struct IndexLocator {
    root: String,
    has_mirror: bool,
}

impl IndexLocator {
    /// Create a locator; a mirror host replaces `base_url` but keeps the path
    pub fn new(base_url: &str, mirror: Option<&str>) -> Self {
        let host = mirror.unwrap_or(base_url).trim_end_matches('/');
        Self {
            root: format!("{host}{REPOSITORY_PATH}"),
            has_mirror: mirror.is_some(),
        }
    }

    /// Locator for the default host with an optional mirror
    pub fn with_mirror(mirror: Option<&str>) -> Self {
        Self::new(DEFAULT_BASE_URL, mirror)
    }

    /// Repository root URL, ending in `/`
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn has_mirror(&self) -> bool {
        self.has_mirror
    }

    /// Index of a Qt release for one target and arch
    ///
    /// `version_digits` is the version with its dots removed (`5131`).
    pub fn locate(&self, os_name: &str, target: &str, version_digits: &str, arch: &str) -> IndexLocation {
        let suffix = if arch == WASM_ARCH { "_wasm/" } else { "/" };
        let directory = format!(
            "{}{}{}/qt5_{}{}",
            self.root,
            os_segment(os_name),
            target,
            version_digits,
            suffix
        );
        let document = format!("{directory}{INDEX_FILE}");
        IndexLocation { directory, document }
    }

    /// Index of a named tool; tools are grouped by name, not by version
    ///
    /// The returned directory is the target directory shared by all tools,
    /// so archive URLs must re-append the tool name.
    pub fn locate_tool(&self, os_name: &str, target: &str, tool_name: &str) -> IndexLocation {
        let directory = format!("{}{}{}/", self.root, os_segment(os_name), target);
        let document = format!("{directory}{tool_name}/{INDEX_FILE}");
        IndexLocation { directory, document }
    }
}

impl Default for IndexLocator {
    fn default() -> Self {
        Self::with_mirror(None)
    }
}

/// OS directory: windows is published as 32-bit, everything else as 64-bit
fn os_segment(os_name: &str) -> String {
    if os_name == "windows" {
        format!("{os_name}_x86/")
    } else {
        format!("{os_name}_x64/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_uses_32bit_segment() {
        let loc = IndexLocator::default().locate("windows", "desktop", "5131", "win64_msvc2017_64");
        assert_eq!(
            loc.document,
            "https://download.qt.io/online/qtsdkrepository/windows_x86/desktop/qt5_5131/Updates.xml"
        );
    }

    #[test]
    fn test_other_os_uses_64bit_segment() {
        for os in ["linux", "mac"] {
            let loc = IndexLocator::default().locate(os, "desktop", "5131", "gcc_64");
            assert!(loc.directory.contains(&format!("/{os}_x64/desktop/")), "{}", loc.directory);
        }
    }

    #[test]
    fn test_wasm_directory() {
        for os in ["windows", "linux", "mac"] {
            let loc = IndexLocator::default().locate(os, "desktop", "5131", "wasm_32");
            assert!(loc.directory.ends_with("/desktop/qt5_5131_wasm/"));
            assert!(loc.document.ends_with("/qt5_5131_wasm/Updates.xml"));
        }
    }

    #[test]
    fn test_mirror_replaces_host_only() {
        let default = IndexLocator::default().locate("linux", "android", "5140", "android_armv7");
        let mirror = IndexLocator::with_mirror(Some("https://mirrors.ocf.berkeley.edu/qt/"))
            .locate("linux", "android", "5140", "android_armv7");

        assert_eq!(
            mirror.directory,
            "https://mirrors.ocf.berkeley.edu/qt/online/qtsdkrepository/linux_x64/android/qt5_5140/"
        );
        assert_eq!(
            default.directory.strip_prefix(DEFAULT_BASE_URL),
            mirror.directory.strip_prefix("https://mirrors.ocf.berkeley.edu/qt")
        );
    }

    #[test]
    fn test_tool_location() {
        let loc = IndexLocator::default().locate_tool("windows", "desktop", "tools_mingw");
        assert_eq!(loc.directory, "https://download.qt.io/online/qtsdkrepository/windows_x86/desktop/");
        assert_eq!(loc.document, format!("{}tools_mingw/Updates.xml", loc.directory));
    }
}
