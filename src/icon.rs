use std::env;
use std::path::{Path, PathBuf};

use crate::descriptor::ApplicationDescriptor;

/// Directory, relative to a package, that holds icon files.
pub const ICON_DIR: &str = "icons";
/// Placeholder icon used when nothing more specific exists.
pub const PLACEHOLDER_ICON: &str = "na.png";

/// Resolves descriptor icons to files inside their package.
#[derive(Clone, Debug)]
pub struct IconResolver {
    platform: String,
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::for_platform(env::consts::OS)
    }
}

impl IconResolver {
    /// Resolver using `os` (as reported by `std::env::consts::OS`) for
    /// platform icons.
    pub fn for_platform(os: &str) -> Self {
        let platform = match os {
            "macos" => "darwin",
            other => other,
        };
        Self {
            platform: platform.to_string(),
        }
    }

    pub fn platform_icon_name(&self) -> String {
        format!("{}.png", self.platform)
    }

    /// Icon file for `desc`, or `None` when nothing suitable exists.
    ///
    /// A declared icon falls back to the placeholder. Without a declared icon
    /// the platform icon is used when `use_platform_icon` is set, with no
    /// placeholder fallback; otherwise the placeholder itself.
    pub fn resolve(&self, desc: &ApplicationDescriptor) -> Option<PathBuf> {
        let package = desc.package()?;
        let icons = package.path.join(ICON_DIR);

        match desc.icon_file_name().filter(|name| !name.is_empty()) {
            Some(name) => {
                existing(&icons, name).or_else(|| existing(&icons, PLACEHOLDER_ICON))
            }
            None if desc.use_platform_icon() => existing(&icons, &self.platform_icon_name()),
            None => existing(&icons, PLACEHOLDER_ICON),
        }
    }
}

fn existing(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = dir.join(name);
    candidate.is_file().then_some(candidate)
}
