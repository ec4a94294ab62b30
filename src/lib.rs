//! Discovery and metadata registry for pipeline applications.
//!
//! Packages found under the configured search paths declare applications in
//! `*App.json` descriptor modules (or through compiled-in factories). The
//! [`Scanner`] collects them, [`Query`] filters and orders them, and the
//! `meco-app-list` / `meco-app-search` binaries render the result.

pub mod cli;
pub mod descriptor;
pub mod discovery;
pub mod icon;
pub mod package;
pub mod parent;
pub mod query;
mod schema_loader;

pub use descriptor::{ApplicationDescriptor, ApplicationInfo, Developer, Document, Version};
pub use discovery::{
    DescriptorFactory, FactoryRegistry, ManifestLoader, ModuleLoader, ModuleSource, Scanner,
    discover_applications,
};
pub use icon::IconResolver;
pub use package::{PackageInfo, PackageUnit};
pub use parent::{
    EnvProbe, HostProbe, ParentApplication, current_parent_application, detect_parent_application,
};
pub use query::{Query, query};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Search-path list, in the platform's path-list syntax.
pub const ENV_SEARCH_PATH: &str = "MECO_APPLICATION_PATH";
/// JSON side-file describing the environment the shell was initialized for.
pub const ENV_APP_PATH: &str = "MECO_APP_PATH";

/// Process-wide values resolved once at start-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppContext {
    pub search_paths: Vec<PathBuf>,
    pub parent_application: ParentApplication,
}

impl AppContext {
    /// Resolve search paths (explicit flags win over the environment) and
    /// probe for the current parent application.
    pub fn resolve(explicit_paths: &[PathBuf]) -> Self {
        Self {
            search_paths: resolve_search_paths(explicit_paths),
            parent_application: current_parent_application(),
        }
    }

    /// Scanner over this context's search paths using manifest loading.
    pub fn scanner(&self) -> Result<Scanner> {
        Scanner::with_manifests(self.search_paths.iter().cloned())
            .context("initializing manifest loader")
    }
}

/// Search paths in precedence order: explicit paths, `MECO_APPLICATION_PATH`,
/// then the build-time `MECO_APPLICATION_PATH_HINT`. Empty when none is set.
pub fn resolve_search_paths(explicit: &[PathBuf]) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }

    if let Some(raw) = env::var_os(ENV_SEARCH_PATH) {
        let paths = non_empty_paths(&raw);
        if !paths.is_empty() {
            return paths;
        }
    }

    if let Some(hint) = option_env!("MECO_APPLICATION_PATH_HINT") {
        return non_empty_paths(std::ffi::OsStr::new(hint));
    }

    Vec::new()
}

fn non_empty_paths(raw: &std::ffi::OsStr) -> Vec<PathBuf> {
    env::split_paths(raw)
        .filter(|path| !path.as_os_str().is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
struct EnvironmentInfo {
    #[serde(default)]
    application: Option<String>,
}

/// Suggest `-a <app>` when the shell was initialized for a parent application.
///
/// Reads the JSON file named by `MECO_APP_PATH`; absent, unreadable or
/// malformed files produce no hint.
pub fn app_filter_hint() -> Option<String> {
    let path = env::var_os(ENV_APP_PATH)?;
    app_filter_hint_from(Path::new(&path))
        .map_err(|err| tracing::debug!("no filter hint: {err:#}"))
        .ok()
        .flatten()
}

fn app_filter_hint_from(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let info: EnvironmentInfo =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(info
        .application
        .filter(|app| !app.is_empty())
        .map(|app| {
            format!(
                "You can also use \"-a {app}\" in order to filter applications for the parent application, which this environment is initialized for."
            )
        }))
}
