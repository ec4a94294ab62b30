use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::loader::{ManifestLoader, ModuleLoader, ModuleSource};
use crate::descriptor::{ApplicationDescriptor, ApplicationInfo};
use crate::package::PackageUnit;

/// File stem suffix that separates descriptor modules from ordinary files.
pub const APPLICATION_MODULE_SUFFIX: &str = "App";
/// Extension of descriptor module files.
pub const APPLICATION_MODULE_EXTENSION: &str = "json";

/// Walks search-path roots and instantiates every declared application.
///
/// Every call performs a fresh walk; nothing is cached between scans. Missing
/// roots, unrecognized packages and unloadable modules are skipped.
pub struct Scanner {
    search_paths: Vec<PathBuf>,
    loaders: Vec<Box<dyn ModuleLoader>>,
}

impl Scanner {
    /// Scanner without loaders. Add at least one with [`Scanner::with_loader`].
    pub fn new<P: Into<PathBuf>>(search_paths: impl IntoIterator<Item = P>) -> Self {
        Self {
            search_paths: search_paths.into_iter().map(P::into).collect(),
            loaders: Vec::new(),
        }
    }

    /// Scanner reading descriptor modules as JSON manifests.
    pub fn with_manifests<P: Into<PathBuf>>(
        search_paths: impl IntoIterator<Item = P>,
    ) -> Result<Self> {
        Ok(Self::new(search_paths).with_loader(ManifestLoader::new()?))
    }

    /// Append a loader. Loaders are consulted in the order they were added.
    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Every descriptor reachable from the search paths, unfiltered and in
    /// discovery order.
    pub fn discover(&self) -> Vec<ApplicationDescriptor> {
        self.scan(None)
    }

    /// Like [`Scanner::discover`], restricted to packages whose name matches
    /// `package_name` case-insensitively.
    pub fn scan(&self, package_name: Option<&str>) -> Vec<ApplicationDescriptor> {
        let mut found = Vec::new();
        for root in &self.search_paths {
            for package in packages_in(root) {
                if let Some(wanted) = package_name {
                    if !package.name_matches(wanted) {
                        trace!(package = %package.name, "package filtered out");
                        continue;
                    }
                }
                self.collect_package(&package, &mut found);
            }
        }
        debug!(count = found.len(), "discovery finished");
        found
    }

    fn collect_package(&self, package: &PackageUnit, found: &mut Vec<ApplicationDescriptor>) {
        let modules = application_modules(&package.path);
        if modules.is_empty() {
            trace!(package = %package.name, "package declares no applications");
            return;
        }
        let directory = package.directory_name();
        for file in modules {
            let Some(stem) = file.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let source = ModuleSource {
                module_path: format!("{directory}.{stem}"),
                file,
                package,
            };
            let Some(infos) = self.load_module(&source) else {
                continue;
            };
            found.extend(
                infos
                    .into_iter()
                    .map(|info| ApplicationDescriptor::new(info).with_package(package.clone())),
            );
        }
    }

    fn load_module(&self, source: &ModuleSource<'_>) -> Option<Vec<ApplicationInfo>> {
        for loader in &self.loaders {
            match loader.load(source) {
                Ok(infos) => {
                    trace!(module = %source.module_path, loader = loader.name(), "module loaded");
                    return Some(infos);
                }
                Err(err) => {
                    debug!(
                        module = %source.module_path,
                        loader = loader.name(),
                        "skipping module: {err:#}"
                    );
                }
            }
        }
        None
    }
}

/// Packages among the immediate subdirectories of `root`, in name order.
fn packages_in(root: &Path) -> Vec<PackageUnit> {
    let Ok(entries) = fs::read_dir(root) else {
        trace!(root = %root.display(), "search path unreadable, skipping");
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    dirs.into_iter()
        .filter_map(|dir| match PackageUnit::recognize(&dir) {
            Ok(package) => Some(package),
            Err(err) => {
                trace!(dir = %dir.display(), "not a package: {err:#}");
                None
            }
        })
        .collect()
}

/// Descriptor module files directly inside `dir`, in name order.
fn application_modules(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_application_module(path))
        .collect();
    files.sort();
    files
}

fn is_application_module(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext == APPLICATION_MODULE_EXTENSION);
    let has_suffix = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(APPLICATION_MODULE_SUFFIX));
    has_extension && has_suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_names_need_suffix_and_extension() {
        assert!(is_application_module(Path::new("/pkg/renamerApp.json")));
        assert!(is_application_module(Path::new("/pkg/App.json")));
        assert!(!is_application_module(Path::new("/pkg/renamerApp.py")));
        assert!(!is_application_module(Path::new("/pkg/renamer.json")));
        assert!(!is_application_module(Path::new("/pkg/renamerapp.json")));
        assert!(!is_application_module(Path::new("/pkg/packageInfo.json")));
    }

    #[test]
    fn missing_roots_yield_nothing() {
        let scanner = Scanner::with_manifests(["/definitely/not/a/real/path"]).unwrap();
        assert!(scanner.discover().is_empty());
    }
}
