use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// File that marks a directory as an installable package.
pub const PACKAGE_INFO_FILE: &str = "packageInfo.json";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
/// Metadata a package declares in `packageInfo.json`.
///
/// Only `name` is interpreted. Everything else is kept verbatim so packages
/// written for other tools stay recognizable whatever shape their extra
/// fields take.
pub struct PackageInfo {
    pub name: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl PackageInfo {
    /// Parse `packageInfo.json` from a package directory.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(PACKAGE_INFO_FILE);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("reading package info {}", path.display()))?;
        let info: PackageInfo = serde_json::from_str(&data)
            .with_context(|| format!("parsing package info {}", path.display()))?;
        if info.name.trim().is_empty() {
            bail!("package info {} declares an empty name", path.display());
        }
        Ok(info)
    }

    /// String-valued metadata field, if present with that type.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    pub fn version(&self) -> Option<&str> {
        self.text("version")
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
/// A directory recognized as an installable unit.
pub struct PackageUnit {
    pub name: String,
    pub path: PathBuf,
    #[serde(skip)]
    pub info: PackageInfo,
}

impl PackageUnit {
    /// Recognize `dir` as a package.
    ///
    /// Errors describe why the directory is not a package; the scanner treats
    /// any error as "skip this directory".
    pub fn recognize(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            bail!("{} is not a directory", dir.display());
        }
        let info = PackageInfo::load(dir)?;
        Ok(Self {
            name: info.name.clone(),
            path: dir.to_path_buf(),
            info,
        })
    }

    /// Case-insensitive package name comparison.
    pub fn name_matches(&self, wanted: &str) -> bool {
        self.name.to_lowercase() == wanted.to_lowercase()
    }

    /// Base name of the package directory, used as the first segment of
    /// module paths.
    pub fn directory_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.name.clone())
    }
}
