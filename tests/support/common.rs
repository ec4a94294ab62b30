#![allow(dead_code)]

use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// A throwaway search-path root populated with packages and descriptor
// manifests. Removed when dropped.
pub struct PackageTree {
    temp: TempDir,
}

impl PackageTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp: TempDir::new().context("failed to allocate package tree")?,
        })
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    // Create `<root>/<dir_name>/packageInfo.json` declaring `package_name`.
    pub fn add_package(&self, dir_name: &str, package_name: &str) -> Result<PathBuf> {
        let dir = self.root().join(dir_name);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        write_json(
            &dir.join("packageInfo.json"),
            &json!({
                "name": package_name,
                "version": "1.0.0",
                "description": format!("{package_name} fixture"),
                "is_active": true
            }),
        )?;
        Ok(dir)
    }

    // Write `<package_dir>/<stem>.json` with the given application entries.
    pub fn add_manifest(&self, package_dir: &Path, stem: &str, applications: Value) -> Result<PathBuf> {
        let path = package_dir.join(format!("{stem}.json"));
        write_json(
            &path,
            &json!({
                "schema_version": "application_info_v1",
                "applications": applications
            }),
        )?;
        Ok(path)
    }

    pub fn add_raw(&self, relative: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}

pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("failed to write {}", path.display()))
}

// The two-application pool used across the query scenarios: an active
// `Renamer` for every host and an inactive, Maya-only `Viewer`.
pub fn renamer_viewer_tree() -> Result<PackageTree> {
    let tree = PackageTree::new()?;
    let tools = tree.add_package("mTools", "mTools")?;
    tree.add_manifest(
        &tools,
        "toolsApp",
        json!([
            {
                "name": "Renamer",
                "is_active": true,
                "parent_applications": ["all"],
                "keywords": ["batch", "rename"]
            },
            {
                "name": "Viewer",
                "is_active": false,
                "parent_applications": ["maya"]
            }
        ]),
    )?;
    Ok(tree)
}

pub fn names(found: &[meco_application::ApplicationDescriptor]) -> Vec<String> {
    found.iter().map(|desc| desc.name().to_string()).collect()
}
