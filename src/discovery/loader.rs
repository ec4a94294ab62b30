//! Module loaders turn one descriptor module into application settings.
//!
//! A descriptor module is a file named `<stem>App.json` inside a package. The
//! scanner addresses it as `<packageDirectory>.<stem>App` and hands it to each
//! registered loader in turn; the first loader that succeeds wins. Loaders
//! report failure as an error value and never panic on malformed input.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::descriptor::ApplicationInfo;
use crate::package::PackageUnit;
use crate::schema_loader::ManifestSchema;

/// One descriptor module found during a scan.
#[derive(Clone, Debug)]
pub struct ModuleSource<'a> {
    /// Dotted address, `<packageDirectory>.<fileStem>`.
    pub module_path: String,
    pub file: PathBuf,
    pub package: &'a PackageUnit,
}

pub trait ModuleLoader {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn load(&self, source: &ModuleSource<'_>) -> Result<Vec<ApplicationInfo>>;
}

/// Entry point a compiled-in package registers for one of its modules.
pub type DescriptorFactory = fn() -> ApplicationInfo;

/// In-process registry of descriptor factories keyed by module path.
///
/// The module file still has to exist in the package for the scanner to
/// visit it; its contents are ignored when a factory answers for it.
#[derive(Clone, Debug, Default)]
pub struct FactoryRegistry {
    entries: BTreeMap<String, Vec<DescriptorFactory>>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        module_path: impl Into<String>,
        factory: DescriptorFactory,
    ) -> &mut Self {
        self.entries
            .entry(module_path.into())
            .or_default()
            .push(factory);
        self
    }

}

impl ModuleLoader for FactoryRegistry {
    fn name(&self) -> &'static str {
        "factory-registry"
    }

    fn load(&self, source: &ModuleSource<'_>) -> Result<Vec<ApplicationInfo>> {
        let Some(factories) = self.entries.get(&source.module_path) else {
            bail!("no factories registered for {}", source.module_path);
        };
        Ok(factories.iter().map(|factory| factory()).collect())
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    defaults: ApplicationInfo,
    applications: Vec<ApplicationInfo>,
}

/// Reads descriptor modules as JSON manifests validated against the bundled
/// schema. The manifest's `defaults` block is inherited by every entry.
pub struct ManifestLoader {
    schema: ManifestSchema,
}

impl ManifestLoader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            schema: ManifestSchema::bundled()?,
        })
    }
}

impl ModuleLoader for ManifestLoader {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn load(&self, source: &ModuleSource<'_>) -> Result<Vec<ApplicationInfo>> {
        let data = fs::read_to_string(&source.file)
            .with_context(|| format!("reading manifest {}", source.file.display()))?;
        let value: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing manifest {}", source.file.display()))?;
        self.schema.validate(&value, &source.file)?;
        let manifest: Manifest = serde_json::from_value(value)
            .with_context(|| format!("decoding manifest {}", source.file.display()))?;

        let defaults = manifest.defaults;
        Ok(manifest
            .applications
            .into_iter()
            .map(|info| info.inherit(&defaults))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ApplicationDescriptor;
    use crate::package::PackageInfo;
    use serde_json::json;
    use tempfile::TempDir;

    fn package(dir: &std::path::Path) -> PackageUnit {
        PackageUnit {
            name: "mTools".to_string(),
            path: dir.to_path_buf(),
            info: PackageInfo {
                name: "mTools".to_string(),
                metadata: serde_json::Map::new(),
            },
        }
    }

    fn renamer() -> ApplicationInfo {
        ApplicationInfo::named("Renamer").keywords(["rename"])
    }

    fn viewer() -> ApplicationInfo {
        ApplicationInfo::named("Viewer").active(false)
    }

    #[test]
    fn registry_answers_registered_modules_only() {
        let temp = TempDir::new().unwrap();
        let pkg = package(temp.path());
        let mut registry = FactoryRegistry::new();
        registry
            .register("mTools.toolsApp", renamer)
            .register("mTools.toolsApp", viewer);

        let hit = ModuleSource {
            module_path: "mTools.toolsApp".to_string(),
            file: temp.path().join("toolsApp.json"),
            package: &pkg,
        };
        let infos = registry.load(&hit).unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name.as_deref(), Some("Renamer"));
        assert_eq!(infos[1].is_active, Some(false));

        let miss = ModuleSource {
            module_path: "mTools.otherApp".to_string(),
            ..hit
        };
        assert!(registry.load(&miss).is_err());
    }

    #[test]
    fn manifest_entries_inherit_defaults() {
        let temp = TempDir::new().unwrap();
        let pkg = package(temp.path());
        let file = temp.path().join("toolsApp.json");
        fs::write(
            &file,
            json!({
                "schema_version": "application_info_v1",
                "defaults": {"parent_applications": ["maya"], "version_major": 2},
                "applications": [
                    {"name": "Renamer"},
                    {"name": "Viewer", "parent_applications": ["nuke"]}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let loader = ManifestLoader::new().unwrap();
        let source = ModuleSource {
            module_path: "mTools.toolsApp".to_string(),
            file,
            package: &pkg,
        };
        let infos = loader.load(&source).unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(
            infos[0].parent_applications,
            Some(vec![crate::parent::ParentApplication::Maya])
        );
        assert_eq!(
            infos[1].parent_applications,
            Some(vec![crate::parent::ParentApplication::Nuke])
        );
        assert_eq!(infos[1].version_major, Some(2));
    }

    #[test]
    fn explicit_null_opts_out_of_defaults() {
        let temp = TempDir::new().unwrap();
        let pkg = package(temp.path());
        let file = temp.path().join("menuApp.json");
        fs::write(
            &file,
            json!({
                "schema_version": "application_info_v1",
                "defaults": {"menu_path": "Utils", "command": "run"},
                "applications": [
                    {"name": "Hidden", "menu_path": null, "command": null},
                    {"name": "Shown"}
                ]
            })
            .to_string(),
        )
        .unwrap();

        let loader = ManifestLoader::new().unwrap();
        let source = ModuleSource {
            module_path: "mTools.menuApp".to_string(),
            file,
            package: &pkg,
        };
        let descs: Vec<ApplicationDescriptor> = loader
            .load(&source)
            .unwrap()
            .into_iter()
            .map(ApplicationDescriptor::new)
            .collect();
        assert_eq!(descs[0].full_menu_path(), "");
        assert_eq!(descs[0].command(), None);
        assert_eq!(descs[1].full_menu_path(), "Meco/Utils/Shown - 1.0.0");
        assert_eq!(descs[1].command(), Some("run"));
    }

    #[test]
    fn manifest_failures_are_errors() {
        let temp = TempDir::new().unwrap();
        let pkg = package(temp.path());
        let file = temp.path().join("brokenApp.json");
        fs::write(&file, "{ nope").unwrap();
        let loader = ManifestLoader::new().unwrap();
        let source = ModuleSource {
            module_path: "mTools.brokenApp".to_string(),
            file: file.clone(),
            package: &pkg,
        };
        assert!(loader.load(&source).is_err());

        fs::write(&file, json!({"applications": []}).to_string()).unwrap();
        assert!(loader.load(&source).is_err());
    }
}
